//! Demo walkthrough: author a template, capture against it, and print the
//! materialized report as JSON.

use siteform::{
    CaptureSession, CustomerSnapshot, FieldEdit, InMemoryReportStore, InMemoryTemplateStore,
    Materializer, ReportService, SectionType, TemplateEditor, Value, render,
};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    siteform::init_logging();

    // Author a small inspection template.
    let mut editor = TemplateEditor::blank("demo-visit", "Demo site visit");
    let name = editor.add_section(SectionType::Text);
    editor.apply(name, FieldEdit::Title("Engineer".to_string()))?;
    editor.apply(name, FieldEdit::Required(true))?;

    let checks = editor.add_section(SectionType::Checklist);
    editor.apply(checks, FieldEdit::Title("Safety checks".to_string()))?;
    editor.replace_checklist_items(checks, "Gloves\nGoggles\nHarness\nSigns\nBarriers")?;
    editor.apply(checks, FieldEdit::AllowNotes(true))?;
    editor.apply(checks, FieldEdit::SummarizeSelected(true))?;
    log::info!("author preview grid: {:?}", editor.preview_grid(checks)?);

    let reports = Arc::new(InMemoryReportStore::new());
    let service = ReportService::new(Arc::new(InMemoryTemplateStore::new()), reports.clone());
    let template = service.save_template(editor.finish())?;

    // Capture on site.
    let mut session = CaptureSession::start(&template);
    session.set_value(name, Value::Text("Ada Lovelace".to_string()))?;
    session.set_checklist_value(checks, 0, true)?;
    session.set_checklist_value(checks, 3, true)?;
    session.set_checklist_note(checks, 3, "one sign faded")?;

    let customer = CustomerSnapshot {
        id: "c-1".to_string(),
        name: "Acme Water".to_string(),
        company: "Acme Water Ltd".to_string(),
        email: "ops@acme.example".to_string(),
    };

    // Materialize once to show the output contract, then submit for real.
    let report = Materializer::default()
        .materialize(&template, &session, customer.clone(), None)
        .await;
    for section in render(&report) {
        log::info!("rendered section '{}': {:?}", section.title, section.body);
    }

    let report_id = service.submit(&template, &session, customer, None).await?;
    log::info!("stored report {report_id}");

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
