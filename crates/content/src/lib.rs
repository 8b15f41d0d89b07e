//! The capture→materialization pipeline.
//!
//! [`Materializer::materialize`] combines a template, a capture session,
//! and customer/job snapshots into an immutable [`ReportContent`]. The
//! output's section list is a point-in-time copy of the template's sections
//! in template order; later template edits never reach back into a report
//! that was already materialized.
//!
//! Photo normalization is the pipeline's only asynchronous stage, awaited
//! inline so ordering stays auditable. A photo that fails to normalize
//! resolves to its original value; it never fails the materialization.
//! There is no timeout or cancellation once materialization starts.

use chrono::Utc;
use siteform_capture::CaptureSession;
use siteform_imaging::NormalizeOptions;
use siteform_schema::{
    ChecklistValue, CustomerSnapshot, JobSnapshot, ProcessedSection, ReportContent, SectionBody,
    SelectedItem, Template, Value,
};

/// Builds immutable reports from templates and capture sessions.
#[derive(Debug, Clone, Default)]
pub struct Materializer {
    image_opts: NormalizeOptions,
}

impl Materializer {
    pub fn new(image_opts: NormalizeOptions) -> Self {
        Self { image_opts }
    }

    /// Produces one [`ProcessedSection`] per template section, in template
    /// order, then freezes the result with the snapshots and a timestamp.
    pub async fn materialize(
        &self,
        template: &Template,
        session: &CaptureSession,
        customer: CustomerSnapshot,
        job: Option<JobSnapshot>,
    ) -> ReportContent {
        let mut sections = Vec::with_capacity(template.sections.len());
        for (index, section) in template.sections.iter().enumerate() {
            let processed = match &section.body {
                // Author-fixed content; the session is not consulted.
                SectionBody::Static { content } => ProcessedSection {
                    section: section.clone(),
                    value: Value::Text(content.clone()),
                    selected_items: None,
                },
                SectionBody::Checklist {
                    checklist_items, ..
                } => {
                    let value = session
                        .value(index)
                        .cloned()
                        .unwrap_or_else(|| Value::Checklist(ChecklistValue::default()));
                    let selected = match &value {
                        Value::Checklist(checklist) => {
                            selected_items(checklist_items, checklist)
                        }
                        // Legacy shape; degrade to an empty selection.
                        _ => Vec::new(),
                    };
                    ProcessedSection {
                        section: section.clone(),
                        value,
                        selected_items: Some(selected),
                    }
                }
                SectionBody::Photo => {
                    let raw = session.value(index).cloned().unwrap_or_default();
                    let value = match raw {
                        Value::Text(data) if !data.is_empty() => {
                            Value::Text(self.normalize_photo(data).await)
                        }
                        other => other,
                    };
                    ProcessedSection {
                        section: section.clone(),
                        value,
                        selected_items: None,
                    }
                }
                _ => ProcessedSection {
                    section: section.clone(),
                    value: session.value(index).cloned().unwrap_or_default(),
                    selected_items: None,
                },
            };
            sections.push(processed);
        }

        ReportContent {
            template_id: template.id.clone(),
            template_name: template.name.clone(),
            logo: template.logo.clone(),
            sections,
            customer,
            job,
            created_at: Utc::now(),
        }
    }

    /// Runs the normalizer on the blocking pool and awaits it. Failure is
    /// absorbed here: the original value is kept and the report goes on.
    async fn normalize_photo(&self, raw: String) -> String {
        let opts = self.image_opts.clone();
        let input = raw.clone();
        let handle = tokio::task::spawn_blocking(move || siteform_imaging::normalize(&input, &opts));
        match handle.await {
            Ok(Ok(normalized)) => normalized,
            Ok(Err(err)) => {
                log::warn!("photo normalization failed, keeping original value: {err}");
                raw
            }
            Err(err) => {
                log::warn!("photo normalization task did not finish, keeping original value: {err}");
                raw
            }
        }
    }
}

/// Checked items in original `checklist_items` order (never click order),
/// with each item's note when one was captured.
fn selected_items(items: &[String], value: &ChecklistValue) -> Vec<SelectedItem> {
    items
        .iter()
        .enumerate()
        .filter(|(index, _)| value.is_checked(*index))
        .map(|(index, text)| SelectedItem {
            text: text.clone(),
            note: value.notes.get(&index).cloned(),
        })
        .collect()
}
