//! Read-only rendering of stored reports.
//!
//! [`render`] turns a [`ReportContent`] into a display tree of
//! [`RenderedSection`]s for the review screen and for downstream PDF/email
//! collaborators that want a structured view. It works exclusively from the
//! data frozen into the report at capture time, never from a live
//! template, so a report renders the same way forever, however much its
//! template has been edited since.

use siteform_schema::{
    ChecklistValue, ProcessedSection, ReportContent, SectionBody, SectionDisplay, SectionLayout,
    SectionWidth, Value,
};

/// One rendered section: the authoring-time presentation fields plus a
/// closed display-node body.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub title: String,
    pub width: SectionWidth,
    pub display: SectionDisplay,
    pub layout: SectionLayout,
    pub body: Vec<DisplayNode>,
}

/// The closed set of things a report section can render as.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayNode {
    /// A run of read-only text (static content, captured answers).
    Paragraph { text: String },
    /// An embedded image, as the stored data-URL.
    Image { data: String },
    /// A checklist grid in row-major cell order. Empty cells are grid
    /// slots the transposition left unfilled and are rendered blank.
    Grid { columns: u32, cells: Vec<GridCell> },
    /// The checked-items summary appended when the section asks for one.
    ItemList { entries: Vec<ItemEntry> },
    /// A degraded-but-not-broken placeholder for missing data.
    Notice { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridCell {
    Item {
        text: String,
        checked: bool,
        note: Option<String>,
    },
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    pub text: String,
    pub note: Option<String>,
}

/// Renders every section of a stored report, in stored order.
pub fn render(report: &ReportContent) -> Vec<RenderedSection> {
    report.sections.iter().map(render_section).collect()
}

/// Renders one section by exhaustive dispatch on its stored type.
pub fn render_section(processed: &ProcessedSection) -> RenderedSection {
    let section = &processed.section;
    let body = match &section.body {
        SectionBody::Static { .. }
        | SectionBody::Text { .. }
        | SectionBody::Textarea { .. }
        | SectionBody::Number { .. }
        | SectionBody::Date { .. }
        | SectionBody::Select { .. } => render_text(&processed.value),
        SectionBody::Checkbox { .. } => render_checkbox(&processed.value),
        SectionBody::Signature | SectionBody::Photo => render_image(&processed.value),
        SectionBody::Checklist {
            columns,
            checklist_items,
            allow_notes,
            summarize_selected,
        } => render_checklist(
            processed,
            *columns,
            checklist_items,
            *allow_notes,
            *summarize_selected,
        ),
    };
    RenderedSection {
        title: section.title.clone(),
        width: section.width,
        display: section.display,
        layout: section.layout,
        body,
    }
}

fn render_text(value: &Value) -> Vec<DisplayNode> {
    let text = value.as_text().unwrap_or_default();
    vec![DisplayNode::Paragraph {
        text: text.to_string(),
    }]
}

fn render_checkbox(value: &Value) -> Vec<DisplayNode> {
    let checked = matches!(value, Value::Bool(true));
    vec![DisplayNode::Paragraph {
        text: if checked { "Yes" } else { "No" }.to_string(),
    }]
}

fn render_image(value: &Value) -> Vec<DisplayNode> {
    match value.as_text() {
        Some(data) if !data.is_empty() => vec![DisplayNode::Image {
            data: data.to_string(),
        }],
        _ => vec![DisplayNode::Notice {
            message: "no image captured".to_string(),
        }],
    }
}

/// Rebuilds the capture-time grid. The `columns` and item list come from
/// the stored section snapshot, never from a live template, so the grid
/// matches what the editor preview showed when the report was captured.
fn render_checklist(
    processed: &ProcessedSection,
    columns: u32,
    items: &[String],
    allow_notes: bool,
    summarize_selected: bool,
) -> Vec<DisplayNode> {
    if items.is_empty() {
        // Malformed or legacy section shape; degrade, don't fail.
        log::debug!(
            "checklist section '{}' has no items defined",
            processed.section.title
        );
        return vec![DisplayNode::Notice {
            message: "no items defined".to_string(),
        }];
    }

    let fallback = ChecklistValue::default();
    let value = processed.value.as_checklist().unwrap_or(&fallback);

    let indexed: Vec<(usize, String)> = items.iter().cloned().enumerate().collect();
    let cells = siteform_grid::transpose(indexed, columns as usize)
        .into_iter()
        .map(|cell| match cell {
            Some((index, text)) => GridCell::Item {
                text,
                checked: value.is_checked(index),
                note: if allow_notes {
                    value.notes.get(&index).cloned()
                } else {
                    None
                },
            },
            None => GridCell::Empty,
        })
        .collect();

    let mut nodes = vec![DisplayNode::Grid { columns, cells }];
    if summarize_selected {
        let entries = processed
            .selected_items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|item| ItemEntry {
                text: item.text.clone(),
                note: item.note.clone(),
            })
            .collect();
        nodes.push(DisplayNode::ItemList { entries });
    }
    nodes
}
