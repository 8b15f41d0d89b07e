//! An inspection/report template engine.
//!
//! An operator authors a reusable [`Template`] of typed sections, captures
//! field data against it in a [`CaptureSession`], and submits; the
//! capture→materialization pipeline freezes the answers into an immutable
//! [`ReportContent`] that review screens and PDF/email collaborators
//! consume read-only.
//!
//! The workspace crates mirror that flow: `siteform-schema` holds the data
//! model, `siteform-grid` the checklist transposition, `siteform-imaging`
//! the photo normalizer, `siteform-editor`/`siteform-capture` the two
//! mutable surfaces, `siteform-content` the pipeline, `siteform-render`
//! the read-only display tree, and `siteform-traits` the store seams. This
//! crate re-exports the public surface and owns runtime wiring.

pub use siteform_capture::{CaptureError, CaptureSession};
pub use siteform_content::Materializer;
pub use siteform_core::{ReportService, ServiceError};
pub use siteform_editor::{EditError, FieldEdit, TemplateEditor};
pub use siteform_grid::transpose;
pub use siteform_imaging::{ImageError, NormalizeOptions, normalize};
pub use siteform_render::{DisplayNode, GridCell, ItemEntry, RenderedSection, render};
pub use siteform_schema::{
    ChecklistValue, CustomerSnapshot, JobSnapshot, ProcessedSection, ReportContent, SchemaError,
    Section, SectionBody, SectionDisplay, SectionLayout, SectionType, SectionWidth, SelectedItem,
    Template, Value, validate_template,
};
pub use siteform_traits::{
    CustomerProvider, InMemoryCustomerProvider, InMemoryJobProvider, InMemoryReportStore,
    InMemoryTemplateStore, JobProvider, JsonFileTemplateStore, ReportStore, StoreError,
    TemplateStore,
};

/// Initializes env_logger with a default filter of `info`.
///
/// Call once at startup; library code only ever uses the `log` facade.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
