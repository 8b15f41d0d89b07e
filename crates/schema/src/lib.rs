//! Data model for inspection report templates and materialized reports.
//!
//! This crate defines the types shared by every stage of the pipeline:
//! the authored [`Template`] with its tagged [`Section`] union, the
//! [`Value`] union captured against a template, and the immutable
//! [`ReportContent`] document produced by materialization. It carries no
//! behavior beyond structural validation.

pub mod content;
pub mod template;
pub mod validate;
pub mod value;

pub use content::{CustomerSnapshot, JobSnapshot, ProcessedSection, ReportContent, SelectedItem};
pub use template::{
    Section, SectionBody, SectionDisplay, SectionLayout, SectionType, SectionWidth, Template,
};
pub use validate::{SchemaError, validate_template};
pub use value::{ChecklistValue, Value};
