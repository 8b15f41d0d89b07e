//! Structural template validation.

use crate::template::{SectionBody, Template};
use thiserror::Error;

/// Structural problems that make a template unusable for capture.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("section {index} has an empty title")]
    EmptyTitle { index: usize },

    #[error("checklist section '{title}' must have at least one column")]
    InvalidColumns { index: usize, title: String },

    #[error("select section '{title}' has no options")]
    EmptyOptions { index: usize, title: String },
}

/// Checks a template's structural invariants. No side effects.
///
/// Fails on the first offending section: an empty title, a checklist with
/// fewer than one column, or a select with zero options.
pub fn validate_template(template: &Template) -> Result<(), SchemaError> {
    for (index, section) in template.sections.iter().enumerate() {
        if section.title.trim().is_empty() {
            return Err(SchemaError::EmptyTitle { index });
        }
        match &section.body {
            SectionBody::Checklist { columns, .. } if *columns < 1 => {
                return Err(SchemaError::InvalidColumns {
                    index,
                    title: section.title.clone(),
                });
            }
            SectionBody::Select { options, .. } if options.is_empty() => {
                return Err(SchemaError::EmptyOptions {
                    index,
                    title: section.title.clone(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}
