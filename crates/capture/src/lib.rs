//! In-progress capture of field data against a template.
//!
//! A [`CaptureSession`] holds the answers for one template instance while
//! the operator is on site. It is created when a template is selected,
//! seeded with type-appropriate defaults, mutated by field edits, and
//! discarded on submit or cancel, never persisted. One user edits
//! one session at a time; nothing here needs locking.

use siteform_schema::{ChecklistValue, SectionBody, SectionType, Template, Value};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The first required section left unanswered, named for the user.
    #[error("'{title}' is required")]
    MissingRequired { title: String },

    #[error("no section at index {0}")]
    SectionOutOfRange(usize),

    #[error("section at index {0} does not hold a checklist value")]
    NotAChecklist(usize),
}

/// The in-progress answers for one template instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSession {
    values: BTreeMap<usize, Value>,
    section_count: usize,
}

impl CaptureSession {
    /// Opens a session against a template, seeding every section with a
    /// type-appropriate default: checkbox `false`, date today, checklist
    /// empty selection, everything else the empty string.
    pub fn start(template: &Template) -> Self {
        let today = chrono::Local::now().date_naive().to_string();
        let values = template
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| (index, seed_value(&section.body, &today)))
            .collect();
        log::debug!(
            "capture session opened for template '{}' with {} sections",
            template.id,
            template.sections.len()
        );
        Self {
            values,
            section_count: template.sections.len(),
        }
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(&index)
    }

    /// Replaces the value of a plain section.
    pub fn set_value(&mut self, index: usize, value: Value) -> Result<(), CaptureError> {
        if index >= self.section_count {
            return Err(CaptureError::SectionOutOfRange(index));
        }
        self.values.insert(index, value);
        Ok(())
    }

    /// Sets one checklist item's checked state.
    ///
    /// Unchecking an item also discards any note stored against it, so
    /// re-checking later starts with a clean note.
    pub fn set_checklist_value(
        &mut self,
        index: usize,
        item: usize,
        checked: bool,
    ) -> Result<(), CaptureError> {
        let value = self.checklist_mut(index)?;
        value.checked.insert(item, checked);
        if !checked {
            value.notes.remove(&item);
        }
        Ok(())
    }

    /// Sets a note on a checklist item, checked or not; the capture UI has
    /// never guarded notes behind the checkbox.
    pub fn set_checklist_note(
        &mut self,
        index: usize,
        item: usize,
        text: impl Into<String>,
    ) -> Result<(), CaptureError> {
        let value = self.checklist_mut(index)?;
        value.notes.insert(item, text.into());
        Ok(())
    }

    /// Scans sections in template order and fails on the FIRST one that is
    /// required, capturable, and still blank. Static sections are never
    /// captured, so they are skipped. A checklist value is an object and is
    /// never blank, so a required checklist cannot fail this check. That is
    /// long-standing behavior, kept as-is.
    pub fn validate(&self, template: &Template) -> Result<(), CaptureError> {
        for (index, section) in template.sections.iter().enumerate() {
            if !section.required || section.body.kind() == SectionType::Static {
                continue;
            }
            let blank = self
                .values
                .get(&index)
                .map(Value::is_blank)
                .unwrap_or(true);
            if blank {
                return Err(CaptureError::MissingRequired {
                    title: section.title.clone(),
                });
            }
        }
        Ok(())
    }

    fn checklist_mut(&mut self, index: usize) -> Result<&mut ChecklistValue, CaptureError> {
        if index >= self.section_count {
            return Err(CaptureError::SectionOutOfRange(index));
        }
        match self
            .values
            .entry(index)
            .or_insert_with(|| Value::Checklist(ChecklistValue::default()))
        {
            Value::Checklist(value) => Ok(value),
            _ => Err(CaptureError::NotAChecklist(index)),
        }
    }
}

fn seed_value(body: &SectionBody, today: &str) -> Value {
    match body.kind() {
        SectionType::Checkbox => Value::Bool(false),
        SectionType::Date => Value::Text(today.to_string()),
        SectionType::Checklist => Value::Checklist(ChecklistValue::default()),
        SectionType::Static
        | SectionType::Text
        | SectionType::Textarea
        | SectionType::Number
        | SectionType::Select
        | SectionType::Signature
        | SectionType::Photo => Value::empty_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteform_schema::{Section, SectionDisplay, SectionLayout, SectionWidth};

    fn section(title: &str, required: bool, body: SectionBody) -> Section {
        Section {
            title: title.to_string(),
            required,
            width: SectionWidth::Full,
            display: SectionDisplay::Block,
            layout: SectionLayout::Full,
            body,
        }
    }

    fn template_with(sections: Vec<Section>) -> Template {
        let mut template = Template::new("t-1", "Site visit");
        template.sections = sections;
        template
    }

    #[test]
    fn test_seeding_defaults() {
        let template = template_with(vec![
            section("Done", false, SectionBody::Checkbox { placeholder: String::new() }),
            section("Visited on", false, SectionBody::Date { placeholder: String::new() }),
            section(
                "Checks",
                false,
                SectionBody::Checklist {
                    columns: 2,
                    checklist_items: vec!["a".to_string()],
                    allow_notes: false,
                    summarize_selected: false,
                },
            ),
            section("Name", false, SectionBody::Text { placeholder: String::new() }),
        ]);
        let session = CaptureSession::start(&template);

        assert_eq!(session.value(0), Some(&Value::Bool(false)));
        let today = chrono::Local::now().date_naive().to_string();
        assert_eq!(session.value(1), Some(&Value::Text(today)));
        assert_eq!(
            session.value(2),
            Some(&Value::Checklist(ChecklistValue::default()))
        );
        assert_eq!(session.value(3), Some(&Value::empty_text()));
    }

    #[test]
    fn test_required_text_blocks_and_names_section() {
        let template = template_with(vec![
            section("Operator name", true, SectionBody::Text { placeholder: String::new() }),
            section("Notes", true, SectionBody::Textarea { placeholder: String::new() }),
        ]);
        let mut session = CaptureSession::start(&template);

        // First violation wins; only one section is named.
        let err = session.validate(&template).unwrap_err();
        assert_eq!(
            err,
            CaptureError::MissingRequired {
                title: "Operator name".to_string()
            }
        );

        session
            .set_value(0, Value::Text("Ada".to_string()))
            .unwrap();
        let err = session.validate(&template).unwrap_err();
        assert_eq!(
            err,
            CaptureError::MissingRequired {
                title: "Notes".to_string()
            }
        );
    }

    #[test]
    fn test_required_checkbox_blocks_until_true() {
        let template = template_with(vec![section(
            "Confirmed safe",
            true,
            SectionBody::Checkbox { placeholder: String::new() },
        )]);
        let mut session = CaptureSession::start(&template);

        assert!(session.validate(&template).is_err());
        session.set_value(0, Value::Bool(true)).unwrap();
        assert!(session.validate(&template).is_ok());
    }

    #[test]
    fn test_required_checklist_never_blocks() {
        // The raw checklist value is an object, never blank, so a required
        // checklist with nothing checked passes. Long-standing gap; this
        // test pins the behavior rather than fixing it.
        let template = template_with(vec![section(
            "Checks",
            true,
            SectionBody::Checklist {
                columns: 2,
                checklist_items: vec!["a".to_string(), "b".to_string()],
                allow_notes: true,
                summarize_selected: false,
            },
        )]);
        let session = CaptureSession::start(&template);
        assert!(session.validate(&template).is_ok());
    }

    #[test]
    fn test_required_static_is_skipped() {
        let template = template_with(vec![section(
            "Disclaimer",
            true,
            SectionBody::Static {
                content: "shown, not captured".to_string(),
            },
        )]);
        let session = CaptureSession::start(&template);
        assert!(session.validate(&template).is_ok());
    }

    #[test]
    fn test_uncheck_discards_note() {
        let template = template_with(vec![section(
            "Checks",
            false,
            SectionBody::Checklist {
                columns: 1,
                checklist_items: vec!["hinge".to_string()],
                allow_notes: true,
                summarize_selected: false,
            },
        )]);
        let mut session = CaptureSession::start(&template);

        session.set_checklist_value(0, 0, true).unwrap();
        session.set_checklist_note(0, 0, "squeaks").unwrap();
        session.set_checklist_value(0, 0, false).unwrap();
        session.set_checklist_value(0, 0, true).unwrap();

        let value = session.value(0).unwrap().as_checklist().unwrap();
        assert!(value.is_checked(0));
        assert!(value.notes.get(&0).is_none());
    }

    #[test]
    fn test_note_allowed_on_unchecked_item() {
        let template = template_with(vec![section(
            "Checks",
            false,
            SectionBody::Checklist {
                columns: 1,
                checklist_items: vec!["hinge".to_string()],
                allow_notes: true,
                summarize_selected: false,
            },
        )]);
        let mut session = CaptureSession::start(&template);

        session.set_checklist_note(0, 0, "not inspected").unwrap();
        let value = session.value(0).unwrap().as_checklist().unwrap();
        assert!(!value.is_checked(0));
        assert_eq!(value.notes.get(&0).map(String::as_str), Some("not inspected"));
    }

    #[test]
    fn test_checklist_ops_on_plain_section_fail() {
        let template = template_with(vec![section(
            "Name",
            false,
            SectionBody::Text { placeholder: String::new() },
        )]);
        let mut session = CaptureSession::start(&template);

        assert_eq!(
            session.set_checklist_value(0, 0, true),
            Err(CaptureError::NotAChecklist(0))
        );
        assert_eq!(
            session.set_value(9, Value::Bool(true)),
            Err(CaptureError::SectionOutOfRange(9))
        );
    }
}
