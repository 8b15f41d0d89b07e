//! Template authoring.
//!
//! [`TemplateEditor`] owns a working copy of a template and exposes the
//! mutations the authoring screen needs: append typed sections with
//! sensible defaults, reorder or remove them, edit one field at a time,
//! and edit checklist item lists either per item or as a bulk paste.
//! The live preview goes through the same transposer the report renderer
//! uses, so authors see exactly the grid a finished report will show.

use siteform_schema::{
    Section, SectionBody, SectionDisplay, SectionLayout, SectionType, SectionWidth, Template,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no section at index {0}")]
    SectionOutOfRange(usize),

    #[error("section '{title}' has no checklist item at index {item}")]
    ItemOutOfRange { title: String, item: usize },

    #[error("{edit} does not apply to {kind} section '{title}'")]
    FieldMismatch {
        edit: &'static str,
        kind: SectionType,
        title: String,
    },
}

/// A single-field mutation, one variant per editable field.
///
/// The authoring screen historically set fields by name; the closed enum
/// keeps that one-field-at-a-time shape while making an edit that does not
/// fit the section's type a compile-visible, testable error.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Title(String),
    Required(bool),
    Width(SectionWidth),
    Display(SectionDisplay),
    Layout(SectionLayout),
    Placeholder(String),
    Content(String),
    Options(Vec<String>),
    Columns(u32),
    AllowNotes(bool),
    SummarizeSelected(bool),
}

impl FieldEdit {
    fn name(&self) -> &'static str {
        match self {
            FieldEdit::Title(_) => "title",
            FieldEdit::Required(_) => "required",
            FieldEdit::Width(_) => "width",
            FieldEdit::Display(_) => "display",
            FieldEdit::Layout(_) => "layout",
            FieldEdit::Placeholder(_) => "placeholder",
            FieldEdit::Content(_) => "content",
            FieldEdit::Options(_) => "options",
            FieldEdit::Columns(_) => "columns",
            FieldEdit::AllowNotes(_) => "allowNotes",
            FieldEdit::SummarizeSelected(_) => "summarizeSelected",
        }
    }
}

/// Authors and mutates a working copy of a [`Template`].
#[derive(Debug, Clone)]
pub struct TemplateEditor {
    template: Template,
}

impl TemplateEditor {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Starts a fresh template with no sections.
    pub fn blank(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            template: Template::new(id, name),
        }
    }

    /// Read access to the working copy.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Consumes the editor, returning the edited template.
    pub fn finish(self) -> Template {
        self.template
    }

    /// Appends a section with type-appropriate defaults and returns its index.
    pub fn add_section(&mut self, kind: SectionType) -> usize {
        let section = default_section(kind);
        log::debug!("adding {kind} section to template '{}'", self.template.id);
        self.template.sections.push(section);
        self.template.sections.len() - 1
    }

    pub fn remove_section(&mut self, index: usize) -> Result<Section, EditError> {
        if index >= self.template.sections.len() {
            return Err(EditError::SectionOutOfRange(index));
        }
        Ok(self.template.sections.remove(index))
    }

    /// Swaps the section with its predecessor. No-op for the first section.
    pub fn move_section_up(&mut self, index: usize) -> Result<(), EditError> {
        if index >= self.template.sections.len() {
            return Err(EditError::SectionOutOfRange(index));
        }
        if index > 0 {
            self.template.sections.swap(index - 1, index);
        }
        Ok(())
    }

    /// Swaps the section with its successor. No-op for the last section.
    pub fn move_section_down(&mut self, index: usize) -> Result<(), EditError> {
        let len = self.template.sections.len();
        if index >= len {
            return Err(EditError::SectionOutOfRange(index));
        }
        if index + 1 < len {
            self.template.sections.swap(index, index + 1);
        }
        Ok(())
    }

    /// Applies a single-field edit to the section at `index`.
    pub fn apply(&mut self, index: usize, edit: FieldEdit) -> Result<(), EditError> {
        let section = self
            .template
            .sections
            .get_mut(index)
            .ok_or(EditError::SectionOutOfRange(index))?;

        let mismatch = |edit: &FieldEdit, section: &Section| EditError::FieldMismatch {
            edit: edit.name(),
            kind: section.body.kind(),
            title: section.title.clone(),
        };

        match edit {
            FieldEdit::Title(title) => section.title = title,
            FieldEdit::Required(required) => section.required = required,
            FieldEdit::Width(width) => section.width = width,
            FieldEdit::Display(display) => section.display = display,
            FieldEdit::Layout(layout) => section.layout = layout,
            FieldEdit::Placeholder(text) => match &mut section.body {
                SectionBody::Text { placeholder }
                | SectionBody::Textarea { placeholder }
                | SectionBody::Number { placeholder }
                | SectionBody::Date { placeholder }
                | SectionBody::Checkbox { placeholder }
                | SectionBody::Select { placeholder, .. } => *placeholder = text,
                _ => return Err(mismatch(&FieldEdit::Placeholder(text), section)),
            },
            FieldEdit::Content(text) => match &mut section.body {
                SectionBody::Static { content } => *content = text,
                _ => return Err(mismatch(&FieldEdit::Content(text), section)),
            },
            FieldEdit::Options(new_options) => match &mut section.body {
                SectionBody::Select { options, .. } => *options = new_options,
                _ => return Err(mismatch(&FieldEdit::Options(new_options), section)),
            },
            FieldEdit::Columns(count) => match &mut section.body {
                SectionBody::Checklist { columns, .. } => *columns = count,
                _ => return Err(mismatch(&FieldEdit::Columns(count), section)),
            },
            FieldEdit::AllowNotes(allow) => match &mut section.body {
                SectionBody::Checklist { allow_notes, .. } => *allow_notes = allow,
                _ => return Err(mismatch(&FieldEdit::AllowNotes(allow), section)),
            },
            FieldEdit::SummarizeSelected(summarize) => match &mut section.body {
                SectionBody::Checklist {
                    summarize_selected, ..
                } => *summarize_selected = summarize,
                _ => return Err(mismatch(&FieldEdit::SummarizeSelected(summarize), section)),
            },
        }
        Ok(())
    }

    /// Appends a checklist item. Index is identity: the new item gets the
    /// next index and existing captured selections are untouched.
    pub fn add_checklist_item(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<usize, EditError> {
        let items = self.checklist_items_mut(index)?;
        items.push(text.into());
        Ok(items.len() - 1)
    }

    pub fn set_checklist_item(
        &mut self,
        index: usize,
        item: usize,
        text: impl Into<String>,
    ) -> Result<(), EditError> {
        let title = self.section_title(index)?;
        let items = self.checklist_items_mut(index)?;
        match items.get_mut(item) {
            Some(slot) => {
                *slot = text.into();
                Ok(())
            }
            None => Err(EditError::ItemOutOfRange { title, item }),
        }
    }

    /// Removes one checklist item. Items after it shift down an index, which
    /// silently re-targets any selections already captured against them.
    pub fn remove_checklist_item(&mut self, index: usize, item: usize) -> Result<String, EditError> {
        let title = self.section_title(index)?;
        let items = self.checklist_items_mut(index)?;
        if item >= items.len() {
            return Err(EditError::ItemOutOfRange { title, item });
        }
        Ok(items.remove(item))
    }

    /// Replaces the whole item list from newline-delimited text, the bulk
    /// paste path. Blank lines are dropped; surrounding whitespace trimmed.
    pub fn replace_checklist_items(&mut self, index: usize, text: &str) -> Result<(), EditError> {
        let items = self.checklist_items_mut(index)?;
        *items = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Ok(())
    }

    /// The grid the checklist will render as, for the authoring preview.
    ///
    /// Goes through the shared transposer so the preview and the finished
    /// report can never disagree. `None` cells are the grid's empty slots.
    pub fn preview_grid(&self, index: usize) -> Result<Vec<Option<String>>, EditError> {
        let section = self
            .template
            .sections
            .get(index)
            .ok_or(EditError::SectionOutOfRange(index))?;
        match &section.body {
            SectionBody::Checklist {
                columns,
                checklist_items,
                ..
            } => Ok(siteform_grid::transpose(
                checklist_items.clone(),
                *columns as usize,
            )),
            _ => Err(EditError::FieldMismatch {
                edit: "preview",
                kind: section.body.kind(),
                title: section.title.clone(),
            }),
        }
    }

    fn section_title(&self, index: usize) -> Result<String, EditError> {
        self.template
            .sections
            .get(index)
            .map(|s| s.title.clone())
            .ok_or(EditError::SectionOutOfRange(index))
    }

    fn checklist_items_mut(&mut self, index: usize) -> Result<&mut Vec<String>, EditError> {
        let section = self
            .template
            .sections
            .get_mut(index)
            .ok_or(EditError::SectionOutOfRange(index))?;
        let kind = section.body.kind();
        let title = section.title.clone();
        match &mut section.body {
            SectionBody::Checklist {
                checklist_items, ..
            } => Ok(checklist_items),
            _ => Err(EditError::FieldMismatch {
                edit: "checklist items",
                kind,
                title,
            }),
        }
    }
}

/// A freshly added section of the given type, with authoring defaults.
fn default_section(kind: SectionType) -> Section {
    let body = match kind {
        SectionType::Static => SectionBody::Static {
            content: String::new(),
        },
        SectionType::Text => SectionBody::Text {
            placeholder: String::new(),
        },
        SectionType::Textarea => SectionBody::Textarea {
            placeholder: String::new(),
        },
        SectionType::Number => SectionBody::Number {
            placeholder: String::new(),
        },
        SectionType::Date => SectionBody::Date {
            placeholder: String::new(),
        },
        SectionType::Checkbox => SectionBody::Checkbox {
            placeholder: String::new(),
        },
        SectionType::Select => SectionBody::Select {
            placeholder: String::new(),
            options: Vec::new(),
        },
        SectionType::Signature => SectionBody::Signature,
        SectionType::Photo => SectionBody::Photo,
        SectionType::Checklist => SectionBody::Checklist {
            columns: 2,
            checklist_items: (1..=4).map(|i| format!("Item {i}")).collect(),
            allow_notes: false,
            summarize_selected: false,
        },
    };
    Section {
        title: String::new(),
        required: false,
        width: SectionWidth::Full,
        display: SectionDisplay::Block,
        layout: SectionLayout::Full,
        body,
    }
}
