//! The authored template schema: an ordered list of tagged sections.

use serde::{Deserialize, Serialize};

/// A reusable, authored inspection template.
///
/// Templates round-trip through JSON with an ordered `sections` array and
/// the logo embedded as a data-URL string, which is the contract the
/// template store relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Image-as-data-URL string, rendered on report headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

fn default_true() -> bool {
    true
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            is_active: true,
            logo: None,
            sections: Vec::new(),
        }
    }
}

/// One field/block definition within a template.
///
/// The common presentation fields apply to every section; the type-specific
/// payload lives in the flattened [`SectionBody`] union tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub width: SectionWidth,
    #[serde(default)]
    pub display: SectionDisplay,
    #[serde(default)]
    pub layout: SectionLayout,
    #[serde(flatten)]
    pub body: SectionBody,
}

/// Type-specific section payload, tagged by `type` on the wire.
///
/// This is a closed set: adding a variant forces every dispatch site
/// (editor defaults, capture seeding, materialization, rendering) to
/// handle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SectionBody {
    /// Author-fixed content, never captured from a user.
    Static {
        #[serde(default)]
        content: String,
    },
    Text {
        #[serde(default)]
        placeholder: String,
    },
    Textarea {
        #[serde(default)]
        placeholder: String,
    },
    Number {
        #[serde(default)]
        placeholder: String,
    },
    Date {
        #[serde(default)]
        placeholder: String,
    },
    Checkbox {
        #[serde(default)]
        placeholder: String,
    },
    Select {
        #[serde(default)]
        placeholder: String,
        #[serde(default)]
        options: Vec<String>,
    },
    /// Value is an image-as-data-URL captured at runtime.
    Signature,
    /// Like `Signature`, but normalized (resized/recompressed) on submit.
    Photo,
    /// A grid of checkable items.
    ///
    /// An item's position in `checklist_items` IS its identity: selection
    /// state and notes are keyed by that index, not by item text, so
    /// reordering or deleting items re-targets captured selections.
    #[serde(rename_all = "camelCase")]
    Checklist {
        columns: u32,
        #[serde(default)]
        checklist_items: Vec<String>,
        #[serde(default)]
        allow_notes: bool,
        #[serde(default)]
        summarize_selected: bool,
    },
}

impl SectionBody {
    /// The closed discriminant for this body, used for exhaustive dispatch.
    pub fn kind(&self) -> SectionType {
        match self {
            SectionBody::Static { .. } => SectionType::Static,
            SectionBody::Text { .. } => SectionType::Text,
            SectionBody::Textarea { .. } => SectionType::Textarea,
            SectionBody::Number { .. } => SectionType::Number,
            SectionBody::Date { .. } => SectionType::Date,
            SectionBody::Checkbox { .. } => SectionType::Checkbox,
            SectionBody::Select { .. } => SectionType::Select,
            SectionBody::Signature => SectionType::Signature,
            SectionBody::Photo => SectionType::Photo,
            SectionBody::Checklist { .. } => SectionType::Checklist,
        }
    }
}

/// Fieldless section discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Static,
    Text,
    Textarea,
    Number,
    Date,
    Checkbox,
    Select,
    Signature,
    Photo,
    Checklist,
}

impl SectionType {
    /// A string identifier for the section type, used in log messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Static => "static",
            SectionType::Text => "text",
            SectionType::Textarea => "textarea",
            SectionType::Number => "number",
            SectionType::Date => "date",
            SectionType::Checkbox => "checkbox",
            SectionType::Select => "select",
            SectionType::Signature => "signature",
            SectionType::Photo => "photo",
            SectionType::Checklist => "checklist",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionWidth {
    #[default]
    Full,
    Half,
    Third,
    Quarter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionDisplay {
    #[default]
    Block,
    Inline,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionLayout {
    #[default]
    Full,
    Stacked,
    Row,
    Columns,
}
