//! The materialized report document.
//!
//! `ReportContent` is the system's sole output contract: PDF and email
//! collaborators consume it read-only as plain nested data. It is a
//! point-in-time snapshot: editing the source template later must never
//! change a report that was already materialized.

use crate::template::Section;
use crate::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable, storable report produced by materialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContent {
    pub template_id: String,
    pub template_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub sections: Vec<ProcessedSection>,
    pub customer: CustomerSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<JobSnapshot>,
    pub created_at: DateTime<Utc>,
}

/// One section of a materialized report: the full authoring-time section
/// snapshot plus the captured (or derived) value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedSection {
    #[serde(flatten)]
    pub section: Section,
    pub value: Value,
    /// Checked checklist items in original item order, never click order.
    /// `None` for non-checklist sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_items: Option<Vec<SelectedItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedItem {
    pub text: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Customer details frozen into the report at materialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
}

/// Job details frozen into the report at materialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSnapshot {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_end: Option<DateTime<Utc>>,
}
