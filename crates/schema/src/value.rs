//! Captured value union.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value captured against one section.
///
/// The shape depends on the section type: `Bool` for checkboxes, `Text`
/// for everything string-shaped (free text, numbers, ISO dates, image
/// data-URLs), and `Checklist` for checklist grids. Serialized untagged so
/// stored reports carry the raw scalar/object, not an enum wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Text(String),
    Checklist(ChecklistValue),
}

/// Selection state for a checklist section, keyed by item index.
///
/// Item index is the item's identity. Keys are integers in an ordered map;
/// on the JSON wire they appear as numeric strings (`{"0": true}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChecklistValue {
    #[serde(default, with = "index_map")]
    pub checked: BTreeMap<usize, bool>,
    #[serde(default, with = "index_map")]
    pub notes: BTreeMap<usize, String>,
}

/// Index-keyed maps cross the wire with string keys. Converting explicitly
/// also keeps them deserializable inside the untagged [`Value`], where
/// serde's variant probing only ever sees string keys.
mod index_map {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S, V>(map: &BTreeMap<usize, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        serializer.collect_map(map.iter().map(|(index, value)| (index.to_string(), value)))
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<BTreeMap<usize, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let raw = BTreeMap::<String, V>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, value)| {
                key.parse::<usize>()
                    .map(|index| (index, value))
                    .map_err(|_| D::Error::custom(format!("invalid item index key: {key:?}")))
            })
            .collect()
    }
}

impl ChecklistValue {
    pub fn is_checked(&self, item: usize) -> bool {
        self.checked.get(&item).copied().unwrap_or(false)
    }
}

impl Value {
    /// Empty text value, the seed for most section types.
    pub fn empty_text() -> Self {
        Value::Text(String::new())
    }

    /// Whether this value counts as missing for the required-field check.
    ///
    /// Mirrors the falsy check the capture flow has always used: empty
    /// string and `false` are blank. A checklist value is an object and is
    /// therefore never blank, no matter how little is checked.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Bool(b) => !b,
            Value::Text(s) => s.is_empty(),
            Value::Checklist(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_checklist(&self) -> Option<&ChecklistValue> {
        match self {
            Value::Checklist(v) => Some(v),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty_text()
    }
}
