use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::error::{SeatplanError, SeatplanResult};

/// Honorific appended to a name when the record carries none.
pub const DEFAULT_HONORIFIC: &str = "様";

/// One invitee, as read from the guest-list JSON.
///
/// Every field is optional. Numbers and booleans are accepted where strings are expected, and
/// values of the wrong shape collapse to the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Guest {
    /// Stable unique identifier.
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Suffix shown after the name.
    #[serde(
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub honorific: Option<String>,
    /// Seat-number label rendered as a small badge.
    #[serde(deserialize_with = "lenient_string")]
    pub table: String,
    /// Table-group key the guest is seated at.
    #[serde(deserialize_with = "lenient_string")]
    pub group: String,
    /// String-encoded seat order inside the group.
    #[serde(deserialize_with = "lenient_string")]
    pub table_order: String,
    /// Secondary label (role, relationship).
    #[serde(
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    /// Relative path to a portrait asset.
    #[serde(
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    /// Attendance category.
    #[serde(
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub participation: Option<String>,
}

impl Guest {
    /// Minimal guest for tests and programmatic construction.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style group assignment.
    pub fn in_group(mut self, group: impl Into<String>, table_order: impl Into<String>) -> Self {
        self.group = group.into();
        self.table_order = table_order.into();
        self
    }

    /// Honorific to display, falling back to `default` when absent or blank.
    pub fn honorific_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.honorific.as_deref().map(str::trim) {
            Some(h) if !h.is_empty() => h,
            _ => default,
        }
    }

    /// Portrait path, treating a blank string as absent.
    pub fn image_path(&self) -> Option<&str> {
        self.image.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Secondary label, treating a blank string as absent.
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// An ordered guest list owned by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuestList {
    guests: Vec<Guest>,
}

impl GuestList {
    /// Wrap already-parsed guests. Duplicate ids are logged, not rejected.
    pub fn from_guests(guests: Vec<Guest>) -> Self {
        let mut seen = BTreeSet::new();
        for g in &guests {
            if !g.id.is_empty() && !seen.insert(g.id.as_str()) {
                tracing::warn!(id = %g.id, name = %g.name, "duplicate guest id");
            }
        }
        Self { guests }
    }

    /// Parse a guest list from JSON.
    ///
    /// Accepts either a top-level array of records or an object with a `guests` array. Records
    /// that are not JSON objects are skipped with a warning.
    pub fn from_reader<R: std::io::Read>(r: R) -> SeatplanResult<Self> {
        let root: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| SeatplanError::serde(format!("parse guest list JSON: {e}")))?;

        let records = match root {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Object(mut obj) => match obj.remove("guests") {
                Some(serde_json::Value::Array(items)) => items,
                _ => {
                    return Err(SeatplanError::validation(
                        "guest list object must contain a 'guests' array",
                    ));
                }
            },
            _ => {
                return Err(SeatplanError::validation(
                    "guest list must be a JSON array or an object with 'guests'",
                ));
            }
        };

        let mut guests = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if !record.is_object() {
                tracing::warn!(index, "skipping guest record that is not a JSON object");
                continue;
            }
            match Guest::deserialize(record) {
                Ok(g) => guests.push(g),
                Err(e) => tracing::warn!(index, error = %e, "skipping unreadable guest record"),
            }
        }

        Ok(Self::from_guests(guests))
    }

    /// Parse a guest list from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SeatplanResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SeatplanError::io(format!("open guest list '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Borrow the guests in input order.
    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.guests.len()
    }

    /// `true` when the list holds no records.
    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(match v {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            tracing::debug!("non-scalar guest field replaced with empty value");
            None
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/guests/model.rs"]
mod tests;
