//! Response envelopes
//!
//! The backend wraps list responses in several ways (a bare array, or an
//! object with `data`, `records` or a collection-named field). The shapes
//! are recognised here once, so callers only ever see a `Vec`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

/// Normalised shape of a list response
#[derive(Debug, Clone, PartialEq)]
pub enum ListEnvelope {
    /// Top-level JSON array
    Bare(Vec<Value>),
    /// Array under a named field
    Wrapped { field: String, items: Vec<Value> },
    /// Nothing usable; treated as an empty list
    Missing,
}

/// A value is "present" unless it is null, false, zero or an empty string.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl ListEnvelope {
    /// Classify a response body. Fields are probed in the order `data`,
    /// `records`, then `collection` (the resource name, `parkir` or `jenis`).
    pub fn from_value(body: Value, collection: &str) -> Self {
        match body {
            Value::Array(items) => Self::Bare(items),
            Value::Object(mut obj) => {
                for field in ["data", "records", collection] {
                    match obj.remove(field) {
                        Some(Value::Array(items)) => {
                            return Self::Wrapped {
                                field: field.to_string(),
                                items,
                            }
                        }
                        // The first present field wins, even if it is not a list.
                        Some(value) if is_present(&value) => return Self::Missing,
                        _ => continue,
                    }
                }
                Self::Missing
            }
            _ => Self::Missing,
        }
    }

    pub fn shape(&self) -> &str {
        match self {
            Self::Bare(_) => "array",
            Self::Wrapped { field, .. } => field,
            Self::Missing => "missing",
        }
    }

    pub fn into_items(self) -> Vec<Value> {
        match self {
            Self::Bare(items) | Self::Wrapped { items, .. } => items,
            Self::Missing => Vec::new(),
        }
    }

    /// Decode each row on its own. Rows that do not decode are logged and
    /// left out, so one bad row never hides the rest of the list.
    pub fn decode<T: DeserializeOwned>(self) -> Vec<T> {
        self.into_items()
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(row = index, error = %e, "Skipping undecodable row");
                    None
                }
            })
            .collect()
    }
}

/// Outcome of a create/update call
#[derive(Debug, Clone, PartialEq)]
pub enum MutationAck {
    /// `{"status": "error", "message": ...}`, even with a 2xx status
    Rejected { message: String },
    /// Anything else. Carries the stored entity when the body echoes one.
    Accepted { item: Option<Value> },
}

impl MutationAck {
    /// `id_field` identifies an echoed entity (`prk_id`, `jpr_id`).
    pub fn from_value(body: Value, id_field: &str) -> Self {
        let Value::Object(mut obj) = body else {
            return Self::Accepted { item: None };
        };

        if status_of(&obj).as_deref() == Some("error") {
            let message = obj
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or("request rejected by the parking service")
                .to_string();
            return Self::Rejected { message };
        }

        if let Some(Value::Object(data)) = obj.remove("data") {
            if data.contains_key(id_field) {
                return Self::Accepted {
                    item: Some(Value::Object(data)),
                };
            }
        }

        if obj.contains_key(id_field) {
            return Self::Accepted {
                item: Some(Value::Object(obj)),
            };
        }

        Self::Accepted { item: None }
    }
}

fn status_of(obj: &Map<String, Value>) -> Option<String> {
    obj.get("status")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_lowercase())
}
