//! Core data types for the seed catalog.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::validate::ValidationIssue;

/// A record exactly as it appears in the seed file: an untyped JSON object.
///
/// Raw records are mutated in place by normalization and inspected (never
/// mutated) by validation.
pub type RawRecord = serde_json::Map<String, Value>;

/// Reader-facing spice rating carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiceLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl SpiceLevel {
    /// The accepted seed-file tokens, in declaration order.
    pub const TOKENS: [&'static str; 4] = ["low", "medium", "high", "unknown"];

    /// Lowercase token as it appears in the seed file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a seed-file token. Returns `None` for anything outside the enum.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for SpiceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully validated book record.
///
/// Values of this type exist only on the far side of validation: every
/// required field is present and correctly typed, `title` and `description`
/// are normalized, and `id` is unique within the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    /// Opaque identifier; becomes the vector-store primary key, so it must
    /// be stable across runs.
    pub id: String,
    pub title: String,
    /// Display order is significant.
    pub authors: Vec<String>,
    pub description: String,
    pub genres: Vec<String>,
    pub tropes: Vec<String>,
    pub spice_level: SpiceLevel,
    pub source_url: String,
    /// Required under the extended schema only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Required under the extended schema only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
}

impl BookRecord {
    /// Promote a raw record into its typed form.
    ///
    /// Callers must have validated the record first; the validator's checks
    /// cover everything deserialization requires.
    pub(crate) fn from_raw(raw: RawRecord) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(raw))
    }
}

/// A record excluded from the cleaned set, with the reasons why.
#[derive(Debug, Clone)]
pub struct RejectedRecord {
    /// The record's `id`, when it was present and a string.
    pub id: Option<String>,
    /// The record's `title`, when it was present and a string.
    pub title: Option<String>,
    pub issues: Vec<ValidationIssue>,
}

impl RejectedRecord {
    /// `"{id} - {title}"` with placeholders for whichever is unavailable.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.id.as_deref().unwrap_or("(no id)"),
            self.title.as_deref().unwrap_or("(untitled)")
        )
    }
}
