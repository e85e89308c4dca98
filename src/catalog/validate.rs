//! Schema validation with per-record skip semantics.
//!
//! Validation never aborts the run: each record collects its full list of
//! issues, and records with any issue are excluded from the cleaned set
//! while processing continues. Only the loader has a fatal tier.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::catalog::model::{BookRecord, RawRecord, RejectedRecord, SpiceLevel};
use crate::config::SchemaProfile;

/// Trimmed descriptions below this length read as placeholders and would
/// produce poor embeddings.
pub const MIN_DESCRIPTION_CHARS: usize = 40;

/// A single schema problem found in one record.
///
/// Issues are data, not failures: they are collected per record, logged,
/// and attached to the [`RejectedRecord`] while the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("missing field: {field}")]
    MissingField { field: &'static str },

    #[error("id must be a string")]
    IdNotText,

    #[error("title must be a string")]
    TitleNotText,

    #[error("authors must be a list of strings")]
    AuthorsNotTextList,

    #[error("description must be a string with at least {min} characters")]
    DescriptionTooShort { min: usize },

    #[error("genres must be a list of strings")]
    GenresNotTextList,

    #[error("tropes must be a list of strings")]
    TropesNotTextList,

    #[error("spice_level must be one of: low|medium|high|unknown")]
    SpiceLevelNotRecognized,

    #[error("source_url must be a string (URL)")]
    SourceUrlNotText,

    #[error("rating must be a number")]
    RatingNotNumber,

    #[error("year must be an integer")]
    YearNotInteger,

    #[error("duplicate id: {id}")]
    DuplicateId { id: String },

    #[error("record failed typed promotion: {message}")]
    Promotion { message: String },
}

fn is_text_list(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}

/// Check one record against the schema.
///
/// All checks run; nothing short-circuits, so a record can surface several
/// issues at once. A missing field is reported once by the presence check
/// and is not re-checked for type. Type checks for `id`, `rating`, and
/// `year` run whenever the field exists regardless of profile, because the
/// reporters and the metadata builder consume them.
pub fn validate(record: &RawRecord, schema: SchemaProfile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for &field in schema.required_fields() {
        if !record.contains_key(field) {
            issues.push(ValidationIssue::MissingField { field });
        }
    }

    if let Some(id) = record.get("id") {
        if !id.is_string() {
            issues.push(ValidationIssue::IdNotText);
        }
    }

    if let Some(title) = record.get("title") {
        if !title.is_string() {
            issues.push(ValidationIssue::TitleNotText);
        }
    }

    if let Some(authors) = record.get("authors") {
        if !is_text_list(authors) {
            issues.push(ValidationIssue::AuthorsNotTextList);
        }
    }

    if let Some(description) = record.get("description") {
        let long_enough = description
            .as_str()
            .is_some_and(|text| text.trim().chars().count() >= MIN_DESCRIPTION_CHARS);
        if !long_enough {
            issues.push(ValidationIssue::DescriptionTooShort {
                min: MIN_DESCRIPTION_CHARS,
            });
        }
    }

    if let Some(genres) = record.get("genres") {
        if !is_text_list(genres) {
            issues.push(ValidationIssue::GenresNotTextList);
        }
    }

    if let Some(tropes) = record.get("tropes") {
        if !is_text_list(tropes) {
            issues.push(ValidationIssue::TropesNotTextList);
        }
    }

    if let Some(spice) = record.get("spice_level") {
        let recognized = spice.as_str().and_then(SpiceLevel::parse).is_some();
        if !recognized {
            issues.push(ValidationIssue::SpiceLevelNotRecognized);
        }
    }

    if let Some(url) = record.get("source_url") {
        if !url.is_string() {
            issues.push(ValidationIssue::SourceUrlNotText);
        }
    }

    if let Some(rating) = record.get("rating") {
        if !rating.is_number() {
            issues.push(ValidationIssue::RatingNotNumber);
        }
    }

    if let Some(year) = record.get("year") {
        if year.as_i64().is_none() {
            issues.push(ValidationIssue::YearNotInteger);
        }
    }

    issues
}

/// Run the cross-record pass: validate each record, enforce id uniqueness,
/// and promote survivors to typed [`BookRecord`]s.
///
/// Order-preserving on both sides. The first occurrence of an id wins;
/// later occurrences are rejected with a duplicate-id issue.
pub fn validate_all(
    records: Vec<RawRecord>,
    schema: SchemaProfile,
) -> (Vec<BookRecord>, Vec<RejectedRecord>) {
    let mut cleaned = Vec::new();
    let mut rejected = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for record in records {
        let id = record.get("id").and_then(Value::as_str).map(str::to_owned);
        let title = record
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let mut issues = validate(&record, schema);

        if let Some(ref id) = id {
            if !seen_ids.insert(id.clone()) {
                issues.push(ValidationIssue::DuplicateId { id: id.clone() });
            }
        }

        if !issues.is_empty() {
            rejected.push(RejectedRecord { id, title, issues });
            continue;
        }

        match BookRecord::from_raw(record) {
            Ok(book) => cleaned.push(book),
            // Unreachable when the checks above and the struct agree; kept
            // as a rejection so schema drift surfaces in the report rather
            // than as a panic.
            Err(e) => rejected.push(RejectedRecord {
                id,
                title,
                issues: vec![ValidationIssue::Promotion {
                    message: e.to_string(),
                }],
            }),
        }
    }

    (cleaned, rejected)
}
