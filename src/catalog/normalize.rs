//! Free-text cleanup for `title` and `description`.
//!
//! Seed data scraped from the web carries HTML fragments and ragged
//! whitespace; both degrade embedding quality, so they are stripped before
//! validation.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::catalog::model::RawRecord;

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Fields rewritten in place by [`normalize_all`].
const NORMALIZED_FIELDS: [&str; 2] = ["title", "description"];

/// Strip tag-shaped substrings and collapse whitespace.
///
/// Every `<...>` span becomes a single space, runs of whitespace collapse
/// to one space, and the result is trimmed. Pure and idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let without_tags = RE_TAG.replace_all(text, " ");
    RE_WHITESPACE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Normalize `title` and `description` in place across all records.
///
/// Only existing string values are rewritten. Missing fields stay missing
/// so the validator's presence check still fires, and non-string values are
/// left untouched for the validator to flag.
pub fn normalize_all(records: &mut [RawRecord]) {
    for record in records.iter_mut() {
        for field in NORMALIZED_FIELDS {
            if let Some(Value::String(text)) = record.get_mut(field) {
                *text = normalize(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        assert_eq!(
            normalize("<p>A  duke's\n\nsecret</p> <br/>bargain"),
            "A duke's secret bargain"
        );
    }

    #[test]
    fn trims_leading_and_trailing_whitespace() {
        assert_eq!(normalize("   spaced   out   "), "spaced out");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("<div></div>"), "");
    }

    #[test]
    fn unclosed_bracket_is_left_alone() {
        assert_eq!(normalize("rated 4 < 5 stars"), "rated 4 < 5 stars");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "<b>Bold</b>   claim",
            "already clean",
            "  <i>nested <u>tags</u></i>  here ",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn no_consecutive_whitespace_survives() {
        let out = normalize("a\t\tb<br> <br>c  \n d");
        assert!(!out.contains("  "));
        assert!(!out.contains('\n'));
        assert!(!out.contains('\t'));
    }

    #[test]
    fn normalize_all_rewrites_only_title_and_description() {
        let mut records = vec![
            serde_json::from_value::<RawRecord>(json!({
                "title": "  <em>Thorns</em> ",
                "description": "A  story.",
                "source_url": "  <keep>  "
            }))
            .unwrap(),
        ];
        normalize_all(&mut records);
        assert_eq!(records[0]["title"], "Thorns");
        assert_eq!(records[0]["description"], "A story.");
        // Other fields are never touched.
        assert_eq!(records[0]["source_url"], "  <keep>  ");
    }

    #[test]
    fn normalize_all_never_inserts_missing_fields() {
        let mut records =
            vec![serde_json::from_value::<RawRecord>(json!({"id": "b-1"})).unwrap()];
        normalize_all(&mut records);
        assert!(!records[0].contains_key("title"));
        assert!(!records[0].contains_key("description"));
    }

    #[test]
    fn normalize_all_leaves_non_strings_for_the_validator() {
        let mut records =
            vec![serde_json::from_value::<RawRecord>(json!({"title": 7})).unwrap()];
        normalize_all(&mut records);
        assert_eq!(records[0]["title"], 7);
    }
}
