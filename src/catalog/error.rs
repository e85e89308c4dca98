//! Rich diagnostic error types for seed-catalog loading.
//!
//! These cover the fatal tier only: a load failure aborts the whole run
//! before any record is processed. Per-record validation problems are not
//! errors; they travel as [`ValidationIssue`](crate::catalog::ValidationIssue)
//! lists on the rejected record.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from reading and parsing the seed catalog file.
#[derive(Debug, Error, Diagnostic)]
pub enum SeedError {
    #[error("seed file not found: {path}")]
    #[diagnostic(
        code(bookseed::seed::not_found),
        help("Check the path, or point the pipeline at a seed file with --file.")
    )]
    NotFound { path: String },

    #[error("invalid JSON in {path}: {message}")]
    #[diagnostic(
        code(bookseed::seed::malformed),
        help("The seed file must be valid UTF-8 JSON. The parser message above points at the offending spot.")
    )]
    Malformed { path: String, message: String },

    #[error("seed file must be a non-empty JSON array of objects: {path}")]
    #[diagnostic(
        code(bookseed::seed::empty_or_wrong_shape),
        help(
            "The top level must be a JSON array with at least one element, \
             and every element must be an object."
        )
    )]
    EmptyOrWrongShape { path: String },

    #[error("failed to read seed file: {path}")]
    #[diagnostic(
        code(bookseed::seed::io),
        help("Ensure the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for seed loading results.
pub type SeedResult<T> = std::result::Result<T, SeedError>;
