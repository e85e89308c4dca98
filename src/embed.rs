//! Embedding-text synthesis.
//!
//! The external embedding model receives exactly one string per record.
//! The rendering is deterministic with a fixed field order, so identical
//! records produce byte-identical embedding input across runs and
//! re-indexing stays reproducible.

use crate::catalog::BookRecord;

/// Render the canonical multi-line embedding text for a validated record.
pub fn build_embed_text(book: &BookRecord) -> String {
    format!(
        "Title: {}\nDescription: {}\nGenres: {}\nTropes: {}\nSpice: {}",
        book.title,
        book.description,
        book.genres.join(", "),
        book.tropes.join(", "),
        book.spice_level,
    )
}
