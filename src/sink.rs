//! Downstream handoff: upsert payloads and the vector-store seam.
//!
//! The embedding model and the vector store are external collaborators.
//! This module pins down the exact shape handed to them per batch (parallel
//! `ids` / `documents` / `metadatas` columns, matching the store's bulk-add
//! contract) and the [`VectorSink`] trait the pipeline drives. Embedding
//! happens behind the seam: sinks receive documents, not vectors.

use std::io::Write;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::catalog::BookRecord;
use crate::embed::build_embed_text;

/// Errors from a sink implementation.
#[derive(Debug, Error, Diagnostic)]
pub enum SinkError {
    #[error("failed to open payload file: {path}")]
    #[diagnostic(
        code(bookseed::sink::open),
        help("Check that the parent directory exists and is writable.")
    )]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to reset sink: {message}")]
    #[diagnostic(
        code(bookseed::sink::reset),
        help("The downstream index could not be dropped and recreated.")
    )]
    Reset { message: String },

    #[error("failed to upsert batch: {message}")]
    #[diagnostic(
        code(bookseed::sink::upsert),
        help("The batch was not persisted. Retry policy belongs to the caller.")
    )]
    Upsert { message: String },
}

/// Convenience alias for sink results.
pub type SinkResult<T> = std::result::Result<T, SinkError>;

/// One record fully prepared for indexing.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedRecord {
    /// Vector-store primary key.
    pub id: String,
    /// Canonical embedding text (the `documents` column entry).
    pub document: String,
    /// Filter/rerank fields carried alongside the embedding.
    pub metadata: Map<String, Value>,
}

impl PreparedRecord {
    /// Build the embedding text and metadata map for a validated record.
    ///
    /// `rating` and `year` appear in the metadata only when present; absent
    /// fields are omitted rather than set to null.
    pub fn from_book(book: &BookRecord) -> Self {
        let mut metadata = Map::new();
        metadata.insert("title".into(), json!(book.title));
        metadata.insert("authors".into(), json!(book.authors));
        metadata.insert("genres".into(), json!(book.genres));
        metadata.insert("tropes".into(), json!(book.tropes));
        metadata.insert("spice_level".into(), json!(book.spice_level));
        metadata.insert("source_url".into(), json!(book.source_url));
        if let Some(rating) = book.rating {
            metadata.insert("rating".into(), json!(rating));
        }
        if let Some(year) = book.year {
            metadata.insert("year".into(), json!(year));
        }

        Self {
            id: book.id.clone(),
            document: build_embed_text(book),
            metadata,
        }
    }
}

/// One bulk-upsert call's worth of records, as parallel columns.
///
/// The three vectors always have equal length and share one ordering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchPayload {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub metadatas: Vec<Map<String, Value>>,
}

impl BatchPayload {
    /// Assemble the parallel columns from one batch of prepared records.
    pub fn assemble(records: &[PreparedRecord]) -> Self {
        let mut payload = Self::default();
        for record in records {
            payload.ids.push(record.id.clone());
            payload.documents.push(record.document.clone());
            payload.metadatas.push(record.metadata.clone());
        }
        payload
    }

    /// Number of records in this batch.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the batch carries no records.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Where prepared batches go.
///
/// Implementations wrap the external vector-store client. The core defines
/// no retry or timeout semantics; a failed call surfaces as-is.
pub trait VectorSink {
    /// Drop and recreate the downstream index before loading.
    fn reset(&mut self) -> SinkResult<()>;

    /// Persist one batch of id/document/metadata triples.
    fn upsert(&mut self, batch: &BatchPayload) -> SinkResult<()>;
}

/// In-memory sink for tests and dry runs: keeps every batch it receives.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub batches: Vec<BatchPayload>,
    pub resets: usize,
}

impl VectorSink for MemorySink {
    fn reset(&mut self) -> SinkResult<()> {
        self.resets += 1;
        self.batches.clear();
        Ok(())
    }

    fn upsert(&mut self, batch: &BatchPayload) -> SinkResult<()> {
        self.batches.push(batch.clone());
        Ok(())
    }
}

/// File-backed sink: one JSON object per batch, JSON-lines framed.
///
/// This is the CLI's handoff artifact. The external indexer replays each
/// line against the real embedding API and vector store.
pub struct JsonlSink {
    path: PathBuf,
    file: std::fs::File,
}

impl JsonlSink {
    /// Create or truncate the payload file at `path`.
    pub fn create(path: &Path) -> SinkResult<Self> {
        let file = std::fs::File::create(path).map_err(|e| SinkError::Open {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }
}

impl VectorSink for JsonlSink {
    fn reset(&mut self) -> SinkResult<()> {
        // Recreating the index means starting the artifact over.
        self.file = std::fs::File::create(&self.path).map_err(|e| SinkError::Reset {
            message: format!("truncate {}: {e}", self.path.display()),
        })?;
        Ok(())
    }

    fn upsert(&mut self, batch: &BatchPayload) -> SinkResult<()> {
        let line = serde_json::to_string(batch).map_err(|e| SinkError::Upsert {
            message: format!("serialize batch: {e}"),
        })?;
        writeln!(self.file, "{line}").map_err(|e| SinkError::Upsert {
            message: format!("write {}: {e}", self.path.display()),
        })?;
        Ok(())
    }
}
