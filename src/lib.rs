//! # bookseed
//!
//! A seed-catalog preparation pipeline for semantic book search: load a JSON
//! catalog of book records, clean and validate each record against a
//! configurable schema, render deterministic embedding text per surviving
//! record, and partition the prepared records into fixed-size payloads for
//! bulk upsert into an external vector store.
//!
//! ## Architecture
//!
//! - **Catalog** (`catalog`): seed loading (fatal tier), text normalization,
//!   and schema validation with per-record skip semantics
//! - **Embedding text** (`embed`): one canonical string per validated record
//! - **Batching** (`batch`): fixed-size, order-preserving groups
//! - **Handoff** (`sink`): id/document/metadata payloads behind the
//!   [`VectorSink`](sink::VectorSink) seam
//! - **Orchestration** (`pipeline`): the two-pass run, composed, never fused
//!
//! The embedding model and the vector store are external collaborators;
//! nothing here performs network I/O.
//!
//! ## Library usage
//!
//! ```no_run
//! use bookseed::config::PipelineConfig;
//! use bookseed::pipeline;
//! use bookseed::sink::MemorySink;
//!
//! let config = PipelineConfig {
//!     seed_path: "data/books_seed.json".into(),
//!     ..Default::default()
//! };
//! let mut sink = MemorySink::default();
//! let report = pipeline::run(&config, &mut sink).unwrap();
//! println!("cleaned {} of {} records", report.cleaned.len(), report.loaded);
//! ```

pub mod batch;
pub mod catalog;
pub mod config;
pub mod embed;
pub mod pipeline;
pub mod sink;
