//! The preparation pipeline: load, normalize, validate, prepare, batch.
//!
//! Normalization and validation are two independent passes composed here,
//! never fused: `normalize_all` rewrites `title`/`description` in place,
//! then `validate_all` splits the records into the cleaned set and the
//! rejected set. Processing is strictly sequential; each record is handled
//! to completion before the next.

use miette::Diagnostic;
use thiserror::Error;

use crate::batch::batches;
use crate::catalog::{
    BookRecord, RejectedRecord, SeedError, load_seed, normalize_all, validate_all,
};
use crate::config::PipelineConfig;
use crate::sink::{BatchPayload, PreparedRecord, SinkError, VectorSink};

/// Pipeline failure: the fatal load tier, or the sink refusing a batch.
///
/// Per-record validation problems never appear here; they are reported in
/// the [`PipelineReport`] and the run continues.
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sink(#[from] SinkError),
}

/// Everything a caller needs to judge a run.
#[derive(Debug)]
pub struct PipelineReport {
    /// Records parsed from the seed file.
    pub loaded: usize,
    /// Records that passed validation, in input order.
    pub cleaned: Vec<BookRecord>,
    /// Records excluded from the cleaned set, each with its reasons.
    pub rejected: Vec<RejectedRecord>,
    /// Upsert batches handed to the sink.
    pub batches: usize,
}

impl PipelineReport {
    /// Number of records skipped by validation.
    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }
}

/// Run the full preparation pipeline and hand every batch to `sink`.
///
/// A run with zero valid records is not an error: it completes with zero
/// batches, and the caller decides what that means. No retries anywhere;
/// a sink failure surfaces as-is.
pub fn run(
    config: &PipelineConfig,
    sink: &mut dyn VectorSink,
) -> Result<PipelineReport, PipelineError> {
    // Fatal tier: any load problem aborts before records are processed.
    let mut records = load_seed(&config.seed_path)?;
    let loaded = records.len();
    tracing::info!(loaded, path = %config.seed_path.display(), "loaded seed catalog");

    // Pass 1: cleanup. Pass 2: validation and promotion.
    normalize_all(&mut records);
    let (cleaned, rejected) = validate_all(records, config.schema);

    for reject in &rejected {
        tracing::warn!(
            record = %reject.label(),
            issues = reject.issues.len(),
            "skipping record"
        );
    }
    tracing::info!(
        cleaned = cleaned.len(),
        skipped = rejected.len(),
        "validation complete"
    );

    let prepared: Vec<PreparedRecord> = cleaned.iter().map(PreparedRecord::from_book).collect();

    if config.reset_index {
        sink.reset()?;
    }

    let mut batch_count = 0;
    for group in batches(&prepared, config.batch_size) {
        let payload = BatchPayload::assemble(group);
        sink.upsert(&payload)?;
        batch_count += 1;
    }
    tracing::info!(batches = batch_count, "handoff complete");

    Ok(PipelineReport {
        loaded,
        cleaned,
        rejected,
        batches: batch_count,
    })
}
