//! Seed-catalog ingestion: loading, cleaning, and validating book records.
//!
//! Records enter as untyped JSON objects ([`RawRecord`]), are normalized in
//! place (`title` and `description` only), and are then validated against
//! the configured required-field set. Survivors are promoted to typed
//! [`BookRecord`]s; everything else is excluded with its reasons attached.
//!
//! Only load-time structural problems are fatal. Every per-record problem
//! is recoverable: the record is skipped and the run continues.

pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod validate;

pub use error::{SeedError, SeedResult};
pub use loader::load_seed;
pub use model::{BookRecord, RawRecord, RejectedRecord, SpiceLevel};
pub use normalize::{normalize, normalize_all};
pub use validate::{ValidationIssue, validate, validate_all};
