//! Seed catalog loading.
//!
//! Load failures are fatal by design: a missing file, unparsable JSON, or a
//! wrong top-level shape aborts the run before any record is processed.
//! There are no partial loads.

use std::path::Path;

use serde_json::Value;

use crate::catalog::error::{SeedError, SeedResult};
use crate::catalog::model::RawRecord;

/// Read and parse a seed catalog file.
///
/// The file must contain a non-empty JSON array of objects. Records come
/// back in file order, untouched.
pub fn load_seed(path: &Path) -> SeedResult<Vec<RawRecord>> {
    let display = path.display().to_string();

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SeedError::NotFound {
            path: display.clone(),
        },
        _ => SeedError::Io {
            path: display.clone(),
            source: e,
        },
    })?;

    let parsed: Value = serde_json::from_str(&content).map_err(|e| SeedError::Malformed {
        path: display.clone(),
        message: e.to_string(),
    })?;

    let Value::Array(items) = parsed else {
        return Err(SeedError::EmptyOrWrongShape { path: display });
    };
    if items.is_empty() {
        return Err(SeedError::EmptyOrWrongShape { path: display });
    }

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map),
            _ => Err(SeedError::EmptyOrWrongShape {
                path: display.clone(),
            }),
        })
        .collect()
}
