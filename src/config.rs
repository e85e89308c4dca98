//! Pipeline configuration.
//!
//! Everything the pipeline is parameterized on lives in one explicit value
//! with documented defaults: seed file path, required-field set, batch
//! size, and whether to recreate the downstream index before loading.
//! Settings can be loaded from a `bookseed.toml` file; CLI flags override
//! file values.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading or interpreting a config file.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    #[diagnostic(
        code(bookseed::config::io),
        help("Ensure the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    #[diagnostic(
        code(bookseed::config::parse),
        help("Check the TOML syntax against the documented [pipeline] table.")
    )]
    Parse { path: String, message: String },

    #[error("batch_size must be at least 1")]
    #[diagnostic(
        code(bookseed::config::batch_size),
        help("Pick a batch size between 1 and the vector store's bulk-call limit.")
    )]
    ZeroBatchSize,
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Which required-field set the validator enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SchemaProfile {
    /// The eight core fields every record must carry.
    #[default]
    Minimal,
    /// Minimal plus `rating` and `year`.
    Extended,
}

impl SchemaProfile {
    const MINIMAL_FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "authors",
        "description",
        "genres",
        "tropes",
        "spice_level",
        "source_url",
    ];

    const EXTENDED_FIELDS: &'static [&'static str] = &[
        "id",
        "title",
        "authors",
        "description",
        "genres",
        "tropes",
        "spice_level",
        "source_url",
        "rating",
        "year",
    ];

    /// The field names a record must carry under this profile.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Minimal => Self::MINIMAL_FIELDS,
            Self::Extended => Self::EXTENDED_FIELDS,
        }
    }
}

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Seed catalog path.
    pub seed_path: PathBuf,
    /// Required-field set for validation.
    pub schema: SchemaProfile,
    /// Records per bulk upsert call. Must be at least 1.
    pub batch_size: usize,
    /// Drop and recreate the downstream index before loading.
    pub reset_index: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed_path: PathBuf::from("data/books_seed.json"),
            schema: SchemaProfile::Minimal,
            batch_size: 32,
            reset_index: false,
        }
    }
}

// ── TOML deserialization helpers ────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ConfigToml {
    #[serde(default)]
    pipeline: PipelineToml,
}

#[derive(Debug, Default, Deserialize)]
struct PipelineToml {
    seed_path: Option<PathBuf>,
    schema: Option<SchemaProfile>,
    batch_size: Option<usize>,
    reset_index: Option<bool>,
}

impl PipelineConfig {
    /// Load settings from a TOML file, filling gaps with the defaults.
    ///
    /// Expected shape:
    ///
    /// ```toml
    /// [pipeline]
    /// seed_path = "data/books_seed.json"
    /// schema = "extended"
    /// batch_size = 64
    /// reset_index = true
    /// ```
    pub fn from_toml_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let parsed: ConfigToml = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let defaults = Self::default();
        let config = Self {
            seed_path: parsed.pipeline.seed_path.unwrap_or(defaults.seed_path),
            schema: parsed.pipeline.schema.unwrap_or(defaults.schema),
            batch_size: parsed.pipeline.batch_size.unwrap_or(defaults.batch_size),
            reset_index: parsed.pipeline.reset_index.unwrap_or(defaults.reset_index),
        };
        config.check()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot honor.
    pub fn check(&self) -> ConfigResult<()> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bookseed.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_are_documented_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.seed_path, PathBuf::from("data/books_seed.json"));
        assert_eq!(config.schema, SchemaProfile::Minimal);
        assert_eq!(config.batch_size, 32);
        assert!(!config.reset_index);
    }

    #[test]
    fn extended_is_minimal_plus_rating_and_year() {
        let minimal = SchemaProfile::Minimal.required_fields();
        let extended = SchemaProfile::Extended.required_fields();
        assert_eq!(extended.len(), minimal.len() + 2);
        for field in minimal {
            assert!(extended.contains(field));
        }
        assert!(extended.contains(&"rating"));
        assert!(extended.contains(&"year"));
        assert!(!minimal.contains(&"rating"));
        assert!(!minimal.contains(&"year"));
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let (_dir, path) = write_config(
            r#"
            [pipeline]
            seed_path = "catalog/romance.json"
            schema = "extended"
            batch_size = 8
            reset_index = true
            "#,
        );
        let config = PipelineConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.seed_path, PathBuf::from("catalog/romance.json"));
        assert_eq!(config.schema, SchemaProfile::Extended);
        assert_eq!(config.batch_size, 8);
        assert!(config.reset_index);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let (_dir, path) = write_config("[pipeline]\nbatch_size = 5\n");
        let config = PipelineConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.schema, SchemaProfile::Minimal);
        assert_eq!(config.seed_path, PathBuf::from("data/books_seed.json"));
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let (_dir, path) = write_config("");
        let config = PipelineConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.batch_size, 32);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let (_dir, path) = write_config("[pipeline\nbatch_size = 5");
        let err = PipelineConfig::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let (_dir, path) = write_config("[pipeline]\nbatch_size = 0\n");
        let err = PipelineConfig::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroBatchSize));
    }
}
