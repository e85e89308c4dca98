//! bookseed CLI: seed-catalog validation and embedding preparation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;

use bookseed::catalog::{BookRecord, RejectedRecord, load_seed, normalize_all, validate_all};
use bookseed::config::{PipelineConfig, SchemaProfile};
use bookseed::pipeline;
use bookseed::sink::JsonlSink;

#[derive(Parser)]
#[command(
    name = "bookseed",
    version,
    about = "Book-catalog cleaning, validation, and embedding preparation"
)]
struct Cli {
    /// Optional TOML config file. CLI flags take precedence over its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write upsert payloads as JSON lines.
    Ingest {
        /// Seed catalog path.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Records per bulk upsert call.
        #[arg(long)]
        batch_size: Option<usize>,

        /// Required-field set to enforce.
        #[arg(long, value_enum)]
        schema: Option<SchemaProfile>,

        /// Recreate the downstream index (truncate the payload file) first.
        #[arg(long)]
        reset: bool,

        /// Output path for batch payloads.
        #[arg(long, default_value = "payloads.jsonl")]
        out: PathBuf,
    },

    /// Load, normalize, and validate only; report skips without writing.
    Validate {
        /// Seed catalog path.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Required-field set to enforce.
        #[arg(long, value_enum)]
        schema: Option<SchemaProfile>,
    },

    /// Print a one-record summary for smoke-testing a seed file.
    Sample {
        /// Seed catalog path.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Required-field set to enforce.
        #[arg(long, value_enum)]
        schema: Option<SchemaProfile>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => PipelineConfig::from_toml_file(path)?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Commands::Ingest {
            file,
            batch_size,
            schema,
            reset,
            out,
        } => {
            let config = PipelineConfig {
                seed_path: file.unwrap_or(base.seed_path),
                schema: schema.unwrap_or(base.schema),
                batch_size: batch_size.unwrap_or(base.batch_size),
                reset_index: reset || base.reset_index,
            };
            config.check()?;

            let mut sink = JsonlSink::create(&out)?;
            let report = pipeline::run(&config, &mut sink)?;

            print_skips(&report.rejected);
            println!(
                "Loaded {} books: {} cleaned, {} skipped.",
                report.loaded,
                report.cleaned.len(),
                report.skipped()
            );
            println!(
                "Wrote {} batches ({} records) to {}",
                report.batches,
                report.cleaned.len(),
                out.display()
            );
        }

        Commands::Validate { file, schema } => {
            let config = PipelineConfig {
                seed_path: file.unwrap_or(base.seed_path),
                schema: schema.unwrap_or(base.schema),
                batch_size: base.batch_size,
                reset_index: base.reset_index,
            };

            let (loaded, cleaned, rejected) = check_seed(&config)?;
            print_skips(&rejected);
            println!(
                "Loaded {loaded} books: {} cleaned, {} skipped.",
                cleaned.len(),
                rejected.len()
            );
        }

        Commands::Sample { file, schema } => {
            let config = PipelineConfig {
                seed_path: file.unwrap_or(base.seed_path),
                schema: schema.unwrap_or(base.schema),
                batch_size: base.batch_size,
                reset_index: base.reset_index,
            };

            let (_, cleaned, _) = check_seed(&config)?;
            match cleaned.first() {
                Some(book) => print_sample(book),
                None => println!("No valid records to sample."),
            }
        }
    }

    Ok(())
}

/// Load, normalize, and validate the configured seed file.
fn check_seed(
    config: &PipelineConfig,
) -> Result<(usize, Vec<BookRecord>, Vec<RejectedRecord>)> {
    let mut records = load_seed(&config.seed_path)?;
    let loaded = records.len();
    normalize_all(&mut records);
    let (cleaned, rejected) = validate_all(records, config.schema);
    Ok((loaded, cleaned, rejected))
}

fn print_skips(rejected: &[RejectedRecord]) {
    for reject in rejected {
        println!("Skipping {}:", reject.label());
        for issue in &reject.issues {
            println!("    - {issue}");
        }
    }
}

fn print_sample(book: &BookRecord) {
    println!("Sample book: {}", book.title);
    println!("  authors: {}", book.authors.join(", "));
    println!(
        "  rating:  {}",
        book.rating.map_or_else(|| "n/a".into(), |r| r.to_string())
    );
    println!(
        "  year:    {}",
        book.year.map_or_else(|| "n/a".into(), |y| y.to_string())
    );
    println!("  spice:   {}", book.spice_level);
    println!("  source:  {}", book.source_url);
}
