//! Command-line front end: build indices from a corpus CSV, derive bounds and stats,
//! and answer value queries.
//!
//! Usage:
//!     gematria --data-dir data index --corpus tanach_hebrew.csv
//!     gematria --data-dir data bounds
//!     gematria --data-dir data stats
//!     gematria --data-dir data stats --from-bounds
//!     gematria --data-dir data search 913
//!     gematria value "בְּרֵאשִׁית"
//!
//! Logs go to stderr (filter with RUST_LOG). `search` and `value` print JSON to stdout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gematria::corpus::read_csv_path;
use gematria::indexer::build_indices;
use gematria::store::{load_json, save_json};
use gematria::{BoundsDocument, DocumentPaths, Index, SearchEngine, Stats, DEFAULT_MAX_EXAMPLES};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the index, bounds and stats documents
    #[arg(short, long, env = "GEMATRIA_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the word and verse indices from a corpus CSV
    Index {
        /// CSV with book,chapter,verse,hebrew columns (section optional)
        #[arg(short, long)]
        corpus: PathBuf,

        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,
    },
    /// Derive the bounds document from the persisted indices
    Bounds {
        /// Example keys kept at each boundary
        #[arg(short, long, default_value_t = DEFAULT_MAX_EXAMPLES)]
        max_examples: usize,
    },
    /// Derive the stats document the search engine reads
    Stats {
        /// Take the ranges from the bounds document instead of the indices.
        /// Counts are omitted.
        #[arg(long)]
        from_bounds: bool,
    },
    /// Find every word and verse with the given value
    Search {
        value: u64,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Print the normalized form and value of arbitrary text
    Value { text: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gematria=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let paths = DocumentPaths::in_dir(&args.data_dir);

    match args.command {
        Command::Index { corpus, quiet } => build(&corpus, &paths, quiet),
        Command::Bounds { max_examples } => bounds(&paths, max_examples),
        Command::Stats { from_bounds } => stats(&paths, from_bounds),
        Command::Search { value, compact } => search(&paths, value, compact),
        Command::Value { text } => {
            let normalized = gematria::normalize::normalize(&text);
            let value = gematria::gematria::value_of_raw(&text);
            println!("{}", serde_json::json!({ "normalized": normalized, "value": value }));
            Ok(())
        }
    }
}

fn build(corpus: &Path, paths: &DocumentPaths, quiet: bool) -> Result<()> {
    let records = read_csv_path(corpus)
        .with_context(|| format!("Failed to read corpus {}", corpus.display()))?;

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(records.len() as u64)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} verses")?
            .progress_chars("#>-"),
    );

    let indices = build_indices(records.iter().progress_with(progress.clone()));
    progress.finish_and_clear();
    let (words, verses) = (indices.words, indices.verses);

    save_json(&paths.word_index, &words)?;
    save_json(&paths.verse_index, &verses)?;
    println!("Word index created: {}", paths.word_index.display());
    println!("Unique words indexed: {}", words.len());
    println!("Verse index created: {}", paths.verse_index.display());
    println!("Unique verse texts indexed: {}", verses.len());
    Ok(())
}

fn load_indices(paths: &DocumentPaths) -> Result<(Index, Index)> {
    let words: Index = load_json(&paths.word_index).context("Failed to load word index")?;
    let verses: Index = load_json(&paths.verse_index).context("Failed to load verse index")?;
    Ok((words, verses))
}

fn bounds(paths: &DocumentPaths, max_examples: usize) -> Result<()> {
    let (words, verses) = load_indices(paths)?;
    let document = BoundsDocument::build(&words, &verses, max_examples)?;
    save_json(&paths.bounds, &document)?;
    println!("Gematria bounds written to {}", paths.bounds.display());
    Ok(())
}

fn stats(paths: &DocumentPaths, from_bounds: bool) -> Result<()> {
    let stats = if from_bounds {
        let bounds: BoundsDocument = load_json(&paths.bounds).context("Failed to load bounds")?;
        Stats::from(&bounds)
    } else {
        let (words, verses) = load_indices(paths)?;
        Stats::from_indices(&words, &verses)?
    };
    save_json(&paths.stats, &stats)?;
    println!("Stats written to {}", paths.stats.display());
    Ok(())
}

fn search(paths: &DocumentPaths, value: u64, compact: bool) -> Result<()> {
    let engine = SearchEngine::open(paths).context("Failed to open search engine")?;
    let result = engine.search(value);
    let output = if compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{}", output);
    Ok(())
}
