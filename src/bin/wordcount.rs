//! wordcount
//!
//! Counts the words of a text file in a `CountingHashTable`, drops common
//! English words, prints the table statistics and the counts of the
//! requested words.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use word_counter::{
    english::remove_common_words,
    ingest_file,
    report::{verify_copy, TableStats, WordAnalysis},
    CountingHashTable,
};

#[derive(Parser)]
#[command(name = "wordcount")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Count words in a text file with a self-resizing hash table", long_about = None)]
struct Cli {
    /// Text file to read; prompted for when omitted
    #[arg(env = "WORDCOUNT_FILE")]
    file: Option<PathBuf>,
    /// Initial capacity request, rounded up to the next valid size
    #[arg(short, long, env = "WORDCOUNT_CAPACITY")]
    capacity: Option<usize>,
    /// Words to report counts for; prompted for when omitted
    #[arg(short, long, num_args = 1.., value_delimiter = ' ')]
    words: Vec<String>,
    /// Keep common English words in the table
    #[arg(long)]
    keep_common: bool,
    /// Check that clone and clone_from produce tables identical to the original
    #[arg(long)]
    verify_copy: bool,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
    /// Disable logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    let mut stdin = io::stdin().lock();
    let path = match cli.file {
        Some(p) => p,
        None => PathBuf::from(prompt(&mut stdin, "What is the filename? ")?),
    };

    let mut table = match cli.capacity {
        Some(c) => CountingHashTable::with_capacity(c),
        None => CountingHashTable::new(),
    };
    debug!(capacity = table.capacity(), "table created");

    let summary = ingest_file(&path, &mut table)
        .with_context(|| format!("failed to count words in {}", path.display()))?;
    if !cli.keep_common {
        remove_common_words(&mut table);
    }
    println!("\n{}", TableStats::of(&table));

    let query = if cli.words.is_empty() {
        prompt(&mut stdin, "\nEnter words (separated by a space): ")?
    } else {
        cli.words.join(" ")
    };
    println!("{}", WordAnalysis::new(&table, &query));

    if cli.verify_copy {
        let cloned = table.clone();
        let mut assigned = CountingHashTable::new();
        assigned.clone_from(&table);
        let mut failures = 0;
        for (label, copy) in [("Copy constructor", &cloned), ("Assignment operator", &assigned)] {
            for mismatch in verify_copy(&table, copy, &summary.new_words) {
                failures += 1;
                println!("{label} failed: {mismatch}.");
            }
        }
        if failures > 0 {
            warn!(failures, "copy verification failed");
        } else {
            debug!(words = summary.new_words.len(), "copies verified");
        }
    }
    Ok(())
}

/// Writes `message` to stdout and returns the next line of input without its
/// line terminator.
fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    let mut out = io::stdout().lock();
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    // RUST_LOG wins; otherwise --quiet silences everything, --verbose shows
    // rehashes and ingestion details, and the default only shows warnings.
    let level = if quiet {
        "off"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    Ok(())
}
