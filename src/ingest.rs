//! Feeds text into a [`CountingHashTable`], one cleaned word at a time.
//!
//! Lines are split on whitespace and every token goes through
//! [`clean_word`]. A word whose only hyphen is its last character was split
//! across a line break when it is the last token on its line: its stem is
//! joined with the first token of the next line. Elsewhere the trailing hyphen
//! is simply dropped.

use crate::english::clean_word;
use crate::CountingHashTable;
use core::hash::BuildHasher;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unable to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read input: {0}")]
    Read(#[from] io::Error),
}

/// What one ingestion pass added to the table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    /// Lines read, including blank ones.
    pub lines: usize,
    /// Words counted into the table.
    pub words: u64,
    /// Words that were absent from the table before this pass, in first-seen
    /// order.
    pub new_words: Vec<String>,
}

/// Opens `path` and ingests it through a buffered reader.
pub fn ingest_file<P, S>(
    path: P,
    table: &mut CountingHashTable<S>,
) -> Result<IngestSummary, IngestError>
where
    P: AsRef<Path>,
    S: BuildHasher,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let summary = ingest_reader(BufReader::new(file), table)?;
    debug!(
        path = %path.display(),
        lines = summary.lines,
        words = summary.words,
        new = summary.new_words.len(),
        "ingested file"
    );
    Ok(summary)
}

/// Reads `reader` to the end, counting every cleaned word into `table`.
pub fn ingest_reader<R, S>(
    reader: R,
    table: &mut CountingHashTable<S>,
) -> Result<IngestSummary, IngestError>
where
    R: BufRead,
    S: BuildHasher,
{
    let mut summary = IngestSummary::default();
    // Stem of a hyphenated word that ended the previous line.
    let mut carry: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        summary.lines += 1;
        let mut tokens = line.split_whitespace().peekable();

        if let Some(stem) = carry.take() {
            let joined = format!("{stem}{}", tokens.next().unwrap_or_default());
            record(&clean_word(&joined), table, &mut summary);
        }

        while let Some(raw) = tokens.next() {
            let word = clean_word(raw);
            match continuation_stem(&word) {
                Some(stem) if tokens.peek().is_none() => carry = Some(stem.to_owned()),
                Some(stem) => record(&clean_word(stem), table, &mut summary),
                None => record(&word, table, &mut summary),
            }
        }
    }

    if let Some(stem) = carry {
        record(&clean_word(&stem), table, &mut summary);
    }
    Ok(summary)
}

/// `"conti-"` -> `Some("conti")`; words with an earlier hyphen do not
/// continue.
fn continuation_stem(word: &str) -> Option<&str> {
    match word.find('-') {
        Some(i) if i + 1 == word.len() => Some(&word[..i]),
        _ => None,
    }
}

fn record<S: BuildHasher>(
    word: &str,
    table: &mut CountingHashTable<S>,
    summary: &mut IngestSummary,
) {
    if word.is_empty() {
        return;
    }
    if table.insert_or_increment(word) == 1 {
        summary.new_words.push(word.to_owned());
    }
    summary.words += 1;
}
