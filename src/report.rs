//! Text rendering of table statistics and per-word counts, plus a check that
//! a copied table agrees with its source.

use crate::CountingHashTable;
use core::hash::BuildHasher;
use std::fmt;
use thiserror::Error;

const INDENT: &str = "        ";

/// Truncates `n` toward zero at three decimal places.
pub fn round_to_three(n: f64) -> f64 {
    (n * 1000.0).trunc() / 1000.0
}

/// Snapshot of a table's statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStats {
    pub capacity: usize,
    pub unique: usize,
    pub total: u64,
    pub load_factor: f64,
}

impl TableStats {
    pub fn of<S>(table: &CountingHashTable<S>) -> Self {
        Self {
            capacity: table.capacity(),
            unique: table.unique_count(),
            total: table.total_count(),
            load_factor: table.load_factor(),
        }
    }
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Word counter statistics:")?;
        writeln!(f, "{INDENT}Capacity: {}", self.capacity)?;
        writeln!(f, "{INDENT}Unique  : {}", self.unique)?;
        writeln!(f, "{INDENT}Total   : {}", self.total)?;
        write!(f, "{INDENT}Load    : {}", round_to_three(self.load_factor))
    }
}

/// Counts for a whitespace-separated list of query words, in query order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAnalysis<'q> {
    pub counts: Vec<(&'q str, u64)>,
}

impl<'q> WordAnalysis<'q> {
    pub fn new<S: BuildHasher>(table: &CountingHashTable<S>, query: &'q str) -> Self {
        let counts = query
            .split_whitespace()
            .map(|word| (word, table.lookup(word)))
            .collect();
        Self { counts }
    }
}

impl fmt::Display for WordAnalysis<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Analysis of words:")?;
        for (word, count) in &self.counts {
            write!(f, "\n{INDENT}{word}: {count}")?;
        }
        Ok(())
    }
}

/// A way in which a copy disagrees with the table it was made from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CopyMismatch {
    #[error("mismatching unique word count: {original} vs {copy}")]
    UniqueCount { original: usize, copy: usize },

    #[error("mismatching total word count: {original} vs {copy}")]
    TotalCount { original: u64, copy: u64 },

    #[error("mismatching load factor: {original} vs {copy}")]
    LoadFactor { original: f64, copy: f64 },

    #[error("mismatching word count for \"{word}\": {original} vs {copy}")]
    WordCount {
        word: String,
        original: u64,
        copy: u64,
    },
}

/// Compares the statistics of `original` and `copy` and the count of every
/// word in `words`. An empty result means the two agree.
pub fn verify_copy<S, T, W>(
    original: &CountingHashTable<S>,
    copy: &CountingHashTable<T>,
    words: &[W],
) -> Vec<CopyMismatch>
where
    S: BuildHasher,
    T: BuildHasher,
    W: AsRef<str>,
{
    let mut mismatches = Vec::new();
    let (a, b) = (TableStats::of(original), TableStats::of(copy));
    if a.unique != b.unique {
        mismatches.push(CopyMismatch::UniqueCount {
            original: a.unique,
            copy: b.unique,
        });
    }
    if a.total != b.total {
        mismatches.push(CopyMismatch::TotalCount {
            original: a.total,
            copy: b.total,
        });
    }
    if a.load_factor != b.load_factor {
        mismatches.push(CopyMismatch::LoadFactor {
            original: a.load_factor,
            copy: b.load_factor,
        });
    }
    for word in words.iter().map(AsRef::as_ref) {
        let (x, y) = (original.lookup(word), copy.lookup(word));
        if x != y {
            mismatches.push(CopyMismatch::WordCount {
                word: word.to_owned(),
                original: x,
                copy: y,
            });
        }
    }
    mismatches
}
