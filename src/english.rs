//! English word normalization and the stop-word list.

use crate::CountingHashTable;
use core::hash::BuildHasher;
use tracing::{debug, trace};

/// Common English words removed before reporting.
pub const COMMON_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "because",
    "been", "but", "by", "can", "could", "did", "do", "even", "for", "from", "get", "had", "has",
    "have", "he", "her", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just",
    "like", "me", "my", "no", "not", "now", "of", "on", "one", "only", "or", "other", "our",
    "out", "over", "said", "she", "so", "some", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "to", "up", "us", "was", "we", "were", "what", "when",
    "which", "who", "will", "with", "would", "you", "your",
];

/// Normalizes one whitespace-delimited token.
///
/// Lowercases, drops everything except letters, digits, apostrophes and
/// hyphens, then trims leading non-alphanumerics and trailing apostrophes. A
/// trailing hyphen survives so callers can detect words split across lines.
pub fn clean_word(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
        .flat_map(char::to_lowercase)
        .collect();
    kept.trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end_matches('\'')
        .to_owned()
}

/// Removes every [`COMMON_WORDS`] entry from `table`; returns how many were
/// present.
pub fn remove_common_words<S: BuildHasher>(table: &mut CountingHashTable<S>) -> usize {
    let mut removed = 0;
    for word in COMMON_WORDS {
        if let Some(count) = table.remove(word) {
            trace!(word, count, "dropped common word");
            removed += 1;
        }
    }
    debug!(removed, remaining = table.unique_count(), "stop words removed");
    removed
}
