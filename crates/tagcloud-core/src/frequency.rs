//! Case-insensitive word frequency counting.

use std::collections::HashMap;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::tokenizer::{SeparatorSet, Token};

/// A distinct lowercase word and the number of times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrequencyEntry {
    /// The word, lowercased.
    pub word: String,
    /// Number of occurrences (always at least 1).
    pub count: usize,
}

impl FrequencyEntry {
    /// Create an entry.
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Mapping from lowercase word to occurrence count.
///
/// Iteration order is unspecified. Use [`FrequencyTable::entries_by_count`]
/// for an ordered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every line of `reader` until end-of-stream.
    ///
    /// Lines end at `\n` (a preceding `\r` is dropped). Invalid UTF-8 is
    /// replaced rather than rejected.
    #[tracing::instrument(skip_all)]
    pub fn from_reader<R: BufRead>(
        mut reader: R,
        separators: &SeparatorSet,
    ) -> std::io::Result<Self> {
        let mut table = Self::new();
        let mut buf = Vec::new();
        let mut lines = 0usize;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            table.add_line(&String::from_utf8_lossy(&buf), separators);
            lines += 1;
        }

        tracing::debug!(lines, distinct = table.len(), "counted words");
        Ok(table)
    }

    /// Count the words of a single line.
    pub fn add_line(&mut self, line: &str, separators: &SeparatorSet) {
        for token in separators.tokens(line) {
            if let Token::Word(word) = token {
                self.record(word);
            }
        }
    }

    /// Record one occurrence of `word`, case-insensitively.
    pub fn record(&mut self, word: &str) {
        let word = word.to_lowercase();
        *self.counts.entry(word).or_insert(0) += 1;
    }

    /// Count for a lowercase word, if it was seen.
    pub fn count(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no words have been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest count across all words, or 0 for an empty table.
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// All entries, highest count first. Equal counts are ordered by word.
    pub fn entries_by_count(&self) -> Vec<FrequencyEntry> {
        let mut entries: Vec<FrequencyEntry> = self
            .counts
            .iter()
            .map(|(word, &count)| FrequencyEntry::new(word.clone(), count))
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        entries
    }
}
