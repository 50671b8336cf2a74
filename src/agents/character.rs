//! Per-character frequency

use super::{counter, ranked_table, Agent, Counter};
use crate::report::Report;
use crate::topk::top_k;

/// Length of the "most common characters" summary string
pub const SUMMARY_CHARACTERS: usize = 50;

/// Counts every character occurrence
pub struct CharacterFrequency {
    counts: Counter<char>,
    /// Characters folded
    total: u64,
    top_k: usize,
}

impl CharacterFrequency {
    pub fn new(top_k: usize) -> Self {
        Self {
            counts: counter(),
            total: 0,
            top_k,
        }
    }

    #[cfg(test)]
    pub fn count(&self, c: char) -> u64 {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// The most common characters, most frequent first
    pub fn top_characters(&self, n: usize) -> String {
        top_k(&self.counts, n).into_iter().map(|(&c, _)| c).collect()
    }
}

/// Printable label for a character
pub(crate) fn char_label(c: char) -> String {
    match c {
        ' ' => "<space>".to_string(),
        c if c.is_control() => c.escape_default().to_string(),
        c => c.to_string(),
    }
}

impl Agent for CharacterFrequency {
    fn process_line(&mut self, word: &str) {
        for c in word.chars() {
            self.total += 1;
            *self.counts.entry(c).or_insert(0) += 1;
        }
    }

    fn build_report(&self) -> Report {
        let table = ranked_table("Character", &self.counts, self.total, self.top_k, |&c| char_label(c));

        Report::new(format!("Top {} characters", self.top_k))
            .table(table)
            .note(format!("{} distinct characters in {} total", self.distinct(), self.total))
            .note(format!(
                "Top {} characters: {}",
                SUMMARY_CHARACTERS,
                self.top_characters(SUMMARY_CHARACTERS)
            ))
    }
}
