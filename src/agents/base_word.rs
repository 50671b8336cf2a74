//! Base-word frequency
//!
//! The base word is the password with its leading and trailing non-letters
//! removed (`!!Summer2024` gives `Summer`). Bases shorter than three letters
//! are skipped.

use super::{counter, ranked_table, Agent, Counter};
use crate::report::Report;

/// Bases shorter than this are not counted
pub const MIN_BASE_LENGTH: usize = 3;

pub struct BaseWordFrequency {
    counts: Counter<String>,
    /// Lines seen, counted or not
    total: u64,
    skipped: u64,
    top_k: usize,
}

impl BaseWordFrequency {
    pub fn new(top_k: usize) -> Self {
        Self {
            counts: counter(),
            total: 0,
            skipped: 0,
            top_k,
        }
    }

    #[cfg(test)]
    pub fn count(&self, base: &str) -> u64 {
        self.counts.get(base).copied().unwrap_or(0)
    }

    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[cfg(test)]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

/// Strip leading and trailing non-letter characters
pub fn base_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphabetic())
}

impl Agent for BaseWordFrequency {
    fn process_line(&mut self, word: &str) {
        self.total += 1;

        let base = base_word(word);
        if base.chars().count() < MIN_BASE_LENGTH {
            self.skipped += 1;
            return;
        }

        if let Some(count) = self.counts.get_mut(base) {
            *count += 1;
        } else {
            self.counts.insert(base.to_string(), 1);
        }
    }

    fn build_report(&self) -> Report {
        let table = ranked_table("Base word", &self.counts, self.total, self.top_k, Clone::clone);

        Report::new(format!("Top {} base words", self.top_k))
            .table(table)
            .note(format!(
                "{} unique base words, {} of {} passwords skipped (base shorter than {})",
                self.counts.len(),
                self.skipped,
                self.total,
                MIN_BASE_LENGTH
            ))
    }
}
