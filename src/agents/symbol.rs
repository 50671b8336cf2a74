//! Symbol frequency

use super::character::char_label;
use super::{counter, ranked_table, Agent, Counter};
use crate::charset::CharClass;
use crate::report::Report;

/// Counts occurrences of symbolic characters (ASCII punctuation and space)
pub struct SymbolFrequency {
    counts: Counter<char>,
    /// Symbols folded
    total: u64,
    top_k: usize,
}

impl SymbolFrequency {
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
}

impl Agent for SymbolFrequency {
    fn process_line(&mut self, word: &str) {
        for c in word.chars().filter(|&c| CharClass::of(c) == Some(CharClass::Symbol)) {
            self.total += 1;
            *self.counts.entry(c).or_insert(0) += 1;
        }
    }

    fn build_report(&self) -> Report {
        let table = ranked_table("Symbol", &self.counts, self.total, self.top_k, |&c| char_label(c));

        Report::new(format!("Top {} symbols", self.top_k))
            .table(table)
            .note(format!(
                "{} distinct symbols in {} occurrences",
                self.counts.len(),
                self.total
            ))
    }
}
