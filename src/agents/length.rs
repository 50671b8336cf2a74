//! Password length distribution

use super::{counter, Agent, Counter};
use crate::report::{percentage, Cell, Report, Table};

/// Counts lines per length in characters; always reports the full table
pub struct LengthFrequency {
    counts: Counter<usize>,
    total: u64,
}

impl LengthFrequency {
    pub fn new() -> Self {
        Self {
            counts: counter(),
            total: 0,
        }
    }

    #[cfg(test)]
    pub fn count(&self, length: usize) -> u64 {
        self.counts.get(&length).copied().unwrap_or(0)
    }

    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Default for LengthFrequency {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for LengthFrequency {
    fn process_line(&mut self, word: &str) {
        self.total += 1;
        *self.counts.entry(word.chars().count()).or_insert(0) += 1;
    }

    fn build_report(&self) -> Report {
        let mut lengths: Vec<_> = self.counts.iter().map(|(&len, &count)| (len, count)).collect();
        lengths.sort_unstable_by_key(|&(len, _)| len);

        let mut table = Table::new(["Length", "Count", "Percent"]);
        for (length, count) in lengths {
            table.push(vec![
                Cell::Count(length as u64),
                Cell::Count(count),
                Cell::Percent(percentage(count, self.total)),
            ]);
        }

        Report::new("Password length distribution")
            .table(table)
            .note(format!("{} passwords", self.total))
    }
}
