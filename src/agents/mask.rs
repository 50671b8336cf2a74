//! Hashcat mask frequency
//!
//! Two rankings are produced: by raw count, and by count per unit of
//! keyspace. The second surfaces masks that are far more common than their
//! size would suggest.

use super::{counter, ranked_table, Agent, Counter};
use crate::mask::MaskCode;
use crate::report::{Cell, Report, Table};
use crate::topk::top_k_by;

pub struct HashcatMaskFrequency {
    counts: Counter<MaskCode>,
    total: u64,
    /// Passwords with characters no mask class covers
    unclassified: u64,
    top_k: usize,
}

impl HashcatMaskFrequency {
    pub fn new(top_k: usize) -> Self {
        Self {
            counts: counter(),
            total: 0,
            unclassified: 0,
            top_k,
        }
    }

    #[cfg(test)]
    pub fn count(&self, mask: &MaskCode) -> u64 {
        self.counts.get(mask).copied().unwrap_or(0)
    }

    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[cfg(test)]
    pub fn unclassified(&self) -> u64 {
        self.unclassified
    }

    fn density_table(&self) -> Table {
        let densities: Vec<(&MaskCode, u64, f64)> = self
            .counts
            .iter()
            .map(|(mask, &count)| (mask, count, mask.density(count)))
            .collect();

        let ranked = top_k_by(
            densities.iter().map(|(mask, count, density)| (*mask, (*density, *count))),
            self.top_k,
            |a, b| a.0.total_cmp(&b.0),
        );

        let mut table = Table::new(["Mask", "Count", "Keyspace", "Count/Keyspace"])
            .with_heading("By keyspace density");
        for (mask, (density, count)) in ranked {
            table.push(vec![
                Cell::Text(mask.to_string()),
                Cell::Count(count),
                Cell::Ratio(mask.keyspace()),
                Cell::Ratio(density),
            ]);
        }
        table
    }
}

impl Agent for HashcatMaskFrequency {
    fn process_line(&mut self, word: &str) {
        self.total += 1;
        match MaskCode::from_word(word) {
            Some(mask) => *self.counts.entry(mask).or_insert(0) += 1,
            None => self.unclassified += 1,
        }
    }

    fn build_report(&self) -> Report {
        let by_count = ranked_table("Mask", &self.counts, self.total, self.top_k, ToString::to_string)
            .with_heading("By count");

        Report::new(format!("Top {} hashcat masks", self.top_k))
            .table(by_count)
            .table(self.density_table())
            .note(format!(
                "{} distinct masks, {} of {} passwords unclassifiable",
                self.counts.len(),
                self.unclassified,
                self.total
            ))
    }
}
