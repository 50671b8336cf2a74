//! Whole-password frequency

use super::{counter, ranked_table, Agent, Counter};
use crate::report::Report;

/// Counts every distinct line
pub struct WordFrequency {
    counts: Counter<String>,
    total: u64,
    top_k: usize,
}

impl WordFrequency {
    pub fn new(top_k: usize) -> Self {
        Self {
            counts: counter(),
            total: 0,
            top_k,
        }
    }

    #[cfg(test)]
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of lines folded
    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn unique(&self) -> usize {
        self.counts.len()
    }
}

impl Agent for WordFrequency {
    fn process_line(&mut self, word: &str) {
        self.total += 1;
        // avoid allocating for words already seen
        if let Some(count) = self.counts.get_mut(word) {
            *count += 1;
        } else {
            self.counts.insert(word.to_string(), 1);
        }
    }

    fn build_report(&self) -> Report {
        let table = ranked_table("Password", &self.counts, self.total, self.top_k, Clone::clone);

        Report::new(format!("Top {} passwords", self.top_k))
            .table(table)
            .note(format!("{} unique of {} total", self.unique(), self.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Cell;

    #[test]
    fn test_counts_every_line() {
        let mut agent = WordFrequency::new(10);
        for word in ["abc123", "abc123", "ABCD"] {
            agent.process_line(word);
        }

        assert_eq!(agent.total(), 3);
        assert_eq!(agent.unique(), 2);
        assert_eq!(agent.counts.values().sum::<u64>(), agent.total());
    }

    #[test]
    fn test_report() {
        let mut agent = WordFrequency::new(2);
        for word in ["abc123", "abc123", "ABCD"] {
            agent.process_line(word);
        }

        let report = agent.build_report();
        let rows = &report.tables[0].rows;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Cell::text("abc123"));
        assert_eq!(rows[0][1], Cell::Count(2));
        assert_eq!(rows[1][0], Cell::text("ABCD"));
        assert_eq!(rows[1][1], Cell::Count(1));
        match (&rows[0][2], &rows[1][2]) {
            (Cell::Percent(a), Cell::Percent(b)) => {
                assert!((a - 66.67).abs() < 0.01);
                assert!((b - 33.33).abs() < 0.01);
            }
            other => panic!("unexpected cells {:?}", other),
        }
        assert_eq!(report.notes, vec!["2 unique of 3 total".to_string()]);
    }
}
