//! Charset frequency
//!
//! Every password is tested against all 15 charsets independently, so a
//! lowercase-only password counts towards `lower` and towards every wider
//! charset containing `lower`.

use super::Agent;
use crate::charset::{word_classes, CHARSETS, CHARSET_COUNT};
use crate::cli::CharsetSort;
use crate::report::{percentage, Cell, Report, Table};

pub struct CharsetFrequency {
    /// Indexed like [`CHARSETS`]
    counts: [u64; CHARSET_COUNT],
    total: u64,
    /// Passwords containing a character outside every class
    unclassified: u64,
    sort: CharsetSort,
}

impl CharsetFrequency {
    pub fn new(sort: CharsetSort) -> Self {
        Self {
            counts: [0; CHARSET_COUNT],
            total: 0,
            unclassified: 0,
            sort,
        }
    }

    #[cfg(test)]
    pub fn count(&self, name: &str) -> Option<u64> {
        CHARSETS
            .iter()
            .position(|c| c.name == name)
            .map(|i| self.counts[i])
    }

    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[cfg(test)]
    pub fn unclassified(&self) -> u64 {
        self.unclassified
    }
}

impl Agent for CharsetFrequency {
    fn process_line(&mut self, word: &str) {
        self.total += 1;

        let Some(classes) = word_classes(word) else {
            self.unclassified += 1;
            return;
        };

        for (count, charset) in self.counts.iter_mut().zip(CHARSETS.iter()) {
            if charset.covers(classes) {
                *count += 1;
            }
        }
    }

    fn build_report(&self) -> Report {
        let mut rows: Vec<_> = CHARSETS
            .iter()
            .zip(self.counts)
            .map(|(charset, count)| (charset, count, count as f64 / f64::from(charset.keyspace())))
            .collect();

        // stable: ties keep catalog order
        match self.sort {
            CharsetSort::Count => rows.sort_by(|a, b| b.1.cmp(&a.1)),
            CharsetSort::Density => rows.sort_by(|a, b| b.2.total_cmp(&a.2)),
        }

        let mut table = Table::new(["Charset", "Count", "Percent", "Count/Keyspace"]);
        for (charset, count, density) in rows {
            table.push(vec![
                Cell::text(charset.name),
                Cell::Count(count),
                Cell::Percent(percentage(count, self.total)),
                Cell::Ratio(density),
            ]);
        }

        Report::new(format!("Charset frequency (sorted by {})", self.sort))
            .table(table)
            .note(format!(
                "{} of {} passwords contain characters outside every charset",
                self.unclassified, self.total
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CharClass;

    #[test]
    fn test_lowercase_word_increments_lower_supersets() {
        let mut agent = CharsetFrequency::new(CharsetSort::Count);
        agent.process_line("password");

        for charset in CHARSETS.iter() {
            let expected = u64::from(charset.contains(CharClass::Lower));
            assert_eq!(agent.count(charset.name), Some(expected), "{}", charset.name);
        }
    }

    #[test]
    fn test_unclassified() {
        let mut agent = CharsetFrequency::new(CharsetSort::Count);
        agent.process_line("pässword");
        agent.process_line("123456");

        assert_eq!(agent.unclassified(), 1);
        assert_eq!(agent.total(), 2);
        assert_eq!(agent.count("numeric"), Some(1));
        assert_eq!(agent.count("lower"), Some(0));
        assert_eq!(agent.count("bogus"), None);
    }

    #[test]
    fn test_full_table_sorted_by_density() {
        let mut agent = CharsetFrequency::new(CharsetSort::Density);
        for word in ["123456", "12345678", "password"] {
            agent.process_line(word);
        }

        let report = agent.build_report();
        let rows = &report.tables[0].rows;
        assert_eq!(rows.len(), CHARSETS.len());
        // 2 numeric passwords over a keyspace of 10 ranks first
        assert_eq!(rows[0][0], Cell::text("numeric"));
        assert_eq!(rows[0][3], Cell::Ratio(0.2));

        let densities: Vec<f64> = rows
            .iter()
            .map(|row| match row[3] {
                Cell::Ratio(d) => d,
                _ => panic!("density column"),
            })
            .collect();
        assert!(densities.windows(2).all(|w| w[0] >= w[1]));
    }
}
