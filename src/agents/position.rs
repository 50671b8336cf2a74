//! Character class by position
//!
//! For passwords of at least six characters, the classes of the first three
//! and last three characters are tallied per position. The report shows, for
//! each position, how the classes are distributed at that position.

use super::Agent;
use crate::charset::CharClass;
use crate::report::{percentage, Cell, Report, Table};

/// Shorter passwords are ignored
pub const MIN_LENGTH: usize = 6;

/// Tracked positions; negative values count from the end, -1 being the last
pub const POSITIONS: [isize; 6] = [0, 1, 2, -3, -2, -1];

pub struct CharsetPosition {
    /// `counts[slot][class]`, slots ordered like [`POSITIONS`]
    counts: [[u64; 4]; POSITIONS.len()],
    /// Passwords long enough to be tallied
    considered: u64,
    /// Characters at tracked positions outside every class
    ignored: u64,
}

impl CharsetPosition {
    pub fn new() -> Self {
        Self {
            counts: [[0; 4]; POSITIONS.len()],
            considered: 0,
            ignored: 0,
        }
    }

    /// Count for a signed position from [`POSITIONS`]
    #[cfg(test)]
    pub fn count(&self, position: isize, class: CharClass) -> Option<u64> {
        POSITIONS
            .iter()
            .position(|&p| p == position)
            .map(|slot| self.counts[slot][class as usize])
    }

    #[cfg(test)]
    pub fn considered(&self) -> u64 {
        self.considered
    }

    #[cfg(test)]
    pub fn ignored(&self) -> u64 {
        self.ignored
    }

    fn tally(&mut self, slot: usize, c: char) {
        match CharClass::of(c) {
            Some(class) => self.counts[slot][class as usize] += 1,
            None => self.ignored += 1,
        }
    }
}

impl Default for CharsetPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for CharsetPosition {
    fn process_line(&mut self, word: &str) {
        if word.chars().count() < MIN_LENGTH {
            return;
        }
        self.considered += 1;

        for (slot, c) in word.chars().take(3).enumerate() {
            self.tally(slot, c);
        }
        // last char is -1, the final slot
        for (i, c) in word.chars().rev().take(3).enumerate() {
            self.tally(POSITIONS.len() - 1 - i, c);
        }
    }

    fn build_report(&self) -> Report {
        let mut columns = vec!["Class".to_string()];
        columns.extend(POSITIONS.iter().map(|p| p.to_string()));
        let mut table = Table::new(columns);

        let slot_totals: Vec<u64> = self.counts.iter().map(|slot| slot.iter().sum()).collect();

        for class in CharClass::ALL {
            let mut row = vec![Cell::text(class.name())];
            row.extend(
                self.counts
                    .iter()
                    .zip(&slot_totals)
                    .map(|(slot, &total)| Cell::Percent(percentage(slot[class as usize], total))),
            );
            table.push(row);
        }

        Report::new("Character class by position")
            .table(table)
            .note(format!(
                "{} passwords of length >= {} considered, {} characters ignored",
                self.considered, MIN_LENGTH, self.ignored
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_word_only_touches_lower() {
        let mut agent = CharsetPosition::new();
        agent.process_line("password");

        for position in POSITIONS {
            for class in CharClass::ALL {
                let expected = u64::from(class == CharClass::Lower);
                assert_eq!(agent.count(position, class), Some(expected));
            }
        }
    }

    #[test]
    fn test_positions() {
        let mut agent = CharsetPosition::new();
        agent.process_line("Ab3xy!9Z");

        assert_eq!(agent.count(0, CharClass::Upper), Some(1));
        assert_eq!(agent.count(1, CharClass::Lower), Some(1));
        assert_eq!(agent.count(2, CharClass::Digit), Some(1));
        assert_eq!(agent.count(-3, CharClass::Symbol), Some(1));
        assert_eq!(agent.count(-2, CharClass::Digit), Some(1));
        assert_eq!(agent.count(-1, CharClass::Upper), Some(1));
        assert_eq!(agent.count(3, CharClass::Lower), None);
    }

    #[test]
    fn test_short_words_and_ignored_characters() {
        let mut agent = CharsetPosition::new();
        agent.process_line("abc12");
        agent.process_line("ñandu1");

        assert_eq!(agent.considered(), 1);
        assert_eq!(agent.ignored(), 1);
        assert_eq!(agent.count(0, CharClass::Lower), Some(0));
        assert_eq!(agent.count(1, CharClass::Lower), Some(1));
    }

    #[test]
    fn test_cells_are_conditional_on_position() {
        let mut agent = CharsetPosition::new();
        agent.process_line("abcdef");
        agent.process_line("Abcde1");
        agent.process_line("Abcde2");
        agent.process_line("ABCDE!");

        let report = agent.build_report();
        let rows = &report.tables[0].rows;
        // position 0: 1 lower, 3 upper
        assert_eq!(rows[0][1], Cell::Percent(25.0));
        assert_eq!(rows[1][1], Cell::Percent(75.0));
        // position -1: 1 lower, 2 digits, 1 symbol
        assert_eq!(rows[0][6], Cell::Percent(25.0));
        assert_eq!(rows[2][6], Cell::Percent(50.0));
        assert_eq!(rows[3][6], Cell::Percent(25.0));
        // each position sums to 100%
        for column in 1..=POSITIONS.len() {
            let sum: f64 = rows
                .iter()
                .map(|row| match row[column] {
                    Cell::Percent(p) => p,
                    _ => 0.0,
                })
                .sum();
            assert!((sum - 100.0).abs() < 1e-9);
        }
    }
}
