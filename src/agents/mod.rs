//! Analysis agents
//!
//! An agent folds every corpus line into its own frequency table and turns
//! that table into a [`Report`] once the corpus is exhausted. Agents never
//! see each other's state.
//!
//! The available agents form a fixed [`AgentKind::ALL`] catalog, addressed by
//! 1-based index on the command line.

mod base_word;
mod character;
mod charset;
mod length;
mod mask;
mod position;
mod symbol;
mod word;

pub use base_word::BaseWordFrequency;
pub use character::CharacterFrequency;
pub use charset::CharsetFrequency;
pub use length::LengthFrequency;
pub use mask::HashcatMaskFrequency;
pub use position::CharsetPosition;
pub use symbol::SymbolFrequency;
pub use word::WordFrequency;

use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use hashbrown::HashMap;

use crate::cli::CharsetSort;
use crate::report::{percentage, Cell, Report, Table};
use crate::topk::top_k;

/// Frequency table shared by all agents
pub type Counter<K> = HashMap<K, u64, RandomState>;

pub(crate) fn counter<K>() -> Counter<K> {
    HashMap::with_hasher(RandomState::new())
}

/// A pluggable analysis module
pub trait Agent {
    /// Fold one corpus line into the agent's state
    fn process_line(&mut self, word: &str);

    /// Build the report from the current state; may be called repeatedly
    fn build_report(&self) -> Report;
}

/// Settings handed to every agent at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentConfig {
    /// Row bound for ranked tables
    pub top_k: usize,
    pub charset_sort: CharsetSort,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            charset_sort: CharsetSort::Count,
        }
    }
}

/// Catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentKind {
    WordFrequency,
    BaseWordFrequency,
    LengthFrequency,
    CharsetFrequency,
    HashcatMaskFrequency,
    CharsetPosition,
    CharacterFrequency,
    SymbolFrequency,
}

impl AgentKind {
    /// The catalog, in report order
    pub const ALL: [AgentKind; 8] = [
        AgentKind::WordFrequency,
        AgentKind::BaseWordFrequency,
        AgentKind::LengthFrequency,
        AgentKind::CharsetFrequency,
        AgentKind::HashcatMaskFrequency,
        AgentKind::CharsetPosition,
        AgentKind::CharacterFrequency,
        AgentKind::SymbolFrequency,
    ];

    /// Look up a 1-based catalog index
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// 1-based catalog index
    pub fn index(self) -> usize {
        self as usize + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::WordFrequency => "word-frequency",
            Self::BaseWordFrequency => "base-word-frequency",
            Self::LengthFrequency => "length-frequency",
            Self::CharsetFrequency => "charset-frequency",
            Self::HashcatMaskFrequency => "hashcat-mask-frequency",
            Self::CharsetPosition => "charset-position",
            Self::CharacterFrequency => "character-frequency",
            Self::SymbolFrequency => "symbol-frequency",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::WordFrequency => "Most common passwords",
            Self::BaseWordFrequency => "Most common base words (leading/trailing non-letters stripped)",
            Self::LengthFrequency => "Password length distribution",
            Self::CharsetFrequency => "Passwords fitting each of the 15 charsets",
            Self::HashcatMaskFrequency => "Most common hashcat masks, by count and by keyspace density",
            Self::CharsetPosition => "Character class distribution at the first and last 3 positions",
            Self::CharacterFrequency => "Most common characters",
            Self::SymbolFrequency => "Most common symbols",
        }
    }

    /// Instantiate the agent
    pub fn build(self, config: &AgentConfig) -> Box<dyn Agent> {
        match self {
            Self::WordFrequency => Box::new(WordFrequency::new(config.top_k)),
            Self::BaseWordFrequency => Box::new(BaseWordFrequency::new(config.top_k)),
            Self::LengthFrequency => Box::new(LengthFrequency::new()),
            Self::CharsetFrequency => Box::new(CharsetFrequency::new(config.charset_sort)),
            Self::HashcatMaskFrequency => Box::new(HashcatMaskFrequency::new(config.top_k)),
            Self::CharsetPosition => Box::new(CharsetPosition::new()),
            Self::CharacterFrequency => Box::new(CharacterFrequency::new(config.top_k)),
            Self::SymbolFrequency => Box::new(SymbolFrequency::new(config.top_k)),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `key | count | percent` table of the `k` most frequent keys
pub(crate) fn ranked_table<K>(
    key_column: &str,
    counts: &Counter<K>,
    total: u64,
    k: usize,
    label: impl Fn(&K) -> String,
) -> Table
where
    K: Ord + Hash + Eq,
{
    let mut table = Table::new([key_column, "Count", "Percent"]);
    for (key, count) in top_k(counts, k) {
        table.push(vec![
            Cell::Text(label(key)),
            Cell::Count(count),
            Cell::Percent(percentage(count, total)),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_indices() {
        for (i, kind) in AgentKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i + 1);
            assert_eq!(AgentKind::from_index(i + 1), Some(*kind));
        }
        assert_eq!(AgentKind::from_index(0), None);
        assert_eq!(AgentKind::from_index(9), None);
    }

    #[test]
    fn test_every_agent_reports_on_empty_input() {
        let config = AgentConfig::default();
        for kind in AgentKind::ALL {
            let agent = kind.build(&config);
            assert!(!agent.build_report().is_empty(), "{}", kind);
        }
    }

    #[test]
    fn test_reports_are_repeatable() {
        let config = AgentConfig::default();
        for kind in AgentKind::ALL {
            let mut agent = kind.build(&config);
            for word in ["Pass1!", "password", "abc123", "abc123", "Summer2024!"] {
                agent.process_line(word);
            }
            assert_eq!(agent.build_report(), agent.build_report(), "{}", kind);
        }
    }
}
