//! Command-line interface definition for wordlist-analyzer
//!
//! Provides argument parsing and agent selection for the analyzer.

use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

use crate::agents::AgentKind;
use crate::error::AnalyzerError;

/// Streaming statistical analyzer for password wordlists
///
/// Runs a set of analysis agents over every line of a wordlist and prints
/// frequency reports.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-analyzer",
    author = "m0h1nd4",
    version,
    about = "Streaming statistical analyzer for password wordlists",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                         WORDLIST-ANALYZER v1.0.0                             ║
║                    Password Corpus Statistics & Masks                         ║
║                         For Penetration Testing                               ║
╚══════════════════════════════════════════════════════════════════════════════╝

Run frequency analyses over a password list: common passwords and base
words, lengths, charsets, per-position character classes, characters,
symbols and hashcat masks ranked by count and by keyspace density.

EXAMPLES:
    # Every agent, top 10
    wordlist-analyzer -i rockyou.txt

    # Top 25, report written to a file
    wordlist-analyzer -i rockyou.txt -k 25 -o rockyou_stats.txt

    # Only the hashcat mask and length agents
    wordlist-analyzer -i rockyou.txt --include 3,5

    # Everything except the plain word list
    wordlist-analyzer -i rockyou.txt --exclude 1

    # All .txt/.lst wordlists below a directory, as one corpus
    wordlist-analyzer -i /wordlists/ --recursive --extensions txt,lst

    # Show the agent catalog
    wordlist-analyzer --list-agents
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/wordlist-analyzer"
)]
pub struct Args {
    /// Input file or directory path
    #[arg(short, long, value_name = "PATH", required_unless_present = "list_agents")]
    pub input: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of rows in ranked tables
    #[arg(short = 'k', long = "top", value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// Run only these agents (1-based catalog indices, e.g. 1,3,5)
    #[arg(long, value_name = "INDICES", value_delimiter = ',', conflicts_with = "exclude")]
    pub include: Option<Vec<usize>>,

    /// Run every agent except these (1-based catalog indices)
    #[arg(long, value_name = "INDICES", value_delimiter = ',')]
    pub exclude: Option<Vec<usize>>,

    /// Sort order of the charset table
    #[arg(long, value_enum, default_value_t = CharsetSort::Count)]
    pub charset_sort: CharsetSort,

    /// Process directories recursively
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// File extensions to process in directories (default: txt)
    #[arg(long, value_name = "EXT", default_value = "txt")]
    pub extensions: String,

    /// Print the agent catalog and exit
    #[arg(long, default_value_t = false)]
    pub list_agents: bool,

    /// Quiet mode - report only
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Ordering of the charset frequency table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CharsetSort {
    /// Most common charset first
    Count,
    /// Highest count per unit of keyspace first
    Density,
}

impl fmt::Display for CharsetSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => f.write_str("count"),
            Self::Density => f.write_str("density"),
        }
    }
}

/// Which catalog entries take part in a run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    /// Only the listed 1-based indices
    Include(Vec<usize>),
    /// Every agent but the listed 1-based indices
    Exclude(Vec<usize>),
}

impl Selection {
    /// Resolve into catalog entries, in catalog order
    ///
    /// Fails on any index outside the catalog and on selections that leave
    /// nothing to run. Repeated indices are harmless.
    pub fn resolve(&self) -> Result<Vec<AgentKind>, AnalyzerError> {
        let listed = match self {
            Self::All => return Ok(AgentKind::ALL.to_vec()),
            Self::Include(indices) | Self::Exclude(indices) => indices,
        };

        let mut kinds = Vec::with_capacity(listed.len());
        for &index in listed {
            let kind = AgentKind::from_index(index).ok_or(AnalyzerError::InvalidAgentIndex {
                index,
                max: AgentKind::ALL.len(),
            })?;
            kinds.push(kind);
        }

        let include = matches!(self, Self::Include(_));
        let active: Vec<AgentKind> = AgentKind::ALL
            .into_iter()
            .filter(|kind| kinds.contains(kind) == include)
            .collect();

        if active.is_empty() {
            return Err(AnalyzerError::EmptySelection);
        }
        Ok(active)
    }
}

impl Args {
    /// Agent selection from --include / --exclude
    pub fn selection(&self) -> Result<Selection, AnalyzerError> {
        match (&self.include, &self.exclude) {
            (Some(_), Some(_)) => Err(AnalyzerError::ConflictingSelection),
            (Some(include), None) => Ok(Selection::Include(include.clone())),
            (None, Some(exclude)) => Ok(Selection::Exclude(exclude.clone())),
            (None, None) => Ok(Selection::All),
        }
    }

    /// Parse file extensions to process
    pub fn get_extensions(&self) -> Vec<String> {
        self.extensions
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::parse_from(["wordlist-analyzer", "-i", "rockyou.txt"]);

        assert_eq!(args.input, Some(PathBuf::from("rockyou.txt")));
        assert_eq!(args.top, 10);
        assert_eq!(args.charset_sort, CharsetSort::Count);
        assert_eq!(args.selection().unwrap(), Selection::All);
        assert_eq!(args.get_extensions(), vec!["txt"]);
    }

    #[test]
    fn test_parse_include_list() {
        let args = Args::parse_from([
            "wordlist-analyzer", "-i", "list.txt", "--include", "5,3", "-k", "25",
        ]);

        assert_eq!(args.top, 25);
        assert_eq!(args.selection().unwrap(), Selection::Include(vec![5, 3]));
    }

    #[test]
    fn test_include_conflicts_with_exclude() {
        let result = Args::try_parse_from([
            "wordlist-analyzer", "-i", "list.txt", "--include", "1", "--exclude", "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_input_required_unless_listing() {
        assert!(Args::try_parse_from(["wordlist-analyzer"]).is_err());
        let args = Args::try_parse_from(["wordlist-analyzer", "--list-agents"]).unwrap();
        assert!(args.list_agents);
    }

    #[test]
    fn test_extensions() {
        let args = Args::parse_from([
            "wordlist-analyzer", "-i", "dir", "--extensions", "TXT, .lst,,dic",
        ]);
        assert_eq!(args.get_extensions(), vec!["txt", "lst", "dic"]);
    }

    #[test]
    fn test_resolve_include_in_catalog_order() {
        let kinds = Selection::Include(vec![5, 3, 5]).resolve().unwrap();
        assert_eq!(
            kinds,
            vec![AgentKind::LengthFrequency, AgentKind::HashcatMaskFrequency]
        );
    }

    #[test]
    fn test_resolve_exclude() {
        let kinds = Selection::Exclude(vec![1, 8]).resolve().unwrap();
        assert_eq!(kinds.len(), 6);
        assert!(!kinds.contains(&AgentKind::WordFrequency));
        assert!(!kinds.contains(&AgentKind::SymbolFrequency));
        assert_eq!(kinds[0], AgentKind::BaseWordFrequency);
    }

    #[test]
    fn test_resolve_rejects_bad_indices() {
        assert_eq!(
            Selection::Include(vec![2, 9]).resolve(),
            Err(AnalyzerError::InvalidAgentIndex { index: 9, max: 8 })
        );
        assert_eq!(
            Selection::Exclude(vec![0]).resolve(),
            Err(AnalyzerError::InvalidAgentIndex { index: 0, max: 8 })
        );
    }

    #[test]
    fn test_resolve_empty() {
        assert_eq!(
            Selection::Exclude((1..=8).collect()).resolve(),
            Err(AnalyzerError::EmptySelection)
        );
        assert_eq!(Selection::Include(vec![]).resolve(), Err(AnalyzerError::EmptySelection));
    }
}
