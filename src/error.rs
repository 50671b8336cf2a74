//! Error types for the analyzer library
//!
//! Configuration-time failures are typed here; I/O failures are reported
//! through `anyhow` by the processor and the binary.

use thiserror::Error;

/// Errors raised while configuring agents or parsing masks
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    /// A selection index outside `1..=max`
    #[error("invalid agent index {index}: valid indices are 1 to {max}")]
    InvalidAgentIndex { index: usize, max: usize },

    /// The selection leaves no agent to run
    #[error("agent selection is empty: nothing to analyze")]
    EmptySelection,

    /// An include list and an exclude list were both given
    #[error("--include and --exclude are mutually exclusive")]
    ConflictingSelection,

    /// A hashcat mask containing something other than ?l ?u ?d ?s
    #[error("invalid mask '{mask}': unexpected token at position {position}")]
    InvalidMask { mask: String, position: usize },
}
