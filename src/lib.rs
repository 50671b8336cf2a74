//! # Wordlist Analyzer
//!
//! Streaming statistical analysis of password wordlists for penetration testing.
//!
//! ## Features
//!
//! - **Word and base-word frequency**: most common passwords and their letter cores
//! - **Length distribution**: full table of password lengths
//! - **Charset frequency**: the 15 unions of lower/upper/numeric/symbolic classes
//! - **Hashcat masks**: ranked by count and by count per unit of keyspace
//! - **Positional classes**: character classes at the first and last 3 positions
//! - **Character and symbol frequency**
//! - **Large file support**: memory-mapped input with encoding detection
//!
//! ## Usage
//!
//! ```bash
//! # Every agent, top 10
//! wordlist-analyzer -i rockyou.txt
//!
//! # Only lengths and masks, top 25
//! wordlist-analyzer -i rockyou.txt --include 3,5 -k 25
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wordlist_analyzer::cli::Selection;
//! use wordlist_analyzer::output::render_reports;
//! use wordlist_analyzer::processor::{Processor, ProcessorConfig};
//!
//! let config = ProcessorConfig {
//!     selection: Selection::Include(vec![1, 5]),
//!     ..ProcessorConfig::default()
//! };
//!
//! let mut processor = Processor::new(config).unwrap();
//! processor.process_lines(["Pass1!", "password", "Pass1!"]);
//!
//! let text = render_reports(&processor.reports());
//! assert!(text.contains("?u?l?l?l?d?s"));
//! ```

pub mod agents;
pub mod charset;
pub mod cli;
pub mod encoding;
pub mod error;
pub mod mask;
pub mod output;
pub mod processor;
pub mod progress;
pub mod report;
pub mod topk;

pub use cli::Args;
pub use error::AnalyzerError;
pub use processor::{Processor, ProcessorConfig};
