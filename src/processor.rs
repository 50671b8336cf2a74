//! Core processing engine
//!
//! Streams every corpus line through the active agents, in catalog order,
//! and collects their reports once the corpus is exhausted.

use crate::agents::{Agent, AgentConfig, AgentKind};
use crate::cli::{Args, Selection};
use crate::encoding::CorpusReader;
use crate::error::AnalyzerError;
use crate::progress::{create_bytes_progress_bar, print_header, print_info, print_warning, RunStats};
use crate::report::Report;

use anyhow::Context;
use bytesize::ByteSize;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub agent: AgentConfig,
    pub selection: Selection,
    pub recursive: bool,
    pub extensions: Vec<String>,
    pub quiet: bool,
    pub verbose: bool,
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            agent: AgentConfig {
                top_k: args.top,
                charset_sort: args.charset_sort,
            },
            selection: args.selection()?,
            recursive: args.recursive,
            extensions: args.get_extensions(),
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            selection: Selection::All,
            recursive: false,
            extensions: vec!["txt".to_string()],
            quiet: true,
            verbose: false,
        }
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
    agents: Vec<(AgentKind, Box<dyn Agent>)>,
    stats: RunStats,
}

impl Processor {
    /// Resolve the selection and build the active agents
    pub fn new(config: ProcessorConfig) -> Result<Self, AnalyzerError> {
        let agents = config
            .selection
            .resolve()?
            .into_iter()
            .map(|kind| (kind, kind.build(&config.agent)))
            .collect::<Vec<_>>();

        log::debug!(
            "active agents: {}",
            agents
                .iter()
                .map(|(kind, _)| kind.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            config,
            agents,
            stats: RunStats::new(),
        })
    }

    /// Active agents, in catalog order
    pub fn active_agents(&self) -> Vec<AgentKind> {
        self.agents.iter().map(|(kind, _)| *kind).collect()
    }

    /// Dispatch one line to every active agent; empty lines are skipped
    pub fn process_line(&mut self, line: &str) {
        if line.is_empty() {
            self.stats.empty_lines += 1;
            return;
        }

        self.stats.lines += 1;
        for (_, agent) in self.agents.iter_mut() {
            agent.process_line(line);
        }
    }

    pub fn process_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.process_line(line.as_ref());
        }
    }

    /// Stream a file or a directory of wordlists
    pub fn process(&mut self, input: &Path) -> anyhow::Result<()> {
        if !self.config.quiet {
            print_header("Scanning input...");
        }

        let files = collect_files(input, self.config.recursive, &self.config.extensions)?;

        if files.is_empty() {
            anyhow::bail!(
                "No files with extensions {:?} found in {:?}",
                self.config.extensions,
                input
            );
        }

        let total_bytes: u64 = files.iter().map(|(_, size)| *size).sum();

        if !self.config.quiet {
            print_info(&format!("Found {} files ({} total)", files.len(), ByteSize(total_bytes)));
            print_header(&format!("Analyzing with {} agents...", self.agents.len()));
        }

        let pb = if self.config.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_bytes_progress_bar(total_bytes, "Analyzing...")
        };

        for (path, _) in &files {
            if self.config.verbose {
                pb.set_message(format!("Analyzing {:?}...", path.file_name().unwrap_or_default()));
            }

            let mut reader = CorpusReader::open(path)?;
            let size = reader.size() as u64;
            let mut reported = 0;
            while let Some(line) = reader.next() {
                self.process_line(&line);

                // keep the bar cheap on huge files
                if self.stats.lines % 65_536 == 0 {
                    let position = reader.position() as u64;
                    pb.inc(position - reported);
                    reported = position;
                }
            }
            pb.inc(size.saturating_sub(reported));

            self.stats.files += 1;
            self.stats.bytes += size;
            self.stats.lossy_lines += reader.lossy_lines();

            if reader.lossy_lines() > 0 && !self.config.quiet {
                pb.suspend(|| {
                    print_warning(&format!(
                        "{:?}: {} lines were not valid {}",
                        path,
                        reader.lossy_lines(),
                        reader.encoding().name()
                    ))
                });
            }
        }

        pb.finish_with_message("Complete".green().to_string());
        Ok(())
    }

    /// Reports of every active agent, in catalog order; empty ones are left out
    pub fn reports(&self) -> Vec<(AgentKind, Report)> {
        self.agents
            .iter()
            .map(|(kind, agent)| (*kind, agent.build_report()))
            .filter(|(_, report)| !report.is_empty())
            .collect()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}

/// Collect the files making up the corpus, sorted by path
fn collect_files(input: &Path, recursive: bool, extensions: &[String]) -> anyhow::Result<Vec<(PathBuf, u64)>> {
    let mut files = Vec::new();

    if input.is_file() {
        let size = fs::metadata(input)
            .with_context(|| format!("cannot stat {:?}", input))?
            .len();
        files.push((input.to_path_buf(), size));
    } else if input.is_dir() {
        let walker = if recursive {
            WalkDir::new(input)
        } else {
            WalkDir::new(input).max_depth(1)
        };

        for entry in walker.sort_by_file_name() {
            let entry = entry.with_context(|| format!("cannot walk {:?}", input))?;
            let path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }
            let wanted = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.contains(&ext.to_lowercase()));

            if wanted {
                let size = entry
                    .metadata()
                    .with_context(|| format!("cannot stat {:?}", path))?
                    .len();
                files.push((path.to_path_buf(), size));
            }
        }
    } else {
        anyhow::bail!("Input path does not exist: {:?}", input);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Cell;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn processor(selection: Selection, top_k: usize) -> Processor {
        Processor::new(ProcessorConfig {
            agent: AgentConfig {
                top_k,
                ..AgentConfig::default()
            },
            selection,
            ..ProcessorConfig::default()
        })
        .unwrap()
    }

    fn report_for(processor: &Processor, kind: AgentKind) -> Report {
        processor
            .reports()
            .into_iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, report)| report)
            .unwrap()
    }

    #[test]
    fn test_word_frequency_end_to_end() {
        let mut processor = processor(Selection::Include(vec![1]), 2);
        processor.process_lines(["abc123", "abc123", "ABCD"]);

        let reports = processor.reports();
        assert_eq!(reports.len(), 1);

        let (kind, report) = &reports[0];
        assert_eq!(*kind, AgentKind::WordFrequency);
        let rows = &report.tables[0].rows;
        assert_eq!(rows[0][0], Cell::text("abc123"));
        assert_eq!(rows[0][1], Cell::Count(2));
        assert_eq!(rows[1][0], Cell::text("ABCD"));
        assert_eq!(rows[1][1], Cell::Count(1));
        assert_eq!(report.notes[0], "2 unique of 3 total");
    }

    #[test]
    fn test_mask_end_to_end() {
        let mut processor = processor(Selection::Include(vec![5]), 10);
        processor.process_line("Pass1!");

        let report = report_for(&processor, AgentKind::HashcatMaskFrequency);
        assert_eq!(report.tables[0].rows[0][0], Cell::text("?u?l?l?l?d?s"));
        assert_eq!(
            report.tables[1].rows[0][2],
            Cell::Ratio(26.0 * 26.0 * 26.0 * 26.0 * 10.0 * 33.0)
        );
    }

    #[test]
    fn test_reports_follow_catalog_order() {
        let mut processor = processor(Selection::Include(vec![8, 2, 6]), 10);
        processor.process_lines(["p@ssword1", "dragon"]);

        let kinds: Vec<_> = processor.reports().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                AgentKind::BaseWordFrequency,
                AgentKind::CharsetPosition,
                AgentKind::SymbolFrequency,
            ]
        );
    }

    #[test]
    fn test_exclude_selection() {
        let processor = processor(Selection::Exclude(vec![1, 2, 3]), 10);
        assert_eq!(processor.active_agents().len(), 5);
        assert_eq!(processor.active_agents()[0], AgentKind::CharsetFrequency);
    }

    #[test]
    fn test_invalid_selection_fails_before_processing() {
        let result = Processor::new(ProcessorConfig {
            selection: Selection::Include(vec![1, 42]),
            ..ProcessorConfig::default()
        });
        assert!(matches!(
            result,
            Err(AnalyzerError::InvalidAgentIndex { index: 42, .. })
        ));
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let mut processor = processor(Selection::All, 10);
        processor.process_lines(["", "abc", ""]);
        assert_eq!(processor.stats().lines, 1);
        assert_eq!(processor.stats().empty_lines, 2);
    }

    #[test]
    fn test_process_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "123456\r\npassword\n123456\n\nPass1!\n").unwrap();
        file.flush().unwrap();

        let mut processor = processor(Selection::Include(vec![1, 3]), 10);
        processor.process(file.path()).unwrap();

        assert_eq!(processor.stats().lines, 4);
        assert_eq!(processor.stats().files, 1);
        assert_eq!(processor.stats().bytes, file.as_file().metadata().unwrap().len());

        let report = report_for(&processor, AgentKind::WordFrequency);
        assert_eq!(report.tables[0].rows[0][0], Cell::text("123456"));
        assert_eq!(report.tables[0].rows[0][1], Cell::Count(2));
    }

    #[test]
    fn test_process_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "one\ntwo\n").unwrap();
        fs::write(dir.path().join("b.lst"), "three\n").unwrap();
        fs::write(dir.path().join("skip.bin"), "four\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), "five\n").unwrap();

        let mut flat = Processor::new(ProcessorConfig {
            extensions: vec!["txt".to_string(), "lst".to_string()],
            ..ProcessorConfig::default()
        })
        .unwrap();
        flat.process(dir.path()).unwrap();
        assert_eq!(flat.stats().files, 2);
        assert_eq!(flat.stats().lines, 3);

        let mut recursive = Processor::new(ProcessorConfig {
            recursive: true,
            ..ProcessorConfig::default()
        })
        .unwrap();
        recursive.process(dir.path()).unwrap();
        assert_eq!(recursive.stats().files, 2);
        assert_eq!(recursive.stats().lines, 3);
    }

    #[test]
    fn test_directory_without_wordlists_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.md"), "abc\n").unwrap();

        let mut processor = processor(Selection::All, 10);
        let err = processor.process(dir.path()).unwrap_err();
        assert!(err.to_string().contains("No files"));
        assert_eq!(processor.stats().files, 0);
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let mut processor = processor(Selection::All, 10);
        assert!(processor.process(Path::new("/nonexistent/rockyou.txt")).is_err());
        assert_eq!(processor.stats().lines, 0);
    }
}
