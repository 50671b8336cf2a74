//! Wordlist Analyzer - Password corpus statistics for penetration testing
//!
//! Main entry point for the command-line application.

use clap::Parser;
use colored::*;
use std::path::Path;
use std::process;

use wordlist_analyzer::agents::AgentKind;
use wordlist_analyzer::cli::Args;
use wordlist_analyzer::output::OutputTarget;
use wordlist_analyzer::processor::{Processor, ProcessorConfig};
use wordlist_analyzer::progress::{print_banner, print_bullet, print_error, print_header, print_info, print_success};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.list_agents {
        print_catalog();
        return Ok(());
    }

    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    let Some(input) = args.input.as_deref() else {
        anyhow::bail!("No input given: use --input PATH");
    };
    validate_input(input)?;

    // Fails on bad selections before any input is read
    let config = ProcessorConfig::from_args(&args)?;

    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    let mut processor = Processor::new(config)?;
    processor.process(input)?;

    let target = OutputTarget::from_option(args.output.clone());
    target.write_reports(&processor.reports())?;

    if !args.quiet {
        if let OutputTarget::File(path) = &target {
            print_success(&format!("Report written to: {:?}", path));
        }
        processor.stats().print_summary();
    }

    Ok(())
}

/// Validate the input path
fn validate_input(input: &Path) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("Input path does not exist: {:?}", input);
    }
    Ok(())
}

/// Print the agent catalog
fn print_catalog() {
    println!("{}", "Available agents:".green().bold());
    for kind in AgentKind::ALL {
        println!(
            "  {:>2}  {:<24} {}",
            kind.index().to_string().cyan(),
            kind.name(),
            kind.description()
        );
    }
}

/// Print configuration summary
fn print_config(args: &Args, config: &ProcessorConfig) {
    print_header("Configuration");

    print_info(&format!("Input:        {:?}", args.input.as_deref().unwrap_or(Path::new("-"))));
    match &args.output {
        Some(path) => print_info(&format!("Output:       {:?}", path)),
        None => print_info("Output:       stdout"),
    }
    print_info(&format!("Top K:        {}", config.agent.top_k));
    print_info(&format!("Charset sort: {}", config.agent.charset_sort));
    print_info(&format!("Recursive:    {}", config.recursive));
    print_info(&format!("Extensions:   {:?}", config.extensions));

    if let Ok(kinds) = config.selection.resolve() {
        print_info("Agents:");
        for kind in kinds {
            print_bullet(&format!("{}. {}", kind.index(), kind.name()));
        }
    }
}
