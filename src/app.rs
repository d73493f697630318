// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{bail, Result};
use clap::Parser;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Resolve Configuration
    let config = resolve_config(args)?;
    log::debug!("Resolved runtime config: {:?}", config);

    // 3. Walk the tree, resolving each directory from its parent
    let scanner = Scanner::new(&config)?;
    let reports = scanner.scan()?;

    if reports.is_empty() {
        log::warn!("⚠️ No directories found under {}", config.root.display());
        return Ok(());
    }

    // 4. Print to Stdout
    println!("{}", OutputGenerator::generate_report(&reports, config.scan));

    let diagnostics = OutputGenerator::count_diagnostics(&reports);
    if diagnostics > 0 {
        if config.strict {
            bail!("{} malformed or unknown directive(s)", diagnostics);
        }
        log::info!("{} directive(s) skipped", diagnostics);
    }

    Ok(())
}
