//! Compile command - Rebuild stale eunit test modules

use clap::Args;
use console::style;
use tracing::info;

use beamline_core::config::load_config_or_default;
use beamline_tasks::{ConsoleReporter, Pipeline};

use crate::cli::{Cli, OutputFormat};

/// Compile eunit test sources
#[derive(Debug, Args)]
pub struct CompileCommand {}

impl CompileCommand {
    /// Execute the compile command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing compile command");
        let cwd = std::env::current_dir()?;
        let (config, _config_path) = load_config_or_default(&cwd);

        let reporter = ConsoleReporter::new(cli.verbose);
        let pipeline = Pipeline::new(&cwd, &reporter);
        let stats = pipeline.compile(&config)?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!(
                        "{} {} compiled, {} up to date",
                        style("✓").green(),
                        stats.compiled,
                        stats.skipped
                    );
                }
            }
        }

        Ok(())
    }
}
