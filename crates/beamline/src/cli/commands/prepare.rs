//! Prepare command - Compile, then enable debug info for test builds

use clap::Args;
use console::style;
use tracing::info;

use beamline_core::config::load_config_or_default;
use beamline_tasks::{ConsoleReporter, Pipeline};

use crate::cli::{Cli, OutputFormat};

/// Eunit test preparation
#[derive(Debug, Args)]
pub struct PrepareCommand {}

impl PrepareCommand {
    /// Execute the prepare command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing prepare command");
        let cwd = std::env::current_dir()?;
        let (config, _config_path) = load_config_or_default(&cwd);

        let reporter = ConsoleReporter::new(cli.verbose);
        let pipeline = Pipeline::new(&cwd, &reporter);
        let (config, stats) = pipeline.prepare(config)?;

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "compiled": stats.compiled,
                    "skipped": stats.skipped,
                    "flags": config.compiler.flags,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!(
                        "{} test build flags: {}",
                        style("✓").green(),
                        config.compiler.flags.join(" ")
                    );
                }
            }
        }

        Ok(())
    }
}
