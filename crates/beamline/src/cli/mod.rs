//! CLI definition and command handling

pub mod commands;

use clap::{Parser, Subcommand};

use commands::{CompileCommand, PrepareCommand, TestCommand};

/// Beamline - Build orchestrator for Erlang eunit test suites
#[derive(Debug, Parser)]
#[command(name = "beamline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile eunit test sources
    Compile(CompileCommand),

    /// Eunit test preparation
    Prepare(PrepareCommand),

    /// Run eunit tests
    Test(TestCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Compile(ref cmd) => cmd.execute(&self),
            Commands::Prepare(ref cmd) => cmd.execute(&self),
            Commands::Test(ref cmd) => cmd.execute(&self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_test_with_flags() {
        let cli = Cli::parse_from([
            "beamline", "test", "--cover", "--suites", "login logout", "test",
        ]);
        match cli.command {
            Commands::Test(cmd) => {
                assert!(cmd.cover);
                assert_eq!(cmd.suites.as_deref(), Some("login logout"));
                assert_eq!(cmd.dir.as_deref(), Some(std::path::Path::new("test")));
            }
            _ => panic!("expected test command"),
        }
    }
}
