//! Error types for build steps

use thiserror::Error;

/// Result type for build operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build step errors
#[derive(Debug, Error)]
pub enum BuildError {
    /// Required tool not installed
    #[error("Required tool '{tool}' not found. {install_hint}")]
    ToolNotFound { tool: String, install_hint: String },

    /// Child process could not be started
    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Child process exited non-zero
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    /// Invalid source glob pattern
    #[error("Invalid source pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Get exit code for CLI.
    ///
    /// A failed child process propagates its own exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolNotFound { .. } => 3,
            Self::Spawn { .. } => 1,
            Self::CommandFailed { exit_code, .. } => exit_code.unwrap_or(1),
            Self::Pattern(_) => 4,
            Self::Io(_) => 7,
        }
    }
}
