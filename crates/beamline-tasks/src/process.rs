//! Child process execution
//!
//! Commands run as blocking child processes with inherited stdio, so the
//! child's own console output is the diagnostic surface. Programs are
//! spawned with explicit argument vectors; the shell is involved only for
//! user-supplied hook commands.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{BuildError, Result};

/// Render a command for display, argv joined by single spaces
pub fn render_command(program: &str, args: &[String]) -> String {
    let mut line = String::from(program);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Run a program with an explicit argument vector, failing on non-zero exit
pub fn run_command(program: &str, args: &[String], cwd: &Path) -> Result<()> {
    debug!(program, ?args, cwd = %cwd.display(), "spawning");

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .status()
        .map_err(|e| BuildError::Spawn {
            command: render_command(program, args),
            source: e,
        })?;

    if !status.success() {
        return Err(BuildError::CommandFailed {
            command: render_command(program, args),
            exit_code: status.code(),
        });
    }

    Ok(())
}

/// Run a user-supplied command line via `sh -c`
pub fn run_shell(command: &str, cwd: &Path) -> Result<()> {
    debug!(command, cwd = %cwd.display(), "spawning shell command");

    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .status()
        .map_err(|e| BuildError::Spawn {
            command: command.to_string(),
            source: e,
        })?;

    if !status.success() {
        return Err(BuildError::CommandFailed {
            command: command.to_string(),
            exit_code: status.code(),
        });
    }

    Ok(())
}
