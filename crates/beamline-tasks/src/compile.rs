//! Stale-output rule and compiler invocation
//!
//! An output is stale when it does not exist or its modification time is
//! older than its source's. Each stale output is rebuilt by one `erlc`
//! invocation; the first failure aborts the run.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use beamline_core::config::{CompilerConfig, Config, ERLC_EXECUTABLE};

use crate::error::{BuildError, Result};
use crate::process::run_command;
use crate::reporter::{BuildEvent, BuildReporter};
use crate::sources::{SourcePair, TestSources};

/// Counts from a compile step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CompileStats {
    /// Outputs that were rebuilt
    pub compiled: usize,
    /// Outputs that were already up to date
    pub skipped: usize,
}

/// Erlang compiler frontend
pub struct Compiler {
    /// Path to the erlc executable (resolved from PATH if None)
    erlc_path: Option<PathBuf>,
}

impl Compiler {
    pub fn new() -> Self {
        Self { erlc_path: None }
    }

    pub fn with_erlc_path(path: impl Into<PathBuf>) -> Self {
        Self {
            erlc_path: Some(path.into()),
        }
    }

    fn erlc_cmd(&self) -> String {
        self.erlc_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| ERLC_EXECUTABLE.to_string())
    }

    /// Verify the compiler is available before the first invocation
    pub fn check_prerequisites(&self) -> Result<()> {
        if let Some(path) = &self.erlc_path {
            if path.exists() {
                return Ok(());
            }
        } else if which::which(ERLC_EXECUTABLE).is_ok() {
            return Ok(());
        }

        Err(BuildError::ToolNotFound {
            tool: ERLC_EXECUTABLE.to_string(),
            install_hint: "Install Erlang/OTP and ensure erlc is on PATH.".to_string(),
        })
    }

    /// Rebuild every stale output in the source set, in order.
    pub fn compile_stale(
        &self,
        config: &Config,
        root: &Path,
        sources: &TestSources,
        reporter: &dyn BuildReporter,
    ) -> Result<CompileStats> {
        let mut stats = CompileStats::default();

        for pair in sources.pairs() {
            if is_stale(pair)? {
                reporter.report(&BuildEvent::Compiling {
                    source: pair.source.clone(),
                });
                let out_dir = output_dir(pair);
                let args = erlc_args(&config.compiler, &out_dir, &pair.source);
                run_command(&self.erlc_cmd(), &args, root)?;
                stats.compiled += 1;
            } else {
                reporter.report(&BuildEvent::UpToDate {
                    output: pair.output.clone(),
                });
                stats.skipped += 1;
            }
        }

        info!(
            compiled = stats.compiled,
            skipped = stats.skipped,
            "test compilation finished"
        );
        Ok(stats)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether an output must be rebuilt from its source
pub fn is_stale(pair: &SourcePair) -> Result<bool> {
    let output_meta = match std::fs::metadata(&pair.output) {
        Ok(meta) => meta,
        Err(_) => {
            debug!(output = %pair.output.display(), "output missing");
            return Ok(true);
        }
    };
    let source_meta = std::fs::metadata(&pair.source)?;

    match (output_meta.modified(), source_meta.modified()) {
        (Ok(output_time), Ok(source_time)) => Ok(output_time < source_time),
        // No mtime on this filesystem: rebuild rather than trust the output
        _ => Ok(true),
    }
}

/// Directory the compiled output lands in
fn output_dir(pair: &SourcePair) -> PathBuf {
    match pair.output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Compose the erlc argument vector for one source file
pub fn erlc_args(compiler: &CompilerConfig, out_dir: &Path, source: &Path) -> Vec<String> {
    let mut args = compiler.flags.clone();

    for dir in &compiler.include_dirs {
        args.push("-I".to_string());
        args.push(dir.to_string_lossy().into_owned());
    }
    for dir in &compiler.code_paths {
        args.push("-pa".to_string());
        args.push(dir.to_string_lossy().into_owned());
    }

    args.push("-o".to_string());
    args.push(out_dir.to_string_lossy().into_owned());
    args.push(source.to_string_lossy().into_owned());
    args
}
