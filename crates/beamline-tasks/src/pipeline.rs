//! The build step chain
//!
//! Steps form an explicit call chain: `test` runs `prepare`, which runs
//! `compile`, which runs the optional project-compile hook first. Each step
//! takes the configuration by value and the whole chain is evaluated once
//! per invocation. The first failing child process aborts the chain.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use beamline_core::config::Config;

use crate::compile::{CompileStats, Compiler};
use crate::error::Result;
use crate::process::run_shell;
use crate::reporter::{BuildEvent, BuildReporter};
use crate::runner::{run_tests, TestRun};
use crate::sources::TestSources;

/// Summary of a completed run, for human or JSON output
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Outputs rebuilt by the compile step
    pub compiled: usize,
    /// Outputs that were already up to date
    pub skipped: usize,
    /// Compiler flags in effect after preparation
    pub flags: Vec<String>,
    /// Directory the runner was pointed at
    pub dir: PathBuf,
    /// Whether coverage collection was requested
    pub cover: bool,
    /// Suite names forwarded to the runner
    pub suites: Vec<String>,
}

/// The build step chain rooted at a project directory
pub struct Pipeline<'a> {
    root: &'a Path,
    compiler: Compiler,
    reporter: &'a dyn BuildReporter,
}

impl<'a> Pipeline<'a> {
    pub fn new(root: &'a Path, reporter: &'a dyn BuildReporter) -> Self {
        Self {
            root,
            compiler: Compiler::new(),
            reporter,
        }
    }

    /// Use a specific compiler frontend (explicit erlc path)
    pub fn with_compiler(mut self, compiler: Compiler) -> Self {
        self.compiler = compiler;
        self
    }

    /// Compile step: run the project-compile hook, then rebuild every stale
    /// test output.
    pub fn compile(&self, config: &Config) -> Result<CompileStats> {
        self.compiler.check_prerequisites()?;

        if let Some(command) = &config.compiler.project_compile {
            self.reporter.report(&BuildEvent::ProjectCompile {
                command: command.clone(),
            });
            run_shell(command, self.root)?;
        }

        let sources = TestSources::discover(self.root, &config.tests)?;
        debug!(sources = sources.len(), "compile step starting");
        self.compiler
            .compile_stale(config, self.root, &sources, self.reporter)
    }

    /// Prepare step: compile, then derive the configuration with debug info
    /// enabled for test builds.
    pub fn prepare(&self, config: Config) -> Result<(Config, CompileStats)> {
        let stats = self.compile(&config)?;
        self.reporter.report(&BuildEvent::DebugEnabled);
        Ok((config.with_debug_info(), stats))
    }

    /// Test step: prepare, then hand off to the eunit runner.
    pub fn test(&self, config: Config, run: &TestRun) -> Result<RunSummary> {
        let (config, stats) = self.prepare(config)?;
        run_tests(&config, self.root, run, self.reporter)?;

        Ok(RunSummary {
            compiled: stats.compiled,
            skipped: stats.skipped,
            flags: config.compiler.flags.clone(),
            dir: run.dir.clone(),
            cover: run.cover,
            suites: run.suites.names().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::CollectingReporter;

    #[cfg(unix)]
    fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_full_chain_order_and_summary() {
        let temp = tempfile::TempDir::new().unwrap();
        let test_dir = temp.path().join("test");
        std::fs::create_dir(&test_dir).unwrap();
        std::fs::write(test_dir.join("login_tests.erl"), "").unwrap();

        let erlc = write_stub(temp.path(), "erlc", "exit 0");
        let runner = write_stub(temp.path(), "eunit-runner", "exit 0");

        let mut config = Config::default();
        config.runner.path = Some(runner);

        let reporter = CollectingReporter::new();
        let pipeline =
            Pipeline::new(temp.path(), &reporter).with_compiler(Compiler::with_erlc_path(erlc));

        let run = TestRun::new("test")
            .with_cover(true)
            .with_suites(crate::runner::SuiteFilter::parse("login logout"));
        let summary = pipeline.test(config, &run).unwrap();

        assert_eq!(summary.compiled, 1);
        assert_eq!(summary.skipped, 0);
        assert!(summary.cover);
        assert_eq!(summary.suites, vec!["login", "logout"]);
        assert_eq!(summary.flags, vec!["+debug_info"]);

        // compile happens before the debug notice, which precedes the runner
        let events = reporter.events();
        let compiling = events
            .iter()
            .position(|e| matches!(e, BuildEvent::Compiling { .. }))
            .unwrap();
        let debug_enabled = events
            .iter()
            .position(|e| matches!(e, BuildEvent::DebugEnabled))
            .unwrap();
        let running = events
            .iter()
            .position(|e| matches!(e, BuildEvent::RunningTests { .. }))
            .unwrap();
        assert!(compiling < debug_enabled);
        assert!(debug_enabled < running);

        // the composed command ends with the cover flag, suites, and dir
        let command = events
            .iter()
            .find_map(|e| match e {
                BuildEvent::RunnerCommand { command } => Some(command.clone()),
                _ => None,
            })
            .unwrap();
        assert!(command.ends_with("-cover -s login -s logout test"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_compile_aborts_chain() {
        let temp = tempfile::TempDir::new().unwrap();
        let test_dir = temp.path().join("test");
        std::fs::create_dir(&test_dir).unwrap();
        std::fs::write(test_dir.join("a_tests.erl"), "").unwrap();

        let erlc = write_stub(temp.path(), "erlc", "exit 1");
        let runner = write_stub(temp.path(), "eunit-runner", "exit 0");

        let mut config = Config::default();
        config.runner.path = Some(runner);

        let reporter = CollectingReporter::new();
        let pipeline =
            Pipeline::new(temp.path(), &reporter).with_compiler(Compiler::with_erlc_path(erlc));

        assert!(pipeline.test(config, &TestRun::new("test")).is_err());

        // the runner never starts after a compile failure
        assert!(!reporter
            .events()
            .iter()
            .any(|e| matches!(e, BuildEvent::RunningTests { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_project_compile_hook_runs_first() {
        let temp = tempfile::TempDir::new().unwrap();
        let erlc = write_stub(temp.path(), "erlc", "exit 0");
        let marker = temp.path().join("project-compiled");

        let mut config = Config::default();
        config.compiler.project_compile = Some(format!("touch {}", marker.display()));

        let reporter = CollectingReporter::new();
        let pipeline =
            Pipeline::new(temp.path(), &reporter).with_compiler(Compiler::with_erlc_path(erlc));

        let stats = pipeline.compile(&config).unwrap();
        assert_eq!(stats, CompileStats::default());
        assert!(marker.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_project_compile_aborts() {
        let temp = tempfile::TempDir::new().unwrap();
        let erlc = write_stub(temp.path(), "erlc", "exit 0");

        let mut config = Config::default();
        config.compiler.project_compile = Some("exit 7".to_string());

        let reporter = CollectingReporter::new();
        let pipeline =
            Pipeline::new(temp.path(), &reporter).with_compiler(Compiler::with_erlc_path(erlc));

        assert!(pipeline.compile(&config).is_err());
    }

    #[test]
    fn test_missing_compiler_fails_before_discovery() {
        let temp = tempfile::TempDir::new().unwrap();
        let reporter = CollectingReporter::new();
        let pipeline = Pipeline::new(temp.path(), &reporter)
            .with_compiler(Compiler::with_erlc_path(temp.path().join("missing-erlc")));

        let err = pipeline.compile(&Config::default()).unwrap_err();
        assert!(matches!(err, crate::error::BuildError::ToolNotFound { .. }));
    }
}
