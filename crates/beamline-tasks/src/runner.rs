//! Eunit runner invocation
//!
//! The runner is an external executable. Its argument vector is composed
//! explicitly: `-b <ebin dir>`, an optional `-cover`, one `-s <name>` pair
//! per suite-filter entry, and the target directory last.

use std::path::{Path, PathBuf};

use tracing::info;

use beamline_core::config::{Config, RunnerConfig, DEFAULT_RUNNER_NAME};

use crate::error::Result;
use crate::process::{render_command, run_command};
use crate::reporter::{BuildEvent, BuildReporter};

/// A user-supplied, whitespace-separated list of suite names restricting
/// which suites the runner executes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteFilter {
    names: Vec<String>,
}

impl SuiteFilter {
    /// Parse a filter string; tokens are trimmed and empties dropped
    pub fn parse(raw: &str) -> Self {
        Self {
            names: raw.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// No suites selected; the runner executes all of them
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The selected suite names, in input order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Runner arguments: one `-s <name>` pair per suite
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.names.len() * 2);
        for name in &self.names {
            args.push("-s".to_string());
            args.push(name.clone());
        }
        args
    }
}

/// One test-runner execution request
#[derive(Debug, Clone)]
pub struct TestRun {
    /// Directory handed to the runner as its target
    pub dir: PathBuf,
    /// Collect code coverage
    pub cover: bool,
    /// Restrict execution to these suites
    pub suites: SuiteFilter,
}

impl TestRun {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cover: false,
            suites: SuiteFilter::default(),
        }
    }

    pub fn with_cover(mut self, cover: bool) -> Self {
        self.cover = cover;
        self
    }

    pub fn with_suites(mut self, suites: SuiteFilter) -> Self {
        self.suites = suites;
        self
    }
}

/// Resolve the runner executable path.
///
/// Falls back to the default runner name next to our own binary when the
/// configuration does not name one.
pub fn resolve_runner(runner: &RunnerConfig) -> Result<PathBuf> {
    if let Some(path) = &runner.path {
        return Ok(path.clone());
    }

    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(|dir| dir.join(DEFAULT_RUNNER_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RUNNER_NAME)))
}

/// Compose the runner argument vector
pub fn runner_args(runner: &RunnerConfig, run: &TestRun) -> Vec<String> {
    let mut args = vec![
        "-b".to_string(),
        runner.ebin_dir.to_string_lossy().into_owned(),
    ];
    if run.cover {
        args.push("-cover".to_string());
    }
    args.extend(run.suites.to_args());
    args.push(run.dir.to_string_lossy().into_owned());
    args
}

/// Execute the runner, propagating its exit status
pub fn run_tests(
    config: &Config,
    root: &Path,
    run: &TestRun,
    reporter: &dyn BuildReporter,
) -> Result<()> {
    let runner_path = resolve_runner(&config.runner)?;
    let program = runner_path.to_string_lossy().into_owned();
    let args = runner_args(&config.runner, run);

    reporter.report(&BuildEvent::RunningTests {
        dir: run.dir.clone(),
        cover: run.cover,
    });
    reporter.report(&BuildEvent::RunnerCommand {
        command: render_command(&program, &args),
    });

    info!(runner = %runner_path.display(), dir = %run.dir.display(), "running eunit");
    run_command(&program, &args, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use crate::reporter::CollectingReporter;

    #[test]
    fn test_filter_tokenizes_and_trims() {
        let filter = SuiteFilter::parse("a b  c");
        assert_eq!(filter.names().to_vec(), vec!["a", "b", "c"]);
        assert_eq!(filter.to_args(), vec!["-s", "a", "-s", "b", "-s", "c"]);
    }

    #[test]
    fn test_filter_handles_surrounding_whitespace() {
        let filter = SuiteFilter::parse("  login\tlogout ");
        assert_eq!(filter.names().to_vec(), vec!["login", "logout"]);
    }

    #[test]
    fn test_empty_filter_produces_no_args() {
        assert!(SuiteFilter::parse("").to_args().is_empty());
        assert!(SuiteFilter::parse("   ").to_args().is_empty());
        assert!(SuiteFilter::default().is_empty());
    }

    #[test]
    fn test_runner_args_with_cover_and_suites() {
        let run = TestRun::new("test")
            .with_cover(true)
            .with_suites(SuiteFilter::parse("login logout"));
        let args = runner_args(&RunnerConfig::default(), &run);

        assert_eq!(
            args,
            vec!["-b", "ebin", "-cover", "-s", "login", "-s", "logout", "test"]
        );
        assert_eq!(args.iter().filter(|a| a.as_str() == "-cover").count(), 1);
    }

    #[test]
    fn test_runner_args_without_cover() {
        let run = TestRun::new("test");
        let args = runner_args(&RunnerConfig::default(), &run);
        assert_eq!(args, vec!["-b", "ebin", "test"]);
        assert!(!args.contains(&"-cover".to_string()));
    }

    #[test]
    fn test_resolve_runner_prefers_config() {
        let mut runner = RunnerConfig::default();
        runner.path = Some(PathBuf::from("/opt/eunit/bin/runner"));
        let resolved = resolve_runner(&runner).unwrap();
        assert_eq!(resolved, PathBuf::from("/opt/eunit/bin/runner"));
    }

    #[test]
    fn test_resolve_runner_default_sits_next_to_binary() {
        let resolved = resolve_runner(&RunnerConfig::default()).unwrap();
        assert_eq!(
            resolved.file_name().unwrap().to_string_lossy(),
            DEFAULT_RUNNER_NAME
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_run_tests_propagates_exit_status() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let stub = temp.path().join("eunit-runner");
        std::fs::write(&stub, "#!/bin/sh\nexit 11\n").unwrap();
        std::fs::set_permissions(&stub, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut config = Config::default();
        config.runner.path = Some(stub);

        let reporter = CollectingReporter::new();
        let err = run_tests(&config, temp.path(), &TestRun::new("test"), &reporter).unwrap_err();
        match err {
            BuildError::CommandFailed { exit_code, .. } => assert_eq!(exit_code, Some(11)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_tests_missing_runner_is_spawn_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.runner.path = Some(temp.path().join("no-such-runner"));

        let reporter = CollectingReporter::new();
        let err = run_tests(&config, temp.path(), &TestRun::new("test"), &reporter).unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }
}
