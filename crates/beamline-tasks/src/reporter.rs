//! Build step reporting

use std::path::PathBuf;
use std::sync::Mutex;

/// Events emitted during a build run
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// The project compile hook is starting
    ProjectCompile { command: String },
    /// A stale test module is being compiled
    Compiling { source: PathBuf },
    /// A compiled output is newer than its source
    UpToDate { output: PathBuf },
    /// Debug info has been enabled for test builds
    DebugEnabled,
    /// The test runner is starting
    RunningTests { dir: PathBuf, cover: bool },
    /// The composed runner command line (verbose only)
    RunnerCommand { command: String },
}

/// Trait for reporting build progress
pub trait BuildReporter {
    /// Handle a build event
    fn report(&self, event: &BuildEvent);
}

/// Reporter that prints progress lines to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    /// Echo composed command lines before execution
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl BuildReporter for ConsoleReporter {
    fn report(&self, event: &BuildEvent) {
        match event {
            BuildEvent::ProjectCompile { command } => {
                if self.verbose {
                    println!("compiling project: {}", command);
                }
            }
            BuildEvent::Compiling { source } => {
                println!("compiling {}...", source.display());
            }
            BuildEvent::UpToDate { output } => {
                tracing::debug!(output = %output.display(), "up to date");
            }
            BuildEvent::DebugEnabled => {
                println!("Debugging is enabled for test builds.");
            }
            BuildEvent::RunningTests { dir, cover } => {
                let cover_note = if *cover { " with coverage" } else { "" };
                println!("running tests in {}{}...", dir.display(), cover_note);
            }
            BuildEvent::RunnerCommand { command } => {
                if self.verbose {
                    println!("{}", command);
                }
            }
        }
    }
}

/// Reporter that collects events for later inspection (useful for testing)
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<BuildEvent>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<BuildEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl BuildReporter for CollectingReporter {
    fn report(&self, event: &BuildEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
