//! Beamline Tasks - Build steps for eunit test suites
//!
//! This crate implements the three build steps of the orchestrator: compile
//! stale test modules, prepare the test flag set, and hand off to the eunit
//! runner. The steps form an explicit call chain evaluated once per run.

pub mod compile;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod reporter;
pub mod runner;
pub mod sources;

pub use compile::{CompileStats, Compiler};
pub use error::{BuildError, Result};
pub use pipeline::{Pipeline, RunSummary};
pub use reporter::{BuildEvent, BuildReporter, CollectingReporter, ConsoleReporter};
pub use runner::{resolve_runner, runner_args, SuiteFilter, TestRun};
pub use sources::{SourcePair, TestSources};
