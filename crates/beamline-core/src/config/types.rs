//! Configuration types
//!
//! The configuration is an immutable value threaded through each build step.
//! Steps that need a modified flag set derive a new configuration (see
//! [`Config::with_debug_info`]) instead of mutating shared state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{
    DEBUG_INFO_FLAG, DEFAULT_EBIN_DIR, DEFAULT_TEST_DIR, DEFAULT_TEST_SUFFIX,
};

/// Main configuration for Beamline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name
    pub name: Option<String>,

    /// Test source discovery configuration
    pub tests: TestsConfig,

    /// Compiler invocation configuration
    pub compiler: CompilerConfig,

    /// Test runner configuration
    pub runner: RunnerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: None,
            tests: TestsConfig::default(),
            compiler: CompilerConfig::default(),
            runner: RunnerConfig::default(),
        }
    }
}

impl Config {
    /// Derive a configuration with the debug-info flag appended to the
    /// compiler flag list.
    ///
    /// Each call appends exactly one flag; callers are expected to apply the
    /// transform once per pipeline run.
    pub fn with_debug_info(mut self) -> Self {
        self.compiler.flags.push(DEBUG_INFO_FLAG.to_string());
        self
    }
}

/// Test source discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TestsConfig {
    /// Directory containing test sources
    pub dir: PathBuf,

    /// File-name suffix identifying a test module (e.g., "_tests.erl")
    pub suffix: String,
}

impl Default for TestsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_TEST_DIR),
            suffix: DEFAULT_TEST_SUFFIX.to_string(),
        }
    }
}

/// Compiler invocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Flags passed to every erlc invocation (e.g., "+warn_unused_vars")
    pub flags: Vec<String>,

    /// Include directories, passed as `-I <dir>`
    pub include_dirs: Vec<PathBuf>,

    /// Code path directories, passed as `-pa <dir>`
    pub code_paths: Vec<PathBuf>,

    /// Command to compile the project itself before test compilation
    pub project_compile: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            flags: Vec::new(),
            include_dirs: vec![PathBuf::from("include")],
            code_paths: vec![PathBuf::from(DEFAULT_EBIN_DIR)],
            project_compile: None,
        }
    }
}

/// Test runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Path to the eunit runner executable.
    ///
    /// When absent, the runner is resolved next to the orchestrator's own
    /// binary under the default runner name.
    pub path: Option<PathBuf>,

    /// Directory of compiled modules handed to the runner via `-b`
    pub ebin_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            path: None,
            ebin_dir: PathBuf::from(DEFAULT_EBIN_DIR),
        }
    }
}
