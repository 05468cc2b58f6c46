//! Beamline Core - Configuration and error types
//!
//! This crate provides the configuration model and error handling shared by
//! the Beamline eunit build orchestrator.

pub mod config;
pub mod error;

pub use config::{
    config_file_names, find_config, load_config, load_config_from_dir, load_config_or_default,
    CompilerConfig, Config, RunnerConfig, TestsConfig,
};
pub use error::{ConfigError, Result};
