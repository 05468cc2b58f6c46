//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_tests(config)?;
    validate_compiler(config)?;
    validate_runner(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_tests(config: &Config) -> Result<()> {
    if config.tests.dir.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "tests.dir".to_string(),
            message: "directory cannot be empty".to_string(),
        });
    }

    if !config.tests.suffix.ends_with(".erl") {
        return Err(ConfigError::InvalidValue {
            field: "tests.suffix".to_string(),
            message: "suffix must end with .erl".to_string(),
        });
    }

    Ok(())
}

fn validate_compiler(config: &Config) -> Result<()> {
    // Flags become single argv entries; embedded whitespace would change
    // what the compiler actually receives.
    for flag in &config.compiler.flags {
        if flag.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "compiler.flags".to_string(),
                message: format!("flag '{}' must not contain whitespace", flag),
            });
        }
    }

    if let Some(cmd) = &config.compiler.project_compile {
        if cmd.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "compiler.project_compile".to_string(),
                message: "command cannot be blank".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_runner(config: &Config) -> Result<()> {
    if config.runner.ebin_dir.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "runner.ebin_dir".to_string(),
            message: "directory cannot be empty".to_string(),
        });
    }

    Ok(())
}
