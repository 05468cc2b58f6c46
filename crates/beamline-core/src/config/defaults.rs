//! Default configuration values

use super::types::Config;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "beamline.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".beamline.toml";

/// Directory searched for test sources
pub const DEFAULT_TEST_DIR: &str = "test";

/// Suffix identifying an eunit test module
pub const DEFAULT_TEST_SUFFIX: &str = "_tests.erl";

/// Directory the runner loads compiled modules from
pub const DEFAULT_EBIN_DIR: &str = "ebin";

/// Compiler flag that embeds debugging metadata in compiled modules
pub const DEBUG_INFO_FLAG: &str = "+debug_info";

/// The Erlang compiler executable
pub const ERLC_EXECUTABLE: &str = "erlc";

/// Default name of the eunit runner executable, resolved next to our own binary
pub const DEFAULT_RUNNER_NAME: &str = "eunit-runner";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![DEFAULT_CONFIG_FILE, ALT_CONFIG_FILE]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Beamline Configuration
# See https://github.com/example/beamline for documentation

[tests]
dir = "test"
suffix = "_tests.erl"

[compiler]
flags = []
include_dirs = ["include"]
code_paths = ["ebin"]

[runner]
ebin_dir = "ebin"
"#;
