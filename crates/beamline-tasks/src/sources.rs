//! Test source discovery
//!
//! Sources are matched by file-name suffix within the configured test
//! directory; each source maps 1:1 to a compiled output with the `.beam`
//! extension in the same directory.

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::debug;

use beamline_core::config::TestsConfig;

use crate::error::Result;

/// Extension of compiled Erlang modules
const BEAM_EXTENSION: &str = "beam";

/// A test source file and its compiled output path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePair {
    /// The .erl source file
    pub source: PathBuf,
    /// The .beam output derived by extension substitution
    pub output: PathBuf,
}

impl SourcePair {
    /// Pair a source with its output path
    pub fn new(source: PathBuf) -> Self {
        let output = source.with_extension(BEAM_EXTENSION);
        Self { source, output }
    }
}

/// The ordered set of discovered test sources
#[derive(Debug, Clone, Default)]
pub struct TestSources {
    pairs: Vec<SourcePair>,
}

impl TestSources {
    /// Discover test sources under `root` per the tests configuration.
    ///
    /// Results are sorted by path; outputs mirror source ordering.
    pub fn discover(root: &Path, tests: &TestsConfig) -> Result<Self> {
        let pattern = root
            .join(&tests.dir)
            .join(format!("*{}", tests.suffix))
            .to_string_lossy()
            .into_owned();
        debug!(pattern = %pattern, "discovering test sources");

        let mut files: Vec<PathBuf> = glob(&pattern)?
            .flatten()
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        debug!(count = files.len(), "test sources discovered");
        Ok(Self {
            pairs: files.into_iter().map(SourcePair::new).collect(),
        })
    }

    /// The source/output pairs, in source order
    pub fn pairs(&self) -> &[SourcePair] {
        &self.pairs
    }

    /// Number of discovered sources
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over source paths
    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.pairs.iter().map(|p| p.source.as_path())
    }

    /// Iterate over output paths
    pub fn outputs(&self) -> impl Iterator<Item = &Path> {
        self.pairs.iter().map(|p| p.output.as_path())
    }
}
