//! SourceKitten command-line parser
//!
//! Runs `sourcekitten structure --file <path>` for every Swift file and
//! decodes the JSON it prints.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, trace};

use super::json::parse_structure;
use crate::core::{Declaration, KittenError, StructureParser};

/// Executable looked up on `PATH` when none is configured
pub const DEFAULT_EXECUTABLE: &str = "sourcekitten";

/// Parser for `*.swift` files backed by the `sourcekitten` binary
#[derive(Debug, Clone)]
pub struct SourceKittenParser {
    executable: PathBuf,
}

impl SourceKittenParser {
    pub fn new() -> Self {
        Self::with_executable(DEFAULT_EXECUTABLE)
    }

    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Default for SourceKittenParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureParser for SourceKittenParser {
    fn parse(&self, path: &Path) -> Result<Declaration> {
        trace!(path = %path.display(), executable = %self.executable.display(), "Running sourcekitten");

        let output = Command::new(&self.executable)
            .arg("structure")
            .arg("--file")
            .arg(path)
            .output()
            .map_err(|e| {
                KittenError::parse(
                    path,
                    format!("failed to run '{}': {}", self.executable.display(), e),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KittenError::parse(
                path,
                format!("sourcekitten exited with {}: {}", output.status, stderr.trim()),
            )
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(path = %path.display(), bytes = stdout.len(), "sourcekitten finished");
        parse_structure(&stdout)
            .map_err(|e| KittenError::parse(path, format!("{:#}", e)).into())
    }

    fn name(&self) -> &'static str {
        "sourcekitten"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["swift"]
    }
}
