//! Generation settings

use std::path::Path;

use super::emitter::EmitScope;
use super::error::KittenError;

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramConfig {
    /// Title written into the diagram front matter
    pub title: String,
    /// Which type declarations produce statements
    pub scope: EmitScope,
    /// Parse and walk files on the rayon thread pool
    pub parallel: bool,
}

impl DiagramConfig {
    pub const DEFAULT_TITLE: &'static str = "Diagram";

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Title taken from the last component of the source directory
    ///
    /// Falls back to [`DiagramConfig::DEFAULT_TITLE`] for paths like `/` or `..`.
    pub fn for_directory(root: &Path) -> Self {
        let title = root
            .canonicalize()
            .ok()
            .as_deref()
            .unwrap_or(root)
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(Self::DEFAULT_TITLE)
            .to_string();
        Self::new(title)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_scope(mut self, scope: EmitScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The title must fit on the single front-matter line
    pub fn validate(&self) -> Result<(), KittenError> {
        if self.title.trim().is_empty() {
            return Err(KittenError::invalid_config("title must not be empty"));
        }
        if self.title.contains('\n') || self.title.contains('\r') {
            return Err(KittenError::invalid_config(
                "title must be a single line",
            ));
        }
        Ok(())
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            scope: EmitScope::default(),
            parallel: true,
        }
    }
}
