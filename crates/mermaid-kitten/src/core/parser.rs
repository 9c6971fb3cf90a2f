//! Structure parser abstraction
//!
//! Turning source text into a declaration tree is delegated to an external
//! tool. This trait is the seam: the generator only needs a file path in and
//! a [`Declaration`] tree out.

use anyhow::Result;
use std::path::Path;

use super::declaration::Declaration;

/// Trait for producing a declaration tree from one source file
pub trait StructureParser: Send + Sync {
    /// Parse the file at `path` into its declaration tree
    ///
    /// A failure here affects only this file; the generator skips it and
    /// keeps going.
    fn parse(&self, path: &Path) -> Result<Declaration>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// File extensions (without the dot) this parser accepts
    fn extensions(&self) -> &'static [&'static str];

    /// Check if the file at `path` can be handled by this parser
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}
