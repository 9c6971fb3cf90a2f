//! Pre-dumped SourceKitten structure files
//!
//! Reads the JSON printed by `sourcekitten structure --file Foo.swift`, so a
//! diagram can be built without SourceKit on the machine.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::trace;

use crate::core::{Declaration, KittenError, StructureParser};

/// Decode one SourceKitten structure document
pub fn parse_structure(input: &str) -> Result<Declaration> {
    serde_json::from_str(input).context("invalid SourceKitten structure JSON")
}

/// Parser for `*.json` structure dumps
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStructureParser;

impl JsonStructureParser {
    pub fn new() -> Self {
        Self
    }
}

impl StructureParser for JsonStructureParser {
    fn parse(&self, path: &Path) -> Result<Declaration> {
        trace!(path = %path.display(), "Reading structure dump");
        let content = fs::read_to_string(path)
            .map_err(|e| KittenError::parse(path, e.to_string()))?;
        parse_structure(&content)
            .map_err(|e| KittenError::parse(path, format!("{:#}", e)).into())
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeclarationKind;
    use tempfile::tempdir;

    #[test]
    fn test_parse_structure() {
        let root = parse_structure(
            r#"{"key.substructure": [{"key.kind": "source.lang.swift.decl.enum", "key.name": "Animal"}]}"#,
        )
        .unwrap();
        assert_eq!(root.children[0].kind, DeclarationKind::Enum);
    }

    #[test]
    fn test_parse_structure_rejects_garbage() {
        assert!(parse_structure("not json").is_err());
        assert!(parse_structure(r#"{"key.substructure": 5}"#).is_err());
    }

    #[test]
    fn test_parse_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Animal.json");
        fs::write(
            &path,
            r#"{"key.substructure": [{"key.kind": "source.lang.swift.decl.struct", "key.name": "Cat"}]}"#,
        )
        .unwrap();

        let root = JsonStructureParser::new().parse(&path).unwrap();
        assert_eq!(root.children[0].name(), Some("Cat"));
    }

    #[test]
    fn test_parse_failure_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Broken.json");
        fs::write(&path, "{").unwrap();

        let err = JsonStructureParser::new().parse(&path).unwrap_err();
        let kitten = err.downcast_ref::<KittenError>().unwrap();
        assert!(matches!(kitten, KittenError::Parse { .. }));
        assert!(err.to_string().contains("Broken.json"));
    }

    #[test]
    fn test_accepts_json_extension() {
        let parser = JsonStructureParser::new();
        assert!(parser.can_parse(Path::new("dump/Animal.json")));
        assert!(!parser.can_parse(Path::new("Animal.swift")));
    }
}
