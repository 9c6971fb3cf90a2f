//! Mermaid Kitten - Mermaid class diagrams from Swift declaration trees
//!
//! A library for turning SourceKitten declaration trees into a single,
//! deduplicated Mermaid `classDiagram` document.
//!
//! # Quick Start
//!
//! ```rust
//! use mermaid_kitten::{diagram_from_json, DiagramConfig};
//!
//! let structure = r#"{"key.substructure": [
//!     {"key.kind": "source.lang.swift.decl.enum", "key.name": "Animal"}
//! ]}"#;
//! let diagram = diagram_from_json(&[structure], DiagramConfig::new("Zoo")).unwrap();
//! assert!(diagram.contains("<<enum>> `Animal`"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use mermaid_kitten::prelude::*;
//!
//! let tree = Declaration::source_file([Declaration::new(DeclarationKind::Enum)
//!     .with_name("Shape")
//!     .with_inherited_type("Codable")]);
//!
//! // Walk the tree into statements
//! let walker = Walker::new(Emitter::default());
//! let statements = walker.walk(&tree);
//! assert_eq!(statements.len(), 3);
//!
//! // Accumulate and render
//! let diagram = ClassDiagram::new("Shapes");
//! diagram.extend(statements);
//! let text = diagram.render();
//! assert!(text.contains("`Shape` <|-- Codable"));
//! ```

pub mod core;
pub mod plugins;

pub use crate::core::*;

use std::path::Path;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        ClassDiagram, Declaration, DeclarationKind, DiagramConfig, EmitScope, Emitter,
        Relationship, Statement, StructureParser, Walker,
    };
    pub use crate::plugins::{
        GenerationReport, Generator, JsonStructureParser, SourceKittenParser,
    };
}

/// Generate the diagram for a directory of SourceKitten structure dumps
///
/// Every `*.json` file below `root` is decoded as SourceKitten structure
/// output. Files that fail to decode are skipped.
///
/// # Example
/// ```rust,no_run
/// use mermaid_kitten::{generate, DiagramConfig};
/// use std::path::Path;
///
/// let text = generate(Path::new("build/structure"), DiagramConfig::new("AnimalKit")).unwrap();
/// println!("{}", text);
/// ```
pub fn generate(root: &Path, config: DiagramConfig) -> anyhow::Result<String> {
    let generator = plugins::Generator::with_json_parser(config);
    Ok(generator.generate(root)?.render())
}

/// Render one diagram from in-memory SourceKitten structure documents
///
/// Unlike directory generation, a document that fails to decode is an error.
///
/// # Example
/// ```rust
/// use mermaid_kitten::{diagram_from_json, DiagramConfig};
///
/// let status = r#"{"key.substructure": [
///     {"key.kind": "source.lang.swift.decl.enum", "key.name": "Status"}
/// ]}"#;
/// let text = diagram_from_json(&[status, status], DiagramConfig::new("Api")).unwrap();
/// assert_eq!(text.matches("class `Status`").count(), 1);
/// ```
pub fn diagram_from_json(documents: &[&str], config: DiagramConfig) -> anyhow::Result<String> {
    config.validate()?;
    let trees = documents
        .iter()
        .map(|document| plugins::parse_structure(document))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let generator = plugins::Generator::with_json_parser(config);
    Ok(generator.generate_trees(&trees).render())
}
