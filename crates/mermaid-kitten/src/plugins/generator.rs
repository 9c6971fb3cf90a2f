//! Generation pipeline
//!
//! The generator wires the pieces together:
//! Discovery → StructureParser → Walker → ClassDiagram
//!
//! Each file is parsed and walked independently, so files run on the rayon
//! pool by default. A file that fails to parse is logged and left out; only
//! discovery errors stop a run.

use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, span, trace, warn, Level};

use super::json::JsonStructureParser;
use super::sourcekitten::SourceKittenParser;
use crate::core::{
    discover, ClassDiagram, Declaration, DiagramConfig, Emitter, Statement, StructureParser,
    Walker,
};

/// Summary of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files found by discovery
    pub files: usize,
    /// Files that parsed and were walked
    pub parsed: usize,
    /// Files that failed to parse, in discovery order
    pub failed: Vec<PathBuf>,
    /// Distinct statements in the diagram
    pub statements: usize,
}

impl GenerationReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Pipeline that turns a directory of sources into one class diagram
pub struct Generator {
    parser: Box<dyn StructureParser>,
    config: DiagramConfig,
}

impl Generator {
    pub fn new(parser: Box<dyn StructureParser>, config: DiagramConfig) -> Self {
        Self { parser, config }
    }

    /// Generator reading pre-dumped SourceKitten JSON files
    pub fn with_json_parser(config: DiagramConfig) -> Self {
        Self::new(Box::new(JsonStructureParser::new()), config)
    }

    /// Generator running `sourcekitten` over Swift files
    pub fn with_sourcekitten(config: DiagramConfig) -> Self {
        Self::new(Box::new(SourceKittenParser::new()), config)
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn parser_name(&self) -> &'static str {
        self.parser.name()
    }

    fn walker(&self) -> Walker {
        Walker::new(Emitter::new(self.config.scope))
    }

    /// Build the diagram for every recognized file below `root`
    pub fn generate(&self, root: &Path) -> Result<ClassDiagram> {
        self.generate_with_report(root).map(|(diagram, _)| diagram)
    }

    /// Like [`Generator::generate`], also reporting which files were skipped
    pub fn generate_with_report(&self, root: &Path) -> Result<(ClassDiagram, GenerationReport)> {
        let generate_span = span!(
            Level::INFO,
            "generate",
            root = %root.display(),
            parser = self.parser.name(),
            parallel = self.config.parallel
        );
        let _enter = generate_span.enter();

        self.config.validate()?;

        info!("Starting diagram generation");

        let files = discover(root, self.parser.extensions())?;
        if files.is_empty() {
            warn!(
                root = %root.display(),
                extensions = ?self.parser.extensions(),
                parser = self.parser.name(),
                "No source files found; use --parser sourcekitten for *.swift sources or --parser json for structure dumps"
            );
        }
        let diagram = ClassDiagram::from_config(&self.config);
        let walker = self.walker();

        let outcomes: Vec<bool> = if self.config.parallel {
            files
                .par_iter()
                .map(|path| self.process_file(path, &walker, &diagram))
                .collect()
        } else {
            files
                .iter()
                .map(|path| self.process_file(path, &walker, &diagram))
                .collect()
        };

        let failed: Vec<PathBuf> = files
            .iter()
            .zip(&outcomes)
            .filter(|(_, parsed)| !**parsed)
            .map(|(path, _)| path.clone())
            .collect();

        let report = GenerationReport {
            files: files.len(),
            parsed: files.len() - failed.len(),
            failed,
            statements: diagram.len(),
        };

        if report.has_failures() {
            warn!(
                failed = report.failed.len(),
                files = report.files,
                "Some files could not be parsed; the diagram is partial"
            );
        }
        info!(
            files = report.files,
            parsed = report.parsed,
            statements = report.statements,
            "Diagram generation completed"
        );

        Ok((diagram, report))
    }

    /// Parse, walk and accumulate one file; `false` when it failed to parse
    fn process_file(&self, path: &Path, walker: &Walker, diagram: &ClassDiagram) -> bool {
        let file_span = span!(Level::DEBUG, "process_file", path = %path.display());
        let _enter = file_span.enter();

        match self.parser.parse(path) {
            Ok(tree) => {
                let statements = walker.walk(&tree);
                let emitted = statements.len();
                let inserted = diagram.extend(statements);
                debug!(emitted, inserted, "File processed");
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %format!("{:#}", e), "Skipping file");
                false
            }
        }
    }

    /// Statements contributed by a single file, in traversal order
    pub fn inspect(&self, path: &Path) -> Result<Vec<Statement>> {
        let tree = self.parser.parse(path)?;
        Ok(self.walker().walk(&tree))
    }

    /// Build a diagram from trees that are already in memory
    pub fn generate_trees<'a>(
        &self,
        trees: impl IntoIterator<Item = &'a Declaration>,
    ) -> ClassDiagram {
        let diagram = ClassDiagram::from_config(&self.config);
        let walker = self.walker();
        for tree in trees {
            let inserted = diagram.extend(walker.walk(tree));
            trace!(inserted, "Tree accumulated");
        }
        diagram
    }
}
