//! Diagram accumulator
//!
//! Collects statements from any number of declaration trees, keeps the first
//! occurrence of each distinct text, and renders the final Mermaid document.
//! The collection sits behind a mutex so one diagram can be shared by parallel
//! workers; the duplicate check and the insert happen under the same lock.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use super::config::DiagramConfig;
use super::statement::Statement;

#[derive(Debug, Default)]
struct Statements {
    seen: HashSet<Statement>,
    ordered: Vec<Statement>,
}

/// Ordered, deduplicated set of statements for one generation run
#[derive(Debug)]
pub struct ClassDiagram {
    title: String,
    statements: Mutex<Statements>,
}

impl ClassDiagram {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            statements: Mutex::new(Statements::default()),
        }
    }

    pub fn from_config(config: &DiagramConfig) -> Self {
        Self::new(config.title.clone())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    // Every mutation is a single insert into both collections, so the data
    // behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, Statements> {
        self.statements
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append `statement` unless identical text is already present
    ///
    /// Returns `true` when the statement was inserted.
    pub fn add(&self, statement: Statement) -> bool {
        let mut statements = self.lock();
        if !statements.seen.insert(statement.clone()) {
            return false;
        }
        statements.ordered.push(statement);
        true
    }

    /// Add every statement in order, returning how many were new
    ///
    /// The lock is taken once, so one tree's statements stay contiguous.
    pub fn extend(&self, statements: impl IntoIterator<Item = Statement>) -> usize {
        let mut guard = self.lock();
        let mut inserted = 0;
        for statement in statements {
            if guard.seen.insert(statement.clone()) {
                guard.ordered.push(statement);
                inserted += 1;
            }
        }
        inserted
    }

    pub fn len(&self) -> usize {
        self.lock().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().ordered.is_empty()
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        self.lock().seen.contains(statement)
    }

    /// Snapshot of the statements in first-seen order
    pub fn statements(&self) -> Vec<Statement> {
        self.lock().ordered.clone()
    }

    /// Render the full Mermaid document
    pub fn render(&self) -> String {
        let statements = self.lock();
        render_diagram(&self.title, &statements.ordered)
    }
}

impl Default for ClassDiagram {
    fn default() -> Self {
        Self::from_config(&DiagramConfig::default())
    }
}

/// Front matter with the title, then `classDiagram` and one indented statement per line
pub fn render_diagram(title: &str, statements: &[Statement]) -> String {
    let body = statements
        .iter()
        .map(Statement::as_str)
        .collect::<Vec<_>>()
        .join("\n\t");
    format!("---\ntitle: {}\n---\nclassDiagram\n\t{}", title, body)
}
