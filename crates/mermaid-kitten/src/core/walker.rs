//! Depth-first traversal of a declaration tree
//!
//! Statements come out in pre-order: a node's own statements precede those of
//! its descendants, and siblings are visited in source order. The traversal
//! uses an explicit stack so deeply nested sources cannot overflow the call
//! stack.

use tracing::{debug, span, Level};

use super::declaration::Declaration;
use super::emitter::Emitter;
use super::statement::Statement;

/// Walk `root` and collect every statement it contributes
///
/// `enclosing` names the type surrounding `root`; pass `None` for a file root.
pub fn walk(emitter: &Emitter, root: &Declaration, enclosing: Option<&str>) -> Vec<Statement> {
    let mut statements = Vec::new();
    let mut stack: Vec<(&Declaration, Option<&str>)> = vec![(root, enclosing)];

    while let Some((node, enclosing)) = stack.pop() {
        statements.extend(emitter.emit(node, enclosing));

        let scope = match node.name() {
            Some(name) if node.kind.declares_type() => Some(name),
            _ => enclosing,
        };
        stack.extend(node.children.iter().rev().map(|child| (child, scope)));
    }

    statements
}

/// Emitter bound to a traversal
#[derive(Debug, Clone, Copy, Default)]
pub struct Walker {
    emitter: Emitter,
}

impl Walker {
    pub fn new(emitter: Emitter) -> Self {
        Self { emitter }
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Statements for one top-level tree, such as a parsed source file
    pub fn walk(&self, root: &Declaration) -> Vec<Statement> {
        let walk_span = span!(Level::DEBUG, "walk_tree", nodes = root.node_count());
        let _enter = walk_span.enter();

        let statements = walk(&self.emitter, root, None);
        debug!(statement_count = statements.len(), "Tree walked");
        statements
    }
}
