//! Statement emitter
//!
//! Maps one declaration node, plus the name of the type enclosing it, to the
//! class-diagram statements it contributes. The mapping is total: every kind
//! has an explicit arm, and kinds without a diagram form yield no statements.

use tracing::trace;

use super::declaration::{Declaration, DeclarationKind};
use super::statement::{quoted, Relationship, Statement};

/// Which type declarations produce diagram statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EmitScope {
    /// Enums, classes, structs and protocols
    #[default]
    AllTypes,
    /// Enums and their cases only
    EnumsOnly,
}

/// Per-node statement emitter
#[derive(Debug, Clone, Copy, Default)]
pub struct Emitter {
    scope: EmitScope,
}

impl Emitter {
    pub fn new(scope: EmitScope) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> EmitScope {
        self.scope
    }

    /// Statements contributed by `node` itself, not its descendants
    pub fn emit(&self, node: &Declaration, enclosing: Option<&str>) -> Vec<Statement> {
        use DeclarationKind as K;

        match &node.kind {
            K::Enum => type_declaration(node, Some("enum")),
            K::EnumCase => enum_case(node, enclosing),
            K::Class => self.unless_enums_only(|| type_declaration(node, None)),
            K::Struct => self.unless_enums_only(|| type_declaration(node, Some("struct"))),
            K::Protocol => self.unless_enums_only(|| type_declaration(node, Some("protocol"))),
            K::SourceFile
            | K::AssociatedType
            | K::EnumElement
            | K::Extension(_)
            | K::Function(_)
            | K::GenericTypeParam
            | K::Module
            | K::OpaqueType
            | K::PrecedenceGroup
            | K::TypeAlias
            | K::Variable(_) => Vec::new(),
            K::Unknown(identifier) => {
                trace!(kind = %identifier, "Skipping unknown declaration kind");
                Vec::new()
            }
        }
    }

    fn unless_enums_only(&self, emit: impl FnOnce() -> Vec<Statement>) -> Vec<Statement> {
        match self.scope {
            EmitScope::AllTypes => emit(),
            EmitScope::EnumsOnly => Vec::new(),
        }
    }
}

/// Declaration, optional stereotype, one inheritance edge per inherited type,
/// and a note when the node is documented
fn type_declaration(node: &Declaration, stereotype: Option<&str>) -> Vec<Statement> {
    let Some(raw_name) = node.name() else {
        return Vec::new();
    };
    let name = quoted(raw_name);

    let mut statements = Vec::with_capacity(2 + node.inherited_types.len());
    statements.push(Statement::class(&name));
    if let Some(tag) = stereotype {
        statements.push(Statement::stereotype(tag, &name));
    }
    statements.extend(
        node.inherited_types
            .iter()
            .map(|inherited| Relationship::Inheritance.relate(&name, inherited)),
    );
    if let Some(docs) = &node.documentation {
        statements.push(Statement::note(&name, docs));
    }
    statements
}

/// One member line per element of the case, prefixed by the enclosing enum
fn enum_case(node: &Declaration, enclosing: Option<&str>) -> Vec<Statement> {
    let Some(enclosing) = enclosing else {
        return Vec::new();
    };
    let name = quoted(enclosing);

    node.children
        .iter()
        .filter_map(Declaration::name)
        .map(|element| Statement::member(&name, element))
        .collect()
}
