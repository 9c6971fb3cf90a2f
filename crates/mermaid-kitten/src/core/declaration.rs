//! Declaration tree produced by the source parser
//!
//! SourceKitten describes a Swift file as a recursive dictionary of `key.*`
//! entries. Only the handful of keys that matter for a class diagram are kept
//! here; offsets, lengths, USRs, attributes and the rest are skipped during
//! deserialization.

use serde::{Deserialize, Deserializer};
use std::fmt;

const KIND_PREFIX: &str = "source.lang.swift.decl.";

/// Extension declaration variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    Plain,
    Class,
    Enum,
    Protocol,
    Struct,
}

/// Function declaration variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    AccessorAddress,
    AccessorDidSet,
    AccessorGetter,
    AccessorModify,
    AccessorMutableAddress,
    AccessorRead,
    AccessorSetter,
    AccessorWillSet,
    Constructor,
    Destructor,
    Free,
    MethodClass,
    MethodInstance,
    MethodStatic,
    Operator,
    OperatorInfix,
    OperatorPostfix,
    OperatorPrefix,
    Subscript,
}

/// Variable declaration variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Class,
    Global,
    Instance,
    Local,
    Parameter,
    Static,
}

/// Kind tag of a declaration node
///
/// Covers the SourceKit `source.lang.swift.decl.*` vocabulary. Identifiers
/// outside the table become [`DeclarationKind::Unknown`] instead of failing,
/// so newer toolchains never break generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DeclarationKind {
    /// Synthetic root of a file; SourceKitten emits it without a `key.kind`
    #[default]
    SourceFile,
    AssociatedType,
    Class,
    Enum,
    EnumCase,
    EnumElement,
    Extension(ExtensionKind),
    Function(FunctionKind),
    GenericTypeParam,
    Module,
    OpaqueType,
    PrecedenceGroup,
    Protocol,
    Struct,
    TypeAlias,
    Variable(VariableKind),
    Unknown(String),
}

impl DeclarationKind {
    /// Map a SourceKit kind identifier onto a kind. Never fails.
    pub fn from_identifier(identifier: &str) -> Self {
        use DeclarationKind as K;

        let Some(short) = identifier.strip_prefix(KIND_PREFIX) else {
            return if identifier.is_empty() {
                K::SourceFile
            } else {
                K::Unknown(identifier.to_string())
            };
        };

        match short {
            "associatedtype" => K::AssociatedType,
            "class" => K::Class,
            "enum" => K::Enum,
            "enumcase" => K::EnumCase,
            "enumelement" => K::EnumElement,
            "extension" => K::Extension(ExtensionKind::Plain),
            "extension.class" => K::Extension(ExtensionKind::Class),
            "extension.enum" => K::Extension(ExtensionKind::Enum),
            "extension.protocol" => K::Extension(ExtensionKind::Protocol),
            "extension.struct" => K::Extension(ExtensionKind::Struct),
            "function.accessor.address" => K::Function(FunctionKind::AccessorAddress),
            "function.accessor.didset" => K::Function(FunctionKind::AccessorDidSet),
            "function.accessor.getter" => K::Function(FunctionKind::AccessorGetter),
            "function.accessor.modify" => K::Function(FunctionKind::AccessorModify),
            "function.accessor.mutableaddress" => {
                K::Function(FunctionKind::AccessorMutableAddress)
            }
            "function.accessor.read" => K::Function(FunctionKind::AccessorRead),
            "function.accessor.setter" => K::Function(FunctionKind::AccessorSetter),
            "function.accessor.willset" => K::Function(FunctionKind::AccessorWillSet),
            "function.constructor" => K::Function(FunctionKind::Constructor),
            "function.destructor" => K::Function(FunctionKind::Destructor),
            "function.free" => K::Function(FunctionKind::Free),
            "function.method.class" => K::Function(FunctionKind::MethodClass),
            "function.method.instance" => K::Function(FunctionKind::MethodInstance),
            "function.method.static" => K::Function(FunctionKind::MethodStatic),
            "function.operator" => K::Function(FunctionKind::Operator),
            "function.operator.infix" => K::Function(FunctionKind::OperatorInfix),
            "function.operator.postfix" => K::Function(FunctionKind::OperatorPostfix),
            "function.operator.prefix" => K::Function(FunctionKind::OperatorPrefix),
            "function.subscript" => K::Function(FunctionKind::Subscript),
            "generic_type_param" => K::GenericTypeParam,
            "module" => K::Module,
            "opaquetype" => K::OpaqueType,
            "precedencegroup" => K::PrecedenceGroup,
            "protocol" => K::Protocol,
            "struct" => K::Struct,
            "typealias" => K::TypeAlias,
            "var.class" => K::Variable(VariableKind::Class),
            "var.global" => K::Variable(VariableKind::Global),
            "var.instance" => K::Variable(VariableKind::Instance),
            "var.local" => K::Variable(VariableKind::Local),
            "var.parameter" => K::Variable(VariableKind::Parameter),
            "var.static" => K::Variable(VariableKind::Static),
            _ => K::Unknown(identifier.to_string()),
        }
    }

    /// Short form of the kind identifier, without the `source.lang.swift.decl.` prefix
    ///
    /// The synthetic [`DeclarationKind::SourceFile`] root has an empty label.
    pub fn label(&self) -> &str {
        use DeclarationKind as K;

        match self {
            K::SourceFile => "",
            K::AssociatedType => "associatedtype",
            K::Class => "class",
            K::Enum => "enum",
            K::EnumCase => "enumcase",
            K::EnumElement => "enumelement",
            K::Extension(kind) => match kind {
                ExtensionKind::Plain => "extension",
                ExtensionKind::Class => "extension.class",
                ExtensionKind::Enum => "extension.enum",
                ExtensionKind::Protocol => "extension.protocol",
                ExtensionKind::Struct => "extension.struct",
            },
            K::Function(kind) => match kind {
                FunctionKind::AccessorAddress => "function.accessor.address",
                FunctionKind::AccessorDidSet => "function.accessor.didset",
                FunctionKind::AccessorGetter => "function.accessor.getter",
                FunctionKind::AccessorModify => "function.accessor.modify",
                FunctionKind::AccessorMutableAddress => "function.accessor.mutableaddress",
                FunctionKind::AccessorRead => "function.accessor.read",
                FunctionKind::AccessorSetter => "function.accessor.setter",
                FunctionKind::AccessorWillSet => "function.accessor.willset",
                FunctionKind::Constructor => "function.constructor",
                FunctionKind::Destructor => "function.destructor",
                FunctionKind::Free => "function.free",
                FunctionKind::MethodClass => "function.method.class",
                FunctionKind::MethodInstance => "function.method.instance",
                FunctionKind::MethodStatic => "function.method.static",
                FunctionKind::Operator => "function.operator",
                FunctionKind::OperatorInfix => "function.operator.infix",
                FunctionKind::OperatorPostfix => "function.operator.postfix",
                FunctionKind::OperatorPrefix => "function.operator.prefix",
                FunctionKind::Subscript => "function.subscript",
            },
            K::GenericTypeParam => "generic_type_param",
            K::Module => "module",
            K::OpaqueType => "opaquetype",
            K::PrecedenceGroup => "precedencegroup",
            K::Protocol => "protocol",
            K::Struct => "struct",
            K::TypeAlias => "typealias",
            K::Variable(kind) => match kind {
                VariableKind::Class => "var.class",
                VariableKind::Global => "var.global",
                VariableKind::Instance => "var.instance",
                VariableKind::Local => "var.local",
                VariableKind::Parameter => "var.parameter",
                VariableKind::Static => "var.static",
            },
            K::Unknown(identifier) => identifier.as_str(),
        }
    }

    /// Full SourceKit identifier for this kind
    pub fn identifier(&self) -> String {
        match self {
            DeclarationKind::SourceFile => String::new(),
            DeclarationKind::Unknown(identifier) => identifier.clone(),
            known => format!("{}{}", KIND_PREFIX, known.label()),
        }
    }

    /// Whether nodes of this kind introduce a named type that children belong to
    pub fn declares_type(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Class
                | DeclarationKind::Enum
                | DeclarationKind::Protocol
                | DeclarationKind::Struct
        )
    }

    /// Every kind in the SourceKit table, in identifier order
    pub fn known() -> Vec<DeclarationKind> {
        use DeclarationKind as K;
        use ExtensionKind as E;
        use FunctionKind as F;
        use VariableKind as V;

        let mut kinds = vec![K::AssociatedType, K::Class, K::Enum, K::EnumCase, K::EnumElement];
        kinds.extend(
            [E::Plain, E::Class, E::Enum, E::Protocol, E::Struct]
                .into_iter()
                .map(K::Extension),
        );
        kinds.extend(
            [
                F::AccessorAddress,
                F::AccessorDidSet,
                F::AccessorGetter,
                F::AccessorModify,
                F::AccessorMutableAddress,
                F::AccessorRead,
                F::AccessorSetter,
                F::AccessorWillSet,
                F::Constructor,
                F::Destructor,
                F::Free,
                F::MethodClass,
                F::MethodInstance,
                F::MethodStatic,
                F::Operator,
                F::OperatorInfix,
                F::OperatorPostfix,
                F::OperatorPrefix,
                F::Subscript,
            ]
            .into_iter()
            .map(K::Function),
        );
        kinds.extend([
            K::GenericTypeParam,
            K::Module,
            K::OpaqueType,
            K::PrecedenceGroup,
            K::Protocol,
            K::Struct,
            K::TypeAlias,
        ]);
        kinds.extend(
            [V::Class, V::Global, V::Instance, V::Local, V::Parameter, V::Static]
                .into_iter()
                .map(K::Variable),
        );
        kinds
    }
}

impl From<String> for DeclarationKind {
    fn from(identifier: String) -> Self {
        DeclarationKind::from_identifier(&identifier)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::SourceFile => write!(f, "file"),
            other => write!(f, "{}", other.label()),
        }
    }
}

impl<'de> Deserialize<'de> for DeclarationKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(DeclarationKind::from)
    }
}

/// One node of a declaration tree
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Declaration {
    #[serde(rename = "key.kind", default)]
    pub kind: DeclarationKind,

    #[serde(rename = "key.name", default)]
    pub name: Option<String>,

    /// Lexical substructure, in source order
    #[serde(rename = "key.substructure", default)]
    pub children: Vec<Declaration>,

    #[serde(
        rename = "key.inheritedtypes",
        default,
        deserialize_with = "inherited_type_names"
    )]
    pub inherited_types: Vec<String>,

    #[serde(rename = "key.doc.comment", default)]
    pub documentation: Option<String>,
}

#[derive(Deserialize)]
struct InheritedType {
    #[serde(rename = "key.name", default)]
    name: Option<String>,
}

fn inherited_type_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<InheritedType>::deserialize(deserializer)?;
    Ok(entries.into_iter().filter_map(|entry| entry.name).collect())
}

impl Declaration {
    pub fn new(kind: DeclarationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Root node of a file holding the given top-level declarations
    pub fn source_file(children: impl IntoIterator<Item = Declaration>) -> Self {
        Self {
            children: children.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_child(mut self, child: Declaration) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_inherited_type(mut self, name: impl Into<String>) -> Self {
        self.inherited_types.push(name.into());
        self
    }

    pub fn with_documentation(mut self, comment: impl Into<String>) -> Self {
        self.documentation = Some(comment.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}
