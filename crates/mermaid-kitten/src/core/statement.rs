//! Diagram statements and the class-diagram relationship vocabulary
//!
//! A [`Statement`] is one line of Mermaid `classDiagram` text. Statements are
//! compared by exact text, never by meaning.

use std::fmt;

/// One line of class-diagram text
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Statement(String);

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// `class <name>`
    pub fn class(name: &str) -> Self {
        Self(format!("class {}", name))
    }

    /// `<<tag>> <name>`
    pub fn stereotype(tag: &str, name: &str) -> Self {
        Self(format!("<<{}>> {}", tag, name))
    }

    /// `note for <name> "<text>"`
    ///
    /// Line breaks become the `\n` escape so the note stays on one line.
    pub fn note(name: &str, text: &str) -> Self {
        let text = text.replace("\r\n", "\n").replace('\n', "\\n");
        Self(format!("note for {} \"{}\"", name, text))
    }

    /// `<name> : <member>`
    pub fn member(name: &str, member: &str) -> Self {
        Self(format!("{} : {}", name, member))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Statement {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Statement {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// Wrap a declared identifier in back-ticks
pub fn quoted(name: &str) -> String {
    format!("`{}`", name)
}

/// Relationship operators between two diagram entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    Inheritance,              // <|--
    InheritanceReversed,      // --|>
    InheritanceBidirectional, // <|--|>
    Composition,              // *--
    CompositionReversed,      // --*
    CompositionBidirectional, // *--*
    Aggregation,              // o--
    AggregationReversed,      // --o
    AggregationBidirectional, // o--o
    Association,              // -->
    AssociationReversed,      // <--
    AssociationBidirectional, // <-->
    Link,                     // --
    Dependency,               // <..
    DependencyReversed,       // ..>
    DependencyBidirectional,  // <..>
    Realization,              // <|..
    RealizationReversed,      // ..|>
    RealizationBidirectional, // <|..|>
    DashedLink,               // ..
}

impl Relationship {
    pub fn symbol(self) -> &'static str {
        match self {
            Relationship::Inheritance => "<|--",
            Relationship::InheritanceReversed => "--|>",
            Relationship::InheritanceBidirectional => "<|--|>",
            Relationship::Composition => "*--",
            Relationship::CompositionReversed => "--*",
            Relationship::CompositionBidirectional => "*--*",
            Relationship::Aggregation => "o--",
            Relationship::AggregationReversed => "--o",
            Relationship::AggregationBidirectional => "o--o",
            Relationship::Association => "-->",
            Relationship::AssociationReversed => "<--",
            Relationship::AssociationBidirectional => "<-->",
            Relationship::Link => "--",
            Relationship::Dependency => "<..",
            Relationship::DependencyReversed => "..>",
            Relationship::DependencyBidirectional => "<..>",
            Relationship::Realization => "<|..",
            Relationship::RealizationReversed => "..|>",
            Relationship::RealizationBidirectional => "<|..|>",
            Relationship::DashedLink => "..",
        }
    }

    /// Compose an edge statement: `<lhs> <symbol> <rhs>`
    ///
    /// Both sides are used as given; callers quote identifiers themselves.
    pub fn relate(self, lhs: &str, rhs: &str) -> Statement {
        Statement(format!("{} {} {}", lhs, self.symbol(), rhs))
    }

    pub fn all() -> [Relationship; 20] {
        use Relationship::*;
        [
            Inheritance,
            InheritanceReversed,
            InheritanceBidirectional,
            Composition,
            CompositionReversed,
            CompositionBidirectional,
            Aggregation,
            AggregationReversed,
            AggregationBidirectional,
            Association,
            AssociationReversed,
            AssociationBidirectional,
            Link,
            Dependency,
            DependencyReversed,
            DependencyBidirectional,
            Realization,
            RealizationReversed,
            RealizationBidirectional,
            DashedLink,
        ]
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
