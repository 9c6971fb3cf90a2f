//! Property tests for traversal order, deduplication and rendering

use mermaid_kitten::prelude::*;
use mermaid_kitten::walk;
use proptest::prelude::*;
use std::collections::HashSet;

// ===================
// Strategies
// ===================

fn kind_strategy() -> impl Strategy<Value = DeclarationKind> {
    prop_oneof![
        Just(DeclarationKind::Enum),
        Just(DeclarationKind::EnumCase),
        Just(DeclarationKind::EnumElement),
        Just(DeclarationKind::Struct),
        Just(DeclarationKind::Class),
        Just(DeclarationKind::Protocol),
        Just(DeclarationKind::TypeAlias),
        Just(DeclarationKind::from_identifier("source.lang.swift.decl.function.free")),
        Just(DeclarationKind::from_identifier("source.lang.swift.decl.macro")),
    ]
}

fn name_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-D][a-c]{0,2}")
}

fn tree_strategy() -> impl Strategy<Value = Declaration> {
    let leaf = (kind_strategy(), name_strategy()).prop_map(|(kind, name)| Declaration {
        name,
        ..Declaration::new(kind)
    });

    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            kind_strategy(),
            name_strategy(),
            prop::collection::vec(inner, 0..4),
            prop::collection::vec("[A-C]", 0..3),
            proptest::option::of("[a-z ]{1,8}"),
        )
            .prop_map(|(kind, name, children, inherited_types, documentation)| Declaration {
                kind,
                name,
                children,
                inherited_types,
                documentation,
            })
    })
}

fn statement_strategy() -> impl Strategy<Value = Vec<Statement>> {
    prop::collection::vec("[a-d]{1,2}".prop_map(Statement::new), 0..40)
}

// ===================
// Properties
// ===================

proptest! {
    #[test]
    fn walk_is_deterministic(tree in tree_strategy()) {
        let walker = Walker::default();
        prop_assert_eq!(walker.walk(&tree), walker.walk(&tree));
    }

    #[test]
    fn own_statements_come_first(tree in tree_strategy()) {
        let emitter = Emitter::default();
        let own = emitter.emit(&tree, None);
        let all = walk(&emitter, &tree, None);
        prop_assert!(all.len() >= own.len());
        prop_assert_eq!(&all[..own.len()], &own[..]);
    }

    #[test]
    fn accumulator_keeps_first_occurrences(statements in statement_strategy()) {
        let diagram = ClassDiagram::new("Props");
        for statement in &statements {
            diagram.add(statement.clone());
        }

        let mut seen = HashSet::new();
        let expected: Vec<Statement> = statements
            .into_iter()
            .filter(|statement| seen.insert(statement.clone()))
            .collect();
        prop_assert_eq!(diagram.statements(), expected);
    }

    #[test]
    fn render_is_idempotent(statements in statement_strategy()) {
        let diagram = ClassDiagram::new("Props");
        diagram.extend(statements);
        let first = diagram.render();
        prop_assert_eq!(&first, &diagram.render());

        let body: Vec<&str> = first.split("\n\t").skip(1).filter(|l| !l.is_empty()).collect();
        let unique: HashSet<&str> = body.iter().copied().collect();
        prop_assert_eq!(body.len(), unique.len());
    }

    #[test]
    fn tree_order_does_not_change_the_set(trees in prop::collection::vec(tree_strategy(), 1..5)) {
        let generator = Generator::with_json_parser(DiagramConfig::default());
        let forward = generator.generate_trees(trees.iter());
        let backward = generator.generate_trees(trees.iter().rev());

        let forward: HashSet<Statement> = forward.statements().into_iter().collect();
        let backward: HashSet<Statement> = backward.statements().into_iter().collect();
        prop_assert_eq!(forward, backward);
    }
}
