//! Integration tests for the public API

use mermaid_kitten::prelude::*;
use mermaid_kitten::{diagram_from_json, generate, render_diagram, quoted};
use std::fs;
use tempfile::tempdir;

fn enum_json(name: &str, inherited: &[&str], docs: Option<&str>) -> String {
    let inherited: Vec<String> = inherited
        .iter()
        .map(|name| format!(r#"{{"key.name": "{}"}}"#, name))
        .collect();
    let docs = docs
        .map(|docs| format!(r#", "key.doc.comment": "{}""#, docs))
        .unwrap_or_default();
    format!(
        r#"{{"key.substructure": [{{
            "key.kind": "source.lang.swift.decl.enum",
            "key.name": "{}",
            "key.offset": 0,
            "key.length": 42,
            "key.inheritedtypes": [{}]{}
        }}]}}"#,
        name,
        inherited.join(", "),
        docs
    )
}

fn body_lines(text: &str) -> Vec<&str> {
    text.split("classDiagram\n\t")
        .nth(1)
        .unwrap()
        .split("\n\t")
        .filter(|line| !line.is_empty())
        .collect()
}

#[test]
fn test_plain_enum_yields_two_statements() {
    let text = diagram_from_json(&[enum_json("Animal", &[], None).as_str()], DiagramConfig::new("Zoo")).unwrap();
    assert_eq!(body_lines(&text), vec!["class `Animal`", "<<enum>> `Animal`"]);
}

#[test]
fn test_enum_inheritance_edges() {
    let text = diagram_from_json(
        &[enum_json("Shape", &["Codable", "Equatable"], None).as_str()],
        DiagramConfig::new("Shapes"),
    )
    .unwrap();
    assert_eq!(
        body_lines(&text),
        vec![
            "class `Shape`",
            "<<enum>> `Shape`",
            "`Shape` <|-- Codable",
            "`Shape` <|-- Equatable",
        ]
    );
}

#[test]
fn test_enum_documentation_note() {
    let text = diagram_from_json(
        &[enum_json("Color", &[], Some("primary colors")).as_str()],
        DiagramConfig::new("Palette"),
    )
    .unwrap();
    let notes: Vec<_> = body_lines(&text)
        .into_iter()
        .filter(|line| line.starts_with("note for `Color`"))
        .collect();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].contains("primary colors"));
}

#[test]
fn test_identical_enums_across_files_appear_once() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("First.json"), enum_json("Status", &[], None)).unwrap();
    fs::create_dir(dir.path().join("Nested")).unwrap();
    fs::write(dir.path().join("Nested/Second.json"), enum_json("Status", &[], None)).unwrap();

    let text = generate(dir.path(), DiagramConfig::new("Api")).unwrap();
    assert_eq!(body_lines(&text), vec!["class `Status`", "<<enum>> `Status`"]);
}

#[test]
fn test_document_shape() {
    let text = diagram_from_json(&[enum_json("Animal", &[], None).as_str()], DiagramConfig::new("Zoo")).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("---"));
    assert_eq!(lines.next(), Some("title: Zoo"));
    assert_eq!(lines.next(), Some("---"));
    assert_eq!(lines.next(), Some("classDiagram"));
    assert!(lines.all(|line| line.starts_with('\t')));
}

#[test]
fn test_components_compose() {
    let tree = Declaration::source_file([Declaration::new(DeclarationKind::Enum)
        .with_name("Animal")
        .with_documentation("Things at the zoo")]);

    let statements = Walker::new(Emitter::default()).walk(&tree);
    let expected = render_diagram("Zoo", &statements);

    let diagram = ClassDiagram::new("Zoo");
    diagram.extend(statements);
    assert_eq!(diagram.render(), expected);
}

#[test]
fn test_relationship_vocabulary() {
    let lhs = quoted("Car");
    let rhs = quoted("Engine");
    assert_eq!(Relationship::Composition.relate(&lhs, &rhs).as_str(), "`Car` *-- `Engine`");
    assert_eq!(Relationship::AggregationReversed.relate(&lhs, &rhs).as_str(), "`Car` --o `Engine`");
    assert_eq!(Relationship::DependencyReversed.relate(&lhs, &rhs).as_str(), "`Car` ..> `Engine`");
    assert_eq!(Relationship::RealizationBidirectional.relate(&lhs, &rhs).as_str(), "`Car` <|..|> `Engine`");
}
