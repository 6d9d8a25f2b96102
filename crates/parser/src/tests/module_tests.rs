// Module Arena Tests
//
// Lowering into the arena and name resolution.

use crate::module::{Module, NodeKind, ResolveError};
use crate::{FrontendError, parse_module};

fn module(source: &str) -> Module {
    parse_module(source).unwrap()
}

fn resolve_errors(source: &str) -> Vec<ResolveError> {
    match parse_module(source) {
        Err(FrontendError::Resolve(errors)) => errors,
        other => panic!("Expected resolve errors, got {:?}", other),
    }
}

#[test]
fn test_declarations_are_indexed_in_order() {
    let module = module("const A := 1\nvar B := 2\nconst C: uint8");
    let names: Vec<&str> = module.declarations().map(|(_, d)| d.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    let c = module.lookup("C").unwrap();
    assert!(module.declaration(c).value.is_none());
    assert!(!module.declaration(module.lookup("B").unwrap()).is_const);
}

#[test]
fn test_forward_reference_resolves() {
    let module = module("const A := B\nconst B := 2");
    let a = module.declaration(module.lookup("A").unwrap());
    let value = a.value.unwrap();
    match &module.node(value).kind {
        NodeKind::Identifier { name, declaration } => {
            assert_eq!(name, "B");
            assert_eq!(*declaration, module.lookup("B"));
        }
        other => panic!("Expected identifier, got {:?}", other),
    }
}

#[test]
fn test_equal_subtrees_get_distinct_ids() {
    let module = module("1 + 1");
    let root = module.expressions()[0];
    match &module.node(root).kind {
        NodeKind::Binary { lhs, rhs, .. } => {
            assert_ne!(lhs, rhs);
            assert_eq!(module.node(*lhs).kind, module.node(*rhs).kind);
        }
        other => panic!("Expected binary, got {:?}", other),
    }
    assert_eq!(module.len(), 3);
}

#[test]
fn test_array_lowered_as_inline_array_tuple() {
    let module = module("[1, 2]\n(1, 2)");
    let kinds: Vec<bool> = module
        .expressions()
        .iter()
        .map(|id| match &module.node(*id).kind {
            NodeKind::Tuple { is_inline_array, .. } => *is_inline_array,
            other => panic!("Expected tuple, got {:?}", other),
        })
        .collect();
    assert_eq!(kinds, vec![true, false]);
}

#[test]
fn test_self_reference_resolves() {
    let module = module("const A := A + 1");
    let a = module.lookup("A").unwrap();
    let value = module.declaration(a).value.unwrap();
    match &module.node(value).kind {
        NodeKind::Binary { lhs, .. } => match &module.node(*lhs).kind {
            NodeKind::Identifier { declaration, .. } => assert_eq!(*declaration, Some(a)),
            other => panic!("Expected identifier, got {:?}", other),
        },
        other => panic!("Expected binary, got {:?}", other),
    }
}

#[test]
fn test_undefined_identifier() {
    let errors = resolve_errors("const A := B + 1");
    assert_eq!(
        errors,
        vec![ResolveError::UndefinedIdentifier {
            name: "B".to_string(),
            span: 11..12,
        }]
    );
}

#[test]
fn test_duplicate_declaration() {
    let errors = resolve_errors("const A := 1\nconst A := 2");
    match &errors[..] {
        [ResolveError::DuplicateDeclaration { name, span, previous }] => {
            assert_eq!(name, "A");
            assert_eq!(*previous, 0..12);
            assert_eq!(*span, 13..25);
        }
        other => panic!("Expected one duplicate error, got {:?}", other),
    }
}
