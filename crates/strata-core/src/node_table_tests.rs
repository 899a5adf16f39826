use crate::{NodeId, NodeTable, PropValue, Props};

#[test]
fn builtins_take_reserved_slots() {
    let table = NodeTable::new("doc");

    assert_eq!(table.len(), NodeId::Safe.id() as usize);
    assert!(table.is_empty());
    assert_eq!(table.resolve(NodeId::Top.id()), "doc");
    assert_eq!(table.get("unrecognized"), Some(NodeId::Unrecognized.id()));
    assert_eq!(table.get("incomplete"), Some(NodeId::Incomplete.id()));
    assert_eq!(table.get(""), None);
}

#[test]
fn first_declared_node_is_safe() {
    let mut table = NodeTable::new("doc");

    let tag = table.declare("tag", Props::new()).unwrap();
    let name = table.declare("name", Props::new()).unwrap();

    assert_eq!(tag, NodeId::Safe.id());
    assert_eq!(name, NodeId::Safe.id() + 1);
    assert!(!table.is_empty());
}

#[test]
fn redeclare_returns_existing_id() {
    let mut table = NodeTable::new("doc");

    let mut first = Props::new();
    first.insert("fold".into(), PropValue::Bool(true));
    let mut second = Props::new();
    second.insert("fold".into(), PropValue::Bool(false));
    second.insert("indent".into(), PropValue::Int(2));

    let a = table.declare("block", first).unwrap();
    let b = table.declare("block", second).unwrap();

    assert_eq!(a, b);
    let node = table.node(a).unwrap();
    assert_eq!(node.prop("fold"), Some(&PropValue::Bool(true)));
    assert_eq!(node.prop("indent"), Some(&PropValue::Int(2)));
}

#[test]
fn error_builtins_are_errors() {
    let mut table = NodeTable::new("doc");
    let mut props = Props::new();
    props.insert("error".into(), PropValue::Bool(true));
    let invalid = table.declare("invalid", props).unwrap();
    let plain = table.declare("plain", Props::new()).unwrap();

    assert!(table.node(NodeId::Unrecognized.id()).unwrap().is_error());
    assert!(table.node(NodeId::Incomplete.id()).unwrap().is_error());
    assert!(table.node(invalid).unwrap().is_error());
    assert!(!table.node(plain).unwrap().is_error());
    assert!(!table.node(NodeId::Top.id()).unwrap().is_error());
}

#[test]
#[should_panic(expected = "node type id 99 not found")]
fn resolve_unknown_id_panics() {
    let table = NodeTable::new("doc");
    table.resolve(99);
}
