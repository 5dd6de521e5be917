//! Tests for Edge.

use std::collections::HashSet;

use super::edge::Edge;
use super::node::Node;

#[test]
fn test_edge_accessors() {
    let target: Node<&str, Option<&str>> = Node::new("a");
    let edge = Edge::new(&target, None);

    assert!(edge.target().ptr_eq(&target));
    assert_eq!(edge.target_name(), &"a");
    assert_eq!(edge.label(), &None);
}

#[test]
fn test_edge_equality() {
    let node = Node::new("node");
    let other = Node::new("other_node");
    let edge = Edge::new(&node, "label");

    assert_eq!(edge, Edge::new(&node, "label"));
    assert_ne!(edge, Edge::new(&node, "different label"));
    assert_ne!(edge, Edge::new(&other, "label"));
    assert_ne!(edge, Edge::new(&other, "different label"));
}

#[test]
fn test_edge_equality_follows_target_structure() {
    let node = Node::new("node");
    let similar = Node::new("node");
    let edge = Edge::new(&node, "label");

    // Equal targets make equal edges, even across instances.
    assert_eq!(edge, Edge::new(&similar, "label"));

    similar.add_edge(Edge::new(&similar, "self"));
    assert_ne!(edge, Edge::new(&similar, "label"));
}

#[test]
fn test_edge_hash_set_dedup() {
    let first = Node::new(1);
    let second = Node::new(1);

    let mut set = HashSet::new();
    set.insert(Edge::new(&first, 1));
    set.insert(Edge::new(&second, 1));
    assert_eq!(set.len(), 1);

    assert!(set.remove(&Edge::new(&first, 1)));
    assert!(set.is_empty());
}

#[test]
fn test_edge_keeps_target_alive() {
    let edge = {
        let temporary: Node<u32, u32> = Node::new(7);
        Edge::new(&temporary, 1)
    };

    assert_eq!(edge.target().name(), 7);
    assert_eq!(edge.target_name(), &7);
    assert_eq!(edge, edge.clone());
    assert_eq!(edge, Edge::new(&Node::new(7), 1));
}

#[test]
fn test_edge_debug_shows_target_name() {
    let node: Node<u32, &str> = Node::new(3);
    let edge = Edge::new(&node, "x");
    assert_eq!(format!("{edge:?}"), "Edge { target: 3, label: \"x\" }");
}
