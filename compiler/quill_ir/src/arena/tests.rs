use super::*;
use crate::{ExprKind, NodeKind, Span};

#[test]
fn test_alloc_and_get() {
    let mut arena = TreeArena::new();
    let text = arena.alloc_text(b"hello");
    let node = arena.alloc_node(Node::new(NodeKind::Text(text), Span::new(0, 5)));

    assert_eq!(arena.get_text(text), b"hello");
    assert_eq!(arena.get_node(node).kind, NodeKind::Text(text));
    assert_eq!(arena.get_node(node).span, Span::new(0, 5));
    assert_eq!(arena.node_count(), 1);
}

#[test]
fn test_lists_are_contiguous() {
    let mut arena = TreeArena::new();
    let a = arena.alloc_expr(Expr::new(ExprKind::Dot, Span::DUMMY));
    let b = arena.alloc_expr(Expr::new(ExprKind::Nil, Span::DUMMY));

    let first = arena.alloc_expr_list([a, b]);
    let second = arena.alloc_expr_list([b]);
    let empty = arena.alloc_expr_list(std::iter::empty());

    assert_eq!(first, ExprRange::new(0, 2));
    assert_eq!(second, ExprRange::new(2, 1));
    assert!(empty.is_empty());
    assert_eq!(arena.get_expr_list(first), &[a, b]);
    assert_eq!(arena.get_expr_list(second), &[b]);
    assert_eq!(arena.get_expr_list(empty), &[] as &[ExprId]);
}

#[test]
fn test_names() {
    let mut arena = TreeArena::new();
    let names = [Name::from_raw(3), Name::from_raw(4)];
    let range = arena.alloc_names(names);
    assert_eq!(arena.get_names(range), &names);
}

#[test]
fn test_checked_accessors_reject_foreign_ids() {
    let arena = TreeArena::new();
    assert!(arena.try_get_node(NodeId::new(0)).is_none());
    assert!(arena.try_get_expr(ExprId::INVALID).is_none());
    assert!(arena.try_get_text(TextId::new(1)).is_none());
    assert!(arena.try_get_expr_list(ExprRange::new(0, 1)).is_none());
    assert_eq!(arena.try_get_names(NameRange::EMPTY), Some(&[] as &[Name]));
}

#[test]
fn test_iteration_in_allocation_order() {
    let mut arena = TreeArena::new();
    let first = arena.alloc_node(Node::new(NodeKind::Comment, Span::DUMMY));
    let second = arena.alloc_node(Node::new(NodeKind::Break, Span::DUMMY));

    let ids: Vec<_> = arena.nodes().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![first, second]);
}
