//! Syntax tree visitor.
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! visits children in source order. Override a `visit_*` method to act on a
//! node and call `walk_*` to keep descending.
//!
//! The walkers index the arena directly; run them only on trees whose ids
//! have been checked (see [`validate`](crate::validate)).

use super::ast::{Expr, ExprKind, Node, NodeKind};
use super::{ExprId, NodeId, TreeArena};

/// Tree visitor trait.
///
/// The visitor can mutate its own state during traversal. The tree itself
/// remains immutable.
pub trait Visitor<'ast> {
    fn visit_node(&mut self, node: &'ast Node, arena: &'ast TreeArena) {
        walk_node(self, node, arena);
    }

    fn visit_node_id(&mut self, id: NodeId, arena: &'ast TreeArena) {
        self.visit_node(arena.get_node(id), arena);
    }

    fn visit_expr(&mut self, expr: &'ast Expr, arena: &'ast TreeArena) {
        walk_expr(self, expr, arena);
    }

    fn visit_expr_id(&mut self, id: ExprId, arena: &'ast TreeArena) {
        self.visit_expr(arena.get_expr(id), arena);
    }
}

/// Visit the children of a statement node.
pub fn walk_node<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    node: &'ast Node,
    arena: &'ast TreeArena,
) {
    match &node.kind {
        NodeKind::Text(_) | NodeKind::Comment | NodeKind::Break | NodeKind::Continue => {}
        NodeKind::If {
            cond,
            then_list,
            else_list,
        } => {
            visitor.visit_expr_id(*cond, arena);
            visitor.visit_node_id(*then_list, arena);
            if let Some(else_list) = else_list {
                visitor.visit_node_id(*else_list, arena);
            }
        }
        NodeKind::Range { iter, body } => {
            visitor.visit_expr_id(*iter, arena);
            visitor.visit_node_id(*body, arena);
        }
        NodeKind::List(children) => {
            for &child in arena.get_node_list(*children) {
                visitor.visit_node_id(child, arena);
            }
        }
        NodeKind::TemplateCall { arg, .. } => visitor.visit_expr_id(*arg, arena),
        NodeKind::Action(expr) => visitor.visit_expr_id(*expr, arena),
        NodeKind::With {
            pipe,
            body,
            else_list,
        } => {
            visitor.visit_expr_id(*pipe, arena);
            visitor.visit_node_id(*body, arena);
            if let Some(else_list) = else_list {
                visitor.visit_node_id(*else_list, arena);
            }
        }
    }
}

/// Visit the children of an expression.
pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    expr: &'ast Expr,
    arena: &'ast TreeArena,
) {
    match &expr.kind {
        ExprKind::Pipe(children) | ExprKind::Command(children) => {
            for &child in arena.get_expr_list(*children) {
                visitor.visit_expr_id(child, arena);
            }
        }
        ExprKind::Identifier(_)
        | ExprKind::Field(_)
        | ExprKind::Number(_)
        | ExprKind::Bool(_)
        | ExprKind::String(_)
        | ExprKind::Dot
        | ExprKind::Variable(_)
        | ExprKind::Nil => {}
    }
}

#[cfg(test)]
mod tests;
