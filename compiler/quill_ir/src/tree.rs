//! Named template trees and the programmatic tree builder.

use super::{
    Expr, ExprId, ExprKind, InternerId, Name, Node, NodeId, NodeKind, NumberLit, Span,
    StringInterner, TreeArena,
};

/// One parsed template: a root node plus the arena that owns it.
///
/// Trees are immutable once built. Each tree carries its own arena, so ids
/// from one tree are meaningless in another, and remembers which interner
/// its names came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tree {
    name: Name,
    root: NodeId,
    arena: TreeArena,
    interner: InternerId,
}

impl Tree {
    /// Assemble a tree from parser output whose names came from `interner`.
    pub fn new(interner: &StringInterner, name: Name, root: NodeId, arena: TreeArena) -> Self {
        Tree {
            name,
            root,
            arena,
            interner: interner.id(),
        }
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn arena(&self) -> &TreeArena {
        &self.arena
    }

    /// Identity of the interner that produced this tree's names.
    #[inline]
    pub fn interner_id(&self) -> InternerId {
        self.interner
    }
}

/// Builds a [`Tree`] bottom-up.
///
/// Children are allocated before their parents, so every child id is
/// smaller than the id of the node that refers to it. Validation relies on
/// that ordering to rule out cycles.
///
/// Helper methods stamp nodes with the current span (see
/// [`set_span`](Self::set_span)); parsers with precise locations use
/// [`node`](Self::node) and [`expr`](Self::expr) directly.
pub struct TreeBuilder<'i> {
    interner: &'i StringInterner,
    arena: TreeArena,
    span: Span,
}

impl<'i> TreeBuilder<'i> {
    pub fn new(interner: &'i StringInterner) -> Self {
        TreeBuilder {
            interner,
            arena: TreeArena::new(),
            span: Span::DUMMY,
        }
    }

    /// Interner used for names and string literals.
    pub fn interner(&self) -> &'i StringInterner {
        self.interner
    }

    /// Span stamped on nodes created by the helper methods from now on.
    pub fn set_span(&mut self, span: Span) -> &mut Self {
        self.span = span;
        self
    }

    pub fn node(&mut self, kind: NodeKind, span: Span) -> NodeId {
        self.arena.alloc_node(Node::new(kind, span))
    }

    pub fn expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn stamp_node(&mut self, kind: NodeKind) -> NodeId {
        let span = self.span;
        self.node(kind, span)
    }

    fn stamp_expr(&mut self, kind: ExprKind) -> ExprId {
        let span = self.span;
        self.expr(kind, span)
    }

    // Statements

    pub fn text(&mut self, text: impl AsRef<[u8]>) -> NodeId {
        let id = self.arena.alloc_text(text.as_ref());
        self.stamp_node(NodeKind::Text(id))
    }

    pub fn comment(&mut self) -> NodeId {
        self.stamp_node(NodeKind::Comment)
    }

    pub fn if_node(
        &mut self,
        cond: ExprId,
        then_list: NodeId,
        else_list: Option<NodeId>,
    ) -> NodeId {
        self.stamp_node(NodeKind::If {
            cond,
            then_list,
            else_list,
        })
    }

    pub fn range(&mut self, iter: ExprId, body: NodeId) -> NodeId {
        self.stamp_node(NodeKind::Range { iter, body })
    }

    pub fn break_node(&mut self) -> NodeId {
        self.stamp_node(NodeKind::Break)
    }

    pub fn continue_node(&mut self) -> NodeId {
        self.stamp_node(NodeKind::Continue)
    }

    pub fn list(&mut self, nodes: impl IntoIterator<Item = NodeId>) -> NodeId {
        let range = self.arena.alloc_node_list(nodes);
        self.stamp_node(NodeKind::List(range))
    }

    pub fn template_call(&mut self, name: &str, arg: ExprId) -> NodeId {
        let name = self.interner.intern(name);
        self.stamp_node(NodeKind::TemplateCall { name, arg })
    }

    pub fn action(&mut self, expr: ExprId) -> NodeId {
        self.stamp_node(NodeKind::Action(expr))
    }

    pub fn with(&mut self, pipe: ExprId, body: NodeId, else_list: Option<NodeId>) -> NodeId {
        self.stamp_node(NodeKind::With {
            pipe,
            body,
            else_list,
        })
    }

    // Expressions

    pub fn pipe(&mut self, commands: impl IntoIterator<Item = ExprId>) -> ExprId {
        let range = self.arena.alloc_expr_list(commands);
        self.stamp_expr(ExprKind::Pipe(range))
    }

    pub fn command(&mut self, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        let range = self.arena.alloc_expr_list(args);
        self.stamp_expr(ExprKind::Command(range))
    }

    pub fn identifier(&mut self, name: &str) -> ExprId {
        let name = self.interner.intern(name);
        self.stamp_expr(ExprKind::Identifier(name))
    }

    /// Function call: a command led by an identifier.
    pub fn call(&mut self, function: &str, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        let lead = self.identifier(function);
        self.command(std::iter::once(lead).chain(args))
    }

    /// Field path `.A.B...`.
    pub fn field<'a>(&mut self, path: impl IntoIterator<Item = &'a str>) -> ExprId {
        let interner = self.interner;
        let names = self.arena.alloc_names(path.into_iter().map(|s| interner.intern(s)));
        self.stamp_expr(ExprKind::Field(names))
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.stamp_expr(ExprKind::Number(NumberLit::Int(value)))
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.stamp_expr(ExprKind::Number(NumberLit::float(value)))
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.stamp_expr(ExprKind::Bool(value))
    }

    pub fn string(&mut self, value: &str) -> ExprId {
        let name = self.interner.intern(value);
        self.stamp_expr(ExprKind::String(name))
    }

    pub fn dot(&mut self) -> ExprId {
        self.stamp_expr(ExprKind::Dot)
    }

    pub fn variable(&mut self, name: &str) -> ExprId {
        let name = self.interner.intern(name);
        self.stamp_expr(ExprKind::Variable(name))
    }

    pub fn nil(&mut self) -> ExprId {
        self.stamp_expr(ExprKind::Nil)
    }

    /// Finish the tree. Performs no validation.
    pub fn build(self, name: &str, root: NodeId) -> Tree {
        let name = self.interner.intern(name);
        Tree::new(self.interner, name, root, self.arena)
    }
}
