//! Template syntax tree nodes.
//!
//! Statements (`Node`) and expressions (`Expr`) are plain data stored in a
//! [`TreeArena`](crate::TreeArena). Children are referenced by id, never by
//! box, so a tree is one contiguous allocation per kind.
//!
//! Both kind enums are `#[non_exhaustive]`: the IR models a few grammar
//! productions the evaluator rejects, and consumers must keep a fallback arm
//! for kinds they do not execute.

use super::{ExprId, ExprRange, Name, NameRange, NodeId, NodeRange, Span, TextId};

/// Statement node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    #[inline]
    pub const fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }
}

/// Statement kinds.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum NodeKind {
    /// Raw text written verbatim.
    Text(TextId),
    /// Comment; produces nothing.
    Comment,
    /// `{{if cond}} then {{else}} else {{end}}`
    If {
        cond: ExprId,
        then_list: NodeId,
        else_list: Option<NodeId>,
    },
    /// `{{range iter}} body {{end}}`
    Range { iter: ExprId, body: NodeId },
    /// `{{break}}`
    Break,
    /// `{{continue}}`
    Continue,
    /// Ordered sequence of statements.
    List(NodeRange),
    /// `{{template "name" arg}}`
    TemplateCall { name: Name, arg: ExprId },
    /// `{{pipeline}}`; the value is rendered and written.
    Action(ExprId),
    /// `{{with pipe}} body {{else}} else {{end}}`
    ///
    /// Parsed by the grammar but not executed.
    With {
        pipe: ExprId,
        body: NodeId,
        else_list: Option<NodeId>,
    },
}

impl NodeKind {
    /// Short kind name for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            NodeKind::Text(_) => "text",
            NodeKind::Comment => "comment",
            NodeKind::If { .. } => "if",
            NodeKind::Range { .. } => "range",
            NodeKind::Break => "break",
            NodeKind::Continue => "continue",
            NodeKind::List(_) => "list",
            NodeKind::TemplateCall { .. } => "template",
            NodeKind::Action(_) => "action",
            NodeKind::With { .. } => "with",
        }
    }
}

/// Expression node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Numeric literal.
///
/// Floats are stored as bits so literals stay `Eq + Hash`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NumberLit {
    Int(i64),
    Float(u64),
}

impl NumberLit {
    /// Float literal from a native value.
    #[inline]
    pub fn float(value: f64) -> Self {
        NumberLit::Float(value.to_bits())
    }
}

/// Expression kinds.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ExprKind {
    /// Pipeline of commands; only the first command is evaluated.
    Pipe(ExprRange),
    /// Command arguments; the first argument decides what the command is.
    Command(ExprRange),
    /// Function reference, valid only as a command's leading argument.
    Identifier(Name),
    /// `.A.B.C`
    Field(NameRange),
    Number(NumberLit),
    Bool(bool),
    /// String literal, already unquoted.
    String(Name),
    /// `.`
    Dot,
    /// `$name`; parsed but not executed.
    Variable(Name),
    /// `nil`; parsed but not executed.
    Nil,
}

impl ExprKind {
    /// Short kind name for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            ExprKind::Pipe(_) => "pipeline",
            ExprKind::Command(_) => "command",
            ExprKind::Identifier(_) => "identifier",
            ExprKind::Field(_) => "field",
            ExprKind::Number(_) => "number",
            ExprKind::Bool(_) => "bool",
            ExprKind::String(_) => "string",
            ExprKind::Dot => "dot",
            ExprKind::Variable(_) => "variable",
            ExprKind::Nil => "nil",
        }
    }
}
