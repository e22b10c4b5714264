//! Quill IR - template syntax trees
//!
//! This crate contains the data a template evaluator consumes:
//! - Names for interned identifiers and string literals
//! - Statement and expression nodes stored in a per-tree arena
//! - `TreeBuilder` for assembling trees programmatically
//! - `TemplateRegistry` mapping template names to trees
//! - A `Visitor` for traversal and eager `validate` checks
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: names and literals become `Name(u32)`
//! - **Flatten Everything**: no `Box<Node>`, children are `NodeId(u32)` indices
//! - **Read-only Trees**: once built, a tree never changes, so registries can
//!   be shared across threads and reused across runs
//!
//! Literals that contain floats store them as u64 bits for Hash compatibility.

mod arena;
pub mod ast;
mod ids;
mod interner;
mod name;
mod registry;
mod span;
mod tree;
pub mod validate;
pub mod visitor;

pub use arena::TreeArena;
pub use ast::{Expr, ExprKind, Node, NodeKind, NumberLit};
pub use ids::{ExprId, ExprRange, NameRange, NodeId, NodeRange, TextId};
pub use interner::{InternError, InternerId, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use registry::TemplateRegistry;
pub use span::Span;
pub use tree::{Tree, TreeBuilder};
pub use validate::{
    validate, validate_with_functions, FunctionScope, ValidationError, ValidationErrorKind,
    ValidationErrors,
};
pub use visitor::Visitor;
