//! Quill Value - runtime data for template evaluation
//!
//! This crate holds everything an evaluator passes around besides the
//! syntax tree itself:
//! - `Value`, the dynamically-typed context and expression result
//! - Records with shared layouts, built through `RecordValue::builder`
//! - `ToValue` for turning host data into values
//! - `FunctionValue` and `FunctionTable` for host callables
//! - `EvalError`, `EvalErrorKind`, and the `ControlAction` result channel

mod builtins;
pub mod errors;
mod function;
mod to_value;
pub mod value;

pub use quill_ir::{Name, StringLookup};

pub use errors::{
    BacktraceFrame, ControlAction, ControlSignal, EvalBacktrace, EvalError, EvalErrorKind,
    EvalResult, ExecResult,
};
pub use function::{Arity, FunctionTable, FunctionValue};
pub use to_value::ToValue;
pub use value::{Heap, RecordBuilder, RecordLayout, RecordValue, Value};
