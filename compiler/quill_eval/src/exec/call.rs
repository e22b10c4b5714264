//! Function calls from commands.
//!
//! A command led by an identifier calls the function registered under that
//! name. Arguments are evaluated by the caller before the lookup, so an
//! argument error wins over an unknown function.

use quill_ir::{Name, StringLookup};
use quill_value::errors::unknown_function;
use quill_value::{EvalResult, FunctionTable, Value};

/// Call the function registered as `name` with already-evaluated arguments.
///
/// Only the first declared result is returned.
pub fn call_function<I: StringLookup + ?Sized>(
    functions: &FunctionTable,
    name: Name,
    args: &[Value],
    interner: &I,
) -> EvalResult {
    let Some(function) = functions.get(name) else {
        return Err(unknown_function(interner.lookup(name)));
    };
    tracing::trace!(function = function.name(), args = args.len(), "calling function");
    function.call(args)
}
