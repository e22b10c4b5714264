//! Opt-in built-in functions.
//!
//! Registered by [`FunctionTable::with_builtins`]; a table built with
//! [`FunctionTable::new`] starts empty.

use quill_ir::StringInterner;

use crate::{Arity, FunctionTable, FunctionValue, Value};

pub(crate) fn register_builtins(table: &mut FunctionTable, interner: &StringInterner) {
    for function in [
        FunctionValue::new("not", Arity::Exact(1), not),
        FunctionValue::new("len", Arity::Exact(1), len),
        FunctionValue::new("index", Arity::AtLeast(1), index),
        FunctionValue::new("print", Arity::AtLeast(0), print),
    ] {
        table.register(interner, function);
    }
}

/// Boolean negation. Like `if`, only accepts booleans.
fn not(args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(format!("expected bool, got {}", other.type_name())),
    }
}

/// Length of a string (in bytes), list, or map.
fn len(args: &[Value]) -> Result<Value, String> {
    let n = match &args[0] {
        Value::Str(s) => s.len(),
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        other => return Err(format!("len of type {}", other.type_name())),
    };
    i64::try_from(n)
        .map(Value::int)
        .map_err(|_| format!("length {n} overflows int"))
}

/// `index x 1 2` is `x[1][2]`: list positions or map keys, left to right.
fn index(args: &[Value]) -> Result<Value, String> {
    let (receiver, keys) = args
        .split_first()
        .ok_or_else(|| "index of nothing".to_string())?;
    let mut current = receiver;
    for key in keys {
        current = match (current, key) {
            (Value::List(items), Value::Int(i)) => usize::try_from(*i)
                .ok()
                .and_then(|i| items.get(i))
                .ok_or_else(|| format!("index out of range: {i}"))?,
            (Value::Map(map), Value::Str(k)) => map
                .get(k.as_str())
                .ok_or_else(|| format!("map has no entry for key {:?}", k.as_str()))?,
            (receiver, key) => {
                return Err(format!(
                    "can't index item of type {} with {}",
                    receiver.type_name(),
                    key.type_name()
                ))
            }
        };
    }
    Ok(current.clone())
}

/// Concatenate the operands' text, with a space between two operands when
/// neither is a string.
fn print(args: &[Value]) -> Result<Value, String> {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        let is_str = matches!(arg, Value::Str(_));
        if i > 0 && !is_str && !matches!(args[i - 1], Value::Str(_)) {
            out.push(' ');
        }
        out.push_str(&arg.display_value());
    }
    Ok(Value::string(out))
}

#[cfg(test)]
mod tests;
