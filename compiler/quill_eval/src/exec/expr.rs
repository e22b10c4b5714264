//! Literal evaluation.

use quill_ir::{Name, NumberLit, StringLookup};
use quill_value::Value;

/// Evaluate a number literal to its native value.
#[inline]
pub fn eval_number(lit: NumberLit) -> Value {
    match lit {
        NumberLit::Int(n) => Value::int(n),
        NumberLit::Float(bits) => Value::float(f64::from_bits(bits)),
    }
}

/// Evaluate an interned string literal.
#[inline]
pub fn eval_string<I: StringLookup + ?Sized>(name: Name, interner: &I) -> Value {
    Value::string(interner.lookup(name))
}

#[cfg(test)]
mod tests;
