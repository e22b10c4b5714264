//! Runtime values for the Quill evaluator.
//!
//! # Heap Enforcement
//!
//! All heap allocations go through factory methods on `Value`. The
//! `Heap<T>` wrapper has a crate-private constructor, so external code
//! cannot create heap values directly.
//!
//! ```text
//! let s = Value::string("hello");                 // OK
//! let list = Value::list(vec![Value::int(1)]);    // OK
//! let s = Value::Str(Heap::new("hello".into()));  // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Thread Safety
//!
//! Heap types use `Arc` internally, and host functions must be
//! `Send + Sync`, so any value can be shared across concurrent runs.

mod heap;
mod record;

use std::collections::BTreeMap;
use std::fmt;

use quill_ir::{Name, StringLookup};

use crate::errors::{field_not_found, type_mismatch, unsupported_iteration, EvalResult};
use crate::{EvalError, FunctionValue};

pub use heap::Heap;
pub use record::{RecordBuilder, RecordLayout, RecordValue};

/// Runtime value a template is evaluated against.
#[derive(Clone)]
pub enum Value {
    // Scalars (inline, no heap allocation)
    Int(i64),
    Float(f64),
    Bool(bool),

    // Heap types
    Str(Heap<String>),
    List(Heap<Vec<Value>>),
    /// Associative collection. Renders and can be indexed, but is never
    /// iterable.
    Map(Heap<BTreeMap<String, Value>>),

    // Composite types
    Record(RecordValue),
    Function(FunctionValue),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(n: f64) -> Self {
        Value::Float(n)
    }

    /// Create a string value.
    ///
    /// ```text
    /// let s = Value::string("hello");
    /// let s2 = Value::string(format!("value: {x}"));
    /// ```
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a map value. Keys are kept sorted.
    #[inline]
    pub fn map(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(Heap::new(entries))
    }

    #[inline]
    pub fn record(record: RecordValue) -> Self {
        Value::Record(record)
    }

    #[inline]
    pub fn function(function: FunctionValue) -> Self {
        Value::Function(function)
    }
}

// Value Methods

impl Value {
    /// Resolve a field path left to right; each step's result is the
    /// receiver for the next.
    ///
    /// An empty path yields the value itself.
    pub fn project<I: StringLookup + ?Sized>(&self, names: &[Name], interner: &I) -> EvalResult {
        let mut current = self;
        for &name in names {
            current = match current {
                Value::Record(record) => record
                    .get_field(name)
                    .ok_or_else(|| field_not_found(interner.lookup(name), "record"))?,
                other => return Err(field_not_found(interner.lookup(name), other.type_name())),
            };
        }
        Ok(current.clone())
    }

    /// Coerce to a boolean. Only booleans coerce.
    pub fn as_boolean(&self) -> Result<bool, EvalError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(type_mismatch("bool", other.type_name())),
        }
    }

    /// Items to iterate. Only lists are iterable.
    pub fn as_sequence(&self) -> Result<&[Value], EvalError> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(unsupported_iteration(other.type_name())),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Get the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record(_) => "record",
            Value::Function(_) => "function",
        }
    }

    /// Text written for this value by an action.
    ///
    /// Same as the `Display` rendering.
    pub fn display_value(&self) -> String {
        self.to_string()
    }
}

/// Shortest round-trip digits, in exponent form when the decimal exponent is
/// below -4 or at least 6 (`1e+06`, `1.5e-07`), with at least two exponent
/// digits.
fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "+Inf" } else { "-Inf" });
    }

    let scientific = format!("{n:e}");
    let parts = scientific
        .split_once('e')
        .and_then(|(mantissa, exp)| Some((mantissa, exp.parse::<i32>().ok()?)));
    match parts {
        Some((mantissa, exp)) if !(-4..6).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        _ => write!(f, "{n}"),
    }
}

fn write_spaced<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// Trait Implementations

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write_float(f, *n),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                write_spaced(f, items.iter())?;
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("map[")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                f.write_str("]")
            }
            Value::Record(record) => {
                f.write_str("{")?;
                write_spaced(f, record.values().iter())?;
                f.write_str("}")
            }
            Value::Function(func) => write!(f, "<function {}>", func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Map(map) => write!(f, "Map({:?})", &**map),
            Value::Record(record) => write!(f, "Record({:?})", record.values()),
            Value::Function(func) => write!(f, "Function({func:?})"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            // Functions are equal by identity
            (Value::Function(a), Value::Function(b)) => a.same_function(b),
            _ => false,
        }
    }
}
