//! Host functions and the function table.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use quill_ir::{FunctionScope, Name, StringInterner};

use crate::errors::{arity_mismatch, call_error, EvalResult};
use crate::Value;

/// Host callable: takes the evaluated arguments, returns its results.
type HostFn = dyn Fn(&[Value]) -> Result<Vec<Value>, String> + Send + Sync;

/// Number of arguments a function accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Exact(usize),
    /// Variadic: at least this many.
    AtLeast(usize),
}

impl Arity {
    #[inline]
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Callable registered by the host.
///
/// Cloning is cheap; the closure is shared.
#[derive(Clone)]
pub struct FunctionValue {
    name: Arc<str>,
    arity: Arity,
    results: usize,
    func: Arc<HostFn>,
}

impl FunctionValue {
    /// Function returning a single value.
    pub fn new<F>(name: &str, arity: Arity, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        FunctionValue {
            name: Arc::from(name),
            arity,
            results: 1,
            func: Arc::new(move |args: &[Value]| f(args).map(|value| vec![value])),
        }
    }

    /// Function declaring `results` return values. Only the first is used.
    pub fn with_results<F>(name: &str, arity: Arity, results: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Vec<Value>, String> + Send + Sync + 'static,
    {
        FunctionValue {
            name: Arc::from(name),
            arity,
            results,
            func: Arc::new(f),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn arity(&self) -> Arity {
        self.arity
    }

    #[inline]
    pub fn results(&self) -> usize {
        self.results
    }

    /// Check whether two values wrap the same closure.
    pub fn same_function(&self, other: &FunctionValue) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }

    /// Invoke with already-evaluated arguments; yields the first result.
    pub fn call(&self, args: &[Value]) -> EvalResult {
        if !self.arity.accepts(args.len()) {
            return Err(arity_mismatch(&self.name, self.arity, args.len()));
        }
        if self.results == 0 {
            return Err(call_error(&self.name, "function returns no value"));
        }
        let results = (self.func)(args).map_err(|message| call_error(&self.name, message))?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| call_error(&self.name, "function returned no value"))
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("results", &self.results)
            .finish_non_exhaustive()
    }
}

/// Functions visible to a template, keyed by interned name.
///
/// Built once, then shared read-only by every run and every sub-template
/// invocation.
#[derive(Clone, Debug, Default)]
pub struct FunctionTable {
    functions: FxHashMap<Name, FunctionValue>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with `not`, `len`, `index`, and `print`.
    pub fn with_builtins(interner: &StringInterner) -> Self {
        let mut table = Self::new();
        crate::builtins::register_builtins(&mut table, interner);
        table
    }

    /// Register a function under its own name, returning any it replaces.
    pub fn register(
        &mut self,
        interner: &StringInterner,
        function: FunctionValue,
    ) -> Option<FunctionValue> {
        let name = interner.intern(function.name());
        let replaced = self.functions.insert(name, function);
        if replaced.is_some() {
            tracing::debug!(name = interner.lookup(name), "replaced registered function");
        }
        replaced
    }

    #[inline]
    pub fn get(&self, name: Name) -> Option<&FunctionValue> {
        self.functions.get(&name)
    }

    #[inline]
    pub fn contains(&self, name: Name) -> bool {
        self.functions.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FunctionScope for FunctionTable {
    fn is_defined(&self, name: Name) -> bool {
        self.contains(name)
    }
}
