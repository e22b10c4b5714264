//! Quill Eval - tree-walking evaluator for Quill templates
//!
//! Executes template trees from `quill_ir` against `quill_value` data,
//! streaming output to any `std::io::Write`.
//!
//! - [`run`] executes a single tree against a registry and function table
//! - [`Template`] validates a registry once and renders it many times
//! - [`EvaluatorBuilder`] configures evaluation limits
//!
//! `break` and `continue` propagate as `ControlAction` values and are
//! absorbed by the nearest enclosing `range`, including across
//! `{{template}}` calls.

mod config;
mod evaluator;
pub mod exec;
mod output;
mod shared;
mod template;

use std::io;
use std::sync::Once;

use quill_ir::{TemplateRegistry, Tree};
use quill_value::{EvalError, FunctionTable, Value};

pub use config::{EvalConfig, DEFAULT_MAX_DEPTH};
pub use evaluator::{Evaluator, EvaluatorBuilder};
pub use shared::SharedRegistry;
pub use template::Template;

pub use quill_value::{EvalBacktrace, EvalErrorKind, ToValue};

/// Execute `tree` against `context`, writing output to `sink`.
///
/// Trees are not validated; structural problems surface as runtime errors.
/// Use [`Template`] to validate up front.
pub fn run<W: io::Write + ?Sized>(
    tree: &Tree,
    templates: &TemplateRegistry,
    functions: &FunctionTable,
    context: &Value,
    sink: &mut W,
) -> Result<(), EvalError> {
    Evaluator::new(tree, templates, functions).run(context, sink)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for evaluator debugging.
///
/// Only installs a subscriber when `RUST_LOG` is set. Safe to call more
/// than once.
///
/// Example: `RUST_LOG=quill_eval=trace cargo test -p quill_eval`
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
