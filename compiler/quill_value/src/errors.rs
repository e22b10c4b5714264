//! Error types for template evaluation.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` provides typed error categories. Factory functions
//! (e.g., `field_not_found()`) are the public construction API; they
//! populate both `kind` and `message`.
//!
//! # Control Signals
//!
//! `break` and `continue` are not errors. Statement execution returns
//! `Result<(), ControlAction>`, where a `ControlAction` is either one of the
//! two signals or a boxed `EvalError`. Expression evaluation never produces
//! a signal and returns a plain `EvalResult`.

use std::fmt;

use quill_ir::Span;

use crate::value::Value;
use crate::Arity;

/// Result of expression evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Result of statement execution.
pub type ExecResult = Result<(), ControlAction>;

/// Non-local exit raised by `break` and `continue`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ControlSignal {
    Break,
    Continue,
}

impl ControlSignal {
    pub const fn keyword(self) -> &'static str {
        match self {
            ControlSignal::Break => "break",
            ControlSignal::Continue => "continue",
        }
    }
}

impl fmt::Display for ControlSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Typed error category.
///
/// Every kind is fatal to the run that raised it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Dispatch
    UnsupportedNode {
        kind: &'static str,
    },
    UnsupportedIteration {
        type_name: &'static str,
    },

    // Access
    FieldNotFound {
        field: String,
        type_name: &'static str,
    },
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },

    // Function
    UnknownFunction {
        name: String,
    },
    ArityMismatch {
        name: String,
        expected: Arity,
        got: usize,
    },
    CallError {
        name: String,
        message: String,
    },

    // Template
    UnknownTemplate {
        name: String,
    },
    StrayControlSignal {
        signal: ControlSignal,
    },
    RecursionLimitExceeded {
        depth: usize,
    },

    // Sink
    Output {
        message: String,
    },
}

impl EvalErrorKind {
    /// Variant name, for logging.
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::UnsupportedNode { .. } => "UnsupportedNode",
            Self::UnsupportedIteration { .. } => "UnsupportedIteration",
            Self::FieldNotFound { .. } => "FieldNotFound",
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::UnknownFunction { .. } => "UnknownFunction",
            Self::ArityMismatch { .. } => "ArityMismatch",
            Self::CallError { .. } => "CallError",
            Self::UnknownTemplate { .. } => "UnknownTemplate",
            Self::StrayControlSignal { .. } => "StrayControlSignal",
            Self::RecursionLimitExceeded { .. } => "RecursionLimitExceeded",
            Self::Output { .. } => "Output",
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Dispatch
            Self::UnsupportedNode { kind } => write!(f, "unsupported node: {kind}"),
            Self::UnsupportedIteration { type_name } => {
                write!(f, "range can't iterate over {type_name}")
            }

            // Access
            Self::FieldNotFound { field, type_name } => {
                write!(f, "can't evaluate field {field} in type {type_name}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }

            // Function
            Self::UnknownFunction { name } => write!(f, "function \"{name}\" not defined"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "wrong number of args for {name}: want {expected} got {got}"
            ),
            Self::CallError { name, message } => {
                write!(f, "error calling {name}: {message}")
            }

            // Template
            Self::UnknownTemplate { name } => write!(f, "no such template \"{name}\""),
            Self::StrayControlSignal { signal } => {
                write!(f, "{{{{{signal}}}}} outside {{{{range}}}}")
            }
            Self::RecursionLimitExceeded { depth } => {
                write!(f, "exceeded maximum template depth ({depth})")
            }

            // Sink
            Self::Output { message } => write!(f, "error writing output: {message}"),
        }
    }
}

/// A single frame in an evaluation backtrace.
///
/// One template invocation the error passed through on its way out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Name of the invoked template.
    pub name: String,
    /// Source location of the `{{template}}` call site.
    pub span: Option<Span>,
}

/// Template invocations an error unwound through, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn push(&mut self, frame: BacktraceFrame) {
        self.frames.push(frame);
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "template backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span.filter(|&span| span != Span::DUMMY) {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Node or expression that raised the error.
    pub span: Option<Span>,
    /// Template invocations the error unwound through.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error from a structured kind.
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            backtrace: None,
        }
    }

    /// Attach a source span to this error.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a span only if none is set, so the innermost location wins.
    ///
    /// `Span::DUMMY` carries no location and is skipped, leaving the slot
    /// for an enclosing span.
    #[must_use]
    pub fn with_span_if_none(mut self, span: Span) -> Self {
        if span != Span::DUMMY {
            self.span.get_or_insert(span);
        }
        self
    }

    /// Record a template frame the error is unwinding through.
    #[must_use]
    pub fn with_frame(mut self, frame: BacktraceFrame) -> Self {
        self.backtrace.get_or_insert_with(EvalBacktrace::default).push(frame);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(span) = self.span.filter(|&span| span != Span::DUMMY) {
            write!(f, " at {span}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

/// Outcome of statement execution other than normal completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    Break,
    Continue,
    Error(Box<EvalError>),
}

impl ControlAction {
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, ControlAction::Error(_))
    }

    /// The control signal, if this is one.
    pub fn signal(&self) -> Option<ControlSignal> {
        match self {
            ControlAction::Break => Some(ControlSignal::Break),
            ControlAction::Continue => Some(ControlSignal::Continue),
            ControlAction::Error(_) => None,
        }
    }

    /// Convert to an error; a signal that got this far escaped every loop.
    pub fn into_eval_error(self) -> EvalError {
        match self {
            ControlAction::Error(e) => *e,
            ControlAction::Break => stray_control_signal(ControlSignal::Break),
            ControlAction::Continue => stray_control_signal(ControlSignal::Continue),
        }
    }

    /// Attach a span to an error that has none; signals pass through.
    #[must_use]
    pub fn with_span_if_error(self, span: Span) -> Self {
        match self {
            ControlAction::Error(e) => ControlAction::Error(Box::new(e.with_span_if_none(span))),
            other => other,
        }
    }
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(error: EvalError) -> Self {
        ControlAction::Error(Box::new(error))
    }
}

// Dispatch Errors

/// Node or expression kind the evaluator does not execute.
#[cold]
pub fn unsupported_node(kind: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedNode { kind })
}

/// `range` over a value that is not a sequence.
#[cold]
pub fn unsupported_iteration(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedIteration { type_name })
}

// Access Errors

/// Field lookup on a non-record, or a record without the field.
#[cold]
pub fn field_not_found(field: &str, type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FieldNotFound {
        field: field.to_string(),
        type_name,
    })
}

/// Value of the wrong type, e.g. a non-boolean condition.
#[cold]
pub fn type_mismatch(expected: &'static str, got: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch { expected, got })
}

// Function Errors

#[cold]
pub fn unknown_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: Arity, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

/// Host function rejected its call.
#[cold]
pub fn call_error(name: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallError {
        name: name.to_string(),
        message: message.into(),
    })
}

// Template Errors

#[cold]
pub fn unknown_template(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownTemplate {
        name: name.to_string(),
    })
}

/// `break`/`continue` that escaped every enclosing `range`.
#[cold]
pub fn stray_control_signal(signal: ControlSignal) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StrayControlSignal { signal })
}

/// Template invocations nested deeper than the configured limit.
#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimitExceeded { depth })
}

// Sink Errors

/// Write to the output sink failed.
#[cold]
pub fn output_error(error: &std::io::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Output {
        message: error.to_string(),
    })
}
