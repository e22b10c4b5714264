//! Output sink used during a run.

use std::io;

use quill_value::errors::output_error;
use quill_value::{EvalError, Value};

/// Writes rendered text to the caller's sink.
///
/// Write failures become `EvalErrorKind::Output` errors; bytes already
/// written stay written.
pub(crate) struct Output<'w> {
    sink: &'w mut dyn io::Write,
    written: usize,
}

impl<'w> Output<'w> {
    pub(crate) fn new(sink: &'w mut dyn io::Write) -> Self {
        Self { sink, written: 0 }
    }

    /// Write raw bytes verbatim.
    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), EvalError> {
        self.sink
            .write_all(bytes)
            .map_err(|error| output_error(&error))?;
        self.written += bytes.len();
        Ok(())
    }

    /// Write the display form of a value.
    pub(crate) fn write_value(&mut self, value: &Value) -> Result<(), EvalError> {
        match value {
            Value::Str(text) => self.write_bytes(text.as_bytes()),
            other => self.write_bytes(other.display_value().as_bytes()),
        }
    }

    /// Total bytes written so far.
    pub(crate) fn bytes_written(&self) -> usize {
        self.written
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
