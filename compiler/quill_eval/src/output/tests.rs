use std::io;

use pretty_assertions::assert_eq;
use quill_value::{EvalErrorKind, Value};

use super::Output;

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_writes_bytes_and_values() {
    let mut buf = Vec::new();
    let mut out = Output::new(&mut buf);
    out.write_bytes(b"n=").unwrap();
    out.write_value(&Value::int(42)).unwrap();
    out.write_value(&Value::string(" ok")).unwrap();
    assert_eq!(out.bytes_written(), 7);
    assert_eq!(buf, b"n=42 ok");
}

#[test]
fn test_write_failure_becomes_output_error() {
    let mut sink = FailingWriter;
    let mut out = Output::new(&mut sink);
    let Err(err) = out.write_bytes(b"x") else {
        panic!("write to a failing sink succeeded");
    };
    assert!(matches!(err.kind, EvalErrorKind::Output { .. }));
    assert!(err.message.contains("pipe closed"));
    assert_eq!(out.bytes_written(), 0);
}
