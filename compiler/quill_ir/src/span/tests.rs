use super::*;

#[test]
fn test_span_len() {
    let span = Span::new(4, 10);
    assert_eq!(span.len(), 6);
    assert!(!span.is_empty());
    assert!(Span::DUMMY.is_empty());
}

#[test]
fn test_span_merge() {
    let a = Span::new(10, 20);
    let b = Span::new(5, 12);
    assert_eq!(a.merge(b), Span::new(5, 20));
    assert_eq!(b.merge(a), Span::new(5, 20));
}

#[test]
fn test_span_format() {
    let span = Span::new(3, 8);
    assert_eq!(format!("{span:?}"), "3..8");
    assert_eq!(span.to_string(), "3..8");
}
