use super::*;
use pretty_assertions::assert_eq;
use quill_ir::StringInterner;

#[test]
fn test_int_literal() {
    assert_eq!(eval_number(NumberLit::Int(-7)), Value::int(-7));
}

#[test]
fn test_float_literal() {
    assert_eq!(eval_number(NumberLit::float(2.5)), Value::float(2.5));
}

#[test]
fn test_integral_float_stays_float() {
    let value = eval_number(NumberLit::float(3.0));
    assert_eq!(value.type_name(), "float");
    assert_eq!(value.display_value(), "3");
}

#[test]
fn test_string_literal() {
    let interner = StringInterner::new();
    let name = interner.intern("hello");
    assert_eq!(eval_string(name, &interner), Value::string("hello"));
}
