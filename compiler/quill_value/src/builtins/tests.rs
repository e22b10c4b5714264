use super::*;
use std::collections::BTreeMap;

fn call(table: &FunctionTable, interner: &StringInterner, name: &str, args: &[Value]) -> Value {
    let function = table
        .get(interner.intern(name))
        .unwrap_or_else(|| panic!("{name} should be registered"));
    function
        .call(args)
        .unwrap_or_else(|e| panic!("{name} failed: {e}"))
}

fn setup() -> (StringInterner, FunctionTable) {
    let interner = StringInterner::new();
    let table = FunctionTable::with_builtins(&interner);
    (interner, table)
}

#[test]
fn test_builtins_registered() {
    let (_, table) = setup();
    assert_eq!(table.len(), 4);
    assert!(FunctionTable::new().is_empty());
}

#[test]
fn test_not() {
    let (interner, table) = setup();
    assert_eq!(
        call(&table, &interner, "not", &[Value::Bool(true)]),
        Value::Bool(false)
    );
    assert!(not(&[Value::int(0)]).is_err());
}

#[test]
fn test_len() {
    let (interner, table) = setup();
    assert_eq!(
        call(&table, &interner, "len", &[Value::string("héllo")]),
        Value::int(6)
    );
    assert_eq!(
        call(
            &table,
            &interner,
            "len",
            &[Value::list(vec![Value::int(1), Value::int(2)])]
        ),
        Value::int(2)
    );
    assert_eq!(
        len(&[Value::int(3)]),
        Err("len of type int".to_string())
    );
}

#[test]
fn test_index_list_and_map() {
    let (interner, table) = setup();
    let nested = Value::list(vec![
        Value::list(vec![Value::int(10), Value::int(11)]),
        Value::list(vec![Value::int(20)]),
    ]);
    assert_eq!(
        call(
            &table,
            &interner,
            "index",
            &[nested.clone(), Value::int(0), Value::int(1)]
        ),
        Value::int(11)
    );
    assert_eq!(
        call(&table, &interner, "index", &[nested.clone()]),
        nested
    );

    let mut entries = BTreeMap::new();
    entries.insert("k".to_string(), Value::Bool(true));
    let map = Value::map(entries);
    assert_eq!(
        call(&table, &interner, "index", &[map, Value::string("k")]),
        Value::Bool(true)
    );
}

#[test]
fn test_index_errors() {
    let list = Value::list(vec![Value::int(1)]);
    assert_eq!(
        index(&[list.clone(), Value::int(5)]),
        Err("index out of range: 5".to_string())
    );
    assert_eq!(
        index(&[list, Value::int(-1)]),
        Err("index out of range: -1".to_string())
    );
    assert_eq!(
        index(&[Value::int(1), Value::int(0)]),
        Err("can't index item of type int with int".to_string())
    );
}

#[test]
fn test_print_spacing() {
    let (interner, table) = setup();
    assert_eq!(
        call(
            &table,
            &interner,
            "print",
            &[Value::int(1), Value::int(2), Value::string("a"), Value::int(3)]
        ),
        Value::string("1 2a3")
    );
    assert_eq!(call(&table, &interner, "print", &[]), Value::string(""));
}
