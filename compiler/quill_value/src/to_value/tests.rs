use super::*;
use crate::RecordValue;
use pretty_assertions::assert_eq;

struct Item {
    name: &'static str,
    price: f64,
}

impl ToValue for Item {
    fn to_value(&self, interner: &StringInterner) -> Value {
        Value::record(
            RecordValue::builder(interner)
                .field("Name", self.name)
                .field("Price", self.price)
                .build(),
        )
    }
}

#[test]
fn test_scalars() {
    let interner = StringInterner::new();
    assert_eq!(7u8.to_value(&interner), Value::int(7));
    assert_eq!((-7i32).to_value(&interner), Value::int(-7));
    assert_eq!(1.5f32.to_value(&interner), Value::float(1.5));
    assert_eq!(true.to_value(&interner), Value::Bool(true));
    assert_eq!("s".to_value(&interner), Value::string("s"));
    assert_eq!(String::from("s").to_value(&interner), Value::string("s"));
}

#[test]
fn test_wide_integers() {
    let interner = StringInterner::new();
    assert_eq!(42usize.to_value(&interner), Value::int(42));
    assert!(matches!(u64::MAX.to_value(&interner), Value::Float(_)));
}

#[test]
fn test_sequences() {
    let interner = StringInterner::new();
    let expected = Value::list(vec![Value::int(1), Value::int(2), Value::int(3)]);
    assert_eq!(vec![1, 2, 3].to_value(&interner), expected);
    assert_eq!([1, 2, 3].to_value(&interner), expected);
    assert_eq!([1, 2, 3][..].to_value(&interner), expected);
}

#[test]
fn test_host_record() {
    let interner = StringInterner::new();
    let items = vec![
        Item {
            name: "pen",
            price: 1.25,
        },
        Item {
            name: "ink",
            price: 3.0,
        },
    ];
    let value = items.to_value(&interner);
    assert_eq!(value.display_value(), "[{pen 1.25} {ink 3}]");

    let first = &value.as_list().unwrap_or_default()[0];
    let price = first.project(&[interner.intern("Price")], &interner);
    assert_eq!(price, Ok(Value::float(1.25)));
}

#[test]
fn test_map() {
    let interner = StringInterner::new();
    let mut map = BTreeMap::new();
    map.insert("b".to_string(), 2);
    map.insert("a".to_string(), 1);
    assert_eq!(map.to_value(&interner).display_value(), "map[a:1 b:2]");
}
