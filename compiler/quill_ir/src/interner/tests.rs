use super::*;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();

    let hello = interner.intern("hello");
    let world = interner.intern("world");
    let hello2 = interner.intern("hello");

    assert_eq!(hello, hello2);
    assert_ne!(hello, world);

    assert_eq!(interner.lookup(hello), "hello");
    assert_eq!(interner.lookup(world), "world");
}

#[test]
fn test_empty_string() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
    assert!(interner.is_empty());
}

#[test]
fn test_get_does_not_insert() {
    let interner = StringInterner::new();
    assert_eq!(interner.get("missing"), None);
    assert_eq!(interner.len(), 1);

    let name = interner.intern("present");
    assert_eq!(interner.get("present"), Some(name));
    assert_eq!(interner.len(), 2);
}

#[test]
fn test_shared_interner() {
    let interner = SharedInterner::new();
    let interner2 = interner.clone();

    let name1 = interner.intern("shared");
    let name2 = interner2.intern("shared");

    assert_eq!(name1, name2);
    assert!(interner.ptr_eq(&interner2));
    assert!(!interner.ptr_eq(&SharedInterner::new()));
}

#[test]
fn test_string_lookup_trait() {
    fn via_trait<L: StringLookup>(lookup: &L, name: Name) -> String {
        lookup.lookup(name).to_owned()
    }

    let interner = SharedInterner::new();
    let name = interner.intern("Title");
    assert_eq!(via_trait(&interner, name), "Title");
    assert_eq!(via_trait(&*interner, name), "Title");
}

#[test]
fn test_concurrent_interning_agrees() {
    let interner = SharedInterner::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let interner = interner.clone();
            std::thread::spawn(move || {
                (0..100)
                    .map(|i| interner.intern(&format!("field{i}")))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<Name>> = handles
        .into_iter()
        .map(|h| h.join().unwrap_or_default())
        .collect();
    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
    assert_eq!(interner.len(), 101);
}

#[test]
fn test_try_lookup_out_of_range() {
    let interner = StringInterner::new();
    let name = interner.intern("only");
    assert_eq!(interner.try_lookup(name), Some("only"));
    assert_eq!(interner.try_lookup(Name::from_raw(name.raw() + 1)), None);
}

#[test]
fn test_interner_ids_are_distinct() {
    let a = StringInterner::new();
    let b = StringInterner::new();
    assert_ne!(a.id(), b.id());

    let shared = SharedInterner::new();
    let clone = shared.clone();
    assert_eq!(shared.id(), clone.id());
}
