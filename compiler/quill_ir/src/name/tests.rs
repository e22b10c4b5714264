use super::*;
use std::collections::HashSet;

#[test]
fn raw_round_trip() {
    let name = Name::from_raw(42);
    assert_eq!(name.raw(), 42);
    assert_eq!(name.index(), 42);
}

#[test]
fn default_is_empty() {
    assert_eq!(Name::default(), Name::EMPTY);
    assert_eq!(Name::EMPTY.raw(), 0);
}

#[test]
fn names_hash_by_value() {
    let mut set = HashSet::new();
    set.insert(Name::from_raw(1));
    set.insert(Name::from_raw(1));
    set.insert(Name::from_raw(2));
    assert_eq!(set.len(), 2);
}

#[test]
fn debug_shows_index() {
    assert_eq!(format!("{:?}", Name::from_raw(7)), "Name(7)");
}
