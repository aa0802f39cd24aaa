//! Integration tests for walking a map of records linked by pointers
//!
//! Prints the structure, increments every integer and prints it again.

use std::path::PathBuf;

use valwalk_core::callbacks::{increment_integers, print_kinds, print_values};
use valwalk_core::{WalkConfig, Walker, WalkerBuilder};
use valwalk_value::{Key, Ptr, Record, Value};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn nested_struct(int: i32, nested: Value) -> Record {
    Record::new("NestedStruct")
        .with_field("int", int)
        .with_field("nested", nested)
}

/// `{1: NestedStruct { int: 10, nested: &NestedStruct { int: 20 } }, 2: NestedStruct {}}`
fn demo_object() -> (Value, Ptr) {
    let shared = Ptr::new(Value::from(nested_struct(20, Value::null_ptr())));
    let object = Value::map([
        (1, nested_struct(10, Value::from(shared.clone()))),
        (2, nested_struct(0, Value::null_ptr())),
    ]);
    (object, shared)
}

fn print(value: &mut Value, marker: &str) -> String {
    let mut out = Vec::new();
    Walker::try_new(print_values(&mut out, marker))
        .go(value)
        .unwrap();
    String::from_utf8(out).unwrap()
}

mod demo {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prints_before_and_after_increment() {
        let (mut object, _) = demo_object();

        let before = print(&mut object, ">>>>");
        let mut walker = Walker::new(increment_integers);
        walker.go(&mut object).unwrap();
        let after = print(&mut object, ">>>>");

        insta::assert_snapshot!(before, @r"
        {1: NestedStruct { int: 10, nested: &NestedStruct { int: 20, nested: nil } }, 2: NestedStruct { int: 0, nested: nil }} (map)
        >>>> NestedStruct { int: 10, nested: &NestedStruct { int: 20, nested: nil } } (record)
        >>>>>>>> 10 (i32)
        >>>>>>>> NestedStruct { int: 20, nested: nil } (record)
        >>>>>>>>>>>> 20 (i32)
        >>>> NestedStruct { int: 0, nested: nil } (record)
        >>>>>>>> 0 (i32)
        ");
        insta::assert_snapshot!(after, @r"
        {1: NestedStruct { int: 11, nested: &NestedStruct { int: 21, nested: nil } }, 2: NestedStruct { int: 1, nested: nil }} (map)
        >>>> NestedStruct { int: 11, nested: &NestedStruct { int: 21, nested: nil } } (record)
        >>>>>>>> 11 (i32)
        >>>>>>>> NestedStruct { int: 21, nested: nil } (record)
        >>>>>>>>>>>> 21 (i32)
        >>>> NestedStruct { int: 1, nested: nil } (record)
        >>>>>>>> 1 (i32)
        ");
    }

    #[test]
    fn map_records_are_copied_pointees_are_not() {
        let (mut object, shared) = demo_object();

        let mut walker = Walker::new(increment_integers);
        walker.go(&mut object).unwrap();

        // Both map values are records behind a non-settable slot.
        assert_eq!(walker.stats().records_cloned, 2);
        assert_eq!(walker.stats().callbacks, 7);
        // The copy of entry 1 still shares the original pointer cell.
        assert_eq!(*shared.borrow(), Value::from(nested_struct(21, Value::null_ptr())));
        let Value::Map(map) = &object else {
            panic!("root should still be a map");
        };
        assert_eq!(
            map.get(&Key::from(1i32)),
            Some(Value::from(nested_struct(11, Value::from(shared.clone()))))
        );
    }

    #[test]
    fn printing_twice_is_identical() {
        let (mut object, _) = demo_object();

        assert_eq!(print(&mut object, ">>>>"), print(&mut object, ">>>>"));
    }

    #[test]
    fn shared_pointee_is_visited_per_reference() {
        let shared = Ptr::new(Value::from(5));
        let mut object = Value::seq([Value::from(shared.clone()), Value::from(shared.clone())]);

        valwalk_core::walk(&mut object, increment_integers);

        assert_eq!(*shared.borrow(), Value::from(7));
    }
}

mod config_driven {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leaves_only_from_file() {
        let config = WalkConfig::from_file(fixtures_dir().join("leaves_only.json")).unwrap();
        let (mut object, _) = demo_object();

        let mut out = Vec::new();
        let mut walker = WalkerBuilder::new()
            .config(&config)
            .try_callback(print_kinds(&mut out, &config.indent_marker))
            .build()
            .unwrap();
        walker.go(&mut object).unwrap();
        drop(walker);

        assert_eq!(String::from_utf8(out).unwrap(), "     i32\n       i32\n     i32\n");
    }

    #[test]
    fn nodes_only_from_file() {
        let config = WalkConfig::from_file(fixtures_dir().join("nodes_only.json")).unwrap();
        let (mut object, _) = demo_object();

        let mut out = Vec::new();
        let mut walker = WalkerBuilder::new()
            .config(&config)
            .try_callback(print_kinds(&mut out, &config.indent_marker))
            .build()
            .unwrap();
        walker.go(&mut object).unwrap();
        drop(walker);

        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
        map
        >>>> record
        >>>>>>>> record
        >>>> record
        ");
    }
}
