//! Integration tests for rewrite behaviour observable through the public API

use rstest::rstest;
use valwalk_core::callbacks::increment_integers;
use valwalk_core::{Filter, Rewrite, Walker, WalkerBuilder, try_walk, walk};
use valwalk_value::{Kind, Record, Value, classify};

fn simple(count: i32) -> Record {
    Record::new("Simple")
        .with_field("flag", false)
        .with_field("count", count)
        .with_field("label", "s")
}

mod increment {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case::scalar(Value::from(5), Value::from(6))]
    #[case::record(Value::from(simple(5)), Value::from(simple(6)))]
    #[case::map(Value::map([("a", 5), ("b", 10)]), Value::map([("a", 6), ("b", 11)]))]
    #[case::seq(Value::seq([5, 10]), Value::seq([6, 11]))]
    #[case::mixed_widths(
        Value::seq([Value::I8(1), Value::U64(2)]),
        Value::seq([Value::I8(2), Value::U64(3)])
    )]
    fn increments_every_integer(#[case] value: Value, #[case] expected: Value) {
        let mut value = value;
        walk(&mut value, increment_integers);
        assert_eq!(value, expected);
    }

    #[test]
    fn by_value_root_is_left_alone() {
        let value = Value::from(simple(5));

        let rewrite = Walker::new(increment_integers).go_value(&value).unwrap();

        assert_eq!(rewrite, Rewrite::replace(simple(6)));
        assert_eq!(value, Value::from(simple(5)));
    }
}

mod copy_on_write {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_clone_without_change() {
        let value = Value::from(simple(5));
        let mut walker = Walker::new(|_: &Value, _| Rewrite::Unchanged);

        let rewrite = walker.go_value(&value).unwrap();

        assert!(rewrite.is_unchanged());
        assert_eq!(walker.stats().records_cloned, 0);
    }

    #[test]
    fn one_clone_for_one_changed_field() {
        let value = Value::from(simple(5).with_private("hidden", 9));
        let mut walker = Walker::new(increment_integers);

        let rewrite = walker.go_value(&value).unwrap();

        assert_eq!(walker.stats().records_cloned, 1);
        let copy = rewrite.into_value().unwrap();
        let copy = copy.as_record().unwrap();
        assert_eq!(copy.get("flag"), Some(&Value::from(false)));
        assert_eq!(copy.get("count"), Some(&Value::from(6)));
        assert_eq!(copy.get("label"), Some(&Value::from("s")));
        assert_eq!(copy.get("hidden"), Some(&Value::from(9)));
    }
}

mod sentinel {
    use super::*;
    use pretty_assertions::assert_eq;

    fn holder() -> Value {
        Value::from(
            Record::new("Holder")
                .with_field("any", Value::dynamic(1))
                .with_field("next", Value::ptr(2)),
        )
    }

    #[test]
    fn unchanged_keeps_values() {
        let mut value = holder();
        walk(&mut value, |_, _| Rewrite::Unchanged);
        assert_eq!(value, holder());
    }

    #[test]
    fn explicit_null_is_applied() {
        let mut value = holder();
        walk(&mut value, |value, _| {
            if classify(value).is_leaf() {
                Rewrite::Replace(Value::nil())
            } else {
                Rewrite::Unchanged
            }
        });

        assert_eq!(
            value,
            Value::from(
                Record::new("Holder")
                    .with_field("any", Value::nil())
                    .with_field("next", Value::ptr(Value::nil())),
            )
        );
        assert_ne!(value, holder());
    }
}

mod short_circuit {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn replaced_node_children_are_not_visited() {
        let mut value = Value::from(
            Record::new("Outer")
                .with_field("keep", 1)
                .with_field("inner", simple(5)),
        );
        let mut inside_inner = 0;

        walk(&mut value, |value, depth| {
            if depth == 2 {
                inside_inner += 1;
            }
            match value.as_record() {
                Some(record) if record.type_name() == "Simple" => Rewrite::replace("replaced"),
                _ => Rewrite::Unchanged,
            }
        });

        assert_eq!(inside_inner, 0);
        assert_eq!(
            value,
            Value::from(
                Record::new("Outer")
                    .with_field("keep", 1)
                    .with_field("inner", "replaced"),
            )
        );
    }
}

mod depth {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_record_depths() {
        let mut value = Value::from(
            Record::new("Outer").with_field("inner", Record::new("Inner").with_field("leaf", 1)),
        );
        let mut seen = Vec::new();

        walk(&mut value, |value, depth| {
            seen.push((value.kind(), depth));
            Rewrite::Unchanged
        });

        assert_eq!(seen, [(Kind::Record, 0), (Kind::Record, 1), (Kind::I32, 2)]);
    }

    #[test]
    fn error_stops_traversal() {
        let mut value = Value::seq([Value::seq([1, 2]), Value::from(3)]);
        let mut visited = Vec::new();

        let result = try_walk(&mut value, |value, depth| {
            visited.push(depth);
            match value {
                Value::I32(2) => Err(format!("stopped at depth {depth}")),
                _ => Ok(Rewrite::Unchanged),
            }
        });

        assert_eq!(result, Err("stopped at depth 2".to_string()));
        assert_eq!(visited, [0, 1, 2, 2]);
    }

    #[test]
    fn leaves_only_sees_leaf_depths() {
        let mut value = Value::seq([Value::seq([1]), Value::from(2)]);
        let mut seen = Vec::new();

        let mut walker = WalkerBuilder::new()
            .filter(Filter::LeavesOnly)
            .callback(|_: &Value, depth| {
                seen.push(depth);
                Rewrite::Unchanged
            })
            .build()
            .unwrap();
        walker.go(&mut value).unwrap();
        drop(walker);

        assert_eq!(seen, [2, 1]);
    }
}
