//! Property-based tests for the round-trip guarantees: typed data through
//! `to_string`/`from_str`, and decoded tables through `encode`/`decode`.

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_ckt::{decode, encode, from_str, to_string, Indent, Table, Value};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1e15f64..1e15f64).prop_map(Value::Number),
        any::<i32>().prop_map(Value::from),
        "\\PC{0,12}".prop_map(Value::String),
    ]
}

fn table_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6)
                .prop_map(|items| Value::Table(items.into_iter().collect())),
            prop::collection::vec(("[a-z0-9_ ]{0,6}", inner), 0..6)
                .prop_map(|entries| Value::Table(entries.into_iter().collect())),
        ]
    })
}

fn root_table() -> impl Strategy<Value = Table> {
    prop::collection::vec(("[a-z]{1,4}|[0-9]{1,2}", table_value()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    name: String,
    count: u32,
    ratio: f64,
    flags: Vec<bool>,
    note: Option<String>,
}

proptest! {
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_safe_i64(n in -(1i64 << 53)..(1i64 << 53)) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_f64(n in any::<f64>().prop_filter("finite", |n| n.is_finite())) {
        let text = to_string(&n).unwrap();
        let back: f64 = from_str(&text).unwrap();
        prop_assert_eq!(back, n);
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_string(s in "\\PC*") {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_vec_string(v in prop::collection::vec("\\PC{0,8}", 0..8)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }

    #[test]
    fn prop_map(m in prop::collection::btree_map("[a-z]{1,8}", any::<i32>(), 0..8)) {
        prop_assert!(roundtrip(&m));
    }

    #[test]
    fn prop_record(
        name in "\\PC{0,10}",
        count in any::<u32>(),
        ratio in -1e9f64..1e9f64,
        flags in prop::collection::vec(any::<bool>(), 0..5),
        note in proptest::option::of("[a-z ]{0,10}"),
    ) {
        let record = Record { name, count, ratio, flags, note };
        prop_assert!(roundtrip(&record));
    }

    #[test]
    fn prop_decoded_tables_are_stable(table in root_table()) {
        let canonical = decode(&encode(&table, Indent::None).unwrap()).unwrap();
        for indent in [Indent::None, Indent::Spaces(2), Indent::Text("\t".into())] {
            let text = encode(&canonical, indent).unwrap();
            prop_assert_eq!(&decode(&text).unwrap(), &canonical, "re-reading {:?}", text);
        }
    }

    #[test]
    fn prop_decoding_never_panics(input in "\\PC{0,40}") {
        let _ = decode(&input);
    }

    #[test]
    fn prop_reserved_key_never_stored(keys in prop::collection::vec("__proto__|[a-z]{1,3}", 0..8)) {
        let table: Table = keys.into_iter().map(|k| (k, Value::Null)).collect();
        prop_assert!(!table.contains_key("__proto__"));
    }
}

#[test]
fn test_sorted_map_of_lists() {
    let mut map: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    map.insert("a".into(), vec![]);
    map.insert("b".into(), vec![1]);
    assert!(roundtrip(&map));
}
