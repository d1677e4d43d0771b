//! Scalar codec: exact byte layouts and round trips.

use crate::common::*;
use proptest::prelude::*;
use typedkv::{load, Byte, Persistent};

#[test]
fn int32_layout_is_tag_prefixed_little_endian() {
    init_tracing();
    let store = MemoryStore::new();
    (-388i32).persist(&store, b"test").unwrap();

    assert_eq!(store.keys(), vec![b"\x04test".to_vec()]);
    assert_eq!(store.raw_get(b"\x04test").unwrap(), vec![0x7C, 0xFE, 0xFF, 0xFF]);
    assert_eq!(load::<i32>(&store, b"test").unwrap(), -388);
}

#[test]
fn every_scalar_uses_its_own_tag() {
    let store = MemoryStore::new();
    true.persist(&store, b"k").unwrap();
    (-1i8).persist(&store, b"k").unwrap();
    (-1i16).persist(&store, b"k").unwrap();
    (-1i32).persist(&store, b"k").unwrap();
    (-1i64).persist(&store, b"k").unwrap();
    1u8.persist(&store, b"k").unwrap();
    1u16.persist(&store, b"k").unwrap();
    1u32.persist(&store, b"k").unwrap();
    1u64.persist(&store, b"k").unwrap();
    1.0f32.persist(&store, b"k").unwrap();
    1.0f64.persist(&store, b"k").unwrap();
    "s".to_string().persist(&store, b"k").unwrap();
    Byte(1).persist(&store, b"k").unwrap();

    // Same raw key, thirteen distinct tags, thirteen distinct stored keys.
    let tags: Vec<u8> = store.keys().iter().map(|k| k[0]).collect();
    assert_eq!(
        tags,
        vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0E]
    );
}

#[test]
fn widths_match_tags() {
    let store = MemoryStore::new();
    7i16.persist(&store, b"w").unwrap();
    7u64.persist(&store, b"w").unwrap();
    7.0f32.persist(&store, b"w").unwrap();
    false.persist(&store, b"w").unwrap();

    assert_eq!(store.raw_get(&tagged(TypeTag::Int16, b"w")).unwrap().len(), 2);
    assert_eq!(store.raw_get(&tagged(TypeTag::Uint64, b"w")).unwrap().len(), 8);
    assert_eq!(store.raw_get(&tagged(TypeTag::Float32, b"w")).unwrap().len(), 4);
    assert_eq!(store.raw_get(&tagged(TypeTag::Bool, b"w")).unwrap(), vec![0]);
}

#[test]
fn string_is_stored_as_raw_utf8() {
    let store = MemoryStore::new();
    "héllo wörld".to_string().persist(&store, b"greeting").unwrap();
    assert_eq!(
        store.raw_get(b"\x0cgreeting").unwrap(),
        "héllo wörld".as_bytes().to_vec()
    );
    assert_eq!(load::<String>(&store, b"greeting").unwrap(), "héllo wörld");
}

#[test]
fn empty_string_and_empty_key() {
    let store = MemoryStore::new();
    String::new().persist(&store, b"").unwrap();
    assert!(store.contains(b"\x0c"));
    assert_eq!(load::<String>(&store, b"").unwrap(), "");
}

#[test]
fn overwrite_replaces_previous_value() {
    let store = MemoryStore::new();
    10u32.persist(&store, b"counter").unwrap();
    11u32.persist(&store, b"counter").unwrap();
    assert_eq!(load::<u32>(&store, b"counter").unwrap(), 11);
    assert_eq!(store.len(), 1);
}

#[test]
fn missing_key_is_not_found() {
    let store = MemoryStore::new();
    let err = load::<i64>(&store, b"nothing").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn wrong_tag_reads_a_different_key() {
    let store = MemoryStore::new();
    5i32.persist(&store, b"n").unwrap();
    // Same raw key, different tag: nothing stored there.
    assert!(load::<i64>(&store, b"n").unwrap_err().is_not_found());
}

#[test]
fn wrong_width_is_codec_error() {
    let store = MemoryStore::new();
    store.save(b"\x05short", &[1, 2, 3]).unwrap();
    let err = load::<i64>(&store, b"short").unwrap_err();
    assert!(err.is_codec());
}

#[test]
fn invalid_utf8_is_codec_error() {
    let store = MemoryStore::new();
    store.save(b"\x0cbad", &[0xFF, 0xFE]).unwrap();
    assert!(load::<String>(&store, b"bad").unwrap_err().is_codec());
}

#[test]
fn restore_in_place_keeps_value_on_failure() {
    let store = MemoryStore::new();
    let mut value = 99u16;
    assert!(value.restore(&store, b"absent").is_err());
    assert_eq!(value, 99);
}

#[test]
fn float_specials_roundtrip() {
    let store = MemoryStore::new();
    f64::INFINITY.persist(&store, b"inf").unwrap();
    f64::NAN.persist(&store, b"nan").unwrap();
    (-0.0f32).persist(&store, b"nz").unwrap();

    assert_eq!(load::<f64>(&store, b"inf").unwrap(), f64::INFINITY);
    assert!(load::<f64>(&store, b"nan").unwrap().is_nan());
    assert!(load::<f32>(&store, b"nz").unwrap().is_sign_negative());
}

proptest! {
    #[test]
    fn prop_i64_roundtrip(value: i64, key in proptest::collection::vec(any::<u8>(), 0..16)) {
        let store = MemoryStore::new();
        value.persist(&store, &key).unwrap();
        prop_assert_eq!(load::<i64>(&store, &key).unwrap(), value);
    }

    #[test]
    fn prop_string_roundtrip(value in ".*") {
        let store = MemoryStore::new();
        value.persist(&store, b"s").unwrap();
        prop_assert_eq!(load::<String>(&store, b"s").unwrap(), value);
    }
}
