//! List codec: metadata keys, fan-out integrity, nesting.

use crate::common::*;
use typedkv::{load, persist_list, restore_list, Persistent};

#[test]
fn int64_list_layout() {
    init_tracing();
    let store = MemoryStore::new();
    vec![-44i64, 33, 33].persist(&store, b"test").unwrap();

    assert_eq!(
        store.keys(),
        vec![
            b"\x05\x0dtest:\x050".to_vec(),
            b"\x05\x0dtest:\x051".to_vec(),
            b"\x05\x0dtest:\x052".to_vec(),
            b"\x09l\x0dtest".to_vec(),
            b"\x0et\x0dtest".to_vec(),
        ]
    );
    assert_eq!(store.raw_get(b"\x09l\x0dtest").unwrap(), 3u64.to_le_bytes().to_vec());
    assert_eq!(store.raw_get(b"\x0et\x0dtest").unwrap(), vec![0x05]);
    assert_eq!(
        store.raw_get(b"\x05\x0dtest:\x050").unwrap(),
        (-44i64).to_le_bytes().to_vec()
    );

    assert_eq!(load::<Vec<i64>>(&store, b"test").unwrap(), vec![-44, 33, 33]);
}

#[test]
fn empty_list_writes_only_metadata() {
    let store = MemoryStore::new();
    Vec::<String>::new().persist(&store, b"none").unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.raw_get(b"\x0et\x0dnone").unwrap(), vec![0x00]);
    assert!(load::<Vec<String>>(&store, b"none").unwrap().is_empty());
}

#[test]
fn thousand_element_fanout_keeps_order() {
    let store = MemoryStore::new();
    let values: Vec<i64> = (0..1000).map(|i| i * 7 - 3500).collect();
    persist_list(&values, &store, b"big").unwrap();

    assert_eq!(store.len(), 1002);
    let restored: Vec<i64> = restore_list(&store, b"big").unwrap();
    assert_eq!(restored, values);
}

#[test]
fn string_list_roundtrip() {
    let store = MemoryStore::new();
    let names = vec!["alpha".to_string(), String::new(), "γ".to_string()];
    names.persist(&store, b"names").unwrap();
    assert_eq!(load::<Vec<String>>(&store, b"names").unwrap(), names);
}

#[test]
fn nested_lists_roundtrip() {
    let store = MemoryStore::new();
    let grid = vec![vec![1u8, 2, 3], vec![], vec![4]];
    grid.persist(&store, b"grid").unwrap();

    // Outer element tag is List; each inner list lives under its element key.
    assert_eq!(store.raw_get(b"\x0et\x0dgrid").unwrap(), vec![0x0D]);
    assert!(store.contains(b"\x09l\x0d\x0dgrid:\x0d0"));

    assert_eq!(load::<Vec<Vec<u8>>>(&store, b"grid").unwrap(), grid);
}

#[test]
fn restore_replaces_existing_contents() {
    let store = MemoryStore::new();
    vec![1u32, 2].persist(&store, b"l").unwrap();
    let mut target = vec![9u32, 9, 9, 9];
    target.restore(&store, b"l").unwrap();
    assert_eq!(target, vec![1, 2]);
}

#[test]
fn shrinking_list_reads_only_current_length() {
    let store = MemoryStore::new();
    vec![1i16, 2, 3, 4].persist(&store, b"s").unwrap();
    vec![5i16].persist(&store, b"s").unwrap();

    // Stale element keys remain but are never read.
    assert!(store.contains(b"\x03\x0ds:\x033"));
    assert_eq!(load::<Vec<i16>>(&store, b"s").unwrap(), vec![5]);
}

#[test]
fn missing_list_is_not_found() {
    let store = MemoryStore::new();
    assert!(load::<Vec<u64>>(&store, b"ghost").unwrap_err().is_not_found());
}

#[test]
fn missing_element_fails_restore() {
    let store = MemoryStore::new();
    vec![true, false, true].persist(&store, b"flags").unwrap();
    store.remove(b"\x01\x0dflags:\x011");
    assert!(load::<Vec<bool>>(&store, b"flags").unwrap_err().is_not_found());
}

#[test]
fn restoring_into_wrong_element_type_is_codec_error() {
    let store = MemoryStore::new();
    vec![1.5f64].persist(&store, b"f").unwrap();
    assert!(load::<Vec<i64>>(&store, b"f").unwrap_err().is_codec());
}

#[test]
fn corrupt_length_is_codec_error() {
    let store = MemoryStore::new();
    vec![1u8].persist(&store, b"c").unwrap();
    store.save(b"\x09l\x0dc", &[1, 0]).unwrap();
    assert!(load::<Vec<u8>>(&store, b"c").unwrap_err().is_codec());
}
