//! Pooled execution and `typedkv.toml` handling.

use crate::common::*;
use std::sync::Arc;
use tempfile::TempDir;
use typedkv::{fields, Field, PersistConfig, Persister, Record, CONFIG_FILE_NAME};

#[derive(Debug, Default, PartialEq)]
struct Reading {
    sensor: Option<String>,
    samples: Option<Vec<i32>>,
}

impl Record for Reading {
    fn fields() -> Vec<Field<Self>> {
        fields![Reading { sensor, samples }]
    }
}

fn persister(threads: usize, prefix: &str) -> Persister {
    Persister::new(PersistConfig {
        worker_threads: Some(threads),
        thread_name_prefix: prefix.to_string(),
    })
    .unwrap()
}

#[test]
fn fanout_runs_on_named_pool_threads() {
    init_tracing();
    let persister = persister(4, "fan");
    let store = RecordingStore::new();
    let values: Vec<u16> = (0..256).collect();

    persister.persist(&values, &store, b"v").unwrap();

    let threads = store.threads.lock();
    assert!(!threads.is_empty());
    assert!(threads.len() <= 4);
    for name in threads.iter() {
        assert!(name.starts_with("fan-"), "saved from {}", name);
    }
}

#[test]
fn persister_roundtrip_matches_direct_calls() {
    let persister = persister(2, "rt");
    let store = MemoryStore::new();
    let values: Vec<Vec<i64>> = (0..20).map(|i| (0..i).collect()).collect();

    persister.persist(&values, &store, b"tri").unwrap();
    let restored: Vec<Vec<i64>> = persister.load(&store, b"tri").unwrap();
    assert_eq!(restored, values);

    let direct: Vec<Vec<i64>> = typedkv::load(&store, b"tri").unwrap();
    assert_eq!(direct, values);
}

#[test]
fn persister_records() {
    let persister = persister(2, "rec");
    let store = MemoryStore::new();
    let reading = Reading {
        sensor: Some("t-1".to_string()),
        samples: Some(vec![20, 21, 19]),
    };
    assert!(persister
        .persist_record("r1", &reading, &store)
        .iter()
        .all(|o| o.is_ok()));

    let mut restored = Reading::default();
    let mut errors = 0;
    persister.restore_aggregate("r1", &mut restored, &store, |_, _| errors += 1);
    assert_eq!(errors, 0);
    assert_eq!(restored, reading);
}

#[test]
fn persister_is_shareable_across_threads() {
    let persister = persister(2, "shared");
    let store = Arc::new(MemoryStore::new());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let persister = persister.clone();
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let key = format!("thread-{}", t);
                let values: Vec<u32> = (0..100).map(|i| i * t).collect();
                persister.persist(&values, store.as_ref(), key.as_bytes()).unwrap();
                let restored: Vec<u32> = persister.load(store.as_ref(), key.as_bytes()).unwrap();
                assert_eq!(restored, values);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.len(), 4 * 102);
}

#[test]
fn open_writes_default_config() {
    let dir = TempDir::new().unwrap();
    let persister = Persister::open(dir.path()).unwrap();
    let written = std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(written, PersistConfig::default_toml());
    assert_eq!(persister.config().thread_name_prefix, "typedkv-worker");
}

#[test]
fn open_honours_edited_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "worker_threads = 3\nthread_name_prefix = \"edited\"\n",
    )
    .unwrap();
    let persister = Persister::open(dir.path()).unwrap();
    assert_eq!(persister.threads(), 3);
    assert_eq!(persister.config().thread_name_prefix, "edited");
}

#[test]
fn open_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "worker_threads = 0\n").unwrap();
    let err = Persister::open(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
