//! Concurrency tests for the paper store
//!
//! Concurrent cold-cache callers must share a single reload pass.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tempfile::NamedTempFile;
use papers_api::PaperStore;

fn write_catalog(count: usize) -> NamedTempFile {
    let entries: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"path": ["2023", "May/June", "B.Tech", "III Sem", "Civil"], "name": "Subject Number {i} (CE{i:03}).pdf", "url": "http://x/{i}.pdf"}}"#
            )
        })
        .collect();
    let mut file = NamedTempFile::new().expect("Should create temp file");
    write!(file, "[{}]", entries.join(",")).expect("Should write catalog");
    file
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_cold_start_loads_once() {
    let file = write_catalog(2_000);
    let store = Arc::new(PaperStore::new(file.path(), Duration::from_secs(600)));

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.papers().await })
        })
        .collect();

    let snapshots: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.expect("task should not panic").expect("load should succeed"))
        .collect();

    assert_eq!(store.load_count(), 1);
    assert!(snapshots.iter().all(|s| s.len() == 2_000));
    assert!(snapshots.iter().all(|s| Arc::ptr_eq(s, &snapshots[0])));
}

#[tokio::test]
async fn test_ids_unique_within_generation() {
    let file = write_catalog(250);
    let store = PaperStore::new(file.path(), Duration::from_secs(600));

    let papers = store.papers().await.unwrap();
    let mut ids: Vec<&str> = papers.iter().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 250);
}

#[tokio::test]
async fn test_expired_cache_picks_up_new_file_contents() {
    let file = write_catalog(3);
    let store = PaperStore::new(file.path(), Duration::ZERO);

    assert_eq!(store.papers().await.unwrap().len(), 3);

    std::fs::write(file.path(), "[]").expect("Should overwrite catalog");
    assert_eq!(store.papers().await.unwrap().len(), 0);
    assert_eq!(store.load_count(), 2);
}
