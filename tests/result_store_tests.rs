//! Consolidation semantics of the JSON file result store.

use std::path::Path;

use tempfile::TempDir;

use leakhound::{JsonFileResultStore, ResultRecord, ResultStore};

fn record(sha: &str, filepath: &str) -> ResultRecord {
    ResultRecord {
        organization_name: "acme".into(),
        repository_name: "widgets".into(),
        commit_sha: sha.into(),
        filepath: filepath.into(),
        username: "Jane Dev".into(),
        email: "jane@acme.example".into(),
        commit_time: "2016-06-12T10:01:02+03:00".into(),
        branches_names: None,
        blob_url: None,
    }
}

fn read_records(path: &Path) -> Vec<ResultRecord> {
    let contents = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&contents).unwrap()
}

fn backup_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("results.json."))
        .collect()
}

#[tokio::test]
async fn test_first_write_creates_store_and_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("results.json");
    let store = JsonFileResultStore::new(&path);

    let written = store.write(&[record("a1", "x.txt")], false).await.unwrap();

    assert_eq!(written, 1);
    assert_eq!(read_records(&path).len(), 1);
}

#[tokio::test]
async fn test_empty_write_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    let store = JsonFileResultStore::new(&path);

    let written = store.write(&[], false).await.unwrap();

    assert_eq!(written, 0);
    assert!(read_records(&path).is_empty());
}

#[tokio::test]
async fn test_non_consolidated_write_backs_up_previous_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    let store = JsonFileResultStore::new(&path);

    store
        .write(&[record("a1", "x.txt"), record("a2", "y.txt")], false)
        .await
        .unwrap();
    store.write(&[record("b1", "z.txt")], false).await.unwrap();

    // Fresh store holds only the new run.
    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].commit_sha, "b1");

    // The previous run survived under a timestamped name.
    let backups = backup_files(dir.path());
    assert_eq!(backups.len(), 1);
    let backup_records = read_records(&dir.path().join(&backups[0]));
    assert_eq!(backup_records.len(), 2);
}

#[tokio::test]
async fn test_consolidated_write_appends_to_previous_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    let store = JsonFileResultStore::new(&path);

    store
        .write(&[record("a1", "x.txt"), record("a2", "y.txt")], false)
        .await
        .unwrap();
    let written = store.write(&[record("b1", "z.txt")], true).await.unwrap();

    assert_eq!(written, 1, "count covers the new records only");
    assert_eq!(read_records(&path).len(), 3);
    assert!(backup_files(dir.path()).is_empty());
}

#[tokio::test]
async fn test_consolidated_write_against_empty_destination_creates_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    let store = JsonFileResultStore::new(&path);

    let written = store.write(&[record("a1", "x.txt")], true).await.unwrap();

    assert_eq!(written, 1);
    assert_eq!(read_records(&path).len(), 1);
}

#[tokio::test]
async fn test_round_trip_preserves_record_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.json");
    let store = JsonFileResultStore::new(&path);

    let mut original = record("a1", "config/secrets.yml");
    original.branches_names = Some(vec!["main".into(), "dev".into()]);
    original.blob_url = Some("https://github.com/acme/widgets/blob/a1/config/secrets.yml".into());
    store.write(&[original], false).await.unwrap();

    let records = read_records(&path);
    assert_eq!(records[0].filepath, "config/secrets.yml");
    assert_eq!(
        records[0].branches_names.as_deref(),
        Some(&["main".to_string(), "dev".to_string()][..])
    );
    assert!(records[0].blob_url.as_deref().unwrap().ends_with("secrets.yml"));
}
