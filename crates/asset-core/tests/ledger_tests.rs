//! Tests for ledger files on disk

use asset_core::{AssetRecord, Error, Ledger, TrashLedger};
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap()
}

fn record(key: &str, identity: &str) -> AssetRecord {
    AssetRecord {
        local_key: key.to_string(),
        remote_identity: identity.to_string(),
        uploaded_at: at(1_700_000_000),
        remote_version: "1700000000".to_string(),
        width: Some(16),
        height: Some(16),
    }
}

#[test]
fn test_missing_ledger_loads_empty() {
    let temp = TempDir::new().unwrap();
    let ledger = Ledger::load(&temp.path().join(".asset-sync.ledger")).unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn test_save_then_load_preserves_order_and_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".asset-sync.ledger");

    let ledger: Ledger = vec![
        record("public/images/z.png", "images/z-00"),
        record("public/images/a.png", "images/a-11"),
    ]
    .into_iter()
    .collect();
    ledger.save(&path).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "public/images/z.png\timages/z-00\t1700000000\t1700000000\t16\t16\n\
         public/images/a.png\timages/a-11\t1700000000\t1700000000\t16\t16\n"
    );

    let loaded = Ledger::load(&path).unwrap();
    let keys: Vec<_> = loaded.records().map(|r| r.local_key.as_str()).collect();
    assert_eq!(keys, vec!["public/images/z.png", "public/images/a.png"]);
    assert_eq!(loaded.get("public/images/a.png"), Some(&record("public/images/a.png", "images/a-11")));
}

#[test]
fn test_save_overwrites_previous_content() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".asset-sync.ledger");
    fs::write(&path, "stale\tcontent\t0\n").unwrap();

    Ledger::new().save(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_absent_dimensions_are_written_as_empty_fields() {
    let mut rec = record("public/images/icon.svg", "images/icon-ff");
    rec.width = None;
    rec.height = None;
    let ledger: Ledger = std::iter::once(rec).collect();

    assert_eq!(
        ledger.render(),
        "public/images/icon.svg\timages/icon-ff\t1700000000\t1700000000\t\t\n"
    );
}

#[test]
fn test_short_lines_from_older_writers_are_accepted() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".asset-sync.ledger");
    fs::write(&path, "public/images/a.png\timages/a-11\t1700000000\r\n\n").unwrap();

    let ledger = Ledger::load(&path).unwrap();
    let rec = ledger.get("public/images/a.png").unwrap();
    assert_eq!(rec.remote_version, "");
    assert_eq!(rec.width, None);
    assert_eq!(rec.uploaded_at, at(1_700_000_000));
}

#[rstest]
#[case::too_few_fields("a.png\tidentity\n", 1)]
#[case::bad_timestamp("a.png\tidentity\tyesterday\t1\t\t\n", 1)]
#[case::bad_width("a.png\ta-1\t0\t1\t\t\nb.png\tb-1\t0\t1\twide\t\n", 2)]
#[case::too_many_fields("a.png\ta-1\t0\t1\t2\t3\textra\n", 1)]
fn test_malformed_line_reports_line_number(#[case] content: &str, #[case] expected_line: usize) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".asset-sync.ledger");
    fs::write(&path, content).unwrap();

    match Ledger::load(&path) {
        Err(Error::LedgerParse { path: reported, line, .. }) => {
            assert_eq!(reported, path);
            assert_eq!(line, expected_line);
        }
        other => panic!("expected LedgerParse, got {:?}", other),
    }
}

#[test]
fn test_trash_keeps_duplicates_in_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".asset-sync.ledger.trash");

    let trash: TrashLedger = vec![
        record("public/images/a.png", "images/a-11"),
        record("public/images/a.png", "images/a-22"),
    ]
    .into_iter()
    .collect();
    trash.save(&path).unwrap();

    let loaded = TrashLedger::load(&path).unwrap();
    let identities: Vec<_> = loaded.records().iter().map(|r| r.remote_identity.as_str()).collect();
    assert_eq!(identities, vec!["images/a-11", "images/a-22"]);
}

#[test]
fn test_clear_trash_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".asset-sync.ledger.trash");
    fs::write(&path, "").unwrap();

    assert!(TrashLedger::clear_file(&path).unwrap());
    assert!(!path.exists());
    assert!(!TrashLedger::clear_file(&path).unwrap());
}
