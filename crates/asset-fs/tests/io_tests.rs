use asset_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join(".asset-sync.ledger"));

    io::write_atomic(&path, b"a.png\tlogo-abc\t1700000000\t1\t10\t20\n").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "a.png\tlogo-abc\t1700000000\t1\t10\t20\n");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("ledger");
    fs::write(&file_path, "old line\nanother old line\n").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"").unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "");
}

#[test]
fn test_write_atomic_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("store").join("images").join("logo.png"));

    io::write_atomic(&path, b"\x89PNG").unwrap();

    assert_eq!(fs::read(path.to_native()).unwrap(), b"\x89PNG");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("ledger"));

    io::write_atomic(&path, b"content").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
}

#[test]
fn test_read_bytes_preserves_binary_content() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("pixel.gif");
    let bytes = [0x47, 0x49, 0x46, 0x00, 0xff, 0x0a];
    fs::write(&file_path, bytes).unwrap();

    let content = io::read_bytes(&file_path).unwrap();
    assert_eq!(content, bytes);
}

#[test]
fn test_read_text_nonexistent_file_reports_path() {
    let path = NormalizedPath::new("/nonexistent/ledger.txt");
    let err = io::read_text(&path).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/ledger.txt"));
}

#[test]
fn test_remove_file_if_exists() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("trash");
    fs::write(&file_path, "x").unwrap();
    let path = NormalizedPath::new(&file_path);

    assert!(io::remove_file_if_exists(&path).unwrap());
    assert!(!file_path.exists());

    // Second removal is a no-op, not an error
    assert!(!io::remove_file_if_exists(&path).unwrap());
}
