use dupmatch::duplicates::{evaluate, Stage, Verdict};
use dupmatch::scanner::{FileIdentity, Hasher};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_identity_of_directory_is_invalid() {
    let dir = tempdir().unwrap();
    let identity = FileIdentity::new(dir.path());
    assert!(!identity.is_ok());
    assert_eq!(identity.size(), 0);
    assert_eq!(identity.hash(), None);
}

#[test]
fn test_hash_matches_hasher() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file");
    fs::write(&path, b"some bytes").unwrap();

    let identity = FileIdentity::new(&path);
    assert_eq!(identity.hash(), Some(Hasher::new().full_hash(&path).unwrap()));
}

#[test]
fn test_hash_is_not_recomputed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file");
    fs::write(&path, b"first").unwrap();

    let identity = FileIdentity::new(&path);
    let first = identity.hash();

    // Same length, different bytes: a second read would change the digest.
    fs::write(&path, b"FIRST").unwrap();
    assert_eq!(identity.hash(), first);
    assert_eq!(identity.hash_reads(), 1);
}

#[test]
fn test_truncated_file_becomes_invalid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file");
    fs::write(&path, b"long original content").unwrap();

    let identity = FileIdentity::new(&path);
    fs::write(&path, b"short").unwrap();

    assert_eq!(identity.hash(), None);
    assert!(!identity.is_ok());
}

#[test]
fn test_file_removed_after_listing_is_rejected() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::write(&a, b"content").unwrap();
    fs::write(&b, b"content").unwrap();

    let ia = FileIdentity::new(&a);
    let ib = FileIdentity::new(&b);
    fs::remove_file(&b).unwrap();

    assert_eq!(evaluate(&ia, &ib), Verdict::Rejected(Stage::Hash));
    assert!(!ib.is_ok());
}

#[test]
fn test_take_leaves_invalid_identity() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file");
    fs::write(&path, b"x").unwrap();

    let mut identity = FileIdentity::new(&path);
    let moved = std::mem::take(&mut identity);

    assert!(moved.is_ok());
    assert!(!identity.is_ok());
    assert_eq!(identity.path().as_os_str(), "");
}
