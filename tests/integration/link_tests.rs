use dupmatch::duplicates::{evaluate, DuplicateMatcher, Verdict};
use dupmatch::scanner::{FileIdentity, FileKey};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_hardlink_is_equal_without_hashing() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    let hardlink = dir.path().join("hardlink.txt");

    File::create(&original)
        .unwrap()
        .write_all(b"identical content")
        .unwrap();

    if let Err(e) = fs::hard_link(&original, &hardlink) {
        eprintln!("Skipping hardlink test: failed to create hardlink: {}", e);
        return;
    }

    let a = FileIdentity::new(&original);
    let b = FileIdentity::new(&hardlink);
    let verdict = evaluate(&a, &b);

    assert!(verdict.is_equal());
    if FileKey::detects_hardlinks() {
        assert_eq!(verdict, Verdict::Equal { via_equivalence: true });
        assert_eq!(a.hash_reads(), 0);
        assert_eq!(b.hash_reads(), 0);
    }
}

#[test]
fn test_hardlink_across_directories_reported() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    let original = a.path().join("data.bin");
    let linked = b.path().join("linked.bin");

    fs::write(&original, b"shared by inode").unwrap();
    if fs::hard_link(&original, &linked).is_err() {
        return;
    }

    let report = DuplicateMatcher::with_defaults().match_pair(a.path(), b.path());
    assert_eq!(report.pairs.len(), 1);
    if FileKey::detects_hardlinks() {
        assert_eq!(report.stats.equivalent_hits, 1);
        assert_eq!(report.stats.files_hashed, 0);
    }
}

#[cfg(unix)]
#[test]
fn test_symlink_to_file_matches_target() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    let target = a.path().join("target.txt");
    fs::write(&target, b"pointed at").unwrap();
    std::os::unix::fs::symlink(&target, b.path().join("link.txt")).unwrap();

    let report = DuplicateMatcher::with_defaults().match_pair(a.path(), b.path());

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].duplicate, b.path().join("link.txt"));
    assert_eq!(report.stats.equivalent_hits, 1);
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_ignored() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    fs::write(a.path().join("real"), b"x").unwrap();
    std::os::unix::fs::symlink(b.path().join("gone"), b.path().join("dangling")).unwrap();

    let report = DuplicateMatcher::with_defaults().match_pair(a.path(), b.path());

    assert!(report.is_success());
    assert!(report.pairs.is_empty());
}
