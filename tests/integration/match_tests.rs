use dupmatch::duplicates::{
    DuplicateMatcher, DuplicatePair, EmptyFilePolicy, MatchFailure, MatcherConfig,
};
use dupmatch::scanner::WalkerConfig;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn write(path: &std::path::Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

#[test]
fn test_hello_world_single_pair() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write(&a.path().join("f1"), b"hello");
    write(&a.path().join("f2"), b"world");
    write(&b.path().join("g1"), b"hello");

    let report = DuplicateMatcher::with_defaults().match_pair(a.path(), b.path());

    assert!(report.is_success());
    assert_eq!(
        report.pairs,
        vec![DuplicatePair::new(a.path().join("f1"), b.path().join("g1"))]
    );
}

#[test]
fn test_same_directory_three_entries() {
    let a = tempdir().unwrap();
    for name in ["x", "y", "z"] {
        write(&a.path().join(name), name.as_bytes());
    }

    let report = DuplicateMatcher::with_defaults().match_pair(a.path(), a.path());

    assert!(report.is_success());
    assert!(report.same_directory);
    assert_eq!(report.pairs.len(), 3);
    for (pair, name) in report.pairs.iter().zip(["x", "y", "z"]) {
        assert_eq!(pair.source, a.path().join(name));
        assert_eq!(pair.source, pair.duplicate);
    }
}

#[test]
fn test_same_directory_through_different_spelling() {
    let a = tempdir().unwrap();
    fs::create_dir(a.path().join("sub")).unwrap();
    write(&a.path().join("one"), b"1");

    let dotted = a.path().join("sub").join("..");
    let report = DuplicateMatcher::with_defaults().match_pair(a.path(), &dotted);

    assert!(report.is_success());
    assert!(report.same_directory);
    assert_eq!(report.pairs.len(), 1);
}

#[test]
fn test_empty_files_excluded_by_default() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write(&a.path().join("empty"), b"");
    write(&b.path().join("empty"), b"");
    write(&a.path().join("one"), b"1");
    write(&b.path().join("one"), b"1");

    let report = DuplicateMatcher::with_defaults().match_pair(a.path(), b.path());

    assert!(report.is_success());
    assert_eq!(
        report.pairs,
        vec![DuplicatePair::new(a.path().join("one"), b.path().join("one"))]
    );
}

#[test]
fn test_empty_files_included_when_requested() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write(&a.path().join("empty"), b"");
    write(&b.path().join("empty"), b"");

    let config = MatcherConfig::default().with_empty_files(EmptyFilePolicy::Include);
    let report = DuplicateMatcher::new(config).match_pair(a.path(), b.path());

    assert_eq!(
        report.pairs,
        vec![DuplicatePair::new(
            a.path().join("empty"),
            b.path().join("empty")
        )]
    );
}

#[test]
fn test_plain_file_argument_fails() {
    let a = tempdir().unwrap();
    let plain = a.path().join("plain.txt");
    write(&plain, b"data");

    let matcher = DuplicateMatcher::with_defaults();

    let report = matcher.match_pair(&plain, a.path());
    assert!(!report.is_success());
    assert!(report.pairs.is_empty());
    assert_eq!(report.failure, Some(MatchFailure::NotADirectory(plain.clone())));

    let report = matcher.match_pair(a.path(), &plain);
    assert!(!report.is_success());
    assert!(report.pairs.is_empty());
}

#[test]
fn test_no_duplicates_is_success() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write(&a.path().join("a"), b"alpha");
    write(&b.path().join("b"), b"bravo-longer");

    let report = DuplicateMatcher::with_defaults().match_pair(a.path(), b.path());

    assert!(report.is_success());
    assert!(report.pairs.is_empty());
    assert_eq!(report.stats.comparisons, 0);
    assert_eq!(report.stats.files_hashed, 0);
}

#[test]
fn test_size_match_different_content_hashes_both() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write(&a.path().join("a"), b"aaaa");
    write(&b.path().join("b"), b"bbbb");

    let report = DuplicateMatcher::with_defaults().match_pair(a.path(), b.path());

    assert!(report.pairs.is_empty());
    assert_eq!(report.stats.comparisons, 1);
    assert_eq!(report.stats.hash_rejections, 1);
    assert_eq!(report.stats.files_hashed, 2);
}

#[test]
fn test_pair_order_follows_source_then_group() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write(&a.path().join("1"), b"same");
    write(&a.path().join("2"), b"same");
    write(&b.path().join("x"), b"same");
    write(&b.path().join("y"), b"same");

    let report = DuplicateMatcher::with_defaults().match_pair(a.path(), b.path());

    let expected = vec![
        DuplicatePair::new(a.path().join("1"), b.path().join("x")),
        DuplicatePair::new(a.path().join("1"), b.path().join("y")),
        DuplicatePair::new(a.path().join("2"), b.path().join("x")),
        DuplicatePair::new(a.path().join("2"), b.path().join("y")),
    ];
    assert_eq!(report.pairs, expected);
    // Four identities, each read exactly once.
    assert_eq!(report.stats.files_hashed, 4);
}

#[test]
fn test_recursive_matching() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    fs::create_dir_all(a.path().join("deep/er")).unwrap();
    write(&a.path().join("deep/er/nested"), b"nested content");
    write(&b.path().join("flat"), b"nested content");

    let shallow = DuplicateMatcher::with_defaults().match_pair(a.path(), b.path());
    assert!(shallow.pairs.is_empty());

    let config = MatcherConfig::default().with_walker_config(WalkerConfig {
        recursive: true,
        ..Default::default()
    });
    let deep = DuplicateMatcher::new(config).match_pair(a.path(), b.path());
    assert_eq!(
        deep.pairs,
        vec![DuplicatePair::new(
            a.path().join("deep/er/nested"),
            b.path().join("flat")
        )]
    );
}

#[test]
fn test_ignore_patterns_exclude_files() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    write(&a.path().join("keep.txt"), b"k");
    write(&a.path().join("drop.tmp"), b"d");
    write(&b.path().join("keep.txt"), b"k");
    write(&b.path().join("drop.tmp"), b"d");

    let config = MatcherConfig::default().with_walker_config(WalkerConfig {
        ignore_patterns: vec!["*.tmp".to_string()],
        ..Default::default()
    });
    let report = DuplicateMatcher::new(config).match_pair(a.path(), b.path());

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.pairs[0].source, a.path().join("keep.txt"));
}
