//! Splicing files on disk.

use splice_blocks::{Boundary, BlockSpec, Error, locate_in_file, splice_file};
use splice_fs::{LockedFile, NormalizedPath};
use std::fs;
use tempfile::tempdir;

const SOURCE: &str = "head\nstart {\n  body\n}\ntail\n";

fn spec() -> BlockSpec {
    BlockSpec::closing_line("block", "start {", "}", 1, "replaced\n")
}

#[test]
fn splice_file_writes_result() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.tsx");
    fs::write(&file_path, SOURCE).unwrap();

    let report = splice_file(&NormalizedPath::new(&file_path), &[spec()], false).unwrap();

    assert!(report.written);
    assert_eq!(report.original, SOURCE);
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "head\nreplaced\ntail\n");
    assert_eq!(report.updated(), "head\nreplaced\ntail\n");
    assert_eq!(report.outcome.line_delta(), -2);
}

#[test]
fn dry_run_leaves_file_alone() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.tsx");
    fs::write(&file_path, SOURCE).unwrap();

    let report = splice_file(&NormalizedPath::new(&file_path), &[spec()], true).unwrap();

    assert!(!report.written);
    assert_eq!(report.updated(), "head\nreplaced\ntail\n");
    assert_eq!(fs::read_to_string(&file_path).unwrap(), SOURCE);
}

#[test]
fn unresolved_end_leaves_file_alone() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.tsx");
    fs::write(&file_path, SOURCE).unwrap();
    let never_closes = BlockSpec::closing_line("block", "start {", "};", 0, "x\n");

    let result = splice_file(&NormalizedPath::new(&file_path), &[never_closes], false);

    assert!(matches!(
        result,
        Err(Error::BlockNotFound {
            boundary: Boundary::End,
            ..
        })
    ));
    assert_eq!(fs::read_to_string(&file_path).unwrap(), SOURCE);
}

#[test]
fn empty_file_is_rejected_and_untouched() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("empty.tsx");
    fs::write(&file_path, "").unwrap();

    let result = splice_file(&NormalizedPath::new(&file_path), &[spec()], false);

    assert!(matches!(result, Err(Error::EmptyDocument)));
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "");
}

#[test]
fn second_run_fails_on_spliced_file() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.tsx");
    fs::write(&file_path, SOURCE).unwrap();
    let path = NormalizedPath::new(&file_path);

    splice_file(&path, &[spec()], false).unwrap();
    let again = splice_file(&path, &[spec()], false);

    assert!(matches!(
        again,
        Err(Error::BlockNotFound {
            boundary: Boundary::Start,
            ..
        })
    ));
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "head\nreplaced\ntail\n");
}

#[test]
fn missing_file_is_fs_error() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("nope.tsx"));

    let result = splice_file(&path, &[spec()], false);

    assert!(matches!(result, Err(Error::Fs(_))));
}

#[cfg(unix)]
#[test]
fn locked_target_is_not_spliced() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.tsx");
    fs::write(&file_path, SOURCE).unwrap();
    let path = NormalizedPath::new(&file_path);

    let _held = LockedFile::open(&path).unwrap();
    let result = splice_file(&path, &[spec()], false);

    assert!(matches!(
        result,
        Err(Error::Fs(splice_fs::Error::LockFailed { .. }))
    ));
    assert_eq!(fs::read_to_string(&file_path).unwrap(), SOURCE);
}

#[cfg(unix)]
#[test]
fn dry_run_does_not_need_the_lock() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.tsx");
    fs::write(&file_path, SOURCE).unwrap();
    let path = NormalizedPath::new(&file_path);

    let _held = LockedFile::open(&path).unwrap();
    let report = splice_file(&path, &[spec()], true).unwrap();

    assert!(!report.written);
    assert_eq!(report.updated(), "head\nreplaced\ntail\n");
    assert_eq!(fs::read_to_string(&file_path).unwrap(), SOURCE);
}

#[cfg(unix)]
#[test]
fn dry_run_reads_read_only_target() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.tsx");
    fs::write(&file_path, SOURCE).unwrap();
    fs::set_permissions(&file_path, fs::Permissions::from_mode(0o444)).unwrap();

    let report = splice_file(&NormalizedPath::new(&file_path), &[spec()], true).unwrap();

    assert!(!report.written);
    assert_eq!(fs::read_to_string(&file_path).unwrap(), SOURCE);
}

#[test]
fn locate_in_file_reports_spans() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.tsx");
    fs::write(&file_path, SOURCE).unwrap();

    let spans = locate_in_file(&NormalizedPath::new(&file_path), &[spec()]).unwrap();

    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].first_line(), spans[0].last_line()), (2, 4));
    assert_eq!(fs::read_to_string(&file_path).unwrap(), SOURCE);
}
