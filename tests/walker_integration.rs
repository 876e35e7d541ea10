//! Traversal behavior: ordering, laziness, error aggregation.

use filesift::{classify_parallel, ClassificationPipeline, Finding, Walker};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn mixed_tree_yields_documented_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"alpha\n").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/b.py"), b"print('b')\n").unwrap();
    fs::write(dir.path().join("sub/.hidden"), b"h\n").unwrap();

    let pipeline = ClassificationPipeline::new().unwrap();
    let findings: Vec<Finding> =
        Walker::new(&pipeline, vec![dir.path().to_path_buf()]).collect();

    let rel: Vec<PathBuf> = findings
        .iter()
        .map(|f| f.path.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        rel,
        vec![
            PathBuf::from("a.txt"),
            PathBuf::from("sub/.hidden"),
            PathBuf::from("sub/b.py"),
        ]
    );
    assert!(findings.iter().all(|f| !f.is_error()));
}

#[test]
fn walk_is_lazy_and_stoppable() {
    let dir = tempdir().unwrap();
    for i in 0..100 {
        fs::write(dir.path().join(format!("file{i:03}.txt")), b"x\n").unwrap();
    }

    let pipeline = ClassificationPipeline::new().unwrap();
    let mut walker = Walker::new(&pipeline, vec![dir.path().to_path_buf()]);

    let first = walker.next().unwrap();
    assert_eq!(first.path.file_name().unwrap(), "file000.txt");
    // Dropping the walker mid-tree is the early-termination contract.
    drop(walker);
}

#[cfg(unix)]
#[test]
fn symlink_cycle_is_classified_not_followed() {
    let dir = tempdir().unwrap();
    let inner = dir.path().join("inner");
    fs::create_dir(&inner).unwrap();
    fs::write(inner.join("data.txt"), b"d\n").unwrap();
    std::os::unix::fs::symlink(dir.path(), inner.join("back")).unwrap();

    let pipeline = ClassificationPipeline::new().unwrap();
    let findings: Vec<Finding> =
        Walker::new(&pipeline, vec![dir.path().to_path_buf()]).collect();

    // Terminates, and the link shows up as its own kind.
    let labels: Vec<&str> = findings
        .iter()
        .map(|f| f.outcome.as_ref().unwrap().label.as_str())
        .collect();
    assert_eq!(labels, vec!["symbolic link", "Text file"]);
}

#[cfg(unix)]
#[test]
fn unreadable_file_does_not_abort_siblings() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a_locked"), b"\x00secret").unwrap();
    fs::write(dir.path().join("b_open.pdf"), b"%PDF-1.1").unwrap();
    fs::set_permissions(
        dir.path().join("a_locked"),
        fs::Permissions::from_mode(0o000),
    )
    .unwrap();
    if fs::File::open(dir.path().join("a_locked")).is_ok() {
        // Privileged processes ignore mode bits; nothing to observe here.
        return;
    }

    let pipeline = ClassificationPipeline::new().unwrap();
    let findings: Vec<Finding> =
        Walker::new(&pipeline, vec![dir.path().to_path_buf()]).collect();

    assert_eq!(findings.len(), 2);
    assert!(findings[0].is_error());
    assert_eq!(
        findings[1].outcome.as_ref().unwrap().label,
        "PDF document"
    );

    // Restore so the tempdir can clean up.
    fs::set_permissions(
        dir.path().join("a_locked"),
        fs::Permissions::from_mode(0o644),
    )
    .unwrap();
}

#[test]
fn multiple_roots_processed_in_argument_order() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    fs::write(first.path().join("z.txt"), b"z\n").unwrap();
    fs::write(second.path().join("a.txt"), b"a\n").unwrap();

    let pipeline = ClassificationPipeline::new().unwrap();
    let findings: Vec<Finding> = Walker::new(
        &pipeline,
        vec![first.path().to_path_buf(), second.path().to_path_buf()],
    )
    .collect();

    // Root order is argument order, not name order.
    assert_eq!(findings[0].path.file_name().unwrap(), "z.txt");
    assert_eq!(findings[1].path.file_name().unwrap(), "a.txt");
}

#[test]
fn parallel_walk_agrees_with_sequential() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("doc.pdf"), b"%PDF-1.6").unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("src/main.py"),
        b"#!/usr/bin/env python3\nimport sys\n\ndef run():\n    pass\n",
    )
    .unwrap();
    fs::write(dir.path().join("blob"), [0x00u8, 0x11, 0xFE, 0x93]).unwrap();

    let pipeline = ClassificationPipeline::new().unwrap();
    let sequential: Vec<(PathBuf, String)> =
        Walker::new(&pipeline, vec![dir.path().to_path_buf()])
            .map(|f| (f.path.clone(), f.outcome.unwrap().label))
            .collect();
    let parallel: Vec<(PathBuf, String)> =
        classify_parallel(&pipeline, vec![dir.path().to_path_buf()], None, false)
            .into_iter()
            .map(|f| (f.path.clone(), f.outcome.unwrap().label))
            .collect();

    assert_eq!(sequential, parallel);
}
