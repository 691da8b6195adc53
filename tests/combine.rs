mod common;
use assert_fs::prelude::*;
use common::{proj_root, project};
use file_combiner::{CombineError, CombineEvent, CombineJob, CombinerEngine, Progress};
use std::fs;

const HEAVY: &str = "================================================================================";
const LIGHT: &str = "--------------------------------------------------------------------------------";

#[test]
fn end_to_end_artifact_layout() {
    let td = project();
    let root = proj_root(&td);
    let job = CombineJob {
        files: vec![root.join("a.txt"), root.join("sub/b.txt")],
        output: td.path().join("out.txt"),
        root: root.clone(),
    };
    CombinerEngine::new().combine(&job, |_| {}).unwrap();

    let text = fs::read_to_string(&job.output).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines[0], HEAVY);
    assert_eq!(lines[1], "COMBINED FILE INDEX");
    assert_eq!(lines[2], HEAVY);
    let created = lines[3].strip_prefix("Created: ").unwrap();
    assert_eq!(created.len(), "2024-01-01 00:00:00".len(), "{created}");

    let tail = lines[4..].join("\n");
    let expected = format!(
        "Root Directory: {root}\n\
         Number of Files: 2\n\
         \n\
         DIRECTORY STRUCTURE\n\
         {LIGHT}\n    \
         ├── sub/\n    \
         │   └── b.txt\n    \
         └── a.txt\n\
         \n\
         TABLE OF CONTENTS\n\
         {LIGHT}\n\
         1. a.txt\n\
         2. sub/b.txt\n\
         \n\
         {HEAVY}\n\
         FILE CONTENTS\n\
         {HEAVY}\n\
         \n\
         (((a.txt)))\n\nhello\n\n\
         (((sub/b.txt)))\n\nworld\n\n",
        root = root.display()
    );
    assert_eq!(tail, expected);
}

#[test]
fn table_of_contents_follows_selection_order() {
    let td = project();
    let root = proj_root(&td);
    td.child("proj/sub/c.txt").write_str("third").unwrap();
    let job = CombineJob {
        files: vec![
            root.join("sub/c.txt"),
            root.join("a.txt"),
            root.join("sub/b.txt"),
        ],
        output: td.path().join("out.txt"),
        root,
    };
    let summary = CombinerEngine::new().combine(&job, |_| {}).unwrap();
    assert_eq!(summary.files, 3);

    let text = fs::read_to_string(&job.output).unwrap();
    assert!(text.contains("1. sub/c.txt\n2. a.txt\n3. sub/b.txt\n"));
    let delimiters: Vec<&str> = text
        .lines()
        .filter(|l| l.starts_with("(((") && l.ends_with(")))"))
        .collect();
    assert_eq!(
        delimiters,
        ["(((sub/c.txt)))", "(((a.txt)))", "(((sub/b.txt)))"]
    );
}

#[test]
fn invalid_utf8_is_kept_through_latin1() {
    let td = project();
    let root = proj_root(&td);
    td.child("proj/legacy.txt")
        .write_binary(&[b'c', b'a', b'f', 0xE9, b'!', 0xFF])
        .unwrap();
    let job = CombineJob {
        files: vec![root.join("legacy.txt")],
        output: td.path().join("out.txt"),
        root,
    };
    let summary = CombinerEngine::new().combine(&job, |_| {}).unwrap();
    assert_eq!(summary.latin1, 1);
    assert_eq!(summary.unreadable, 0);

    let text = fs::read_to_string(&job.output).unwrap();
    assert!(text.contains("(((legacy.txt)))\n\ncaf\u{e9}!\u{ff}\n\n"));
}

#[test]
fn missing_output_parent_fails_before_progress() {
    let td = project();
    let root = proj_root(&td);
    let job = CombineJob {
        files: vec![root.join("a.txt")],
        output: td.path().join("no/such/dir/out.txt"),
        root,
    };

    let handle = CombinerEngine::new().spawn(job).unwrap();
    let events: Vec<CombineEvent> = handle.events.iter().collect();
    handle.join().unwrap();

    assert_eq!(events.len(), 1, "{events:?}");
    match &events[0] {
        CombineEvent::Done(Err(CombineError::Filesystem { path, .. })) => {
            assert!(path.ends_with("out.txt"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn spawned_run_streams_progress_then_done() {
    let td = project();
    let root = proj_root(&td);
    let job = CombineJob {
        files: vec![root.join("a.txt"), root.join("sub/b.txt")],
        output: td.path().join("out.txt"),
        root,
    };

    let handle = CombinerEngine::new().spawn(job).unwrap();
    let events: Vec<CombineEvent> = handle.events.iter().collect();
    handle.join().unwrap();

    let progress: Vec<&Progress> = events
        .iter()
        .filter_map(|e| match e {
            CombineEvent::Progress(p) => Some(p),
            CombineEvent::Done(_) => None,
        })
        .collect();
    assert_eq!(
        progress.iter().map(|p| p.percent).collect::<Vec<_>>(),
        [0, 50, 100]
    );
    assert!(matches!(events.last(), Some(CombineEvent::Done(Ok(_)))));
}

#[test]
fn output_is_truncated_on_each_run() {
    let td = project();
    let root = proj_root(&td);
    let out = td.child("out.txt");
    out.write_str(&"stale ".repeat(10_000)).unwrap();
    let job = CombineJob {
        files: vec![root.join("a.txt")],
        output: out.path().to_path_buf(),
        root,
    };
    CombinerEngine::new().combine(&job, |_| {}).unwrap();
    let text = fs::read_to_string(out.path()).unwrap();
    assert!(!text.contains("stale"));
    assert!(text.ends_with("(((a.txt)))\n\nhello\n\n"));
}
