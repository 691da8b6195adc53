#![allow(dead_code)]
use assert_fs::{TempDir, prelude::*};
use std::path::PathBuf;

/// Builds a fixture tree:
/// <tmp>/
///   proj/a.txt          "hello"
///   proj/sub/b.txt      "world"
///   proj/.git/HEAD      (excluded directory)
pub fn project() -> TempDir {
    let td = TempDir::new().unwrap();
    td.child("proj/a.txt").write_str("hello").unwrap();
    td.child("proj/sub/b.txt").write_str("world").unwrap();
    td.child("proj/.git/HEAD").write_str("ref: refs/heads/main").unwrap();
    td
}

pub fn proj_root(td: &TempDir) -> PathBuf {
    td.path().join("proj")
}
