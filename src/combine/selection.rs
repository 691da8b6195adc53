use crate::combine::{filter, paths};
use crate::error::{CombineError, Result};
use ignore::WalkBuilder;
use indexmap::IndexSet;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Result of adding every file beneath a directory.
#[derive(Debug, Default)]
pub struct DirectoryAdd {
    /// Files that were not already selected.
    pub added: usize,
    /// Problems met during the walk; the files that could be added were kept.
    pub warnings: Vec<String>,
}

/// Ordered, duplicate-free set of absolute file paths beneath a root.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    files: IndexSet<PathBuf>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one file. Returns `Ok(false)` when it is already selected.
    ///
    /// Containment is checked on the resolved path, so a link pointing out of
    /// the root is rejected; the entry itself keeps the name it was given.
    pub fn add_file(
        &mut self,
        root: &Path,
        path: &Path,
    ) -> Result<bool> {
        let root = paths::resolve(root);
        let resolved = paths::resolve(path);
        if !paths::is_within(&root, &resolved) || resolved == root {
            return Err(CombineError::OutOfRoot {
                path: resolved,
                root,
            });
        }
        if resolved.is_dir() {
            return Err(CombineError::Validation(format!(
                "{} is a directory, not a file",
                resolved.display()
            )));
        }
        let added = self.files.insert(paths::absolute(path));
        if !added {
            debug!("{:?} already selected", path);
        }
        Ok(added)
    }

    /// Walks `dir` recursively and adds every regular file not yet selected.
    /// Excluded directory names are pruned; walk errors become warnings.
    pub fn add_directory_recursive(
        &mut self,
        root: &Path,
        dir: &Path,
    ) -> Result<DirectoryAdd> {
        let resolved_root = paths::resolve(root);
        let resolved_dir = paths::resolve(dir);
        if !paths::is_within(&resolved_root, &resolved_dir) {
            return Err(CombineError::OutOfRoot {
                path: resolved_dir,
                root: resolved_root,
            });
        }

        let walker = WalkBuilder::new(paths::absolute(dir))
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                entry.depth() == 0 || !is_dir || !filter::is_excluded_os(entry.file_name())
            })
            .build();

        let mut outcome = DirectoryAdd::default();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Could not process entry in {:?}: {e}", resolved_dir);
                    outcome.warnings.push(e.to_string());
                    continue;
                }
            };
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            let is_file = if file_type.is_symlink() {
                fs::metadata(entry.path()).is_ok_and(|m| m.is_file())
            } else {
                file_type.is_file()
            };
            if !is_file {
                continue;
            }
            match self.add_file(root, entry.path()) {
                Ok(true) => outcome.added += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!("{e}");
                    outcome.warnings.push(e.to_string());
                }
            }
        }
        Ok(outcome)
    }

    /// Removes the entries at `indices`. Nothing is removed if any index is invalid.
    pub fn remove(
        &mut self,
        indices: &[usize],
    ) -> Result<()> {
        let len = self.files.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(CombineError::IndexOutOfRange { index, len });
        }
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for index in sorted.into_iter().rev() {
            self.files.shift_remove_index(index);
        }
        Ok(())
    }

    /// Removes `path` if present.
    pub fn remove_path(
        &mut self,
        path: &Path,
    ) -> bool {
        self.files.shift_remove(&paths::absolute(path))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Member paths relative to `root`, in selection order.
    pub fn relative_paths(
        &self,
        root: &Path,
    ) -> Vec<String> {
        self.files
            .iter()
            .map(|p| paths::relative_display(root, p))
            .collect()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.files.iter().cloned().collect()
    }

    pub fn contains(
        &self,
        path: &Path,
    ) -> bool {
        self.files.contains(&paths::absolute(path))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
