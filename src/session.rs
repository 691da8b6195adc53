use crate::combine::{CombineJob, SelectionSet, paths};
use crate::error::{CombineError, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// What an `add_path` call did.
#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    File { added: bool },
    Directory { added: usize, warnings: Vec<String> },
}

impl AddOutcome {
    pub fn added(&self) -> usize {
        match self {
            AddOutcome::File { added } => usize::from(*added),
            AddOutcome::Directory { added, .. } => *added,
        }
    }
}

/// Root, selection and output path for one combining session.
#[derive(Debug, Default)]
pub struct Session {
    root: Option<PathBuf>,
    selection: SelectionSet,
    output: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory, stored in absolute form. A different root
    /// clears the selection.
    pub fn set_root(
        &mut self,
        root: &Path,
    ) -> Result<()> {
        if !root.is_dir() {
            return Err(CombineError::Validation(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        let root = paths::absolute(root);
        if self.root.as_ref() != Some(&root) {
            self.selection.clear();
            info!("Root directory set to: {}", root.display());
        }
        self.root = Some(root);
        Ok(())
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn require_root(&self) -> Result<&Path> {
        self.root
            .as_deref()
            .ok_or_else(|| CombineError::Validation("Please select a root directory.".into()))
    }

    /// Adds a file, or every file beneath a directory.
    pub fn add_path(
        &mut self,
        path: &Path,
    ) -> Result<AddOutcome> {
        let root = self.require_root()?.to_path_buf();
        if path.is_dir() {
            let outcome = self.selection.add_directory_recursive(&root, path)?;
            Ok(AddOutcome::Directory {
                added: outcome.added,
                warnings: outcome.warnings,
            })
        } else if path.exists() {
            let added = self.selection.add_file(&root, path)?;
            Ok(AddOutcome::File { added })
        } else {
            Err(CombineError::fs(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
            ))
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    pub fn set_output(
        &mut self,
        output: impl Into<PathBuf>,
    ) {
        self.output = Some(output.into());
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    fn is_output(
        &self,
        path: &Path,
    ) -> bool {
        self.output
            .as_deref()
            .is_some_and(|out| paths::resolve(out) == paths::resolve(path))
    }

    /// Drops the output file from the selection. Returns whether it was selected.
    pub fn exclude_output(&mut self) -> bool {
        let selected: Vec<PathBuf> = self
            .selection
            .paths()
            .filter(|p| self.is_output(p))
            .map(Path::to_path_buf)
            .collect();
        for path in &selected {
            self.selection.remove_path(path);
        }
        !selected.is_empty()
    }

    /// Snapshot for the engine; empty fields are reported by the engine's validation.
    /// The output file is never part of its own input.
    pub fn job(&self) -> CombineJob {
        CombineJob {
            root: self.root.clone().unwrap_or_default(),
            files: self
                .selection
                .paths()
                .filter(|p| !self.is_output(p))
                .map(Path::to_path_buf)
                .collect(),
            output: self.output.clone().unwrap_or_default(),
        }
    }
}
