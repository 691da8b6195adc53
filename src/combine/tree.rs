use crate::combine::filter;
use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::debug;

const BRANCH: &str = "├── ";
const LAST: &str = "└── ";
const PIPE_PREFIX: &str = "│   ";
const SPACE_PREFIX: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// One entry beneath the root, as listed for rendering or browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Position among siblings: sorted directories first, then sorted files.
    pub ordinal: usize,
    /// Directory reached through a symlink; listed but never descended.
    pub is_link: bool,
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// Lists the children of `dir` in display order, skipping excluded directories
/// and entries that are neither files nor directories.
pub fn list_children(dir: &Path) -> io::Result<Vec<TreeNode>> {
    let mut dirs: Vec<(OsString, PathBuf, bool)> = Vec::new();
    let mut files: Vec<(OsString, PathBuf, bool)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(e) => {
                debug!("skipping {:?}: {e}", path);
                continue;
            }
        };
        let (is_dir, is_file, is_link) = if file_type.is_symlink() {
            match fs::metadata(&path) {
                Ok(meta) => (meta.is_dir(), meta.is_file(), true),
                // dangling link
                Err(_) => continue,
            }
        } else {
            (file_type.is_dir(), file_type.is_file(), false)
        };

        if is_dir {
            if !filter::is_excluded_os(&name) {
                dirs.push((name, path, is_link));
            }
        } else if is_file {
            files.push((name, path, is_link));
        }
    }

    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let dirs = dirs.into_iter().map(|d| (NodeKind::Directory, d));
    let files = files.into_iter().map(|f| (NodeKind::File, f));
    Ok(dirs
        .chain(files)
        .enumerate()
        .map(|(ordinal, (kind, (name, path, is_link)))| TreeNode {
            name: name.to_string_lossy().into_owned(),
            path,
            kind,
            ordinal,
            is_link,
        })
        .collect())
}

/// Renders the full-depth box-drawing tree of `root`. The first line is the
/// root itself; every following line is a descendant.
pub fn render(root: &Path) -> Vec<String> {
    let mut lines = vec![format!("{LAST}{}/", display_name(root))];
    render_children(root, SPACE_PREFIX, &mut lines);
    lines
}

fn render_children(
    dir: &Path,
    prefix: &str,
    lines: &mut Vec<String>,
) {
    let children = match list_children(dir) {
        Ok(children) => children,
        Err(e) => {
            debug!("listing {:?} failed: {e}", dir);
            lines.push(format!("{prefix}{}", listing_error_line(&e)));
            return;
        }
    };

    let last = children.len().saturating_sub(1);
    for node in &children {
        let is_last = node.ordinal == last;
        let connector = if is_last { LAST } else { BRANCH };
        match node.kind {
            NodeKind::Directory => {
                lines.push(format!("{prefix}{connector}{}/", node.name));
                if !node.is_link {
                    let continuation = if is_last { SPACE_PREFIX } else { PIPE_PREFIX };
                    render_children(&node.path, &format!("{prefix}{continuation}"), lines);
                }
            }
            NodeKind::File => lines.push(format!("{prefix}{connector}{}", node.name)),
        }
    }
}

/// The single line that replaces a directory's children when it cannot be listed.
pub fn listing_error_line(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::PermissionDenied => "[Permission denied]".to_string(),
        _ => format!("[Error: {err}]"),
    }
}

/// Basename used for the root line; `.` and friends fall back to the resolved path.
pub fn display_name(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().into_owned();
    }
    dunce::canonicalize(root)
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| root.display().to_string())
}
