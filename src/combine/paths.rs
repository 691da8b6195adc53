use path_slash::PathBufExt;
use std::path::{Component, Path, PathBuf};

/// Resolves `path` to an absolute form. Existing paths are canonicalized;
/// for missing ones the deepest existing ancestor is canonicalized and the
/// lexically cleaned remainder appended.
pub fn resolve(path: &Path) -> PathBuf {
    if let Ok(canon) = dunce::canonicalize(path) {
        return canon;
    }
    let abs = absolute(path);
    for ancestor in abs.ancestors().skip(1) {
        if let Ok(canon) = dunce::canonicalize(ancestor) {
            if let Ok(rest) = abs.strip_prefix(ancestor) {
                return canon.join(rest);
            }
        }
    }
    abs
}

/// Absolute, lexically cleaned form of `path`. Symlinks are kept as named.
pub fn absolute(path: &Path) -> PathBuf {
    normalize_lexically(&std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()))
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                // never climb above the root/prefix
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Component-wise containment: `/a/b` contains `/a/b/x` but not `/a/bc/x`.
pub fn is_within(
    root: &Path,
    candidate: &Path,
) -> bool {
    candidate.starts_with(root)
}

/// `path` relative to `root`, with forward slashes. The path is kept as named
/// when it sits lexically under the root; otherwise both sides are resolved.
/// Paths outside the root get `..` segments; paths on another prefix are shown whole.
pub fn relative_display(
    root: &Path,
    path: &Path,
) -> String {
    let (root, path) = {
        let (root_abs, path_abs) = (absolute(root), absolute(path));
        if path_abs.starts_with(&root_abs) {
            (root_abs, path_abs)
        } else {
            (resolve(root), resolve(path))
        }
    };
    match pathdiff::diff_paths(&path, &root) {
        Some(rel) => rel.to_slash_lossy().into_owned(),
        None => path.to_slash_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_aware_containment() {
        assert!(is_within(Path::new("/a/b"), Path::new("/a/b/x")));
        assert!(is_within(Path::new("/a/b"), Path::new("/a/b")));
        assert!(!is_within(Path::new("/a/b"), Path::new("/a/bc/x")));
        assert!(!is_within(Path::new("/a/b"), Path::new("/a")));
    }

    #[cfg(unix)]
    #[test]
    fn missing_paths_are_cleaned_lexically() {
        let p = resolve(Path::new("/definitely-missing-root/x/../y/./z"));
        assert_eq!(p, PathBuf::from("/definitely-missing-root/y/z"));
        let top = resolve(Path::new("/definitely-missing-root/../../q"));
        assert_eq!(top, PathBuf::from("/q"));
    }

    #[test]
    fn relative_display_uses_forward_slashes() {
        let td = tempfile::tempdir().unwrap();
        let nested = td.path().join("sub").join("b.txt");
        std::fs::create_dir_all(nested.parent().unwrap()).unwrap();
        std::fs::write(&nested, "").unwrap();
        assert_eq!(relative_display(td.path(), &nested), "sub/b.txt");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_is_shown_under_its_link_name() {
        let td = tempfile::tempdir().unwrap();
        std::fs::write(td.path().join("target.txt"), "").unwrap();
        std::os::unix::fs::symlink(td.path().join("target.txt"), td.path().join("link.txt"))
            .unwrap();
        assert_eq!(relative_display(td.path(), &td.path().join("link.txt")), "link.txt");
        assert_eq!(absolute(&td.path().join("./x/../link.txt")), td.path().join("link.txt"));
    }
}
