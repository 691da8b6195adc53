use anyhow::{Result, anyhow};
use glob::{Pattern, glob};
use std::path::{Path, PathBuf};

/// Expands user-supplied paths and glob patterns. Relative entries are taken
/// relative to `root`; an entry matching nothing is kept as a literal path.
pub fn expand_paths(
    root: &Path,
    paths: &[String],
) -> Result<Vec<PathBuf>> {
    let mut expanded = Vec::new();

    for p in paths {
        let joined = root.join(p);
        let pattern = if Path::new(p).is_absolute() {
            p.clone()
        } else {
            format!("{}/{}", Pattern::escape(&root.to_string_lossy()), p)
        };
        // Normalize Windows path separators for glob patterns
        let pattern = pattern.replace('\\', "/");
        let pattern_results =
            glob(&pattern).map_err(|e| anyhow!("Invalid glob pattern {}: {:?}", p, e))?;

        let mut has_match = false;
        for path_res in pattern_results {
            has_match = true;
            expanded.push(path_res?);
        }
        if !has_match {
            expanded.push(joined);
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn relative_globs_resolve_against_root() -> anyhow::Result<()> {
        let td = tempfile::tempdir()?;
        fs::create_dir_all(td.path().join("src"))?;
        fs::write(td.path().join("src/a.rs"), "")?;
        fs::write(td.path().join("src/b.rs"), "")?;
        fs::write(td.path().join("src/c.md"), "")?;

        let mut paths = expand_paths(td.path(), &["src/*.rs".into(), "missing.txt".into()])?;
        paths.sort();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().any(|p| p.ends_with("src/a.rs")));
        assert!(paths.iter().any(|p| p.ends_with("missing.txt")));
        assert!(!paths.iter().any(|p| p.ends_with("c.md")));
        Ok(())
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let td = tempfile::tempdir().unwrap();
        assert!(expand_paths(td.path(), &["[".into()]).is_err());
    }
}
