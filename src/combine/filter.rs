use crate::constants::EXCLUDED_DIRS;
use std::ffi::OsStr;

/// Returns true when a directory with this name must not be traversed.
/// Only meaningful for directory entries; files are never excluded by name.
pub fn is_excluded(entry_name: &str) -> bool {
    EXCLUDED_DIRS.contains(&entry_name)
}

/// `OsStr` form of [`is_excluded`]; names that are not valid UTF-8 never match.
pub fn is_excluded_os(entry_name: &OsStr) -> bool {
    entry_name.to_str().is_some_and(is_excluded)
}
