// Centralized layout strings & fixed names
pub const RULE_WIDTH: usize = 80;
pub const INDEX_TITLE: &str = "COMBINED FILE INDEX";
pub const TREE_TITLE: &str = "DIRECTORY STRUCTURE";
pub const TOC_TITLE: &str = "TABLE OF CONTENTS";
pub const CONTENTS_TITLE: &str = "FILE CONTENTS";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Directory names never traversed, matched case-sensitively.
pub const EXCLUDED_DIRS: [&str; 5] = [".git", "__pycache__", "node_modules", ".vscode", ".idea"];

pub const STATUS_COMBINING: &str = "Combining files...";
pub const STATUS_DONE: &str = "done";
