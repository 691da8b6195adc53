pub mod render;
pub mod selector;
pub mod state;

// Re-export the TUI entrypoint function
pub use selector::select_files_tui;
