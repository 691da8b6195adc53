use crate::combine::tree::{self, NodeKind, TreeNode};
use crate::session::{AddOutcome, Session};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Selection,
}

/// Outcome of an input event that ends the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMsg {
    Quit,
    Submit,
}

/// One visible line of the browsing tree.
#[derive(Debug, Clone)]
pub struct TreeRow {
    pub node: TreeNode,
    pub depth: usize,
    pub expanded: bool,
}

/// Shared UI state for the dual-panel selector
pub struct UiState {
    pub rows: Vec<TreeRow>,
    pub tree_idx: usize,
    pub tree_offset: usize,
    pub list_idx: usize,
    pub list_offset: usize,
    pub focus: Focus,
    pub status: String,
}

impl UiState {
    /// Builds the tree for `root` with the root row expanded.
    pub fn new(root: &Path) -> Self {
        let mut state = UiState {
            rows: Vec::new(),
            tree_idx: 0,
            tree_offset: 0,
            list_idx: 0,
            list_offset: 0,
            focus: Focus::Tree,
            status: "Ready".to_string(),
        };
        state.refresh(root);
        state
    }

    /// Rebuilds the tree from disk; expansion state is lost.
    pub fn refresh(
        &mut self,
        root: &Path,
    ) {
        self.rows = vec![TreeRow {
            node: TreeNode {
                name: tree::display_name(root),
                path: root.to_path_buf(),
                kind: NodeKind::Directory,
                ordinal: 0,
                is_link: false,
            },
            depth: 0,
            expanded: false,
        }];
        self.tree_idx = 0;
        self.tree_offset = 0;
        self.expand(0);
    }

    /// Lists the children of the directory row at `idx` beneath it.
    pub fn expand(
        &mut self,
        idx: usize,
    ) -> bool {
        let Some(row) = self.rows.get(idx) else {
            return false;
        };
        if !row.node.is_dir() || row.expanded {
            return false;
        }
        let depth = row.depth + 1;
        match tree::list_children(&row.node.path) {
            Ok(children) => {
                let new_rows = children.into_iter().map(|node| TreeRow {
                    node,
                    depth,
                    expanded: false,
                });
                self.rows.splice(idx + 1..idx + 1, new_rows);
                self.rows[idx].expanded = true;
                true
            }
            Err(e) => {
                warn!("listing {:?} failed: {e}", row.node.path);
                self.status = format!("{}: {}", row.node.name, tree::listing_error_line(&e));
                false
            }
        }
    }

    /// Hides every descendant of the row at `idx`.
    pub fn collapse(
        &mut self,
        idx: usize,
    ) -> bool {
        let Some(row) = self.rows.get(idx) else {
            return false;
        };
        if !row.expanded {
            return false;
        }
        let depth = row.depth;
        let end = self.rows[idx + 1..]
            .iter()
            .position(|r| r.depth <= depth)
            .map_or(self.rows.len(), |p| idx + 1 + p);
        self.rows.drain(idx + 1..end);
        self.rows[idx].expanded = false;
        if self.tree_idx > idx && self.tree_idx < end {
            self.tree_idx = idx;
        } else if self.tree_idx >= end {
            self.tree_idx -= end - idx - 1;
        }
        true
    }

    /// Expands every directory at any depth. Symlinked directories stay closed.
    pub fn expand_all(&mut self) {
        let mut i = 0;
        while i < self.rows.len() {
            if !self.rows[i].node.is_link {
                self.expand(i);
            }
            i += 1;
        }
    }

    /// Collapses everything below the root's direct children.
    pub fn collapse_all(&mut self) {
        self.rows.retain(|r| r.depth <= 1);
        for row in self.rows.iter_mut().skip(1) {
            row.expanded = false;
        }
        self.tree_idx = self.tree_idx.min(self.rows.len().saturating_sub(1));
    }

    fn parent_of(
        &self,
        idx: usize,
    ) -> Option<usize> {
        let depth = self.rows.get(idx)?.depth;
        self.rows[..idx].iter().rposition(|r| r.depth < depth)
    }

    /// Adds the highlighted node to the selection: a file, or all files of a directory.
    pub fn add_current(
        &mut self,
        session: &mut Session,
    ) {
        let Some(row) = self.rows.get(self.tree_idx) else {
            return;
        };
        match session.add_path(&row.node.path) {
            Ok(AddOutcome::Directory { warnings, .. }) if !warnings.is_empty() => {
                self.status = format!(
                    "{} files selected ({} entries skipped)",
                    session.selection().len(),
                    warnings.len()
                );
            }
            Ok(_) => {
                self.status = format!("{} files selected", session.selection().len());
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    /// Removes the highlighted selection entry.
    pub fn remove_current(
        &mut self,
        session: &mut Session,
    ) {
        if session.selection().is_empty() {
            self.status = "Nothing selected to remove.".to_string();
            return;
        }
        match session.selection_mut().remove(&[self.list_idx]) {
            Ok(()) => {
                let len = session.selection().len();
                self.list_idx = self.list_idx.min(len.saturating_sub(1));
                self.status = format!("{len} files selected");
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn move_cursor(
        &mut self,
        session: &Session,
        delta: isize,
    ) {
        let (idx, len) = match self.focus {
            Focus::Tree => (&mut self.tree_idx, self.rows.len()),
            Focus::Selection => (&mut self.list_idx, session.selection().len()),
        };
        let last = len.saturating_sub(1);
        *idx = idx.saturating_add_signed(delta).min(last);
    }

    /// Applies one terminal event to the state.
    pub fn handle_event(
        &mut self,
        session: &mut Session,
        evt: Event,
    ) -> Option<UiMsg> {
        match evt {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(session, key),
            _ => None,
        }
    }

    pub fn handle_key(
        &mut self,
        session: &mut Session,
        key: KeyEvent,
    ) -> Option<UiMsg> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                return Some(UiMsg::Quit);
            }
            (KeyCode::Char('q'), _) => return Some(UiMsg::Quit),
            (KeyCode::Char('s'), _) => {
                if session.selection().is_empty() {
                    self.status = "Please select files to combine.".to_string();
                } else {
                    return Some(UiMsg::Submit);
                }
            }
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
                self.focus = match self.focus {
                    Focus::Tree => Focus::Selection,
                    Focus::Selection => Focus::Tree,
                };
            }
            (KeyCode::Up, _) => self.move_cursor(session, -1),
            (KeyCode::Down, _) => self.move_cursor(session, 1),
            (KeyCode::Home, _) => self.move_cursor(session, isize::MIN),
            (KeyCode::End, _) => self.move_cursor(session, isize::MAX),
            (KeyCode::Char('x'), _) => {
                session.selection_mut().clear();
                self.list_idx = 0;
                self.status = "Selection cleared".to_string();
            }
            (KeyCode::Char('r'), _) => {
                if let Some(root) = session.root().map(Path::to_path_buf) {
                    self.refresh(&root);
                }
            }
            (KeyCode::Char('e'), _) => self.expand_all(),
            (KeyCode::Char('E'), _) => self.collapse_all(),
            (code, _) => match self.focus {
                Focus::Tree => self.handle_tree_key(session, code),
                Focus::Selection => self.handle_selection_key(session, code),
            },
        }
        None
    }

    fn handle_tree_key(
        &mut self,
        session: &mut Session,
        code: KeyCode,
    ) {
        let is_dir = self
            .rows
            .get(self.tree_idx)
            .is_some_and(|r| r.node.is_dir());
        match code {
            KeyCode::Right => {
                self.expand(self.tree_idx);
            }
            KeyCode::Enter if is_dir => {
                if !self.expand(self.tree_idx) {
                    self.collapse(self.tree_idx);
                }
            }
            KeyCode::Left => {
                if !self.collapse(self.tree_idx) {
                    if let Some(parent) = self.parent_of(self.tree_idx) {
                        self.tree_idx = parent;
                    }
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('>') => {
                self.add_current(session)
            }
            _ => {}
        }
    }

    fn handle_selection_key(
        &mut self,
        session: &mut Session,
        code: KeyCode,
    ) {
        if matches!(
            code,
            KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('<')
        ) {
            self.remove_current(session);
        }
    }
}

/// Adjust scroll offset and compute visible range
pub fn adjust_scroll_and_slice(
    selected_idx: &mut usize,
    scroll_offset: &mut usize,
    max_lines: usize,
    data_len: usize,
) -> (usize, usize) {
    if *selected_idx < *scroll_offset {
        *scroll_offset = *selected_idx;
    } else if *selected_idx >= *scroll_offset + max_lines {
        *scroll_offset = selected_idx.saturating_sub(max_lines).saturating_add(1);
    }
    let end_idx = (*scroll_offset + max_lines).min(data_len);
    ((*scroll_offset).min(end_idx), end_idx)
}
