use crate::session::Session;
use crate::ui::state::{Focus, UiState, adjust_scroll_and_slice};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

fn panel_block(
    title: String,
    focused: bool,
) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

/// Renders both panels, the status line and the key help.
pub fn render(
    frame: &mut Frame,
    state: &mut UiState,
    session: &Session,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_tree(frame, state, panels[0]);
    render_selection(frame, state, session, panels[1]);

    frame.render_widget(
        Paragraph::new(state.status.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
        rows[1],
    );

    let help = Line::from(vec![
        Span::styled("↑/↓: Move  ", Style::default().fg(Color::Yellow)),
        Span::styled("→/←: Open/Close  ", Style::default().fg(Color::Yellow)),
        Span::styled("Space: Add  ", Style::default().fg(Color::Yellow)),
        Span::styled("Tab: Panel  ", Style::default().fg(Color::Yellow)),
        Span::styled("Del: Remove  ", Style::default().fg(Color::Yellow)),
        Span::styled("x: Clear  ", Style::default().fg(Color::Yellow)),
        Span::styled("s: Combine  ", Style::default().fg(Color::Yellow)),
        Span::styled("q: Quit", Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(help), rows[2]);
}

fn render_tree(
    frame: &mut Frame,
    state: &mut UiState,
    area: Rect,
) {
    let max_lines = area.height.saturating_sub(2) as usize;
    let (offset, end) = adjust_scroll_and_slice(
        &mut state.tree_idx,
        &mut state.tree_offset,
        max_lines,
        state.rows.len(),
    );

    let items: Vec<ListItem> = state.rows[offset..end]
        .iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let line = if row.node.is_dir() {
                let marker = if row.expanded { "▾ " } else { "▸ " };
                Line::from(vec![
                    Span::raw(indent),
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!("{}/", row.node.name),
                        Style::default().fg(Color::Cyan),
                    ),
                ])
            } else {
                Line::from(vec![Span::raw(indent), Span::raw("  "), Span::raw(row.node.name.clone())])
            };
            ListItem::new(line)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.tree_idx.saturating_sub(offset)));
    let widget = List::new(items)
        .block(panel_block(
            "Files and Folders".to_string(),
            state.focus == Focus::Tree,
        ))
        .highlight_style(Style::default().bg(Color::Blue));
    frame.render_stateful_widget(widget, area, &mut list_state);
}

fn render_selection(
    frame: &mut Frame,
    state: &mut UiState,
    session: &Session,
    area: Rect,
) {
    let relative = session
        .root()
        .map(|root| session.selection().relative_paths(root))
        .unwrap_or_default();
    let max_lines = area.height.saturating_sub(2) as usize;
    let (offset, end) = adjust_scroll_and_slice(
        &mut state.list_idx,
        &mut state.list_offset,
        max_lines,
        relative.len(),
    );

    let items: Vec<ListItem> = relative[offset..end]
        .iter()
        .map(|rel| ListItem::new(Line::from(rel.as_str())))
        .collect();

    let mut list_state = ListState::default();
    if state.focus == Focus::Selection && !relative.is_empty() {
        list_state.select(Some(state.list_idx.saturating_sub(offset)));
    }
    let widget = List::new(items)
        .block(panel_block(
            format!("Selected Files ({})", relative.len()),
            state.focus == Focus::Selection,
        ))
        .highlight_style(Style::default().bg(Color::Blue));
    frame.render_stateful_widget(widget, area, &mut list_state);
}
