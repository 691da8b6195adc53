use std::{
    io::{self, Stdout},
    panic,
    sync::Arc,
};

use crate::session::Session;
use crate::ui::{
    render,
    state::{UiMsg, UiState},
};
use anyhow::{Result, anyhow};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// Runs the dual-panel selector on the session. Returns `true` when the user
/// submitted the selection, `false` when they quit.
pub fn select_files_tui(session: &mut Session) -> Result<bool> {
    let root = session
        .root()
        .ok_or_else(|| anyhow!("Please select a root directory."))?
        .to_path_buf();

    // Restore the terminal before the previous hook prints the panic
    let previous = Arc::new(panic::take_hook());
    let chained = Arc::clone(&previous);
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        (*chained)(info);
    }));

    let mut state = UiState::new(&root);
    state.status = format!("{} files selected", session.selection().len());

    let result = setup_terminal().and_then(|mut terminal| {
        let outcome = event_loop(&mut terminal, &mut state, session);
        restore_terminal(&mut terminal)?;
        outcome
    });

    let _ = panic::take_hook();
    panic::set_hook(Box::new(move |info| (*previous)(info)));
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let terminal = execute!(std::io::stdout(), EnterAlternateScreen, EnableMouseCapture)
        .and_then(|_| Terminal::new(CrosstermBackend::new(std::io::stdout())));
    undo_on_error(terminal, || {
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = disable_raw_mode();
    })
}

/// Runs `undo` when `result` failed, so a half-finished setup leaves the shell usable.
fn undo_on_error<T>(
    result: io::Result<T>,
    undo: impl FnOnce(),
) -> Result<T> {
    result.map_err(|e| {
        undo();
        e.into()
    })
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut UiState,
    session: &mut Session,
) -> Result<bool> {
    loop {
        terminal.draw(|f| render::render(f, state, session))?;

        let evt = event::read()?;
        match state.handle_event(session, evt) {
            Some(UiMsg::Quit) => return Ok(false),
            Some(UiMsg::Submit) => return Ok(true),
            None => {}
        }
    }
}
