//! Application runtime, event loop, and keyboard/mouse handling.

pub mod editor;
pub mod events;
pub mod state;

use crate::app::events::{AppMessage, SearchDispatch};
use crate::app::state::AppState;
use crate::ui;
use crate::widget::SearchBarProps;
use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Position;
use std::io::{Stdout, stdout};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Runtime configuration assembled from the config file and CLI flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub props: SearchBarProps,
    pub search_delay: Duration,
}

/// Runs the interactive TUI application.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();
    let dispatch = SearchDispatch::Background {
        delay: config.search_delay,
    };
    let mut state = AppState::new(config.props, dispatch, tx);

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut state, &mut rx);

    restore_terminal(&mut terminal)?;
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    rx: &mut UnboundedReceiver<AppMessage>,
) -> anyhow::Result<()> {
    loop {
        state.advance_spinner();

        while let Ok(message) = rx.try_recv() {
            state.process_message(message);
        }

        terminal.draw(|frame| ui::render(frame, state))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(60))? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    handle_key_event(state, key_event);
                }
                Event::Mouse(mouse_event) => handle_mouse_event(state, mouse_event),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Routes a key press to the focused input or to the host's own bindings.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) {
    if state.search_bar.is_focused() {
        handle_input_key_event(state, key);
    } else {
        handle_host_key_event(state, key);
    }
}

fn handle_input_key_event(state: &mut AppState, key: KeyEvent) {
    let cancel_on_escape = state.search_bar.cancel_on_escape();
    state.type_key(&key);

    match key.code {
        KeyCode::Tab => state.blur_input(),
        KeyCode::Esc if !cancel_on_escape => state.blur_input(),
        KeyCode::Down => state.move_down(),
        KeyCode::Up => state.move_up(),
        _ => {}
    }
}

fn handle_host_key_event(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
        }
        KeyCode::Char('/') | KeyCode::Tab => state.focus_input(),
        KeyCode::Char('s') => state.search_bar.click_search_trigger(),
        KeyCode::Char('x') => state.search_bar.click_clear_trigger(),
        KeyCode::Char('d') => state.toggle_disabled(),
        KeyCode::Char('e') => state.toggle_cancel_on_escape(),
        KeyCode::Char('f') => state.toggle_full_width(),
        KeyCode::Char('p') => state.cycle_preset_value(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        _ => {}
    }
}

/// Hit-tests a left click against the search bar areas from the last frame.
pub fn handle_mouse_event(state: &mut AppState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some(layout) = state.search_bar_layout else {
        return;
    };

    let position = Position::new(mouse.column, mouse.row);
    if layout.search_trigger.contains(position) {
        state.search_bar.click_search_trigger();
    } else if layout.clear_trigger.contains(position) {
        state.search_bar.click_clear_trigger();
    } else if layout.text.contains(position) {
        state.focus_input();
    } else {
        state.blur_input();
    }
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;

    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(out);
    let terminal = Terminal::new(backend).context("failed to create ratatui terminal")?;

    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;

    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}
