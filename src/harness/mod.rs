//! Visual harness: replays scripted interactions and renders deterministic snapshots.

pub mod script;

use crate::app::events::{AppMessage, SearchDispatch};
use crate::app::handle_key_event;
use crate::app::state::AppState;
use crate::harness::script::{Script, Step, Trigger};
use crate::ui;
use crate::widget::SearchBarProps;
use anyhow::Context;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Replays `script` against a fresh demo state and renders the final frame plus the
/// actions log into plain text.
pub fn render_script_dump(
    props: SearchBarProps,
    script: &str,
    width: u16,
    height: u16,
) -> anyhow::Result<String> {
    let script: Script = script.parse().context("invalid harness script")?;
    let mut state = replay(props, &script);
    let frame = render_state_to_string(&mut state, width, height)?;

    let mut actions = String::new();
    for entry in state.actions.entries() {
        let (name, argument) = entry.notification.describe();
        actions.push_str(&format!("{:>3} {name} {argument}", entry.sequence));
        while actions.ends_with(' ') {
            actions.pop();
        }
        actions.push('\n');
    }

    Ok(format!(
        "=== FRAME ===\n{frame}\n=== ACTIONS ===\n{actions}=== VALUE ===\n{:?}\n",
        state.search_bar.value()
    ))
}

/// Applies every step to a new state, resolving searches inline.
pub fn replay(props: SearchBarProps, script: &Script) -> AppState {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = AppState::new(props, SearchDispatch::Inline, tx);

    for step in &script.steps {
        apply_step(&mut state, step);
        drain(&mut state, &mut rx);
    }

    state
}

fn apply_step(state: &mut AppState, step: &Step) {
    match step {
        Step::Type(text) => state.type_text(text),
        Step::Focus => state.focus_input(),
        Step::Blur => state.blur_input(),
        Step::Key(key) => handle_key_event(state, *key),
        Step::Click(Trigger::Search) => state.search_bar.click_search_trigger(),
        Step::Click(Trigger::Clear) => state.search_bar.click_clear_trigger(),
        Step::Value(value) => state.set_external_value(value.clone()),
        Step::Disable => state.set_disabled(true),
        Step::Enable => state.set_disabled(false),
        Step::EscapeCancels(enabled) => state.set_cancel_on_escape(*enabled),
    }
}

fn drain(state: &mut AppState, rx: &mut UnboundedReceiver<AppMessage>) {
    while let Ok(message) = rx.try_recv() {
        state.process_message(message);
    }
}

fn render_state_to_string(
    state: &mut AppState,
    width: u16,
    height: u16,
) -> anyhow::Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).context("failed to create test terminal")?;

    terminal
        .draw(|frame| ui::render(frame, state))
        .context("failed to render frame")?;

    let buffer = terminal.backend().buffer().clone();

    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        while out.ends_with(' ') {
            out.pop();
        }
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{render_script_dump, replay};
    use crate::harness::script::Script;
    use crate::widget::SearchBarProps;

    #[test]
    fn end_to_end_script_matches_expected_flow() {
        let script: Script = "focus;type:  hello  ;blur;focus;key:enter;click:clear"
            .parse()
            .unwrap();
        let state = replay(SearchBarProps::default(), &script);

        assert_eq!(state.search_bar.value(), "");
        assert!(state.search_bar.show_search_icon());
        let names: Vec<_> = state
            .actions
            .entries()
            .map(|entry| entry.notification.describe())
            .collect();
        assert_eq!(
            names,
            vec![
                ("onFocus", "value=\"\"".to_owned()),
                ("onChange", "\"  hello  \"".to_owned()),
                ("onBlur", "value=\"  hello  \"".to_owned()),
                ("onFocus", "value=\"hello\"".to_owned()),
                ("onRequestSearch", "\"hello\"".to_owned()),
                ("onKeyUp", "Enter".to_owned()),
                ("onCancelSearch", String::new()),
            ]
        );
    }

    #[test]
    fn enter_while_focused_searches_untrimmed_value() {
        let script: Script = "focus;type: serde ;key:enter".parse().unwrap();
        let state = replay(SearchBarProps::default(), &script);

        assert_eq!(state.search_bar.value(), " serde ");
        assert!(
            state
                .actions
                .entries()
                .any(|entry| entry.notification.describe()
                    == ("onRequestSearch", "\" serde \"".to_owned()))
        );
        assert_eq!(
            state.selected_result().map(|item| item.name.as_str()),
            Some("serde")
        );
    }

    #[test]
    fn disabled_script_fires_nothing() {
        let script: Script = "disable;focus;type:abc;key:enter;click:search;value:host"
            .parse()
            .unwrap();
        let state = replay(SearchBarProps::default(), &script);

        assert!(state.actions.is_empty());
        assert_eq!(state.search_bar.value(), "host");
    }

    #[test]
    fn dump_contains_frame_actions_and_value() {
        let dump = render_script_dump(
            SearchBarProps::default(),
            "focus;type:ratatui;key:enter",
            120,
            30,
        )
        .expect("render should succeed");

        assert!(dump.contains("=== FRAME ==="));
        assert!(dump.contains("=== ACTIONS ==="));
        assert!(dump.contains("onRequestSearch \"ratatui\""));
        assert!(dump.contains("searchbar"));
        assert!(dump.ends_with("=== VALUE ===\n\"ratatui\"\n"));
    }

    #[test]
    fn invalid_script_is_an_error() {
        assert!(render_script_dump(SearchBarProps::default(), "jump", 80, 24).is_err());
    }
}
