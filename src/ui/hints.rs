//! Footer hint composition for each interaction mode.

use crate::app::state::AppState;
use crate::ui::components::footer::Hint;

pub fn build(state: &AppState) -> Vec<Hint> {
    if state.search_bar.is_focused() {
        input_hints(state)
    } else {
        host_hints(state)
    }
}

fn input_hints(state: &AppState) -> Vec<Hint> {
    let escape = if state.search_bar.cancel_on_escape() {
        Hint::new("esc", "cancel search")
    } else {
        Hint::new("esc", "unfocus")
    };

    vec![
        Hint::new("type", "edit query"),
        Hint::new("enter", "search"),
        escape,
        Hint::new("tab", "unfocus"),
        Hint::new("C-u/C-w", "clear line/word"),
        Hint::new("up/down", "navigate"),
    ]
}

fn host_hints(state: &AppState) -> Vec<Hint> {
    let mut hints = Vec::new();

    if state.search_bar.is_disabled() {
        hints.push(Hint::new("d", "enable"));
    } else {
        hints.push(Hint::new("/", "focus search"));
        if state.search_bar.search_trigger().is_interactive() {
            hints.push(Hint::new("s", "click search"));
        }
        if state.search_bar.clear_trigger().is_interactive() {
            hints.push(Hint::new("x", "click clear"));
        }
        hints.push(Hint::new("d", "disable"));
    }

    hints.extend([
        Hint::new("e", "toggle esc cancels"),
        Hint::new("f", "toggle full width"),
        Hint::new("p", "push preset value"),
        Hint::new("j/k", "navigate"),
        Hint::new("q", "quit"),
    ]);
    hints
}
