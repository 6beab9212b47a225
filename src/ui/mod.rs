//! Top-level UI composition.

use crate::{
    app::state::AppState,
    ui::components::{
        footer,
        header::{self, HeaderFlag, HeaderModel},
    },
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

pub mod components;
mod hints;
pub mod screens;
pub mod theme;

/// Draws the demo screen and records where the search bar landed.
pub fn render(frame: &mut Frame<'_>, state: &mut AppState) {
    let hints = hints::build(state);

    let root = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(footer::required_height(frame.area().width, &hints)),
    ])
    .split(frame.area());

    let props = state.search_bar.props();
    header::render(
        frame,
        root[0],
        &HeaderModel {
            app_label: "🔍 searchbar".to_owned(),
            context_label: format!("{} catalog entries", state.catalog.len()),
            operation: state.operation_display(),
            error: state.error_message.clone(),
            flags: vec![
                HeaderFlag {
                    label: "disabled",
                    enabled: props.disabled,
                },
                HeaderFlag {
                    label: "esc cancels",
                    enabled: props.cancel_on_escape,
                },
                HeaderFlag {
                    label: "full width",
                    enabled: props.full_width,
                },
            ],
        },
    );

    let layout = screens::demo::render(frame, root[1], state);
    state.search_bar_layout = Some(layout);

    footer::render(frame, root[2], &hints);
}
