//! Demo screen: the search bar over the results list and the callback actions log.

use crate::{
    app::state::AppState,
    ui::{
        components::search_bar::{self, SearchBarLayout},
        theme,
    },
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

const ACTIONS_WIDTH_PERCENT: u16 = 45;
const MAX_ARGUMENT_CHARS: usize = 32;

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) -> SearchBarLayout {
    let rows = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);
    let panels = Layout::horizontal([
        Constraint::Percentage(100 - ACTIONS_WIDTH_PERCENT),
        Constraint::Percentage(ACTIONS_WIDTH_PERCENT),
    ])
    .split(rows[1]);

    let layout = search_bar::render(frame, rows[0], &state.search_bar);
    render_results(frame, panels[0], state);
    render_actions(frame, panels[1], state);
    layout
}

fn render_results(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Results ({}) ", state.results.len()),
            theme::title(),
        ))
        .borders(Borders::ALL)
        .border_style(theme::border());

    if state.results.is_empty() {
        let message = if state.is_busy() {
            "  searching..."
        } else {
            "  press [enter] in the search bar to search the catalog"
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(message, theme::dim()))).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem<'static>> = state
        .results
        .iter()
        .filter_map(|index| state.catalog.get(*index))
        .map(|item| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {}", item.display_line()), theme::text()),
                Span::styled(format!("  {}", item.summary), theme::dim()),
            ]))
        })
        .collect();

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(
        List::new(items)
            .block(block)
            .highlight_style(theme::selected()),
        area,
        &mut list_state,
    );
}

fn render_actions(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(Span::styled(" Actions ", theme::title()))
        .borders(Borders::ALL)
        .border_style(theme::border());
    let visible = usize::from(block.inner(area).height);

    let mut lines: Vec<Line<'static>> = state
        .actions
        .entries()
        .rev()
        .take(visible)
        .map(|entry| {
            let (name, argument) = entry.notification.describe();
            Line::from(vec![
                Span::styled(format!(" {:>3} ", entry.sequence), theme::dim()),
                Span::styled(name, theme::info()),
                Span::styled(format!(" {}", truncate(&argument)), theme::text()),
            ])
        })
        .collect();
    lines.reverse();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  callbacks fired by the search bar show up here",
            theme::dim(),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_ARGUMENT_CHARS {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(MAX_ARGUMENT_CHARS - 3).collect();
    out.push_str("...");
    out
}
