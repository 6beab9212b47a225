//! Footer component used for keybinding hints.

use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const SEPARATOR: &str = "  ";

/// One keybinding hint, rendered as `[key] desc`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Hint {
    pub key: &'static str,
    pub desc: &'static str,
}

impl Hint {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }

    fn width(&self) -> usize {
        self.key.chars().count() + 2 + 1 + self.desc.chars().count()
    }
}

/// Returns the footer height required to render all hints for the given terminal width.
pub fn required_height(screen_width: u16, hints: &[Hint]) -> u16 {
    let rows = wrap_hints(hints, usize::from(screen_width.max(1)))
        .len()
        .max(1);
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Renders keybinding hints in a plain bottom bar.
pub fn render(frame: &mut Frame<'_>, area: Rect, hints: &[Hint]) {
    let rows = wrap_hints(hints, usize::from(area.width.max(1)));
    let text: Vec<Line<'static>> = if rows.is_empty() {
        vec![Line::from(" ")]
    } else {
        rows.iter().map(|row| styled_row(row)).collect()
    };

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn wrap_hints(hints: &[Hint], width: usize) -> Vec<Vec<Hint>> {
    let mut rows = Vec::new();
    let mut current = Vec::<Hint>::new();
    let mut current_width = 0usize;

    for hint in hints {
        let separator = if current.is_empty() { 0 } else { SEPARATOR.len() };
        if current_width + separator + hint.width() > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = hint.width();
        } else {
            current_width += separator + hint.width();
        }
        current.push(*hint);
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}

fn styled_row(hints: &[Hint]) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    for (index, hint) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, theme::dim()));
        }
        spans.push(Span::styled(format!("[{}]", hint.key), theme::hint_key()));
        spans.push(Span::styled(format!(" {}", hint.desc), theme::dim()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::{Hint, required_height, wrap_hints};

    const HINTS: [Hint; 3] = [
        Hint::new("q", "quit"),
        Hint::new("/", "focus"),
        Hint::new("s", "search"),
    ];

    #[test]
    fn hints_wrap_when_the_row_is_full() {
        assert_eq!(wrap_hints(&HINTS, 80).len(), 1);
        assert_eq!(wrap_hints(&HINTS, 12).len(), 3);
        assert_eq!(required_height(80, &[]), 1);
    }
}
