use crate::ui::theme;
use crate::widget::{IconTrigger, SearchInputController, TextInputSurface};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the bar when the props do not ask for full width.
pub const DEFAULT_BAR_WIDTH: u16 = 48;

const TRIGGER_WIDTH: u16 = 3;
const CURSOR: &str = "▏";

/// Screen areas of a rendered search bar.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SearchBarLayout {
    pub root: Rect,
    pub text: Rect,
    pub search_trigger: Rect,
    pub clear_trigger: Rect,
}

/// Draws the search bar and returns where its parts landed.
pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    bar: &SearchInputController,
) -> SearchBarLayout {
    let props = bar.props();
    let surface = bar.surface();
    let focused = surface.is_focused();
    let disabled = surface.is_disabled();

    let width = if surface.is_full_width() {
        area.width
    } else {
        area.width.min(DEFAULT_BAR_WIDTH)
    };
    let root = Rect { width, ..area };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .style(props.style)
        .border_style(if focused {
            theme::focused_border()
        } else {
            theme::border()
        });
    if let Some(title) = &props.title {
        block = block.title(Span::styled(format!(" {title} "), theme::title()));
    }
    let inner = block.inner(root);
    frame.render_widget(block, root);

    let columns = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(TRIGGER_WIDTH),
        Constraint::Length(TRIGGER_WIDTH),
    ])
    .split(inner);

    let text = text_line(
        bar.value(),
        surface.placeholder(),
        focused,
        disabled,
        usize::from(columns[0].width),
    );
    frame.render_widget(Paragraph::new(text), columns[0]);
    frame.render_widget(
        Paragraph::new(trigger_line(bar.search_trigger())).alignment(Alignment::Center),
        columns[1],
    );
    frame.render_widget(
        Paragraph::new(trigger_line(bar.clear_trigger())).alignment(Alignment::Center),
        columns[2],
    );

    SearchBarLayout {
        root,
        text: columns[0],
        search_trigger: columns[1],
        clear_trigger: columns[2],
    }
}

fn text_line(
    value: &str,
    placeholder: &str,
    focused: bool,
    disabled: bool,
    width: usize,
) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];

    if value.is_empty() {
        if focused {
            spans.push(Span::styled(CURSOR, theme::cursor()));
        }
        spans.push(Span::styled(placeholder.to_owned(), theme::placeholder()));
    } else {
        let reserved = 1 + usize::from(focused);
        let style = if disabled { theme::dim() } else { theme::text() };
        spans.push(Span::styled(
            visible_tail(value, width.saturating_sub(reserved)),
            style,
        ));
        if focused {
            spans.push(Span::styled(CURSOR, theme::cursor()));
        }
    }

    Line::from(spans)
}

fn trigger_line(trigger: &IconTrigger) -> Line<'static> {
    if trigger.is_suppressed() {
        return Line::from(" ");
    }

    let style = if trigger.is_inert() {
        theme::inert_trigger()
    } else {
        theme::trigger()
    };
    Line::from(Span::styled(trigger.glyph().to_owned(), style))
}

/// Keeps the end of `text` that fits in `max_width` terminal cells, so the caret side
/// stays visible. Wide glyphs count as two cells.
fn visible_tail(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }

    let mut used = 0;
    let mut start = text.len();
    for (index, ch) in text.char_indices().rev() {
        let width = ch.width().unwrap_or(0);
        if used + width > max_width {
            break;
        }
        used += width;
        start = index;
    }
    text[start..].to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{SearchBarCallbacks, SearchBarProps};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn props() -> SearchBarProps {
        SearchBarProps {
            search_icon: "⌕".to_owned(),
            close_icon: "✕".to_owned(),
            title: Some("Find".to_owned()),
            ..SearchBarProps::default()
        }
    }

    fn draw(bar: &SearchInputController, width: u16) -> (String, SearchBarLayout) {
        let mut terminal = Terminal::new(TestBackend::new(width, 3)).unwrap();
        let mut layout = None;
        terminal
            .draw(|frame| {
                let area = frame.area();
                layout = Some(render(frame, area, bar));
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..3 {
            for x in 0..width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        (out, layout.unwrap())
    }

    #[test]
    fn empty_bar_shows_placeholder_and_search_trigger_only() {
        let bar = SearchInputController::new(props(), SearchBarCallbacks::default());
        let (out, _) = draw(&bar, 60);

        assert!(out.contains("Search"));
        assert!(out.contains("Find"));
        assert!(out.contains('⌕'));
        assert!(!out.contains('✕'));
    }

    #[test]
    fn typed_bar_shows_value_and_clear_trigger_only() {
        let mut bar = SearchInputController::new(props(), SearchBarCallbacks::default());
        bar.on_input("hello");
        let (out, _) = draw(&bar, 60);

        assert!(out.contains("hello"));
        assert!(!out.contains("Search"));
        assert!(out.contains('✕'));
        assert!(!out.contains('⌕'));
    }

    #[test]
    fn width_is_capped_unless_full_width() {
        let bar = SearchInputController::new(props(), SearchBarCallbacks::default());
        let (_, layout) = draw(&bar, 80);
        assert_eq!(layout.root.width, DEFAULT_BAR_WIDTH);
        assert_eq!(layout.clear_trigger.right(), DEFAULT_BAR_WIDTH - 1);

        let bar = SearchInputController::new(
            SearchBarProps {
                full_width: true,
                ..props()
            },
            SearchBarCallbacks::default(),
        );
        let (_, layout) = draw(&bar, 80);
        assert_eq!(layout.root.width, 80);
    }

    #[test]
    fn long_values_keep_their_tail_visible() {
        assert_eq!(visible_tail("abcdef", 3), "def");
        assert_eq!(visible_tail("abc", 5), "abc");
    }

    #[test]
    fn wide_glyphs_count_two_cells_in_the_tail() {
        assert_eq!(visible_tail("ab検索", 4), "検索");
        assert_eq!(visible_tail("ab検索", 5), "b検索");
        assert_eq!(visible_tail("検索", 3), "索");
        assert_eq!(visible_tail("🔍x", 2), "x");
    }
}
