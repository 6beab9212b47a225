//! Header component: app label, operation/error state, and search bar prop flags.

use crate::ui::theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Header payload consumed by the renderer.
#[derive(Debug, Clone)]
pub struct HeaderModel {
    pub app_label: String,
    pub context_label: String,
    pub operation: Option<String>,
    pub error: Option<String>,
    pub flags: Vec<HeaderFlag>,
}

/// On/off badge shown at the right of the header.
#[derive(Debug, Clone, Copy)]
pub struct HeaderFlag {
    pub label: &'static str,
    pub enabled: bool,
}

/// Renders the screen header with title, operation/error state, and flag badges.
pub fn render(frame: &mut Frame<'_>, area: Rect, model: &HeaderModel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut left_spans = vec![
        Span::styled(format!(" {}", model.app_label), theme::title()),
        Span::styled(format!(" {}", model.context_label), theme::dim()),
    ];
    if let Some(error) = &model.error {
        left_spans.push(Span::styled(format!("  error: {error}"), theme::error()));
    } else if let Some(operation) = &model.operation {
        left_spans.push(Span::styled(format!("  {operation}"), theme::info()));
    }

    let flags = flag_line(&model.flags);
    let right_width = u16::try_from(flags.width())
        .unwrap_or(u16::MAX)
        .min(inner.width / 2);
    let columns =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(right_width)]).split(inner);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), columns[0]);
    frame.render_widget(Paragraph::new(flags).alignment(Alignment::Right), columns[1]);
}

fn flag_line(flags: &[HeaderFlag]) -> Line<'static> {
    let mut spans = Vec::new();
    for flag in flags {
        let style = if flag.enabled {
            theme::selected()
        } else {
            theme::dim()
        };
        spans.push(Span::styled(format!(" {} ", flag.label), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
