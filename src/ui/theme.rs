//! Shared styles for the TUI.

use ratatui::style::{Color, Modifier, Style};
use std::sync::{OnceLock, RwLock};

/// Runtime theme palette used by the renderer.
#[derive(Debug, Clone)]
pub struct ThemePalette {
    pub border: Color,
    pub focused_border: Color,
    pub title: Color,
    pub dim: Color,
    pub text: Color,
    pub placeholder: Color,
    pub cursor: Color,
    pub trigger: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub error: Color,
    pub info: Color,
    pub hint_key: Color,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self {
            border: Color::Rgb(196, 120, 50),
            focused_border: Color::Yellow,
            title: Color::Rgb(235, 170, 90),
            dim: Color::DarkGray,
            text: Color::Rgb(210, 210, 200),
            placeholder: Color::DarkGray,
            cursor: Color::Rgb(245, 205, 82),
            trigger: Color::Cyan,
            selected_fg: Color::Black,
            selected_bg: Color::Rgb(226, 180, 92),
            error: Color::Red,
            info: Color::Cyan,
            hint_key: Color::Yellow,
        }
    }
}

static ACTIVE_THEME: OnceLock<RwLock<ThemePalette>> = OnceLock::new();

fn store() -> &'static RwLock<ThemePalette> {
    ACTIVE_THEME.get_or_init(|| RwLock::new(ThemePalette::default()))
}

fn with_palette<T>(f: impl FnOnce(&ThemePalette) -> T) -> T {
    match store().read() {
        Ok(guard) => f(&guard),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

/// Installs the active runtime theme palette.
pub fn apply(palette: ThemePalette) {
    if let Ok(mut guard) = store().write() {
        *guard = palette;
    }
}

pub fn border() -> Style {
    with_palette(|theme| Style::default().fg(theme.border))
}

pub fn focused_border() -> Style {
    with_palette(|theme| Style::default().fg(theme.focused_border))
}

pub fn title() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD)
    })
}

pub fn dim() -> Style {
    with_palette(|theme| Style::default().fg(theme.dim))
}

pub fn text() -> Style {
    with_palette(|theme| Style::default().fg(theme.text))
}

pub fn placeholder() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.placeholder)
            .add_modifier(Modifier::ITALIC)
    })
}

pub fn cursor() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.cursor)
            .add_modifier(Modifier::SLOW_BLINK)
    })
}

pub fn trigger() -> Style {
    with_palette(|theme| {
        Style::default()
            .fg(theme.trigger)
            .add_modifier(Modifier::BOLD)
    })
}

pub fn inert_trigger() -> Style {
    with_palette(|theme| Style::default().fg(theme.dim))
}

pub fn selected() -> Style {
    with_palette(|theme| Style::default().fg(theme.selected_fg).bg(theme.selected_bg))
}

pub fn error() -> Style {
    with_palette(|theme| Style::default().fg(theme.error))
}

pub fn info() -> Style {
    with_palette(|theme| Style::default().fg(theme.info))
}

pub fn hint_key() -> Style {
    with_palette(|theme| Style::default().fg(theme.hint_key))
}
