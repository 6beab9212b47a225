//! Text input surfaces the search bar wraps, and the imperative handle over them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Attributes forwarded unmodified from the search bar props to the surface.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SurfaceAttributes {
    pub placeholder: String,
    pub full_width: bool,
    pub disabled: bool,
}

/// Editable text field supplied by the host environment.
pub trait TextInputSurface {
    /// Takes native input focus.
    fn focus(&mut self);

    /// Releases native input focus.
    fn blur(&mut self);

    fn is_focused(&self) -> bool;

    fn apply_attributes(&mut self, attributes: &SurfaceAttributes);
}

/// Terminal text field: tracks focus and turns key presses into the next raw text.
#[derive(Debug, Clone, Default)]
pub struct TerminalTextSurface {
    focused: bool,
    disabled: bool,
    placeholder: String,
    full_width: bool,
}

impl TerminalTextSurface {
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_full_width(&self) -> bool {
        self.full_width
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the text that results from applying `key` to `current`, or `None` when the
    /// key does not edit the text.
    pub fn edit(&self, current: &str, key: &KeyEvent) -> Option<String> {
        if self.disabled {
            return None;
        }

        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if control => Some(String::new()),
            KeyCode::Char('w') if control => Some(delete_previous_word(current)),
            KeyCode::Char(ch) if !control && !ch.is_control() => {
                let mut next = current.to_owned();
                next.push(ch);
                Some(next)
            }
            KeyCode::Backspace => {
                let mut next = current.to_owned();
                next.pop()?;
                Some(next)
            }
            _ => None,
        }
    }
}

impl TextInputSurface for TerminalTextSurface {
    fn focus(&mut self) {
        if !self.disabled {
            self.focused = true;
        }
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn apply_attributes(&mut self, attributes: &SurfaceAttributes) {
        self.placeholder.clone_from(&attributes.placeholder);
        self.full_width = attributes.full_width;
        self.disabled = attributes.disabled;
        if self.disabled {
            self.focused = false;
        }
    }
}

fn delete_previous_word(current: &str) -> String {
    let without_trailing = current.trim_end();
    let cut = without_trailing
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(0, |(index, ch)| index + ch.len_utf8());
    current[..cut].to_owned()
}

/// Imperative focus control over a search bar's input.
///
/// The handle never exposes the surface itself. It holds a weak reference, so once the
/// owning controller is dropped both operations do nothing.
#[derive(Clone)]
pub struct SearchBarHandle {
    surface: Weak<RefCell<dyn TextInputSurface>>,
}

impl SearchBarHandle {
    pub(crate) fn new(surface: &Rc<RefCell<dyn TextInputSurface>>) -> Self {
        Self {
            surface: Rc::downgrade(surface),
        }
    }

    pub fn focus(&self) {
        if let Some(surface) = self.surface.upgrade() {
            surface.borrow_mut().focus();
        }
    }

    pub fn blur(&self) {
        if let Some(surface) = self.surface.upgrade() {
            surface.borrow_mut().blur();
        }
    }

    /// Whether the search bar this handle points at is still mounted.
    pub fn is_attached(&self) -> bool {
        self.surface.strong_count() > 0
    }
}

impl fmt::Debug for SearchBarHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBarHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    #[test]
    fn printable_chars_append_and_backspace_pops() {
        let surface = TerminalTextSurface::default();
        assert_eq!(
            surface.edit("ca", &key(KeyCode::Char('t'))),
            Some("cat".to_owned())
        );
        assert_eq!(
            surface.edit("cat", &key(KeyCode::Backspace)),
            Some("ca".to_owned())
        );
        assert_eq!(surface.edit("", &key(KeyCode::Backspace)), None);
        assert_eq!(surface.edit("cat", &key(KeyCode::Enter)), None);
    }

    #[test]
    fn control_keys_clear_line_and_delete_word() {
        let surface = TerminalTextSurface::default();
        assert_eq!(surface.edit("hello world", &ctrl('u')), Some(String::new()));
        assert_eq!(
            surface.edit("hello world  ", &ctrl('w')),
            Some("hello ".to_owned())
        );
        assert_eq!(surface.edit("hello", &ctrl('w')), Some(String::new()));
        assert_eq!(surface.edit("x", &ctrl('a')), None);
    }

    #[test]
    fn disabled_surface_refuses_focus_and_edits() {
        let mut surface = TerminalTextSurface::default();
        surface.focus();
        surface.apply_attributes(&SurfaceAttributes {
            placeholder: "Search".to_owned(),
            full_width: false,
            disabled: true,
        });

        assert!(!surface.is_focused());
        surface.focus();
        assert!(!surface.is_focused());
        assert_eq!(surface.edit("a", &key(KeyCode::Char('b'))), None);
        assert_eq!(surface.placeholder(), "Search");
    }

    #[test]
    fn handle_is_noop_after_surface_is_dropped() {
        let surface: Rc<RefCell<dyn TextInputSurface>> =
            Rc::new(RefCell::new(TerminalTextSurface::default()));
        let handle = SearchBarHandle::new(&surface);

        handle.focus();
        assert!(surface.borrow().is_focused());
        handle.blur();
        assert!(!surface.borrow().is_focused());

        drop(surface);
        assert!(!handle.is_attached());
        handle.focus();
        handle.blur();
    }
}
