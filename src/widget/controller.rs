//! Interaction state machine for the search bar.

use crate::widget::surface::{
    SearchBarHandle, SurfaceAttributes, TerminalTextSurface, TextInputSurface,
};
use crate::widget::trigger::IconTrigger;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

pub const DEFAULT_PLACEHOLDER: &str = "Search";
pub const DEFAULT_SEARCH_ICON: &str = "🔍";
pub const DEFAULT_CLOSE_ICON: &str = "✕";

/// Host-supplied configuration for one search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarProps {
    /// Controlled value. A change in content overwrites local edits.
    pub value: String,
    pub disabled: bool,
    pub cancel_on_escape: bool,
    pub placeholder: String,
    pub search_icon: String,
    pub close_icon: String,
    /// Root block style, passed through untouched.
    pub style: Style,
    /// Root block title, passed through untouched.
    pub title: Option<String>,
    pub full_width: bool,
}

impl Default for SearchBarProps {
    fn default() -> Self {
        Self {
            value: String::new(),
            disabled: false,
            cancel_on_escape: false,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            search_icon: DEFAULT_SEARCH_ICON.to_owned(),
            close_icon: DEFAULT_CLOSE_ICON.to_owned(),
            style: Style::default(),
            title: None,
            full_width: false,
        }
    }
}

/// Focus or blur notification, carrying the raw value at the time of the event.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FocusEvent {
    pub value: String,
}

type TextCallback = Box<dyn FnMut(&str)>;
type FocusCallback = Box<dyn FnMut(&FocusEvent)>;
type KeyCallback = Box<dyn FnMut(&KeyEvent)>;
type CancelCallback = Box<dyn FnMut()>;

/// Optional host callbacks. A missing callback silently skips the notification.
#[derive(Default)]
pub struct SearchBarCallbacks {
    on_change: Option<TextCallback>,
    on_focus: Option<FocusCallback>,
    on_blur: Option<FocusCallback>,
    on_key_up: Option<KeyCallback>,
    on_cancel_search: Option<CancelCallback>,
    on_request_search: Option<TextCallback>,
}

impl SearchBarCallbacks {
    pub fn on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn on_focus(mut self, callback: impl FnMut(&FocusEvent) + 'static) -> Self {
        self.on_focus = Some(Box::new(callback));
        self
    }

    pub fn on_blur(mut self, callback: impl FnMut(&FocusEvent) + 'static) -> Self {
        self.on_blur = Some(Box::new(callback));
        self
    }

    pub fn on_key_up(mut self, callback: impl FnMut(&KeyEvent) + 'static) -> Self {
        self.on_key_up = Some(Box::new(callback));
        self
    }

    pub fn on_cancel_search(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_cancel_search = Some(Box::new(callback));
        self
    }

    pub fn on_request_search(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_request_search = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for SearchBarCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBarCallbacks")
            .field("on_change", &self.on_change.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .field("on_key_up", &self.on_key_up.is_some())
            .field("on_cancel_search", &self.on_cancel_search.is_some())
            .field("on_request_search", &self.on_request_search.is_some())
            .finish()
    }
}

/// Returns true for Enter, including the carriage-return and line-feed char codes.
pub fn is_enter(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char('\r' | '\n'))
}

/// Returns true for Escape, including the raw ESC char code.
pub fn is_escape(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('\u{1b}'))
}

/// Owns the search bar value and translates input events into host notifications.
///
/// Every user gesture (`on_input`, `on_focus`, `on_blur`, `on_key`, trigger clicks) is
/// ignored while the bar is disabled. `request_search` and `cancel` are the programmatic
/// entry points and always run.
pub struct SearchInputController<S = TerminalTextSurface> {
    props: SearchBarProps,
    value: String,
    external_value: String,
    callbacks: SearchBarCallbacks,
    surface: Rc<RefCell<S>>,
    search_trigger: IconTrigger,
    clear_trigger: IconTrigger,
}

impl SearchInputController<TerminalTextSurface> {
    pub fn new(props: SearchBarProps, callbacks: SearchBarCallbacks) -> Self {
        Self::with_surface(TerminalTextSurface::default(), props, callbacks)
    }
}

impl<S: TextInputSurface + 'static> SearchInputController<S> {
    pub fn with_surface(surface: S, props: SearchBarProps, callbacks: SearchBarCallbacks) -> Self {
        let mut controller = Self {
            value: props.value.clone(),
            external_value: props.value.clone(),
            search_trigger: IconTrigger::new(props.search_icon.clone()),
            clear_trigger: IconTrigger::new(props.close_icon.clone()),
            props,
            callbacks,
            surface: Rc::new(RefCell::new(surface)),
        };
        controller.sync_surface();
        controller.sync_triggers();
        controller
    }

    /// Replaces the props.
    ///
    /// The value is one-way bound: when `props.value` differs from the last value the host
    /// supplied, it overwrites whatever the user has typed since. Supplying the same value
    /// again leaves local edits alone.
    pub fn set_props(&mut self, props: SearchBarProps) {
        let external_changed = props.value != self.external_value;
        if props.disabled != self.props.disabled {
            log::debug!("search bar disabled: {}", props.disabled);
        }
        self.props = props;

        if external_changed {
            let value = self.props.value.clone();
            self.on_external_value_change(value);
        }

        self.search_trigger.set_glyph(self.props.search_icon.clone());
        self.clear_trigger.set_glyph(self.props.close_icon.clone());
        self.sync_surface();
        self.sync_triggers();
    }

    pub fn props(&self) -> &SearchBarProps {
        &self.props
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_disabled(&self) -> bool {
        self.props.disabled
    }

    pub fn cancel_on_escape(&self) -> bool {
        self.props.cancel_on_escape
    }

    pub fn show_search_icon(&self) -> bool {
        self.value.is_empty()
    }

    pub fn show_clear_icon(&self) -> bool {
        !self.show_search_icon()
    }

    pub fn search_trigger(&self) -> &IconTrigger {
        &self.search_trigger
    }

    pub fn clear_trigger(&self) -> &IconTrigger {
        &self.clear_trigger
    }

    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    pub fn is_focused(&self) -> bool {
        self.surface.borrow().is_focused()
    }

    /// Returns the imperative focus handle for this bar's input.
    pub fn handle(&self) -> SearchBarHandle {
        let surface: Rc<RefCell<dyn TextInputSurface>> = self.surface.clone();
        SearchBarHandle::new(&surface)
    }

    pub fn on_external_value_change(&mut self, new_value: String) {
        log::debug!("external value overwrote local value {:?}", self.value);
        self.external_value.clone_from(&new_value);
        self.value = new_value;
        self.sync_triggers();
    }

    pub fn on_focus(&mut self, event: &FocusEvent) {
        if self.props.disabled {
            return;
        }
        if let Some(callback) = self.callbacks.on_focus.as_mut() {
            callback(event);
        }
    }

    pub fn on_blur(&mut self, event: &FocusEvent) {
        if self.props.disabled {
            return;
        }
        let trimmed = self.value.trim();
        if trimmed.len() != self.value.len() {
            self.value = trimmed.to_owned();
            self.sync_triggers();
        }
        if let Some(callback) = self.callbacks.on_blur.as_mut() {
            callback(event);
        }
    }

    pub fn on_input(&mut self, raw_text: &str) {
        if self.props.disabled {
            return;
        }
        self.value = raw_text.to_owned();
        self.sync_triggers();
        if let Some(callback) = self.callbacks.on_change.as_mut() {
            callback(raw_text);
        }
    }

    pub fn on_key(&mut self, key: &KeyEvent) {
        if self.props.disabled {
            return;
        }
        if is_enter(key) {
            self.request_search();
        } else if self.props.cancel_on_escape && is_escape(key) {
            self.cancel();
        }
        if let Some(callback) = self.callbacks.on_key_up.as_mut() {
            callback(key);
        }
    }

    /// Reports the current value, untrimmed, to the host.
    pub fn request_search(&mut self) {
        log::debug!("search requested for {:?}", self.value);
        if let Some(callback) = self.callbacks.on_request_search.as_mut() {
            callback(&self.value);
        }
    }

    /// Clears the value and notifies the host, even when the value was already empty.
    pub fn cancel(&mut self) {
        log::debug!("search cancelled");
        self.value.clear();
        self.sync_triggers();
        if let Some(callback) = self.callbacks.on_cancel_search.as_mut() {
            callback();
        }
    }

    pub fn click_search_trigger(&mut self) {
        if self.search_trigger.is_interactive() {
            self.request_search();
        }
    }

    pub fn click_clear_trigger(&mut self) {
        if self.clear_trigger.is_interactive() {
            self.cancel();
        }
    }

    /// Snapshot of the current value, for building focus and blur events.
    pub fn focus_event(&self) -> FocusEvent {
        FocusEvent {
            value: self.value.clone(),
        }
    }

    fn sync_surface(&mut self) {
        self.surface
            .borrow_mut()
            .apply_attributes(&SurfaceAttributes {
                placeholder: self.props.placeholder.clone(),
                full_width: self.props.full_width,
                disabled: self.props.disabled,
            });
    }

    fn sync_triggers(&mut self) {
        let empty = self.value.is_empty();
        self.search_trigger.set_suppressed(!empty);
        self.clear_trigger.set_suppressed(empty);
        self.search_trigger.set_inert(self.props.disabled);
        self.clear_trigger.set_inert(self.props.disabled);
    }
}

impl<S: fmt::Debug> fmt::Debug for SearchInputController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchInputController")
            .field("props", &self.props)
            .field("value", &self.value)
            .field("external_value", &self.external_value)
            .field("callbacks", &self.callbacks)
            .field("surface", &self.surface)
            .field("search_trigger", &self.search_trigger)
            .field("clear_trigger", &self.clear_trigger)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[derive(Debug, Clone, Eq, PartialEq)]
    enum Notification {
        Change(String),
        Focus(String),
        Blur(String),
        KeyUp(KeyCode),
        Cancel,
        Search(String),
    }

    type Log = Rc<RefCell<Vec<Notification>>>;

    fn recording_callbacks(log: &Log) -> SearchBarCallbacks {
        let change = Rc::clone(log);
        let focus = Rc::clone(log);
        let blur = Rc::clone(log);
        let key_up = Rc::clone(log);
        let cancel = Rc::clone(log);
        let search = Rc::clone(log);
        SearchBarCallbacks::default()
            .on_change(move |text| {
                change
                    .borrow_mut()
                    .push(Notification::Change(text.to_owned()))
            })
            .on_focus(move |event| {
                focus
                    .borrow_mut()
                    .push(Notification::Focus(event.value.clone()))
            })
            .on_blur(move |event| {
                blur.borrow_mut()
                    .push(Notification::Blur(event.value.clone()))
            })
            .on_key_up(move |key| key_up.borrow_mut().push(Notification::KeyUp(key.code)))
            .on_cancel_search(move || cancel.borrow_mut().push(Notification::Cancel))
            .on_request_search(move |text| {
                search
                    .borrow_mut()
                    .push(Notification::Search(text.to_owned()))
            })
    }

    fn recording_controller(props: SearchBarProps) -> (SearchInputController, Log) {
        let log = Log::default();
        let controller = SearchInputController::new(props, recording_callbacks(&log));
        (controller, log)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn blur(controller: &mut SearchInputController) {
        let event = controller.focus_event();
        controller.on_blur(&event);
    }

    #[test]
    fn input_replaces_value_verbatim_and_notifies() {
        let (mut controller, log) = recording_controller(SearchBarProps::default());

        controller.on_input("  cat ");

        assert_eq!(controller.value(), "  cat ");
        assert_eq!(*log.borrow(), vec![Notification::Change("  cat ".to_owned())]);
    }

    #[test]
    fn blur_trims_value_but_forwards_untrimmed_event() {
        let (mut controller, log) = recording_controller(SearchBarProps::default());
        controller.on_input("  cat ");
        log.borrow_mut().clear();

        blur(&mut controller);

        assert_eq!(controller.value(), "cat");
        assert_eq!(*log.borrow(), vec![Notification::Blur("  cat ".to_owned())]);
    }

    #[test]
    fn blur_trims_without_a_blur_callback() {
        let mut controller =
            SearchInputController::new(SearchBarProps::default(), SearchBarCallbacks::default());
        controller.on_input("\t dog  ");

        blur(&mut controller);

        assert_eq!(controller.value(), "dog");
    }

    #[test]
    fn blur_collapses_whitespace_only_value_to_empty() {
        let (mut controller, _log) = recording_controller(SearchBarProps::default());
        controller.on_input("   ");
        assert!(controller.show_clear_icon());

        blur(&mut controller);

        assert_eq!(controller.value(), "");
        assert!(controller.show_search_icon());
        assert!(controller.search_trigger().is_interactive());
        assert!(controller.clear_trigger().is_suppressed());
    }

    #[test]
    fn focus_forwards_event_without_touching_state() {
        let (mut controller, log) = recording_controller(SearchBarProps::default());
        controller.on_input(" a ");
        log.borrow_mut().clear();

        let event = controller.focus_event();
        controller.on_focus(&event);

        assert_eq!(controller.value(), " a ");
        assert_eq!(*log.borrow(), vec![Notification::Focus(" a ".to_owned())]);
    }

    #[test]
    fn request_search_reports_untrimmed_value_each_time() {
        let (mut controller, log) = recording_controller(SearchBarProps::default());
        controller.on_input(" rust ");
        log.borrow_mut().clear();

        controller.request_search();
        controller.request_search();

        assert_eq!(controller.value(), " rust ");
        assert_eq!(
            *log.borrow(),
            vec![
                Notification::Search(" rust ".to_owned()),
                Notification::Search(" rust ".to_owned()),
            ]
        );
    }

    #[test]
    fn cancel_clears_value_and_notifies_even_when_empty() {
        let (mut controller, log) = recording_controller(SearchBarProps::default());
        controller.on_input("query");
        log.borrow_mut().clear();

        controller.cancel();
        assert_eq!(controller.value(), "");
        controller.cancel();
        assert_eq!(controller.value(), "");

        assert_eq!(
            *log.borrow(),
            vec![Notification::Cancel, Notification::Cancel]
        );
    }

    #[test]
    fn cancel_clears_value_without_a_callback() {
        let mut controller =
            SearchInputController::new(SearchBarProps::default(), SearchBarCallbacks::default());
        controller.on_input("query");

        controller.cancel();

        assert_eq!(controller.value(), "");
    }

    #[test]
    fn enter_requests_search_then_forwards_key() {
        let (mut controller, log) = recording_controller(SearchBarProps::default());
        controller.on_input("x");
        log.borrow_mut().clear();

        controller.on_key(&key(KeyCode::Enter));
        controller.on_key(&key(KeyCode::Char('\r')));
        controller.on_key(&key(KeyCode::Char('\n')));

        assert_eq!(
            *log.borrow(),
            vec![
                Notification::Search("x".to_owned()),
                Notification::KeyUp(KeyCode::Enter),
                Notification::Search("x".to_owned()),
                Notification::KeyUp(KeyCode::Char('\r')),
                Notification::Search("x".to_owned()),
                Notification::KeyUp(KeyCode::Char('\n')),
            ]
        );
    }

    #[test]
    fn escape_cancels_only_when_enabled() {
        let (mut controller, log) = recording_controller(SearchBarProps::default());
        controller.on_input("x");
        log.borrow_mut().clear();

        controller.on_key(&key(KeyCode::Esc));
        controller.on_key(&key(KeyCode::Char('\u{1b}')));
        assert_eq!(controller.value(), "x");
        assert_eq!(
            *log.borrow(),
            vec![
                Notification::KeyUp(KeyCode::Esc),
                Notification::KeyUp(KeyCode::Char('\u{1b}')),
            ]
        );

        let (mut controller, log) = recording_controller(SearchBarProps {
            cancel_on_escape: true,
            ..SearchBarProps::default()
        });
        controller.on_input("x");
        log.borrow_mut().clear();

        controller.on_key(&key(KeyCode::Esc));
        assert_eq!(controller.value(), "");

        controller.on_input("y");
        controller.on_key(&key(KeyCode::Char('\u{1b}')));
        assert_eq!(controller.value(), "");
        assert_eq!(
            *log.borrow(),
            vec![
                Notification::Cancel,
                Notification::KeyUp(KeyCode::Esc),
                Notification::Change("y".to_owned()),
                Notification::Cancel,
                Notification::KeyUp(KeyCode::Char('\u{1b}')),
            ]
        );
    }

    #[test]
    fn other_keys_are_only_forwarded() {
        let (mut controller, log) = recording_controller(SearchBarProps {
            cancel_on_escape: true,
            ..SearchBarProps::default()
        });
        controller.on_input("x");
        log.borrow_mut().clear();

        controller.on_key(&key(KeyCode::Char('a')));

        assert_eq!(controller.value(), "x");
        assert_eq!(*log.borrow(), vec![Notification::KeyUp(KeyCode::Char('a'))]);
    }

    #[test]
    fn icon_flags_are_complementary() {
        let (mut controller, _log) = recording_controller(SearchBarProps::default());
        for value in ["", " ", "a", "hello world", ""] {
            controller.on_input(value);
            assert_eq!(controller.show_search_icon(), value.is_empty());
            assert_ne!(controller.show_search_icon(), controller.show_clear_icon());
            assert_eq!(
                controller.search_trigger().is_suppressed(),
                !controller.show_search_icon()
            );
            assert_eq!(
                controller.clear_trigger().is_suppressed(),
                !controller.show_clear_icon()
            );
        }
    }

    #[test]
    fn disabled_bar_ignores_every_gesture() {
        let (mut controller, log) = recording_controller(SearchBarProps {
            value: "keep".to_owned(),
            disabled: true,
            cancel_on_escape: true,
            ..SearchBarProps::default()
        });

        controller.on_input("changed");
        let event = controller.focus_event();
        controller.on_focus(&event);
        controller.on_blur(&event);
        controller.on_key(&key(KeyCode::Enter));
        controller.on_key(&key(KeyCode::Esc));
        controller.click_search_trigger();
        controller.click_clear_trigger();

        assert_eq!(controller.value(), "keep");
        assert!(log.borrow().is_empty());
        assert!(controller.search_trigger().is_inert());
        assert!(controller.clear_trigger().is_inert());
        assert!(!controller.search_trigger().is_interactive());
        assert!(!controller.clear_trigger().is_interactive());
    }

    #[test]
    fn disabling_drops_surface_focus() {
        let (mut controller, _log) = recording_controller(SearchBarProps::default());
        let handle = controller.handle();
        handle.focus();
        assert!(controller.is_focused());

        controller.set_props(SearchBarProps {
            disabled: true,
            ..SearchBarProps::default()
        });

        assert!(!controller.is_focused());
        handle.focus();
        assert!(!controller.is_focused());
    }

    #[test]
    fn external_value_change_overwrites_local_edits() {
        let (mut controller, _log) = recording_controller(SearchBarProps::default());
        controller.on_input("typed");

        controller.set_props(SearchBarProps {
            value: "x".to_owned(),
            ..SearchBarProps::default()
        });
        controller.set_props(SearchBarProps {
            value: "y".to_owned(),
            ..SearchBarProps::default()
        });

        assert_eq!(controller.value(), "y");
        assert!(controller.show_clear_icon());
    }

    #[test]
    fn unchanged_external_value_keeps_local_edits() {
        let (mut controller, _log) = recording_controller(SearchBarProps {
            value: "start".to_owned(),
            ..SearchBarProps::default()
        });
        controller.on_input("typed");

        controller.set_props(SearchBarProps {
            value: "start".to_owned(),
            cancel_on_escape: true,
            ..SearchBarProps::default()
        });

        assert_eq!(controller.value(), "typed");
        assert!(controller.cancel_on_escape());
    }

    #[test]
    fn external_empty_value_can_clear_the_field() {
        let (mut controller, log) = recording_controller(SearchBarProps {
            value: "start".to_owned(),
            ..SearchBarProps::default()
        });

        controller.set_props(SearchBarProps::default());

        assert_eq!(controller.value(), "");
        assert!(controller.show_search_icon());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn handle_controls_focus_without_touching_value() {
        let (mut controller, log) = recording_controller(SearchBarProps::default());
        controller.on_input(" spaced ");
        log.borrow_mut().clear();
        let handle = controller.handle();

        handle.focus();
        assert!(controller.is_focused());
        handle.blur();
        assert!(!controller.is_focused());

        assert_eq!(controller.value(), " spaced ");
        assert!(log.borrow().is_empty());

        drop(controller);
        assert!(!handle.is_attached());
        handle.focus();
    }

    #[test]
    fn swapped_glyphs_reach_the_triggers() {
        let (mut controller, _log) = recording_controller(SearchBarProps::default());
        assert_eq!(controller.search_trigger().glyph(), DEFAULT_SEARCH_ICON);

        controller.set_props(SearchBarProps {
            search_icon: "?".to_owned(),
            close_icon: "x".to_owned(),
            ..SearchBarProps::default()
        });

        assert_eq!(controller.search_trigger().glyph(), "?");
        assert_eq!(controller.clear_trigger().glyph(), "x");
        assert_eq!(controller.surface().placeholder(), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn type_blur_search_then_clear() {
        let (mut controller, log) = recording_controller(SearchBarProps::default());

        controller.on_input("  hello  ");
        assert_eq!(controller.value(), "  hello  ");
        assert!(!controller.show_search_icon());
        assert!(controller.show_clear_icon());

        blur(&mut controller);
        assert_eq!(controller.value(), "hello");

        controller.on_key(&key(KeyCode::Enter));
        controller.click_search_trigger();
        controller.click_clear_trigger();

        assert_eq!(controller.value(), "");
        assert!(controller.show_search_icon());
        assert_eq!(
            *log.borrow(),
            vec![
                Notification::Change("  hello  ".to_owned()),
                Notification::Blur("  hello  ".to_owned()),
                Notification::Search("hello".to_owned()),
                Notification::KeyUp(KeyCode::Enter),
                Notification::Cancel,
            ]
        );
    }
}
