//! Demo host state: the mounted search bar, its props, and what the host does with its callbacks.

use crate::app::events::{AppMessage, SearchDispatch, WidgetNotification, dispatch_search};
use crate::domain::CatalogItem;
use crate::fixtures::{self, PRESET_VALUES};
use crate::ui::components::search_bar::SearchBarLayout;
use crate::widget::{SearchBarCallbacks, SearchBarHandle, SearchBarProps, SearchInputController};
use crossterm::event::KeyEvent;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Spinner frames used for active async operations.
pub const SPINNER_FRAMES: [&str; 8] = ["⢎⡰", "⢎⡡", "⢎⡑", "⢎⠱", "⠎⡱", "⢊⡱", "⢌⡱", "⢆⡱"];

const ACTION_LOG_CAPACITY: usize = 64;

/// Top-level mutable application state.
#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,
    pub error_message: Option<String>,
    /// Props the host last handed to the search bar.
    pub props: SearchBarProps,
    pub search_bar: SearchInputController,
    pub catalog: Arc<[CatalogItem]>,
    pub results: Vec<usize>,
    pub selected: usize,
    pub actions: ActionLog,
    /// Screen areas of the search bar from the last frame, for mouse hit-testing.
    pub search_bar_layout: Option<SearchBarLayout>,
    input_handle: SearchBarHandle,
    pending_query: Option<String>,
    preset_index: usize,
    dispatch: SearchDispatch,
    tx: UnboundedSender<AppMessage>,
    operation: Option<OperationState>,
}

impl AppState {
    pub fn new(
        props: SearchBarProps,
        dispatch: SearchDispatch,
        tx: UnboundedSender<AppMessage>,
    ) -> Self {
        let search_bar = SearchInputController::new(props.clone(), widget_callbacks(&tx));
        let input_handle = search_bar.handle();

        Self {
            should_quit: false,
            error_message: None,
            props,
            search_bar,
            catalog: fixtures::demo_catalog().into(),
            results: Vec::new(),
            selected: 0,
            actions: ActionLog::default(),
            search_bar_layout: None,
            input_handle,
            pending_query: None,
            preset_index: 0,
            dispatch,
            tx,
            operation: None,
        }
    }

    /// Applies one message from the event loop channel.
    pub fn process_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::Widget(notification) => {
                self.actions.push(notification.clone());
                match notification {
                    WidgetNotification::SearchRequested(query) => self.start_search(query),
                    WidgetNotification::SearchCancelled => self.clear_search(),
                    WidgetNotification::Changed(_)
                    | WidgetNotification::Focused(_)
                    | WidgetNotification::Blurred(_)
                    | WidgetNotification::KeyUp(_) => {}
                }
            }
            AppMessage::SearchCompleted { query, results } => {
                if self.pending_query.as_deref() != Some(query.as_str()) {
                    log::debug!("dropping stale results for {query:?}");
                    return;
                }
                self.pending_query = None;
                self.end_operation();
                self.results = results;
                self.selected = 0;
                self.error_message = if self.results.is_empty() {
                    Some(format!("no matches for {:?}", query.trim()))
                } else {
                    None
                };
            }
        }
    }

    fn start_search(&mut self, query: String) {
        if query.trim().is_empty() {
            self.pending_query = None;
            self.end_operation();
            self.results.clear();
            self.selected = 0;
            self.error_message = Some("search query is empty".to_owned());
            return;
        }

        self.error_message = None;
        self.begin_operation(format!("Searching for {:?}", query.trim()));
        self.pending_query = Some(query.clone());
        dispatch_search(
            self.dispatch,
            self.tx.clone(),
            Arc::clone(&self.catalog),
            query,
        );
    }

    fn clear_search(&mut self) {
        self.pending_query = None;
        self.end_operation();
        self.error_message = None;
        self.results.clear();
        self.selected = 0;
    }

    /// Moves focus into the input the way a user gesture would.
    pub fn focus_input(&mut self) {
        if self.search_bar.is_focused() {
            return;
        }
        self.input_handle.focus();
        if self.search_bar.is_focused() {
            let event = self.search_bar.focus_event();
            self.search_bar.on_focus(&event);
        }
    }

    /// Moves focus out of the input the way a user gesture would.
    pub fn blur_input(&mut self) {
        if !self.search_bar.is_focused() {
            return;
        }
        self.input_handle.blur();
        let event = self.search_bar.focus_event();
        self.search_bar.on_blur(&event);
    }

    /// Routes a key press to the focused input: surface edit first, then the key itself.
    pub fn type_key(&mut self, key: &KeyEvent) {
        let edited = self.search_bar.surface().edit(self.search_bar.value(), key);
        if let Some(text) = edited {
            self.search_bar.on_input(&text);
        }
        self.search_bar.on_key(key);
    }

    /// Replaces the search bar value verbatim, as if the text were pasted in.
    pub fn type_text(&mut self, text: &str) {
        self.search_bar.on_input(text);
    }

    pub fn toggle_disabled(&mut self) {
        self.props.disabled = !self.props.disabled;
        self.push_props();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.props.disabled = disabled;
        self.push_props();
    }

    pub fn toggle_cancel_on_escape(&mut self) {
        self.props.cancel_on_escape = !self.props.cancel_on_escape;
        self.push_props();
    }

    pub fn set_cancel_on_escape(&mut self, enabled: bool) {
        self.props.cancel_on_escape = enabled;
        self.push_props();
    }

    pub fn toggle_full_width(&mut self) {
        self.props.full_width = !self.props.full_width;
        self.push_props();
    }

    /// Sets the controlled value; this overwrites local edits when the content changes.
    pub fn set_external_value(&mut self, value: impl Into<String>) {
        self.props.value = value.into();
        self.push_props();
    }

    /// Pushes the next preset value into the props.
    pub fn cycle_preset_value(&mut self) {
        let value = PRESET_VALUES[self.preset_index % PRESET_VALUES.len()];
        self.preset_index += 1;
        self.set_external_value(value);
    }

    fn push_props(&mut self) {
        self.search_bar.set_props(self.props.clone());
    }

    pub fn selected_result(&self) -> Option<&CatalogItem> {
        let index = *self.results.get(self.selected)?;
        self.catalog.get(index)
    }

    pub fn move_down(&mut self) {
        if self.results.is_empty() {
            self.selected = 0;
            return;
        }

        self.selected = (self.selected + 1).min(self.results.len() - 1);
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn begin_operation(&mut self, label: impl Into<String>) {
        self.operation = Some(OperationState {
            label: label.into(),
            spinner_index: 0,
        });
    }

    pub fn end_operation(&mut self) {
        self.operation = None;
    }

    pub fn is_busy(&self) -> bool {
        self.operation.is_some()
    }

    pub fn advance_spinner(&mut self) {
        if let Some(operation) = self.operation.as_mut() {
            operation.spinner_index = (operation.spinner_index + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn operation_display(&self) -> Option<String> {
        let operation = self.operation.as_ref()?;
        let frame = SPINNER_FRAMES
            .get(operation.spinner_index)
            .copied()
            .unwrap_or("⢎⡰");
        Some(format!("{frame} {}", operation.label))
    }
}

fn widget_callbacks(tx: &UnboundedSender<AppMessage>) -> SearchBarCallbacks {
    let changed = notifier(tx);
    let focused = notifier(tx);
    let blurred = notifier(tx);
    let key_up = notifier(tx);
    let requested = notifier(tx);
    let cancelled = notifier(tx);

    SearchBarCallbacks::default()
        .on_change(move |text| changed(WidgetNotification::Changed(text.to_owned())))
        .on_focus(move |event| focused(WidgetNotification::Focused(event.clone())))
        .on_blur(move |event| blurred(WidgetNotification::Blurred(event.clone())))
        .on_key_up(move |key| key_up(WidgetNotification::KeyUp(*key)))
        .on_request_search(move |text| {
            requested(WidgetNotification::SearchRequested(text.to_owned()))
        })
        .on_cancel_search(move || cancelled(WidgetNotification::SearchCancelled))
}

fn notifier(tx: &UnboundedSender<AppMessage>) -> impl Fn(WidgetNotification) + 'static {
    let tx = tx.clone();
    move |notification| {
        let _ = tx.send(AppMessage::Widget(notification));
    }
}

/// Bounded log of the callbacks the search bar fired, newest last.
#[derive(Debug, Default)]
pub struct ActionLog {
    entries: VecDeque<ActionEntry>,
    next_sequence: u64,
}

#[derive(Debug, Clone)]
pub struct ActionEntry {
    pub sequence: u64,
    pub notification: WidgetNotification,
}

impl ActionLog {
    pub fn push(&mut self, notification: WidgetNotification) {
        if self.entries.len() == ACTION_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.next_sequence += 1;
        self.entries.push_back(ActionEntry {
            sequence: self.next_sequence,
            notification,
        });
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &ActionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
struct OperationState {
    label: String,
    spinner_index: usize,
}
