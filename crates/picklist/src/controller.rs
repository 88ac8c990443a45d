//! The selection/interaction controller.
//!
//! [`Autocomplete`] holds the interaction state of one autocomplete widget:
//! whether the panel is open, the current query, the filtered results, the
//! keyboard highlight and the scroll viewport. It reacts to input events,
//! key presses and document pointer events, and proposes selection changes
//! through its [`changed`](Autocomplete::changed) signal.
//!
//! The selection value is owned by the caller. `choose_option` never edits
//! the controller's copy; the caller applies the proposed set with
//! [`set_value`](Autocomplete::set_value).
//!
//! # States
//!
//! | State         | Open | Loading | Panel visible |
//! |---------------|------|---------|---------------|
//! | `Closed`      | no   | any     | no            |
//! | `OpenIdle`    | yes  | no      | yes           |
//! | `OpenLoading` | yes  | yes     | no            |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use picklist::{Autocomplete, Key, PickOption, SelectionSet};
//!
//! let proposed = Arc::new(Mutex::new(None));
//! let mut autocomplete = Autocomplete::new()
//!     .with_multiple(true)
//!     .with_options(vec![
//!         PickOption::labeled("Canada", "CA"),
//!         PickOption::labeled("France", "FR"),
//!     ]);
//!
//! let sink = proposed.clone();
//! autocomplete.changed.connect(move |value: &SelectionSet| {
//!     *sink.lock() = Some(value.clone());
//! });
//!
//! autocomplete.on_focus();
//! autocomplete.on_input_change("fra");
//! autocomplete.on_key_down(Key::ArrowDown);
//! autocomplete.on_key_down(Key::Enter);
//!
//! let value = proposed.lock().take().unwrap();
//! assert_eq!(value.as_slice(), &[PickOption::labeled("France", "FR")]);
//! autocomplete.set_value(value);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use picklist_core::logging::targets;
use picklist_core::Signal;

use crate::config::AutocompleteConfig;
use crate::filter::{OptionFilter, SubstringFilter};
use crate::navigation::{self, Key};
use crate::option::PickOption;
use crate::render::{
    default_row, Chip, InputView, OptionDelegate, PanelRow, PanelView, NO_RESULTS_TEXT,
};
use crate::scroll::{ScrollBehavior, ScrollRequest, ScrollViewport};
use crate::selection::{SelectionMode, SelectionSet};

/// An autocomplete shared with document listeners.
pub type SharedAutocomplete = Arc<Mutex<Autocomplete>>;

/// The visible state of the results panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    OpenIdle,
    /// Open, but hidden while the caller reports loading.
    OpenLoading,
}

/// The raw input notification passed to `input_changed` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    /// The full text of the input after the change.
    pub value: String,
}

/// A searchable, selectable dropdown input.
///
/// # Signals
///
/// Slots run while the controller is borrowed (or locked, when shared).
/// They must not call back into the same controller; record what they need
/// and apply it after the call returns.
///
/// - `changed(SelectionSet)`: a selection change was proposed
/// - `input_changed(InputEvent)`: the query text changed
/// - `highlighted(i32)`: the keyboard highlight moved
/// - `scroll_requested(ScrollRequest)`: the highlighted row needs scrolling
/// - `open_changed(bool)`: the panel opened or closed
pub struct Autocomplete {
    options: Vec<PickOption>,
    value: SelectionSet,
    mode: SelectionMode,
    loading: bool,
    disabled: bool,

    label: String,
    placeholder: String,
    description: String,

    filter: Box<dyn OptionFilter>,
    delegate: Option<Box<dyn OptionDelegate>>,

    open: bool,
    query: String,
    /// Filtered options for a non-empty query; unused when the query is empty.
    results: Vec<PickOption>,
    highlighted_index: i32,
    viewport: ScrollViewport,

    // Signals
    /// Emitted with the proposed selection after an option is chosen.
    pub changed: Signal<SelectionSet>,
    /// Emitted when the query text changes.
    pub input_changed: Signal<InputEvent>,
    /// Emitted when the highlight index changes.
    pub highlighted: Signal<i32>,
    /// Emitted when the highlighted row must be scrolled into view.
    pub scroll_requested: Signal<ScrollRequest>,
    /// Emitted when the panel opens or closes.
    pub open_changed: Signal<bool>,
}

impl Autocomplete {
    /// Create an empty, closed, single-select autocomplete.
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            value: SelectionSet::new(),
            mode: SelectionMode::Single,
            loading: false,
            disabled: false,
            label: String::new(),
            placeholder: String::new(),
            description: String::new(),
            filter: Box::new(SubstringFilter::default()),
            delegate: None,
            open: false,
            query: String::new(),
            results: Vec::new(),
            highlighted_index: -1,
            viewport: ScrollViewport::default(),
            changed: Signal::new(),
            input_changed: Signal::new(),
            highlighted: Signal::new(),
            scroll_requested: Signal::new(),
            open_changed: Signal::new(),
        }
    }

    /// Create an autocomplete from plain-data configuration.
    pub fn from_config(config: &AutocompleteConfig) -> Self {
        Self::new()
            .with_options(config.options.clone())
            .with_multiple(config.multiple)
            .with_disabled(config.disabled)
            .with_label(config.label.clone())
            .with_placeholder(config.placeholder.clone())
            .with_description(config.description.clone())
            .with_max_visible_items(config.max_visible_items)
            .with_filter(Box::new(config.filter()))
    }

    /// Wrap in an `Arc<Mutex<_>>` for [`mount`](crate::boundary::mount).
    pub fn into_shared(self) -> SharedAutocomplete {
        Arc::new(Mutex::new(self))
    }

    // =========================================================================
    // Caller-owned props
    // =========================================================================

    /// The candidate options.
    pub fn options(&self) -> &[PickOption] {
        &self.options
    }

    /// Replace the candidate options.
    ///
    /// A non-empty query is filtered again and the highlight is clamped to
    /// the new displayed list.
    pub fn set_options(&mut self, options: Vec<PickOption>) {
        self.options = options;
        self.refresh_results();
        self.clamp_to_displayed();
    }

    /// Set options using builder pattern.
    pub fn with_options(mut self, options: Vec<PickOption>) -> Self {
        self.set_options(options);
        self
    }

    /// The current selection, as last applied by the caller.
    pub fn value(&self) -> &SelectionSet {
        &self.value
    }

    /// Apply the caller-owned selection.
    pub fn set_value(&mut self, value: impl Into<SelectionSet>) {
        self.value = value.into();
        tracing::trace!(target: targets::CONTROLLER, selected = self.value.len(), "value applied");
    }

    /// Set value using builder pattern.
    pub fn with_value(mut self, value: impl Into<SelectionSet>) -> Self {
        self.set_value(value);
        self
    }

    /// Single or multiple selection.
    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Whether multiple options may be selected.
    pub fn is_multiple(&self) -> bool {
        self.mode.is_multiple()
    }

    /// Switch between single and multiple selection.
    ///
    /// The current value is left untouched; it belongs to the caller.
    pub fn set_multiple(&mut self, multiple: bool) {
        self.mode = SelectionMode::from_multiple(multiple);
    }

    /// Set multiple selection using builder pattern.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.set_multiple(multiple);
        self
    }

    /// Whether the caller reports a pending load.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Set the caller-supplied loading flag.
    ///
    /// While loading, the panel is hidden and query updates are ignored.
    pub fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            tracing::debug!(target: targets::CONTROLLER, loading, state = ?self.state(), "loading changed");
            self.reveal_highlight();
        }
    }

    /// Whether the text input is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disable or enable the text input.
    ///
    /// A disabled input produces no input, key or focus events.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Set disabled using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the filter engine.
    ///
    /// The filter fully overrides default matching; a non-empty query is
    /// filtered again immediately.
    pub fn set_filter(&mut self, filter: Box<dyn OptionFilter>) {
        self.filter = filter;
        self.refresh_results();
        self.clamp_to_displayed();
    }

    /// Set filter using builder pattern.
    pub fn with_filter(mut self, filter: Box<dyn OptionFilter>) -> Self {
        self.set_filter(filter);
        self
    }

    /// Replace the row renderer. `None` restores the default rows.
    pub fn set_delegate(&mut self, delegate: Option<Box<dyn OptionDelegate>>) {
        self.delegate = delegate;
    }

    /// Set a row renderer using builder pattern.
    pub fn with_delegate(mut self, delegate: Box<dyn OptionDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Maximum number of rows visible at once in the panel.
    pub fn max_visible_items(&self) -> usize {
        self.viewport.max_visible_items()
    }

    /// Set the maximum number of visible rows (at least 1).
    pub fn set_max_visible_items(&mut self, count: usize) {
        self.viewport.set_max_visible_items(count);
        self.viewport.clamp_to(self.displayed_len());
    }

    /// Set maximum visible rows using builder pattern.
    pub fn with_max_visible_items(mut self, count: usize) -> Self {
        self.set_max_visible_items(count);
        self
    }

    // =========================================================================
    // Interaction state
    // =========================================================================

    /// Whether the panel is open (it may still be hidden while loading).
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The current panel state.
    pub fn state(&self) -> PanelState {
        match (self.open, self.loading) {
            (false, _) => PanelState::Closed,
            (true, false) => PanelState::OpenIdle,
            (true, true) => PanelState::OpenLoading,
        }
    }

    /// Whether the results panel is on screen.
    pub fn is_panel_visible(&self) -> bool {
        self.state() == PanelState::OpenIdle
    }

    /// The current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Filtered options for the current query. Empty when the query is empty.
    pub fn results(&self) -> &[PickOption] {
        &self.results
    }

    /// The list the panel shows: all options for an empty query, the
    /// filtered results otherwise.
    pub fn displayed(&self) -> &[PickOption] {
        if self.query.is_empty() {
            &self.options
        } else {
            &self.results
        }
    }

    fn displayed_len(&self) -> usize {
        self.displayed().len()
    }

    /// The keyboard highlight, -1 when nothing is highlighted.
    pub fn highlighted_index(&self) -> i32 {
        self.highlighted_index
    }

    /// The highlighted option, if any.
    pub fn highlighted_option(&self) -> Option<&PickOption> {
        usize::try_from(self.highlighted_index)
            .ok()
            .and_then(|index| self.displayed().get(index))
    }

    /// The results viewport.
    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }

    /// Open the panel.
    pub fn open(&mut self) {
        self.set_open(true);
    }

    /// Close the panel. The highlight is kept.
    pub fn close(&mut self) {
        self.set_open(false);
    }

    fn set_open(&mut self, open: bool) {
        if self.open == open {
            return;
        }
        self.open = open;
        tracing::debug!(target: targets::CONTROLLER, open, state = ?self.state(), "panel toggled");
        self.open_changed.emit(open);
        self.reveal_highlight();
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// The input region received focus.
    pub fn on_focus(&mut self) {
        if self.disabled {
            return;
        }
        self.open();
    }

    /// A document pointer event happened inside or outside the widget.
    ///
    /// Any interaction inside the widget opens the panel, including one
    /// right after Escape closed it. Anything outside closes it.
    pub fn on_pointer_event(&mut self, inside: bool) {
        tracing::trace!(target: targets::BOUNDARY, inside, "pointer event");
        self.set_open(inside);
    }

    /// The input text changed.
    ///
    /// Ignored while loading. Otherwise the query is replaced, the highlight
    /// cleared, the results recomputed and `input_changed` emitted.
    #[tracing::instrument(skip(self, text), target = "picklist::controller", level = "trace")]
    pub fn on_input_change(&mut self, text: impl Into<String>) {
        if self.loading || self.disabled {
            tracing::trace!(target: targets::CONTROLLER, loading = self.loading, "input change ignored");
            return;
        }

        self.query = text.into();
        self.set_highlighted(-1);
        self.viewport.reset();
        self.refresh_results();
        tracing::debug!(
            target: targets::CONTROLLER,
            query = %self.query,
            results = self.displayed_len(),
            "query changed"
        );

        self.input_changed.emit(InputEvent {
            value: self.query.clone(),
        });
    }

    /// A key was pressed in the input.
    ///
    /// Returns `true` if the key was handled. Arrow keys are handled even
    /// when the displayed list is empty; any key other than the arrows,
    /// Enter and Escape is left to the input element.
    pub fn on_key_down(&mut self, key: Key) -> bool {
        if self.disabled {
            return false;
        }

        let len = self.displayed_len();
        let current = self.highlighted_index;

        match key {
            Key::ArrowDown => self.set_highlighted(navigation::next_index(current, len)),
            Key::ArrowUp => self.set_highlighted(navigation::prev_index(current, len)),
            Key::Enter => {
                if let Some(option) = self.highlighted_option().cloned() {
                    self.choose_option(&option);
                }
            }
            Key::Escape => {
                self.set_highlighted(-1);
                self.close();
            }
            Key::Character(_) | Key::Other => return false,
        }
        true
    }

    /// Toggle `option` in the selection and emit the proposed set.
    ///
    /// The panel stays open.
    pub fn choose_option(&mut self, option: &PickOption) {
        let next = self.value.toggled(option, self.mode);
        tracing::debug!(
            target: targets::CONTROLLER,
            option = %option,
            mode = ?self.mode,
            selected = next.len(),
            "option chosen"
        );
        self.changed.emit(next);
    }

    /// A row of the panel was clicked.
    ///
    /// Returns `false` if `index` is not a row of the displayed list.
    pub fn click_row(&mut self, index: usize) -> bool {
        match self.displayed().get(index).cloned() {
            Some(option) => {
                self.choose_option(&option);
                true
            }
            None => false,
        }
    }

    /// The remove button of the chip at `index` was clicked.
    pub fn remove_chip(&mut self, index: usize) -> bool {
        match self.value.get(index).cloned() {
            Some(option) => {
                self.choose_option(&option);
                true
            }
            None => false,
        }
    }

    fn set_highlighted(&mut self, index: i32) {
        if self.highlighted_index == index {
            return;
        }
        self.highlighted_index = index;
        tracing::trace!(target: targets::NAVIGATION, index, "highlight moved");
        self.highlighted.emit(index);

        if let Ok(index) = usize::try_from(index) {
            let request = self.viewport.scroll_to(index);
            if self.is_panel_visible() {
                self.scroll_requested.emit(request);
            }
        }
    }

    /// Scroll the highlighted row into view after the panel became visible.
    fn reveal_highlight(&mut self) {
        if let Ok(index) = usize::try_from(self.highlighted_index)
            && self.is_panel_visible()
        {
            let mut request = self.viewport.scroll_to(index);
            request.behavior = ScrollBehavior::Instant;
            self.scroll_requested.emit(request);
        }
    }

    fn refresh_results(&mut self) {
        if self.query.is_empty() {
            self.results.clear();
        } else {
            self.results = self.filter.filter(&self.options, &self.query);
        }
    }

    fn clamp_to_displayed(&mut self) {
        let len = self.displayed_len();
        self.set_highlighted(navigation::clamp(self.highlighted_index, len));
        self.viewport.clamp_to(len);
    }

    // =========================================================================
    // View models
    // =========================================================================

    /// The results panel, or `None` when it is not on screen.
    pub fn panel(&self) -> Option<PanelView> {
        if !self.is_panel_visible() {
            return None;
        }

        let rows = if !self.query.is_empty() && self.results.is_empty() {
            vec![PanelRow::NoResults {
                message: NO_RESULTS_TEXT,
            }]
        } else {
            self.displayed()
                .iter()
                .enumerate()
                .map(|(index, option)| PanelRow::Option {
                    index,
                    option: option.clone(),
                    view: self.render_row(option, index),
                })
                .collect()
        };

        Some(PanelView {
            rows,
            highlighted_index: self.highlighted_index,
            first_visible: self.viewport.first_visible(),
            max_visible_items: self.viewport.max_visible_items(),
        })
    }

    fn render_row(&self, option: &PickOption, index: usize) -> crate::render::RowView {
        match &self.delegate {
            Some(delegate) => delegate.render_option(option, self.highlighted_index, index),
            None => default_row(option, self.highlighted_index, index, &self.value),
        }
    }

    /// One chip per selected value.
    pub fn chips(&self) -> Vec<Chip> {
        self.value
            .iter()
            .enumerate()
            .map(|(index, option)| Chip {
                index,
                label: option.display_text().to_string(),
            })
            .collect()
    }

    /// The input region.
    pub fn input_view(&self) -> InputView {
        InputView {
            label: self.label.clone(),
            text: self.query.clone(),
            placeholder: self.placeholder.clone(),
            description: self.description.clone(),
            disabled: self.disabled,
            loading: self.loading,
        }
    }
}

impl Default for Autocomplete {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Autocomplete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autocomplete")
            .field("state", &self.state())
            .field("mode", &self.mode)
            .field("query", &self.query)
            .field("options", &self.options.len())
            .field("results", &self.results.len())
            .field("highlighted_index", &self.highlighted_index)
            .field("selected", &self.value.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Autocomplete: Send, Sync);
