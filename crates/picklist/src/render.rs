//! Headless view models for the rendering layer.
//!
//! The controller does not draw anything. It describes what should be on
//! screen: the input region ([`InputView`]), one [`Chip`] per selected
//! value, and the results panel ([`PanelView`]) made of [`PanelRow`]s. Rows
//! are produced by an [`OptionDelegate`], or by [`default_row`] when no
//! delegate is set.

use crate::option::PickOption;
use crate::selection::SelectionSet;

/// Placeholder text shown when a non-empty query matches nothing.
pub const NO_RESULTS_TEXT: &str = "No results were found";

/// How one option row should look.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowView {
    /// Primary text of the row.
    pub label: String,
    /// Secondary text, e.g. an option's code.
    pub detail: Option<String>,
    /// Whether the row is the keyboard highlight.
    pub highlighted: bool,
    /// Checkbox state, or `None` for rows without a checkbox.
    pub checked: Option<bool>,
}

impl RowView {
    /// A row showing `label` with no detail and no checkbox.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the detail text using builder pattern.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the highlight flag using builder pattern.
    pub fn with_highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Show a checkbox using builder pattern.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }
}

/// Trait for custom rendering of option rows.
///
/// Closures `Fn(&PickOption, i32, usize) -> RowView` implement it.
pub trait OptionDelegate: Send + Sync {
    /// Describe the row for `option` at `index` in the displayed list.
    ///
    /// `highlighted_index` is the current highlight (-1 for none); the row is
    /// highlighted when it equals `index`.
    fn render_option(&self, option: &PickOption, highlighted_index: i32, index: usize) -> RowView;
}

impl<F> OptionDelegate for F
where
    F: Fn(&PickOption, i32, usize) -> RowView + Send + Sync,
{
    fn render_option(&self, option: &PickOption, highlighted_index: i32, index: usize) -> RowView {
        self(option, highlighted_index, index)
    }
}

/// The built-in row: display text plus a checkbox reflecting membership.
pub fn default_row(
    option: &PickOption,
    highlighted_index: i32,
    index: usize,
    value: &SelectionSet,
) -> RowView {
    RowView::new(option.display_text())
        .with_highlighted(highlighted_index == index as i32)
        .with_checked(value.contains(option))
}

/// One entry of the results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRow {
    /// A clickable option row.
    Option {
        /// Index in the displayed list; pass it to `Autocomplete::click_row`.
        index: usize,
        option: PickOption,
        view: RowView,
    },
    /// The placeholder for a query with no matches.
    NoResults {
        message: &'static str,
    },
}

/// The visible results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub rows: Vec<PanelRow>,
    pub highlighted_index: i32,
    /// First row inside the scroll viewport.
    pub first_visible: usize,
    pub max_visible_items: usize,
}

impl PanelView {
    /// Whether the panel shows the no-results placeholder.
    pub fn is_no_results(&self) -> bool {
        matches!(self.rows.as_slice(), [PanelRow::NoResults { .. }])
    }

    /// The option rows, skipping placeholders.
    pub fn option_rows(&self) -> impl Iterator<Item = (&PickOption, &RowView)> {
        self.rows.iter().filter_map(|row| match row {
            PanelRow::Option { option, view, .. } => Some((option, view)),
            PanelRow::NoResults { .. } => None,
        })
    }
}

/// A selected value shown in the input region, with a remove button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    /// Position in the value; pass it to `Autocomplete::remove_chip`.
    pub index: usize,
    pub label: String,
}

/// The text input region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputView {
    pub label: String,
    pub text: String,
    pub placeholder: String,
    pub description: String,
    pub disabled: bool,
    /// Show the loading spinner.
    pub loading: bool,
}
