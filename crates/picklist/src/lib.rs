//! Picklist - a headless autocomplete / multi-select picker.
//!
//! An [`Autocomplete`] filters a list of options as the user types, lets
//! them move a highlight with the keyboard, and proposes selection changes
//! through signals. It draws nothing itself: a rendering layer reads the
//! [`panel`](Autocomplete::panel), [`chips`](Autocomplete::chips) and
//! [`input_view`](Autocomplete::input_view) view models and forwards
//! platform events back in.
//!
//! Core systems (signals, timers, errors, log targets) live in
//! `picklist-core` and are re-exported here.
//!
//! # Example
//!
//! ```
//! use picklist::prelude::*;
//!
//! let mut autocomplete = Autocomplete::new()
//!     .with_label("Sync search")
//!     .with_placeholder("Type to begin searching")
//!     .with_options(vec![
//!         PickOption::labeled("Canada", "CA"),
//!         PickOption::labeled("France", "FR"),
//!     ]);
//!
//! autocomplete.on_focus();
//! autocomplete.on_input_change("fra");
//!
//! let panel = autocomplete.panel().unwrap();
//! assert_eq!(panel.rows.len(), 1);
//! ```

pub use picklist_core::*;

pub mod boundary;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod filter;
pub mod navigation;
pub mod option;
pub mod prelude;
pub mod render;
pub mod scroll;
pub mod selection;

pub use boundary::{mount, Document, ElementId, MountGuard, PointerEvent, WidgetBoundary};
pub use config::AutocompleteConfig;
pub use controller::{Autocomplete, InputEvent, PanelState, SharedAutocomplete};
pub use debounce::Debouncer;
pub use filter::{CaseSensitivity, MatchField, OptionFilter, SubstringFilter};
pub use navigation::Key;
pub use option::{OptionKey, PickOption};
pub use render::{Chip, InputView, OptionDelegate, PanelRow, PanelView, RowView, NO_RESULTS_TEXT};
pub use scroll::{ScrollAlignment, ScrollBehavior, ScrollRequest, ScrollViewport};
pub use selection::{SelectionMode, SelectionSet};
