//! Prelude module for Picklist.
//!
//! ```ignore
//! use picklist::prelude::*;
//! ```
//!
//! This provides access to:
//! - The controller (`Autocomplete`) and its events
//! - Options and selections (`PickOption`, `SelectionSet`)
//! - Document mounting (`Document`, `WidgetBoundary`, `mount`)
//! - Signals and timers from the core crate

// ============================================================================
// Signal/Slot and Timers
// ============================================================================

pub use crate::{ConnectionGuard, ConnectionId, SharedTimerManager, Signal, TimerId};

// ============================================================================
// Controller
// ============================================================================

pub use crate::controller::{Autocomplete, InputEvent, PanelState, SharedAutocomplete};
pub use crate::navigation::Key;

// ============================================================================
// Options and Selection
// ============================================================================

pub use crate::filter::{OptionFilter, SubstringFilter};
pub use crate::option::PickOption;
pub use crate::selection::{SelectionMode, SelectionSet};

// ============================================================================
// Rendering
// ============================================================================

pub use crate::render::{Chip, InputView, OptionDelegate, PanelRow, PanelView, RowView};
pub use crate::scroll::ScrollRequest;

// ============================================================================
// Document and Input Timing
// ============================================================================

pub use crate::boundary::{mount, Document, MountGuard, WidgetBoundary};
pub use crate::config::AutocompleteConfig;
pub use crate::debounce::Debouncer;
