//! Core runtime for picklist.
//!
//! This crate provides the primitives the autocomplete controller is built
//! on:
//!
//! - **Signal/Slot System**: Type-safe callbacks with scoped connections
//! - **Timers**: One-shot timers on an explicit clock
//! - **Errors**: The error types shared by the workspace
//! - **Logging**: `tracing` targets for filtering
//!
//! # Signal Example
//!
//! ```
//! use picklist_core::Signal;
//!
//! let selection_changed = Signal::<Vec<String>>::new();
//!
//! let conn_id = selection_changed.connect(|values| {
//!     println!("Selection is now: {:?}", values);
//! });
//!
//! selection_changed.emit(vec!["CA".to_string()]);
//! selection_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use picklist_core::TimerManager;
//!
//! let mut timers = TimerManager::new();
//! let start = Instant::now();
//! let id = timers.start_one_shot_at(start, Duration::from_millis(600));
//!
//! assert!(timers.process_expired_at(start).is_empty());
//! assert_eq!(timers.process_expired_at(start + Duration::from_millis(600)), vec![id]);
//! ```

mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{ConfigError, PicklistError, Result, SignalError, TimerError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{SharedTimerManager, TimerId, TimerManager};
