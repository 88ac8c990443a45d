//! Signal/slot notifications.
//!
//! Every callback the autocomplete exposes (selection changes, raw input
//! notifications, highlight and scroll requests, document-level pointer
//! listeners) is a [`Signal`]. Slots are plain closures and run on the
//! emitting thread.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - Emits a value to every connected slot
//! - [`ConnectionId`] - Returned by [`Signal::connect`], used to disconnect
//! - [`ConnectionGuard`] - Disconnects its slot when dropped
//!
//! # Example
//!
//! ```
//! use picklist_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("fra".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::SignalError;
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// The ID remains valid until the connection is explicitly disconnected
    /// or the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type SlotTable<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments.
///
/// # Reentrancy
///
/// Slots are invoked after the connection table lock is released, so a slot
/// may connect or disconnect slots on the same signal. A connection made
/// during an emission is first invoked by the next emission.
pub struct Signal<Args> {
    /// All active connections. Shared with [`ConnectionGuard`]s via `Weak`.
    connections: Arc<SlotTable<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connections.lock().insert(Arc::new(slot));
        tracing::trace!(target: targets::SIGNAL, ?id, "slot connected");
        id
    }

    /// Connect a slot that is disconnected when the returned guard is dropped.
    ///
    /// The guard only holds a weak reference to the connection table, so it
    /// may safely outlive the signal.
    #[must_use = "dropping the guard immediately disconnects the slot"]
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        let table: Weak<SlotTable<Args>> = Arc::downgrade(&self.connections);
        ConnectionGuard {
            id,
            release: Some(Box::new(move |id| {
                if let Some(table) = table.upgrade() {
                    table.lock().remove(id);
                }
            })),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect a slot, reporting an unknown ID as an error.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<(), SignalError> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Emit the signal, invoking all connected slots.
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .finish()
    }
}

/// RAII guard that disconnects a slot when dropped.
///
/// Returned by [`Signal::connect_scoped`].
pub struct ConnectionGuard {
    id: ConnectionId,
    release: Option<Box<dyn FnOnce(ConnectionId) + Send + Sync>>,
}

impl ConnectionGuard {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Disconnect now instead of on drop.
    pub fn disconnect(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
static_assertions::assert_impl_all!(ConnectionGuard: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_slot_sees_each_query() {
        let query_changed = Signal::<String>::new();
        let typed = Arc::new(Mutex::new(String::new()));
        let lengths = Arc::new(Mutex::new(Vec::new()));

        let typed_sink = typed.clone();
        query_changed.connect(move |query| typed_sink.lock().push_str(query));
        let length_sink = lengths.clone();
        query_changed.connect(move |query| length_sink.lock().push(query.len()));

        query_changed.emit("f".to_string());
        query_changed.emit("ra".to_string());

        assert_eq!(*typed.lock(), "fra");
        let mut lengths = lengths.lock().clone();
        lengths.sort_unstable();
        assert_eq!(lengths, vec![1, 2]);
    }

    #[test]
    fn test_disconnected_slot_misses_later_selections() {
        let selection_changed = Signal::<Vec<&'static str>>::new();
        let last = Arc::new(Mutex::new(None));

        let sink = last.clone();
        let id = selection_changed.connect(move |codes| {
            *sink.lock() = Some(codes.clone());
        });

        selection_changed.emit(vec!["CA"]);
        assert!(selection_changed.disconnect(id));
        selection_changed.emit(vec!["CA", "FR"]);

        assert_eq!(*last.lock(), Some(vec!["CA"]));
        assert_eq!(
            selection_changed.try_disconnect(id),
            Err(SignalError::InvalidConnection)
        );
    }

    #[test]
    fn test_disconnect_all_clears_listeners() {
        let open_changed = Signal::<bool>::new();
        let hits = Arc::new(Mutex::new(0));
        for _ in 0..3 {
            let hits = hits.clone();
            open_changed.connect(move |_| *hits.lock() += 1);
        }

        open_changed.emit(true);
        open_changed.disconnect_all();
        open_changed.emit(false);

        assert_eq!(*hits.lock(), 3);
        assert_eq!(open_changed.connection_count(), 0);
    }

    #[test]
    fn test_guard_scopes_a_listener() {
        let highlighted = Signal::<i32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let guard = highlighted.connect_scoped(move |&index| sink.lock().push(index));
        highlighted.emit(0);
        highlighted.emit(-1);
        guard.disconnect();
        highlighted.emit(2);

        assert_eq!(*seen.lock(), vec![0, -1]);
        assert_eq!(highlighted.connection_count(), 0);
    }

    #[test]
    fn test_connection_guard_outlives_signal() {
        let guard = {
            let signal = Signal::<i32>::new();
            signal.connect_scoped(|_| {})
        };
        // Signal is gone; dropping the guard must be a no-op.
        drop(guard);
    }

    #[test]
    fn test_slot_may_connect_during_emit() {
        let signal = Arc::new(Signal::<i32>::new());
        let weak = Arc::downgrade(&signal);

        signal.connect(move |_| {
            if let Some(signal) = weak.upgrade() {
                signal.connect(|_| {});
            }
        });

        signal.emit(1);
        assert_eq!(signal.connection_count(), 2);
    }
}
