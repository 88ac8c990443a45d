//! Document pointer listeners and widget boundary checks.
//!
//! The panel closes when the user clicks anywhere outside the widget. A
//! [`Document`] keeps a minimal element tree so a click on any element can be
//! turned into a composed event path (target first, document body last).
//! The widget is "inside" a click when its root element appears on that path.
//!
//! Listening is scoped: [`mount`] connects one document-level listener for a
//! controller and returns a [`MountGuard`]. Dropping the guard disconnects
//! the listener, so repeated mount/unmount cycles never accumulate
//! listeners.
//!
//! # Example
//!
//! ```
//! use picklist::boundary::{mount, Document, WidgetBoundary};
//! use picklist::{Autocomplete, PickOption};
//!
//! let document = Document::new();
//! let boundary = WidgetBoundary::create(&document, document.body());
//! let outside = document.create_element(Some(document.body()));
//!
//! let autocomplete = Autocomplete::new()
//!     .with_options(vec![PickOption::text("Canada")])
//!     .into_shared();
//! let guard = mount(&autocomplete, &document, boundary);
//!
//! document.click(boundary.input());
//! assert!(autocomplete.lock().is_open());
//!
//! document.click(outside);
//! assert!(!autocomplete.lock().is_open());
//!
//! drop(guard);
//! assert_eq!(document.listener_count(), 0);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use picklist_core::logging::targets;
use picklist_core::{ConnectionGuard, Signal};
use slotmap::{new_key_type, SlotMap};

use crate::controller::SharedAutocomplete;

new_key_type! {
    /// Identifier of an element in a [`Document`].
    pub struct ElementId;
}

/// A pointer event dispatched to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    /// Elements from the event target up to the document body.
    path: Vec<ElementId>,
}

impl PointerEvent {
    /// An event with an explicit composed path (target first).
    pub fn with_path(path: Vec<ElementId>) -> Self {
        Self { path }
    }

    /// The element the pointer hit.
    pub fn target(&self) -> Option<ElementId> {
        self.path.first().copied()
    }

    /// Elements the event propagates through, target first.
    pub fn composed_path(&self) -> &[ElementId] {
        &self.path
    }

    /// Whether `element` is on the event path.
    pub fn passes_through(&self, element: ElementId) -> bool {
        self.path.contains(&element)
    }
}

#[derive(Debug)]
struct ElementData {
    parent: Option<ElementId>,
}

/// A minimal document: an element tree plus document-level click listeners.
pub struct Document {
    elements: Mutex<SlotMap<ElementId, ElementData>>,
    body: ElementId,
    clicked: Signal<PointerEvent>,
}

impl Document {
    /// Create a document containing only its body element.
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let body = elements.insert(ElementData { parent: None });
        Self {
            elements: Mutex::new(elements),
            body,
            clicked: Signal::new(),
        }
    }

    /// The body element, root of every composed path.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create an element under `parent` (detached when `None`).
    pub fn create_element(&self, parent: Option<ElementId>) -> ElementId {
        self.elements.lock().insert(ElementData { parent })
    }

    /// Remove an element. Its children become detached.
    pub fn remove_element(&self, id: ElementId) -> bool {
        let mut elements = self.elements.lock();
        if elements.remove(id).is_none() {
            return false;
        }
        for (_, data) in elements.iter_mut() {
            if data.parent == Some(id) {
                data.parent = None;
            }
        }
        true
    }

    /// The path from `target` up through its ancestors.
    pub fn composed_path(&self, target: ElementId) -> Vec<ElementId> {
        let elements = self.elements.lock();
        if !elements.contains_key(target) {
            return Vec::new();
        }

        let mut path = vec![target];
        let mut current = elements.get(target).and_then(|data| data.parent);
        while let Some(id) = current {
            path.push(id);
            current = elements.get(id).and_then(|data| data.parent);
        }
        path
    }

    /// Dispatch a click on `target` to every document listener.
    pub fn click(&self, target: ElementId) {
        self.dispatch(PointerEvent::with_path(self.composed_path(target)));
    }

    /// Dispatch a prepared pointer event to every document listener.
    pub fn dispatch(&self, event: PointerEvent) {
        tracing::trace!(target: targets::BOUNDARY, target_element = ?event.target(), "document click");
        self.clicked.emit(event);
    }

    /// Listen for clicks anywhere in the document until the guard drops.
    pub fn add_click_listener<F>(&self, listener: F) -> ConnectionGuard
    where
        F: Fn(&PointerEvent) + Send + Sync + 'static,
    {
        self.clicked.connect_scoped(listener)
    }

    /// Number of connected document listeners.
    pub fn listener_count(&self) -> usize {
        self.clicked.connection_count()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.elements.lock().len())
            .field("listeners", &self.clicked.connection_count())
            .finish()
    }
}

/// The elements that make up one autocomplete widget.
///
/// `root` contains the label, the input region, the chips, the results
/// panel and the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetBoundary {
    root: ElementId,
    input: ElementId,
    panel: ElementId,
}

impl WidgetBoundary {
    /// Describe existing elements.
    pub fn new(root: ElementId, input: ElementId, panel: ElementId) -> Self {
        Self { root, input, panel }
    }

    /// Create a root with an input region and a results panel under `parent`.
    pub fn create(document: &Document, parent: ElementId) -> Self {
        let root = document.create_element(Some(parent));
        let input = document.create_element(Some(root));
        let panel = document.create_element(Some(root));
        Self { root, input, panel }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn input(&self) -> ElementId {
        self.input
    }

    pub fn panel(&self) -> ElementId {
        self.panel
    }

    /// Whether the event happened inside the widget.
    pub fn contains(&self, event: &PointerEvent) -> bool {
        event.passes_through(self.root)
    }
}

/// Keeps a controller subscribed to document clicks.
///
/// Dropping the guard disconnects the listener.
#[derive(Debug)]
pub struct MountGuard {
    listener: ConnectionGuard,
    boundary: WidgetBoundary,
}

impl MountGuard {
    /// The boundary the controller was mounted with.
    pub fn boundary(&self) -> WidgetBoundary {
        self.boundary
    }

    /// Unmount now instead of on drop.
    pub fn unmount(self) {
        tracing::debug!(target: targets::BOUNDARY, root = ?self.boundary.root, "unmounting");
        self.listener.disconnect();
    }
}

/// Subscribe `autocomplete` to clicks on `document`.
///
/// The listener holds only a weak reference to the controller; clicks after
/// the controller is dropped are ignored.
pub fn mount(
    autocomplete: &SharedAutocomplete,
    document: &Document,
    boundary: WidgetBoundary,
) -> MountGuard {
    tracing::debug!(target: targets::BOUNDARY, root = ?boundary.root, "mounting");
    let weak = Arc::downgrade(autocomplete);
    let listener = document.add_click_listener(move |event| {
        if let Some(autocomplete) = weak.upgrade() {
            autocomplete.lock().on_pointer_event(boundary.contains(event));
        }
    });
    MountGuard { listener, boundary }
}
