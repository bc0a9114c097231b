//! Event-listener lifetimes.
//!
//! Widgets do not install closures on elements; they handle events in their
//! own methods. What the registry tracks is *which listeners are attached*,
//! so that a widget's obligations ("the trap listener is installed while the
//! dialog is open, and never afterwards") are observable and enforced by
//! ownership.
//!
//! Registering returns a [`ListenerGuard`]. The entry lives exactly as long
//! as the guard: dropping it (on any exit path) removes the entry.
//!
//! ```
//! use aria_overlay_core::{EventKind, ListenerRegistry, ListenerTarget};
//!
//! let registry = ListenerRegistry::new();
//! {
//!     let _guard = registry.register(ListenerTarget::Document, EventKind::Click, "example");
//!     assert_eq!(registry.count(ListenerTarget::Document, EventKind::Click), 1);
//! }
//! assert!(registry.is_empty());
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::element::ElementId;
use crate::logging::targets;

new_key_type! {
    /// Identifies a registered listener.
    pub struct ListenerId;
}

/// Where a listener is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// Document-scoped; sees events from every element.
    Document,
    /// Scoped to one element's subtree.
    Element(ElementId),
}

/// The kind of event a listener handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Key press.
    KeyDown,
    /// Primary-button click.
    Click,
}

/// A registered listener entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    /// Where the listener is installed.
    pub target: ListenerTarget,
    /// The event kind it handles.
    pub kind: EventKind,
    /// Short label naming the owner, for debugging.
    pub owner: &'static str,
}

type ListenerMap = SlotMap<ListenerId, Listener>;

/// Shared table of attached listeners.
///
/// Cloning the registry clones the handle; all clones see the same table.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Arc<Mutex<ListenerMap>>,
}

impl ListenerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. The entry is removed when the returned guard drops.
    #[must_use = "the listener is removed as soon as the guard is dropped"]
    pub fn register(
        &self,
        target: ListenerTarget,
        kind: EventKind,
        owner: &'static str,
    ) -> ListenerGuard {
        let id = self.inner.lock().insert(Listener {
            target,
            kind,
            owner,
        });
        tracing::trace!(target: targets::LISTENER, ?id, ?target, ?kind, owner, "listener attached");
        ListenerGuard {
            registry: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether no listener is attached.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Number of listeners attached for a target and event kind.
    pub fn count(&self, target: ListenerTarget, kind: EventKind) -> usize {
        self.inner
            .lock()
            .values()
            .filter(|l| l.target == target && l.kind == kind)
            .count()
    }

    /// Number of listeners attached by a given owner.
    pub fn count_owned_by(&self, owner: &str) -> usize {
        self.inner
            .lock()
            .values()
            .filter(|l| l.owner == owner)
            .count()
    }

    /// Whether the listener is still attached.
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.inner.lock().contains_key(id)
    }

    /// Snapshot of the attached listeners.
    pub fn listeners(&self) -> Vec<Listener> {
        self.inner.lock().values().copied().collect()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners())
            .finish()
    }
}

/// RAII handle for an attached listener.
///
/// Dropping the guard detaches the listener. The guard holds only a weak
/// reference, so it may outlive the registry.
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Weak<Mutex<ListenerMap>>,
    id: ListenerId,
}

impl ListenerGuard {
    /// The id of the guarded listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Detach the listener now.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade()
            && let Some(listener) = registry.lock().remove(self.id)
        {
            tracing::trace!(
                target: targets::LISTENER,
                id = ?self.id,
                owner = listener.owner,
                "listener detached"
            );
        }
    }
}
