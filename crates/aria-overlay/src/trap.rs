//! Focus trap: keeps Tab navigation inside an overlay.
//!
//! A [`FocusTrap`] exists only while its listener is attached. Attaching
//! registers a key listener scoped to the overlay; dropping the trap (or
//! calling [`FocusTrap::detach`]) releases it, so the listener cannot
//! outlive the open state on any exit path.
//!
//! The trap moves focus itself for every Tab inside the overlay, stepping
//! through its own sequence in scan order and wrapping at both ends. The
//! host's native order is never consulted, so a positive `tabindex` inside
//! the overlay cannot send focus back out to the page.

use aria_overlay_core::logging::targets;
use aria_overlay_core::{DomAccess, ElementId, EventKind, ListenerGuard, ListenerTarget};

use crate::events::{Key, KeyDownEvent};
use crate::router;
use crate::scanner;

const TARGET: &str = targets::TRAP;

/// An attached focus trap.
#[derive(Debug)]
pub struct FocusTrap {
    overlay: ElementId,
    elements: Vec<ElementId>,
    listener: ListenerGuard,
}

impl FocusTrap {
    /// Attach a trap over `elements`.
    ///
    /// Returns `None`, installing nothing, when there is nothing to cycle.
    pub fn attach<D: DomAccess + ?Sized>(
        dom: &D,
        overlay: ElementId,
        elements: Vec<ElementId>,
    ) -> Option<Self> {
        if elements.is_empty() {
            tracing::debug!(target: TARGET, ?overlay, "no focusable elements, trap not attached");
            return None;
        }

        let listener =
            dom.listeners()
                .register(ListenerTarget::Element(overlay), EventKind::KeyDown, "focus-trap");
        tracing::debug!(target: TARGET, ?overlay, count = elements.len(), "trap attached");
        Some(Self {
            overlay,
            elements,
            listener,
        })
    }

    /// Release the listener.
    pub fn detach(self) {
        tracing::debug!(target: TARGET, overlay = ?self.overlay, "trap detached");
        self.listener.release();
    }

    /// The overlay this trap is scoped to.
    pub fn overlay(&self) -> ElementId {
        self.overlay
    }

    /// The elements focus cycles through.
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Handle a key press inside the overlay.
    ///
    /// Returns `true` when the trap moved focus itself (and prevented the
    /// event's default); `false` when the key is not a Tab for this overlay.
    /// With focus outside the sequence, Tab lands on the first element and
    /// Shift+Tab on the last.
    pub fn handle_key<D: DomAccess + ?Sized>(&self, dom: &mut D, event: &mut KeyDownEvent) -> bool {
        if event.key != Key::Tab || event.modifiers.has_command_modifier() {
            return false;
        }
        if !dom.contains(self.overlay, event.target) {
            return false;
        }

        let current = dom.active_element();
        let position = scanner::index_of(&self.elements, current);
        let len = self.elements.len();
        let index = if event.modifiers.shift {
            router::previous_index(position, len)
        } else {
            router::next_index(position, len)
        };
        let Some(&destination) = index.and_then(|index| self.elements.get(index)) else {
            return false;
        };

        event.prevent_default();
        if dom.focus(destination) {
            tracing::trace!(target: TARGET, from = ?current, to = ?destination, "trap moved focus");
        }
        true
    }
}
