//! Outside-click dismissal.

use aria_overlay_core::{DomAccess, ElementId, EventKind, ListenerGuard, ListenerTarget};

/// Document-scoped click listener owned by a widget.
///
/// Attached once when the widget is built and held for the widget's whole
/// lifetime: outside clicks can happen whether or not the overlay is open,
/// and the widget's `close()` is a no-op when already closed.
#[derive(Debug)]
pub struct DismissalListener {
    trigger: ElementId,
    overlay: ElementId,
    _listener: ListenerGuard,
}

impl DismissalListener {
    /// Register the document click listener.
    pub fn attach<D: DomAccess + ?Sized>(dom: &D, trigger: ElementId, overlay: ElementId) -> Self {
        let listener =
            dom.listeners()
                .register(ListenerTarget::Document, EventKind::Click, "dismissal");
        Self {
            trigger,
            overlay,
            _listener: listener,
        }
    }

    /// Whether a click on `target` landed outside both trigger and overlay.
    pub fn is_outside<D: DomAccess + ?Sized>(&self, dom: &D, target: ElementId) -> bool {
        !dom.contains(self.trigger, target) && !dom.contains(self.overlay, target)
    }
}
