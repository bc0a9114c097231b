//! Page-level host for independent overlays.
//!
//! [`OverlayHost`] owns the document and every widget bound to it, and
//! plays the part of the browser's event loop: it routes each key press to
//! the widget whose markup contains the target, performs the native Tab
//! step when no widget prevented it, and delivers clicks so that outside
//! dismissal happens before the clicked element takes focus.

use slotmap::{SlotMap, new_key_type};

use aria_overlay_core::logging::targets;
use aria_overlay_core::navigation::{self, Direction};
use aria_overlay_core::{DomAccess, ElementId};

use crate::config::{OverlayConfig, OverlaySetConfig};
use crate::error::Result;
use crate::events::{ClickEvent, DispatchResult, Key, KeyDownEvent};
use crate::router::InitialFocus;
use crate::widget::OverlayWidget;

new_key_type! {
    /// Handle to a widget registered with an [`OverlayHost`].
    pub struct OverlayId;
}

/// A document together with the overlays bound to it.
pub struct OverlayHost<D: DomAccess> {
    dom: D,
    widgets: SlotMap<OverlayId, OverlayWidget>,
    order: Vec<OverlayId>,
}

impl<D: DomAccess> OverlayHost<D> {
    /// Create a host with no widgets.
    pub fn new(dom: D) -> Self {
        Self {
            dom,
            widgets: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Create a host and bind every overlay in a page configuration.
    ///
    /// Entries whose markup is missing are skipped.
    pub fn from_config(dom: D, config: &OverlaySetConfig) -> Self {
        let mut host = Self::new(dom);
        for entry in &config.overlays {
            host.attach(&entry.trigger, &entry.overlay, entry.config.clone());
        }
        tracing::debug!(
            target: targets::HOST,
            configured = config.overlays.len(),
            bound = host.len(),
            "host built from config"
        );
        host
    }

    /// The document.
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Mutable access to the document.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether no widgets are registered.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Register a widget built against this host's document.
    pub fn add(&mut self, widget: OverlayWidget) -> OverlayId {
        let id = self.widgets.insert(widget);
        self.order.push(id);
        tracing::trace!(target: targets::HOST, ?id, "widget added");
        id
    }

    /// Build and register a widget over existing elements.
    ///
    /// # Errors
    ///
    /// Propagates [`OverlayWidget::new`] failures.
    pub fn bind(
        &mut self,
        trigger: ElementId,
        overlay: ElementId,
        config: OverlayConfig,
    ) -> Result<OverlayId> {
        let widget = OverlayWidget::new(&mut self.dom, trigger, overlay, config)?;
        Ok(self.add(widget))
    }

    /// Build and register a widget by element ids, if the markup exists.
    pub fn attach(
        &mut self,
        trigger_id: &str,
        overlay_id: &str,
        config: OverlayConfig,
    ) -> Option<OverlayId> {
        let widget = OverlayWidget::init(&mut self.dom, trigger_id, overlay_id, config)?;
        Some(self.add(widget))
    }

    /// Tear a widget down, closing it first. Returns `false` for a stale id.
    pub fn remove(&mut self, id: OverlayId) -> bool {
        let Some(widget) = self.widgets.remove(id) else {
            return false;
        };
        self.order.retain(|&other| other != id);
        widget.teardown(&mut self.dom);
        true
    }

    /// Get a widget.
    pub fn get(&self, id: OverlayId) -> Option<&OverlayWidget> {
        self.widgets.get(id)
    }

    /// Get a widget mutably.
    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut OverlayWidget> {
        self.widgets.get_mut(id)
    }

    /// Open a widget. Returns `false` if it was already open or the id is stale.
    pub fn open(&mut self, id: OverlayId, initial: InitialFocus) -> bool {
        match self.widgets.get_mut(id) {
            Some(widget) => widget.open(&mut self.dom, initial),
            None => false,
        }
    }

    /// Close a widget. Returns `false` if it was already closed or the id is stale.
    pub fn close(&mut self, id: OverlayId) -> bool {
        match self.widgets.get_mut(id) {
            Some(widget) => widget.close(&mut self.dom),
            None => false,
        }
    }

    /// Ids of the open widgets, in registration order.
    pub fn open_overlays(&self) -> impl Iterator<Item = OverlayId> + '_ {
        self.order
            .iter()
            .copied()
            .filter(|&id| self.widgets.get(id).is_some_and(OverlayWidget::is_open))
    }

    /// Deliver a key press.
    ///
    /// The first widget (in registration order) that handles the key wins.
    /// An unmodified Tab or Shift+Tab whose default survives dispatch then
    /// moves focus through the document's tab order, as the platform would.
    pub fn dispatch_keydown(&mut self, event: &mut KeyDownEvent) -> DispatchResult {
        let mut result = DispatchResult::Ignored;
        for id in &self.order {
            let Some(widget) = self.widgets.get_mut(*id) else {
                continue;
            };
            if widget.handle_keydown(&mut self.dom, event).was_handled() {
                tracing::trace!(target: targets::HOST, ?id, key = ?event.key, "key handled");
                result = DispatchResult::Handled;
                break;
            }
        }

        if event.key == Key::Tab
            && !event.is_default_prevented()
            && !event.modifiers.has_command_modifier()
        {
            let direction = if event.modifiers.shift {
                Direction::Backward
            } else {
                Direction::Forward
            };
            navigation::move_focus(&mut self.dom, direction);
        }

        result
    }

    /// Deliver a click.
    ///
    /// Widgets the click landed outside of see it first, so dismissal and
    /// its focus restoration happen before the clicked element is focused.
    /// Then the target takes focus if it can, and finally the widgets whose
    /// trigger was clicked toggle.
    pub fn dispatch_click(&mut self, event: &ClickEvent) -> DispatchResult {
        let mut result = DispatchResult::Ignored;

        let (on_trigger, elsewhere): (Vec<OverlayId>, Vec<OverlayId>) =
            self.order.iter().copied().partition(|&id| {
                self.widgets
                    .get(id)
                    .is_some_and(|widget| self.dom.contains(widget.trigger(), event.target))
            });

        for id in elsewhere {
            if let Some(widget) = self.widgets.get_mut(id)
                && widget.handle_click(&mut self.dom, event).was_handled()
            {
                result = DispatchResult::Handled;
            }
        }

        if self.dom.is_focusable(event.target) {
            self.dom.focus(event.target);
        }

        for id in on_trigger {
            if let Some(widget) = self.widgets.get_mut(id)
                && widget.handle_click(&mut self.dom, event).was_handled()
            {
                result = DispatchResult::Handled;
            }
        }

        result
    }
}

impl<D: DomAccess + std::fmt::Debug> std::fmt::Debug for OverlayHost<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayHost")
            .field("dom", &self.dom)
            .field("widgets", &self.order.len())
            .finish()
    }
}
