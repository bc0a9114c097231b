//! The overlay widget: a trigger paired with the container it shows.
//!
//! [`OverlayWidget`] is the state controller. It owns the open/closed flag
//! and mirrors it into the markup (`aria-expanded` on the trigger, `hidden`
//! on the overlay), rescans the overlay on every open, drives item focus for
//! menu-style kinds and holds the focus trap for as long as a dialog-style
//! overlay is open.
//!
//! # Example
//!
//! ```
//! use aria_overlay::{Document, DomAccess, InitialFocus, OverlayConfig, OverlayWidget};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let trigger = doc.build("button").id("file-button").append_to(body)?;
//! let menu = doc.build("ul").id("file-menu").append_to(body)?;
//! let open = doc.build("button").text("Open").append_to(menu)?;
//! doc.build("button").text("Save").append_to(menu)?;
//!
//! let mut widget = OverlayWidget::new(&mut doc, trigger, menu, OverlayConfig::menu())?;
//! assert_eq!(doc.attribute(trigger, "aria-controls"), Some("file-menu"));
//!
//! doc.focus(trigger);
//! widget.open(&mut doc, InitialFocus::First);
//! assert_eq!(doc.active_element(), Some(open));
//!
//! widget.close(&mut doc);
//! assert_eq!(doc.active_element(), Some(trigger));
//! assert!(doc.has_attribute(menu, "hidden"));
//! # Ok::<(), aria_overlay::OverlayError>(())
//! ```

use aria_overlay_core::logging::targets;
use aria_overlay_core::{DomAccess, DomResult, ElementId};

use crate::aria::{self, AriaRole};
use crate::config::{OverlayConfig, OverlayKind, TabBehavior};
use crate::dismissal::DismissalListener;
use crate::error::{OverlayError, Result};
use crate::events::{ClickEvent, DispatchResult, KeyDownEvent};
use crate::router::{self, InitialFocus, OverlayAction, RouteContext};
use crate::scanner;
use crate::trap::FocusTrap;

/// An accessible overlay bound to its trigger.
#[derive(Debug)]
pub struct OverlayWidget {
    trigger: ElementId,
    overlay: ElementId,
    config: OverlayConfig,
    is_open: bool,
    focusable: Vec<ElementId>,
    previous_focus: Option<ElementId>,
    active_index: Option<usize>,
    trap: Option<FocusTrap>,
    dismissal: DismissalListener,
}

impl OverlayWidget {
    /// Bind a widget to existing elements.
    ///
    /// Writes the initial markup: the trigger gets `aria-expanded="false"`,
    /// `aria-haspopup` for popup kinds and `aria-controls` when the overlay
    /// has an `id`; the overlay gets its role (only if it has none) and is
    /// hidden. The outside-click listener is registered here and held for
    /// the widget's lifetime.
    ///
    /// # Errors
    ///
    /// Fails if either handle is dead, if the overlay contains the trigger,
    /// or if the host rejects an attribute write.
    pub fn new<D: DomAccess + ?Sized>(
        dom: &mut D,
        trigger: ElementId,
        overlay: ElementId,
        config: OverlayConfig,
    ) -> Result<Self> {
        for id in [trigger, overlay] {
            if !dom.contains_element(id) {
                return Err(OverlayError::InvalidElement(id));
            }
        }
        if dom.contains(overlay, trigger) {
            return Err(OverlayError::OverlayContainsTrigger);
        }

        dom.set_attribute(trigger, aria::ARIA_EXPANDED, aria::bool_value(false))?;
        if let Some(popup) = config.kind.haspopup_value() {
            dom.set_attribute(trigger, aria::ARIA_HASPOPUP, popup)?;
        }
        if let Some(overlay_id) = dom.attribute(overlay, "id").map(str::to_owned) {
            dom.set_attribute(trigger, aria::ARIA_CONTROLS, &overlay_id)?;
        }
        if dom.tag_name(trigger) != Some("button") && !dom.has_attribute(trigger, aria::ROLE) {
            dom.set_attribute(trigger, aria::ROLE, AriaRole::Button.as_str())?;
        }

        if !dom.has_attribute(overlay, aria::ROLE) {
            dom.set_attribute(overlay, aria::ROLE, config.kind.overlay_role().as_str())?;
        }
        if config.kind == OverlayKind::Dialog {
            dom.set_attribute(overlay, aria::ARIA_MODAL, aria::bool_value(true))?;
        }
        dom.set_attribute(overlay, aria::HIDDEN, "")?;

        let dismissal = DismissalListener::attach(dom, trigger, overlay);
        tracing::debug!(target: targets::WIDGET, ?trigger, ?overlay, kind = ?config.kind, "widget created");

        Ok(Self {
            trigger,
            overlay,
            config,
            is_open: false,
            focusable: Vec::new(),
            previous_focus: None,
            active_index: None,
            trap: None,
            dismissal,
        })
    }

    /// Bind a widget by the `id` attributes of its trigger and overlay.
    ///
    /// # Errors
    ///
    /// [`OverlayError::MissingElement`] when either id is not in the
    /// document, plus everything [`OverlayWidget::new`] can return.
    pub fn from_ids<D: DomAccess + ?Sized>(
        dom: &mut D,
        trigger_id: &str,
        overlay_id: &str,
        config: OverlayConfig,
    ) -> Result<Self> {
        let trigger = dom
            .element_by_id(trigger_id)
            .ok_or_else(|| OverlayError::missing(trigger_id))?;
        let overlay = dom
            .element_by_id(overlay_id)
            .ok_or_else(|| OverlayError::missing(overlay_id))?;
        Self::new(dom, trigger, overlay, config)
    }

    /// Bind a widget if the page carries the expected markup.
    ///
    /// Missing or malformed markup is not an error on a host page: the
    /// widget simply does not initialize and `None` is returned.
    pub fn init<D: DomAccess + ?Sized>(
        dom: &mut D,
        trigger_id: &str,
        overlay_id: &str,
        config: OverlayConfig,
    ) -> Option<Self> {
        match Self::from_ids(dom, trigger_id, overlay_id, config) {
            Ok(widget) => Some(widget),
            Err(error) => {
                tracing::debug!(
                    target: targets::WIDGET,
                    trigger_id,
                    overlay_id,
                    %error,
                    "widget not initialized"
                );
                None
            }
        }
    }

    // =========================================================================
    // State
    // =========================================================================

    /// The trigger element.
    pub fn trigger(&self) -> ElementId {
        self.trigger
    }

    /// The overlay element.
    pub fn overlay(&self) -> ElementId {
        self.overlay
    }

    /// The widget configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Interactive elements found by the last scan. Empty while closed.
    pub fn focusable_elements(&self) -> &[ElementId] {
        &self.focusable
    }

    /// The item cursor; `None` means no explicit selection.
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Focus recorded when the overlay opened.
    pub fn previous_focus(&self) -> Option<ElementId> {
        self.previous_focus
    }

    /// Whether a focus trap is attached.
    pub fn has_trap(&self) -> bool {
        self.trap.is_some()
    }

    /// Whether the markup agrees with the open flag.
    pub fn markup_in_sync<D: DomAccess + ?Sized>(&self, dom: &D) -> bool {
        let hidden = dom.has_attribute(self.overlay, aria::HIDDEN);
        let expanded = dom.attribute(self.trigger, aria::ARIA_EXPANDED);
        self.is_open != hidden && expanded == Some(aria::bool_value(self.is_open))
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Show the overlay.
    ///
    /// Does nothing and returns `false` when already open. Otherwise records
    /// the current focus, reveals the overlay, rescans it and moves focus
    /// per `initial`. Dialogs always land on their first element; a
    /// `Trap` tab behaviour attaches the trap when the scan found anything.
    pub fn open<D: DomAccess + ?Sized>(&mut self, dom: &mut D, initial: InitialFocus) -> bool {
        if self.is_open {
            return false;
        }

        self.previous_focus = dom.active_element();
        self.is_open = true;
        write_markup(dom, self.overlay, |dom, id| dom.remove_attribute(id, aria::HIDDEN));
        write_markup(dom, self.trigger, |dom, id| {
            dom.set_attribute(id, aria::ARIA_EXPANDED, aria::bool_value(true))
        });

        self.focusable = scanner::scan(dom, self.overlay);
        self.active_index = None;
        if self.config.kind == OverlayKind::Menu && self.config.assign_item_roles {
            for &item in &self.focusable {
                if !dom.has_attribute(item, aria::ROLE) {
                    write_markup(dom, item, |dom, id| {
                        dom.set_attribute(id, aria::ROLE, AriaRole::MenuItem.as_str())
                    });
                }
            }
        }

        let initial = match (self.config.kind, initial) {
            (OverlayKind::Dialog, InitialFocus::Last) => InitialFocus::First,
            (_, initial) => initial,
        };
        match initial {
            InitialFocus::First => {
                self.focus_first(dom);
            }
            InitialFocus::Last => {
                self.focus_last(dom);
            }
            InitialFocus::Keep => {}
        }

        if self.config.effective_tab_behavior() == TabBehavior::Trap {
            self.trap = FocusTrap::attach(dom, self.overlay, self.focusable.clone());
        }

        tracing::debug!(
            target: targets::WIDGET,
            overlay = ?self.overlay,
            focusable = self.focusable.len(),
            ?initial,
            "opened"
        );
        true
    }

    /// Hide the overlay.
    ///
    /// Idempotent: returns `false` and changes nothing when already closed.
    /// Otherwise hides the overlay, detaches the trap and restores focus.
    /// Restoration goes to the element focused before opening, or to the
    /// trigger when nothing was; it is skipped if that element has since
    /// left the document.
    pub fn close<D: DomAccess + ?Sized>(&mut self, dom: &mut D) -> bool {
        if !self.is_open {
            return false;
        }

        self.is_open = false;
        write_markup(dom, self.overlay, |dom, id| dom.set_attribute(id, aria::HIDDEN, ""));
        write_markup(dom, self.trigger, |dom, id| {
            dom.set_attribute(id, aria::ARIA_EXPANDED, aria::bool_value(false))
        });

        if let Some(trap) = self.trap.take() {
            trap.detach();
        }
        self.focusable.clear();
        self.active_index = None;

        let previous = self.previous_focus.take();
        if self.config.restore_focus {
            let restore_to = previous.unwrap_or(self.trigger);
            if dom.is_connected(restore_to) {
                dom.focus(restore_to);
            } else {
                tracing::debug!(
                    target: targets::WIDGET,
                    element = ?restore_to,
                    "previous focus detached, not restoring"
                );
            }
        }

        tracing::debug!(target: targets::WIDGET, overlay = ?self.overlay, "closed");
        true
    }

    /// Close if open, otherwise open with `initial`. Returns the new state.
    pub fn toggle<D: DomAccess + ?Sized>(&mut self, dom: &mut D, initial: InitialFocus) -> bool {
        if self.is_open {
            self.close(dom);
        } else {
            self.open(dom, initial);
        }
        self.is_open
    }

    /// Close the widget and release every listener it holds.
    pub fn teardown<D: DomAccess + ?Sized>(mut self, dom: &mut D) {
        self.close(dom);
        tracing::debug!(target: targets::WIDGET, overlay = ?self.overlay, "widget torn down");
    }

    // =========================================================================
    // Item Focus
    // =========================================================================

    /// Focus the next item, wrapping to the first after the last.
    pub fn focus_next<D: DomAccess + ?Sized>(&mut self, dom: &mut D) -> Option<ElementId> {
        let index = router::next_index(self.current_index(dom), self.focusable.len())?;
        self.focus_index(dom, index)
    }

    /// Focus the previous item, wrapping to the last before the first.
    pub fn focus_previous<D: DomAccess + ?Sized>(&mut self, dom: &mut D) -> Option<ElementId> {
        let index = router::previous_index(self.current_index(dom), self.focusable.len())?;
        self.focus_index(dom, index)
    }

    /// Focus the first item.
    pub fn focus_first<D: DomAccess + ?Sized>(&mut self, dom: &mut D) -> Option<ElementId> {
        self.focus_index(dom, 0)
    }

    /// Focus the last item.
    pub fn focus_last<D: DomAccess + ?Sized>(&mut self, dom: &mut D) -> Option<ElementId> {
        let last = self.focusable.len().checked_sub(1)?;
        self.focus_index(dom, last)
    }

    /// The cursor, resynchronised with whichever item actually has focus.
    fn current_index<D: DomAccess + ?Sized>(&self, dom: &D) -> Option<usize> {
        scanner::index_of(&self.focusable, dom.active_element()).or(self.active_index)
    }

    fn focus_index<D: DomAccess + ?Sized>(&mut self, dom: &mut D, index: usize) -> Option<ElementId> {
        let element = *self.focusable.get(index)?;
        if !dom.focus(element) {
            tracing::debug!(target: targets::WIDGET, ?element, index, "item refused focus");
            return None;
        }
        self.active_index = Some(index);
        Some(element)
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Handle a key press whose target is inside the trigger or the overlay.
    ///
    /// Keys this widget acts on are accepted and, except for Tab presses
    /// that must keep their native effect, have their default prevented.
    pub fn handle_keydown<D: DomAccess + ?Sized>(
        &mut self,
        dom: &mut D,
        event: &mut KeyDownEvent,
    ) -> DispatchResult {
        let context = if dom.contains(self.overlay, event.target) {
            RouteContext::Overlay
        } else if dom.contains(self.trigger, event.target) {
            RouteContext::Trigger
        } else {
            return DispatchResult::Ignored;
        };

        let Some(action) = router::route(&self.config, context, self.is_open, event) else {
            return DispatchResult::Ignored;
        };
        tracing::trace!(target: targets::ROUTER, key = ?event.key, ?context, ?action, "routed key");

        let handled = match action {
            OverlayAction::Open(initial) => {
                self.open(dom, initial);
                true
            }
            OverlayAction::Toggle(initial) => {
                self.toggle(dom, initial);
                true
            }
            OverlayAction::Close | OverlayAction::CloseAndRelease => {
                self.close(dom);
                true
            }
            OverlayAction::FocusNext => {
                self.focus_next(dom);
                true
            }
            OverlayAction::FocusPrevious => {
                self.focus_previous(dom);
                true
            }
            OverlayAction::FocusFirst => {
                self.focus_first(dom);
                true
            }
            OverlayAction::FocusLast => {
                self.focus_last(dom);
                true
            }
            OverlayAction::DelegateToTrap => match &self.trap {
                Some(trap) => trap.handle_key(dom, event),
                None => false,
            },
        };

        if !handled {
            return DispatchResult::Ignored;
        }
        if action.prevents_default() {
            event.prevent_default();
        }
        event.base.accept();
        DispatchResult::Handled
    }

    /// Handle a click anywhere in the document.
    ///
    /// A click on the trigger toggles the overlay. A click outside both
    /// trigger and overlay dismisses it. Clicks inside the overlay are left
    /// alone.
    pub fn handle_click<D: DomAccess + ?Sized>(
        &mut self,
        dom: &mut D,
        event: &ClickEvent,
    ) -> DispatchResult {
        if dom.contains(self.trigger, event.target) {
            let initial = if self.config.focuses_on_open() {
                InitialFocus::First
            } else {
                InitialFocus::Keep
            };
            self.toggle(dom, initial);
            return DispatchResult::Handled;
        }

        if self.is_open
            && self.config.close_on_outside_click
            && self.dismissal.is_outside(dom, event.target)
        {
            tracing::debug!(target: targets::WIDGET, target_element = ?event.target, "outside click");
            self.close(dom);
            return DispatchResult::Handled;
        }

        DispatchResult::Ignored
    }
}

/// Apply an attribute write, logging instead of failing.
///
/// Handles were validated at construction; a failure here means the host
/// removed the element underneath the widget.
fn write_markup<D, F>(dom: &mut D, id: ElementId, op: F)
where
    D: DomAccess + ?Sized,
    F: FnOnce(&mut D, ElementId) -> DomResult<()>,
{
    if let Err(error) = op(dom, id) {
        tracing::warn!(target: targets::WIDGET, element = ?id, %error, "attribute write failed");
    }
}
