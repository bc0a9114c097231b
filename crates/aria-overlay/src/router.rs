//! Keyboard routing.
//!
//! The router is a pure mapping from (where focus is, whether the overlay is
//! open, which key) to an [`OverlayAction`]. It never touches the tree; the
//! widget performs the action. Two contexts exist:
//!
//! | Context | Key | Action |
//! |---|---|---|
//! | trigger | Enter / Space | toggle, focusing the first item on open |
//! | trigger | ArrowDown | open and focus first (focus first if already open) |
//! | trigger | ArrowUp | open and focus last (focus last if already open) |
//! | trigger | Escape | close, if open |
//! | overlay | Escape | close |
//! | overlay (menu, disclosure) | ArrowDown / ArrowUp | next / previous, wrapping |
//! | overlay (menu, disclosure) | Home / End | first / last |
//! | overlay | Tab | per [`TabBehavior`]: close and release, delegate to the trap, or nothing |

use crate::config::{OverlayConfig, TabBehavior};
use crate::events::{Key, KeyDownEvent};

/// Where the key event originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteContext {
    /// Focus is on (or inside) the trigger.
    Trigger,
    /// Focus is inside the overlay.
    Overlay,
}

/// Which item receives focus when the overlay opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialFocus {
    /// The first focusable element.
    #[default]
    First,
    /// The last focusable element.
    Last,
    /// Leave focus where it is.
    Keep,
}

/// An action the widget performs in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    /// Open the overlay.
    Open(InitialFocus),
    /// Close if open, otherwise open.
    Toggle(InitialFocus),
    /// Close and restore focus.
    Close,
    /// Close but let the key's default action proceed (Tab moves on).
    CloseAndRelease,
    /// Focus the next item, wrapping to the first after the last.
    FocusNext,
    /// Focus the previous item, wrapping to the last before the first.
    FocusPrevious,
    /// Focus the first item.
    FocusFirst,
    /// Focus the last item.
    FocusLast,
    /// Hand the key to the focus trap.
    DelegateToTrap,
}

impl OverlayAction {
    /// Whether performing the action suppresses the key's default.
    ///
    /// The trap decides for itself; Tab-to-close must let focus move on.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Self::CloseAndRelease | Self::DelegateToTrap)
    }
}

/// Map a key press to an action.
pub fn route(
    config: &OverlayConfig,
    context: RouteContext,
    is_open: bool,
    event: &KeyDownEvent,
) -> Option<OverlayAction> {
    if event.modifiers.has_command_modifier() {
        return None;
    }

    match context {
        RouteContext::Trigger => route_trigger(config, is_open, event.key),
        RouteContext::Overlay if is_open => route_overlay(config, event.key),
        RouteContext::Overlay => None,
    }
}

fn route_trigger(config: &OverlayConfig, is_open: bool, key: Key) -> Option<OverlayAction> {
    let action = match key {
        Key::Enter | Key::Space => OverlayAction::Toggle(InitialFocus::First),
        Key::ArrowDown if is_open => OverlayAction::FocusFirst,
        Key::ArrowDown => OverlayAction::Open(InitialFocus::First),
        Key::ArrowUp if is_open => OverlayAction::FocusLast,
        Key::ArrowUp => OverlayAction::Open(InitialFocus::Last),
        Key::Escape if is_open && config.close_on_escape => OverlayAction::Close,
        _ => return None,
    };
    Some(action)
}

fn route_overlay(config: &OverlayConfig, key: Key) -> Option<OverlayAction> {
    let item_navigation = config.kind.uses_item_navigation();
    let action = match key {
        Key::Escape if config.close_on_escape => OverlayAction::Close,
        Key::Tab => match config.effective_tab_behavior() {
            TabBehavior::CloseOnTab => OverlayAction::CloseAndRelease,
            TabBehavior::Trap => OverlayAction::DelegateToTrap,
            TabBehavior::Native => return None,
        },
        Key::ArrowDown if item_navigation => OverlayAction::FocusNext,
        Key::ArrowUp if item_navigation => OverlayAction::FocusPrevious,
        Key::Home if item_navigation => OverlayAction::FocusFirst,
        Key::End if item_navigation => OverlayAction::FocusLast,
        _ => return None,
    };
    Some(action)
}

/// Index after `current`, wrapping to 0. `None` (no selection) yields 0.
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(current.map_or(0, |i| (i + 1) % len))
}

/// Index before `current`, wrapping to the last. `None` or 0 yields `len - 1`.
pub fn previous_index(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i > 0 && i < len => i - 1,
        _ => len - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::KeyboardModifiers;
    use aria_overlay_core::{Document, ElementId};

    fn target() -> ElementId {
        Document::new().body()
    }

    fn key(k: Key) -> KeyDownEvent {
        KeyDownEvent::plain(target(), k)
    }

    fn shift_tab() -> KeyDownEvent {
        KeyDownEvent::new(target(), Key::Tab, KeyboardModifiers::SHIFT)
    }

    #[test]
    fn test_trigger_closed() {
        let config = OverlayConfig::menu();
        let r = |k| route(&config, RouteContext::Trigger, false, &key(k));
        assert_eq!(r(Key::Enter), Some(OverlayAction::Toggle(InitialFocus::First)));
        assert_eq!(r(Key::Space), Some(OverlayAction::Toggle(InitialFocus::First)));
        assert_eq!(r(Key::ArrowDown), Some(OverlayAction::Open(InitialFocus::First)));
        assert_eq!(r(Key::ArrowUp), Some(OverlayAction::Open(InitialFocus::Last)));
        assert_eq!(r(Key::Escape), None);
        assert_eq!(r(Key::Tab), None);
    }

    #[test]
    fn test_trigger_open() {
        let config = OverlayConfig::menu();
        let r = |k| route(&config, RouteContext::Trigger, true, &key(k));
        assert_eq!(r(Key::ArrowDown), Some(OverlayAction::FocusFirst));
        assert_eq!(r(Key::ArrowUp), Some(OverlayAction::FocusLast));
        assert_eq!(r(Key::Escape), Some(OverlayAction::Close));
    }

    #[test]
    fn test_menu_overlay_table() {
        let config = OverlayConfig::menu();
        let r = |k| route(&config, RouteContext::Overlay, true, &key(k));
        assert_eq!(r(Key::Escape), Some(OverlayAction::Close));
        assert_eq!(r(Key::ArrowDown), Some(OverlayAction::FocusNext));
        assert_eq!(r(Key::ArrowUp), Some(OverlayAction::FocusPrevious));
        assert_eq!(r(Key::Home), Some(OverlayAction::FocusFirst));
        assert_eq!(r(Key::End), Some(OverlayAction::FocusLast));
        assert_eq!(r(Key::Tab), Some(OverlayAction::CloseAndRelease));
        assert_eq!(r(Key::Character('x')), None);
    }

    #[test]
    fn test_dialog_overlay_table() {
        let config = OverlayConfig::dialog();
        let r = |e: KeyDownEvent| route(&config, RouteContext::Overlay, true, &e);
        assert_eq!(r(key(Key::Escape)), Some(OverlayAction::Close));
        assert_eq!(r(key(Key::Tab)), Some(OverlayAction::DelegateToTrap));
        assert_eq!(r(shift_tab()), Some(OverlayAction::DelegateToTrap));
        assert_eq!(r(key(Key::ArrowDown)), None);
        assert_eq!(r(key(Key::Home)), None);
    }

    #[test]
    fn test_overlay_closed_routes_nothing() {
        let config = OverlayConfig::menu();
        assert_eq!(
            route(&config, RouteContext::Overlay, false, &key(Key::Escape)),
            None
        );
    }

    #[test]
    fn test_config_switches() {
        let native = OverlayConfig::menu().with_tab_behavior(TabBehavior::Native);
        assert_eq!(route(&native, RouteContext::Overlay, true, &key(Key::Tab)), None);

        let sticky = OverlayConfig::dialog().with_close_on_escape(false);
        assert_eq!(route(&sticky, RouteContext::Overlay, true, &key(Key::Escape)), None);
        assert_eq!(route(&sticky, RouteContext::Trigger, true, &key(Key::Escape)), None);
    }

    #[test]
    fn test_command_chords_ignored() {
        let config = OverlayConfig::menu();
        let event = KeyDownEvent::new(target(), Key::ArrowDown, KeyboardModifiers::CTRL);
        assert_eq!(route(&config, RouteContext::Trigger, false, &event), None);
    }

    #[test]
    fn test_prevents_default() {
        assert!(OverlayAction::Close.prevents_default());
        assert!(OverlayAction::FocusNext.prevents_default());
        assert!(!OverlayAction::CloseAndRelease.prevents_default());
        assert!(!OverlayAction::DelegateToTrap.prevents_default());
    }

    #[test]
    fn test_wrap_arithmetic() {
        assert_eq!(next_index(None, 3), Some(0));
        assert_eq!(next_index(Some(0), 3), Some(1));
        assert_eq!(next_index(Some(2), 3), Some(0));
        assert_eq!(previous_index(None, 3), Some(2));
        assert_eq!(previous_index(Some(0), 3), Some(2));
        assert_eq!(previous_index(Some(2), 3), Some(1));
        assert_eq!(next_index(None, 0), None);
        assert_eq!(previous_index(Some(0), 0), None);
    }
}
