//! Input events delivered to overlay widgets.
//!
//! Events follow the host's event model: each carries the element it was
//! dispatched at, and handlers may mark it accepted (stop propagation) or
//! prevent its default action (for Tab, the platform's own focus move).

use aria_overlay_core::ElementId;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.control && !self.alt && !self.meta
    }

    /// Whether a chord modifier (Ctrl, Alt, Meta) is held.
    ///
    /// Shift alone does not count: it changes Tab direction rather than
    /// forming a shortcut.
    pub fn has_command_modifier(&self) -> bool {
        self.control || self.alt || self.meta
    }
}

/// Keys the overlay widgets react to.
///
/// Only navigation and activation keys are named; printable characters are
/// carried as [`Key::Character`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    /// A printable character.
    Character(char),
    /// Any other key.
    Unknown,
}

impl Key {
    /// Converts a `KeyboardEvent.key` string to a Key.
    ///
    /// Accepts the legacy `"Esc"`, `"Up"`/`"Down"` spellings and `"Spacebar"`
    /// still emitted by older engines.
    pub fn from_dom_key(key: &str) -> Key {
        match key {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Unknown,
                }
            }
        }
    }
}

/// Common data shared by all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    accepted: bool,
    default_prevented: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Suppress the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether the default action has been suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Key press, dispatched at the focused element.
#[derive(Debug, Clone)]
pub struct KeyDownEvent {
    /// Base event data.
    pub base: EventBase,
    /// The element that had focus when the key was pressed.
    pub target: ElementId,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyDownEvent {
    /// Create a new key press event.
    pub fn new(target: ElementId, key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            target,
            key,
            modifiers,
        }
    }

    /// Create a key press without modifiers.
    pub fn plain(target: ElementId, key: Key) -> Self {
        Self::new(target, key, KeyboardModifiers::NONE)
    }

    /// Shorthand for `base.prevent_default()`.
    pub fn prevent_default(&mut self) {
        self.base.prevent_default();
    }

    /// Shorthand for `base.is_default_prevented()`.
    pub fn is_default_prevented(&self) -> bool {
        self.base.is_default_prevented()
    }
}

/// Primary-button click, dispatched at the element under the pointer.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// Base event data.
    pub base: EventBase,
    /// The clicked element.
    pub target: ElementId,
}

impl ClickEvent {
    /// Create a new click event.
    pub fn new(target: ElementId) -> Self {
        Self {
            base: EventBase::new(),
            target,
        }
    }
}

/// Result of dispatching an event to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// The widget acted on the event.
    Handled,
    /// The event was not relevant to the widget.
    Ignored,
}

impl DispatchResult {
    /// Check if the event was handled.
    pub fn was_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }
}
