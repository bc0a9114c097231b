//! Widget configuration.
//!
//! The three overlay flavours differ in a few switches, most visibly in what
//! Tab does while the overlay has focus: menus and disclosures close and let
//! focus move on, dialogs keep focus inside. Each switch is explicit here so
//! a page can mix behaviours without forking the widget.
//!
//! Configuration can be built in code or loaded from TOML:
//!
//! ```
//! use aria_overlay::{OverlayKind, OverlaySetConfig, TabBehavior};
//!
//! let set = OverlaySetConfig::from_toml_str(r#"
//!     [[overlay]]
//!     trigger = "file-button"
//!     overlay = "file-menu"
//!     kind = "menu"
//!
//!     [[overlay]]
//!     trigger = "settings-button"
//!     overlay = "settings-dialog"
//!     kind = "dialog"
//!     close_on_outside_click = false
//! "#)?;
//!
//! assert_eq!(set.overlays.len(), 2);
//! assert_eq!(set.overlays[1].config.kind, OverlayKind::Dialog);
//! assert_eq!(set.overlays[1].config.effective_tab_behavior(), TabBehavior::Trap);
//! # Ok::<(), aria_overlay::ConfigError>(())
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aria::AriaRole;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed into the configuration schema.
    #[error("Invalid overlay configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("Failed to read overlay configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The widget flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    /// Dropdown menu: arrow-key navigation, closes on Tab.
    #[default]
    Menu,
    /// Modal dialog: Tab cycles inside.
    Dialog,
    /// Accordion panel: toggled by its header, closes on Tab.
    Disclosure,
}

impl OverlayKind {
    /// Tab behaviour when none is configured.
    pub fn default_tab_behavior(&self) -> TabBehavior {
        match self {
            Self::Menu | Self::Disclosure => TabBehavior::CloseOnTab,
            Self::Dialog => TabBehavior::Trap,
        }
    }

    /// Whether arrow/Home/End keys move between items.
    pub fn uses_item_navigation(&self) -> bool {
        matches!(self, Self::Menu | Self::Disclosure)
    }

    /// Role written on the overlay element.
    pub fn overlay_role(&self) -> AriaRole {
        match self {
            Self::Menu => AriaRole::Menu,
            Self::Dialog => AriaRole::Dialog,
            Self::Disclosure => AriaRole::Region,
        }
    }

    /// `aria-haspopup` value for the trigger, if the kind opens a popup.
    pub fn haspopup_value(&self) -> Option<&'static str> {
        match self {
            Self::Menu => Some("menu"),
            Self::Dialog => Some("dialog"),
            Self::Disclosure => None,
        }
    }
}

/// What Tab does while focus is inside the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabBehavior {
    /// Close the overlay and let the host move focus on.
    CloseOnTab,
    /// Cycle focus within the overlay's focusable elements.
    Trap,
    /// Leave Tab to the host entirely.
    Native,
}

/// Per-widget settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Widget flavour.
    pub kind: OverlayKind,
    /// Override for the kind's default Tab behaviour.
    pub tab_behavior: Option<TabBehavior>,
    /// Close when Escape is pressed.
    pub close_on_escape: bool,
    /// Close when a click lands outside trigger and overlay.
    pub close_on_outside_click: bool,
    /// Return focus to where it was before opening.
    pub restore_focus: bool,
    /// Override for whether opening moves focus into the overlay.
    pub focus_on_open: Option<bool>,
    /// Give scanned menu items `role="menuitem"` when they have no role.
    pub assign_item_roles: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::new(OverlayKind::default())
    }
}

impl OverlayConfig {
    /// Defaults for a widget kind.
    pub fn new(kind: OverlayKind) -> Self {
        Self {
            kind,
            tab_behavior: None,
            close_on_escape: true,
            close_on_outside_click: true,
            restore_focus: true,
            focus_on_open: None,
            assign_item_roles: true,
        }
    }

    /// Dropdown menu defaults.
    pub fn menu() -> Self {
        Self::new(OverlayKind::Menu)
    }

    /// Modal dialog defaults.
    pub fn dialog() -> Self {
        Self::new(OverlayKind::Dialog)
    }

    /// Accordion panel defaults.
    pub fn disclosure() -> Self {
        Self::new(OverlayKind::Disclosure)
    }

    /// Set the Tab behaviour.
    pub fn with_tab_behavior(mut self, behavior: TabBehavior) -> Self {
        self.tab_behavior = Some(behavior);
        self
    }

    /// Set whether opening moves focus into the overlay.
    pub fn with_focus_on_open(mut self, focus: bool) -> Self {
        self.focus_on_open = Some(focus);
        self
    }

    /// Set whether outside clicks dismiss the overlay.
    pub fn with_close_on_outside_click(mut self, close: bool) -> Self {
        self.close_on_outside_click = close;
        self
    }

    /// Set whether Escape dismisses the overlay.
    pub fn with_close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// The Tab behaviour in effect.
    pub fn effective_tab_behavior(&self) -> TabBehavior {
        self.tab_behavior
            .unwrap_or_else(|| self.kind.default_tab_behavior())
    }

    /// Whether opening moves focus into the overlay.
    ///
    /// Disclosure panels stay on their header by default; menus and dialogs
    /// move focus in.
    pub fn focuses_on_open(&self) -> bool {
        self.focus_on_open
            .unwrap_or(!matches!(self.kind, OverlayKind::Disclosure))
    }

    /// Parse a single widget configuration from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

/// One trigger/overlay pair in a page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayEntry {
    /// `id` attribute of the trigger element.
    pub trigger: String,
    /// `id` attribute of the overlay element.
    pub overlay: String,
    /// Widget settings.
    #[serde(flatten)]
    pub config: OverlayConfig,
}

/// Configuration for every overlay on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySetConfig {
    /// The overlays, in initialization order.
    #[serde(default, rename = "overlay")]
    pub overlays: Vec<OverlayEntry>,
}

impl OverlaySetConfig {
    /// Parse a page configuration from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a page configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults() {
        assert_eq!(OverlayConfig::menu().effective_tab_behavior(), TabBehavior::CloseOnTab);
        assert_eq!(OverlayConfig::disclosure().effective_tab_behavior(), TabBehavior::CloseOnTab);
        assert_eq!(OverlayConfig::dialog().effective_tab_behavior(), TabBehavior::Trap);

        assert!(OverlayConfig::menu().focuses_on_open());
        assert!(OverlayConfig::dialog().focuses_on_open());
        assert!(!OverlayConfig::disclosure().focuses_on_open());
    }

    #[test]
    fn test_overrides() {
        let config = OverlayConfig::menu()
            .with_tab_behavior(TabBehavior::Trap)
            .with_focus_on_open(false);
        assert_eq!(config.effective_tab_behavior(), TabBehavior::Trap);
        assert!(!config.focuses_on_open());
    }

    #[test]
    fn test_parse_single() {
        let config = OverlayConfig::from_toml_str(
            r#"
            kind = "dialog"
            tab_behavior = "native"
            close_on_escape = false
            "#,
        )
        .unwrap();

        assert_eq!(config.kind, OverlayKind::Dialog);
        assert_eq!(config.effective_tab_behavior(), TabBehavior::Native);
        assert!(!config.close_on_escape);
        assert!(config.close_on_outside_click);
    }

    #[test]
    fn test_empty_toml_is_menu_defaults() {
        assert_eq!(OverlayConfig::from_toml_str("").unwrap(), OverlayConfig::menu());
    }

    #[test]
    fn test_parse_errors() {
        let err = OverlayConfig::from_toml_str("kind = \"popover\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Invalid overlay configuration"));
    }

    #[test]
    fn test_parse_set() {
        let set = OverlaySetConfig::from_toml_str(
            r#"
            [[overlay]]
            trigger = "faq-1-header"
            overlay = "faq-1-panel"
            kind = "disclosure"
            focus_on_open = true
            "#,
        )
        .unwrap();

        let entry = &set.overlays[0];
        assert_eq!(entry.trigger, "faq-1-header");
        assert_eq!(entry.overlay, "faq-1-panel");
        assert_eq!(entry.config.kind, OverlayKind::Disclosure);
        assert!(entry.config.focuses_on_open());
    }

    #[test]
    fn test_load_missing_file() {
        let err = OverlaySetConfig::load("/nonexistent/overlays.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_roles() {
        assert_eq!(OverlayKind::Menu.overlay_role(), AriaRole::Menu);
        assert_eq!(OverlayKind::Dialog.haspopup_value(), Some("dialog"));
        assert_eq!(OverlayKind::Disclosure.haspopup_value(), None);
    }
}
