//! ARIA vocabulary written by overlay widgets.
//!
//! These are the only attributes a widget mutates on the host tree. Keeping
//! the names in one place means the markup contract can be read off this
//! module.

/// Expanded state, on the trigger.
pub const ARIA_EXPANDED: &str = "aria-expanded";
/// Id reference from the trigger to the overlay.
pub const ARIA_CONTROLS: &str = "aria-controls";
/// Kind of popup the trigger opens.
pub const ARIA_HASPOPUP: &str = "aria-haspopup";
/// Marks a dialog as modal.
pub const ARIA_MODAL: &str = "aria-modal";
/// Visibility marker, on the overlay.
pub const HIDDEN: &str = "hidden";
/// Element role.
pub const ROLE: &str = "role";

/// The accessibility roles overlay widgets assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AriaRole {
    /// A button.
    Button,
    /// A list of choices.
    Menu,
    /// An item within a menu.
    MenuItem,
    /// A dialog box.
    Dialog,
    /// A landmark section, used for disclosure panels.
    Region,
}

impl AriaRole {
    /// The `role` attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Menu => "menu",
            Self::MenuItem => "menuitem",
            Self::Dialog => "dialog",
            Self::Region => "region",
        }
    }
}

impl std::fmt::Display for AriaRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean ARIA state as an attribute value.
pub(crate) fn bool_value(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
