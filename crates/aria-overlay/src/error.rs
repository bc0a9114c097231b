//! Error types for overlay widgets.

use aria_overlay_core::{DomError, ElementId};

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Errors raised when a widget cannot be constructed over the given markup.
///
/// Only construction can fail. Once built, a widget treats malformed host
/// state (an empty overlay, a detached focus target) as a reason to skip a
/// step, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    /// No connected element carries the requested `id` attribute.
    #[error("No element with id '{id}'")]
    MissingElement { id: String },

    /// The element handle does not refer to a live element.
    #[error("Element {0:?} does not exist")]
    InvalidElement(ElementId),

    /// The overlay must not contain its own trigger.
    #[error("Overlay element contains its trigger")]
    OverlayContainsTrigger,

    /// A DOM mutation failed.
    #[error(transparent)]
    Dom(#[from] DomError),
}

impl OverlayError {
    /// Create a missing element error.
    pub fn missing(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }
}
