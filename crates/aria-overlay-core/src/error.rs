//! Error types for the host DOM model.

/// Result type for DOM operations.
pub type DomResult<T> = std::result::Result<T, DomError>;

/// Errors that can occur while mutating the element tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The element ID is invalid or the element has been destroyed.
    #[error("Invalid or destroyed element ID")]
    InvalidElementId,

    /// Attempted to append an element to itself or one of its descendants.
    #[error("Cannot append an element to itself or one of its descendants")]
    CircularParentage,

    /// Attribute names must be non-empty and free of whitespace.
    #[error("Invalid attribute name '{0}'")]
    InvalidAttributeName(String),
}

impl DomError {
    /// Create an invalid attribute name error.
    pub fn invalid_attribute(name: impl Into<String>) -> Self {
        Self::InvalidAttributeName(name.into())
    }
}
