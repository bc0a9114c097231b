//! Element identifiers and per-element data.
//!
//! Elements live in an arena owned by [`Document`](crate::Document). An
//! [`ElementId`] is a stable handle into that arena: it stays valid while the
//! element is moved around the tree and becomes invalid once the element is
//! destroyed. Holding an `ElementId` never keeps an element alive, which is
//! how widgets reference elements they do not own.

use std::collections::BTreeMap;

use slotmap::new_key_type;

new_key_type! {
    /// A unique identifier for an element in a document.
    ///
    /// `ElementId`s are weak handles: they do not own the element and are
    /// checked against the arena on every access.
    pub struct ElementId;
}

/// Data stored in the arena for each element.
#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    /// Lowercase tag name.
    pub(crate) tag: String,
    /// Attributes, ordered by name for stable debug output.
    pub(crate) attributes: BTreeMap<String, String>,
    /// Text content, used only for debugging and fixtures.
    pub(crate) text: Option<String>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
}

impl ElementData {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub(crate) fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Whether the platform focus model lets keyboard navigation land here.
    ///
    /// Matches buttons and form controls that are not disabled, links with a
    /// destination, and anything else carrying an explicit non-negative
    /// `tabindex`. A disabled control is never focusable, whatever its
    /// `tabindex`.
    pub(crate) fn is_focusable(&self) -> bool {
        if self.is_disabled() {
            return false;
        }
        let matches_tag = match self.tag.as_str() {
            "button" | "input" | "select" | "textarea" => true,
            "a" | "area" => self.has_attribute("href"),
            _ => false,
        };

        matches_tag || self.explicit_tab_index().is_some_and(|index| index >= 0)
    }

    /// Whether programmatic focus may land here.
    ///
    /// Wider than [`is_focusable`](Self::is_focusable): `tabindex="-1"` keeps
    /// an element out of Tab order but still lets scripts focus it.
    pub(crate) fn accepts_focus(&self) -> bool {
        self.is_focusable() || (!self.is_disabled() && self.explicit_tab_index().is_some())
    }

    /// A form control carrying `disabled`.
    fn is_disabled(&self) -> bool {
        matches!(self.tag.as_str(), "button" | "input" | "select" | "textarea")
            && self.has_attribute("disabled")
    }

    /// The parsed `tabindex` attribute, if present and numeric.
    pub(crate) fn explicit_tab_index(&self) -> Option<i32> {
        self.attribute("tabindex")
            .and_then(|value| value.trim().parse::<i32>().ok())
    }
}
