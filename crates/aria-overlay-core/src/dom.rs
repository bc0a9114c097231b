//! The host DOM interface consumed by widgets.
//!
//! Widgets never own the tree they decorate. They read structure, flip a
//! handful of attributes and move focus, all through [`DomAccess`]. The
//! in-memory [`Document`](crate::Document) implements it; an embedder backed
//! by a real browser DOM can implement it over its own handles.

use crate::element::ElementId;
use crate::error::DomResult;
use crate::listener::ListenerRegistry;

/// Trait for reading and mutating a host element tree.
///
/// Methods taking an unknown [`ElementId`] return `None`, `false` or an
/// empty slice rather than panicking; mutators report
/// [`DomError::InvalidElementId`](crate::DomError::InvalidElementId).
pub trait DomAccess {
    /// The root element of the tree.
    fn root(&self) -> ElementId;

    /// Whether the id refers to a live element.
    fn contains_element(&self, id: ElementId) -> bool;

    /// Find a connected element by its `id` attribute, in document order.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Lowercase tag name of an element.
    fn tag_name(&self, id: ElementId) -> Option<&str>;

    /// Get an attribute value.
    fn attribute(&self, id: ElementId, name: &str) -> Option<&str>;

    /// Check whether an attribute is present.
    fn has_attribute(&self, id: ElementId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set an attribute value, replacing any existing one.
    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> DomResult<()>;

    /// Remove an attribute. Removing an absent attribute is not an error.
    fn remove_attribute(&mut self, id: ElementId, name: &str) -> DomResult<()>;

    /// Parent of an element.
    fn parent(&self, id: ElementId) -> Option<ElementId>;

    /// Children of an element, in document order.
    fn children(&self, id: ElementId) -> &[ElementId];

    /// All descendants of an element in document (pre-)order, excluding itself.
    fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the element or any ancestor carries the `hidden` attribute.
    fn is_hidden(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(element) = current {
            if self.has_attribute(element, "hidden") {
                return true;
            }
            current = self.parent(element);
        }
        false
    }

    /// Whether the element is attached to the document root.
    fn is_connected(&self, id: ElementId) -> bool;

    /// Whether the element participates in sequential (Tab) navigation.
    fn is_focusable(&self, id: ElementId) -> bool;

    /// The element holding keyboard focus.
    fn active_element(&self) -> Option<ElementId>;

    /// Move focus to an element.
    ///
    /// Returns `false` and leaves focus unchanged when the element cannot
    /// take focus (unknown, detached, not focusable, or inside a hidden
    /// subtree).
    fn focus(&mut self, id: ElementId) -> bool;

    /// Clear keyboard focus.
    fn blur(&mut self);

    /// The listener table for this document.
    fn listeners(&self) -> &ListenerRegistry;
}
