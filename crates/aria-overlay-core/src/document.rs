//! In-memory element tree.
//!
//! [`Document`] is an arena of elements rooted at a `<body>` element. It
//! implements [`DomAccess`] and adds the structural operations a host page
//! performs: creating elements, appending, detaching and destroying them.
//!
//! # Example
//!
//! ```
//! use aria_overlay_core::{Document, DomAccess};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let button = doc.build("button").id("open").text("Open").append_to(body)?;
//!
//! assert!(doc.focus(button));
//! assert_eq!(doc.active_element(), Some(button));
//! assert_eq!(doc.element_by_id("open"), Some(button));
//! # Ok::<(), aria_overlay_core::DomError>(())
//! ```

use slotmap::SlotMap;

use crate::dom::DomAccess;
use crate::element::{ElementData, ElementId};
use crate::error::{DomError, DomResult};
use crate::listener::ListenerRegistry;
use crate::logging::targets;

const TARGET: &str = targets::DOCUMENT;

/// An element tree with a focus cursor and a listener table.
pub struct Document {
    elements: SlotMap<ElementId, ElementData>,
    body: ElementId,
    active: Option<ElementId>,
    listeners: ListenerRegistry,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.elements.len())
            .field("active", &self.active)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only its `<body>` root.
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let body = elements.insert(ElementData::new("body"));
        Self {
            elements,
            body,
            active: None,
            listeners: ListenerRegistry::new(),
        }
    }

    /// The root element.
    #[inline]
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Number of live elements, connected or not, including the body.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = self.elements.insert(ElementData::new(tag));
        tracing::trace!(target: TARGET, ?id, tag, "created element");
        id
    }

    /// Start building an element with attributes.
    pub fn build(&mut self, tag: &str) -> ElementBuilder<'_> {
        let id = self.create_element(tag);
        ElementBuilder { doc: self, id }
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> DomResult<()> {
        if !self.elements.contains_key(parent) || !self.elements.contains_key(child) {
            return Err(DomError::InvalidElementId);
        }
        if self.contains(child, parent) {
            return Err(DomError::CircularParentage);
        }

        self.unlink(child);
        if let Some(data) = self.elements.get_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.elements.get_mut(parent) {
            data.children.push(child);
        }
        Ok(())
    }

    /// Detach an element (and its subtree) from its parent.
    ///
    /// The element stays alive and can be re-appended. Focus inside the
    /// detached subtree is lost.
    pub fn remove(&mut self, id: ElementId) -> DomResult<()> {
        if !self.elements.contains_key(id) {
            return Err(DomError::InvalidElementId);
        }
        if id == self.body {
            return Err(DomError::CircularParentage);
        }
        self.unlink(id);
        if let Some(active) = self.active
            && self.contains(id, active)
        {
            tracing::trace!(target: TARGET, ?active, "focused element detached");
            self.active = None;
        }
        Ok(())
    }

    /// Detach and free an element and all of its descendants.
    pub fn destroy(&mut self, id: ElementId) -> DomResult<()> {
        self.remove(id)?;
        let mut doomed = self.descendants(id);
        doomed.push(id);
        tracing::trace!(target: TARGET, ?id, count = doomed.len(), "destroying subtree");
        for element in doomed {
            self.elements.remove(element);
        }
        Ok(())
    }

    /// Text content of an element.
    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).and_then(|d| d.text.as_deref())
    }

    /// Set the text content of an element.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> DomResult<()> {
        let data = self.elements.get_mut(id).ok_or(DomError::InvalidElementId)?;
        data.text = Some(text.into());
        Ok(())
    }

    /// All attributes of an element, ordered by name.
    pub fn attributes(&self, id: ElementId) -> impl Iterator<Item = (&str, &str)> {
        self.elements
            .get(id)
            .into_iter()
            .flat_map(|d| d.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    fn unlink(&mut self, id: ElementId) {
        let old_parent = self.elements.get_mut(id).and_then(|d| d.parent.take());
        if let Some(parent) = old_parent
            && let Some(parent_data) = self.elements.get_mut(parent)
        {
            parent_data.children.retain(|&child| child != id);
        }
    }
}

fn validate_attribute_name(name: &str) -> DomResult<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(DomError::invalid_attribute(name));
    }
    Ok(())
}

impl DomAccess for Document {
    fn root(&self) -> ElementId {
        self.body
    }

    fn contains_element(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        std::iter::once(self.body)
            .chain(self.descendants(self.body))
            .find(|&element| self.attribute(element, "id") == Some(id))
    }

    fn tag_name(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).map(|d| d.tag.as_str())
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements.get(id).and_then(|d| d.attribute(name))
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> DomResult<()> {
        validate_attribute_name(name)?;
        let data = self.elements.get_mut(id).ok_or(DomError::InvalidElementId)?;
        data.attributes.insert(name.to_string(), value.to_string());

        // Hiding a subtree drops focus held inside it
        if name == "hidden"
            && let Some(active) = self.active
            && self.contains(id, active)
        {
            tracing::trace!(target: TARGET, ?active, "focus lost to hidden subtree");
            self.active = None;
        }
        Ok(())
    }

    fn remove_attribute(&mut self, id: ElementId, name: &str) -> DomResult<()> {
        let data = self.elements.get_mut(id).ok_or(DomError::InvalidElementId)?;
        data.attributes.remove(name);
        Ok(())
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|d| d.parent)
    }

    fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|d| d.children.as_slice())
            .unwrap_or(&[])
    }

    fn is_connected(&self, id: ElementId) -> bool {
        self.elements.contains_key(id) && self.contains(self.body, id)
    }

    fn is_focusable(&self, id: ElementId) -> bool {
        self.elements.get(id).is_some_and(ElementData::is_focusable)
    }

    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn focus(&mut self, id: ElementId) -> bool {
        let accepts = self.elements.get(id).is_some_and(ElementData::accepts_focus);
        if !accepts || !self.is_connected(id) || self.is_hidden(id) {
            tracing::trace!(target: TARGET, ?id, "focus refused");
            return false;
        }
        if self.active != Some(id) {
            tracing::trace!(target: TARGET, from = ?self.active, to = ?id, "focus moved");
            self.active = Some(id);
        }
        true
    }

    fn blur(&mut self) {
        self.active = None;
    }

    fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }
}

/// Fluent builder returned by [`Document::build`].
///
/// The element is created immediately; the builder only sets attributes and
/// finally places it in the tree.
pub struct ElementBuilder<'a> {
    doc: &'a mut Document,
    id: ElementId,
}

impl ElementBuilder<'_> {
    /// Set the `id` attribute.
    pub fn id(self, value: &str) -> Self {
        self.attr("id", value)
    }

    /// Set an attribute. Invalid names are ignored.
    pub fn attr(self, name: &str, value: &str) -> Self {
        if let Err(err) = self.doc.set_attribute(self.id, name, value) {
            tracing::debug!(target: TARGET, %err, "builder attribute skipped");
        }
        self
    }

    /// Set the text content.
    pub fn text(self, text: &str) -> Self {
        if let Some(data) = self.doc.elements.get_mut(self.id) {
            data.text = Some(text.to_string());
        }
        self
    }

    /// Append the element to `parent` and return its id.
    pub fn append_to(self, parent: ElementId) -> DomResult<ElementId> {
        self.doc.append_child(parent, self.id)?;
        Ok(self.id)
    }

    /// Return the element id, leaving the element detached.
    pub fn finish(self) -> ElementId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    }

    fn sample() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::new();
        let body = doc.body();
        let nav = doc.build("nav").id("nav").append_to(body).unwrap();
        let a = doc.build("button").id("a").append_to(nav).unwrap();
        let b = doc.build("button").id("b").append_to(nav).unwrap();
        (doc, nav, a, b)
    }

    #[test]
    fn test_new_document_has_body() {
        let doc = Document::new();
        assert_eq!(doc.tag_name(doc.body()), Some("body"));
        assert!(doc.is_connected(doc.body()));
        assert_eq!(doc.element_count(), 1);
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (mut doc, nav, a, b) = sample();
        let inner = doc.build("span").append_to(a).unwrap();
        assert_eq!(doc.descendants(nav), vec![a, inner, b]);
        assert_eq!(doc.descendants(doc.body()), vec![nav, a, inner, b]);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let (doc, nav, a, b) = sample();
        assert!(doc.contains(nav, a));
        assert!(doc.contains(a, a));
        assert!(!doc.contains(a, b));
        assert!(!doc.contains(a, nav));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let (mut doc, nav, a, _) = sample();
        assert_eq!(doc.append_child(a, nav), Err(DomError::CircularParentage));
        assert_eq!(doc.append_child(nav, nav), Err(DomError::CircularParentage));
    }

    #[test]
    fn test_append_reparents() {
        let (mut doc, nav, a, b) = sample();
        doc.append_child(b, a).unwrap();
        assert_eq!(doc.children(nav), &[b]);
        assert_eq!(doc.parent(a), Some(b));
    }

    #[test]
    fn test_element_by_id_ignores_detached() {
        let (mut doc, _, a, _) = sample();
        assert_eq!(doc.element_by_id("a"), Some(a));
        doc.remove(a).unwrap();
        assert_eq!(doc.element_by_id("a"), None);
        assert!(doc.contains_element(a));
        assert!(!doc.is_connected(a));
    }

    #[test]
    fn test_focus_rules() {
        init_tracing();
        let (mut doc, nav, a, b) = sample();
        assert!(!doc.focus(nav), "plain container is not focusable");
        assert!(doc.focus(a));
        assert_eq!(doc.active_element(), Some(a));

        doc.set_attribute(nav, "hidden", "").unwrap();
        assert!(!doc.focus(b), "hidden subtree refuses focus");
        assert_eq!(doc.active_element(), None);

        doc.remove_attribute(nav, "hidden").unwrap();
        assert!(doc.focus(b));
    }

    #[test]
    fn test_focus_detached_refused() {
        let mut doc = Document::new();
        let loose = doc.create_element("button");
        assert!(!doc.focus(loose));
    }

    #[test]
    fn test_remove_clears_focus_inside() {
        init_tracing();
        let (mut doc, nav, a, _) = sample();
        doc.focus(a);
        doc.remove(nav).unwrap();
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn test_hiding_drops_focus_inside() {
        init_tracing();
        let mut doc = Document::new();
        let body = doc.body();
        let panel = doc.build("div").append_to(body).unwrap();
        let button = doc.build("button").append_to(panel).unwrap();
        assert!(doc.focus(button));

        doc.set_attribute(panel, "hidden", "").unwrap();
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn test_destroy_frees_subtree() {
        let (mut doc, nav, a, b) = sample();
        doc.destroy(nav).unwrap();
        assert!(!doc.contains_element(nav));
        assert!(!doc.contains_element(a));
        assert!(!doc.contains_element(b));
        assert_eq!(doc.element_count(), 1);
        assert_eq!(doc.destroy(nav), Err(DomError::InvalidElementId));
    }

    #[test]
    fn test_body_cannot_be_removed() {
        let mut doc = Document::new();
        let body = doc.body();
        assert!(doc.remove(body).is_err());
    }

    #[test]
    fn test_attribute_validation() {
        let (mut doc, _, a, _) = sample();
        assert_eq!(
            doc.set_attribute(a, "bad name", "x"),
            Err(DomError::InvalidAttributeName("bad name".into()))
        );
        assert!(doc.set_attribute(a, "", "x").is_err());
        doc.set_attribute(a, "aria-expanded", "false").unwrap();
        assert_eq!(doc.attribute(a, "aria-expanded"), Some("false"));
        doc.remove_attribute(a, "aria-expanded").unwrap();
        doc.remove_attribute(a, "aria-expanded").unwrap();
        assert!(!doc.has_attribute(a, "aria-expanded"));
    }

    #[test]
    fn test_builder_text_and_finish() {
        let mut doc = Document::new();
        let label = doc.build("span").text("Hello").finish();
        assert_eq!(doc.text(label), Some("Hello"));
        assert!(!doc.is_connected(label));
        doc.set_text(label, "Bye").unwrap();
        assert_eq!(doc.text(label), Some("Bye"));
    }
}
