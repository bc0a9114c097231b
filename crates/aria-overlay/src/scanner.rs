//! Focusable-element scanning.

use aria_overlay_core::{DomAccess, ElementId};

/// Collect the interactive descendants of `overlay`, in document order.
///
/// Subtrees marked `hidden` inside the overlay are skipped along with their
/// children, since the host refuses focus there.
///
/// The result is never cached: overlay content may change between opens,
/// so callers rescan every time the overlay opens. An empty result means no
/// focus trap is possible.
pub fn scan<D: DomAccess + ?Sized>(dom: &D, overlay: ElementId) -> Vec<ElementId> {
    let mut found = Vec::new();
    let mut stack: Vec<ElementId> = dom.children(overlay).iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        if dom.has_attribute(id, "hidden") {
            continue;
        }
        if dom.is_focusable(id) {
            found.push(id);
        }
        stack.extend(dom.children(id).iter().rev().copied());
    }
    found
}

/// Position of `element` in a scanned sequence.
pub(crate) fn index_of(elements: &[ElementId], element: Option<ElementId>) -> Option<usize> {
    let element = element?;
    elements.iter().position(|&id| id == element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_overlay_core::Document;

    #[test]
    fn test_scan_document_order_and_predicate() {
        let mut doc = Document::new();
        let body = doc.body();
        let panel = doc.build("div").append_to(body).unwrap();
        let first = doc.build("button").append_to(panel).unwrap();
        let group = doc.build("fieldset").append_to(panel).unwrap();
        let input = doc.build("input").append_to(group).unwrap();
        doc.build("input").attr("disabled", "").append_to(group).unwrap();
        doc.build("a").append_to(panel).unwrap();
        let link = doc.build("a").attr("href", "/help").append_to(panel).unwrap();
        let custom = doc.build("div").attr("tabindex", "0").append_to(panel).unwrap();
        doc.build("div").attr("tabindex", "-1").append_to(panel).unwrap();
        doc.build("p").append_to(panel).unwrap();

        assert_eq!(scan(&doc, panel), vec![first, input, link, custom]);
    }

    #[test]
    fn test_scan_excludes_container_itself() {
        let mut doc = Document::new();
        let body = doc.body();
        let panel = doc.build("div").attr("tabindex", "0").append_to(body).unwrap();
        assert!(scan(&doc, panel).is_empty());
    }

    #[test]
    fn test_scan_sees_content_changes() {
        let mut doc = Document::new();
        let body = doc.body();
        let panel = doc.build("div").append_to(body).unwrap();
        let a = doc.build("button").append_to(panel).unwrap();
        assert_eq!(scan(&doc, panel), vec![a]);

        let b = doc.build("button").append_to(panel).unwrap();
        doc.set_attribute(a, "disabled", "").unwrap();
        assert_eq!(scan(&doc, panel), vec![b]);
    }

    #[test]
    fn test_scan_skips_hidden_subtrees() {
        let mut doc = Document::new();
        let body = doc.body();
        let dialog = doc.build("div").append_to(body).unwrap();
        let close = doc.build("button").append_to(dialog).unwrap();
        let advanced = doc.build("div").attr("hidden", "").append_to(dialog).unwrap();
        let nested = doc.build("section").append_to(advanced).unwrap();
        doc.build("button").append_to(advanced).unwrap();
        doc.build("input").append_to(nested).unwrap();
        doc.build("button").attr("hidden", "").append_to(dialog).unwrap();
        let save = doc.build("button").append_to(dialog).unwrap();

        assert_eq!(scan(&doc, dialog), vec![close, save]);

        doc.remove_attribute(advanced, "hidden").unwrap();
        assert_eq!(scan(&doc, dialog).len(), 4);
    }

    #[test]
    fn test_index_of() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.build("button").append_to(body).unwrap();
        let b = doc.build("button").append_to(body).unwrap();
        let elements = [a, b];
        assert_eq!(index_of(&elements, Some(b)), Some(1));
        assert_eq!(index_of(&elements, Some(body)), None);
        assert_eq!(index_of(&elements, None), None);
    }
}
