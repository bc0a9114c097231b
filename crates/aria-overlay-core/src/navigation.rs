//! Sequential (Tab) focus navigation.
//!
//! This is the host platform's default action for Tab and Shift+Tab, the
//! behaviour a focus trap either lets through or overrides. Tab order
//! follows the platform rules:
//!
//! 1. Elements with a positive `tabindex`, ascending, ties in document order
//! 2. Everything else that is focusable (`tabindex="0"` or natively
//!    focusable), in document order
//!
//! Hidden subtrees are skipped entirely. Navigation wraps at both ends.

use crate::dom::DomAccess;
use crate::element::ElementId;
use crate::logging::targets;

/// Direction of sequential navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Tab.
    Forward,
    /// Shift+Tab.
    Backward,
}

/// Build the document's tab order.
pub fn tab_order<D: DomAccess + ?Sized>(dom: &D) -> Vec<ElementId> {
    let mut positive: Vec<(i32, ElementId)> = Vec::new();
    let mut natural = Vec::new();

    let mut stack: Vec<ElementId> = dom.children(dom.root()).iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        // Skip hidden widgets and their children
        if dom.has_attribute(id, "hidden") {
            continue;
        }
        if dom.is_focusable(id) {
            match tab_index(dom, id) {
                Some(index) if index > 0 => positive.push((index, id)),
                _ => natural.push(id),
            }
        }
        stack.extend(dom.children(id).iter().rev().copied());
    }

    // Stable sort keeps document order among equal indices.
    positive.sort_by_key(|&(index, _)| index);
    positive
        .into_iter()
        .map(|(_, id)| id)
        .chain(natural)
        .collect()
}

/// Move focus one step through the tab order.
///
/// With nothing focused (or focus outside the order), forward lands on the
/// first element and backward on the last. Returns the newly focused
/// element, or `None` when nothing is focusable.
pub fn move_focus<D: DomAccess + ?Sized>(dom: &mut D, direction: Direction) -> Option<ElementId> {
    let order = tab_order(dom);
    if order.is_empty() {
        return None;
    }

    let last = order.len() - 1;
    let position = dom
        .active_element()
        .and_then(|active| order.iter().position(|&id| id == active));

    let index = match (direction, position) {
        (Direction::Forward, Some(pos)) => (pos + 1) % order.len(),
        (Direction::Forward, None) => 0,
        (Direction::Backward, Some(0) | None) => last,
        (Direction::Backward, Some(pos)) => pos - 1,
    };

    let target = order[index];
    if dom.focus(target) {
        tracing::trace!(target: targets::DOCUMENT, ?direction, ?target, "sequential focus");
        Some(target)
    } else {
        None
    }
}

fn tab_index<D: DomAccess + ?Sized>(dom: &D, id: ElementId) -> Option<i32> {
    dom.attribute(id, "tabindex")
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    }

    #[test]
    fn test_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.build("button").append_to(body).unwrap();
        let section = doc.build("section").append_to(body).unwrap();
        let b = doc.build("input").append_to(section).unwrap();
        let c = doc.build("a").attr("href", "#").append_to(body).unwrap();
        assert_eq!(tab_order(&doc), vec![a, b, c]);
    }

    #[test]
    fn test_positive_tab_index_first() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.build("button").append_to(body).unwrap();
        let b = doc.build("button").attr("tabindex", "2").append_to(body).unwrap();
        let c = doc.build("button").attr("tabindex", "1").append_to(body).unwrap();
        let d = doc.build("div").attr("tabindex", "0").append_to(body).unwrap();
        assert_eq!(tab_order(&doc), vec![c, b, a, d]);
    }

    #[test]
    fn test_hidden_subtree_skipped() {
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.build("button").append_to(body).unwrap();
        let menu = doc.build("ul").attr("hidden", "").append_to(body).unwrap();
        doc.build("button").append_to(menu).unwrap();
        let b = doc.build("button").append_to(body).unwrap();
        assert_eq!(tab_order(&doc), vec![a, b]);
    }

    #[test]
    fn test_move_focus_wraps() {
        init_tracing();
        let mut doc = Document::new();
        let body = doc.body();
        let a = doc.build("button").append_to(body).unwrap();
        let b = doc.build("button").append_to(body).unwrap();

        assert_eq!(move_focus(&mut doc, Direction::Forward), Some(a));
        assert_eq!(move_focus(&mut doc, Direction::Forward), Some(b));
        assert_eq!(move_focus(&mut doc, Direction::Forward), Some(a));
        assert_eq!(move_focus(&mut doc, Direction::Backward), Some(b));
    }

    #[test]
    fn test_backward_from_nothing_lands_on_last() {
        init_tracing();
        let mut doc = Document::new();
        let body = doc.body();
        doc.build("button").append_to(body).unwrap();
        let last = doc.build("button").append_to(body).unwrap();
        assert_eq!(move_focus(&mut doc, Direction::Backward), Some(last));
    }

    #[test]
    fn test_empty_document() {
        init_tracing();
        let mut doc = Document::new();
        assert_eq!(move_focus(&mut doc, Direction::Forward), None);
    }
}
