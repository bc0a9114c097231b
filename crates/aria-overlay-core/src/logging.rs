//! Logging and debugging facilities.
//!
//! This module provides:
//! - Target names for filtering the `tracing` output of each subsystem
//! - Debug visualization for element trees
//!
//! # Tracing Integration
//!
//! Aria Overlay uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("aria_overlay=debug,aria_overlay_core=trace")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! Use [`DocumentTreeDebug`] to dump the element hierarchy, e.g. when a test
//! fails and the ARIA state needs inspecting:
//!
//! ```
//! use aria_overlay_core::{Document, DocumentTreeDebug};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! doc.build("button").id("open").append_to(body)?;
//!
//! let dump = DocumentTreeDebug::new().format_document(&doc);
//! assert!(dump.contains("button#open"));
//! # Ok::<(), aria_overlay_core::DomError>(())
//! ```

use std::fmt::{self, Write as FmtWrite};

use crate::document::Document;
use crate::dom::DomAccess;
use crate::element::ElementId;

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Element tree mutations and focus movement.
    pub const DOCUMENT: &str = "aria_overlay_core::document";
    /// Listener attach/detach.
    pub const LISTENER: &str = "aria_overlay_core::listener";
    /// Overlay open/close transitions.
    pub const WIDGET: &str = "aria_overlay::widget";
    /// Focus trap cycling.
    pub const TRAP: &str = "aria_overlay::trap";
    /// Key routing decisions.
    pub const ROUTER: &str = "aria_overlay::router";
    /// Multi-overlay dispatch.
    pub const HOST: &str = "aria_overlay::host";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show element ids (arena keys).
    pub show_keys: bool,
    /// Whether to show attributes other than `id`.
    pub show_attributes: bool,
    /// Whether to mark the focused element.
    pub show_focus: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_keys: false,
            show_attributes: true,
            show_focus: true,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Tags and ids only.
    pub fn minimal() -> Self {
        Self {
            show_attributes: false,
            show_focus: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing element trees.
#[derive(Debug, Clone, Default)]
pub struct DocumentTreeDebug {
    options: TreeFormatOptions,
}

impl DocumentTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the whole document starting at `<body>`.
    pub fn format_document(&self, doc: &Document) -> String {
        self.format_subtree(doc, doc.body())
    }

    /// Format a subtree starting from a specific element.
    pub fn format_subtree(&self, doc: &Document, root: ElementId) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_subtree(doc, root, 0, &mut Vec::new(), &mut output);
        output
    }

    fn write_subtree(
        &self,
        doc: &Document,
        id: ElementId,
        depth: usize,
        last_flags: &mut Vec<bool>,
        output: &mut String,
    ) -> fmt::Result {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        let Some(tag) = doc.tag_name(id) else {
            return Ok(());
        };

        output.push_str(&self.build_prefix(last_flags));
        output.push_str(tag);
        if let Some(html_id) = doc.attribute(id, "id") {
            write!(output, "#{html_id}")?;
        }
        if self.options.show_keys {
            write!(output, " [{id:?}]")?;
        }
        if self.options.show_attributes {
            for (name, value) in doc.attributes(id).filter(|(name, _)| *name != "id") {
                if value.is_empty() {
                    write!(output, " {name}")?;
                } else {
                    write!(output, " {name}=\"{value}\"")?;
                }
            }
        }
        if let Some(text) = doc.text(id) {
            write!(output, " \"{text}\"")?;
        }
        if self.options.show_focus && doc.active_element() == Some(id) {
            output.push_str(" <focused>");
        }
        output.push('\n');

        let children = doc.children(id);
        let count = children.len();
        for (i, &child) in children.iter().enumerate() {
            last_flags.push(i + 1 == count);
            self.write_subtree(doc, child, depth + 1, last_flags, output)?;
            last_flags.pop();
        }
        Ok(())
    }

    /// Build the prefix string for a tree node from its ancestors' "is last
    /// child" flags.
    fn build_prefix(&self, last_flags: &[bool]) -> String {
        let Some((&is_last, ancestors)) = last_flags.split_last() else {
            return String::new();
        };

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|   ", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}   ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
        };

        let mut prefix = String::new();
        for &ancestor_last in ancestors {
            prefix.push_str(if ancestor_last { "    " } else { branch });
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        let menu = doc
            .build("ul")
            .id("menu")
            .attr("role", "menu")
            .attr("hidden", "")
            .append_to(body)
            .unwrap();
        doc.build("button").text("Copy").append_to(menu).unwrap();
        doc.build("button").text("Paste").append_to(menu).unwrap();
        let open = doc.build("button").id("open").append_to(body).unwrap();
        doc.focus(open);
        doc
    }

    #[test]
    fn test_format_document() {
        let doc = sample();
        let output = DocumentTreeDebug::new().format_document(&doc);

        assert!(output.starts_with("body\n"));
        assert!(output.contains("ul#menu hidden role=\"menu\""));
        assert!(output.contains("\"Paste\""));
        assert!(output.contains("button#open <focused>"));
    }

    #[test]
    fn test_format_ascii_prefixes() {
        let doc = sample();
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::minimal()
        };
        let output = DocumentTreeDebug::with_options(options).format_document(&doc);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "body");
        assert_eq!(lines[1], "+-- ul#menu");
        assert_eq!(lines[2], "|   +-- button \"Copy\"");
        assert_eq!(lines[3], "|   `-- button \"Paste\"");
        assert_eq!(lines[4], "`-- button#open");
    }

    #[test]
    fn test_max_depth() {
        let doc = sample();
        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..TreeFormatOptions::minimal()
        };
        let output = DocumentTreeDebug::with_options(options).format_document(&doc);
        assert!(!output.contains("Copy"));
        assert!(output.contains("ul#menu"));
    }
}
