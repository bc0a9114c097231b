//! Core host model for Aria Overlay.
//!
//! This crate provides the element tree that overlay widgets operate on:
//!
//! - **Elements**: Arena-backed elements addressed by weak [`ElementId`] handles
//! - **Document**: Tree structure, attributes and a single focus cursor
//! - **DomAccess**: The interface widgets are written against, so any host
//!   tree (a browser DOM binding, a test fixture) can be plugged in
//! - **Listeners**: RAII guards that make listener lifetimes observable
//! - **Navigation**: The platform's default Tab/Shift+Tab focus movement
//! - **Logging**: `tracing` targets and tree dumps for debugging
//!
//! # Example
//!
//! ```
//! use aria_overlay_core::{Document, DomAccess, EventKind, ListenerTarget};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let dialog = doc.build("div").id("dialog").attr("hidden", "").append_to(body)?;
//! let close = doc.build("button").text("Close").append_to(dialog)?;
//!
//! // Hidden content cannot take focus.
//! assert!(!doc.focus(close));
//! doc.remove_attribute(dialog, "hidden")?;
//! assert!(doc.focus(close));
//!
//! let guard = doc
//!     .listeners()
//!     .register(ListenerTarget::Element(dialog), EventKind::KeyDown, "docs");
//! assert_eq!(doc.listeners().len(), 1);
//! drop(guard);
//! assert!(doc.listeners().is_empty());
//! # Ok::<(), aria_overlay_core::DomError>(())
//! ```

mod document;
mod dom;
mod element;
mod error;
pub mod listener;
pub mod logging;
pub mod navigation;

pub use document::{Document, ElementBuilder};
pub use dom::DomAccess;
pub use element::ElementId;
pub use error::{DomError, DomResult};
pub use listener::{EventKind, Listener, ListenerGuard, ListenerId, ListenerRegistry, ListenerTarget};
pub use logging::{DocumentTreeDebug, TreeFormatOptions, TreeStyle};
pub use navigation::{Direction, move_focus, tab_order};
