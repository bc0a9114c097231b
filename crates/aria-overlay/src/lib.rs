//! Aria Overlay - accessible overlay widgets.
//!
//! One configurable widget covers the three classic overlay patterns:
//!
//! - **Menu**: a dropdown opened from a button, arrow keys move between
//!   items, Tab closes it and moves on
//! - **Dialog**: a modal whose Tab order is trapped until it is dismissed
//! - **Disclosure**: an accordion panel toggled by its header
//!
//! Each [`OverlayWidget`] keeps `aria-expanded` on its trigger and `hidden`
//! on its overlay in step with its open state, rescans the overlay for
//! interactive content whenever it opens, and returns focus to the opener
//! when it closes. Listener lifetimes are RAII guards, so tearing a widget
//! down (or closing a dialog) can never leak a handler.
//!
//! Widgets are written against [`DomAccess`]; the in-memory [`Document`]
//! from `aria-overlay-core` is re-exported here.
//!
//! # Example
//!
//! ```
//! use aria_overlay::{ClickEvent, Document, DomAccess, Key, KeyDownEvent, OverlayConfig, OverlayHost};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let opener = doc.build("button").id("open-settings").append_to(body)?;
//! let dialog = doc.build("div").id("settings").append_to(body)?;
//! let close = doc.build("button").text("Close").append_to(dialog)?;
//! let save = doc.build("button").text("Save").append_to(dialog)?;
//!
//! let mut host = OverlayHost::new(doc);
//! let settings = host.bind(opener, dialog, OverlayConfig::dialog())?;
//!
//! host.dispatch_click(&ClickEvent::new(opener));
//! assert_eq!(host.dom().active_element(), Some(close));
//!
//! // Tab cycles inside the dialog
//! host.dispatch_keydown(&mut KeyDownEvent::plain(close, Key::Tab));
//! assert_eq!(host.dom().active_element(), Some(save));
//! host.dispatch_keydown(&mut KeyDownEvent::plain(save, Key::Tab));
//! assert_eq!(host.dom().active_element(), Some(close));
//!
//! host.dispatch_keydown(&mut KeyDownEvent::plain(close, Key::Escape));
//! assert!(!host.get(settings).unwrap().is_open());
//! assert_eq!(host.dom().active_element(), Some(opener));
//! # Ok::<(), aria_overlay::OverlayError>(())
//! ```

pub mod aria;
mod config;
mod dismissal;
mod error;
mod events;
mod host;
pub mod router;
pub mod scanner;
mod trap;
mod widget;

pub use config::{ConfigError, OverlayConfig, OverlayEntry, OverlayKind, OverlaySetConfig, TabBehavior};
pub use dismissal::DismissalListener;
pub use error::{OverlayError, Result};
pub use events::{ClickEvent, DispatchResult, EventBase, Key, KeyDownEvent, KeyboardModifiers};
pub use host::{OverlayHost, OverlayId};
pub use router::{InitialFocus, OverlayAction, RouteContext, route};
pub use scanner::scan;
pub use trap::FocusTrap;
pub use widget::OverlayWidget;

pub use aria::AriaRole;

pub use aria_overlay_core::{
    Direction, Document, DomAccess, DomError, DomResult, ElementBuilder, ElementId, EventKind,
    ListenerGuard, ListenerRegistry, ListenerTarget,
};
