//! In-memory element tree for formsmith
//!
//! This crate provides the small slice of a browser DOM that form
//! construction needs:
//!
//! - [`Element`]: clonable element handles with attributes, class list,
//!   inline style, text and tree navigation
//! - [`Event`]: input/change/submit/click events with bubbling and
//!   `prevent_default`
//! - [`Document`]: a page with a `body` and id lookup
//! - [`html_escape`] and [`Element::render_to_string`] for HTML output
//!
//! The tree is single-threaded: handles are `Rc`-based and neither `Send`
//! nor `Sync`.

pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod render;

pub use document::Document;
pub use element::{Element, ElementId};
pub use error::{DomError, DomResult};
pub use event::{Event, EventType, ListenerId};
pub use render::html_escape;
