//! DOM Abstraction
//!
//! The recorder never touches the browser DOM directly. Everything it needs
//! from an element or an event goes through the types in this module, which
//! `web_sys` implements under `wasm32` and the test suite implements with an
//! in-memory tree.

use interactor_common::protocol::Point;

/// Read-only view of a DOM element.
///
/// Navigation methods return element nodes only, matching
/// `parentElement` / `previousElementSibling` / `nextElementSibling`.
pub trait DomElement: Clone {
    /// Tag name as the DOM reports it (upper case for HTML documents).
    fn tag_name(&self) -> String;

    fn id(&self) -> String;

    /// Raw `class` attribute.
    fn class_name(&self) -> String;

    fn inner_text(&self) -> String;

    fn parent_element(&self) -> Option<Self>;

    fn previous_element_sibling(&self) -> Option<Self>;

    fn next_element_sibling(&self) -> Option<Self>;

    /// Class list membership.
    fn has_class(&self, class: &str) -> bool {
        self.class_name().split_whitespace().any(|c| c == class)
    }
}

/// A dispatched interaction event, reduced to what a record needs.
#[derive(Debug, Clone)]
pub struct DomEvent<E> {
    pub event_type: String,
    pub target: Option<E>,
    pub client: Option<Point>,
    pub screen: Option<Point>,
}

impl<E> DomEvent<E> {
    pub fn new(event_type: impl Into<String>, target: Option<E>) -> Self {
        Self {
            event_type: event_type.into(),
            target,
            client: None,
            screen: None,
        }
    }

    /// Attach pointer coordinates.
    pub fn with_position(mut self, client: Point, screen: Point) -> Self {
        self.client = Some(client);
        self.screen = Some(screen);
        self
    }
}
