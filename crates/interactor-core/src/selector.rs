//! Selector Builder
//!
//! Derives a readable, deterministic path for an element, e.g.
//! `HTML>BODY>DIV#main:nth-child(2)>BUTTON.interaction.primary`.

use crate::dom::DomElement;

/// Tag of the document root element. Selectors stop here.
pub const ROOT_TAG: &str = "HTML";

const SEPARATOR: &str = ">";

fn is_root<E: DomElement>(element: &E) -> bool {
    element.tag_name().eq_ignore_ascii_case(ROOT_TAG)
}

/// Build the selector for `element`, walking up to the root element.
///
/// A root element yields just its tag name. If the chain ends without reaching
/// the root (a detached subtree), the topmost element's segment starts the
/// selector.
pub fn selector_for<E: DomElement>(element: &E) -> String {
    let mut segments = Vec::new();
    let mut current = Some(element.clone());

    while let Some(node) = current {
        if is_root(&node) {
            segments.push(node.tag_name());
            break;
        }
        segments.push(segment_for(&node));
        current = node.parent_element();
    }

    segments.reverse();
    segments.join(SEPARATOR)
}

/// The selector segment for a single non-root element.
pub fn segment_for<E: DomElement>(element: &E) -> String {
    let mut segment = element.tag_name();

    let id = element.id();
    if !id.is_empty() {
        segment.push('#');
        segment.push_str(&id);
    }

    // Duplicates are kept in source order.
    for class in element.class_name().split_whitespace() {
        segment.push('.');
        segment.push_str(class);
    }

    if element.previous_element_sibling().is_some() || element.next_element_sibling().is_some() {
        segment.push_str(&format!(":nth-child({})", child_index(element)));
    }

    segment
}

/// 1-based position among element siblings.
fn child_index<E: DomElement>(element: &E) -> usize {
    let mut index = 1;
    let mut sibling = element.previous_element_sibling();
    while let Some(prev) = sibling {
        index += 1;
        sibling = prev.previous_element_sibling();
    }
    index
}
