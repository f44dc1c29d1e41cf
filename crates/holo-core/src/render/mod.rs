//! Render step: project a settled [`Character`] onto the name and details nodes.

mod page;

pub use page::{Node, NodeContent, Page, PageError, CHARACTER_DETAILS_NODE, CHARACTER_NODE};

use crate::pipeline::Character;

/// Writes `record` into the two nodes.
///
/// An empty name shows `placeholder`. An empty title list shows `placeholder`;
/// otherwise the details node is cleared and gets one item per title, in order.
pub fn update(record: &Character, name_node: &mut Node, details_node: &mut Node, placeholder: &str) {
    if record.name.is_empty() {
        name_node.set_text(placeholder);
    } else {
        name_node.set_text(&record.name);
    }

    if record.film_titles.is_empty() {
        details_node.set_text(placeholder);
    } else {
        details_node.clear();
        for title in &record.film_titles {
            details_node.append_item(title);
        }
    }
}
