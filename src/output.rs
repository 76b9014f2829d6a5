//! Rendering of finished syntax trees.
//!
//! # Features
//!
//! - **Pre-order listing** via [`write_preorder()`] / [`to_preorder()`] - one
//!   line per node, prefixed with one `.` per level of nesting
//! - **JSON** via [`to_json()`] / [`to_json_pretty()`] - nested
//!   `{"label", "children"}` objects for external tooling
//!
//! # Examples
//!
//! ```
//! use rpal_ast::{output::to_preorder, parse_str};
//!
//! let ast = parse_str("f x").unwrap();
//! assert_eq!(to_preorder(&ast), "gamma\n.<ID:f>\n.<ID:x>\n");
//! ```

use crate::ast::Node;
use serde_json::json;
use std::io::{self, Write};

/// Writes `node` and its children in pre-order. The node's own sibling chain
/// is not followed, so any node can be printed as a root.
pub fn write_preorder<W: Write>(node: &Node, out: &mut W) -> io::Result<()> {
    out.write_all(to_preorder(node).as_bytes())
}

pub fn to_preorder(node: &Node) -> String {
    let mut listing = String::new();
    let mut pending = vec![(node, 0usize)];
    while let Some((node, level)) = pending.pop() {
        listing.extend(std::iter::repeat_n('.', level));
        listing.push_str(node.label());
        listing.push('\n');

        // Reversed so the leftmost child is printed first.
        let children: Vec<&Node> = node.children().collect();
        pending.extend(children.into_iter().rev().map(|child| (child, level + 1)));
    }
    listing
}

pub fn to_json(node: &Node) -> serde_json::Value {
    json!({
        "label": node.label(),
        "children": node.children().map(to_json).collect::<Vec<_>>(),
    })
}

pub fn to_json_pretty(node: &Node) -> String {
    format!("{:#}", to_json(node))
}
