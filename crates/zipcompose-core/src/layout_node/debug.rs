use super::{LayoutNode, NodeHandle, NodeTree};
use std::fmt::Write;

/// Renders the tree one node per line, children indented under parents.
///
/// ```text
/// root #5e1c..  [Created] 100x40 @(0, 0)
///   Column #91ab..  [Updated] 100x40 @(0, 0) modifier=[Padding(left=4, ..)] slots={spacing: 8}
/// ```
pub fn dump_tree(tree: &NodeTree) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        dump_node(tree, root, 0, &mut out);
    } else {
        out.push_str("<empty>\n");
    }
    out
}

fn dump_node(tree: &NodeTree, handle: NodeHandle, depth: usize, out: &mut String) {
    let Some(node) = tree.get(handle) else {
        return;
    };
    for _ in 0..depth {
        out.push_str("  ");
    }
    describe(node, out);
    out.push('\n');
    for child in node.children() {
        dump_node(tree, *child, depth + 1, out);
    }
}

fn describe(node: &LayoutNode, out: &mut String) {
    let size = node.size();
    let position = node.position();
    let _ = write!(
        out,
        "{} #{} [{:?}] {}x{} @({}, {})",
        node.key().unwrap_or("<anonymous>"),
        node.id(),
        node.outcome(),
        size.width,
        size.height,
        position.x,
        position.y
    );
    if !node.modifier().is_empty() {
        let _ = write!(out, " modifier={}", node.modifier());
    }
    let mut slots = node.slots().peekable();
    if slots.peek().is_some() {
        out.push_str(" slots={");
        for (index, (name, value)) in slots.enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{name}: {value:?}");
        }
        out.push('}');
    }
}
