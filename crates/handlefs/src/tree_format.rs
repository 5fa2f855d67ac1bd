//! Text rendering of a filesystem tree.
//!
//! Two styles are produced from the same [`TreeNode`] structure:
//!
//! - [`format_layout`]: one tab per depth level, no connectors
//! - [`format_tree`]: box-drawing connectors
//!
//! ```
//! use handlefs::tree_format::{TreeNode, format_layout, format_tree};
//!
//! let root = TreeNode::new("/")
//!     .with_child(TreeNode::new("[D]docs").with_child(TreeNode::new("[F]a (size = 1)")))
//!     .with_child(TreeNode::new("[F]b (size = 2)"));
//!
//! assert_eq!(format_layout(&root), "[D]docs\n\t[F]a (size = 1)\n[F]b (size = 2)\n");
//! assert_eq!(format_tree(&root), "/\n├─┬ [D]docs\n│ └── [F]a (size = 1)\n└── [F]b (size = 2)\n");
//! ```
//!
//! Both renderers walk with an explicit stack, so deep trees do not grow
//! the call stack.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }
}

/// Renders the descendants of `root`, pre-order, one line each, indented
/// by one tab per level below `root`. The root label itself is not printed.
pub fn format_layout(root: &TreeNode) -> String {
    let mut output = String::new();
    let mut pending: Vec<(usize, &TreeNode)> =
        root.children.iter().rev().map(|child| (0, child)).collect();

    while let Some((depth, node)) = pending.pop() {
        for _ in 0..depth {
            output.push('\t');
        }
        output.push_str(&node.label);
        output.push('\n');
        pending.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
    }
    output
}

/// Renders `root` and its descendants with box-drawing connectors.
pub fn format_tree(root: &TreeNode) -> String {
    let mut output = String::new();
    output.push_str(&root.label);
    output.push('\n');

    // (prefix, node, is last sibling)
    let mut pending: Vec<(String, &TreeNode, bool)> = Vec::new();
    push_children(&mut pending, String::new(), &root.children);

    while let Some((prefix, node, is_last)) = pending.pop() {
        let connector = match (node.children.is_empty(), is_last) {
            (true, true) => "└──",
            (true, false) => "├──",
            (false, true) => "└─┬",
            (false, false) => "├─┬",
        };
        let continuation = if is_last { ' ' } else { '│' };

        for (index, line) in node.label.lines().enumerate() {
            output.push_str(&prefix);
            if index == 0 {
                output.push_str(connector);
                output.push(' ');
            } else {
                output.push(continuation);
                output.push_str("   ");
            }
            output.push_str(line);
            output.push('\n');
        }

        push_children(&mut pending, format!("{prefix}{continuation} "), &node.children);
    }
    output
}

fn push_children<'a>(
    pending: &mut Vec<(String, &'a TreeNode, bool)>,
    prefix: String,
    children: &'a [TreeNode],
) {
    let count = children.len();
    for (index, child) in children.iter().enumerate().rev() {
        pending.push((prefix.clone(), child, index + 1 == count));
    }
}

impl Drop for TreeNode {
    // Unlink descendants one by one so dropping a deep tree stays iterative.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_tree(self))
    }
}
