//! Borrowing traversals over a [`ProfileTree`][crate::ProfileTree].

use std::collections::VecDeque;

use crate::tree::Node;

/// Breadth-first iterator. Parents come before their children and left
/// children before right children.
///
/// # Examples
///
/// ```
/// use forensic::{Profile, ProfileTree};
///
/// let mut tree = ProfileTree::new();
/// for name in ["M", "C", "X", "A", "E"] {
///     tree.insert(name, Profile::default());
/// }
///
/// let names: Vec<_> = tree.level_order().map(|node| node.name()).collect();
/// assert_eq!(names, ["M", "C", "X", "A", "E"]);
/// ```
pub struct LevelOrder<'a> {
    queue: VecDeque<&'a Node>,
}

impl<'a> LevelOrder<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for LevelOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());

        Some(node)
    }
}

/// Sorted iterator: visits nodes in ascending name order.
pub struct InOrder<'a> {
    // Nodes whose left subtree has been pushed but which haven't been yielded yet.
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);

        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());

        Some(node)
    }
}
