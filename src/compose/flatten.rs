use std::iter::FusedIterator;

use crate::scene::node::Node;

/// Leaf nodes of a forest in depth-first order.
///
/// Created by [`flatten`]. Cloning yields an independent traversal from the
/// same position; calling [`flatten`] again restarts from the beginning.
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                None => {
                    self.stack.pop();
                }
                Some(node) if node.is_leaf() => return Some(node),
                Some(node) => self.stack.push(node.children().iter()),
            }
        }
    }
}

impl FusedIterator for Leaves<'_> {}

/// Walks `nodes` and yields every node without children, each once.
///
/// Siblings keep their order and a subtree is fully visited before the next
/// sibling. Nodes with children are never yielded themselves. Uses an explicit
/// stack, so depth is bounded by heap rather than call stack.
#[must_use]
pub fn flatten(nodes: &[Node]) -> Leaves<'_> {
    Leaves {
        stack: vec![nodes.iter()],
    }
}
