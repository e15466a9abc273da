// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Borrowed navigation over a node tree.
//!
//! Nodes own their children and hold no back-pointer, so the parent of a
//! node is only known while walking down from an ancestor. [`NodeRef`]
//! carries that context.

use std::ops::Deref;

use super::node::Node;

/// A borrowed node together with the node it was reached from.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    node: &'a Node,
    parent: Option<&'a Node>,
    depth: usize,
}

impl<'a> NodeRef<'a> {
    /// View `node` as the root of a walk.
    pub fn root(node: &'a Node) -> Self {
        Self {
            node,
            parent: None,
            depth: 0,
        }
    }

    /// The underlying node.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// The node this one was reached from, `None` at the root of the walk.
    pub fn parent(&self) -> Option<&'a Node> {
        self.parent
    }

    /// Check if this view was reached through a parent.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Distance from the root of the walk.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Views of the direct children, in order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let parent = self.node;
        let depth = self.depth + 1;
        parent.children().iter().map(move |node| NodeRef {
            node,
            parent: Some(parent),
            depth,
        })
    }

    /// View of the child at `index`.
    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        self.node.children().get(index).map(|node| NodeRef {
            node,
            parent: Some(self.node),
            depth: self.depth + 1,
        })
    }

    /// Pre-order walk starting with this node.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants { stack: vec![*self] }
    }
}

impl Deref for NodeRef<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node
    }
}

/// Pre-order iterator returned by [`NodeRef::descendants`].
pub struct Descendants<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        let before = self.stack.len();
        self.stack.extend(current.children());
        self.stack[before..].reverse();
        Some(current)
    }
}
