// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for the Canopy anchor tree.
//!
//! ## Feature
//!
//! Enable with `tree_adapter`.
//!
//! ## Notes
//!
//! [`TreeScope`] implements the engine's ancestry capability over a
//! [`canopy_tree::Tree`]: the parent walk is
//! [`Tree::component_parent_of`](canopy_tree::Tree::component_parent_of)
//! (skipping non-component and non-surface nodes, with the tree root as the
//! boundary) and child names resolve through the node-local name table, where
//! unknown names mean "no such child" rather than an error.

use canopy_tree::{NodeId, Tree};

use crate::types::{Ancestry, UnknownChild};

/// Ancestry over an anchor tree.
#[derive(Debug)]
pub struct TreeScope<'a, C> {
    tree: &'a Tree<C>,
}

impl<'a, C> TreeScope<'a, C> {
    /// Wrap a tree as the engine's ancestry.
    pub fn new(tree: &'a Tree<C>) -> Self {
        Self { tree }
    }
}

impl<C> Ancestry<NodeId> for TreeScope<'_, C> {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.tree.component_parent_of(*node)
    }

    fn child_named(&self, node: &NodeId, name: &str) -> Result<Option<NodeId>, UnknownChild> {
        Ok(self.tree.child_named(*node, name))
    }
}
