// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, attachments, walks.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{NodeFlags, NodeId};

#[derive(Clone, Debug)]
struct Node<C> {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    flags: NodeFlags,
    component: Option<C>,
    named_children: BTreeMap<String, NodeId>,
}

impl<C> Node<C> {
    fn new(generation: u32, flags: NodeFlags) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            flags,
            component: None,
            named_children: BTreeMap::new(),
        }
    }
}

/// Top-level anchor tree.
pub struct Tree<C> {
    nodes: Vec<Option<Node<C>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl<C> Default for Tree<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> core::fmt::Debug for Tree<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl<C> Tree<C> {
    /// Create a new empty tree.
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node as a child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, flags: NodeFlags) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, flags));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, flags)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node (and its subtree) from the tree.
    ///
    /// Name-table entries elsewhere that pointed into the removed subtree go
    /// stale; [`Tree::child_named`] filters them out by liveness.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent` (or detach it into a root if `None`).
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// generation stored in that slot. See [`NodeId`] for the semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Structural parent of a node, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = flags;
        }
    }

    /// Node flags, if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        Some(self.node_opt(id)?.flags)
    }

    /// Attach a component to a node, returning any previous attachment.
    pub fn attach_component(&mut self, id: NodeId, component: C) -> Option<C> {
        self.node_opt_mut(id)?.component.replace(component)
    }

    /// Detach and return a node's component.
    pub fn detach_component(&mut self, id: NodeId) -> Option<C> {
        self.node_opt_mut(id)?.component.take()
    }

    /// The component attached to a node, if any.
    pub fn component(&self, id: NodeId) -> Option<&C> {
        self.node_opt(id)?.component.as_ref()
    }

    /// Register `child` under `name` in the owner's local name table.
    pub fn set_child_name(&mut self, owner: NodeId, name: impl Into<String>, child: NodeId) {
        if let Some(n) = self.node_opt_mut(owner) {
            n.named_children.insert(name.into(), child);
        }
    }

    /// Drop a name from the owner's local name table.
    pub fn clear_child_name(&mut self, owner: NodeId, name: &str) -> Option<NodeId> {
        self.node_opt_mut(owner)?.named_children.remove(name)
    }

    /// Resolve a name in the owner's local name table.
    ///
    /// Unknown names and names whose target has since been removed resolve
    /// to `None`.
    pub fn child_named(&self, owner: NodeId, name: &str) -> Option<NodeId> {
        let child = *self.node_opt(owner)?.named_children.get(name)?;
        self.is_alive(child).then_some(child)
    }

    /// Nearest ancestor that qualifies as a bubbling hop.
    ///
    /// Walks the structural ancestry strictly upward from `id`, skipping
    /// ancestors that carry no component or lack [`NodeFlags::SURFACE`], and
    /// returns `None` once the ancestry is exhausted (the root is the fixed
    /// boundary).
    pub fn component_parent_of(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.parent_of(id);
        while let Some(node) = cur {
            if self.is_anchor(node) {
                return Some(node);
            }
            cur = self.parent_of(node);
        }
        None
    }

    /// Whether a node carries a component and exposes a surface.
    fn is_anchor(&self, id: NodeId) -> bool {
        self.node_opt(id)
            .map(|n| n.component.is_some() && n.flags.contains(NodeFlags::SURFACE))
            .unwrap_or(false)
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node<C> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node<C> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node<C>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<C>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let parent_node = self.node_mut(parent);
        parent_node.children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
