// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_tree --heading-base-level=0

//! Canopy Tree: a generational anchor tree for UI components.
//!
//! ## Overview
//!
//! This crate holds the structural hierarchy that components anchor into: a
//! DOM-like tree of nodes, some of which carry an attached component and
//! expose a render-capable surface. It provides the default ancestry policy
//! for the Canopy message-bubbling engine: walking upward from a component's
//! anchor to the nearest qualifying ancestor, and resolving component-local
//! child names.
//!
//! It is not a layout engine, a render tree, or an event source. It stores
//! structure, flags, component attachments, and names; everything else lives
//! upstream.
//!
//! ## Handles
//!
//! Nodes are addressed by [`NodeId`], a generational slot handle in the same
//! mold as a slot-map key: stable across unrelated updates, stale once the
//! node is removed, and never aliasing a different live node after slot
//! reuse. Accessors take liveness into account and return `None` for stale
//! handles.
//!
//! ## Component parents
//!
//! [`Tree::component_parent_of`] walks the structural ancestry strictly
//! upward from a node, skipping ancestors that either carry no component or
//! do not expose a surface ([`NodeFlags::SURFACE`]), and stops when the
//! ancestry is exhausted — the tree root is the fixed boundary. This is the
//! default parent policy for bubbling; hierarchies that are not tree-shaped
//! can bypass this crate entirely by implementing the engine's ancestry
//! capability directly.
//!
//! # Example
//!
//! ```
//! use canopy_tree::{NodeFlags, Tree};
//!
//! let mut tree: Tree<&str> = Tree::new();
//! let root = tree.insert(None, NodeFlags::SURFACE);
//! tree.attach_component(root, "app");
//!
//! // A plain wrapper node: no component, not a bubbling hop.
//! let wrapper = tree.insert(Some(root), NodeFlags::empty());
//! let field = tree.insert(Some(wrapper), NodeFlags::SURFACE);
//! tree.attach_component(field, "field");
//!
//! // The wrapper is skipped: the field's component parent is the root.
//! assert_eq!(tree.component_parent_of(field), Some(root));
//!
//! tree.set_child_name(root, "primary", field);
//! assert_eq!(tree.child_named(root, "primary"), Some(field));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::Tree;
pub use types::{NodeFlags, NodeId};
