// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the anchor tree: node identifiers and flags.

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but
/// becomes invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that
///   slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a
///   new, distinct `NodeId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId`
/// still refers to a live node. Stale `NodeId`s never alias a different live
/// node because the generation must match. The generation increments on slot
/// reuse and never decreases; `u32` is ample for practical lifetimes and
/// behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling participation in the component-parent walk.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node exposes a render-capable surface. Only surface nodes with an
        /// attached component qualify as bubbling hops.
        const SURFACE = 0b0000_0001;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::SURFACE
    }
}
