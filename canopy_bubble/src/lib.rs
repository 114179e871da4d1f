// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_bubble --heading-base-level=0

//! Canopy Bubble: deterministic upward message bubbling for UI component trees.
//!
//! ## Overview
//!
//! Components in a tree communicate without holding references to one
//! another: a component spawns a named message, and the engine walks the
//! ancestor chain upward, offering each ancestor the chance to handle the
//! message, rewrite it, or let it continue. The walk ends when a handler
//! consumes the message, when no pass rule lets it continue, or when the
//! chain runs out. This replaces both direct cross-component calls and
//! global event buses with a tree-scoped protocol: a message is only ever
//! visible to the spawning component's ancestors at spawn time.
//!
//! ## Message kinds
//!
//! An ordinary message is fire-and-forget: the first matching handler ends
//! the bubble, and between handlers each ancestor's *pass table* decides
//! whether (and in what form) the message continues — forward unchanged,
//! rename, or transform the payload. No pass entry means the message stops.
//!
//! A *round-trip* message, spelled with a trailing `!` (for example
//! `giveInfo!`), wants an answer: it climbs unconditionally — pass tables are
//! never consulted — until some ancestor's handler returns, and that result
//! becomes the spawn call's return value, even when the handler returned
//! nothing. A round trip that exhausts the chain is an error. The
//! classification is fixed when the envelope is created; renaming never
//! changes it.
//!
//! ## Matching
//!
//! Handler and pass tables are keyed by `eventPattern` or
//! `eventPattern childName`, matched by [`canopy_pattern`] with
//! specificity ordering: child-qualified entries first, then the most
//! literal pattern, with residual ties going to the later entry. At most one
//! handler entry and one pass entry apply per ancestor per message.
//!
//! ## Capabilities
//!
//! The engine is tree-representation-agnostic. It asks for everything it
//! needs through three injected capabilities, all defined in [`types`]:
//!
//! - [`Ancestry`](types::Ancestry) — `parent_of` and `child_named`; the
//!   `tree_adapter` feature supplies the default tree-positional policy over
//!   [`canopy_tree`].
//! - [`TableLookup`](types::TableLookup) — where handler and pass tables
//!   live; [`registry::Registry`] is the shipped implementation. Table
//!   sources are resolved fresh at every bubble step, so computed tables are
//!   re-read mid-bubble, never cached.
//! - [`SpawnObserver`](types::SpawnObserver) — a local notification emitted
//!   on the spawning component for every spawn call, independent of outcome.
//!
//! ## Errors
//!
//! Bubbling is synchronous and all-or-nothing: a spawn call either reaches a
//! terminal state or aborts with an [`error::Error`]. Misconfigurations
//! (missing handler methods, malformed table keys, unresolvable child names)
//! are surfaced to the caller, not suppressed.
//!
//! # Example
//!
//! ```
//! use canopy_bubble::bubble::Bubbler;
//! use canopy_bubble::registry::{ComponentTables, Registry};
//! use canopy_bubble::types::{Ancestry, Callable, HandlerTable, UnknownChild};
//!
//! // A fixed chain: 3 → 2 → 1.
//! struct Chain;
//!
//! impl Ancestry<u32> for Chain {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node > 1).then(|| node - 1)
//!     }
//!     fn child_named(&self, _: &u32, _: &str) -> Result<Option<u32>, UnknownChild> {
//!         Ok(None)
//!     }
//! }
//!
//! let mut handlers: HandlerTable<u32, Vec<String>> = HandlerTable::new();
//! handlers.insert("giveInfo!", Callable::direct(|_, d| Some(d.payload)));
//!
//! let mut registry = Registry::new();
//! registry.define(1, ComponentTables::new().with_handlers(handlers));
//!
//! let bubbler = Bubbler::new(Chain, registry);
//!
//! // The round trip climbs from 3 past 2 (no tables) to 1 and returns the
//! // handler's value.
//! let reply = bubbler
//!     .spawn_with(3, "giveInfo!", vec!["who?".to_string()])
//!     .unwrap();
//! assert_eq!(reply, Some(vec!["who?".to_string()]));
//!
//! // An ordinary message with no pass rules stops at the first ancestor.
//! assert_eq!(bubbler.spawn(3, "ping"), Ok(None));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod bubble;
pub mod error;
pub mod registry;
pub mod types;
