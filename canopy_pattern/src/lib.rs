// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_pattern --heading-base-level=0

//! Canopy Pattern: compound-key wildcard matching with specificity-ordered selection.
//!
//! ## Overview
//!
//! This crate selects the single best-matching entry from a table of compound
//! keys for a concrete (message name, source component) pair.
//! It is the matching core of the Canopy message-bubbling engine, but it knows
//! nothing about envelopes or trees: tables are plain ordered key→value lists,
//! and child-qualifier resolution is injected as a callback.
//!
//! ## Keys
//!
//! A table key is `eventPattern` or `eventPattern childName`, whitespace
//! separated. The event pattern is matched against the full message name
//! (anchored at both ends). Literal characters compare exactly; each `*`
//! wildcard matches zero or more identifier characters (ASCII letters, digits,
//! underscore). Patterns may contain several wildcards: `"me*ag*"` matches
//! `message1`.
//!
//! Names carrying a non-identifier terminal marker (for example `giveInfo!`)
//! are matched by keys spelled with the marker; `"*!"` is the catch-all for
//! such names, since a wildcard never spans the marker itself.
//!
//! ## Selection
//!
//! Among matching entries, [`select_best_match`](crate::select::select_best_match) picks exactly one:
//!
//! 1. Entries with a child qualifier outrank all entries without one.
//! 2. Within the same tier, the pattern with more non-wildcard characters wins.
//! 3. Remaining ties are deterministic and stable: the later entry in table
//!    insertion order wins.
//!
//! Child-qualified entries apply only when the injected resolver maps the
//! qualifier to a component equal to the message's declared source; the
//! resolver is consulted only after the event pattern has matched.
//!
//! # Example
//!
//! ```
//! use canopy_pattern::select::select_best_match;
//! use canopy_pattern::table::Table;
//!
//! let mut table: Table<&str> = Table::new();
//! table.insert("*", "any");
//! table.insert("me*", "prefixed");
//! table.insert("me*ag*", "specific");
//!
//! // No child qualifiers in this table, so the resolver is never consulted.
//! let resolve = |_: &str| -> Result<Option<u32>, ()> { Ok(None) };
//! let best = select_best_match(&table, "message1", &0_u32, resolve).unwrap();
//! assert_eq!(best, Some(&"specific"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod key;
pub mod pattern;
pub mod select;
pub mod table;
