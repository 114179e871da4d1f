// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion-ordered key→value tables.

use alloc::string::String;
use alloc::vec::Vec;

/// An insertion-ordered mapping from raw compound keys to values.
///
/// Keys are stored as raw text and parsed only when the table is consulted,
/// so a malformed key surfaces as an error at selection time, not at build
/// time. Insertion order is observable in exactly one place: it breaks the
/// residual ties left after the specificity ordering (later entries win).
#[derive(Clone, Debug)]
pub struct Table<T> {
    entries: Vec<(String, T)>,
}

impl<T> Table<T> {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    ///
    /// Duplicate keys are not rejected; both entries participate in
    /// selection and the later one wins their tie.
    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        self.entries.push((key.into(), value));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Into<String>, T> FromIterator<(S, T)> for Table<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
