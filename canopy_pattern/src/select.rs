// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-best-entry selection over a table.

use alloc::string::String;

use crate::key::{Key, Specificity};
use crate::pattern::ParseError;
use crate::table::Table;

/// Errors produced while selecting from a table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectError<E> {
    /// A table key failed to parse.
    Key {
        /// The offending raw key.
        key: String,
        /// The underlying parse error.
        error: ParseError,
    },
    /// The injected child resolver failed.
    Child(E),
}

impl<E: core::fmt::Display> core::fmt::Display for SelectError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Key { key, error } => write!(f, "invalid table key {key:?}: {error}"),
            Self::Child(e) => write!(f, "child resolution failed: {e}"),
        }
    }
}

impl<E: core::fmt::Debug + core::fmt::Display> core::error::Error for SelectError<E> {}

/// Select the single best-matching entry for `(name, source)`.
///
/// Every key in the table is parsed; a malformed key is an error even when it
/// would not have matched, since the table as consulted is misconfigured.
/// For child-qualified keys whose event pattern matched, `resolve_child` is
/// asked to map the qualifier to a component; the entry applies only when the
/// result equals `source`. Resolver errors abort selection.
///
/// Among applicable entries the ordering is: child-qualified tier first, then
/// non-wildcard character count, then stable last-wins in insertion order.
/// Returns `Ok(None)` when nothing applies, which callers treat as "not
/// handled here".
pub fn select_best_match<'t, T, K, E, F>(
    table: &'t Table<T>,
    name: &str,
    source: &K,
    mut resolve_child: F,
) -> Result<Option<&'t T>, SelectError<E>>
where
    K: PartialEq,
    F: FnMut(&str) -> Result<Option<K>, E>,
{
    let mut best: Option<(Specificity, &'t T)> = None;
    for (raw, value) in table.iter() {
        let key = Key::parse(raw).map_err(|error| SelectError::Key {
            key: String::from(raw),
            error,
        })?;
        if !key.pattern.matches(name) {
            continue;
        }
        if let Some(child) = &key.child {
            match resolve_child(child).map_err(SelectError::Child)? {
                Some(resolved) if resolved == *source => {}
                _ => continue,
            }
        }
        let specificity = key.specificity();
        // Stable last-wins: a later entry displaces an equally specific one.
        match &best {
            Some((current, _)) if *current > specificity => {}
            _ => best = Some((specificity, value)),
        }
    }
    Ok(best.map(|(_, value)| value))
}
