// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced out of a spawn call.
//!
//! All of these abort the bubble and propagate synchronously to the caller of
//! `spawn`; the engine performs no recovery, retries, or suppression, and
//! there is no partial-success state. They indicate a misconfigured component
//! tree, so callers are expected to let them propagate rather than catch
//! them.

use alloc::string::String;

use crate::types::UnknownChild;

/// A bubbling failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Spawn was called without a resolvable (non-empty) message name.
    /// No partial bubbling occurs.
    InvalidMessage,
    /// A handler-table entry named a method that does not resolve to a
    /// callable on the matched ancestor.
    MissingHandlerMethod {
        /// The unresolved method name.
        method: String,
    },
    /// A handler-table key failed compound-key parsing.
    InvalidPattern {
        /// The offending raw key.
        key: String,
    },
    /// A pass-table key or name-list entry failed parsing.
    InvalidPassDirective {
        /// The offending raw key or entry.
        key: String,
    },
    /// A round-trip message reached the top of the chain with no ancestor
    /// handling it. This is the fixed policy for unhandled round trips: a
    /// round-trip spawn either returns the handler's result (possibly no
    /// value) or fails with this error; it never returns silently.
    UnhandledRoundTrip {
        /// The message name as spawned.
        name: String,
    },
    /// A child resolver refused to resolve a name used by a child-qualified
    /// table key.
    UnknownChildName {
        /// The unrecognized child name.
        name: String,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidMessage => f.write_str("spawn requires a non-empty message name"),
            Self::MissingHandlerMethod { method } => {
                write!(f, "handler method {method:?} does not resolve on the matched ancestor")
            }
            Self::InvalidPattern { key } => {
                write!(f, "invalid handler-table key {key:?}")
            }
            Self::InvalidPassDirective { key } => {
                write!(f, "invalid pass-table entry {key:?}")
            }
            Self::UnhandledRoundTrip { name } => {
                write!(f, "round-trip message {name:?} was not handled by any ancestor")
            }
            Self::UnknownChildName { name } => {
                write!(f, "unknown child name {name:?}")
            }
        }
    }
}

impl core::error::Error for Error {}

impl From<UnknownChild> for Error {
    fn from(err: UnknownChild) -> Self {
        Self::UnknownChildName { name: err.name }
    }
}
