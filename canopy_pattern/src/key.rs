// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound table keys and their specificity ordering.

use alloc::string::String;

use crate::pattern::{ParseError, Pattern};

/// A parsed compound key: an event pattern plus an optional child qualifier.
///
/// The textual form is `eventPattern` or `eventPattern childName`. A
/// child-qualified key applies only when the qualifier resolves to the
/// component that is the message's declared source (see
/// [`select_best_match`](crate::select::select_best_match)).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Key {
    /// The anchored event pattern.
    pub pattern: Pattern,
    /// Optional child-component qualifier.
    pub child: Option<String>,
}

/// Specificity of a key, ordered per the selection rule.
///
/// The derived ordering compares the qualifier tier first (`true` outranks
/// `false`), then the non-wildcard character count, which is exactly the
/// selection rule: child-qualified entries beat unqualified ones regardless
/// of wildcard count, and more literal characters win within a tier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Specificity {
    /// Whether the key carries a child qualifier.
    pub qualified: bool,
    /// Non-wildcard character count of the event pattern.
    pub literal: usize,
}

impl Key {
    /// Parse a compound key.
    ///
    /// Tokens are whitespace separated; one token is a bare pattern, two are
    /// a pattern plus child qualifier, anything else is rejected.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let mut tokens = raw.split_whitespace();
        let pattern = Pattern::parse(tokens.next().ok_or(ParseError::EmptyKey)?)?;
        let child = tokens.next().map(String::from);
        if tokens.next().is_some() {
            return Err(ParseError::TrailingTokens);
        }
        Ok(Self { pattern, child })
    }

    /// The key's specificity.
    pub fn specificity(&self) -> Specificity {
        Specificity {
            qualified: self.child.is_some(),
            literal: self.pattern.literal_len(),
        }
    }
}
