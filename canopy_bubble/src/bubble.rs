// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubble controller implementation.
//!
//! ## Overview
//!
//! Owns `spawn`: builds the envelope, emits the local spawn notification,
//! walks the ancestor chain, consults each ancestor's tables through the
//! pattern matcher, applies pass directives, and returns the round-trip
//! result.
//!
//! ## Stepping
//!
//! Each ancestor is offered the envelope exactly once, and the offer resolves
//! to one of the enumerable outcomes: handled (terminal), forwarded to the
//! next ancestor, or dropped (terminal). Exhausting the chain is the fourth
//! terminal state; for round-trip messages it is the unhandled-round-trip
//! failure, for ordinary messages it is normal termination.
//!
//! ## Ordering per step
//!
//! 1. Handler table: on a match, resolve the callable and invoke it. A
//!    round-trip message returns the handler's result immediately, even when
//!    the handler produced no value; an ordinary message stops here.
//! 2. Round-trip messages that were not handled continue unconditionally;
//!    the pass table is never consulted for them.
//! 3. Ordinary messages consult the pass table: forward unchanged, rename,
//!    or transform — or drop when nothing applies.
//!
//! Table sources are resolved fresh immediately before each consultation and
//! never cached across steps.

use core::marker::PhantomData;

use canopy_pattern::pattern::Pattern;
use canopy_pattern::select::{SelectError, select_best_match};

use crate::error::Error;
use crate::types::{
    Ancestry, Callable, Delivery, Draft, Envelope, NoObserver, PassDirective, PassTable, Rewrite,
    SpawnObserver, TableLookup,
};

/// Outcome of offering the envelope to one ancestor.
enum Offer<K, V> {
    /// A handler consumed the message; carries the round-trip result.
    Handled(Option<V>),
    /// The envelope continues to the next ancestor.
    Forwarded(Envelope<K, V>),
    /// No pass entry applied; bubbling terminates here.
    Dropped,
}

/// The message-bubbling engine.
///
/// ## Usage
///
/// - Construct with [`Bubbler::new`], or [`Bubbler::with_observer`] to
///   receive the local spawn notification.
/// - Inject the ancestry and table capabilities; the shipped defaults are
///   the [`tree adapter`](crate::adapters) and the
///   [`Registry`](crate::registry::Registry).
/// - Call [`Bubbler::spawn`] (empty payload), [`Bubbler::spawn_with`], or
///   [`Bubbler::spawn_draft`] from the spawning component.
///
/// The engine keeps no per-call state in `self`: every spawn owns its
/// envelope and loop state on the stack, so a handler may construct another
/// engine over the same shared capabilities and spawn re-entrantly; the
/// nested bubble completes before the outer one resumes.
pub struct Bubbler<K, V, A, T, O = NoObserver> {
    pub(crate) ancestry: A,
    pub(crate) tables: T,
    pub(crate) observer: O,
    pub(crate) _phantom: PhantomData<fn() -> (K, V)>,
}

impl<K, V, A, T, O> core::fmt::Debug for Bubbler<K, V, A, T, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bubbler").finish_non_exhaustive()
    }
}

impl<K, V, A, T> Bubbler<K, V, A, T, NoObserver> {
    /// Create an engine with no spawn observer.
    pub fn new(ancestry: A, tables: T) -> Self {
        Self {
            ancestry,
            tables,
            observer: NoObserver,
            _phantom: PhantomData,
        }
    }
}

impl<K, V, A, T, O> Bubbler<K, V, A, T, O>
where
    K: Copy + Eq,
    V: Default,
    A: Ancestry<K>,
    T: TableLookup<K, V>,
    O: SpawnObserver<K, V>,
{
    /// Create an engine that emits the local spawn notification to `observer`.
    pub fn with_observer(ancestry: A, tables: T, observer: O) -> Self {
        Self {
            ancestry,
            tables,
            observer,
            _phantom: PhantomData,
        }
    }

    /// Spawn a message with the empty default payload.
    pub fn spawn(&self, from: K, name: &str) -> Result<Option<V>, Error> {
        self.spawn_draft(from, Draft::with_payload(name, V::default()))
    }

    /// Spawn a message with an explicit payload.
    pub fn spawn_with(&self, from: K, name: &str, payload: V) -> Result<Option<V>, Error> {
        self.spawn_draft(from, Draft::with_payload(name, payload))
    }

    /// Spawn a pre-built draft.
    ///
    /// For a round-trip message the result is the handler's return value
    /// (possibly `None`); an unhandled round trip fails with
    /// [`Error::UnhandledRoundTrip`]. For an ordinary message the result is
    /// always `Ok(None)`, whether it was handled, dropped, or ran off the
    /// top of the chain.
    pub fn spawn_draft(&self, from: K, draft: Draft<V>) -> Result<Option<V>, Error> {
        if draft.name.is_empty() {
            return Err(Error::InvalidMessage);
        }
        let envelope = Envelope::new(draft.name, draft.payload, from);
        self.observer.spawned(&from, &envelope.name, &envelope.payload);
        self.bubble(envelope)
    }

    /// Walk the ancestor chain to a terminal state.
    fn bubble(&self, envelope: Envelope<K, V>) -> Result<Option<V>, Error> {
        let mut envelope = envelope;
        let mut ancestor = self.ancestry.parent_of(&envelope.source);
        while let Some(at) = ancestor {
            match self.offer(at, envelope)? {
                Offer::Handled(value) => return Ok(value),
                Offer::Forwarded(next) => {
                    envelope = next;
                    ancestor = self.ancestry.parent_of(&at);
                }
                Offer::Dropped => return Ok(None),
            }
        }
        if envelope.is_round_trip() {
            Err(Error::UnhandledRoundTrip {
                name: envelope.name,
            })
        } else {
            Ok(None)
        }
    }

    /// Offer the envelope to a single ancestor.
    fn offer(&self, at: K, envelope: Envelope<K, V>) -> Result<Offer<K, V>, Error> {
        if let Some(source) = self.tables.handler_source(&at) {
            let table = source.resolve();
            let selected = select_best_match(&table, &envelope.name, &envelope.source, |name| {
                self.ancestry.child_named(&at, name)
            });
            match selected {
                Ok(Some(callable)) => {
                    let handler = match callable {
                        Callable::Direct(f) => f.clone(),
                        Callable::Method(method) => {
                            self.tables.method(&at, method).ok_or_else(|| {
                                Error::MissingHandlerMethod {
                                    method: method.clone(),
                                }
                            })?
                        }
                    };
                    let round_trip = envelope.is_round_trip();
                    let value = handler(
                        &at,
                        Delivery {
                            name: envelope.name,
                            source: envelope.source,
                            payload: envelope.payload,
                        },
                    );
                    // Ordinary messages discard the handler's result; a round
                    // trip returns it even when it is `None`.
                    return Ok(Offer::Handled(if round_trip { value } else { None }));
                }
                Ok(None) => {}
                Err(SelectError::Key { key, .. }) => return Err(Error::InvalidPattern { key }),
                Err(SelectError::Child(err)) => return Err(err.into()),
            }
        }

        // Round-trip continuation is unconditional and implicit; the pass
        // table never participates.
        if envelope.is_round_trip() {
            return Ok(Self::forwarded(envelope, at));
        }

        let Some(source) = self.tables.pass_source(&at) else {
            return Ok(Offer::Dropped);
        };
        match source.resolve() {
            PassTable::All => Ok(Self::forwarded(envelope, at)),
            PassTable::Nothing => Ok(Offer::Dropped),
            PassTable::Names(names) => {
                for raw in &names {
                    let pattern =
                        Pattern::parse(raw).map_err(|_| Error::InvalidPassDirective {
                            key: raw.clone(),
                        })?;
                    if pattern.matches(&envelope.name) {
                        return Ok(Self::forwarded(envelope, at));
                    }
                }
                Ok(Offer::Dropped)
            }
            PassTable::Keyed(table) => {
                let selected = select_best_match(&table, &envelope.name, &envelope.source, |name| {
                    self.ancestry.child_named(&at, name)
                });
                match selected {
                    Ok(Some(directive)) => {
                        let mut envelope = envelope;
                        match directive {
                            PassDirective::Forward => {}
                            PassDirective::Rename(name) => envelope.name = name.clone(),
                            PassDirective::Transform(f) => {
                                let old_payload =
                                    core::mem::replace(&mut envelope.payload, V::default());
                                let mut stub = Rewrite {
                                    name: envelope.name.clone(),
                                    payload: V::default(),
                                };
                                f(&mut stub, old_payload);
                                envelope.name = stub.name;
                                envelope.payload = stub.payload;
                            }
                        }
                        Ok(Self::forwarded(envelope, at))
                    }
                    Ok(None) => Ok(Offer::Dropped),
                    Err(SelectError::Key { key, .. }) => {
                        Err(Error::InvalidPassDirective { key })
                    }
                    Err(SelectError::Child(err)) => Err(err.into()),
                }
            }
        }
    }

    /// Hand the envelope to the next hop; only the source changes here.
    fn forwarded(mut envelope: Envelope<K, V>, at: K) -> Offer<K, V> {
        envelope.source = at;
        Offer::Forwarded(envelope)
    }
}
