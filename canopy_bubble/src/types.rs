// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for bubbling: envelopes, tables, directives, and capabilities.
//!
//! ## Overview
//!
//! These types describe the bubbling protocol and the capabilities the engine
//! requires from the component/tree layer. They are referenced by the
//! [`bubble`](crate::bubble) controller and implemented or populated by
//! downstream toolkits.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use canopy_pattern::table::Table;

/// Terminal marker classifying a message name as round-trip.
pub const ROUND_TRIP_MARKER: char = '!';

/// Whether a message name requests a round trip.
///
/// Checked once when an envelope is created; later renames never reclassify.
pub fn is_round_trip(name: &str) -> bool {
    name.ends_with(ROUND_TRIP_MARKER)
}

/// The per-spawn message envelope.
///
/// Created fresh for every spawn call and owned exclusively by the bubble
/// controller until that call returns; it is never stored or shared across
/// calls. The name is kept verbatim, marker included; the round-trip
/// classification is recorded separately at creation and is immutable, so a
/// transform that renames an ordinary message to a `!`-suffixed name does
/// not turn it into a round trip.
#[derive(Clone, Debug)]
pub struct Envelope<K, V> {
    /// Message name, including any terminal marker.
    pub name: String,
    /// Application payload, opaque to the engine.
    pub payload: V,
    /// The component that most recently spawned or forwarded this envelope.
    /// Overwritten at every forwarding hop.
    pub source: K,
    round_trip: bool,
}

impl<K, V> Envelope<K, V> {
    /// Build and classify an envelope.
    pub fn new(name: String, payload: V, source: K) -> Self {
        let round_trip = is_round_trip(&name);
        Self {
            name,
            payload,
            source,
            round_trip,
        }
    }

    /// The classification fixed at creation.
    pub fn is_round_trip(&self) -> bool {
        self.round_trip
    }
}

/// A pre-built partial envelope: name plus payload.
///
/// The engine supplies the source and the classification when the draft is
/// spawned.
#[derive(Clone, Debug, Default)]
pub struct Draft<V> {
    /// Message name; must be non-empty to spawn.
    pub name: String,
    /// Application payload.
    pub payload: V,
}

impl<V> Draft<V> {
    /// A draft with an explicit payload.
    pub fn with_payload(name: impl Into<String>, payload: V) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

impl<V: Default> Draft<V> {
    /// A draft with the empty default payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_payload(name, V::default())
    }
}

/// What a handler receives, alongside the ancestor it is bound to.
#[derive(Clone, Debug)]
pub struct Delivery<K, V> {
    /// The message name as delivered.
    pub name: String,
    /// The component the message arrived from (the most recent hop).
    pub source: K,
    /// The payload, handed over to the handler.
    pub payload: V,
}

/// The stub handed to a transform directive.
///
/// Starts with the forwarded message's old name and an empty payload; the
/// callback's mutations become the forwarded envelope.
#[derive(Clone, Debug)]
pub struct Rewrite<V> {
    /// Name to forward under.
    pub name: String,
    /// Payload to forward; starts empty.
    pub payload: V,
}

/// A shared handler callback.
///
/// Invoked with the ancestor it is bound to and the delivery. The return
/// value is the round-trip result; it is ignored for ordinary messages.
/// `Rc`, not `Arc`: the engine is single-threaded by contract.
pub type HandlerFn<K, V> = Rc<dyn Fn(&K, Delivery<K, V>) -> Option<V>>;

/// A shared payload-transform callback for pass directives.
pub type TransformFn<V> = Rc<dyn Fn(&mut Rewrite<V>, V)>;

/// A handler-table value: a named method or a direct callback.
///
/// Named methods are resolved on the matched ancestor via
/// [`TableLookup::method`] at the point of matching, never earlier.
pub enum Callable<K, V> {
    /// Resolve by name on the ancestor when matched.
    Method(String),
    /// Invoke directly.
    Direct(HandlerFn<K, V>),
}

impl<K, V> Callable<K, V> {
    /// A named-method reference.
    pub fn method(name: impl Into<String>) -> Self {
        Self::Method(name.into())
    }

    /// A direct callback.
    pub fn direct(f: impl Fn(&K, Delivery<K, V>) -> Option<V> + 'static) -> Self {
        Self::Direct(Rc::new(f))
    }
}

impl<K, V> Clone for Callable<K, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Method(name) => Self::Method(name.clone()),
            Self::Direct(f) => Self::Direct(f.clone()),
        }
    }
}

impl<K, V> core::fmt::Debug for Callable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Method(name) => f.debug_tuple("Method").field(name).finish(),
            Self::Direct(_) => f.debug_tuple("Direct").finish_non_exhaustive(),
        }
    }
}

/// A handler table: compound keys mapped to callables.
pub type HandlerTable<K, V> = Table<Callable<K, V>>;

/// A pass-table value: how an unhandled ordinary message continues upward.
pub enum PassDirective<V> {
    /// Forward unchanged; only the envelope source is updated.
    Forward,
    /// Forward under a new name; payload untouched.
    Rename(String),
    /// Forward with a computed rewrite (see [`Rewrite`]).
    Transform(TransformFn<V>),
}

impl<V> PassDirective<V> {
    /// A rename directive.
    pub fn rename(name: impl Into<String>) -> Self {
        Self::Rename(name.into())
    }

    /// A transform directive.
    pub fn transform(f: impl Fn(&mut Rewrite<V>, V) + 'static) -> Self {
        Self::Transform(Rc::new(f))
    }
}

impl<V> Clone for PassDirective<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Forward => Self::Forward,
            Self::Rename(name) => Self::Rename(name.clone()),
            Self::Transform(f) => Self::Transform(f.clone()),
        }
    }
}

impl<V> core::fmt::Debug for PassDirective<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Forward => f.write_str("Forward"),
            Self::Rename(name) => f.debug_tuple("Rename").field(name).finish(),
            Self::Transform(_) => f.debug_tuple("Transform").finish_non_exhaustive(),
        }
    }
}

/// A component's pass table, in one of its recognized shapes.
///
/// The shapes are mutually exclusive: a component has exactly one at a time,
/// so the shorthand forms and the keyed form never compete.
pub enum PassTable<V> {
    /// Forward every unhandled ordinary message unchanged.
    All,
    /// Never forward; equivalent to having no pass table.
    Nothing,
    /// Forward messages matching one of these event patterns, unchanged.
    /// Entries carry no child qualifier.
    Names(Vec<String>),
    /// Compound keys mapped to directives, selected by specificity.
    Keyed(Table<PassDirective<V>>),
}

impl<V> Clone for PassTable<V> {
    fn clone(&self) -> Self {
        match self {
            Self::All => Self::All,
            Self::Nothing => Self::Nothing,
            Self::Names(names) => Self::Names(names.clone()),
            Self::Keyed(table) => Self::Keyed(table.clone()),
        }
    }
}

impl<V> core::fmt::Debug for PassTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Nothing => f.write_str("Nothing"),
            Self::Names(names) => f.debug_tuple("Names").field(names).finish(),
            Self::Keyed(table) => f.debug_tuple("Keyed").field(table).finish(),
        }
    }
}

/// A table that is either a static value or computed on demand.
///
/// The engine resolves a source once per bubble step, immediately before
/// matching, and never caches the result across steps: a computed table may
/// legitimately differ between bubbles and between steps.
pub enum TableSource<T> {
    /// A fixed table.
    Static(T),
    /// A zero-argument producer consulted at each step.
    Computed(Rc<dyn Fn() -> T>),
}

impl<T> TableSource<T> {
    /// A computed source.
    pub fn computed(f: impl Fn() -> T + 'static) -> Self {
        Self::Computed(Rc::new(f))
    }
}

impl<T: Clone> TableSource<T> {
    /// Resolve to a fresh snapshot.
    pub fn resolve(&self) -> T {
        match self {
            Self::Static(table) => table.clone(),
            Self::Computed(f) => f(),
        }
    }
}

impl<T: Clone> Clone for TableSource<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(table) => Self::Static(table.clone()),
            Self::Computed(f) => Self::Computed(f.clone()),
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for TableSource<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Static(table) => f.debug_tuple("Static").field(table).finish(),
            Self::Computed(_) => f.debug_tuple("Computed").finish_non_exhaustive(),
        }
    }
}

/// Raised by an overriding child resolver for a name it refuses to resolve.
///
/// The shipped resolvers treat unknown names as "no such child"
/// (`Ok(None)`); this error is for resolvers that recognize a name as
/// illegal, and it aborts the bubble.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownChild {
    /// The unrecognized child name.
    pub name: String,
}

impl core::fmt::Display for UnknownChild {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown child name {:?}", self.name)
    }
}

impl core::error::Error for UnknownChild {}

/// Ancestry capability: how the engine walks upward and resolves child names.
///
/// Implementations may dispatch per component, so any mix of tree-positional
/// and explicitly injected hierarchies can coexist behind one value.
pub trait Ancestry<K> {
    /// Returns the logical parent of `node`, or `None` at the top of the
    /// chain.
    fn parent_of(&self, node: &K) -> Option<K>;

    /// Resolve a child name declared by `node`'s handler or pass keys.
    fn child_named(&self, node: &K, name: &str) -> Result<Option<K>, UnknownChild>;
}

impl<K, A: Ancestry<K> + ?Sized> Ancestry<K> for &A {
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }

    fn child_named(&self, node: &K, name: &str) -> Result<Option<K>, UnknownChild> {
        (**self).child_named(node, name)
    }
}

/// Table capability: where a component's handler and pass tables live.
///
/// Sources are read-only snapshots from the engine's perspective; it resolves
/// them fresh at each bubble step and treats the results as immutable for the
/// duration of the step.
pub trait TableLookup<K, V> {
    /// The component's handler-table source, if it has one.
    fn handler_source(&self, node: &K) -> Option<&TableSource<HandlerTable<K, V>>>;

    /// The component's pass-table source, if it has one.
    fn pass_source(&self, node: &K) -> Option<&TableSource<PassTable<V>>>;

    /// Resolve a named handler on a component.
    ///
    /// Backs [`Callable::Method`]; returning `None` for a matched method name
    /// fails the bubble with a missing-handler-method error.
    fn method(&self, node: &K, name: &str) -> Option<HandlerFn<K, V>>;
}

impl<K, V, T: TableLookup<K, V> + ?Sized> TableLookup<K, V> for &T {
    fn handler_source(&self, node: &K) -> Option<&TableSource<HandlerTable<K, V>>> {
        (**self).handler_source(node)
    }

    fn pass_source(&self, node: &K) -> Option<&TableSource<PassTable<V>>> {
        (**self).pass_source(node)
    }

    fn method(&self, node: &K, name: &str) -> Option<HandlerFn<K, V>> {
        (**self).method(node, name)
    }
}

/// Observer capability: the local notification emitted on every spawn call.
///
/// Fired on the spawning component itself before any bubbling, independent
/// of the bubbling outcome. Purely an observability hook.
pub trait SpawnObserver<K, V> {
    /// A spawn was requested at `node` with the given name and payload.
    fn spawned(&self, node: &K, name: &str, payload: &V);
}

impl<K, V, O: SpawnObserver<K, V> + ?Sized> SpawnObserver<K, V> for &O {
    fn spawned(&self, node: &K, name: &str, payload: &V) {
        (**self).spawned(node, name, payload);
    }
}

/// A no-op observer used by default when no observation is needed.
///
/// Used by [`Bubbler::new`](crate::bubble::Bubbler::new).
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObserver;

impl<K, V> SpawnObserver<K, V> for NoObserver {
    #[inline]
    fn spawned(&self, _node: &K, _name: &str, _payload: &V) {}
}
