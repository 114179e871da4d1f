// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ready-made table store keyed by component.
//!
//! The engine only sees the [`TableLookup`](crate::types::TableLookup)
//! capability; this module is the batteries-included implementation for
//! toolkits that keep their tables in one place. Ad-hoc implementations of
//! the trait remain first-class.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;

use crate::types::{
    Delivery, HandlerFn, HandlerTable, PassTable, TableLookup, TableSource,
};

/// The tables one component contributes to bubbling.
///
/// All parts are optional: a component with no handler table never consumes,
/// and one with no pass table never forwards ordinary messages.
pub struct ComponentTables<K, V> {
    /// Handler-table source, if any.
    pub handlers: Option<TableSource<HandlerTable<K, V>>>,
    /// Pass-table source, if any.
    pub pass: Option<TableSource<PassTable<V>>>,
    /// Named handlers backing [`Callable::Method`](crate::types::Callable).
    pub methods: BTreeMap<String, HandlerFn<K, V>>,
}

impl<K, V> Default for ComponentTables<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ComponentTables<K, V> {
    /// Tables with nothing registered.
    pub fn new() -> Self {
        Self {
            handlers: None,
            pass: None,
            methods: BTreeMap::new(),
        }
    }

    /// Set a static handler table.
    pub fn with_handlers(mut self, table: HandlerTable<K, V>) -> Self {
        self.handlers = Some(TableSource::Static(table));
        self
    }

    /// Set a handler-table source (static or computed).
    pub fn with_handler_source(mut self, source: TableSource<HandlerTable<K, V>>) -> Self {
        self.handlers = Some(source);
        self
    }

    /// Set a static pass table.
    pub fn with_pass(mut self, table: PassTable<V>) -> Self {
        self.pass = Some(TableSource::Static(table));
        self
    }

    /// Set a pass-table source (static or computed).
    pub fn with_pass_source(mut self, source: TableSource<PassTable<V>>) -> Self {
        self.pass = Some(source);
        self
    }

    /// Register a named handler.
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&K, Delivery<K, V>) -> Option<V> + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Rc::new(f));
        self
    }
}

impl<K, V> core::fmt::Debug for ComponentTables<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ComponentTables")
            .field("handlers", &self.handlers.is_some())
            .field("pass", &self.pass.is_some())
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// A component-keyed store of [`ComponentTables`].
pub struct Registry<K, V> {
    components: BTreeMap<K, ComponentTables<K, V>>,
}

impl<K: Ord, V> Registry<K, V> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            components: BTreeMap::new(),
        }
    }

    /// Install (or replace) a component's tables.
    pub fn define(&mut self, component: K, tables: ComponentTables<K, V>) {
        self.components.insert(component, tables);
    }

    /// Drop a component's tables, returning them if present.
    pub fn undefine(&mut self, component: &K) -> Option<ComponentTables<K, V>> {
        self.components.remove(component)
    }
}

impl<K: Ord, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> core::fmt::Debug for Registry<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("components", &self.components.len())
            .finish()
    }
}

impl<K: Ord, V> TableLookup<K, V> for Registry<K, V> {
    fn handler_source(&self, node: &K) -> Option<&TableSource<HandlerTable<K, V>>> {
        self.components.get(node)?.handlers.as_ref()
    }

    fn pass_source(&self, node: &K) -> Option<&TableSource<PassTable<V>>> {
        self.components.get(node)?.pass.as_ref()
    }

    fn method(&self, node: &K, name: &str) -> Option<HandlerFn<K, V>> {
        self.components.get(node)?.methods.get(name).cloned()
    }
}
