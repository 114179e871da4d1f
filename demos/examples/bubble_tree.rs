// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full pipeline over the anchor tree.
//!
//! Builds a small DOM-like tree with plain wrapper nodes between components,
//! routes ancestry through the tree adapter, and watches spawns with an
//! observer. The wrapper nodes are invisible to bubbling: only nodes that
//! carry a component and expose a surface are hops.
//!
//! Run:
//! - `cargo run -p canopy_demos --example bubble_tree`

use canopy_bubble::adapters::tree::TreeScope;
use canopy_bubble::bubble::Bubbler;
use canopy_bubble::registry::{ComponentTables, Registry};
use canopy_bubble::types::{
    Callable, HandlerTable, PassDirective, PassTable, SpawnObserver,
};
use canopy_pattern::table::Table;
use canopy_tree::{NodeFlags, NodeId, Tree};

struct PrintObserver;

impl SpawnObserver<NodeId, Vec<String>> for PrintObserver {
    fn spawned(&self, node: &NodeId, name: &str, payload: &Vec<String>) {
        println!("  spawn at {node:?}: {name} {payload:?}");
    }
}

fn main() {
    // app ─ <wrapper> ─ form ─ <wrapper> ─ field
    let mut tree: Tree<&str> = Tree::new();
    let app = tree.insert(None, NodeFlags::SURFACE);
    tree.attach_component(app, "app");
    let w1 = tree.insert(Some(app), NodeFlags::empty());
    let form = tree.insert(Some(w1), NodeFlags::SURFACE);
    tree.attach_component(form, "form");
    let w2 = tree.insert(Some(form), NodeFlags::empty());
    let field = tree.insert(Some(w2), NodeFlags::SURFACE);
    tree.attach_component(field, "field");
    tree.set_child_name(form, "title", field);

    let mut registry: Registry<NodeId, Vec<String>> = Registry::new();

    // The form only forwards changes coming from its registered "title"
    // child, wrapping the payload on the way up.
    let mut pass: Table<PassDirective<Vec<String>>> = Table::new();
    pass.insert(
        "changed title",
        PassDirective::transform(|stub, old: Vec<String>| {
            stub.name = "formChanged".to_string();
            stub.payload.push(format!("title={}", old.join(",")));
        }),
    );
    registry.define(form, ComponentTables::new().with_pass(PassTable::Keyed(pass)));

    let mut handlers: HandlerTable<NodeId, Vec<String>> = HandlerTable::new();
    handlers.insert(
        "formChanged",
        Callable::direct(|_, d| {
            println!("  app saw {} with {:?} (from {:?})", d.name, d.payload, d.source);
            None
        }),
    );
    registry.define(app, ComponentTables::new().with_handlers(handlers));

    let scope = TreeScope::new(&tree);
    let bubbler = Bubbler::with_observer(scope, registry, PrintObserver);

    println!("== field edits its title ==");
    bubbler
        .spawn_with(field, "changed", vec!["New Title".to_string()])
        .unwrap();

    println!("== a stray message from the field is dropped at the form ==");
    bubbler.spawn(field, "hovered").unwrap();
}
