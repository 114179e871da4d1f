// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubbling basics.
//!
//! This minimal example wires an ad-hoc ancestry over three components,
//! installs handler and pass tables, and spawns a couple of ordinary
//! messages to show specificity and forwarding.
//!
//! Run:
//! - `cargo run -p canopy_demos --example bubble_basics`

use canopy_bubble::bubble::Bubbler;
use canopy_bubble::registry::{ComponentTables, Registry};
use canopy_bubble::types::{
    Ancestry, Callable, HandlerTable, PassDirective, PassTable, UnknownChild,
};
use canopy_pattern::table::Table;

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
struct Node(u32);

/// field(3) → panel(2) → app(1)
struct Parents;

impl Ancestry<Node> for Parents {
    fn parent_of(&self, node: &Node) -> Option<Node> {
        (node.0 > 1).then(|| Node(node.0 - 1))
    }

    fn child_named(&self, _node: &Node, _name: &str) -> Result<Option<Node>, UnknownChild> {
        Ok(None)
    }
}

fn main() {
    let mut registry: Registry<Node, Vec<String>> = Registry::new();

    // The panel renames field changes before letting them continue upward.
    let mut pass: Table<PassDirective<Vec<String>>> = Table::new();
    pass.insert("changed", PassDirective::rename("formChanged"));
    registry.define(
        Node(2),
        ComponentTables::new().with_pass(PassTable::Keyed(pass)),
    );

    // The app handles the renamed message; the broader wildcard entry loses
    // to the more literal key.
    let mut handlers: HandlerTable<Node, Vec<String>> = HandlerTable::new();
    handlers.insert(
        "*",
        Callable::direct(|to, d| {
            println!("catch-all at {to:?}: {}", d.name);
            None
        }),
    );
    handlers.insert(
        "formChanged",
        Callable::direct(|to, d| {
            println!("formChanged at {to:?} from {:?}: {:?}", d.source, d.payload);
            None
        }),
    );
    registry.define(Node(1), ComponentTables::new().with_handlers(handlers));

    let bubbler = Bubbler::new(Parents, registry);

    println!("== spawn \"changed\" at the field ==");
    bubbler
        .spawn_with(Node(3), "changed", vec!["title".to_string()])
        .unwrap();

    println!("== spawn \"resized\" at the field (no pass entry: dropped at the panel) ==");
    bubbler.spawn(Node(3), "resized").unwrap();
}
