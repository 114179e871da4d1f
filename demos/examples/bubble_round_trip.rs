// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Round trips.
//!
//! A round-trip message (trailing `!`) climbs unconditionally until some
//! ancestor answers, and the answer comes back as the spawn result. This
//! example shows the short-circuit at the first handler, the bubble-through
//! past non-handling ancestors, and the error for an unanswered question.
//!
//! Run:
//! - `cargo run -p canopy_demos --example bubble_round_trip`

use canopy_bubble::bubble::Bubbler;
use canopy_bubble::registry::{ComponentTables, Registry};
use canopy_bubble::types::{Ancestry, Callable, HandlerTable, UnknownChild};

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
struct Node(u32);

/// cell(4) → row(3) → grid(2) → app(1)
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

    // The grid knows the current selection; rows stay silent.
    let mut grid: HandlerTable<Node, Vec<String>> = HandlerTable::new();
    grid.insert(
        "selection!",
        Callable::direct(|_, _| Some(vec!["row-7".to_string()])),
    );
    registry.define(Node(2), ComponentTables::new().with_handlers(grid));

    // The app would also answer, but never gets the chance: the grid's
    // handler short-circuits the climb.
    let mut app: HandlerTable<Node, Vec<String>> = HandlerTable::new();
    app.insert(
        "*!",
        Callable::direct(|_, d| {
            println!("app had to answer {}", d.name);
            Some(vec!["app-answer".to_string()])
        }),
    );
    registry.define(Node(1), ComponentTables::new().with_handlers(app));

    let bubbler = Bubbler::new(Parents, registry);

    let selection = bubbler.spawn(Node(4), "selection!").unwrap();
    println!("selection answered by the grid: {selection:?}");

    // Nothing matches "theme!" below the app, so it bubbles through to the
    // round-trip catch-all there.
    let theme = bubbler.spawn(Node(4), "theme!").unwrap();
    println!("theme answered by the app: {theme:?}");

    // Remove the app's tables and the same question fails loudly.
    let mut registry: Registry<Node, Vec<String>> = Registry::new();
    registry.define(Node(2), ComponentTables::new());
    let bubbler = Bubbler::new(Parents, registry);
    let err = bubbler.spawn(Node(4), "theme!").unwrap_err();
    println!("unanswered: {err}");
}
