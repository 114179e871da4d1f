// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use canopy_bubble::bubble::Bubbler;
use canopy_bubble::registry::{ComponentTables, Registry};
use canopy_bubble::types::{Ancestry, Callable, HandlerTable, PassTable, UnknownChild};

/// A linear chain: every node's parent is `n - 1`, node 1 is the top.
struct Chain;

impl Ancestry<u32> for Chain {
    fn parent_of(&self, node: &u32) -> Option<u32> {
        (*node > 1).then(|| node - 1)
    }

    fn child_named(&self, _node: &u32, _name: &str) -> Result<Option<u32>, UnknownChild> {
        Ok(None)
    }
}

/// Forwarding chain of `depth` hops with a handler at the top.
fn forwarding_registry(depth: u32) -> Registry<u32, Vec<u8>> {
    let mut registry = Registry::new();
    for node in 2..=depth {
        registry.define(node, ComponentTables::new().with_pass(PassTable::All));
    }
    let mut top = HandlerTable::new();
    top.insert("*", Callable::direct(|_, d| Some(d.payload)));
    registry.define(1, ComponentTables::new().with_handlers(top));
    registry
}

fn bench_ordinary_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordinary_chain");
    for depth in [4_u32, 16, 64] {
        let bubbler = Bubbler::new(Chain, forwarding_registry(depth));
        group.throughput(Throughput::Elements(u64::from(depth)));
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter(|| {
                let out = bubbler.spawn_with(black_box(depth + 1), "saved", vec![1, 2, 3]);
                black_box(out.unwrap())
            });
        });
    }
    group.finish();
}

fn bench_round_trip_chain(c: &mut Criterion) {
    // Round trips skip the pass machinery entirely; this isolates the climb
    // plus a single handler hit at the top.
    let mut registry: Registry<u32, Vec<u8>> = Registry::new();
    let mut top = HandlerTable::new();
    top.insert("probe!", Callable::direct(|_, d| Some(d.payload)));
    registry.define(1, ComponentTables::new().with_handlers(top));
    let bubbler = Bubbler::new(Chain, registry);

    c.bench_function("round_trip_depth_64", |b| {
        b.iter(|| {
            let out = bubbler.spawn_with(black_box(65_u32), "probe!", vec![9]);
            black_box(out.unwrap())
        });
    });
}

criterion_group!(benches, bench_ordinary_chain, bench_round_trip_chain);
criterion_main!(benches);
