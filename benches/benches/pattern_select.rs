// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use canopy_pattern::select::select_best_match;
use canopy_pattern::table::Table;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// Build a table mixing literal, prefixed-wildcard, and catch-all keys.
fn gen_table(n: usize, seed: u64) -> Table<usize> {
    let mut rng = Rng::new(seed);
    let mut table = Table::new();
    for i in 0..n {
        let key = match rng.next_u64() % 4 {
            0 => format!("message{i}"),
            1 => format!("mes*{i}"),
            2 => format!("m*e{i}*"),
            _ => "*".to_string(),
        };
        table.insert(key, i);
    }
    table
}

fn no_children(_: &str) -> Result<Option<u32>, ()> {
    Ok(None)
}

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_best_match");
    for n in [8_usize, 64, 256] {
        let table = gen_table(n, 0x5eed_0001);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("mixed_{n}"), |b| {
            b.iter(|| {
                let best =
                    select_best_match(&table, black_box("message42"), &0_u32, no_children);
                black_box(best.unwrap())
            });
        });
    }
    group.finish();
}

fn bench_wildcard_heavy(c: &mut Criterion) {
    // All entries force the wildcard matcher to scan the name.
    let mut table = Table::new();
    for i in 0..64_usize {
        table.insert(format!("*a*b*{i}"), i);
    }
    c.bench_function("select_wildcard_heavy_64", |b| {
        b.iter(|| {
            let best = select_best_match(
                &table,
                black_box("xaxbxaxbxaxbxaxb7"),
                &0_u32,
                no_children,
            );
            black_box(best.unwrap())
        });
    });
}

criterion_group!(benches, bench_select, bench_wildcard_heavy);
criterion_main!(benches);
