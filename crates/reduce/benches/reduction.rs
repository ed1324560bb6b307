//! Benchmarks for the reduction schedules.
#![expect(missing_docs)]
#![allow(unused_crate_dependencies)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ctree_netlist::{Netlist, NodeId, PassMark};
use ctree_reduce::{RankMatrix, Strategy, reduce};

/// Builds the partial-product shape of a `width x width` multiplier, one
/// fresh input per matrix slot.
fn multiplier_matrix(width: usize) -> (Netlist, RankMatrix) {
    let mut heights = vec![0usize; 2 * width - 1];
    for i in 0..width {
        for j in 0..width {
            heights[i + j] += 1;
        }
    }
    let total = heights.iter().sum();
    let nl = Netlist::new(total);
    let mut ids = nl.input_ids_iter();
    let columns = heights
        .iter()
        .map(|&h| (&mut ids).take(h).collect())
        .collect();
    (nl, RankMatrix::from_columns(columns))
}

fn bench_reduce(c: &mut Criterion) {
    for strategy in Strategy::ALL {
        for width in [16usize, 64] {
            let name = format!("reduce/{strategy}/{width}x{width}");
            c.bench_function(&name, |b| {
                b.iter(|| {
                    let (mut nl, ranks) = multiplier_matrix(black_box(width));
                    let outputs = reduce(
                        strategy,
                        NodeId::from(0),
                        PassMark::from(0),
                        &mut nl,
                        ranks,
                    );
                    black_box(outputs)
                });
            });
        }
    }
}

criterion_group!(benches, bench_reduce);
criterion_main!(benches);
