//! Dadda-style reduction.

use ctree_netlist::SignalId;

use crate::cells::{CellBuilder, full_adder, half_adder};
use crate::chain;
use crate::matrix::{PendingRows, RankMatrix};

/// The ceiling schedule `2, 3, 4, 6, 9, 13, ...` built up to just below the
/// starting height.
///
/// Each entry is a stage's tallest permitted rank; the engine walks the
/// sequence back to front.
pub(crate) fn d_factors(max_height: usize) -> Vec<usize> {
    let mut factors = Vec::new();
    let mut d = 2usize;
    while d < max_height {
        factors.push(d);
        d = d * 3 / 2;
    }
    factors
}

/// Reduces the matrix with the Dadda schedule, then hands the remaining rows
/// to the adder chain.
///
/// With `h' = height + carries arriving from the rank below + adders already
/// fired in this rank: a rank at `h' <= d` is left alone, a rank landing on
/// exactly `d + 1` closes with a half adder, and anything taller folds full
/// adders until it gets there.
pub(crate) fn run(cells: &mut CellBuilder<'_>, mut ranks: RankMatrix) -> Vec<SignalId> {
    let mut max_height = ranks.max_height();

    let mut factors = d_factors(max_height);
    let mut d = factors.pop().unwrap_or(2);

    while max_height > 2 {
        let mut last_carry_count = 0usize;
        let mut pending = PendingRows::new();

        for i in 0..ranks.len() {
            // a skipped rank's carry debt stays visible to the rank above it
            if ranks.height(i) + last_carry_count <= d {
                continue;
            }

            let mut adder_count = 0usize;
            while ranks.height(i) + last_carry_count + adder_count > d + 1 && ranks.height(i) >= 3
            {
                let [a, b, c] = ranks.take3(i);
                let (sum, carry) = full_adder(cells, a, b, c);
                pending.push_sum(i, sum);
                pending.push_carry(i, carry);
                adder_count += 1;
            }

            if ranks.height(i) + last_carry_count + adder_count == d + 1 && ranks.height(i) >= 2 {
                let [a, b] = ranks.take2(i);
                let (sum, carry) = half_adder(cells, a, b);
                pending.push_sum(i, sum);
                pending.push_carry(i, carry);
                adder_count += 1;
            }

            last_carry_count = adder_count;
        }

        max_height = ranks.absorb(pending);

        // step the ceiling down past the new tallest rank
        while let Some(next) = factors.pop() {
            d = next;
            if d < max_height {
                break;
            }
        }
    }

    chain::finalize(cells, ranks)
}
