//! Wallace-style reduction.

use ctree_netlist::SignalId;

use crate::cells::{CellBuilder, full_adder, half_adder};
use crate::chain;
use crate::matrix::{PendingRows, RankMatrix};

/// Row target for a pass starting at the given tallest height.
///
/// One layer of full adders folds signals three into two, so a pass aims at
/// `(h / 3) * 2 + h % 3` rows, the tightest height reachable in one layer.
pub(crate) fn target_height(max_height: usize) -> usize {
    (max_height / 3) * 2 + max_height % 3
}

/// Reduces the matrix with the Wallace schedule, then hands the remaining
/// rows to the adder chain.
///
/// Every pass folds triples into full adders wherever it can. A rank left at
/// exactly two signals also takes a half adder when it is the first rank this
/// pass reduced, or when the rank plus the adders fired in and just below it
/// still sits above the pass target.
pub(crate) fn run(cells: &mut CellBuilder<'_>, mut ranks: RankMatrix) -> Vec<SignalId> {
    let mut max_height = ranks.max_height();

    while max_height > 2 {
        let target = target_height(max_height);
        let mut first_reducible_rank = true;
        let mut last_adder_count = 0usize;
        let mut pending = PendingRows::new();

        for i in 0..ranks.len() {
            if ranks.height(i) < 2 {
                // nothing to reduce here, and the run of adders is broken
                last_adder_count = 0;
                continue;
            }

            let mut adder_count = 0usize;
            while ranks.height(i) >= 3 {
                let [a, b, c] = ranks.take3(i);
                let (sum, carry) = full_adder(cells, a, b, c);
                pending.push_sum(i, sum);
                pending.push_carry(i, carry);
                adder_count += 1;
                first_reducible_rank = false;
            }

            if ranks.height(i) == 2
                && (first_reducible_rank
                    || adder_count + last_adder_count + ranks.height(i) > target)
            {
                let [a, b] = ranks.take2(i);
                let (sum, carry) = half_adder(cells, a, b);
                pending.push_sum(i, sum);
                pending.push_carry(i, carry);
                adder_count += 1;
                first_reducible_rank = false;
            }

            last_adder_count = adder_count;
        }

        max_height = ranks.absorb(pending);
    }

    chain::finalize(cells, ranks)
}
