//! Final adder chain over a reduced matrix.

use ctree_netlist::SignalId;

use crate::cells::CellBuilder;
use crate::matrix::RankMatrix;

/// Folds a reduced matrix into the final output sequence, low weight first.
///
/// Ranks before the first height-two rank pass their signal through (or pin a
/// zero when empty). From that rank on, a single carry-propagate adder spans
/// the rest of the matrix: each rank feeds its two signals into the adder's
/// operand words, topping up with zeros, and contributes the adder's output
/// bit of the same weight. The adder's carry out closes the sequence.
///
/// When no rank reaches height two there is nothing left to add and no adder
/// (and no carry bit) is created.
pub(crate) fn finalize(cells: &mut CellBuilder<'_>, mut ranks: RankMatrix) -> Vec<SignalId> {
    debug_assert!(ranks.is_reduced(), "finalize: matrix not reduced");

    let len = ranks.len();
    let mut outputs = Vec::with_capacity(len + 1);
    // operand words of the closing adder, once one is needed
    let mut chain: Option<(Vec<SignalId>, Vec<SignalId>)> = None;

    for i in 0..len {
        if chain.is_none() && ranks.height(i) > 1 {
            let width = len - i;
            chain = Some((Vec::with_capacity(width), Vec::with_capacity(width)));
        }

        match &mut chain {
            Some((lo, hi)) => {
                let first = ranks.pop(i).unwrap_or_else(|| cells.zero());
                let second = ranks.pop(i).unwrap_or_else(|| cells.zero());
                lo.push(first);
                hi.push(second);
            }
            None => {
                // a single signal passes through; an empty rank pins a zero
                let signal = ranks.pop(i).unwrap_or_else(|| cells.zero());
                outputs.push(signal);
            }
        }
    }

    if let Some((lo, hi)) = chain {
        outputs.extend(cells.adder(lo, hi));
    }

    outputs
}
