//! Decomposes arithmetic operations into rank matrices.
//!
//! Each generator lays out the primary inputs of a fresh netlist, stacks the
//! operand bits (or partial products) into ranks by weight, and hands back
//! everything the driver needs to reduce, verify, and emit the result.

use ctree_netlist::{Netlist, NodeId, PassMark, SignalId};
use ctree_reduce::{CellBuilder, RankMatrix};

/// A generated problem: the netlist holding the primary inputs, the matrix to
/// reduce, and the operand words (low bit first) for reading simulated values
/// back out.
#[derive(Debug)]
pub struct Instance {
    /// Netlist with the primary inputs and any pre-reduction cells.
    pub netlist: Netlist,
    /// Rank matrix covering every operand bit.
    pub ranks: RankMatrix,
    /// Input operand words, low bit first.
    pub operands: Vec<Vec<SignalId>>,
}

/// Lays out `operands` equal `width`-bit words and stacks their bits into
/// ranks by weight. No cells are synthesized; every matrix entry is a primary
/// input.
pub fn sum_instance(operands: usize, width: usize) -> Instance {
    let netlist = Netlist::new(operands * width);
    let mut ranks = RankMatrix::new();
    let mut words = Vec::with_capacity(operands);

    let mut ids = netlist.input_ids_iter();
    for _ in 0..operands {
        let word: Vec<SignalId> = (&mut ids).take(width).collect();
        for (weight, &bit) in word.iter().enumerate() {
            ranks.push_signal(weight, bit);
        }
        words.push(word);
    }

    Instance {
        netlist,
        ranks,
        operands: words,
    }
}

/// Lays out two `width`-bit factors, synthesizes their AND partial products,
/// and stacks the products by weight. The resulting matrix is the classic
/// multiplier pyramid: rank `k` holds one product for every `i + j == k`.
pub fn mul_instance(width: usize, origin: NodeId, mark: PassMark) -> Instance {
    let mut netlist = Netlist::new(2 * width);
    let a: Vec<SignalId> = (0..width).map(SignalId::from).collect();
    let b: Vec<SignalId> = (width..2 * width).map(SignalId::from).collect();

    let mut ranks = RankMatrix::new();
    let mut cells = CellBuilder::new(&mut netlist, origin, mark);
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            let product = cells.and(ai, bj);
            ranks.push_signal(i + j, product);
        }
    }

    Instance {
        netlist,
        ranks,
        operands: vec![a, b],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctree_netlist::evaluate_netlist_direct;

    #[test]
    fn test_sum_instance_shape() {
        let instance = sum_instance(3, 2);

        assert_eq!(instance.netlist.num_inputs(), 6);
        assert_eq!(instance.netlist.num_gates(), 0);
        assert_eq!(instance.ranks.len(), 2);
        assert_eq!(instance.ranks.height(0), 3);
        assert_eq!(instance.ranks.height(1), 3);

        assert_eq!(instance.operands.len(), 3);
        assert_eq!(
            instance.operands[0],
            vec![SignalId::from(0u32), SignalId::from(1u32)]
        );
        assert_eq!(
            instance.operands[2],
            vec![SignalId::from(4u32), SignalId::from(5u32)]
        );
    }

    #[test]
    fn test_mul_instance_shape() {
        let instance = mul_instance(3, NodeId::from(0u64), PassMark::from(0u32));

        assert_eq!(instance.netlist.num_inputs(), 6);
        assert_eq!(instance.netlist.num_gates(), 9);
        assert_eq!(instance.ranks.len(), 5);
        let heights: Vec<usize> = (0..5).map(|i| instance.ranks.height(i)).collect();
        assert_eq!(heights, vec![1, 2, 3, 2, 1]);
    }

    #[test]
    fn test_mul_partial_products_sum_to_product() {
        let width = 2;
        let instance = mul_instance(width, NodeId::from(0u64), PassMark::from(0u32));

        for a in 0..4u128 {
            for b in 0..4u128 {
                let inputs = (0..width)
                    .map(|i| (a >> i) & 1 == 1)
                    .chain((0..width).map(|i| (b >> i) & 1 == 1));
                let values = evaluate_netlist_direct(&instance.netlist, inputs);

                let mut total = 0u128;
                for weight in 0..instance.ranks.len() {
                    for &sig in instance.ranks.rank(weight) {
                        total += (values.get(sig) as u128) << weight;
                    }
                }
                assert_eq!(total, a * b, "partial products for {a} x {b}");
            }
        }
    }
}
