//! Cell builders shared by the reduction engines.

use ctree_netlist::{AdderCell, Gate, GateCell, Netlist, NodeId, PassMark, SignalId};

/// Builder that stamps every synthesized cell with one consumer node and one
/// traversal marker.
///
/// A thin handle over a borrowed [`Netlist`]. The engines thread a single
/// builder through a whole reduction so every cell lands with the same
/// provenance tags.
#[derive(Debug)]
pub struct CellBuilder<'n> {
    netlist: &'n mut Netlist,
    origin: NodeId,
    mark: PassMark,
}

impl<'n> CellBuilder<'n> {
    /// Constructs a new instance.
    pub fn new(netlist: &'n mut Netlist, origin: NodeId, mark: PassMark) -> Self {
        Self {
            netlist,
            origin,
            mark,
        }
    }

    /// The underlying netlist.
    pub fn netlist(&self) -> &Netlist {
        self.netlist
    }

    /// The constant-zero wire.
    pub fn zero(&mut self) -> SignalId {
        self.netlist.zero()
    }

    fn gate(&mut self, op: Gate) -> SignalId {
        self.netlist
            .add_gate(GateCell::new(op, self.origin, self.mark))
    }

    /// `a & b`.
    pub fn and(&mut self, a: SignalId, b: SignalId) -> SignalId {
        self.gate(Gate::And(a, b))
    }

    /// `a ^ b`.
    pub fn xor2(&mut self, a: SignalId, b: SignalId) -> SignalId {
        self.gate(Gate::Xor2(a, b))
    }

    /// `a ^ b ^ c`.
    pub fn xor3(&mut self, a: SignalId, b: SignalId, c: SignalId) -> SignalId {
        self.gate(Gate::Xor3(a, b, c))
    }

    /// `a | b`.
    pub fn or2(&mut self, a: SignalId, b: SignalId) -> SignalId {
        self.gate(Gate::Or2(a, b))
    }

    /// `a | b | c`.
    pub fn or3(&mut self, a: SignalId, b: SignalId, c: SignalId) -> SignalId {
        self.gate(Gate::Or3(a, b, c))
    }

    /// A carry-propagate adder over two equal-width words, returning its
    /// `width + 1` output bits low to high.
    pub fn adder(&mut self, lo: Vec<SignalId>, hi: Vec<SignalId>) -> Vec<SignalId> {
        self.netlist
            .add_adder(AdderCell::new(lo, hi, self.origin, self.mark))
    }
}

/// Builds a half adder: `sum = a ^ b`, `carry = a & b`. Two cells.
pub fn half_adder(cells: &mut CellBuilder<'_>, a: SignalId, b: SignalId) -> (SignalId, SignalId) {
    let sum = cells.xor2(a, b);
    let carry = cells.and(a, b);
    (sum, carry)
}

/// Builds a full adder: `sum = a ^ b ^ c` as a single three-input cell, and
/// `carry = ab + ac + bc` as an OR3 over the pairwise ANDs. Five cells.
///
/// The one-level XOR3 keeps the sum path a single cell deep; a downstream
/// mapper can still retime it into XOR pairs.
pub fn full_adder(
    cells: &mut CellBuilder<'_>,
    a: SignalId,
    b: SignalId,
    c: SignalId,
) -> (SignalId, SignalId) {
    let sum = cells.xor3(a, b, c);
    let ab = cells.and(a, b);
    let ac = cells.and(a, c);
    let bc = cells.and(b, c);
    let carry = cells.or3(ab, ac, bc);
    (sum, carry)
}

#[cfg(test)]
mod tests {
    use ctree_netlist::{Wire, evaluate_netlist_direct};

    use super::*;

    fn builder(netlist: &mut Netlist) -> CellBuilder<'_> {
        CellBuilder::new(netlist, NodeId::from(3), PassMark::from(1))
    }

    fn bit(n: usize, i: usize) -> bool {
        (n >> i) & 1 == 1
    }

    #[test]
    fn test_half_adder_truth_table() {
        let mut nl = Netlist::new(2);
        let mut cells = builder(&mut nl);
        let a = SignalId::from(0u32);
        let b = SignalId::from(1u32);
        let (sum, carry) = half_adder(&mut cells, a, b);

        let counts = nl.gate_counts();
        assert_eq!(counts.xor, 1);
        assert_eq!(counts.and, 1);
        assert_eq!(counts.total(), 2);

        for n in 0..4 {
            let (va, vb) = (bit(n, 0), bit(n, 1));
            let values = evaluate_netlist_direct(&nl, [va, vb]);
            assert_eq!(values.get(sum), va ^ vb, "sum for {va}/{vb}");
            assert_eq!(values.get(carry), va & vb, "carry for {va}/{vb}");
        }
    }

    #[test]
    fn test_full_adder_truth_table() {
        let mut nl = Netlist::new(3);
        let mut cells = builder(&mut nl);
        let a = SignalId::from(0u32);
        let b = SignalId::from(1u32);
        let c = SignalId::from(2u32);
        let (sum, carry) = full_adder(&mut cells, a, b, c);

        let counts = nl.gate_counts();
        assert_eq!(counts.xor, 1);
        assert_eq!(counts.and, 3);
        assert_eq!(counts.or, 1);
        assert_eq!(counts.total(), 5);

        for n in 0..8 {
            let (va, vb, vc) = (bit(n, 0), bit(n, 1), bit(n, 2));
            let total = va as u32 + vb as u32 + vc as u32;
            let values = evaluate_netlist_direct(&nl, [va, vb, vc]);
            assert_eq!(values.get(sum), total & 1 == 1, "sum for value {n}");
            assert_eq!(values.get(carry), total >= 2, "carry for value {n}");
        }
    }

    #[test]
    fn test_cells_carry_provenance_tags() {
        let mut nl = Netlist::new(2);
        let mut cells = CellBuilder::new(&mut nl, NodeId::from(42), PassMark::from(7));
        let a = SignalId::from(0u32);
        let b = SignalId::from(1u32);
        let out = cells.or2(a, b);

        match cells.netlist().get_wire(out) {
            Some(Wire::Gate(cell)) => {
                assert_eq!(u64::from(cell.origin()), 42);
                assert_eq!(u32::from(cell.mark()), 7);
            }
            other => panic!("expected gate cell, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_adder_tags() {
        let mut nl = Netlist::new(2);
        let mut cells = CellBuilder::new(&mut nl, NodeId::from(9), PassMark::from(2));
        let a = SignalId::from(0u32);
        let b = SignalId::from(1u32);
        let outs = cells.adder(vec![a], vec![b]);
        assert_eq!(outs.len(), 2);

        let cell = nl.get_adder(0).expect("adder recorded");
        assert_eq!(u64::from(cell.origin()), 9);
        assert_eq!(u32::from(cell.mark()), 2);
    }
}
