//! Netlist representation.

use crate::gate::{AdderCell, GateCell, GateCounts, GateKind};
use crate::signal::SignalId;

/// One entry in a netlist's wire table.
#[derive(Copy, Clone, Debug)]
pub enum Wire {
    /// A primary input.
    Input,
    /// The constant-zero wire; a netlist holds at most one.
    Zero,
    /// Output of a gate cell.
    Gate(GateCell),
    /// One output bit of an adder cell.
    AdderBit {
        /// Index into the netlist's adder table.
        adder: usize,
        /// Bit position within the adder's output word, low to high.
        bit: usize,
    },
}

/// Append-only sink for synthesized cells.
///
/// Wires are identified by their position in the table, and a cell may only
/// refer to wires created before it, so the table is always topologically
/// sorted. The synthesis engines take this by `&mut` and push cells into it;
/// they never own it.
#[derive(Clone, Debug)]
pub struct Netlist {
    /// The number of primary inputs.
    num_inputs: usize,

    /// List of wires, either inputs or produced by cells.
    wires: Vec<Wire>,

    /// Adder cells, referred to by [`Wire::AdderBit`] entries.
    adders: Vec<AdderCell>,

    /// The constant-zero wire, once requested.
    zero: Option<SignalId>,

    /// Running gate-cell totals.
    counts: GateCounts,
}

impl Netlist {
    /// Constructs a new instance with the given number of primary inputs.
    pub fn new(num_inputs: usize) -> Self {
        Self {
            num_inputs,
            wires: vec![Wire::Input; num_inputs],
            adders: Vec::new(),
            zero: None,
            counts: GateCounts::default(),
        }
    }

    /// The number of primary inputs.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// The total number of wires, inputs included.
    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    /// The number of gate cells, adders not counted.
    pub fn num_gates(&self) -> usize {
        self.counts.total()
    }

    /// The number of adder cells.
    pub fn num_adders(&self) -> usize {
        self.adders.len()
    }

    /// Gate-cell totals by function family.
    pub fn gate_counts(&self) -> GateCounts {
        self.counts
    }

    /// Returns an iterator over the indexes of input wires.
    ///
    /// The iterator ranges over a snapshot of the input count and does not
    /// borrow the netlist.
    pub fn input_ids_iter(&self) -> impl Iterator<Item = SignalId> + Clone + use<> {
        (0..self.num_inputs).map(SignalId::from)
    }

    /// Returns an iterator over all wire indexes in creation order.
    ///
    /// Like [`Self::input_ids_iter`], the iterator does not borrow the
    /// netlist; wires added afterwards are not observed.
    pub fn wire_ids_iter(&self) -> impl Iterator<Item = SignalId> + Clone + use<> {
        (0..self.wires.len()).map(SignalId::from)
    }

    /// Returns the constant-zero wire, creating it on first request.
    pub fn zero(&mut self) -> SignalId {
        match self.zero {
            Some(z) => z,
            None => {
                let z = SignalId::from(self.wires.len());
                self.wires.push(Wire::Zero);
                self.zero = Some(z);
                z
            }
        }
    }

    /// Adds a gate cell, returning its output signal.
    ///
    /// # Panics
    ///
    /// If an input signal does not exist yet.
    pub fn add_gate(&mut self, cell: GateCell) -> SignalId {
        for s in cell.op().inputs() {
            assert!(
                usize::from(s) < self.wires.len(),
                "netlist: gate input {} not yet defined",
                u32::from(s),
            );
        }
        match cell.op().kind() {
            GateKind::And => self.counts.and += 1,
            GateKind::Xor => self.counts.xor += 1,
            GateKind::Or => self.counts.or += 1,
        }
        let idx = SignalId::from(self.wires.len());
        self.wires.push(Wire::Gate(cell));
        idx
    }

    /// Adds an adder cell, returning its `width + 1` output signals low bit
    /// first, carry out last.
    ///
    /// # Panics
    ///
    /// If an operand signal does not exist yet.
    pub fn add_adder(&mut self, cell: AdderCell) -> Vec<SignalId> {
        for &s in cell.lo().iter().chain(cell.hi()) {
            assert!(
                usize::from(s) < self.wires.len(),
                "netlist: adder operand {} not yet defined",
                u32::from(s),
            );
        }
        let adder = self.adders.len();
        let width = cell.width();
        self.adders.push(cell);

        let mut outputs = Vec::with_capacity(width + 1);
        for bit in 0..=width {
            let idx = SignalId::from(self.wires.len());
            self.wires.push(Wire::AdderBit { adder, bit });
            outputs.push(idx);
        }
        outputs
    }

    /// Looks up a wire by index.
    pub fn get_wire(&self, i: SignalId) -> Option<&Wire> {
        self.wires.get(usize::from(i))
    }

    /// Looks up an adder cell by its table index.
    pub fn get_adder(&self, adder: usize) -> Option<&AdderCell> {
        self.adders.get(adder)
    }

    /// Verifies the structural invariants: input wires form the table prefix,
    /// every cell input precedes the cell's outputs, adder bit wires point at
    /// real adders, and at most one zero wire exists.
    pub fn validate(&self) -> Result<(), String> {
        if self.wires.len() < self.num_inputs {
            return Err(format!(
                "{} wires but {} declared inputs",
                self.wires.len(),
                self.num_inputs
            ));
        }

        let mut zero_wires = 0usize;
        for (i, wire) in self.wires.iter().enumerate() {
            match wire {
                Wire::Input => {
                    if i >= self.num_inputs {
                        return Err(format!("wire {i}: input wire outside the input prefix"));
                    }
                }
                Wire::Zero => zero_wires += 1,
                Wire::Gate(cell) => {
                    for s in cell.op().inputs() {
                        if usize::from(s) >= i {
                            return Err(format!(
                                "wire {i}: gate input {} does not precede it",
                                u32::from(s)
                            ));
                        }
                    }
                }
                Wire::AdderBit { adder, bit } => {
                    let Some(cell) = self.adders.get(*adder) else {
                        return Err(format!("wire {i}: dangling adder index {adder}"));
                    };
                    if *bit > cell.width() {
                        return Err(format!("wire {i}: adder bit {bit} out of range"));
                    }
                    for &s in cell.lo().iter().chain(cell.hi()) {
                        if usize::from(s) >= i {
                            return Err(format!(
                                "wire {i}: adder operand {} does not precede it",
                                u32::from(s)
                            ));
                        }
                    }
                }
            }
        }

        if zero_wires > 1 {
            return Err(format!("{zero_wires} zero wires, expected at most one"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;
    use crate::signal::{NodeId, PassMark};

    fn tags() -> (NodeId, PassMark) {
        (NodeId::from(0), PassMark::from(0))
    }

    #[test]
    fn test_new_netlist() {
        let nl = Netlist::new(3);
        assert_eq!(nl.num_inputs(), 3);
        assert_eq!(nl.num_wires(), 3);
        assert_eq!(nl.num_gates(), 0);
        assert_eq!(nl.num_adders(), 0);
        assert!(nl.validate().is_ok());
    }

    #[test]
    fn test_id_iterators_do_not_borrow_the_netlist() {
        let nl = Netlist::new(3);
        let mut inputs = nl.input_ids_iter();
        let wires = nl.wire_ids_iter();

        // both iterators stay usable after the netlist moves away
        let moved = nl;
        assert_eq!(inputs.next(), Some(SignalId::from(0u32)));
        assert_eq!(inputs.count(), 2);
        assert_eq!(wires.count(), 3);
        assert_eq!(moved.num_inputs(), 3);
    }

    #[test]
    fn test_zero_is_memoized() {
        let mut nl = Netlist::new(1);
        let z1 = nl.zero();
        let z2 = nl.zero();
        assert_eq!(z1, z2);
        assert_eq!(nl.num_wires(), 2);
        assert!(matches!(nl.get_wire(z1), Some(Wire::Zero)));
        assert!(nl.validate().is_ok());
    }

    #[test]
    fn test_add_gate_counts() {
        let mut nl = Netlist::new(3);
        let (origin, mark) = tags();
        let a = SignalId::from(0u32);
        let b = SignalId::from(1u32);
        let c = SignalId::from(2u32);

        let x = nl.add_gate(GateCell::new(Gate::Xor3(a, b, c), origin, mark));
        let g = nl.add_gate(GateCell::new(Gate::And(a, b), origin, mark));
        nl.add_gate(GateCell::new(Gate::Or2(x, g), origin, mark));

        let counts = nl.gate_counts();
        assert_eq!(counts.and, 1);
        assert_eq!(counts.xor, 1);
        assert_eq!(counts.or, 1);
        assert_eq!(counts.total(), 3);
        assert_eq!(nl.num_gates(), 3);
        assert!(nl.validate().is_ok());
    }

    #[test]
    #[should_panic(expected = "not yet defined")]
    fn test_add_gate_forward_reference_panics() {
        let mut nl = Netlist::new(1);
        let (origin, mark) = tags();
        let a = SignalId::from(0u32);
        let future = SignalId::from(9u32);
        nl.add_gate(GateCell::new(Gate::And(a, future), origin, mark));
    }

    #[test]
    fn test_add_adder_outputs() {
        let mut nl = Netlist::new(4);
        let (origin, mark) = tags();
        let lo = vec![SignalId::from(0u32), SignalId::from(1u32)];
        let hi = vec![SignalId::from(2u32), SignalId::from(3u32)];

        let outs = nl.add_adder(AdderCell::new(lo, hi, origin, mark));
        assert_eq!(outs.len(), 3);
        assert_eq!(nl.num_adders(), 1);
        assert_eq!(nl.num_wires(), 7);
        for (bit, &o) in outs.iter().enumerate() {
            match nl.get_wire(o) {
                Some(Wire::AdderBit { adder: 0, bit: b }) => assert_eq!(*b, bit),
                other => panic!("expected adder bit, got {other:?}"),
            }
        }
        assert!(nl.validate().is_ok());
    }
}
