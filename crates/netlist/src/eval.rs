//! Direct netlist evaluation for ground-truth testing.

use fixedbitset::FixedBitSet;

use crate::gate::Gate;
use crate::netlist::{Netlist, Wire};
use crate::signal::SignalId;

/// Wire values computed by [`evaluate_netlist_direct`].
#[derive(Clone, Debug)]
pub struct WireValues {
    bits: FixedBitSet,
}

impl WireValues {
    /// Value of a single wire.
    pub fn get(&self, id: SignalId) -> bool {
        self.bits.contains(usize::from(id))
    }

    /// Interprets a signal sequence as an unsigned binary number, low bit
    /// first. Sequences must stay under 128 bits.
    pub fn weighted_value(&self, signals: &[SignalId]) -> u128 {
        signals
            .iter()
            .enumerate()
            .map(|(i, &s)| (self.get(s) as u128) << i)
            .sum()
    }
}

/// Simple direct netlist evaluator for ground truth testing.
///
/// Wires are stored in topological order, so a single forward sweep computes
/// every value. An adder cell ripples internally the first time one of its
/// output bits is visited.
pub fn evaluate_netlist_direct(
    netlist: &Netlist,
    inputs: impl IntoIterator<Item = bool>,
) -> WireValues {
    let input_values: Vec<bool> = inputs.into_iter().collect();

    // Make sure we have enough inputs.
    assert_eq!(
        input_values.len(),
        netlist.num_inputs(),
        "netlist: expected number of inputs (got {}, need {})",
        input_values.len(),
        netlist.num_inputs(),
    );

    let mut bits = FixedBitSet::with_capacity(netlist.num_wires());
    for (i, b) in input_values.into_iter().enumerate() {
        bits.set(i, b);
    }

    // Output words of adders that have already been rippled.
    let mut adder_words: Vec<Option<Vec<bool>>> = vec![None; netlist.num_adders()];

    for id in netlist.wire_ids_iter() {
        let wire = netlist.get_wire(id).expect("netlist: wire id out of range");
        let value = match wire {
            Wire::Input => continue,
            Wire::Zero => false,
            Wire::Gate(cell) => {
                let v = |s: SignalId| bits.contains(usize::from(s));
                match cell.op() {
                    Gate::And(a, b) => v(a) & v(b),
                    Gate::Xor2(a, b) => v(a) ^ v(b),
                    Gate::Xor3(a, b, c) => v(a) ^ v(b) ^ v(c),
                    Gate::Or2(a, b) => v(a) | v(b),
                    Gate::Or3(a, b, c) => v(a) | v(b) | v(c),
                }
            }
            Wire::AdderBit { adder, bit } => {
                if adder_words[*adder].is_none() {
                    let cell = netlist.get_adder(*adder).expect("netlist: dangling adder");
                    let mut word = Vec::with_capacity(cell.width() + 1);
                    let mut carry = false;
                    for (&lo, &hi) in cell.lo().iter().zip(cell.hi()) {
                        let a = bits.contains(usize::from(lo));
                        let b = bits.contains(usize::from(hi));
                        word.push(a ^ b ^ carry);
                        carry = (a & b) | (a & carry) | (b & carry);
                    }
                    word.push(carry);
                    adder_words[*adder] = Some(word);
                }
                adder_words[*adder].as_ref().expect("netlist: adder word")[*bit]
            }
        };
        bits.set(usize::from(id), value);
    }

    WireValues { bits }
}
