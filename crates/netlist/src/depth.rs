//! Logic-depth analysis.

use crate::netlist::{Netlist, Wire};

/// Longest cell path from the inputs to each wire, with every cell counting
/// as one level.
///
/// An adder cell is a single level regardless of width, matching how a
/// downstream technology mapper treats a carry-propagate macro.
pub fn wire_depths(netlist: &Netlist) -> Vec<u32> {
    let mut depths = vec![0u32; netlist.num_wires()];
    let mut adder_depths: Vec<Option<u32>> = vec![None; netlist.num_adders()];

    for id in netlist.wire_ids_iter() {
        let depth = match netlist.get_wire(id).expect("depth: wire id out of range") {
            Wire::Input | Wire::Zero => 0,
            Wire::Gate(cell) => {
                1 + cell
                    .op()
                    .inputs()
                    .map(|s| depths[usize::from(s)])
                    .max()
                    .expect("depth: gate with no inputs")
            }
            Wire::AdderBit { adder, .. } => {
                if adder_depths[*adder].is_none() {
                    let cell = netlist.get_adder(*adder).expect("depth: dangling adder");
                    let operands = cell
                        .lo()
                        .iter()
                        .chain(cell.hi())
                        .map(|&s| depths[usize::from(s)])
                        .max()
                        .expect("depth: adder with no operands");
                    adder_depths[*adder] = Some(1 + operands);
                }
                adder_depths[*adder].expect("depth: adder depth")
            }
        };
        depths[usize::from(id)] = depth;
    }

    depths
}

/// Depth of the deepest wire in the netlist.
pub fn logic_depth(netlist: &Netlist) -> u32 {
    wire_depths(netlist).into_iter().max().unwrap_or(0)
}
