//! Writes a reduced netlist in the classic `.bench` format.
//!
//! Every wire in the netlist keeps its index as its net name (`n17`). Adders
//! have no `.bench` counterpart, so each one is lowered into a ripple of
//! five-gate full adder stages; the synthetic nets introduced by the lowering
//! are numbered past the end of the netlist.

use std::io::{self, Write};

use ctree_netlist::{Gate, Netlist, SignalId, Wire};

/// Writes `netlist` as `.bench` text with one `OUTPUT` line per entry of
/// `outputs`.
pub fn write_bench(netlist: &Netlist, outputs: &[SignalId], out: &mut impl Write) -> io::Result<()> {
    let mut emitter = BenchEmitter {
        out,
        next_net: netlist.num_wires(),
        zero_net: None,
        num_inputs: netlist.num_inputs(),
    };

    writeln!(
        emitter.out,
        "# treegen netlist: {} inputs, {} gates, {} adders",
        netlist.num_inputs(),
        netlist.num_gates(),
        netlist.num_adders()
    )?;
    for id in netlist.input_ids_iter() {
        writeln!(emitter.out, "INPUT(n{})", usize::from(id))?;
    }
    for &output in outputs {
        writeln!(emitter.out, "OUTPUT(n{})", usize::from(output))?;
    }
    writeln!(emitter.out)?;

    for id in netlist.wire_ids_iter() {
        let wire = netlist
            .get_wire(id)
            .expect("netlist: wire id out of range");
        match wire {
            Wire::Input => {}
            Wire::Zero => emitter.define_zero(usize::from(id))?,
            Wire::Gate(cell) => {
                let line = match cell.op() {
                    Gate::And(a, b) => format!("AND({}, {})", net(a), net(b)),
                    Gate::Xor2(a, b) => format!("XOR({}, {})", net(a), net(b)),
                    Gate::Xor3(a, b, c) => format!("XOR({}, {}, {})", net(a), net(b), net(c)),
                    Gate::Or2(a, b) => format!("OR({}, {})", net(a), net(b)),
                    Gate::Or3(a, b, c) => format!("OR({}, {}, {})", net(a), net(b), net(c)),
                };
                writeln!(emitter.out, "n{} = {line}", usize::from(id))?;
            }
            // The first bit of an adder triggers the lowering of the whole
            // ripple; the remaining bits were already named by it.
            Wire::AdderBit { adder, bit: 0 } => {
                emitter.lower_adder(netlist, *adder, usize::from(id))?;
            }
            Wire::AdderBit { .. } => {}
        }
    }
    Ok(())
}

struct BenchEmitter<'a, W: Write> {
    out: &'a mut W,
    next_net: usize,
    zero_net: Option<usize>,
    num_inputs: usize,
}

impl<W: Write> BenchEmitter<'_, W> {
    fn fresh(&mut self) -> usize {
        let n = self.next_net;
        self.next_net += 1;
        n
    }

    /// Emits the definition of a constant-false wire that already exists in
    /// the netlist.
    fn define_zero(&mut self, id: usize) -> io::Result<()> {
        if self.num_inputs == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "constant zero needs at least one input net",
            ));
        }
        writeln!(self.out, "n{id} = XOR(n0, n0)")?;
        if self.zero_net.is_none() {
            self.zero_net = Some(id);
        }
        Ok(())
    }

    /// Returns a constant-false net, synthesizing one if the netlist never
    /// defined its own.
    fn zero(&mut self) -> io::Result<usize> {
        if let Some(zero) = self.zero_net {
            return Ok(zero);
        }
        if self.num_inputs == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "constant zero needs at least one input net",
            ));
        }
        let zero = self.fresh();
        writeln!(self.out, "n{zero} = XOR(n0, n0)")?;
        self.zero_net = Some(zero);
        Ok(zero)
    }

    /// Lowers one adder into full adder stages: three XORs and two ANDs per
    /// bit, rippling the carry from a constant-false carry-in. The stage sums
    /// land on the adder's own output nets (`first_out + bit`), as does the
    /// final carry-out (`first_out + width`).
    fn lower_adder(&mut self, netlist: &Netlist, adder: usize, first_out: usize) -> io::Result<()> {
        let cell = netlist
            .get_adder(adder)
            .expect("netlist: adder index out of range");
        let width = cell.width();
        let mut carry = self.zero()?;
        for bit in 0..width {
            let a = usize::from(cell.lo()[bit]);
            let b = usize::from(cell.hi()[bit]);

            let half_sum = self.fresh();
            writeln!(self.out, "n{half_sum} = XOR(n{a}, n{b})")?;
            writeln!(self.out, "n{} = XOR(n{half_sum}, n{carry})", first_out + bit)?;

            let half_carry = self.fresh();
            writeln!(self.out, "n{half_carry} = AND(n{a}, n{b})")?;
            let carry_prop = self.fresh();
            writeln!(self.out, "n{carry_prop} = AND(n{half_sum}, n{carry})")?;

            let carry_out = if bit + 1 == width {
                first_out + width
            } else {
                self.fresh()
            };
            writeln!(self.out, "n{carry_out} = XOR(n{half_carry}, n{carry_prop})")?;
            carry = carry_out;
        }
        Ok(())
    }
}

fn net(id: SignalId) -> String {
    format!("n{}", usize::from(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctree_netlist::{NodeId, PassMark};
    use ctree_reduce::CellBuilder;

    #[test]
    fn test_write_gates() {
        let mut netlist = Netlist::new(3);
        let mut cells = CellBuilder::new(&mut netlist, NodeId::from(0u64), PassMark::from(0u32));
        let sum = cells.xor3(
            SignalId::from(0u32),
            SignalId::from(1u32),
            SignalId::from(2u32),
        );

        let mut text = Vec::new();
        write_bench(&netlist, &[sum], &mut text).unwrap();

        let expected = "\
# treegen netlist: 3 inputs, 1 gates, 0 adders
INPUT(n0)
INPUT(n1)
INPUT(n2)
OUTPUT(n3)

n3 = XOR(n0, n1, n2)
";
        assert_eq!(String::from_utf8(text).unwrap(), expected);
    }

    #[test]
    fn test_write_adder_ripple() {
        let mut netlist = Netlist::new(2);
        let mut cells = CellBuilder::new(&mut netlist, NodeId::from(0u64), PassMark::from(0u32));
        let outputs = cells.adder(vec![SignalId::from(0u32)], vec![SignalId::from(1u32)]);

        let mut text = Vec::new();
        write_bench(&netlist, &outputs, &mut text).unwrap();

        let expected = "\
# treegen netlist: 2 inputs, 0 gates, 1 adders
INPUT(n0)
INPUT(n1)
OUTPUT(n2)
OUTPUT(n3)

n4 = XOR(n0, n0)
n5 = XOR(n0, n1)
n2 = XOR(n5, n4)
n6 = AND(n0, n1)
n7 = AND(n5, n4)
n3 = XOR(n6, n7)
";
        assert_eq!(String::from_utf8(text).unwrap(), expected);
    }

    #[test]
    fn test_zero_wire_reuses_first_input() {
        let mut netlist = Netlist::new(1);
        let mut cells = CellBuilder::new(&mut netlist, NodeId::from(0u64), PassMark::from(0u32));
        let zero = cells.zero();

        let mut text = Vec::new();
        write_bench(&netlist, &[zero], &mut text).unwrap();

        let rendered = String::from_utf8(text).unwrap();
        assert!(rendered.contains("n1 = XOR(n0, n0)"), "{rendered}");
    }

    #[test]
    fn test_zero_without_inputs_is_an_error() {
        let mut netlist = Netlist::new(0);
        let mut cells = CellBuilder::new(&mut netlist, NodeId::from(0u64), PassMark::from(0u32));
        let zero = cells.zero();

        let mut text = Vec::new();
        let err = write_bench(&netlist, &[zero], &mut text).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
