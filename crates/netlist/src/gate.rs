//! Cell concepts.

use crate::signal::{NodeId, PassMark, SignalId};

/// Logic function of a gate cell, carrying its input signals.
///
/// Three-input variants are first-class: a compressor column's sum wants a
/// single XOR3 cell rather than a two-level XOR pair, and its carry an OR3
/// over the pairwise ANDs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Gate {
    /// Two-input AND.
    And(SignalId, SignalId),
    /// Two-input XOR.
    Xor2(SignalId, SignalId),
    /// Three-input XOR.
    Xor3(SignalId, SignalId, SignalId),
    /// Two-input OR.
    Or2(SignalId, SignalId),
    /// Three-input OR.
    Or3(SignalId, SignalId, SignalId),
}

impl Gate {
    /// The gate's logic function, ignoring arity.
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::And(..) => GateKind::And,
            Gate::Xor2(..) | Gate::Xor3(..) => GateKind::Xor,
            Gate::Or2(..) | Gate::Or3(..) => GateKind::Or,
        }
    }

    /// Returns an iterator over the gate's input signals in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = SignalId> {
        match *self {
            Gate::And(a, b) | Gate::Xor2(a, b) | Gate::Or2(a, b) => vec![a, b],
            Gate::Xor3(a, b, c) | Gate::Or3(a, b, c) => vec![a, b, c],
        }
        .into_iter()
    }
}

/// Logic function families, used for stats and writers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GateKind {
    /// AND family.
    And,
    /// XOR family.
    Xor,
    /// OR family.
    Or,
}

/// A gate cell recorded in a netlist: the logic function plus the provenance
/// tags of whoever synthesized it.
#[derive(Copy, Clone, Debug)]
pub struct GateCell {
    op: Gate,
    origin: NodeId,
    mark: PassMark,
}

impl GateCell {
    /// Constructs a new instance.
    pub fn new(op: Gate, origin: NodeId, mark: PassMark) -> Self {
        Self { op, origin, mark }
    }

    /// The logic function with its inputs.
    pub fn op(&self) -> Gate {
        self.op
    }

    /// The consumer node this cell was synthesized for.
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// The traversal marker the cell was stamped with.
    pub fn mark(&self) -> PassMark {
        self.mark
    }
}

/// A carry-propagate adder cell over two equal-width operand words.
///
/// Operand bits are ordered low to high. The adder publishes `width + 1`
/// output bits, the last being the carry out.
#[derive(Clone, Debug)]
pub struct AdderCell {
    lo: Vec<SignalId>,
    hi: Vec<SignalId>,
    origin: NodeId,
    mark: PassMark,
}

impl AdderCell {
    /// Constructs a new instance.
    ///
    /// # Panics
    ///
    /// If the operand widths differ or are zero.
    pub fn new(lo: Vec<SignalId>, hi: Vec<SignalId>, origin: NodeId, mark: PassMark) -> Self {
        assert_eq!(lo.len(), hi.len(), "adder: operand widths differ");
        assert!(!lo.is_empty(), "adder: zero-width operands");
        Self {
            lo,
            hi,
            origin,
            mark,
        }
    }

    /// Width of each operand word in bits.
    pub fn width(&self) -> usize {
        self.lo.len()
    }

    /// The first operand word, low bit first.
    pub fn lo(&self) -> &[SignalId] {
        &self.lo
    }

    /// The second operand word, low bit first.
    pub fn hi(&self) -> &[SignalId] {
        &self.hi
    }

    /// The consumer node this cell was synthesized for.
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// The traversal marker the cell was stamped with.
    pub fn mark(&self) -> PassMark {
        self.mark
    }
}

/// Running totals of the gate cells in a netlist, by function family.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct GateCounts {
    /// Number of AND cells.
    pub and: usize,
    /// Number of XOR cells (both arities).
    pub xor: usize,
    /// Number of OR cells (both arities).
    pub or: usize,
}

impl GateCounts {
    /// Total number of gate cells, not counting adders.
    pub fn total(&self) -> usize {
        self.and + self.xor + self.or
    }
}
