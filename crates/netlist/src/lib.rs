//! In-memory netlist sink for combinational synthesis.
//!
//! A [`Netlist`] is an append-only table of wires: primary inputs first, then
//! one wire per synthesized cell output. Synthesis code owns a `&mut Netlist`
//! and pushes [`GateCell`]s and [`AdderCell`]s into it; every cell is stamped
//! with opaque [`NodeId`]/[`PassMark`] provenance tags supplied by the caller.
//!
//! The crate also carries the ground-truth tooling the synthesis tests lean
//! on: a direct evaluator and a logic-depth analysis.

pub mod depth;
pub mod eval;
pub mod gate;
pub mod netlist;
pub mod signal;

// Re-export types at crate root
pub use depth::{logic_depth, wire_depths};
pub use eval::{WireValues, evaluate_netlist_direct};
pub use gate::{AdderCell, Gate, GateCell, GateCounts, GateKind};
pub use netlist::{Netlist, Wire};
pub use signal::{NodeId, PassMark, RawSignalIdx, SignalId};
