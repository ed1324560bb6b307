//! Signal and provenance coordinates.

/// Inner typedef that's used for absolute signal indexes.
pub type RawSignalIdx = u32;

/// Absolute index of a signal within a netlist, either an input or produced
/// by a cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SignalId(RawSignalIdx);

impl From<RawSignalIdx> for SignalId {
    fn from(value: RawSignalIdx) -> Self {
        Self(value)
    }
}

impl From<SignalId> for RawSignalIdx {
    fn from(value: SignalId) -> Self {
        value.0
    }
}

impl From<usize> for SignalId {
    fn from(value: usize) -> Self {
        Self(value as RawSignalIdx)
    }
}

impl From<SignalId> for usize {
    fn from(value: SignalId) -> Self {
        value.0 as usize
    }
}

/// Opaque identifier of the consumer node a cell was synthesized for.
///
/// The reduction engines stamp it onto every cell they emit; nothing in this
/// crate interprets it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u64);

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<NodeId> for u64 {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

/// Opaque traversal marker stamped onto cells alongside [`NodeId`].
///
/// Callers that run several synthesis passes over one netlist use it to tell
/// the passes' cells apart.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PassMark(u32);

impl From<u32> for PassMark {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<PassMark> for u32 {
    fn from(value: PassMark) -> Self {
        value.0
    }
}
