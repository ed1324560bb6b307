//! Compressor-tree reduction over weighted signal columns.
//!
//! The input is a [`RankMatrix`]: column `i` holds the signals of binary
//! weight `2^i`. [`reduce`] compresses the matrix with either the Wallace or
//! the Dadda schedule until every column is at height two or less, then folds
//! whatever remains through one carry-propagate adder. The result is one
//! output signal per rank plus a final carry, low weight first, whose
//! weighted sum always equals the weighted sum of the input signals.
//!
//! Cells land in a caller-owned [`Netlist`], stamped with the caller's
//! provenance tags; this crate never owns or globalizes the sink.

pub mod cells;
mod chain;
mod dadda;
pub mod matrix;
mod wallace;

use std::fmt;
use std::str::FromStr;

use ctree_netlist::{Netlist, NodeId, PassMark, SignalId};

pub use cells::{CellBuilder, full_adder, half_adder};
pub use matrix::RankMatrix;

/// Reduction schedule selector.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Fold greedily toward the per-pass row target.
    Wallace,
    /// Fold lazily down the `2, 3, 4, 6, 9, ...` height ceilings.
    Dadda,
}

impl Strategy {
    /// Every selectable strategy.
    pub const ALL: [Strategy; 2] = [Strategy::Wallace, Strategy::Dadda];

    /// The canonical tag, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Wallace => "wallace",
            Strategy::Dadda => "dadda",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| s.eq_ignore_ascii_case(strategy.as_str()))
            .ok_or_else(|| UnknownStrategy { tag: s.to_owned() })
    }
}

/// Error for a strategy tag that names no known schedule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownStrategy {
    tag: String,
}

impl UnknownStrategy {
    /// The rejected tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown reduction strategy `{}`, expected `wallace` or `dadda`",
            self.tag
        )
    }
}

impl std::error::Error for UnknownStrategy {}

/// Reduces a rank matrix into a single sequence of output signals, low weight
/// first.
///
/// New cells are pushed into `netlist`, each stamped with `origin` and
/// `mark`. The sequence holds one signal per rank of the reduced matrix
/// (carries may have grown it past the input ranks), plus a final carry
/// whenever the reduction needed the closing adder; an empty matrix yields an
/// empty sequence.
pub fn reduce(
    strategy: Strategy,
    origin: NodeId,
    mark: PassMark,
    netlist: &mut Netlist,
    ranks: RankMatrix,
) -> Vec<SignalId> {
    let mut cells = CellBuilder::new(netlist, origin, mark);
    match strategy {
        Strategy::Wallace => wallace::run(&mut cells, ranks),
        Strategy::Dadda => dadda::run(&mut cells, ranks),
    }
}
