//! The rank matrix.

use ctree_netlist::SignalId;

/// Column-indexed working set for compressor reduction.
///
/// Rank `i` holds the signals of binary weight `2^i`. Signals are always
/// taken from the end of a rank, so the inputs any cell receives are a pure
/// function of insertion order.
#[derive(Clone, Debug, Default)]
pub struct RankMatrix {
    ranks: Vec<Vec<SignalId>>,
}

impl RankMatrix {
    /// Constructs an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a matrix from weight-indexed columns, lowest weight first.
    pub fn from_columns(columns: Vec<Vec<SignalId>>) -> Self {
        Self { ranks: columns }
    }

    /// The number of ranks, trailing empty ranks included.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether the matrix holds no ranks at all.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Appends a signal to the rank of weight `2^weight`, growing the matrix
    /// as needed.
    pub fn push_signal(&mut self, weight: usize, signal: SignalId) {
        if self.ranks.len() <= weight {
            self.ranks.resize_with(weight + 1, Vec::new);
        }
        self.ranks[weight].push(signal);
    }

    /// Height of rank `i`.
    pub fn height(&self, i: usize) -> usize {
        self.ranks[i].len()
    }

    /// The signals currently sitting in rank `i`, oldest first.
    pub fn rank(&self, i: usize) -> &[SignalId] {
        &self.ranks[i]
    }

    /// Height of the tallest rank, zero for an empty matrix.
    pub fn max_height(&self) -> usize {
        self.ranks.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether every rank is already at height two or less.
    pub fn is_reduced(&self) -> bool {
        self.max_height() <= 2
    }

    /// Takes the most recent signal out of rank `i`.
    pub(crate) fn pop(&mut self, i: usize) -> Option<SignalId> {
        self.ranks[i].pop()
    }

    /// Takes the two most recent signals out of rank `i`.
    ///
    /// # Panics
    ///
    /// If the rank holds fewer than two signals.
    pub(crate) fn take2(&mut self, i: usize) -> [SignalId; 2] {
        let a = self.ranks[i].pop().expect("matrix: rank underflow");
        let b = self.ranks[i].pop().expect("matrix: rank underflow");
        [a, b]
    }

    /// Takes the three most recent signals out of rank `i`.
    ///
    /// # Panics
    ///
    /// If the rank holds fewer than three signals.
    pub(crate) fn take3(&mut self, i: usize) -> [SignalId; 3] {
        let a = self.ranks[i].pop().expect("matrix: rank underflow");
        let b = self.ranks[i].pop().expect("matrix: rank underflow");
        let c = self.ranks[i].pop().expect("matrix: rank underflow");
        [a, b, c]
    }

    /// Merges a finished pass's rows back in and returns the new tallest
    /// height.
    ///
    /// Row `i` extends rank `i`; a non-empty row one past the current end
    /// becomes a new rank.
    pub(crate) fn absorb(&mut self, pending: PendingRows) -> usize {
        for (i, row) in pending.rows.into_iter().enumerate() {
            if row.is_empty() {
                continue;
            }
            if i < self.ranks.len() {
                self.ranks[i].extend(row);
            } else {
                debug_assert_eq!(i, self.ranks.len());
                self.ranks.push(row);
            }
        }
        self.max_height()
    }
}

/// Sum and carry signals produced during one reduction pass.
///
/// They stay out of the live matrix until the pass finishes, so a signal
/// created in a pass is never consumed by the same pass.
#[derive(Debug, Default)]
pub(crate) struct PendingRows {
    rows: Vec<Vec<SignalId>>,
}

impl PendingRows {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn row_mut(&mut self, i: usize) -> &mut Vec<SignalId> {
        if self.rows.len() <= i {
            self.rows.resize_with(i + 1, Vec::new);
        }
        &mut self.rows[i]
    }

    /// Queues a sum signal for rank `i`.
    pub(crate) fn push_sum(&mut self, i: usize, signal: SignalId) {
        self.row_mut(i).push(signal);
    }

    /// Queues a carry signal for rank `i + 1`.
    pub(crate) fn push_carry(&mut self, i: usize, signal: SignalId) {
        self.row_mut(i + 1).push(signal);
    }
}
