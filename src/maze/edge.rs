use super::CellId;

/// Index of an edge in the maze's edge arena.
pub type EdgeId = usize;

/// Weights are drawn uniformly from `0..MAX_EDGE_WEIGHT`.
pub const MAX_EDGE_WEIGHT: u32 = 30;

/// Undirected candidate edge between two grid-adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// The endpoint created first (the upper or left cell)
    pub from: CellId,
    /// The endpoint below or to the right of `from`
    pub to: CellId,
    pub weight: u32,
}

impl Edge {
    /// The endpoint opposite `cell`. `cell` is assumed to be one of the two
    /// endpoints; anything else gets `from`.
    pub fn other(&self, cell: CellId) -> CellId {
        if cell == self.from { self.to } else { self.from }
    }
}
