//! Errors raised by maze construction and traversal.
//!
//! Commands a user may legitimately issue at any time (moving into a wall,
//! picking a mode after the maze is solved) are not errors and never show up
//! here. What remains is either bad configuration, rejected before anything is
//! built, or a broken spanning-tree invariant, which callers should treat as
//! fatal.

use thiserror::Error;

use crate::maze::CellId;

/// Errors raised while generating or searching a maze.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// One of the requested dimensions is zero.
    #[error("maze dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested number of columns.
        width: u16,
        /// Requested number of rows.
        height: u16,
    },
    /// Kruskal ran out of candidate edges before the tree spanned every cell.
    #[error("spanning tree selected {selected} edges, expected {expected}")]
    DisconnectedGrid {
        /// Number of edges selected when the candidates ran out.
        selected: usize,
        /// Number of edges a spanning tree of the grid must have.
        expected: usize,
    },
    /// The automated search emptied its frontier without reaching the goal.
    #[error("search frontier exhausted before reaching the goal")]
    FrontierExhausted,
    /// A cell on the way back from the goal was never reached by the search.
    #[error("no came-from edge recorded for cell {cell}")]
    MissingCameFrom {
        /// The cell whose came-from edge is missing.
        cell: CellId,
    },
    /// Walking the came-from map visited more cells than the maze holds.
    #[error("came-from map contains a cycle")]
    PathCycle,
}

impl MazeError {
    /// Whether the error indicates a broken construction invariant rather than
    /// bad input.
    pub fn is_internal(&self) -> bool {
        !matches!(self, MazeError::InvalidDimensions { .. })
    }
}
