use std::fmt;

use super::EdgeId;

/// Index of a cell in row-major order: `row * width + col`.
pub type CellId = usize;

/// One of the four cardinal directions a cell can open towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Grid offset `(dx, dy)` of a one-unit step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction of a unit grid offset, or `None` for anything that is not
    /// exactly one step along exactly one axis.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Which sides of a cell are passable in the spanning tree.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Openings {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Openings {
    pub fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.top,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn open(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.top = true,
            Direction::Down => self.bottom = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
    }

    /// Number of open sides.
    pub fn count(&self) -> usize {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.is_open(d))
            .count()
    }
}

/// A cell of the grid graph. Structural only: search progress lives in the
/// search state, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Column, 0-indexed from the left
    pub col: u16,
    /// Row, 0-indexed from the top
    pub row: u16,
    /// Sides open in the spanning tree
    pub openings: Openings,
    /// Every candidate edge touching this cell, in creation order
    pub(crate) edges: Vec<EdgeId>,
}

impl Cell {
    pub(crate) fn new(col: u16, row: u16) -> Self {
        Cell {
            col,
            row,
            openings: Openings::default(),
            edges: Vec::with_capacity(4),
        }
    }

    /// Incident candidate edges. Only some of them are in the spanning tree.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Direction from this cell to `other`, if the two are grid-adjacent.
    pub fn direction_to(&self, other: &Cell) -> Option<Direction> {
        let dx = i32::from(other.col) - i32::from(self.col);
        let dy = i32::from(other.row) - i32::from(self.row);
        Direction::from_offset(dx, dy)
    }
}
