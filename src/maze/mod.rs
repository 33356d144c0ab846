pub mod cell;
pub mod edge;
pub mod kruskal;
pub mod union_find;

use rand::Rng;

use crate::error::MazeError;
pub use cell::{Cell, CellId, Direction, Openings};
pub use edge::{Edge, EdgeId, MAX_EDGE_WEIGHT};
use kruskal::{SpanningTree, randomized_kruskal};

/// Validated maze dimensions, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    width: u16,
    height: u16,
}

impl Dimensions {
    /// Rejects a zero width or height.
    pub fn new(width: u16, height: u16) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        Ok(Dimensions { width, height })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        // u16 * u16 always fits in a usize of at least 32 bits
        self.width as usize * self.height as usize
    }

    /// Size of the full candidate edge set: every grid adjacency, once.
    pub fn candidate_edge_count(&self) -> usize {
        let (w, h) = (self.width as usize, self.height as usize);
        w * (h - 1) + (w - 1) * h
    }
}

/// A perfect maze: the W×H grid graph, every candidate edge with its random
/// weight, and the spanning tree Kruskal selected from them.
///
/// Cells and edges live in two arenas; edges refer to cells by [`CellId`] and
/// cells list their incident edges by [`EdgeId`].
#[derive(Debug, Clone)]
pub struct Maze {
    dims: Dimensions,
    cells: Box<[Cell]>,
    edges: Box<[Edge]>,
    tree: SpanningTree,
}

impl Maze {
    /// Generates a maze with edge weights drawn uniformly from
    /// `0..MAX_EDGE_WEIGHT`.
    pub fn generate<R: Rng>(dims: Dimensions, rng: &mut R) -> Result<Self, MazeError> {
        Maze::build(dims, || rng.random_range(0..MAX_EDGE_WEIGHT))
    }

    /// Builds a maze from explicit weights, consumed in edge creation order:
    /// for each cell in row-major order, its downward edge, then its rightward
    /// edge. Missing weights count as zero.
    pub fn from_weights(dims: Dimensions, weights: &[u32]) -> Result<Self, MazeError> {
        let mut weights = weights.iter().copied();
        Maze::build(dims, move || weights.next().unwrap_or(0))
    }

    fn build(dims: Dimensions, mut next_weight: impl FnMut() -> u32) -> Result<Self, MazeError> {
        let width = dims.width as usize;
        let cell_count = dims.cell_count();

        let mut cells: Vec<Cell> = (0..dims.height)
            .flat_map(|row| (0..dims.width).map(move |col| Cell::new(col, row)))
            .collect();

        let mut edges = Vec::with_capacity(dims.candidate_edge_count());
        for id in 0..cell_count {
            // Not in the last row: edge to the cell below
            if id + width < cell_count {
                Maze::link(&mut cells, &mut edges, id, id + width, next_weight());
            }
            // Not in the last column: edge to the cell on the right
            if id % width < width - 1 {
                Maze::link(&mut cells, &mut edges, id, id + 1, next_weight());
            }
        }

        let tree = randomized_kruskal(cell_count, &edges)?;
        let mut maze = Maze {
            dims,
            cells: cells.into_boxed_slice(),
            edges: edges.into_boxed_slice(),
            tree,
        };
        maze.derive_openings();
        Ok(maze)
    }

    /// Creates an edge and registers it on both endpoints.
    fn link(cells: &mut [Cell], edges: &mut Vec<Edge>, from: CellId, to: CellId, weight: u32) {
        let id = edges.len();
        edges.push(Edge { from, to, weight });
        cells[from].edges.push(id);
        cells[to].edges.push(id);
    }

    /// Opens each side of a cell that a tree edge crosses.
    fn derive_openings(&mut self) {
        for &edge_id in self.tree.edges() {
            let edge = self.edges[edge_id];
            for (here, there) in [(edge.from, edge.to), (edge.to, edge.from)] {
                // Edges only join grid-adjacent cells, so the offset is always a unit step
                if let Some(direction) = self.cells[here].direction_to(&self.cells[there]) {
                    self.cells[here].openings.open(direction);
                }
            }
        }
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> u16 {
        self.dims.width
    }

    pub fn height(&self) -> u16 {
        self.dims.height
    }

    /// The top-left cell.
    pub fn start(&self) -> CellId {
        0
    }

    /// The bottom-right cell.
    pub fn goal(&self) -> CellId {
        self.cells.len() - 1
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn tree(&self) -> &SpanningTree {
        &self.tree
    }

    pub fn is_in_bounds(&self, coord: (u16, u16)) -> bool {
        coord.0 < self.dims.width && coord.1 < self.dims.height
    }

    /// Row-major index of `(col, row)`, if in bounds.
    pub fn id_of(&self, coord: (u16, u16)) -> Option<CellId> {
        self.is_in_bounds(coord)
            .then(|| coord.1 as usize * self.dims.width as usize + coord.0 as usize)
    }

    /// The cell one step from `id` in `direction`, if that step stays on the
    /// grid. Says nothing about walls.
    pub fn neighbor(&self, id: CellId, direction: Direction) -> Option<CellId> {
        let cell = self.cells.get(id)?;
        let (dx, dy) = direction.offset();
        let col = u16::try_from(i32::from(cell.col) + dx).ok()?;
        let row = u16::try_from(i32::from(cell.row) + dy).ok()?;
        self.id_of((col, row))
    }

    /// Tree edges incident to `id` with the cell at their other end, in the
    /// cell's edge order.
    pub fn tree_neighbors(&self, id: CellId) -> impl Iterator<Item = (EdgeId, CellId)> + '_ {
        self.cells
            .get(id)
            .map(|cell| cell.edges.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(|&&edge_id| self.tree.contains(edge_id))
            .map(move |&edge_id| (edge_id, self.edges[edge_id].other(id)))
    }

    /// The tree edge between `a` and `b`, if they are connected by one.
    pub fn tree_edge_between(&self, a: CellId, b: CellId) -> Option<EdgeId> {
        self.tree_neighbors(a)
            .find(|&(_, other)| other == b)
            .map(|(edge_id, _)| edge_id)
    }
}

impl std::ops::Index<(u16, u16)> for Maze {
    type Output = Cell;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        let (col, row) = index;
        &self.cells[row as usize * self.dims.width as usize + col as usize]
    }
}
