use std::collections::VecDeque;

use crate::maze::CellId;

/// Which end of the frontier newly discovered cells go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEnd {
    /// Queue behaviour: breadth-first.
    Back,
    /// Stack behaviour: depth-first.
    Front,
}

/// Work list of cells waiting to be expanded. Cells are always taken from
/// the front; only the insertion end differs between search strategies.
#[derive(Debug, Clone)]
pub struct Frontier {
    cells: VecDeque<CellId>,
    insert_end: InsertEnd,
}

impl Frontier {
    pub fn new(insert_end: InsertEnd) -> Self {
        Frontier {
            cells: VecDeque::new(),
            insert_end,
        }
    }

    /// A frontier holding only `cell`.
    pub fn seeded(cell: CellId, insert_end: InsertEnd) -> Self {
        let mut frontier = Frontier::new(insert_end);
        frontier.cells.push_back(cell);
        frontier
    }

    pub fn insert(&mut self, cell: CellId) {
        match self.insert_end {
            InsertEnd::Back => self.cells.push_back(cell),
            InsertEnd::Front => self.cells.push_front(cell),
        }
    }

    pub fn pop(&mut self) -> Option<CellId> {
        self.cells.pop_front()
    }

    pub fn insert_end(&self) -> InsertEnd {
        self.insert_end
    }

    pub fn set_insert_end(&mut self, insert_end: InsertEnd) {
        self.insert_end = insert_end;
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().copied()
    }
}
