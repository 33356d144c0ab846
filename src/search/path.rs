use crate::{
    error::MazeError,
    maze::{CellId, EdgeId, Maze},
};

/// Walks the came-from map back from `goal` to `start` and returns the cells
/// in start-to-goal order, both ends included.
///
/// Every cell on the way except `start` must have a came-from edge.
pub fn reconstruct(
    maze: &Maze,
    came_from: &[Option<EdgeId>],
    start: CellId,
    goal: CellId,
) -> Result<Vec<CellId>, MazeError> {
    let mut path = vec![goal];
    let mut cell = goal;
    while cell != start {
        let edge = came_from
            .get(cell)
            .copied()
            .flatten()
            .and_then(|id| maze.edge(id))
            .ok_or(MazeError::MissingCameFrom { cell })?;
        cell = edge.other(cell);
        path.push(cell);
        if path.len() > maze.cells().len() {
            return Err(MazeError::PathCycle);
        }
    }
    path.reverse();
    Ok(path)
}
