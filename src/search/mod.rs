//! Step-wise traversal of a generated maze.
//!
//! Nothing here loops until done: every call does a bounded amount of work and
//! returns, and everything needed to resume lives in [`SearchState`]. The host
//! decides how often to call [`SearchState::step`].

mod frontier;
mod path;

use std::fmt;

use crate::{
    error::MazeError,
    maze::{CellId, Direction, EdgeId, Maze},
};
pub use frontier::{Frontier, InsertEnd};
pub use path::reconstruct;

/// How the maze is being traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    Bfs,
    Dfs,
    /// The user moves one cell at a time.
    Manual,
}

impl SearchMode {
    /// Frontier insertion end for this mode. Manual mode never touches the
    /// frontier.
    pub fn insert_end(self) -> InsertEnd {
        match self {
            SearchMode::Dfs => InsertEnd::Front,
            SearchMode::Bfs | SearchMode::Manual => InsertEnd::Back,
        }
    }

    pub fn is_automated(self) -> bool {
        !matches!(self, SearchMode::Manual)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Bfs => write!(f, "Breadth-First Search (BFS)"),
            SearchMode::Dfs => write!(f, "Depth-First Search (DFS)"),
            SearchMode::Manual => write!(f, "Manual"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// No mode selected yet.
    Idle,
    Searching(SearchMode),
    /// The goal was reached and the solution path is available.
    Solved,
}

/// Result of one automated step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not in an automated mode; nothing happened.
    Ignored,
    /// The cell was expanded and its tree neighbors pushed.
    Expanded(CellId),
    /// The cell had already been expanded; the pop was the only effect.
    Revisited(CellId),
    /// The goal was popped.
    Solved,
}

/// Result of a manual move command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not in manual mode; nothing happened.
    Ignored,
    /// The side in that direction is closed; nothing happened.
    Blocked,
    Moved(CellId),
    /// The move reached the goal.
    Solved,
}

/// Result of a mode selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// The mode is now active with fresh search state.
    Selected,
    /// The mode was already active; state kept as is.
    Unchanged,
    /// The maze is already solved.
    Ignored,
}

/// Search progress over one maze. Discarded whenever the maze is regenerated.
#[derive(Debug, Clone)]
pub struct SearchState {
    status: SearchStatus,
    start: CellId,
    goal: CellId,
    frontier: Frontier,
    /// Cells already expanded (automated) or stood on (manual)
    seen: Vec<bool>,
    /// Edge by which each cell was first reached
    came_from: Vec<Option<EdgeId>>,
    current: CellId,
    solution: Option<Vec<CellId>>,
    on_path: Vec<bool>,
    steps: usize,
}

impl SearchState {
    /// Idle state for `maze`, with only the start cell in the frontier.
    pub fn new(maze: &Maze) -> Self {
        let cell_count = maze.cells().len();
        let start = maze.start();
        SearchState {
            status: SearchStatus::Idle,
            start,
            goal: maze.goal(),
            frontier: Frontier::seeded(start, InsertEnd::Back),
            seen: vec![false; cell_count],
            came_from: vec![None; cell_count],
            current: start,
            solution: None,
            on_path: vec![false; cell_count],
            steps: 0,
        }
    }

    /// Activates `mode`.
    ///
    /// Ignored once solved. Selecting the mode that is already active keeps
    /// its progress; any other selection starts over from the start cell.
    pub fn select_mode(&mut self, maze: &Maze, mode: SearchMode) -> Result<ModeChange, MazeError> {
        match self.status {
            SearchStatus::Solved => return Ok(ModeChange::Ignored),
            SearchStatus::Searching(active) if active == mode => {
                return Ok(ModeChange::Unchanged);
            }
            SearchStatus::Searching(active) => {
                tracing::debug!("[search] switching from {} to {}, starting over", active, mode);
                *self = SearchState::new(maze);
            }
            SearchStatus::Idle => {}
        }

        self.frontier.set_insert_end(mode.insert_end());
        self.status = SearchStatus::Searching(mode);
        tracing::debug!("[search] selected {}", mode);

        // A one-cell maze starts on its goal
        if mode == SearchMode::Manual && self.current == self.goal {
            self.seen[self.current] = true;
            self.solve(maze)?;
        }
        Ok(ModeChange::Selected)
    }

    /// Pops one cell off the frontier and expands it.
    ///
    /// Only acts while an automated mode is searching. An empty frontier means
    /// the maze was not a spanning tree and is reported as
    /// [`MazeError::FrontierExhausted`].
    pub fn step(&mut self, maze: &Maze) -> Result<StepOutcome, MazeError> {
        match self.status {
            SearchStatus::Searching(mode) if mode.is_automated() => {}
            _ => return Ok(StepOutcome::Ignored),
        }

        let cell = self.frontier.pop().ok_or(MazeError::FrontierExhausted)?;
        self.steps += 1;

        if cell == self.goal {
            self.current = cell;
            self.seen[cell] = true;
            self.solve(maze)?;
            return Ok(StepOutcome::Solved);
        }

        if self.seen[cell] {
            tracing::trace!("[search] cell {} already expanded", cell);
            return Ok(StepOutcome::Revisited(cell));
        }

        for (edge, neighbor) in maze.tree_neighbors(cell) {
            self.frontier.insert(neighbor);
            // First discovery wins
            if !self.seen[neighbor] && self.came_from[neighbor].is_none() {
                self.came_from[neighbor] = Some(edge);
            }
        }
        self.seen[cell] = true;
        self.current = cell;
        tracing::trace!(
            "[search] expanded cell {}, frontier holds {}",
            cell,
            self.frontier.len()
        );
        Ok(StepOutcome::Expanded(cell))
    }

    /// Moves the current cell one step in `direction` if that side is open.
    ///
    /// Only acts in manual mode. A closed side leaves everything untouched.
    pub fn move_current(
        &mut self,
        maze: &Maze,
        direction: Direction,
    ) -> Result<MoveOutcome, MazeError> {
        if self.status != SearchStatus::Searching(SearchMode::Manual) {
            return Ok(MoveOutcome::Ignored);
        }

        let here = self.current;
        let is_open = maze
            .cell(here)
            .is_some_and(|cell| cell.openings.is_open(direction));
        let target = maze
            .neighbor(here, direction)
            .and_then(|there| Some((there, maze.tree_edge_between(here, there)?)));
        let (there, edge) = match target {
            Some(target) if is_open => target,
            _ => {
                tracing::trace!("[search] blocked moving {} from cell {}", direction, here);
                return Ok(MoveOutcome::Blocked);
            }
        };

        if !self.seen[there] && self.came_from[there].is_none() {
            self.came_from[there] = Some(edge);
        }
        self.seen[here] = true;
        self.seen[there] = true;
        self.current = there;
        self.steps += 1;

        if there == self.goal {
            self.solve(maze)?;
            return Ok(MoveOutcome::Solved);
        }
        Ok(MoveOutcome::Moved(there))
    }

    /// Reconstructs the solution path and enters `Solved`. Runs once.
    fn solve(&mut self, maze: &Maze) -> Result<(), MazeError> {
        let path = reconstruct(maze, &self.came_from, self.start, self.goal)?;
        for &cell in &path {
            self.on_path[cell] = true;
        }
        tracing::info!(
            "[search] solved after {} steps, path length {}",
            self.steps,
            path.len()
        );
        self.solution = Some(path);
        self.status = SearchStatus::Solved;
        Ok(())
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// The mode being searched, if any.
    pub fn mode(&self) -> Option<SearchMode> {
        match self.status {
            SearchStatus::Searching(mode) => Some(mode),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }

    /// Cells from start to goal, once solved.
    pub fn solution_path(&self) -> Option<&[CellId]> {
        self.solution.as_deref()
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn current(&self) -> CellId {
        self.current
    }

    pub fn is_seen(&self, cell: CellId) -> bool {
        self.seen.get(cell).copied().unwrap_or(false)
    }

    pub fn is_on_path(&self, cell: CellId) -> bool {
        self.on_path.get(cell).copied().unwrap_or(false)
    }

    pub fn came_from(&self, cell: CellId) -> Option<EdgeId> {
        self.came_from.get(cell).copied().flatten()
    }

    pub fn seen_count(&self) -> usize {
        self.seen.iter().filter(|&&seen| seen).count()
    }

    /// Frontier pops (automated) or accepted moves (manual) so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Dimensions;
    use rstest::rstest;

    /// 2x2 maze whose tree is 0-1, 1-3, 2-3:
    ///
    /// ```text
    /// 0 - 1
    ///     |
    /// 2 - 3
    /// ```
    fn two_by_two() -> Maze {
        Maze::from_weights(Dimensions::new(2, 2).unwrap(), &[20, 1, 2, 5]).unwrap()
    }

    /// 3x1 corridor 0 - 1 - 2.
    fn corridor() -> Maze {
        Maze::from_weights(Dimensions::new(3, 1).unwrap(), &[]).unwrap()
    }

    fn run_to_completion(state: &mut SearchState, maze: &Maze) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        while !state.is_solved() {
            outcomes.push(state.step(maze).unwrap());
            assert!(outcomes.len() <= 64, "search did not terminate");
        }
        outcomes
    }

    #[test]
    fn test_new_state_is_idle_with_start_in_frontier() {
        let maze = two_by_two();
        let state = SearchState::new(&maze);
        assert_eq!(state.status(), SearchStatus::Idle);
        assert_eq!(state.frontier().iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(state.seen_count(), 0);
        assert_eq!(state.current(), 0);
        assert_eq!(state.solution_path(), None);
    }

    #[test]
    fn test_empty_frontier_mid_search_is_an_error() {
        let maze = two_by_two();
        let mut state = SearchState::new(&maze);
        state.select_mode(&maze, SearchMode::Bfs).unwrap();
        // Only a maze that is not a spanning tree can drain the frontier
        state.frontier = Frontier::new(InsertEnd::Back);
        assert_eq!(state.step(&maze), Err(MazeError::FrontierExhausted));
        assert_eq!(state.steps(), 0);
        assert!(!state.is_solved());
    }

    #[test]
    fn test_step_is_ignored_while_idle() {
        let maze = two_by_two();
        let mut state = SearchState::new(&maze);
        assert_eq!(state.step(&maze), Ok(StepOutcome::Ignored));
        assert_eq!(state.frontier().len(), 1);
        assert_eq!(state.steps(), 0);
    }

    #[test]
    fn test_bfs_expansion_order() {
        let maze = two_by_two();
        let mut state = SearchState::new(&maze);
        state.select_mode(&maze, SearchMode::Bfs).unwrap();
        let outcomes = run_to_completion(&mut state, &maze);
        assert_eq!(
            outcomes,
            vec![
                StepOutcome::Expanded(0),
                StepOutcome::Expanded(1),
                // 1 pushed 0 back before 3
                StepOutcome::Revisited(0),
                StepOutcome::Solved,
            ]
        );
        assert_eq!(state.solution_path(), Some(&[0, 1, 3][..]));
        assert!(state.is_on_path(1));
        assert!(!state.is_on_path(2));
        assert!(state.is_seen(3));
    }

    #[test]
    fn test_dfs_expansion_order() {
        let maze = two_by_two();
        let mut state = SearchState::new(&maze);
        state.select_mode(&maze, SearchMode::Dfs).unwrap();
        assert_eq!(state.frontier().insert_end(), InsertEnd::Front);
        let outcomes = run_to_completion(&mut state, &maze);
        // Cell 1 pushes 0 then 3 at the front, so 3 comes out first
        assert_eq!(
            outcomes,
            vec![
                StepOutcome::Expanded(0),
                StepOutcome::Expanded(1),
                StepOutcome::Solved
            ]
        );
        assert_eq!(state.solution_path(), Some(&[0, 1, 3][..]));
    }

    #[test]
    fn test_first_discovery_keeps_came_from() {
        let maze = two_by_two();
        let mut state = SearchState::new(&maze);
        state.select_mode(&maze, SearchMode::Bfs).unwrap();
        state.step(&maze).unwrap();
        assert_eq!(state.came_from(1), Some(1));
        state.step(&maze).unwrap();
        // Expanding 1 rediscovers 0, which is seen and keeps no came-from edge
        assert_eq!(state.came_from(0), None);
        assert_eq!(state.came_from(1), Some(1));
        assert_eq!(state.came_from(3), Some(2));
    }

    #[test]
    fn test_step_after_solved_is_ignored() {
        let maze = corridor();
        let mut state = SearchState::new(&maze);
        state.select_mode(&maze, SearchMode::Bfs).unwrap();
        run_to_completion(&mut state, &maze);
        let steps = state.steps();
        assert_eq!(state.step(&maze), Ok(StepOutcome::Ignored));
        assert_eq!(state.steps(), steps);
    }

    #[test]
    fn test_mode_selection_after_solved_is_ignored() {
        let maze = corridor();
        let mut state = SearchState::new(&maze);
        state.select_mode(&maze, SearchMode::Dfs).unwrap();
        run_to_completion(&mut state, &maze);
        assert_eq!(
            state.select_mode(&maze, SearchMode::Bfs),
            Ok(ModeChange::Ignored)
        );
        assert_eq!(state.status(), SearchStatus::Solved);
    }

    #[rstest]
    #[case(SearchMode::Bfs)]
    #[case(SearchMode::Dfs)]
    #[case(SearchMode::Manual)]
    fn test_reselecting_active_mode_keeps_progress(#[case] mode: SearchMode) {
        let maze = two_by_two();
        let mut state = SearchState::new(&maze);
        assert_eq!(state.select_mode(&maze, mode), Ok(ModeChange::Selected));
        state.step(&maze).unwrap();
        state.move_current(&maze, Direction::Right).unwrap();
        let seen = state.seen_count();
        assert_eq!(state.select_mode(&maze, mode), Ok(ModeChange::Unchanged));
        assert_eq!(state.seen_count(), seen);
        assert_eq!(state.mode(), Some(mode));
    }

    #[test]
    fn test_switching_mode_starts_over() {
        let maze = two_by_two();
        let mut state = SearchState::new(&maze);
        state.select_mode(&maze, SearchMode::Bfs).unwrap();
        state.step(&maze).unwrap();
        state.step(&maze).unwrap();
        assert_eq!(
            state.select_mode(&maze, SearchMode::Dfs),
            Ok(ModeChange::Selected)
        );
        assert_eq!(state.frontier().iter().collect::<Vec<_>>(), vec![0]);
        assert_eq!(state.seen_count(), 0);
        assert_eq!(state.steps(), 0);
    }

    #[test]
    fn test_manual_moves_follow_openings() {
        let maze = two_by_two();
        let mut state = SearchState::new(&maze);
        state.select_mode(&maze, SearchMode::Manual).unwrap();

        // 0-2 is a wall
        assert_eq!(
            state.move_current(&maze, Direction::Down),
            Ok(MoveOutcome::Blocked)
        );
        assert_eq!(state.current(), 0);
        assert_eq!(state.seen_count(), 0);

        assert_eq!(
            state.move_current(&maze, Direction::Right),
            Ok(MoveOutcome::Moved(1))
        );
        assert!(state.is_seen(0));
        assert!(state.is_seen(1));
        assert_eq!(state.came_from(1), Some(1));

        assert_eq!(
            state.move_current(&maze, Direction::Down),
            Ok(MoveOutcome::Solved)
        );
        assert!(state.is_solved());
        assert_eq!(state.solution_path(), Some(&[0, 1, 3][..]));
        assert_eq!(
            state.move_current(&maze, Direction::Left),
            Ok(MoveOutcome::Ignored)
        );
    }

    #[test]
    fn test_manual_backtracking_keeps_first_came_from() {
        let maze = corridor();
        let mut state = SearchState::new(&maze);
        state.select_mode(&maze, SearchMode::Manual).unwrap();
        state.move_current(&maze, Direction::Right).unwrap();
        state.move_current(&maze, Direction::Left).unwrap();
        assert_eq!(state.current(), 0);
        assert_eq!(state.came_from(0), None);
        state.move_current(&maze, Direction::Right).unwrap();
        assert_eq!(
            state.move_current(&maze, Direction::Right),
            Ok(MoveOutcome::Solved)
        );
        assert_eq!(state.solution_path(), Some(&[0, 1, 2][..]));
    }

    #[test]
    fn test_moves_ignored_outside_manual_mode() {
        let maze = corridor();
        let mut state = SearchState::new(&maze);
        assert_eq!(
            state.move_current(&maze, Direction::Right),
            Ok(MoveOutcome::Ignored)
        );
        state.select_mode(&maze, SearchMode::Bfs).unwrap();
        assert_eq!(
            state.move_current(&maze, Direction::Right),
            Ok(MoveOutcome::Ignored)
        );
        assert_eq!(state.current(), 0);
    }

    #[rstest]
    #[case(SearchMode::Bfs)]
    #[case(SearchMode::Dfs)]
    fn test_single_cell_solves_on_first_step(#[case] mode: SearchMode) {
        let maze = Maze::from_weights(Dimensions::new(1, 1).unwrap(), &[]).unwrap();
        let mut state = SearchState::new(&maze);
        state.select_mode(&maze, mode).unwrap();
        assert_eq!(state.step(&maze), Ok(StepOutcome::Solved));
        assert_eq!(state.solution_path(), Some(&[0][..]));
    }

    #[test]
    fn test_single_cell_manual_solves_on_selection() {
        let maze = Maze::from_weights(Dimensions::new(1, 1).unwrap(), &[]).unwrap();
        let mut state = SearchState::new(&maze);
        assert_eq!(
            state.select_mode(&maze, SearchMode::Manual),
            Ok(ModeChange::Selected)
        );
        assert!(state.is_solved());
        assert_eq!(state.solution_path(), Some(&[0][..]));
    }
}
