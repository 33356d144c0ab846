//! One independent maze session: the maze, its search state and the random
//! source used to regenerate it. All commands go through a [`Session`] value;
//! there is no shared global state.

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    error::MazeError,
    maze::{CellId, Dimensions, Direction, Maze, Openings},
    search::{
        Frontier, ModeChange, MoveOutcome, SearchMode, SearchState, SearchStatus, StepOutcome,
    },
};

/// Everything a renderer needs to draw one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellState {
    pub openings: Openings,
    pub seen: bool,
    pub current: bool,
    pub on_path: bool,
}

pub struct Session {
    maze: Maze,
    search: SearchState,
    rng: StdRng,
}

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

impl Session {
    /// Builds a `width`×`height` maze and an idle search over it.
    ///
    /// The same `seed` always produces the same sequence of mazes across
    /// regenerations.
    pub fn generate(width: u16, height: u16, seed: Option<u64>) -> Result<Self, MazeError> {
        let dims = Dimensions::new(width, height)?;
        let mut rng = get_rng(seed);
        let maze = Maze::generate(dims, &mut rng)?;
        tracing::info!(
            "[session] generated {}x{} maze (seed {:?}), {} tree edges",
            width,
            height,
            seed,
            maze.tree().len()
        );
        Ok(Session::from_parts(maze, rng))
    }

    /// Wraps an already built maze, e.g. one made with
    /// [`Maze::from_weights`]. Regeneration draws from `seed`.
    pub fn from_maze(maze: Maze, seed: Option<u64>) -> Self {
        Session::from_parts(maze, get_rng(seed))
    }

    fn from_parts(maze: Maze, rng: StdRng) -> Self {
        let search = SearchState::new(&maze);
        Session { maze, search, rng }
    }

    /// Replaces the maze with a fresh one of the same size and discards any
    /// search in progress. On failure the session is left as it was.
    pub fn regenerate(&mut self) -> Result<(), MazeError> {
        let maze = Maze::generate(self.maze.dims(), &mut self.rng)?;
        let search = SearchState::new(&maze);
        self.maze = maze;
        self.search = search;
        tracing::debug!(
            "[session] regenerated {}x{} maze",
            self.maze.width(),
            self.maze.height()
        );
        Ok(())
    }

    pub fn select_mode(&mut self, mode: SearchMode) -> Result<ModeChange, MazeError> {
        self.search.select_mode(&self.maze, mode)
    }

    /// Advances an automated search by one frontier pop.
    pub fn step(&mut self) -> Result<StepOutcome, MazeError> {
        self.search.step(&self.maze)
    }

    /// Moves the current cell in manual mode.
    pub fn move_current(&mut self, direction: Direction) -> Result<MoveOutcome, MazeError> {
        self.search.move_current(&self.maze, direction)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn state(&self) -> SearchStatus {
        self.search.status()
    }

    pub fn mode(&self) -> Option<SearchMode> {
        self.search.mode()
    }

    pub fn is_solved(&self) -> bool {
        self.search.is_solved()
    }

    pub fn solution_path(&self) -> Option<&[CellId]> {
        self.search.solution_path()
    }

    pub fn frontier(&self) -> &Frontier {
        self.search.frontier()
    }

    pub fn start(&self) -> CellId {
        self.maze.start()
    }

    pub fn goal(&self) -> CellId {
        self.maze.goal()
    }

    pub fn steps(&self) -> usize {
        self.search.steps()
    }

    pub fn cell_state(&self, id: CellId) -> Option<CellState> {
        let cell = self.maze.cell(id)?;
        Some(CellState {
            openings: cell.openings,
            seen: self.search.is_seen(id),
            current: self.search.current() == id,
            on_path: self.search.is_on_path(id),
        })
    }

    pub fn cell_state_at(&self, col: u16, row: u16) -> Option<CellState> {
        self.cell_state(self.maze.id_of((col, row))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_rejects_zero_dimension() {
        assert!(matches!(
            Session::generate(0, 4, Some(1)),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 4
            })
        ));
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = Session::generate(6, 5, Some(42)).unwrap();
        let b = Session::generate(6, 5, Some(42)).unwrap();
        assert_eq!(a.maze().tree().edges(), b.maze().tree().edges());
        assert_eq!(a.maze().edges(), b.maze().edges());
    }

    #[test]
    fn test_regenerate_keeps_dimensions_and_resets_search() {
        let mut session = Session::generate(5, 3, Some(3)).unwrap();
        session.select_mode(SearchMode::Bfs).unwrap();
        session.step().unwrap();
        session.regenerate().unwrap();
        assert_eq!(session.maze().width(), 5);
        assert_eq!(session.maze().height(), 3);
        assert_eq!(session.state(), SearchStatus::Idle);
        assert_eq!(session.steps(), 0);
    }

    #[test]
    fn test_cell_state_reports_current_and_openings() {
        let maze = Maze::from_weights(Dimensions::new(2, 2).unwrap(), &[20, 1, 2, 5]).unwrap();
        let session = Session::from_maze(maze, Some(0));
        let start = session.cell_state_at(0, 0).unwrap();
        assert!(start.current);
        assert!(!start.seen);
        assert!(start.openings.right);
        assert_eq!(session.cell_state_at(2, 0), None);
        assert!(!session.cell_state(3).unwrap().current);
    }
}
