pub mod app;
pub mod error;
pub mod logging;
pub mod maze;
pub mod search;
pub mod session;

pub use error::MazeError;
pub use maze::{CellId, Direction, Maze};
pub use search::{ModeChange, MoveOutcome, SearchMode, SearchStatus, StepOutcome};
pub use session::{CellState, Session};
