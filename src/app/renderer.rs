use std::{fmt, io::Write};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{search::SearchMode, session::Session};

/// What to draw at one position of the glyph grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Empty,
    Seen,
    Path,
    Start,
    Goal,
    Current,
}

impl Glyph {
    /// The width of each glyph when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Wall => "⬜".with(Color::White),
            Glyph::Empty => "  ".with(Color::Reset),
            Glyph::Seen => "* ".with(Color::Blue),
            Glyph::Path => "🟨".with(Color::Yellow),
            Glyph::Start => "🟩".with(Color::Green),
            Glyph::Goal => "🟪".with(Color::Magenta),
            Glyph::Current => "🟦".with(Color::Cyan),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Glyph::CELL_WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Number of terminal rows the status panel takes below the maze.
pub const STATUS_ROWS: u16 = 7;

/// Lays the session out on a (2W+1)×(2H+1) grid: cells at odd coordinates,
/// the passages between them at mixed parity, wall corners at even ones.
pub fn glyph_grid(session: &Session) -> Vec<Vec<Glyph>> {
    let maze = session.maze();
    let grid_width = maze.width() as usize * 2 + 1;
    let grid_height = maze.height() as usize * 2 + 1;
    let mut grid = vec![vec![Glyph::Wall; grid_width]; grid_height];

    for (id, cell) in maze.cells().iter().enumerate() {
        let Some(state) = session.cell_state(id) else {
            continue;
        };
        let (x, y) = (cell.col as usize * 2 + 1, cell.row as usize * 2 + 1);
        grid[y][x] = if state.current {
            Glyph::Current
        } else if id == session.start() {
            Glyph::Start
        } else if id == session.goal() {
            Glyph::Goal
        } else if state.on_path {
            Glyph::Path
        } else if state.seen {
            Glyph::Seen
        } else {
            Glyph::Empty
        };

        // Passages right of and below the cell, colored by the cells they join
        let passages = [
            (state.openings.right, (x + 1, y), maze.id_of((cell.col + 1, cell.row))),
            (state.openings.bottom, (x, y + 1), maze.id_of((cell.col, cell.row + 1))),
        ];
        for (open, (px, py), other) in passages {
            let Some(other) = other.and_then(|id| session.cell_state(id)).filter(|_| open) else {
                continue;
            };
            grid[py][px] = if state.on_path && other.on_path {
                Glyph::Path
            } else if state.seen && other.seen {
                Glyph::Seen
            } else {
                Glyph::Empty
            };
        }
    }
    grid
}

/// Controls and progress shown below the maze.
pub fn status_lines(session: &Session) -> Vec<(String, bool)> {
    let mode = session.mode();
    vec![
        (
            "Press 1 for breadth-first search".to_string(),
            mode == Some(SearchMode::Bfs),
        ),
        (
            "Press 2 for depth-first search".to_string(),
            mode == Some(SearchMode::Dfs),
        ),
        (
            "Press 3 or arrow keys for manual control".to_string(),
            mode == Some(SearchMode::Manual),
        ),
        ("Press r for a new maze, Esc to exit".to_string(), false),
        (format!("Steps: {}", session.steps()), false),
        (
            format!("Maze solved?: {}", session.is_solved()),
            session.is_solved(),
        ),
    ]
}

/// Draws the whole session from the top-left corner of the screen.
pub fn draw<W: Write>(out: &mut W, session: &Session, term_width: u16) -> std::io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0))?;
    for row in glyph_grid(session) {
        for glyph in row {
            queue!(out, style::Print(glyph))?;
        }
        queue!(out, style::Print("\r\n"))?;
    }

    for (line, highlighted) in status_lines(session) {
        let (line, _) = line.unicode_truncate(term_width as usize);
        let styled = if highlighted {
            line.with(Color::Green).attribute(Attribute::Bold)
        } else {
            line.with(Color::Cyan)
        };
        queue!(
            out,
            terminal::Clear(ClearType::CurrentLine),
            style::PrintStyledContent(styled),
            style::Print("\r\n")
        )?;
    }
    out.flush()
}
