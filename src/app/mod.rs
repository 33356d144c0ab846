pub mod renderer;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, KeyCode},
    queue,
    terminal::{self, ClearType},
};
use thiserror::Error;

use crate::{
    error::MazeError,
    logging::LoggingError,
    maze::Direction,
    search::{MoveOutcome, SearchMode, SearchStatus, StepOutcome},
    session::Session,
};
use renderer::{Glyph, STATUS_ROWS};

/// Overrides the tick interval, in milliseconds.
pub const TICK_MS_ENV: &str = "MAZEWALK_TICK_MS";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error("invalid {name} `{value}`")]
    InvalidArgument { name: &'static str, value: String },
    #[error("terminal is too small to fit a maze")]
    TerminalTooSmall,
    #[error("a {width}x{height} maze does not fit the terminal (at most {max_width}x{max_height})")]
    TooLargeForTerminal {
        width: u16,
        height: u16,
        max_width: u16,
        max_height: u16,
    },
}

/// Runtime settings for the terminal app.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Time between two automated search steps
    pub tick_interval: Duration,
    /// Maze width in cells; fits the terminal when unset
    pub width: Option<u16>,
    /// Maze height in cells; fits the terminal when unset
    pub height: Option<u16>,
    /// Seed for maze generation; random when unset
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(30),
            width: None,
            height: None,
            seed: None,
        }
    }
}

fn parse_arg<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, AppError> {
    value.parse::<T>().map_err(|_| AppError::InvalidArgument {
        name,
        value: value.to_string(),
    })
}

impl AppConfig {
    /// Parses `[WIDTH HEIGHT [SEED]]`, with the executable name already
    /// skipped.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, AppError> {
        let args: Vec<String> = args.into_iter().collect();
        let mut config = AppConfig::default();
        match args.as_slice() {
            [] => {}
            [width] => {
                return Err(AppError::InvalidArgument {
                    name: "dimensions (expected WIDTH HEIGHT)",
                    value: width.clone(),
                });
            }
            [width, height, rest @ ..] => {
                config.width = Some(parse_arg("width", width)?);
                config.height = Some(parse_arg("height", height)?);
                match rest {
                    [] => {}
                    [seed] => config.seed = Some(parse_arg("seed", seed)?),
                    [_, extra, ..] => {
                        return Err(AppError::InvalidArgument {
                            name: "argument",
                            value: extra.clone(),
                        });
                    }
                }
            }
        }
        Ok(config)
    }

    /// Applies `MAZEWALK_TICK_MS` if set.
    pub fn with_env(self) -> Result<Self, AppError> {
        match std::env::var(TICK_MS_ENV) {
            Ok(raw) => self.with_tick_ms(&raw),
            Err(_) => Ok(self),
        }
    }

    fn with_tick_ms(mut self, raw: &str) -> Result<Self, AppError> {
        let millis: u64 = parse_arg("tick interval", raw.trim())?;
        self.tick_interval = Duration::from_millis(millis);
        Ok(self)
    }
}

/// A discrete command the host delivers to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Regenerate,
    Select(SearchMode),
    Move(Direction),
}

/// Maps a key to its command.
pub fn command_for_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Regenerate),
        KeyCode::Char('1') => Some(Command::Select(SearchMode::Bfs)),
        KeyCode::Char('2') => Some(Command::Select(SearchMode::Dfs)),
        KeyCode::Char('3') => Some(Command::Select(SearchMode::Manual)),
        KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        _ => None,
    }
}

/// Applies `command` to `session`. Returns `false` when the app should exit.
pub fn apply_command(session: &mut Session, command: Command) -> Result<bool, MazeError> {
    match command {
        Command::Quit => return Ok(false),
        Command::Regenerate => session.regenerate()?,
        Command::Select(mode) => {
            let change = session.select_mode(mode)?;
            tracing::debug!("[app loop] select {}: {:?}", mode, change);
        }
        Command::Move(direction) => {
            // Arrow keys take manual control until a mode has been picked
            if session.state() == SearchStatus::Idle {
                session.select_mode(SearchMode::Manual)?;
            }
            if let MoveOutcome::Solved = session.move_current(direction)? {
                tracing::info!("[app loop] goal reached manually");
            }
        }
    }
    Ok(true)
}

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App { config }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Largest maze that fits in `term_size` terminal cells along one axis,
    /// given how many terminal cells one glyph takes and how many are reserved.
    fn max_maze_size(term_size: u16, glyph_size: u16, reserved: u16) -> u16 {
        let grid_size = term_size.saturating_sub(reserved) / glyph_size;
        // A grid of n cells needs 2n + 1 glyphs
        grid_size.saturating_sub(1) / 2
    }

    /// Checks `requested` dimensions against the largest maze that fits,
    /// or picks that largest maze when nothing was requested.
    fn fit_dimensions(
        requested: Option<(u16, u16)>,
        (max_width, max_height): (u16, u16),
    ) -> Result<(u16, u16), AppError> {
        if max_width == 0 || max_height == 0 {
            return Err(AppError::TerminalTooSmall);
        }
        match requested {
            None => Ok((max_width, max_height)),
            Some((width, height)) if width <= max_width && height <= max_height => {
                Ok((width, height))
            }
            Some((width, height)) => Err(AppError::TooLargeForTerminal {
                width,
                height,
                max_width,
                max_height,
            }),
        }
    }

    /// Maze dimensions from the config, or the largest that fit the terminal.
    fn maze_dimensions(&self) -> Result<(u16, u16), AppError> {
        let (term_width, term_height) = terminal::size()?;
        let fit = (
            App::max_maze_size(term_width, Glyph::CELL_WIDTH, 0),
            App::max_maze_size(term_height, 1, STATUS_ROWS),
        );
        let requested = self.config.width.zip(self.config.height);
        App::fit_dimensions(requested, fit)
    }

    /// Main application loop: one search step per tick, commands as they
    /// arrive, redraw whenever something changed.
    pub fn run(&self, stdout: &mut Stdout) -> Result<(), AppError> {
        let (width, height) = self.maze_dimensions()?;
        let mut session = Session::generate(width, height, self.config.seed)?;
        let tick = self.config.tick_interval;
        tracing::info!(
            "[app loop] started with {}x{} maze, tick {:?}",
            width,
            height,
            tick
        );

        let mut next_tick = Instant::now() + tick;
        let mut dirty = true;
        loop {
            if dirty {
                let (term_width, _) = terminal::size()?;
                renderer::draw(stdout, &session, term_width)?;
                dirty = false;
            }

            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    event::Event::Key(key_event) if key_event.kind == event::KeyEventKind::Press => {
                        if let Some(command) = command_for_key(key_event.code) {
                            if !apply_command(&mut session, command)? {
                                break;
                            }
                            if command == Command::Regenerate {
                                queue!(stdout, terminal::Clear(ClearType::All))?;
                            }
                            dirty = true;
                        }
                    }
                    event::Event::Resize(_, _) => {
                        queue!(stdout, terminal::Clear(ClearType::All))?;
                        dirty = true;
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            if now >= next_tick {
                match session.step()? {
                    StepOutcome::Ignored => {}
                    StepOutcome::Solved => {
                        tracing::info!("[app loop] search reached the goal");
                        dirty = true;
                    }
                    _ => dirty = true,
                }
                // Skip missed ticks instead of bursting to catch up
                next_tick = (next_tick + tick).max(now);
            }
        }
        tracing::info!("[app loop] exiting");
        Ok(())
    }
}
