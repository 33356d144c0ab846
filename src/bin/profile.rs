use std::time::Instant;

use mazewalk::{SearchMode, Session};
use tracing_subscriber::EnvFilter;

/// Generates `ITERATIONS` 255x255 mazes and solves each with BFS and DFS,
/// logging step counts and timings to stderr.
fn main() -> Result<(), mazewalk::MazeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);

    for iteration in 0..num_iters {
        let started = Instant::now();
        let session = Session::generate(u8::MAX as u16, u8::MAX as u16, None)?;
        tracing::info!(
            "[profile] iteration {}: generated in {:?}",
            iteration,
            started.elapsed()
        );

        for mode in [SearchMode::Bfs, SearchMode::Dfs] {
            let mut run = Session::from_maze(session.maze().clone(), None);
            let started = Instant::now();
            run.select_mode(mode)?;
            while !run.is_solved() {
                run.step()?;
            }
            tracing::info!(
                "[profile] iteration {}: {} solved in {} steps, path length {}, {:?}",
                iteration,
                mode,
                run.steps(),
                run.solution_path().map_or(0, <[_]>::len),
                started.elapsed()
            );
        }
    }
    Ok(())
}
