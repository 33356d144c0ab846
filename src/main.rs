use mazewalk::{
    app::{App, AppConfig, AppError},
    logging,
};

fn main() -> Result<(), AppError> {
    let config = AppConfig::from_args(std::env::args().skip(1))?.with_env()?;
    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = logging::init_logging(&logging::log_dir())?;

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = App::new(config).run(&mut stdout);
    App::restore_terminal(&mut stdout)?;

    match &result {
        Err(AppError::Maze(e)) if e.is_internal() => {
            tracing::error!("[app] internal error: {}", e);
        }
        Err(e) => tracing::warn!("[app] exiting on error: {}", e),
        Ok(()) => {}
    }
    result
}
