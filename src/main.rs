use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use doomtype::{
    app::App,
    app_dirs::AppDirs,
    config::Config,
    logging,
    prompt::WordListProvider,
    runtime::{self, Runner},
    DoomtypeError, Result,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdin},
    process::ExitCode,
    time::Instant,
};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// distraction-free typing practice in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a prompt of random words and watch your speed and accuracy live. Backspace fixes mistakes, Ctrl+R starts over with a new prompt, Ctrl+C exits."
)]
pub struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = setup_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "starting doomtype");

    match start() {
        Ok(()) => {
            info!("doomtype exited cleanly");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "doomtype failed");
            eprintln!("Error running doomtype: {err}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() -> Option<WorkerGuard> {
    let dir = AppDirs::log_dir()?;
    match logging::init(&dir) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("doomtype: continuing without logs: {err}");
            None
        }
    }
}

fn start() -> Result<()> {
    let config = Config::default();

    // before raw mode, so a failure prints on a normal terminal
    let provider = WordListProvider::english()?;
    let mut app = App::new(Box::new(provider), config, Instant::now())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
        restore_terminal();
        return Err(err.into());
    }

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .map_err(DoomtypeError::from)
        .and_then(|mut terminal| {
            let mut runner = Runner::new(config.tick_interval);
            runtime::spawn_terminal_reader(runner.sender());
            runtime::run(&mut terminal, &mut app, &mut runner)
        });

    restore_terminal();
    result
}

fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        warn!(%err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
        warn!(%err, "failed to leave alternate screen");
    }
}
