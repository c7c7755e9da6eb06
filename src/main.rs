mod app;
mod assets;
mod config;
mod event;
mod menu;
mod scene;
mod scores;
mod screens;
mod ui;

use std::fs::OpenOptions;
use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use config::{Config, ScreenGeometry};
use event::EventHandler;

const USAGE: &str = "usage: flapcade [SCORE]";

/// Log to a file; stderr would draw over the alternate screen.
fn init_logging(config: &Config) {
    let file = match OpenOptions::new().create(true).append(true).open(&config.log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("logging disabled, cannot open {:?}: {}", config.log_path, e);
            return;
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn parse_score() -> io::Result<u32> {
    match std::env::args().nth(1) {
        None => Ok(0),
        Some(arg) => arg
            .parse()
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, USAGE)),
    }
}

fn main() -> io::Result<()> {
    let config = Config::load().map_err(io::Error::other)?;
    init_logging(&config);
    let score = parse_score()?;

    let geometry = terminal::size()
        .map(|(w, h)| ScreenGeometry::new(w, h))
        .unwrap_or(config.geometry);
    let tick_rate_ms = config.tick_rate_ms;
    // Built before raw mode so a bad score file leaves the terminal alone
    let mut app = App::new(config, geometry, score).map_err(|e| {
        log::error!("{}", e);
        io::Error::other(e)
    })?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let event_handler = EventHandler::new(tick_rate_ms);

    // Main loop
    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::render(frame, &app)) {
            break Err(e);
        }
        match event_handler.next() {
            Ok(event) => app.on_event(&event),
            Err(e) => break Err(e),
        }
        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result?;

    if let Some(outcome) = app.outcome {
        println!("{}", outcome.as_str());
    }
    Ok(())
}
