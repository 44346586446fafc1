//! Terminal front end: the input form, history table and trend chart.

pub mod app;
pub mod ui;

use std::{
    io::{self, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

pub use app::App;

use crate::presenter::Presenter;

/// Leaves raw mode and the alternate screen when dropped, including while
/// unwinding from a panic.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = self.out.execute(LeaveAlternateScreen) {
            error!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = self.out.execute(cursor::Show) {
            error!("Failed to show cursor: {}", e);
        }
    }
}

/// Runs the form until the user quits.
pub async fn run(presenter: Presenter) -> io::Result<()> {
    enable_raw_mode()?;
    let _guard = TerminalGuard::new(io::stdout());
    io::stdout().execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(presenter);
    run_app_loop(&mut terminal, &mut app).await
}

async fn run_app_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    info!("Waiting for input");
    while app.is_running() {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key).await;
            }
        }
    }
    info!("Quit requested, terminating...");
    Ok(())
}
