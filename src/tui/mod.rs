//! TUI module for interactive project exploration.

pub mod app;
pub mod event;
pub mod rows;
pub mod transition;
pub mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::Result;

pub use app::App;

/// Poll interval while nothing is moving.
const IDLE_TICK: Duration = Duration::from_millis(250);
/// Poll interval while a transition or load is in flight.
const ANIMATION_TICK: Duration = Duration::from_millis(16);

/// Run the explorer until the user quits.
pub fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        let timeout = if app.has_pending_work() {
            ANIMATION_TICK
        } else {
            IDLE_TICK
        };
        event::handle_events(app, timeout)?;
        app.tick();
    }

    tracing::debug!("Explorer closed");
    Ok(())
}
