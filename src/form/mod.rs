//! Interactive terminal form: add, search, and delete items with a live table.

mod app;
mod field;
mod input;
mod ui;

use std::io;

use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

pub use app::{AppMode, Focus, FormApp, StatusKind, StatusLine, FORM_ROW_LIMIT};
pub use field::TextField;

use crate::storage::ItemStore;
use crate::Result;

/// Run the form until the user quits. The store is closed before returning.
pub fn run(store: ItemStore) -> Result<()> {
    let mut app = FormApp::new(store)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.into_store().close()?;
    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut FormApp) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.should_quit {
            break;
        }

        let event = event::read()?;
        input::handle_event(app, event);
    }

    Ok(())
}
