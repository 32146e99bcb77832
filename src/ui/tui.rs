// src/ui/tui.rs
//! Terminal setup and the event / render loop.

use std::{
    io::{self, Stdout},
    time::Instant,
};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use crate::app::App;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Take over the terminal and run `app` until the user quits.
///
/// The terminal is restored and the app shut down even when the loop fails.
pub fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.shutdown()?;
    info!("[tui] exited");
    result
}

fn event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    // One analysed row and at most one frame per tick.
    let tick_rate = app.render_interval()?;
    let mut last_tick = Instant::now();

    loop {
        if app.needs_redraw()? {
            terminal.draw(|f| app.draw(f))?;
        }

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();
        if event::poll(timeout)? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.on_key(key)? {
                        return Ok(());
                    }
                }
                CEvent::Mouse(mouse) => app.on_mouse(mouse)?,
                CEvent::Resize(..) => app.invalidate()?,
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            app.tick()?;
        }
    }
}
