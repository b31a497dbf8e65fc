//! Application loop.

use std::io;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::coaching::ScoringPolicy;
use crate::select::DocumentListeners;

use super::screens::{CoachingScreen, ScreenAction};

/// Runs the TUI event loop until the user quits.
pub fn run(policy: ScoringPolicy) -> io::Result<()> {
    let listeners = DocumentListeners::new();
    let mut screen = CoachingScreen::new(policy, &listeners).map_err(io::Error::other)?;
    tracing::info!(preset = %screen.preset(), "coaching form mounted");

    let mut terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture)
        .and_then(|()| event_loop(&mut terminal, &mut screen));
    if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
        tracing::warn!(error = %e, "failed to disable mouse capture");
    }
    ratatui::restore();

    screen.unmount();
    tracing::info!(released = listeners.is_empty(), "coaching form unmounted");
    result
}

fn event_loop(terminal: &mut DefaultTerminal, screen: &mut CoachingScreen) -> io::Result<()> {
    loop {
        terminal.draw(|frame| screen.render(frame))?;

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let ScreenAction::Quit = screen.on_key(key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => screen.on_mouse(mouse),
            _ => {}
        }
    }
}
