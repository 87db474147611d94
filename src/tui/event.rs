use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyEvent};

/// Redraw cadence for the sweep screen when no input arrives. The screen
/// only animates in response to keys, so this just keeps the terminal
/// responsive to resizes without burning CPU.
const TICK_RATE: Duration = Duration::from_millis(33);

/// Events consumed by the sweep screen's main loop.
pub enum AppEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// Terminal was resized.
    #[allow(dead_code)]
    Resize(u16, u16),
    /// Nothing happened within the tick rate; redraw anyway.
    Tick,
}

/// Blocking event source for a single full-screen view.
///
/// The wizard has exactly one TUI screen and its render loop owns the
/// terminal for the whole sweep, so events are polled inline between
/// draws rather than pumped from a background thread.
#[derive(Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Wait for the next event, or a Tick if nothing arrives in time.
    pub fn next(&self) -> io::Result<AppEvent> {
        if !event::poll(TICK_RATE)? {
            return Ok(AppEvent::Tick);
        }
        match event::read()? {
            Event::Key(key) => Ok(AppEvent::Key(key)),
            Event::Resize(w, h) => Ok(AppEvent::Resize(w, h)),
            _ => Ok(AppEvent::Tick),
        }
    }
}
