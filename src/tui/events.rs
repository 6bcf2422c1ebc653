//! Event handling for the TUI
//!
//! Polls crossterm for terminal events and maps keys to [`Command`]s.

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use std::time::Duration;

use super::app::Command;

/// TUI events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Nothing happened within the tick; used to pick up completions
    Tick,
}

/// Event handler for polling terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl EventHandler {
    /// Create a new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event, waiting at most one tick
    pub fn next(&self) -> std::io::Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Resize(w, h) => Ok(Event::Resize(w, h)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

/// Convert keyboard event to command
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    // Release/repeat events arrive on some platforms; act on presses only
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL)
        | (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Command::Quit),
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => Some(Command::CycleExpertise),
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Some(Command::ToggleMode),
        (KeyCode::Esc, _) => Some(Command::ClearInput),
        (KeyCode::Enter, KeyModifiers::SHIFT) => Some(Command::Insert('\n')),
        (KeyCode::Enter, _) => Some(Command::Submit),
        (KeyCode::Backspace, _) => Some(Command::Backspace),
        (KeyCode::PageUp, _) => Some(Command::ScrollUp),
        (KeyCode::PageDown, _) => Some(Command::ScrollDown),
        (KeyCode::Char(c), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Command::Insert(c))
        }
        _ => None,
    }
}
