//! Terminal input handling for the marbles TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// How long the input thread blocks before checking for shutdown.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
}

/// Input handler that reads the terminal on a background thread.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Spawn the input thread.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // crossterm uses blocking I/O, so poll on a plain thread
        std::thread::spawn(move || loop {
            if tx.is_closed() {
                break;
            }
            if !event::poll(POLL_TIMEOUT).unwrap_or(false) {
                continue;
            }
            let Ok(evt) = event::read() else {
                continue;
            };
            let event = match evt {
                CrosstermEvent::Key(key) => Some(Event::Key(key)),
                CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
                _ => None,
            };
            if let Some(e) = event {
                if tx.send(e).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Get the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Detach both timelines if attached, re-attach them otherwise.
    ToggleAttach,
    None,
}

/// Convert a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ' | 'p') => Action::ToggleAttach,
        _ => Action::None,
    }
}
