//! marbles-tui: Terminal UI for real-time event timelines
//!
//! This crate draws marbles timelines in the terminal, including:
//! - The timeline widget that scales a scene onto terminal cells
//! - A demo producer and batching operator feeding two timelines
//! - The event loop that marshals producers and frames onto one context

mod app;
pub mod demo;
mod event;
#[cfg(test)]
pub mod test_utils;
pub mod text;
pub mod theme;
pub mod timeline;

pub use app::App;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use marbles_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use marbles_engine::VisualizerConfig;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Duration;
use tokio::sync::mpsc;

use demo::{BatchNote, ProducerOptions, SourceNote};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Settings for the terminal demo.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// Timeline window and layout.
    pub config: VisualizerConfig,
    /// Producer settings.
    pub producer: ProducerOptions,
    /// Values per batch.
    pub batch_size: usize,
    /// Longest time a batch stays open.
    pub batch_span: Duration,
    /// Use the light palette.
    pub light: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            config: VisualizerConfig::default(),
            producer: ProducerOptions::default(),
            batch_size: 3,
            batch_span: Duration::from_secs(3),
            light: false,
        }
    }
}

/// Run the demo TUI.
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal on exit.
pub async fn run_demo(options: DemoOptions) -> Result<(), Box<dyn std::error::Error>> {
    let theme = if options.light {
        theme::Theme::latte()
    } else {
        theme::Theme::mocha()
    };
    // Rejects a bad config before the terminal is touched
    let mut app = App::new(&options.config, theme)?;

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Producers run on their own tasks and reach the UI only through channels
    let (source_tx, mut source_rx) = mpsc::unbounded_channel::<SourceNote>();
    let (batch_in_tx, batch_in_rx) = mpsc::unbounded_channel::<SourceNote>();
    let (batched_tx, mut batched_rx) = mpsc::unbounded_channel::<BatchNote>();
    let producer = demo::spawn_producer(options.producer.clone(), vec![source_tx, batch_in_tx]);
    let batcher = demo::spawn_batcher(
        options.batch_size,
        options.batch_span,
        batch_in_rx,
        batched_tx,
    );

    let mut events = EventHandler::new();
    app.attach();
    tracing::info!("demo started");

    let result = run_loop(
        &mut terminal,
        &mut app,
        &mut events,
        &mut source_rx,
        &mut batched_rx,
    )
    .await;

    app.teardown();
    producer.abort();
    batcher.abort();
    tracing::info!("demo stopped");

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    source_rx: &mut mpsc::UnboundedReceiver<SourceNote>,
    batched_rx: &mut mpsc::UnboundedReceiver<BatchNote>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.render(area, frame.buffer_mut());
        })?;

        tokio::select! {
            frame = app.source.next_frame() => {
                app.source.handle_frame(frame);
            }
            frame = app.batched.next_frame() => {
                app.batched.handle_frame(frame);
            }
            Some(note) = source_rx.recv() => {
                app.source.on(note);
            }
            Some(note) = batched_rx.recv() => {
                app.batched.on(note);
            }
            Some(event) = events.next() => match event {
                Event::Key(key) => app.handle_action(key_to_action(key)),
                // Terminal will handle resize automatically
                Event::Resize(_, _) => {}
            },
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
