//! Application state for the marbles demo.
//!
//! Two timelines are shown stacked: the raw producer and the batched
//! stream derived from it.

use marbles_engine::{ConfigError, HostState, Stage, SystemClock, Visualizer, VisualizerConfig};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::event::Action;
use crate::theme::Theme;
use crate::timeline::TimelineWidget;

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Timeline of the raw producer.
    pub source: Stage,
    /// Timeline of the batched stream.
    pub batched: Stage,
    /// Theme colors.
    pub theme: Theme,
    /// Should the app quit?
    pub should_quit: bool,
}

impl App {
    /// Create the app with both timelines detached.
    pub fn new(config: &VisualizerConfig, theme: Theme) -> Result<Self, ConfigError> {
        let clock = SystemClock::new();
        Ok(Self {
            source: Stage::new(Visualizer::with_scene(config.clone(), clock)?),
            batched: Stage::new(Visualizer::with_scene(config.clone(), clock)?),
            theme,
            should_quit: false,
        })
    }

    /// Attach both timelines. Must be called inside a tokio runtime.
    pub fn attach(&mut self) {
        self.source.attach();
        self.batched.attach();
    }

    /// Detach both timelines.
    pub fn detach(&mut self) {
        self.source.detach();
        self.batched.detach();
    }

    /// Detach both timelines and release every box.
    pub fn teardown(&mut self) {
        self.source.teardown();
        self.batched.teardown();
    }

    /// Check if any timeline is still running its frame loop.
    pub fn is_running(&self) -> bool {
        self.source.is_running() || self.batched.is_running()
    }

    /// Handle a user action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleAttach => {
                if self.is_running() {
                    self.detach();
                } else {
                    self.attach();
                }
            }
            Action::None => {}
        }
    }

    /// Render the full screen.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Fill(1),   // Source track
                Constraint::Fill(1),   // Batched track
                Constraint::Length(1), // Footer hints
            ])
            .split(area);

        self.status_line().render(chunks[0], buf);
        self.track(&self.source, "source").render(chunks[1], buf);
        self.track(&self.batched, "batched").render(chunks[2], buf);
        self.footer().render(chunks[3], buf);
    }

    fn track<'a>(&'a self, stage: &'a Stage, title: &'a str) -> TimelineWidget<'a> {
        let timeline = stage.visualizer().timeline();
        TimelineWidget::new(timeline.surface(), timeline.config(), &self.theme)
            .title(title)
            .attached(stage.visualizer().is_attached())
    }

    fn status_line(&self) -> Paragraph<'_> {
        let mut spans = vec![Span::styled(
            " marbles ",
            Style::default().fg(self.theme.primary),
        )];
        for (name, stage) in [("source", &self.source), ("batched", &self.batched)] {
            spans.push(Span::styled(
                format!(" {name}: "),
                Style::default().fg(self.theme.subtext),
            ));
            spans.push(self.state_span(stage));
        }

        let last = self
            .source
            .visualizer()
            .timeline()
            .events()
            .last()
            .map(marbles_engine::TimelineEvent::time_str);
        if let Some(time) = last {
            spans.push(Span::styled(
                format!("  last {time}"),
                Style::default().fg(self.theme.muted),
            ));
        }

        Paragraph::new(Line::from(spans)).style(Style::default().bg(self.theme.surface))
    }

    fn state_span(&self, stage: &Stage) -> Span<'static> {
        let vis = stage.visualizer();
        let live = vis.timeline().len();
        let (label, color) = match vis.state() {
            HostState::Attached => ("attached", self.theme.attached),
            HostState::Detached if vis.is_terminated() => ("stopped", self.theme.muted),
            HostState::Detached => ("detached", self.theme.muted),
        };
        Span::styled(format!("{label} \u{00b7} {live} live"), Style::default().fg(color))
    }

    fn footer(&self) -> Paragraph<'_> {
        let key = Style::default().fg(self.theme.primary);
        let text = Style::default().fg(self.theme.subtext);
        Paragraph::new(Line::from(vec![
            Span::styled(" [q]", key),
            Span::styled(" quit  ", text),
            Span::styled("[space]", key),
            Span::styled(" attach/detach", text),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_app_to_string;
    use marbles_engine::{Delivery, Notification, Surface};

    type Note = Notification<u64, String>;

    #[tokio::test(start_paused = true)]
    async fn test_starts_detached() {
        let app = App::new(&VisualizerConfig::default(), Theme::default()).unwrap();
        assert!(!app.is_running());
        assert!(!app.should_quit);

        let screen = render_app_to_string(&app);
        assert!(screen.contains("source: detached \u{00b7} 0 live"));
        assert!(screen.contains(" source "));
        assert!(screen.contains(" batched "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_attach() {
        let mut app = App::new(&VisualizerConfig::default(), Theme::default()).unwrap();
        app.handle_action(Action::ToggleAttach);
        assert!(app.is_running());
        assert_eq!(app.source.visualizer().state(), HostState::Attached);

        app.handle_action(Action::ToggleAttach);
        assert!(!app.is_running());
        assert_eq!(app.batched.visualizer().state(), HostState::Detached);
    }

    #[tokio::test(start_paused = true)]
    async fn test_renders_values_after_frame() {
        let mut app = App::new(&VisualizerConfig::default(), Theme::default()).unwrap();
        app.attach();
        app.source.on(Note::Value(7));

        let frame = app.source.next_frame().await;
        app.source.handle_frame(frame);

        let screen = render_app_to_string(&app);
        assert!(screen.contains("source: attached \u{00b7} 1 live"));
        assert!(screen.contains("[  7  ]"));
        assert!(screen.contains("last "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_action() {
        let mut app = App::new(&VisualizerConfig::default(), Theme::default()).unwrap();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_clears_tracks() {
        let mut app = App::new(&VisualizerConfig::default(), Theme::default()).unwrap();
        app.attach();
        app.source.on(Note::Value(1));
        app.batched.on(Note::Completed);

        app.teardown();
        assert!(!app.is_running());
        assert!(app.source.visualizer().timeline().surface().is_empty());
        assert!(app.batched.visualizer().timeline().surface().is_empty());

        // Producers still running after teardown leave no boxes behind.
        assert_eq!(app.source.on(Note::Value(2)), Delivery::Ignored);
        assert_eq!(app.source.visualizer().timeline().surface().len(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = VisualizerConfig {
            track_width: 0.0,
            ..Default::default()
        };
        assert!(App::new(&config, Theme::default()).is_err());
    }
}
