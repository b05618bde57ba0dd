//! Rolling-window timeline.
//!
//! Handles event storage, eviction and layout. Positions are written back
//! into the [`Surface`] through each event's visual handle.

use std::collections::HashMap;

use crate::config::{ConfigError, VisualizerConfig};
use crate::event::{EventKind, TimelineEvent};
use crate::surface::{Scene, Surface};

/// Outcome of a single [`Timeline::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Events dropped because they left the window.
    pub evicted: usize,
    /// Events still on the timeline.
    pub live: usize,
}

/// The rolling window of visualized events.
#[derive(Debug)]
pub struct Timeline<S = Scene> {
    config: VisualizerConfig,
    /// Events in arrival order.
    events: Vec<TimelineEvent>,
    surface: S,
}

impl Timeline<Scene> {
    /// Create a timeline drawing into a fresh [`Scene`].
    pub fn with_scene(config: VisualizerConfig) -> Result<Self, ConfigError> {
        Self::new(config, Scene::new())
    }
}

impl<S: Surface> Timeline<S> {
    /// Create an empty timeline.
    ///
    /// The config is validated here, so layout math never sees a window of
    /// one second or less.
    pub fn new(config: VisualizerConfig, surface: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            events: Vec::new(),
            surface,
        })
    }

    /// Layout and window settings.
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Get all live events.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// The surface the events are drawn into.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Check if the timeline is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Append an event and realize its (hidden) box.
    pub fn add(&mut self, mut event: TimelineEvent) {
        if !event.is_realized() {
            let kind = event.kind();
            let visual = self.surface.create(kind.style(), kind.label());
            event.attach_visual(visual);
        }
        self.events.push(event);
    }

    /// Create an event of `kind` at `now` and append it.
    pub fn record(&mut self, now: f64, kind: EventKind) -> &TimelineEvent {
        self.add(TimelineEvent::new(now, kind));
        let last = self.events.len() - 1;
        &self.events[last]
    }

    /// Evict expired events and lay out the rest for time `now`.
    pub fn update(&mut self, now: f64) -> TickReport {
        let cutoff = now - self.config.window_seconds;
        let before = self.events.len();
        let surface = &mut self.surface;

        self.events.retain_mut(|event| {
            // An event exactly at the cutoff stays.
            if event.timestamp() < cutoff {
                if let Some(visual) = event.take_visual() {
                    surface.release(visual);
                }
                false
            } else {
                true
            }
        });

        let evicted = before - self.events.len();
        if evicted > 0 {
            tracing::trace!(evicted, cutoff, "evicted expired events");
        }

        let increment = self.config.increment();
        let right_edge = self.config.track_width - self.config.box_width;
        let center_y = (self.config.track_height - self.config.box_height) / 2.0;

        // Occupancy per rounded x, rebuilt every tick.
        let mut buckets: HashMap<i64, u32> = HashMap::new();
        for event in &self.events {
            let elapsed = now - event.timestamp();
            let x = right_edge - elapsed * increment;
            let seen = buckets.entry(x.round() as i64).or_insert(0);
            let y = center_y + f64::from(*seen) * self.config.stack_step;
            *seen += 1;

            if let Some(visual) = event.visual() {
                surface.place(visual, x, y);
            }
        }

        TickReport {
            evicted,
            live: self.events.len(),
        }
    }

    /// Drop every event, releasing all boxes.
    pub fn clear(&mut self) {
        for mut event in self.events.drain(..) {
            if let Some(visual) = event.take_visual() {
                self.surface.release(visual);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{BoxStyle, BoxVisual};

    fn next(label: &str) -> EventKind {
        EventKind::Next(label.into())
    }

    fn placed(timeline: &Timeline<Scene>, index: usize) -> &BoxVisual {
        let visual = timeline.events()[index].visual().unwrap();
        timeline.surface().get(visual.id()).unwrap()
    }

    fn labels(timeline: &Timeline<Scene>) -> Vec<String> {
        timeline
            .events()
            .iter()
            .map(|e| e.kind().label().to_string())
            .collect()
    }

    #[test]
    fn test_new_timeline() {
        let timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        assert!(timeline.is_empty());
        assert_eq!(timeline.len(), 0);
        assert!(timeline.surface().is_empty());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = VisualizerConfig {
            window_seconds: 1.0,
            ..Default::default()
        };
        let result = Timeline::with_scene(config);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = VisualizerConfig {
            box_width: 500.0,
            ..Default::default()
        };
        assert!(Timeline::with_scene(config).is_err());
    }

    #[test]
    fn test_add_realizes_hidden_box() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        timeline.record(0.0, next("1"));

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.surface().len(), 1);
        let b = placed(&timeline, 0);
        assert!(!b.visible);
        assert_eq!(b.style, BoxStyle::Value);
    }

    #[test]
    fn test_update_makes_boxes_visible() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        timeline.record(0.0, next("1"));
        timeline.update(0.0);

        let b = placed(&timeline, 0);
        assert!(b.visible);
        // Age zero sits at the right edge, vertically centered.
        assert!((b.x - 400.0).abs() < 1e-9);
        assert!((b.y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_scroll_right_to_left() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        timeline.record(0.0, next("1"));

        timeline.update(1.0);
        let at_one = placed(&timeline, 0).x;
        timeline.update(10.0);
        let at_ten = placed(&timeline, 0).x;

        assert!((at_one - 360.0).abs() < 1e-9);
        assert!(at_ten.abs() < 1e-9);
        timeline.update(11.0);
        assert!(placed(&timeline, 0).x < 0.0);
    }

    #[test]
    fn test_scenario_stacking_and_ordering() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        timeline.record(0.0, next("a"));
        timeline.record(0.05, next("b"));
        timeline.record(5.0, next("c"));

        let report = timeline.update(5.01);
        assert_eq!(report, TickReport { evicted: 0, live: 3 });

        let a = placed(&timeline, 0).clone();
        let b = placed(&timeline, 1).clone();
        let c = placed(&timeline, 2).clone();

        assert_eq!(a.x.round(), b.x.round());
        // First arrival renders above.
        assert!((b.y - a.y - 12.0).abs() < 1e-9);
        assert!(c.x > a.x);
        assert!(c.x > b.x);
        assert!((c.y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_stacking_resets_each_tick() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        timeline.record(1.0, next("a"));
        timeline.record(1.0, next("b"));

        timeline.update(2.0);
        timeline.update(2.5);

        assert!((placed(&timeline, 0).y - 30.0).abs() < 1e-9);
        assert!((placed(&timeline, 1).y - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_eviction_releases_visual() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        timeline.record(0.0, next("a"));

        let report = timeline.update(12.1);
        assert_eq!(report, TickReport { evicted: 1, live: 0 });
        assert!(timeline.is_empty());
        assert!(timeline.surface().is_empty());
    }

    #[test]
    fn test_event_at_cutoff_is_retained() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        timeline.record(1.0, next("edge"));

        let report = timeline.update(12.0);
        assert_eq!(report.live, 1);
        assert_eq!(timeline.surface().len(), 1);
    }

    #[test]
    fn test_eviction_preserves_order() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        for (t, label) in [(0.0, "a"), (2.0, "b"), (1.5, "c"), (3.0, "d"), (0.5, "e")] {
            timeline.record(t, next(label));
        }

        timeline.update(12.2);
        assert_eq!(labels(&timeline), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_window_invariant_over_ticks() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        let mut now = 0.0;
        for i in 0..400 {
            if i % 3 == 0 {
                timeline.record(now, next(&i.to_string()));
            }
            now += 0.1;
            timeline.update(now);

            let window = timeline.config().window_seconds;
            for event in timeline.events() {
                assert!(event.timestamp() >= now - window);
                assert!(event.is_realized());
            }
            assert_eq!(timeline.surface().len(), timeline.len());
        }
    }

    #[test]
    fn test_terminal_styles() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        timeline.record(0.0, EventKind::Completed { keep_running: false });
        timeline.record(0.0, EventKind::Error);

        assert_eq!(placed(&timeline, 0).style, BoxStyle::Completed);
        assert_eq!(placed(&timeline, 1).style, BoxStyle::Error);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut timeline = Timeline::with_scene(VisualizerConfig::default()).unwrap();
        timeline.record(0.0, next("a"));
        timeline.record(0.5, next("b"));

        timeline.clear();
        assert!(timeline.is_empty());
        assert!(timeline.surface().is_empty());
    }
}
