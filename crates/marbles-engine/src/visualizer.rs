//! Single-context owner of a timeline and its host lifecycle.

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, VisualizerConfig};
use crate::lifecycle::{HostState, Lifecycle};
use crate::sink::SinkState;
use crate::surface::{Scene, Surface};
use crate::timeline::{TickReport, Timeline};

/// A timeline plus everything needed to drive it frame by frame.
///
/// All mutation happens through `&mut self`, so producers on other tasks
/// must marshal their notifications onto the owning context first.
#[derive(Debug)]
pub struct Visualizer<C = SystemClock, S = Scene> {
    pub(crate) timeline: Timeline<S>,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) sink: SinkState,
    pub(crate) clock: C,
}

impl<C: Clock> Visualizer<C, Scene> {
    /// Create a visualizer drawing into a fresh [`Scene`].
    pub fn with_scene(config: VisualizerConfig, clock: C) -> Result<Self, ConfigError> {
        Self::new(config, clock, Scene::new())
    }
}

impl<C: Clock, S: Surface> Visualizer<C, S> {
    /// Create a detached visualizer. Fails if `config` does not validate.
    pub fn new(config: VisualizerConfig, clock: C, surface: S) -> Result<Self, ConfigError> {
        let sink = SinkState::new(config.keep_running);
        Ok(Self {
            timeline: Timeline::new(config, surface)?,
            lifecycle: Lifecycle::new(),
            sink,
            clock,
        })
    }

    pub fn timeline(&self) -> &Timeline<S> {
        &self.timeline
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Current host state.
    pub fn state(&self) -> HostState {
        self.lifecycle.state()
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle.is_attached()
    }

    /// Generation of the current attachment.
    pub fn generation(&self) -> u64 {
        self.lifecycle.generation()
    }

    /// Whether a terminal notification has been recorded.
    pub fn is_terminated(&self) -> bool {
        self.sink.is_terminated()
    }

    /// Current clock time.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// The host inserted the surface into a displayed tree.
    pub fn attach(&mut self) -> bool {
        let attached = self.lifecycle.attach();
        if attached {
            tracing::debug!(generation = self.lifecycle.generation(), "timeline attached");
        }
        attached
    }

    /// The host removed the surface. Calling this while detached is a no-op.
    pub fn detach(&mut self) -> bool {
        let detached = self.lifecycle.detach();
        if detached {
            tracing::debug!(generation = self.lifecycle.generation(), "timeline detached");
        }
        detached
    }

    /// Run one frame: fire a due auto-detach, then update the timeline.
    ///
    /// Returns `None` when no update ran because the host is detached.
    pub fn tick(&mut self) -> Option<TickReport> {
        let now = self.clock.now();
        if self.lifecycle.poll(now) {
            tracing::debug!(
                generation = self.lifecycle.generation(),
                now,
                "auto-detach after terminal event"
            );
            return None;
        }
        if !self.lifecycle.is_attached() {
            return None;
        }
        Some(self.timeline.update(now))
    }

    /// Detach for good and release every box.
    ///
    /// Later notifications are ignored, so nothing can realize a box that
    /// would never be released.
    pub fn teardown(&mut self) {
        self.detach();
        self.sink.close();
        self.timeline.clear();
    }
}
