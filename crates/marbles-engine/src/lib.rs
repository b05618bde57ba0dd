//! marbles-engine: Headless engine for real-time event timelines
//!
//! This crate provides the core of the marbles visualizer, including:
//! - Event model and producer notifications
//! - The rolling-window timeline with eviction and collision stacking
//! - Surfaces that own the rendered boxes
//! - Host lifecycle and the frame scheduler that drives updates

pub mod clock;
pub mod config;
pub mod event;
pub mod lifecycle;
pub mod scheduler;
pub mod sink;
pub mod stage;
pub mod surface;
pub mod timeline;
pub mod visualizer;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, VisualizerConfig, AUTO_DETACH_DELAY, FRAME_INTERVAL};
pub use event::{truncate_timestamp, EventKind, Notification, TimelineEvent};
pub use lifecycle::{HostState, Lifecycle, PendingDetach};
pub use scheduler::{Frame, FrameScheduler};
pub use sink::{Delivery, EventSink};
pub use stage::Stage;
pub use surface::{BoxStyle, BoxVisual, Scene, Surface, Visual, VisualId};
pub use timeline::{TickReport, Timeline};
pub use visualizer::Visualizer;

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
