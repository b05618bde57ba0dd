//! Timeline event types.
//!
//! Events represent every notification a producer can push at a timeline:
//! - Next events: an emitted value, rendered as text
//! - Completed events: terminal, optionally keeping the frame loop alive
//! - Error events: terminal, always stopping the frame loop

use std::fmt;

use chrono::{DateTime, Local, Utc};

use crate::surface::{BoxStyle, Visual};

/// Granularity, in seconds, that timestamps are truncated to on creation.
pub const TIMESTAMP_GRANULARITY: f64 = 0.1;

/// Truncate a time in seconds down to [`TIMESTAMP_GRANULARITY`].
///
/// Near-simultaneous events end up with equal timestamps, which puts them
/// in the same layout bucket.
pub fn truncate_timestamp(seconds: f64) -> f64 {
    // Round the scaled value first so 0.3 stays 0.3 instead of 0.2999...
    let tenths = (seconds * 10.0 * 1e6).round() / 1e6;
    tenths.floor() / 10.0
}

/// A single occurrence on the timeline.
#[derive(Debug)]
pub struct TimelineEvent {
    /// When the event occurred, in clock seconds.
    timestamp: f64,
    /// Event type and content.
    kind: EventKind,
    /// Wall-clock arrival time (display only).
    received_at: DateTime<Utc>,
    /// Rendering handle, present between realization and eviction.
    visual: Option<Visual>,
}

impl TimelineEvent {
    /// Create an event at the given clock time.
    pub fn new(now: f64, kind: EventKind) -> Self {
        Self {
            timestamp: truncate_timestamp(now),
            kind,
            received_at: Utc::now(),
            visual: None,
        }
    }

    /// Truncated timestamp in clock seconds.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    /// Event kind.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Wall-clock arrival time.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Get the arrival time formatted for display (HH:MM:SS in local time).
    pub fn time_str(&self) -> String {
        let local: DateTime<Local> = self.received_at.into();
        local.format("%H:%M:%S").to_string()
    }

    /// The visual handle, if the event has been realized and not evicted.
    pub fn visual(&self) -> Option<&Visual> {
        self.visual.as_ref()
    }

    /// Check whether the event currently owns a visual.
    pub fn is_realized(&self) -> bool {
        self.visual.is_some()
    }

    pub(crate) fn attach_visual(&mut self, visual: Visual) {
        debug_assert!(self.visual.is_none(), "visual is set once");
        self.visual = Some(visual);
    }

    pub(crate) fn take_visual(&mut self) -> Option<Visual> {
        self.visual.take()
    }
}

/// Event type and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// An emitted value, already rendered to text.
    Next(String),
    /// The producer completed.
    Completed {
        /// Keep the frame loop running after completion.
        keep_running: bool,
    },
    /// The producer failed.
    Error,
}

impl EventKind {
    /// Whether this kind ends the producer's lifetime.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }

    /// Whether this event should stop the frame loop shortly after arriving.
    pub fn stops_scheduler(&self) -> bool {
        match self {
            Self::Next(_) => false,
            Self::Completed { keep_running } => !keep_running,
            Self::Error => true,
        }
    }

    /// Box style used when realizing this event.
    pub fn style(&self) -> BoxStyle {
        match self {
            Self::Next(_) => BoxStyle::Value,
            Self::Completed { .. } => BoxStyle::Completed,
            Self::Error => BoxStyle::Error,
        }
    }

    /// Text drawn inside the box.
    pub fn label(&self) -> &str {
        match self {
            Self::Next(payload) => payload,
            Self::Completed { .. } => "|",
            Self::Error => "X",
        }
    }
}

/// A push notification from an upstream producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<T, E> {
    /// A value was emitted.
    Value(T),
    /// The producer completed.
    Completed,
    /// The producer failed.
    Error(E),
}

impl<T: fmt::Display, E> Notification<T, E> {
    /// Convert into an event kind. `keep_running` only applies to completion.
    pub fn into_kind(self, keep_running: bool) -> EventKind {
        match self {
            Self::Value(value) => EventKind::Next(value.to_string()),
            Self::Completed => EventKind::Completed { keep_running },
            Self::Error(_) => EventKind::Error,
        }
    }
}
