//! Ingress of producer notifications.
//!
//! An [`EventSink`] turns `value` / `completed` / `error` notifications into
//! timeline events. Terminal notifications also schedule the automatic
//! detach of the frame loop.

use std::fmt::Display;

use crate::clock::Clock;
use crate::config::AUTO_DETACH_DELAY;
use crate::event::Notification;
use crate::surface::Surface;
use crate::visualizer::Visualizer;

/// What happened to a delivered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Appended to the timeline.
    Recorded,
    /// Dropped because a terminal notification already arrived or the
    /// visualizer was torn down.
    Ignored,
}

/// Anything that accepts producer notifications.
pub trait EventSink<T, E> {
    /// Deliver one notification. Never fails, including for `Error`.
    fn on(&mut self, notification: Notification<T, E>) -> Delivery;
}

/// Per-producer bookkeeping of a sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinkState {
    keep_running: bool,
    terminated: bool,
    closed: bool,
}

impl SinkState {
    pub fn new(keep_running: bool) -> Self {
        Self {
            keep_running,
            terminated: false,
            closed: false,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Stop accepting notifications for good.
    pub(crate) fn close(&mut self) {
        self.closed = true;
    }
}

impl<T, E, C, S> EventSink<T, E> for Visualizer<C, S>
where
    T: Display,
    E: Display,
    C: Clock,
    S: Surface,
{
    fn on(&mut self, notification: Notification<T, E>) -> Delivery {
        if self.sink.closed {
            tracing::warn!("notification after teardown ignored");
            return Delivery::Ignored;
        }
        if self.sink.terminated {
            tracing::warn!("notification after terminal event ignored");
            return Delivery::Ignored;
        }

        if let Notification::Error(error) = &notification {
            tracing::warn!(%error, "producer failed");
        }

        let kind = notification.into_kind(self.sink.keep_running);
        let now = self.clock.now();
        let terminal = kind.is_terminal();
        let stops = kind.stops_scheduler();

        self.timeline.record(now, kind);

        if terminal {
            self.sink.terminated = true;
        }
        if stops {
            self.lifecycle.schedule_detach(now + AUTO_DETACH_DELAY);
        }
        Delivery::Recorded
    }
}
