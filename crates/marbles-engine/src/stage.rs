//! Host glue between a visualizer and its frame scheduler.
//!
//! A [`Stage`] is what a presentation layer holds: attaching starts the
//! frame loop, detaching (or a terminal event's auto-detach) stops it.

use std::fmt::Display;

use tokio::sync::mpsc;

use crate::clock::{Clock, SystemClock};
use crate::event::Notification;
use crate::scheduler::{Frame, FrameScheduler};
use crate::sink::{Delivery, EventSink};
use crate::surface::{Scene, Surface};
use crate::timeline::TickReport;
use crate::visualizer::Visualizer;

/// A visualizer wired to a frame scheduler.
#[derive(Debug)]
pub struct Stage<C = SystemClock, S = Scene> {
    visualizer: Visualizer<C, S>,
    scheduler: FrameScheduler,
    frames_tx: mpsc::UnboundedSender<Frame>,
    frames_rx: mpsc::UnboundedReceiver<Frame>,
}

impl<C: Clock, S: Surface> Stage<C, S> {
    /// Wrap a detached visualizer.
    pub fn new(visualizer: Visualizer<C, S>) -> Self {
        let (frames_tx, frames_rx) = mpsc::unbounded_channel();
        Self {
            visualizer,
            scheduler: FrameScheduler::new(),
            frames_tx,
            frames_rx,
        }
    }

    pub fn visualizer(&self) -> &Visualizer<C, S> {
        &self.visualizer
    }

    /// Check if the frame loop is registered.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Insert into the host: start a fresh frame registration.
    ///
    /// Must be called from within a tokio runtime.
    pub fn attach(&mut self) -> bool {
        if !self.visualizer.attach() {
            return false;
        }
        self.scheduler
            .start(self.visualizer.generation(), self.frames_tx.clone());
        true
    }

    /// Remove from the host. Idempotent.
    pub fn detach(&mut self) -> bool {
        self.scheduler.stop();
        self.visualizer.detach()
    }

    /// Detach and release every box.
    pub fn teardown(&mut self) {
        self.scheduler.stop();
        self.visualizer.teardown();
    }

    /// Wait for the next frame.
    ///
    /// Frames queued while the caller was busy are coalesced into one. Pends
    /// forever while no registration is running.
    pub async fn next_frame(&mut self) -> Frame {
        let Some(mut frame) = self.frames_rx.recv().await else {
            // The stage holds a sender, so the channel never closes.
            return std::future::pending().await;
        };
        while let Ok(queued) = self.frames_rx.try_recv() {
            frame = queued;
        }
        frame
    }

    /// Run the tick for `frame`.
    ///
    /// Frames from an earlier attachment are dropped. Stops the scheduler
    /// when the tick performed the auto-detach.
    pub fn handle_frame(&mut self, frame: Frame) -> Option<TickReport> {
        if !self.visualizer.is_attached() || frame.generation != self.visualizer.generation() {
            return None;
        }
        let report = self.visualizer.tick();
        if !self.visualizer.is_attached() {
            self.scheduler.stop();
        }
        report
    }

    /// Deliver a producer notification.
    pub fn on<T: Display, E: Display>(&mut self, notification: Notification<T, E>) -> Delivery {
        self.visualizer.on(notification)
    }
}
