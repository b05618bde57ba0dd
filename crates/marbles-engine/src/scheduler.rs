//! Frame scheduler.
//!
//! While registered, a background task pushes one [`Frame`] per
//! [`FRAME_INTERVAL`] onto a channel owned by the main context. The task
//! never touches the timeline itself.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::FRAME_INTERVAL;

/// One display-refresh tick, tagged with the attachment it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub generation: u64,
}

#[derive(Debug)]
struct Registration {
    generation: u64,
    task: JoinHandle<()>,
}

/// Drives frames at display-refresh cadence while registered.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    registration: Option<Registration>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a frame task is registered.
    pub fn is_running(&self) -> bool {
        self.registration.is_some()
    }

    /// Generation of the active registration.
    pub fn generation(&self) -> Option<u64> {
        self.registration.as_ref().map(|r| r.generation)
    }

    /// Register a fresh frame task for `generation`.
    ///
    /// Any previous registration is stopped first. Must be called from
    /// within a tokio runtime.
    pub fn start(&mut self, generation: u64, frames: mpsc::UnboundedSender<Frame>) {
        self.stop();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(FRAME_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if frames.send(Frame { generation }).is_err() {
                    break;
                }
            }
        });

        self.registration = Some(Registration { generation, task });
    }

    /// Deregister the frame task. Returns `false` if none was running.
    pub fn stop(&mut self) -> bool {
        match self.registration.take() {
            Some(registration) => {
                registration.task.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_emits_frames_for_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = FrameScheduler::new();
        scheduler.start(3, tx);
        assert!(scheduler.is_running());
        assert_eq!(scheduler.generation(), Some(3));

        for _ in 0..3 {
            let frame = rx.recv().await.unwrap();
            assert_eq!(frame.generation, 3);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cadence_is_sub_20ms() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = FrameScheduler::new();
        scheduler.start(1, tx);

        // First tick is immediate.
        rx.recv().await.unwrap();
        let before = tokio::time::Instant::now();
        rx.recv().await.unwrap();
        assert!(before.elapsed() < Duration::from_millis(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = FrameScheduler::new();
        scheduler.start(1, tx);

        assert!(scheduler.stop());
        assert!(!scheduler.stop());
        assert!(!scheduler.is_running());

        // The aborted task drops its sender, closing the channel.
        while rx.recv().await.is_some() {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_registration() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = FrameScheduler::new();
        scheduler.start(1, tx.clone());
        scheduler.start(2, tx);
        assert_eq!(scheduler.generation(), Some(2));

        tokio::time::sleep(Duration::from_millis(100)).await;
        let mut latest = None;
        while let Ok(frame) = rx.try_recv() {
            latest = Some(frame.generation);
        }
        assert_eq!(latest, Some(2));
    }
}
