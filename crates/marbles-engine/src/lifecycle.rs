//! Host attachment lifecycle.
//!
//! Tracks whether the timeline's surface is attached to a displayed host,
//! and the one-shot detach a terminal event schedules. Every attachment
//! gets a fresh generation number; a pending detach only fires under the
//! generation it was scheduled in.

/// Attachment state of the timeline's host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostState {
    /// Not on screen; no frames are driven.
    #[default]
    Detached,
    /// On screen; the frame loop is running.
    Attached,
}

/// A deferred detach waiting for its deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingDetach {
    /// Clock time at which the detach fires.
    pub due: f64,
    /// Attachment the detach belongs to.
    pub generation: u64,
}

/// Attach/detach state machine.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: HostState,
    generation: u64,
    pending: Option<PendingDetach>,
}

impl Lifecycle {
    /// Create a detached lifecycle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> HostState {
        self.state
    }

    /// Check if the host is attached.
    pub fn is_attached(&self) -> bool {
        self.state == HostState::Attached
    }

    /// Generation of the current (or most recent) attachment.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The scheduled detach, if any.
    pub fn pending_detach(&self) -> Option<PendingDetach> {
        self.pending
    }

    /// Enter `Attached`. Returns `false` if already attached.
    pub fn attach(&mut self) -> bool {
        if self.is_attached() {
            return false;
        }
        self.generation += 1;
        self.state = HostState::Attached;
        true
    }

    /// Enter `Detached`, cancelling any pending detach.
    ///
    /// Returns `false` (and changes nothing) if already detached.
    pub fn detach(&mut self) -> bool {
        self.pending = None;
        if !self.is_attached() {
            return false;
        }
        self.state = HostState::Detached;
        true
    }

    /// Schedule a detach at clock time `due` for the current attachment.
    pub fn schedule_detach(&mut self, due: f64) {
        self.pending = Some(PendingDetach {
            due,
            generation: self.generation,
        });
    }

    /// Fire the pending detach if it is due.
    ///
    /// Returns `true` if this call detached the host. A pending detach from
    /// an earlier attachment is discarded without effect.
    pub fn poll(&mut self, now: f64) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };

        if pending.generation != self.generation || !self.is_attached() {
            self.pending = None;
            return false;
        }

        if now < pending.due {
            return false;
        }

        self.detach()
    }
}
