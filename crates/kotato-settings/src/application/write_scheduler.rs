//! WriteScheduler: the debounce state machine behind the custom-file writer.
//!
//! Setting changes arrive in bursts (dragging a slider, ticking several
//! checkboxes).  Rewriting the whole custom document on every change would
//! hammer the disk, so write requests are coalesced:
//!
//! ```text
//!            request(force = false)
//!   Idle  ─────────────────────────────►  Pending(deadline = now + delay)
//!    ▲                                        │
//!    │   expire(now >= deadline)  → flush     │
//!    └────────────────────────────────────────┤
//!    │   request(force = true)    → flush     │
//!    └────────────────────────────────────────┘
//! ```
//!
//! - A non-forced request while `Pending` does nothing: the first request owns
//!   the deadline and later ones do not push it back.
//! - A forced request while `Idle` also does nothing; there is no pending
//!   change to save.
//!
//! The scheduler only decides.  It performs no I/O and never sleeps; the
//! [`SettingsManager`](super::settings_manager::SettingsManager) acts on its
//! decisions and waits for the deadline.

use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteState {
    Idle,
    Pending { deadline: Instant },
}

/// What the caller must do after a [`WriteScheduler::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// Nothing changes.
    Nothing,
    /// A countdown started; flush once `deadline` passes.
    Scheduled(Instant),
    /// The pending countdown was cancelled; flush right now.
    FlushNow,
}

/// Single-shot debounce timer state.
#[derive(Debug, Clone)]
pub struct WriteScheduler {
    delay: Duration,
    state: WriteState,
}

impl WriteScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: WriteState::Idle,
        }
    }

    /// Deadline of the pending write, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            WriteState::Idle => None,
            WriteState::Pending { deadline } => Some(deadline),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, WriteState::Pending { .. })
    }

    /// Handles a write request made at `now`.
    pub fn request(&mut self, force: bool, now: Instant) -> WriteDecision {
        match (force, self.state) {
            (true, WriteState::Pending { .. }) => {
                self.state = WriteState::Idle;
                WriteDecision::FlushNow
            }
            (false, WriteState::Idle) => {
                let deadline = now + self.delay;
                self.state = WriteState::Pending { deadline };
                WriteDecision::Scheduled(deadline)
            }
            _ => WriteDecision::Nothing,
        }
    }

    /// Returns `true` (and goes back to `Idle`) when the pending deadline has
    /// been reached at `now`.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.state {
            WriteState::Pending { deadline } if now >= deadline => {
                self.state = WriteState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending countdown.  Returns whether one existed.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = WriteState::Idle;
        was_pending
    }
}
