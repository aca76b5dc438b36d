//! Timer port used to pace the step loop.
//!
//! The engine only computes how long to wait and when to drop a pending
//! step. Who does the waiting is up to the [`Scheduler`] implementation: a
//! simulated clock in tests, a tokio deadline in the terminal front end.

use std::time::Duration;

/// Something that can call back into the session after a delay
pub trait Scheduler {
    /// Arrange for one step after `after`, replacing any pending step
    fn schedule(&mut self, after: Duration);

    /// Drop the pending step, if any
    fn cancel(&mut self);

    fn is_pending(&self) -> bool;
}

/// Simulated clock. Time only moves when the caller says so.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    now: Duration,
    deadline: Option<Duration>,
    /// Every delay ever requested, in order
    pub scheduled: Vec<Duration>,
    pub cancellations: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Time left until the pending step fires
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_sub(self.now))
    }

    /// Move the clock forward to the pending deadline if it falls within
    /// `limit`, consuming it. Returns whether a step is now due.
    pub fn fire_next_within(&mut self, limit: Duration) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= limit => {
                self.now = deadline;
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Set the clock, firing nothing
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, after: Duration) {
        self.deadline = Some(self.now + after);
        self.scheduled.push(after);
    }

    fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            self.cancellations += 1;
        }
    }

    fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Wall-clock deadline for a tokio event loop
#[derive(Debug, Default, Clone)]
pub struct DeadlineScheduler {
    deadline: Option<tokio::time::Instant>,
}

impl DeadlineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<tokio::time::Instant> {
        self.deadline
    }

    /// Mark the pending step as taken
    pub fn clear(&mut self) {
        self.deadline = None;
    }
}

impl Scheduler for DeadlineScheduler {
    fn schedule(&mut self, after: Duration) {
        self.deadline = Some(tokio::time::Instant::now() + after);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Resolve at `deadline`, or never when nothing is scheduled
pub async fn sleep_until_deadline(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
