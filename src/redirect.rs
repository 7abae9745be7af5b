//! Delayed redirect used by the front-ends after a game over.
//!
//! The game core only reports `Status::GameOver`. Leaving the game view is a
//! UI decision: the front-end schedules a redirect, polls it from its own
//! event loop, and may cancel it (for example when the player quits first).

use std::time::{Duration, Instant};

pub const GAME_OVER_REDIRECT_DELAY_MS: u64 = 1000;
/// How long the game-over screen stays up before returning to the start screen.
pub const GAME_OVER_REDIRECT_DELAY: Duration = Duration::from_millis(GAME_OVER_REDIRECT_DELAY_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledRedirect {
    due_at: Instant,
    cancelled: bool,
}

impl ScheduledRedirect {
    #[must_use]
    pub fn schedule(delay: Duration) -> Self {
        Self::schedule_at(Instant::now(), delay)
    }

    #[must_use]
    pub fn schedule_at(now: Instant, delay: Duration) -> Self {
        Self {
            due_at: now + delay,
            cancelled: false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    #[must_use]
    pub fn is_due(&self) -> bool {
        self.is_due_at(Instant::now())
    }

    /// A cancelled redirect never becomes due.
    #[must_use]
    pub fn is_due_at(&self, now: Instant) -> bool {
        !self.cancelled && now >= self.due_at
    }

    /// Time left before the redirect fires; zero once due or cancelled.
    #[must_use]
    pub fn remaining_at(&self, now: Instant) -> Duration {
        if self.cancelled {
            return Duration::ZERO;
        }
        self.due_at.saturating_duration_since(now)
    }
}
