//! Global cooldown between successful lookups.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Wall-clock cooldown measured on the tokio clock.
///
/// `ends_at` never moves backwards: a later activation with the same
/// duration always ends later.
#[derive(Debug)]
pub struct Cooldown {
    duration: Duration,
    ends_at: Mutex<Option<Instant>>,
}

impl Cooldown {
    /// Create an inactive cooldown.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ends_at: Mutex::new(None),
        }
    }

    /// Configured cooldown length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start (or restart) the cooldown from now.
    pub fn activate(&self) {
        let candidate = Instant::now() + self.duration;
        let mut ends_at = self.ends_at.lock();
        *ends_at = Some(match *ends_at {
            Some(current) if current > candidate => current,
            _ => candidate,
        });
    }

    /// Whether the cooldown is still running.
    pub fn is_active(&self) -> bool {
        self.remaining().is_some()
    }

    /// Time left, or `None` when inactive.
    pub fn remaining(&self) -> Option<Duration> {
        let ends_at = (*self.ends_at.lock())?;
        let now = Instant::now();
        (now < ends_at).then(|| ends_at - now)
    }
}
