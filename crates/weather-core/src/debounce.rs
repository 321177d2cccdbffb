//! Debounce
//!
//! Single-slot scheduling: every `schedule` replaces the pending ticket,
//! and a sleeper that wakes up holding a stale ticket does nothing.
//! The sleeping itself is delegated to a `Timer` so the same code runs
//! on browser timers and on tokio's clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

/// Async sleep provided by the host runtime
#[async_trait(?Send)]
pub trait Timer: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Handle for one scheduled firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Replace-on-reschedule debouncer
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    latest: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Take a new ticket, invalidating any pending one
    pub fn schedule(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The most recently issued ticket
    pub fn latest(&self) -> Ticket {
        Ticket(self.latest.load(Ordering::SeqCst))
    }

    /// Invalidate `ticket` only if nothing was scheduled after it
    pub fn cancel_if_current(&self, ticket: Ticket) -> bool {
        self.latest
            .compare_exchange(ticket.0, ticket.0 + 1, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Sleep for the delay; true if `ticket` is still the latest afterwards
    pub async fn settle(&self, ticket: Ticket, timer: &dyn Timer) -> bool {
        timer.sleep(self.delay).await;
        self.is_current(ticket)
    }
}
