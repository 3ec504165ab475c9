//! Single-slot debounce timer
//!
//! At most one timer is pending. Arming always cancels the previous one,
//! which is what collapses a burst of input events into one lookup.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

struct PendingTimer {
    generation: u64,
    query: String,
    handle: JoinHandle<()>,
}

pub(crate) struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<PendingTimer>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Arm a timer for `query`, superseding any pending one
    ///
    /// `spawn` receives the timer's generation and deadline and must start a
    /// task that sleeps until the deadline and then calls [`Debouncer::fire`]
    /// with that generation.
    pub fn arm<F>(&mut self, query: String, spawn: F)
    where
        F: FnOnce(u64, Instant) -> JoinHandle<()>,
    {
        self.cancel();
        self.generation += 1;
        let deadline = Instant::now() + self.delay;
        let handle = spawn(self.generation, deadline);
        self.pending = Some(PendingTimer {
            generation: self.generation,
            query,
            handle,
        });
    }

    /// Cancel the pending timer; returns its query if one was pending
    pub fn cancel(&mut self) -> Option<String> {
        self.pending.take().map(|timer| {
            timer.handle.abort();
            timer.query
        })
    }

    /// Claim the pending timer from its own task
    ///
    /// Returns `None` if the timer was superseded or cancelled after it woke.
    pub fn fire(&mut self, generation: u64) -> Option<String> {
        match &self.pending {
            Some(timer) if timer.generation == generation => {
                self.pending.take().map(|timer| timer.query)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_query(&self) -> Option<&str> {
        self.pending.as_ref().map(|timer| timer.query.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_task(_generation: u64, _deadline: Instant) -> JoinHandle<()> {
        tokio::spawn(async {})
    }

    #[tokio::test]
    async fn test_arm_supersedes_previous_timer() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.arm("ab".into(), idle_task);
        debouncer.arm("abc".into(), idle_task);

        assert_eq!(debouncer.pending_query(), Some("abc"));
        assert_eq!(debouncer.fire(1), None, "first generation was superseded");
        assert_eq!(debouncer.fire(2), Some("abc".to_string()));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test]
    async fn test_cancel_prevents_fire() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.arm("ab".into(), idle_task);

        assert_eq!(debouncer.cancel(), Some("ab".to_string()));
        assert_eq!(debouncer.cancel(), None);
        assert_eq!(debouncer.fire(1), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_is_delay_from_arm() {
        let mut debouncer = Debouncer::new(Duration::from_millis(250));
        let armed_at = Instant::now();
        let mut seen = None;
        debouncer.arm("ab".into(), |_, deadline| {
            seen = Some(deadline);
            tokio::spawn(async {})
        });

        assert_eq!(seen, Some(armed_at + Duration::from_millis(250)));
    }
}
