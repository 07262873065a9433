//! Fixed-interval background refresh owned by a handle.
//!
//! The task lives exactly as long as its [`Poller`]: dropping the handle aborts
//! it, so a refresh loop can never outlive the view or service that started it.
//!
//! This is for headless native consumers (scripts, daemons, integration
//! harnesses) that drive the client on a tokio runtime. The Dioxus views do not
//! use it: their loops touch signals, which are not `Send`, so they run as
//! component-scoped `use_future` tasks in the `ui` crate instead.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Shortest accepted interval. Anything below is raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Poller {
    task: JoinHandle<()>,
}

impl Poller {
    /// Run `tick` now and then every `interval` on the current tokio runtime.
    /// A slow tick delays the next one instead of bunching them up.
    /// `interval` is raised to [`MIN_INTERVAL`] when shorter.
    pub fn spawn<F, Fut>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let interval = interval.max(MIN_INTERVAL);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tick().await;
            }
        });
        tracing::debug!(interval_secs = interval.as_secs(), "poller started");
        Self { task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Same as dropping the handle.
    pub fn stop(self) {}
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(interval: Duration) -> (Poller, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let poller = Poller::spawn(interval, move || {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });
        (poller, count)
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_on_interval() {
        let (poller, count) = counting(Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(95)).await;
        // Immediate tick plus 30s, 60s, 90s
        assert_eq!(count.load(Ordering::SeqCst), 4);
        assert!(poller.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_raised_to_minimum() {
        let (poller, count) = counting(Duration::ZERO);
        tokio::time::sleep(Duration::from_millis(3500)).await;
        // Immediate tick plus 1s, 2s, 3s
        assert_eq!(count.load(Ordering::SeqCst), 4);
        assert!(poller.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_dropped() {
        let (poller, count) = counting(Duration::from_secs(10));
        tokio::time::sleep(Duration::from_secs(25)).await;
        let before = count.load(Ordering::SeqCst);
        assert!(before >= 2);

        poller.stop();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), before);
    }
}
