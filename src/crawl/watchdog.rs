// src/crawl/watchdog.rs
// =============================================================================
// Inactivity timer for one domain crawl.
//
// The watchdog is armed when a domain crawl starts and reset on every crawl
// event (page found or page failed). If a full window passes without any
// event it fires once: the callback runs and the cancellation token is
// cancelled, which is what the orchestrator and the crawler listen to.
//
// At most one timer task exists at a time: reset() aborts the pending timer
// before spawning the next one. Dropping the watchdog disarms it.
// =============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

type FireCallback = Arc<dyn Fn() + Send + Sync>;

pub struct Watchdog {
    timeout: Duration,
    on_fire: FireCallback,
    token: CancellationToken,
    fired: Arc<AtomicBool>,
    timer: Option<JoinHandle<()>>,
    span: tracing::Span,
}

impl Watchdog {
    /// Starts a watchdog that calls `on_fire` after `timeout` of inactivity
    ///
    /// Must be called inside a tokio runtime. The timer task runs in the
    /// tracing span that is current here.
    pub fn arm<F>(timeout: Duration, on_fire: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut watchdog = Self {
            timeout,
            on_fire: Arc::new(on_fire),
            token: CancellationToken::new(),
            fired: Arc::new(AtomicBool::new(false)),
            timer: None,
            span: tracing::Span::current(),
        };
        watchdog.start();
        watchdog
    }

    /// Restarts the countdown from a full window
    ///
    /// No effect once the watchdog has fired.
    pub fn reset(&mut self) {
        if self.has_fired() {
            return;
        }
        self.disarm();
        self.start();
    }

    /// Cancels the pending timer, if any. Idempotent.
    pub fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Token cancelled when the watchdog fires
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    fn start(&mut self) {
        let timeout = self.timeout;
        let on_fire = Arc::clone(&self.on_fire);
        let token = self.token.clone();
        let fired = Arc::clone(&self.fired);

        let timer = tokio::spawn(
            async move {
                tokio::time::sleep(timeout).await;
                // swap guards against a reset racing with the wake-up
                if !fired.swap(true, Ordering::SeqCst) {
                    on_fire();
                    token.cancel();
                }
            }
            .instrument(self.span.clone()),
        );

        self.timer = Some(timer);
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_timeout() {
        let (count, on_fire) = counter();
        let watchdog = Watchdog::arm(Duration::from_secs(60), on_fire);

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert!(!watchdog.has_fired());

        watchdog.token().cancelled().await;
        assert!(watchdog.has_fired());
        assert!(watchdog.token().is_cancelled());

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restarts_window() {
        let (count, on_fire) = counter();
        let mut watchdog = Watchdog::arm(Duration::from_secs(60), on_fire);

        tokio::time::sleep(Duration::from_secs(50)).await;
        watchdog.reset();
        tokio::time::sleep(Duration::from_secs(50)).await;
        // 100s since arm, only 50s since the reset
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_prevents_firing() {
        let (count, on_fire) = counter();
        let mut watchdog = Watchdog::arm(Duration::from_secs(60), on_fire);

        watchdog.disarm();
        watchdog.disarm();
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(!watchdog.token().is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_disarms() {
        let (count, on_fire) = counter();
        let watchdog = Watchdog::arm(Duration::from_secs(60), on_fire);
        drop(watchdog);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_after_fire_is_noop() {
        let (count, on_fire) = counter();
        let mut watchdog = Watchdog::arm(Duration::from_secs(10), on_fire);

        watchdog.token().cancelled().await;
        watchdog.reset();
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
