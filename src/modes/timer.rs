use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, Instant, Sleep};

/// A single re-armable tick deadline.
///
/// Arming replaces any deadline that is still pending, so at most one tick is
/// ever scheduled. A disarmed timer never fires.
pub struct TickTimer {
    sleep: Pin<Box<Sleep>>,
    armed: bool,
}

impl TickTimer {
    pub fn new() -> Self {
        Self {
            sleep: Box::pin(sleep(Duration::ZERO)),
            armed: false,
        }
    }

    /// Fire once, `delay` from now
    pub fn arm(&mut self, delay: Duration) {
        self.sleep.as_mut().reset(Instant::now() + delay);
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Resolves when the armed deadline passes; pends forever while disarmed
    pub async fn fired(&mut self) {
        if !self.armed {
            std::future::pending::<()>().await;
        }
        self.sleep.as_mut().await;
        self.armed = false;
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let mut timer = TickTimer::new();
        let start = Instant::now();

        timer.arm(Duration::from_millis(600));
        timer.fired().await;

        assert!(start.elapsed() >= Duration::from_millis(600));
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_deadline() {
        let mut timer = TickTimer::new();
        let start = Instant::now();

        timer.arm(Duration::from_millis(50));
        timer.arm(Duration::from_millis(500));
        timer.fired().await;

        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarmed_never_fires() {
        let mut timer = TickTimer::new();
        timer.arm(Duration::from_millis(10));
        timer.disarm();

        let fired = tokio::time::timeout(Duration::from_secs(5), timer.fired()).await;
        assert!(fired.is_err());
    }
}
