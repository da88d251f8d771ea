//! Wall clock and sleeping, behind traits.
//!
//! The poller reads delivery timestamps from a [`Clock`] and waits between
//! ticks through a [`Sleeper`]; tests substitute both.

use std::future::Future;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};

/// Source of the current wall-clock time.
///
/// # Example
///
/// ```
/// use ip_poster::time::{Clock, SystemClock};
///
/// let stamp = SystemClock.now_utc();
/// assert!(stamp.timestamp() > 0);
/// ```
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;

    /// Returns the current time as a UTC timestamp.
    fn now_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.now())
    }
}

/// [`Clock`] reading [`SystemTime::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Returns the time elapsed between `earlier` and `now`.
///
/// A clock that moved backwards yields zero rather than a negative span.
#[must_use]
pub fn elapsed_since(earlier: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - earlier).to_std().unwrap_or(Duration::ZERO)
}

/// Abstraction over async sleeping.
///
/// Production code uses [`TokioSleeper`]; tests use [`InstantSleeper`]
/// to run the poll loop without real delays.
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock frozen at a number of epoch seconds until advanced.
    struct SteppedClock(AtomicU64);

    impl SteppedClock {
        const fn at(secs: u64) -> Self {
            Self(AtomicU64::new(secs))
        }

        fn step(&self, secs: u64) {
            self.0.fetch_add(secs, Ordering::Relaxed);
        }
    }

    impl Clock for SteppedClock {
        fn now(&self) -> SystemTime {
            SystemTime::UNIX_EPOCH + Duration::from_secs(self.0.load(Ordering::Relaxed))
        }
    }

    #[test]
    fn system_clock_tracks_wall_time() {
        let before = Utc::now();
        let stamp = SystemClock.now_utc();

        assert!(stamp >= before);
        assert!(stamp <= Utc::now());
    }

    #[test]
    fn now_utc_matches_now() {
        let clock = SteppedClock::at(1_000_000);

        assert_eq!(clock.now_utc().timestamp(), 1_000_000);
    }

    #[test]
    fn elapsed_since_measures_forward_time() {
        let clock = SteppedClock::at(0);
        let start = clock.now_utc();
        clock.step(90);

        assert_eq!(
            elapsed_since(start, clock.now_utc()),
            Duration::from_secs(90)
        );
    }

    #[test]
    fn elapsed_since_clamps_backwards_clock_to_zero() {
        let later = SteppedClock::at(500).now_utc();
        let earlier = SteppedClock::at(100).now_utc();

        assert_eq!(elapsed_since(later, earlier), Duration::ZERO);
    }

    #[tokio::test]
    async fn instant_sleeper_returns_immediately() {
        let started = std::time::Instant::now();
        InstantSleeper.sleep(Duration::from_secs(3600)).await;

        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_sleeper_waits_for_duration() {
        let started = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_secs(30)).await;

        assert!(started.elapsed() >= Duration::from_secs(30));
    }
}
