use std::time::Duration;

use crate::Clock;

/// Measures the time elapsed since it was created or last reset.
///
/// The stopwatch stores the counter value at its start point and compares it against the
/// current counter value whenever it is read. Reading does not modify the stopwatch.
///
/// A stopwatch is only meaningful in the process that created it.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use precise_time::Stopwatch;
///
/// let mut stopwatch = Stopwatch::new();
///
/// std::thread::sleep(Duration::from_millis(5));
/// assert!(stopwatch.elapsed_milliseconds() >= 5.0);
///
/// stopwatch.reset();
/// assert!(stopwatch.elapsed() < Duration::from_secs(1));
/// ```
#[derive(Clone, Debug)]
pub struct Stopwatch {
    clock: Clock,
    start_ticks: u64,
}

impl Stopwatch {
    /// Creates a stopwatch that starts measuring immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Clock::new())
    }

    /// Creates a stopwatch that starts measuring immediately, reading time from `clock`.
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        let start_ticks = clock.now();

        Self { clock, start_ticks }
    }

    /// Restarts the measurement from the current moment.
    pub fn reset(&mut self) {
        self.start_ticks = self.clock.now();
    }

    /// The counter value at the moment the stopwatch was created or last reset.
    #[must_use]
    pub fn start_ticks(&self) -> u64 {
        self.start_ticks
    }

    /// Seconds elapsed since the start point.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.clock.ticks_to_seconds(self.elapsed_ticks())
    }

    /// Milliseconds elapsed since the start point.
    #[must_use]
    pub fn elapsed_milliseconds(&self) -> f64 {
        self.clock.ticks_to_milliseconds(self.elapsed_ticks())
    }

    /// Nanoseconds elapsed since the start point.
    #[must_use]
    pub fn elapsed_nanoseconds(&self) -> f64 {
        self.clock.ticks_to_nanoseconds(self.elapsed_ticks())
    }

    /// Time elapsed since the start point.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.ticks_to_duration(self.elapsed_ticks())
    }

    fn elapsed_ticks(&self) -> u64 {
        self.clock.now().saturating_sub(self.start_ticks)
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;
    use std::sync::Arc;
    use std::sync::atomic::{self, AtomicU64};

    use mockall::Sequence;
    use static_assertions::assert_impl_all;

    use super::*;
    use crate::SleepMode;
    use crate::pal::MockPlatform;
    use crate::tick_rate::TickRate;

    assert_impl_all!(Stopwatch: Send, Sync, Clone, Debug, Default);

    fn clock_reading(values: &[u64]) -> Clock {
        let mut platform = MockPlatform::new();

        platform
            .expect_tick_rate()
            .return_const(TickRate::Nanoseconds);

        let mut seq = Sequence::new();
        for value in values {
            platform
                .expect_now()
                .once()
                .in_sequence(&mut seq)
                .return_const(*value);
        }

        Clock::from_pal(platform.into())
    }

    #[test]
    fn starts_at_construction() {
        let stopwatch = Stopwatch::with_clock(clock_reading(&[1_000, 3_500_000]));

        assert_eq!(stopwatch.start_ticks(), 1_000);
        assert!((stopwatch.elapsed_nanoseconds() - 3_499_000.0).abs() < 1e-9);
    }

    #[test]
    fn elapsed_in_every_unit() {
        let stopwatch = Stopwatch::with_clock(clock_reading(&[
            0,
            2_000_000_000,
            2_000_000_000,
            2_000_000_000,
            2_000_000_000,
        ]));

        assert!((stopwatch.elapsed_seconds() - 2.0).abs() < 1e-12);
        assert!((stopwatch.elapsed_milliseconds() - 2_000.0).abs() < 1e-9);
        assert!((stopwatch.elapsed_nanoseconds() - 2_000_000_000.0).abs() < 1e-3);
        assert_eq!(stopwatch.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn reading_does_not_reset() {
        let stopwatch = Stopwatch::with_clock(clock_reading(&[100, 300, 700]));

        assert_eq!(stopwatch.elapsed(), Duration::from_nanos(200));
        assert_eq!(stopwatch.elapsed(), Duration::from_nanos(600));
        assert_eq!(stopwatch.start_ticks(), 100);
    }

    #[test]
    fn reset_moves_start_point() {
        let mut stopwatch = Stopwatch::with_clock(clock_reading(&[100, 5_000, 5_250]));

        stopwatch.reset();

        assert_eq!(stopwatch.start_ticks(), 5_000);
        assert_eq!(stopwatch.elapsed(), Duration::from_nanos(250));
    }

    #[test]
    fn exact_sleep_for_is_never_measured_short() {
        // A counter rate that does not divide evenly into milliseconds.
        let counter = Arc::new(AtomicU64::new(1_000));

        let mut platform = MockPlatform::new();

        platform
            .expect_tick_rate()
            .return_const(TickRate::Hertz(3_579_545.0));
        platform.expect_now().returning({
            let counter = Arc::clone(&counter);
            move || counter.load(atomic::Ordering::Relaxed)
        });
        // Every wait ends exactly on its target, the tightest wake-up the OS could give.
        platform.expect_wait().returning({
            let counter = Arc::clone(&counter);
            move |target, _| counter.store(target, atomic::Ordering::Relaxed)
        });

        let clock = Clock::from_pal(platform.into());
        let stopwatch = Stopwatch::with_clock(clock.clone());

        clock.sleep_for(Duration::from_millis(10), SleepMode::Exact);

        let elapsed = stopwatch.elapsed_milliseconds();
        assert!(elapsed >= 10.0, "elapsed {elapsed} ms");
        assert!(stopwatch.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot talk to the real platform")]
    fn fresh_stopwatch_is_near_zero() {
        let stopwatch = Stopwatch::new();

        assert!(stopwatch.elapsed_seconds() < 0.001);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot talk to the real platform")]
    fn exact_sleep_is_fully_measured() {
        let clock = Clock::new();
        let mut stopwatch = Stopwatch::with_clock(clock.clone());

        stopwatch.reset();

        let target = clock.now().saturating_add(clock.milliseconds_to_ticks(100.0));
        clock.sleep_until(target, SleepMode::Exact);

        let elapsed = stopwatch.elapsed_milliseconds();
        assert!(elapsed >= 100.0, "elapsed {elapsed} ms");
        assert!(elapsed < 200.0, "elapsed {elapsed} ms");
    }
}
