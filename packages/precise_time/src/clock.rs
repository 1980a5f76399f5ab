use std::time::Duration;

use crate::SleepMode;
use crate::pal::{Platform, PlatformFacade};
use crate::sleep;

/// Reads the high-resolution monotonic counter of the operating system and converts between
/// its native ticks and human time units.
///
/// Tick values are opaque points on a timeline that only ever moves forward and is not affected
/// by wall clock adjustments. The difference between two tick values is a duration, which can be
/// converted to seconds, milliseconds or nanoseconds. Tick values are only meaningful within the
/// process that produced them.
///
/// All clocks in the process share the same counter and the same conversion factor, so a clock
/// is cheap to create and tick values from one clock can be used with any other clock.
///
/// # Examples
///
/// ```rust
/// use precise_time::{Clock, SleepMode};
///
/// let clock = Clock::new();
///
/// // Wake up 10 milliseconds from now, not a moment earlier.
/// let deadline = clock.now().saturating_add(clock.milliseconds_to_ticks(10.0));
/// clock.sleep_until(deadline, SleepMode::Exact);
///
/// assert!(clock.now() >= deadline);
/// ```
#[derive(Clone, Debug)]
pub struct Clock {
    platform: PlatformFacade,
}

impl Clock {
    /// Creates a clock backed by the counter of the current platform.
    #[must_use]
    pub fn new() -> Self {
        Self::from_pal(PlatformFacade::real())
    }

    #[must_use]
    pub(crate) fn from_pal(platform: PlatformFacade) -> Self {
        Self { platform }
    }

    /// Returns the current value of the monotonic counter, in ticks.
    ///
    /// Successive reads on the same thread never decrease.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.platform.now()
    }

    /// Converts a number of ticks into nanoseconds.
    #[must_use]
    pub fn ticks_to_nanoseconds(&self, ticks: u64) -> f64 {
        self.platform.tick_rate().ticks_to_nanoseconds(ticks)
    }

    /// Converts a number of ticks into milliseconds.
    #[must_use]
    pub fn ticks_to_milliseconds(&self, ticks: u64) -> f64 {
        self.platform.tick_rate().ticks_to_milliseconds(ticks)
    }

    /// Converts a number of ticks into seconds.
    #[must_use]
    pub fn ticks_to_seconds(&self, ticks: u64) -> f64 {
        self.platform.tick_rate().ticks_to_seconds(ticks)
    }

    /// Converts nanoseconds into the nearest number of ticks.
    ///
    /// Negative and NaN inputs are treated as zero. Inputs too large to represent saturate
    /// to `u64::MAX`.
    #[must_use]
    pub fn nanoseconds_to_ticks(&self, nanoseconds: f64) -> u64 {
        self.platform.tick_rate().nanoseconds_to_ticks(nanoseconds)
    }

    /// Converts milliseconds into the nearest number of ticks.
    ///
    /// Negative and NaN inputs are treated as zero. Inputs too large to represent saturate
    /// to `u64::MAX`.
    #[must_use]
    pub fn milliseconds_to_ticks(&self, milliseconds: f64) -> u64 {
        self.platform.tick_rate().milliseconds_to_ticks(milliseconds)
    }

    /// Converts seconds into the nearest number of ticks.
    ///
    /// Negative and NaN inputs are treated as zero. Inputs too large to represent saturate
    /// to `u64::MAX`.
    #[must_use]
    pub fn seconds_to_ticks(&self, seconds: f64) -> u64 {
        self.platform.tick_rate().seconds_to_ticks(seconds)
    }

    /// Converts a number of ticks into a [`Duration`], rounded to the nearest nanosecond.
    #[must_use]
    pub fn ticks_to_duration(&self, ticks: u64) -> Duration {
        self.platform.tick_rate().ticks_to_duration(ticks)
    }

    /// Converts a [`Duration`] into ticks, rounding up to a whole tick and saturating at
    /// `u64::MAX`.
    ///
    /// The result is never shorter than `duration`, so it can be used to build deadlines.
    #[must_use]
    pub fn duration_to_ticks(&self, duration: Duration) -> u64 {
        self.platform.tick_rate().duration_to_ticks(duration)
    }

    /// Blocks the current thread until the counter reaches `target`.
    ///
    /// Returns immediately if the target has already been reached. With [`SleepMode::Exact`],
    /// [`now()`][Self::now] is guaranteed to be at or past `target` when this returns; with
    /// [`SleepMode::Approximate`] only a single OS wait is performed.
    ///
    /// There is no way to cancel the wait once it has started.
    pub fn sleep_until(&self, target: u64, mode: SleepMode) {
        sleep::sleep_until(&self.platform, target, mode);
    }

    /// Blocks the current thread for `duration`, measured from the moment of the call.
    ///
    /// Equivalent to calling [`sleep_until()`][Self::sleep_until] with a target of
    /// `now() + duration`.
    pub fn sleep_for(&self, duration: Duration, mode: SleepMode) {
        let target = self
            .now()
            .saturating_add(self.duration_to_ticks(duration));

        self.sleep_until(target, mode);
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
