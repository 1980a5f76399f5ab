use crate::idempotent::IdempotentF64;
use crate::pal::windows::{Bindings, BindingsFacade};
use crate::pal::{Platform, observed_or_last};
use crate::tick_rate::TickRate;

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform =
    BuildTargetPlatform::new(BindingsFacade::real());

/// Windows 10 and newer always report this performance counter frequency.
const FALLBACK_FREQUENCY: f64 = 10_000_000.0;

/// Waitable timers count in intervals of this many nanoseconds.
const TIMER_INTERVAL_NANOS: u128 = 100;

/// The Windows platform counts in performance counter ticks, whose frequency is queried once
/// on first use and then reused for the lifetime of the platform.
#[derive(Debug)]
pub(crate) struct BuildTargetPlatform {
    bindings: BindingsFacade,

    frequency: IdempotentF64,
}

impl BuildTargetPlatform {
    // Only executed in const context.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub(crate) const fn new(bindings: BindingsFacade) -> Self {
        Self {
            bindings,
            frequency: IdempotentF64::new(),
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "real counter frequencies are far below 2^53"
    )]
    fn query_frequency(&self) -> f64 {
        match self.bindings.query_performance_frequency() {
            Ok(frequency) if frequency > 0 => frequency as f64,
            Ok(_) => {
                tracing::warn!(
                    fallback_hz = FALLBACK_FREQUENCY,
                    "performance counter reported zero frequency, assuming fallback frequency"
                );

                FALLBACK_FREQUENCY
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    fallback_hz = FALLBACK_FREQUENCY,
                    "performance frequency query failed, assuming fallback frequency"
                );

                FALLBACK_FREQUENCY
            }
        }
    }
}

impl Platform for BuildTargetPlatform {
    fn now(&self) -> u64 {
        observed_or_last(self.bindings.query_performance_counter())
    }

    fn tick_rate(&self) -> TickRate {
        TickRate::Hertz(self.frequency.get_or_compute(|| self.query_frequency()))
    }

    fn wait(&self, _target: u64, remaining: u64) {
        let remaining = self.tick_rate().ticks_to_duration(remaining);

        // Rounded up so that the timer never fires before the target because of truncation.
        let hundred_nanos = u64::try_from(remaining.as_nanos().div_ceil(TIMER_INTERVAL_NANOS))
            .unwrap_or(u64::MAX)
            .max(1);

        if let Err(error) = self.bindings.wait_on_thread_timer(hundred_nanos) {
            tracing::warn!(
                %error,
                ?remaining,
                "waitable timer sleep failed, falling back to thread sleep"
            );

            self.bindings.thread_sleep(remaining);
        }
    }
}
