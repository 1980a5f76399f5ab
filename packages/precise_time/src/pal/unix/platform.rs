use std::io;
use std::time::Duration;

use crate::pal::unix::{Bindings, BindingsFacade};
use crate::pal::{Platform, observed_or_last};
use crate::tick_rate::TickRate;

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform =
    BuildTargetPlatform::new(BindingsFacade::real());

/// The Unix platform counts in nanoseconds of `CLOCK_MONOTONIC`, so ticks need no calibration.
#[derive(Debug)]
pub(crate) struct BuildTargetPlatform {
    bindings: BindingsFacade,
}

impl BuildTargetPlatform {
    pub(crate) const fn new(bindings: BindingsFacade) -> Self {
        Self { bindings }
    }
}

impl Platform for BuildTargetPlatform {
    fn now(&self) -> u64 {
        observed_or_last(self.bindings.clock_gettime_nanos())
    }

    fn tick_rate(&self) -> TickRate {
        TickRate::Nanoseconds
    }

    fn wait(&self, target: u64, remaining: u64) {
        match self.bindings.sleep_until_nanos(target, remaining) {
            Ok(()) => {}
            // A signal woke us up early. Early wakeups are permitted.
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => {
                tracing::warn!(
                    %error,
                    remaining_nanos = remaining,
                    "monotonic sleep failed, falling back to thread sleep"
                );

                self.bindings.thread_sleep(Duration::from_nanos(remaining));
            }
        }
    }
}
