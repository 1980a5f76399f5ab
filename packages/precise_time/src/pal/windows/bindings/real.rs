use std::time::Duration;
use std::{io, thread};

use windows::Win32::System::Performance::{QueryPerformanceCounter, QueryPerformanceFrequency};

use crate::pal::windows::Bindings;
use crate::pal::windows::bindings::SleepTimer;

thread_local! {
    /// Created on first use by the thread and closed when the thread exits.
    ///
    /// `None` if the OS refused to create a timer for this thread.
    static SLEEP_TIMER: Option<SleepTimer> = create_sleep_timer();
}

/// FFI bindings that target the real operating system that the build is targeting.
///
/// You would only use different bindings in PAL unit tests that need to use mock bindings.
/// Even then, whenever possible, unit tests should use real bindings for maximum realism.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

// Real OS bindings are excluded from coverage measurement because error paths require
// OS-level failures that are impractical to trigger in tests.
#[cfg_attr(coverage_nightly, coverage(off))]
impl Bindings for BuildTargetBindings {
    fn query_performance_counter(&self) -> io::Result<u64> {
        let mut value: i64 = 0;

        // SAFETY: We are passing valid arguments, no other safety requirements.
        unsafe { QueryPerformanceCounter(&raw mut value) }?;

        u64::try_from(value).map_err(|_| io::Error::other("performance counter is negative"))
    }

    fn query_performance_frequency(&self) -> io::Result<u64> {
        let mut value: i64 = 0;

        // SAFETY: We are passing valid arguments, no other safety requirements.
        unsafe { QueryPerformanceFrequency(&raw mut value) }?;

        u64::try_from(value).map_err(|_| io::Error::other("performance frequency is negative"))
    }

    fn wait_on_thread_timer(&self, hundred_nanos: u64) -> io::Result<()> {
        SLEEP_TIMER.with(|timer| match timer {
            Some(timer) => timer.wait(hundred_nanos),
            None => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "no waitable timer is available on this thread",
            )),
        })
    }

    fn thread_sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[cfg_attr(test, mutants::skip)] // Failure requires the OS to refuse handle creation.
fn create_sleep_timer() -> Option<SleepTimer> {
    SleepTimer::create()
        .inspect_err(|error| {
            tracing::warn!(
                %error,
                "cannot create waitable timer, sleeps on this thread fall back to thread sleep"
            );
        })
        .ok()
}
