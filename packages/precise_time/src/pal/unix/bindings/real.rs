use std::time::Duration;
use std::{io, mem, ptr, thread};

use libc::{CLOCK_MONOTONIC, timespec};

use crate::pal::unix::Bindings;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

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
    fn clock_gettime_nanos(&self) -> io::Result<u64> {
        // SAFETY: All-zero is a valid initial value for this type.
        let mut ts: timespec = unsafe { mem::zeroed() };

        // SAFETY: We are passing valid arguments, no other safety requirements.
        let result = unsafe { libc::clock_gettime(CLOCK_MONOTONIC, &raw mut ts) };

        if result == 0 {
            Ok(timespec_to_nanos(&ts))
        } else {
            Err(io::Error::last_os_error())
        }
    }

    #[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
    fn sleep_until_nanos(&self, target_nanos: u64, _remaining_nanos: u64) -> io::Result<()> {
        let deadline = nanos_to_timespec(target_nanos);

        // SAFETY: We are passing valid arguments, no other safety requirements.
        let result = unsafe {
            libc::clock_nanosleep(
                CLOCK_MONOTONIC,
                libc::TIMER_ABSTIME,
                &raw const deadline,
                ptr::null_mut(),
            )
        };

        // clock_nanosleep() returns the error code instead of setting errno.
        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::from_raw_os_error(result))
        }
    }

    // No absolute deadlines here (e.g. Apple targets lack TIMER_ABSTIME).
    #[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
    fn sleep_until_nanos(&self, _target_nanos: u64, remaining_nanos: u64) -> io::Result<()> {
        let duration = nanos_to_timespec(remaining_nanos);

        // SAFETY: We are passing valid arguments, no other safety requirements.
        let result = unsafe { libc::nanosleep(&raw const duration, ptr::null_mut()) };

        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    fn thread_sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

fn timespec_to_nanos(ts: &timespec) -> u64 {
    // The monotonic clock never reports negative components.
    let seconds = u64::try_from(ts.tv_sec).unwrap_or_default();
    let nanos = u64::try_from(ts.tv_nsec).unwrap_or_default();

    seconds
        .saturating_mul(NANOS_PER_SECOND)
        .saturating_add(nanos)
}

fn nanos_to_timespec(nanos: u64) -> timespec {
    let duration = Duration::from_nanos(nanos);

    // SAFETY: All-zero is a valid initial value for this type.
    let mut ts: timespec = unsafe { mem::zeroed() };
    ts.tv_sec = duration.as_secs().try_into().unwrap_or(libc::time_t::MAX);
    ts.tv_nsec = duration.subsec_nanos().try_into().unwrap_or_default();

    ts
}
