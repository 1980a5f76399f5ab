use std::io;

use windows::Win32::Foundation::{CloseHandle, HANDLE, WAIT_OBJECT_0};
use windows::Win32::System::Threading::{
    CREATE_WAITABLE_TIMER_HIGH_RESOLUTION, CREATE_WAITABLE_TIMER_MANUAL_RESET,
    CreateWaitableTimerExW, INFINITE, SetWaitableTimer, TIMER_ALL_ACCESS, WaitForSingleObject,
};
use windows::core::PCWSTR;

/// A waitable timer owned by one thread, closed when dropped.
#[derive(Debug)]
pub(crate) struct SleepTimer {
    handle: HANDLE,
}

impl SleepTimer {
    /// Creates a high-resolution waitable timer if the OS offers one, otherwise a standard one.
    pub(crate) fn create() -> io::Result<Self> {
        // SAFETY: No safety requirements beyond passing valid arguments.
        let high_resolution = unsafe {
            CreateWaitableTimerExW(
                None,
                PCWSTR::null(),
                CREATE_WAITABLE_TIMER_MANUAL_RESET | CREATE_WAITABLE_TIMER_HIGH_RESOLUTION,
                TIMER_ALL_ACCESS.0,
            )
        };

        let handle = match high_resolution {
            Ok(handle) => handle,
            // Older versions of Windows do not know the high-resolution flag.
            // SAFETY: No safety requirements beyond passing valid arguments.
            Err(_) => unsafe {
                CreateWaitableTimerExW(
                    None,
                    PCWSTR::null(),
                    CREATE_WAITABLE_TIMER_MANUAL_RESET,
                    TIMER_ALL_ACCESS.0,
                )
            }?,
        };

        Ok(Self { handle })
    }

    /// Blocks the current thread until `hundred_nanos` 100 ns intervals have passed.
    pub(crate) fn wait(&self, hundred_nanos: u64) -> io::Result<()> {
        // Negative due times are relative to the moment the timer is armed.
        let due_time = i64::try_from(hundred_nanos)
            .unwrap_or(i64::MAX)
            .saturating_neg();

        // SAFETY: The handle is a valid waitable timer owned by us and the due time outlives
        // the call. No completion routine is used.
        unsafe {
            SetWaitableTimer(self.handle, &raw const due_time, 0, None, None, false)?;
        }

        // SAFETY: The handle is a valid waitable timer owned by us.
        let result = unsafe { WaitForSingleObject(self.handle, INFINITE) };

        if result == WAIT_OBJECT_0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

impl Drop for SleepTimer {
    #[cfg_attr(test, mutants::skip)] // Nothing observable to assert on.
    fn drop(&mut self) {
        // SAFETY: The handle is owned by us and is not used after this.
        if let Err(error) = unsafe { CloseHandle(self.handle) } {
            tracing::debug!(%error, "failed to close waitable timer");
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot talk to the real platform")]
    fn timer_waits_at_least_requested_time() {
        let timer = SleepTimer::create().unwrap();

        let started = Instant::now();

        // 2 ms
        timer.wait(20_000).unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot talk to the real platform")]
    fn timer_can_be_rearmed() {
        let timer = SleepTimer::create().unwrap();

        timer.wait(1).unwrap();
        timer.wait(1).unwrap();
    }
}
