use std::fmt::Debug;
use std::io;
use std::time::Duration;

/// Bindings for FFI calls into external libraries (either provided by operating system or not).
///
/// All PAL FFI calls must go through this trait, enabling them to be mocked.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + Send + Sync + 'static {
    // clock_gettime(CLOCK_MONOTONIC), in nanoseconds
    fn clock_gettime_nanos(&self) -> io::Result<u64>;

    // One sleep on the monotonic clock. Targets that support absolute deadlines sleep until
    // `target_nanos`, the rest sleep for `remaining_nanos`.
    fn sleep_until_nanos(&self, target_nanos: u64, remaining_nanos: u64) -> io::Result<()>;

    // We also put this here so the fallback path can be verified without really sleeping.
    fn thread_sleep(&self, duration: Duration);
}
