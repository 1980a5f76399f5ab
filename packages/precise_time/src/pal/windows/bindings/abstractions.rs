use std::fmt::Debug;
use std::io;
use std::time::Duration;

/// Bindings for FFI calls into external libraries (either provided by operating system or not).
///
/// All PAL FFI calls must go through this trait, enabling them to be mocked.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + Send + Sync + 'static {
    fn query_performance_counter(&self) -> io::Result<u64>;

    fn query_performance_frequency(&self) -> io::Result<u64>;

    // Arms the waitable timer owned by the current thread with a relative due time, in 100 ns
    // intervals, and blocks until it fires.
    fn wait_on_thread_timer(&self, hundred_nanos: u64) -> io::Result<()>;

    // We also put this here so the fallback path can be verified without really sleeping.
    fn thread_sleep(&self, duration: Duration);
}
