use std::fmt::Debug;

use crate::tick_rate::TickRate;

/// The operations a build target must provide to implement the clock.
///
/// There is one implementation per supported build target, selected at compile time.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Reads the monotonic counter, in native ticks.
    fn now(&self) -> u64;

    /// The relation between native ticks and real time. Constant for the life of the process.
    fn tick_rate(&self) -> TickRate;

    /// Performs one OS-level wait toward `target`, `remaining` ticks from now.
    ///
    /// The wait may end before or after `target` is reached. Callers needing a guarantee must
    /// check the counter again afterwards.
    fn wait(&self, target: u64, remaining: u64);
}
