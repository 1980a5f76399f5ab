use crate::pal::Platform;

/// How hard [`Clock::sleep_until()`][crate::Clock::sleep_until] works to hit its target.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum SleepMode {
    /// Issues a single OS wait toward the target and returns when it ends.
    ///
    /// Operating system wait primitives may wake up early (e.g. when interrupted by a signal)
    /// or late (coarse timer granularity, scheduling delays), so the counter may not have reached
    /// the target yet when this returns. Suitable for pacing with tolerance.
    ///
    /// If no OS wait primitive can be armed, the wait degrades to [`std::thread::sleep()`]. On
    /// Windows this has the granularity of the system timer interval (typically between 1 ms
    /// and 15.6 ms), so short waits may overshoot by up to one interval.
    Approximate,

    /// Repeats approximate waits until the counter has provably reached the target.
    ///
    /// Every iteration yields the thread to the OS, so this is not a busy spin. When this
    /// returns, [`Clock::now()`][crate::Clock::now] is guaranteed to be at or past the target.
    Exact,
}

/// Blocks the current thread until `platform` reports a counter value of at least `target`,
/// with the accuracy guarantee chosen by `mode`.
pub(crate) fn sleep_until(platform: &impl Platform, target: u64, mode: SleepMode) {
    match mode {
        SleepMode::Approximate => wait_once(platform, target),
        SleepMode::Exact => {
            while platform.now() < target {
                wait_once(platform, target);
            }
        }
    }
}

fn wait_once(platform: &impl Platform, target: u64) {
    let now = platform.now();

    // A target in the past (or right now) needs no waiting. We never sleep backward.
    let Some(remaining) = target.checked_sub(now).filter(|remaining| *remaining > 0) else {
        return;
    };

    platform.wait(target, remaining);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{self, AtomicU64};

    use mockall::Sequence;

    use super::*;
    use crate::pal::MockPlatform;

    #[test]
    fn approximate_with_past_target_does_not_wait() {
        let mut platform = MockPlatform::new();

        platform.expect_now().once().return_const(1_000_u64);
        platform.expect_wait().never();

        sleep_until(&platform, 500, SleepMode::Approximate);
    }

    #[test]
    fn approximate_with_current_target_does_not_wait() {
        let mut platform = MockPlatform::new();

        platform.expect_now().once().return_const(1_000_u64);
        platform.expect_wait().never();

        sleep_until(&platform, 1_000, SleepMode::Approximate);
    }

    #[test]
    fn approximate_waits_exactly_once() {
        let mut platform = MockPlatform::new();

        platform.expect_now().once().return_const(1_000_u64);
        platform
            .expect_wait()
            .withf(|target, remaining| *target == 1_600 && *remaining == 600)
            .once()
            .return_const(());

        // Even though the mock clock never advances, one wait is all we do.
        sleep_until(&platform, 1_600, SleepMode::Approximate);
    }

    #[test]
    fn exact_with_past_target_does_not_wait() {
        let mut platform = MockPlatform::new();

        platform.expect_now().once().return_const(2_000_u64);
        platform.expect_wait().never();

        sleep_until(&platform, 1_999, SleepMode::Exact);
    }

    #[test]
    fn exact_rearms_after_early_wakeups() {
        let mut platform = MockPlatform::new();

        let mut seq = Sequence::new();

        // Each round checks the loop condition, then reads again before waiting.
        for (now, remaining) in [(0_u64, 100_u64), (40, 60), (95, 5)] {
            platform
                .expect_now()
                .once()
                .in_sequence(&mut seq)
                .return_const(now);
            platform
                .expect_now()
                .once()
                .in_sequence(&mut seq)
                .return_const(now);
            platform
                .expect_wait()
                .withf(move |target, r| *target == 100 && *r == remaining)
                .once()
                .in_sequence(&mut seq)
                .return_const(());
        }

        // Finally the target is reached.
        platform
            .expect_now()
            .once()
            .in_sequence(&mut seq)
            .return_const(100_u64);

        sleep_until(&platform, 100, SleepMode::Exact);
    }

    #[test]
    fn exact_tolerates_overshoot() {
        let mut platform = MockPlatform::new();

        let mut seq = Sequence::new();
        platform
            .expect_now()
            .times(2)
            .in_sequence(&mut seq)
            .return_const(10_u64);
        platform
            .expect_wait()
            .once()
            .in_sequence(&mut seq)
            .return_const(());
        platform
            .expect_now()
            .once()
            .in_sequence(&mut seq)
            .return_const(5_000_u64);

        sleep_until(&platform, 20, SleepMode::Exact);
    }

    #[test]
    fn exact_always_ends_at_or_past_target() {
        const TARGET: u64 = 1_000_000;

        // A clock that advances only when waited on, and only by a fraction of what was asked.
        let counter = Arc::new(AtomicU64::new(0));

        let mut platform = MockPlatform::new();

        platform.expect_now().returning({
            let counter = Arc::clone(&counter);
            move || counter.load(atomic::Ordering::Relaxed)
        });
        platform.expect_wait().returning({
            let counter = Arc::clone(&counter);
            move |_, remaining| {
                counter.fetch_add(remaining.div_ceil(3), atomic::Ordering::Relaxed);
            }
        });

        sleep_until(&platform, TARGET, SleepMode::Exact);

        assert!(counter.load(atomic::Ordering::Relaxed) >= TARGET);
    }
}
