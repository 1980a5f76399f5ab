use std::cell::Cell;
use std::io;

thread_local! {
    /// The most recent counter value successfully read on the current thread.
    static LAST_OBSERVED: Cell<u64> = const { Cell::new(0) };
}

/// Resolves the outcome of a counter read into a counter value.
///
/// A failed read yields the last value successfully read on the same thread (zero if there was
/// none), which keeps the per-thread view of the counter monotonic.
pub(crate) fn observed_or_last(read: io::Result<u64>) -> u64 {
    match read {
        Ok(value) => {
            LAST_OBSERVED.set(value);
            value
        }
        Err(error) => {
            let last = LAST_OBSERVED.get();

            tracing::warn!(
                %error,
                fallback_ticks = last,
                "monotonic counter read failed, reusing last observed value"
            );

            last
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn successful_read_passes_through() {
        assert_eq!(observed_or_last(Ok(42)), 42);
        assert_eq!(observed_or_last(Ok(43)), 43);
    }

    #[test]
    fn failed_read_reuses_last_value() {
        observed_or_last(Ok(1_000));

        let value = observed_or_last(Err(io::Error::from(io::ErrorKind::Other)));
        assert_eq!(value, 1_000);
    }

    #[test]
    fn failed_read_without_history_is_zero() {
        // A fresh thread has no history, regardless of what other tests observed.
        let value = thread::spawn(|| observed_or_last(Err(io::Error::from(io::ErrorKind::Other))))
            .join()
            .unwrap();

        assert_eq!(value, 0);
    }
}
