use std::sync::atomic::{self, AtomicBool, AtomicU64};

/// A lazily computed `f64` that may be computed more than once but is never locked.
///
/// Intended for values that are a deterministic function of fixed process properties (such as
/// the frequency of a hardware counter). If several threads miss the cache at the same time, each
/// of them computes the value and stores it; since every thread computes the same value, the
/// race only costs a little duplicated work. Readers never block.
#[derive(Debug)]
#[cfg_attr(
    not(windows),
    allow(dead_code, reason = "only platforms with a measured tick rate use this")
)]
pub(crate) struct IdempotentF64 {
    ready: AtomicBool,
    bits: AtomicU64,
}

#[cfg_attr(
    not(windows),
    allow(dead_code, reason = "only platforms with a measured tick rate use this")
)]
impl IdempotentF64 {
    pub(crate) const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            bits: AtomicU64::new(0),
        }
    }

    /// Returns the stored value, computing and storing it first if no thread has done so yet.
    ///
    /// `compute` must return the same value every time it is called.
    pub(crate) fn get_or_compute(&self, compute: impl FnOnce() -> f64) -> f64 {
        if let Some(value) = self.get() {
            return value;
        }

        let value = compute();

        // The value must be visible before the flag that publishes it.
        self.bits.store(value.to_bits(), atomic::Ordering::Relaxed);
        self.ready.store(true, atomic::Ordering::Release);

        value
    }

    pub(crate) fn get(&self) -> Option<f64> {
        self.ready
            .load(atomic::Ordering::Acquire)
            .then(|| f64::from_bits(self.bits.load(atomic::Ordering::Relaxed)))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;

    #[test]
    fn empty_until_computed() {
        let cell = IdempotentF64::new();
        assert!(cell.get().is_none());

        let value = cell.get_or_compute(|| 1.25);
        assert!(value.to_bits() == 1.25_f64.to_bits());
        assert!(cell.get().is_some_and(|v| v.to_bits() == 1.25_f64.to_bits()));
    }

    #[test]
    fn computes_only_on_miss() {
        let cell = IdempotentF64::new();
        cell.get_or_compute(|| 0.5);

        let value = cell.get_or_compute(|| panic!("value was already stored"));
        assert!(value.to_bits() == 0.5_f64.to_bits());
    }

    #[test]
    #[cfg_attr(miri, ignore = "spawns many threads, too slow under Miri")]
    fn concurrent_first_use_converges() {
        const THREAD_COUNT: usize = 16;

        let cell = Arc::new(IdempotentF64::new());
        let barrier = Arc::new(Barrier::new(THREAD_COUNT));

        let handles = (0..THREAD_COUNT)
            .map(|_| {
                let cell = Arc::clone(&cell);
                let barrier = Arc::clone(&barrier);

                thread::spawn(move || {
                    barrier.wait();
                    cell.get_or_compute(|| 3_579_545.0 / 1e9)
                })
            })
            .collect::<Vec<_>>();

        let expected = (3_579_545.0_f64 / 1e9).to_bits();

        for handle in handles {
            let value = handle.join().unwrap();
            assert_eq!(value.to_bits(), expected);
        }

        assert_eq!(cell.get().map(f64::to_bits), Some(expected));
    }
}
