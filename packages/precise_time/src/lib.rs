#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A high-resolution monotonic tick counter with unit conversions and a sleep primitive that can
//! wait until a precise tick value is reached.
//!
//! This crate offers a [`Clock`] that reads the least-overhead monotonic counter the operating
//! system provides (`QueryPerformanceCounter` on Windows, `clock_gettime(CLOCK_MONOTONIC)` on
//! Unix). The counter is exposed as raw ticks (`u64`) together with conversions to and from
//! seconds, milliseconds and nanoseconds, so callers never branch on platform.
//!
//! # Key Features
//!
//! - **Monotonic ticks**: Unaffected by wall clock adjustments (NTP, manual date changes)
//! - **Unit conversions**: Ticks to/from seconds, milliseconds and nanoseconds as `f64`
//! - **Sleep until a tick value**: Either a single approximate OS wait or an exact wait that
//!   re-arms until the target is provably reached
//! - **Stopwatch**: Measures elapsed time from a reset point
//!
//! # Basic Usage
//!
//! ```rust
//! use precise_time::{Clock, SleepMode};
//!
//! let clock = Clock::new();
//!
//! let start = clock.now();
//! let target = start.saturating_add(clock.milliseconds_to_ticks(5.0));
//!
//! clock.sleep_until(target, SleepMode::Exact);
//!
//! assert!(clock.now() >= target);
//! println!(
//!     "Slept for {:.3} ms",
//!     clock.ticks_to_milliseconds(clock.now() - start)
//! );
//! ```
//!
//! # Measuring elapsed time
//!
//! ```rust
//! use precise_time::Stopwatch;
//!
//! let mut stopwatch = Stopwatch::new();
//!
//! // Do some work...
//! std::thread::sleep(std::time::Duration::from_millis(2));
//!
//! println!("Work took {:.3} ms", stopwatch.elapsed_milliseconds());
//!
//! stopwatch.reset();
//! assert!(stopwatch.elapsed_seconds() < 1.0);
//! ```
//!
//! # Degraded operation
//!
//! The crate never returns errors. If the operating system refuses a clock read or a wait, the
//! failure is reported as a `tracing` warning and a coarser fallback is used instead. See
//! [`SleepMode::Approximate`] for the resolution limits of the fallback wait.

mod pal;

mod clock;
mod idempotent;
mod sleep;
mod stopwatch;
mod tick_rate;

pub use clock::*;
pub use sleep::SleepMode;
pub use stopwatch::*;
