//! Example code for the `README.md` file.
//!
//! This contains the same code that appears in the `precise_time` package `README.md`.

use std::time::Duration;

use precise_time::{Clock, SleepMode, Stopwatch};

fn main() {
    // Degraded clock or sleep operation is reported via `tracing`.
    tracing_subscriber::fmt().init();

    let clock = Clock::new();

    // Pace a loop at 100 Hz, never waking before each frame is due.
    let frame = clock.duration_to_ticks(Duration::from_millis(10));
    let mut next_frame = clock.now();

    let stopwatch = Stopwatch::new();

    for _ in 0..10 {
        next_frame = next_frame.saturating_add(frame);
        clock.sleep_until(next_frame, SleepMode::Exact);
    }

    println!(
        "10 frames took {:.3} ms",
        stopwatch.elapsed_milliseconds()
    );

    let one_second = clock.seconds_to_ticks(1.0);
    println!("One second is {one_second} ticks on this platform");
}
