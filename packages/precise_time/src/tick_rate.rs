use std::time::Duration;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;
const NANOS_PER_MILLISECOND: f64 = 1_000_000.0;
const MILLIS_PER_SECOND: f64 = 1_000.0;

/// How the native counter of a platform relates to real time.
///
/// All conversions are pure functions of the input and the rate. Conversions from float units into
/// ticks round to the nearest tick, while conversions from a [`Duration`] round up to a whole tick
/// so that a deadline built from a duration never lands early. Conversions into ticks saturate:
/// negative and NaN inputs become zero, inputs beyond the range of `u64` become `u64::MAX`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum TickRate {
    /// One tick is one nanosecond. Conversions are plain scaling.
    Nanoseconds,

    /// The counter advances this many ticks per second.
    Hertz(f64),
}

impl TickRate {
    pub(crate) fn ticks_to_nanoseconds(self, ticks: u64) -> f64 {
        match self {
            Self::Nanoseconds => ticks_as_f64(ticks),
            Self::Hertz(frequency) => ticks_as_f64(ticks) * NANOS_PER_SECOND / frequency,
        }
    }

    pub(crate) fn ticks_to_milliseconds(self, ticks: u64) -> f64 {
        match self {
            Self::Nanoseconds => ticks_as_f64(ticks) / NANOS_PER_MILLISECOND,
            Self::Hertz(frequency) => ticks_as_f64(ticks) * MILLIS_PER_SECOND / frequency,
        }
    }

    pub(crate) fn ticks_to_seconds(self, ticks: u64) -> f64 {
        match self {
            Self::Nanoseconds => ticks_as_f64(ticks) / NANOS_PER_SECOND,
            Self::Hertz(frequency) => ticks_as_f64(ticks) / frequency,
        }
    }

    pub(crate) fn nanoseconds_to_ticks(self, nanoseconds: f64) -> u64 {
        match self {
            Self::Nanoseconds => f64_as_ticks(nanoseconds),
            Self::Hertz(frequency) => f64_as_ticks(nanoseconds * frequency / NANOS_PER_SECOND),
        }
    }

    pub(crate) fn milliseconds_to_ticks(self, milliseconds: f64) -> u64 {
        match self {
            Self::Nanoseconds => f64_as_ticks(milliseconds * NANOS_PER_MILLISECOND),
            Self::Hertz(frequency) => f64_as_ticks(milliseconds * frequency / MILLIS_PER_SECOND),
        }
    }

    pub(crate) fn seconds_to_ticks(self, seconds: f64) -> u64 {
        match self {
            Self::Nanoseconds => f64_as_ticks(seconds * NANOS_PER_SECOND),
            Self::Hertz(frequency) => f64_as_ticks(seconds * frequency),
        }
    }

    pub(crate) fn ticks_to_duration(self, ticks: u64) -> Duration {
        match self {
            Self::Nanoseconds => Duration::from_nanos(ticks),
            Self::Hertz(_) => Duration::from_nanos(f64_as_ticks(self.ticks_to_nanoseconds(ticks))),
        }
    }

    pub(crate) fn duration_to_ticks(self, duration: Duration) -> u64 {
        match self {
            Self::Nanoseconds => u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX),
            Self::Hertz(frequency) => {
                f64_ceil_as_ticks(nanos_as_f64(duration.as_nanos()) * frequency / NANOS_PER_SECOND)
            }
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "tick values above 2^53 lose sub-tick precision, which is below the resolution of any real counter"
)]
fn ticks_as_f64(ticks: u64) -> f64 {
    ticks as f64
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "float to integer casts saturate, which is exactly the clamping we want"
)]
fn f64_as_ticks(value: f64) -> u64 {
    value.round() as u64
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "float to integer casts saturate, which is exactly the clamping we want"
)]
fn f64_ceil_as_ticks(value: f64) -> u64 {
    value.ceil() as u64
}

#[expect(
    clippy::cast_precision_loss,
    reason = "durations above 2^53 nanoseconds (about 104 days) lose sub-nanosecond precision only"
)]
fn nanos_as_f64(nanos: u128) -> f64 {
    nanos as f64
}
