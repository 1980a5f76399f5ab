use std::fmt::Debug;
use std::io;
#[cfg(test)]
use std::sync::Arc;
use std::time::Duration;

#[cfg(test)]
use crate::pal::unix::MockBindings;
use crate::pal::unix::{Bindings, BuildTargetBindings};

#[derive(Clone)]
pub(crate) enum BindingsFacade {
    Real(&'static BuildTargetBindings),

    #[cfg(test)]
    Mock(Arc<MockBindings>),
}

impl BindingsFacade {
    pub(crate) const fn real() -> Self {
        Self::Real(&BuildTargetBindings)
    }
}

impl Bindings for BindingsFacade {
    fn clock_gettime_nanos(&self) -> io::Result<u64> {
        match self {
            Self::Real(bindings) => bindings.clock_gettime_nanos(),
            #[cfg(test)]
            Self::Mock(bindings) => bindings.clock_gettime_nanos(),
        }
    }

    fn sleep_until_nanos(&self, target_nanos: u64, remaining_nanos: u64) -> io::Result<()> {
        match self {
            Self::Real(bindings) => bindings.sleep_until_nanos(target_nanos, remaining_nanos),
            #[cfg(test)]
            Self::Mock(bindings) => bindings.sleep_until_nanos(target_nanos, remaining_nanos),
        }
    }

    fn thread_sleep(&self, duration: Duration) {
        match self {
            Self::Real(bindings) => bindings.thread_sleep(duration),
            #[cfg(test)]
            Self::Mock(bindings) => bindings.thread_sleep(duration),
        }
    }
}

#[cfg(test)]
impl From<MockBindings> for BindingsFacade {
    fn from(bindings: MockBindings) -> Self {
        Self::Mock(Arc::new(bindings))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))] // No API contract to test.
impl Debug for BindingsFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(bindings) => bindings.fmt(f),
            #[cfg(test)]
            Self::Mock(bindings) => bindings.fmt(f),
        }
    }
}
