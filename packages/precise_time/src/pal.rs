mod abstractions;
mod facade;
mod last_observed;

pub(crate) use abstractions::*;
pub(crate) use facade::*;
pub(crate) use last_observed::*;

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub(crate) use unix::*;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub(crate) use windows::*;
