mod abstractions;
mod facade;
mod real;
mod sleep_timer;

pub(crate) use abstractions::*;
pub(crate) use facade::*;
pub(crate) use real::*;
use sleep_timer::*;
