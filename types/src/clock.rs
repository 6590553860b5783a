//! Time source seam.
//!
//! The registry never reads the wall clock directly; the execution
//! environment hands it a [`Clock`]. Tests swap in a deterministic one.

use crate::Timestamp;

/// A monotonically non-decreasing timestamp source.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
