use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::{SourceError, TickSource};

/// A software tick counter advanced from a periodic interrupt.
///
/// Call [`increment`](Self::increment) from e.g. the SysTick handler. The counter
/// reports [`SourceError::NotAvailable`] until it is enabled.
pub struct AtomicTickSource<const HZ: u32> {
    ticks: AtomicU32,
    enabled: AtomicBool,
}

impl<const HZ: u32> AtomicTickSource<HZ> {
    /// Create a disabled counter at zero, useful for static variables.
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            enabled: AtomicBool::new(false),
        }
    }

    /// Start reporting ticks.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Stop reporting ticks. The counter value is kept.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    /// Advance the counter by one tick, wrapping at `u32::MAX`.
    #[inline]
    pub fn increment(&self) {
        // fetch_add wraps on overflow.
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Set the counter to `value`.
    pub fn set(&self, value: u32) {
        self.ticks.store(value, Ordering::Relaxed);
    }
}

impl<const HZ: u32> Default for AtomicTickSource<HZ> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const HZ: u32> TickSource for AtomicTickSource<HZ> {
    type Tick = u32;
    const FREQ: u32 = HZ;

    fn ticks(&self) -> Result<u32, SourceError> {
        if !self.enabled.load(Ordering::Acquire) {
            return Err(SourceError::NotAvailable);
        }
        Ok(self.ticks.load(Ordering::Relaxed))
    }
}
