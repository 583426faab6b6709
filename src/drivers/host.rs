use std::time::Instant;

use crate::{SourceError, TickSource};

/// A millisecond tick counter for hosted targets.
///
/// Counts milliseconds since creation, truncated to 32 bits so that it wraps
/// like a hardware counter after about 49.7 days.
#[derive(Debug, Clone, Copy)]
pub struct StdTickSource {
    epoch: Instant,
}

impl StdTickSource {
    /// Create a counter starting at zero now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for StdTickSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for StdTickSource {
    type Tick = u32;
    const FREQ: u32 = 1000;

    fn ticks(&self) -> Result<u32, SourceError> {
        Ok(self.epoch.elapsed().as_millis() as u32)
    }
}
