use crate::{SourceError, Tick};

/// The monotonic tick counter backing software timers.
///
/// The counter must be monotonically increasing and wrap from `Tick::MAX` to zero.
/// Reading it must not have side effects.
pub trait TickSource {
    /// The counter word.
    type Tick: Tick;

    /// The tick frequency, i.e. the number of ticks per second.
    const FREQ: u32;

    /// Get the current counter value.
    fn ticks(&self) -> Result<Self::Tick, SourceError>;
}

impl<S: TickSource + ?Sized> TickSource for &S {
    type Tick = S::Tick;
    const FREQ: u32 = S::FREQ;

    #[inline]
    fn ticks(&self) -> Result<Self::Tick, SourceError> {
        (**self).ticks()
    }
}
