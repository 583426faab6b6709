use core::marker::PhantomData;

use crate::{Error, Result, Tick, TickSource};

const MILLISECONDS_PER_SECOND: u64 = 1000;

/// Timer initialization parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config<T: Tick> {
    /// The timer interval in ticks.
    pub interval: T,
}

impl<T: Tick> Config<T> {
    /// Create a config with an interval of `interval` ticks.
    pub const fn new(interval: T) -> Self {
        Self { interval }
    }

    /// Create a config with an interval of `seconds` for the tick rate of `S`.
    pub fn from_secs<S: TickSource<Tick = T>>(seconds: u32) -> Result<Self> {
        let ticks = seconds as u64 * S::FREQ as u64;
        T::checked_from_u64(ticks)
            .map(Self::new)
            .ok_or(Error::InvalidParameter)
    }

    /// Create a config with an interval of `milliseconds` for the tick rate of `S`.
    ///
    /// Sub-tick remainders are rounded up so that the timer never expires early.
    pub fn from_millis<S: TickSource<Tick = T>>(milliseconds: u64) -> Result<Self> {
        let freq = S::FREQ as u64;
        let seconds = milliseconds / MILLISECONDS_PER_SECOND;
        let sub_seconds = milliseconds % MILLISECONDS_PER_SECOND;
        let ticks = seconds
            .checked_mul(freq)
            .and_then(|ticks| {
                let sub_ticks = (sub_seconds * freq + MILLISECONDS_PER_SECOND - 1)
                    / MILLISECONDS_PER_SECOND;
                ticks.checked_add(sub_ticks)
            })
            .ok_or(Error::InvalidParameter)?;
        T::checked_from_u64(ticks)
            .map(Self::new)
            .ok_or(Error::InvalidParameter)
    }

    /// The default config for timers running on `S`: an interval of one second,
    /// clamped to the counter range.
    pub fn default_for<S: TickSource<Tick = T>>() -> Self {
        Self::new(T::saturating_from_u64(S::FREQ as u64))
    }
}

/// Converts tick counts into wall time for the tick rate of `S`.
pub struct Ticks<S: TickSource>(PhantomData<S>);

impl<S: TickSource> Ticks<S> {
    /// Convert `ticks` into milliseconds, rounded to nearest.
    pub fn to_millis(ticks: S::Tick) -> u64 {
        let freq = S::FREQ as u64;
        if freq == 0 {
            return 0;
        }
        let ticks = ticks.saturating_into_u64();
        let seconds = ticks / freq;
        let sub_seconds = ticks % freq;
        seconds
            .saturating_mul(MILLISECONDS_PER_SECOND)
            .saturating_add((sub_seconds * MILLISECONDS_PER_SECOND + freq / 2) / freq)
    }
}
