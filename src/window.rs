use crate::tick::{self, Tick};

/// The half-open tick range `[start, end)` during which a timer is running.
///
/// The range may straddle the counter wrap, in which case `end < start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window<T: Tick> {
    start: T,
    end: T,
}

impl<T: Tick> Window<T> {
    /// Create the window opening at `start` and lasting `interval` ticks.
    pub fn new(start: T, interval: T) -> Self {
        Self {
            start,
            end: tick::advance(start, interval),
        }
    }

    /// The tick at which the window opened.
    pub fn start(&self) -> T {
        self.start
    }

    /// The tick at which the window closes.
    pub fn end(&self) -> T {
        self.end
    }

    /// Get the number of ticks left until the window closes at `now`,
    /// or `None` if it has already closed.
    pub fn remaining(&self, now: T) -> Option<T> {
        let (s, e) = (self.start, self.end);

        //  s == e : |---X----------------|  zero length, always closed
        //  s  < e : |---s---------e--n---|  closed when n >= e
        //           |--n--s---e----------|  or when the counter wrapped past s
        //  s  > e : |----e-n---------s---|  closed when e <= n < s
        if s == e {
            None
        } else if s < e {
            if now >= e || now < s {
                None
            } else {
                Some(e.wrapping_sub(now))
            }
        } else if now >= e && now < s {
            None
        } else if now < e {
            Some(e.wrapping_sub(now))
        } else {
            // (MAX - now) + e + 1
            Some(T::MAX.wrapping_sub(now).wrapping_add(e).wrapping_add(tick::one()))
        }
    }

    /// Get whether the window has closed at `now`.
    pub fn is_closed(&self, now: T) -> bool {
        self.remaining(now).is_none()
    }

    /// Get the number of ticks passed since the window opened.
    pub fn passed(&self, now: T) -> T {
        tick::elapsed(now, self.start)
    }
}
