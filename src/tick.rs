use core::fmt::Debug;

/// A fixed-width unsigned tick counter value.
///
/// The counter runs from `ZERO` to `MAX` and wraps back to `ZERO` on the next increment.
pub trait Tick: Copy + Ord + Debug + Send + Sync + 'static {
    /// The smallest counter value.
    const ZERO: Self;

    /// The largest counter value before the counter wraps.
    const MAX: Self;

    /// Add `rhs` modulo `MAX + 1`.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Subtract `rhs` modulo `MAX + 1`.
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Convert from `u64`, clamping to `MAX`.
    fn saturating_from_u64(value: u64) -> Self;

    /// Convert from `u64`, returning `None` if the value does not fit.
    fn checked_from_u64(value: u64) -> Option<Self>;

    /// Widen to `u64`, clamping to `u64::MAX` for wider words.
    fn saturating_into_u64(self) -> u64;
}

macro_rules! impl_tick {
    ($($ty:ty),*) => {
        $(
            impl Tick for $ty {
                const ZERO: Self = 0;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$ty>::wrapping_add(self, rhs)
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$ty>::wrapping_sub(self, rhs)
                }

                #[inline]
                fn saturating_from_u64(value: u64) -> Self {
                    <$ty>::try_from(value).unwrap_or(<$ty>::MAX)
                }

                #[inline]
                fn checked_from_u64(value: u64) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }

                #[inline]
                fn saturating_into_u64(self) -> u64 {
                    u64::try_from(self).unwrap_or(u64::MAX)
                }
            }
        )*
    };
}

impl_tick!(u8, u16, u32, u64, usize);

/// Get the number of ticks passed from `start` to `current`.
///
/// The counter may have wrapped at most once between the two readings.
#[inline]
pub fn elapsed<T: Tick>(current: T, start: T) -> T {
    if current >= start {
        current.wrapping_sub(start)
    } else {
        // (MAX - start) + 1 + current, evaluated without intermediate overflow.
        T::MAX.wrapping_sub(start).wrapping_add(current).wrapping_add(one())
    }
}

/// Get the tick `interval` ticks after `start`, wrapping past `MAX`.
#[inline]
pub fn advance<T: Tick>(start: T, interval: T) -> T {
    start.wrapping_add(interval)
}

#[inline]
pub(crate) fn one<T: Tick>() -> T {
    T::ZERO.wrapping_sub(T::MAX)
}
