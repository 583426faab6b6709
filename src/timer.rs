use core::fmt;

use crate::{
    logging::{log_debug, log_trace, log_warn},
    Config, Error, Result, Tick, TickSource, Window,
};

/// The lifecycle state of a [`SwTimer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not initialized, or released.
    Uninitialized,
    /// Initialized but not running.
    Idle,
    /// Running since the last start.
    Active,
}

/// A polled software timer over the counter of a [`TickSource`].
///
/// The timer never changes state by itself: it stays active after its interval
/// has elapsed until it is explicitly stopped or restarted.
pub struct SwTimer<'a, S: TickSource> {
    source: &'a S,
    state: State,
    interval: S::Tick,
    window: Window<S::Tick>,
}

impl<'a, S: TickSource> SwTimer<'a, S> {
    /// Create an uninitialized timer reading ticks from `source`.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            state: State::Uninitialized,
            interval: S::Tick::ZERO,
            window: Window::new(S::Tick::ZERO, S::Tick::ZERO),
        }
    }

    /// Get the default init parameter for timers on this timer's tick source.
    pub fn default_config(&self) -> Config<S::Tick> {
        Config::default_for::<S>()
    }

    /// Initialize the timer, leaving it idle with the interval from `config`.
    ///
    /// An initialized timer may be initialized again, which discards any running interval.
    pub fn init(&mut self, config: Config<S::Tick>) -> Result<()> {
        self.state = State::Idle;
        self.interval = config.interval;
        self.window = Window::new(S::Tick::ZERO, S::Tick::ZERO);

        log_debug!("timer init, interval {}", config.interval.saturating_into_u64());
        Ok(())
    }

    /// Release the timer, returning it to the uninitialized state.
    pub fn release(&mut self) -> Result<()> {
        self.check_initialized()?;

        *self = Self::new(self.source);

        log_debug!("timer released");
        Ok(())
    }

    /// Start the timer with `interval` ticks from now.
    ///
    /// A running timer is restarted from the current tick.
    pub fn start(&mut self, interval: S::Tick) -> Result<()> {
        self.check_initialized()?;
        let now = self.now()?;

        self.state = State::Active;
        self.interval = interval;
        self.window = Window::new(now, interval);

        log_debug!(
            "timer started at {}, expires at {}",
            now.saturating_into_u64(),
            self.window.end().saturating_into_u64()
        );
        Ok(())
    }

    /// Stop the timer.
    ///
    /// The last start and end ticks are kept until the timer is started again.
    pub fn stop(&mut self) -> Result<()> {
        self.check_initialized()?;
        if self.state != State::Active {
            log_trace!("stop denied, timer not active");
            return Err(Error::Denied);
        }

        self.state = State::Idle;

        log_debug!("timer stopped");
        Ok(())
    }

    /// Succeeds if the timer is running, fails with [`Error::NotActive`] otherwise.
    pub fn is_active(&self) -> Result<()> {
        self.check_initialized()?;
        match self.state {
            State::Active => Ok(()),
            _ => Err(Error::NotActive),
        }
    }

    /// Succeeds if the timer is running and not yet expired.
    ///
    /// Fails with [`Error::TimeExpired`] once the interval has elapsed.
    pub fn is_expired(&self) -> Result<()> {
        self.remaining().map(|_| ())
    }

    /// Get the number of ticks until the timer expires.
    ///
    /// Fails with [`Error::TimeExpired`] once the interval has elapsed.
    pub fn remaining(&self) -> Result<S::Tick> {
        self.check_active()?;
        let now = self.now()?;

        self.window.remaining(now).ok_or(Error::TimeExpired)
    }

    /// Get the number of ticks passed since the timer was started.
    ///
    /// The value keeps growing past the interval after the timer has expired.
    pub fn passed(&self) -> Result<S::Tick> {
        self.check_active()?;
        let now = self.now()?;

        Ok(self.window.passed(now))
    }

    /// The lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Get whether the timer is initialized.
    pub fn is_initialized(&self) -> bool {
        self.state != State::Uninitialized
    }

    /// The interval of the last start, or the configured interval if never started.
    pub fn interval(&self) -> S::Tick {
        self.interval
    }

    /// The tick at which the timer was last started.
    pub fn start_tick(&self) -> S::Tick {
        self.window.start()
    }

    /// The tick at which the timer expires.
    pub fn end_tick(&self) -> S::Tick {
        self.window.end()
    }

    /// The tick source backing the timer.
    pub fn source(&self) -> &'a S {
        self.source
    }

    fn check_initialized(&self) -> Result<()> {
        if self.state == State::Uninitialized {
            log_trace!("timer not initialized");
            return Err(Error::InvalidHandle);
        }
        Ok(())
    }

    fn check_active(&self) -> Result<()> {
        self.check_initialized()?;
        if self.state != State::Active {
            log_trace!("timer not active");
            return Err(Error::Denied);
        }
        Ok(())
    }

    fn now(&self) -> Result<S::Tick> {
        self.source.ticks().map_err(|err| {
            log_warn!("tick source read failed: {}", err);
            Error::from(err)
        })
    }
}

impl<S: TickSource> fmt::Debug for SwTimer<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwTimer")
            .field("state", &self.state)
            .field("interval", &self.interval)
            .field("start", &self.window.start())
            .field("end", &self.window.end())
            .finish()
    }
}

#[cfg(test)]
pub mod tests {
    use crate::{adapters::tick::fakes::FakeTickSource, SourceError};

    use super::*;

    fn snapshot<S: TickSource>(timer: &SwTimer<'_, S>) -> (State, S::Tick, S::Tick, S::Tick) {
        (
            timer.state(),
            timer.interval(),
            timer.start_tick(),
            timer.end_tick(),
        )
    }

    #[test]
    fn new_timer_is_uninitialized() {
        let source = FakeTickSource::new(0u32);
        let timer = SwTimer::new(&source);

        assert_eq!(State::Uninitialized, timer.state());
        assert!(!timer.is_initialized());
        assert_eq!(0, source.reads.get());
    }

    #[test]
    fn uninitialized_rejects_everything() {
        let source = FakeTickSource::new(0u32);
        let mut timer = SwTimer::new(&source);

        assert_eq!(Err(Error::InvalidHandle), timer.release());
        assert_eq!(Err(Error::InvalidHandle), timer.start(10));
        assert_eq!(Err(Error::InvalidHandle), timer.stop());
        assert_eq!(Err(Error::InvalidHandle), timer.is_active());
        assert_eq!(Err(Error::InvalidHandle), timer.is_expired());
        assert_eq!(Err(Error::InvalidHandle), timer.remaining());
        assert_eq!(Err(Error::InvalidHandle), timer.passed());

        assert_eq!(State::Uninitialized, timer.state());
        assert_eq!(0, source.reads.get());
    }

    #[test]
    fn default_config_does_not_touch_timer() {
        let source = FakeTickSource::new(0u32);
        let timer = SwTimer::new(&source);

        assert_eq!(Config::new(1000), timer.default_config());
        assert_eq!(State::Uninitialized, timer.state());
        assert_eq!(0, source.reads.get());
    }

    #[test]
    fn init_leaves_timer_idle() {
        let source = FakeTickSource::new(0u32);
        let mut timer = SwTimer::new(&source);

        timer.init(Config::new(10)).unwrap();

        assert_eq!(State::Idle, timer.state());
        assert_eq!(10, timer.interval());
        assert_eq!(Err(Error::NotActive), timer.is_active());
        assert_eq!(Err(Error::Denied), timer.is_expired());
        assert_eq!(Err(Error::Denied), timer.remaining());
        assert_eq!(Err(Error::Denied), timer.passed());
        assert_eq!(Err(Error::Denied), timer.stop());
    }

    #[test]
    fn start_without_wrap() {
        let source = FakeTickSource::new(100u8);
        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(5)).unwrap();

        timer.start(5).unwrap();
        assert_eq!((State::Active, 5, 100, 105), snapshot(&timer));
        assert_eq!(Ok(()), timer.is_active());

        source.set(104);
        assert_eq!(Ok(()), timer.is_expired());
        assert_eq!(Ok(1), timer.remaining());
        assert_eq!(Ok(4), timer.passed());

        source.set(105);
        assert_eq!(Err(Error::TimeExpired), timer.is_expired());
        assert_eq!(Err(Error::TimeExpired), timer.remaining());
        assert_eq!(Ok(5), timer.passed());
    }

    #[test]
    fn start_with_wrap() {
        let source = FakeTickSource::new(250u8);
        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(10)).unwrap();

        timer.start(10).unwrap();
        assert_eq!((State::Active, 10, 250, 4), snapshot(&timer));

        source.set(255);
        assert_eq!(Ok(5), timer.remaining());

        source.set(2);
        assert_eq!(Ok(()), timer.is_expired());
        assert_eq!(Ok(2), timer.remaining());
        assert_eq!(Ok(8), timer.passed());

        source.set(5);
        assert_eq!(Err(Error::TimeExpired), timer.is_expired());
        assert_eq!(Ok(11), timer.passed());
    }

    #[test]
    fn counter_wrapped_past_start() {
        let source = FakeTickSource::new(100u8);
        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(50)).unwrap();
        timer.start(50).unwrap();

        source.set(99);
        assert_eq!(Err(Error::TimeExpired), timer.is_expired());
    }

    #[test]
    fn zero_interval_expires_immediately() {
        let source = FakeTickSource::new(42u32);
        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(0)).unwrap();

        timer.start(0).unwrap();

        assert_eq!(42, timer.start_tick());
        assert_eq!(42, timer.end_tick());
        assert_eq!(Err(Error::TimeExpired), timer.is_expired());
        assert_eq!(Err(Error::TimeExpired), timer.remaining());
        assert_eq!(Ok(0), timer.passed());
        assert_eq!(Ok(()), timer.is_active());
    }

    #[test]
    fn start_interval_overrides_config() {
        let source = FakeTickSource::new(0u32);
        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(1000)).unwrap();

        timer.start(20).unwrap();

        assert_eq!(20, timer.interval());
        assert_eq!(20, timer.end_tick());
    }

    #[test]
    fn restart_reanchors() {
        let source = FakeTickSource::new(10u32);
        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(5)).unwrap();
        timer.start(5).unwrap();

        source.set(20);
        assert_eq!(Err(Error::TimeExpired), timer.is_expired());

        timer.start(5).unwrap();
        assert_eq!((State::Active, 5, 20, 25), snapshot(&timer));
        assert_eq!(Ok(5), timer.remaining());
    }

    #[test]
    fn expired_timer_stays_active() {
        let source = FakeTickSource::new(0u32);
        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(5)).unwrap();
        timer.start(5).unwrap();

        source.set(1000);
        assert_eq!(Err(Error::TimeExpired), timer.is_expired());
        assert_eq!(Ok(()), timer.is_active());
        assert_eq!(Ok(1000), timer.passed());
    }

    #[test]
    fn stop_keeps_last_run() {
        let source = FakeTickSource::new(7u32);
        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(3)).unwrap();
        timer.start(3).unwrap();

        timer.stop().unwrap();

        assert_eq!((State::Idle, 3, 7, 10), snapshot(&timer));
        assert_eq!(Err(Error::NotActive), timer.is_active());
        assert_eq!(Err(Error::Denied), timer.stop());
        assert_eq!(Err(Error::Denied), timer.is_expired());
    }

    #[test]
    fn source_failure_leaves_state_untouched() {
        let source = FakeTickSource::new(7u32);
        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(3)).unwrap();

        source.fail.set(Some(SourceError::NotAvailable));
        assert_eq!(Err(Error::NotAvailable), timer.start(3));
        assert_eq!((State::Idle, 3, 0, 0), snapshot(&timer));

        source.fail.set(None);
        timer.start(3).unwrap();

        source.fail.set(Some(SourceError::Io));
        assert_eq!(Err(Error::Io), timer.start(9));
        assert_eq!(Err(Error::Io), timer.is_expired());
        assert_eq!(Err(Error::Io), timer.remaining());
        assert_eq!(Err(Error::Io), timer.passed());
        assert_eq!((State::Active, 3, 7, 10), snapshot(&timer));
    }

    #[test]
    fn release_round_trip() {
        let source = FakeTickSource::new(200u8);
        let mut fresh = SwTimer::new(&source);
        fresh.init(Config::new(30)).unwrap();

        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(30)).unwrap();
        timer.start(80).unwrap();
        timer.release().unwrap();

        assert_eq!(State::Uninitialized, timer.state());
        assert_eq!((State::Uninitialized, 0, 0, 0), snapshot(&timer));
        assert_eq!(Err(Error::InvalidHandle), timer.release());
        assert_eq!(Err(Error::InvalidHandle), timer.is_active());

        timer.init(Config::new(30)).unwrap();
        assert_eq!(snapshot(&fresh), snapshot(&timer));
    }

    #[test]
    fn reinit_discards_running_interval() {
        let source = FakeTickSource::new(5u32);
        let mut timer = SwTimer::new(&source);
        timer.init(Config::new(3)).unwrap();
        timer.start(3).unwrap();

        timer.init(Config::new(8)).unwrap();

        assert_eq!((State::Idle, 8, 0, 0), snapshot(&timer));
    }

    #[test]
    fn independent_sources() {
        let a = FakeTickSource::new(0u16);
        let b = FakeTickSource::new(60_000u16);
        let mut timer_a = SwTimer::new(&a);
        let mut timer_b = SwTimer::new(&b);
        timer_a.init(Config::new(100)).unwrap();
        timer_b.init(Config::new(100)).unwrap();
        timer_a.start(100).unwrap();
        timer_b.start(10_000).unwrap();

        assert_eq!(100, timer_a.end_tick());
        assert_eq!(4_464, timer_b.end_tick());
        assert_eq!(Ok(100), timer_a.remaining());
        assert_eq!(Ok(10_000), timer_b.remaining());
    }
}
