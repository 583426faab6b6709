//! Polled software timers over a wrapping tick counter.
//!
//! A [`SwTimer`] reads its [`TickSource`] when it is started and whenever it is
//! queried. Nothing happens in the background: callers poll
//! [`SwTimer::is_expired`], [`SwTimer::remaining`] or [`SwTimer::passed`].
//!
//! All tick arithmetic is modulo the width of the counter word and assumes that
//! the counter wraps at most once between a start and a query.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod logging;

mod adapters;
mod config;
pub mod drivers;
mod error;
pub mod tick;
mod timer;
mod window;

pub use self::{
    adapters::tick::TickSource,
    config::{Config, Ticks},
    error::{Error, Result, SourceError},
    tick::Tick,
    timer::{State, SwTimer},
    window::Window,
};
