mod counter;

#[cfg(any(test, feature = "std"))]
mod host;

pub use self::counter::AtomicTickSource;

#[cfg(any(test, feature = "std"))]
pub use self::host::StdTickSource;
