#![forbid(unsafe_code)]

//! Logging shims.
//!
//! With the `tracing` feature the usual macros are re-exported from
//! `tracing`. Without it, the macros below swallow their arguments so catalog
//! and schedule code can log unconditionally.
//!
//! Only the levels this crate actually emits are shimmed.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op `debug!` when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op `trace!` when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op `warn!` when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}
