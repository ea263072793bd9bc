//! CLI support: display-level global, output macros, argument parsing, help.
//!
//! Diagnostics go to stderr through [`displaylevel!`], gated by a crate-wide
//! level; results go to stdout through [`displayout!`].
//!
//! Levels: 0 = silent, 1 = errors only, 2 = normal (default), 3 = verbose
//! per-frame output.

pub mod args;
pub mod help;

use std::sync::atomic::{AtomicU32, Ordering};

pub const PROGRAM_NAME: &str = "benchpress";

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stdout (results).
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Conditionally print to stderr at or above `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
