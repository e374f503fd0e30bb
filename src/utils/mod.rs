//! Utilities for cherie-lang.

mod format;
mod location;

pub(crate) use format::*;
pub use location::Location;
