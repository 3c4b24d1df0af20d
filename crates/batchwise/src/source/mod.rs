//! # Ordered Sources
//!
//! The driver never owns data. It consumes an externally supplied, ordered and
//! possibly unbounded sequence through the [`OrderedSource`] trait, which only
//! needs to clone a cursor, narrow it with an offset and a limit, and
//! materialize the remaining window.
//!
//! [`SliceSource`] is an in-memory implementation over a shared slice.

mod core_trait;
mod slice;

pub use core_trait::*;
pub use slice::SliceSource;

#[cfg(test)]
/// Instrumented source used by the driver tests.
pub(crate) mod mock_source;
