//! # Batch Driver
//!
//! The driver partitions an ordered source into fixed-size windows and walks
//! them with one of two strategies:
//!
//! * **serial** - one window in flight at a time, in index order. The end of
//!   the sequence is found by fetching a window and checking that it is empty,
//!   so unbounded sources work.
//! * **parallel** - requires a known, non-zero limit. All
//!   `ceil(limit / batch_size)` windows are issued at once and callbacks run
//!   in fetch-completion order.
//!
//! ## Module Structure
//!
//! * `window` - derives one window from the source; shared by both strategies
//! * `serial` / `parallel` - the two traversal loops
//! * `batcher` - [`BatchDriver`], strategy selection and the per-item layer
//! * `batch_stream` - a pull-based stream over serial windows
//!
//! ## Concurrency
//!
//! Nothing is spawned. "Parallel" means that several fetches and callbacks
//! are pending at once on the task awaiting the traversal. Every window works
//! on its own clone of the source, so there is no shared cursor state.

mod batch_stream;
mod batcher;
mod parallel;
mod serial;
mod window;

pub use batcher::{BatchDriver, Strategy};
