//! # Batchwise
//!
//! Bounded-memory traversal of lazily evaluated, ordered query results in
//! fixed-size batches.
//!
//! ## Overview
//!
//! Large result sets are rarely safe to materialize in one go. This crate
//! walks an ordered source in windows of `batch_size` items, handing each
//! window (or each item of each window) to an async callback, so only a
//! bounded number of items is alive at any time.
//!
//! Key components include:
//!
//! - [`OrderedSource`] - the narrow interface a query or collection must offer:
//!   clone a cursor, apply an offset and a limit, materialize
//! - [`BatchDriver`] - the traversal engine, configured once with [`BatchOptions`]
//! - [`SliceSource`] - an in-memory source over a shared slice
//!
//! ## Strategies
//!
//! Without a limit the driver fetches one window at a time and stops at the
//! first empty window. With a non-zero limit it computes every window up
//! front and issues all fetches concurrently; callbacks then run in
//! completion order, but batch and item indices are always exact.
//!
//! ## Example
//!
//! ```
//! use batchwise::{BatchDriver, BatchOptions, SliceSource};
//! use std::sync::Mutex;
//!
//! # futures::executor::block_on(async {
//! let source = SliceSource::new((0..42).collect::<Vec<u64>>());
//! let driver = BatchDriver::new(BatchOptions::new(10).unwrap().with_limit(42));
//! let seen = Mutex::new(Vec::new());
//!
//! let batches = driver
//!     .each(&source, |item, index| {
//!         seen.lock().unwrap().push((index, item));
//!         async { Ok::<_, std::io::Error>(()) }
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(batches, 5);
//! let mut seen = seen.into_inner().unwrap();
//! seen.sort();
//! assert!(seen.iter().enumerate().all(|(i, (index, item))| *index == i && *item == i as u64));
//! # });
//! ```
//!
//! ## Features
//!
//! - **serde** (default) - `Serialize`/`Deserialize` for [`BatchOptions`] and
//!   validation of untyped JSON option records
//!
//! ## Logging
//!
//! Traversals emit [`tracing`] events inside a `traversal` span carrying a
//! random traversal id. The crate never installs a subscriber.

mod error;
mod options;

pub mod driver;
pub mod source;

pub use driver::{BatchDriver, Strategy};
pub use error::{BatchError, BoxError};
pub use options::{BatchOptions, DEFAULT_BATCH_SIZE};
pub use source::{OrderedSource, SliceSource};
