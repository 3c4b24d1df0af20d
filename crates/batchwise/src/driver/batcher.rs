use std::future::Future;
use futures::future::try_join_all;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;
use crate::error::{BatchError, BoxError};
use crate::options::BatchOptions;
use crate::source::OrderedSource;
use super::{parallel, serial};

/// The traversal strategy a driver delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One window at a time, in order; the end is found by probing.
    Serial,
    /// All windows at once; requires a non-zero limit.
    Parallel,
}

/// # BatchDriver
///
/// Walks an [`OrderedSource`] in fixed-size windows and hands each window, or
/// each item of each window, to an async callback.
///
/// The driver is configured once with [`BatchOptions`]. Without a limit it
/// traverses serially and supports unbounded sources; with a non-zero limit
/// it issues every window concurrently.
///
/// Callbacks return futures resolving to `Result<(), E>`. The driver awaits
/// them, and the first error aborts the traversal.
///
/// # Example
///
/// ```
/// use batchwise::{BatchDriver, BatchOptions, SliceSource};
///
/// # futures::executor::block_on(async {
/// let source = SliceSource::new((0..42).collect::<Vec<u32>>());
/// let driver = BatchDriver::new(BatchOptions::new(10).unwrap());
///
/// let batches = driver
///     .each_batch(&source, |batch, batch_index| async move {
///         println!("batch {batch_index}: {} items", batch.len());
///         Ok::<_, std::io::Error>(())
///     })
///     .await
///     .unwrap();
///
/// assert_eq!(batches, 5);
/// # });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchDriver {
    options: BatchOptions,
}

impl BatchDriver {
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// `true` iff the options carry a non-zero limit.
    pub fn is_parallel(&self) -> bool {
        self.options.is_parallel()
    }

    pub fn strategy(&self) -> Strategy {
        if self.is_parallel() {
            Strategy::Parallel
        } else {
            Strategy::Serial
        }
    }

    /// Invokes `callback(item, index)` for every item, where `index` is the
    /// item's global position `batch_index * batch_size + position`.
    ///
    /// The item callbacks of one batch run concurrently, and all of them are
    /// awaited before that batch counts as handled. Under the parallel
    /// strategy batches may complete in any order, but the indices stay
    /// exact.
    ///
    /// # Returns
    ///
    /// The number of batches traversed, as [`each_batch`](Self::each_batch)
    /// would return.
    pub async fn each<S, F, Fut, E>(&self, source: &S, callback: F) -> Result<usize, BatchError>
    where
        S: OrderedSource,
        F: Fn(S::Item, usize) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Into<BoxError>,
    {
        let batch_size = self.options.batch_size();
        let callback = &callback;

        let per_batch = move |batch: Vec<S::Item>, batch_index: usize| {
            let base = batch_index * batch_size;
            let items = batch.into_iter().enumerate().map(move |(position, item)| {
                let index = base + position;
                let pending = callback(item, index);
                async move {
                    pending
                        .await
                        .map_err(|e| BatchError::item_callback(index, e))
                }
            });
            async move { try_join_all(items).await.map(|_| ()) }
        };

        self.dispatch(source, self.strategy(), per_batch).await
    }

    /// Invokes `callback(batch, batch_index)` for every window, delegating to
    /// the serial or parallel strategy according to [`strategy`](Self::strategy).
    pub async fn each_batch<S, F, Fut, E>(&self, source: &S, callback: F) -> Result<usize, BatchError>
    where
        S: OrderedSource,
        F: Fn(Vec<S::Item>, usize) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Into<BoxError>,
    {
        self.run_batches(source, self.strategy(), callback).await
    }

    /// Traverses serially regardless of the configured limit.
    ///
    /// Windows are fetched one at a time and each callback is awaited before
    /// the next fetch. The first empty window ends the traversal.
    pub async fn each_batch_serial<S, F, Fut, E>(
        &self,
        source: &S,
        callback: F,
    ) -> Result<usize, BatchError>
    where
        S: OrderedSource,
        F: Fn(Vec<S::Item>, usize) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Into<BoxError>,
    {
        self.run_batches(source, Strategy::Serial, callback).await
    }

    /// Traverses all `ceil(limit / batch_size)` windows concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::MissingLimit`] before fetching anything when the
    /// options carry no limit or a zero limit.
    pub async fn each_batch_parallel<S, F, Fut, E>(
        &self,
        source: &S,
        callback: F,
    ) -> Result<usize, BatchError>
    where
        S: OrderedSource,
        F: Fn(Vec<S::Item>, usize) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Into<BoxError>,
    {
        self.run_batches(source, Strategy::Parallel, callback).await
    }

    /// Attributes user batch callback errors to their batch index.
    async fn run_batches<S, F, Fut, E>(
        &self,
        source: &S,
        strategy: Strategy,
        callback: F,
    ) -> Result<usize, BatchError>
    where
        S: OrderedSource,
        F: Fn(Vec<S::Item>, usize) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Into<BoxError>,
    {
        let callback = &callback;
        self.dispatch(source, strategy, move |batch, batch_index| {
            let pending = callback(batch, batch_index);
            async move {
                pending
                    .await
                    .map_err(|e| BatchError::callback(batch_index, e))
            }
        })
        .await
    }

    async fn dispatch<S, F, Fut>(
        &self,
        source: &S,
        strategy: Strategy,
        callback: F,
    ) -> Result<usize, BatchError>
    where
        S: OrderedSource,
        F: Fn(Vec<S::Item>, usize) -> Fut,
        Fut: Future<Output = Result<(), BatchError>>,
    {
        let batch_size = self.options.batch_size();
        let limit = match strategy {
            Strategy::Parallel => Some(self.options.parallel_limit().ok_or(BatchError::MissingLimit)?),
            Strategy::Serial => None,
        };

        let span = info_span!(
            "traversal",
            traversal = %Uuid::new_v4(),
            ?strategy,
            batch_size,
            limit,
        );

        async move {
            let result = match limit {
                Some(limit) => parallel::traverse(source, batch_size, limit, callback).await,
                None => serial::traverse(source, batch_size, callback).await,
            };
            match &result {
                Ok(batches) => info!(batches, "traversal complete"),
                Err(e) => warn!(error = %e, "traversal aborted"),
            }
            result
        }
        .instrument(span)
        .await
    }
}
