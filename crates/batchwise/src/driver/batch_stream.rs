use futures::Stream;
use futures::stream::try_unfold;
use crate::error::BatchError;
use crate::source::OrderedSource;
use super::batcher::BatchDriver;
use super::window::window;

impl BatchDriver {
    /// Pull-based counterpart of [`each_batch_serial`](Self::each_batch_serial).
    ///
    /// Yields `(batch_index, batch)` pairs in order. The next window is only
    /// fetched when the stream is polled again, and the stream ends at the
    /// first empty window or after the first error. The source is cloned up
    /// front, so the stream does not borrow it.
    ///
    /// # Example
    ///
    /// ```
    /// use batchwise::{BatchDriver, BatchOptions, SliceSource};
    /// use futures::TryStreamExt;
    ///
    /// # futures::executor::block_on(async {
    /// let source = SliceSource::new(vec!["a", "b", "c"]);
    /// let driver = BatchDriver::new(BatchOptions::new(2).unwrap());
    ///
    /// let batches: Vec<_> = driver.batches(&source).try_collect().await.unwrap();
    /// assert_eq!(batches, vec![(0, vec!["a", "b"]), (1, vec!["c"])]);
    /// # });
    /// ```
    pub fn batches<S>(
        &self,
        source: &S,
    ) -> impl Stream<Item = Result<(usize, Vec<S::Item>), BatchError>> + use<S>
    where
        S: OrderedSource,
    {
        let batch_size = self.options().batch_size();
        try_unfold((source.clone(), 0), move |(cursor, batch_index)| async move {
            let batch = window(&cursor, batch_size, batch_index).await?;
            if batch.is_empty() {
                return Ok(None);
            }
            Ok(Some(((batch_index, batch), (cursor, batch_index + 1))))
        })
    }
}
