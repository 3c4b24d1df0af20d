use async_trait::async_trait;

/// The capability set the driver requires from a source of items.
///
/// A source is a cursor over an ordered sequence. Cloning it must produce an
/// independent cursor over the same logical sequence and ordering, so that
/// narrowing one clone never affects another. The ordering must be stable
/// across materializations within one traversal; the driver relies on that
/// but cannot check it.
///
/// Any type implementing these operations is accepted by the driver. Types
/// that do not, such as a plain `Vec`, are rejected at compile time:
///
/// ```compile_fail
/// use batchwise::{BatchDriver, BatchOptions};
///
/// # async fn run() {
/// let driver = BatchDriver::new(BatchOptions::new(10).unwrap());
/// let items = vec![1, 2, 3];
/// driver.each_batch(&items, |_batch: Vec<i32>, _idx| async { Ok::<_, std::io::Error>(()) }).await;
/// # }
/// ```
#[async_trait]
pub trait OrderedSource: Clone + Send + Sync {
    /// The item type produced by [`materialize`](OrderedSource::materialize)
    type Item: Send;

    /// Error raised when a window cannot be materialized
    type Error: std::error::Error + Send + Sync + 'static;

    /// Skip the first `n` items of this cursor.
    ///
    /// Offsets are relative to the cursor they are applied to and shrink any
    /// limit already in place.
    fn offset(self, n: usize) -> Self;

    /// Cap this cursor to at most `n` items. A limit can only narrow an
    /// existing limit.
    fn limit(self, n: usize) -> Self;

    /// Eagerly realize the items remaining in this cursor, in order.
    async fn materialize(self) -> Result<Vec<Self::Item>, Self::Error>;
}
