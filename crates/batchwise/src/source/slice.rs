use std::convert::Infallible;
use std::sync::Arc;
use async_trait::async_trait;
use super::OrderedSource;

/// # SliceSource
///
/// An [`OrderedSource`] over an in-memory, shared slice.
///
/// Clones share the backing storage and only copy the cursor position, so
/// they are cheap and independent. Materialization never fails.
///
/// ## Example
///
/// ```
/// use batchwise::{OrderedSource, SliceSource};
///
/// # futures::executor::block_on(async {
/// let source = SliceSource::new((0..10).collect::<Vec<_>>());
/// let window = source.clone().offset(4).limit(3).materialize().await.unwrap();
/// assert_eq!(window, vec![4, 5, 6]);
/// # });
/// ```
#[derive(Debug)]
pub struct SliceSource<T> {
    /// Backing items, shared between clones
    items: Arc<[T]>,

    /// Number of leading items this cursor skips
    offset: usize,

    /// Maximum number of items this cursor yields, if capped
    limit: Option<usize>,
}

impl<T> SliceSource<T> {
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        Self {
            items: items.into(),
            offset: 0,
            limit: None,
        }
    }

    /// Number of items this cursor would currently materialize.
    pub fn len(&self) -> usize {
        let remaining = self.items.len().saturating_sub(self.offset);
        match self.limit {
            Some(limit) => remaining.min(limit),
            None => remaining,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The items currently selected by this cursor.
    pub fn as_slice(&self) -> &[T] {
        let start = self.offset.min(self.items.len());
        &self.items[start..start + self.len()]
    }
}

impl<T> Clone for SliceSource<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            offset: self.offset,
            limit: self.limit,
        }
    }
}

impl<T> From<Vec<T>> for SliceSource<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

#[async_trait]
impl<T> OrderedSource for SliceSource<T>
where
    T: Clone + Send + Sync,
{
    type Item = T;
    type Error = Infallible;

    fn offset(mut self, n: usize) -> Self {
        self.offset = self.offset.saturating_add(n);
        self.limit = self.limit.map(|limit| limit.saturating_sub(n));
        self
    }

    fn limit(mut self, n: usize) -> Self {
        self.limit = Some(self.limit.map_or(n, |limit| limit.min(n)));
        self
    }

    async fn materialize(self) -> Result<Vec<T>, Infallible> {
        Ok(self.as_slice().to_vec())
    }
}
