use std::future::Future;
use tracing::debug;
use crate::error::BatchError;
use crate::source::OrderedSource;

/// Derives and materializes the window for `batch_index`.
///
/// The source is cloned before the offset and limit are applied, so every
/// call works on a fresh cursor and concurrently pending windows never share
/// cursor state. The clone happens eagerly; the returned future does not
/// borrow `source`.
pub(crate) fn window<S>(
    source: &S,
    batch_size: usize,
    batch_index: usize,
) -> impl Future<Output = Result<Vec<S::Item>, BatchError>> + use<S>
where
    S: OrderedSource,
{
    let offset = batch_index * batch_size;
    let cursor = source.clone().offset(offset).limit(batch_size);

    async move {
        let batch = cursor
            .materialize()
            .await
            .map_err(|e| BatchError::materialization(batch_index, e))?;
        debug!(batch_index, offset, len = batch.len(), "materialized window");
        Ok(batch)
    }
}
