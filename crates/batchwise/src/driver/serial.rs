use std::future::Future;
use crate::error::BatchError;
use crate::source::OrderedSource;
use super::window::window;

/// Sequential traversal, one window in flight at a time.
///
/// Each window is materialized and its callback fully awaited before the next
/// window is fetched. The end of the sequence is discovered by probing: the
/// first empty window stops the loop and is neither passed to the callback
/// nor counted. Works for unbounded sources.
///
/// # Returns
///
/// The number of non-empty batches handed to `callback`.
pub(crate) async fn traverse<S, F, Fut>(
    source: &S,
    batch_size: usize,
    callback: F,
) -> Result<usize, BatchError>
where
    S: OrderedSource,
    F: Fn(Vec<S::Item>, usize) -> Fut,
    Fut: Future<Output = Result<(), BatchError>>,
{
    let mut batch_index = 0;
    loop {
        let batch = window(source, batch_size, batch_index).await?;
        if batch.is_empty() {
            break;
        }
        callback(batch, batch_index).await?;
        batch_index += 1;
    }
    Ok(batch_index)
}
