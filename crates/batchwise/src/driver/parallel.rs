use std::future::Future;
use futures::stream::{FuturesUnordered, StreamExt};
use crate::error::BatchError;
use crate::source::OrderedSource;
use super::window::window;

/// Concurrent traversal over precomputed windows.
///
/// `ceil(limit / batch_size)` windows are derived up front and all of them
/// are issued at once. Every window's callback runs as soon as its own fetch
/// resolves, so callbacks observe fetch-completion order rather than index
/// order. All work stays on the calling task; nothing is spawned.
///
/// The final window may be short, or even empty when `limit` exceeds the
/// source length, and is still handed to `callback`.
///
/// # Parameters
///
/// * `source` - cursor to derive windows from; each window clones it
/// * `batch_size` - items per window
/// * `limit` - total number of items to traverse, must be non-zero
/// * `callback` - invoked with each batch and its batch index
///
/// # Returns
///
/// The number of windows issued, once every fetch-and-callback pair has
/// completed. On the first failure the remaining windows are dropped and the
/// error is returned.
pub(crate) async fn traverse<S, F, Fut>(
    source: &S,
    batch_size: usize,
    limit: usize,
    callback: F,
) -> Result<usize, BatchError>
where
    S: OrderedSource,
    F: Fn(Vec<S::Item>, usize) -> Fut,
    Fut: Future<Output = Result<(), BatchError>>,
{
    let num_batches = limit.div_ceil(batch_size);
    let callback = &callback;

    let mut pending: FuturesUnordered<_> = (0..num_batches)
        .map(|batch_index| {
            let batch = window(source, batch_size, batch_index);
            async move { callback(batch.await?, batch_index).await }
        })
        .collect();

    while let Some(result) = pending.next().await {
        result?;
    }
    Ok(num_batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use crate::source::mock_source::{Event, MockSource};

    #[tokio::test]
    async fn test_parallel_issues_all_windows() {
        let source = MockSource::new(42);
        let probe = source.probe();
        let sizes = Arc::new(Mutex::new(vec![]));

        let count = traverse(&source, 10, 42, |batch, idx| {
            let sizes = sizes.clone();
            async move {
                sizes.lock().unwrap().push((idx, batch.len()));
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(count, 5);
        let mut sizes = sizes.lock().unwrap().clone();
        sizes.sort();
        assert_eq!(sizes, vec![(0, 10), (1, 10), (2, 10), (3, 10), (4, 2)]);

        let mut fetches = probe.fetches();
        fetches.sort();
        assert_eq!(fetches, vec![0, 10, 20, 30, 40], "No probe fetch in parallel mode");
    }

    #[tokio::test(start_paused = true)]
    async fn test_parallel_fetches_are_concurrent() {
        let source = MockSource::new(42).with_delay(|_| 10);
        let probe = source.probe();

        traverse(&source, 10, 42, |_, _| async { Ok(()) }).await.unwrap();

        assert_eq!(probe.max_in_flight(), 5, "All windows should be pending together");
    }

    #[tokio::test(start_paused = true)]
    async fn test_parallel_callbacks_follow_completion_order() {
        // later windows resolve first
        let source = MockSource::new(42).with_delay(|offset| 100 - offset as u64);
        let order = Arc::new(Mutex::new(vec![]));

        traverse(&source, 10, 42, |batch, idx| {
            let order = order.clone();
            async move {
                assert_eq!(batch.first(), Some(&(idx * 10)), "Index must match window contents");
                order.lock().unwrap().push(idx);
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(*order.lock().unwrap(), vec![4, 3, 2, 1, 0]);
    }

    #[tokio::test]
    async fn test_parallel_limit_beyond_source_yields_empty_windows() {
        let source = MockSource::new(15);
        let sizes = Arc::new(Mutex::new(vec![]));

        let count = traverse(&source, 10, 30, |batch, idx| {
            let sizes = sizes.clone();
            async move {
                sizes.lock().unwrap().push((idx, batch.len()));
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(count, 3, "Parallel count is arithmetic, not probed");
        let mut sizes = sizes.lock().unwrap().clone();
        sizes.sort();
        assert_eq!(sizes, vec![(0, 10), (1, 5), (2, 0)]);
    }

    #[tokio::test]
    async fn test_parallel_limit_below_source_stops_at_limit_window() {
        let source = MockSource::new(100);
        let probe = source.probe();

        let count = traverse(&source, 10, 25, |_, _| async { Ok(()) }).await.unwrap();

        assert_eq!(count, 3);
        let mut fetches = probe.fetches();
        fetches.sort();
        assert_eq!(fetches, vec![0, 10, 20]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_parallel_failure_aborts_aggregate() {
        // batch 0 is slowest, batch 2 fails first
        let source = MockSource::new(42).with_delay(|offset| 100 - offset as u64);
        let probe = source.probe();

        let err = traverse(&source, 10, 42, |_, idx| async move {
            if idx == 2 {
                Err(BatchError::callback(idx, "rejected"))
            } else {
                Ok(())
            }
        })
        .await
        .unwrap_err();

        assert_eq!(err.batch_index(), Some(2));
        let finished: Vec<_> = probe
            .events()
            .into_iter()
            .filter(|event| matches!(event, Event::FetchFinished(_)))
            .collect();
        assert_eq!(
            finished,
            vec![Event::FetchFinished(40), Event::FetchFinished(30), Event::FetchFinished(20)],
            "Slower windows should be dropped once the aggregate fails"
        );
    }
}
