use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use super::{OrderedSource, SliceSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    FetchStarted(usize),
    FetchFinished(usize),
    BatchStarted(usize),
    BatchFinished(usize),
}

#[derive(Debug, thiserror::Error)]
#[error("mock failure at offset {0}")]
pub struct MockError(pub usize);

/// Shared recorder for everything the driver does to a [`MockSource`].
#[derive(Debug, Default)]
pub struct Probe {
    events: Mutex<Vec<Event>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Probe {
    pub fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Offsets of every materialization, in the order they started.
    pub fn fetches(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::FetchStarted(offset) => Some(offset),
                _ => None,
            })
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// A [`SliceSource`] of `0..n` that records fetches and can be slowed down or
/// made to fail at a given offset.
#[derive(Clone)]
pub struct MockSource {
    inner: SliceSource<usize>,
    offset: usize,
    probe: Arc<Probe>,
    delay: Option<fn(usize) -> u64>,
    fail_at: Option<usize>,
}

impl MockSource {
    pub fn new(n: usize) -> Self {
        Self {
            inner: SliceSource::new((0..n).collect::<Vec<_>>()),
            offset: 0,
            probe: Arc::new(Probe::default()),
            delay: None,
            fail_at: None,
        }
    }

    /// Delay each materialization by `delay(offset)` milliseconds.
    pub fn with_delay(mut self, delay: fn(usize) -> u64) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing_at(mut self, offset: usize) -> Self {
        self.fail_at = Some(offset);
        self
    }

    pub fn probe(&self) -> Arc<Probe> {
        Arc::clone(&self.probe)
    }
}

#[async_trait]
impl OrderedSource for MockSource {
    type Item = usize;
    type Error = MockError;

    fn offset(mut self, n: usize) -> Self {
        self.offset += n;
        self.inner = self.inner.offset(n);
        self
    }

    fn limit(mut self, n: usize) -> Self {
        self.inner = self.inner.limit(n);
        self
    }

    async fn materialize(self) -> Result<Vec<usize>, MockError> {
        let offset = self.offset;
        self.probe.record(Event::FetchStarted(offset));
        let now = self.probe.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.probe.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(Duration::from_millis(delay(offset))).await;
        }

        self.probe.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.probe.record(Event::FetchFinished(offset));

        if self.fail_at == Some(offset) {
            return Err(MockError(offset));
        }
        match self.inner.materialize().await {
            Ok(items) => Ok(items),
            Err(never) => match never {},
        }
    }
}
