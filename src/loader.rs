use crate::api::{LoadError, MovieSource};
use crate::models::MoviePage;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// Result of one page request, tagged with the sequence number it was
/// issued under.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub seq: u64,
    pub page: u32,
    pub result: Result<MoviePage, LoadError>,
}

/// Holds the busy indicator raised for as long as it lives.
pub struct BusyGuard {
    counter: Arc<AtomicUsize>,
}

impl BusyGuard {
    pub fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Issues page requests in the background and reports them over a channel.
///
/// Requests are never cancelled. Every request gets a fresh sequence number;
/// only the outcome of the most recently issued one is considered current.
pub struct PageLoader<S: MovieSource> {
    source: Arc<S>,
    tx: UnboundedSender<LoadOutcome>,
    busy: Arc<AtomicUsize>,
    latest_seq: u64,
    last_requested: Option<u32>,
}

impl<S: MovieSource> PageLoader<S> {
    pub fn new(source: S) -> (Self, UnboundedReceiver<LoadOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = Self {
            source: Arc::new(source),
            tx,
            busy: Arc::new(AtomicUsize::new(0)),
            latest_seq: 0,
            last_requested: None,
        };
        (loader, rx)
    }

    /// Start loading `page`. Must be called from within a tokio runtime.
    pub fn load(&mut self, page: u32) -> u64 {
        self.latest_seq += 1;
        self.last_requested = Some(page);
        let seq = self.latest_seq;
        debug!(seq, page, "issuing page request");

        let guard = BusyGuard::new(Arc::clone(&self.busy));
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = source.fetch_page(page).await;
            if let Err(ref e) = result {
                warn!(seq, page, transport = e.is_transport(), error = %e, "page request failed");
            }
            // Receiver gone means the UI has shut down.
            let _ = tx.send(LoadOutcome { seq, page, result });
            // Busy until the outcome is queued, so no frame shows idle without it.
            drop(guard);
        });

        seq
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst) > 0
    }

    /// Whether `outcome` answers the most recently issued request.
    pub fn is_current(&self, outcome: &LoadOutcome) -> bool {
        outcome.seq == self.latest_seq
    }

    pub fn last_requested(&self) -> Option<u32> {
        self.last_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Movie;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Serves canned pages, optionally holding some back until released.
    struct StubSource {
        pages: HashMap<u32, Result<MoviePage, LoadError>>,
        gate: Arc<Notify>,
        gated: Option<u32>,
    }

    impl StubSource {
        fn new(pages: Vec<(u32, Result<MoviePage, LoadError>)>) -> Self {
            Self {
                pages: pages.into_iter().collect(),
                gate: Arc::new(Notify::new()),
                gated: None,
            }
        }
    }

    impl MovieSource for StubSource {
        async fn fetch_page(&self, page: u32) -> Result<MoviePage, LoadError> {
            if self.gated == Some(page) {
                self.gate.notified().await;
            }
            self.pages
                .get(&page)
                .cloned()
                .unwrap_or(Err(LoadError::Status(404)))
        }
    }

    fn single(title: &str, current: u32, last: u32) -> MoviePage {
        MoviePage {
            movies: vec![Movie {
                original_title: Some(title.to_string()),
                ..Default::default()
            }],
            current_page: current,
            last_page: last,
        }
    }

    async fn recv(rx: &mut UnboundedReceiver<LoadOutcome>) -> LoadOutcome {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for load outcome")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_busy_cleared_after_success() {
        let source = StubSource::new(vec![(1, Ok(single("Dune", 1, 5)))]);
        let (mut loader, mut rx) = PageLoader::new(source);

        let seq = loader.load(1);
        let outcome = recv(&mut rx).await;

        assert_eq!(outcome.seq, seq);
        assert!(loader.is_current(&outcome));
        assert_eq!(outcome.result.unwrap().last_page, 5);
        assert!(!loader.is_busy());
    }

    #[tokio::test]
    async fn test_busy_cleared_after_failure() {
        let source = StubSource::new(vec![]);
        let (mut loader, mut rx) = PageLoader::new(source);

        loader.load(9);
        let outcome = recv(&mut rx).await;

        assert_eq!(outcome.result, Err(LoadError::Status(404)));
        assert!(!loader.is_busy());
        assert_eq!(loader.last_requested(), Some(9));
    }

    #[tokio::test]
    async fn test_busy_while_request_outstanding() {
        let mut source = StubSource::new(vec![(2, Ok(single("Heat", 2, 5)))]);
        source.gated = Some(2);
        let gate = Arc::clone(&source.gate);
        let (mut loader, mut rx) = PageLoader::new(source);

        loader.load(2);
        assert!(loader.is_busy());

        gate.notify_one();
        recv(&mut rx).await;
        assert!(!loader.is_busy());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_outcome_is_queued_before_busy_clears() {
        let mut source = StubSource::new(vec![(3, Ok(single("Heat", 3, 5)))]);
        source.gated = Some(3);
        let gate = Arc::clone(&source.gate);
        let (mut loader, mut rx) = PageLoader::new(source);

        loader.load(3);
        gate.notify_one();

        tokio::time::timeout(Duration::from_secs(5), async {
            while loader.is_busy() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("busy indicator never cleared");

        let outcome = rx.try_recv().expect("outcome queued once idle");
        assert_eq!(outcome.page, 3);
    }

    #[tokio::test]
    async fn test_late_outcome_of_older_request_is_stale() {
        let mut source = StubSource::new(vec![
            (1, Ok(single("Dune", 1, 5))),
            (2, Ok(single("Heat", 2, 5))),
        ]);
        source.gated = Some(1);
        let gate = Arc::clone(&source.gate);
        let (mut loader, mut rx) = PageLoader::new(source);

        let first = loader.load(1);
        let second = loader.load(2);

        let newer = recv(&mut rx).await;
        assert_eq!(newer.seq, second);
        assert!(loader.is_current(&newer));

        gate.notify_one();
        let older = recv(&mut rx).await;
        assert_eq!(older.seq, first);
        assert!(!loader.is_current(&older));
        assert!(!loader.is_busy());
    }
}
