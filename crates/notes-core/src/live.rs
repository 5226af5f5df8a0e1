//! Live queries.
//!
//! A [`LiveQuery`] pairs a re-runnable read with the table's
//! [`InvalidationTracker`]. Subscribing yields the current result at once and
//! a fresh result after every write that changed rows, until the
//! [`Subscription`] is dropped or unsubscribed.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::Stream;
use tokio::sync::watch;

use crate::error::Result;

/// Version counter bumped whenever the observed table changes.
#[derive(Clone)]
pub struct InvalidationTracker {
    version: Arc<watch::Sender<u64>>,
}

impl InvalidationTracker {
    /// Tracker at version 0 with no subscribers
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self {
            version: Arc::new(version),
        }
    }

    /// Wake every subscriber.
    pub fn invalidate(&self) {
        self.version.send_modify(|version| *version = version.wrapping_add(1));
        tracing::debug!(version = *self.version.borrow(), "Note table invalidated");
    }

    /// Current version, mostly useful in tests
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Receiver that is notified on every invalidation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Number of subscriptions currently observing the table
    pub fn subscriber_count(&self) -> usize {
        self.version.receiver_count()
    }
}

impl Default for InvalidationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InvalidationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvalidationTracker")
            .field("version", &self.version())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

type QueryFn<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// A read that is re-run whenever its table changes.
pub struct LiveQuery<T> {
    query: QueryFn<T>,
    tracker: InvalidationTracker,
}

impl<T> Clone for LiveQuery<T> {
    fn clone(&self) -> Self {
        Self {
            query: Arc::clone(&self.query),
            tracker: self.tracker.clone(),
        }
    }
}

impl<T> fmt::Debug for LiveQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveQuery")
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> LiveQuery<T> {
    /// Build a live query from a tracker and a read closure
    pub fn new<F, Fut>(tracker: &InvalidationTracker, query: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            query: Arc::new(move || -> BoxFuture<'static, Result<T>> { Box::pin(query()) }),
            tracker: tracker.clone(),
        }
    }

    /// Run the read once without subscribing.
    pub async fn snapshot(&self) -> Result<T> {
        (self.query)().await
    }

    /// Start observing.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            query: Arc::clone(&self.query),
            changes: self.tracker.subscribe(),
            primed: false,
        }
    }
}

/// An active observation of a [`LiveQuery`].
///
/// Dropping the subscription ends it, as does [`Subscription::unsubscribe`].
pub struct Subscription<T> {
    query: QueryFn<T>,
    changes: watch::Receiver<u64>,
    primed: bool,
}

impl<T: Send + 'static> Subscription<T> {
    /// Next snapshot.
    ///
    /// The first call resolves immediately with the current result. Later
    /// calls wait for a change; several changes between calls are delivered
    /// as one snapshot. The sequence only ends when the subscription is
    /// dropped or unsubscribed; `None` is never yielded while the store is open.
    pub async fn next(&mut self) -> Option<Result<T>> {
        if self.primed {
            self.changes.changed().await.ok()?;
        } else {
            self.primed = true;
        }
        // Marked before querying so writes racing the read trigger another pass.
        self.changes.borrow_and_update();
        Some((self.query)().await)
    }

    /// Whether a change has arrived that `next` has not yet delivered
    pub fn has_pending_change(&self) -> bool {
        !self.primed || self.changes.has_changed().unwrap_or(false)
    }

    /// Stop observing.
    pub fn unsubscribe(self) {
        tracing::trace!("Live query subscription closed");
    }

    /// Adapt into a `futures::Stream` of snapshots.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + Send {
        futures::stream::unfold(self, |mut subscription| async move {
            let item = subscription.next().await?;
            Some((item, subscription))
        })
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("primed", &self.primed)
            .finish_non_exhaustive()
    }
}
