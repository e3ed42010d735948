//! Query-keyed collection cache.
//!
//! Collections are fetched once per key and then served from memory until an
//! explicit refetch. A fetch in flight is shared by every waiter on its key,
//! and removals rewrite the cached collection copy-on-write so concurrent
//! completions cannot lose each other's updates.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::models::{Post, PostSummary};

use super::mutation::{MutationError, MutationOutcome};

/// What a fetch resolves to.
pub type FetchResult = Result<Vec<Post>, ApiError>;

/// Stored fetch function. Captured on the first request for a key and
/// reused by every refetch of that key.
type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, FetchResult> + Send + Sync>;

/// Logical identity of one cached collection (e.g. "posts").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a consumer observes for one key.
#[derive(Debug, Clone)]
pub enum CollectionView {
    /// A fetch is in flight and nothing has resolved yet.
    Loading,
    /// The last fetch failed. Sticks until an explicit refetch.
    Error(Arc<ApiError>),
    /// Projected records in the order the fetch produced them.
    Ready(Arc<Vec<PostSummary>>),
}

impl CollectionView {
    pub fn is_loading(&self) -> bool {
        matches!(self, CollectionView::Loading)
    }

    /// The records when Ready.
    pub fn records(&self) -> Option<&[PostSummary]> {
        match self {
            CollectionView::Ready(records) => Some(records),
            _ => None,
        }
    }
}

enum EntryState {
    Loading(watch::Sender<()>),
    Error(Arc<ApiError>),
    Ready(Arc<Vec<PostSummary>>),
}

struct Entry {
    state: EntryState,
    fetcher: Fetcher,
    fetched_at: Option<DateTime<Utc>>,
    /// Record ids with a removal in flight. Doubles as the UI's per-row
    /// disabled-affordance signal.
    pending_removals: HashSet<i64>,
}

impl Entry {
    fn view(&self) -> CollectionView {
        match &self.state {
            EntryState::Loading(_) => CollectionView::Loading,
            EntryState::Error(err) => CollectionView::Error(Arc::clone(err)),
            EntryState::Ready(records) => CollectionView::Ready(Arc::clone(records)),
        }
    }
}

/// Shared, explicitly owned cache of fetched collections.
///
/// Clone is cheap; clones share the same entries. Created by the application
/// and handed around by value, never reached through a global.
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, Entry>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Critical sections are short, never held across an await, and never
    /// leave partial state behind, so a poisoned lock is still consistent
    /// and safe to reuse.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the collection for `key`, fetching it on first request.
    ///
    /// The first caller stores `fetch` and starts it in a background task;
    /// every caller suspends until that fetch settles. Later calls return
    /// the cached Ready or Error state without invoking `fetch` again; the
    /// only way out of Error is [`refetch`](Self::refetch).
    pub async fn get_collection<F, Fut>(&self, key: &QueryKey, fetch: F) -> CollectionView
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = FetchResult> + Send + 'static,
    {
        let mut rx = {
            let mut entries = self.lock_entries();
            match entries.get(key) {
                Some(entry) => match &entry.state {
                    EntryState::Loading(tx) => tx.subscribe(),
                    _ => return entry.view(),
                },
                None => {
                    let fetcher: Fetcher = Arc::new(move || fetch().boxed());
                    let (tx, rx) = watch::channel(());
                    entries.insert(
                        key.clone(),
                        Entry {
                            state: EntryState::Loading(tx),
                            fetcher: fetcher.clone(),
                            fetched_at: None,
                            pending_removals: HashSet::new(),
                        },
                    );
                    self.spawn_fetch(key.clone(), fetcher);
                    rx
                }
            }
        };
        // Wait outside the lock. A send marks settlement; a closed channel
        // means the Loading state was already replaced (or the task died).
        let _ = rx.changed().await;
        self.resolved_view(key)
    }

    /// Re-run the stored fetch for `key` and return the settled view.
    ///
    /// Coalesces with a fetch already in flight instead of starting a
    /// second one. Returns `None` for a key that was never requested;
    /// entry creation belongs to [`get_collection`](Self::get_collection).
    pub async fn refetch(&self, key: &QueryKey) -> Option<CollectionView> {
        let mut rx = {
            let mut entries = self.lock_entries();
            let entry = entries.get_mut(key)?;
            match &entry.state {
                EntryState::Loading(tx) => tx.subscribe(),
                _ => {
                    let (tx, rx) = watch::channel(());
                    entry.state = EntryState::Loading(tx);
                    self.spawn_fetch(key.clone(), entry.fetcher.clone());
                    rx
                }
            }
        };
        let _ = rx.changed().await;
        Some(self.resolved_view(key))
    }

    /// Refetch every known key concurrently.
    pub async fn refetch_all(&self) {
        let keys: Vec<QueryKey> = self.lock_entries().keys().cloned().collect();
        debug!(count = keys.len(), "Refetching all known queries");
        join_all(keys.iter().map(|key| self.refetch(key))).await;
    }

    /// Non-suspending read for the render path. `None` means the key was
    /// never requested.
    pub fn snapshot(&self, key: &QueryKey) -> Option<CollectionView> {
        self.lock_entries().get(key).map(Entry::view)
    }

    /// Record ids on `key` with a removal currently in flight.
    pub fn pending_removals(&self, key: &QueryKey) -> HashSet<i64> {
        self.lock_entries()
            .get(key)
            .map(|entry| entry.pending_removals.clone())
            .unwrap_or_default()
    }

    /// Human-readable age of the last settled fetch for `key`, if any.
    pub fn age_display(&self, key: &QueryKey) -> Option<String> {
        let fetched_at = self.lock_entries().get(key)?.fetched_at?;
        Some(age_label((Utc::now() - fetched_at).num_minutes()))
    }

    /// Remove `id` from the Ready collection under `key`.
    ///
    /// `confirm` is the mutation's backend step, awaited between guard
    /// placement and the cache commit; local delete mode passes an
    /// immediately-ready `Ok(())`. While `confirm` is in flight the id sits
    /// in the pending set: a second remove for the same id is rejected with
    /// [`MutationError::DuplicateMutation`] without disturbing the first,
    /// while removes for other ids proceed independently. A commit replaces
    /// the whole collection, never edits it in place, so concurrent
    /// completions all land.
    pub async fn remove<F, Fut>(
        &self,
        key: &QueryKey,
        id: i64,
        confirm: F,
    ) -> Result<MutationOutcome, MutationError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        {
            let mut entries = self.lock_entries();
            let entry = entries
                .get_mut(key)
                .filter(|entry| matches!(entry.state, EntryState::Ready(_)))
                .ok_or_else(|| MutationError::CollectionNotReady(key.clone()))?;
            if !entry.pending_removals.insert(id) {
                debug!(key = %key, id, "Duplicate removal rejected");
                return Err(MutationError::DuplicateMutation(id));
            }
        }

        if let Err(err) = confirm().await {
            let mut entries = self.lock_entries();
            if let Some(entry) = entries.get_mut(key) {
                entry.pending_removals.remove(&id);
            }
            warn!(key = %key, id, error = %err, "Removal backend step failed");
            return Err(MutationError::Backend(err));
        }

        let mut entries = self.lock_entries();
        let entry = match entries.get_mut(key) {
            Some(entry) => entry,
            None => return Ok(MutationOutcome::NotPresent),
        };
        entry.pending_removals.remove(&id);
        let records = match &entry.state {
            EntryState::Ready(records) => records,
            // A refetch replaced the collection mid-removal; the fresh
            // fetch wins and there is nothing left to commit.
            _ => return Ok(MutationOutcome::NotPresent),
        };
        if !records.iter().any(|record| record.id == id) {
            return Ok(MutationOutcome::NotPresent);
        }
        let next: Vec<PostSummary> = records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();
        entry.state = EntryState::Ready(Arc::new(next));
        debug!(key = %key, id, "Record removed from cached collection");
        Ok(MutationOutcome::Removed)
    }

    /// Removal without a backend step, modeling local-only delete mode.
    pub async fn remove_local(
        &self,
        key: &QueryKey,
        id: i64,
    ) -> Result<MutationOutcome, MutationError> {
        self.remove(key, id, || std::future::ready(Ok(()))).await
    }

    fn spawn_fetch(&self, key: QueryKey, fetcher: Fetcher) {
        debug!(key = %key, "Starting fetch");
        let cache = self.clone();
        tokio::spawn(async move {
            let result = fetcher().await;
            cache.settle_fetch(&key, result);
        });
    }

    /// Apply a fetch result: project records (body dropped here, once),
    /// stamp the fetch time on success, reset removal guards, and wake
    /// waiters.
    fn settle_fetch(&self, key: &QueryKey, result: FetchResult) {
        let mut entries = self.lock_entries();
        let entry = match entries.get_mut(key) {
            Some(entry) => entry,
            None => return,
        };
        let next = match result {
            Ok(posts) => {
                let records: Vec<PostSummary> = posts.into_iter().map(PostSummary::from).collect();
                debug!(key = %key, count = records.len(), "Fetch resolved");
                entry.fetched_at = Some(Utc::now());
                EntryState::Ready(Arc::new(records))
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Fetch failed");
                EntryState::Error(Arc::new(err))
            }
        };
        // A fresh result invalidates guards left by removals that never
        // finished.
        entry.pending_removals.clear();
        if let EntryState::Loading(tx) = std::mem::replace(&mut entry.state, next) {
            let _ = tx.send(());
        }
    }

    fn resolved_view(&self, key: &QueryKey) -> CollectionView {
        self.lock_entries()
            .get(key)
            .map(Entry::view)
            .unwrap_or(CollectionView::Loading)
    }
}

/// Format minutes-since-fetch the way the status bar shows it.
fn age_label(minutes: i64) -> String {
    if minutes < 1 {
        // Covers clock skew (negative) as well as fresh fetches.
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        let remaining = minutes % 60;
        if remaining >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        let remaining_hours = (minutes % 1440) / 60;
        if remaining_hours >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use tokio::time::sleep;

    fn post(id: i64, title: &str) -> Post {
        Post {
            id,
            user_id: 1,
            title: title.to_string(),
            body: format!("body of {}", id),
        }
    }

    fn summary(id: i64, title: &str) -> PostSummary {
        PostSummary {
            id,
            user_id: 1,
            title: title.to_string(),
        }
    }

    /// Fetcher resolving to `posts`, counting invocations.
    fn counting_fetcher(
        posts: Vec<Post>,
        calls: Arc<AtomicU32>,
    ) -> impl Fn() -> BoxFuture<'static, FetchResult> + Send + Sync + 'static {
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            let posts = posts.clone();
            async move { Ok(posts) }.boxed()
        }
    }

    #[tokio::test]
    async fn test_first_request_fetches_and_projects() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        let calls = Arc::new(AtomicU32::new(0));
        let fetcher = counting_fetcher(vec![post(1, "a"), post(2, "b")], Arc::clone(&calls));

        let view = cache.get_collection(&key, fetcher).await;

        let records = view.records().expect("first fetch should resolve Ready");
        assert_eq!(records, &[summary(1, "a"), summary(2, "b")]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_read_skips_fetch() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        let calls = Arc::new(AtomicU32::new(0));

        cache
            .get_collection(
                &key,
                counting_fetcher(vec![post(1, "a")], Arc::clone(&calls)),
            )
            .await;
        let view = cache
            .get_collection(
                &key,
                counting_fetcher(vec![post(9, "z")], Arc::clone(&calls)),
            )
            .await;

        // Served from cache: neither fetcher ran a second time.
        assert_eq!(view.records().expect("cached Ready"), &[summary(1, "a")]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in_fetch = Arc::clone(&calls);
        let fetch = move || {
            calls_in_fetch.fetch_add(1, Ordering::SeqCst);
            async {
                sleep(Duration::from_millis(50)).await;
                Ok(vec![post(1, "a")])
            }
        };

        let (first, second) = tokio::join!(
            cache.get_collection(&key, fetch.clone()),
            cache.get_collection(&key, fetch)
        );

        assert_eq!(first.records().expect("Ready"), &[summary(1, "a")]);
        assert_eq!(second.records().expect("Ready"), &[summary(1, "a")]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_snapshot_shows_loading_while_fetch_runs() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        let fetch = || async {
            sleep(Duration::from_millis(50)).await;
            Ok(vec![post(1, "a")])
        };

        assert!(cache.snapshot(&key).is_none());

        let pending = {
            let cache = cache.clone();
            let key = key.clone();
            tokio::spawn(async move { cache.get_collection(&key, fetch).await })
        };
        sleep(Duration::from_millis(10)).await;

        let view = cache.snapshot(&key).expect("entry exists once requested");
        assert!(view.is_loading());

        let view = pending.await.expect("task should not panic");
        assert_eq!(view.records().expect("Ready"), &[summary(1, "a")]);
    }

    #[tokio::test]
    async fn test_fetch_error_is_sticky() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in_fetch = Arc::clone(&calls);
        let fetch = move || {
            calls_in_fetch.fetch_add(1, Ordering::SeqCst);
            async { Err(ApiError::ServerError("boom".to_string())) }
        };

        let first = cache.get_collection(&key, fetch.clone()).await;
        let second = cache.get_collection(&key, fetch).await;

        for view in [&first, &second] {
            match view {
                CollectionView::Error(err) => assert!(err.to_string().contains("boom")),
                other => panic!("expected Error, got {:?}", other),
            }
        }
        // The error is terminal for reads: the second one did not fetch.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refetch_recovers_from_error() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in_fetch = Arc::clone(&calls);
        // First attempt fails, later attempts succeed.
        let fetch = move || {
            let attempt = calls_in_fetch.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(ApiError::ServerError("boom".to_string()))
                } else {
                    Ok(vec![post(1, "a")])
                }
            }
        };

        let first = cache.get_collection(&key, fetch).await;
        assert!(matches!(first, CollectionView::Error(_)));

        let second = cache.refetch(&key).await.expect("known key");
        assert_eq!(
            second.records().expect("refetch should recover"),
            &[summary(1, "a")]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_refetch_unknown_key_is_none() {
        let cache = QueryCache::new();
        assert!(cache
            .refetch(&QueryKey::new("never-requested"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_refetch_coalesces_with_inflight_fetch() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in_fetch = Arc::clone(&calls);
        let fetch = move || {
            calls_in_fetch.fetch_add(1, Ordering::SeqCst);
            async {
                sleep(Duration::from_millis(50)).await;
                Ok(vec![post(1, "a")])
            }
        };

        let pending = {
            let cache = cache.clone();
            let key = key.clone();
            tokio::spawn(async move { cache.get_collection(&key, fetch).await })
        };
        sleep(Duration::from_millis(10)).await;

        let refetched = cache.refetch(&key).await.expect("known key");

        assert_eq!(refetched.records().expect("Ready"), &[summary(1, "a")]);
        pending.await.expect("task should not panic");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refetch_all_updates_every_known_key() {
        let cache = QueryCache::new();
        let first_key = QueryKey::new("posts");
        let second_key = QueryKey::new("todos");
        let calls = Arc::new(AtomicU32::new(0));

        cache
            .get_collection(
                &first_key,
                counting_fetcher(vec![post(1, "a")], Arc::clone(&calls)),
            )
            .await;
        cache
            .get_collection(
                &second_key,
                counting_fetcher(vec![post(2, "b")], Arc::clone(&calls)),
            )
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cache.refetch_all().await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_remove_drops_record_and_keeps_order() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        cache
            .get_collection(&key, || async {
                Ok(vec![post(1, "a"), post(2, "b"), post(3, "c")])
            })
            .await;

        let outcome = cache
            .remove_local(&key, 2)
            .await
            .expect("removal should succeed");

        assert_eq!(outcome, MutationOutcome::Removed);
        let view = cache.snapshot(&key).expect("entry exists");
        assert_eq!(
            view.records().expect("Ready"),
            &[summary(1, "a"), summary(3, "c")]
        );
    }

    #[tokio::test]
    async fn test_remove_absent_id_is_noop() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        cache
            .get_collection(&key, || async { Ok(vec![post(1, "a"), post(2, "b")]) })
            .await;

        let outcome = cache.remove_local(&key, 99).await.expect("no-op removal");

        assert_eq!(outcome, MutationOutcome::NotPresent);
        let view = cache.snapshot(&key).expect("entry exists");
        assert_eq!(
            view.records().expect("Ready"),
            &[summary(1, "a"), summary(2, "b")]
        );
    }

    #[tokio::test]
    async fn test_remove_requires_ready_collection() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");

        let result = cache.remove_local(&key, 1).await;

        assert!(matches!(result, Err(MutationError::CollectionNotReady(_))));
    }

    #[tokio::test]
    async fn test_concurrent_removes_of_distinct_ids_both_apply() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        cache
            .get_collection(&key, || async {
                Ok(vec![post(1, "a"), post(2, "b"), post(3, "c")])
            })
            .await;

        let slow_confirm = || async {
            sleep(Duration::from_millis(30)).await;
            Ok(())
        };
        let (first, second) = tokio::join!(
            cache.remove(&key, 1, slow_confirm),
            cache.remove(&key, 2, slow_confirm)
        );

        assert_eq!(first.expect("first removal"), MutationOutcome::Removed);
        assert_eq!(second.expect("second removal"), MutationOutcome::Removed);
        let view = cache.snapshot(&key).expect("entry exists");
        assert_eq!(view.records().expect("Ready"), &[summary(3, "c")]);
    }

    #[tokio::test]
    async fn test_duplicate_inflight_remove_is_rejected() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        cache
            .get_collection(&key, || async { Ok(vec![post(1, "a"), post(2, "b")]) })
            .await;

        let first = {
            let cache = cache.clone();
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .remove(&key, 1, || async {
                        sleep(Duration::from_millis(60)).await;
                        Ok(())
                    })
                    .await
            })
        };
        sleep(Duration::from_millis(10)).await;

        // Rejected immediately, while the first removal is still in flight.
        let duplicate = cache.remove_local(&key, 1).await;
        assert!(matches!(
            duplicate,
            Err(MutationError::DuplicateMutation(1))
        ));

        // The rejection did not disturb the original removal.
        let outcome = first
            .await
            .expect("task should not panic")
            .expect("first removal");
        assert_eq!(outcome, MutationOutcome::Removed);
        let view = cache.snapshot(&key).expect("entry exists");
        assert_eq!(view.records().expect("Ready"), &[summary(2, "b")]);
    }

    #[tokio::test]
    async fn test_projection_and_removal_end_to_end() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");

        let view = cache
            .get_collection(&key, || async {
                Ok(vec![
                    Post {
                        id: 1,
                        user_id: 1,
                        title: "a".to_string(),
                        body: "x".to_string(),
                    },
                    Post {
                        id: 2,
                        user_id: 1,
                        title: "b".to_string(),
                        body: "y".to_string(),
                    },
                ])
            })
            .await;
        assert_eq!(
            view.records().expect("Ready"),
            &[summary(1, "a"), summary(2, "b")]
        );

        cache.remove_local(&key, 1).await.expect("removal");

        let view = cache.snapshot(&key).expect("entry exists");
        assert_eq!(view.records().expect("Ready"), &[summary(2, "b")]);
    }

    #[tokio::test]
    async fn test_failed_backend_step_leaves_collection_untouched() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        cache
            .get_collection(&key, || async { Ok(vec![post(1, "a"), post(2, "b")]) })
            .await;

        let result = cache
            .remove(&key, 1, || async {
                Err(ApiError::ServerError("500".to_string()))
            })
            .await;
        assert!(matches!(result, Err(MutationError::Backend(_))));

        let view = cache.snapshot(&key).expect("entry exists");
        assert_eq!(
            view.records().expect("Ready"),
            &[summary(1, "a"), summary(2, "b")]
        );

        // The guard was released: the same id can be removed again.
        let outcome = cache.remove_local(&key, 1).await.expect("retry succeeds");
        assert_eq!(outcome, MutationOutcome::Removed);
    }

    #[tokio::test]
    async fn test_refetch_landing_mid_remove_still_commits() {
        let cache = QueryCache::new();
        let key = QueryKey::new("posts");
        let fetch = || async { Ok(vec![post(1, "a"), post(2, "b")]) };
        cache.get_collection(&key, fetch).await;

        let removal = {
            let cache = cache.clone();
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .remove(&key, 1, || async {
                        sleep(Duration::from_millis(60)).await;
                        Ok(())
                    })
                    .await
            })
        };
        sleep(Duration::from_millis(10)).await;

        // A refresh lands while the removal's backend step is in flight.
        cache.refetch(&key).await.expect("known key");

        let outcome = removal
            .await
            .expect("task should not panic")
            .expect("removal");
        assert_eq!(outcome, MutationOutcome::Removed);
        let view = cache.snapshot(&key).expect("entry exists");
        assert_eq!(view.records().expect("Ready"), &[summary(2, "b")]);
    }

    #[test]
    fn test_age_label_just_now() {
        assert_eq!(age_label(0), "just now");
        // Clock skew reads as fresh rather than nonsense.
        assert_eq!(age_label(-5), "just now");
    }

    #[test]
    fn test_age_label_minutes_hours_days() {
        assert_eq!(age_label(5), "5m ago");
        assert_eq!(age_label(59), "59m ago");
        assert_eq!(age_label(60), "1h ago");
        // Rounds up past the half hour.
        assert_eq!(age_label(150), "3h ago");
        assert_eq!(age_label(1500), "1d ago");
    }
}
