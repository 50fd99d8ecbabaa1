//! Refresh-and-replace coordination for cached trend aggregates.
//!
//! Each trend kind stores one aggregate row per logical key plus the child rows
//! the provider returned for it. [`RefreshCoordinator::ensure_fresh`] decides
//! whether the stored aggregate can be served, refreshes it from the provider
//! when needed and always answers from the store.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};

use crate::config::CacheConfig;
use crate::services::staleness::{Freshness, StalenessPolicy};
use crate::services::trend_service::TrendError;

/// Type-level description of one cached trend kind.
pub trait TrendKind: Send + Sync + 'static {
    /// Label used in logs and metrics.
    const NAME: &'static str;

    /// Logical identity of an aggregate, already resolved against the country.
    type Key: Debug + Send + Sync;

    /// Request parameters recorded on the aggregate; a mismatch forces a refresh.
    type Params: Debug + PartialEq + Send + Sync;

    type Item: Send + Sync;

    fn lock_key(key: &Self::Key) -> String;
}

/// Aggregate row as seen by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate<P> {
    pub id: i32,
    pub inserted_at: DateTime<Utc>,
    pub params: P,
}

/// Storage capability for one trend kind.
#[async_trait::async_trait]
pub trait TrendStore<K: TrendKind>: Send + Sync {
    async fn get_aggregate(&self, key: &K::Key) -> Result<Option<Aggregate<K::Params>>, DbErr>;

    /// Deletes the aggregate for `key` together with its children.
    async fn delete_aggregate(&self, key: &K::Key) -> Result<bool, DbErr>;

    /// Deletes any aggregate for `key` and inserts a new one with `items` as
    /// children, all in one transaction. Returns the new aggregate id.
    async fn replace_aggregate(
        &self,
        key: &K::Key,
        params: &K::Params,
        inserted_at: DateTime<Utc>,
        items: &[K::Item],
    ) -> Result<i32, DbErr>;

    /// Children of the live aggregate in insertion order.
    async fn list_children(&self, key: &K::Key, limit: Option<u64>)
    -> Result<Vec<K::Item>, DbErr>;
}

/// External source for one trend kind. An empty list means "nothing to store".
#[async_trait::async_trait]
pub trait TrendProvider<K: TrendKind>: Send + Sync {
    async fn fetch_trends(&self, key: &K::Key, params: &K::Params)
    -> anyhow::Result<Vec<K::Item>>;
}

/// Per-key async locks. Entries nobody holds or waits on are pruned on the
/// next acquisition.
#[derive(Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl KeyLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: String) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key).or_default())
        };
        lock.lock_owned().await
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct RefreshCoordinator {
    policy: StalenessPolicy,
    fetch_timeout: Duration,
    locks: Option<KeyLocks>,
}

impl RefreshCoordinator {
    #[must_use]
    pub fn new(policy: StalenessPolicy, fetch_timeout: Duration, per_key_locking: bool) -> Self {
        Self {
            policy,
            fetch_timeout,
            locks: per_key_locking.then(KeyLocks::new),
        }
    }

    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(
            StalenessPolicy::from_config(config),
            Duration::from_secs(config.fetch_timeout_seconds),
            config.per_key_locking,
        )
    }

    #[must_use]
    pub const fn policy(&self) -> &StalenessPolicy {
        &self.policy
    }

    /// Returns the current children for `key`, refreshing them first when the
    /// stored aggregate is missing, expired or was stored for other parameters.
    ///
    /// Provider failures and timeouts never reach the caller: an absent key stays
    /// absent and a stale aggregate keeps being served. Storage errors propagate.
    pub async fn ensure_fresh<K, S, P>(
        &self,
        store: &S,
        provider: &P,
        key: &K::Key,
        params: &K::Params,
        limit: Option<u64>,
    ) -> Result<Vec<K::Item>, TrendError>
    where
        K: TrendKind,
        S: TrendStore<K> + ?Sized,
        P: TrendProvider<K> + ?Sized,
    {
        let _guard = match &self.locks {
            Some(locks) => Some(locks.acquire(K::lock_key(key)).await),
            None => None,
        };

        let now = Utc::now();

        let Some(aggregate) = store.get_aggregate(key).await? else {
            let items = self.fetch::<K, P>(provider, key, params).await;
            if items.is_empty() {
                record_outcome(K::NAME, "miss_empty");
                return Ok(Vec::new());
            }

            let id = store.replace_aggregate(key, params, now, &items).await?;
            info!(
                kind = K::NAME,
                ?key,
                aggregate_id = id,
                items = items.len(),
                "Cached new trend aggregate"
            );
            record_outcome(K::NAME, "miss_stored");
            return Ok(store.list_children(key, limit).await?);
        };

        match self
            .policy
            .evaluate(aggregate.inserted_at, &aggregate.params, params, now)
        {
            Freshness::Fresh => {
                debug!(kind = K::NAME, ?key, "Serving cached trends");
                record_outcome(K::NAME, "hit");
            }
            Freshness::Stale(reason) => {
                let items = self.fetch::<K, P>(provider, key, params).await;
                if items.is_empty() {
                    warn!(
                        kind = K::NAME,
                        ?key,
                        reason = reason.as_str(),
                        inserted_at = %aggregate.inserted_at,
                        "Refresh returned nothing, serving stale trends"
                    );
                    record_outcome(K::NAME, "stale_served");
                } else {
                    let id = store.replace_aggregate(key, params, now, &items).await?;
                    info!(
                        kind = K::NAME,
                        ?key,
                        reason = reason.as_str(),
                        replaced = aggregate.id,
                        aggregate_id = id,
                        items = items.len(),
                        "Refreshed trend aggregate"
                    );
                    record_outcome(K::NAME, "refreshed");
                }
            }
        }

        Ok(store.list_children(key, limit).await?)
    }

    async fn fetch<K, P>(&self, provider: &P, key: &K::Key, params: &K::Params) -> Vec<K::Item>
    where
        K: TrendKind,
        P: TrendProvider<K> + ?Sized,
    {
        let result = tokio::time::timeout(self.fetch_timeout, provider.fetch_trends(key, params))
            .await;

        let (items, label) = match result {
            Ok(Ok(items)) if items.is_empty() => (items, "empty"),
            Ok(Ok(items)) => (items, "ok"),
            Ok(Err(e)) => {
                warn!(kind = K::NAME, ?key, error = %e, "Trend provider fetch failed");
                (Vec::new(), "error")
            }
            Err(_) => {
                warn!(
                    kind = K::NAME,
                    ?key,
                    timeout_secs = self.fetch_timeout.as_secs(),
                    "Trend provider fetch timed out"
                );
                (Vec::new(), "timeout")
            }
        };

        metrics::counter!("trend_provider_fetches_total", "kind" => K::NAME, "result" => label)
            .increment(1);

        items
    }
}

fn record_outcome(kind: &'static str, outcome: &'static str) {
    metrics::counter!("trend_cache_requests_total", "kind" => kind, "outcome" => outcome)
        .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct Numbers;

    impl TrendKind for Numbers {
        const NAME: &'static str = "numbers";
        type Key = &'static str;
        type Params = u32;
        type Item = i32;

        fn lock_key(key: &Self::Key) -> String {
            (*key).to_string()
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        slots: Mutex<HashMap<&'static str, (Aggregate<u32>, Vec<i32>)>>,
        next_id: AtomicUsize,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl MemoryStore {
        fn seed(&self, key: &'static str, params: u32, inserted_at: DateTime<Utc>, items: Vec<i32>) {
            let aggregate = Aggregate {
                id: 0,
                inserted_at,
                params,
            };
            self.slots.lock().unwrap().insert(key, (aggregate, items));
        }

        fn stored(&self, key: &'static str) -> Option<Vec<i32>> {
            self.slots.lock().unwrap().get(key).map(|(_, items)| items.clone())
        }
    }

    #[async_trait::async_trait]
    impl TrendStore<Numbers> for MemoryStore {
        async fn get_aggregate(&self, key: &&'static str) -> Result<Option<Aggregate<u32>>, DbErr> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(DbErr::Custom("database is locked".to_string()));
            }
            Ok(self.slots.lock().unwrap().get(key).map(|(a, _)| a.clone()))
        }

        async fn delete_aggregate(&self, key: &&'static str) -> Result<bool, DbErr> {
            Ok(self.slots.lock().unwrap().remove(key).is_some())
        }

        async fn replace_aggregate(
            &self,
            key: &&'static str,
            params: &u32,
            inserted_at: DateTime<Utc>,
            items: &[i32],
        ) -> Result<i32, DbErr> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(DbErr::Custom("disk I/O error".to_string()));
            }
            let id = i32::try_from(self.next_id.fetch_add(1, Ordering::SeqCst) + 1).unwrap();
            let aggregate = Aggregate {
                id,
                inserted_at,
                params: *params,
            };
            self.slots
                .lock()
                .unwrap()
                .insert(key, (aggregate, items.to_vec()));
            Ok(id)
        }

        async fn list_children(
            &self,
            key: &&'static str,
            limit: Option<u64>,
        ) -> Result<Vec<i32>, DbErr> {
            let items = self.stored(key).unwrap_or_default();
            let limit = limit.map_or(items.len(), |l| usize::try_from(l).unwrap());
            Ok(items.into_iter().take(limit).collect())
        }
    }

    struct ScriptedProvider {
        items: Vec<i32>,
        fail: bool,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn returning(items: Vec<i32>) -> Self {
            Self {
                items,
                fail: false,
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::returning(vec![])
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl TrendProvider<Numbers> for ScriptedProvider {
        async fn fetch_trends(&self, _key: &&'static str, _params: &u32) -> anyhow::Result<Vec<i32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                anyhow::bail!("provider unavailable");
            }
            Ok(self.items.clone())
        }
    }

    fn coordinator() -> RefreshCoordinator {
        RefreshCoordinator::new(
            StalenessPolicy::new(TimeDelta::hours(1)),
            Duration::from_millis(200),
            true,
        )
    }

    #[tokio::test]
    async fn absent_key_is_fetched_and_stored() {
        let store = MemoryStore::default();
        let provider = ScriptedProvider::returning(vec![1, 2, 3]);

        let items = coordinator()
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, None)
            .await
            .unwrap();

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(provider.calls(), 1);
        assert_eq!(store.stored("spain"), Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let store = MemoryStore::default();
        let provider = ScriptedProvider::returning(vec![1, 2, 3]);
        let coordinator = coordinator();

        coordinator
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, None)
            .await
            .unwrap();
        let items = coordinator
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, Some(2))
            .await
            .unwrap();

        assert_eq!(items, vec![1, 2]);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn absent_key_with_failing_provider_stays_absent() {
        let store = MemoryStore::default();
        let provider = ScriptedProvider::failing();

        let items = coordinator()
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, None)
            .await
            .unwrap();

        assert!(items.is_empty());
        assert_eq!(store.stored("spain"), None);
    }

    #[tokio::test]
    async fn empty_provider_response_creates_nothing() {
        let store = MemoryStore::default();
        let provider = ScriptedProvider::returning(vec![]);

        let items = coordinator()
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, None)
            .await
            .unwrap();

        assert!(items.is_empty());
        assert_eq!(provider.calls(), 1);
        assert_eq!(store.stored("spain"), None);
    }

    #[tokio::test]
    async fn stale_aggregate_is_replaced() {
        let store = MemoryStore::default();
        store.seed("spain", 5, Utc::now() - TimeDelta::hours(3), vec![7, 8, 9]);
        let provider = ScriptedProvider::returning(vec![1, 2]);

        let items = coordinator()
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, None)
            .await
            .unwrap();

        assert_eq!(items, vec![1, 2]);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn stale_aggregate_survives_failed_refresh() {
        let store = MemoryStore::default();
        store.seed("spain", 5, Utc::now() - TimeDelta::hours(3), vec![7, 8, 9]);
        let provider = ScriptedProvider::failing();

        let items = coordinator()
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, None)
            .await
            .unwrap();

        assert_eq!(items, vec![7, 8, 9]);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn provider_timeout_counts_as_failure() {
        let store = MemoryStore::default();
        store.seed("spain", 5, Utc::now() - TimeDelta::hours(3), vec![7, 8, 9]);
        let provider = ScriptedProvider {
            delay: Some(Duration::from_secs(5)),
            ..ScriptedProvider::returning(vec![1])
        };

        let items = coordinator()
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, None)
            .await
            .unwrap();

        assert_eq!(items, vec![7, 8, 9]);
    }

    #[tokio::test]
    async fn parameter_change_forces_refresh() {
        let store = MemoryStore::default();
        store.seed("spain", 10, Utc::now(), vec![7, 8, 9]);
        let provider = ScriptedProvider::returning(vec![1, 2, 3, 4]);

        let items = coordinator()
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &25, None)
            .await
            .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_requests_share_one_refresh() {
        let store = Arc::new(MemoryStore::default());
        let provider = Arc::new(ScriptedProvider {
            delay: Some(Duration::from_millis(50)),
            ..ScriptedProvider::returning(vec![1, 2])
        });
        let coordinator = Arc::new(coordinator());

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let (store, provider, coordinator) =
                    (store.clone(), provider.clone(), coordinator.clone());
                tokio::spawn(async move {
                    coordinator
                        .ensure_fresh::<Numbers, _, _>(
                            store.as_ref(),
                            provider.as_ref(),
                            &"spain",
                            &5,
                            None,
                        )
                        .await
                        .unwrap()
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), vec![1, 2]);
        }
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn key_locks_are_pruned_when_released() {
        let locks = KeyLocks::new();
        {
            let _a = locks.acquire("a".to_string()).await;
            let _b = locks.acquire("b".to_string()).await;
            assert_eq!(locks.len(), 2);
        }
        let _c = locks.acquire("c".to_string()).await;
        assert_eq!(locks.len(), 1);
    }

    #[tokio::test]
    async fn failed_replace_surfaces_storage_error_and_keeps_old_slot() {
        let store = MemoryStore::default();
        store.seed("spain", 5, Utc::now() - TimeDelta::hours(3), vec![7, 8, 9]);
        store.fail_writes.store(true, Ordering::SeqCst);
        let provider = ScriptedProvider::returning(vec![1, 2, 3]);

        let result = coordinator()
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, None)
            .await;

        assert!(matches!(result, Err(TrendError::Storage(_))));
        assert_eq!(provider.calls(), 1);
        assert_eq!(store.stored("spain"), Some(vec![7, 8, 9]));
    }

    #[tokio::test]
    async fn failed_insert_for_absent_key_surfaces_storage_error() {
        let store = MemoryStore::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        let provider = ScriptedProvider::returning(vec![1, 2, 3]);

        let result = coordinator()
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, None)
            .await;

        assert!(matches!(result, Err(TrendError::Storage(_))));
        assert_eq!(store.stored("spain"), None);
    }

    #[tokio::test]
    async fn failed_lookup_surfaces_storage_error_without_fetching() {
        let store = MemoryStore::default();
        store.fail_reads.store(true, Ordering::SeqCst);
        let provider = ScriptedProvider::returning(vec![1, 2, 3]);

        let result = coordinator()
            .ensure_fresh::<Numbers, _, _>(&store, &provider, &"spain", &5, None)
            .await;

        assert!(matches!(result, Err(TrendError::Storage(_))));
        assert_eq!(provider.calls(), 0);
    }
}
