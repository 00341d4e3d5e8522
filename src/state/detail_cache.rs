use crate::data_provider::DataProvider;
use fpl_api::client::ApiError;
use fpl_api::{PlayerDetail, PlayerId};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type DetailResult = Result<Arc<PlayerDetail>, Arc<ApiError>>;

type InFlight = Shared<BoxFuture<'static, DetailResult>>;

#[derive(Default)]
struct CacheInner {
    resolved: HashMap<PlayerId, Arc<PlayerDetail>>,
    in_flight: HashMap<PlayerId, InFlight>,
}

/// Memoized per-player detail payloads for the lifetime of the session.
///
/// Successful fetches are kept forever; failures leave nothing behind so the next
/// lookup fetches again. Concurrent lookups for the same uncached player share a
/// single request. Cloning yields another handle to the same cache.
#[derive(Clone, Default)]
pub struct DetailCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached payload for `player_id`, without touching the network.
    pub fn cached(&self, player_id: PlayerId) -> Option<Arc<PlayerDetail>> {
        lock(&self.inner).resolved.get(&player_id).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).resolved.len()
    }

    pub async fn get_or_fetch(
        &self,
        provider: &Arc<dyn DataProvider>,
        player_id: PlayerId,
    ) -> DetailResult {
        let pending = {
            let mut inner = lock(&self.inner);
            if let Some(hit) = inner.resolved.get(&player_id) {
                debug!("player {player_id} detail served from cache");
                return Ok(hit.clone());
            }
            match inner.in_flight.get(&player_id) {
                Some(pending) => {
                    debug!("player {player_id} detail already in flight, joining");
                    pending.clone()
                }
                None => {
                    let fetch = fetch(self.inner.clone(), provider.clone(), player_id)
                        .boxed()
                        .shared();
                    inner.in_flight.insert(player_id, fetch.clone());
                    fetch
                }
            }
        };
        pending.await
    }
}

/// Runs exactly once per in-flight entry, so the bookkeeping below happens once.
async fn fetch(
    inner: Arc<Mutex<CacheInner>>,
    provider: Arc<dyn DataProvider>,
    player_id: PlayerId,
) -> DetailResult {
    debug!("fetching player {player_id} detail");
    let result = provider
        .player_detail(player_id)
        .await
        .map(Arc::new)
        .map_err(Arc::new);

    let mut guard = lock(&inner);
    guard.in_flight.remove(&player_id);
    if let Ok(detail) = &result {
        guard.resolved.insert(player_id, detail.clone());
    }
    result
}

fn lock(inner: &Mutex<CacheInner>) -> MutexGuard<'_, CacheInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_provider::fake::FakeProvider;
    use fpl_api::HistoryEntry;
    use std::sync::atomic::Ordering;

    fn detail(points: i32) -> PlayerDetail {
        PlayerDetail {
            history: vec![HistoryEntry { event: Some(1), total_points: points, ..Default::default() }],
            upcoming: vec![],
        }
    }

    fn provider_with(id: PlayerId, d: PlayerDetail) -> (Arc<FakeProvider>, Arc<dyn DataProvider>) {
        let fake = Arc::new(FakeProvider::default());
        fake.set_detail(id, d);
        let provider: Arc<dyn DataProvider> = fake.clone();
        (fake, provider)
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let (fake, provider) = provider_with(1, detail(7));
        let cache = DetailCache::new();

        let first = cache.get_or_fetch(&provider, 1).await.unwrap();
        let second = cache.get_or_fetch(&provider, 1).await.unwrap();

        assert_eq!(fake.detail_calls(), 1);
        assert_eq!(first, second);
        assert_eq!(cache.cached(1).as_deref(), Some(&detail(7)));
    }

    #[tokio::test]
    async fn failure_leaves_no_entry_and_retry_fetches_again() {
        let (fake, provider) = provider_with(1, detail(7));
        fake.fail_detail.store(true, Ordering::SeqCst);
        let cache = DetailCache::new();

        assert!(cache.get_or_fetch(&provider, 1).await.is_err());
        assert!(cache.cached(1).is_none());
        assert_eq!(cache.len(), 0);

        fake.fail_detail.store(false, Ordering::SeqCst);
        let detail_after_retry = cache.get_or_fetch(&provider, 1).await.unwrap();

        assert_eq!(fake.detail_calls(), 2);
        assert_eq!(*detail_after_retry, detail(7));
    }

    #[tokio::test]
    async fn concurrent_lookups_share_one_request() {
        let (fake, provider) = provider_with(1, detail(3));
        let cache = DetailCache::new();

        let (a, b) = tokio::join!(cache.get_or_fetch(&provider, 1), cache.get_or_fetch(&provider, 1));

        assert_eq!(fake.detail_calls(), 1);
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn different_players_are_cached_separately() {
        let (fake, provider) = provider_with(1, detail(3));
        fake.set_detail(2, detail(9));
        let cache = DetailCache::new();

        cache.get_or_fetch(&provider, 1).await.unwrap();
        let other = cache.get_or_fetch(&provider, 2).await.unwrap();

        assert_eq!(fake.detail_calls(), 2);
        assert_eq!(other.history[0].total_points, 9);
    }
}
