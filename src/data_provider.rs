/// Trait for providing dashboard data, abstracting over the HTTP client and test fakes
use async_trait::async_trait;
use fpl_api::client::{ApiResult, FplApi};
use fpl_api::{Player, PlayerDetail, PlayerId, Summary, TeamFixtures};

#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Summary aggregates and rank lists
    async fn summary(&self) -> ApiResult<Summary>;

    /// Full player collection
    async fn players(&self) -> ApiResult<Vec<Player>>;

    /// Upcoming fixtures grouped per team
    async fn upcoming_fixtures(&self) -> ApiResult<Vec<TeamFixtures>>;

    /// History and upcoming fixtures for one player
    async fn player_detail(&self, player_id: PlayerId) -> ApiResult<PlayerDetail>;
}

#[async_trait]
impl DataProvider for FplApi {
    async fn summary(&self) -> ApiResult<Summary> {
        self.fetch_summary().await
    }

    async fn players(&self) -> ApiResult<Vec<Player>> {
        self.fetch_players().await
    }

    async fn upcoming_fixtures(&self) -> ApiResult<Vec<TeamFixtures>> {
        self.fetch_upcoming_fixtures().await
    }

    async fn player_detail(&self, player_id: PlayerId) -> ApiResult<PlayerDetail> {
        self.fetch_player_detail(player_id).await
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use fpl_api::client::ApiError;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-memory provider with per-resource failure switches and call counters.
    #[derive(Default)]
    pub struct FakeProvider {
        pub players: Mutex<Vec<Player>>,
        pub summary: Mutex<Summary>,
        pub fixtures: Mutex<Vec<TeamFixtures>>,
        pub details: Mutex<HashMap<PlayerId, PlayerDetail>>,
        pub fail_summary: AtomicBool,
        pub fail_players: AtomicBool,
        pub fail_fixtures: AtomicBool,
        pub fail_detail: AtomicBool,
        pub detail_calls: AtomicUsize,
    }

    impl FakeProvider {
        pub fn with_players(players: Vec<Player>) -> Self {
            Self {
                players: Mutex::new(players),
                ..Default::default()
            }
        }

        pub fn set_detail(&self, player_id: PlayerId, detail: PlayerDetail) {
            self.details.lock().unwrap().insert(player_id, detail);
        }

        pub fn detail_calls(&self) -> usize {
            self.detail_calls.load(Ordering::SeqCst)
        }

        fn check(flag: &AtomicBool, what: &str) -> ApiResult<()> {
            if flag.load(Ordering::SeqCst) {
                Err(ApiError::NotFound(format!("{what} unavailable")))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl DataProvider for FakeProvider {
        async fn summary(&self) -> ApiResult<Summary> {
            Self::check(&self.fail_summary, "summary")?;
            Ok(self.summary.lock().unwrap().clone())
        }

        async fn players(&self) -> ApiResult<Vec<Player>> {
            Self::check(&self.fail_players, "players")?;
            Ok(self.players.lock().unwrap().clone())
        }

        async fn upcoming_fixtures(&self) -> ApiResult<Vec<TeamFixtures>> {
            Self::check(&self.fail_fixtures, "fixtures")?;
            Ok(self.fixtures.lock().unwrap().clone())
        }

        async fn player_detail(&self, player_id: PlayerId) -> ApiResult<PlayerDetail> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            // Give concurrent callers a chance to observe the request in flight.
            tokio::task::yield_now().await;
            Self::check(&self.fail_detail, "history")?;
            self.details
                .lock()
                .unwrap()
                .get(&player_id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(format!("player {player_id}")))
        }
    }
}
