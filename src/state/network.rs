use crate::data_provider::DataProvider;
use crate::state::dashboard::Snapshot;
use crate::state::detail_cache::DetailCache;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use fpl_api::client::ApiResult;
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Executes network requests. Each request runs on its own task so a refresh
/// and a detail lookup can overlap; ordering is sorted out by generations on
/// the receiving side.
pub struct NetworkWorker {
    provider: Arc<dyn DataProvider>,
    cache: DetailCache,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
}

impl NetworkWorker {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        cache: DetailCache,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            provider,
            cache,
            requests,
            responses,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            // Cache hits are answered inline, without the spinner.
            if let NetworkRequest::LoadPlayerDetail { ticket } = &request
                && let Some(detail) = self.cache.cached(ticket.player_id)
            {
                let response = NetworkResponse::PlayerDetailLoaded { ticket: *ticket, detail };
                if let Err(e) = self.responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
                continue;
            }

            start_loading_animation(&self.responses, &self.in_flight).await;

            let provider = self.provider.clone();
            let cache = self.cache.clone();
            let responses = self.responses.clone();
            let in_flight = self.in_flight.clone();

            tokio::spawn(async move {
                let response = handle_request(&provider, &cache, request).await;
                let is_ok = !matches!(
                    response,
                    NetworkResponse::RefreshFailed { .. } | NetworkResponse::PlayerDetailFailed { .. }
                );
                debug!("network request complete");
                stop_loading_animation(&responses, &in_flight, is_ok).await;

                if let Err(e) = responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
            });
        }
    }
}

pub async fn handle_request(
    provider: &Arc<dyn DataProvider>,
    cache: &DetailCache,
    request: NetworkRequest,
) -> NetworkResponse {
    match request {
        NetworkRequest::Refresh { generation } => {
            debug!("refreshing dashboard data (generation {generation})");
            match load_snapshot(provider.as_ref()).await {
                Ok(snapshot) => NetworkResponse::DataLoaded {
                    generation,
                    snapshot: Box::new(snapshot),
                },
                Err(e) => NetworkResponse::RefreshFailed {
                    generation,
                    message: e.to_string(),
                },
            }
        }
        NetworkRequest::LoadPlayerDetail { ticket } => {
            match cache.get_or_fetch(provider, ticket.player_id).await {
                Ok(detail) => {
                    debug!("detail cache holds {} players", cache.len());
                    NetworkResponse::PlayerDetailLoaded { ticket, detail }
                }
                Err(e) => NetworkResponse::PlayerDetailFailed {
                    ticket,
                    message: e.to_string(),
                },
            }
        }
    }
}

/// Fetch the three top-level resources concurrently and wait for all of them.
/// Any failure fails the whole snapshot.
pub async fn load_snapshot(provider: &dyn DataProvider) -> ApiResult<Snapshot> {
    let (summary, players, fixtures) = tokio::join!(
        provider.summary(),
        provider.players(),
        provider.upcoming_fixtures()
    );

    if let Err(e) = &summary {
        warn!("summary fetch failed: {e}");
    }
    if let Err(e) = &players {
        warn!("players fetch failed: {e}");
    }
    if let Err(e) = &fixtures {
        warn!("fixtures fetch failed: {e}");
    }

    Ok(Snapshot {
        summary: summary?,
        players: players?,
        fixtures: fixtures?,
    })
}

async fn start_loading_animation(
    responses: &mpsc::Sender<NetworkResponse>,
    in_flight: &Arc<AtomicUsize>,
) {
    if in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
        return; // spinner already running
    }

    let mut loading_state = LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged { loading_state })
        .await;

    let responses = responses.clone();
    let in_flight = in_flight.clone();

    tokio::spawn(async move {
        let mut spinner_index = 1;
        let mut interval = tokio::time::interval(Duration::from_millis(33));
        loop {
            interval.tick().await;
            if in_flight.load(Ordering::SeqCst) == 0 {
                break;
            }
            loading_state.spinner_char = SPINNER_CHARS[spinner_index];
            spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
            let _ = responses
                .send(NetworkResponse::LoadingStateChanged { loading_state })
                .await;
        }
    });
}

async fn stop_loading_animation(
    responses: &mpsc::Sender<NetworkResponse>,
    in_flight: &Arc<AtomicUsize>,
    is_ok: bool,
) {
    if in_flight.fetch_sub(1, Ordering::SeqCst) > 1 {
        return;
    }
    tokio::time::sleep(Duration::from_millis(15)).await;

    let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
    let _ = responses
        .send(NetworkResponse::LoadingStateChanged {
            loading_state: LoadingState { is_loading: false, spinner_char },
        })
        .await;
}
