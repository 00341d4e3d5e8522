use crate::state::dashboard::Snapshot;
use crate::state::focus::DetailTicket;
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use fpl_api::PlayerDetail;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Gated fetch of summary, players and fixtures.
    Refresh { generation: u64 },
    LoadPlayerDetail { ticket: DetailTicket },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    DataLoaded { generation: u64, snapshot: Box<Snapshot> },
    RefreshFailed { generation: u64, message: String },
    PlayerDetailLoaded { ticket: DetailTicket, detail: Arc<PlayerDetail> },
    PlayerDetailFailed { ticket: DetailTicket, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// Scheduled refresh from the periodic refresher.
    RefreshTick,
}
