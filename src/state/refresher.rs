use crate::state::messages::UiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic full refresh. Goes through the UI loop so every refresh gets a
/// fresh generation from the dashboard.
pub struct PeriodicRefresher {
    ui_events: mpsc::Sender<UiEvent>,
    every: Duration,
}

impl PeriodicRefresher {
    pub fn new(ui_events: mpsc::Sender<UiEvent>, every: Duration) -> Self {
        Self { ui_events, every }
    }

    pub async fn run(self) {
        let mut refresh_interval = interval(self.every);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        refresh_interval.tick().await;

        loop {
            refresh_interval.tick().await;
            if self.ui_events.send(UiEvent::RefreshTick).await.is_err() {
                break;
            }
        }
    }
}
