use crate::state::store::EntityStore;
use crate::state::view::collate;
use fpl_api::{Fixture, HistoryEntry, Player, PlayerDetail, PlayerId, Position};
use log::{debug, warn};
use std::fmt;

/// Trend charts only show this many of the most recent gameweeks.
pub const HISTORY_WINDOW: usize = 12;
/// Upcoming fixtures listed in the insights panel.
pub const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    Unfocused,
    Focused(PlayerId),
}

impl FocusState {
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            FocusState::Unfocused => None,
            FocusState::Focused(id) => Some(*id),
        }
    }
}

/// Identifies one focus change. A detail result is only applied while its
/// ticket is still the controller's current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    pub player_id: PlayerId,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusError {
    UnknownPlayer(PlayerId),
}

impl fmt::Display for FocusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusError::UnknownPlayer(id) => write!(f, "player {id} is not in the current dataset"),
        }
    }
}

impl std::error::Error for FocusError {}

// ---------------------------------------------------------------------------
// Focus picker (the select control)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PickerOption {
    pub id: PlayerId,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusPicker {
    pub options: Vec<PickerOption>,
    /// Index into `options` of the focused player, if it is listed.
    pub selected: Option<usize>,
}

impl FocusPicker {
    /// Options follow the summary's player lookup (already sorted by name). Entries
    /// missing from the store are skipped; without a lookup, fall back to the store.
    fn rebuild(&mut self, store: &EntityStore) {
        let lookup = &store.summary().player_lookup;
        self.options = if lookup.is_empty() {
            let mut players: Vec<&Player> = store.players().iter().collect();
            players.sort_by(|a, b| collate(&a.web_name, &b.web_name));
            players
                .into_iter()
                .map(|p| PickerOption {
                    id: p.id,
                    label: option_label(&p.web_name, &p.team_short),
                })
                .collect()
        } else {
            lookup
                .iter()
                .filter(|entry| store.contains(entry.id))
                .map(|entry| PickerOption {
                    id: entry.id,
                    label: option_label(&entry.web_name, &entry.team_short),
                })
                .collect()
        };
        self.selected = None;
    }

    fn select(&mut self, player_id: Option<PlayerId>) {
        self.selected = player_id.and_then(|id| self.options.iter().position(|o| o.id == id));
    }
}

fn option_label(name: &str, team_short: &str) -> String {
    if team_short.is_empty() {
        name.to_string()
    } else {
        format!("{name} ({team_short})")
    }
}

// ---------------------------------------------------------------------------
// Insights panel
// ---------------------------------------------------------------------------

/// Everything the insights panel shows for the focused player.
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub player_id: PlayerId,
    pub name: String,
    pub full_name: String,
    pub team: String,
    pub position: Position,
    /// Most recent [`HISTORY_WINDOW`] gameweeks, oldest first.
    pub history: Vec<HistoryEntry>,
    /// First [`UPCOMING_LIMIT`] fixtures in arrival order.
    pub upcoming: Vec<Fixture>,
    pub points_series: Vec<(f64, f64)>,
    pub xgi_series: Vec<(f64, f64)>,
    pub value_series: Vec<(f64, f64)>,
}

impl Insights {
    pub fn build(player: &Player, detail: &PlayerDetail) -> Self {
        let skip = detail.history.len().saturating_sub(HISTORY_WINDOW);
        let history: Vec<HistoryEntry> = detail.history.iter().skip(skip).cloned().collect();
        let upcoming = detail.upcoming.iter().take(UPCOMING_LIMIT).cloned().collect();

        let series = |f: fn(&HistoryEntry) -> f64| -> Vec<(f64, f64)> {
            history
                .iter()
                .enumerate()
                .map(|(i, h)| (h.event.map(f64::from).unwrap_or((skip + i + 1) as f64), f(h)))
                .collect()
        };
        let points_series = series(|h| f64::from(h.total_points));
        let xgi_series = series(|h| h.expected_goal_involvements);
        let value_series = series(|h| h.value);

        Self {
            player_id: player.id,
            name: player.web_name.clone(),
            full_name: player.full_name(),
            team: player.team.clone(),
            position: player.position,
            history,
            upcoming,
            points_series,
            xgi_series,
            value_series,
        }
    }

    pub fn recent_points(&self) -> i32 {
        self.history.iter().map(|h| h.total_points).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InsightsPanel {
    /// Placeholder shown when nothing is focused (or nothing has loaded yet).
    #[default]
    Empty,
    Ready(Box<Insights>),
}

// ---------------------------------------------------------------------------
// Focus controller
// ---------------------------------------------------------------------------

/// Sole owner of the focused player. Keeps the picker selection, the table
/// highlight and the insights panel consistent with it.
#[derive(Debug, Default)]
pub struct FocusController {
    state: FocusState,
    generation: u64,
    picker: FocusPicker,
    highlighted_row: Option<usize>,
    panel: InsightsPanel,
}

impl FocusController {
    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn focused(&self) -> Option<PlayerId> {
        self.state.player_id()
    }

    pub fn picker(&self) -> &FocusPicker {
        &self.picker
    }

    /// Row of the focused player in the current view, if it is visible.
    pub fn highlighted_row(&self) -> Option<usize> {
        self.highlighted_row
    }

    pub fn panel(&self) -> &InsightsPanel {
        &self.panel
    }

    /// Focus `player_id`. Refused, with state unchanged, if the store doesn't know
    /// the player. The returned ticket must accompany the detail lookup.
    pub fn set_focus(
        &mut self,
        player_id: PlayerId,
        store: &EntityStore,
        view: &[PlayerId],
    ) -> Result<DetailTicket, FocusError> {
        if !store.contains(player_id) {
            warn!("refusing focus on unknown player {player_id}");
            return Err(FocusError::UnknownPlayer(player_id));
        }

        self.state = FocusState::Focused(player_id);
        self.generation += 1;
        self.picker.select(Some(player_id));
        self.sync_highlight(view);
        debug!("focus -> player {player_id} (generation {})", self.generation);

        Ok(DetailTicket {
            player_id,
            generation: self.generation,
        })
    }

    pub fn clear_focus(&mut self) {
        self.state = FocusState::Unfocused;
        // Invalidates any detail lookup still in flight.
        self.generation += 1;
        self.picker.select(None);
        self.highlighted_row = None;
        self.panel = InsightsPanel::Empty;
        debug!("focus cleared (generation {})", self.generation);
    }

    pub fn is_current(&self, ticket: DetailTicket) -> bool {
        self.generation == ticket.generation && self.state == FocusState::Focused(ticket.player_id)
    }

    /// Render the insights panel from a fetched detail payload. Returns false when
    /// the ticket is stale and nothing changed.
    pub fn on_detail_loaded(
        &mut self,
        ticket: DetailTicket,
        detail: &PlayerDetail,
        store: &EntityStore,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!("dropping stale detail for player {}", ticket.player_id);
            return false;
        }
        let Some(player) = store.player(ticket.player_id) else {
            return false;
        };
        self.panel = InsightsPanel::Ready(Box::new(Insights::build(player, detail)));
        true
    }

    /// Recompute the table highlight after the view changed.
    pub fn sync_highlight(&mut self, view: &[PlayerId]) {
        self.highlighted_row = self
            .focused()
            .and_then(|id| view.iter().position(|row| *row == id));
    }

    /// Rebuild the picker options after the store was replaced. Focus on a player
    /// that no longer exists is cleared.
    pub fn reconcile(&mut self, store: &EntityStore, view: &[PlayerId]) {
        self.picker.rebuild(store);
        match self.focused() {
            Some(id) if !store.contains(id) => {
                debug!("focused player {id} disappeared from the dataset");
                self.clear_focus();
            }
            focused => {
                self.picker.select(focused);
                self.sync_highlight(view);
            }
        }
    }
}
