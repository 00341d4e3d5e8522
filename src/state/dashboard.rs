use crate::state::focus::{DetailTicket, FocusController, FocusError};
use crate::state::store::EntityStore;
use crate::state::view::{self, FilterCriteria, SortDirection, SortKey, SortSpec};
use chrono::{DateTime, Local};
use fpl_api::{Player, PlayerDetail, PlayerId, Position, Summary, TeamFixtures};
use log::{debug, error, info};

pub const REFRESH_FAILED: &str = "Unable to load data";
pub const DETAIL_FAILED: &str = "Unable to load player history";

/// The three top-level resources, fetched together.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub summary: Summary,
    pub fixtures: Vec<TeamFixtures>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
    pub at: DateTime<Local>,
}

impl StatusLine {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            at: Local::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Store replaced. Carries the detail lookup for the default focus, if any.
    Applied(Option<DetailTicket>),
    Failed,
    /// A newer refresh was started after this one; the result was dropped.
    Stale,
}

/// Dashboard state: the entity store, filter and sort controls, the derived
/// view and the focus controller. Owned by the app and passed around
/// explicitly; nothing here is global.
#[derive(Debug, Default)]
pub struct Dashboard {
    store: EntityStore,
    criteria: FilterCriteria,
    sort: SortSpec,
    view: Vec<PlayerId>,
    focus: FocusController,
    refresh_generation: u64,
    status: Option<StatusLine>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// Ids of the filtered, sorted players in display order.
    pub fn view_ids(&self) -> &[PlayerId] {
        &self.view
    }

    pub fn view_players(&self) -> Vec<&Player> {
        self.view.iter().filter_map(|id| self.store.player(*id)).collect()
    }

    // -----------------------------------------------------------------------
    // Refresh sequencing
    // -----------------------------------------------------------------------

    /// Start a refresh. Results carrying an older generation are ignored.
    pub fn begin_refresh(&mut self) -> u64 {
        self.refresh_generation += 1;
        debug!("refresh generation {}", self.refresh_generation);
        self.refresh_generation
    }

    /// Apply the outcome of the gated fetch. On failure nothing but the status
    /// line changes.
    pub fn apply_refresh<E: std::fmt::Display>(
        &mut self,
        generation: u64,
        result: Result<Snapshot, E>,
    ) -> RefreshOutcome {
        if generation != self.refresh_generation {
            debug!("dropping stale refresh {generation} (current {})", self.refresh_generation);
            return RefreshOutcome::Stale;
        }

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("refresh failed: {e}");
                self.status = Some(StatusLine::new(StatusKind::Error, REFRESH_FAILED));
                return RefreshOutcome::Failed;
            }
        };

        let previous_focus = self.focus.focused();
        self.store
            .load(snapshot.players, snapshot.summary, snapshot.fixtures);
        info!(
            "loaded {} players, {} teams",
            self.store.players().len(),
            self.store.teams().len()
        );

        if self
            .criteria
            .position
            .is_some_and(|p| !self.store.positions().contains(&p))
        {
            self.criteria.position = None;
        }
        if self
            .criteria
            .team
            .as_ref()
            .is_some_and(|t| !self.store.teams().contains(t))
        {
            self.criteria.team = None;
        }
        self.recompute_view();
        self.focus.reconcile(&self.store, &self.view);

        let ticket = self
            .default_focus(previous_focus)
            .and_then(|id| self.focus.set_focus(id, &self.store, &self.view).ok());
        if ticket.is_none() {
            self.focus.clear_focus();
        }

        let now = Local::now();
        self.status = Some(StatusLine {
            kind: StatusKind::Success,
            message: format!("Data updated {}", now.format("%H:%M:%S")),
            at: now,
        });
        RefreshOutcome::Applied(ticket)
    }

    /// Previous focus if still present, else the summary's top expected scorer,
    /// else the first player, else nobody.
    fn default_focus(&self, previous: Option<PlayerId>) -> Option<PlayerId> {
        previous
            .filter(|id| self.store.contains(*id))
            .or_else(|| {
                self.store
                    .summary()
                    .top_expected_points
                    .iter()
                    .map(|p| p.id)
                    .find(|id| self.store.contains(*id))
            })
            .or_else(|| self.store.players().first().map(|p| p.id))
    }

    // -----------------------------------------------------------------------
    // Filter and sort
    // -----------------------------------------------------------------------

    fn recompute_view(&mut self) {
        self.view = view::apply(self.store.players(), &self.criteria, &self.sort)
            .into_iter()
            .map(|p| p.id)
            .collect();
        self.focus.sync_highlight(&self.view);
    }

    pub fn set_position_filter(&mut self, position: Option<Position>) {
        self.criteria.position = position;
        self.recompute_view();
    }

    pub fn set_team_filter(&mut self, team: Option<String>) {
        self.criteria.team = team;
        self.recompute_view();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
        self.recompute_view();
    }

    /// All → each known position → all.
    pub fn cycle_position_filter(&mut self) {
        let next = cycle(self.store.positions(), self.criteria.position.as_ref()).copied();
        self.set_position_filter(next);
    }

    /// All → each known team → all.
    pub fn cycle_team_filter(&mut self) {
        let next = cycle(self.store.teams(), self.criteria.team.as_ref()).cloned();
        self.set_team_filter(next);
    }

    pub fn push_search_char(&mut self, c: char) {
        self.criteria.search.push(c);
        self.recompute_view();
    }

    pub fn pop_search_char(&mut self) {
        self.criteria.search.pop();
        self.recompute_view();
    }

    pub fn sort_by(&mut self, key: SortKey, direction: SortDirection) {
        self.sort.select(key, direction);
        debug!("sort by {} {:?}", self.sort.key.field(), self.sort.direction);
        self.recompute_view();
    }

    /// Flip the active column.
    pub fn toggle_sort(&mut self) {
        let key = self.sort.key;
        self.sort_by(key, key.initial_direction());
    }

    /// Move to the next column in its natural direction.
    pub fn cycle_sort_key(&mut self) {
        let next = self.sort.key.next();
        self.sort_by(next, next.initial_direction());
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    pub fn set_focus(&mut self, player_id: PlayerId) -> Result<DetailTicket, FocusError> {
        self.focus.set_focus(player_id, &self.store, &self.view)
    }

    pub fn clear_focus(&mut self) {
        self.focus.clear_focus();
    }

    pub fn on_detail_loaded(&mut self, ticket: DetailTicket, detail: &PlayerDetail) -> bool {
        self.focus.on_detail_loaded(ticket, detail, &self.store)
    }

    /// The panel keeps whatever it showed before; only the status changes.
    pub fn on_detail_failed(&mut self, ticket: DetailTicket, message: &str) -> bool {
        if !self.focus.is_current(ticket) {
            debug!("ignoring stale detail failure for player {}", ticket.player_id);
            return false;
        }
        error!("player {} history failed: {message}", ticket.player_id);
        self.status = Some(StatusLine::new(StatusKind::Error, DETAIL_FAILED));
        true
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some(StatusLine::new(StatusKind::Info, message));
    }
}

/// Next value after `current` in `options`, wrapping through `None` ("all").
fn cycle<'a, T: PartialEq>(options: &'a [T], current: Option<&T>) -> Option<&'a T> {
    match current {
        None => options.first(),
        Some(value) => options
            .iter()
            .position(|o| o == value)
            .and_then(|i| options.get(i + 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::focus::{FocusState, InsightsPanel};
    use fpl_api::HistoryEntry;

    fn player(id: PlayerId, name: &str, team: &str, position: Position, points: i32) -> Player {
        Player {
            id,
            web_name: name.into(),
            team: team.into(),
            position,
            total_points: points,
            ..Default::default()
        }
    }

    fn snapshot(players: Vec<Player>) -> Snapshot {
        Snapshot { players, ..Default::default() }
    }

    fn scenario_players() -> Vec<Player> {
        vec![
            player(1, "A", "X", Position::Forward, 50),
            player(2, "B", "Y", Position::Midfielder, 80),
        ]
    }

    fn loaded(players: Vec<Player>) -> Dashboard {
        let mut dash = Dashboard::new();
        let generation = dash.begin_refresh();
        let outcome = dash.apply_refresh::<String>(generation, Ok(snapshot(players)));
        assert!(matches!(outcome, RefreshOutcome::Applied(_)));
        dash
    }

    fn view_ids(dash: &Dashboard) -> Vec<PlayerId> {
        dash.view_ids().to_vec()
    }

    #[test]
    fn scenario_one_default_view() {
        let dash = loaded(scenario_players());
        assert_eq!(view_ids(&dash), vec![2, 1]);
    }

    #[test]
    fn scenario_two_search() {
        let mut dash = loaded(scenario_players());
        dash.set_search("a");
        assert_eq!(view_ids(&dash), vec![1]);
    }

    #[test]
    fn scenario_three_focus_after_player_vanishes() {
        let mut dash = loaded(scenario_players());
        dash.set_focus(1).unwrap();

        let generation = dash.begin_refresh();
        dash.apply_refresh::<String>(generation, Ok(snapshot(vec![player(2, "B", "Y", Position::Midfielder, 80)])));

        assert!(dash.set_focus(1).is_err());
        dash.clear_focus();
        assert!(dash.set_focus(2).is_ok());
        assert_eq!(dash.focus().state(), FocusState::Focused(2));
    }

    #[test]
    fn failed_refresh_leaves_store_untouched() {
        let mut dash = loaded(scenario_players());
        dash.set_focus(1).unwrap();
        let before = dash.store().clone();

        let generation = dash.begin_refresh();
        let outcome = dash.apply_refresh(generation, Err("players: 502"));

        assert_eq!(outcome, RefreshOutcome::Failed);
        assert_eq!(dash.store(), &before);
        assert_eq!(view_ids(&dash), vec![2, 1]);
        assert_eq!(dash.focus().focused(), Some(1));
        let status = dash.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.message, REFRESH_FAILED);
    }

    #[test]
    fn stale_refresh_is_dropped() {
        let mut dash = loaded(scenario_players());
        let old = dash.begin_refresh();
        let new = dash.begin_refresh();

        let outcome = dash.apply_refresh::<String>(old, Ok(snapshot(vec![])));
        assert_eq!(outcome, RefreshOutcome::Stale);
        assert_eq!(dash.store().players().len(), 2);

        let outcome = dash.apply_refresh::<String>(new, Ok(snapshot(vec![player(3, "C", "Z", Position::Defender, 10)])));
        assert!(matches!(outcome, RefreshOutcome::Applied(Some(_))));
        assert_eq!(view_ids(&dash), vec![3]);
    }

    #[test]
    fn default_focus_prefers_previous_then_summary_then_first() {
        // First player in the raw collection.
        let dash = loaded(scenario_players());
        assert_eq!(dash.focus().focused(), Some(1));

        // Summary's top expected scorer beats the first player.
        let mut dash = Dashboard::new();
        let generation = dash.begin_refresh();
        let mut snap = snapshot(scenario_players());
        snap.summary.top_expected_points = vec![player(2, "B", "Y", Position::Midfielder, 80)];
        dash.apply_refresh::<String>(generation, Ok(snap.clone()));
        assert_eq!(dash.focus().focused(), Some(2));

        // Previous focus survives a refresh.
        dash.set_focus(1).unwrap();
        let generation = dash.begin_refresh();
        let outcome = dash.apply_refresh::<String>(generation, Ok(snap));
        assert_eq!(dash.focus().focused(), Some(1));
        assert!(matches!(outcome, RefreshOutcome::Applied(Some(t)) if t.player_id == 1));
    }

    #[test]
    fn empty_dataset_leaves_nothing_focused() {
        let mut dash = Dashboard::new();
        let generation = dash.begin_refresh();
        let outcome = dash.apply_refresh::<String>(generation, Ok(snapshot(vec![])));
        assert_eq!(outcome, RefreshOutcome::Applied(None));
        assert_eq!(dash.focus().state(), FocusState::Unfocused);
    }

    #[test]
    fn filter_values_survive_refresh_when_still_valid() {
        let mut dash = loaded(scenario_players());
        dash.set_team_filter(Some("Y".into()));
        dash.set_position_filter(Some(Position::Midfielder));
        dash.set_search("b");

        let generation = dash.begin_refresh();
        dash.apply_refresh::<String>(
            generation,
            Ok(snapshot(vec![
                player(2, "B", "Y", Position::Midfielder, 90),
                player(3, "Bee", "Z", Position::Forward, 10),
            ])),
        );
        assert_eq!(dash.criteria().team.as_deref(), Some("Y"));
        assert_eq!(dash.criteria().position, Some(Position::Midfielder));
        assert_eq!(view_ids(&dash), vec![2]);

        let generation = dash.begin_refresh();
        dash.apply_refresh::<String>(generation, Ok(snapshot(vec![player(3, "Bee", "Z", Position::Forward, 10)])));
        assert_eq!(dash.criteria().team, None);
        assert_eq!(dash.criteria().position, None);
        assert_eq!(dash.criteria().search, "b");
        assert_eq!(view_ids(&dash), vec![3]);
    }

    #[test]
    fn filtering_keeps_focus_and_moves_highlight() {
        let mut dash = loaded(scenario_players());
        dash.set_focus(1).unwrap();
        assert_eq!(dash.focus().highlighted_row(), Some(1));

        dash.set_team_filter(Some("Y".into()));
        assert_eq!(dash.focus().focused(), Some(1));
        assert_eq!(dash.focus().highlighted_row(), None);

        dash.set_team_filter(None);
        assert_eq!(dash.focus().highlighted_row(), Some(1));
    }

    #[test]
    fn toggling_sort_flips_view() {
        let mut dash = loaded(scenario_players());
        dash.toggle_sort();
        assert_eq!(view_ids(&dash), vec![1, 2]);
        dash.toggle_sort();
        assert_eq!(view_ids(&dash), vec![2, 1]);
    }

    #[test]
    fn cycling_filters_wraps_back_to_all() {
        let mut dash = loaded(scenario_players());
        dash.cycle_team_filter();
        assert_eq!(dash.criteria().team.as_deref(), Some("X"));
        dash.cycle_team_filter();
        assert_eq!(dash.criteria().team.as_deref(), Some("Y"));
        dash.cycle_team_filter();
        assert_eq!(dash.criteria().team, None);

        dash.cycle_position_filter();
        assert_eq!(dash.criteria().position, Some(Position::Forward));
        assert_eq!(view_ids(&dash), vec![1]);
    }

    #[test]
    fn detail_failure_keeps_panel_and_reports() {
        let mut dash = loaded(scenario_players());
        let first = dash.set_focus(1).unwrap();
        let detail = PlayerDetail {
            history: vec![HistoryEntry { event: Some(1), total_points: 6, ..Default::default() }],
            upcoming: vec![],
        };
        assert!(dash.on_detail_loaded(first, &detail));

        let second = dash.set_focus(2).unwrap();
        assert!(dash.on_detail_failed(second, "timeout"));

        assert_eq!(dash.focus().focused(), Some(2));
        match dash.focus().panel() {
            InsightsPanel::Ready(insights) => assert_eq!(insights.player_id, 1),
            InsightsPanel::Empty => panic!("previous panel should remain"),
        }
        assert_eq!(dash.status().map(|s| s.message.as_str()), Some(DETAIL_FAILED));
    }
}
