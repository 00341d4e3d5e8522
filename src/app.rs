use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, InputMode};
use crate::state::dashboard::{RefreshOutcome, Snapshot};
use crate::state::focus::DetailTicket;
use crate::state::messages::NetworkRequest;
use fpl_api::{PlayerDetail, PlayerId};
use log::warn;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuItem {
    #[default]
    Players,
    Summary,
    Charts,
    Fixtures,
    Help,
}

impl MenuItem {
    pub const TABS: [MenuItem; 4] = [
        MenuItem::Players,
        MenuItem::Summary,
        MenuItem::Charts,
        MenuItem::Fixtures,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            MenuItem::Players => "Players",
            MenuItem::Summary => "Summary",
            MenuItem::Charts => "Charts",
            MenuItem::Fixtures => "Fixtures",
            MenuItem::Help => "Help",
        }
    }
}

const PAGE: usize = 10;

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        log::set_max_level(settings.log_level);
        tui_logger::set_default_level(settings.log_level);

        Self {
            state: AppState::new(),
            settings,
        }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn begin_refresh(&mut self) -> NetworkRequest {
        let generation = self.state.dashboard.begin_refresh();
        NetworkRequest::Refresh { generation }
    }

    /// Returns the detail lookup for the default focus, if the refresh applied one.
    pub fn on_data_loaded(&mut self, generation: u64, snapshot: Snapshot) -> Option<NetworkRequest> {
        let outcome = self.state.dashboard.apply_refresh::<String>(generation, Ok(snapshot));
        self.after_view_change();
        self.follow_focus();
        match outcome {
            RefreshOutcome::Applied(Some(ticket)) => Some(NetworkRequest::LoadPlayerDetail { ticket }),
            _ => None,
        }
    }

    pub fn on_refresh_failed(&mut self, generation: u64, message: String) {
        self.state.dashboard.apply_refresh(generation, Err(message));
    }

    pub fn on_detail_loaded(&mut self, ticket: DetailTicket, detail: &PlayerDetail) {
        self.state.dashboard.on_detail_loaded(ticket, detail);
    }

    pub fn on_detail_failed(&mut self, ticket: DetailTicket, message: &str) {
        self.state.dashboard.on_detail_failed(ticket, message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if next == MenuItem::Fixtures {
            self.state.fixtures_scroll = 0;
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Players table
    // -----------------------------------------------------------------------

    pub fn table_down(&mut self, rows: usize) {
        let len = self.state.dashboard.view_ids().len();
        if len == 0 {
            return;
        }
        let row = self.state.table.selected().unwrap_or(0);
        self.state.table.select(Some((row + rows).min(len - 1)));
    }

    pub fn table_up(&mut self, rows: usize) {
        let row = self.state.table.selected().unwrap_or(0);
        self.state.table.select(Some(row.saturating_sub(rows)));
        self.state.clamp_cursor();
    }

    pub fn page_down(&mut self) {
        self.table_down(PAGE);
    }

    pub fn page_up(&mut self) {
        self.table_up(PAGE);
    }

    pub fn table_top(&mut self) {
        self.state.table.select(Some(0));
        self.state.clamp_cursor();
    }

    pub fn table_bottom(&mut self) {
        self.table_down(usize::MAX / 2);
    }

    pub fn selected_player(&self) -> Option<PlayerId> {
        let row = self.state.table.selected()?;
        self.state.dashboard.view_ids().get(row).copied()
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    /// Focus the player under the table cursor.
    pub fn focus_selected_row(&mut self) -> Option<NetworkRequest> {
        let id = self.selected_player()?;
        self.focus_player(id)
    }

    pub fn focus_player(&mut self, player_id: PlayerId) -> Option<NetworkRequest> {
        match self.state.dashboard.set_focus(player_id) {
            Ok(ticket) => {
                self.follow_focus();
                Some(NetworkRequest::LoadPlayerDetail { ticket })
            }
            Err(e) => {
                warn!("{e}");
                self.state.dashboard.set_info(e.to_string());
                None
            }
        }
    }

    pub fn clear_focus(&mut self) {
        self.state.dashboard.clear_focus();
    }

    pub fn open_picker(&mut self) {
        let picker = self.state.dashboard.focus().picker();
        if picker.options.is_empty() {
            return;
        }
        self.state.picker_cursor = picker.selected.unwrap_or(0);
        self.state.input_mode = InputMode::Picker;
    }

    pub fn close_picker(&mut self) {
        self.state.input_mode = InputMode::Normal;
    }

    pub fn picker_down(&mut self) {
        let len = self.state.dashboard.focus().picker().options.len();
        if len > 0 {
            self.state.picker_cursor = (self.state.picker_cursor + 1).min(len - 1);
        }
    }

    pub fn picker_up(&mut self) {
        self.state.picker_cursor = self.state.picker_cursor.saturating_sub(1);
    }

    pub fn confirm_picker(&mut self) -> Option<NetworkRequest> {
        self.close_picker();
        let id = self
            .state
            .dashboard
            .focus()
            .picker()
            .options
            .get(self.state.picker_cursor)?
            .id;
        self.focus_player(id)
    }

    // -----------------------------------------------------------------------
    // Filters and sorting
    // -----------------------------------------------------------------------

    pub fn cycle_position_filter(&mut self) {
        self.state.dashboard.cycle_position_filter();
        self.after_view_change();
    }

    pub fn cycle_team_filter(&mut self) {
        self.state.dashboard.cycle_team_filter();
        self.after_view_change();
    }

    pub fn cycle_sort_key(&mut self) {
        self.state.dashboard.cycle_sort_key();
        self.after_view_change();
    }

    pub fn toggle_sort(&mut self) {
        self.state.dashboard.toggle_sort();
        self.after_view_change();
    }

    pub fn start_search(&mut self) {
        self.state.input_mode = InputMode::Search;
    }

    pub fn search_push(&mut self, c: char) {
        self.state.dashboard.push_search_char(c);
        self.after_view_change();
    }

    pub fn search_pop(&mut self) {
        self.state.dashboard.pop_search_char();
        self.after_view_change();
    }

    /// Leave search mode, keeping the query.
    pub fn finish_search(&mut self) {
        self.state.input_mode = InputMode::Normal;
    }

    pub fn cancel_search(&mut self) {
        self.state.dashboard.set_search("");
        self.state.input_mode = InputMode::Normal;
        self.after_view_change();
    }

    fn after_view_change(&mut self) {
        self.state.clamp_cursor();
    }

    /// Move the table cursor onto the focused row when it is visible.
    fn follow_focus(&mut self) {
        if let Some(row) = self.state.dashboard.focus().highlighted_row() {
            self.state.table.select(Some(row));
        }
    }
}
