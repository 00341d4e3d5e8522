use crate::app::MenuItem;
use crate::state::dashboard::Dashboard;
use tui::widgets::TableState;

/// Where keystrokes go.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box.
    Search,
    /// Focus picker popup open.
    Picker,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub input_mode: InputMode,
    pub dashboard: Dashboard,
    /// Cursor over the players table. Independent of focus until Enter is pressed.
    pub table: TableState,
    pub picker_cursor: usize,
    /// Scroll offset of the fixtures heatmap.
    pub fixtures_scroll: u16,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the table cursor inside the current view.
    pub fn clamp_cursor(&mut self) {
        let len = self.dashboard.view_ids().len();
        let selected = match self.table.selected() {
            _ if len == 0 => None,
            Some(row) => Some(row.min(len - 1)),
            None => Some(0),
        };
        self.table.select(selected);
    }
}
