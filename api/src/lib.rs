pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Domain types. Clean model, independent of the dashboard wire format
// ---------------------------------------------------------------------------

pub type PlayerId = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    #[default]
    Unknown,
}

impl Position {
    pub fn label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
            Position::Unknown => "Unknown",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
            Position::Unknown => "---",
        }
    }

    /// Parse the long label used by the dashboard backend. Anything else is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Goalkeeper" => Position::Goalkeeper,
            "Defender" => Position::Defender,
            "Midfielder" => Position::Midfielder,
            "Forward" => Position::Forward,
            _ => Position::Unknown,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub second_name: String,
    pub web_name: String, // display name
    pub team: String,
    pub team_short: String,
    pub position: Position,
    pub total_points: i32,
    pub now_cost: f64, // millions, already divided by 10 server-side
    pub selected_by_percent: f64,
    pub form: f64,
    pub ict_index: f64,
    pub minutes: u32,
    pub goals_scored: u32,
    pub assists: u32,
    pub clean_sheets: u32,
    pub influence: f64,
    pub creativity: f64,
    pub threat: f64,
    pub points_per_game: f64,
    pub value_form: f64,
    pub value_season: f64,
    pub expected_points_next: f64,
    pub expected_points_this: f64,
    pub expected_goals: f64,
    pub expected_assists: f64,
    pub expected_goal_involvements: f64,
    pub expected_goals_per_90: f64,
    pub expected_assists_per_90: f64,
    pub expected_goal_involvements_per_90: f64,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.second_name).trim().to_string()
    }
}

/// Aggregates and ranked lists backing the summary widgets and charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub top_by_points: Vec<Player>,
    pub top_by_form: Vec<Player>,
    pub top_by_value: Vec<Player>,
    pub top_expected_points: Vec<Player>,
    pub top_expected_goals: Vec<Player>,
    pub top_expected_assists: Vec<Player>,
    pub top_teams: Vec<NamedTotal>,
    pub team_xgi_leaders: Vec<NamedTotal>,
    pub position_breakdown: Vec<NamedTotal>,
    pub position_xgi: Vec<NamedTotal>,
    pub kpis: Kpis,
    pub xgi_vs_minutes: Vec<ScatterPoint>,
    pub player_lookup: Vec<LookupEntry>,
    pub team_strength: Vec<TeamStrength>,
}

/// A `[name, value]` pair from a team or position breakdown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedTotal {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kpis {
    pub average_points_per_game: f64,
    pub average_expected_points_next: f64,
    pub total_expected_goal_involvements: f64,
    pub top_xgi_player: Option<TopPerformer>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopPerformer {
    pub name: String,
    pub team: String,
    pub value: f64,
}

/// One point of the minutes vs. xGI/90 scatter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterPoint {
    pub id: PlayerId,
    pub web_name: String,
    pub team: String,
    pub team_short: String,
    pub position: Position,
    pub minutes: u32,
    pub xgi_per_90: f64,
    pub xgi_total: f64,
    pub expected_points_next: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupEntry {
    pub id: PlayerId,
    pub web_name: String,
    pub team: String,
    pub team_short: String,
    pub position: Position,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStrength {
    pub team: String,
    pub team_short: String,
    pub attack: f64,
    pub defence: f64,
    pub overall: f64, // lower = tougher opponent
}

/// Upcoming fixtures for one team, used by the difficulty heatmap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamFixtures {
    pub team_id: u32,
    pub team: String,
    pub team_short: String,
    pub fixtures: Vec<Fixture>,
    pub average_difficulty: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixture {
    pub event: Option<u32>,
    pub opponent: String,
    pub opponent_short: String,
    /// Nominally 1–5. Kept as reported; callers decide how to treat out-of-range values.
    pub difficulty: Option<f64>,
    pub is_home: bool,
    pub kickoff_time: Option<DateTime<Utc>>,
}

/// Per-player history and upcoming fixtures, fetched on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerDetail {
    pub history: Vec<HistoryEntry>,
    pub upcoming: Vec<Fixture>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryEntry {
    pub event: Option<u32>,
    pub total_points: i32,
    pub expected_points: f64,
    pub expected_goal_involvements: f64,
    pub expected_goals: f64,
    pub expected_assists: f64,
    pub minutes: u32,
    pub goals_scored: u32,
    pub assists: u32,
    pub value: f64,
    pub ict_index: f64,
    pub was_home: bool,
    pub kickoff_time: Option<DateTime<Utc>>,
    pub difficulty: Option<f64>,
    pub opponent: Option<String>,
    pub opponent_short: Option<String>,
}
