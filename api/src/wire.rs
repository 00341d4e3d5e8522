/// Dashboard backend raw wire types: serde shapes for the four JSON resources.
/// These map to the clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Lenient scalars
// ---------------------------------------------------------------------------

/// Numbers arrive as JSON numbers, numeric strings ("5.3"), empty strings or
/// anything else. Only the first two carry a value.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum WireNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl WireNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            WireNumber::Number(n) => Some(*n),
            WireNumber::Text(s) => s.trim().parse::<f64>().ok(),
            WireNumber::Other(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Players  (/api/players, also embedded in summary rank lists)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayersResponse {
    pub players: Option<Vec<WirePlayer>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlayer {
    pub id: Option<u32>,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub web_name: Option<String>,
    pub team: Option<String>,
    pub team_short: Option<String>,
    pub position: Option<String>,
    pub total_points: Option<WireNumber>,
    pub now_cost: Option<WireNumber>,
    pub selected_by_percent: Option<WireNumber>,
    pub form: Option<WireNumber>,
    pub ict_index: Option<WireNumber>,
    pub minutes: Option<WireNumber>,
    pub goals_scored: Option<WireNumber>,
    pub assists: Option<WireNumber>,
    pub clean_sheets: Option<WireNumber>,
    pub influence: Option<WireNumber>,
    pub creativity: Option<WireNumber>,
    pub threat: Option<WireNumber>,
    pub points_per_game: Option<WireNumber>,
    pub value_form: Option<WireNumber>,
    pub value_season: Option<WireNumber>,
    pub expected_points_next: Option<WireNumber>,
    pub expected_points_this: Option<WireNumber>,
    pub expected_goals: Option<WireNumber>,
    pub expected_assists: Option<WireNumber>,
    pub expected_goal_involvements: Option<WireNumber>,
    pub expected_goals_per_90: Option<WireNumber>,
    pub expected_assists_per_90: Option<WireNumber>,
    pub expected_goal_involvements_per_90: Option<WireNumber>,
}

// ---------------------------------------------------------------------------
// Summary  (/api/summary)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct SummaryResponse {
    pub top_by_points: Option<Vec<WirePlayer>>,
    pub top_by_form: Option<Vec<WirePlayer>>,
    pub top_by_value: Option<Vec<WirePlayer>>,
    pub top_expected_points: Option<Vec<WirePlayer>>,
    pub top_expected_goals: Option<Vec<WirePlayer>>,
    pub top_expected_assists: Option<Vec<WirePlayer>>,
    /// `[name, value]` pairs. Kept as raw values so one odd pair can't sink the payload.
    pub top_teams: Option<Vec<serde_json::Value>>,
    pub team_xgi_leaders: Option<Vec<serde_json::Value>>,
    pub position_breakdown: Option<Vec<serde_json::Value>>,
    pub position_xgi: Option<Vec<serde_json::Value>>,
    pub kpis: Option<WireKpis>,
    pub xgi_vs_minutes: Option<Vec<WireScatterPoint>>,
    pub player_lookup: Option<Vec<WireLookupEntry>>,
    pub team_strength: Option<Vec<WireTeamStrength>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireKpis {
    pub average_points_per_game: Option<WireNumber>,
    pub average_expected_points_next: Option<WireNumber>,
    pub total_expected_goal_involvements: Option<WireNumber>,
    pub top_xgi_player: Option<WireTopPerformer>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTopPerformer {
    pub name: Option<String>, // null when the player list was empty
    pub team: Option<String>,
    pub value: Option<WireNumber>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireScatterPoint {
    pub id: Option<u32>,
    pub web_name: Option<String>,
    pub team: Option<String>,
    pub team_short: Option<String>,
    pub position: Option<String>,
    pub minutes: Option<WireNumber>,
    pub xgi_per_90: Option<WireNumber>,
    pub xgi_total: Option<WireNumber>,
    pub expected_points_next: Option<WireNumber>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireLookupEntry {
    pub id: Option<u32>,
    pub web_name: Option<String>,
    pub team: Option<String>,
    pub team_short: Option<String>,
    pub position: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeamStrength {
    pub team: Option<String>,
    pub team_short: Option<String>,
    pub attack: Option<WireNumber>,
    pub defence: Option<WireNumber>,
    pub overall: Option<WireNumber>,
}

// ---------------------------------------------------------------------------
// Upcoming fixtures  (/api/fixtures/upcoming)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct UpcomingFixturesResponse {
    pub teams: Option<Vec<WireTeamFixtures>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeamFixtures {
    pub team_id: Option<u32>,
    pub team: Option<String>,
    pub team_short: Option<String>,
    pub fixtures: Option<Vec<WireFixture>>,
    pub average_difficulty: Option<WireNumber>,
}

/// Shared by the team fixture grid (`was_home`) and player upcoming lists (`is_home`).
#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireFixture {
    pub event: Option<WireNumber>,
    pub opponent: Option<String>,
    pub opponent_short: Option<String>,
    pub difficulty: Option<WireNumber>,
    pub was_home: Option<bool>,
    pub is_home: Option<bool>,
    pub kickoff_time: Option<String>,
}

// ---------------------------------------------------------------------------
// Player history  (/api/players/{id}/history)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PlayerHistoryResponse {
    pub history: Option<Vec<WireHistoryEntry>>,
    pub upcoming: Option<Vec<WireFixture>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireHistoryEntry {
    pub event: Option<WireNumber>,
    pub total_points: Option<WireNumber>,
    pub expected_points: Option<WireNumber>,
    pub expected_goal_involvements: Option<WireNumber>,
    pub expected_goals: Option<WireNumber>,
    pub expected_assists: Option<WireNumber>,
    pub minutes: Option<WireNumber>,
    pub goals_scored: Option<WireNumber>,
    pub assists: Option<WireNumber>,
    pub value: Option<WireNumber>,
    pub ict_index: Option<WireNumber>,
    pub was_home: Option<bool>,
    pub kickoff_time: Option<String>,
    pub difficulty: Option<WireNumber>,
    pub opponent: Option<String>,
    pub opponent_short: Option<String>,
}
