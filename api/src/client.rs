use crate::wire::{
    PlayerHistoryResponse, PlayersResponse, SummaryResponse, UpcomingFixturesResponse, WireFixture,
    WireHistoryEntry, WireNumber, WirePlayer, WireTeamFixtures,
};
use crate::{
    Fixture, HistoryEntry, Kpis, LookupEntry, NamedTotal, Player, PlayerDetail, PlayerId, Position,
    ScatterPoint, Summary, TeamFixtures, TeamStrength, TopPerformer,
};
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the dashboard backend's JSON resources.
#[derive(Debug, Clone)]
pub struct FplApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for FplApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FplApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("fpltui/0.1 (terminal dashboard)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the summary aggregates: rank lists, team/position totals, KPIs, scatter data.
    pub async fn fetch_summary(&self) -> ApiResult<Summary> {
        let url = format!("{}/api/summary", self.base_url);
        let raw: SummaryResponse = self.get(&url).await?;
        Ok(map_summary(raw))
    }

    /// Fetch the full player collection. Entries without an id are dropped.
    pub async fn fetch_players(&self) -> ApiResult<Vec<Player>> {
        let url = format!("{}/api/players", self.base_url);
        let raw: PlayersResponse = self.get(&url).await?;
        Ok(map_players(raw.players.unwrap_or_default()))
    }

    /// Fetch upcoming fixtures grouped per team.
    pub async fn fetch_upcoming_fixtures(&self) -> ApiResult<Vec<TeamFixtures>> {
        let url = format!("{}/api/fixtures/upcoming", self.base_url);
        let raw: UpcomingFixturesResponse = self.get(&url).await?;
        Ok(raw
            .teams
            .unwrap_or_default()
            .into_iter()
            .map(map_team_fixtures)
            .collect())
    }

    /// Fetch one player's per-gameweek history and upcoming fixtures.
    pub async fn fetch_player_detail(&self, player_id: PlayerId) -> ApiResult<PlayerDetail> {
        let url = format!("{}/api/players/{player_id}/history", self.base_url);
        let raw: PlayerHistoryResponse = self.get(&url).await?;
        Ok(map_player_detail(raw))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
                Err(ApiError::NotFound(url.to_owned()))
            }
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
//
// Missing or malformed numbers become 0, missing lists become empty.
// ---------------------------------------------------------------------------

fn num(value: &Option<WireNumber>) -> f64 {
    opt_num(value).unwrap_or(0.0)
}

fn opt_num(value: &Option<WireNumber>) -> Option<f64> {
    value.as_ref().and_then(WireNumber::as_f64)
}

fn int(value: &Option<WireNumber>) -> i32 {
    let n = num(value);
    if n.is_finite() { n.round() as i32 } else { 0 }
}

fn count(value: &Option<WireNumber>) -> u32 {
    let n = num(value);
    if n.is_finite() && n > 0.0 { n.round() as u32 } else { 0 }
}

fn event_number(value: &Option<WireNumber>) -> Option<u32> {
    opt_num(value)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.round() as u32)
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn parse_kickoff(value: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = value?.trim();
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn map_players(raw: Vec<WirePlayer>) -> Vec<Player> {
    raw.into_iter().filter_map(map_player).collect()
}

fn map_player(p: WirePlayer) -> Option<Player> {
    let id = p.id?;
    Some(Player {
        id,
        first_name: text(p.first_name),
        second_name: text(p.second_name),
        web_name: text(p.web_name),
        team: p.team.unwrap_or_else(|| "Unknown".into()),
        team_short: text(p.team_short),
        position: p.position.as_deref().map(Position::from_label).unwrap_or_default(),
        total_points: int(&p.total_points),
        now_cost: num(&p.now_cost),
        selected_by_percent: num(&p.selected_by_percent),
        form: num(&p.form),
        ict_index: num(&p.ict_index),
        minutes: count(&p.minutes),
        goals_scored: count(&p.goals_scored),
        assists: count(&p.assists),
        clean_sheets: count(&p.clean_sheets),
        influence: num(&p.influence),
        creativity: num(&p.creativity),
        threat: num(&p.threat),
        points_per_game: num(&p.points_per_game),
        value_form: num(&p.value_form),
        value_season: num(&p.value_season),
        expected_points_next: num(&p.expected_points_next),
        expected_points_this: num(&p.expected_points_this),
        expected_goals: num(&p.expected_goals),
        expected_assists: num(&p.expected_assists),
        expected_goal_involvements: num(&p.expected_goal_involvements),
        expected_goals_per_90: num(&p.expected_goals_per_90),
        expected_assists_per_90: num(&p.expected_assists_per_90),
        expected_goal_involvements_per_90: num(&p.expected_goal_involvements_per_90),
    })
}

/// Map `[name, value]` pairs, skipping anything that isn't one.
fn map_pairs(raw: Option<Vec<serde_json::Value>>) -> Vec<NamedTotal> {
    raw.unwrap_or_default()
        .iter()
        .filter_map(|pair| {
            let items = pair.as_array()?;
            let name = items.first()?.as_str()?.to_string();
            let value = match items.get(1)? {
                serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
                serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
                _ => 0.0,
            };
            Some(NamedTotal { name, value })
        })
        .collect()
}

fn map_summary(raw: SummaryResponse) -> Summary {
    let kpis = raw
        .kpis
        .map(|k| Kpis {
            average_points_per_game: num(&k.average_points_per_game),
            average_expected_points_next: num(&k.average_expected_points_next),
            total_expected_goal_involvements: num(&k.total_expected_goal_involvements),
            top_xgi_player: k.top_xgi_player.and_then(|t| {
                Some(TopPerformer {
                    name: t.name?,
                    team: text(t.team),
                    value: num(&t.value),
                })
            }),
        })
        .unwrap_or_default();

    let xgi_vs_minutes = raw
        .xgi_vs_minutes
        .unwrap_or_default()
        .into_iter()
        .filter_map(|s| {
            Some(ScatterPoint {
                id: s.id?,
                web_name: text(s.web_name),
                team: text(s.team),
                team_short: text(s.team_short),
                position: s.position.as_deref().map(Position::from_label).unwrap_or_default(),
                minutes: count(&s.minutes),
                xgi_per_90: num(&s.xgi_per_90),
                xgi_total: num(&s.xgi_total),
                expected_points_next: num(&s.expected_points_next),
            })
        })
        .collect();

    let player_lookup = raw
        .player_lookup
        .unwrap_or_default()
        .into_iter()
        .filter_map(|l| {
            Some(LookupEntry {
                id: l.id?,
                web_name: text(l.web_name),
                team: text(l.team),
                team_short: text(l.team_short),
                position: l.position.as_deref().map(Position::from_label).unwrap_or_default(),
            })
        })
        .collect();

    let team_strength = raw
        .team_strength
        .unwrap_or_default()
        .into_iter()
        .map(|t| TeamStrength {
            team: text(t.team),
            team_short: text(t.team_short),
            attack: num(&t.attack),
            defence: num(&t.defence),
            overall: num(&t.overall),
        })
        .collect();

    let players = |list: Option<Vec<WirePlayer>>| map_players(list.unwrap_or_default());

    Summary {
        top_by_points: players(raw.top_by_points),
        top_by_form: players(raw.top_by_form),
        top_by_value: players(raw.top_by_value),
        top_expected_points: players(raw.top_expected_points),
        top_expected_goals: players(raw.top_expected_goals),
        top_expected_assists: players(raw.top_expected_assists),
        top_teams: map_pairs(raw.top_teams),
        team_xgi_leaders: map_pairs(raw.team_xgi_leaders),
        position_breakdown: map_pairs(raw.position_breakdown),
        position_xgi: map_pairs(raw.position_xgi),
        kpis,
        xgi_vs_minutes,
        player_lookup,
        team_strength,
    }
}

fn map_fixture(f: WireFixture) -> Fixture {
    Fixture {
        event: event_number(&f.event),
        opponent: text(f.opponent),
        opponent_short: text(f.opponent_short),
        difficulty: opt_num(&f.difficulty),
        is_home: f.is_home.or(f.was_home).unwrap_or(false),
        kickoff_time: parse_kickoff(f.kickoff_time.as_deref()),
    }
}

fn map_team_fixtures(t: WireTeamFixtures) -> TeamFixtures {
    TeamFixtures {
        team_id: t.team_id.unwrap_or_default(),
        team: text(t.team),
        team_short: text(t.team_short),
        fixtures: t
            .fixtures
            .unwrap_or_default()
            .into_iter()
            .map(map_fixture)
            .collect(),
        average_difficulty: num(&t.average_difficulty),
    }
}

fn map_history_entry(h: WireHistoryEntry) -> HistoryEntry {
    HistoryEntry {
        event: event_number(&h.event),
        total_points: int(&h.total_points),
        expected_points: num(&h.expected_points),
        expected_goal_involvements: num(&h.expected_goal_involvements),
        expected_goals: num(&h.expected_goals),
        expected_assists: num(&h.expected_assists),
        minutes: count(&h.minutes),
        goals_scored: count(&h.goals_scored),
        assists: count(&h.assists),
        value: num(&h.value),
        ict_index: num(&h.ict_index),
        was_home: h.was_home.unwrap_or(false),
        kickoff_time: parse_kickoff(h.kickoff_time.as_deref()),
        difficulty: opt_num(&h.difficulty),
        opponent: h.opponent,
        opponent_short: h.opponent_short,
    }
}

/// Arrival order is preserved; the backend already sorts both lists by event.
fn map_player_detail(raw: PlayerHistoryResponse) -> PlayerDetail {
    PlayerDetail {
        history: raw
            .history
            .unwrap_or_default()
            .into_iter()
            .map(map_history_entry)
            .collect(),
        upcoming: raw
            .upcoming
            .unwrap_or_default()
            .into_iter()
            .map(map_fixture)
            .collect(),
    }
}
