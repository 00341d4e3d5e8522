use fpl_api::{Player, Position};
use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Current filter-control state. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub position: Option<Position>,
    pub team: Option<String>,
    pub search: String,
}

impl FilterCriteria {
    pub fn matches(&self, player: &Player) -> bool {
        if self.position.is_some_and(|pos| pos != player.position) {
            return false;
        }
        if self.team.as_deref().is_some_and(|team| team != player.team) {
            return false;
        }
        let needle = self.search.to_lowercase();
        needle.is_empty()
            || player.web_name.to_lowercase().contains(&needle)
            || player.team.to_lowercase().contains(&needle)
    }
}

// ---------------------------------------------------------------------------
// Sort order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Sortable player table columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Team,
    Position,
    #[default]
    TotalPoints,
    Cost,
    Form,
    SelectedBy,
    Minutes,
    Goals,
    Assists,
    ExpectedGoals,
    ExpectedAssists,
    ExpectedGoalInvolvements,
    ExpectedPointsNext,
    PointsPerGame,
}

enum SortValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl SortKey {
    /// Column order used when cycling with the keyboard.
    pub const ALL: [SortKey; 15] = [
        SortKey::Name,
        SortKey::Team,
        SortKey::Position,
        SortKey::Cost,
        SortKey::TotalPoints,
        SortKey::Form,
        SortKey::SelectedBy,
        SortKey::Minutes,
        SortKey::Goals,
        SortKey::Assists,
        SortKey::ExpectedGoals,
        SortKey::ExpectedAssists,
        SortKey::ExpectedGoalInvolvements,
        SortKey::ExpectedPointsNext,
        SortKey::PointsPerGame,
    ];

    /// Field name as used by the players resource.
    pub fn field(&self) -> &'static str {
        match self {
            SortKey::Name => "web_name",
            SortKey::Team => "team",
            SortKey::Position => "position",
            SortKey::TotalPoints => "total_points",
            SortKey::Cost => "now_cost",
            SortKey::Form => "form",
            SortKey::SelectedBy => "selected_by_percent",
            SortKey::Minutes => "minutes",
            SortKey::Goals => "goals_scored",
            SortKey::Assists => "assists",
            SortKey::ExpectedGoals => "expected_goals",
            SortKey::ExpectedAssists => "expected_assists",
            SortKey::ExpectedGoalInvolvements => "expected_goal_involvements",
            SortKey::ExpectedPointsNext => "expected_points_next",
            SortKey::PointsPerGame => "points_per_game",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Player",
            SortKey::Team => "Team",
            SortKey::Position => "Pos",
            SortKey::TotalPoints => "Pts",
            SortKey::Cost => "Price",
            SortKey::Form => "Form",
            SortKey::SelectedBy => "Sel%",
            SortKey::Minutes => "Mins",
            SortKey::Goals => "G",
            SortKey::Assists => "A",
            SortKey::ExpectedGoals => "xG",
            SortKey::ExpectedAssists => "xA",
            SortKey::ExpectedGoalInvolvements => "xGI",
            SortKey::ExpectedPointsNext => "xP",
            SortKey::PointsPerGame => "PPG",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, SortKey::Name | SortKey::Team | SortKey::Position)
    }

    /// Direction a freshly selected column starts in: text A→Z, numbers high→low.
    pub fn initial_direction(&self) -> SortDirection {
        if self.is_numeric() {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn value<'a>(&self, p: &'a Player) -> SortValue<'a> {
        match self {
            SortKey::Name => SortValue::Text(&p.web_name),
            SortKey::Team => SortValue::Text(&p.team),
            SortKey::Position => SortValue::Text(p.position.label()),
            SortKey::TotalPoints => SortValue::Number(f64::from(p.total_points)),
            SortKey::Cost => SortValue::Number(p.now_cost),
            SortKey::Form => SortValue::Number(p.form),
            SortKey::SelectedBy => SortValue::Number(p.selected_by_percent),
            SortKey::Minutes => SortValue::Number(f64::from(p.minutes)),
            SortKey::Goals => SortValue::Number(f64::from(p.goals_scored)),
            SortKey::Assists => SortValue::Number(f64::from(p.assists)),
            SortKey::ExpectedGoals => SortValue::Number(p.expected_goals),
            SortKey::ExpectedAssists => SortValue::Number(p.expected_assists),
            SortKey::ExpectedGoalInvolvements => SortValue::Number(p.expected_goal_involvements),
            SortKey::ExpectedPointsNext => SortValue::Number(p.expected_points_next),
            SortKey::PointsPerGame => SortValue::Number(p.points_per_game),
        }
    }

    fn compare(&self, a: &Player, b: &Player) -> Ordering {
        match (self.value(a), self.value(b)) {
            (SortValue::Number(x), SortValue::Number(y)) => x.total_cmp(&y),
            (SortValue::Text(x), SortValue::Text(y)) => collate(x, y),
            // A key always yields the same kind for both sides.
            _ => Ordering::Equal,
        }
    }
}

/// Case-insensitive collation; case only decides between otherwise equal strings.
pub(crate) fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Same key flips the direction; a different key takes `direction` as given.
    pub fn select(&mut self, key: SortKey, direction: SortDirection) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            *self = Self::new(key, direction);
        }
    }

    pub fn compare(&self, a: &Player, b: &Player) -> Ordering {
        self.direction.apply(self.key.compare(a, b))
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Filter, then stable-sort. Always a full recomputation.
pub fn apply<'a>(players: &'a [Player], criteria: &FilterCriteria, sort: &SortSpec) -> Vec<&'a Player> {
    let mut view: Vec<&Player> = players.iter().filter(|p| criteria.matches(p)).collect();
    view.sort_by(|a, b| sort.compare(a, b));
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32, name: &str, team: &str, position: Position, points: i32) -> Player {
        Player {
            id,
            web_name: name.into(),
            team: team.into(),
            position,
            total_points: points,
            ..Default::default()
        }
    }

    fn ids(view: &[&Player]) -> Vec<u32> {
        view.iter().map(|p| p.id).collect()
    }

    fn sample() -> Vec<Player> {
        vec![
            player(1, "Saka", "Arsenal", Position::Midfielder, 180),
            player(2, "Haaland", "Man City", Position::Forward, 210),
            player(3, "Raya", "Arsenal", Position::Goalkeeper, 140),
            player(4, "Gabriel", "Arsenal", Position::Defender, 150),
            player(5, "Foden", "Man City", Position::Midfielder, 160),
            player(6, "Isak", "Newcastle", Position::Forward, 190),
            player(7, "saliba", "Arsenal", Position::Defender, 150),
        ]
    }

    #[test]
    fn scenario_default_sort_ranks_by_points() {
        let players = vec![
            player(1, "A", "X", Position::Forward, 50),
            player(2, "B", "Y", Position::Midfielder, 80),
        ];
        let sort = SortSpec::new(SortKey::TotalPoints, SortDirection::Descending);
        let view = apply(&players, &FilterCriteria::default(), &sort);
        assert_eq!(ids(&view), vec![2, 1]);
    }

    #[test]
    fn scenario_search_is_case_insensitive() {
        let players = vec![
            player(1, "A", "X", Position::Forward, 50),
            player(2, "B", "Y", Position::Midfielder, 80),
        ];
        let criteria = FilterCriteria { search: "a".into(), ..Default::default() };
        let view = apply(&players, &criteria, &SortSpec::default());
        assert_eq!(ids(&view), vec![1]);
    }

    #[test]
    fn search_matches_team_name_too() {
        let criteria = FilterCriteria { search: "CITY".into(), ..Default::default() };
        let players = sample();
        let view = apply(&players, &criteria, &SortSpec::default());
        assert_eq!(ids(&view), vec![2, 5]);
    }

    #[test]
    fn view_is_exactly_the_matching_players() {
        let players = sample();
        let positions = [
            None,
            Some(Position::Goalkeeper),
            Some(Position::Defender),
            Some(Position::Midfielder),
            Some(Position::Forward),
        ];
        let teams = [None, Some("Arsenal"), Some("Man City"), Some("Newcastle"), Some("Spurs")];
        let searches = ["", "a", "SA", "city", "zzz"];

        for position in positions {
            for team in teams {
                for search in searches {
                    let criteria = FilterCriteria {
                        position,
                        team: team.map(str::to_string),
                        search: search.to_string(),
                    };
                    let view = apply(&players, &criteria, &SortSpec::default());
                    let view_ids = ids(&view);

                    for p in &players {
                        let expected = position.is_none_or(|pos| pos == p.position)
                            && team.is_none_or(|t| t == p.team)
                            && (search.is_empty()
                                || p.web_name.to_lowercase().contains(&search.to_lowercase())
                                || p.team.to_lowercase().contains(&search.to_lowercase()));
                        assert_eq!(
                            view_ids.contains(&p.id),
                            expected,
                            "player {} with {criteria:?}",
                            p.web_name
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn sort_is_stable_for_ties() {
        // Gabriel and saliba tie on 150; input order decides.
        let players = sample();
        let view = apply(&players, &FilterCriteria::default(), &SortSpec::default());
        assert_eq!(ids(&view), vec![2, 6, 1, 5, 4, 7, 3]);
    }

    #[test]
    fn sorting_twice_changes_nothing() {
        let sort = SortSpec::new(SortKey::Team, SortDirection::Ascending);
        let once: Vec<Player> = apply(&sample(), &FilterCriteria::default(), &sort)
            .into_iter()
            .cloned()
            .collect();
        let twice = apply(&once, &FilterCriteria::default(), &sort);
        assert_eq!(ids(&twice), once.iter().map(|p| p.id).collect::<Vec<_>>());
    }

    #[test]
    fn toggling_active_key_inverts_order() {
        let players: Vec<Player> = sample().into_iter().filter(|p| p.id != 7).collect();
        let mut sort = SortSpec::default();
        let before = ids(&apply(&players, &FilterCriteria::default(), &sort));

        sort.select(SortKey::TotalPoints, SortDirection::Descending);
        assert_eq!(sort.direction, SortDirection::Ascending);

        let mut after = ids(&apply(&players, &FilterCriteria::default(), &sort));
        after.reverse();
        assert_eq!(before, after);
    }

    #[test]
    fn toggling_with_ties_reverses_distinct_values_and_keeps_tie_order() {
        // Gabriel (4) and saliba (7) tie on 150 and stay in input order both ways.
        let players = sample();
        let mut sort = SortSpec::default();
        let descending = ids(&apply(&players, &FilterCriteria::default(), &sort));
        assert_eq!(descending, vec![2, 6, 1, 5, 4, 7, 3]);

        sort.select(SortKey::TotalPoints, SortDirection::Descending);
        let ascending = ids(&apply(&players, &FilterCriteria::default(), &sort));
        assert_eq!(ascending, vec![3, 4, 7, 5, 1, 6, 2]);

        sort.select(SortKey::TotalPoints, SortDirection::Descending);
        assert_eq!(ids(&apply(&players, &FilterCriteria::default(), &sort)), descending);
    }

    #[test]
    fn whitespace_search_is_a_literal_substring() {
        let players = sample();
        let criteria = FilterCriteria { search: " ".into(), ..Default::default() };
        let view = apply(&players, &criteria, &SortSpec::default());
        assert_eq!(ids(&view), vec![2, 5]);
    }

    #[test]
    fn new_key_takes_supplied_direction() {
        let mut sort = SortSpec::default();
        sort.select(SortKey::Name, SortDirection::Ascending);
        assert_eq!(sort, SortSpec::new(SortKey::Name, SortDirection::Ascending));

        sort.select(SortKey::Form, SortDirection::Ascending);
        assert_eq!(sort, SortSpec::new(SortKey::Form, SortDirection::Ascending));
    }

    #[test]
    fn text_sort_ignores_case() {
        let sort = SortSpec::new(SortKey::Name, SortDirection::Ascending);
        let players = sample();
        let view = apply(&players, &FilterCriteria::default(), &sort);
        let names: Vec<&str> = view.iter().map(|p| p.web_name.as_str()).collect();
        assert_eq!(names, vec!["Foden", "Gabriel", "Haaland", "Isak", "Raya", "Saka", "saliba"]);
    }

    #[test]
    fn filter_change_keeps_active_sort() {
        let sort = SortSpec::new(SortKey::Name, SortDirection::Descending);
        let criteria = FilterCriteria { team: Some("Arsenal".into()), ..Default::default() };
        let players = sample();
        let view = apply(&players, &criteria, &sort);
        assert_eq!(ids(&view), vec![7, 1, 3, 4]);
    }

    #[test]
    fn sort_key_cycle_wraps() {
        let mut key = SortKey::Name;
        for _ in 0..SortKey::ALL.len() {
            key = key.next();
        }
        assert_eq!(key, SortKey::Name);
    }
}
