use fpl_api::{Player, PlayerId, Position, Summary, TeamFixtures, TeamStrength};
use log::warn;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Raw collections from the last successful refresh plus the lookups derived from them.
///
/// The store is only ever replaced as a whole: [`EntityStore::load`] builds a new
/// value off to the side and swaps it in, so readers never see a mix of old and
/// new collections.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EntityStore {
    players: Vec<Player>,
    index: HashMap<PlayerId, usize>,
    positions: Vec<Position>,
    teams: Vec<String>,
    summary: Summary,
    fixtures: Vec<TeamFixtures>,
    loaded: bool,
}

impl EntityStore {
    pub fn build(players: Vec<Player>, summary: Summary, fixtures: Vec<TeamFixtures>) -> Self {
        let mut index = HashMap::with_capacity(players.len());
        for (i, player) in players.iter().enumerate() {
            if index.contains_key(&player.id) {
                warn!("duplicate player id {} ({}), keeping first", player.id, player.web_name);
                continue;
            }
            index.insert(player.id, i);
        }

        let mut positions: Vec<Position> = players
            .iter()
            .map(|p| p.position)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        positions.sort_by_key(|p| p.label());

        let teams: Vec<String> = players
            .iter()
            .map(|p| p.team.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Self {
            players,
            index,
            positions,
            teams,
            summary,
            fixtures,
            loaded: true,
        }
    }

    /// Replace every collection at once.
    pub fn load(&mut self, players: Vec<Player>, summary: Summary, fixtures: Vec<TeamFixtures>) {
        *self = Self::build(players, summary, fixtures);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.index.get(&id).and_then(|&i| self.players.get(i))
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.index.contains_key(&id)
    }

    /// Distinct positions, ascending by label.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Distinct team names, ascending.
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn fixtures(&self) -> &[TeamFixtures] {
        &self.fixtures
    }

    pub fn team_strength(&self) -> &[TeamStrength] {
        &self.summary.team_strength
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: PlayerId, name: &str, team: &str, position: Position) -> Player {
        Player {
            id,
            web_name: name.into(),
            team: team.into(),
            position,
            ..Default::default()
        }
    }

    #[test]
    fn empty_store_is_not_loaded() {
        let store = EntityStore::default();
        assert!(!store.is_loaded());
        assert!(store.players().is_empty());
        assert!(store.player(1).is_none());
    }

    #[test]
    fn distinct_positions_and_teams_are_sorted() {
        let store = EntityStore::build(
            vec![
                player(1, "Saka", "Arsenal", Position::Midfielder),
                player(2, "Haaland", "Man City", Position::Forward),
                player(3, "Raya", "Arsenal", Position::Goalkeeper),
                player(4, "Gvardiol", "Man City", Position::Defender),
                player(5, "Isak", "Newcastle", Position::Forward),
            ],
            Summary::default(),
            vec![],
        );
        assert_eq!(
            store.positions(),
            &[
                Position::Defender,
                Position::Forward,
                Position::Goalkeeper,
                Position::Midfielder
            ]
        );
        assert_eq!(store.teams(), &["Arsenal", "Man City", "Newcastle"]);
    }

    #[test]
    fn load_replaces_everything() {
        let mut store = EntityStore::build(
            vec![player(1, "A", "X", Position::Forward)],
            Summary::default(),
            vec![TeamFixtures { team: "X".into(), ..Default::default() }],
        );
        store.load(vec![player(2, "B", "Y", Position::Defender)], Summary::default(), vec![]);

        assert!(store.player(1).is_none());
        assert_eq!(store.player(2).map(|p| p.web_name.as_str()), Some("B"));
        assert_eq!(store.teams(), &["Y"]);
        assert!(store.fixtures().is_empty());
    }

    #[test]
    fn duplicate_ids_resolve_to_first_entry() {
        let store = EntityStore::build(
            vec![
                player(1, "First", "X", Position::Forward),
                player(1, "Second", "X", Position::Forward),
            ],
            Summary::default(),
            vec![],
        );
        assert_eq!(store.player(1).map(|p| p.web_name.as_str()), Some("First"));
    }
}
