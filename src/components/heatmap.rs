use fpl_api::TeamFixtures;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

use crate::ui::format::{self, difficulty_bucket, difficulty_style};

/// Width of the team short-name column.
pub const TEAM_WIDTH: u16 = 6;
/// Width of the average difficulty column.
pub const AVG_WIDTH: u16 = 6;
/// Width of each fixture cell, e.g. " ARS (H) ".
pub const CELL_WIDTH: u16 = 10;

/// Team-by-fixture difficulty grid. One row per team, one colored cell per
/// upcoming fixture. The first row is a header.
pub struct FixtureHeatmap<'a> {
    pub teams: &'a [TeamFixtures],
    /// Rows scrolled off the top, not counting the header.
    pub scroll_offset: u16,
}

impl FixtureHeatmap<'_> {
    /// Fixture columns needed to show every team's run.
    pub fn columns(&self) -> usize {
        self.teams.iter().map(|t| t.fixtures.len()).max().unwrap_or(0)
    }
}

impl Widget for FixtureHeatmap<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < TEAM_WIDTH + AVG_WIDTH || area.height < 2 {
            return;
        }

        let header = Style::default().add_modifier(Modifier::BOLD);
        buf.set_string(area.x, area.y, "Team", header);
        buf.set_string(area.x + TEAM_WIDTH, area.y, "Avg", header);

        let first_cell = area.x + TEAM_WIDTH + AVG_WIDTH;
        let visible_cells = ((area.right().saturating_sub(first_cell)) / CELL_WIDTH) as usize;
        let columns = self.columns().min(visible_cells);
        for col in 0..columns {
            let x = first_cell + col as u16 * CELL_WIDTH;
            buf.set_string(x + 1, area.y, format!("Next {}", col + 1), header);
        }

        let rows = self
            .teams
            .iter()
            .skip(self.scroll_offset as usize)
            .take(area.height as usize - 1);

        for (i, team) in rows.enumerate() {
            let y = area.y + 1 + i as u16;
            let name = if team.team_short.is_empty() { &team.team } else { &team.team_short };
            buf.set_stringn(area.x, y, name, TEAM_WIDTH as usize - 1, Style::default());

            let average = (team.average_difficulty > 0.0).then_some(team.average_difficulty);
            buf.set_stringn(
                area.x + TEAM_WIDTH,
                y,
                format::optional(average, 1),
                AVG_WIDTH as usize - 1,
                difficulty_style(difficulty_bucket(average)),
            );

            for (col, fixture) in team.fixtures.iter().take(columns).enumerate() {
                let x = first_cell + col as u16 * CELL_WIDTH;
                let style = difficulty_style(difficulty_bucket(fixture.difficulty));
                let cell = Rect::new(x, y, CELL_WIDTH - 1, 1);
                buf.set_style(cell, style);
                buf.set_stringn(x + 1, y, format::fixture_label(fixture), CELL_WIDTH as usize - 2, style);
            }
        }

        if self.teams.is_empty() {
            buf.set_string(
                area.x,
                area.y + 1,
                "No upcoming fixtures",
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpl_api::Fixture;

    fn team(short: &str, difficulties: &[Option<f64>]) -> TeamFixtures {
        TeamFixtures {
            team: short.to_string(),
            team_short: short.to_string(),
            fixtures: difficulties
                .iter()
                .map(|d| Fixture {
                    opponent_short: "OPP".into(),
                    difficulty: *d,
                    is_home: true,
                    ..Default::default()
                })
                .collect(),
            average_difficulty: 3.0,
            ..Default::default()
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn renders_header_and_team_rows() {
        let teams = vec![team("ARS", &[Some(2.0), Some(5.0)]), team("CHE", &[Some(3.0)])];
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        FixtureHeatmap { teams: &teams, scroll_offset: 0 }.render(area, &mut buf);

        assert!(row_text(&buf, 0).starts_with("Team  Avg"));
        assert!(row_text(&buf, 1).starts_with("ARS   3.0"));
        assert!(row_text(&buf, 1).contains("OPP (H)"));
        assert!(row_text(&buf, 2).starts_with("CHE"));
    }

    #[test]
    fn cells_are_colored_by_difficulty() {
        let teams = vec![team("ARS", &[Some(1.0), None])];
        let area = Rect::new(0, 0, 40, 2);
        let mut buf = Buffer::empty(area);
        FixtureHeatmap { teams: &teams, scroll_offset: 0 }.render(area, &mut buf);

        let easy = first_cell_x(0);
        let unknown = first_cell_x(1);
        assert_eq!(buf[(easy, 1)].bg, Color::Green);
        assert_eq!(buf[(unknown, 1)].fg, Color::DarkGray);
    }

    #[test]
    fn scroll_skips_teams() {
        let teams = vec![team("ARS", &[]), team("CHE", &[])];
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        FixtureHeatmap { teams: &teams, scroll_offset: 1 }.render(area, &mut buf);

        assert!(row_text(&buf, 1).starts_with("CHE"));
    }

    #[test]
    fn column_count_follows_longest_run() {
        let teams = vec![team("ARS", &[None; 3]), team("CHE", &[None; 5])];
        assert_eq!(FixtureHeatmap { teams: &teams, scroll_offset: 0 }.columns(), 5);
    }

    fn first_cell_x(col: u16) -> u16 {
        TEAM_WIDTH + AVG_WIDTH + col * CELL_WIDTH
    }
}
