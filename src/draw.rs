use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::symbols::Marker;
use tui::text::{Line, Span};
use tui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Cell, Chart, Clear, Dataset,
    GraphType, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap,
};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::heatmap::FixtureHeatmap;
use crate::state::app_state::InputMode;
use crate::state::dashboard::StatusKind;
use crate::state::focus::{FocusState, Insights, InsightsPanel};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::view::SortKey;
use crate::ui::format::{self, difficulty_bucket, difficulty_style};
use crate::ui::layout::LayoutAreas;
use fpl_api::{NamedTotal, Player, Position};

const HELP_TEXT: &str = "\
Tabs        1 Players  2 Summary  3 Charts  4 Fixtures  ? Help (Esc to close)
Players     j/k move  g/G top/bottom  PgUp/PgDn page  Enter focus row  x clear focus
Sorting     s next sort column  S flip direction
Filters     p cycle position  t cycle team  / search (Enter keep, Esc clear)
Focus       F open player picker (j/k, Enter, Esc)
General     r refresh  f full screen  \" logs  q quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_status(f, layout.status, app);
        }

        match app.state.active_tab {
            MenuItem::Players => draw_players(f, layout.main, app),
            MenuItem::Summary => draw_summary(f, layout.main, app),
            MenuItem::Charts => draw_charts(f, layout.main, app),
            MenuItem::Fixtures => draw_fixtures(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }
        if app.state.input_mode == InputMode::Picker {
            draw_picker(f, f.area(), app);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = MenuItem::TABS
        .iter()
        .position(|t| *t == app.state.active_tab)
        .unwrap_or(0);

    let titles: Vec<Line> = MenuItem::TABS
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.state.dashboard;
    let left = match dashboard.status() {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Info => Color::Gray,
                StatusKind::Success => Color::Green,
                StatusKind::Error => Color::Red,
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", status.at.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(status.message.clone(), Style::default().fg(color)),
            ])
        }
        None if dashboard.store().is_loaded() => Line::from(""),
        None => Line::styled(" Loading dashboard data...", Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(Paragraph::new(left), area);

    let right = format!(
        "{} / {} players ",
        dashboard.view_ids().len(),
        dashboard.store().players().len()
    );
    f.render_widget(
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

// ---------------------------------------------------------------------------
// Players tab
// ---------------------------------------------------------------------------

fn draw_players(f: &mut Frame, area: Rect, app: &mut App) {
    let [filter_area, body] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);
    draw_filter_bar(f, filter_area, app);

    let [table_area, insights_area] =
        Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).areas(body);
    draw_player_table(f, table_area, app);
    draw_insights(f, insights_area, app);
}

fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let criteria = app.state.dashboard.criteria();
    let sort = app.state.dashboard.sort();
    let searching = app.state.input_mode == InputMode::Search;

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let search_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        value
    };
    let cursor = if searching { "_" } else { "" };

    let line = Line::from(vec![
        Span::styled("Position ", label),
        Span::styled(criteria.position.map(|p| p.label()).unwrap_or("All"), value),
        Span::styled("  Team ", label),
        Span::styled(criteria.team.as_deref().unwrap_or("All"), value),
        Span::styled("  Search ", label),
        Span::styled(format!("{}{cursor}", criteria.search), search_style),
        Span::styled("  Sort ", label),
        Span::styled(format!("{} {}", sort.key.label(), sort.direction.arrow()), value),
    ]);

    let border = if searching { Color::Yellow } else { Color::DarkGray };
    f.render_widget(
        Paragraph::new(line).block(default_border(border).title(" Filters (p/t / s/S) ")),
        area,
    );
}

fn draw_player_table(f: &mut Frame, area: Rect, app: &mut App) {
    let dashboard = &app.state.dashboard;
    let sort = dashboard.sort();
    let highlighted = dashboard.focus().highlighted_row();

    let header = Row::new(SortKey::ALL.iter().map(|key| {
        let text = if *key == sort.key {
            format!("{}{}", key.label(), sort.direction.arrow())
        } else {
            key.label().to_string()
        };
        Cell::from(text)
    }))
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = dashboard
        .view_players()
        .into_iter()
        .enumerate()
        .map(|(i, player)| {
            let row = Row::new(SortKey::ALL.iter().map(|key| Cell::from(column_text(*key, player))));
            if Some(i) == highlighted {
                row.style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();

    let widths: Vec<Constraint> = SortKey::ALL
        .iter()
        .map(|key| match key {
            SortKey::Name => Constraint::Min(12),
            SortKey::Team => Constraint::Length(14),
            SortKey::Position | SortKey::Goals | SortKey::Assists => Constraint::Length(4),
            _ => Constraint::Length(6),
        })
        .collect();

    let empty = rows.is_empty();
    let title = format!(" Players ({}) ", dashboard.view_ids().len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(default_border(Color::White).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.state.table);

    if empty && app.state.dashboard.store().is_loaded() {
        let inner = default_border(Color::White).inner(area);
        let msg_area = Rect::new(inner.x, inner.y + 2, inner.width, 1);
        f.render_widget(
            Paragraph::new("No players match the current filters")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            msg_area,
        );
    }
}

fn column_text(key: SortKey, p: &Player) -> String {
    match key {
        SortKey::Name => p.web_name.clone(),
        SortKey::Team => p.team.clone(),
        SortKey::Position => p.position.short_label().to_string(),
        SortKey::TotalPoints => p.total_points.to_string(),
        SortKey::Cost => format::cost(p.now_cost),
        SortKey::Form => format::rate(p.form),
        SortKey::SelectedBy => format::percent(p.selected_by_percent),
        SortKey::Minutes => p.minutes.to_string(),
        SortKey::Goals => p.goals_scored.to_string(),
        SortKey::Assists => p.assists.to_string(),
        SortKey::ExpectedGoals => format::metric(p.expected_goals),
        SortKey::ExpectedAssists => format::metric(p.expected_assists),
        SortKey::ExpectedGoalInvolvements => format::metric(p.expected_goal_involvements),
        SortKey::ExpectedPointsNext => format::metric(p.expected_points_next),
        SortKey::PointsPerGame => format::rate(p.points_per_game),
    }
}

fn draw_insights(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Insights ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let insights = match app.state.dashboard.focus().panel() {
        InsightsPanel::Ready(insights) => insights,
        InsightsPanel::Empty => {
            let msg = match app.state.dashboard.focus().state() {
                FocusState::Focused(_) => "Loading player history...",
                FocusState::Unfocused => "Select a player (Enter) or pick one (F) to see insights",
            };
            f.render_widget(
                Paragraph::new(msg)
                    .wrap(Wrap { trim: true })
                    .style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }
    };

    let [header_area, points_area, trend_area, upcoming_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Length(insights.upcoming.len().max(1) as u16 + 2),
    ])
    .areas(inner);

    draw_insights_header(f, header_area, insights);
    f.render_widget(
        series_chart(" Points ", &insights.points_series, Color::Cyan),
        points_area,
    );

    let [xgi_area, value_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(trend_area);
    f.render_widget(series_chart(" xGI ", &insights.xgi_series, Color::Yellow), xgi_area);
    f.render_widget(series_chart(" Price ", &insights.value_series, Color::Magenta), value_area);

    draw_upcoming(f, upcoming_area, insights);
}

fn draw_insights_header(f: &mut Frame, area: Rect, insights: &Insights) {
    let lines = vec![
        Line::from(vec![
            Span::styled(insights.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  {}  {}", insights.team, insights.position.label())),
        ]),
        Line::from(insights.full_name.clone()),
        Line::styled(
            format!(
                "Last {} GWs: {} pts",
                insights.history.len(),
                insights.recent_points()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_upcoming(f: &mut Frame, area: Rect, insights: &Insights) {
    let block = default_border(Color::DarkGray).title(" Upcoming ");
    if insights.upcoming.is_empty() {
        f.render_widget(
            Paragraph::new("No upcoming fixtures")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = insights
        .upcoming
        .iter()
        .map(|fixture| {
            let style = difficulty_style(difficulty_bucket(fixture.difficulty));
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<5} ", format::gameweek(fixture.event))),
                Span::raw(format!("{:<10} ", format::fixture_label(fixture))),
                Span::styled(format!(" {} ", format::difficulty_label(fixture.difficulty)), style),
                Span::styled(
                    format!("  {}", format::kickoff(fixture.kickoff_time)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

/// Line chart for one per-gameweek series.
fn series_chart<'a>(title: &'a str, data: &'a [(f64, f64)], color: Color) -> Chart<'a> {
    let (x_bounds, y_bounds) = bounds(data);
    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data);

    Chart::new(vec![dataset])
        .block(default_border(Color::DarkGray).title(title))
        .x_axis(
            Axis::default()
                .bounds(x_bounds)
                .labels(vec![
                    format!("GW{:.0}", x_bounds[0]),
                    format!("GW{:.0}", x_bounds[1]),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels(vec![format::rate(y_bounds[0]), format::rate(y_bounds[1])])
                .style(Style::default().fg(Color::DarkGray)),
        )
}

/// Axis bounds covering every point, never empty.
fn bounds(data: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let finite = data.iter().filter(|(x, y)| x.is_finite() && y.is_finite());
    let (mut x_min, mut x_max, mut y_min, mut y_max) =
        (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64, f64::NEG_INFINITY);
    for (x, y) in finite {
        x_min = x_min.min(*x);
        x_max = x_max.max(*x);
        y_min = y_min.min(*y);
        y_max = y_max.max(*y);
    }
    if !x_min.is_finite() {
        return ([0.0, 1.0], [0.0, 1.0]);
    }
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }
    ([x_min, x_max], [y_min, y_max * 1.1])
}

// ---------------------------------------------------------------------------
// Summary tab
// ---------------------------------------------------------------------------

fn draw_summary(f: &mut Frame, area: Rect, app: &App) {
    let store = app.state.dashboard.store();
    if !store.is_loaded() {
        draw_placeholder(f, area, "Waiting for dashboard data");
        return;
    }
    let summary = store.summary();

    let [kpi_area, lists_area, bars_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(12),
    ])
    .areas(area);

    let kpis = &summary.kpis;
    let top_xgi = kpis
        .top_xgi_player
        .as_ref()
        .map(|p| format!("{} ({}) {}", p.name, p.team, format::metric(p.value)))
        .unwrap_or_else(|| format::MISSING.to_string());
    let tiles = [
        ("Avg PPG", format::rate(kpis.average_points_per_game)),
        ("Avg xP next", format::metric(kpis.average_expected_points_next)),
        ("Total xGI", format::metric(kpis.total_expected_goal_involvements)),
        ("Top xGI", top_xgi),
    ];
    let tile_areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(kpi_area);
    for ((title, value), tile) in tiles.into_iter().zip(tile_areas.iter()) {
        f.render_widget(
            Paragraph::new(value)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(default_border(Color::DarkGray).title(format!(" {title} "))),
            *tile,
        );
    }

    let [top_row, bottom_row] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(lists_area);
    let top = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(top_row);
    let bottom = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(bottom_row);
    let focused = app.state.dashboard.focus().focused();

    let lists: [(&str, &[Player], fn(&Player) -> String, Rect); 6] = [
        (" Top points ", &summary.top_by_points, |p| p.total_points.to_string(), top[0]),
        (" Top form ", &summary.top_by_form, |p| format::rate(p.form), top[1]),
        (" Best value ", &summary.top_by_value, |p| format::metric(p.value_form), top[2]),
        (" Expected points ", &summary.top_expected_points, |p| format::metric(p.expected_points_next), bottom[0]),
        (" Expected goals ", &summary.top_expected_goals, |p| format::metric(p.expected_goals), bottom[1]),
        (" Expected assists ", &summary.top_expected_assists, |p| format::metric(p.expected_assists), bottom[2]),
    ];
    for (title, players, metric, list_area) in lists {
        let items: Vec<ListItem> = players
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let style = if Some(p.id) == focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(format!("{:>2}. {:<14} {:<4} {}", i + 1, p.web_name, p.team_short, metric(p)))
                    .style(style)
            })
            .collect();
        f.render_widget(List::new(items).block(default_border(Color::White).title(title)), list_area);
    }

    let bar_areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(bars_area);
    let bar_sets: [(&str, &[NamedTotal], Color); 4] = [
        (" Team points ", &summary.top_teams, Color::Cyan),
        (" Team xGI ", &summary.team_xgi_leaders, Color::Yellow),
        (" Points by position ", &summary.position_breakdown, Color::Green),
        (" xGI by position ", &summary.position_xgi, Color::Magenta),
    ];
    for ((title, totals, color), bar_area) in bar_sets.into_iter().zip(bar_areas.iter()) {
        f.render_widget(totals_bar_chart(title, totals, color), *bar_area);
    }
}

/// Horizontal bars; values are scaled by ten so one-decimal totals keep their shape.
fn totals_bar_chart<'a>(title: &'a str, totals: &'a [NamedTotal], color: Color) -> BarChart<'a> {
    let bars: Vec<Bar> = totals
        .iter()
        .map(|t| {
            Bar::default()
                .label(Line::from(t.name.as_str()))
                .value((t.value.max(0.0) * 10.0).round() as u64)
                .text_value(format::rate(t.value))
                .style(Style::default().fg(color))
        })
        .collect();

    BarChart::default()
        .block(default_border(Color::DarkGray).title(title))
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
}

// ---------------------------------------------------------------------------
// Charts tab
// ---------------------------------------------------------------------------

const POSITION_COLORS: [(Position, Color); 4] = [
    (Position::Goalkeeper, Color::Yellow),
    (Position::Defender, Color::Green),
    (Position::Midfielder, Color::Cyan),
    (Position::Forward, Color::Red),
];

fn draw_charts(f: &mut Frame, area: Rect, app: &App) {
    let store = app.state.dashboard.store();
    if !store.is_loaded() {
        draw_placeholder(f, area, "Waiting for dashboard data");
        return;
    }

    let [scatter_area, strength_area] =
        Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)]).areas(area);

    let points = &store.summary().xgi_vs_minutes;
    let groups: Vec<(Position, Color, Vec<(f64, f64)>)> = POSITION_COLORS
        .iter()
        .map(|(position, color)| {
            let data = points
                .iter()
                .filter(|p| p.position == *position)
                .map(|p| (f64::from(p.minutes), p.xgi_per_90))
                .collect();
            (*position, *color, data)
        })
        .collect();
    let focused: Vec<(f64, f64)> = app
        .state
        .dashboard
        .focus()
        .focused()
        .and_then(|id| points.iter().find(|p| p.id == id))
        .map(|p| vec![(f64::from(p.minutes), p.xgi_per_90)])
        .unwrap_or_default();

    let all: Vec<(f64, f64)> = groups.iter().flat_map(|(_, _, d)| d.iter().copied()).collect();
    let (x_bounds, y_bounds) = bounds(&all);

    let mut datasets: Vec<Dataset> = groups
        .iter()
        .map(|(position, color, data)| {
            Dataset::default()
                .name(position.short_label())
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(*color))
                .data(data)
        })
        .collect();
    if !focused.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Focus")
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White))
                .data(&focused),
        );
    }

    let chart = Chart::new(datasets)
        .block(default_border(Color::White).title(" xGI per 90 vs minutes "))
        .x_axis(
            Axis::default()
                .title("Minutes")
                .bounds(x_bounds)
                .labels(vec![
                    format!("{:.0}", x_bounds[0]),
                    format!("{:.0}", (x_bounds[0] + x_bounds[1]) / 2.0),
                    format!("{:.0}", x_bounds[1]),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .title("xGI/90")
                .bounds(y_bounds)
                .labels(vec![format::metric(y_bounds[0]), format::metric(y_bounds[1])])
                .style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(chart, scatter_area);

    let rows: Vec<Row> = store
        .team_strength()
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(t.team.clone()),
                Cell::from(format::metric(t.attack)),
                Cell::from(format::metric(t.defence)),
                Cell::from(format::metric(t.overall)),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Length(7),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(vec!["Team", "Attack", "Defence", "Overall"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .block(default_border(Color::White).title(" Team strength "));
    f.render_widget(table, strength_area);
}

// ---------------------------------------------------------------------------
// Fixtures tab
// ---------------------------------------------------------------------------

fn draw_fixtures(f: &mut Frame, area: Rect, app: &App) {
    let store = app.state.dashboard.store();
    if !store.is_loaded() {
        draw_placeholder(f, area, "Waiting for dashboard data");
        return;
    }

    let block = default_border(Color::White).title(" Fixture difficulty (j/k scroll) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [legend_area, grid_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let mut legend: Vec<Span> = vec![Span::raw("Difficulty ")];
    for level in 1..=5u8 {
        legend.push(Span::styled(
            format!(" {level} "),
            difficulty_style(format::DifficultyBucket::Known(level)),
        ));
        legend.push(Span::raw(" "));
    }
    legend.push(Span::styled(
        " unknown ",
        difficulty_style(format::DifficultyBucket::Unknown),
    ));
    f.render_widget(Paragraph::new(Line::from(legend)), legend_area);

    f.render_widget(
        FixtureHeatmap {
            teams: store.fixtures(),
            scroll_offset: app.state.fixtures_scroll,
        },
        grid_area,
    );
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(HELP_TEXT).block(default_border(Color::White).title(" Help ")),
        area,
    );
}

fn draw_picker(f: &mut Frame, area: Rect, app: &App) {
    let picker = app.state.dashboard.focus().picker();
    let popup = centered(area, 40, 70);

    let items: Vec<ListItem> = picker
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let marker = if Some(i) == picker.selected { "* " } else { "  " };
            ListItem::new(format!("{marker}{}", option.label))
        })
        .collect();
    let list = List::new(items)
        .block(default_border(Color::Yellow).title(" Focus player (Enter/Esc) "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.state.picker_cursor));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

/// Rect of `percent_x` by `percent_y` centered in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
