use crate::app::{App, MenuItem};
use crate::state::app_state::InputMode;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let request = match guard.state.input_mode {
        InputMode::Search => {
            search_keys(&mut guard, key_event);
            None
        }
        InputMode::Picker => picker_keys(&mut guard, key_event),
        InputMode::Normal => normal_keys(&mut guard, key_event),
    };
    drop(guard);

    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}

fn search_keys(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Esc => app.cancel_search(),
        KeyCode::Enter => app.finish_search(),
        KeyCode::Backspace => app.search_pop(),
        Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => app.search_push(c),
        _ => {}
    }
}

fn picker_keys(app: &mut App, key_event: KeyEvent) -> Option<NetworkRequest> {
    match key_event.code {
        Char('j') | KeyCode::Down => app.picker_down(),
        Char('k') | KeyCode::Up => app.picker_up(),
        KeyCode::Enter => return app.confirm_picker(),
        KeyCode::Esc | Char('q') => app.close_picker(),
        _ => {}
    }
    None
}

fn normal_keys(app: &mut App, key_event: KeyEvent) -> Option<NetworkRequest> {
    match (app.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => app.update_tab(MenuItem::Players),
        (_, Char('2'), _) => app.update_tab(MenuItem::Summary),
        (_, Char('3'), _) => app.update_tab(MenuItem::Charts),
        (_, Char('4'), _) => app.update_tab(MenuItem::Fixtures),
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => app.exit_help(),

        // Players table
        (MenuItem::Players, Char('j') | KeyCode::Down, _) => app.table_down(1),
        (MenuItem::Players, Char('k') | KeyCode::Up, _) => app.table_up(1),
        (MenuItem::Players, KeyCode::PageDown, _) => app.page_down(),
        (MenuItem::Players, KeyCode::PageUp, _) => app.page_up(),
        (MenuItem::Players, Char('g') | KeyCode::Home, _) => app.table_top(),
        (MenuItem::Players, Char('G') | KeyCode::End, _) => app.table_bottom(),
        (MenuItem::Players, KeyCode::Enter, _) => return app.focus_selected_row(),
        (MenuItem::Players, Char('x'), _) => app.clear_focus(),
        (MenuItem::Players, Char('s'), _) => app.cycle_sort_key(),
        (MenuItem::Players, Char('S'), _) => app.toggle_sort(),
        (MenuItem::Players, Char('p'), _) => app.cycle_position_filter(),
        (MenuItem::Players, Char('t'), _) => app.cycle_team_filter(),
        (MenuItem::Players, Char('/'), _) => app.start_search(),

        // Fixtures heatmap
        (MenuItem::Fixtures, Char('j') | KeyCode::Down, _) => {
            app.state.fixtures_scroll = app.state.fixtures_scroll.saturating_add(1);
        }
        (MenuItem::Fixtures, Char('k') | KeyCode::Up, _) => {
            app.state.fixtures_scroll = app.state.fixtures_scroll.saturating_sub(1);
        }

        // Global
        (_, Char('F'), _) => app.open_picker(),
        (_, Char('r'), _) => return Some(app.begin_refresh()),
        (_, Char('f'), _) => app.toggle_full_screen(),
        (_, Char('"'), _) => app.toggle_show_logs(),

        _ => {}
    }
    None
}
