use crate::app::{App, MenuItem};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;

    if (is_quit(&key_event) && !guard.is_searching()) || is_ctrl_c(&key_event) {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    // Nothing but quit is meaningful until the dataset is in.
    if !guard.is_ready() {
        return;
    }

    if guard.is_searching() {
        handle_search_keys(&mut guard, key_event);
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Map),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Bracket),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Duel),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Map
        (MenuItem::Map, Char('l') | KeyCode::Right, _) => guard.map_change_year(true),
        (MenuItem::Map, Char('h') | KeyCode::Left, _) => guard.map_change_year(false),
        (MenuItem::Map, Char('j') | KeyCode::Down, _) => guard.map_move_selection(true),
        (MenuItem::Map, Char('k') | KeyCode::Up, _) => guard.map_move_selection(false),

        // Bracket
        (MenuItem::Bracket, Char('l') | KeyCode::Right, _) => guard.bracket_change_year(true),
        (MenuItem::Bracket, Char('h') | KeyCode::Left, _) => guard.bracket_change_year(false),
        (MenuItem::Bracket, Char('g'), _) => guard.bracket_toggle_gender(),
        (MenuItem::Bracket, Char('j') | KeyCode::Down, _) => guard.bracket_move(true),
        (MenuItem::Bracket, Char('k') | KeyCode::Up, _) => guard.bracket_move(false),
        (MenuItem::Bracket, KeyCode::Enter, _) => guard.bracket_activate(),
        (MenuItem::Bracket, Char('x'), _) => guard.bracket_clear_highlight(),
        (MenuItem::Bracket, Char('e'), _) => guard.bracket_expand_all(),

        // Duel
        (MenuItem::Duel, KeyCode::Tab, _) => guard.duel_switch_focus(),
        (MenuItem::Duel, Char('j') | KeyCode::Down, _) => guard.duel_cycle_player(true),
        (MenuItem::Duel, Char('k') | KeyCode::Up, _) => guard.duel_cycle_player(false),
        (MenuItem::Duel, Char('/'), _) => guard.duel_start_search(),
        (MenuItem::Duel, Char('m'), _) => guard.duel_toggle_mirror(),
        (MenuItem::Duel, Char('b'), _) => guard.duel_toggle_head_to_head(),
        (MenuItem::Duel, KeyCode::Backspace | KeyCode::Delete, _) => guard.duel_clear_player(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

/// While the type-ahead box is open every printable key is input.
fn handle_search_keys(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Enter => app.duel_confirm_search(),
        KeyCode::Esc => app.duel_cancel_search(),
        KeyCode::Backspace => app.duel_search_backspace(),
        KeyCode::Down => app.duel_search_move(true),
        KeyCode::Up => app.duel_search_move(false),
        Char(c) => app.duel_search_input(c),
        _ => {}
    }
}

fn is_quit(key_event: &KeyEvent) -> bool {
    key_event.code == Char('q')
}

fn is_ctrl_c(key_event: &KeyEvent) -> bool {
    key_event.code == Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
}
