use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, LoadStatus};
use aotui_core::Dataset;
use aotui_core::choropleth::WinsByCountry;
use chrono::Local;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Map,
    Bracket,
    Duel,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    pub dataset: Dataset,
    pub wins: WinsByCountry,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        log::set_max_level(settings.log_level);
        tui_logger::set_default_level(settings.log_level);

        Self {
            settings,
            state: AppState::new(),
            dataset: Dataset::default(),
            wins: WinsByCountry::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Loader responses, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_dataset_loaded(&mut self, dataset: Dataset) {
        self.wins = dataset.wins_by_country();
        self.state.years = dataset.years();
        self.state.player_names = dataset.player_names();
        self.dataset = dataset;

        self.state.status = LoadStatus::Ready;
        self.state.loaded_at = Some(Local::now().format("%H:%M").to_string());
        self.state.map = Default::default();
        self.state.bracket.year_idx = 0;
        self.state
            .bracket
            .rebuild(&self.dataset.matches, &self.state.years);
        self.state.duel.recompute(&self.dataset.matches);
    }

    pub fn on_load_failed(&mut self, message: String) {
        self.state.status = LoadStatus::Failed(message);
    }

    pub fn is_ready(&self) -> bool {
        self.state.status == LoadStatus::Ready
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Map
    // -----------------------------------------------------------------------

    pub fn map_year(&self) -> Option<u16> {
        self.state.map.year(&self.state.years)
    }

    pub fn map_ranking(&self) -> Vec<(String, u32)> {
        self.map_year()
            .map(|year| self.wins.ranking(year))
            .unwrap_or_default()
    }

    /// The country under the list cursor.
    pub fn map_selected_country(&self) -> Option<(String, u32)> {
        self.map_ranking().into_iter().nth(self.state.map.selected)
    }

    pub fn map_change_year(&mut self, forward: bool) {
        self.state.map.change_year(&self.state.years, forward);
        let ranked = self.map_ranking().len();
        self.state.map.clamp_selection(ranked);
    }

    pub fn map_move_selection(&mut self, forward: bool) {
        let ranked = self.map_ranking().len();
        self.state.map.move_selection(ranked, forward);
    }

    // -----------------------------------------------------------------------
    // Bracket, delegated to BracketState
    // -----------------------------------------------------------------------

    pub fn bracket_year(&self) -> Option<u16> {
        self.state.bracket.year(&self.state.years)
    }

    pub fn bracket_change_year(&mut self, forward: bool) {
        self.state
            .bracket
            .change_year(&self.dataset.matches, &self.state.years, forward);
    }

    pub fn bracket_toggle_gender(&mut self) {
        self.state
            .bracket
            .toggle_gender(&self.dataset.matches, &self.state.years);
    }

    pub fn bracket_move(&mut self, forward: bool) {
        self.state.bracket.move_cursor(forward);
    }

    pub fn bracket_activate(&mut self) {
        self.state.bracket.activate();
    }

    pub fn bracket_clear_highlight(&mut self) {
        self.state.bracket.clear_highlight();
    }

    pub fn bracket_expand_all(&mut self) {
        self.state.bracket.expand_all();
    }

    // -----------------------------------------------------------------------
    // Duel: every change re-evaluates the selection
    // -----------------------------------------------------------------------

    pub fn duel_cycle_player(&mut self, forward: bool) {
        self.state.duel.cycle_player(&self.state.player_names, forward);
        self.state.duel.recompute(&self.dataset.matches);
    }

    pub fn duel_clear_player(&mut self) {
        self.state.duel.clear_player();
        self.state.duel.recompute(&self.dataset.matches);
    }

    pub fn duel_switch_focus(&mut self) {
        self.state.duel.switch_focus();
    }

    pub fn duel_toggle_mirror(&mut self) {
        self.state.duel.mirror = !self.state.duel.mirror;
        self.state.duel.recompute(&self.dataset.matches);
    }

    pub fn duel_toggle_head_to_head(&mut self) {
        self.state.duel.head_to_head = !self.state.duel.head_to_head;
        self.state.duel.recompute(&self.dataset.matches);
    }

    pub fn duel_start_search(&mut self) {
        self.state.duel.start_search();
    }

    pub fn duel_search_input(&mut self, c: char) {
        self.state.duel.search_push(c);
    }

    pub fn duel_search_backspace(&mut self) {
        self.state.duel.search_pop();
    }

    pub fn duel_search_move(&mut self, forward: bool) {
        self.state.duel.search_move(&self.state.player_names, forward);
    }

    pub fn duel_confirm_search(&mut self) {
        if self.state.duel.confirm_search(&self.state.player_names) {
            self.state.duel.recompute(&self.dataset.matches);
        }
    }

    pub fn duel_cancel_search(&mut self) {
        self.state.duel.cancel_search();
    }

    pub fn is_searching(&self) -> bool {
        self.state.active_tab == MenuItem::Duel && self.state.duel.search.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aotui_core::{Gender, MatchRecord, Round};

    fn record(year: u16, round: Round, p1: &str, p2: &str, c1: &str, c2: &str) -> MatchRecord {
        MatchRecord {
            year,
            gender: Gender::Men,
            round,
            player1: p1.into(),
            player2: p2.into(),
            winner: p1.into(),
            country1: c1.into(),
            country2: c2.into(),
            ..Default::default()
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(AppSettings::default());
        app.on_dataset_loaded(Dataset {
            matches: vec![
                record(2019, Round::Final, "Djokovic", "Nadal", "SRB", "ESP"),
                record(2019, Round::Semifinal, "Nadal", "Tsitsipas", "ESP", "GRE"),
                record(2020, Round::Final, "Djokovic", "Thiem", "SRB", "AUT"),
                record(2020, Round::Semifinal, "Djokovic", "Federer", "SRB", "SUI"),
            ],
            world: Default::default(),
        });
        app
    }

    #[test]
    fn load_populates_every_view() {
        let app = loaded_app();
        assert!(app.is_ready());
        assert_eq!(app.state.years, vec![2019, 2020]);
        assert_eq!(app.state.player_names.len(), 5);
        assert_eq!(app.state.bracket.roots.len(), 1);
        assert_eq!(app.state.bracket.roots[0].label(), "Djokovic vs Nadal");
        assert_eq!(app.map_year(), Some(2019));
        assert!(app.state.loaded_at.is_some());
    }

    #[test]
    fn map_ranking_follows_year() {
        let mut app = loaded_app();
        assert_eq!(
            app.map_ranking(),
            vec![("ESP".to_string(), 1), ("SRB".to_string(), 1)]
        );
        app.map_change_year(true);
        assert_eq!(app.map_selected_country(), Some(("SRB".to_string(), 3)));
    }

    #[test]
    fn bracket_year_change_rebuilds_tree() {
        let mut app = loaded_app();
        app.bracket_change_year(true);
        assert_eq!(app.bracket_year(), Some(2020));
        assert_eq!(app.state.bracket.roots[0].label(), "Djokovic vs Thiem");
        app.bracket_toggle_gender();
        assert!(app.state.bracket.roots.is_empty());
    }

    #[test]
    fn failed_load_is_terminal_state() {
        let mut app = App::new(AppSettings::default());
        app.on_load_failed("Could not read world.geojson".into());
        assert!(!app.is_ready());
        assert_eq!(
            app.state.status,
            LoadStatus::Failed("Could not read world.geojson".into())
        );
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = loaded_app();
        app.update_tab(MenuItem::Duel);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Duel);
    }

    #[test]
    fn duel_toggles_recompute() {
        let mut app = loaded_app();
        app.update_tab(MenuItem::Duel);
        app.duel_cycle_player(true);
        assert_eq!(app.state.duel.duel.a.player.as_deref(), Some("Djokovic"));
        app.duel_switch_focus();
        app.duel_cycle_player(true);
        app.duel_toggle_head_to_head();
        assert_eq!(
            app.state.duel.duel.status,
            Some(aotui_core::duel::H2H_WITH_SELF)
        );
        app.duel_start_search();
        assert!(app.is_searching());
        for c in "fed".chars() {
            app.duel_search_input(c);
        }
        app.duel_confirm_search();
        assert_eq!(app.state.duel.duel.b.player.as_deref(), Some("Federer"));
        assert_eq!(app.state.duel.duel.status, None);
    }
}
