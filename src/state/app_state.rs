use crate::app::MenuItem;
use aotui_core::duel::{self, Duel, DuelSelection};
use aotui_core::{Gender, MatchNode, MatchRecord, NodeKey, PathHighlight, Slot, build_bracket_tree};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Dataset load status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    /// Nothing else is drawn while the load has failed.
    Failed(String),
}

/// Step an index through `len` items, clamped at both ends.
fn step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1).min(len - 1)
    } else {
        index.saturating_sub(1)
    }
}

// ---------------------------------------------------------------------------
// Choropleth map
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MapState {
    pub year_idx: usize,
    /// Cursor into the ranked country list; stands in for mouse hover.
    pub selected: usize,
}

impl MapState {
    pub fn year(&self, years: &[u16]) -> Option<u16> {
        years.get(self.year_idx).copied()
    }

    pub fn change_year(&mut self, years: &[u16], forward: bool) {
        self.year_idx = step(self.year_idx, years.len(), forward);
    }

    pub fn move_selection(&mut self, ranked: usize, forward: bool) {
        self.selected = step(self.selected, ranked, forward);
    }

    pub fn clamp_selection(&mut self, ranked: usize) {
        self.selected = self.selected.min(ranked.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Bracket view-model
// ---------------------------------------------------------------------------

/// One visible line of the flattened bracket tree.
#[derive(Debug, Clone)]
pub struct BracketRow<'a> {
    pub node: &'a MatchNode,
    /// `path[0]` is the root index, the rest are child indices.
    pub path: Vec<usize>,
    /// For each ancestor level below the root: does a sibling follow it?
    pub guides: Vec<bool>,
    pub is_last: bool,
    pub expanded: bool,
    pub highlighted: bool,
    /// The line joining this node to its parent lies on the highlighted path.
    pub edge_on_path: bool,
}

impl BracketRow<'_> {
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }
}

#[derive(Debug, Default)]
pub struct BracketState {
    pub year_idx: usize,
    pub gender: Gender,
    pub roots: Vec<MatchNode>,
    /// Missing keys are expanded.
    expanded: HashMap<NodeKey, bool>,
    pub cursor: usize,
    pub highlight: Option<PathHighlight>,
}

impl BracketState {
    pub fn year(&self, years: &[u16]) -> Option<u16> {
        years.get(self.year_idx).copied()
    }

    /// Rebuild the tree for the current selection and reset the view-model.
    pub fn rebuild(&mut self, matches: &[MatchRecord], years: &[u16]) {
        self.roots = match self.year(years) {
            Some(year) => build_bracket_tree(matches, year, self.gender),
            None => Vec::new(),
        };
        self.expanded.clear();
        self.cursor = 0;
        self.highlight = None;
    }

    pub fn change_year(&mut self, matches: &[MatchRecord], years: &[u16], forward: bool) {
        let next = step(self.year_idx, years.len(), forward);
        if next != self.year_idx {
            self.year_idx = next;
            self.rebuild(matches, years);
        }
    }

    pub fn toggle_gender(&mut self, matches: &[MatchRecord], years: &[u16]) {
        self.gender = self.gender.toggle();
        self.rebuild(matches, years);
    }

    pub fn is_expanded(&self, key: &NodeKey) -> bool {
        self.expanded.get(key).copied().unwrap_or(true)
    }

    pub fn expand_all(&mut self) {
        self.expanded.clear();
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&MatchNode> {
        let (root, rest) = path.split_first()?;
        self.roots.get(*root)?.node_at(rest)
    }

    /// Pre-order rows, skipping the children of collapsed nodes.
    pub fn visible_rows(&self) -> Vec<BracketRow<'_>> {
        let mut rows = Vec::new();
        let root_count = self.roots.len();
        for (idx, root) in self.roots.iter().enumerate() {
            self.push_rows(&mut rows, root, None, vec![idx], Vec::new(), idx + 1 == root_count);
        }
        rows
    }

    fn push_rows<'a>(
        &'a self,
        rows: &mut Vec<BracketRow<'a>>,
        node: &'a MatchNode,
        parent: Option<&'a MatchNode>,
        path: Vec<usize>,
        guides: Vec<bool>,
        is_last: bool,
    ) {
        let key = node.key();
        let expanded = self.is_expanded(&key);
        let (highlighted, edge_on_path) = match &self.highlight {
            Some(h) => (
                h.contains(node),
                parent.is_some_and(|p| h.is_edge_on_path(p, node)),
            ),
            None => (false, false),
        };

        rows.push(BracketRow {
            node,
            path: path.clone(),
            guides: guides.clone(),
            is_last,
            expanded,
            highlighted,
            edge_on_path,
        });

        if !expanded {
            return;
        }
        let child_guides = if parent.is_some() {
            let mut g = guides;
            g.push(!is_last);
            g
        } else {
            guides
        };
        let count = node.children.len();
        for (idx, child) in node.children.iter().enumerate() {
            let mut child_path = path.clone();
            child_path.push(idx);
            self.push_rows(rows, child, Some(node), child_path, child_guides.clone(), idx + 1 == count);
        }
    }

    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.visible_rows().len();
        self.cursor = step(self.cursor, len, forward);
    }

    pub fn selected_path(&self) -> Option<Vec<usize>> {
        self.visible_rows().into_iter().nth(self.cursor).map(|row| row.path)
    }

    pub fn selected_node(&self) -> Option<&MatchNode> {
        let path = self.selected_path()?;
        self.node_at(&path)
    }

    /// Enter on a match: highlight its winner's path through the whole
    /// bracket and flip the node's expansion in place.
    pub fn activate(&mut self) {
        let Some(path) = self.selected_path() else {
            return;
        };
        let Some(root) = path.first().and_then(|idx| self.roots.get(*idx)) else {
            return;
        };
        let Some(node) = root.node_at(&path[1..]) else {
            return;
        };

        let highlight = (!node.winner.is_empty()).then(|| PathHighlight::new(root, &node.winner));
        let toggle = node.has_children().then(|| node.key());

        self.highlight = highlight;
        if let Some(key) = toggle {
            let next = !self.is_expanded(&key);
            self.expanded.insert(key, next);
        }
        let len = self.visible_rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Radar duel
// ---------------------------------------------------------------------------

/// Type-ahead search over player names for the focused slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerSearch {
    pub query: String,
    pub cursor: usize,
}

impl PlayerSearch {
    pub fn candidates<'a>(&self, names: &'a [String]) -> Vec<&'a str> {
        let needle = self.query.to_lowercase();
        names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct DuelState {
    pub players: [Option<String>; 2],
    pub focus: Slot,
    pub mirror: bool,
    pub head_to_head: bool,
    pub search: Option<PlayerSearch>,
    pub duel: Duel,
}

impl DuelState {
    fn focus_index(&self) -> usize {
        match self.focus {
            Slot::One => 0,
            Slot::Two => 1,
        }
    }

    pub fn selection(&self) -> DuelSelection {
        DuelSelection {
            player_a: self.players[0].clone(),
            player_b: self.players[1].clone(),
            mirror: self.mirror,
            head_to_head: self.head_to_head,
        }
    }

    pub fn recompute(&mut self, matches: &[MatchRecord]) {
        self.duel = duel::compare(matches, &self.selection());
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Slot::One => Slot::Two,
            Slot::Two => Slot::One,
        };
    }

    /// Step the focused slot through the sorted name list.
    pub fn cycle_player(&mut self, names: &[String], forward: bool) {
        if names.is_empty() {
            return;
        }
        let slot = self.focus_index();
        let current = self.players[slot]
            .as_ref()
            .and_then(|p| names.iter().position(|n| n == p));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => names.len() - 1,
            (Some(i), true) => (i + 1) % names.len(),
            (Some(i), false) => (i + names.len() - 1) % names.len(),
        };
        self.players[slot] = Some(names[next].clone());
    }

    pub fn clear_player(&mut self) {
        let slot = self.focus_index();
        self.players[slot] = None;
    }

    pub fn start_search(&mut self) {
        self.search = Some(PlayerSearch::default());
    }

    pub fn search_push(&mut self, c: char) {
        if let Some(search) = &mut self.search {
            search.query.push(c);
            search.cursor = 0;
        }
    }

    pub fn search_pop(&mut self) {
        if let Some(search) = &mut self.search {
            search.query.pop();
            search.cursor = 0;
        }
    }

    pub fn search_move(&mut self, names: &[String], forward: bool) {
        if let Some(search) = &mut self.search {
            let len = search.candidates(names).len();
            search.cursor = step(search.cursor, len, forward);
        }
    }

    /// Put the highlighted candidate into the focused slot. Returns false when
    /// nothing matched; the search stays open in that case.
    pub fn confirm_search(&mut self, names: &[String]) -> bool {
        let Some(search) = &self.search else {
            return false;
        };
        let Some(choice) = search.candidates(names).get(search.cursor).map(|s| s.to_string()) else {
            return false;
        };
        let slot = self.focus_index();
        self.players[slot] = Some(choice);
        self.search = None;
        true
    }

    pub fn cancel_search(&mut self) {
        self.search = None;
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub status: LoadStatus,
    pub loaded_at: Option<String>,
    pub years: Vec<u16>,
    pub player_names: Vec<String>,
    pub map: MapState,
    pub bracket: BracketState,
    pub duel: DuelState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aotui_core::Round;

    fn m(round: Round, p1: &str, p2: &str, winner: &str) -> MatchRecord {
        MatchRecord {
            year: 2020,
            gender: Gender::Men,
            round,
            player1: p1.into(),
            player2: p2.into(),
            winner: winner.into(),
            ..Default::default()
        }
    }

    /// F: A-B <- SF: A-C, B-D <- QF: D-E under B-D
    fn matches() -> Vec<MatchRecord> {
        vec![
            m(Round::Final, "A", "B", "A"),
            m(Round::Semifinal, "A", "C", "A"),
            m(Round::Semifinal, "B", "D", "B"),
            m(Round::Quarterfinal, "D", "E", "D"),
        ]
    }

    fn built() -> BracketState {
        let mut state = BracketState::default();
        state.rebuild(&matches(), &[2020]);
        state
    }

    fn labels(state: &BracketState) -> Vec<String> {
        state.visible_rows().iter().map(|r| r.node.label()).collect()
    }

    #[test]
    fn rows_flatten_in_pre_order_with_default_expansion() {
        let state = built();
        assert_eq!(labels(&state), vec!["A vs B", "A vs C", "B vs D", "D vs E"]);
        let rows = state.visible_rows();
        assert_eq!(rows[3].path, vec![0, 1, 0]);
        assert_eq!(rows[3].depth(), 2);
        assert!(!rows[1].is_last);
        assert!(rows[2].is_last);
        assert_eq!(rows[3].guides, vec![false]);
    }

    #[test]
    fn activate_toggles_expansion_and_highlights_winner() {
        let mut state = built();
        state.cursor = 2; // B vs D
        state.activate();
        assert_eq!(labels(&state), vec!["A vs B", "A vs C", "B vs D"]);

        let highlight = state.highlight.as_ref().unwrap();
        assert_eq!(highlight.player, "B");
        let rows = state.visible_rows();
        assert!(rows[0].highlighted);
        assert!(rows[2].highlighted);
        assert!(rows[2].edge_on_path);
        assert!(!rows[1].highlighted);

        state.activate();
        assert_eq!(labels(&state).len(), 4);
    }

    #[test]
    fn leaf_activation_only_highlights() {
        let mut state = built();
        state.cursor = 3; // D vs E
        state.activate();
        assert_eq!(labels(&state).len(), 4);
        assert_eq!(state.highlight.as_ref().map(|h| h.player.as_str()), Some("D"));
        let rows = state.visible_rows();
        assert!(rows[3].edge_on_path);
        assert!(!rows[2].edge_on_path);
    }

    #[test]
    fn selection_change_resets_view_model() {
        let mut state = built();
        state.cursor = 2;
        state.activate();
        state.toggle_gender(&matches(), &[2020]);
        assert!(state.roots.is_empty());
        assert!(state.highlight.is_none());
        assert_eq!(state.cursor, 0);

        state.toggle_gender(&matches(), &[2020]);
        assert_eq!(labels(&state).len(), 4);
    }

    #[test]
    fn expand_all_and_clear_highlight() {
        let mut state = built();
        state.cursor = 0;
        state.activate();
        assert_eq!(labels(&state), vec!["A vs B"]);
        state.expand_all();
        state.clear_highlight();
        assert_eq!(labels(&state).len(), 4);
        assert!(state.highlight.is_none());
    }

    #[test]
    fn cursor_is_clamped_to_visible_rows() {
        let mut state = built();
        for _ in 0..10 {
            state.move_cursor(true);
        }
        assert_eq!(state.cursor, 3);
        assert_eq!(state.selected_node().map(|n| n.label()), Some("D vs E".to_string()));
        for _ in 0..10 {
            state.move_cursor(false);
        }
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn map_year_and_selection_are_clamped() {
        let mut map = MapState::default();
        let years = [2017, 2018];
        map.change_year(&years, false);
        assert_eq!(map.year(&years), Some(2017));
        map.change_year(&years, true);
        map.change_year(&years, true);
        assert_eq!(map.year(&years), Some(2018));
        map.move_selection(3, true);
        map.move_selection(3, true);
        map.move_selection(3, true);
        assert_eq!(map.selected, 2);
        map.clamp_selection(1);
        assert_eq!(map.selected, 0);
    }

    fn names() -> Vec<String> {
        ["Federer", "Nadal", "Djokovic"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn duel_cycle_wraps_within_names() {
        let mut duel = DuelState::default();
        let names = names();
        duel.cycle_player(&names, false);
        assert_eq!(duel.players[0].as_deref(), Some("Djokovic"));
        duel.cycle_player(&names, true);
        assert_eq!(duel.players[0].as_deref(), Some("Federer"));
        duel.switch_focus();
        duel.cycle_player(&names, true);
        assert_eq!(duel.players[1].as_deref(), Some("Federer"));
    }

    #[test]
    fn duel_search_is_case_insensitive() {
        let mut duel = DuelState::default();
        let names = names();
        duel.start_search();
        for c in "DA".chars() {
            duel.search_push(c);
        }
        assert_eq!(duel.search.as_ref().unwrap().candidates(&names), vec!["Nadal"]);
        assert!(duel.confirm_search(&names));
        assert_eq!(duel.players[0].as_deref(), Some("Nadal"));
        assert!(duel.search.is_none());

        duel.start_search();
        duel.search_push('z');
        assert!(!duel.confirm_search(&names));
        assert!(duel.search.is_some());
        duel.cancel_search();
        assert!(duel.search.is_none());
        assert_eq!(duel.players[0].as_deref(), Some("Nadal"));
    }

    #[test]
    fn duel_recompute_reflects_toggles() {
        let records = matches();
        let mut duel = DuelState::default();
        duel.players = [Some("C".into()), Some("D".into())];
        duel.head_to_head = true;
        duel.recompute(&records);
        assert_eq!(duel.duel.status, Some(duel::NO_H2H_DATA));

        duel.head_to_head = false;
        duel.mirror = true;
        duel.recompute(&records);
        assert_eq!(duel.duel.status, None);
        assert!(duel.duel.mirror);
    }
}
