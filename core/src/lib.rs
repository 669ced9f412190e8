pub mod bracket;
pub mod choropleth;
pub mod duel;
pub mod geo;
pub mod highlight;
pub mod loader;
pub mod stats;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub use bracket::build_bracket_tree;
pub use highlight::{PathHighlight, find_matches_involving};
pub use stats::{StatAverages, aggregate, parse_stat_value};

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the CSV wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Men,
    Women,
}

impl Gender {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "m" | "men" | "male" => Some(Gender::Men),
            "w" | "f" | "women" | "female" => Some(Gender::Women),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Men => "Men's",
            Gender::Women => "Women's",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Gender::Men => Gender::Women,
            Gender::Women => Gender::Men,
        }
    }
}

/// Elimination stage. Ordered from earliest to latest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Round {
    #[default]
    First,
    Second,
    Third,
    Fourth,
    Quarterfinal,
    Semifinal,
    Final,
}

impl Round {
    pub const ALL: [Round; 7] = [
        Round::First,
        Round::Second,
        Round::Third,
        Round::Fourth,
        Round::Quarterfinal,
        Round::Semifinal,
        Round::Final,
    ];

    /// Accepts both the dataset spellings (`quarter`, `semi`) and the full names.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "first" => Some(Round::First),
            "second" => Some(Round::Second),
            "third" => Some(Round::Third),
            "fourth" => Some(Round::Fourth),
            "quarter" | "quarterfinal" | "quarterfinals" => Some(Round::Quarterfinal),
            "semi" | "semifinal" | "semifinals" => Some(Round::Semifinal),
            "final" => Some(Round::Final),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Round::First => "1st Round",
            Round::Second => "2nd Round",
            Round::Third => "3rd Round",
            Round::Fourth => "4th Round",
            Round::Quarterfinal => "Quarterfinal",
            Round::Semifinal => "Semifinal",
            Round::Final => "Final",
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            Round::First => None,
            Round::Second => Some(Round::First),
            Round::Third => Some(Round::Second),
            Round::Fourth => Some(Round::Third),
            Round::Quarterfinal => Some(Round::Fourth),
            Round::Semifinal => Some(Round::Quarterfinal),
            Round::Final => Some(Round::Semifinal),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Round::First => Some(Round::Second),
            Round::Second => Some(Round::Third),
            Round::Third => Some(Round::Fourth),
            Round::Fourth => Some(Round::Quarterfinal),
            Round::Quarterfinal => Some(Round::Semifinal),
            Round::Semifinal => Some(Round::Final),
            Round::Final => None,
        }
    }
}

/// Which side of a match record a player occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Slot {
    #[default]
    One,
    Two,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Slot::One => 0,
            Slot::Two => 1,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Slot::One => "1",
            Slot::Two => "2",
        }
    }
}

/// Per-player statistic columns. The dataset names each column by prefix plus
/// the player slot, e.g. `firstServe1` / `firstServe2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKey {
    FirstServe,
    Aces,
    DoubleFaults,
    FirstServePointsWon,
    SecondServePointsWon,
    FastestServe,
    AvgFirstServeSpeed,
    AvgSecondServeSpeed,
    BreakPointsConverted,
    ReturnPointsWon,
    TotalPointsWon,
    Winners,
    Errors,
    NetPointsWon,
}

impl StatKey {
    pub const ALL: [StatKey; 14] = [
        StatKey::FirstServe,
        StatKey::Aces,
        StatKey::DoubleFaults,
        StatKey::FirstServePointsWon,
        StatKey::SecondServePointsWon,
        StatKey::FastestServe,
        StatKey::AvgFirstServeSpeed,
        StatKey::AvgSecondServeSpeed,
        StatKey::BreakPointsConverted,
        StatKey::ReturnPointsWon,
        StatKey::TotalPointsWon,
        StatKey::Winners,
        StatKey::Errors,
        StatKey::NetPointsWon,
    ];

    pub fn column_prefix(&self) -> &'static str {
        match self {
            StatKey::FirstServe => "firstServe",
            StatKey::Aces => "ace",
            StatKey::DoubleFaults => "double",
            StatKey::FirstServePointsWon => "firstPointWon",
            StatKey::SecondServePointsWon => "secPointWon",
            StatKey::FastestServe => "fastServe",
            StatKey::AvgFirstServeSpeed => "avgFirstServe",
            StatKey::AvgSecondServeSpeed => "avgSecServe",
            StatKey::BreakPointsConverted => "break",
            StatKey::ReturnPointsWon => "return",
            StatKey::TotalPointsWon => "total",
            StatKey::Winners => "winner",
            StatKey::Errors => "error",
            StatKey::NetPointsWon => "net",
        }
    }

    pub fn column(&self, slot: Slot) -> String {
        format!("{}{}", self.column_prefix(), slot.suffix())
    }

    pub fn is_percentage(&self) -> bool {
        matches!(
            self,
            StatKey::FirstServe
                | StatKey::FirstServePointsWon
                | StatKey::SecondServePointsWon
                | StatKey::BreakPointsConverted
                | StatKey::ReturnPointsWon
                | StatKey::NetPointsWon
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKey::FirstServe => "1st Srv",
            StatKey::Aces => "Aces",
            StatKey::DoubleFaults => "DF",
            StatKey::FirstServePointsWon => "1st Srv Pts",
            StatKey::SecondServePointsWon => "2nd Srv Pts",
            StatKey::FastestServe => "Fastest Srv",
            StatKey::AvgFirstServeSpeed => "Avg 1st Srv",
            StatKey::AvgSecondServeSpeed => "Avg 2nd Srv",
            StatKey::BreakPointsConverted => "BP Conv",
            StatKey::ReturnPointsWon => "Return Pts",
            StatKey::TotalPointsWon => "Total Pts",
            StatKey::Winners => "Winners",
            StatKey::Errors => "Errors",
            StatKey::NetPointsWon => "Net Pts",
        }
    }
}

/// One played match, as read from the dataset. Statistic values are kept as
/// the raw column text; parsing happens on demand in [`stats`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchRecord {
    pub year: u16,
    pub gender: Gender,
    pub round: Round,
    pub player1: String,
    pub player2: String,
    pub winner: String,
    pub country1: String,
    pub country2: String,
    pub stats: BTreeMap<StatKey, [String; 2]>,
    pub results: String, // "7-5 3-6 7-6(3) 3-6 6-2"
}

impl MatchRecord {
    pub fn slot_of(&self, player: &str) -> Option<Slot> {
        if self.player1 == player {
            Some(Slot::One)
        } else if self.player2 == player {
            Some(Slot::Two)
        } else {
            None
        }
    }

    pub fn involves(&self, player: &str) -> bool {
        self.slot_of(player).is_some()
    }

    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.player1 == a && self.player2 == b) || (self.player1 == b && self.player2 == a)
    }

    pub fn raw_stat(&self, key: StatKey, slot: Slot) -> Option<&str> {
        self.stats.get(&key).map(|pair| pair[slot.index()].as_str())
    }

    /// Country code of the winning player as written in the dataset.
    pub fn winner_country(&self) -> &str {
        if self.winner == self.player1 {
            &self.country1
        } else {
            &self.country2
        }
    }
}

/// Parsed statistics for one player in one match. Missing keys were absent or
/// unparseable in the source row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerStats(pub BTreeMap<StatKey, f64>);

impl PlayerStats {
    pub fn get(&self, key: StatKey) -> Option<f64> {
        self.0.get(&key).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchStats {
    pub player1: PlayerStats,
    pub player2: PlayerStats,
    pub results: String,
}

// ---------------------------------------------------------------------------
// Bracket tree
// ---------------------------------------------------------------------------

/// Value identity of a bracket node. Within one draw a pairing can only meet
/// once per round, so this is unique per tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub round: Round,
    pub player1: String,
    pub player2: String,
}

/// One reconstructed match in a bracket tree. Children are the matches that
/// fed a participant into this one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchNode {
    pub player1: String,
    pub player2: String,
    pub winner: String,
    pub round: Round,
    pub stats: MatchStats,
    pub children: Vec<MatchNode>,
}

impl MatchNode {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.player1, self.player2)
    }

    pub fn key(&self) -> NodeKey {
        NodeKey {
            round: self.round,
            player1: self.player1.clone(),
            player2: self.player2.clone(),
        }
    }

    pub fn involves(&self, player: &str) -> bool {
        self.player1 == player || self.player2 == player
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of levels in this subtree; a childless node has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(MatchNode::depth).max().unwrap_or(0)
    }

    /// Pre-order walk over this node and everything beneath it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Resolve a child-index path (`[]` is this node).
    pub fn node_at(&self, path: &[usize]) -> Option<&MatchNode> {
        path.iter()
            .try_fold(self, |node, &idx| node.children.get(idx))
    }

    pub fn find(&self, key: &NodeKey) -> Option<&MatchNode> {
        self.descendants().find(|n| {
            n.round == key.round && n.player1 == key.player1 && n.player2 == key.player2
        })
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a MatchNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a MatchNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

// ---------------------------------------------------------------------------
// Loaded dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub matches: Vec<MatchRecord>,
    pub world: geo::WorldMap,
}

impl Dataset {
    /// Distinct years present in the match list, ascending.
    pub fn years(&self) -> Vec<u16> {
        let years: BTreeSet<u16> = self.matches.iter().map(|m| m.year).collect();
        years.into_iter().collect()
    }

    /// Every player name that appears in either slot, trimmed and sorted.
    pub fn player_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .matches
            .iter()
            .flat_map(|m| [m.player1.trim(), m.player2.trim()])
            .filter(|n| !n.is_empty())
            .collect();
        names.into_iter().map(ToString::to_string).collect()
    }

    pub fn wins_by_country(&self) -> choropleth::WinsByCountry {
        choropleth::WinsByCountry::from_matches(&self.matches)
    }
}
