use crate::stats::extract_stats;
use crate::{Gender, MatchNode, MatchRecord, Round};
use log::debug;
use std::collections::HashMap;

/// Reconstruct the single-elimination tree for one (year, gender) draw.
///
/// The final is the root; each node's children are the matches that sent one
/// of its players through. Rounds are chained backwards: a match is attached
/// under whichever later match its winner was last seen playing in. Winners
/// that never appear in a later round (walkovers, gaps in the data) are left
/// out rather than failing the build.
///
/// Returns an empty vector when the selection has no final. Children keep the
/// order of their rows in `matches`.
pub fn build_bracket_tree(matches: &[MatchRecord], year: u16, gender: Gender) -> Vec<MatchNode> {
    let mut by_round: HashMap<Round, Vec<&MatchRecord>> = HashMap::new();
    for record in matches.iter().filter(|m| m.year == year && m.gender == gender) {
        by_round.entry(record.round).or_default().push(record);
    }

    let Some(finals) = by_round.get(&Round::Final).filter(|f| !f.is_empty()) else {
        debug!("no final for {year} {}", gender.label());
        return Vec::new();
    };

    let mut arena: Vec<PendingNode> = Vec::new();
    let mut advancement: HashMap<&str, usize> = HashMap::new();
    let mut roots = Vec::with_capacity(finals.len());

    for record in finals {
        let idx = arena.len();
        arena.push(PendingNode::new(record));
        advancement.insert(record.player1.as_str(), idx);
        advancement.insert(record.player2.as_str(), idx);
        roots.push(idx);
    }

    let mut round = Round::Final;
    while let Some(earlier) = round.prev() {
        round = earlier;
        for record in by_round.get(&round).into_iter().flatten() {
            let Some(&parent) = advancement.get(record.winner.as_str()) else {
                debug!(
                    "{} {}: no later match for winner {}, skipping",
                    round.label(),
                    record.player1,
                    record.winner
                );
                continue;
            };
            let idx = arena.len();
            arena.push(PendingNode::new(record));
            arena[parent].children.push(idx);
            advancement.insert(record.player1.as_str(), idx);
            advancement.insert(record.player2.as_str(), idx);
        }
    }

    roots.into_iter().map(|idx| assemble(&arena, idx)).collect()
}

/// Flat build-time node; children are arena indices.
struct PendingNode<'a> {
    record: &'a MatchRecord,
    children: Vec<usize>,
}

impl<'a> PendingNode<'a> {
    fn new(record: &'a MatchRecord) -> Self {
        Self { record, children: Vec::new() }
    }
}

fn assemble(arena: &[PendingNode], idx: usize) -> MatchNode {
    let pending = &arena[idx];
    let record = pending.record;
    MatchNode {
        player1: record.player1.clone(),
        player2: record.player2.clone(),
        winner: record.winner.clone(),
        round: record.round,
        stats: extract_stats(record),
        children: pending.children.iter().map(|&child| assemble(arena, child)).collect(),
    }
}
