use crate::{MatchNode, NodeKey};
use std::collections::HashSet;

/// Every node in the tree where `player` is one of the two participants.
///
/// Walks the whole tree, leaves included. Node identity is the node's
/// [`NodeKey`], so the result stays valid for a rebuilt tree of the same
/// selection.
pub fn find_matches_involving(root: &MatchNode, player: &str) -> HashSet<NodeKey> {
    root.descendants()
        .filter(|node| node.involves(player))
        .map(MatchNode::key)
        .collect()
}

/// The "winner path" of one player through a bracket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathHighlight {
    pub player: String,
    pub nodes: HashSet<NodeKey>,
}

impl PathHighlight {
    pub fn new(root: &MatchNode, player: &str) -> Self {
        Self {
            player: player.to_string(),
            nodes: find_matches_involving(root, player),
        }
    }

    pub fn contains(&self, node: &MatchNode) -> bool {
        self.nodes.contains(&node.key())
    }

    /// An edge is on the path only if both endpoints involve the player and
    /// the player actually won the child match.
    pub fn is_edge_on_path(&self, parent: &MatchNode, child: &MatchNode) -> bool {
        child.winner == self.player && self.contains(parent) && self.contains(child)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Round;

    fn node(round: Round, p1: &str, p2: &str, winner: &str, children: Vec<MatchNode>) -> MatchNode {
        MatchNode {
            player1: p1.into(),
            player2: p2.into(),
            winner: winner.into(),
            round,
            children,
            ..Default::default()
        }
    }

    /// F: A vs B (A) <- SF: A vs C (A), SF: B vs D (B) <- QF: D vs E (D)
    fn draw() -> MatchNode {
        node(
            Round::Final,
            "A",
            "B",
            "A",
            vec![
                node(Round::Semifinal, "A", "C", "A", vec![]),
                node(
                    Round::Semifinal,
                    "B",
                    "D",
                    "B",
                    vec![node(Round::Quarterfinal, "D", "E", "D", vec![])],
                ),
            ],
        )
    }

    fn key(round: Round, p1: &str, p2: &str) -> NodeKey {
        NodeKey { round, player1: p1.into(), player2: p2.into() }
    }

    #[test]
    fn finds_every_match_of_the_player() {
        let found = find_matches_involving(&draw(), "A");
        let expected: HashSet<NodeKey> = [
            key(Round::Final, "A", "B"),
            key(Round::Semifinal, "A", "C"),
        ]
        .into_iter()
        .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn includes_childless_nodes() {
        let found = find_matches_involving(&draw(), "E");
        assert_eq!(found.len(), 1);
        assert!(found.contains(&key(Round::Quarterfinal, "D", "E")));
    }

    #[test]
    fn unknown_player_yields_empty_set() {
        assert!(find_matches_involving(&draw(), "Nobody").is_empty());
        assert!(PathHighlight::new(&draw(), "Nobody").is_empty());
    }

    #[test]
    fn edge_requires_child_winner_to_be_the_player() {
        let tree = draw();
        let semi_bd = &tree.children[1];
        let qf_de = &semi_bd.children[0];

        // D won the QF and played the SF: edge is on D's path.
        let d = PathHighlight::new(&tree, "D");
        assert!(d.is_edge_on_path(semi_bd, qf_de));

        // E appears in the QF but lost it, and never reached the SF.
        let e = PathHighlight::new(&tree, "E");
        assert!(e.contains(qf_de));
        assert!(!e.is_edge_on_path(semi_bd, qf_de));

        // B is in both the final and the SF and won the SF.
        let b = PathHighlight::new(&tree, "B");
        assert!(b.is_edge_on_path(&tree, semi_bd));
        assert!(!b.is_edge_on_path(&tree, &tree.children[0]));
    }

    #[test]
    fn both_endpoints_must_be_highlighted() {
        let tree = draw();
        let semi_ac = &tree.children[0];
        let c_path = PathHighlight::new(&tree, "C");
        assert!(c_path.contains(semi_ac));
        assert!(!c_path.contains(&tree));
        assert!(!c_path.is_edge_on_path(&tree, semi_ac));
    }
}
