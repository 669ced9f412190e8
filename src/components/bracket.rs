use aotui_core::{MatchNode, Round, StatKey};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Modifier, Style};
use tui::widgets::Widget;

use crate::components::theme::{Palette, resolve};
use crate::state::app_state::BracketRow;

/// Statistics listed in the match tooltip, in display order.
pub const TOOLTIP_STATS: [StatKey; 6] = [
    StatKey::Aces,
    StatKey::DoubleFaults,
    StatKey::Winners,
    StatKey::Errors,
    StatKey::FirstServe,
    StatKey::BreakPointsConverted,
];

// ---------------------------------------------------------------------------
// BracketTreeView widget
// ---------------------------------------------------------------------------

/// Renders the flattened bracket as an indented tree, final at the top:
///
/// ```text
/// ▾ F   Djokovic vs Thiem
/// ├─▾ SF  Djokovic vs Federer
/// │  └─• QF  Djokovic vs Raonic
/// └─• SF  Thiem vs Zverev
/// ```
pub struct BracketTreeView<'a> {
    pub rows: &'a [BracketRow<'a>],
    pub cursor: usize,
}

impl Widget for BracketTreeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let dim = resolve(Palette::Dim);
        let accent = resolve(Palette::Accent);
        let scroll = scroll_offset(self.cursor, area.height);
        let limit_x = area.x + area.width;

        for (idx, row) in self.rows.iter().enumerate().skip(scroll) {
            let Some(y) = screen_y(idx, scroll, area) else {
                break;
            };
            let selected = idx == self.cursor;
            let mut x = area.x;

            // Guides and connector
            let guides = guide_prefix(row);
            let connector = connector(row);
            x = put_str(buf, x, y, &guides, dim, limit_x);
            x = put_str(buf, x, y, connector, if row.edge_on_path { accent } else { dim }, limit_x);

            let marker = expansion_marker(row);
            let node_style = if row.highlighted { accent } else { resolve(Palette::Text) };
            x = put_str(buf, x, y, marker, node_style, limit_x);

            let round = format!("{:<4}", round_tag(row.node.round));
            x = put_str(buf, x, y, &round, dim, limit_x);

            x = put_player(buf, x, y, row.node, &row.node.player1, node_style, limit_x);
            x = put_str(buf, x, y, " vs ", node_style, limit_x);
            put_player(buf, x, y, row.node, &row.node.player2, node_style, limit_x);

            if selected {
                for cx in area.x..limit_x {
                    if let Some(cell) = buf.cell_mut((cx, y)) {
                        cell.modifier.insert(Modifier::REVERSED);
                    }
                }
            }
        }
    }
}

/// Keep the cursor row on screen.
fn scroll_offset(cursor: usize, height: u16) -> usize {
    cursor.saturating_sub(usize::from(height).saturating_sub(1))
}

/// Convert a row index to an absolute screen y, or `None` once past the area.
fn screen_y(row: usize, scroll: usize, area: Rect) -> Option<u16> {
    let rel = row.checked_sub(scroll)?;
    let rel = u16::try_from(rel).ok()?;
    (rel < area.height).then_some(area.y + rel)
}

fn guide_prefix(row: &BracketRow) -> String {
    row.guides
        .iter()
        .map(|&more| if more { "│  " } else { "   " })
        .collect()
}

fn connector(row: &BracketRow) -> &'static str {
    match (row.depth(), row.is_last) {
        (0, _) => "",
        (_, true) => "└─",
        (_, false) => "├─",
    }
}

fn expansion_marker(row: &BracketRow) -> &'static str {
    match (row.node.has_children(), row.expanded) {
        (false, _) => "• ",
        (true, true) => "▾ ",
        (true, false) => "▸ ",
    }
}

pub fn round_tag(round: Round) -> &'static str {
    match round {
        Round::First => "R1",
        Round::Second => "R2",
        Round::Third => "R3",
        Round::Fourth => "R4",
        Round::Quarterfinal => "QF",
        Round::Semifinal => "SF",
        Round::Final => "F",
    }
}

fn put_player(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    node: &MatchNode,
    name: &str,
    base: Style,
    limit_x: u16,
) -> u16 {
    let style = if node.winner == name {
        base.patch(resolve(Palette::Winner))
    } else {
        base
    };
    put_str(buf, x, y, name, style, limit_x)
}

/// Write `text` at (x, y), clipped at `limit_x`. Returns the next free column.
fn put_str(buf: &mut Buffer, mut x: u16, y: u16, text: &str, style: Style, limit_x: u16) -> u16 {
    for ch in text.chars() {
        if x >= limit_x {
            break;
        }
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(ch);
            cell.set_style(style);
        }
        x += 1;
    }
    x
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

pub fn format_stat(key: StatKey, value: Option<f64>) -> String {
    match value {
        None => "N/A".to_string(),
        Some(v) if key.is_percentage() => format!("{:.0}%", v * 100.0),
        Some(v) => format!("{v:.0}"),
    }
}

/// Lines for the hover panel of one match.
pub fn tooltip_lines(node: &MatchNode) -> Vec<String> {
    let mut lines = vec![
        node.label(),
        format!("Winner: {}", node.winner),
        format!("Round: {}", node.round.label()),
        format!(
            "Score: {}",
            if node.stats.results.is_empty() { "N/A" } else { node.stats.results.as_str() }
        ),
        String::new(),
    ];

    let name_w = 14;
    lines.push(format!(
        "{:<12} {:>w$} {:>w$}",
        "",
        truncate(&node.player1, name_w),
        truncate(&node.player2, name_w),
        w = name_w
    ));
    for key in TOOLTIP_STATS {
        lines.push(format!(
            "{:<12} {:>w$} {:>w$}",
            key.label(),
            format_stat(key, node.stats.player1.get(key)),
            format_stat(key, node.stats.player2.get(key)),
            w = name_w
        ));
    }
    lines
}

fn truncate(name: &str, max: usize) -> String {
    name.chars().take(max).collect()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
