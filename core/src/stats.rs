use crate::{MatchRecord, MatchStats, PlayerStats, Slot, StatKey};
use std::collections::BTreeMap;

/// Mean value per statistic. A key with no valid observations maps to `0.0`,
/// so callers read `0.0` as "no data".
pub type StatAverages = BTreeMap<StatKey, f64>;

/// Best-effort numeric parse of one statistic cell.
///
/// `"65%"` becomes `0.65`, `"12"` becomes `12.0`. Empty cells, the `-`
/// placeholder and anything else that is not a number yield `None`.
pub fn parse_stat_value(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        return None;
    }
    let value = match raw.strip_suffix('%') {
        Some(number) => number.trim().parse::<f64>().ok()? / 100.0,
        None => raw.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Parse every statistic column of a record for both players.
pub fn extract_stats(record: &MatchRecord) -> MatchStats {
    MatchStats {
        player1: player_stats(record, Slot::One),
        player2: player_stats(record, Slot::Two),
        results: record.results.clone(),
    }
}

fn player_stats(record: &MatchRecord, slot: Slot) -> PlayerStats {
    PlayerStats(
        StatKey::ALL
            .iter()
            .filter_map(|&key| {
                let value = parse_stat_value(record.raw_stat(key, slot)?)?;
                Some((key, value))
            })
            .collect(),
    )
}

/// Average a player's statistics over the supplied matches.
///
/// For each match the player's own column is used (slot 1 or 2 depending on
/// where they appear); matches not involving the player contribute nothing.
/// Unparseable observations are excluded from the mean rather than counted
/// as zero.
pub fn aggregate<'a, I>(player: &str, matches: I, keys: &[StatKey]) -> StatAverages
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut sums: BTreeMap<StatKey, (f64, usize)> =
        keys.iter().map(|&key| (key, (0.0, 0))).collect();

    for record in matches {
        let Some(slot) = record.slot_of(player) else {
            continue;
        };
        for (&key, (sum, count)) in sums.iter_mut() {
            if let Some(value) = record.raw_stat(key, slot).and_then(parse_stat_value) {
                *sum += value;
                *count += 1;
            }
        }
    }

    sums.into_iter()
        .map(|(key, (sum, count))| {
            let mean = if count > 0 { sum / count as f64 } else { 0.0 };
            (key, mean)
        })
        .collect()
}
