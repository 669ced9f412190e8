use crate::stats::{StatAverages, aggregate};
use crate::{MatchRecord, StatKey};

pub const NO_H2H_DATA: &str = "No H2H data.";
pub const H2H_WITH_SELF: &str = "H2H with self not applicable.";

/// One spoke of the radar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarAxis {
    pub label: &'static str,
    pub key: StatKey,
    pub unit: &'static str,
    /// Value that reaches the outer ring.
    pub max: f64,
    pub percentage: bool,
    pub lower_is_better: bool,
}

pub const RADAR_AXES: [RadarAxis; 5] = [
    RadarAxis {
        label: "1st Srv %",
        key: StatKey::FirstServe,
        unit: "%",
        max: 1.0,
        percentage: true,
        lower_is_better: false,
    },
    RadarAxis {
        label: "Aces",
        key: StatKey::Aces,
        unit: "avg",
        max: 20.0,
        percentage: false,
        lower_is_better: false,
    },
    RadarAxis {
        label: "DFs",
        key: StatKey::DoubleFaults,
        unit: "avg",
        max: 10.0,
        percentage: false,
        lower_is_better: true,
    },
    RadarAxis {
        label: "BP Conv %",
        key: StatKey::BreakPointsConverted,
        unit: "%",
        max: 1.0,
        percentage: true,
        lower_is_better: false,
    },
    RadarAxis {
        label: "Net Pts Won %",
        key: StatKey::NetPointsWon,
        unit: "%",
        max: 1.0,
        percentage: true,
        lower_is_better: false,
    },
];

impl RadarAxis {
    /// Percentages as a whole number with `%`, counts with one decimal.
    pub fn format(&self, value: f64) -> String {
        if self.percentage {
            format!("{:.0}%", value * 100.0)
        } else {
            format!("{value:.1}")
        }
    }
}

pub fn radar_keys() -> Vec<StatKey> {
    RADAR_AXES.iter().map(|axis| axis.key).collect()
}

/// Everything the radar view can be asked to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuelSelection {
    pub player_a: Option<String>,
    pub player_b: Option<String>,
    pub mirror: bool,
    pub head_to_head: bool,
}

/// Averaged radar values for one player. `player` is `None` for an empty slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RadarSeries {
    pub player: Option<String>,
    pub values: StatAverages,
}

impl RadarSeries {
    fn empty(player: Option<&str>) -> Self {
        Self {
            player: player.map(str::to_string),
            values: RADAR_AXES.iter().map(|axis| (axis.key, 0.0)).collect(),
        }
    }

    pub fn value(&self, axis: &RadarAxis) -> f64 {
        self.values.get(&axis.key).copied().unwrap_or(0.0)
    }

    /// Position along the spoke in `[0, 1]`.
    pub fn normalized(&self, axis: &RadarAxis) -> f64 {
        if axis.max <= 0.0 {
            return 0.0;
        }
        (self.value(axis) / axis.max).clamp(0.0, 1.0)
    }

    /// All-zero series are treated as "no data".
    pub fn has_data(&self) -> bool {
        RADAR_AXES.iter().any(|axis| self.value(axis) != 0.0)
    }
}

/// Result of evaluating a [`DuelSelection`] against the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Duel {
    pub a: RadarSeries,
    pub b: RadarSeries,
    pub status: Option<&'static str>,
    pub mirror: bool,
}

impl Duel {
    /// Opponent series to overlay on a side's chart, if mirror mode is on.
    pub fn overlay_for_a(&self) -> Option<&RadarSeries> {
        (self.mirror && self.b.player.is_some() && self.b.has_data()).then_some(&self.b)
    }

    pub fn overlay_for_b(&self) -> Option<&RadarSeries> {
        (self.mirror && self.a.player.is_some() && self.a.has_data()).then_some(&self.a)
    }
}

pub fn compare(matches: &[MatchRecord], selection: &DuelSelection) -> Duel {
    let a = selection.player_a.as_deref();
    let b = selection.player_b.as_deref();

    let mut status = None;
    let mut subset: Option<Vec<&MatchRecord>> = None;

    if selection.head_to_head {
        match (a, b) {
            (Some(a), Some(b)) if a == b => status = Some(H2H_WITH_SELF),
            (Some(a), Some(b)) => {
                let meetings: Vec<&MatchRecord> = matches.iter().filter(|m| m.is_between(a, b)).collect();
                if meetings.is_empty() {
                    status = Some(NO_H2H_DATA);
                }
                subset = Some(meetings);
            }
            _ => {}
        }
    }

    let keys = radar_keys();
    let series = |player: Option<&str>| match player {
        None => RadarSeries::empty(None),
        Some(name) => {
            let values = match &subset {
                Some(rows) => aggregate(name, rows.iter().copied(), &keys),
                None => aggregate(name, matches, &keys),
            };
            RadarSeries { player: Some(name.to_string()), values }
        }
    };

    Duel {
        a: series(a),
        b: series(b),
        status,
        mirror: selection.mirror,
    }
}

/// True if `primary` beats `secondary` on at least one axis.
pub fn outperforms(primary: &RadarSeries, secondary: &RadarSeries) -> bool {
    RADAR_AXES.iter().any(|axis| {
        let (p, s) = (primary.value(axis), secondary.value(axis));
        if axis.lower_is_better { p < s } else { p > s }
    })
}
