use crate::MatchRecord;
use std::collections::BTreeMap;

/// National-olympic-committee codes (as used by the dataset) whose ISO-3166
/// alpha-3 code differs. Everything else is assumed to already be ISO.
pub const IOC_TO_ISO: &[(&str, &str)] = &[
    ("BUL", "BGR"),
    ("CHI", "CHL"),
    ("CRO", "HRV"),
    ("DEN", "DNK"),
    ("GER", "DEU"),
    ("GRE", "GRC"),
    ("LAT", "LVA"),
    ("NED", "NLD"),
    ("POR", "PRT"),
    ("RSA", "ZAF"),
    ("SLO", "SVN"),
    ("SUI", "CHE"),
    ("TPE", "TWN"),
];

pub fn normalize_country(code: &str) -> String {
    let code = code.trim();
    IOC_TO_ISO
        .iter()
        .find(|(ioc, _)| *ioc == code)
        .map(|(_, iso)| iso.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Cumulative match wins per ISO country code, indexed by year.
///
/// The count for a year includes every earlier year in the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WinsByCountry {
    by_year: BTreeMap<u16, BTreeMap<String, u32>>,
}

impl WinsByCountry {
    pub fn from_matches(matches: &[MatchRecord]) -> Self {
        let mut yearly: BTreeMap<u16, BTreeMap<String, u32>> = BTreeMap::new();
        for record in matches {
            let entry = yearly.entry(record.year).or_default();
            let country = normalize_country(record.winner_country());
            if country.is_empty() {
                continue;
            }
            *entry.entry(country).or_default() += 1;
        }

        let mut running: BTreeMap<String, u32> = BTreeMap::new();
        let by_year = yearly
            .into_iter()
            .map(|(year, counts)| {
                for (country, wins) in counts {
                    *running.entry(country).or_default() += wins;
                }
                (year, running.clone())
            })
            .collect();

        Self { by_year }
    }

    pub fn years(&self) -> Vec<u16> {
        self.by_year.keys().copied().collect()
    }

    /// `None` means the country has no recorded wins up to `year`.
    pub fn wins(&self, year: u16, code: &str) -> Option<u32> {
        self.by_year.get(&year)?.get(code).copied()
    }

    /// Countries by descending wins; ties broken by code.
    pub fn ranking(&self, year: u16) -> Vec<(String, u32)> {
        let Some(counts) = self.by_year.get(&year) else {
            return Vec::new();
        };
        let mut ranked: Vec<(String, u32)> = counts.iter().map(|(c, w)| (c.clone(), *w)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }

    pub fn max(&self, year: u16) -> u32 {
        self.by_year
            .get(&year)
            .and_then(|counts| counts.values().copied().max())
            .unwrap_or(0)
    }
}

/// Sequential yellow -> orange -> red ramp over `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    max: f64,
}

/// Fill for countries without data.
pub const NO_DATA_RGB: (u8, u8, u8) = (0xee, 0xee, 0xee);

const STOPS: [(u8, u8, u8); 5] = [
    (255, 255, 204),
    (254, 217, 118),
    (253, 141, 60),
    (227, 26, 28),
    (128, 0, 38),
];

impl ColorScale {
    /// A zero maximum is widened to 1 so the ramp stays defined.
    pub fn sequential(max: u32) -> Self {
        Self { max: f64::from(max.max(1)) }
    }

    pub fn rgb(&self, value: u32) -> (u8, u8, u8) {
        let t = (f64::from(value) / self.max).clamp(0.0, 1.0);
        let scaled = t * (STOPS.len() - 1) as f64;
        let lower = (scaled.floor() as usize).min(STOPS.len() - 2);
        let frac = scaled - lower as f64;
        let (a, b) = (STOPS[lower], STOPS[lower + 1]);
        (lerp(a.0, b.0, frac), lerp(a.1, b.1, frac), lerp(a.2, b.2, frac))
    }

    pub fn rgb_or_no_data(&self, value: Option<u32>) -> (u8, u8, u8) {
        value.map_or(NO_DATA_RGB, |v| self.rgb(v))
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(year: u16, c1: &str, c2: &str, first_wins: bool) -> MatchRecord {
        MatchRecord {
            year,
            player1: "P1".into(),
            player2: "P2".into(),
            winner: if first_wins { "P1" } else { "P2" }.into(),
            country1: c1.into(),
            country2: c2.into(),
            ..Default::default()
        }
    }

    #[test]
    fn ioc_codes_are_normalized() {
        assert_eq!(normalize_country("SUI"), "CHE");
        assert_eq!(normalize_country("GER"), "DEU");
        assert_eq!(normalize_country("SLO"), "SVN");
        assert_eq!(normalize_country("ESP"), "ESP");
        assert_eq!(normalize_country(" XYZ "), "XYZ");
    }

    #[test]
    fn counts_winner_country_and_accumulates() {
        let matches = vec![
            win(2018, "SUI", "ESP", true),
            win(2018, "SUI", "ESP", false),
            win(2018, "SRB", "ESP", false),
            win(2019, "SRB", "SUI", true),
            win(2020, "AUS", "SUI", false),
        ];
        let wins = WinsByCountry::from_matches(&matches);
        assert_eq!(wins.years(), vec![2018, 2019, 2020]);

        assert_eq!(wins.wins(2018, "CHE"), Some(1));
        assert_eq!(wins.wins(2018, "ESP"), Some(2));
        assert_eq!(wins.wins(2018, "SRB"), None);

        assert_eq!(wins.wins(2019, "SRB"), Some(1));
        assert_eq!(wins.wins(2019, "ESP"), Some(2));

        assert_eq!(wins.wins(2020, "CHE"), Some(2));
        assert_eq!(wins.wins(2020, "AUS"), None);
        assert_eq!(wins.wins(2020, "SUI"), None);
    }

    #[test]
    fn ranking_is_descending_with_code_tiebreak() {
        let matches = vec![
            win(2018, "ESP", "X", true),
            win(2018, "ESP", "X", true),
            win(2018, "SRB", "X", true),
            win(2018, "AUS", "X", true),
        ];
        let wins = WinsByCountry::from_matches(&matches);
        let ranking = wins.ranking(2018);
        assert_eq!(
            ranking,
            vec![("ESP".to_string(), 2), ("AUS".to_string(), 1), ("SRB".to_string(), 1)]
        );
        assert_eq!(wins.max(2018), 2);
        assert_eq!(wins.max(1999), 0);
        assert!(wins.ranking(1999).is_empty());
    }

    #[test]
    fn year_without_wins_still_listed() {
        let matches = vec![win(2017, "ESP", "X", true), win(2018, "", "", true)];
        let wins = WinsByCountry::from_matches(&matches);
        assert_eq!(wins.years(), vec![2017, 2018]);
        assert_eq!(wins.wins(2018, "ESP"), Some(1));
    }

    #[test]
    fn color_scale_spans_yellow_to_red() {
        let scale = ColorScale::sequential(100);
        assert_eq!(scale.rgb(0), STOPS[0]);
        assert_eq!(scale.rgb(100), STOPS[4]);
        assert_eq!(scale.rgb(500), STOPS[4]);
        assert_eq!(scale.rgb(50), STOPS[2]);
        assert_eq!(scale.rgb_or_no_data(None), NO_DATA_RGB);
    }

    #[test]
    fn zero_max_does_not_divide_by_zero() {
        let scale = ColorScale::sequential(0);
        assert_eq!(scale.rgb(0), STOPS[0]);
    }
}
