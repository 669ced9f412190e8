/// Raw CSV row shape for the match dataset. Every column is read as text so a
/// single odd cell never fails the whole file; conversion into the clean
/// [`MatchRecord`] decides what is usable.
use crate::{Gender, MatchRecord, Round, Slot, StatKey};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct RawMatchRow {
    pub year: String,
    pub gender: String,
    pub round: String,
    pub player1: String,
    pub player2: String,
    pub winner: String,
    pub country1: String,
    pub country2: String,
    pub results: String,

    pub first_serve1: String,
    pub first_serve2: String,
    pub ace1: String,
    pub ace2: String,
    pub double1: String,
    pub double2: String,
    pub first_point_won1: String,
    pub first_point_won2: String,
    pub sec_point_won1: String,
    pub sec_point_won2: String,
    pub fast_serve1: String,
    pub fast_serve2: String,
    pub avg_first_serve1: String,
    pub avg_first_serve2: String,
    pub avg_sec_serve1: String,
    pub avg_sec_serve2: String,
    pub break1: String,
    pub break2: String,
    pub return1: String,
    pub return2: String,
    pub total1: String,
    pub total2: String,
    pub winner1: String,
    pub winner2: String,
    pub error1: String,
    pub error2: String,
    pub net1: String,
    pub net2: String,
}

impl RawMatchRow {
    fn stat(&self, key: StatKey, slot: Slot) -> &str {
        let (one, two) = match key {
            StatKey::FirstServe => (&self.first_serve1, &self.first_serve2),
            StatKey::Aces => (&self.ace1, &self.ace2),
            StatKey::DoubleFaults => (&self.double1, &self.double2),
            StatKey::FirstServePointsWon => (&self.first_point_won1, &self.first_point_won2),
            StatKey::SecondServePointsWon => (&self.sec_point_won1, &self.sec_point_won2),
            StatKey::FastestServe => (&self.fast_serve1, &self.fast_serve2),
            StatKey::AvgFirstServeSpeed => (&self.avg_first_serve1, &self.avg_first_serve2),
            StatKey::AvgSecondServeSpeed => (&self.avg_sec_serve1, &self.avg_sec_serve2),
            StatKey::BreakPointsConverted => (&self.break1, &self.break2),
            StatKey::ReturnPointsWon => (&self.return1, &self.return2),
            StatKey::TotalPointsWon => (&self.total1, &self.total2),
            StatKey::Winners => (&self.winner1, &self.winner2),
            StatKey::Errors => (&self.error1, &self.error2),
            StatKey::NetPointsWon => (&self.net1, &self.net2),
        };
        match slot {
            Slot::One => one,
            Slot::Two => two,
        }
    }
}

/// Why a row was left out of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum RowRejection {
    Year(String),
    Gender(String),
    Round(String),
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::Year(v) => write!(f, "unreadable year {v:?}"),
            RowRejection::Gender(v) => write!(f, "unknown gender {v:?}"),
            RowRejection::Round(v) => write!(f, "unknown round {v:?}"),
        }
    }
}

impl TryFrom<RawMatchRow> for MatchRecord {
    type Error = RowRejection;

    fn try_from(row: RawMatchRow) -> Result<Self, Self::Error> {
        let year = row
            .year
            .trim()
            .parse::<u16>()
            .map_err(|_| RowRejection::Year(row.year.clone()))?;
        let gender = Gender::parse(&row.gender).ok_or_else(|| RowRejection::Gender(row.gender.clone()))?;
        let round = Round::parse(&row.round).ok_or_else(|| RowRejection::Round(row.round.clone()))?;

        let stats: BTreeMap<StatKey, [String; 2]> = StatKey::ALL
            .iter()
            .map(|&key| {
                let pair = [
                    row.stat(key, Slot::One).to_string(),
                    row.stat(key, Slot::Two).to_string(),
                ];
                (key, pair)
            })
            .collect();

        Ok(MatchRecord {
            year,
            gender,
            round,
            player1: row.player1.trim().to_string(),
            player2: row.player2.trim().to_string(),
            winner: row.winner.trim().to_string(),
            country1: row.country1.trim().to_string(),
            country2: row.country2.trim().to_string(),
            stats,
            results: row.results.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RawMatchRow {
        RawMatchRow {
            year: "2019".into(),
            gender: "m".into(),
            round: "semi".into(),
            player1: " Rafael Nadal ".into(),
            player2: "Stefanos Tsitsipas".into(),
            winner: "Rafael Nadal".into(),
            country1: "ESP".into(),
            country2: "GRE".into(),
            results: "6-2 6-4 6-0".into(),
            ace1: "4".into(),
            ace2: "8".into(),
            break1: "60%".into(),
            break2: "-".into(),
            ..Default::default()
        }
    }

    #[test]
    fn converts_a_complete_row() {
        let record = MatchRecord::try_from(row()).unwrap();
        assert_eq!(record.year, 2019);
        assert_eq!(record.gender, Gender::Men);
        assert_eq!(record.round, Round::Semifinal);
        assert_eq!(record.player1, "Rafael Nadal");
        assert_eq!(record.winner_country(), "ESP");
        assert_eq!(record.raw_stat(StatKey::Aces, Slot::Two), Some("8"));
        assert_eq!(record.raw_stat(StatKey::BreakPointsConverted, Slot::One), Some("60%"));
        assert_eq!(record.raw_stat(StatKey::NetPointsWon, Slot::One), Some(""));
    }

    #[test]
    fn rejects_unreadable_keys() {
        let mut bad_year = row();
        bad_year.year = "twenty".into();
        assert_eq!(
            MatchRecord::try_from(bad_year),
            Err(RowRejection::Year("twenty".into()))
        );

        let mut bad_round = row();
        bad_round.round = "qualifying".into();
        assert!(matches!(MatchRecord::try_from(bad_round), Err(RowRejection::Round(_))));

        let mut bad_gender = row();
        bad_gender.gender = "".into();
        assert!(matches!(MatchRecord::try_from(bad_gender), Err(RowRejection::Gender(_))));
    }

    #[test]
    fn csv_headers_map_onto_fields() {
        let data = "year,gender,round,player1,player2,winner,firstServe1,secPointWon2,break1,return2\n\
                    2020,w,Final,A,B,A,55%,40%,3/5,12\n";
        let mut reader = csv::ReaderBuilder::new().from_reader(data.as_bytes());
        let parsed: RawMatchRow = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(parsed.first_serve1, "55%");
        assert_eq!(parsed.sec_point_won2, "40%");
        assert_eq!(parsed.break1, "3/5");
        assert_eq!(parsed.return2, "12");
        assert_eq!(parsed.country1, "");
    }
}
