use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::DATE_FORMAT;

pub const NO_CHAMPIONSHIP: &str = "No Championship Name";
pub const NO_TEAM_A: &str = "No Team A";
pub const NO_TEAM_B: &str = "No Team B";
pub const NOT_PLAYED: &str = "Not played yet";
pub const NO_TIME: &str = "Not available";

/// One fixture as listed on the match center page.
///
/// Field order is the column order of the CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "Match Date")]
    pub match_date: String,
    #[serde(rename = "Championship")]
    pub championship: String,
    #[serde(rename = "Team A")]
    pub team_a: String,
    #[serde(rename = "Team B")]
    pub team_b: String,
    #[serde(rename = "Score")]
    pub score: String,
    #[serde(rename = "Time")]
    pub time: String,
}

impl MatchRecord {
    pub fn is_played(&self) -> bool {
        self.score != NOT_PLAYED
    }
}

impl Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}: {} vs {} ({}, {})",
            self.match_date, self.championship, self.team_a, self.team_b, self.score, self.time
        )
    }
}

pub fn format_match_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_match_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}
