use crate::parser::parse_matches;
use crate::scraper::PageSource;
use crate::types::{MatchRecord, format_match_date};
use crate::utils::Throttle;

use chrono::{Days, NaiveDate};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("Invalid choice. Please enter 1 or 2.")]
pub struct ModeParseError(String);

/// Menu entry picked by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SingleDay,
    DateRange,
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Mode::SingleDay),
            "2" => Ok(Mode::DateRange),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::SingleDay => write!(f, "Fetch matches for a single day"),
            Mode::DateRange => write!(f, "Fetch matches for a date range"),
        }
    }
}

/// Every day from `start` to `end`, both included. Empty when `start > end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |d| d.checked_add_days(Days::new(1)))
        .take_while(move |d| *d <= end)
}

/// Fetches and extracts one day. A skipped fetch contributes no matches.
pub fn fetch_single_day<S: PageSource>(source: &S, date: NaiveDate) -> Vec<MatchRecord> {
    let label = format_match_date(date);
    match source.fetch_page(date) {
        Some(html) => parse_matches(&html, &label),
        None => Vec::new(),
    }
}

/// Fetches every day of the inclusive range in order, pausing between requests.
pub fn fetch_date_range<S: PageSource, T: Throttle>(
    source: &S,
    start: NaiveDate,
    end: NaiveDate,
    throttle: &T,
) -> Vec<MatchRecord> {
    if start > end {
        log::warn!(
            "Start date ({}) is after end date ({}), nothing to fetch",
            format_match_date(start),
            format_match_date(end)
        );
        return Vec::new();
    }

    let mut all_matches = Vec::new();
    for (i, date) in days_between(start, end).enumerate() {
        if i > 0 {
            throttle.pause();
        }

        log::info!("Fetching data for {}...", format_match_date(date));
        let matches = fetch_single_day(source, date);
        log::debug!("{} match(es) on {}", matches.len(), format_match_date(date));
        all_matches.extend(matches);
    }

    all_matches
}
