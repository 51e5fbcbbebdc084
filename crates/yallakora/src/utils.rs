use crate::types::MatchRecord;

use rand::Rng;
use std::collections::HashSet;
use std::fmt::Display;
use std::thread;
use std::time::Duration;

pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(1);

/// Uniformly random pause in `[0, max_delay)`, used between requests and
/// before retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    max_delay: Duration,
}

impl Pacer {
    pub fn new(max_delay: Duration) -> Self {
        Self { max_delay }
    }

    /// A pacer that never sleeps.
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn next_delay(&self) -> Duration {
        if self.max_delay.is_zero() {
            return Duration::ZERO;
        }
        let secs = rand::thread_rng().gen_range(0.0..self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

/// Something that holds the run back between consecutive requests.
pub trait Throttle {
    /// Blocks for a while and returns how long.
    fn pause(&self) -> Duration;
}

impl Throttle for Pacer {
    fn pause(&self) -> Duration {
        let delay = self.next_delay();
        log::info!(
            "Waiting {:.2} seconds before the next request...",
            delay.as_secs_f64()
        );
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        delay
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELAY)
    }
}

/// Runs `op` up to `attempts` times, pausing with `backoff` between failures.
///
/// Every failure is logged. Returns `None` once the attempts are exhausted.
pub fn retry<T, E, F>(attempts: u32, backoff: &Pacer, label: &str, mut op: F) -> Option<T>
where
    E: Display,
    F: FnMut() -> Result<T, E>,
{
    for attempt in 1..=attempts {
        match op() {
            Ok(value) => return Some(value),
            Err(e) => {
                log::warn!("Error fetching data for {}: {}", label, e);
                if attempt < attempts {
                    let wait = backoff.next_delay();
                    log::info!("Retrying in {:.2} seconds...", wait.as_secs_f64());
                    thread::sleep(wait);
                } else {
                    log::error!("Maximum retries reached. Skipping {}.", label);
                }
            }
        }
    }
    None
}

#[derive(Debug, PartialEq, Eq)]
pub struct MatchStats {
    pub championships: usize,
    pub played: usize,
    pub not_played: usize,
    pub total: usize,
}

impl MatchStats {
    pub fn from_matches(matches: &[MatchRecord]) -> MatchStats {
        let played = matches.iter().filter(|m| m.is_played()).count();
        MatchStats {
            championships: matches
                .iter()
                .map(|m| m.championship.as_str())
                .collect::<HashSet<_>>()
                .len(),
            played,
            not_played: matches.len() - played,
            total: matches.len(),
        }
    }
}

impl Display for MatchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Championships:  {}", self.championships)?;
        writeln!(f, "  Played:         {}", self.played)?;
        writeln!(f, "  Not played yet: {}", self.not_played)?;
        writeln!(f, "  Total:          {}", self.total)
    }
}
