use crate::types::format_match_date;
use crate::utils::{Pacer, retry};

use chrono::NaiveDate;
use reqwest::blocking::Client;
use std::time::Duration;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_ATTEMPTS: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Anything that can produce the match center page for a given day.
pub trait PageSource {
    /// Returns the page body, or `None` when the day has to be skipped.
    fn fetch_page(&self, date: NaiveDate) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub attempts: u32,
    pub backoff: Pacer,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: crate::BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            attempts: DEFAULT_ATTEMPTS,
            backoff: Pacer::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
    config: ScraperConfig,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        Self::with_config(ScraperConfig::default())
    }

    pub fn with_config(config: ScraperConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn match_center_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/match-center/?date={}#days",
            self.config.base_url.trim_end_matches('/'),
            format_match_date(date)
        )
    }

    /// Single attempt at the match center page for `date`.
    pub fn fetch_match_center(&self, date: NaiveDate) -> Result<String, ScraperError> {
        let url = self.match_center_url(date);
        log::debug!("GET {}", url);
        self.get_html(&url)
    }

    fn get_html(&self, url: &str) -> Result<String, ScraperError> {
        Ok(self
            .client
            .get(url)
            .send()
            .inspect_err(|e| log::debug!("HTTP error: {e:?}"))?
            .error_for_status()?
            .text()
            .inspect_err(|e| log::debug!("Decode error: {e:?}"))?)
    }
}

impl PageSource for WebScraper {
    fn fetch_page(&self, date: NaiveDate) -> Option<String> {
        let label = format_match_date(date);
        retry(self.config.attempts, &self.config.backoff, &label, || {
            self.fetch_match_center(date)
        })
    }
}
