mod parser;
pub mod runner;
pub mod scraper;
pub mod types;
pub mod utils;
pub mod writer;

pub use parser::{ParseError, parse_matches};
pub use scraper::{PageSource, ScraperConfig, ScraperError, WebScraper};
pub use types::MatchRecord;

pub(crate) const BASE_URL: &str = "https://www.yallakora.com";

/// Date format used both in the request query and in the `Match Date` column.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

pub const DEFAULT_OUTPUT: &str = "Matches.csv";
