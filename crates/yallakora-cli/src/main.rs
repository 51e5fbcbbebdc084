use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use yallakora::runner::{Mode, fetch_date_range, fetch_single_day};
use yallakora::scraper::{DEFAULT_ATTEMPTS, ScraperConfig, WebScraper};
use yallakora::types::{MatchRecord, parse_match_date};
use yallakora::utils::{MatchStats, Pacer};
use yallakora::writer::save_to_csv;

#[derive(Parser)]
#[command(name = "yallakora")]
#[command(about = "A yallakora.com match center scraper", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(
        short = 'o',
        long = "output",
        default_value = yallakora::DEFAULT_OUTPUT,
        global = true,
        help = "CSV file for --format csv, overwritten (json and text go to stdout)"
    )]
    output: PathBuf,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "csv",
        global = true,
        help = "Output format"
    )]
    format: OutputFormat,

    #[arg(
        long,
        default_value_t = DEFAULT_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..),
        global = true,
        help = "Attempts per date before it is skipped"
    )]
    retries: u32,

    /// Without a subcommand an interactive menu is shown
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch matches for a single day
    Day {
        #[arg(
            long,
            value_name = "MM/DD/YYYY",
            help = "Day to fetch",
            value_parser = parse_date_arg,
        )]
        date: NaiveDate,
    },
    /// Fetch matches for every day of an inclusive date range
    Range {
        #[arg(
            long,
            value_name = "MM/DD/YYYY",
            help = "First day to fetch",
            value_parser = parse_date_arg,
        )]
        start: NaiveDate,

        #[arg(
            long,
            value_name = "MM/DD/YYYY",
            help = "Last day to fetch",
            value_parser = parse_date_arg,
        )]
        end: NaiveDate,
    },
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_match_date(s).map_err(|e| format!("{e}. Expected MM/DD/YYYY"))
}

fn prompt(message: &str) -> String {
    inquire::Text::new(message).prompt().unwrap_or_else(|e| {
        log::error!("Prompt failed: {}", e);
        process::exit(1);
    })
}

fn prompt_date(message: &str) -> NaiveDate {
    let input = prompt(message);
    parse_date_arg(&input).unwrap_or_else(|e| {
        log::error!("Invalid date '{}': {}", input.trim(), e);
        process::exit(1);
    })
}

fn prompt_command() -> Commands {
    println!("\nYalla Kora Match Scraper");
    println!("1. {}", Mode::SingleDay);
    println!("2. {}", Mode::DateRange);

    let choice = prompt("Choose an option (1 or 2):");
    let mode = choice.parse::<Mode>().unwrap_or_else(|e| {
        log::error!("{}", e);
        process::exit(1);
    });

    match mode {
        Mode::SingleDay => Commands::Day {
            date: prompt_date("Enter the date (MM/DD/YYYY):"),
        },
        Mode::DateRange => Commands::Range {
            start: prompt_date("Enter start date (MM/DD/YYYY):"),
            end: prompt_date("Enter end date (MM/DD/YYYY):"),
        },
    }
}

fn serialize_json(matches: &[MatchRecord]) {
    match serde_json::to_string_pretty(matches) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let config = ScraperConfig {
        attempts: cli.retries,
        ..ScraperConfig::default()
    };
    let scraper = WebScraper::with_config(config).unwrap_or_else(|e| {
        log::error!("Error creating scraper: {}", e);
        process::exit(1);
    });

    let command = cli.command.unwrap_or_else(prompt_command);

    let matches = match command {
        Commands::Day { date } => fetch_single_day(&scraper, date),
        Commands::Range { start, end } => {
            fetch_date_range(&scraper, start, end, &Pacer::default())
        }
    };

    match cli.format {
        OutputFormat::Csv => {
            if !matches.is_empty() {
                log::info!("{}", MatchStats::from_matches(&matches));
            }
            save_to_csv(&matches, &cli.output);
        }
        OutputFormat::Json => serialize_json(&matches),
        OutputFormat::Text => {
            if matches.is_empty() {
                println!("No matches to display.");
            } else {
                for (i, record) in matches.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, record);
                }
                print!("{}", MatchStats::from_matches(&matches));
            }
        }
    }
}
