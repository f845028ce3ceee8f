use std::path::PathBuf;

use clap::{Parser, Subcommand};
use samaya_search::EventType;
use samaya_vedic_base::Graha;

/// Samaya syncretic timing engine.
#[derive(Parser)]
#[command(
    name = "samaya",
    version,
    about = "KP, Vimshottari and transit timing from a natal chart"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// KP sub-lord of a sidereal longitude
    Sublord {
        /// Sidereal ecliptic longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Ranked significators of one house
    Significators {
        /// Chart JSON file
        chart: PathBuf,
        /// House number (1-12)
        house: u8,
    },
    /// Mahadasha, antardasha and pratyantardasha at a date
    Dasha {
        /// Chart JSON file
        chart: PathBuf,
        /// Query date (YYYY-MM-DD or RFC 3339), defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Mahadasha/antardasha phases from birth
    Timeline {
        /// Chart JSON file
        chart: PathBuf,
        /// Years to cover from birth
        #[arg(long, default_value = "120")]
        years: f64,
    },
    /// Months in which a graha rules an active dasha level
    Favorable {
        /// Chart JSON file
        chart: PathBuf,
        /// Target graha (English or Sanskrit name)
        #[arg(long)]
        graha: Graha,
        /// Range start (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        from: String,
        /// Range end (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        to: String,
    },
    /// Daily transit activations of natal significators
    Transits {
        /// Chart JSON file
        chart: PathBuf,
        #[command(flatten)]
        range: RangeArgs,
        /// Houses to scan, comma separated (default: all)
        #[arg(long, value_delimiter = ',')]
        houses: Vec<u8>,
        /// Drop events below this combined confidence
        #[arg(long, default_value = "0.5")]
        min_confidence: f64,
    },
    /// Activation windows for an event type
    Windows {
        /// Chart JSON file
        chart: PathBuf,
        #[command(flatten)]
        range: RangeArgs,
        /// Event type (marriage, career, health, ...)
        #[arg(long)]
        event: Option<EventType>,
    },
    /// Synthesized KP, dasha and transit prediction
    Predict {
        /// Chart JSON file
        chart: PathBuf,
        #[command(flatten)]
        range: RangeArgs,
        /// Event type (marriage, career, health, ...)
        #[arg(long)]
        event: Option<EventType>,
    },
    /// Print an example chart JSON
    ChartTemplate,
}

/// Scan start, length and tuning shared by the search subcommands.
#[derive(clap::Args)]
pub struct RangeArgs {
    /// Start date (YYYY-MM-DD or RFC 3339), defaults to today
    #[arg(long)]
    pub from: Option<String>,
    /// Number of days to cover
    #[arg(long, default_value = "30")]
    pub days: i64,
    /// Synthesis TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Scan days on the rayon pool
    #[arg(long)]
    pub parallel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_transit_houses() {
        let cli = Cli::try_parse_from([
            "samaya", "-vv", "transits", "chart.json", "--from", "2026-01-01", "--days", "10",
            "--houses", "7,10",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Transits { houses, range, .. } => {
                assert_eq!(houses, vec![7, 10]);
                assert_eq!(range.days, 10);
                assert_eq!(range.from.as_deref(), Some("2026-01-01"));
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn parses_event_type() {
        let cli =
            Cli::try_parse_from(["samaya", "windows", "c.json", "--event", "Marriage"]).unwrap();
        match cli.command {
            Command::Windows { event, .. } => assert_eq!(event, Some(EventType::Marriage)),
            _ => panic!("wrong subcommand"),
        }
        assert!(Cli::try_parse_from(["samaya", "windows", "c.json", "--event", "lottery"]).is_err());
    }

    #[test]
    fn negative_longitude_accepted() {
        let cli = Cli::try_parse_from(["samaya", "sublord", "-10.5"]).unwrap();
        match cli.command {
            Command::Sublord { lon } => assert!((lon + 10.5).abs() < 1e-12),
            _ => panic!("wrong subcommand"),
        }
    }
}
