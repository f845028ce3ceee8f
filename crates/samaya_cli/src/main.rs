mod cli;
mod commands;
mod logging;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Sublord { lon } => commands::sublord(lon),
        Command::Significators { chart, house } => commands::significators(&chart, house),
        Command::Dasha { chart, at } => commands::dasha(&chart, at.as_deref()),
        Command::Timeline { chart, years } => commands::timeline(&chart, years),
        Command::Favorable {
            chart,
            graha,
            from,
            to,
        } => commands::favorable(&chart, graha, &from, &to),
        Command::Transits {
            chart,
            range,
            houses,
            min_confidence,
        } => commands::transits(&chart, &range, &houses, min_confidence),
        Command::Windows {
            chart,
            range,
            event,
        } => commands::windows(&chart, &range, event),
        Command::Predict {
            chart,
            range,
            event,
        } => commands::predict(&chart, &range, event),
        Command::ChartTemplate => commands::chart_template(),
    }
}
