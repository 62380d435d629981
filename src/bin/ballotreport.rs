//! Prints the aggregated report (or a CSV export) for a saved tournament
//! snapshot.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mocktab::{
    config::init_logging,
    tournaments::{
        ballots::{export::ballots_to_csv, slots::Taxonomy},
        snapshots::TournamentSnapshot,
        standings::export::report_to_csv,
    },
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    /// The aggregated report as JSON.
    Json,
    /// The aggregated report as CSV.
    Csv,
    /// One CSV row per ballot.
    Ballots,
}

#[derive(Parser)]
pub struct Args {
    /// Path to a tournament snapshot (JSON).
    snapshot: PathBuf,
    #[clap(long, short, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Where to write the output. Defaults to stdout.
    #[clap(long, short)]
    output: Option<PathBuf>,
    #[clap(long, action)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    });

    let taxonomy = Taxonomy::standard();
    let mut snapshot = TournamentSnapshot::load(&args.snapshot)?;
    tracing::info!(
        tournament = %snapshot.tournament.name,
        ballots = snapshot.ballots.len(),
        "loaded snapshot"
    );
    for ballot in &snapshot.ballots {
        tracing::debug!(
            ballot = %ballot.id,
            round = ballot.round_number,
            team = ballot.team_number_of(ballot.our_side),
            "{}",
            ballot.totals(&taxonomy).summary()
        );
    }

    let out = match args.format {
        Format::Json => {
            serde_json::to_string_pretty(snapshot.refresh(&taxonomy))?
        }
        Format::Csv => report_to_csv(snapshot.refresh(&taxonomy))?,
        Format::Ballots => ballots_to_csv(
            &taxonomy,
            &snapshot.tournament,
            &snapshot.ballots,
        )?,
    };

    match args.output {
        Some(path) => std::fs::write(path, out)?,
        None => println!("{out}"),
    }

    Ok(())
}
