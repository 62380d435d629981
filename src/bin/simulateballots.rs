//! Generates a tournament snapshot full of plausible ballots, for trying out
//! the report and exports.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::Parser;
use mocktab::{
    config::init_logging,
    tournaments::{
        Tournament,
        ballots::{
            Ballot, ScoredSlot, Side,
            slots::{Category, Taxonomy},
        },
        roster::{Attorneys, Roster, SideRoster},
        snapshots::TournamentSnapshot,
    },
};
use rand::{Rng, SeedableRng, distr::Uniform};
use rand_chacha::ChaCha20Rng;
use uuid::Uuid;

#[derive(Parser)]
pub struct Simulate {
    #[clap(long, short, default_value_t = 8)]
    ballots: u32,
    /// Seed for the generator. Random if not given.
    #[clap(long, short)]
    seed: Option<u64>,
    #[clap(long, short)]
    output: Option<PathBuf>,
}

fn side_roster(prefix: &str) -> SideRoster {
    SideRoster {
        attorneys: Attorneys {
            opener: format!("{prefix} Opener"),
            middle: format!("{prefix} Middle"),
            closer: format!("{prefix} Closer"),
        },
        witnesses: [1, 2, 3].map(|n| format!("{prefix} Witness {n}")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(tracing::Level::INFO);
    let args = Simulate::parse();

    let mut rng = match args.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_os_rng(),
    };
    let score_dist = Uniform::new_inclusive(4u8, 10)?;

    let taxonomy = Taxonomy::standard();
    let roster = Roster {
        team_number: "1127".to_string(),
        prosecution: side_roster("Pros."),
        defense: side_roster("Def."),
    };

    let tournament = Tournament {
        id: Uuid::now_v7().to_string(),
        name: "Simulated Invitational".to_string(),
        created_at: Utc::now(),
        share_id: Some(Uuid::new_v4().to_string()),
        roster: Some(roster.clone()),
    };

    let ballots = (0..args.ballots)
        .map(|i| {
            let id = Uuid::now_v7().to_string();
            let our_side = if i % 2 == 0 {
                Side::Prosecution
            } else {
                Side::Defense
            };
            let ours = roster.of_side(our_side);
            let attorneys = [
                &ours.attorneys.opener,
                &ours.attorneys.middle,
                &ours.attorneys.closer,
            ];

            let scores = taxonomy
                .slots()
                .map(|spec| {
                    let name = (spec.side == our_side).then(|| {
                        match spec.category {
                            Category::OpeningStatement => {
                                ours.attorneys.opener.clone()
                            }
                            Category::ClosingStatement => {
                                ours.attorneys.closer.clone()
                            }
                            // any of the three may take an examination
                            Category::DirectAttorney
                            | Category::CrossAttorney => {
                                attorneys[rng.random_range(0..3)].clone()
                            }
                            Category::DirectWitness
                            | Category::CrossWitness => {
                                let seq = spec.seq.unwrap_or(1) as usize;
                                ours.witnesses[seq - 1].clone()
                            }
                        }
                    });
                    ScoredSlot {
                        ballot_id: id.clone(),
                        side: spec.side,
                        key: spec.key,
                        score: rng.sample(&score_dist),
                        name,
                    }
                })
                .collect();

            Ballot {
                id,
                tournament_id: tournament.id.clone(),
                round_number: i / 2 + 1,
                judge_name: format!("Judge {}", i + 1),
                prosecution_team_number: if our_side == Side::Prosecution {
                    roster.team_number.clone()
                } else {
                    format!("{}", rng.random_range(1000..2000))
                },
                defense_team_number: if our_side == Side::Defense {
                    roster.team_number.clone()
                } else {
                    format!("{}", rng.random_range(1000..2000))
                },
                our_side,
                created_at: tournament.created_at
                    + Duration::minutes(i as i64 * 90),
                scores,
            }
        })
        .collect();

    let mut snapshot = TournamentSnapshot::new(tournament, ballots);
    snapshot.refresh(&taxonomy);
    tracing::info!(ballots = snapshot.ballots.len(), "simulated ballots");

    let out = serde_json::to_string_pretty(&snapshot)?;
    match args.output {
        Some(path) => std::fs::write(path, out)?,
        None => println!("{out}"),
    }

    Ok(())
}
