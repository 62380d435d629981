//! JSON/CSV endpoints over the scoring engine. Every request carries the
//! data it needs; nothing is stored between requests.

use std::collections::HashMap;

use axum::{
    Json,
    extract::State,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    state::AppState,
    tournaments::{
        ballots::{
            export::ballots_to_csv,
            slots::{SlotKey, SlotSpec},
            totals::{Totals, compute_totals},
        },
        roster::apply_roster,
        snapshots::TournamentSnapshot,
        standings::{compute::AggregatedReport, export::report_to_csv},
    },
    util_resp::{StandardResponse, bad_request, csv},
};

pub async fn list_slots(State(state): State<AppState>) -> Json<Vec<SlotSpec>> {
    Json(state.taxonomy.slots().copied().collect())
}

#[derive(Deserialize)]
pub struct TotalsRequest {
    #[serde(default)]
    pub scores: HashMap<SlotKey, u8>,
}

#[tracing::instrument(skip_all)]
pub async fn ballot_totals(
    State(state): State<AppState>,
    Json(req): Json<TotalsRequest>,
) -> Json<Totals> {
    Json(compute_totals(&state.taxonomy, &req.scores))
}

#[tracing::instrument(skip_all)]
pub async fn report(
    State(state): State<AppState>,
    Json(snapshot): Json<TournamentSnapshot>,
) -> Json<AggregatedReport> {
    tracing::debug!(tournament = %snapshot.tournament.id, "computing report");
    Json(AggregatedReport::compute(
        &state.taxonomy,
        &snapshot.tournament.id,
        &snapshot.ballots,
    ))
}

#[tracing::instrument(skip_all)]
pub async fn report_csv(
    State(state): State<AppState>,
    Json(snapshot): Json<TournamentSnapshot>,
) -> StandardResponse {
    let report = AggregatedReport::compute(
        &state.taxonomy,
        &snapshot.tournament.id,
        &snapshot.ballots,
    );
    csv(report_to_csv(&report)?)
}

#[tracing::instrument(skip_all)]
pub async fn ballots_csv(
    State(state): State<AppState>,
    Json(snapshot): Json<TournamentSnapshot>,
) -> StandardResponse {
    csv(ballots_to_csv(
        &state.taxonomy,
        &snapshot.tournament,
        &snapshot.ballots,
    )?)
}

/// Applies the tournament's roster to its ballots and returns the updated
/// snapshot with a freshly computed report.
#[tracing::instrument(skip_all)]
pub async fn update_roster(
    State(state): State<AppState>,
    Json(mut snapshot): Json<TournamentSnapshot>,
) -> StandardResponse {
    let Some(roster) = &snapshot.tournament.roster else {
        return bad_request("this tournament has no roster");
    };

    snapshot.ballots = apply_roster(&state.taxonomy, roster, &snapshot.ballots);
    snapshot.refresh(&state.taxonomy);
    tracing::info!(ballots = snapshot.ballots.len(), "applied roster");

    Ok(Json(snapshot).into_response())
}
