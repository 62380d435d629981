//! Per-ballot CSV export.

use std::fmt;

use itertools::Itertools;

use crate::tournaments::{
    Tournament,
    ballots::{Ballot, slots::Taxonomy},
};

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Encoding(std::string::FromUtf8Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Csv(e) => write!(f, "failed to write csv: {e}"),
            ExportError::Encoding(e) => {
                write!(f, "csv output was not valid utf-8: {e}")
            }
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e)
    }
}

impl<W> From<csv::IntoInnerError<W>> for ExportError {
    fn from(e: csv::IntoInnerError<W>) -> Self {
        ExportError::Csv(csv::Error::from(e.into_error()))
    }
}

impl From<std::string::FromUtf8Error> for ExportError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        ExportError::Encoding(e)
    }
}

pub(crate) fn writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

pub(crate) fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

const HEADER_PREFIX: [&str; 10] = [
    "tournamentName",
    "roundNumber",
    "judgeName",
    "prosecutionTeamNumber",
    "defenseTeamNumber",
    "ourSide",
    "prosecutionTotal",
    "defenseTotal",
    "winner",
    "diff",
];

/// Exports one row per ballot.
///
/// Every row carries the ballot header and totals, then all 28 scores in
/// catalog order, then 28 name columns in catalog order. Name columns for
/// the side we did not argue are always blank.
pub fn ballots_to_csv(
    taxonomy: &Taxonomy,
    tournament: &Tournament,
    ballots: &[Ballot],
) -> Result<String, ExportError> {
    let mut wtr = writer();

    let header = HEADER_PREFIX
        .iter()
        .map(|h| h.to_string())
        .chain(taxonomy.slots().map(|spec| spec.key.label().to_string()))
        .chain(
            taxonomy
                .slots()
                .map(|spec| format!("{}_name", spec.key.label())),
        )
        .collect_vec();
    wtr.write_record(&header)?;

    for ballot in ballots {
        let scores = ballot.score_map();
        let totals = ballot.totals(taxonomy);

        let mut row = vec![
            tournament.name.clone(),
            ballot.round_number.to_string(),
            ballot.judge_name.clone(),
            ballot.prosecution_team_number.clone(),
            ballot.defense_team_number.clone(),
            ballot.our_side.short().to_string(),
            totals.prosecution_total.to_string(),
            totals.defense_total.to_string(),
            totals.winner.to_string(),
            totals.diff.to_string(),
        ];
        row.extend(taxonomy.slots().map(|spec| {
            scores
                .get(&spec.key)
                .map(|score| score.to_string())
                .unwrap_or_default()
        }));
        row.extend(taxonomy.slots().map(|spec| {
            if spec.side == ballot.our_side {
                ballot
                    .name_of(taxonomy, spec.key)
                    .unwrap_or_default()
                    .to_string()
            } else {
                String::new()
            }
        }));

        tracing::trace!(ballot = %ballot.id, "exporting ballot row");
        wtr.write_record(&row)?;
    }

    finish(wtr)
}
