//! The document exchanged with storage and share links: a tournament, all of
//! its ballots (in insertion order) and the last report computed for them.

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::tournaments::{
    Tournament,
    ballots::{Ballot, slots::Taxonomy},
    standings::compute::AggregatedReport,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSnapshot {
    pub tournament: Tournament,
    #[serde(default)]
    pub ballots: Vec<Ballot>,
    #[serde(default)]
    pub aggregated_data: Option<AggregatedReport>,
}

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Io(e) => write!(f, "could not read snapshot: {e}"),
            ImportError::Json(e) => write!(f, "malformed snapshot: {e}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        ImportError::Io(e)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(e: serde_json::Error) -> Self {
        ImportError::Json(e)
    }
}

impl TournamentSnapshot {
    pub fn new(tournament: Tournament, ballots: Vec<Ballot>) -> Self {
        Self {
            tournament,
            ballots,
            aggregated_data: None,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ImportError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Recomputes the aggregated report from the current ballots.
    pub fn refresh(&mut self, taxonomy: &Taxonomy) -> &AggregatedReport {
        self.aggregated_data.insert(AggregatedReport::compute(
            taxonomy,
            &self.tournament.id,
            &self.ballots,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_snapshot_and_refreshes_its_report() {
        let json = r#"{
            "tournament": {
                "id": "t1",
                "name": "Invitational",
                "createdAt": "2025-01-10T08:00:00Z"
            },
            "ballots": [],
            "aggregatedData": null
        }"#;
        let mut snapshot: TournamentSnapshot =
            serde_json::from_str(json).unwrap();
        assert!(snapshot.tournament.roster.is_none());

        let taxonomy = Taxonomy::standard();
        let report = snapshot.refresh(&taxonomy);
        assert_eq!(report.tournament_id, "t1");
        assert_eq!(report.sides.len(), 2);
        assert!(snapshot.aggregated_data.is_some());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = TournamentSnapshot::load("/definitely/not/here.json")
            .unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
