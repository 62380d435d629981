use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tournaments::roster::Roster;

pub mod ballots;
pub mod roster;
pub mod routes;
pub mod snapshots;
pub mod standings;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Identifier of the public share link, if the tournament was shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roster: Option<Roster>,
}
