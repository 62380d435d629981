use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tournaments::{
    ballots::{Ballot, Side, slots::Taxonomy},
    standings::compute::{
        metrics::{SideStatistics, StatBuckets, average, ingest_side},
        roles::{RoleMap, assign_roles},
    },
};

pub mod metrics;
pub mod roles;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    OpeningAttorney,
    MiddleAttorney,
    ClosingAttorney,
    /// Witness number (1-3).
    Witness(u8),
}

impl Role {
    pub fn is_witness(&self) -> bool {
        matches!(self, Role::Witness(_))
    }

    pub fn gives_statement(&self) -> bool {
        matches!(self, Role::OpeningAttorney | Role::ClosingAttorney)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::OpeningAttorney => f.write_str("Opening attorney"),
            Role::MiddleAttorney => f.write_str("Middle attorney"),
            Role::ClosingAttorney => f.write_str("Closing attorney"),
            Role::Witness(n) => write!(f, "Witness {n}"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Report row for one role on one side. `None` means there were no samples.
pub struct AggregatedEntry {
    pub role: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_direct: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_cross: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_statement: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement_pickup: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_pickup: Option<Decimal>,
}

impl AggregatedEntry {
    fn new(role: Role, name: &str, stats: &StatBuckets) -> Self {
        let (direct, cross) = if role.is_witness() {
            (&stats.witness_direct, &stats.witness_cross)
        } else {
            (&stats.direct, &stats.cross)
        };

        Self {
            role: role.to_string(),
            name: name.to_string(),
            avg_direct: average(direct),
            avg_cross: average(cross),
            avg_statement: role
                .gives_statement()
                .then(|| average(&stats.statement))
                .flatten(),
            statement_pickup: role
                .gives_statement()
                .then(|| average(&stats.statement_pickups))
                .flatten(),
            cross_pickup: average(&stats.cross_pickups),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SideReport {
    pub side: Side,
    pub entries: Vec<AggregatedEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedReport {
    pub tournament_id: String,
    pub generated_at: DateTime<Utc>,
    /// Prosecution first, then defense.
    pub sides: Vec<SideReport>,
}

impl AggregatedReport {
    /// Recomputes the report for a tournament from scratch.
    pub fn compute(
        taxonomy: &Taxonomy,
        tournament_id: &str,
        ballots: &[Ballot],
    ) -> Self {
        Self::compute_at(taxonomy, tournament_id, ballots, Utc::now())
    }

    #[tracing::instrument(
        skip(taxonomy, ballots),
        fields(num_ballots = ballots.len())
    )]
    pub fn compute_at(
        taxonomy: &Taxonomy,
        tournament_id: &str,
        ballots: &[Ballot],
        generated_at: DateTime<Utc>,
    ) -> Self {
        let sides = [Side::Prosecution, Side::Defense]
            .into_iter()
            .map(|side| SideReport {
                side,
                entries: side_entries(taxonomy, ballots, side),
            })
            .collect();

        Self {
            tournament_id: tournament_id.to_string(),
            generated_at,
            sides,
        }
    }

    pub fn side(&self, side: Side) -> Option<&SideReport> {
        self.sides.iter().find(|s| s.side == side)
    }
}

/// The report rows for one side, in role order. Roles nobody was found for
/// are left out.
pub fn side_entries(
    taxonomy: &Taxonomy,
    ballots: &[Ballot],
    side: Side,
) -> Vec<AggregatedEntry> {
    let roles = assign_roles(taxonomy, ballots, side);
    let stats = ingest_side(taxonomy, ballots, side);

    let entries = entries_of(&roles, &stats);
    tracing::debug!(
        side = %side,
        entries = entries.len(),
        competitors = stats.0.len(),
        "aggregated side"
    );
    entries
}

fn entries_of(roles: &RoleMap, stats: &SideStatistics) -> Vec<AggregatedEntry> {
    let empty = StatBuckets::default();

    let attorneys = [
        (Role::OpeningAttorney, &roles.opener),
        (Role::MiddleAttorney, &roles.middle),
        (Role::ClosingAttorney, &roles.closer),
    ];
    let attorneys = attorneys
        .into_iter()
        .filter_map(|(role, name)| name.as_deref().map(|name| (role, name)));
    let witnesses = roles
        .witnesses
        .iter()
        .enumerate()
        .map(|(idx, name)| (Role::Witness(idx as u8 + 1), name.as_str()));

    attorneys
        .chain(witnesses)
        .map(|(role, name)| {
            AggregatedEntry::new(role, name, stats.of(name).unwrap_or(&empty))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::TimeZone;
    use itertools::Itertools;

    use super::*;
    use crate::tournaments::ballots::{
        fixtures::{set, uniform_ballot},
        slots::SlotKey,
    };

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn no_ballots_means_no_entries() {
        let taxonomy = Taxonomy::standard();
        let report = AggregatedReport::compute_at(&taxonomy, "t", &[], at());
        assert_eq!(report.sides.len(), 2);
        assert_eq!(report.sides[0].side, Side::Prosecution);
        assert_eq!(report.sides[1].side, Side::Defense);
        assert!(report.sides.iter().all(|s| s.entries.is_empty()));
    }

    #[test]
    fn full_side_produces_six_rows_in_role_order() {
        let taxonomy = Taxonomy::standard();
        let mut b = uniform_ballot(&taxonomy, Side::Prosecution, 6);
        set(&mut b, SlotKey::POpen, 8, "Alice");
        set(&mut b, SlotKey::PDirect1Attorney, 7, "Mo");
        set(&mut b, SlotKey::PCross1Attorney, 9, "Mo");
        set(&mut b, SlotKey::PClose, 5, "Cara");
        set(&mut b, SlotKey::PDirect1Witness, 8, "Wendy");
        set(&mut b, SlotKey::PCross1Witness, 7, "Wendy");
        set(&mut b, SlotKey::PDirect2Witness, 6, "Xavier");
        set(&mut b, SlotKey::PDirect3Witness, 6, "Yara");

        let report = AggregatedReport::compute_at(&taxonomy, "t", &[b], at());
        let entries = &report.side(Side::Prosecution).unwrap().entries;
        assert_eq!(
            entries.iter().map(|e| e.role.as_str()).collect_vec(),
            vec![
                "Opening attorney",
                "Middle attorney",
                "Closing attorney",
                "Witness 1",
                "Witness 2",
                "Witness 3",
            ]
        );
        assert!(report.side(Side::Defense).unwrap().entries.is_empty());

        let alice = &entries[0];
        assert_eq!(alice.avg_statement, Some(dec("8")));
        assert_eq!(alice.statement_pickup, Some(dec("2")));
        assert_eq!(alice.avg_direct, None);

        let mo = &entries[1];
        assert_eq!(mo.name, "Mo");
        assert_eq!(mo.avg_direct, Some(dec("7")));
        assert_eq!(mo.avg_cross, Some(dec("9")));
        // D. Cross 1: Witness scored 6
        assert_eq!(mo.cross_pickup, Some(dec("3")));
        assert_eq!(mo.avg_statement, None);
        assert_eq!(mo.statement_pickup, None);

        let cara = &entries[2];
        assert_eq!(cara.statement_pickup, Some(dec("-1")));

        let wendy = &entries[3];
        assert_eq!(wendy.avg_direct, Some(dec("8")));
        assert_eq!(wendy.avg_cross, Some(dec("7")));
        // D. Cross 1: Attorney scored 6
        assert_eq!(wendy.cross_pickup, Some(dec("1")));
        assert_eq!(wendy.avg_statement, None);

        let xavier = &entries[4];
        assert_eq!(xavier.avg_cross, None);
        assert_eq!(xavier.cross_pickup, None);
    }

    #[test]
    fn absent_roles_are_omitted_not_padded() {
        let taxonomy = Taxonomy::standard();
        let mut b = uniform_ballot(&taxonomy, Side::Defense, 6);
        set(&mut b, SlotKey::DClose, 8, "Cleo");
        set(&mut b, SlotKey::DDirect2Witness, 8, "Wes");

        let report = AggregatedReport::compute_at(&taxonomy, "t", &[b], at());
        let entries = &report.side(Side::Defense).unwrap().entries;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, "Closing attorney");
        assert_eq!(entries[0].name, "Cleo");
        assert_eq!(entries[1].role, "Witness 1");
        assert_eq!(entries[1].name, "Wes");
    }

    #[test]
    fn opener_identity_sticks_to_first_ballot() {
        let taxonomy = Taxonomy::standard();
        let mut first = uniform_ballot(&taxonomy, Side::Prosecution, 6);
        set(&mut first, SlotKey::POpen, 8, "Alice");
        let mut second = uniform_ballot(&taxonomy, Side::Prosecution, 6);
        set(&mut second, SlotKey::POpen, 4, "Bob");

        let ballots = [first, second];
        let report =
            AggregatedReport::compute_at(&taxonomy, "t", &ballots, at());
        let entries = &report.side(Side::Prosecution).unwrap().entries;

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, "Opening attorney");
        assert_eq!(entries[0].name, "Alice");
        // Bob's opening is not merged into the opener row
        assert_eq!(entries[0].avg_statement, Some(dec("8")));
        assert_eq!(entries[0].statement_pickup, Some(dec("2")));

        // it is kept under Bob's own name, which has no role
        let stats = ingest_side(&taxonomy, &ballots, Side::Prosecution);
        let bob = stats.of("Bob").unwrap();
        assert_eq!(bob.statement, vec![4]);
        assert_eq!(bob.statement_pickups, vec![-2]);
        assert!(entries.iter().all(|e| e.name != "Bob"));
    }

    #[test]
    fn statements_only_reported_for_opener_and_closer() {
        let taxonomy = Taxonomy::standard();
        let mut first = uniform_ballot(&taxonomy, Side::Prosecution, 6);
        set(&mut first, SlotKey::POpen, 8, "Alice");
        set(&mut first, SlotKey::PDirect1Witness, 7, "Wendy");
        set(&mut first, SlotKey::PCross1Witness, 9, "Wendy");
        let mut second = uniform_ballot(&taxonomy, Side::Prosecution, 6);
        set(&mut second, SlotKey::POpen, 4, "Bob");
        set(&mut second, SlotKey::PDirect1Attorney, 7, "Alice");
        set(&mut second, SlotKey::PCross1Attorney, 9, "Alice");
        set(&mut second, SlotKey::PClose, 5, "Wendy");

        let ballots = [first, second];
        let report =
            AggregatedReport::compute_at(&taxonomy, "t", &ballots, at());
        let entries = &report.side(Side::Prosecution).unwrap().entries;
        assert_eq!(
            entries
                .iter()
                .map(|e| (e.role.as_str(), e.name.as_str()))
                .collect_vec(),
            vec![
                ("Opening attorney", "Alice"),
                ("Middle attorney", "Alice"),
                ("Closing attorney", "Wendy"),
                ("Witness 1", "Wendy"),
            ]
        );

        let opener = &entries[0];
        assert_eq!(opener.avg_statement, Some(dec("8")));
        assert_eq!(opener.statement_pickup, Some(dec("2")));

        // same person, but the middle row never carries statements
        let middle = &entries[1];
        assert_eq!(middle.avg_direct, Some(dec("7")));
        assert_eq!(middle.avg_cross, Some(dec("9")));
        assert_eq!(middle.avg_statement, None);
        assert_eq!(middle.statement_pickup, None);
        assert_eq!(middle.cross_pickup, Some(dec("3")));

        let closer = &entries[2];
        assert_eq!(closer.avg_statement, Some(dec("5")));
        assert_eq!(closer.statement_pickup, Some(dec("-1")));
        assert_eq!(closer.avg_direct, None);

        let witness = &entries[3];
        assert_eq!(witness.avg_direct, Some(dec("7")));
        assert_eq!(witness.avg_cross, Some(dec("9")));
        assert_eq!(witness.avg_statement, None);
        assert_eq!(witness.statement_pickup, None);
        assert_eq!(witness.cross_pickup, Some(dec("3")));
    }

    #[test]
    fn report_json_omits_missing_statistics() {
        let taxonomy = Taxonomy::standard();
        let mut b = uniform_ballot(&taxonomy, Side::Prosecution, 6);
        set(&mut b, SlotKey::PDirect1Attorney, 7, "Dee");

        let report = AggregatedReport::compute_at(&taxonomy, "t", &[b], at());
        let json = serde_json::to_value(&report).unwrap();
        let entry = &json["sides"][0]["entries"][0];
        assert_eq!(json["tournamentId"], "t");
        assert_eq!(json["sides"][0]["side"], "P");
        assert_eq!(entry["role"], "Middle attorney");
        assert_eq!(entry["avgDirect"], 7.0);
        assert!(entry.get("avgCross").is_none());
        assert!(entry.get("statementPickup").is_none());
    }
}
