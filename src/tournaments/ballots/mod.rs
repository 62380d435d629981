use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tournaments::ballots::{
    slots::{SlotKey, Taxonomy},
    totals::{Totals, compute_totals},
};

pub mod export;
pub mod slots;
pub mod totals;

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
pub enum Side {
    #[serde(rename = "P")]
    Prosecution,
    #[serde(rename = "D")]
    Defense,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Prosecution => Side::Defense,
            Side::Defense => Side::Prosecution,
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            Side::Prosecution => "P",
            Side::Defense => "D",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Prosecution => "Prosecution",
            Side::Defense => "Defense",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A judge's score for one slot. Only slots on the side the reporting team
/// argued carry a competitor name.
pub struct ScoredSlot {
    #[serde(default)]
    pub ballot_id: String,
    pub side: Side,
    pub key: SlotKey,
    pub score: u8,
    #[serde(default)]
    pub name: Option<String>,
}

impl ScoredSlot {
    /// The competitor who performed in this slot. Blank names count as no
    /// name at all.
    pub fn competitor(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
/// One judge's scoring of one round.
pub struct Ballot {
    pub id: String,
    pub tournament_id: String,
    pub round_number: u32,
    pub judge_name: String,
    pub prosecution_team_number: String,
    pub defense_team_number: String,
    pub our_side: Side,
    pub created_at: DateTime<Utc>,
    pub scores: Vec<ScoredSlot>,
}

impl Ballot {
    /// Slot to score map. If a slot appears more than once the first entry
    /// wins, as it does for [`Ballot::slot`].
    pub fn score_map(&self) -> HashMap<SlotKey, u8> {
        let mut map = HashMap::with_capacity(self.scores.len());
        for s in &self.scores {
            map.entry(s.key).or_insert(s.score);
        }
        map
    }

    pub fn totals(&self, taxonomy: &Taxonomy) -> Totals {
        compute_totals(taxonomy, &self.score_map())
    }

    /// The first scored entry for `key`, if the ballot has one.
    pub fn slot(&self, key: SlotKey) -> Option<&ScoredSlot> {
        self.scores.iter().find(|s| s.key == key)
    }

    pub fn score_of(&self, key: SlotKey) -> Option<u8> {
        self.slot(key).map(|s| s.score)
    }

    /// The competitor named on `key`, provided the catalog puts the slot on
    /// our side. The `side` recorded on the slot itself is not consulted.
    pub fn name_of(&self, taxonomy: &Taxonomy, key: SlotKey) -> Option<&str> {
        if taxonomy.spec(key).side != self.our_side {
            return None;
        }
        self.slot(key).and_then(ScoredSlot::competitor)
    }

    /// Named slots of our side, in catalog order.
    pub fn named_slots<'a>(
        &'a self,
        taxonomy: &'a Taxonomy,
    ) -> impl Iterator<Item = (&'a ScoredSlot, &'a str)> {
        taxonomy.slots_of(self.our_side).filter_map(move |spec| {
            let slot = self.slot(spec.key)?;
            slot.competitor().map(|name| (slot, name))
        })
    }

    pub fn team_number_of(&self, side: Side) -> &str {
        match side {
            Side::Prosecution => &self.prosecution_team_number,
            Side::Defense => &self.defense_team_number,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{fixtures::*, *};

    #[test]
    fn names_are_only_read_from_our_side() {
        let taxonomy = Taxonomy::standard();
        let mut ballot = uniform_ballot(&taxonomy, Side::Defense, 7);
        set(&mut ballot, SlotKey::DOpen, 8, "Dana");
        set(&mut ballot, SlotKey::POpen, 6, "Stray");

        assert_eq!(ballot.name_of(&taxonomy, SlotKey::DOpen), Some("Dana"));
        assert_eq!(ballot.name_of(&taxonomy, SlotKey::POpen), None);
        assert_eq!(ballot.named_slots(&taxonomy).count(), 1);
    }

    #[test]
    fn recorded_side_does_not_override_the_catalog() {
        let taxonomy = Taxonomy::standard();
        let mut ballot = uniform_ballot(&taxonomy, Side::Prosecution, 7);
        let slot = ballot
            .scores
            .iter_mut()
            .find(|s| s.key == SlotKey::DOpen)
            .unwrap();
        slot.side = Side::Prosecution;
        slot.name = Some("Zed".to_string());

        assert_eq!(ballot.name_of(&taxonomy, SlotKey::DOpen), None);
        assert_eq!(ballot.named_slots(&taxonomy).count(), 0);
    }

    #[test]
    fn duplicate_slots_read_the_first_entry_everywhere() {
        let taxonomy = Taxonomy::standard();
        let mut ballot = uniform_ballot(&taxonomy, Side::Prosecution, 5);
        let mut extra = ballot.slot(SlotKey::POpen).unwrap().clone();
        extra.score = 10;
        extra.name = Some("Late".to_string());
        ballot.scores.push(extra);
        set(&mut ballot, SlotKey::POpen, 8, "Alice");

        assert_eq!(ballot.score_map()[&SlotKey::POpen], 8);
        assert_eq!(ballot.score_of(SlotKey::POpen), Some(8));
        assert_eq!(ballot.name_of(&taxonomy, SlotKey::POpen), Some("Alice"));
        assert_eq!(ballot.totals(&taxonomy).prosecution_total, 13 * 5 + 8);
        assert_eq!(ballot.named_slots(&taxonomy).count(), 1);
    }

    #[test]
    fn blank_names_count_as_missing() {
        let taxonomy = Taxonomy::standard();
        let mut ballot = uniform_ballot(&taxonomy, Side::Prosecution, 7);
        ballot.scores[0].name = Some(String::new());
        assert_eq!(ballot.name_of(&taxonomy, SlotKey::POpen), None);
    }

    #[test]
    fn ballot_json_uses_camel_case_field_names() {
        let json = r#"{
            "id": "b1",
            "tournamentId": "t1",
            "roundNumber": 2,
            "judgeName": "Hon. Smith",
            "prosecutionTeamNumber": "1234",
            "defenseTeamNumber": "5678",
            "ourSide": "D",
            "createdAt": "2025-03-01T10:00:00.000Z",
            "scores": [
                {"ballotId": "b1", "side": "P", "key": "P. Cross  1: Witness", "score": 6, "name": null},
                {"ballotId": "b1", "side": "D", "key": "D. Open", "score": 9, "name": "Riley"}
            ]
        }"#;
        let ballot: Ballot = serde_json::from_str(json).unwrap();
        assert_eq!(ballot.our_side, Side::Defense);
        assert_eq!(ballot.score_of(SlotKey::PCross1Witness), Some(6));
        let taxonomy = Taxonomy::standard();
        assert_eq!(ballot.name_of(&taxonomy, SlotKey::DOpen), Some("Riley"));
    }
}
