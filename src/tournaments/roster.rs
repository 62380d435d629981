//! Team rosters, used to fill in competitor names on ballots.

use serde::{Deserialize, Serialize};

use crate::tournaments::ballots::{
    Ballot, Side,
    slots::{Category, SlotKey, Taxonomy},
};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    /// Our team number. Blank if not yet known.
    #[serde(default)]
    pub team_number: String,
    #[serde(default)]
    pub prosecution: SideRoster,
    #[serde(default)]
    pub defense: SideRoster,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SideRoster {
    #[serde(default)]
    pub attorneys: Attorneys,
    #[serde(default)]
    pub witnesses: [String; 3],
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Attorneys {
    #[serde(default)]
    pub opener: String,
    #[serde(default)]
    pub middle: String,
    #[serde(default)]
    pub closer: String,
}

impl Roster {
    pub fn of_side(&self, side: Side) -> &SideRoster {
        match side {
            Side::Prosecution => &self.prosecution,
            Side::Defense => &self.defense,
        }
    }
}

fn non_blank(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// The roster name for a slot, if the roster determines one.
///
/// Statements take the opener and closer; both examinations of witness `n`
/// take the roster's witness `n`. Attorney examination slots are left to
/// whoever entered the ballot, since the roster does not say which attorney
/// handled which witness.
pub fn roster_name_for(
    taxonomy: &Taxonomy,
    roster: &Roster,
    side: Side,
    key: SlotKey,
) -> Option<String> {
    let spec = taxonomy.spec(key);
    if spec.side != side {
        return None;
    }
    let side_roster = roster.of_side(side);

    match spec.category {
        Category::OpeningStatement => non_blank(&side_roster.attorneys.opener),
        Category::ClosingStatement => non_blank(&side_roster.attorneys.closer),
        Category::DirectWitness | Category::CrossWitness => {
            let idx = spec.seq? as usize - 1;
            side_roster.witnesses.get(idx).and_then(|w| non_blank(w))
        }
        Category::DirectAttorney | Category::CrossAttorney => None,
    }
}

/// Rewrites ballots using the roster: our team number is replaced (when the
/// roster has one) and every slot on our side that the roster names is
/// renamed. Slots on the opposing side are left alone.
pub fn apply_roster(
    taxonomy: &Taxonomy,
    roster: &Roster,
    ballots: &[Ballot],
) -> Vec<Ballot> {
    let team_number = non_blank(&roster.team_number);

    ballots
        .iter()
        .map(|ballot| {
            let mut ballot = ballot.clone();
            if let Some(team_number) = &team_number {
                match ballot.our_side {
                    Side::Prosecution => {
                        ballot.prosecution_team_number = team_number.clone()
                    }
                    Side::Defense => {
                        ballot.defense_team_number = team_number.clone()
                    }
                }
            }

            let our_side = ballot.our_side;
            for slot in ballot.scores.iter_mut() {
                if slot.side != our_side {
                    continue;
                }
                if let Some(name) =
                    roster_name_for(taxonomy, roster, our_side, slot.key)
                {
                    slot.name = Some(name);
                }
            }
            ballot
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournaments::ballots::fixtures::{set, uniform_ballot};

    fn roster() -> Roster {
        Roster {
            team_number: " 1234 ".to_string(),
            prosecution: SideRoster {
                attorneys: Attorneys {
                    opener: "Alice".to_string(),
                    middle: "Mo".to_string(),
                    closer: "  ".to_string(),
                },
                witnesses: [
                    "Wendy".to_string(),
                    String::new(),
                    " Xavier ".to_string(),
                ],
            },
            defense: SideRoster::default(),
        }
    }

    #[test]
    fn roster_names_statements_and_witnesses() {
        let taxonomy = Taxonomy::standard();
        let roster = roster();
        let p = Side::Prosecution;

        let name = |key| roster_name_for(&taxonomy, &roster, p, key);
        assert_eq!(name(SlotKey::POpen).as_deref(), Some("Alice"));
        assert_eq!(name(SlotKey::PClose), None);
        assert_eq!(name(SlotKey::PDirect1Witness).as_deref(), Some("Wendy"));
        assert_eq!(name(SlotKey::PCross1Witness).as_deref(), Some("Wendy"));
        assert_eq!(name(SlotKey::PDirect2Witness), None);
        assert_eq!(name(SlotKey::PCross3Witness).as_deref(), Some("Xavier"));
        assert_eq!(name(SlotKey::PDirect1Attorney), None);
        assert_eq!(name(SlotKey::PCross1Attorney), None);
        // wrong side
        assert_eq!(
            roster_name_for(&taxonomy, &roster, Side::Defense, SlotKey::POpen),
            None
        );
    }

    #[test]
    fn apply_only_touches_our_side() {
        let taxonomy = Taxonomy::standard();
        let mut ours = uniform_ballot(&taxonomy, Side::Prosecution, 7);
        set(&mut ours, SlotKey::POpen, 7, "Old Name");
        set(&mut ours, SlotKey::PClose, 7, "Cara");
        let theirs = uniform_ballot(&taxonomy, Side::Defense, 7);

        let updated = apply_roster(&taxonomy, &roster(), &[ours, theirs]);

        assert_eq!(updated[0].prosecution_team_number, "1234");
        assert_eq!(updated[0].defense_team_number, "1002");
        let name = |key| updated[0].name_of(&taxonomy, key);
        assert_eq!(name(SlotKey::POpen), Some("Alice"));
        // blank roster closer keeps the entered name
        assert_eq!(name(SlotKey::PClose), Some("Cara"));
        assert_eq!(name(SlotKey::PCross3Witness), Some("Xavier"));

        // defense ballot: roster side is empty, only the team number moves
        assert_eq!(updated[1].defense_team_number, "1234");
        assert_eq!(updated[1].prosecution_team_number, "1001");
        assert!(updated[1].scores.iter().all(|s| s.name.is_none()));
    }
}
