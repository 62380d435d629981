//! Working out who played which role for a side.

use itertools::Itertools;

use crate::tournaments::ballots::{
    Ballot, Side,
    slots::{Category, Taxonomy},
};

pub const MAX_WITNESSES: usize = 3;

/// The names a single ballot supplies for each role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BallotRoles {
    pub opener: Option<String>,
    pub middle: Option<String>,
    pub closer: Option<String>,
    pub witnesses: Vec<String>,
}

/// Reads the roles of `side` off one ballot. Only named slots on that side
/// are considered, so this returns nothing for a ballot where we argued the
/// other side.
pub fn roles_of_ballot(
    taxonomy: &Taxonomy,
    ballot: &Ballot,
    side: Side,
) -> BallotRoles {
    if ballot.our_side != side {
        return BallotRoles::default();
    }

    let name_in = |category: Category| -> Option<String> {
        taxonomy
            .slots_in(side, category)
            .find_map(|spec| ballot.name_of(taxonomy, spec.key))
            .map(str::to_string)
    };

    let opener = name_in(Category::OpeningStatement);
    let closer = name_in(Category::ClosingStatement);

    // First attorney (in catalog order) who is neither the opener nor the
    // closer. If two such attorneys exist the later one is not reported.
    let middle = taxonomy
        .slots_of(side)
        .filter(|spec| spec.category.is_attorney_examination())
        .filter_map(|spec| ballot.name_of(taxonomy, spec.key))
        .find(|name| {
            Some(*name) != opener.as_deref() && Some(*name) != closer.as_deref()
        })
        .map(str::to_string);

    let witnesses = taxonomy
        .slots_in(side, Category::DirectWitness)
        .chain(taxonomy.slots_in(side, Category::CrossWitness))
        .filter_map(|spec| ballot.name_of(taxonomy, spec.key))
        .unique()
        .take(MAX_WITNESSES)
        .map(str::to_string)
        .collect();

    BallotRoles {
        opener,
        middle,
        closer,
        witnesses,
    }
}

/// The resolved identity of each role on one side across a tournament.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleMap {
    pub opener: Option<String>,
    pub middle: Option<String>,
    pub closer: Option<String>,
    pub witnesses: Vec<String>,
}

impl RoleMap {
    /// Folds one more ballot's roles in. Roles that are already resolved are
    /// never replaced; witnesses are appended in order of first appearance
    /// until all three are known.
    fn observe(mut self, roles: BallotRoles) -> Self {
        if self.opener.is_none() {
            self.opener = roles.opener;
        }
        if self.middle.is_none() {
            self.middle = roles.middle;
        }
        if self.closer.is_none() {
            self.closer = roles.closer;
        }
        for witness in roles.witnesses {
            if self.witnesses.len() == MAX_WITNESSES {
                break;
            }
            if !self.witnesses.contains(&witness) {
                self.witnesses.push(witness);
            }
        }
        self
    }
}

/// Resolves the roles of `side` over `ballots` (in insertion order). The
/// first ballot to name someone for a role fixes that role for good.
pub fn assign_roles(
    taxonomy: &Taxonomy,
    ballots: &[Ballot],
    side: Side,
) -> RoleMap {
    ballots
        .iter()
        .filter(|ballot| ballot.our_side == side)
        .map(|ballot| roles_of_ballot(taxonomy, ballot, side))
        .fold(RoleMap::default(), RoleMap::observe)
}
