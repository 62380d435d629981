//! The fixed catalog of scoring slots on a mock trial ballot.
//!
//! Every ballot carries exactly one score for each of the 28 slots listed
//! here (14 per side). The order of [`Taxonomy::standard`] is the order in
//! which slots are displayed, exported and walked during role inference, so
//! it must never be changed.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::tournaments::ballots::Side;

/// Identity of a single scoring slot.
///
/// The human-readable label (see [`SlotKey::label`]) is only used on the
/// wire and in exports. Nothing in the scoring engine inspects it; the
/// category and sequence number of a slot come from the [`Taxonomy`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKey {
    POpen,
    PDirect1Attorney,
    PDirect1Witness,
    PCross1Witness,
    PDirect2Attorney,
    PDirect2Witness,
    PCross2Witness,
    PDirect3Attorney,
    PDirect3Witness,
    PCross3Witness,
    PCross1Attorney,
    PCross2Attorney,
    PCross3Attorney,
    PClose,

    DOpen,
    DCross1Attorney,
    DCross2Attorney,
    DCross3Attorney,
    DDirect1Attorney,
    DDirect1Witness,
    DCross1Witness,
    DDirect2Attorney,
    DDirect2Witness,
    DCross2Witness,
    DDirect3Attorney,
    DDirect3Witness,
    DCross3Witness,
    DClose,
}

impl SlotKey {
    /// The label used in ballot documents and CSV headers. Note that the
    /// prosecution witness cross labels carry two spaces after "Cross"; this
    /// is preserved for compatibility with existing exports.
    pub fn label(&self) -> &'static str {
        match self {
            SlotKey::POpen => "P. Open",
            SlotKey::PDirect1Attorney => "P. Direct 1: Attorney",
            SlotKey::PDirect1Witness => "P. Direct 1: Witness",
            SlotKey::PCross1Witness => "P. Cross  1: Witness",
            SlotKey::PDirect2Attorney => "P. Direct 2: Attorney",
            SlotKey::PDirect2Witness => "P. Direct 2: Witness",
            SlotKey::PCross2Witness => "P. Cross  2: Witness",
            SlotKey::PDirect3Attorney => "P. Direct 3: Attorney",
            SlotKey::PDirect3Witness => "P. Direct 3: Witness",
            SlotKey::PCross3Witness => "P. Cross  3: Witness",
            SlotKey::PCross1Attorney => "P. Cross  1: Attorney",
            SlotKey::PCross2Attorney => "P. Cross  2: Attorney",
            SlotKey::PCross3Attorney => "P. Cross  3: Attorney",
            SlotKey::PClose => "P. Close",
            SlotKey::DOpen => "D. Open",
            SlotKey::DCross1Attorney => "D. Cross 1: Attorney",
            SlotKey::DCross2Attorney => "D. Cross 2: Attorney",
            SlotKey::DCross3Attorney => "D. Cross 3: Attorney",
            SlotKey::DDirect1Attorney => "D. Direct 1: Attorney",
            SlotKey::DDirect1Witness => "D. Direct 1: Witness",
            SlotKey::DCross1Witness => "D. Cross 1: Witness",
            SlotKey::DDirect2Attorney => "D. Direct 2: Attorney",
            SlotKey::DDirect2Witness => "D. Direct 2: Witness",
            SlotKey::DCross2Witness => "D. Cross 2: Witness",
            SlotKey::DDirect3Attorney => "D. Direct 3: Attorney",
            SlotKey::DDirect3Witness => "D. Direct 3: Witness",
            SlotKey::DCross3Witness => "D. Cross 3: Witness",
            SlotKey::DClose => "D. Close",
        }
    }

    pub fn from_label(label: &str) -> Option<SlotKey> {
        Some(match label {
            "P. Open" => SlotKey::POpen,
            "P. Direct 1: Attorney" => SlotKey::PDirect1Attorney,
            "P. Direct 1: Witness" => SlotKey::PDirect1Witness,
            "P. Cross  1: Witness" => SlotKey::PCross1Witness,
            "P. Direct 2: Attorney" => SlotKey::PDirect2Attorney,
            "P. Direct 2: Witness" => SlotKey::PDirect2Witness,
            "P. Cross  2: Witness" => SlotKey::PCross2Witness,
            "P. Direct 3: Attorney" => SlotKey::PDirect3Attorney,
            "P. Direct 3: Witness" => SlotKey::PDirect3Witness,
            "P. Cross  3: Witness" => SlotKey::PCross3Witness,
            "P. Cross  1: Attorney" => SlotKey::PCross1Attorney,
            "P. Cross  2: Attorney" => SlotKey::PCross2Attorney,
            "P. Cross  3: Attorney" => SlotKey::PCross3Attorney,
            "P. Close" => SlotKey::PClose,
            "D. Open" => SlotKey::DOpen,
            "D. Cross 1: Attorney" => SlotKey::DCross1Attorney,
            "D. Cross 2: Attorney" => SlotKey::DCross2Attorney,
            "D. Cross 3: Attorney" => SlotKey::DCross3Attorney,
            "D. Direct 1: Attorney" => SlotKey::DDirect1Attorney,
            "D. Direct 1: Witness" => SlotKey::DDirect1Witness,
            "D. Cross 1: Witness" => SlotKey::DCross1Witness,
            "D. Direct 2: Attorney" => SlotKey::DDirect2Attorney,
            "D. Direct 2: Witness" => SlotKey::DDirect2Witness,
            "D. Cross 2: Witness" => SlotKey::DCross2Witness,
            "D. Direct 3: Attorney" => SlotKey::DDirect3Attorney,
            "D. Direct 3: Witness" => SlotKey::DDirect3Witness,
            "D. Cross 3: Witness" => SlotKey::DCross3Witness,
            "D. Close" => SlotKey::DClose,
            _ => return None,
        })
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SlotKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for SlotKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SlotKeyVisitor;

        impl<'de> Visitor<'de> for SlotKeyVisitor {
            type Value = SlotKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a ballot slot label such as \"P. Open\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<SlotKey, E>
            where
                E: de::Error,
            {
                SlotKey::from_label(value).ok_or_else(|| {
                    E::custom(format!("unknown ballot slot `{value}`"))
                })
            }
        }

        deserializer.deserialize_str(SlotKeyVisitor)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// What kind of performance a slot scores.
pub enum Category {
    OpeningStatement,
    ClosingStatement,
    DirectAttorney,
    DirectWitness,
    CrossAttorney,
    CrossWitness,
}

impl Category {
    pub fn is_statement(&self) -> bool {
        matches!(self, Category::OpeningStatement | Category::ClosingStatement)
    }

    pub fn is_attorney_examination(&self) -> bool {
        matches!(self, Category::DirectAttorney | Category::CrossAttorney)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
/// One row of the taxonomy.
pub struct SlotSpec {
    pub key: SlotKey,
    pub side: Side,
    pub category: Category,
    /// Examination sequence (1-3). `None` for opening and closing
    /// statements.
    pub seq: Option<u8>,
}

impl SlotSpec {
    const fn new(
        key: SlotKey,
        side: Side,
        category: Category,
        seq: Option<u8>,
    ) -> Self {
        Self {
            key,
            side,
            category,
            seq,
        }
    }
}

pub const SLOTS_PER_SIDE: usize = 14;
pub const SLOT_COUNT: usize = 2 * SLOTS_PER_SIDE;

/// The slot catalog. Build it once with [`Taxonomy::standard`] and pass it
/// to whatever needs to classify slots.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    slots: Vec<SlotSpec>,
    /// Position of each [`SlotKey`] (by discriminant) in `slots`.
    positions: [usize; SLOT_COUNT],
}

impl Taxonomy {
    pub fn standard() -> Self {
        use Category::*;
        use Side::{Defense as D, Prosecution as P};
        use SlotKey as K;

        let slots = vec![
            SlotSpec::new(K::POpen, P, OpeningStatement, None),
            SlotSpec::new(K::PDirect1Attorney, P, DirectAttorney, Some(1)),
            SlotSpec::new(K::PDirect1Witness, P, DirectWitness, Some(1)),
            SlotSpec::new(K::PCross1Witness, P, CrossWitness, Some(1)),
            SlotSpec::new(K::PDirect2Attorney, P, DirectAttorney, Some(2)),
            SlotSpec::new(K::PDirect2Witness, P, DirectWitness, Some(2)),
            SlotSpec::new(K::PCross2Witness, P, CrossWitness, Some(2)),
            SlotSpec::new(K::PDirect3Attorney, P, DirectAttorney, Some(3)),
            SlotSpec::new(K::PDirect3Witness, P, DirectWitness, Some(3)),
            SlotSpec::new(K::PCross3Witness, P, CrossWitness, Some(3)),
            SlotSpec::new(K::PCross1Attorney, P, CrossAttorney, Some(1)),
            SlotSpec::new(K::PCross2Attorney, P, CrossAttorney, Some(2)),
            SlotSpec::new(K::PCross3Attorney, P, CrossAttorney, Some(3)),
            SlotSpec::new(K::PClose, P, ClosingStatement, None),
            SlotSpec::new(K::DOpen, D, OpeningStatement, None),
            SlotSpec::new(K::DCross1Attorney, D, CrossAttorney, Some(1)),
            SlotSpec::new(K::DCross2Attorney, D, CrossAttorney, Some(2)),
            SlotSpec::new(K::DCross3Attorney, D, CrossAttorney, Some(3)),
            SlotSpec::new(K::DDirect1Attorney, D, DirectAttorney, Some(1)),
            SlotSpec::new(K::DDirect1Witness, D, DirectWitness, Some(1)),
            SlotSpec::new(K::DCross1Witness, D, CrossWitness, Some(1)),
            SlotSpec::new(K::DDirect2Attorney, D, DirectAttorney, Some(2)),
            SlotSpec::new(K::DDirect2Witness, D, DirectWitness, Some(2)),
            SlotSpec::new(K::DCross2Witness, D, CrossWitness, Some(2)),
            SlotSpec::new(K::DDirect3Attorney, D, DirectAttorney, Some(3)),
            SlotSpec::new(K::DDirect3Witness, D, DirectWitness, Some(3)),
            SlotSpec::new(K::DCross3Witness, D, CrossWitness, Some(3)),
            SlotSpec::new(K::DClose, D, ClosingStatement, None),
        ];
        assert_eq!(slots.len(), SLOT_COUNT);

        let mut positions = [usize::MAX; SLOT_COUNT];
        for (idx, spec) in slots.iter().enumerate() {
            positions[spec.key as usize] = idx;
        }
        assert!(positions.iter().all(|p| *p != usize::MAX));

        Self { slots, positions }
    }

    /// All slots, in canonical order.
    pub fn slots(&self) -> impl Iterator<Item = &SlotSpec> {
        self.slots.iter()
    }

    /// The slots of one side, in canonical order.
    pub fn slots_of(&self, side: Side) -> impl Iterator<Item = &SlotSpec> {
        self.slots.iter().filter(move |spec| spec.side == side)
    }

    /// Slots of one side belonging to `category`, in canonical order.
    pub fn slots_in(
        &self,
        side: Side,
        category: Category,
    ) -> impl Iterator<Item = &SlotSpec> {
        self.slots_of(side)
            .filter(move |spec| spec.category == category)
    }

    pub fn spec(&self, key: SlotKey) -> &SlotSpec {
        &self.slots[self.positions[key as usize]]
    }

    /// Position of the slot in the canonical order.
    pub fn position(&self, key: SlotKey) -> usize {
        self.positions[key as usize]
    }

    /// Classifies a slot on the given side. The side is part of the slot's
    /// identity, so asking about a slot on the wrong side is a caller bug.
    pub fn classify(&self, side: Side, key: SlotKey) -> Category {
        let spec = self.spec(key);
        debug_assert_eq!(spec.side, side, "{key} does not belong to {side:?}");
        spec.category
    }

    pub fn find(
        &self,
        side: Side,
        category: Category,
        seq: Option<u8>,
    ) -> Option<SlotKey> {
        self.slots_in(side, category)
            .find(|spec| spec.seq == seq)
            .map(|spec| spec.key)
    }

    /// The opposing-side slot that a slot is measured against when computing
    /// pickups: statements face the mirrored statement, a cross-examining
    /// attorney faces the opposing witness they crossed (and vice versa).
    /// Direct examination slots have no counterpart.
    pub fn counterpart(&self, key: SlotKey) -> Option<SlotKey> {
        let spec = self.spec(key);
        let opponent = spec.side.opponent();
        match spec.category {
            Category::OpeningStatement | Category::ClosingStatement => {
                self.find(opponent, spec.category, None)
            }
            Category::CrossAttorney => {
                self.find(opponent, Category::CrossWitness, spec.seq)
            }
            Category::CrossWitness => {
                self.find(opponent, Category::CrossAttorney, spec.seq)
            }
            Category::DirectAttorney | Category::DirectWitness => None,
        }
    }
}
