use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tournaments::ballots::{
    Side,
    slots::{SlotKey, Taxonomy},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Prosecution,
    Defense,
    Tie,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Winner::Prosecution => "Prosecution",
            Winner::Defense => "Defense",
            Winner::Tie => "Tie",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub prosecution_total: i32,
    pub defense_total: i32,
    pub winner: Winner,
    /// Prosecution total minus defense total.
    pub diff: i32,
    pub margin: i32,
}

impl Totals {
    /// One-line summary, e.g. `Prosecution: P 80 - D 74 (diff +6, margin 6)`.
    pub fn summary(&self) -> String {
        format!(
            "{}: P {} - D {} (diff {:+}, margin {})",
            self.winner,
            self.prosecution_total,
            self.defense_total,
            self.diff,
            self.margin
        )
    }
}

/// Sums the slot scores of each side and picks the winner.
///
/// Slots missing from `scores` count as zero, so this is defined for
/// partially filled ballots too.
pub fn compute_totals(
    taxonomy: &Taxonomy,
    scores: &HashMap<SlotKey, u8>,
) -> Totals {
    let total_of = |side: Side| -> i32 {
        taxonomy
            .slots_of(side)
            .map(|spec| scores.get(&spec.key).copied().unwrap_or(0) as i32)
            .sum()
    };

    let prosecution_total = total_of(Side::Prosecution);
    let defense_total = total_of(Side::Defense);
    let diff = prosecution_total - defense_total;

    let winner = match diff.signum() {
        1 => Winner::Prosecution,
        -1 => Winner::Defense,
        _ => Winner::Tie,
    };

    Totals {
        prosecution_total,
        defense_total,
        winner,
        diff,
        margin: diff.abs(),
    }
}
