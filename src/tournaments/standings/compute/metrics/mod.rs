//! Per-competitor score buckets for one side of a tournament.

use indexmap::IndexMap;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::tournaments::ballots::{
    Ballot, Side,
    slots::{Category, Taxonomy},
};

/// Raw samples collected for one competitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatBuckets {
    pub direct: Vec<i32>,
    pub cross: Vec<i32>,
    /// Opening and closing statements share a bucket.
    pub statement: Vec<i32>,
    pub witness_direct: Vec<i32>,
    pub witness_cross: Vec<i32>,
    pub statement_pickups: Vec<i32>,
    /// Both attorney-vs-witness and witness-vs-attorney cross pickups.
    pub cross_pickups: Vec<i32>,
}

impl StatBuckets {
    fn bucket_mut(&mut self, category: Category) -> &mut Vec<i32> {
        match category {
            Category::OpeningStatement | Category::ClosingStatement => {
                &mut self.statement
            }
            Category::DirectAttorney => &mut self.direct,
            Category::CrossAttorney => &mut self.cross,
            Category::DirectWitness => &mut self.witness_direct,
            Category::CrossWitness => &mut self.witness_cross,
        }
    }
}

/// Buckets keyed by competitor name, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct SideStatistics(pub IndexMap<String, StatBuckets>);

impl SideStatistics {
    pub fn of(&self, name: &str) -> Option<&StatBuckets> {
        self.0.get(name)
    }

    fn entry(&mut self, name: &str) -> &mut StatBuckets {
        self.0.entry(name.to_string()).or_default()
    }
}

/// Collects every named score of `side` into per-competitor buckets, along
/// with pickups against the opposing side's score in the same ballot. Each
/// ballot is walked in catalog order.
pub fn ingest_side(
    taxonomy: &Taxonomy,
    ballots: &[Ballot],
    side: Side,
) -> SideStatistics {
    let mut stats = SideStatistics::default();

    for ballot in ballots.iter().filter(|b| b.our_side == side) {
        for (slot, name) in ballot.named_slots(taxonomy) {
            let category = taxonomy.classify(side, slot.key);
            let score = slot.score as i32;
            let buckets = stats.entry(name);
            buckets.bucket_mut(category).push(score);

            let opposing = taxonomy
                .counterpart(slot.key)
                .and_then(|key| ballot.score_of(key));
            if let Some(opposing) = opposing {
                let pickup = score - opposing as i32;
                if category.is_statement() {
                    buckets.statement_pickups.push(pickup);
                } else {
                    buckets.cross_pickups.push(pickup);
                }
            }
        }
    }

    tracing::trace!(
        side = %side,
        competitors = stats.0.len(),
        "ingested side statistics"
    );

    stats
}

/// Mean of the samples, rounded half away from zero to two decimal places.
/// `None` when there are no samples.
pub fn average(samples: &[i32]) -> Option<Decimal> {
    if samples.is_empty() {
        return None;
    }
    let sum: Decimal = samples.iter().map(|s| Decimal::from(*s)).sum();
    let mean = sum / Decimal::from(samples.len() as u64);
    Some(
        mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .normalize(),
    )
}
