//! The inheritance engine: a pure pipeline from tree snapshot to division.
//!
//! Stages never mutate their input; each computation borrows the tree
//! read-only and produces an independent `EstateDivision`, so concurrent
//! what-if computations over separate trees need no coordination.

pub mod calculator;
pub mod classifier;
pub mod division;
pub mod error;
pub mod exclusion;
pub mod normalizer;

pub use classifier::{classify, Classification};
pub use division::{Adjustment, EstateDivision, ShareEntry, ShareKind};
pub use error::{EngineError, EngineResult};
pub use exclusion::{exclude, PrunedSet};

use tracing::instrument;

use crate::domain::FamilyTree;

/// Divide the estate of the tree's deceased among the surviving relatives.
///
/// Runs the full pipeline: classify → exclude → compute shares →
/// normalize. The returned division's fractions sum to exactly 1.
#[instrument(level = "info", skip(tree))]
pub fn divide(tree: &FamilyTree) -> EngineResult<EstateDivision> {
    let classification = classify(tree)?;
    let pruned = exclude(&classification);
    if pruned.is_empty() {
        return Err(EngineError::NoEligibleHeir);
    }
    let raw = calculator::compute_shares(&classification, &pruned);
    Ok(normalizer::normalize(raw))
}
