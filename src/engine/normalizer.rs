//! Balancing the raw shares to exactly 1: ʿawl and radd.

use tracing::instrument;

use crate::domain::Fraction;

use super::division::{Adjustment, EstateDivision, ShareEntry};

/// Turn raw shares into the final division.
///
/// Exactly one of three things happens: the sum is already 1 and is only
/// validated; the sum exceeds 1 and every share is scaled down by the same
/// factor (ʿawl); or the sum falls short with no residuary present and the
/// shortfall is returned to the fixed-share heirs — minus the spouse, who
/// is barred from radd while blood heirs remain.
#[instrument(level = "debug", skip(entries))]
pub fn normalize(mut entries: Vec<ShareEntry>) -> EstateDivision {
    let total: Fraction = entries.iter().map(|e| e.fraction).sum();

    let adjustment = if total == Fraction::ONE {
        None
    } else if total > Fraction::ONE {
        // ʿAwl: relative proportions are preserved exactly.
        let factor = total.recip();
        for entry in &mut entries {
            entry.fraction = entry.fraction * factor;
        }
        Some(Adjustment::ProportionalReduction)
    } else {
        let spouse_total: Fraction = entries
            .iter()
            .filter(|e| e.category.is_spouse())
            .map(|e| e.fraction)
            .sum();
        let pool_total: Fraction = entries
            .iter()
            .filter(|e| !e.category.is_spouse())
            .map(|e| e.fraction)
            .sum();

        if pool_total.is_zero() {
            // Nobody but the spouse: the remainder returns to the spouse
            // rather than escheating.
            let factor = spouse_total.recip();
            for entry in &mut entries {
                entry.fraction = entry.fraction * factor;
            }
        } else {
            // Radd: blood heirs absorb the shortfall in proportion to
            // their shares; the spouse keeps the original fixed share.
            let factor = (Fraction::ONE - spouse_total) / pool_total;
            for entry in entries.iter_mut().filter(|e| !e.category.is_spouse()) {
                entry.fraction = entry.fraction * factor;
            }
        }
        Some(Adjustment::ResidualRedistribution)
    };

    let division = EstateDivision::new(entries, adjustment);
    debug_assert_eq!(
        division.total(),
        Fraction::ONE,
        "normalized shares must sum to exactly 1"
    );
    division
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeirCategory;
    use crate::engine::division::ShareKind;
    use generational_arena::Arena;

    fn entry(category: HeirCategory, fraction: Fraction) -> ShareEntry {
        // Synthesize an id; the normalizer never dereferences it.
        let mut arena = Arena::new();
        let person = arena.insert(());
        ShareEntry {
            person,
            category,
            fraction,
            kind: ShareKind::Fixed,
        }
    }

    #[test]
    fn test_exact_sum_is_untouched() {
        let entries = vec![
            entry(HeirCategory::Mother, Fraction::new(1, 3)),
            entry(HeirCategory::Father, Fraction::new(2, 3)),
        ];
        let division = normalize(entries);
        assert_eq!(division.adjustment(), None);
        assert_eq!(division.total(), Fraction::ONE);
    }

    #[test]
    fn test_awl_scales_proportionally() {
        // Husband 1/2 + two full sisters 2/3: the classic 7/6 over-
        // subscription, reduced to 3/7 and 4/7.
        let entries = vec![
            entry(HeirCategory::Husband, Fraction::new(1, 2)),
            entry(HeirCategory::SisterFull, Fraction::new(1, 3)),
            entry(HeirCategory::SisterFull, Fraction::new(1, 3)),
        ];
        let division = normalize(entries);
        assert_eq!(
            division.adjustment(),
            Some(Adjustment::ProportionalReduction)
        );
        assert_eq!(division.entries()[0].fraction, Fraction::new(3, 7));
        assert_eq!(division.entries()[1].fraction, Fraction::new(2, 7));
        assert_eq!(division.total(), Fraction::ONE);
    }

    #[test]
    fn test_radd_bars_spouse() {
        // Husband 1/4, daughter 1/2: the quarter shortfall goes to the
        // daughter alone.
        let entries = vec![
            entry(HeirCategory::Husband, Fraction::new(1, 4)),
            entry(HeirCategory::Daughter, Fraction::new(1, 2)),
        ];
        let division = normalize(entries);
        assert_eq!(
            division.adjustment(),
            Some(Adjustment::ResidualRedistribution)
        );
        assert_eq!(division.entries()[0].fraction, Fraction::new(1, 4));
        assert_eq!(division.entries()[1].fraction, Fraction::new(3, 4));
    }

    #[test]
    fn test_radd_to_sole_spouse() {
        let entries = vec![entry(HeirCategory::Wife, Fraction::new(1, 4))];
        let division = normalize(entries);
        assert_eq!(
            division.adjustment(),
            Some(Adjustment::ResidualRedistribution)
        );
        assert_eq!(division.entries()[0].fraction, Fraction::ONE);
    }
}
