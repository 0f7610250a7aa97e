//! Exclusion (ḥajb): pruning barred heirs from the classified set.
//!
//! The rules are data, not control flow: one table row per excluding
//! category, each row carrying its precondition and the categories it bars.
//! The engine makes a single ordered pass over the table; spouses exclude
//! nobody and are excluded by nobody.

use std::collections::{BTreeMap, BTreeSet};

use tracing::instrument;

use crate::domain::{HeirCategory, PersonId};

use super::classifier::Classification;

/// Condition on the excluding category for its row to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// Any non-zero count of the excluding category.
    Always,
    /// At least this many members of the excluding category.
    AtLeast(usize),
    /// At least this many members, and the named category absent
    /// (e.g. two daughters bar the granddaughter only while no grandson
    /// promotes her to residuary).
    AtLeastUnless {
        count: usize,
        unless: HeirCategory,
    },
}

/// One row of the exclusion table.
#[derive(Debug, Clone, Copy)]
pub struct ExclusionRule {
    pub by: HeirCategory,
    pub precondition: Precondition,
    pub excludes: &'static [HeirCategory],
}

use HeirCategory::*;

/// The exclusion table, ordered from the closest tier outward.
///
/// Open points are resolved per DESIGN.md: the agnatic grandfather bars
/// siblings like the father does, and only the mother bars grandmothers.
pub const RULES: &[ExclusionRule] = &[
    ExclusionRule {
        by: Son,
        precondition: Precondition::Always,
        excludes: &[
            Grandson,
            Granddaughter,
            BrotherFull,
            BrotherPaternal,
            BrotherMaternal,
            SisterFull,
            SisterPaternal,
            SisterMaternal,
            NephewFull,
            NephewPaternal,
            UncleFull,
            UnclePaternal,
            SonOfUncleFull,
            SonOfUnclePaternal,
            DistantKindred,
        ],
    },
    ExclusionRule {
        by: Grandson,
        precondition: Precondition::Always,
        excludes: &[
            BrotherFull,
            BrotherPaternal,
            BrotherMaternal,
            SisterFull,
            SisterPaternal,
            SisterMaternal,
            NephewFull,
            NephewPaternal,
            UncleFull,
            UnclePaternal,
            SonOfUncleFull,
            SonOfUnclePaternal,
            DistantKindred,
        ],
    },
    ExclusionRule {
        by: Daughter,
        precondition: Precondition::Always,
        excludes: &[BrotherMaternal, SisterMaternal, DistantKindred],
    },
    ExclusionRule {
        by: Daughter,
        precondition: Precondition::AtLeastUnless {
            count: 2,
            unless: Grandson,
        },
        excludes: &[Granddaughter],
    },
    ExclusionRule {
        by: Granddaughter,
        precondition: Precondition::Always,
        excludes: &[BrotherMaternal, SisterMaternal, DistantKindred],
    },
    ExclusionRule {
        by: Father,
        precondition: Precondition::Always,
        excludes: &[
            Grandfather,
            BrotherFull,
            BrotherPaternal,
            BrotherMaternal,
            SisterFull,
            SisterPaternal,
            SisterMaternal,
            NephewFull,
            NephewPaternal,
            UncleFull,
            UnclePaternal,
            SonOfUncleFull,
            SonOfUnclePaternal,
            DistantKindred,
        ],
    },
    ExclusionRule {
        by: Grandfather,
        precondition: Precondition::Always,
        excludes: &[
            BrotherFull,
            BrotherPaternal,
            BrotherMaternal,
            SisterFull,
            SisterPaternal,
            SisterMaternal,
            NephewFull,
            NephewPaternal,
            UncleFull,
            UnclePaternal,
            SonOfUncleFull,
            SonOfUnclePaternal,
            DistantKindred,
        ],
    },
    ExclusionRule {
        by: Mother,
        precondition: Precondition::Always,
        excludes: &[Grandmother, DistantKindred],
    },
    ExclusionRule {
        by: Grandmother,
        precondition: Precondition::Always,
        excludes: &[DistantKindred],
    },
    ExclusionRule {
        by: BrotherFull,
        precondition: Precondition::Always,
        excludes: &[
            BrotherPaternal,
            SisterPaternal,
            NephewFull,
            NephewPaternal,
            UncleFull,
            UnclePaternal,
            SonOfUncleFull,
            SonOfUnclePaternal,
            DistantKindred,
        ],
    },
    ExclusionRule {
        by: SisterFull,
        precondition: Precondition::AtLeastUnless {
            count: 2,
            unless: BrotherPaternal,
        },
        excludes: &[SisterPaternal],
    },
    ExclusionRule {
        by: SisterFull,
        precondition: Precondition::Always,
        excludes: &[DistantKindred],
    },
    ExclusionRule {
        by: SisterPaternal,
        precondition: Precondition::Always,
        excludes: &[DistantKindred],
    },
    ExclusionRule {
        by: BrotherMaternal,
        precondition: Precondition::Always,
        excludes: &[DistantKindred],
    },
    ExclusionRule {
        by: SisterMaternal,
        precondition: Precondition::Always,
        excludes: &[DistantKindred],
    },
    ExclusionRule {
        by: BrotherPaternal,
        precondition: Precondition::Always,
        excludes: &[
            NephewFull,
            NephewPaternal,
            UncleFull,
            UnclePaternal,
            SonOfUncleFull,
            SonOfUnclePaternal,
            DistantKindred,
        ],
    },
    ExclusionRule {
        by: NephewFull,
        precondition: Precondition::Always,
        excludes: &[
            NephewPaternal,
            UncleFull,
            UnclePaternal,
            SonOfUncleFull,
            SonOfUnclePaternal,
            DistantKindred,
        ],
    },
    ExclusionRule {
        by: NephewPaternal,
        precondition: Precondition::Always,
        excludes: &[
            UncleFull,
            UnclePaternal,
            SonOfUncleFull,
            SonOfUnclePaternal,
            DistantKindred,
        ],
    },
    ExclusionRule {
        by: UncleFull,
        precondition: Precondition::Always,
        excludes: &[
            UnclePaternal,
            SonOfUncleFull,
            SonOfUnclePaternal,
            DistantKindred,
        ],
    },
    ExclusionRule {
        by: UnclePaternal,
        precondition: Precondition::Always,
        excludes: &[SonOfUncleFull, SonOfUnclePaternal, DistantKindred],
    },
    ExclusionRule {
        by: SonOfUncleFull,
        precondition: Precondition::Always,
        excludes: &[SonOfUnclePaternal, DistantKindred],
    },
    ExclusionRule {
        by: SonOfUnclePaternal,
        precondition: Precondition::Always,
        excludes: &[DistantKindred],
    },
];

/// The classified set after exclusion: surviving categories with their
/// members, in category order.
#[derive(Debug, Clone, Default)]
pub struct PrunedSet {
    categories: BTreeMap<HeirCategory, Vec<PersonId>>,
}

impl PrunedSet {
    pub fn categories(&self) -> &BTreeMap<HeirCategory, Vec<PersonId>> {
        &self.categories
    }

    pub fn contains(&self, category: HeirCategory) -> bool {
        self.categories.contains_key(&category)
    }

    pub fn count(&self, category: HeirCategory) -> usize {
        self.categories
            .get(&category)
            .map(|members| members.len())
            .unwrap_or(0)
    }

    pub fn members(&self, category: HeirCategory) -> &[PersonId] {
        self.categories
            .get(&category)
            .map(|members| members.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// True when some category with a descendant relation to the deceased
    /// survives pruning.
    pub fn has_descendant(&self) -> bool {
        self.categories.keys().any(|cat| cat.is_descendant())
    }

    pub fn has_male_descendant(&self) -> bool {
        self.contains(Son) || self.contains(Grandson)
    }
}

/// Apply the exclusion table: one ordered pass, rules of already-excluded
/// categories never fire.
#[instrument(level = "debug", skip(classification))]
pub fn exclude(classification: &Classification) -> PrunedSet {
    let mut excluded: BTreeSet<HeirCategory> = BTreeSet::new();

    for rule in RULES {
        if excluded.contains(&rule.by) || classification.count(rule.by) == 0 {
            continue;
        }
        let applies = match rule.precondition {
            Precondition::Always => true,
            Precondition::AtLeast(count) => classification.count(rule.by) >= count,
            Precondition::AtLeastUnless { count, unless } => {
                classification.count(rule.by) >= count
                    && (classification.count(unless) == 0 || excluded.contains(&unless))
            }
        };
        if applies {
            excluded.extend(rule.excludes.iter().copied());
        }
    }

    let mut categories = BTreeMap::new();
    for (&category, members) in classification.by_category() {
        if !excluded.contains(&category) {
            categories.insert(category, members.clone());
        }
    }
    PrunedSet { categories }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// No rule excludes itself or touches a spouse, and exclusion is not
    /// symmetric: no pair of categories excludes each other.
    #[test]
    fn test_table_sanity() {
        let bars = |a: HeirCategory, b: HeirCategory| {
            RULES
                .iter()
                .any(|rule| rule.by == a && rule.excludes.contains(&b))
        };
        for rule in RULES {
            assert!(!rule.by.is_spouse(), "{:?} must not exclude", rule.by);
            for &target in rule.excludes {
                assert!(!target.is_spouse(), "{:?} must not be excluded", target);
                assert_ne!(rule.by, target, "{:?} excludes itself", rule.by);
                assert!(
                    !bars(target, rule.by),
                    "{:?} and {:?} exclude each other",
                    rule.by,
                    target
                );
            }
        }
    }

    /// Every non-spouse category bars distant kindred.
    #[test]
    fn test_distant_kindred_barred_by_all() {
        use HeirCategory::*;
        let all = [
            Son,
            Daughter,
            Grandson,
            Granddaughter,
            Father,
            Mother,
            Grandfather,
            Grandmother,
            BrotherFull,
            BrotherPaternal,
            BrotherMaternal,
            SisterFull,
            SisterPaternal,
            SisterMaternal,
            NephewFull,
            NephewPaternal,
            UncleFull,
            UnclePaternal,
            SonOfUncleFull,
            SonOfUnclePaternal,
        ];
        for category in all {
            let bars_distant = RULES.iter().any(|rule| {
                rule.by == category
                    && matches!(rule.precondition, Precondition::Always)
                    && rule.excludes.contains(&DistantKindred)
            });
            assert!(bars_distant, "{:?} must bar distant kindred", category);
        }
    }
}
