//! Share calculation: fixed Quranic fractions first, then the residue.
//!
//! Fixed shares are per-category totals split per capita; residual heirs
//! divide whatever remains, males counting double when a mixed agnatic
//! group shares. The output may sum to less or more than 1; balancing is
//! the normalizer's job.

use tracing::instrument;

use crate::domain::{Fraction, HeirCategory, PersonId};

use super::classifier::Classification;
use super::division::{ShareEntry, ShareKind};
use super::exclusion::PrunedSet;

use HeirCategory::*;

/// The residual group entitled to the residue, nearest class first.
#[derive(Debug)]
enum ResidualGroup {
    /// Agnatic males, possibly sharing 2:1 with the sisters/daughters of
    /// their class.
    Agnates {
        male_category: HeirCategory,
        female_category: Option<HeirCategory>,
    },
    /// Father (or the agnatic grandfather standing in for him) taking the
    /// residue, on top of his 1/6 when female descendants exist.
    ActingFather(HeirCategory),
    /// Sisters made residuary by the presence of daughters.
    SistersWithDaughters(HeirCategory),
    /// Distant kindred splitting the whole residue equally; only possible
    /// when nobody but a spouse remains beside them.
    DistantKindred,
}

fn split_equally(
    entries: &mut Vec<ShareEntry>,
    category: HeirCategory,
    members: &[PersonId],
    total: Fraction,
    kind: ShareKind,
) {
    let each = total / members.len() as i64;
    for &person in members {
        entries.push(ShareEntry {
            person,
            category,
            fraction: each,
            kind,
        });
    }
}

/// Compute raw shares for the pruned set.
///
/// The sibling count that restricts the mother comes from the classified
/// set: siblings barred by the father still restrict her.
#[instrument(level = "debug", skip(classification, pruned))]
pub fn compute_shares(classification: &Classification, pruned: &PrunedSet) -> Vec<ShareEntry> {
    let has_descendant = pruned.has_descendant();
    let restricting_siblings = classification.sibling_count() >= 2;

    let mut entries: Vec<ShareEntry> = Vec::new();
    let mut fixed_total = Fraction::ZERO;

    // Spouse.
    let spouse_total = if pruned.contains(Husband) {
        let share = if has_descendant {
            Fraction::new(1, 4)
        } else {
            Fraction::new(1, 2)
        };
        split_equally(
            &mut entries,
            Husband,
            pruned.members(Husband),
            share,
            ShareKind::Fixed,
        );
        share
    } else if pruned.contains(Wife) {
        let share = if has_descendant {
            Fraction::new(1, 8)
        } else {
            Fraction::new(1, 4)
        };
        split_equally(
            &mut entries,
            Wife,
            pruned.members(Wife),
            share,
            ShareKind::Fixed,
        );
        share
    } else {
        Fraction::ZERO
    };
    fixed_total = fixed_total + spouse_total;

    // Mother. In the two ʿUmariyyah constellations (spouse + both parents,
    // nothing else) she takes a third of what is left after the spouse.
    if pruned.contains(Mother) {
        let umariyyah = !spouse_total.is_zero()
            && pruned.contains(Father)
            && pruned.categories().len() == 3
            && !restricting_siblings;
        let share = if umariyyah {
            (Fraction::ONE - spouse_total) / 3
        } else if has_descendant || restricting_siblings {
            Fraction::new(1, 6)
        } else {
            Fraction::new(1, 3)
        };
        split_equally(
            &mut entries,
            Mother,
            pruned.members(Mother),
            share,
            ShareKind::Fixed,
        );
        fixed_total = fixed_total + share;
    }

    // Grandmothers share a sixth (only present when the mother is not).
    if pruned.contains(Grandmother) {
        let share = Fraction::new(1, 6);
        split_equally(
            &mut entries,
            Grandmother,
            pruned.members(Grandmother),
            share,
            ShareKind::Fixed,
        );
        fixed_total = fixed_total + share;
    }

    // Father, or the agnatic grandfather standing in for him: a fixed
    // sixth whenever descendants exist. Residue participation is decided
    // with the residual group below.
    let acting_father = if pruned.contains(Father) {
        Some(Father)
    } else if pruned.contains(Grandfather) {
        Some(Grandfather)
    } else {
        None
    };
    if let Some(category) = acting_father {
        if has_descendant {
            let share = Fraction::new(1, 6);
            split_equally(
                &mut entries,
                category,
                pruned.members(category),
                share,
                ShareKind::Fixed,
            );
            fixed_total = fixed_total + share;
        }
    }

    // Daughters: fixed only while no son makes them residuary.
    if pruned.contains(Daughter) && !pruned.contains(Son) {
        let share = if pruned.count(Daughter) == 1 {
            Fraction::new(1, 2)
        } else {
            Fraction::new(2, 3)
        };
        split_equally(
            &mut entries,
            Daughter,
            pruned.members(Daughter),
            share,
            ShareKind::Fixed,
        );
        fixed_total = fixed_total + share;
    }

    // Granddaughters: fixed only while no grandson makes them residuary.
    // Two or more daughters already excluded them; one daughter leaves
    // them the sixth that completes two thirds.
    if pruned.contains(Granddaughter) && !pruned.contains(Grandson) {
        let share = match pruned.count(Daughter) {
            0 => {
                if pruned.count(Granddaughter) == 1 {
                    Fraction::new(1, 2)
                } else {
                    Fraction::new(2, 3)
                }
            }
            _ => Fraction::new(1, 6),
        };
        split_equally(
            &mut entries,
            Granddaughter,
            pruned.members(Granddaughter),
            share,
            ShareKind::Fixed,
        );
        fixed_total = fixed_total + share;
    }

    // Maternal siblings: sexes inherit equally, one sixth alone, a third
    // shared from two upward.
    let maternal_count = pruned.count(BrotherMaternal) + pruned.count(SisterMaternal);
    if maternal_count > 0 {
        let total = if maternal_count == 1 {
            Fraction::new(1, 6)
        } else {
            Fraction::new(1, 3)
        };
        let each = total / maternal_count as i64;
        for category in [BrotherMaternal, SisterMaternal] {
            for &person in pruned.members(category) {
                entries.push(ShareEntry {
                    person,
                    category,
                    fraction: each,
                    kind: ShareKind::Fixed,
                });
            }
        }
        fixed_total = fixed_total + total;
    }

    // Full sisters: fixed only when no full brother agnatizes them and no
    // daughter turns them residuary.
    if pruned.contains(SisterFull) && !pruned.contains(BrotherFull) && !has_descendant {
        let share = if pruned.count(SisterFull) == 1 {
            Fraction::new(1, 2)
        } else {
            Fraction::new(2, 3)
        };
        split_equally(
            &mut entries,
            SisterFull,
            pruned.members(SisterFull),
            share,
            ShareKind::Fixed,
        );
        fixed_total = fixed_total + share;
    }

    // Paternal sisters: as full sisters one tier out; a single full sister
    // leaves them the completing sixth.
    if pruned.contains(SisterPaternal) && !pruned.contains(BrotherPaternal) && !has_descendant {
        let share = match pruned.count(SisterFull) {
            0 => {
                if pruned.count(SisterPaternal) == 1 {
                    Fraction::new(1, 2)
                } else {
                    Fraction::new(2, 3)
                }
            }
            _ => Fraction::new(1, 6),
        };
        split_equally(
            &mut entries,
            SisterPaternal,
            pruned.members(SisterPaternal),
            share,
            ShareKind::Fixed,
        );
        fixed_total = fixed_total + share;
    }

    // Residue to the nearest residual class.
    let residue = Fraction::ONE - fixed_total;
    if residue.is_positive() {
        if let Some(group) = residual_group(pruned, acting_father, has_descendant) {
            distribute_residue(pruned, &mut entries, group, residue);
        }
    }

    // Stable by construction: entries are pushed in a fixed order per
    // category, so sorting by category alone keeps the output
    // deterministic.
    entries.sort_by_key(|entry| entry.category);
    entries
}

/// Pick the residual group, nearest class first. `None` means the residue
/// (if any) has nobody to absorb it and falls to the normalizer.
fn residual_group(
    pruned: &PrunedSet,
    acting_father: Option<HeirCategory>,
    has_descendant: bool,
) -> Option<ResidualGroup> {
    if pruned.contains(Son) {
        return Some(ResidualGroup::Agnates {
            male_category: Son,
            female_category: Some(Daughter),
        });
    }
    if pruned.contains(Grandson) {
        return Some(ResidualGroup::Agnates {
            male_category: Grandson,
            female_category: Some(Granddaughter),
        });
    }
    if let Some(category) = acting_father {
        // A male descendant would have taken the residue above; from here
        // the (grand)father is the nearest agnate.
        return Some(ResidualGroup::ActingFather(category));
    }
    if pruned.contains(BrotherFull) {
        return Some(ResidualGroup::Agnates {
            male_category: BrotherFull,
            female_category: Some(SisterFull),
        });
    }
    if pruned.contains(SisterFull) && has_descendant {
        return Some(ResidualGroup::SistersWithDaughters(SisterFull));
    }
    if pruned.contains(BrotherPaternal) {
        return Some(ResidualGroup::Agnates {
            male_category: BrotherPaternal,
            female_category: Some(SisterPaternal),
        });
    }
    if pruned.contains(SisterPaternal) && has_descendant && !pruned.contains(SisterFull) {
        return Some(ResidualGroup::SistersWithDaughters(SisterPaternal));
    }
    for category in [
        NephewFull,
        NephewPaternal,
        UncleFull,
        UnclePaternal,
        SonOfUncleFull,
        SonOfUnclePaternal,
    ] {
        if pruned.contains(category) {
            return Some(ResidualGroup::Agnates {
                male_category: category,
                female_category: None,
            });
        }
    }
    if pruned.contains(DistantKindred) {
        return Some(ResidualGroup::DistantKindred);
    }
    None
}

fn distribute_residue(
    pruned: &PrunedSet,
    entries: &mut Vec<ShareEntry>,
    group: ResidualGroup,
    residue: Fraction,
) {
    match group {
        ResidualGroup::Agnates {
            male_category,
            female_category,
        } => {
            let males = pruned.members(male_category);
            let females = female_category
                .map(|cat| pruned.members(cat))
                .unwrap_or(&[]);
            let units = 2 * males.len() as i64 + females.len() as i64;
            for &person in males {
                entries.push(ShareEntry {
                    person,
                    category: male_category,
                    fraction: residue * 2 / units,
                    kind: ShareKind::Residual,
                });
            }
            if let Some(category) = female_category {
                for &person in females {
                    entries.push(ShareEntry {
                        person,
                        category,
                        fraction: residue / units,
                        kind: ShareKind::Residual,
                    });
                }
            }
        }
        ResidualGroup::ActingFather(category) => {
            // He may already hold a fixed sixth; the residue folds into it.
            let members = pruned.members(category);
            let each = residue / members.len() as i64;
            let mut matched = false;
            for entry in entries.iter_mut().filter(|e| e.category == category) {
                entry.fraction = entry.fraction + each;
                entry.kind = ShareKind::Residual;
                matched = true;
            }
            if !matched {
                split_equally(entries, category, members, residue, ShareKind::Residual);
            }
        }
        ResidualGroup::SistersWithDaughters(category) => {
            split_equally(
                entries,
                category,
                pruned.members(category),
                residue,
                ShareKind::Residual,
            );
        }
        ResidualGroup::DistantKindred => {
            split_equally(
                entries,
                DistantKindred,
                pruned.members(DistantKindred),
                residue,
                ShareKind::Residual,
            );
        }
    }
}
