//! Heir categories: the closed set of relation-to-deceased classes that the
//! inheritance rules are written against.

use std::fmt;

/// Relation-to-deceased class assigned by the classifier.
///
/// Every alive relative occupies exactly one category. The variant order is
/// the display/report order (spouses, descendants, ascendants, siblings,
/// then the agnatic collateral chain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeirCategory {
    Husband,
    Wife,
    Son,
    Daughter,
    /// Son's son, recursing through sons.
    Grandson,
    /// Son's daughter (or grandson's daughter, ...).
    Granddaughter,
    Father,
    Mother,
    /// Agnatic grandfather: father's father, recursing through fathers.
    Grandfather,
    /// Mother's mother or father's mother, recursing through mothers.
    Grandmother,
    BrotherFull,
    BrotherPaternal,
    BrotherMaternal,
    SisterFull,
    SisterPaternal,
    SisterMaternal,
    /// Full brother's son, recursing through sons.
    NephewFull,
    /// Paternal brother's son, recursing through sons.
    NephewPaternal,
    /// Father's full brother.
    UncleFull,
    /// Father's paternal brother.
    UnclePaternal,
    /// Full uncle's son, recursing through sons.
    SonOfUncleFull,
    /// Paternal uncle's son, recursing through sons.
    SonOfUnclePaternal,
    /// Ḏawū al-arḥām: every blood relation reached through a female link
    /// outside the categories above (daughter's children, mother's father,
    /// aunts, maternal uncles, nieces, ...).
    DistantKindred,
}

impl HeirCategory {
    /// Precedence rank used when one person is reachable by several paths:
    /// the lower rank wins (descendants > parents > spouse > siblings >
    /// grandparents > collaterals > distant kindred).
    pub fn precedence(&self) -> u8 {
        use HeirCategory::*;
        match self {
            Son | Daughter | Grandson | Granddaughter => 0,
            Father | Mother => 1,
            Husband | Wife => 2,
            BrotherFull | BrotherPaternal | BrotherMaternal | SisterFull | SisterPaternal
            | SisterMaternal => 3,
            Grandfather | Grandmother => 4,
            NephewFull | NephewPaternal | UncleFull | UnclePaternal | SonOfUncleFull
            | SonOfUnclePaternal => 5,
            DistantKindred => 6,
        }
    }

    pub fn is_spouse(&self) -> bool {
        matches!(self, HeirCategory::Husband | HeirCategory::Wife)
    }

    /// Categories that (in at least one constellation) carry a fixed
    /// Quranic share.
    pub fn is_fixed_sharer(&self) -> bool {
        use HeirCategory::*;
        matches!(
            self,
            Husband
                | Wife
                | Father
                | Mother
                | Grandfather
                | Grandmother
                | Daughter
                | Granddaughter
                | SisterFull
                | SisterPaternal
                | SisterMaternal
                | BrotherMaternal
        )
    }

    /// Categories that (in at least one constellation) take the residue as
    /// agnatic heirs.
    pub fn is_residuary(&self) -> bool {
        use HeirCategory::*;
        matches!(
            self,
            Son | Grandson
                | Father
                | Grandfather
                | BrotherFull
                | BrotherPaternal
                | NephewFull
                | NephewPaternal
                | UncleFull
                | UnclePaternal
                | SonOfUncleFull
                | SonOfUnclePaternal
        )
    }

    /// Is this category a descendant of the deceased?
    pub fn is_descendant(&self) -> bool {
        use HeirCategory::*;
        matches!(self, Son | Daughter | Grandson | Granddaughter)
    }

    /// Is this category a sibling of the deceased?
    pub fn is_sibling(&self) -> bool {
        use HeirCategory::*;
        matches!(
            self,
            BrotherFull | BrotherPaternal | BrotherMaternal | SisterFull | SisterPaternal
                | SisterMaternal
        )
    }

    pub fn label(&self) -> &'static str {
        use HeirCategory::*;
        match self {
            Husband => "husband",
            Wife => "wife",
            Son => "son",
            Daughter => "daughter",
            Grandson => "grandson",
            Granddaughter => "granddaughter",
            Father => "father",
            Mother => "mother",
            Grandfather => "grandfather",
            Grandmother => "grandmother",
            BrotherFull => "full brother",
            BrotherPaternal => "paternal brother",
            BrotherMaternal => "maternal brother",
            SisterFull => "full sister",
            SisterPaternal => "paternal sister",
            SisterMaternal => "maternal sister",
            NephewFull => "full brother's son",
            NephewPaternal => "paternal brother's son",
            UncleFull => "full uncle",
            UnclePaternal => "paternal uncle",
            SonOfUncleFull => "full uncle's son",
            SonOfUnclePaternal => "paternal uncle's son",
            DistantKindred => "distant kindred",
        }
    }
}

impl fmt::Display for HeirCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::HeirCategory::{self, *};

    const ALL: [HeirCategory; 23] = [
        Husband,
        Wife,
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
        DistantKindred,
    ];

    /// Every category has at least one entitlement route: a fixed share, a
    /// residual claim, or the distant-kindred fallback. Only the father
    /// line carries both kinds at once.
    #[test]
    fn test_every_category_has_an_entitlement_route() {
        for category in ALL {
            assert!(
                category.is_fixed_sharer()
                    || category.is_residuary()
                    || category == DistantKindred,
                "{:?} has no entitlement route",
                category
            );
            if category.is_fixed_sharer() && category.is_residuary() {
                assert!(
                    matches!(category, Father | Grandfather),
                    "{:?} cannot be both fixed and residuary",
                    category
                );
            }
        }
    }

    #[test]
    fn test_precedence_orders_descendants_first() {
        assert!(Son.precedence() < Father.precedence());
        assert!(Father.precedence() < Husband.precedence());
        assert!(Husband.precedence() < BrotherFull.precedence());
        assert!(BrotherFull.precedence() < Grandfather.precedence());
        assert!(Grandfather.precedence() < UncleFull.precedence());
        assert!(UncleFull.precedence() < DistantKindred.precedence());
    }
}
