//! Relationship edge kinds and lineage paths.

use std::fmt;

/// Which parents a pair of siblings shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiblingKind {
    /// Same father and same mother.
    Full,
    /// Same father only.
    Paternal,
    /// Same mother only.
    Maternal,
}

impl fmt::Display for SiblingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiblingKind::Full => write!(f, "full"),
            SiblingKind::Paternal => write!(f, "paternal"),
            SiblingKind::Maternal => write!(f, "maternal"),
        }
    }
}

/// Edge kind accepted by `FamilyTree::add_relationship`.
///
/// `add_relationship(a, kind, b)` reads as "b is a's `kind`":
/// `(child, Father, f)` makes `f` the father of `child`,
/// `(parent, Child, c)` makes `c` a child of `parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Father,
    Mother,
    Child,
    Spouse,
    Sibling(SiblingKind),
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Father => write!(f, "father"),
            RelationKind::Mother => write!(f, "mother"),
            RelationKind::Child => write!(f, "child"),
            RelationKind::Spouse => write!(f, "spouse"),
            RelationKind::Sibling(kind) => write!(f, "{} sibling", kind),
        }
    }
}

/// One primitive step on the lineage path from the deceased to a relative.
///
/// Uncles, nephews and cousins are not steps of their own; they arise as
/// composites (`[Father, Brother(Full)]`, `[Brother(Full), Son]`, ...).
/// The classifier's transition table consumes these steps one at a time;
/// the number of steps is the degree of the relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationStep {
    Father,
    Mother,
    Son,
    Daughter,
    Husband,
    Wife,
    Brother(SiblingKind),
    Sister(SiblingKind),
}
