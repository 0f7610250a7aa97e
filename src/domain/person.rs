//! Person records stored in the family tree arena.

use std::fmt;

use generational_arena::Index;

use super::relationship::SiblingKind;

/// Arena index of a person within one `FamilyTree`.
pub type PersonId = Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "male"),
            Sex::Female => write!(f, "female"),
        }
    }
}

/// A person in the family tree.
///
/// Edges are stored redundantly on both endpoints (a father lists the child,
/// the child lists the father) so traversal never needs a reverse lookup.
/// All edge mutation goes through `FamilyTree`, which enforces the
/// structural invariants.
#[derive(Debug, Clone)]
pub struct Person {
    pub name: String,
    pub sex: Sex,
    /// Whether this person was alive at the time of the deceased's death.
    pub alive: bool,
    pub father: Option<PersonId>,
    pub mother: Option<PersonId>,
    pub spouses: Vec<PersonId>,
    pub children: Vec<PersonId>,
    /// Explicitly declared sibling edges, used when the shared parents are
    /// not part of the tree.
    pub siblings: Vec<(PersonId, SiblingKind)>,
}

impl Person {
    pub fn new(name: impl Into<String>, sex: Sex, alive: bool) -> Self {
        Person {
            name: name.into(),
            sex,
            alive,
            father: None,
            mother: None,
            spouses: Vec::new(),
            children: Vec::new(),
            siblings: Vec::new(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.sex)
    }
}
