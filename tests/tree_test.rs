//! Tree-edit invariants: every structural violation is rejected at edit
//! time and leaves the tree unchanged.

mod common;

use common::Family;
use mwareeth::domain::{DomainError, RelationKind, Sex, SiblingKind};

#[test]
fn test_self_ancestor_rejected_at_edit_time() {
    let mut family = Family::deceased("ahmed", Sex::Male);
    let son = family.child("karim", Sex::Male);
    let grandson = family.child_of(son, "nabil", Sex::Male, true);

    // Declaring the deceased's grandson as the deceased's father would
    // make ahmed his own ancestor.
    let err = family
        .tree
        .add_relationship(family.deceased, RelationKind::Father, grandson)
        .unwrap_err();
    assert!(matches!(err, DomainError::ParentCycle { .. }));

    // The rejected edit must not have touched the tree.
    assert_eq!(family.tree.father_of(family.deceased), None);
}

#[test]
fn test_second_pair_of_parents_rejected() {
    let mut family = Family::deceased("ahmed", Sex::Male);
    family.mother("amina", true);
    let other = family.person("zahra", Sex::Female, true);

    let err = family
        .tree
        .add_relationship(family.deceased, RelationKind::Mother, other)
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::SecondParent { role: "mother", .. }
    ));
}

#[test]
fn test_repeated_identical_parent_edge_is_idempotent() {
    let mut family = Family::deceased("ahmed", Sex::Male);
    let father = family.father("salim", true);
    family
        .tree
        .add_relationship(family.deceased, RelationKind::Father, father)
        .unwrap();
    assert_eq!(family.tree.children_of(father).len(), 1);
}

#[test]
fn test_female_father_rejected() {
    let mut family = Family::deceased("ahmed", Sex::Male);
    let woman = family.person("amina", Sex::Female, true);
    let err = family
        .tree
        .add_relationship(family.deceased, RelationKind::Father, woman)
        .unwrap_err();
    assert!(matches!(err, DomainError::SexMismatch { role: "father", .. }));
}

#[test]
fn test_spouse_then_sibling_conflicts() {
    let mut family = Family::deceased("ahmed", Sex::Male);
    let wife = family.spouse("huda", Sex::Female);
    let err = family
        .tree
        .add_relationship(family.deceased, RelationKind::Sibling(SiblingKind::Full), wife)
        .unwrap_err();
    assert!(matches!(err, DomainError::ConflictingRelationship { .. }));
}

#[test]
fn test_parent_then_spouse_conflicts() {
    let mut family = Family::deceased("ahmed", Sex::Male);
    let mother = family.mother("amina", true);
    let err = family
        .tree
        .add_relationship(family.deceased, RelationKind::Spouse, mother)
        .unwrap_err();
    assert!(matches!(err, DomainError::ConflictingRelationship { .. }));
}

#[test]
fn test_conflicting_sibling_subtypes_rejected() {
    let mut family = Family::deceased("ahmed", Sex::Male);
    let brother = family.sibling("omar", Sex::Male, SiblingKind::Full);
    let err = family
        .tree
        .add_relationship(
            family.deceased,
            RelationKind::Sibling(SiblingKind::Maternal),
            brother,
        )
        .unwrap_err();
    assert!(matches!(err, DomainError::ConflictingRelationship { .. }));
}

#[test]
fn test_sibling_subtype_derived_from_parents() {
    let mut family = Family::deceased("ahmed", Sex::Male);
    let father = family.father("salim", false);
    let mother = family.mother("amina", false);
    let full = family.child_of(father, "omar", Sex::Male, true);
    family.relate(full, RelationKind::Mother, mother);
    let paternal = family.child_of(father, "bilal", Sex::Male, true);
    let maternal = family.child_of(mother, "yusuf", Sex::Male, true);

    let siblings = family.tree.siblings_of(family.deceased);
    assert_eq!(siblings.len(), 3);
    assert!(siblings.contains(&(full, SiblingKind::Full)));
    assert!(siblings.contains(&(paternal, SiblingKind::Paternal)));
    assert!(siblings.contains(&(maternal, SiblingKind::Maternal)));
}

#[test]
fn test_trees_are_independent() {
    // Two trees built from the same constellation share no state: editing
    // one never shows up in the other.
    let mut a = Family::deceased("ahmed", Sex::Male);
    a.child("karim", Sex::Male);
    let mut b = Family::deceased("ahmed", Sex::Male);
    b.child("karim", Sex::Male);

    b.child("nadia", Sex::Female);
    assert_eq!(a.tree.children_of(a.deceased).len(), 1);
    assert_eq!(b.tree.children_of(b.deceased).len(), 2);
}
