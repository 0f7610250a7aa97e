//! Shared scaffolding: a small builder around `FamilyTree` so scenario
//! tests read like the family constellations they encode.

#![allow(dead_code)]

use mwareeth::domain::{FamilyTree, PersonId, RelationKind, Sex, SiblingKind};

pub struct Family {
    pub tree: FamilyTree,
    pub deceased: PersonId,
}

impl Family {
    /// Start a tree around a deceased person of the given sex.
    pub fn deceased(name: &str, sex: Sex) -> Self {
        let mut tree = FamilyTree::new();
        let deceased = tree.add_person(name, sex, false);
        tree.set_deceased(deceased).unwrap();
        Family { tree, deceased }
    }

    pub fn person(&mut self, name: &str, sex: Sex, alive: bool) -> PersonId {
        self.tree.add_person(name, sex, alive)
    }

    pub fn relate(&mut self, person: PersonId, kind: RelationKind, relative: PersonId) {
        self.tree.add_relationship(person, kind, relative).unwrap();
    }

    /// Add a spouse of the deceased.
    pub fn spouse(&mut self, name: &str, sex: Sex) -> PersonId {
        let id = self.tree.add_person(name, sex, true);
        self.tree
            .add_relationship(self.deceased, RelationKind::Spouse, id)
            .unwrap();
        id
    }

    /// Add an alive child of the deceased.
    pub fn child(&mut self, name: &str, sex: Sex) -> PersonId {
        self.child_of(self.deceased, name, sex, true)
    }

    /// Add a child of any person.
    pub fn child_of(&mut self, parent: PersonId, name: &str, sex: Sex, alive: bool) -> PersonId {
        let id = self.tree.add_person(name, sex, alive);
        self.tree
            .add_relationship(parent, RelationKind::Child, id)
            .unwrap();
        id
    }

    pub fn father(&mut self, name: &str, alive: bool) -> PersonId {
        self.father_of(self.deceased, name, alive)
    }

    pub fn father_of(&mut self, person: PersonId, name: &str, alive: bool) -> PersonId {
        let id = self.tree.add_person(name, Sex::Male, alive);
        self.tree
            .add_relationship(person, RelationKind::Father, id)
            .unwrap();
        id
    }

    pub fn mother(&mut self, name: &str, alive: bool) -> PersonId {
        self.mother_of(self.deceased, name, alive)
    }

    pub fn mother_of(&mut self, person: PersonId, name: &str, alive: bool) -> PersonId {
        let id = self.tree.add_person(name, Sex::Female, alive);
        self.tree
            .add_relationship(person, RelationKind::Mother, id)
            .unwrap();
        id
    }

    /// Add a declared sibling of the deceased.
    pub fn sibling(&mut self, name: &str, sex: Sex, kind: SiblingKind) -> PersonId {
        let id = self.tree.add_person(name, sex, true);
        self.tree
            .add_relationship(self.deceased, RelationKind::Sibling(kind), id)
            .unwrap();
        id
    }
}
