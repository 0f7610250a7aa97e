//! Arena-based family tree centered on the deceased.
//!
//! One `FamilyTree` instance is self-contained: there is no global registry,
//! so independent trees can be built and computed over concurrently
//! ("what-if" recomputation after edits). Edits take `&mut self`, which
//! serializes them per tree; the engine only ever borrows a tree read-only.

use std::collections::{HashMap, HashSet, VecDeque};

use generational_arena::Arena;
use tracing::instrument;

use super::error::{DomainError, DomainResult};
use super::person::{Person, PersonId, Sex};
use super::relationship::{RelationKind, SiblingKind};

#[derive(Debug, Default)]
pub struct FamilyTree {
    arena: Arena<Person>,
    deceased: Option<PersonId>,
}

impl FamilyTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            deceased: None,
        }
    }

    #[instrument(level = "trace", skip(self, name))]
    pub fn add_person(&mut self, name: impl Into<String>, sex: Sex, alive: bool) -> PersonId {
        self.arena.insert(Person::new(name, sex, alive))
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.arena.get(id)
    }

    fn get(&self, id: PersonId) -> DomainResult<&Person> {
        self.arena.get(id).ok_or(DomainError::UnknownPerson)
    }

    /// Mark the person whose estate is being divided. Their alive flag is
    /// forced to false.
    #[instrument(level = "debug", skip(self))]
    pub fn set_deceased(&mut self, id: PersonId) -> DomainResult<()> {
        self.get(id)?;
        if let Some(person) = self.arena.get_mut(id) {
            person.alive = false;
        }
        self.deceased = Some(id);
        Ok(())
    }

    pub fn deceased(&self) -> Option<PersonId> {
        self.deceased
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Iterate all persons in insertion order. Arena iteration is
    /// deterministic for a given build sequence, which keeps the whole
    /// pipeline deterministic.
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &Person)> {
        self.arena.iter()
    }

    /// Add a typed relationship edge: `relative` is `person`'s `kind`.
    ///
    /// Rejects edits that would violate a structural invariant; the tree is
    /// unchanged on error.
    #[instrument(level = "debug", skip(self))]
    pub fn add_relationship(
        &mut self,
        person: PersonId,
        kind: RelationKind,
        relative: PersonId,
    ) -> DomainResult<()> {
        if person == relative {
            return Err(DomainError::SelfRelationship(self.get(person)?.name.clone()));
        }
        match kind {
            RelationKind::Father => self.set_parent(person, relative, Sex::Male),
            RelationKind::Mother => self.set_parent(person, relative, Sex::Female),
            RelationKind::Child => {
                let parent_sex = self.get(person)?.sex;
                self.set_parent(relative, person, parent_sex)
            }
            RelationKind::Spouse => self.set_spouse(person, relative),
            RelationKind::Sibling(subtype) => self.set_sibling(person, relative, subtype),
        }
    }

    fn set_parent(&mut self, child: PersonId, parent: PersonId, role_sex: Sex) -> DomainResult<()> {
        let role = match role_sex {
            Sex::Male => "father",
            Sex::Female => "mother",
        };
        let parent_person = self.get(parent)?;
        if parent_person.sex != role_sex {
            return Err(DomainError::SexMismatch {
                name: parent_person.name.clone(),
                sex: match parent_person.sex {
                    Sex::Male => "male",
                    Sex::Female => "female",
                },
                role,
            });
        }
        let child_person = self.get(child)?;
        let existing = match role_sex {
            Sex::Male => child_person.father,
            Sex::Female => child_person.mother,
        };
        match existing {
            Some(current) if current == parent => return Ok(()),
            Some(_) => {
                return Err(DomainError::SecondParent {
                    child: child_person.name.clone(),
                    role,
                })
            }
            None => {}
        }
        if self.are_spouses(child, parent) || self.declared_sibling_kind(child, parent).is_some() {
            return Err(self.conflict(child, parent));
        }
        // The child (or any of their descendants) becoming the parent's
        // ancestor would close a cycle.
        if self.is_ancestor_of(child, parent) {
            return Err(DomainError::ParentCycle {
                ancestor: self.get(parent)?.name.clone(),
                descendant: self.get(child)?.name.clone(),
            });
        }
        match role_sex {
            Sex::Male => self.arena[child].father = Some(parent),
            Sex::Female => self.arena[child].mother = Some(parent),
        }
        self.arena[parent].children.push(child);
        Ok(())
    }

    fn set_spouse(&mut self, a: PersonId, b: PersonId) -> DomainResult<()> {
        let (pa, pb) = (self.get(a)?, self.get(b)?);
        if pa.sex == pb.sex {
            return Err(DomainError::SexMismatch {
                name: pb.name.clone(),
                sex: match pb.sex {
                    Sex::Male => "male",
                    Sex::Female => "female",
                },
                role: "spouse",
            });
        }
        if self.is_parent_child(a, b) || self.declared_sibling_kind(a, b).is_some() {
            return Err(self.conflict(a, b));
        }
        if !self.are_spouses(a, b) {
            self.arena[a].spouses.push(b);
            self.arena[b].spouses.push(a);
        }
        Ok(())
    }

    fn set_sibling(&mut self, a: PersonId, b: PersonId, subtype: SiblingKind) -> DomainResult<()> {
        self.get(a)?;
        self.get(b)?;
        if self.is_parent_child(a, b) || self.are_spouses(a, b) {
            return Err(self.conflict(a, b));
        }
        match self.declared_sibling_kind(a, b) {
            Some(existing) if existing == subtype => Ok(()),
            Some(_) => Err(self.conflict(a, b)),
            None => {
                self.arena[a].siblings.push((b, subtype));
                self.arena[b].siblings.push((a, subtype));
                Ok(())
            }
        }
    }

    fn conflict(&self, a: PersonId, b: PersonId) -> DomainError {
        let existing = if self.is_parent_child(a, b) {
            "parent and child"
        } else if self.are_spouses(a, b) {
            "spouses"
        } else {
            "siblings"
        };
        DomainError::ConflictingRelationship {
            a: self.arena[a].name.clone(),
            b: self.arena[b].name.clone(),
            existing,
        }
    }

    // ---- read-only traversal ----

    pub fn father_of(&self, id: PersonId) -> Option<PersonId> {
        self.arena.get(id)?.father
    }

    pub fn mother_of(&self, id: PersonId) -> Option<PersonId> {
        self.arena.get(id)?.mother
    }

    pub fn children_of(&self, id: PersonId) -> &[PersonId] {
        self.arena
            .get(id)
            .map(|p| p.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn spouses_of(&self, id: PersonId) -> &[PersonId] {
        self.arena
            .get(id)
            .map(|p| p.spouses.as_slice())
            .unwrap_or(&[])
    }

    pub fn are_spouses(&self, a: PersonId, b: PersonId) -> bool {
        self.arena
            .get(a)
            .map(|p| p.spouses.contains(&b))
            .unwrap_or(false)
    }

    fn is_parent_child(&self, a: PersonId, b: PersonId) -> bool {
        let parent_of = |x: PersonId, y: PersonId| {
            self.arena
                .get(y)
                .map(|p| p.father == Some(x) || p.mother == Some(x))
                .unwrap_or(false)
        };
        parent_of(a, b) || parent_of(b, a)
    }

    fn declared_sibling_kind(&self, a: PersonId, b: PersonId) -> Option<SiblingKind> {
        self.arena
            .get(a)?
            .siblings
            .iter()
            .find(|(id, _)| *id == b)
            .map(|(_, kind)| *kind)
    }

    /// Siblings of a person: explicitly declared edges merged with siblings
    /// derived from shared parents. Derived subtype: both parents shared →
    /// full, father only → paternal, mother only → maternal. A derived
    /// subtype wins over a declared one for the same pair.
    #[instrument(level = "trace", skip(self))]
    pub fn siblings_of(&self, id: PersonId) -> Vec<(PersonId, SiblingKind)> {
        let Some(person) = self.arena.get(id) else {
            return Vec::new();
        };
        let mut kinds: HashMap<PersonId, SiblingKind> = HashMap::new();
        let mut order: Vec<PersonId> = Vec::new();

        let mut visit = |candidate: PersonId,
                         kinds: &mut HashMap<PersonId, SiblingKind>,
                         order: &mut Vec<PersonId>| {
            if candidate == id || kinds.contains_key(&candidate) {
                return;
            }
            let other = &self.arena[candidate];
            let same_father =
                person.father.is_some() && other.father == person.father;
            let same_mother =
                person.mother.is_some() && other.mother == person.mother;
            let kind = match (same_father, same_mother) {
                (true, true) => SiblingKind::Full,
                (true, false) => SiblingKind::Paternal,
                (false, true) => SiblingKind::Maternal,
                (false, false) => return,
            };
            kinds.insert(candidate, kind);
            order.push(candidate);
        };

        if let Some(father) = person.father {
            for &child in &self.arena[father].children {
                visit(child, &mut kinds, &mut order);
            }
        }
        if let Some(mother) = person.mother {
            for &child in &self.arena[mother].children {
                visit(child, &mut kinds, &mut order);
            }
        }
        for &(sibling, declared) in &person.siblings {
            kinds.entry(sibling).or_insert(declared);
            if !order.contains(&sibling) {
                order.push(sibling);
            }
        }

        order.into_iter().map(|id| (id, kinds[&id])).collect()
    }

    /// Is `ancestor` an ancestor of `descendant` via parent edges?
    pub fn is_ancestor_of(&self, ancestor: PersonId, descendant: PersonId) -> bool {
        let mut stack = vec![descendant];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            let Some(person) = self.arena.get(current) else {
                continue;
            };
            for parent in [person.father, person.mother].into_iter().flatten() {
                if parent == ancestor {
                    return true;
                }
                stack.push(parent);
            }
        }
        false
    }

    /// Everyone reachable from the deceased over any relationship edge
    /// (parents, children, spouses, declared siblings), in BFS order.
    #[instrument(level = "debug", skip(self))]
    pub fn reachable_from_deceased(&self) -> DomainResult<HashSet<PersonId>> {
        let root = self.deceased.ok_or(DomainError::DeceasedNotSet)?;
        let mut seen = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            let person = &self.arena[current];
            let neighbours = person
                .father
                .into_iter()
                .chain(person.mother)
                .chain(person.children.iter().copied())
                .chain(person.spouses.iter().copied())
                .chain(person.siblings.iter().map(|(id, _)| *id));
            for next in neighbours {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        Ok(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(people: &[(&str, Sex, bool)]) -> (FamilyTree, Vec<PersonId>) {
        let mut tree = FamilyTree::new();
        let ids = people
            .iter()
            .map(|(name, sex, alive)| tree.add_person(*name, *sex, *alive))
            .collect();
        (tree, ids)
    }

    #[test]
    fn test_parent_cycle_rejected() {
        let (mut tree, ids) = tree_with(&[
            ("a", Sex::Male, true),
            ("b", Sex::Male, true),
            ("c", Sex::Male, true),
        ]);
        tree.add_relationship(ids[1], RelationKind::Father, ids[0])
            .unwrap();
        tree.add_relationship(ids[2], RelationKind::Father, ids[1])
            .unwrap();
        // a -> b -> c; making c the father of a closes the loop
        let err = tree
            .add_relationship(ids[0], RelationKind::Father, ids[2])
            .unwrap_err();
        assert!(matches!(err, DomainError::ParentCycle { .. }));
    }

    #[test]
    fn test_second_father_rejected() {
        let (mut tree, ids) = tree_with(&[
            ("child", Sex::Male, true),
            ("f1", Sex::Male, true),
            ("f2", Sex::Male, true),
        ]);
        tree.add_relationship(ids[0], RelationKind::Father, ids[1])
            .unwrap();
        let err = tree
            .add_relationship(ids[0], RelationKind::Father, ids[2])
            .unwrap_err();
        assert!(matches!(err, DomainError::SecondParent { .. }));
    }

    #[test]
    fn test_spouse_requires_opposite_sex() {
        let (mut tree, ids) = tree_with(&[("a", Sex::Male, true), ("b", Sex::Male, true)]);
        let err = tree
            .add_relationship(ids[0], RelationKind::Spouse, ids[1])
            .unwrap_err();
        assert!(matches!(err, DomainError::SexMismatch { .. }));
    }

    #[test]
    fn test_spouse_and_sibling_conflict() {
        let (mut tree, ids) = tree_with(&[("a", Sex::Male, true), ("b", Sex::Female, true)]);
        tree.add_relationship(ids[0], RelationKind::Spouse, ids[1])
            .unwrap();
        let err = tree
            .add_relationship(ids[0], RelationKind::Sibling(SiblingKind::Full), ids[1])
            .unwrap_err();
        assert!(matches!(err, DomainError::ConflictingRelationship { .. }));
    }

    #[test]
    fn test_siblings_derived_from_shared_parents() {
        let (mut tree, ids) = tree_with(&[
            ("me", Sex::Male, true),
            ("father", Sex::Male, false),
            ("mother", Sex::Female, false),
            ("full", Sex::Male, true),
            ("paternal", Sex::Female, true),
        ]);
        tree.add_relationship(ids[0], RelationKind::Father, ids[1])
            .unwrap();
        tree.add_relationship(ids[0], RelationKind::Mother, ids[2])
            .unwrap();
        tree.add_relationship(ids[3], RelationKind::Father, ids[1])
            .unwrap();
        tree.add_relationship(ids[3], RelationKind::Mother, ids[2])
            .unwrap();
        tree.add_relationship(ids[4], RelationKind::Father, ids[1])
            .unwrap();

        let siblings = tree.siblings_of(ids[0]);
        assert_eq!(siblings.len(), 2);
        assert!(siblings.contains(&(ids[3], SiblingKind::Full)));
        assert!(siblings.contains(&(ids[4], SiblingKind::Paternal)));
    }

    #[test]
    fn test_reachability_requires_deceased() {
        let (tree, _) = tree_with(&[("a", Sex::Male, true)]);
        assert_eq!(
            tree.reachable_from_deceased().unwrap_err(),
            DomainError::DeceasedNotSet
        );
    }
}
