//! Family file loading: a TOML description of the §3 graph.
//!
//! The file names people once and declares typed edges between them; the
//! loader replays it through the tree-edit API, so every structural check
//! (cycles, second parents, conflicting kinds) applies to file input
//! exactly as it does to programmatic construction.
//!
//! ```toml
//! deceased = "ahmed"
//!
//! [[person]]
//! name = "ahmed"
//! sex = "male"
//! alive = false
//!
//! [[person]]
//! name = "fatima"
//! sex = "female"
//!
//! [[relationship]]
//! person = "fatima"
//! kind = "father"
//! relative = "ahmed"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::instrument;

use crate::domain::{FamilyTree, RelationKind, Sex, SiblingKind};

use super::error::{CliError, CliResult};

#[derive(Debug, Deserialize)]
pub struct FamilyFile {
    /// Name of the person whose estate is divided.
    pub deceased: String,
    #[serde(default, rename = "person")]
    pub persons: Vec<PersonEntry>,
    #[serde(default, rename = "relationship")]
    pub relationships: Vec<RelationshipEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PersonEntry {
    pub name: String,
    pub sex: SexEntry,
    #[serde(default = "default_alive")]
    pub alive: bool,
}

fn default_alive() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SexEntry {
    Male,
    Female,
}

impl From<SexEntry> for Sex {
    fn from(value: SexEntry) -> Self {
        match value {
            SexEntry::Male => Sex::Male,
            SexEntry::Female => Sex::Female,
        }
    }
}

/// `relative` is `person`'s `kind`.
#[derive(Debug, Deserialize)]
pub struct RelationshipEntry {
    pub person: String,
    pub kind: KindEntry,
    pub relative: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindEntry {
    Father,
    Mother,
    Child,
    Spouse,
    FullSibling,
    PaternalSibling,
    MaternalSibling,
}

impl From<KindEntry> for RelationKind {
    fn from(value: KindEntry) -> Self {
        match value {
            KindEntry::Father => RelationKind::Father,
            KindEntry::Mother => RelationKind::Mother,
            KindEntry::Child => RelationKind::Child,
            KindEntry::Spouse => RelationKind::Spouse,
            KindEntry::FullSibling => RelationKind::Sibling(SiblingKind::Full),
            KindEntry::PaternalSibling => RelationKind::Sibling(SiblingKind::Paternal),
            KindEntry::MaternalSibling => RelationKind::Sibling(SiblingKind::Maternal),
        }
    }
}

/// Read and build a family tree from a TOML file.
#[instrument(level = "debug")]
pub fn load_family_file(path: &Path) -> CliResult<FamilyTree> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: FamilyFile = toml::from_str(&content)?;
    build_tree(&file)
}

/// Replay a parsed family file through the tree-edit API.
pub fn build_tree(file: &FamilyFile) -> CliResult<FamilyTree> {
    let mut tree = FamilyTree::new();
    let mut ids = HashMap::new();

    for person in &file.persons {
        if ids.contains_key(person.name.as_str()) {
            return Err(CliError::DuplicateName(person.name.clone()));
        }
        let id = tree.add_person(person.name.clone(), person.sex.into(), person.alive);
        ids.insert(person.name.as_str(), id);
    }

    let lookup = |name: &str| {
        ids.get(name)
            .copied()
            .ok_or_else(|| CliError::UnknownName(name.to_string()))
    };

    for relationship in &file.relationships {
        let person = lookup(&relationship.person)?;
        let relative = lookup(&relationship.relative)?;
        tree.add_relationship(person, relationship.kind.into(), relative)?;
    }

    let deceased = lookup(&file.deceased)?;
    tree.set_deceased(deceased)?;
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal_family() {
        let file: FamilyFile = toml::from_str(
            r#"
            deceased = "ahmed"

            [[person]]
            name = "ahmed"
            sex = "male"
            alive = false

            [[person]]
            name = "salim"
            sex = "male"

            [[relationship]]
            person = "salim"
            kind = "father"
            relative = "ahmed"
            "#,
        )
        .unwrap();
        let tree = build_tree(&file).unwrap();
        assert_eq!(tree.len(), 2);
        let deceased = tree.deceased().unwrap();
        assert_eq!(tree.children_of(deceased).len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let file: FamilyFile = toml::from_str(
            r#"
            deceased = "a"

            [[person]]
            name = "a"
            sex = "male"

            [[person]]
            name = "a"
            sex = "female"
            "#,
        )
        .unwrap();
        assert!(matches!(
            build_tree(&file),
            Err(CliError::DuplicateName(name)) if name == "a"
        ));
    }

    #[test]
    fn test_unknown_relative_rejected() {
        let file: FamilyFile = toml::from_str(
            r#"
            deceased = "a"

            [[person]]
            name = "a"
            sex = "male"

            [[relationship]]
            person = "a"
            kind = "spouse"
            relative = "ghost"
            "#,
        )
        .unwrap();
        assert!(matches!(
            build_tree(&file),
            Err(CliError::UnknownName(name)) if name == "ghost"
        ));
    }
}
