//! Domain-level errors (tree-edit rejections)

use thiserror::Error;

/// Structural violations raised while editing a family tree.
///
/// All of these are recoverable: the edit is rejected, the tree is left
/// unchanged, and the caller may correct the input and retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid relationship: {0} cannot relate to themselves")]
    SelfRelationship(String),

    #[error("invalid relationship: {child} already has a {role}")]
    SecondParent { child: String, role: &'static str },

    #[error("invalid relationship: making {ancestor} a parent of {descendant} would create an ancestry cycle")]
    ParentCycle {
        ancestor: String,
        descendant: String,
    },

    #[error("invalid relationship: {name} is {sex} and cannot be a {role}")]
    SexMismatch {
        name: String,
        sex: &'static str,
        role: &'static str,
    },

    #[error("invalid relationship: {a} and {b} are already related as {existing}")]
    ConflictingRelationship {
        a: String,
        b: String,
        existing: &'static str,
    },

    #[error("unknown person id")]
    UnknownPerson,

    #[error("no deceased person has been set on this tree")]
    DeceasedNotSet,
}

pub type DomainResult<T> = Result<T, DomainError>;
