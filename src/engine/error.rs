//! Engine-level errors (computation rejections)

use thiserror::Error;

/// Errors surfaced by the `divide` pipeline.
///
/// These are input rejections, never process failures: the engine does not
/// panic on user data, and an arithmetically inconsistent result is a
/// programming defect caught by internal assertions, not an error variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no deceased person has been set on this tree")]
    DeceasedNotSet,

    #[error("cannot classify '{name}': no recognized relation to the deceased")]
    UnclassifiablePerson { name: String },

    #[error("no eligible heir survives the deceased")]
    NoEligibleHeir,
}

pub type EngineResult<T> = Result<T, EngineError>;
