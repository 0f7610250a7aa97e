//! mwareeth: Islamic inheritance calculation (Fiqh al-Mawarith).
//!
//! The crate is organized as an immutable pipeline over a family tree
//! snapshot:
//!
//! ```text
//! FamilyTree → classify → exclude → compute shares → normalize
//! ```
//!
//! Build a [`FamilyTree`](domain::FamilyTree), mark the deceased, and call
//! [`divide`](engine::divide) to get an [`EstateDivision`] whose exact
//! rational fractions sum to 1.
//!
//! ```
//! use mwareeth::domain::{FamilyTree, RelationKind, Sex};
//! use mwareeth::engine::divide;
//!
//! let mut tree = FamilyTree::new();
//! let deceased = tree.add_person("ahmed", Sex::Male, false);
//! let son = tree.add_person("karim", Sex::Male, true);
//! tree.add_relationship(son, RelationKind::Father, deceased).unwrap();
//! tree.set_deceased(deceased).unwrap();
//!
//! let division = divide(&tree).unwrap();
//! assert_eq!(division.entries().len(), 1);
//! ```

pub mod cli;
pub mod domain;
pub mod engine;
pub mod util;

pub use domain::{DomainError, FamilyTree, Fraction, HeirCategory, PersonId, RelationKind, Sex};
pub use engine::{divide, EngineError, EstateDivision, ShareEntry, ShareKind};
