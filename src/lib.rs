//! Relalg: a finite-relation algebra engine
//!
//! Binary relations between finite carriers, with the operations of an
//! allegory (composition, converse, meet, join, residuals),
//! predicate-transformer semantics (`wp`, `sp`), and Galois-connection
//! reasoning along total functions.
//!
//! Two interchangeable storage representations back every relation: an
//! explicit pair set ([`rel::PairStore`]) and a packed bit matrix
//! ([`rel::BitStore`]). They agree exactly on every operation; the bitset
//! form is simply faster on dense relations.
//!
//! Every law checker returns a [`witness::LawCheck`] carrying a minimal,
//! deterministic counterexample on failure, never a bare boolean.

pub mod error;
pub mod finite;
pub mod galois;
pub mod laws;
pub mod rel;
pub mod transform;
pub mod witness;

pub use error::RelError;
pub use finite::{Finite, Subset};
pub use galois::{exists_along, forall_along, preimage, FinFun};
pub use rel::{BitRel, BitStore, PairStore, Rel, RelStorage};
pub use transform::{left_residual, right_residual, sp, wp};
pub use witness::{describe, LawCheck};
