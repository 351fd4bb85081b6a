//! Witnessed law checkers for the relation algebra.
//!
//! Every checker returns a [`LawCheck`] value; a failed law is a normal
//! result carrying a minimal counterexample, never an `Err`. The `Err`
//! channel is reserved for precondition violations (mismatched carriers),
//! exactly as in the rest of the crate.
//!
//! Witnesses are deterministic: candidates are scanned in carrier index
//! order and the first violation wins, so the same inputs always yield the
//! same witness.

use crate::error::RelError;
use crate::finite::Subset;
use crate::galois::{exists_along, forall_along, preimage, FinFun};
use crate::rel::{Rel, RelStorage};
use crate::transform::{left_residual, right_residual, sp, wp};
use crate::witness::{
    AdjunctionWitness, GaloisAdjunctionWitness, InclusionWitness, LawCheck, RelEqualityWitness,
    ResidualAdjunctionWitness, SubsetEqualityWitness, TripleWitness,
};
use std::collections::BTreeSet;
use std::hash::Hash;

/// Decode the pairs of `candidate` that are absent from `container`,
/// in carrier index order.
fn missing_pairs<A, B, S>(container: &Rel<A, B, S>, candidate: &Rel<A, B, S>) -> Vec<(A, B)>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    S: RelStorage,
{
    candidate
        .to_pairs()
        .into_iter()
        .filter(|(a, b)| !container.has(a, b))
        .collect()
}

/// Check `candidate ⊆ container`. On failure the witness is exactly the
/// pairs of `candidate` missing from `container`.
pub fn inclusion_witness<A, B, S>(
    container: &Rel<A, B, S>,
    candidate: &Rel<A, B, S>,
) -> Result<LawCheck<InclusionWitness<A, B>>, RelError>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    S: RelStorage,
{
    container.source().require_same(candidate.source())?;
    container.target().require_same(candidate.target())?;
    let missing = missing_pairs(container, candidate);
    if missing.is_empty() {
        Ok(LawCheck::Ok)
    } else {
        Ok(LawCheck::Fail(InclusionWitness { missing }))
    }
}

/// Check extensional equality of two relations. On failure the witness is
/// the symmetric difference of their pair sets.
pub fn equality_witness<A, B, S>(
    left: &Rel<A, B, S>,
    right: &Rel<A, B, S>,
) -> Result<LawCheck<RelEqualityWitness<A, B>>, RelError>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    S: RelStorage,
{
    left.source().require_same(right.source())?;
    left.target().require_same(right.target())?;
    let left_only = missing_pairs(right, left);
    let right_only = missing_pairs(left, right);
    if left_only.is_empty() && right_only.is_empty() {
        Ok(LawCheck::Ok)
    } else {
        Ok(LawCheck::Fail(RelEqualityWitness {
            left_only,
            right_only,
        }))
    }
}

/// Check extensional equality of two subsets of one carrier.
pub fn subset_equality_witness<T>(
    left: &Subset<T>,
    right: &Subset<T>,
) -> Result<LawCheck<SubsetEqualityWitness<T>>, RelError>
where
    T: Clone + Eq + Hash + Send + Sync + 'static,
{
    left.carrier().require_same(right.carrier())?;
    let left_only: Vec<T> = left
        .carrier()
        .iter()
        .filter(|x| left.contains(x) && !right.contains(x))
        .cloned()
        .collect();
    let right_only: Vec<T> = left
        .carrier()
        .iter()
        .filter(|x| right.contains(x) && !left.contains(x))
        .cloned()
        .collect();
    if left_only.is_empty() && right_only.is_empty() {
        Ok(LawCheck::Ok)
    } else {
        Ok(LawCheck::Fail(SubsetEqualityWitness {
            left_only,
            right_only,
        }))
    }
}

/// The first index pair, in lexicographic order, on which two relations
/// over the same carriers disagree, decoded into elements.
fn first_disagreement<A, B, S>(
    left: &Rel<A, B, S>,
    right: &Rel<A, B, S>,
) -> LawCheck<TripleWitness<A, B>>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    S: RelStorage,
{
    let lp: BTreeSet<(usize, usize)> = left.store().pairs().into_iter().collect();
    let rp: BTreeSet<(usize, usize)> = right.store().pairs().into_iter().collect();
    // symmetric_difference of BTreeSets yields ascending order
    match lp.symmetric_difference(&rp).next() {
        None => LawCheck::Ok,
        Some(&(i, j)) => {
            let a = left.source().get(i).expect("row index within carrier");
            let b = left.target().get(j).expect("column index within carrier");
            LawCheck::Fail(TripleWitness {
                pair: (a.clone(), b.clone()),
                left_holds: lp.contains(&(i, j)),
            })
        }
    }
}

/// Check associativity of composition: `(r;s);t = r;(s;t)`. On failure the
/// witness is one concrete pair the two composites disagree on, the first
/// in carrier order.
pub fn compose_assoc_witness<A, B, C, D, S>(
    r: &Rel<A, B, S>,
    s: &Rel<B, C, S>,
    t: &Rel<C, D, S>,
) -> Result<LawCheck<TripleWitness<A, D>>, RelError>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
    D: Clone + Eq + Hash,
    S: RelStorage,
{
    let left = r.compose(s)?.compose(t)?;
    let right = r.compose(&s.compose(t)?)?;
    Ok(first_disagreement(&left, &right))
}

/// Check converse involution: `(r†)† = r`.
pub fn converse_involution_witness<A, B, S>(
    r: &Rel<A, B, S>,
) -> Result<LawCheck<RelEqualityWitness<A, B>>, RelError>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    S: RelStorage,
{
    equality_witness(&r.converse().converse(), r)
}

/// Check the wp/sp adjunction on an endorelation:
/// `P ⊆ wp(R, Q) ⟺ sp(P, R) ⊆ Q`.
///
/// The witness is the first state (in carrier order) falsifying whichever
/// inclusion broke the equivalence.
pub fn wp_sp_adjunction_witness<T, S>(
    p: &Subset<T>,
    r: &Rel<T, T, S>,
    q: &Subset<T>,
) -> Result<LawCheck<AdjunctionWitness<T>>, RelError>
where
    T: Clone + Eq + Hash + Send + Sync + 'static,
    S: RelStorage,
{
    let wp_rq = wp(r, q)?;
    let sp_pr = sp(p, r)?;
    let left = p.is_subset_of(&wp_rq)?;
    let right = sp_pr.is_subset_of(q)?;
    if left == right {
        return Ok(LawCheck::Ok);
    }
    if left {
        // sp(P, R) ⊆ Q must have failed
        let element = r
            .target()
            .iter()
            .find(|b| sp_pr.contains(b) && !q.contains(b))
            .expect("inclusion reported failed")
            .clone();
        Ok(LawCheck::Fail(AdjunctionWitness {
            element,
            left_holds: true,
        }))
    } else {
        let element = r
            .source()
            .iter()
            .find(|a| p.contains(a) && !wp_rq.contains(a))
            .expect("inclusion reported failed")
            .clone();
        Ok(LawCheck::Fail(AdjunctionWitness {
            element,
            left_holds: false,
        }))
    }
}

/// Check the wp composition law: `wp(r1;r2, q) = wp(r1, wp(r2, q))`.
pub fn wp_composition_witness<T, S>(
    r1: &Rel<T, T, S>,
    r2: &Rel<T, T, S>,
    q: &Subset<T>,
) -> Result<LawCheck<SubsetEqualityWitness<T>>, RelError>
where
    T: Clone + Eq + Hash + Send + Sync + 'static,
    S: RelStorage,
{
    let fused = wp(&r1.compose(r2)?, q)?;
    let nested = wp(r1, &wp(r2, q)?)?;
    subset_equality_witness(&fused, &nested)
}

/// Check the left-residual adjunction:
/// `s ⊆ left_residual(r, t) ⟺ r;s ⊆ t`.
pub fn left_residual_adjunction_witness<A, B, C, S>(
    r: &Rel<A, B, S>,
    s: &Rel<B, C, S>,
    t: &Rel<A, C, S>,
) -> Result<LawCheck<ResidualAdjunctionWitness<(A, C), (B, C)>>, RelError>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
    S: RelStorage,
{
    let residual = left_residual(r, t)?;
    let composite = r.compose(s)?;
    let left = s.is_subset_of(&residual)?;
    let right = composite.is_subset_of(t)?;
    if left == right {
        return Ok(LawCheck::Ok);
    }
    if left {
        let pair = missing_pairs(t, &composite)
            .into_iter()
            .next()
            .expect("inclusion reported failed");
        Ok(LawCheck::Fail(ResidualAdjunctionWitness::CompositionEscapes(
            pair,
        )))
    } else {
        let pair = missing_pairs(&residual, s)
            .into_iter()
            .next()
            .expect("inclusion reported failed");
        Ok(LawCheck::Fail(ResidualAdjunctionWitness::NotInResidual(
            pair,
        )))
    }
}

/// Check the right-residual adjunction:
/// `r ⊆ right_residual(t, s) ⟺ r;s ⊆ t`.
pub fn right_residual_adjunction_witness<A, B, C, S>(
    r: &Rel<A, B, S>,
    s: &Rel<B, C, S>,
    t: &Rel<A, C, S>,
) -> Result<LawCheck<ResidualAdjunctionWitness<(A, C), (A, B)>>, RelError>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
    S: RelStorage,
{
    let residual = right_residual(t, s)?;
    let composite = r.compose(s)?;
    let left = r.is_subset_of(&residual)?;
    let right = composite.is_subset_of(t)?;
    if left == right {
        return Ok(LawCheck::Ok);
    }
    if left {
        let pair = missing_pairs(t, &composite)
            .into_iter()
            .next()
            .expect("inclusion reported failed");
        Ok(LawCheck::Fail(ResidualAdjunctionWitness::CompositionEscapes(
            pair,
        )))
    } else {
        let pair = missing_pairs(&residual, r)
            .into_iter()
            .next()
            .expect("inclusion reported failed");
        Ok(LawCheck::Fail(ResidualAdjunctionWitness::NotInResidual(
            pair,
        )))
    }
}

/// Check `exists_along ⊣ preimage`:
/// `exists_along(f, p) ⊆ q ⟺ p ⊆ preimage(f, q)`.
pub fn exists_preimage_adjunction_witness<A, B>(
    f: &FinFun<A, B>,
    p: &Subset<A>,
    q: &Subset<B>,
) -> Result<LawCheck<GaloisAdjunctionWitness<A, B>>, RelError>
where
    A: Clone + Eq + Hash + Send + Sync + 'static,
    B: Clone + Eq + Hash + Send + Sync + 'static,
{
    let image = exists_along(f, p)?;
    let pulled = preimage(f, q)?;
    let left = image.is_subset_of(q)?;
    let right = p.is_subset_of(&pulled)?;
    if left == right {
        return Ok(LawCheck::Ok);
    }
    if left {
        let a = f
            .source()
            .iter()
            .find(|a| p.contains(a) && !pulled.contains(a))
            .expect("inclusion reported failed")
            .clone();
        Ok(LawCheck::Fail(GaloisAdjunctionWitness::SourceEscapes(a)))
    } else {
        let b = f
            .target()
            .iter()
            .find(|b| image.contains(b) && !q.contains(b))
            .expect("inclusion reported failed")
            .clone();
        Ok(LawCheck::Fail(GaloisAdjunctionWitness::ImageEscapes(b)))
    }
}

/// Check `preimage ⊣ forall_along`:
/// `preimage(f, q) ⊆ p ⟺ q ⊆ forall_along(f, p)`.
pub fn preimage_forall_adjunction_witness<A, B>(
    f: &FinFun<A, B>,
    q: &Subset<B>,
    p: &Subset<A>,
) -> Result<LawCheck<GaloisAdjunctionWitness<A, B>>, RelError>
where
    A: Clone + Eq + Hash + Send + Sync + 'static,
    B: Clone + Eq + Hash + Send + Sync + 'static,
{
    let pulled = preimage(f, q)?;
    let boxed = forall_along(f, p)?;
    let left = pulled.is_subset_of(p)?;
    let right = q.is_subset_of(&boxed)?;
    if left == right {
        return Ok(LawCheck::Ok);
    }
    if left {
        let b = f
            .target()
            .iter()
            .find(|b| q.contains(b) && !boxed.contains(b))
            .expect("inclusion reported failed")
            .clone();
        Ok(LawCheck::Fail(GaloisAdjunctionWitness::ImageEscapes(b)))
    } else {
        let a = f
            .source()
            .iter()
            .find(|a| pulled.contains(a) && !p.contains(a))
            .expect("inclusion reported failed")
            .clone();
        Ok(LawCheck::Fail(GaloisAdjunctionWitness::SourceEscapes(a)))
    }
}

/// Check the modular law of allegories:
/// `r;s ∧ t ⊆ (r ∧ t;s†);s`.
///
/// On failure the witness is exactly the pairs of the left side missing
/// from the right side.
pub fn modular_law_witness<A, B, C, S>(
    r: &Rel<A, B, S>,
    s: &Rel<B, C, S>,
    t: &Rel<A, C, S>,
) -> Result<LawCheck<InclusionWitness<A, C>>, RelError>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
    S: RelStorage,
{
    let lhs = r.compose(s)?.meet(t)?;
    let rhs = r.meet(&t.compose(&s.converse())?)?.compose(s)?;
    inclusion_witness(&rhs, &lhs)
}
