//! Predicate transformers and residuals.
//!
//! `wp` and `sp` read a relation as a nondeterministic state transition and
//! move predicates across it: `wp` demands that *every* successor satisfy
//! the postcondition, `sp` collects *every* state reachable from the
//! precondition. They form a Galois connection,
//! `P ⊆ wp(R, Q) ⟺ sp(P, R) ⊆ Q`, checked with witnesses in
//! [`crate::laws`].
//!
//! The residuals are the adjoints of composition itself:
//! [`right_residual`]`(t, s)` is the largest `r` with `r;s ⊆ t`, and
//! [`left_residual`]`(r, t)` is the largest `s` with `r;s ⊆ t`.

use crate::error::RelError;
use crate::finite::Subset;
use crate::rel::{Rel, RelStorage};
use std::collections::BTreeSet;
use std::hash::Hash;

/// Weakest precondition: `a ∈ wp(r, q)` iff every `b` with `r(a, b)` lies
/// in `q`. States with no successor are vacuously included.
///
/// Satisfies `wp(r1;r2, q) = wp(r1, wp(r2, q))`.
pub fn wp<A, B, S>(r: &Rel<A, B, S>, q: &Subset<B>) -> Result<Subset<A>, RelError>
where
    A: Clone + Eq + Hash + Send + Sync + 'static,
    B: Clone + Eq + Hash + Send + Sync + 'static,
    S: RelStorage,
{
    r.target().require_same(q.carrier())?;
    let q_idx = q.indices();
    let mut out = BTreeSet::new();
    for a in 0..r.source().len() {
        if r.store().row(a).iter().all(|b| q_idx.contains(b)) {
            out.insert(a);
        }
    }
    Ok(Subset::from_indices(r.source(), out))
}

/// Strongest postcondition: `b ∈ sp(p, r)` iff some `a ∈ p` has `r(a, b)`.
pub fn sp<A, B, S>(p: &Subset<A>, r: &Rel<A, B, S>) -> Result<Subset<B>, RelError>
where
    A: Clone + Eq + Hash + Send + Sync + 'static,
    B: Clone + Eq + Hash + Send + Sync + 'static,
    S: RelStorage,
{
    r.source().require_same(p.carrier())?;
    let mut out = BTreeSet::new();
    for a in p.indices() {
        out.extend(r.store().row(a));
    }
    Ok(Subset::from_indices(r.target(), out))
}

/// Left residual of composition: the largest `s: B → C` with `r;s ⊆ t`.
///
/// `(b, c)` is related iff every `a` with `r(a, b)` has `t(a, c)`.
/// Requires `r` and `t` to share their domain carrier.
pub fn left_residual<A, B, C, S>(
    r: &Rel<A, B, S>,
    t: &Rel<A, C, S>,
) -> Result<Rel<B, C, S>, RelError>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
    S: RelStorage,
{
    r.source().require_same(t.source())?;
    let rows = r.target().len();
    let cols = t.target().len();
    let mut pairs = Vec::new();
    for b in 0..rows {
        for c in 0..cols {
            let ok = (0..r.source().len())
                .all(|a| !r.store().contains(a, b) || t.store().contains(a, c));
            if ok {
                pairs.push((b, c));
            }
        }
    }
    Ok(Rel::from_store(
        r.target(),
        t.target(),
        S::from_pair_indices(rows, cols, &pairs),
    ))
}

/// Right residual of composition: the largest `r: A → B` with `r;s ⊆ t`.
///
/// `(a, b)` is related iff every `c` with `s(b, c)` has `t(a, c)`.
/// Requires `s` and `t` to share their codomain carrier.
pub fn right_residual<A, B, C, S>(
    t: &Rel<A, C, S>,
    s: &Rel<B, C, S>,
) -> Result<Rel<A, B, S>, RelError>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    C: Clone + Eq + Hash,
    S: RelStorage,
{
    s.target().require_same(t.target())?;
    let rows = t.source().len();
    let cols = s.source().len();
    let mut pairs = Vec::new();
    for a in 0..rows {
        for b in 0..cols {
            let ok = s
                .store()
                .row(b)
                .iter()
                .all(|&c| t.store().contains(a, c));
            if ok {
                pairs.push((a, b));
            }
        }
    }
    Ok(Rel::from_store(
        t.source(),
        s.source(),
        S::from_pair_indices(rows, cols, &pairs),
    ))
}
