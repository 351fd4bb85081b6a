//! Images along a total function and their Galois connections.
//!
//! A total function `f: A → B` between carriers induces three monotone
//! maps between the subset lattices: the existential image, the preimage,
//! and the universal image. They chain into two adjunctions,
//! `exists_along ⊣ preimage ⊣ forall_along`, checked with element
//! witnesses in [`crate::laws`].

use crate::error::RelError;
use crate::finite::{Finite, Subset};
use crate::rel::{Rel, RelStorage};
use std::collections::BTreeSet;
use std::hash::Hash;

/// A total function between two carriers, tabulated at construction.
pub struct FinFun<A, B> {
    src: Finite<A>,
    tgt: Finite<B>,
    /// Target index for each source index
    map: Vec<usize>,
}

impl<A, B> Clone for FinFun<A, B> {
    fn clone(&self) -> Self {
        Self {
            src: self.src.clone(),
            tgt: self.tgt.clone(),
            map: self.map.clone(),
        }
    }
}

impl<A, B> FinFun<A, B>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
{
    /// Tabulate `f` over the source carrier. Every image must belong to the
    /// target carrier; a stray image is rejected up front, not on use.
    pub fn new(
        src: &Finite<A>,
        tgt: &Finite<B>,
        f: impl Fn(&A) -> B,
    ) -> Result<Self, RelError> {
        let mut map = Vec::with_capacity(src.len());
        for a in src.iter() {
            let b = f(a);
            let j = tgt.index_of(&b).ok_or_else(|| RelError::InvalidPair {
                detail: "function image not in target carrier".to_string(),
            })?;
            map.push(j);
        }
        Ok(Self {
            src: src.clone(),
            tgt: tgt.clone(),
            map,
        })
    }

    /// The source carrier
    pub fn source(&self) -> &Finite<A> {
        &self.src
    }

    /// The target carrier
    pub fn target(&self) -> &Finite<B> {
        &self.tgt
    }

    /// Apply the function to a source element
    pub fn apply(&self, a: &A) -> Option<&B> {
        let i = self.src.index_of(a)?;
        self.tgt.get(self.map[i])
    }

    /// Target index of a source index
    pub(crate) fn image_index(&self, i: usize) -> usize {
        self.map[i]
    }

    /// The function's graph as a relation
    pub fn graph<S: RelStorage>(&self) -> Rel<A, B, S> {
        let pairs: Vec<(usize, usize)> =
            self.map.iter().enumerate().map(|(i, &j)| (i, j)).collect();
        Rel::from_store(
            &self.src,
            &self.tgt,
            S::from_pair_indices(self.src.len(), self.tgt.len(), &pairs),
        )
    }
}

impl<A, B> std::fmt::Debug for FinFun<A, B>
where
    A: Clone + Eq + Hash + std::fmt::Debug,
    B: Clone + Eq + Hash + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries: Vec<_> = self
            .src
            .iter()
            .enumerate()
            .map(|(i, a)| (a, self.tgt.get(self.map[i]).expect("image in target")))
            .collect();
        f.debug_map().entries(entries).finish()
    }
}

/// Existential image: `b ∈ exists_along(f, p)` iff some `a ∈ p` has
/// `f(a) = b`.
pub fn exists_along<A, B>(f: &FinFun<A, B>, p: &Subset<A>) -> Result<Subset<B>, RelError>
where
    A: Clone + Eq + Hash + Send + Sync + 'static,
    B: Clone + Eq + Hash + Send + Sync + 'static,
{
    f.source().require_same(p.carrier())?;
    let out: BTreeSet<usize> = p.indices().into_iter().map(|i| f.image_index(i)).collect();
    Ok(Subset::from_indices(f.target(), out))
}

/// Preimage: `a ∈ preimage(f, q)` iff `f(a) ∈ q`.
pub fn preimage<A, B>(f: &FinFun<A, B>, q: &Subset<B>) -> Result<Subset<A>, RelError>
where
    A: Clone + Eq + Hash + Send + Sync + 'static,
    B: Clone + Eq + Hash + Send + Sync + 'static,
{
    f.target().require_same(q.carrier())?;
    let q_idx = q.indices();
    let out: BTreeSet<usize> = (0..f.source().len())
        .filter(|&i| q_idx.contains(&f.image_index(i)))
        .collect();
    Ok(Subset::from_indices(f.source(), out))
}

/// Universal image: `b ∈ forall_along(f, p)` iff every `a` with
/// `f(a) = b` lies in `p`. Elements with an empty fiber are vacuously
/// included.
pub fn forall_along<A, B>(f: &FinFun<A, B>, p: &Subset<A>) -> Result<Subset<B>, RelError>
where
    A: Clone + Eq + Hash + Send + Sync + 'static,
    B: Clone + Eq + Hash + Send + Sync + 'static,
{
    f.source().require_same(p.carrier())?;
    let p_idx = p.indices();
    let mut excluded = BTreeSet::new();
    for i in 0..f.source().len() {
        if !p_idx.contains(&i) {
            excluded.insert(f.image_index(i));
        }
    }
    let out: BTreeSet<usize> = (0..f.target().len())
        .filter(|j| !excluded.contains(j))
        .collect();
    Ok(Subset::from_indices(f.target(), out))
}
