//! Binary relations over finite carriers.
//!
//! A relation is a typed wrapper [`Rel<A, B, S>`] around an index-level
//! storage `S`. Storage works purely in canonical carrier indices; the
//! wrapper owns the carriers, translates elements to indices at the
//! boundary, and enforces carrier identity on every binary operation.
//!
//! Two storages are provided and must be observationally identical through
//! [`RelStorage::pairs`] after any sequence of operations:
//! - [`PairStore`]: explicit sorted pair set, cheap for sparse relations.
//! - [`BitStore`]: one bit per (row, column) cell packed into `u64` words,
//!   with word-parallel composition and lattice operations.
//!
//! Callers cannot observe which storage is in use except via timing.

mod bits;
mod pair;

pub use bits::BitStore;
pub use pair::PairStore;

use crate::error::RelError;
use crate::finite::Finite;
use std::hash::Hash;

/// Index-level storage for a binary relation on `rows × cols`.
///
/// Implementations optimize for different densities but must agree exactly:
/// for the same construction and operation sequence, `pairs()` must return
/// the same sorted list from every implementation.
pub trait RelStorage: Clone {
    /// The empty relation on `rows × cols`
    fn empty(rows: usize, cols: usize) -> Self;

    /// Build from index pairs; duplicates coalesce. Callers guarantee
    /// `r < rows` and `c < cols` for every pair.
    fn from_pair_indices(rows: usize, cols: usize, pairs: &[(usize, usize)]) -> Self;

    /// The diagonal on `n × n`
    fn identity(n: usize) -> Self {
        let diag: Vec<(usize, usize)> = (0..n).map(|i| (i, i)).collect();
        Self::from_pair_indices(n, n, &diag)
    }

    /// Number of row indices
    fn rows(&self) -> usize;

    /// Number of column indices
    fn cols(&self) -> usize;

    /// Membership test
    fn contains(&self, r: usize, c: usize) -> bool;

    /// All related pairs in ascending lexicographic order. This is the
    /// canonical decode used by the parity checks.
    fn pairs(&self) -> Vec<(usize, usize)>;

    /// Column indices related to row `r`, ascending
    fn row(&self, r: usize) -> Vec<usize>;

    /// Number of related pairs
    fn len(&self) -> usize;

    /// Check if no pair is related
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Relational composition: `(r, c)` iff some `b` has `self(r, b)` and
    /// `other(b, c)`. Callers guarantee `self.cols() == other.rows()`.
    fn compose(&self, other: &Self) -> Self;

    /// Swap every pair
    fn converse(&self) -> Self;

    /// Pairwise AND. Callers guarantee matching dimensions.
    fn meet(&self, other: &Self) -> Self;

    /// Pairwise OR. Callers guarantee matching dimensions.
    fn join(&self, other: &Self) -> Self;

    /// Whether every pair of `self` is a pair of `other`
    fn is_subset_of(&self, other: &Self) -> bool;
}

/// A binary relation between two finite carriers.
///
/// Immutable once constructed; every operation returns a new value. The
/// default storage is the pair form; [`BitRel`] selects the bitset form.
pub struct Rel<A, B, S: RelStorage = PairStore> {
    src: Finite<A>,
    tgt: Finite<B>,
    store: S,
}

/// A relation held in the packed-bitset storage
pub type BitRel<A, B> = Rel<A, B, BitStore>;

impl<A, B, S: RelStorage> Clone for Rel<A, B, S> {
    fn clone(&self) -> Self {
        Self {
            src: self.src.clone(),
            tgt: self.tgt.clone(),
            store: self.store.clone(),
        }
    }
}

impl<A, B, S> Rel<A, B, S>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    S: RelStorage,
{
    /// Build a relation from explicit pairs. Every pair component must
    /// belong to its declared carrier; duplicates coalesce.
    pub fn from_pairs(
        src: &Finite<A>,
        tgt: &Finite<B>,
        pairs: &[(A, B)],
    ) -> Result<Self, RelError> {
        let mut indices = Vec::with_capacity(pairs.len());
        for (a, b) in pairs {
            let i = src.index_of(a).ok_or_else(|| RelError::InvalidPair {
                detail: "left component not in domain carrier".to_string(),
            })?;
            let j = tgt.index_of(b).ok_or_else(|| RelError::InvalidPair {
                detail: "right component not in codomain carrier".to_string(),
            })?;
            indices.push((i, j));
        }
        Ok(Self {
            src: src.clone(),
            tgt: tgt.clone(),
            store: S::from_pair_indices(src.len(), tgt.len(), &indices),
        })
    }

    /// Build a relation from a generating predicate over carrier elements
    pub fn from_fn(src: &Finite<A>, tgt: &Finite<B>, rel: impl Fn(&A, &B) -> bool) -> Self {
        let mut indices = Vec::new();
        for (i, a) in src.iter().enumerate() {
            for (j, b) in tgt.iter().enumerate() {
                if rel(a, b) {
                    indices.push((i, j));
                }
            }
        }
        Self {
            src: src.clone(),
            tgt: tgt.clone(),
            store: S::from_pair_indices(src.len(), tgt.len(), &indices),
        }
    }

    /// The empty relation between two carriers
    pub fn empty(src: &Finite<A>, tgt: &Finite<B>) -> Self {
        Self {
            src: src.clone(),
            tgt: tgt.clone(),
            store: S::empty(src.len(), tgt.len()),
        }
    }

    /// The full relation between two carriers
    pub fn full(src: &Finite<A>, tgt: &Finite<B>) -> Self {
        Self::from_fn(src, tgt, |_, _| true)
    }

    pub(crate) fn from_store(src: &Finite<A>, tgt: &Finite<B>, store: S) -> Self {
        debug_assert_eq!(store.rows(), src.len());
        debug_assert_eq!(store.cols(), tgt.len());
        Self {
            src: src.clone(),
            tgt: tgt.clone(),
            store,
        }
    }

    /// The domain carrier
    pub fn source(&self) -> &Finite<A> {
        &self.src
    }

    /// The codomain carrier
    pub fn target(&self) -> &Finite<B> {
        &self.tgt
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Whether `a` is related to `b`. False for elements outside the
    /// carriers.
    pub fn has(&self, a: &A, b: &B) -> bool {
        match (self.src.index_of(a), self.tgt.index_of(b)) {
            (Some(i), Some(j)) => self.store.contains(i, j),
            _ => false,
        }
    }

    /// All related pairs, in ascending carrier-index lexicographic order
    pub fn to_pairs(&self) -> Vec<(A, B)> {
        self.store
            .pairs()
            .into_iter()
            .map(|(i, j)| {
                let a = self.src.get(i).expect("row index within carrier");
                let b = self.tgt.get(j).expect("column index within carrier");
                (a.clone(), b.clone())
            })
            .collect()
    }

    /// Number of related pairs
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if no pair is related
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Relational composition `self ; other`.
    ///
    /// Requires `self`'s codomain carrier and `other`'s domain carrier to be
    /// the same instance, not merely equal as sets.
    pub fn compose<C>(&self, other: &Rel<B, C, S>) -> Result<Rel<A, C, S>, RelError>
    where
        C: Clone + Eq + Hash,
    {
        self.tgt.require_same(&other.src)?;
        Ok(Rel {
            src: self.src.clone(),
            tgt: other.tgt.clone(),
            store: self.store.compose(&other.store),
        })
    }

    /// Converse: swaps every pair. `r.converse().converse()` equals `r`.
    pub fn converse(&self) -> Rel<B, A, S> {
        Rel {
            src: self.tgt.clone(),
            tgt: self.src.clone(),
            store: self.store.converse(),
        }
    }

    /// Pairwise AND. Both operands must share domain and codomain carriers.
    pub fn meet(&self, other: &Self) -> Result<Self, RelError> {
        self.src.require_same(&other.src)?;
        self.tgt.require_same(&other.tgt)?;
        Ok(Self {
            src: self.src.clone(),
            tgt: self.tgt.clone(),
            store: self.store.meet(&other.store),
        })
    }

    /// Pairwise OR. Both operands must share domain and codomain carriers.
    pub fn join(&self, other: &Self) -> Result<Self, RelError> {
        self.src.require_same(&other.src)?;
        self.tgt.require_same(&other.tgt)?;
        Ok(Self {
            src: self.src.clone(),
            tgt: self.tgt.clone(),
            store: self.store.join(&other.store),
        })
    }

    /// Inclusion test. Both operands must share domain and codomain
    /// carriers.
    pub fn is_subset_of(&self, other: &Self) -> Result<bool, RelError> {
        self.src.require_same(&other.src)?;
        self.tgt.require_same(&other.tgt)?;
        Ok(self.store.is_subset_of(&other.store))
    }

    /// Re-encode into a different storage without changing the abstract
    /// relation. The carriers are shared, so the result is interchangeable
    /// with the original in every operation.
    pub fn with_storage<T: RelStorage>(&self) -> Rel<A, B, T> {
        Rel {
            src: self.src.clone(),
            tgt: self.tgt.clone(),
            store: T::from_pair_indices(self.src.len(), self.tgt.len(), &self.store.pairs()),
        }
    }

    /// Re-encode into the packed bitset form
    pub fn to_bits(&self) -> BitRel<A, B> {
        self.with_storage()
    }

    /// Re-encode into the explicit pair-set form
    pub fn to_pair_form(&self) -> Rel<A, B, PairStore> {
        self.with_storage()
    }
}

impl<A, S> Rel<A, A, S>
where
    A: Clone + Eq + Hash,
    S: RelStorage,
{
    /// The diagonal relation on a carrier, the two-sided unit of `compose`
    pub fn identity(carrier: &Finite<A>) -> Self {
        Self {
            src: carrier.clone(),
            tgt: carrier.clone(),
            store: S::identity(carrier.len()),
        }
    }
}

/// Extensional equality over identical carrier instances. Relations over
/// different carriers are never equal, regardless of contents.
impl<A, B, S> PartialEq for Rel<A, B, S>
where
    A: Clone + Eq + Hash,
    B: Clone + Eq + Hash,
    S: RelStorage,
{
    fn eq(&self, other: &Self) -> bool {
        self.src.same_carrier(&other.src)
            && self.tgt.same_carrier(&other.tgt)
            && self.store.pairs() == other.store.pairs()
    }
}

impl<A, B, S> std::fmt::Debug for Rel<A, B, S>
where
    A: Clone + Eq + Hash + std::fmt::Debug,
    B: Clone + Eq + Hash + std::fmt::Debug,
    S: RelStorage,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.to_pairs()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finite::Finite;

    #[test]
    fn from_pairs_rejects_foreign_elements() {
        let a = Finite::new(vec![1, 2, 3]);
        let b = Finite::new(vec!["x", "y"]);
        let err = Rel::<_, _, PairStore>::from_pairs(&a, &b, &[(1, "x"), (4, "y")]);
        assert!(matches!(err, Err(RelError::InvalidPair { .. })));
    }

    #[test]
    fn duplicate_pairs_coalesce() {
        let a = Finite::new(vec![1, 2]);
        let b = Finite::new(vec![1, 2]);
        let r = Rel::<_, _, PairStore>::from_pairs(&a, &b, &[(1, 2), (1, 2), (2, 1)]).unwrap();
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn compose_requires_shared_middle_carrier() {
        let a = Finite::new(vec![1, 2]);
        let b = Finite::new(vec![10, 20]);
        let b2 = Finite::new(vec![10, 20]);
        let c = Finite::new(vec!["u"]);

        let r = Rel::<_, _, PairStore>::from_pairs(&a, &b, &[(1, 10)]).unwrap();
        let s = Rel::<_, _, PairStore>::from_pairs(&b2, &c, &[(10, "u")]).unwrap();
        assert!(matches!(
            r.compose(&s),
            Err(RelError::CarrierMismatch { .. })
        ));

        let s = Rel::<_, _, PairStore>::from_pairs(&b, &c, &[(10, "u")]).unwrap();
        let rs = r.compose(&s).unwrap();
        assert_eq!(rs.to_pairs(), vec![(1, "u")]);
    }

    #[test]
    fn identity_is_two_sided_unit() {
        let a = Finite::new(0..4);
        let r = Rel::<_, _, PairStore>::from_fn(&a, &a, |x, y| (x + 1) % 4 == *y);
        let id = Rel::<_, _, PairStore>::identity(&a);
        assert_eq!(id.compose(&r).unwrap(), r);
        assert_eq!(r.compose(&id).unwrap(), r);
    }

    #[test]
    fn equality_is_extensional_but_carrier_bound() {
        let a = Finite::new(vec![1, 2]);
        let a2 = Finite::new(vec![1, 2]);
        let r1 = Rel::<_, _, PairStore>::from_pairs(&a, &a, &[(1, 2)]).unwrap();
        let r2 = Rel::<_, _, PairStore>::from_pairs(&a, &a, &[(1, 2)]).unwrap();
        let r3 = Rel::<_, _, PairStore>::from_pairs(&a2, &a2, &[(1, 2)]).unwrap();
        assert_eq!(r1, r2);
        assert_ne!(r1, r3);
    }
}
