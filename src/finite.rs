//! Finite carriers and predicate-defined subsets.
//!
//! A [`Finite<T>`] is an ordered, deduplicated universe of elements. Its
//! iteration order is fixed at construction and is the canonical index order
//! used by every relation representation, in particular the row/column
//! layout of the bitset form.
//!
//! Carriers have *identity*: two carriers built from the same elements are
//! still distinct, and operations that require operands over the same
//! carrier compare by identity, not by contents. This is what turns silent
//! index misalignment into an explicit [`RelError::CarrierMismatch`].

use crate::error::RelError;
use indexmap::IndexSet;
use std::collections::BTreeSet;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of unique carrier ids, process-wide.
static NEXT_CARRIER_ID: AtomicU64 = AtomicU64::new(0);

struct FiniteInner<T> {
    /// Elements in canonical index order (IndexSet preserves insertion order)
    elems: IndexSet<T>,
    /// Identity token, unique per constructed carrier
    id: u64,
}

/// An immutable finite carrier of elements with stable iteration order.
///
/// Cloning is cheap and identity-preserving: clones are the *same* carrier
/// for the purposes of [`Finite::same_carrier`].
pub struct Finite<T> {
    inner: Arc<FiniteInner<T>>,
}

impl<T> Clone for Finite<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Eq + Hash> Finite<T> {
    /// Build a carrier from elements, deduplicating while preserving the
    /// order of first occurrence. That order is the canonical index order.
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        let elems: IndexSet<T> = elements.into_iter().collect();
        Self {
            inner: Arc::new(FiniteInner {
                elems,
                id: NEXT_CARRIER_ID.fetch_add(1, Ordering::Relaxed),
            }),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.inner.elems.len()
    }

    /// Check if the carrier is empty
    pub fn is_empty(&self) -> bool {
        self.inner.elems.is_empty()
    }

    /// The canonical index of an element, if it belongs to the carrier
    pub fn index_of(&self, elem: &T) -> Option<usize> {
        self.inner.elems.get_index_of(elem)
    }

    /// The element at a canonical index
    pub fn get(&self, index: usize) -> Option<&T> {
        self.inner.elems.get_index(index)
    }

    /// Membership test
    pub fn contains(&self, elem: &T) -> bool {
        self.inner.elems.contains(elem)
    }

    /// Iterate over elements in canonical index order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.inner.elems.iter()
    }

    /// The identity token of this carrier (diagnostic use only)
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Whether two values are the same carrier instance.
    ///
    /// Compares identity, never contents: `Finite::new([1,2])` and a second
    /// `Finite::new([1,2])` are different carriers.
    pub fn same_carrier(&self, other: &Finite<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Error value for an operation that expected `self` but got `other`
    pub(crate) fn mismatch(&self, other: &Finite<T>) -> RelError {
        RelError::CarrierMismatch {
            expected: self.id(),
            found: other.id(),
        }
    }

    /// Check identity, producing the mismatch error on failure
    pub(crate) fn require_same(&self, other: &Finite<T>) -> Result<(), RelError> {
        if self.same_carrier(other) {
            Ok(())
        } else {
            Err(self.mismatch(other))
        }
    }
}

impl<T: Clone + Eq + Hash + std::fmt::Debug> std::fmt::Debug for Finite<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Finite")
            .field("id", &self.inner.id)
            .field("elems", &self.inner.elems)
            .finish()
    }
}

/// A subset of one carrier, given by its characteristic predicate.
///
/// The predicate is kept as a closure and only materialized on demand
/// ([`Subset::to_vec`], [`Subset::indices`]). A subset is forever tied to
/// the carrier instance it was built from; combining subsets over different
/// carriers fails with [`RelError::CarrierMismatch`].
pub struct Subset<T> {
    carrier: Finite<T>,
    pred: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Clone for Subset<T> {
    fn clone(&self) -> Self {
        Self {
            carrier: self.carrier.clone(),
            pred: Arc::clone(&self.pred),
        }
    }
}

impl<T: Clone + Eq + Hash + Send + Sync + 'static> Subset<T> {
    /// Build a subset from a characteristic predicate. Lazy: nothing is
    /// materialized until asked.
    pub fn by(carrier: &Finite<T>, pred: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            carrier: carrier.clone(),
            pred: Arc::new(pred),
        }
    }

    /// Build a subset from an explicit list of elements. Elements not in the
    /// carrier are rejected.
    pub fn from_elements(
        carrier: &Finite<T>,
        elements: impl IntoIterator<Item = T>,
    ) -> Result<Self, RelError> {
        let mut indices = BTreeSet::new();
        for elem in elements {
            match carrier.index_of(&elem) {
                Some(i) => {
                    indices.insert(i);
                }
                None => {
                    return Err(RelError::InvalidPair {
                        detail: "subset element not in carrier".to_string(),
                    })
                }
            }
        }
        Ok(Self::from_indices(carrier, indices))
    }

    /// Build a subset from canonical indices into the carrier.
    pub(crate) fn from_indices(carrier: &Finite<T>, indices: BTreeSet<usize>) -> Self {
        let lookup = carrier.clone();
        let indices = Arc::new(indices);
        Self {
            carrier: carrier.clone(),
            pred: Arc::new(move |x| lookup.index_of(x).is_some_and(|i| indices.contains(&i))),
        }
    }

    /// The empty subset
    pub fn empty(carrier: &Finite<T>) -> Self {
        Self::by(carrier, |_| false)
    }

    /// The whole carrier as a subset
    pub fn full(carrier: &Finite<T>) -> Self {
        Self::by(carrier, |_| true)
    }

    /// The carrier this subset was built over
    pub fn carrier(&self) -> &Finite<T> {
        &self.carrier
    }

    /// Membership test. False for elements outside the carrier, matching
    /// the behavior of relation membership; the predicate is only
    /// consulted for carrier elements.
    pub fn contains(&self, elem: &T) -> bool {
        self.carrier.contains(elem) && (self.pred)(elem)
    }

    /// Materialize the subset's elements in carrier index order
    pub fn to_vec(&self) -> Vec<T> {
        self.carrier
            .iter()
            .filter(|x| (self.pred)(x))
            .cloned()
            .collect()
    }

    /// Materialize the subset's canonical indices, ascending
    pub fn indices(&self) -> BTreeSet<usize> {
        self.carrier
            .iter()
            .enumerate()
            .filter(|(_, x)| (self.pred)(x))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of elements in the subset (materializes)
    pub fn len(&self) -> usize {
        self.carrier.iter().filter(|x| (self.pred)(x)).count()
    }

    /// Check if the subset is empty (materializes)
    pub fn is_empty(&self) -> bool {
        !self.carrier.iter().any(|x| (self.pred)(x))
    }

    /// Union. Both subsets must be over the same carrier instance.
    pub fn union(&self, other: &Subset<T>) -> Result<Subset<T>, RelError> {
        self.carrier.require_same(&other.carrier)?;
        let p = Arc::clone(&self.pred);
        let q = Arc::clone(&other.pred);
        Ok(Subset::by(&self.carrier, move |x| p(x) || q(x)))
    }

    /// Intersection. Both subsets must be over the same carrier instance.
    pub fn intersection(&self, other: &Subset<T>) -> Result<Subset<T>, RelError> {
        self.carrier.require_same(&other.carrier)?;
        let p = Arc::clone(&self.pred);
        let q = Arc::clone(&other.pred);
        Ok(Subset::by(&self.carrier, move |x| p(x) && q(x)))
    }

    /// Complement within the carrier
    pub fn complement(&self) -> Subset<T> {
        let p = Arc::clone(&self.pred);
        Subset::by(&self.carrier, move |x| !p(x))
    }

    /// Inclusion test. Both subsets must be over the same carrier instance.
    pub fn is_subset_of(&self, other: &Subset<T>) -> Result<bool, RelError> {
        self.carrier.require_same(&other.carrier)?;
        Ok(self
            .carrier
            .iter()
            .all(|x| !(self.pred)(x) || (other.pred)(x)))
    }

    /// Extensional equality. Both subsets must be over the same carrier
    /// instance.
    pub fn same_elements(&self, other: &Subset<T>) -> Result<bool, RelError> {
        self.carrier.require_same(&other.carrier)?;
        Ok(self
            .carrier
            .iter()
            .all(|x| (self.pred)(x) == (other.pred)(x)))
    }
}

impl<T: Clone + Eq + Hash + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for Subset<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.to_vec()).finish()
    }
}
