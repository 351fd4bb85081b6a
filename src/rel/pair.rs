//! Explicit pair-set relation storage.
//!
//! The extent is a `BTreeSet` of `(row, col)` index pairs, so iteration is
//! already in the canonical lexicographic order and duplicates cannot
//! exist. Composition is the direct triple loop, worst case
//! O(rows · mid · cols); good for sparse relations and as the reference
//! implementation the bitset form is checked against.

use super::RelStorage;
use std::collections::BTreeSet;

/// Sparse relation storage: the set of related index pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairStore {
    rows: usize,
    cols: usize,
    extent: BTreeSet<(usize, usize)>,
}

impl RelStorage for PairStore {
    fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            extent: BTreeSet::new(),
        }
    }

    fn from_pair_indices(rows: usize, cols: usize, pairs: &[(usize, usize)]) -> Self {
        let extent: BTreeSet<(usize, usize)> = pairs.iter().copied().collect();
        debug_assert!(extent.iter().all(|&(r, c)| r < rows && c < cols));
        Self { rows, cols, extent }
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn contains(&self, r: usize, c: usize) -> bool {
        self.extent.contains(&(r, c))
    }

    fn pairs(&self) -> Vec<(usize, usize)> {
        self.extent.iter().copied().collect()
    }

    fn row(&self, r: usize) -> Vec<usize> {
        self.extent
            .range((r, 0)..(r + 1, 0))
            .map(|&(_, c)| c)
            .collect()
    }

    fn len(&self) -> usize {
        self.extent.len()
    }

    fn compose(&self, other: &Self) -> Self {
        debug_assert_eq!(self.cols, other.rows);
        let mut extent = BTreeSet::new();
        for &(a, b) in &self.extent {
            for c in other.row(b) {
                extent.insert((a, c));
            }
        }
        Self {
            rows: self.rows,
            cols: other.cols,
            extent,
        }
    }

    fn converse(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            extent: self.extent.iter().map(|&(r, c)| (c, r)).collect(),
        }
    }

    fn meet(&self, other: &Self) -> Self {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        Self {
            rows: self.rows,
            cols: self.cols,
            extent: self.extent.intersection(&other.extent).copied().collect(),
        }
    }

    fn join(&self, other: &Self) -> Self {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        Self {
            rows: self.rows,
            cols: self.cols,
            extent: self.extent.union(&other.extent).copied().collect(),
        }
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        self.extent.is_subset(&other.extent)
    }
}
