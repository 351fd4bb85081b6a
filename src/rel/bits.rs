//! Packed-bitset relation storage.
//!
//! One bit per (row, col) cell, row-major, packed into `u64` words. Each
//! row occupies `cols.div_ceil(64)` words; unused trailing bits of a row's
//! last word are always zero, so wordwise comparison and subset tests need
//! no masking.
//!
//! Composition ORs whole bit-rows: for each set bit `b` of a row of the
//! left operand, the `b`-th row of the right operand is ORed into the
//! output row. This turns the pair form's triple loop into word-parallel
//! operations, which wins on dense relations.

use super::RelStorage;

const WORD_BITS: usize = 64;

/// Dense relation storage: a row-major bit matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitStore {
    rows: usize,
    cols: usize,
    /// Words per row
    stride: usize,
    /// `rows * stride` words, row-major
    words: Vec<u64>,
}

impl BitStore {
    fn word_index(&self, r: usize, c: usize) -> (usize, u64) {
        (r * self.stride + c / WORD_BITS, 1u64 << (c % WORD_BITS))
    }

    fn set(&mut self, r: usize, c: usize) {
        debug_assert!(r < self.rows && c < self.cols);
        let (w, mask) = self.word_index(r, c);
        self.words[w] |= mask;
    }

    fn row_words(&self, r: usize) -> &[u64] {
        &self.words[r * self.stride..(r + 1) * self.stride]
    }
}

impl RelStorage for BitStore {
    fn empty(rows: usize, cols: usize) -> Self {
        let stride = cols.div_ceil(WORD_BITS);
        Self {
            rows,
            cols,
            stride,
            words: vec![0; rows * stride],
        }
    }

    fn from_pair_indices(rows: usize, cols: usize, pairs: &[(usize, usize)]) -> Self {
        let mut store = Self::empty(rows, cols);
        for &(r, c) in pairs {
            store.set(r, c);
        }
        store
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn contains(&self, r: usize, c: usize) -> bool {
        if r >= self.rows || c >= self.cols {
            return false;
        }
        let (w, mask) = self.word_index(r, c);
        self.words[w] & mask != 0
    }

    fn pairs(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for r in 0..self.rows {
            for (k, &word) in self.row_words(r).iter().enumerate() {
                let mut bits = word;
                while bits != 0 {
                    let c = k * WORD_BITS + bits.trailing_zeros() as usize;
                    out.push((r, c));
                    bits &= bits - 1;
                }
            }
        }
        out
    }

    fn row(&self, r: usize) -> Vec<usize> {
        let mut out = Vec::new();
        for (k, &word) in self.row_words(r).iter().enumerate() {
            let mut bits = word;
            while bits != 0 {
                out.push(k * WORD_BITS + bits.trailing_zeros() as usize);
                bits &= bits - 1;
            }
        }
        out
    }

    fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn compose(&self, other: &Self) -> Self {
        debug_assert_eq!(self.cols, other.rows);
        let mut out = Self::empty(self.rows, other.cols);
        for r in 0..self.rows {
            let dst = r * out.stride;
            for (k, &word) in self.row_words(r).iter().enumerate() {
                let mut bits = word;
                while bits != 0 {
                    let b = k * WORD_BITS + bits.trailing_zeros() as usize;
                    let src = b * other.stride;
                    for w in 0..other.stride {
                        out.words[dst + w] |= other.words[src + w];
                    }
                    bits &= bits - 1;
                }
            }
        }
        out
    }

    fn converse(&self) -> Self {
        let mut out = Self::empty(self.cols, self.rows);
        for r in 0..self.rows {
            for (k, &word) in self.row_words(r).iter().enumerate() {
                let mut bits = word;
                while bits != 0 {
                    let c = k * WORD_BITS + bits.trailing_zeros() as usize;
                    out.set(c, r);
                    bits &= bits - 1;
                }
            }
        }
        out
    }

    fn meet(&self, other: &Self) -> Self {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        Self {
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(a, b)| a & b)
                .collect(),
        }
    }

    fn join(&self, other: &Self) -> Self {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        Self {
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(a, b)| a | b)
                .collect(),
        }
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        self.words.iter().zip(&other.words).all(|(a, b)| a & !b == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_decode_in_lexicographic_order() {
        let s = BitStore::from_pair_indices(3, 70, &[(2, 69), (0, 64), (0, 1), (1, 0)]);
        assert_eq!(s.pairs(), vec![(0, 1), (0, 64), (1, 0), (2, 69)]);
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn compose_crosses_word_boundaries() {
        // 100 columns forces two words per row
        let r = BitStore::from_pair_indices(2, 100, &[(0, 3), (0, 99)]);
        let s = BitStore::from_pair_indices(100, 2, &[(3, 0), (99, 1)]);
        let rs = r.compose(&s);
        assert_eq!(rs.pairs(), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn converse_transposes() {
        let s = BitStore::from_pair_indices(2, 66, &[(0, 65), (1, 2)]);
        let t = s.converse();
        assert_eq!((t.rows(), t.cols()), (66, 2));
        assert!(t.contains(65, 0));
        assert!(t.contains(2, 1));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn trailing_bits_stay_zero() {
        let full = BitStore::from_pair_indices(
            2,
            65,
            &(0..2)
                .flat_map(|r| (0..65).map(move |c| (r, c)))
                .collect::<Vec<_>>(),
        );
        // join/meet of full with itself must not disturb the padding
        let j = full.join(&full);
        assert_eq!(j.len(), 130);
        assert!(j.is_subset_of(&full));
    }
}
