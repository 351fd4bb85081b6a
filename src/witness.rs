//! Law-check results and counterexample witnesses.
//!
//! Every law checker in this crate returns a [`LawCheck`] instead of a
//! boolean: a failure carries the smallest concrete certificate sufficient
//! to falsify the law, found by scanning candidates in carrier index order
//! so that repeated runs produce identical witnesses.
//!
//! Callers render witnesses only through [`describe`] (or
//! [`LawCheck::describe`]); the field layout of each witness type is an
//! implementation detail.

use std::fmt;

/// The outcome of a law check: the law holds, or here is why it does not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LawCheck<W> {
    /// The law holds on the given inputs
    Ok,
    /// The law fails, with a minimal counterexample
    Fail(W),
}

impl<W> LawCheck<W> {
    pub fn is_ok(&self) -> bool {
        matches!(self, LawCheck::Ok)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, LawCheck::Fail(_))
    }

    /// The witness, if the law failed
    pub fn witness(&self) -> Option<&W> {
        match self {
            LawCheck::Ok => None,
            LawCheck::Fail(w) => Some(w),
        }
    }
}

impl<W: fmt::Display> LawCheck<W> {
    /// Human-readable rendering of the outcome
    pub fn describe(&self) -> String {
        match self {
            LawCheck::Ok => "law holds".to_string(),
            LawCheck::Fail(w) => format!("law fails: {}", w),
        }
    }
}

/// Uniform witness formatting entry point for external consumers.
pub fn describe<W: fmt::Display>(witness: &W) -> String {
    witness.to_string()
}

/// Failure of an inclusion `sub ⊆ container`: exactly the pairs of `sub`
/// absent from `container`, in carrier index order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InclusionWitness<A, B> {
    pub missing: Vec<(A, B)>,
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Display for InclusionWitness<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pairs missing from the right side: ")?;
        format_pairs(f, &self.missing)
    }
}

/// Failure of relation equality: the symmetric difference of the two pair
/// sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelEqualityWitness<A, B> {
    /// Pairs only in the left relation
    pub left_only: Vec<(A, B)>,
    /// Pairs only in the right relation
    pub right_only: Vec<(A, B)>,
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Display for RelEqualityWitness<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "left-only pairs: ")?;
        format_pairs(f, &self.left_only)?;
        write!(f, "; right-only pairs: ")?;
        format_pairs(f, &self.right_only)
    }
}

/// Failure of a triple-indexed law such as associativity: the first pair,
/// in carrier index order, on which the two composites disagree, plus the
/// side that relates it. One concrete tuple is the smallest certificate
/// for such a law, so no larger difference is reported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripleWitness<A, D> {
    /// The lexicographically first pair the two sides disagree on
    pub pair: (A, D),
    /// True when the left-hand composite relates the pair and the
    /// right-hand one does not; false for the converse.
    pub left_holds: bool,
}

impl<A: fmt::Debug, D: fmt::Debug> fmt::Display for TripleWitness<A, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (holds, lacks) = if self.left_holds {
            ("left", "right")
        } else {
            ("right", "left")
        };
        write!(
            f,
            "the {} composite relates ({:?}, {:?}) but the {} one does not",
            holds, self.pair.0, self.pair.1, lacks
        )
    }
}

/// Failure of subset equality: the symmetric difference of two subsets of
/// one carrier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubsetEqualityWitness<T> {
    pub left_only: Vec<T>,
    pub right_only: Vec<T>,
}

impl<T: fmt::Debug> fmt::Display for SubsetEqualityWitness<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left-only elements: {:?}; right-only elements: {:?}",
            self.left_only, self.right_only
        )
    }
}

/// Failure of the wp/sp adjunction `P ⊆ wp(R, Q) ⟺ sp(P, R) ⊆ Q`: one
/// side of the equivalence held while the other did not, and `element` is
/// the first state (in carrier order) falsifying the failing inclusion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjunctionWitness<T> {
    /// The state at which the failing inclusion breaks
    pub element: T,
    /// True when `P ⊆ wp(R, Q)` held and `sp(P, R) ⊆ Q` failed; false for
    /// the converse.
    pub left_holds: bool,
}

impl<T: fmt::Debug> fmt::Display for AdjunctionWitness<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.left_holds {
            write!(
                f,
                "P ⊆ wp(R, Q) holds, yet sp(P, R) ⊆ Q fails at {:?}",
                self.element
            )
        } else {
            write!(
                f,
                "sp(P, R) ⊆ Q holds, yet P ⊆ wp(R, Q) fails at {:?}",
                self.element
            )
        }
    }
}

/// Failure of a residual adjunction `X ⊆ residual ⟺ R;S ⊆ T`. The two
/// inclusions live over different pair types, so the witness names which
/// one broke and where.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResidualAdjunctionWitness<P, Q> {
    /// The candidate lies inside the residual, yet this pair of the
    /// composite escapes `T`
    CompositionEscapes(P),
    /// The composite lies inside `T`, yet this pair of the candidate is
    /// missing from the residual
    NotInResidual(Q),
}

impl<P: fmt::Debug, Q: fmt::Debug> fmt::Display for ResidualAdjunctionWitness<P, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResidualAdjunctionWitness::CompositionEscapes(p) => {
                write!(f, "composite pair {:?} escapes the bound", p)
            }
            ResidualAdjunctionWitness::NotInResidual(q) => {
                write!(f, "candidate pair {:?} is missing from the residual", q)
            }
        }
    }
}

/// Failure of a Galois connection between subset lattices along a function:
/// names the specific element of the offending subset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GaloisAdjunctionWitness<A, B> {
    /// The image-side inclusion fails at this target element
    ImageEscapes(B),
    /// The source-side inclusion fails at this source element
    SourceEscapes(A),
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Display for GaloisAdjunctionWitness<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaloisAdjunctionWitness::ImageEscapes(b) => {
                write!(f, "image element {:?} escapes the target subset", b)
            }
            GaloisAdjunctionWitness::SourceEscapes(a) => {
                write!(f, "source element {:?} escapes the source subset", a)
            }
        }
    }
}

fn format_pairs<A: fmt::Debug, B: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    pairs: &[(A, B)],
) -> fmt::Result {
    write!(f, "[")?;
    for (i, (a, b)) in pairs.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "({:?}, {:?})", a, b)?;
    }
    write!(f, "]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_renders_ok_and_fail() {
        let ok: LawCheck<InclusionWitness<i32, char>> = LawCheck::Ok;
        assert_eq!(ok.describe(), "law holds");

        let fail = LawCheck::Fail(InclusionWitness {
            missing: vec![(3, 'c')],
        });
        assert_eq!(
            fail.describe(),
            "law fails: pairs missing from the right side: [(3, 'c')]"
        );
    }

    #[test]
    fn triple_witness_names_the_holding_side() {
        let w = TripleWitness {
            pair: (1, 'd'),
            left_holds: true,
        };
        assert_eq!(
            describe(&w),
            "the left composite relates (1, 'd') but the right one does not"
        );
    }

    #[test]
    fn adjunction_witness_names_the_failing_side() {
        let w = AdjunctionWitness {
            element: 7,
            left_holds: false,
        };
        assert_eq!(
            describe(&w),
            "sp(P, R) ⊆ Q holds, yet P ⊆ wp(R, Q) fails at 7"
        );
    }
}
