//! Error types for relation construction and combination.

/// Errors raised when building or combining relations and subsets.
///
/// Both variants are construction-time or precondition failures: once a
/// relation's carriers have been validated, every algebraic operation on it
/// is total. Failed law checks are *not* errors — they are ordinary
/// [`LawCheck::Fail`](crate::witness::LawCheck) values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelError {
    /// Two operands reference different carrier instances where identity is
    /// required (e.g. composing `R: A → B` with `S: B' → C` where `B` and
    /// `B'` are distinct `Finite` values, even if equal as sets).
    CarrierMismatch {
        /// Carrier id the operation expected
        expected: u64,
        /// Carrier id it was given
        found: u64,
    },

    /// A supplied pair or function image references an element absent from
    /// its declared carrier. Rejected at construction time, never later.
    InvalidPair { detail: String },
}

impl std::fmt::Display for RelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelError::CarrierMismatch { expected, found } => {
                write!(
                    f,
                    "carrier mismatch: expected carrier #{}, found carrier #{}",
                    expected, found
                )
            }
            RelError::InvalidPair { detail } => write!(f, "invalid pair: {}", detail),
        }
    }
}

impl std::error::Error for RelError {}
