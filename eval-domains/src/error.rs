use std::fmt;

/// Errors surfaced by domain construction and domain operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// No domain variant (including the size-splitting fallback) can cover
    /// the requested number of points over this field.
    UnsupportedSize(usize),
    /// An evaluation vector did not match the domain size.
    LengthMismatch { expected: usize, got: usize },
    /// A point index at or beyond the domain size.
    IndexOutOfRange { index: usize, size: usize },
    /// A coset or sequence construction hit a zero divisor or a collapsing
    /// parameter. The applicability predicates are supposed to rule this
    /// out, so treat it as corruption rather than a recoverable condition.
    Degenerate { err: &'static str },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::UnsupportedSize(size) => {
                write!(f, "no evaluation domain of size >= {size} over this field")
            }
            DomainError::LengthMismatch { expected, got } => {
                write!(f, "vector of length {got} where the domain size is {expected}")
            }
            DomainError::IndexOutOfRange { index, size } => {
                write!(f, "element index {index} out of range for domain of size {size}")
            }
            DomainError::Degenerate { err } => {
                write!(f, "degenerate domain arithmetic: {err}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
