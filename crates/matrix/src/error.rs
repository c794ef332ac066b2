use thiserror::Error;

/// Failures of the fallible matrix constructors and accessors.
///
/// Numeric degeneracy such as a singular matrix is not reported here. The
/// algorithms let IEEE-754 special values flow through instead.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatrixError {
    #[error("Expected {expected} cells, got {found}.")]
    SliceLength { expected: usize, found: usize },
    #[error("Index {index} is out of range for {len} elements.")]
    IndexOutOfRange { index: usize, len: usize },
}
