//! Typed search errors.
//!
//! Not-found is never an error: it is the `None` result. `SearchError` means
//! the search could not be performed at all.

use crate::value::ValueKind;

/// Failure of a runtime-checked search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The target cannot be ordered against the sequence's elements.
    TypeMismatch { element: ValueKind, target: ValueKind },
    /// Two values of the same kind have no ordering (NaN).
    Unordered { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { element, target } => {
                write!(f, "type mismatch: cannot order {target} target against {element} element")
            }
            Self::Unordered { detail } => write!(f, "unordered comparison: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
