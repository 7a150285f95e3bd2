//! Runtime-checked values for sequences that arrive untyped.
//!
//! The generic entry points in [`crate::narrow`] reject mismatched types at
//! compile time. Values decoded from JSON cannot be checked that way, so every
//! comparison here goes through [`Value::try_cmp`] and a mismatch surfaces as
//! [`SearchError::TypeMismatch`] on the first comparison that hits it.

use std::cmp::Ordering;

use crate::error::SearchError;
use crate::narrow::{try_search_by, Variant};
use crate::trace::{try_trace_by, NarrowingTrace};

/// Orderable category of a [`Value`]. Only values of the same kind compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Number,
    Text,
}

impl ValueKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically typed scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) | Self::Float(_) => ValueKind::Number,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// Order `self` relative to `other`.
    ///
    /// Integers and floats compare exactly with each other (no rounding
    /// of large integers through `f64`).
    ///
    /// # Errors
    ///
    /// - [`SearchError::TypeMismatch`] when the kinds differ.
    /// - [`SearchError::Unordered`] when a float is NaN.
    pub fn try_cmp(&self, other: &Value) -> Result<Ordering, SearchError> {
        let ord = match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Integer(a), Self::Float(b)) => cmp_integer_float(*a, *b),
            (Self::Float(a), Self::Integer(b)) => cmp_integer_float(*b, *a).map(Ordering::reverse),
            _ => {
                return Err(SearchError::TypeMismatch {
                    element: self.kind(),
                    target: other.kind(),
                })
            }
        };
        ord.ok_or_else(|| SearchError::Unordered {
            detail: format!("{self} vs {other}"),
        })
    }
}

/// Exact ordering of an integer against a float; `None` for NaN.
#[allow(clippy::cast_possible_truncation)]
fn cmp_integer_float(a: i64, b: f64) -> Option<Ordering> {
    // 2^63: the first float above every i64.
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if b.is_nan() {
        return None;
    }
    if b >= TWO_POW_63 {
        return Some(Ordering::Less);
    }
    if b < -TWO_POW_63 {
        return Some(Ordering::Greater);
    }
    // floor(b) lies in [-2^63, 2^63) and is integral, so the cast is exact.
    let whole = b.floor() as i64;
    match a.cmp(&whole) {
        Ordering::Equal if b.fract() != 0.0 => Some(Ordering::Less),
        ord => Some(ord),
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Text(c.to_string())
    }
}

/// Search a sorted sequence of dynamic values.
///
/// # Errors
///
/// Returns the first [`SearchError`] raised by a comparison. An empty sequence
/// makes no comparison and returns `Ok(None)` for any target.
pub fn search_values(
    seq: &[Value],
    target: &Value,
    variant: Variant,
) -> Result<Option<usize>, SearchError> {
    try_search_by(seq.len(), variant, |i| seq[i].try_cmp(target))
}

/// Trace a search over dynamic values.
///
/// # Errors
///
/// Same as [`search_values`].
pub fn trace_values(
    seq: &[Value],
    target: &Value,
    variant: Variant,
) -> Result<NarrowingTrace, SearchError> {
    try_trace_by(seq.len(), variant, |i| seq[i].try_cmp(target))
}
