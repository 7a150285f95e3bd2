//! Bounded binary search: narrow `[low, high]` to a single candidate, then verify.
//!
//! Three variants share one loop and differ only in where (if anywhere) they
//! short-circuit on an exact match. See [`Variant`].
//!
//! # Loop
//!
//! ```text
//! low = 0, high = len - 1
//! while low < high:
//!     mid = floor((low + high) / 2)
//!     element[mid] <= target  =>  low  = mid + 1
//!     element[mid] >  target  =>  high = mid - 1
//! verify: element[low] == target ? low : NOT_FOUND
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::convert::Infallible;

use crate::trace::{NarrowStep, StepDecision};

/// Sentinel returned by the integer contract when the target is absent.
pub const NOT_FOUND: isize = -1;

/// Which narrowing variant a search runs.
///
/// All variants agree on absent targets (they only ever return an index
/// whose element compares equal). They differ on present targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// No exact-match check while narrowing.
    ///
    /// Because `element[mid] <= target` moves `low` to `mid + 1`, an occurrence
    /// sitting at `mid` is stepped over. When it is the only occurrence the
    /// search reports not-found (e.g. `13` in `[3, 7, 9, 13, 17, 203, 205]`).
    Unchecked,
    /// Returns `low` early when `element[low]` equals the target.
    ///
    /// Catches occurrences that narrowing lands `low` on, but not one that is
    /// stepped over at `mid`, so it fails on the same inputs as `Unchecked`
    /// whenever the occurrence is never at `low`.
    LowProbe,
    /// Returns `mid` early when `element[mid]` equals the target.
    ///
    /// Correct for every non-decreasing sequence.
    MidProbe,
}

impl Variant {
    /// All variants in declaration order.
    pub const ALL: &'static [Variant] = &[Self::Unchecked, Self::LowProbe, Self::MidProbe];

    /// Stable name used in fixtures and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::LowProbe => "low_probe",
            Self::MidProbe => "mid_probe",
        }
    }

    /// Parse a stable name back into a variant.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exit {
    /// Zero-length input; nothing was compared.
    Empty,
    /// A short-circuit returned from inside the loop.
    Hit(usize),
    /// The loop ran out and the verify step inspected `index`.
    Verified { index: usize, equal: bool },
}

impl Exit {
    pub(crate) fn found(self) -> Option<usize> {
        match self {
            Self::Empty | Self::Verified { equal: false, .. } => None,
            Self::Hit(index) | Self::Verified { index, equal: true } => Some(index),
        }
    }
}

/// The loop shared by every entry point.
///
/// `probe(i)` is the ordering of element `i` relative to the target. The first
/// `Err` it yields aborts the search unchanged.
pub(crate) fn narrow<E, F, O>(
    len: usize,
    variant: Variant,
    mut probe: F,
    mut observe: O,
) -> Result<Exit, E>
where
    F: FnMut(usize) -> Result<Ordering, E>,
    O: FnMut(NarrowStep),
{
    if len == 0 {
        return Ok(Exit::Empty);
    }

    let mut low = 0usize;
    let mut high = len - 1;

    while low < high {
        let mid = low + (high - low) / 2;

        if variant == Variant::LowProbe && probe(low)? == Ordering::Equal {
            observe(NarrowStep {
                low,
                high,
                mid,
                decision: StepDecision::Hit(low),
            });
            return Ok(Exit::Hit(low));
        }

        let ord = probe(mid)?;
        if variant == Variant::MidProbe && ord == Ordering::Equal {
            observe(NarrowStep {
                low,
                high,
                mid,
                decision: StepDecision::Hit(mid),
            });
            return Ok(Exit::Hit(mid));
        }

        let step = NarrowStep {
            low,
            high,
            mid,
            decision: if ord == Ordering::Greater {
                StepDecision::LowerHigh
            } else {
                StepDecision::RaiseLow
            },
        };
        if ord == Ordering::Greater {
            // mid == 0 would take high to -1; clamping leaves the verify index unchanged.
            high = mid.saturating_sub(1);
        } else {
            low = mid + 1;
        }
        observe(step);
    }

    // low only ever becomes mid + 1 with mid < high <= len - 1.
    let equal = probe(low)? == Ordering::Equal;
    Ok(Exit::Verified { index: low, equal })
}

/// Run `variant` over `len` elements using a fallible comparator.
///
/// `probe(i)` must return the ordering of element `i` relative to the target.
///
/// # Errors
///
/// Returns the first error produced by `probe`. No further comparisons are
/// made after it.
pub fn try_search_by<E, F>(len: usize, variant: Variant, probe: F) -> Result<Option<usize>, E>
where
    F: FnMut(usize) -> Result<Ordering, E>,
{
    narrow(len, variant, probe, |_| {}).map(Exit::found)
}

/// Search a sorted slice with an explicit variant.
#[must_use]
pub fn search_variant<T, Q>(seq: &[T], target: &Q, variant: Variant) -> Option<usize>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let result: Result<Option<usize>, Infallible> =
        try_search_by(seq.len(), variant, |i| Ok(seq[i].borrow().cmp(target)));
    match result {
        Ok(found) => found,
        Err(never) => match never {},
    }
}

/// Find the index of some occurrence of `target` in a non-decreasing slice.
///
/// Returns `None` when the target is absent. With duplicates, which
/// occurrence is returned is unspecified.
///
/// ```
/// use probe_kernel::narrow::search;
///
/// let seq = [3, 7, 9, 13, 17, 203, 205];
/// assert_eq!(search(&seq, &13), Some(3));
/// assert_eq!(search(&seq, &25), None);
/// ```
///
/// A target of a different type than the elements does not compile:
///
/// ```compile_fail
/// use probe_kernel::narrow::search;
///
/// let _ = search(&[3, 7, 9], &"hi");
/// ```
#[must_use]
pub fn search<T, Q>(seq: &[T], target: &Q) -> Option<usize>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    search_variant(seq, target, Variant::MidProbe)
}

/// [`Variant::Unchecked`] search.
#[must_use]
pub fn search_unchecked<T, Q>(seq: &[T], target: &Q) -> Option<usize>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    search_variant(seq, target, Variant::Unchecked)
}

/// [`Variant::LowProbe`] search.
#[must_use]
pub fn search_low_probe<T, Q>(seq: &[T], target: &Q) -> Option<usize>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    search_variant(seq, target, Variant::LowProbe)
}

/// Convert a search result to the integer contract (`index` or [`NOT_FOUND`]).
#[must_use]
pub fn to_sentinel(found: Option<usize>) -> isize {
    // Slice lengths never exceed isize::MAX.
    found.map_or(NOT_FOUND, |i| isize::try_from(i).unwrap_or(isize::MAX))
}

/// Convert the integer contract back to a search result.
///
/// Any negative value is treated as not-found.
#[must_use]
pub fn from_sentinel(value: isize) -> Option<usize> {
    usize::try_from(value).ok()
}
