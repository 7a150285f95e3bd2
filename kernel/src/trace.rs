//! Narrowing audit trail.
//!
//! A [`NarrowingTrace`] records every iteration of the loop in
//! [`crate::narrow`] so a search can be inspected after the fact. The trace's
//! `outcome` always equals what the corresponding search call returns.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::convert::Infallible;

use crate::narrow::{narrow, Exit, Variant};

/// What one narrowing iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDecision {
    /// `element[mid] <= target`: `low = mid + 1`.
    RaiseLow,
    /// `element[mid] > target`: `high = mid - 1` (clamped at 0).
    LowerHigh,
    /// A short-circuit matched at this index.
    Hit(usize),
}

/// One iteration of the narrowing loop, with bounds as they were on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrowStep {
    pub low: usize,
    pub high: usize,
    pub mid: usize,
    pub decision: StepDecision,
}

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Loop guard `low < high` holds.
    Narrowing,
    /// Loop exited; the element at `low` is checked.
    Verify,
}

/// Complete record of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrowingTrace {
    pub variant: Variant,
    /// Length of the searched sequence.
    pub len: usize,
    pub steps: Vec<NarrowStep>,
    /// Index inspected by the verify step (`None` for empty input or a short-circuit).
    pub verified: Option<usize>,
    pub outcome: Option<usize>,
}

impl NarrowingTrace {
    /// The phase the search finished in.
    ///
    /// Empty input never enters the loop and is reported as `Verify` with
    /// nothing verified.
    #[must_use]
    pub fn terminal_phase(&self) -> Phase {
        match self.steps.last() {
            Some(NarrowStep {
                decision: StepDecision::Hit(_),
                ..
            }) => Phase::Narrowing,
            _ => Phase::Verify,
        }
    }

    /// Number of narrowing iterations.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.steps.len()
    }
}

/// Trace a search over `len` elements using a fallible comparator.
///
/// # Errors
///
/// Returns the first error produced by `probe`; the partial trace is dropped.
pub fn try_trace_by<E, F>(len: usize, variant: Variant, probe: F) -> Result<NarrowingTrace, E>
where
    F: FnMut(usize) -> Result<Ordering, E>,
{
    let mut steps = Vec::new();
    let exit = narrow(len, variant, probe, |step| steps.push(step))?;
    let verified = match exit {
        Exit::Verified { index, .. } => Some(index),
        Exit::Empty | Exit::Hit(_) => None,
    };
    Ok(NarrowingTrace {
        variant,
        len,
        steps,
        verified,
        outcome: exit.found(),
    })
}

/// Trace a search over a sorted slice.
#[must_use]
pub fn trace_variant<T, Q>(seq: &[T], target: &Q, variant: Variant) -> NarrowingTrace
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let result: Result<NarrowingTrace, Infallible> =
        try_trace_by(seq.len(), variant, |i| Ok(seq[i].borrow().cmp(target)));
    match result {
        Ok(trace) => trace,
        Err(never) => match never {},
    }
}
