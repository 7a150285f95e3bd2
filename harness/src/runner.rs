//! Variant runner: every configured variant over every vector, reconciled
//! against the reference variant.
//!
//! A run never stops early. Failed expectations and disagreements are data in
//! the resulting [`RunReportV1`], not errors; the only error is an invalid
//! [`RunConfig`].

use std::cmp::Ordering;

use probe_kernel::error::SearchError;
use probe_kernel::narrow::Variant;
use probe_kernel::trace::NarrowingTrace;
use probe_kernel::value::{search_values, trace_values, Value};

use crate::config::{ConfigError, RunConfig, TraceMode};
use crate::fixture::{Expectation, SearchVector, VectorFixtureV1};
use crate::report::RunReportV1;

/// Result class of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found(usize),
    NotFound,
    TypeMismatch,
    Unordered,
}

impl Outcome {
    #[must_use]
    pub fn from_result(result: &Result<Option<usize>, SearchError>) -> Self {
        match result {
            Ok(Some(index)) => Self::Found(*index),
            Ok(None) => Self::NotFound,
            Err(SearchError::TypeMismatch { .. }) => Self::TypeMismatch,
            Err(SearchError::Unordered { .. }) => Self::Unordered,
        }
    }

    /// Stable name of the result class (the index is not part of it).
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::NotFound => "not_found",
            Self::TypeMismatch => "type_mismatch",
            Self::Unordered => "unordered",
        }
    }

    /// Whether this outcome satisfies `expect` for `vector`.
    #[must_use]
    pub fn satisfies(&self, expect: Expectation, sequence: &[Value], target: &Value) -> bool {
        match (expect, self) {
            (Expectation::Index(want), Self::Found(got)) => want == *got,
            (Expectation::Found, Self::Found(got)) => sequence
                .get(*got)
                .is_some_and(|v| v.try_cmp(target) == Ok(Ordering::Equal)),
            (Expectation::NotFound, Self::NotFound)
            | (Expectation::TypeMismatch, Self::TypeMismatch) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found(index) => write!(f, "found({index})"),
            other => f.write_str(other.class()),
        }
    }
}

/// One (vector, variant) search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantResult {
    pub vector: String,
    pub variant: Variant,
    pub outcome: Outcome,
    pub passed: bool,
    /// Present under [`TraceMode::All`] when the search completed.
    pub trace: Option<NarrowingTrace>,
}

/// How a variant's outcome differs from the reference's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisagreementKind {
    /// Both found the target, at different occurrences.
    Occurrence,
    /// The result classes differ.
    Outcome,
}

impl DisagreementKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Occurrence => "occurrence",
            Self::Outcome => "outcome",
        }
    }
}

/// A variant whose outcome differs from the reference on some vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disagreement {
    pub vector: String,
    pub variant: Variant,
    pub outcome: Outcome,
    pub reference_outcome: Outcome,
    pub kind: DisagreementKind,
    /// The disagreeing variant's trace, unless tracing is off.
    pub trace: Option<NarrowingTrace>,
}

/// Error running vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    InvalidConfig(ConfigError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "invalid run config: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfig(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfig(e)
    }
}

/// Run every configured variant over every vector in `fixture`.
///
/// Results are ordered by vector (fixture order), then variant (config order).
///
/// # Errors
///
/// Returns [`RunError::InvalidConfig`] if `config` fails validation. Nothing
/// is searched in that case.
pub fn run_vectors(
    fixture: &VectorFixtureV1,
    config: &RunConfig,
) -> Result<RunReportV1, RunError> {
    config.validate()?;

    let mut results = Vec::with_capacity(fixture.vectors.len() * config.variants.len());
    let mut disagreements = Vec::new();

    for vector in &fixture.vectors {
        let reference_outcome = run_one(vector, config.reference);

        for &variant in &config.variants {
            let outcome = if variant == config.reference {
                reference_outcome
            } else {
                run_one(vector, variant)
            };
            let passed = outcome.satisfies(vector.expect, &vector.sequence, &vector.target);
            log::debug!("{} [{variant}] -> {outcome} (passed={passed})", vector.name);
            if !passed {
                log::warn!(
                    "{} [{variant}]: expected {:?}, got {outcome}",
                    vector.name,
                    vector.expect
                );
            }

            let disagrees = outcome != reference_outcome;
            let trace = match config.trace_mode {
                TraceMode::Off => None,
                TraceMode::Disagreements if !disagrees => None,
                TraceMode::Disagreements | TraceMode::All => trace_one(vector, variant),
            };

            if disagrees {
                let kind = match (outcome, reference_outcome) {
                    (Outcome::Found(_), Outcome::Found(_)) => DisagreementKind::Occurrence,
                    _ => DisagreementKind::Outcome,
                };
                if kind == DisagreementKind::Outcome {
                    log::warn!(
                        "{} [{variant}] disagrees with {}: {outcome} vs {reference_outcome}",
                        vector.name,
                        config.reference
                    );
                }
                disagreements.push(Disagreement {
                    vector: vector.name.clone(),
                    variant,
                    outcome,
                    reference_outcome,
                    kind,
                    trace: trace.clone(),
                });
            }

            results.push(VariantResult {
                vector: vector.name.clone(),
                variant,
                outcome,
                passed,
                trace: match config.trace_mode {
                    TraceMode::All => trace,
                    TraceMode::Off | TraceMode::Disagreements => None,
                },
            });
        }
    }

    let report = RunReportV1::assemble(
        fixture.digest.clone(),
        config,
        results,
        disagreements,
    );
    for summary in report.summary() {
        log::info!(
            "{}: {} passed, {} failed",
            summary.variant,
            summary.passed,
            summary.failed
        );
    }
    log::info!(
        "{} disagreements with {}; report {}",
        report.disagreements.len(),
        config.reference,
        report.digest
    );
    Ok(report)
}

fn run_one(vector: &SearchVector, variant: Variant) -> Outcome {
    Outcome::from_result(&search_values(&vector.sequence, &vector.target, variant))
}

fn trace_one(vector: &SearchVector, variant: Variant) -> Option<NarrowingTrace> {
    trace_values(&vector.sequence, &vector.target, variant).ok()
}
