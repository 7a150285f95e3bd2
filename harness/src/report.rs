//! Run report: the deterministic artifact of a variant run.
//!
//! The report digest is `canonical_hash(RunReport, canonical_json(body))`,
//! where the body is everything in [`RunReportV1::to_json`] except the
//! `digest` field itself. Identical fixture + config always yields an
//! identical digest, in-process and across processes.

use probe_kernel::narrow::Variant;
use probe_kernel::trace::{NarrowingTrace, StepDecision};

use crate::canon::canonical_json_bytes;
use crate::config::{RunConfig, TraceMode};
use crate::hash::{canonical_hash, ContentHash, HashDomain};
use crate::runner::{Disagreement, Outcome, VariantResult};

/// Schema identifier written into every report.
pub const REPORT_SCHEMA_VERSION: &str = "search_run_report.v1";

/// Pass/fail counts for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSummary {
    pub variant: Variant,
    pub passed: usize,
    pub failed: usize,
}

/// Outcome of [`crate::runner::run_vectors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReportV1 {
    pub fixture_digest: ContentHash,
    pub reference: Variant,
    pub variants: Vec<Variant>,
    pub trace_mode: TraceMode,
    pub results: Vec<VariantResult>,
    pub disagreements: Vec<Disagreement>,
    pub digest: ContentHash,
}

impl RunReportV1 {
    pub(crate) fn assemble(
        fixture_digest: ContentHash,
        config: &RunConfig,
        results: Vec<VariantResult>,
        disagreements: Vec<Disagreement>,
    ) -> Self {
        let mut report = Self {
            fixture_digest,
            reference: config.reference,
            variants: config.variants.clone(),
            trace_mode: config.trace_mode,
            results,
            disagreements,
            // Placeholder until the body is hashed below.
            digest: canonical_hash(HashDomain::RunReport, b""),
        };
        report.digest = canonical_hash(
            HashDomain::RunReport,
            &canonical_json_bytes(&report.body_json()),
        );
        report
    }

    /// Per-variant pass/fail counts, in config order.
    #[must_use]
    pub fn summary(&self) -> Vec<VariantSummary> {
        self.variants
            .iter()
            .map(|&variant| {
                let (passed, failed) = self
                    .results
                    .iter()
                    .filter(|r| r.variant == variant)
                    .fold((0, 0), |(p, f), r| if r.passed { (p + 1, f) } else { (p, f + 1) });
                VariantSummary {
                    variant,
                    passed,
                    failed,
                }
            })
            .collect()
    }

    /// The result for one (vector, variant) pair.
    #[must_use]
    pub fn result(&self, vector: &str, variant: Variant) -> Option<&VariantResult> {
        self.results
            .iter()
            .find(|r| r.vector == vector && r.variant == variant)
    }

    /// Whether every configured variant passed every vector.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Full report JSON, including `digest`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut value = self.body_json();
        if let serde_json::Value::Object(map) = &mut value {
            map.insert("digest".into(), self.digest.as_str().into());
        }
        value
    }

    /// Canonical JSON bytes of [`Self::to_json`].
    #[must_use]
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        canonical_json_bytes(&self.to_json())
    }

    fn body_json(&self) -> serde_json::Value {
        serde_json::json!({
            "schema_version": REPORT_SCHEMA_VERSION,
            "fixture_digest": self.fixture_digest.as_str(),
            "reference": self.reference.as_str(),
            "variants": self.variants.iter().map(Variant::as_str).collect::<Vec<_>>(),
            "trace_mode": self.trace_mode.as_str(),
            "results": self.results.iter().map(result_json).collect::<Vec<_>>(),
            "disagreements": self.disagreements.iter().map(disagreement_json).collect::<Vec<_>>(),
            "summary": self.summary().iter().map(|s| serde_json::json!({
                "variant": s.variant.as_str(),
                "passed": s.passed,
                "failed": s.failed,
            })).collect::<Vec<_>>(),
        })
    }
}

fn outcome_json(outcome: Outcome) -> serde_json::Value {
    match outcome {
        Outcome::Found(index) => serde_json::json!({"type": "found", "index": index}),
        other => serde_json::json!({"type": other.class()}),
    }
}

fn result_json(result: &VariantResult) -> serde_json::Value {
    let mut value = serde_json::json!({
        "vector": result.vector,
        "variant": result.variant.as_str(),
        "outcome": outcome_json(result.outcome),
        "passed": result.passed,
    });
    if let (Some(trace), serde_json::Value::Object(map)) = (&result.trace, &mut value) {
        map.insert("trace".into(), trace_json(trace));
    }
    value
}

fn disagreement_json(d: &Disagreement) -> serde_json::Value {
    let mut value = serde_json::json!({
        "vector": d.vector,
        "variant": d.variant.as_str(),
        "outcome": outcome_json(d.outcome),
        "reference_outcome": outcome_json(d.reference_outcome),
        "kind": d.kind.as_str(),
    });
    if let (Some(trace), serde_json::Value::Object(map)) = (&d.trace, &mut value) {
        map.insert("trace".into(), trace_json(trace));
    }
    value
}

/// JSON rendering of a narrowing trace.
#[must_use]
pub fn trace_json(trace: &NarrowingTrace) -> serde_json::Value {
    let steps: Vec<serde_json::Value> = trace
        .steps
        .iter()
        .map(|s| {
            let decision = match s.decision {
                StepDecision::RaiseLow => serde_json::json!("raise_low"),
                StepDecision::LowerHigh => serde_json::json!("lower_high"),
                StepDecision::Hit(index) => serde_json::json!({"hit": index}),
            };
            serde_json::json!({
                "low": s.low,
                "high": s.high,
                "mid": s.mid,
                "decision": decision,
            })
        })
        .collect();
    serde_json::json!({
        "variant": trace.variant.as_str(),
        "len": trace.len,
        "steps": steps,
        "verified": trace.verified,
        "outcome": trace.outcome,
    })
}
