//! Run configuration.
//!
//! Which variants to run, which one is the reference for reconciliation, and
//! how many traces to keep. Validated before any vector is searched.

use probe_kernel::narrow::Variant;

/// When narrowing traces are attached to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceMode {
    /// Never.
    Off,
    /// Only for results that disagree with the reference variant.
    Disagreements,
    /// For every result that completed (type mismatches have no trace).
    All,
}

impl TraceMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Disagreements => "disagreements",
            Self::All => "all",
        }
    }
}

/// Configuration for [`crate::runner::run_vectors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Variants to run, in report order.
    pub variants: Vec<Variant>,
    /// Variant every other variant is reconciled against.
    pub reference: Variant,
    pub trace_mode: TraceMode,
}

impl RunConfig {
    /// Check that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no variant is selected, a variant appears
    /// twice, or the reference is not among the selected variants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.variants.is_empty() {
            return Err(ConfigError::NoVariants);
        }
        for (i, v) in self.variants.iter().enumerate() {
            if self.variants[..i].contains(v) {
                return Err(ConfigError::DuplicateVariant { variant: *v });
            }
        }
        if !self.variants.contains(&self.reference) {
            return Err(ConfigError::ReferenceNotSelected {
                reference: self.reference,
            });
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            variants: Variant::ALL.to_vec(),
            reference: Variant::MidProbe,
            trace_mode: TraceMode::Disagreements,
        }
    }
}

/// Invalid [`RunConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoVariants,
    DuplicateVariant { variant: Variant },
    ReferenceNotSelected { reference: Variant },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoVariants => write!(f, "no search variants selected"),
            Self::DuplicateVariant { variant } => {
                write!(f, "variant {variant} selected more than once")
            }
            Self::ReferenceNotSelected { reference } => {
                write!(f, "reference variant {reference} is not among the selected variants")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
