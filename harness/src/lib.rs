//! Probe Harness: runs the kernel's search variants over test-vector
//! fixtures and reconciles them.
//!
//! The harness does NOT implement search logic; it delegates to the kernel.
//! Fixtures provide data only; the harness owns orchestration, validation,
//! and the deterministic run report.
//!
//! # Pipeline
//!
//! ```text
//! load_fixture(path) → RunConfig::validate → run_vectors → RunReportV1 { digest }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod canon;
pub mod config;
pub mod fixture;
pub mod hash;
pub mod report;
pub mod runner;
