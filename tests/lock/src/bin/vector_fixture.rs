//! Binary that runs a vector fixture through every search variant
//! and prints deterministic output lines for cross-process verification.
//!
//! Usage: `vector_fixture [FIXTURE_PATH]` (built-in course vectors if omitted)
//!
//! Output: key=value lines (see source for format). Logging goes to stderr
//! and is controlled by `RUST_LOG`.

use std::path::Path;

use probe_harness::config::RunConfig;
use probe_harness::fixture::{course_vectors, load_fixture};
use probe_harness::runner::run_vectors;

fn main() {
    env_logger::init();

    let fixture = match std::env::args().nth(1) {
        Some(path) => load_fixture(Path::new(&path)).expect("fixture load failed"),
        None => course_vectors().expect("built-in fixture invalid"),
    };
    log::info!("running {} vectors ({})", fixture.vectors.len(), fixture.digest);
    let report = run_vectors(&fixture, &RunConfig::default()).expect("run failed");

    println!("report_digest={}", report.digest);
    println!("fixture_digest={}", report.fixture_digest);
    println!("vector_count={}", fixture.vectors.len());
    println!("reference={}", report.reference);
    for summary in report.summary() {
        println!(
            "{}={}/{}",
            summary.variant,
            summary.passed,
            summary.passed + summary.failed
        );
    }
    println!("disagreement_count={}", report.disagreements.len());
}
