//! Run-report determinism and fixture binding.
//!
//! - N>=10 in-process runs yield identical reports.
//! - A fixture loaded from a caller-supplied path (any formatting, any
//!   directory) yields the same digests as the built-in vectors.
//! - The `vector_fixture` binary prints identical output across working
//!   directories and environments.
//! - No paths leak into hashed surfaces.

use std::process::Command;

use probe_harness::config::RunConfig;
use probe_harness::fixture::{course_vectors, load_fixture, parse_fixture, COURSE_VECTORS_JSON};
use probe_harness::runner::run_vectors;

use lock_tests::course_fixture_path;

#[test]
fn determinism_inproc_n10() {
    let fixture = course_vectors().unwrap();
    let first = run_vectors(&fixture, &RunConfig::default()).unwrap();
    for i in 1..=10 {
        let again = run_vectors(&course_vectors().unwrap(), &RunConfig::default()).unwrap();
        assert_eq!(again.digest, first.digest, "run {i}: digest differs");
        assert_eq!(
            again.to_canonical_bytes(),
            first.to_canonical_bytes(),
            "run {i}: report bytes differ"
        );
    }
}

#[test]
fn reformatted_fixture_binds_to_same_digest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("vectors.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    let value: serde_json::Value = serde_json::from_str(COURSE_VECTORS_JSON).unwrap();
    std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

    let loaded = load_fixture(&path).unwrap();
    let builtin = course_vectors().unwrap();
    assert_eq!(loaded.digest, builtin.digest);

    let a = run_vectors(&loaded, &RunConfig::default()).unwrap();
    let b = run_vectors(&builtin, &RunConfig::default()).unwrap();
    assert_eq!(a.digest, b.digest);
}

#[test]
fn checked_in_fixture_matches_embedded_copy() {
    let from_disk = load_fixture(&course_fixture_path()).unwrap();
    let embedded = parse_fixture(COURSE_VECTORS_JSON.as_bytes()).unwrap();
    assert_eq!(from_disk, embedded);
}

#[test]
fn no_paths_in_hashed_surfaces() {
    let report = run_vectors(&load_fixture(&course_fixture_path()).unwrap(), &RunConfig::default())
        .unwrap();
    let text = String::from_utf8(report.to_canonical_bytes()).unwrap();
    for pattern in ["/Users/", "/home/", "/tmp/", "\\Users\\", "course_vectors.json"] {
        assert!(!text.contains(pattern), "report contains {pattern:?}");
    }
}

fn run_binary(work_dir: &std::path::Path, args: &[&str], env: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_vector_fixture");
    let mut command = Command::new(bin);
    command.current_dir(work_dir).args(args);
    for &(key, val) in env {
        command.env(key, val);
    }
    let output = command
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {bin}: {e}"));
    assert!(
        output.status.success(),
        "vector_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn determinism_crossproc() {
    let scratch = tempfile::tempdir().unwrap();
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));

    let baseline = run_binary(root, &[], &[]);
    let in_scratch = run_binary(scratch.path(), &[], &[("TZ", "Asia/Tokyo")]);
    let logged = run_binary(root, &[], &[("RUST_LOG", "debug"), ("LANG", "C")]);
    assert_eq!(baseline, in_scratch);
    assert_eq!(baseline, logged);

    let fixture_path = course_fixture_path();
    let from_path = run_binary(scratch.path(), &[fixture_path.to_str().unwrap()], &[]);
    assert_eq!(baseline, from_path);

    let report = run_vectors(&course_vectors().unwrap(), &RunConfig::default()).unwrap();
    assert!(baseline.contains(&format!("report_digest={}\n", report.digest)));
    assert!(baseline.contains("vector_count=14\n"));
    assert!(baseline.contains("unchecked=13/14\n"));
    assert!(baseline.contains("low_probe=13/14\n"));
    assert!(baseline.contains("mid_probe=14/14\n"));
    assert!(baseline.contains("disagreement_count=4\n"));
}
