//! Shared helpers for probe benchmark suites.

use probe_kernel::value::Value;

/// Strictly increasing even numbers `0, 2, 4, ..` of length `n`.
///
/// Even targets are present, odd targets are absent.
#[must_use]
pub fn even_sequence(n: u64) -> Vec<u64> {
    (0..n).map(|i| i * 2).collect()
}

/// [`even_sequence`] as runtime-checked values.
///
/// # Panics
///
/// Panics if an element exceeds `i64::MAX`. Benchmark setup failures are fatal.
#[must_use]
pub fn even_values(n: u64) -> Vec<Value> {
    even_sequence(n)
        .into_iter()
        .map(|x| Value::Integer(i64::try_from(x).expect("benchmark size fits i64")))
        .collect()
}

/// Targets spread across the sequence: present and absent, both ends and the middle.
#[must_use]
pub fn probe_targets(n: u64) -> Vec<u64> {
    let last = n.saturating_sub(1) * 2;
    vec![0, 1, last / 2, last / 2 + 1, last, last + 1]
}
