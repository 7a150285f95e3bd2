//! Shared helpers for the lock tests.

/// Every non-decreasing sequence of length `0..=max_len` over `0..=max_value`.
///
/// Small domains keep this exhaustive: `max_len = 6, max_value = 4` yields
/// 462 sequences, covering duplicates, runs, and every boundary position.
#[must_use]
pub fn sorted_sequences(max_len: usize, max_value: i32) -> Vec<Vec<i32>> {
    let mut out = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for seq in &frontier {
            let start = seq.last().copied().unwrap_or(0);
            for v in start..=max_value {
                let mut extended: Vec<i32> = seq.clone();
                extended.push(v);
                next.push(extended);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

/// Workspace-relative path of the built-in course fixture.
#[must_use]
pub fn course_fixture_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../harness/fixtures/course_vectors.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_are_sorted_and_counted() {
        let all = sorted_sequences(6, 4);
        // C(n + 5 - 1, n) summed over n = 0..=6.
        assert_eq!(all.len(), 1 + 5 + 15 + 35 + 70 + 126 + 210);
        assert!(all.iter().all(|s| s.windows(2).all(|w| w[0] <= w[1])));
    }
}
