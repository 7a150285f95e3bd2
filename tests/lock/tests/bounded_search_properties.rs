//! Exhaustive small-domain properties of every search variant.
//!
//! Over all non-decreasing sequences up to length 6 on `0..=4`, with targets
//! `-1..=5` (so both absent and present values are covered):
//!
//! - mid-probe finds some occurrence of every present target
//! - every variant returns not-found for every absent target
//! - every index any variant returns holds an equal element
//! - repeated calls give identical results
//! - traces agree with searches

use probe_kernel::narrow::{search, search_variant, try_search_by, Variant};
use probe_kernel::trace::{trace_variant, Phase};
use probe_kernel::value::{search_values, Value};

use lock_tests::sorted_sequences;

#[test]
fn mid_probe_finds_every_present_target() {
    for seq in sorted_sequences(6, 4) {
        for x in &seq {
            let i = search(&seq, x).unwrap_or_else(|| panic!("{x} not found in {seq:?}"));
            assert_eq!(seq[i], *x, "{seq:?} {x}");
        }
    }
}

#[test]
fn absent_targets_are_never_found() {
    for seq in sorted_sequences(6, 4) {
        for x in -1..=5 {
            if seq.contains(&x) {
                continue;
            }
            for &v in Variant::ALL {
                assert_eq!(search_variant(&seq, &x, v), None, "{v} {seq:?} {x}");
            }
        }
    }
}

#[test]
fn every_returned_index_holds_the_target() {
    for seq in sorted_sequences(6, 4) {
        for x in -1..=5 {
            for &v in Variant::ALL {
                if let Some(i) = search_variant(&seq, &x, v) {
                    assert_eq!(seq[i], x, "{v} {seq:?} {x}");
                }
            }
        }
    }
}

#[test]
fn historical_variants_miss_some_present_targets() {
    let mut misses = [0usize; 2];
    for seq in sorted_sequences(6, 4) {
        for x in &seq {
            if search_variant(&seq, x, Variant::Unchecked).is_none() {
                misses[0] += 1;
            }
            if search_variant(&seq, x, Variant::LowProbe).is_none() {
                misses[1] += 1;
            }
        }
    }
    assert!(misses[0] > 0, "unchecked variant never missed");
    assert!(misses[1] > 0, "low-probe variant never missed");
}

#[test]
fn searches_are_idempotent() {
    for seq in sorted_sequences(5, 3) {
        for x in -1..=4 {
            for &v in Variant::ALL {
                assert_eq!(search_variant(&seq, &x, v), search_variant(&seq, &x, v));
            }
        }
    }
}

#[test]
fn traces_agree_with_searches() {
    for seq in sorted_sequences(6, 4) {
        for x in -1..=5 {
            for &v in Variant::ALL {
                let trace = trace_variant(&seq, &x, v);
                assert_eq!(trace.outcome, search_variant(&seq, &x, v), "{v} {seq:?} {x}");
                if trace.terminal_phase() == Phase::Verify && !seq.is_empty() {
                    assert!(trace.verified.is_some_and(|i| i < seq.len()));
                }
            }
        }
    }
}

#[test]
fn dynamic_values_match_static_search() {
    for seq in sorted_sequences(5, 3) {
        let values: Vec<Value> = seq.iter().copied().map(Value::from).collect();
        for x in -1..=4 {
            for &v in Variant::ALL {
                assert_eq!(
                    search_values(&values, &Value::from(x), v),
                    Ok(search_variant(&seq, &x, v)),
                    "{v} {seq:?} {x}"
                );
            }
        }
    }
}

#[test]
fn comparisons_are_logarithmic() {
    let seq: Vec<u64> = (0..4096).map(|i| i * 2).collect();
    for &v in Variant::ALL {
        for target in [0, 1, 4094, 8190, 9000] {
            let mut comparisons = 0;
            let result: Result<Option<usize>, ()> = try_search_by(seq.len(), v, |i| {
                comparisons += 1;
                Ok(seq[i].cmp(&target))
            });
            assert!(result.is_ok());
            // Low-probe compares twice per iteration.
            assert!(comparisons <= 2 * 13 + 1, "{v} {target}: {comparisons}");
        }
    }
}
