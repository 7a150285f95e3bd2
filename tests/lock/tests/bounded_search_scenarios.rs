//! Concrete search scenarios through the integer (sentinel) contract.
//!
//! - every course scenario against the default search
//! - the historical variants pinned to their exact results
//! - runtime type mismatches are errors, absence is not

use probe_kernel::error::SearchError;
use probe_kernel::narrow::{
    search, search_low_probe, search_unchecked, to_sentinel, Variant, NOT_FOUND,
};
use probe_kernel::value::{search_values, Value, ValueKind};

const COURSE: [i32; 7] = [3, 7, 9, 13, 17, 203, 205];

fn sentinel(seq: &[i32], target: i32) -> isize {
    to_sentinel(search(seq, &target))
}

#[test]
fn found_scenarios() {
    assert_eq!(sentinel(&COURSE, 3), 0);
    assert_eq!(sentinel(&COURSE, 13), 3);
    assert_eq!(sentinel(&COURSE, 17), 4);
    assert_eq!(sentinel(&COURSE, 205), 6);
    assert_eq!(to_sentinel(search(&['a', 'b', 'd', 'z'], &'z')), 3);
}

#[test]
fn not_found_scenarios() {
    assert_eq!(sentinel(&COURSE, -7), NOT_FOUND);
    assert_eq!(sentinel(&COURSE, 5), NOT_FOUND);
    assert_eq!(sentinel(&COURSE, 25), NOT_FOUND);
    assert_eq!(NOT_FOUND, -1);
}

#[test]
fn boundaries() {
    assert_eq!(sentinel(&[], 3), NOT_FOUND);
    assert_eq!(to_sentinel(search::<&str, &str>(&[], &"hi")), NOT_FOUND);
    assert_eq!(sentinel(&[3], 3), 0);
    assert_eq!(sentinel(&[3], 4), NOT_FOUND);
}

#[test]
fn unchecked_variant_is_pinned() {
    let got: Vec<isize> = COURSE
        .iter()
        .map(|x| to_sentinel(search_unchecked(&COURSE, x)))
        .collect();
    // 7, 13 and 203 each sit at a mid; `<=` steps low past them.
    assert_eq!(got, vec![0, NOT_FOUND, 2, NOT_FOUND, 4, NOT_FOUND, 6]);
}

#[test]
fn low_probe_variant_is_pinned() {
    let got: Vec<isize> = COURSE
        .iter()
        .map(|x| to_sentinel(search_low_probe(&COURSE, x)))
        .collect();
    assert_eq!(got, vec![0, NOT_FOUND, 2, NOT_FOUND, 4, NOT_FOUND, 6]);
}

#[test]
fn type_mismatch_is_an_error_not_a_sentinel() {
    let seq: Vec<Value> = COURSE.iter().copied().map(Value::from).collect();
    let err = search_values(&seq, &Value::from("hi"), Variant::MidProbe).unwrap_err();
    assert_eq!(
        err,
        SearchError::TypeMismatch {
            element: ValueKind::Number,
            target: ValueKind::Text,
        }
    );

    let letters: Vec<Value> = ['a', 'c', 'd'].into_iter().map(Value::from).collect();
    for &v in Variant::ALL {
        assert!(
            matches!(
                search_values(&letters, &Value::from(300), v),
                Err(SearchError::TypeMismatch { .. })
            ),
            "{v}"
        );
    }

    // Absence with matching types stays Ok(None).
    assert_eq!(search_values(&seq, &Value::from(25), Variant::MidProbe), Ok(None));
}
