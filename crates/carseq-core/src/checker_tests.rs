//! Tests for sequence checking

use super::checker::*;
use super::problem::{CarSequencingProblem, ClassOptionMatrix, FrequencyPolicy};

/// Two options: option 0 at most 1 in 2, option 1 at most 2 in 3.
fn problem() -> CarSequencingProblem {
    let matrix = ClassOptionMatrix::from_binary(vec![vec![1, 0], vec![0, 1], vec![0, 0]]).unwrap();
    CarSequencingProblem::new(
        matrix,
        vec![FrequencyPolicy::new(1, 2), FrequencyPolicy::new(2, 3)],
        vec![2, 2, 2],
    )
    .unwrap()
}

#[test]
fn test_valid_sequence() {
    let p = problem();
    assert_eq!(check_sequence(&p, &[0, 1, 2, 0, 1, 2]), Ok(()));
    assert_eq!(check_sequence(&p, &[0, 1, 1, 0, 2, 2]), Ok(()));
}

#[test]
fn test_window_overload() {
    let p = problem();
    assert_eq!(
        check_sequence(&p, &[0, 0, 1, 1, 2, 2]),
        Err(Violation::WindowOverload {
            option: 0,
            start: 0,
            count: 2,
            max: 1
        })
    );
}

#[test]
fn test_window_overload_late_start() {
    let p = problem();
    // option 1 three times in slots 2..5
    let matrix = ClassOptionMatrix::from_binary(vec![vec![1, 0], vec![0, 1], vec![0, 0]]).unwrap();
    let relaxed = CarSequencingProblem::new(
        matrix,
        vec![FrequencyPolicy::new(1, 2), FrequencyPolicy::new(2, 3)],
        vec![1, 3, 2],
    )
    .unwrap();
    assert_eq!(
        check_sequence(&relaxed, &[0, 2, 1, 1, 1, 2]),
        Err(Violation::WindowOverload {
            option: 1,
            start: 2,
            count: 3,
            max: 2
        })
    );
    assert!(check_prefix(&p, &[0, 2, 1, 1]).is_ok());
}

#[test]
fn test_length_mismatch() {
    let p = problem();
    assert_eq!(
        check_sequence(&p, &[0, 1, 2]),
        Err(Violation::LengthMismatch {
            expected: 6,
            found: 3
        })
    );
}

#[test]
fn test_unknown_class() {
    let p = problem();
    assert_eq!(
        check_prefix(&p, &[0, 7]),
        Err(Violation::UnknownClass {
            position: 1,
            class: 7
        })
    );
}

#[test]
fn test_demand_exceeded_in_prefix() {
    let p = problem();
    assert_eq!(
        check_prefix(&p, &[2, 2, 2]),
        Err(Violation::DemandExceeded {
            class: 2,
            demand: 2,
            found: 3
        })
    );
}

#[test]
fn test_full_sequence_demands() {
    let p = problem();
    assert_eq!(
        check_sequence(&p, &[0, 2, 0, 2, 1, 1]),
        Ok(())
    );
    assert_eq!(
        check_sequence(&p, &[0, 2, 0, 2, 1, 2]),
        Err(Violation::DemandExceeded {
            class: 2,
            demand: 2,
            found: 3
        })
    );
}

#[test]
fn test_short_prefix_window() {
    let p = problem();
    assert!(check_prefix(&p, &[]).is_ok());
    assert!(check_prefix(&p, &[1, 1]).is_ok());
}
