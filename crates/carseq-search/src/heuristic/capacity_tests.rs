//! Tests for residual capacity projection.

use carseq_core::{CarSequencingProblem, ClassOptionMatrix, FrequencyPolicy};
use carseq_test::TrailedStore;
use proptest::prelude::*;

use super::*;
use crate::heuristic::SequenceStateProjector;

/// Class 0 requires the single option, class 1 doesn't.
fn one_option(max: u32, window: u32, demands: Vec<u32>) -> CarSequencingProblem {
    let matrix = ClassOptionMatrix::from_binary(vec![vec![1], vec![0]]).unwrap();
    CarSequencingProblem::new(matrix, vec![FrequencyPolicy::new(max, window)], demands).unwrap()
}

fn prefix_of(problem: &CarSequencingProblem, classes: &[i64]) -> AssignedPrefix {
    let (mut store, vars) = TrailedStore::for_sequence(problem);
    for (&var, &class) in vars.iter().zip(classes) {
        store.assign(var, class).unwrap();
    }
    SequenceStateProjector::collect(problem, &store, &vars)
}

#[test]
fn test_empty_prefix_keeps_baseline() {
    let problem = one_option(1, 3, vec![2, 4]);
    let prefix = prefix_of(&problem, &[]);
    assert_eq!(CapacityProjector::residual(&problem, &prefix), vec![6]);
}

#[test]
fn test_single_hit_consumes_window() {
    let problem = one_option(1, 3, vec![2, 4]);
    let prefix = prefix_of(&problem, &[0]);
    assert_eq!(CapacityProjector::consumed(&problem, &prefix, 0), 3);
    assert_eq!(CapacityProjector::residual_of(&problem, &prefix, 0), 3);
}

#[test]
fn test_single_policy_blocks_chain() {
    let problem = one_option(1, 3, vec![2, 4]);
    // hit, gap, gap, hit -> block 0..3 then 3..6
    let prefix = prefix_of(&problem, &[0, 1, 1, 0]);
    assert_eq!(CapacityProjector::consumed(&problem, &prefix, 0), 6);
    assert_eq!(CapacityProjector::residual_of(&problem, &prefix, 0), 0);
}

#[test]
fn test_misses_consume_one_slot_each() {
    let problem = one_option(1, 3, vec![2, 4]);
    let prefix = prefix_of(&problem, &[1, 1]);
    assert_eq!(CapacityProjector::consumed(&problem, &prefix, 0), 2);
}

#[test]
fn test_pair_policy_closes_block() {
    let problem = one_option(2, 4, vec![2, 6]);
    // hits at 0 and 2 fall in one window -> block 0..4
    let prefix = prefix_of(&problem, &[0, 1, 0]);
    assert_eq!(CapacityProjector::consumed(&problem, &prefix, 0), 4);
    assert_eq!(CapacityProjector::residual_of(&problem, &prefix, 0), 4);
}

#[test]
fn test_pair_policy_pending_hit_consumes_itself() {
    let problem = one_option(2, 4, vec![2, 6]);
    let prefix = prefix_of(&problem, &[1, 0]);
    assert_eq!(CapacityProjector::consumed(&problem, &prefix, 0), 2);
}

#[test]
fn test_pair_policy_restarts_outside_window() {
    let problem = one_option(2, 3, vec![3, 6]);
    // hit at 0, next hit at 3 is outside 0..3: new block starts at 3,
    // closed by the hit at 4 -> 3..6
    let prefix = prefix_of(&problem, &[0, 1, 1, 0, 0]);
    assert_eq!(CapacityProjector::consumed(&problem, &prefix, 0), 6);
}

#[test]
fn test_wide_policy_counts_slots() {
    let problem = one_option(3, 5, vec![3, 5]);
    let prefix = prefix_of(&problem, &[0, 0, 1]);
    assert_eq!(CapacityProjector::consumed(&problem, &prefix, 0), 3);
    assert_eq!(CapacityProjector::residual_of(&problem, &prefix, 0), 5);
}

#[test]
fn test_overshoot_floors_at_zero() {
    let problem = one_option(1, 4, vec![1, 1]);
    let prefix = prefix_of(&problem, &[1, 0]);
    assert_eq!(CapacityProjector::consumed(&problem, &prefix, 0), 5);
    assert_eq!(CapacityProjector::residual_of(&problem, &prefix, 0), 0);
}

proptest! {
    #[test]
    fn prop_consumed_covers_prefix(
        max in 1u32..4,
        extra in 0u32..4,
        hits in proptest::collection::vec(any::<bool>(), 0..24),
    ) {
        let policy = FrequencyPolicy::new(max, max + extra);
        let consumed = scan(policy, &hits);
        prop_assert!(consumed >= hits.len());
    }

    #[test]
    fn prop_residual_within_baseline(
        max in 1u32..4,
        extra in 0u32..4,
        classes in proptest::collection::vec(0i64..2, 0..12),
    ) {
        let ones = classes.iter().filter(|&&c| c == 0).count() as u32;
        let problem = one_option(max, max + extra, vec![ones + 2, classes.len() as u32 + 2]);
        let prefix = prefix_of(&problem, &classes);
        let residual = CapacityProjector::residual_of(&problem, &prefix, 0);
        prop_assert!(residual <= problem.sequence_length() as u64);
        prop_assert!(residual as usize + prefix.len() <= problem.sequence_length());
    }
}
