//! Tests for mean bounds propagation.

use carseq_config::MeanTargetConfig;
use carseq_core::{Contradiction, IntDomains, ProblemError, VarId};
use carseq_test::{DepthFirst, TrailedStore};
use proptest::prelude::*;

use super::*;

fn group(store: &mut TrailedStore, n: usize, lower: i64, upper: i64) -> Vec<VarId> {
    (0..n).map(|_| store.new_var(lower, upper)).collect()
}

#[test]
fn test_no_pruning_when_mean_reachable() {
    let mut store = TrailedStore::new();
    let vars = group(&mut store, 3, 0, 10);
    let mut prop = MeanBoundsPropagator::new(&mut store, vars.clone(), MeanTarget::Fixed(5)).unwrap();

    prop.propagate(&mut store, EventMask::ALL).unwrap();
    for &v in &vars {
        assert_eq!(store.lower_bound(v), 0);
        assert_eq!(store.upper_bound(v), 10);
    }
    assert_eq!(prop.is_entailed(&store), Entailment::Undefined);
}

#[test]
fn test_fixing_high_value_caps_others() {
    let mut store = TrailedStore::new();
    let vars = group(&mut store, 3, 0, 10);
    let mut prop = MeanBoundsPropagator::new(&mut store, vars.clone(), MeanTarget::Fixed(5)).unwrap();
    prop.propagate(&mut store, EventMask::ALL).unwrap();

    store.assign(vars[0], 10).unwrap();
    prop.propagate(&mut store, EventMask::INSTANTIATE).unwrap();

    assert_eq!(store.upper_bound(vars[1]), 5);
    assert_eq!(store.upper_bound(vars[2]), 5);
    assert_eq!(store.lower_bound(vars[1]), 0);
    assert_eq!(prop.state(&store), PropagatorState::Active);
}

#[test]
fn test_unreachable_mean_contradicts() {
    let mut store = TrailedStore::new();
    let vars = group(&mut store, 2, 0, 1);
    let mut prop = MeanBoundsPropagator::new(&mut store, vars.clone(), MeanTarget::Fixed(10)).unwrap();

    assert_eq!(prop.is_entailed(&store), Entailment::False);
    assert_eq!(
        prop.propagate(&mut store, EventMask::ALL),
        Err(Contradiction::on(vars[0]))
    );
}

#[test]
fn test_lower_bounds_raised() {
    let mut store = TrailedStore::new();
    let vars = group(&mut store, 2, 0, 5);
    let mut prop = MeanBoundsPropagator::new(&mut store, vars.clone(), MeanTarget::Fixed(4)).unwrap();

    prop.propagate(&mut store, EventMask::ALL).unwrap();
    // sum 8 with both at most 5: each at least 3
    assert_eq!(store.domain(vars[0]), vec![3, 4, 5]);
    assert_eq!(store.domain(vars[1]), vec![3, 4, 5]);
}

#[test]
fn test_holes_skipped_when_walking() {
    let mut store = TrailedStore::new();
    let x = store.new_var_from([0, 2, 7, 9]);
    let y = store.new_var(0, 1);
    let mut prop = MeanBoundsPropagator::new(&mut store, vec![x, y], MeanTarget::Fixed(4)).unwrap();

    prop.propagate(&mut store, EventMask::ALL).unwrap();
    assert_eq!(store.domain(x), vec![7]);
    assert_eq!(store.domain(y), vec![1]);
}

#[test]
fn test_passive_once_instantiated() {
    let mut store = TrailedStore::new();
    let vars = group(&mut store, 2, 0, 10);
    let mut prop = MeanBoundsPropagator::new(&mut store, vars.clone(), MeanTarget::Fixed(5)).unwrap();

    store.checkpoint();
    store.assign(vars[0], 3).unwrap();
    prop.propagate(&mut store, EventMask::INSTANTIATE).unwrap();
    assert_eq!(store.domain(vars[1]), vec![7]);
    assert_eq!(prop.state(&store), PropagatorState::Passive);
    assert_eq!(prop.is_entailed(&store), Entailment::True);

    // passive: nothing is checked any more
    prop.propagate(&mut store, EventMask::ALL).unwrap();

    store.rewind();
    assert_eq!(prop.state(&store), PropagatorState::Active);
    assert_eq!(store.domain_size(vars[1]), 11);
}

#[test]
fn test_inferred_mean_never_prunes() {
    let mut store = TrailedStore::new();
    let a = store.new_var(0, 10);
    let b = store.new_var(1, 10);
    let mut prop = MeanBoundsPropagator::new(&mut store, vec![a, b], MeanTarget::Inferred).unwrap();
    assert_eq!(prop.target_sum(), None);

    // ΣLB = 1 is not a multiple of 2
    assert_ne!(prop.is_entailed(&store), Entailment::False);
    prop.propagate(&mut store, EventMask::ALL).unwrap();
    assert_eq!(store.domain_size(a), 11);
    assert_eq!(store.domain_size(b), 10);
    assert_eq!(prop.observed_mean(&store), 0);
    assert_eq!(prop.is_entailed(&store), Entailment::Undefined);
}

#[test]
fn test_inferred_mean_follows_bounds() {
    let mut store = TrailedStore::new();
    let a = store.new_var(2, 6);
    let b = store.new_var(4, 9);
    let c = store.new_var(0, 3);
    let mut prop = MeanBoundsPropagator::new(&mut store, vec![a, b, c], MeanTarget::Inferred).unwrap();

    store.checkpoint();
    prop.propagate(&mut store, EventMask::ALL).unwrap();
    assert_eq!(prop.observed_mean(&store), 2);
    assert_eq!(store.domain(b), (4..=9).collect::<Vec<_>>());

    store.assign(b, 9).unwrap();
    prop.propagate(&mut store, EventMask::INSTANTIATE).unwrap();
    assert_eq!(prop.observed_mean(&store), 3);
    assert_eq!(store.domain(a), vec![2, 3, 4, 5, 6]);
    assert_eq!(store.domain(c), vec![0, 1, 2, 3]);

    store.rewind();
    assert_eq!(prop.observed_mean(&store), 2);
    prop.propagate(&mut store, EventMask::ALL).unwrap();
    assert_eq!(store.domain_size(b), 6);
}

#[test]
fn test_inferred_mean_passive_when_assigned() {
    let mut store = TrailedStore::new();
    let vars = vec![store.new_var(-3, 3), store.new_var(0, 3)];
    let mut prop = MeanBoundsPropagator::new(&mut store, vars.clone(), MeanTarget::Inferred).unwrap();
    // negative sums round down
    assert_eq!(prop.observed_mean(&store), -2);

    store.checkpoint();
    store.assign(vars[0], -3).unwrap();
    store.assign(vars[1], 2).unwrap();
    prop.propagate(&mut store, EventMask::INSTANTIATE).unwrap();
    assert_eq!(prop.state(&store), PropagatorState::Passive);
    assert_eq!(prop.is_entailed(&store), Entailment::True);

    store.rewind();
    assert_eq!(prop.state(&store), PropagatorState::Active);
}

#[test]
fn test_search_with_inferred_mean() {
    let mut store = TrailedStore::new();
    let vars = vec![store.new_var(0, 10), store.new_var(1, 10), store.new_var(3, 4)];
    let mut prop = MeanBoundsPropagator::new(&mut store, vars.clone(), MeanTarget::Inferred).unwrap();

    let solution = DepthFirst::new(1_000)
        .solve(
            &mut store,
            &vars,
            |s| {
                vars.iter()
                    .find(|&&v| !s.is_instantiated(v))
                    .map(|&v| (v, s.upper_bound(v)))
            },
            |s| prop.propagate(s, EventMask::ALL),
        )
        .unwrap();

    assert_eq!(solution, vec![10, 10, 4]);
}

#[test]
fn test_mean_overflow_rejected() {
    let mut store = TrailedStore::new();
    let vars = group(&mut store, 3, 0, 1);
    let result = MeanBoundsPropagator::new(&mut store, vars, MeanTarget::Fixed(i64::MAX / 2));
    assert_eq!(
        result.unwrap_err(),
        ProblemError::MeanOverflow {
            mean: i64::MAX / 2,
            count: 3,
        }
    );
}

#[test]
fn test_extreme_bounds_do_not_wrap() {
    let mut store = TrailedStore::new();
    let big = store.new_var(i64::MAX - 2, i64::MAX);
    let small = store.new_var(i64::MIN, i64::MIN + 2);
    let other = store.new_var(i64::MAX - 1, i64::MAX);
    let mut prop =
        MeanBoundsPropagator::new(&mut store, vec![big, small, other], MeanTarget::Fixed(0)).unwrap();

    // sums saturate instead of wrapping; the pass ends without panicking
    let _ = prop.is_entailed(&store);
    let _ = prop.propagate(&mut store, EventMask::ALL);
}

#[test]
fn test_empty_group_rejected() {
    let mut store = TrailedStore::new();
    let result = MeanBoundsPropagator::new(&mut store, vec![], MeanTarget::Fixed(1));
    assert_eq!(result.unwrap_err(), ProblemError::EmptyGroup);
}

#[test]
fn test_priority_and_events() {
    let mut store = TrailedStore::new();
    let vars = group(&mut store, 5, 0, 1);
    let prop = MeanBoundsPropagator::new(&mut store, vars, MeanTarget::Fixed(0)).unwrap();
    assert_eq!(prop.priority(), Priority::Linear);
    assert_eq!(prop.events(), EventMask::BOUNDS);
}

#[test]
fn test_target_from_config() {
    assert_eq!(MeanTarget::from(MeanTargetConfig::Fixed(3)), MeanTarget::Fixed(3));
    assert_eq!(MeanTarget::from(MeanTargetConfig::Inferred), MeanTarget::Inferred);
}

#[test]
fn test_search_with_mean() {
    let mut store = TrailedStore::new();
    let vars = group(&mut store, 4, 0, 4);
    let mut prop = MeanBoundsPropagator::new(&mut store, vars.clone(), MeanTarget::Fixed(3)).unwrap();

    let solution = DepthFirst::new(1_000)
        .solve(
            &mut store,
            &vars,
            |s| {
                vars.iter()
                    .find(|&&v| !s.is_instantiated(v))
                    .map(|&v| (v, s.lower_bound(v)))
            },
            |s| prop.propagate(s, EventMask::ALL),
        )
        .unwrap();

    assert_eq!(solution.iter().sum::<i64>(), 12);
    assert_eq!(solution, vec![0, 4, 4, 4]);
}

proptest! {
    #[test]
    fn prop_supported_values_survive(
        domains in proptest::collection::vec(
            proptest::collection::btree_set(0i64..7, 1..5),
            3,
        ),
        mean in 0i64..7,
    ) {
        let mut store = TrailedStore::new();
        let vars: Vec<VarId> = domains
            .iter()
            .map(|d| store.new_var_from(d.iter().copied()))
            .collect();
        let mut prop = MeanBoundsPropagator::new(&mut store, vars.clone(), MeanTarget::Fixed(mean)).unwrap();

        let mut supports = Vec::new();
        for &a in &domains[0] {
            for &b in &domains[1] {
                for &c in &domains[2] {
                    if a + b + c == 3 * mean {
                        supports.push([a, b, c]);
                    }
                }
            }
        }

        let result = prop.propagate(&mut store, EventMask::ALL);
        if supports.is_empty() {
            // a single pass may not detect every dead end
            if result.is_ok() {
                prop_assert!(vars.iter().all(|&v| store.domain_size(v) > 0));
            }
        } else {
            prop_assert!(result.is_ok());
            for tuple in supports {
                for (&var, &value) in vars.iter().zip(&tuple) {
                    prop_assert!(store.contains(var, value));
                }
            }
        }
    }
}
