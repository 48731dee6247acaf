//! Residual capacity projection.
//!
//! For each option, estimates how many slots of the full sequence are still
//! usable once the assigned prefix is accounted for. A placement of an
//! option forces gaps after it; those gaps count as consumed even when they
//! lie beyond the end of the prefix.
//!
//! The projection only guides value ordering. It never prunes a domain.

use carseq_core::{CarSequencingProblem, FrequencyPolicy};

use super::sequence_state::AssignedPrefix;

/// Progress through a block of a `2/q` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    NoHitYet,
    OneHitPending { first: usize },
}

/// Computes residual capacity per option.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityProjector;

impl CapacityProjector {
    /// Residual capacity of every option.
    ///
    /// With an empty prefix every entry equals the sequence length.
    pub fn residual(problem: &CarSequencingProblem, prefix: &AssignedPrefix) -> Vec<u64> {
        (0..problem.option_count())
            .map(|option| Self::residual_of(problem, prefix, option))
            .collect()
    }

    /// Residual capacity of one option, `sequence_length - consumed`,
    /// floored at zero.
    pub fn residual_of(problem: &CarSequencingProblem, prefix: &AssignedPrefix, option: usize) -> u64 {
        let consumed = Self::consumed(problem, prefix, option);
        problem.sequence_length().saturating_sub(consumed) as u64
    }

    /// Slots consumed by the prefix for `option`, forced gaps included.
    ///
    /// Always at least the prefix length.
    pub fn consumed(problem: &CarSequencingProblem, prefix: &AssignedPrefix, option: usize) -> usize {
        let matrix = problem.matrix();
        let hits: Vec<bool> = prefix
            .values()
            .iter()
            .map(|&v| problem.class_of(v).is_some_and(|c| matrix.requires(c, option)))
            .collect();
        scan(problem.policy(option), &hits)
    }
}

/// Walks `hits` and returns the final scan position.
fn scan(policy: FrequencyPolicy, hits: &[bool]) -> usize {
    let window = policy.window as usize;
    match policy.max {
        1 => scan_single(window, hits),
        2 => scan_pairs(window, hits),
        _ => hits.len(),
    }
}

/// Each hit covers itself and the `window - 1` slots after it.
fn scan_single(window: usize, hits: &[bool]) -> usize {
    let mut pos = 0;
    let mut frontier = 0;
    while pos < hits.len() {
        if hits[pos] {
            pos += window;
        } else {
            pos += 1;
        }
        frontier = frontier.max(pos);
    }
    frontier
}

/// Two hits within one window close a block covering `first..first + window`.
fn scan_pairs(window: usize, hits: &[bool]) -> usize {
    let mut state = BlockState::NoHitYet;
    let mut pos = 0;
    let mut frontier = 0;
    while pos < hits.len() {
        if hits[pos] {
            state = match state {
                BlockState::NoHitYet => {
                    pos += 1;
                    BlockState::OneHitPending { first: pos - 1 }
                }
                BlockState::OneHitPending { first } if pos - first < window => {
                    pos = first + window;
                    BlockState::NoHitYet
                }
                BlockState::OneHitPending { .. } => {
                    let first = pos;
                    pos += 1;
                    BlockState::OneHitPending { first }
                }
            };
        } else {
            pos += 1;
        }
        frontier = frontier.max(pos);
    }
    frontier
}

#[cfg(test)]
#[path = "capacity_tests.rs"]
mod tests;
