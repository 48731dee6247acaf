//! Assigned-prefix projection.

use carseq_core::{CarSequencingProblem, IntDomains, VarId};

/// Values of the instantiated sequence variables, in index order.
///
/// Slots that are not yet fixed are skipped, so a gap in the sequence is
/// compacted away. This treats assignment order as index order, which holds
/// under [`SequentialVariableSelector`](super::SequentialVariableSelector)
/// but is only an approximation under other variable orderings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignedPrefix {
    values: Vec<i64>,
    placed: Vec<u64>,
}

impl AssignedPrefix {
    /// Assigned values, in index order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Occurrences of `option` among the assigned slots.
    pub fn placed_count(&self, option: usize) -> u64 {
        self.placed.get(option).copied().unwrap_or(0)
    }
}

/// Builds [`AssignedPrefix`] snapshots from the engine's domains.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceStateProjector;

impl SequenceStateProjector {
    /// Collects the instantiated values of `vars`.
    ///
    /// Values that don't name a class of `problem` are kept in the prefix
    /// but count towards no option.
    pub fn collect<D: IntDomains>(
        problem: &CarSequencingProblem,
        domains: &D,
        vars: &[VarId],
    ) -> AssignedPrefix {
        let mut values = Vec::with_capacity(vars.len());
        let mut placed = vec![0u64; problem.option_count()];

        for &var in vars {
            let Some(value) = domains.value(var) else {
                continue;
            };
            values.push(value);
            if let Some(class) = problem.class_of(value) {
                for &option in problem.options_of(class) {
                    placed[option] += 1;
                }
            }
        }

        AssignedPrefix { values, placed }
    }
}
