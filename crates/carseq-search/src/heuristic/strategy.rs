//! Composed branching strategy.

use std::sync::Arc;

use carseq_config::SearchConfig;
use carseq_core::{CarSequencingProblem, IntDomains, ProblemError, Reversible, VarId};
use tracing::debug;

use super::value_selector::{ValueSelector, WeightedValueSelector};
use super::variable_selector::{SequentialVariableSelector, VariableSelector};

/// A branching decision: try `var = value` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub var: VarId,
    pub value: i64,
}

/// Variable selection followed by value selection over one sequence.
///
/// # Type Parameters
/// * `V` - The variable selector
/// * `W` - The value selector
#[derive(Debug)]
pub struct HeuristicSearch<V, W> {
    variables: V,
    values: W,
    sequence: Vec<VarId>,
    decisions: u64,
}

impl HeuristicSearch<SequentialVariableSelector, WeightedValueSelector> {
    /// Sequential variable order with the weighted value selector
    /// configured by `config`.
    pub fn from_config<E: Reversible>(
        env: &mut E,
        problem: Arc<CarSequencingProblem>,
        sequence: Vec<VarId>,
        config: &SearchConfig,
    ) -> Result<Self, ProblemError> {
        let values = WeightedValueSelector::from_config(problem, sequence.clone(), config)?;
        Ok(Self::new(SequentialVariableSelector::new(env), values, sequence))
    }
}

impl<V, W> HeuristicSearch<V, W>
where
    V: VariableSelector,
    W: ValueSelector,
{
    pub fn new(variables: V, values: W, sequence: Vec<VarId>) -> Self {
        Self {
            variables,
            values,
            sequence,
            decisions: 0,
        }
    }

    /// Next decision, or `None` once every sequence variable is fixed.
    pub fn next_decision<E: IntDomains + Reversible>(&mut self, env: &mut E) -> Option<Decision> {
        let var = self.variables.get_next(env, &self.sequence)?;
        let value = self.values.select_value(&*env, var);
        self.decisions += 1;
        debug!(event = "decision", var, value, decisions = self.decisions);
        Some(Decision { var, value })
    }

    pub fn value_selector(&self) -> &W {
        &self.values
    }

    pub fn sequence(&self) -> &[VarId] {
        &self.sequence
    }

    /// Decisions returned so far.
    pub fn decisions(&self) -> u64 {
        self.decisions
    }
}
