//! Search setup that hides the wiring between config and components.

use std::sync::Arc;

use carseq_config::SearchConfig;
use carseq_core::{CarSequencingProblem, ProblemError, Reversible, VarId};
use carseq_search::{
    HeuristicSearch, MeanBoundsPropagator, MeanTarget, SequentialVariableSelector,
    WeightedValueSelector,
};
use tracing::info;

/// Sequential variable order with weighted value selection.
pub type DefaultSearch = HeuristicSearch<SequentialVariableSelector, WeightedValueSelector>;

/// Everything an engine installs for one sequence.
#[derive(Debug)]
pub struct SearchComponents {
    /// Branching strategy.
    pub search: DefaultSearch,
    /// Mean propagator over the sequence, if the config posts one.
    pub mean: Option<MeanBoundsPropagator>,
}

/// Builds the branching strategy and optional mean propagator for
/// `sequence`, allocating their reversible state in `env`.
pub fn build_search<E: Reversible>(
    env: &mut E,
    problem: Arc<CarSequencingProblem>,
    sequence: Vec<VarId>,
    config: &SearchConfig,
) -> Result<SearchComponents, ProblemError> {
    let mean = match config.mean_target() {
        Some(target) => Some(MeanBoundsPropagator::new(
            env,
            sequence.clone(),
            MeanTarget::from(target),
        )?),
        None => None,
    };

    info!(
        event = "search_setup",
        classes = problem.class_count(),
        options = problem.option_count(),
        slots = sequence.len(),
        criteria = ?config.value_selection.criteria.criteria(),
        seed = config.seed(),
        mean = mean.is_some(),
    );

    let values = WeightedValueSelector::from_config(problem, sequence.clone(), config)?;
    let search = HeuristicSearch::new(SequentialVariableSelector::new(env), values, sequence);
    Ok(SearchComponents { search, mean })
}
