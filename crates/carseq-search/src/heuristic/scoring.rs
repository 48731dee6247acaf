//! Criterion scoring and normalization.

use carseq_core::{CarSequencingProblem, Criterion};

use super::sequence_state::AssignedPrefix;

/// Per-option terms for the current prefix, ready to score candidates.
///
/// A candidate class scores the sum of the option terms over the options
/// it requires.
#[derive(Debug, Clone)]
pub struct CriterionScores<'a> {
    problem: &'a CarSequencingProblem,
    residual: &'a [u64],
    residual_demand: Vec<f64>,
    load: Vec<f64>,
    total_residual: f64,
}

impl<'a> CriterionScores<'a> {
    /// Precomputes option terms from the prefix and residual capacities.
    pub fn new(problem: &'a CarSequencingProblem, prefix: &AssignedPrefix, residual: &'a [u64]) -> Self {
        let residual_demand: Vec<f64> = (0..problem.option_count())
            .map(|o| problem.option_demand(o).saturating_sub(prefix.placed_count(o)) as f64)
            .collect();
        let load = residual_demand
            .iter()
            .enumerate()
            .map(|(o, &demand)| demand * problem.policy(o).spacing())
            .collect();
        let total_residual = residual.iter().map(|&r| r as f64).sum();

        Self {
            problem,
            residual,
            residual_demand,
            load,
            total_residual,
        }
    }

    /// Raw score of `class` on `criterion`.
    pub fn score(&self, criterion: Criterion, class: usize) -> f64 {
        let options = self.problem.options_of(class);
        match criterion {
            Criterion::Weight => weight(self.problem, class),
            Criterion::Capacity => capacity(self.problem, class),
            Criterion::ResidualDemand => options.iter().map(|&o| self.residual_demand[o]).sum(),
            Criterion::Load => options.iter().map(|&o| self.load[o]).sum(),
            Criterion::Slack => options.iter().map(|&o| self.slack(o)).sum(),
            Criterion::Utilization => options
                .iter()
                .map(|&o| self.utilization(o).unwrap_or(0.0))
                .sum(),
        }
    }

    fn slack(&self, option: usize) -> f64 {
        self.total_residual - self.residual[option] as f64 + self.load[option]
    }

    /// Load over residual capacity; `None` once the option has no capacity
    /// left.
    pub fn utilization(&self, option: usize) -> Option<f64> {
        match self.residual[option] {
            0 => None,
            r => Some(self.load[option] / r as f64),
        }
    }
}

/// Score of `class` on a criterion that ignores the prefix; `None` for the
/// others.
pub fn static_score(problem: &CarSequencingProblem, criterion: Criterion, class: usize) -> Option<f64> {
    match criterion {
        Criterion::Weight => Some(weight(problem, class)),
        Criterion::Capacity => Some(capacity(problem, class)),
        _ => None,
    }
}

fn weight(problem: &CarSequencingProblem, class: usize) -> f64 {
    problem.options_of(class).len() as f64
}

fn capacity(problem: &CarSequencingProblem, class: usize) -> f64 {
    problem
        .options_of(class)
        .iter()
        .map(|&o| problem.policy(o).spacing())
        .sum()
}

/// Min-max normalizes `values` in place.
///
/// When every value is equal they all map to one reference value: 1 if the
/// common value is non-zero, 0 otherwise. Finite input never yields NaN.
///
/// # Examples
///
/// ```
/// use carseq_search::normalize;
///
/// let mut v = vec![2.0, 4.0, 3.0];
/// normalize(&mut v);
/// assert_eq!(v, vec![0.0, 1.0, 0.5]);
///
/// let mut flat = vec![7.0, 7.0];
/// normalize(&mut flat);
/// assert_eq!(flat, vec![1.0, 1.0]);
/// ```
pub fn normalize(values: &mut [f64]) {
    if values.is_empty() {
        return;
    }
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min = 0.0;
    }
    if max == 0.0 {
        max = 1.0;
    }
    let range = max - min;
    for v in values.iter_mut() {
        *v = (*v - min) / range;
    }
}
