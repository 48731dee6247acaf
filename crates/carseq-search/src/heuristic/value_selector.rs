//! Weighted multi-criterion value selection.

use std::fmt::Debug;
use std::sync::Arc;

use carseq_config::SearchConfig;
use carseq_core::{
    CarSequencingProblem, CriteriaSet, Criterion, HeuristicError, IntDomains, ProblemError, VarId,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use tracing::{trace, warn};

use super::capacity::CapacityProjector;
use super::scoring::{normalize, static_score, CriterionScores};
use super::sequence_state::SequenceStateProjector;

/// Trait for choosing the value to branch on for a variable.
///
/// Implementations must return a value of the variable's current domain.
pub trait ValueSelector: Send + Debug {
    /// Picks a value for `var`.
    fn select_value<D: IntDomains>(&mut self, domains: &D, var: VarId) -> i64;
}

/// Counters kept by [`WeightedValueSelector`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeuristicStats {
    /// Calls to `select_value`.
    pub selections: u64,
    /// Selections that fell back to the domain's upper bound.
    pub fallbacks: u64,
    /// Most recent recovered error.
    pub last_error: Option<HeuristicError>,
}

impl HeuristicStats {
    fn record(&mut self, error: HeuristicError) {
        warn!(event = "heuristic_error", error = %error);
        self.last_error = Some(error);
    }
}

/// Ranks the classes in a variable's domain on a set of criteria.
///
/// At every call the selector rebuilds the assigned prefix of its sequence,
/// projects residual capacity per option, scores each candidate class on
/// each criterion, min-max normalizes each criterion across candidates and
/// sums the results. Ties for the best sum are broken uniformly with the
/// selector's own generator, so a fixed seed gives a fixed choice.
///
/// Weight and capacity don't depend on the prefix and are scored once per
/// class when the selector is built.
///
/// Domain values that don't name a class are never chosen, nor are
/// candidates whose total is not finite. If no candidate is left, the
/// domain's upper bound is returned and the fault is recorded in
/// [`HeuristicStats`].
///
/// # Type Parameters
/// * `R` - The tie-breaking generator
#[derive(Debug)]
pub struct WeightedValueSelector<R = ChaCha8Rng> {
    problem: Arc<CarSequencingProblem>,
    sequence: Vec<VarId>,
    criteria: Vec<Criterion>,
    // [class][criterion index], `None` for prefix-dependent criteria
    static_scores: Vec<SmallVec<[Option<f64>; 6]>>,
    rng: R,
    stats: HeuristicStats,
}

impl WeightedValueSelector<ChaCha8Rng> {
    /// Creates a selector with a ChaCha generator seeded from `seed`.
    pub fn new(
        problem: Arc<CarSequencingProblem>,
        sequence: Vec<VarId>,
        criteria: CriteriaSet,
        seed: u64,
    ) -> Result<Self, ProblemError> {
        Self::with_rng(problem, sequence, criteria, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a selector from the value-selection part of `config`.
    pub fn from_config(
        problem: Arc<CarSequencingProblem>,
        sequence: Vec<VarId>,
        config: &SearchConfig,
    ) -> Result<Self, ProblemError> {
        Self::new(
            problem,
            sequence,
            config.value_selection.criteria.clone(),
            config.seed(),
        )
    }
}

impl<R: Rng> WeightedValueSelector<R> {
    /// Creates a selector drawing ties from `rng`.
    pub fn with_rng(
        problem: Arc<CarSequencingProblem>,
        sequence: Vec<VarId>,
        criteria: CriteriaSet,
        rng: R,
    ) -> Result<Self, ProblemError> {
        criteria.validate()?;
        let criteria = criteria.criteria();
        let static_scores: Vec<SmallVec<[Option<f64>; 6]>> = (0..problem.class_count())
            .map(|class| {
                criteria
                    .iter()
                    .map(|&criterion| {
                        if criterion.is_dynamic() {
                            None
                        } else {
                            static_score(&problem, criterion, class)
                        }
                    })
                    .collect()
            })
            .collect();
        Ok(Self {
            problem,
            sequence,
            criteria,
            static_scores,
            rng,
            stats: HeuristicStats::default(),
        })
    }

    /// Criteria aggregated by this selector, in evaluation order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Cached score of `class` on `criterion`, if the criterion is static
    /// and aggregated by this selector.
    pub fn static_score(&self, class: usize, criterion: Criterion) -> Option<f64> {
        let index = self.criteria.iter().position(|&c| c == criterion)?;
        self.static_scores.get(class)?[index]
    }

    pub fn stats(&self) -> &HeuristicStats {
        &self.stats
    }

    pub fn problem(&self) -> &CarSequencingProblem {
        &self.problem
    }

    /// Aggregate score of every candidate of `var`, in domain order.
    pub fn candidate_scores<D: IntDomains>(&self, domains: &D, var: VarId) -> Vec<(i64, f64)> {
        let problem = &*self.problem;
        let prefix = SequenceStateProjector::collect(problem, domains, &self.sequence);
        let residual = CapacityProjector::residual(problem, &prefix);
        let scores = CriterionScores::new(problem, &prefix, &residual);

        let mut candidates: SmallVec<[(i64, SmallVec<[f64; 6]>); 16]> = SmallVec::new();
        for value in domains.values(var) {
            let Some(class) = problem.class_of(value) else {
                continue;
            };
            let cached = &self.static_scores[class];
            let raw: SmallVec<[f64; 6]> = self
                .criteria
                .iter()
                .zip(cached)
                .map(|(&criterion, &hit)| hit.unwrap_or_else(|| scores.score(criterion, class)))
                .collect();
            candidates.push((value, raw));
        }

        let mut totals = vec![0.0; candidates.len()];
        let mut column = Vec::with_capacity(candidates.len());
        for index in 0..self.criteria.len() {
            column.clear();
            column.extend(candidates.iter().map(|(_, raw)| raw[index]));
            normalize(&mut column);
            for (total, score) in totals.iter_mut().zip(&column) {
                *total += score;
            }
        }

        candidates
            .iter()
            .zip(totals)
            .map(|((value, _), total)| (*value, total))
            .collect()
    }

    fn fallback<D: IntDomains>(&mut self, domains: &D, var: VarId) -> i64 {
        self.stats.fallbacks += 1;
        self.stats
            .record(HeuristicError::EmptyCandidatePool { var });
        domains.upper_bound(var)
    }
}

impl<R> ValueSelector for WeightedValueSelector<R>
where
    R: Rng + Send + Debug,
{
    fn select_value<D: IntDomains>(&mut self, domains: &D, var: VarId) -> i64 {
        self.stats.selections += 1;

        let scored = self.candidate_scores(domains, var);
        let best = scored
            .iter()
            .map(|&(_, total)| total)
            .filter(|total| total.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        let ties: SmallVec<[i64; 16]> = scored
            .iter()
            .filter(|&&(_, total)| total.is_finite() && total == best)
            .map(|&(value, _)| value)
            .collect();

        let value = match ties.len() {
            0 => return self.fallback(domains, var),
            1 => ties[0],
            n => ties[self.rng.random_range(0..n)],
        };

        trace!(
            event = "value_selected",
            var,
            value,
            candidates = scored.len(),
            ties = ties.len(),
            score = best,
        );
        value
    }
}

#[cfg(test)]
#[path = "value_selector_tests.rs"]
mod tests;
