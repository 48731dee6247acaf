//! Bounds propagation for a group of variables with a required mean.

use carseq_config::MeanTargetConfig;
use carseq_core::{
    Contradiction, IntDomains, IntDomainsMut, ProblemError, Reversible, ReversibleInt, VarId,
};
use tracing::trace;

use super::{Entailment, EventMask, Priority, Propagator, PropagatorState};

/// How the required mean of a group is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeanTarget {
    /// The mean is given and the group is pruned against it.
    Fixed(i64),
    /// The mean is observed as `floor(ΣLB / n)` on every call. Nothing is
    /// pruned.
    Inferred,
}

impl From<MeanTargetConfig> for MeanTarget {
    fn from(config: MeanTargetConfig) -> Self {
        match config {
            MeanTargetConfig::Fixed(mean) => MeanTarget::Fixed(mean),
            MeanTargetConfig::Inferred => MeanTarget::Inferred,
        }
    }
}

/// Enforces `Σ vars = mean · n` on bounds.
///
/// For each variable, a lower value is removed when even the others at
/// their upper bounds can't reach the target sum, and an upper value is
/// removed when the others at their lower bounds already overshoot it.
/// Each call makes one such pass; the engine reschedules the propagator
/// until nothing changes.
///
/// With an inferred mean the propagator only tracks the current mean of
/// the lower bounds and never narrows a domain.
///
/// The propagator goes passive once every variable is instantiated.
#[derive(Debug, Clone)]
pub struct MeanBoundsPropagator {
    vars: Vec<VarId>,
    target: MeanTarget,
    target_sum: Option<i64>,
    state: ReversibleInt,
}

impl MeanBoundsPropagator {
    /// Creates a propagator over `vars`, which must not be empty.
    ///
    /// A fixed mean whose sum over the group does not fit in an `i64` is
    /// rejected.
    pub fn new<E: Reversible>(
        env: &mut E,
        vars: Vec<VarId>,
        target: MeanTarget,
    ) -> Result<Self, ProblemError> {
        if vars.is_empty() {
            return Err(ProblemError::EmptyGroup);
        }
        let target_sum = match target {
            MeanTarget::Fixed(mean) => Some(
                i64::try_from(vars.len())
                    .ok()
                    .and_then(|n| mean.checked_mul(n))
                    .ok_or(ProblemError::MeanOverflow {
                        mean,
                        count: vars.len(),
                    })?,
            ),
            MeanTarget::Inferred => None,
        };
        Ok(Self {
            vars,
            target,
            target_sum,
            state: env.new_reversible_int(PropagatorState::Active.to_int()),
        })
    }

    pub fn vars(&self) -> &[VarId] {
        &self.vars
    }

    pub fn target(&self) -> MeanTarget {
        self.target
    }

    /// Required sum; `None` for an inferred mean.
    pub fn target_sum(&self) -> Option<i64> {
        self.target_sum
    }

    pub fn state<E: Reversible>(&self, env: &E) -> PropagatorState {
        PropagatorState::from_int(env.reversible_int(self.state))
    }

    /// Mean of the current lower bounds, rounded towards negative infinity.
    pub fn observed_mean<D: IntDomains>(&self, env: &D) -> i64 {
        let (sum_lb, _) = self.sums(env);
        sum_lb.div_euclid(self.vars.len() as i64)
    }

    // Saturates so extreme domains can't wrap the sums around.
    fn sums<D: IntDomains>(&self, env: &D) -> (i64, i64) {
        self.vars.iter().fold((0i64, 0i64), |(lb, ub), &v| {
            (
                lb.saturating_add(env.lower_bound(v)),
                ub.saturating_add(env.upper_bound(v)),
            )
        })
    }

    /// Removes values of `var` from below that can't reach `target`.
    fn filter_lower<E: IntDomainsMut>(
        &self,
        env: &mut E,
        var: VarId,
        target: i64,
    ) -> Result<(), Contradiction> {
        let (_, sum_ub) = self.sums(&*env);
        let others = sum_ub.saturating_sub(env.upper_bound(var));
        let mut x = env.lower_bound(var);
        while x.saturating_add(others) < target {
            env.remove_value(var, x)?;
            match env.next_value(var, x) {
                Some(next) => x = next,
                None => break,
            }
        }
        Ok(())
    }

    /// Removes values of `var` from above that overshoot `target`.
    fn filter_upper<E: IntDomainsMut>(
        &self,
        env: &mut E,
        var: VarId,
        target: i64,
    ) -> Result<(), Contradiction> {
        let (sum_lb, _) = self.sums(&*env);
        let others = sum_lb.saturating_sub(env.lower_bound(var));
        let mut x = env.upper_bound(var);
        while x.saturating_add(others) > target {
            env.remove_value(var, x)?;
            match env.previous_value(var, x) {
                Some(previous) => x = previous,
                None => break,
            }
        }
        Ok(())
    }
}

impl Propagator for MeanBoundsPropagator {
    fn propagate<E: IntDomainsMut + Reversible>(
        &mut self,
        env: &mut E,
        mask: EventMask,
    ) -> Result<(), Contradiction> {
        if self.state(&*env) == PropagatorState::Passive {
            return Ok(());
        }

        match self.target_sum {
            Some(target) => {
                trace!(event = "mean_propagate", target_sum = target, mask = mask.bits());
                for i in 0..self.vars.len() {
                    let var = self.vars[i];
                    self.filter_lower(env, var, target)?;
                    self.filter_upper(env, var, target)?;
                }
            }
            None => {
                trace!(
                    event = "mean_inferred",
                    mean = self.observed_mean(&*env),
                    vars = self.vars.len(),
                    mask = mask.bits(),
                );
            }
        }

        if self.vars.iter().all(|&v| env.is_instantiated(v)) {
            env.set_reversible_int(self.state, PropagatorState::Passive.to_int());
        }
        Ok(())
    }

    fn is_entailed<D: IntDomains>(&self, env: &D) -> Entailment {
        let Some(target) = self.target_sum else {
            // an observed mean holds for any assignment
            return if self.vars.iter().all(|&v| env.is_instantiated(v)) {
                Entailment::True
            } else {
                Entailment::Undefined
            };
        };
        let (sum_lb, sum_ub) = self.sums(env);
        if sum_lb > target || sum_ub < target {
            Entailment::False
        } else if sum_lb == target && sum_ub == target {
            Entailment::True
        } else {
            Entailment::Undefined
        }
    }

    fn priority(&self) -> Priority {
        Priority::from_arity(self.vars.len())
    }

    fn events(&self) -> EventMask {
        EventMask::BOUNDS
    }
}

#[cfg(test)]
#[path = "mean_tests.rs"]
mod tests;
