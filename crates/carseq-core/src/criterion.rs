//! Value-ordering criteria.
//!
//! A criterion turns a candidate vehicle class into a raw score given the
//! current state of the sequence. The scoring itself lives in the search
//! crate; this module only names the criteria and the preset sets.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ProblemError;

/// One scoring criterion of the weighted value selector.
///
/// Every criterion sums a per-option term over the options the candidate
/// class requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Criterion {
    /// Number of options the class requires.
    Weight,
    /// Sum of `window / max` over required options.
    Capacity,
    /// Remaining demand of each required option.
    ResidualDemand,
    /// Remaining demand scaled by `window / max`.
    Load,
    /// Total residual capacity minus the option's own, plus its load.
    Slack,
    /// Load divided by residual capacity; zero when no capacity is left.
    Utilization,
}

impl Criterion {
    /// All criteria, in the order the full preset evaluates them.
    pub const ALL: [Criterion; 6] = [
        Criterion::Weight,
        Criterion::Capacity,
        Criterion::ResidualDemand,
        Criterion::Load,
        Criterion::Slack,
        Criterion::Utilization,
    ];

    /// Short snake_case name, as used in configuration and logs.
    pub fn name(self) -> &'static str {
        match self {
            Criterion::Weight => "weight",
            Criterion::Capacity => "capacity",
            Criterion::ResidualDemand => "residual_demand",
            Criterion::Load => "load",
            Criterion::Slack => "slack",
            Criterion::Utilization => "utilization",
        }
    }

    /// Whether the criterion depends on the assigned prefix.
    ///
    /// Value selectors score static criteria once per class and reuse them.
    pub fn is_dynamic(self) -> bool {
        !matches!(self, Criterion::Weight | Criterion::Capacity)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of criteria a selector aggregates.
///
/// # Examples
///
/// ```
/// use carseq_core::{CriteriaSet, Criterion};
///
/// assert_eq!(CriteriaSet::Full.criteria().len(), 6);
/// assert_eq!(
///     CriteriaSet::Reduced.criteria(),
///     vec![Criterion::Slack, Criterion::Utilization]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum CriteriaSet {
    /// All six criteria.
    #[default]
    Full,

    /// Slack and utilization only.
    Reduced,

    /// Rank by one criterion.
    Single { criterion: Criterion },

    /// An explicit list; duplicates count once.
    Custom { criteria: Vec<Criterion> },
}

impl CriteriaSet {
    /// Returns the criteria of this set, deduplicated, in evaluation order.
    pub fn criteria(&self) -> Vec<Criterion> {
        match self {
            CriteriaSet::Full => Criterion::ALL.to_vec(),
            CriteriaSet::Reduced => vec![Criterion::Slack, Criterion::Utilization],
            CriteriaSet::Single { criterion } => vec![*criterion],
            CriteriaSet::Custom { criteria } => {
                let mut unique = Vec::with_capacity(criteria.len());
                for c in criteria {
                    if !unique.contains(c) {
                        unique.push(*c);
                    }
                }
                unique
            }
        }
    }

    /// Checks that the set names at least one criterion.
    pub fn validate(&self) -> Result<(), ProblemError> {
        match self {
            CriteriaSet::Custom { criteria } if criteria.is_empty() => {
                Err(ProblemError::EmptyCriteria)
            }
            _ => Ok(()),
        }
    }
}
