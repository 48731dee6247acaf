//! CarSeq - search guidance for constraint-based car sequencing
//!
//! Branching heuristics and a mean propagator that plug into a
//! backtracking constraint engine through the traits in [`engine`].
//!
//! # Example
//!
//! ```rust
//! use carseq::prelude::*;
//!
//! let matrix = ClassOptionMatrix::from_binary(vec![vec![1], vec![0]]).unwrap();
//! let problem = CarSequencingProblem::new(
//!     matrix,
//!     vec![FrequencyPolicy::new(1, 2)],
//!     vec![2, 2],
//! ).unwrap();
//!
//! assert_eq!(problem.sequence_length(), 4);
//! assert!(check_sequence(&problem, &[0, 1, 0, 1]).is_ok());
//! ```

#[cfg(feature = "console")]
pub mod console;

mod setup;

pub use carseq_core::{
    check_prefix, check_sequence, engine, CarSequencingProblem, ClassOptionMatrix, Contradiction,
    CriteriaSet, Criterion, FrequencyPolicy, HeuristicError, ProblemError, Violation,
};

pub use carseq_config::{ConfigError, MeanTargetConfig, SearchConfig};

pub use carseq_search::{
    Decision, Entailment, EventMask, HeuristicSearch, HeuristicStats, MeanBoundsPropagator,
    MeanTarget, Priority, Propagator, SequentialVariableSelector, ValueSelector,
    VariableSelector, WeightedValueSelector,
};

pub use setup::{build_search, DefaultSearch, SearchComponents};

/// Lower-level building blocks.
pub mod heuristic {
    pub use carseq_search::heuristic::*;
}

pub mod prelude {
    pub use super::engine::{IntDomains, IntDomainsMut, Reversible, VarId};
    pub use super::{build_search, check_prefix, check_sequence, SearchComponents, SearchConfig};
    pub use super::{CarSequencingProblem, ClassOptionMatrix, CriteriaSet, Criterion, FrequencyPolicy};
    pub use super::{Decision, HeuristicSearch, MeanBoundsPropagator, MeanTarget, Propagator};
}
