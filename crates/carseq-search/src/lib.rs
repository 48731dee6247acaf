//! Search guidance for car sequencing.
//!
//! Plugs into a backtracking constraint engine through the seam traits of
//! `carseq-core`:
//!
//! - [`heuristic`] - prefix and capacity projections, the weighted value
//!   selector, the sequential variable selector and their composition
//! - [`propagation`] - bounds propagation for a group constrained to a mean
//!
//! Nothing here owns variables or the trail. Per-decision data is rebuilt
//! on every call; only the selector cursor and propagator state live in
//! the engine's reversible storage.

pub mod heuristic;
pub mod propagation;

pub use heuristic::{
    normalize, AssignedPrefix, CapacityProjector, CriterionScores, Decision, HeuristicSearch,
    HeuristicStats, SequenceStateProjector, SequentialVariableSelector, ValueSelector,
    VariableSelector, WeightedValueSelector,
};
pub use propagation::{
    Entailment, EventMask, MeanBoundsPropagator, MeanTarget, Priority, Propagator,
    PropagatorState,
};
