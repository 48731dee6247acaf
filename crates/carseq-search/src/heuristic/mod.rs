//! Branching heuristics.
//!
//! The value selector looks at the prefix of the sequence fixed so far,
//! projects how many slots each option can still use, and ranks candidate
//! classes on several criteria. The variable selector walks the sequence
//! left to right.

mod capacity;
mod scoring;
mod sequence_state;
mod strategy;
mod value_selector;
mod variable_selector;

pub use capacity::CapacityProjector;
pub use scoring::{normalize, static_score, CriterionScores};
pub use sequence_state::{AssignedPrefix, SequenceStateProjector};
pub use strategy::{Decision, HeuristicSearch};
pub use value_selector::{HeuristicStats, ValueSelector, WeightedValueSelector};
pub use variable_selector::{SequentialVariableSelector, VariableSelector};
