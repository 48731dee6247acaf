//! Error types for CarSeq

use thiserror::Error;

use crate::engine::VarId;

/// A variable's domain became empty.
///
/// Returned by domain removals and propagators. The engine treats it as a
/// search failure and backtracks; it is never fatal to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Domain wipe-out on variable {var}")]
pub struct Contradiction {
    /// The variable whose domain was emptied.
    pub var: VarId,
}

impl Contradiction {
    /// Creates a contradiction raised on `var`.
    pub fn on(var: VarId) -> Self {
        Self { var }
    }
}

/// Recoverable fault inside a value-ordering heuristic.
///
/// These are absorbed by the selector (which falls back to the domain's
/// upper bound) and only surface through diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeuristicError {
    /// No candidate names a class or has a finite total score.
    #[error("No scorable candidate for variable {var}")]
    EmptyCandidatePool { var: VarId },
}

/// Malformed or mismatched static problem data.
///
/// Detected at construction time, before search starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("Problem has no vehicle classes")]
    NoClasses,

    #[error("Problem has no options")]
    NoOptions,

    #[error("Class {class} lists {found} options, expected {expected}")]
    RaggedMatrix {
        class: usize,
        expected: usize,
        found: usize,
    },

    #[error("Matrix entry for class {class}, option {option} is {value}, expected 0 or 1")]
    NonBinaryEntry {
        class: usize,
        option: usize,
        value: u8,
    },

    #[error("Got {found} frequency policies for {expected} options")]
    PolicyCount { expected: usize, found: usize },

    #[error("Option {option} has invalid frequency policy {max}/{window}")]
    InvalidPolicy { option: usize, max: u32, window: u32 },

    #[error("Got {found} demands for {expected} classes")]
    DemandCount { expected: usize, found: usize },

    #[error("Criteria set is empty")]
    EmptyCriteria,

    #[error("Variable group is empty")]
    EmptyGroup,

    #[error("Mean {mean} over {count} variables overflows the target sum")]
    MeanOverflow { mean: i64, count: usize },
}
