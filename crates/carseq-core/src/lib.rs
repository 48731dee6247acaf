//! CarSeq Core - Core types and traits for car-sequencing search
//!
//! This crate provides the fundamental abstractions shared by the search core:
//! - Problem data (class/option matrix, frequency policies, demands)
//! - Engine seam traits for domain introspection and reversible storage
//! - Value-ordering criteria identifiers
//! - Sequence checking against frequency policies and demands
//! - Error types

pub mod checker;
pub mod criterion;
pub mod engine;
pub mod error;
pub mod problem;

#[cfg(test)]
mod checker_tests;

pub use checker::{check_prefix, check_sequence, Violation};
pub use criterion::{CriteriaSet, Criterion};
pub use engine::{DomainValues, IntDomains, IntDomainsMut, Reversible, ReversibleInt, VarId};
pub use error::{Contradiction, HeuristicError, ProblemError};
pub use problem::{CarSequencingProblem, ClassOptionMatrix, FrequencyPolicy};
