//! Sequence checking.
//!
//! Verifies a fixed sequence of class ids against the problem's frequency
//! policies and class demands. Every window of `window` consecutive slots
//! may carry at most `max` occurrences of each option; windows clipped by
//! the end of a prefix are checked too, since they are subsets of full
//! windows.

use thiserror::Error;

use crate::problem::CarSequencingProblem;

/// The first rule a sequence breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Slot {position} holds unknown class {class}")]
    UnknownClass { position: usize, class: usize },

    #[error("Option {option} occurs {count} times in the window starting at {start}, at most {max} allowed")]
    WindowOverload {
        option: usize,
        start: usize,
        count: u32,
        max: u32,
    },

    #[error("Class {class} placed {found} times, demand is {demand}")]
    DemandExceeded { class: usize, demand: u32, found: u32 },

    #[error("Sequence has {found} slots, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Checks a partial sequence: no window overload and no class placed more
/// often than its demand.
///
/// # Examples
///
/// ```
/// use carseq_core::{check_prefix, CarSequencingProblem, ClassOptionMatrix, FrequencyPolicy};
///
/// let matrix = ClassOptionMatrix::from_binary(vec![vec![1], vec![0]]).unwrap();
/// let problem = CarSequencingProblem::new(matrix, vec![FrequencyPolicy::new(1, 2)], vec![2, 2]).unwrap();
///
/// assert!(check_prefix(&problem, &[0, 1, 0]).is_ok());
/// assert!(check_prefix(&problem, &[0, 0]).is_err());
/// ```
pub fn check_prefix(problem: &CarSequencingProblem, prefix: &[usize]) -> Result<(), Violation> {
    let placed = count_classes(problem, prefix)?;
    for (class, &found) in placed.iter().enumerate() {
        let demand = problem.demand(class);
        if found > demand {
            return Err(Violation::DemandExceeded {
                class,
                demand,
                found,
            });
        }
    }
    check_windows(problem, prefix)
}

/// Checks a complete sequence: correct length, every window within its
/// policy, and every class placed exactly its demand.
///
/// With the length equal to the total demand, no class can fall short
/// unless another one exceeds its demand, so the prefix check covers it.
pub fn check_sequence(problem: &CarSequencingProblem, sequence: &[usize]) -> Result<(), Violation> {
    if sequence.len() != problem.sequence_length() {
        return Err(Violation::LengthMismatch {
            expected: problem.sequence_length(),
            found: sequence.len(),
        });
    }
    check_prefix(problem, sequence)
}

fn count_classes(problem: &CarSequencingProblem, sequence: &[usize]) -> Result<Vec<u32>, Violation> {
    let mut placed = vec![0u32; problem.class_count()];
    for (position, &class) in sequence.iter().enumerate() {
        match placed.get_mut(class) {
            Some(count) => *count += 1,
            None => return Err(Violation::UnknownClass { position, class }),
        }
    }
    Ok(placed)
}

fn check_windows(problem: &CarSequencingProblem, sequence: &[usize]) -> Result<(), Violation> {
    let matrix = problem.matrix();
    for option in 0..problem.option_count() {
        let policy = problem.policy(option);
        let window = policy.window as usize;
        let mut count = 0u32;

        for end in 0..sequence.len() {
            if matrix.requires(sequence[end], option) {
                count += 1;
            }
            if end >= window && matrix.requires(sequence[end - window], option) {
                count -= 1;
            }
            if count > policy.max {
                return Err(Violation::WindowOverload {
                    option,
                    start: (end + 1).saturating_sub(window),
                    count,
                    max: policy.max,
                });
            }
        }
    }
    Ok(())
}
