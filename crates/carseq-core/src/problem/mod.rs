//! Static car-sequencing problem data.
//!
//! A problem is a set of vehicle classes, each requiring a subset of
//! options, a frequency policy per option, and a demand per class. The data
//! is validated once at construction and is read-only for the life of a
//! solve.


use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ProblemError;

/// "At most `max` of any `window` consecutive slots may carry the option."
///
/// # Examples
///
/// ```
/// use carseq_core::FrequencyPolicy;
///
/// let policy = FrequencyPolicy::new(2, 5);
/// assert_eq!(policy.spacing(), 2.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrequencyPolicy {
    /// Maximum occurrences per window (`p`).
    pub max: u32,
    /// Window length (`q`).
    pub window: u32,
}

impl FrequencyPolicy {
    pub fn new(max: u32, window: u32) -> Self {
        Self { max, window }
    }

    /// Average slots each occurrence occupies, `window / max`.
    pub fn spacing(&self) -> f64 {
        f64::from(self.window) / f64::from(self.max)
    }

    fn is_valid(&self) -> bool {
        self.max >= 1 && self.window >= self.max
    }
}

/// C×O boolean matrix: class `c` requires option `o`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassOptionMatrix {
    classes: usize,
    options: usize,
    cells: Vec<bool>,
}

impl ClassOptionMatrix {
    /// Builds a matrix from one row of flags per class.
    pub fn new(rows: Vec<Vec<bool>>) -> Result<Self, ProblemError> {
        let classes = rows.len();
        if classes == 0 {
            return Err(ProblemError::NoClasses);
        }
        let options = rows[0].len();
        if options == 0 {
            return Err(ProblemError::NoOptions);
        }

        let mut cells = Vec::with_capacity(classes * options);
        for (class, row) in rows.into_iter().enumerate() {
            if row.len() != options {
                return Err(ProblemError::RaggedMatrix {
                    class,
                    expected: options,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            classes,
            options,
            cells,
        })
    }

    /// Builds a matrix from 0/1 rows, the layout of benchmark data files.
    ///
    /// # Examples
    ///
    /// ```
    /// use carseq_core::ClassOptionMatrix;
    ///
    /// let m = ClassOptionMatrix::from_binary(vec![vec![1, 0], vec![0, 1]]).unwrap();
    /// assert!(m.requires(0, 0));
    /// assert!(!m.requires(0, 1));
    /// ```
    pub fn from_binary(rows: Vec<Vec<u8>>) -> Result<Self, ProblemError> {
        let mut flags = Vec::with_capacity(rows.len());
        for (class, row) in rows.into_iter().enumerate() {
            let mut flag_row = Vec::with_capacity(row.len());
            for (option, value) in row.into_iter().enumerate() {
                match value {
                    0 => flag_row.push(false),
                    1 => flag_row.push(true),
                    _ => {
                        return Err(ProblemError::NonBinaryEntry {
                            class,
                            option,
                            value,
                        })
                    }
                }
            }
            flags.push(flag_row);
        }
        Self::new(flags)
    }

    pub fn class_count(&self) -> usize {
        self.classes
    }

    pub fn option_count(&self) -> usize {
        self.options
    }

    /// Whether `class` requires `option`.
    pub fn requires(&self, class: usize, option: usize) -> bool {
        self.cells[class * self.options + option]
    }

    /// The row of flags for `class`.
    pub fn row(&self, class: usize) -> &[bool] {
        let start = class * self.options;
        &self.cells[start..start + self.options]
    }
}

/// Validated car-sequencing instance.
///
/// # Examples
///
/// ```
/// use carseq_core::{CarSequencingProblem, ClassOptionMatrix, FrequencyPolicy};
///
/// let matrix = ClassOptionMatrix::from_binary(vec![
///     vec![1, 0],
///     vec![0, 1],
///     vec![1, 1],
/// ]).unwrap();
/// let problem = CarSequencingProblem::new(
///     matrix,
///     vec![FrequencyPolicy::new(1, 2), FrequencyPolicy::new(2, 3)],
///     vec![2, 2, 1],
/// ).unwrap();
///
/// assert_eq!(problem.sequence_length(), 5);
/// assert_eq!(problem.option_demand(0), 3);
/// assert_eq!(problem.options_of(2), &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct CarSequencingProblem {
    matrix: ClassOptionMatrix,
    policies: Vec<FrequencyPolicy>,
    demands: Vec<u32>,
    option_demand: Vec<u64>,
    class_options: Vec<SmallVec<[usize; 8]>>,
    sequence_length: usize,
}

impl CarSequencingProblem {
    /// Validates the tables and precomputes derived per-option data.
    pub fn new(
        matrix: ClassOptionMatrix,
        policies: Vec<FrequencyPolicy>,
        demands: Vec<u32>,
    ) -> Result<Self, ProblemError> {
        if policies.len() != matrix.option_count() {
            return Err(ProblemError::PolicyCount {
                expected: matrix.option_count(),
                found: policies.len(),
            });
        }
        if let Some((option, policy)) = policies.iter().enumerate().find(|(_, p)| !p.is_valid()) {
            return Err(ProblemError::InvalidPolicy {
                option,
                max: policy.max,
                window: policy.window,
            });
        }
        if demands.len() != matrix.class_count() {
            return Err(ProblemError::DemandCount {
                expected: matrix.class_count(),
                found: demands.len(),
            });
        }

        let option_demand = (0..matrix.option_count())
            .map(|o| {
                (0..matrix.class_count())
                    .filter(|&c| matrix.requires(c, o))
                    .map(|c| u64::from(demands[c]))
                    .sum()
            })
            .collect();

        let class_options = (0..matrix.class_count())
            .map(|c| {
                (0..matrix.option_count())
                    .filter(|&o| matrix.requires(c, o))
                    .collect()
            })
            .collect();

        let sequence_length = demands.iter().map(|&d| d as usize).sum();

        Ok(Self {
            matrix,
            policies,
            demands,
            option_demand,
            class_options,
            sequence_length,
        })
    }

    pub fn matrix(&self) -> &ClassOptionMatrix {
        &self.matrix
    }

    pub fn class_count(&self) -> usize {
        self.matrix.class_count()
    }

    pub fn option_count(&self) -> usize {
        self.matrix.option_count()
    }

    pub fn policy(&self, option: usize) -> FrequencyPolicy {
        self.policies[option]
    }

    pub fn policies(&self) -> &[FrequencyPolicy] {
        &self.policies
    }

    /// Required count of `class` over the whole sequence.
    pub fn demand(&self, class: usize) -> u32 {
        self.demands[class]
    }

    pub fn demands(&self) -> &[u32] {
        &self.demands
    }

    /// Total slots, the sum of all class demands.
    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Total occurrences of `option` the finished sequence will carry.
    pub fn option_demand(&self, option: usize) -> u64 {
        self.option_demand[option]
    }

    /// Options required by `class`, in increasing order.
    pub fn options_of(&self, class: usize) -> &[usize] {
        &self.class_options[class]
    }

    /// Whether `value` names one of this problem's classes.
    pub fn class_of(&self, value: i64) -> Option<usize> {
        usize::try_from(value)
            .ok()
            .filter(|&c| c < self.class_count())
    }
}
