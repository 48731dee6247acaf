//! Small car-sequencing instances.

use carseq_core::{CarSequencingProblem, ClassOptionMatrix, FrequencyPolicy};

fn build(rows: Vec<Vec<u8>>, policies: &[(u32, u32)], demands: Vec<u32>) -> CarSequencingProblem {
    let matrix = ClassOptionMatrix::from_binary(rows).expect("fixture matrix is well formed");
    let policies = policies
        .iter()
        .map(|&(max, window)| FrequencyPolicy::new(max, window))
        .collect();
    CarSequencingProblem::new(matrix, policies, demands).expect("fixture problem is well formed")
}

/// Two classes, one option at most 1 in 2, two cars of each class.
///
/// Class 0 never appears twice in a row, e.g. `[0, 1, 0, 1]`.
pub fn alternating() -> CarSequencingProblem {
    build(vec![vec![1], vec![0]], &[(1, 2)], vec![2, 2])
}

/// The ten-car, six-class, five-option instance used throughout the
/// car-sequencing literature.
///
/// Options are limited to 1/2, 2/3, 1/3, 2/5 and 1/5. One solution is
/// `[0, 1, 5, 2, 4, 3, 3, 4, 2, 5]`.
pub fn textbook() -> CarSequencingProblem {
    build(
        vec![
            vec![1, 0, 1, 1, 0],
            vec![0, 0, 0, 1, 0],
            vec![0, 1, 0, 0, 1],
            vec![0, 1, 0, 1, 0],
            vec![1, 0, 1, 0, 0],
            vec![1, 1, 0, 0, 0],
        ],
        &[(1, 2), (2, 3), (1, 3), (2, 5), (1, 5)],
        vec![1, 1, 2, 2, 2, 2],
    )
}

/// Two classes with no way to respect the 1/3 option: three of the four
/// cars need it.
pub fn infeasible() -> CarSequencingProblem {
    build(vec![vec![1], vec![0]], &[(1, 3)], vec![3, 1])
}

/// Four classes over two options, one of them a 2/4 rule.
pub fn mixed() -> CarSequencingProblem {
    build(
        vec![vec![1, 0], vec![0, 1], vec![1, 1], vec![0, 0]],
        &[(1, 3), (2, 4)],
        vec![2, 2, 1, 4],
    )
}
