// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use morphcomp::error::MorphError;
use morphcomp::estimators::approaches::discrete::{JointDistribution, Representation, estimate};
use morphcomp::measures::IterativeScaling;
use rstest::rstest;

use crate::test_helpers::{assert_abs_diff_eq, random_codes};

fn pairwise() -> Vec<Vec<usize>> {
    vec![vec![0, 1], vec![0, 2], vec![1, 2]]
}

#[test]
fn zero_iterations_leave_uniform_model() {
    let shape = [3, 2, 4];
    let codes = random_codes(100, &shape, 4);
    let target = estimate(&codes, &shape, Representation::Dense, 1024).unwrap();
    let mut ipf = IterativeScaling::new(&target, pairwise(), 1024).unwrap();
    let kl = ipf.run(0, false);
    assert_eq!(ipf.iterations(), 0);
    assert!(ipf.estimate().values().iter().all(|&q| (q - 1.0 / 24.0).abs() < 1e-15));
    assert!(kl.is_finite());
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn divergence_never_increases(#[case] seed: u64) {
    // Enough samples that no pairwise marginal is empty.
    let shape = [3, 3, 2];
    let codes = random_codes(2000, &shape, seed);
    let target = estimate(&codes, &shape, Representation::Sparse, 1024).unwrap();
    let mut ipf = IterativeScaling::new(&target, pairwise(), 1024).unwrap();
    let mut previous = ipf.divergence();
    for _ in 0..60 {
        ipf.iterate();
        let current = ipf.divergence();
        assert!(current <= previous + 1e-12, "{current} > {previous}");
        previous = current;
    }
    assert!(previous >= -1e-12);
}

#[test]
fn each_update_matches_its_feature_marginal() {
    let shape = [2, 3, 2];
    let codes = random_codes(400, &shape, 8);
    let target = estimate(&codes, &shape, Representation::Dense, 1024).unwrap();
    let mut ipf = IterativeScaling::new(&target, pairwise(), 1024).unwrap();
    for feature in pairwise().iter().cycle().take(6) {
        ipf.iterate();
        let fitted = ipf.estimate().marginalize(feature);
        let wanted = target.marginalize(feature);
        for (code, p) in wanted.entries() {
            assert_abs_diff_eq!(fitted.get(&code), p, epsilon = 1e-12);
        }
    }
}

#[test]
fn independence_fit_of_correlated_bits() {
    let shape = [2, 2];
    let samples = ndarray::array![[0usize, 0], [1, 1]];
    let target = estimate(&samples, &shape, Representation::Dense, 16).unwrap();
    let mut ipf = IterativeScaling::new(&target, vec![vec![0], vec![1]], 16).unwrap();
    assert_abs_diff_eq!(ipf.run(4, true), 1.0, epsilon = 1e-12);
}

#[test]
fn dense_working_storage_is_bounded() {
    let shape = [64, 64, 64];
    let codes = random_codes(50, &shape, 1);
    let target = estimate(&codes, &shape, Representation::Sparse, 1 << 10).unwrap();
    assert!(matches!(
        IterativeScaling::new(&target, pairwise(), 1 << 10),
        Err(MorphError::IntractableBinCount { cells: 262_144, limit: 1024 })
    ));
}
