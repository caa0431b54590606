// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use morphcomp::error::MorphError;
use morphcomp::estimators::approaches::common_nd::dataset::NdDataset;
use morphcomp::estimators::approaches::knn::{
    FrenzelPompeCmi, KnnEstimator, KsgFlavor, KsgMutualInformation,
};
use morphcomp::estimators::{ContinuousEstimator, GlobalValue, LocalValues};
use ndarray::{Array2, array};
use rstest::rstest;

use crate::test_helpers::{assert_abs_diff_eq, generate_gaussian_data};

/// x and y with correlation `rho` built from standard normal columns.
fn correlated_pair(n: usize, rho: f64, seed: u64) -> (Array2<f64>, Array2<f64>) {
    let g = generate_gaussian_data(n, 2, 0.0, 1.0, seed);
    let x = g.column(0).to_owned().insert_axis(ndarray::Axis(1));
    let y = (&g.column(0) * rho + &g.column(1) * (1.0 - rho * rho).sqrt())
        .insert_axis(ndarray::Axis(1));
    (x, y)
}

#[rstest]
#[case(KsgFlavor::One)]
#[case(KsgFlavor::Two)]
fn ksg_recovers_gaussian_mutual_information(#[case] flavor: KsgFlavor) {
    let rho: f64 = 0.8;
    let expected = -0.5 * (1.0 - rho * rho).ln();
    let (x, y) = correlated_pair(500, rho, 42);
    let mi = KsgMutualInformation::new(x.view(), y.view(), 4, flavor).unwrap();
    assert_abs_diff_eq!(mi.global_value(), expected, epsilon = 0.08);
}

#[rstest]
#[case(KsgFlavor::One)]
#[case(KsgFlavor::Two)]
fn ksg_independent_is_near_zero(#[case] flavor: KsgFlavor) {
    let (x, y) = correlated_pair(500, 0.0, 7);
    let mi = KsgMutualInformation::new(x.view(), y.view(), 4, flavor).unwrap();
    assert_abs_diff_eq!(mi.global_value(), 0.0, epsilon = 0.08);
    assert_eq!(mi.local_values().len(), 500);
}

#[test]
fn frenzel_pompe_vanishes_for_common_cause() {
    let g = generate_gaussian_data(500, 3, 0.0, 1.0, 9);
    let z = g.column(0).to_owned().insert_axis(ndarray::Axis(1));
    let x = (&g.column(1) * 0.5 + &g.column(0)).insert_axis(ndarray::Axis(1));
    let y = (&g.column(2) * 0.5 + &g.column(0)).insert_axis(ndarray::Axis(1));

    let cmi = FrenzelPompeCmi::new(x.view(), y.view(), z.view(), 5).unwrap();
    assert_abs_diff_eq!(cmi.global_value(), 0.0, epsilon = 0.1);
    // Without conditioning, the shared cause is visible.
    let mi = KsgMutualInformation::new(x.view(), y.view(), 5, KsgFlavor::One).unwrap();
    assert!(mi.global_value() > 0.3);
}

#[test]
fn frenzel_pompe_local_values_on_grid() {
    // All joint distances are 1; only the first and last share z.
    let x = array![[1.0, 0.0], [0.0, 0.0], [1.0, 1.0]];
    let y = array![[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    let z = array![[0.0], [1.0], [0.0]];
    let local = FrenzelPompeCmi::new(x.view(), y.view(), z.view(), 1).unwrap().local_values();
    assert_abs_diff_eq!(local[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(local[1], 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(local[2], 1.0, epsilon = 1e-9);
}

#[test]
fn knn_estimator_validates_neighbour_count() {
    let x = array![[0.0], [1.0], [2.0]];
    let estimator = KnnEstimator::new(0);
    assert_eq!(
        estimator.local_mutual_information(x.view(), x.view()).unwrap_err(),
        MorphError::InvalidNeighbourCount { k: 0, samples: 3 }
    );
    let estimator = KnnEstimator::new(3);
    assert_eq!(
        estimator
            .local_conditional_mutual_information(x.view(), x.view(), x.view())
            .unwrap_err(),
        MorphError::InvalidNeighbourCount { k: 3, samples: 3 }
    );
}

#[test]
fn joined_dataset_uses_max_norm_over_all_parts() {
    let a = NdDataset::from_array2(array![[0.0], [3.0]]);
    let b = NdDataset::from_array2(array![[0.0, 0.0], [1.0, 5.0]]);
    let joint = NdDataset::join(&[&a, &b]);
    assert_eq!(joint.dims, 3);
    assert_eq!(joint.distance(0, 1), 5.0);
    assert_eq!(joint.kth_neighbor_radii(1), vec![5.0, 5.0]);
}

#[rstest]
#[case(1, 1)]
#[case(2, 3)]
#[case(3, 4)]
#[case(4, 2)]
fn kd_tree_matches_brute_force_neighbours(#[case] dims: usize, #[case] k: usize) {
    let data = generate_gaussian_data(300, dims, 0.0, 1.0, 11 + dims as u64);
    let indexed = NdDataset::from_array2(data.clone());
    let brute = NdDataset::brute_force(data.view());
    assert!(indexed.is_indexed());
    assert!(!brute.is_indexed());

    let radii = indexed.kth_neighbor_radii(k);
    assert_eq!(radii, brute.kth_neighbor_radii(k));
    for i in (0..300).step_by(7) {
        assert_eq!(indexed.k_nearest(i, k), brute.k_nearest(i, k));
        assert_eq!(indexed.count_within(i, radii[i]), brute.count_within(i, radii[i]));
        assert_eq!(
            indexed.count_within_closed(i, radii[i]),
            brute.count_within_closed(i, radii[i])
        );
    }
}

#[test]
fn kd_tree_counts_duplicate_samples() {
    // Rounded values put many samples at distance zero from each other.
    let data = generate_gaussian_data(200, 2, 0.0, 1.0, 5).mapv(|v| (v * 2.0).round());
    let indexed = NdDataset::from_array2(data.clone());
    let brute = NdDataset::brute_force(data.view());
    assert_eq!(indexed.kth_neighbor_radii(3), brute.kth_neighbor_radii(3));
    for i in 0..200 {
        assert_eq!(indexed.count_within_closed(i, 0.0), brute.count_within_closed(i, 0.0));
        assert_eq!(indexed.count_within(i, 1.0), brute.count_within(i, 1.0));
    }
}
