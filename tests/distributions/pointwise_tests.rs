// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use morphcomp::estimators::approaches::discrete::discrete_utils::encode_rows;
use morphcomp::estimators::approaches::discrete::{
    DiscreteConditionalMutualInformation, DiscreteEntropy, DiscreteMutualInformation,
    PluginEstimator, Representation, estimate,
};
use morphcomp::estimators::{EntropyEstimator, GlobalValue, LocalValues};
use ndarray::{Array1, Axis};
use rstest::rstest;

use crate::test_helpers::{assert_abs_diff_eq, random_codes};

fn column(codes: &ndarray::Array2<usize>, j: usize, states: usize) -> Array1<u64> {
    encode_rows(&codes.select(Axis(1), &[j]), &[states]).unwrap()
}

#[rstest]
#[case(200, [2, 2, 2], 1)]
#[case(500, [4, 3, 2], 2)]
#[case(64, [5, 5, 5], 3)]
fn local_values_average_to_plugin(#[case] n: usize, #[case] shape: [usize; 3], #[case] seed: u64) {
    let codes = random_codes(n, &shape, seed);
    let (x, y, z) = (
        column(&codes, 0, shape[0]),
        column(&codes, 1, shape[1]),
        column(&codes, 2, shape[2]),
    );

    let dist = estimate(&codes, &shape, Representation::Sparse, 1 << 20).unwrap();
    let plugin = PluginEstimator::new();

    let mi = DiscreteMutualInformation::new(&[x.clone(), y.clone()], DiscreteEntropy::new);
    assert_abs_diff_eq!(mi.global_from_local(), mi.global_value(), epsilon = 1e-10);
    assert_abs_diff_eq!(
        mi.global_value(),
        plugin.mutual_information(&dist, &[0], &[1]),
        epsilon = 1e-10
    );

    let cmi = DiscreteConditionalMutualInformation::new(&[x, y], &z, DiscreteEntropy::new);
    assert_abs_diff_eq!(cmi.global_from_local(), cmi.global_value(), epsilon = 1e-10);
    assert_abs_diff_eq!(
        cmi.global_value(),
        plugin.conditional_mutual_information(&dist, &[0], &[1], &[2]),
        epsilon = 1e-10
    );
}

#[test]
fn local_cmi_is_log_count_ratio() {
    let x = Array1::from(vec![0u64, 1, 0, 1, 1]);
    let y = Array1::from(vec![0u64, 1, 1, 1, 0]);
    let z = Array1::from(vec![0u64, 0, 0, 1, 1]);
    let local =
        DiscreteConditionalMutualInformation::new(&[x, y], &z, DiscreteEntropy::new).local_values();
    // sample 1: c(xyz)=1, c(z)=3, c(xz)=1, c(yz)=2
    assert_abs_diff_eq!(local[1], (3.0_f64 / 2.0).log2(), epsilon = 1e-12);
}

#[test]
fn entropy_base_is_configurable() {
    let data = Array1::from(vec![0u64, 1, 2, 3]);
    assert_abs_diff_eq!(DiscreteEntropy::new(data.clone()).global_value(), 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        DiscreteEntropy::new(data).with_base(4.0).global_value(),
        1.0,
        epsilon = 1e-12
    );
}
