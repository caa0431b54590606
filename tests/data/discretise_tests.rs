// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use morphcomp::data::{BinSpec, Domain, bin_count, discretise, normalise};
use morphcomp::error::MorphError;
use ndarray::array;
use rstest::rstest;

use crate::test_helpers::{assert_abs_diff_eq, generate_gaussian_data, generate_random_nd_data};

#[rstest]
#[case(1, 2)]
#[case(3, 5)]
#[case(2, 30)]
fn codes_keep_shape_and_stay_in_range(#[case] dims: usize, #[case] bins: usize) {
    let data = generate_gaussian_data(500, dims, 0.0, 2.0, 7);
    let codes = discretise(&data, &BinSpec::Global(bins), None).unwrap();
    assert_eq!(codes.dim(), data.dim());
    assert!(codes.iter().all(|&c| c < bins));
    // The empirical extremes land in the outer bins.
    for d in 0..dims {
        let col = codes.column(d);
        assert_eq!(*col.iter().min().unwrap(), 0);
        assert_eq!(*col.iter().max().unwrap(), bins - 1);
    }
}

#[test]
fn per_dimension_bins_override_global() {
    let data = generate_random_nd_data(200, 2, 11);
    let codes = discretise(&data, &BinSpec::PerDimension(vec![2, 7]), None).unwrap();
    assert!(codes.column(0).iter().all(|&c| c < 2));
    assert!(codes.column(1).iter().all(|&c| c < 7));
}

#[rstest]
#[case(1, BinSpec::Global(10), 10)]
#[case(3, BinSpec::Global(4), 64)]
#[case(3, BinSpec::PerDimension(vec![2, 3, 5]), 30)]
fn bin_count_is_product_of_dimension_bins(
    #[case] dims: usize,
    #[case] spec: BinSpec,
    #[case] expected: u128,
) {
    assert_eq!(bin_count(dims, &spec).unwrap(), expected);
}

#[test]
fn bin_list_length_must_match_dimensionality() {
    let data = generate_random_nd_data(10, 3, 1);
    assert!(matches!(
        discretise(&data, &BinSpec::PerDimension(vec![2, 2]), None),
        Err(MorphError::InvalidBinSpec(_))
    ));
    assert!(matches!(
        bin_count(1, &BinSpec::Global(0)),
        Err(MorphError::InvalidBinSpec(_))
    ));
}

#[test]
fn supplied_domain_defines_edges() {
    let data = array![[0.0], [2.49], [2.5], [10.0]];
    let domain = Domain::new(vec![0.0], vec![10.0]).unwrap();
    let codes = discretise(&data, &BinSpec::Global(4), Some(&domain)).unwrap();
    assert_eq!(codes, array![[0], [0], [1], [3]]);

    let wrong = Domain::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap();
    assert!(matches!(
        discretise(&data, &BinSpec::Global(4), Some(&wrong)),
        Err(MorphError::InvalidDomain(_))
    ));
}

#[test]
fn normalise_maps_domain_to_unit_interval() {
    let data = array![[2.0, -1.0], [4.0, 1.0], [3.0, 0.0]];
    let scaled = normalise(&data, None).unwrap();
    assert_abs_diff_eq!(scaled[(2, 0)], 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(scaled[(0, 1)], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(scaled[(1, 1)], 1.0, epsilon = 1e-12);

    let domain = Domain::new(vec![0.0, -2.0], vec![4.0, 2.0]).unwrap();
    let scaled = normalise(&data, Some(&domain)).unwrap();
    assert_abs_diff_eq!(scaled[(0, 0)], 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(scaled[(2, 1)], 0.5, epsilon = 1e-12);
}
