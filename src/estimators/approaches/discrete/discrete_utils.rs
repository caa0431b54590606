// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::collections::HashMap;

use crate::error::{MorphError, Result};

/// Size of the joint space spanned by the given radices.
pub fn cardinality(radices: &[usize]) -> u128 {
    radices
        .iter()
        .fold(1u128, |acc, &r| acc.saturating_mul(r as u128))
}

/// Size of the joint space, failing when joint indices would not fit in `u64`.
pub fn checked_cardinality(radices: &[usize]) -> Result<u64> {
    let cells = cardinality(radices);
    u64::try_from(cells).map_err(|_| MorphError::IntractableBinCount {
        cells,
        limit: u64::MAX,
    })
}

/// Mixed-radix index of a code tuple; the first axis is most significant.
pub fn encode(code: &[usize], radices: &[usize]) -> Result<u64> {
    assert_eq!(code.len(), radices.len(), "code and radices must have equal length");
    encode_view(ArrayView1::from(code), radices)
}

/// Inverse of [`encode`].
pub fn decode(mut index: u64, radices: &[usize]) -> Vec<usize> {
    let mut code = vec![0usize; radices.len()];
    for (slot, &r) in code.iter_mut().zip(radices.iter()).rev() {
        let r = r as u64;
        *slot = (index % r) as usize;
        index /= r;
    }
    code
}

fn encode_view(row: ArrayView1<'_, usize>, radices: &[usize]) -> Result<u64> {
    let mut index = 0u64;
    for (axis, (&c, &r)) in row.iter().zip(radices.iter()).enumerate() {
        if c >= r {
            return Err(MorphError::CodeOutOfRange { axis, code: c, size: r });
        }
        index = index * r as u64 + c as u64;
    }
    Ok(index)
}

/// Relabel every coded row (samples x dimensions) as one joint index.
pub fn encode_rows(codes: &Array2<usize>, radices: &[usize]) -> Result<Array1<u64>> {
    assert_eq!(codes.ncols(), radices.len(), "one radix per column is required");
    checked_cardinality(radices)?;
    codes
        .axis_iter(Axis(0))
        .map(|row| encode_view(row, radices))
        .collect()
}

/// Count the occurrences of each joint index.
pub fn count_frequencies(keys: &Array1<u64>) -> HashMap<u64, usize> {
    let mut frequency_map = HashMap::new();
    for &key in keys.iter() {
        *frequency_map.entry(key).or_insert(0) += 1;
    }
    frequency_map
}

/// Reduce several aligned code arrays into one compact joint code array.
///
/// Each distinct tuple of codes gets an id in order of first occurrence, so
/// the result does not depend on the size of the joint space.
pub fn reduce_joint_space_compact(code_arrays: &[Array1<u64>]) -> Array1<u64> {
    if code_arrays.is_empty() {
        return Array1::zeros(0);
    }
    let len = code_arrays[0].len();
    for arr in code_arrays.iter() {
        assert_eq!(
            arr.len(),
            len,
            "All code arrays must have the same length for joint reduction"
        );
    }
    let mut map: HashMap<Vec<u64>, u64> = HashMap::new();
    let mut out: Vec<u64> = Vec::with_capacity(len);
    for i in 0..len {
        let key: Vec<u64> = code_arrays.iter().map(|arr| arr[i]).collect();
        let next_id = map.len() as u64;
        out.push(*map.entry(key).or_insert(next_id));
    }
    Array1::from(out)
}
