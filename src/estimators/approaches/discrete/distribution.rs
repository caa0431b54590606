// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Empirical joint distributions over binned samples.
//!
//! Two storage strategies share the [`JointDistribution`] interface:
//! [`DenseDistribution`] keeps one cell per point of the bin cross-product,
//! [`SparseDistribution`] keeps only observed joint states. Dense storage is
//! fast but `O(prod bins)` in memory; the cell count is checked against a
//! limit before anything is allocated. Sparse storage grows with the number
//! of distinct observations.
//!
//! Joint states are addressed by their mixed-radix index over `shape`
//! (first axis most significant), see [`encode`].

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{MorphError, Result};
use crate::estimators::approaches::discrete::discrete_utils::{
    cardinality, checked_cardinality, decode, encode, encode_rows,
};

/// Storage strategy for joint distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    #[default]
    Dense,
    Sparse,
}

/// Probability mass over a finite grid of joint states.
pub trait JointDistribution {
    /// Number of states per axis.
    fn shape(&self) -> &[usize];

    /// Mass at a joint index; indices outside the space carry no mass.
    fn get_joint(&self, joint: u64) -> f64;

    /// Visit every state with nonzero mass as `(joint index, mass)`.
    fn for_each_nonzero(&self, f: &mut dyn FnMut(u64, f64));

    /// Scale the masses so they sum to one. A distribution without mass is left unchanged.
    fn normalize(&mut self);

    /// Marginal over the kept axes, in the order given.
    fn marginalize(&self, keep: &[usize]) -> Self
    where
        Self: Sized;

    /// Mass of the state with one code per axis.
    fn get(&self, index: &[usize]) -> f64 {
        if index.len() != self.shape().len() {
            return 0.0;
        }
        encode(index, self.shape()).map_or(0.0, |joint| self.get_joint(joint))
    }

    fn total_mass(&self) -> f64 {
        let mut total = 0.0;
        self.for_each_nonzero(&mut |_, p| total += p);
        total
    }

    /// Number of states with nonzero mass.
    fn support_size(&self) -> usize {
        let mut count = 0;
        self.for_each_nonzero(&mut |_, _| count += 1);
        count
    }

    /// Nonzero states decoded into per-axis codes.
    fn entries(&self) -> Vec<(Vec<usize>, f64)> {
        let shape = self.shape().to_vec();
        let mut out = Vec::new();
        self.for_each_nonzero(&mut |joint, p| out.push((decode(joint, &shape), p)));
        out
    }
}

/// Project a joint index onto a subset of axes.
fn project(joint: u64, shape: &[usize], keep: &[usize], kept_shape: &[usize]) -> u64 {
    let code = decode(joint, shape);
    let mut index = 0u64;
    for (&axis, &r) in keep.iter().zip(kept_shape.iter()) {
        index = index * r as u64 + code[axis] as u64;
    }
    index
}

fn kept_shape(shape: &[usize], keep: &[usize]) -> Vec<usize> {
    keep.iter()
        .map(|&axis| {
            assert!(axis < shape.len(), "axis {axis} outside a {}-axis distribution", shape.len());
            shape[axis]
        })
        .collect()
}

fn check_dense_limit(shape: &[usize], max_cells: u64) -> Result<usize> {
    let cells = cardinality(shape);
    if cells > max_cells as u128 {
        return Err(MorphError::IntractableBinCount {
            cells,
            limit: max_cells,
        });
    }
    usize::try_from(cells).map_err(|_| MorphError::IntractableBinCount {
        cells,
        limit: max_cells,
    })
}

/// Flat array with one cell per joint state.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseDistribution {
    shape: Vec<usize>,
    values: Vec<f64>,
}

impl DenseDistribution {
    /// All-zero distribution; fails before allocating when the grid exceeds `max_cells`.
    pub fn zeros(shape: &[usize], max_cells: u64) -> Result<Self> {
        let cells = check_dense_limit(shape, max_cells)?;
        Ok(Self {
            shape: shape.to_vec(),
            values: vec![0.0; cells],
        })
    }

    /// Equal mass on every state.
    pub fn uniform(shape: &[usize], max_cells: u64) -> Result<Self> {
        let mut dist = Self::zeros(shape, max_cells)?;
        let p = 1.0 / dist.values.len() as f64;
        dist.values.fill(p);
        Ok(dist)
    }

    /// Dense copy of any distribution over the same grid.
    pub fn from_distribution<D: JointDistribution>(source: &D, max_cells: u64) -> Result<Self> {
        let mut dist = Self::zeros(source.shape(), max_cells)?;
        source.for_each_nonzero(&mut |joint, p| dist.values[joint as usize] = p);
        Ok(dist)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

impl JointDistribution for DenseDistribution {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn get_joint(&self, joint: u64) -> f64 {
        self.values.get(joint as usize).copied().unwrap_or(0.0)
    }

    fn for_each_nonzero(&self, f: &mut dyn FnMut(u64, f64)) {
        for (joint, &p) in self.values.iter().enumerate() {
            if p != 0.0 {
                f(joint as u64, p);
            }
        }
    }

    fn normalize(&mut self) {
        let total: f64 = self.values.iter().sum();
        if total > 0.0 {
            self.values.iter_mut().for_each(|p| *p /= total);
        }
    }

    fn marginalize(&self, keep: &[usize]) -> Self {
        let shape = kept_shape(&self.shape, keep);
        let mut values = vec![0.0; cardinality(&shape) as usize];
        self.for_each_nonzero(&mut |joint, p| {
            values[project(joint, &self.shape, keep, &shape) as usize] += p;
        });
        Self { shape, values }
    }
}

/// Hash map holding only observed joint states.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseDistribution {
    shape: Vec<usize>,
    values: HashMap<u64, f64>,
}

impl SparseDistribution {
    pub fn empty(shape: &[usize]) -> Result<Self> {
        checked_cardinality(shape)?;
        Ok(Self {
            shape: shape.to_vec(),
            values: HashMap::new(),
        })
    }

    /// Add mass to a joint state.
    pub fn add(&mut self, joint: u64, mass: f64) {
        *self.values.entry(joint).or_insert(0.0) += mass;
    }
}

impl JointDistribution for SparseDistribution {
    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn get_joint(&self, joint: u64) -> f64 {
        self.values.get(&joint).copied().unwrap_or(0.0)
    }

    fn for_each_nonzero(&self, f: &mut dyn FnMut(u64, f64)) {
        for (&joint, &p) in self.values.iter() {
            if p != 0.0 {
                f(joint, p);
            }
        }
    }

    fn normalize(&mut self) {
        let total: f64 = self.values.values().sum();
        if total > 0.0 {
            self.values.values_mut().for_each(|p| *p /= total);
        }
    }

    fn marginalize(&self, keep: &[usize]) -> Self {
        let shape = kept_shape(&self.shape, keep);
        let mut values = HashMap::new();
        for (&joint, &p) in self.values.iter() {
            *values
                .entry(project(joint, &self.shape, keep, &shape))
                .or_insert(0.0) += p;
        }
        Self { shape, values }
    }
}

/// A joint distribution in either representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    Dense(DenseDistribution),
    Sparse(SparseDistribution),
}

impl Distribution {
    pub fn representation(&self) -> Representation {
        match self {
            Distribution::Dense(_) => Representation::Dense,
            Distribution::Sparse(_) => Representation::Sparse,
        }
    }
}

impl JointDistribution for Distribution {
    fn shape(&self) -> &[usize] {
        match self {
            Distribution::Dense(d) => d.shape(),
            Distribution::Sparse(d) => d.shape(),
        }
    }

    fn get_joint(&self, joint: u64) -> f64 {
        match self {
            Distribution::Dense(d) => d.get_joint(joint),
            Distribution::Sparse(d) => d.get_joint(joint),
        }
    }

    fn for_each_nonzero(&self, f: &mut dyn FnMut(u64, f64)) {
        match self {
            Distribution::Dense(d) => d.for_each_nonzero(f),
            Distribution::Sparse(d) => d.for_each_nonzero(f),
        }
    }

    fn normalize(&mut self) {
        match self {
            Distribution::Dense(d) => d.normalize(),
            Distribution::Sparse(d) => d.normalize(),
        }
    }

    fn marginalize(&self, keep: &[usize]) -> Self {
        match self {
            Distribution::Dense(d) => Distribution::Dense(d.marginalize(keep)),
            Distribution::Sparse(d) => Distribution::Sparse(d.marginalize(keep)),
        }
    }
}

/// Estimate the empirical joint distribution of coded samples.
///
/// `samples` holds one joint observation per row with one column per axis of
/// `shape`. Dense estimation fails with [`MorphError::IntractableBinCount`]
/// when the grid has more than `max_dense_cells` cells; the check runs before
/// allocation.
pub fn estimate(
    samples: &Array2<usize>,
    shape: &[usize],
    representation: Representation,
    max_dense_cells: u64,
) -> Result<Distribution> {
    if samples.ncols() != shape.len() {
        return Err(MorphError::InvalidBinSpec(format!(
            "{} sample columns for a {}-axis distribution",
            samples.ncols(),
            shape.len()
        )));
    }
    let joint = encode_rows(samples, shape)?;
    let n = joint.len() as f64;
    debug!(
        ?representation,
        ?shape,
        samples = joint.len(),
        "estimating joint distribution"
    );

    let mut dist = match representation {
        Representation::Dense => {
            let mut dense = DenseDistribution::zeros(shape, max_dense_cells)?;
            for &j in joint.iter() {
                dense.values[j as usize] += 1.0;
            }
            Distribution::Dense(dense)
        }
        Representation::Sparse => {
            let mut sparse = SparseDistribution::empty(shape)?;
            for &j in joint.iter() {
                sparse.add(j, 1.0);
            }
            Distribution::Sparse(sparse)
        }
    };
    if n > 0.0 {
        dist.normalize();
    }
    Ok(dist)
}
