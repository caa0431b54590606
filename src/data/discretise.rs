// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Equal-width binning and range normalisation of channels.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{MorphError, Result};

/// Number of bins per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinSpec {
    /// The same count for every dimension.
    Global(usize),
    /// One count per dimension; the length must match the channel.
    PerDimension(Vec<usize>),
}

impl BinSpec {
    /// Per-dimension bin counts for a channel with `dims` columns.
    pub fn resolve(&self, dims: usize) -> Result<Vec<usize>> {
        let bins = match self {
            BinSpec::Global(b) => vec![*b; dims],
            BinSpec::PerDimension(list) => {
                if list.len() != dims {
                    return Err(MorphError::InvalidBinSpec(format!(
                        "{} bin counts given for {} dimensions",
                        list.len(),
                        dims
                    )));
                }
                list.clone()
            }
        };
        if bins.contains(&0) {
            return Err(MorphError::InvalidBinSpec(
                "bin counts must be at least 1".to_string(),
            ));
        }
        Ok(bins)
    }
}

/// Total number of joint bins: the product of the per-dimension counts.
pub fn bin_count(dims: usize, spec: &BinSpec) -> Result<u128> {
    Ok(spec.resolve(dims)?.iter().map(|&b| b as u128).product())
}

/// Closed per-dimension value range `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl Domain {
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Result<Self> {
        let domain = Self { min, max };
        domain.validate(domain.min.len())?;
        Ok(domain)
    }

    /// Column-wise minimum and maximum of the data.
    pub fn empirical(data: &Array2<f64>) -> Self {
        let fold = |init: f64, pick: fn(f64, f64) -> f64| {
            data.axis_iter(Axis(1))
                .map(|col| col.iter().copied().fold(init, pick))
                .collect::<Vec<f64>>()
        };
        Self {
            min: fold(f64::INFINITY, f64::min),
            max: fold(f64::NEG_INFINITY, f64::max),
        }
    }

    pub fn dims(&self) -> usize {
        self.min.len()
    }

    pub fn validate(&self, dims: usize) -> Result<()> {
        if self.min.len() != dims || self.max.len() != dims {
            return Err(MorphError::InvalidDomain(format!(
                "domain has {}/{} bounds for {} dimensions",
                self.min.len(),
                self.max.len(),
                dims
            )));
        }
        if let Some(d) = (0..dims).find(|&d| !(self.min[d] <= self.max[d])) {
            return Err(MorphError::InvalidDomain(format!(
                "dimension {d}: min {} exceeds max {}",
                self.min[d], self.max[d]
            )));
        }
        Ok(())
    }
}

fn resolve_domain(data: &Array2<f64>, domain: Option<&Domain>) -> Result<Domain> {
    match domain {
        Some(d) => {
            d.validate(data.ncols())?;
            Ok(d.clone())
        }
        None => Ok(Domain::empirical(data)),
    }
}

/// Map each value to an equal-width bin index within its dimension's domain.
///
/// The domain maximum belongs to the last bin and out-of-range values clamp
/// to the first or last bin. A zero-width dimension maps to bin 0.
pub fn discretise(
    data: &Array2<f64>,
    spec: &BinSpec,
    domain: Option<&Domain>,
) -> Result<Array2<usize>> {
    let bins = spec.resolve(data.ncols())?;
    let domain = resolve_domain(data, domain)?;

    let mut codes = Array2::zeros(data.raw_dim());
    for ((t, d), &v) in data.indexed_iter() {
        codes[(t, d)] = bin_index(v, domain.min[d], domain.max[d], bins[d]);
    }
    Ok(codes)
}

fn bin_index(v: f64, min: f64, max: f64, bins: usize) -> usize {
    let width = max - min;
    if width <= 0.0 {
        return 0;
    }
    let x = ((v - min) / width * bins as f64).floor();
    if x <= 0.0 { 0 } else { (x as usize).min(bins - 1) }
}

/// Rescale each dimension to `[0, 1]` over its domain; zero-width dimensions become 0.
pub fn normalise(data: &Array2<f64>, domain: Option<&Domain>) -> Result<Array2<f64>> {
    let domain = resolve_domain(data, domain)?;
    let mut out = data.clone();
    for (d, mut col) in out.axis_iter_mut(Axis(1)).enumerate() {
        let (min, width) = (domain.min[d], domain.max[d] - domain.min[d]);
        col.mapv_inplace(|v| if width > 0.0 { (v - min) / width } else { 0.0 });
    }
    Ok(out)
}
