// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synergy by iterative proportional fitting.
//!
//! The working model starts at the uniform distribution and is repeatedly
//! rescaled so that one marginal ("feature") at a time matches the target.
//! Its limit is the maximum-entropy model consistent with the feature
//! marginals; the KL divergence of the target from it is the information
//! only present in the full joint, i.e. the synergy.

use tracing::debug;

use crate::error::Result;
use crate::estimators::approaches::discrete::discrete_utils::decode;
use crate::estimators::approaches::discrete::distribution::{DenseDistribution, JointDistribution};

/// IPF state: target, features and the dense working estimate.
pub struct IterativeScaling {
    target: DenseDistribution,
    features: Vec<Vec<usize>>,
    target_marginals: Vec<DenseDistribution>,
    estimate: DenseDistribution,
    step: usize,
}

impl IterativeScaling {
    /// Set up fitting of `target` against the given marginal axis sets.
    ///
    /// The working estimate is dense over the full target shape and checked
    /// against `max_dense_cells` before allocation.
    pub fn new<D: JointDistribution>(
        target: &D,
        features: Vec<Vec<usize>>,
        max_dense_cells: u64,
    ) -> Result<Self> {
        assert!(!features.is_empty(), "at least one feature is required");
        let target = DenseDistribution::from_distribution(target, max_dense_cells)?;
        let estimate = DenseDistribution::uniform(target.shape(), max_dense_cells)?;
        let target_marginals = features.iter().map(|f| target.marginalize(f)).collect();
        Ok(Self {
            target,
            features,
            target_marginals,
            estimate,
            step: 0,
        })
    }

    /// Number of feature updates applied so far.
    pub fn iterations(&self) -> usize {
        self.step
    }

    pub fn estimate(&self) -> &DenseDistribution {
        &self.estimate
    }

    /// Rescale the estimate to match the next feature's marginal.
    ///
    /// Cells whose current marginal is zero stay zero.
    pub fn iterate(&mut self) {
        let i = self.step % self.features.len();
        let feature = &self.features[i];
        let wanted = &self.target_marginals[i];
        let current = self.estimate.marginalize(feature);
        let shape = self.target.shape().to_vec();

        for (joint, q) in self.estimate.values_mut().iter_mut().enumerate() {
            if *q == 0.0 {
                continue;
            }
            let code = decode(joint as u64, &shape);
            let marginal_code: Vec<usize> = feature.iter().map(|&axis| code[axis]).collect();
            let have = current.get(&marginal_code);
            *q = if have > 0.0 {
                *q * wanted.get(&marginal_code) / have
            } else {
                0.0
            };
        }
        self.step += 1;
    }

    /// Apply `iterations` updates, reporting progress through tracing when asked.
    pub fn run(&mut self, iterations: usize, progress: bool) -> f64 {
        let report_every = (iterations / 10).max(1);
        for done in 1..=iterations {
            self.iterate();
            if progress && done % report_every == 0 {
                debug!(
                    done,
                    iterations,
                    divergence = self.divergence(),
                    "iterative scaling progress"
                );
            }
        }
        self.divergence()
    }

    /// KL divergence D(target || estimate) in bits; infinite when the
    /// estimate misses a state the target has.
    pub fn divergence(&self) -> f64 {
        let mut kl = 0.0;
        self.target.for_each_nonzero(&mut |joint, p| {
            let q = self.estimate.get_joint(joint);
            kl += if q > 0.0 { p * (p / q).log2() } else { f64::INFINITY };
        });
        kl
    }
}
