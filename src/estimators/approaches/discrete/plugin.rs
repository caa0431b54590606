// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::estimators::approaches::discrete::distribution::JointDistribution;
use crate::estimators::traits::EntropyEstimator;

/// Maximum-likelihood (plug-in) Shannon entropy, H = -Σ p log p.
///
/// Works on any [`JointDistribution`]; states with zero mass contribute
/// nothing. Defaults to base 2 (bits).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluginEstimator {
    base: f64,
}

impl Default for PluginEstimator {
    fn default() -> Self {
        Self { base: 2.0 }
    }
}

impl PluginEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the logarithm base (2 for bits, e for nats).
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    pub fn base(&self) -> f64 {
        self.base
    }
}

impl EntropyEstimator for PluginEstimator {
    fn entropy<D: JointDistribution>(&self, dist: &D) -> f64 {
        let mut h = 0.0_f64;
        dist.for_each_nonzero(&mut |_, p| {
            if p > 0.0 {
                h -= p * p.ln();
            }
        });
        h / self.base.ln()
    }
}
