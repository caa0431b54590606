// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView2};

use crate::error::Result;
use crate::estimators::approaches::discrete::distribution::JointDistribution;

pub trait GlobalValue {
    /// Compute and return the global value of the measure.
    fn global_value(&self) -> f64;
}

pub trait LocalValues: GlobalValue {
    /// Compute and return the local values of the measure.
    fn local_values(&self) -> Array1<f64>;

    /// Derive global_value as the mean of local values. Empty inputs give NaN.
    fn global_from_local(&self) -> f64 {
        self.local_values().mean().unwrap_or(f64::NAN)
    }
}

/// Entropy-based quantities over a joint distribution.
///
/// Axes are given as positions in the distribution's shape. Mutual
/// information and its conditional form follow from the entropy-summation
/// identities, so an implementation only has to supply [`entropy`].
///
/// [`entropy`]: EntropyEstimator::entropy
pub trait EntropyEstimator {
    fn entropy<D: JointDistribution>(&self, dist: &D) -> f64;

    /// I(X;Y) = H(X) + H(Y) - H(X,Y)
    fn mutual_information<D: JointDistribution>(&self, dist: &D, x: &[usize], y: &[usize]) -> f64 {
        let xy: Vec<usize> = x.iter().chain(y).copied().collect();
        self.entropy(&dist.marginalize(x)) + self.entropy(&dist.marginalize(y))
            - self.entropy(&dist.marginalize(&xy))
    }

    /// I(X;Y|Z) = H(X,Z) + H(Y,Z) - H(X,Y,Z) - H(Z)
    fn conditional_mutual_information<D: JointDistribution>(
        &self,
        dist: &D,
        x: &[usize],
        y: &[usize],
        z: &[usize],
    ) -> f64 {
        let xz: Vec<usize> = x.iter().chain(z).copied().collect();
        let yz: Vec<usize> = y.iter().chain(z).copied().collect();
        let xyz: Vec<usize> = x.iter().chain(y).chain(z).copied().collect();
        self.entropy(&dist.marginalize(&xz)) + self.entropy(&dist.marginalize(&yz))
            - self.entropy(&dist.marginalize(&xyz))
            - self.entropy(&dist.marginalize(z))
    }
}

/// Per-sample mutual information estimates over continuous samples (rows aligned).
pub trait ContinuousEstimator {
    fn local_mutual_information(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
    ) -> Result<Array1<f64>>;

    fn local_conditional_mutual_information(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        z: ArrayView2<'_, f64>,
    ) -> Result<Array1<f64>>;
}
