// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// k-nearest-neighbour estimators for continuous samples.

pub mod frenzel_pompe;
pub mod ksg;

pub use frenzel_pompe::FrenzelPompeCmi;
pub use ksg::{KsgFlavor, KsgMutualInformation};

use ndarray::{Array1, ArrayView2};

use crate::error::Result;
use crate::estimators::traits::{ContinuousEstimator, LocalValues};

/// Default continuous estimator: KSG for mutual information and
/// Frenzel-Pompe for its conditional form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnnEstimator {
    k: usize,
    flavor: KsgFlavor,
}

impl KnnEstimator {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            flavor: KsgFlavor::default(),
        }
    }

    pub fn with_flavor(mut self, flavor: KsgFlavor) -> Self {
        self.flavor = flavor;
        self
    }
}

impl ContinuousEstimator for KnnEstimator {
    fn local_mutual_information(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
    ) -> Result<Array1<f64>> {
        Ok(KsgMutualInformation::new(x, y, self.k, self.flavor)?.local_values())
    }

    fn local_conditional_mutual_information(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        z: ArrayView2<'_, f64>,
    ) -> Result<Array1<f64>> {
        Ok(FrenzelPompeCmi::new(x, y, z, self.k)?.local_values())
    }
}
