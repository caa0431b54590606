// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView2};
use serde::{Deserialize, Serialize};
use statrs::function::gamma::digamma;

use crate::error::{MorphError, Result};
use crate::estimators::approaches::common_nd::dataset::NdDataset;
use crate::estimators::traits::{GlobalValue, LocalValues};

/// Which of the two Kraskov-Stögbauer-Grassberger estimators to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KsgFlavor {
    /// Marginal counts strictly inside the joint k-th neighbour distance.
    #[default]
    One,
    /// Marginal counts inside the per-marginal extent of the k neighbours.
    Two,
}

impl KsgFlavor {
    pub fn number(self) -> u8 {
        match self {
            KsgFlavor::One => 1,
            KsgFlavor::Two => 2,
        }
    }
}

pub(crate) fn check_neighbours(k: usize, samples: usize) -> Result<()> {
    if k == 0 || k >= samples {
        return Err(MorphError::InvalidNeighbourCount { k, samples });
    }
    Ok(())
}

/// KSG mutual information estimator (natural log), max-norm in all spaces.
///
/// Kraskov, Stögbauer and Grassberger, "Estimating mutual information",
/// Phys. Rev. E 69, 066138 (2004).
///
/// - KSG 1: i_t = ψ(k) + ψ(N) - ψ(n_x + 1) - ψ(n_y + 1)
/// - KSG 2: i_t = ψ(k) - 1/k + ψ(N) - ψ(n_x) - ψ(n_y)
pub struct KsgMutualInformation {
    x: NdDataset,
    y: NdDataset,
    joint: NdDataset,
    k: usize,
    flavor: KsgFlavor,
}

impl KsgMutualInformation {
    pub fn new(
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        k: usize,
        flavor: KsgFlavor,
    ) -> Result<Self> {
        assert_eq!(x.nrows(), y.nrows(), "x and y must have the same number of samples");
        check_neighbours(k, x.nrows())?;
        let x = NdDataset::from_view(x);
        let y = NdDataset::from_view(y);
        let joint = NdDataset::join(&[&x, &y]);
        Ok(Self { x, y, joint, k, flavor })
    }

    fn local_one(&self, i: usize) -> f64 {
        let neighbours = self.joint.k_nearest(i, self.k);
        let eps = self.joint.distance(i, neighbours[self.k - 1]);
        let nx = self.x.count_within(i, eps);
        let ny = self.y.count_within(i, eps);
        digamma(self.k as f64) + digamma(self.joint.n as f64)
            - digamma((nx + 1) as f64)
            - digamma((ny + 1) as f64)
    }

    fn local_two(&self, i: usize) -> f64 {
        let neighbours = self.joint.k_nearest(i, self.k);
        let eps_x = neighbours.iter().map(|&j| self.x.distance(i, j)).fold(0.0, f64::max);
        let eps_y = neighbours.iter().map(|&j| self.y.distance(i, j)).fold(0.0, f64::max);
        let nx = self.x.count_within_closed(i, eps_x);
        let ny = self.y.count_within_closed(i, eps_y);
        let k = self.k as f64;
        digamma(k) - 1.0 / k + digamma(self.joint.n as f64)
            - digamma(nx as f64)
            - digamma(ny as f64)
    }
}

impl GlobalValue for KsgMutualInformation {
    fn global_value(&self) -> f64 {
        self.global_from_local()
    }
}

impl LocalValues for KsgMutualInformation {
    fn local_values(&self) -> Array1<f64> {
        (0..self.joint.n)
            .map(|i| match self.flavor {
                KsgFlavor::One => self.local_one(i),
                KsgFlavor::Two => self.local_two(i),
            })
            .collect()
    }
}
