// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView2};
use statrs::function::gamma::digamma;

use crate::error::Result;
use crate::estimators::approaches::common_nd::dataset::NdDataset;
use crate::estimators::approaches::knn::ksg::check_neighbours;
use crate::estimators::traits::{GlobalValue, LocalValues};

/// Frenzel-Pompe conditional mutual information estimator (natural log).
///
/// With ε_t the max-norm distance to the k-th neighbour in the (x, y, z)
/// space and n_* the strict neighbour counts within ε_t in the sub-spaces:
///
/// i_t = ψ(k) + ψ(n_z + 1) - ψ(n_xz + 1) - ψ(n_yz + 1)
pub struct FrenzelPompeCmi {
    z: NdDataset,
    xz: NdDataset,
    yz: NdDataset,
    joint: NdDataset,
    k: usize,
}

impl FrenzelPompeCmi {
    pub fn new(
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        z: ArrayView2<'_, f64>,
        k: usize,
    ) -> Result<Self> {
        assert!(
            x.nrows() == y.nrows() && y.nrows() == z.nrows(),
            "x, y and z must have the same number of samples"
        );
        check_neighbours(k, x.nrows())?;
        let x = NdDataset::from_view(x);
        let y = NdDataset::from_view(y);
        let z = NdDataset::from_view(z);
        Ok(Self {
            xz: NdDataset::join(&[&x, &z]),
            yz: NdDataset::join(&[&y, &z]),
            joint: NdDataset::join(&[&x, &y, &z]),
            z,
            k,
        })
    }
}

impl GlobalValue for FrenzelPompeCmi {
    fn global_value(&self) -> f64 {
        self.global_from_local()
    }
}

impl LocalValues for FrenzelPompeCmi {
    fn local_values(&self) -> Array1<f64> {
        let radii = self.joint.kth_neighbor_radii(self.k);
        let psi_k = digamma(self.k as f64);
        radii
            .iter()
            .enumerate()
            .map(|(i, &eps)| {
                let nz = self.z.count_within(i, eps);
                let nxz = self.xz.count_within(i, eps);
                let nyz = self.yz.count_within(i, eps);
                psi_k + digamma((nz + 1) as f64)
                    - digamma((nxz + 1) as f64)
                    - digamma((nyz + 1) as f64)
            })
            .collect()
    }
}
