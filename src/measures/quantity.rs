// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Sub;

use ndarray::{Array1, Zip, s};

/// A measure value: one number for the trajectory or one per aligned sample.
///
/// Formulas are written once against this type. Arithmetic broadcasts a
/// scalar over per-sample values, so the averaged and the state-dependent
/// forms of a measure share the same expression. Per-sample values of
/// different lengths are paired from the first sample on and the longer tail
/// is dropped: a term without look-ahead covers one sample more than a lagged
/// one.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantity {
    Scalar(f64),
    PerSample(Array1<f64>),
}

impl Quantity {
    /// Apply `f` element-wise.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Quantity::Scalar(v) => Quantity::Scalar(f(v)),
            Quantity::PerSample(values) => Quantity::PerSample(values.mapv(f)),
        }
    }

    /// Combine two quantities element-wise, broadcasting scalars.
    pub fn zip_with(self, other: Quantity, f: impl Fn(f64, f64) -> f64) -> Self {
        match (self, other) {
            (Quantity::Scalar(a), Quantity::Scalar(b)) => Quantity::Scalar(f(a, b)),
            (Quantity::Scalar(a), Quantity::PerSample(b)) => {
                Quantity::PerSample(b.mapv(|v| f(a, v)))
            }
            (Quantity::PerSample(a), Quantity::Scalar(b)) => {
                Quantity::PerSample(a.mapv(|v| f(v, b)))
            }
            (Quantity::PerSample(a), Quantity::PerSample(b)) => {
                let len = a.len().min(b.len());
                let (a, b) = (a.slice(s![..len]), b.slice(s![..len]));
                Quantity::PerSample(Zip::from(&a).and(&b).map_collect(|&x, &y| f(x, y)))
            }
        }
    }

    /// Trajectory mean; empty per-sample values give NaN.
    pub fn mean(&self) -> f64 {
        match self {
            Quantity::Scalar(v) => *v,
            Quantity::PerSample(values) => values.mean().unwrap_or(f64::NAN),
        }
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Sub<Quantity> for f64 {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        Quantity::Scalar(self) - rhs
    }
}
