// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-sample (local) information from empirical counts.
//!
//! The local values average exactly to the plug-in quantities over the same
//! samples, which is what the state-dependent measures rely on.

use ndarray::Array1;
use std::collections::HashMap;

use crate::estimators::approaches::discrete::discrete_utils::{
    count_frequencies, reduce_joint_space_compact,
};
use crate::estimators::traits::{GlobalValue, LocalValues};

/// Plug-in entropy of a sequence of joint codes, with local values -log p(x_t).
pub struct DiscreteEntropy {
    data: Array1<u64>,
    counts: HashMap<u64, usize>,
    base: f64,
}

impl DiscreteEntropy {
    pub fn new(data: Array1<u64>) -> Self {
        let counts = count_frequencies(&data);
        Self {
            data,
            counts,
            base: 2.0,
        }
    }

    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }
}

impl GlobalValue for DiscreteEntropy {
    fn global_value(&self) -> f64 {
        let n_f = self.data.len() as f64;
        let mut h = 0.0_f64;
        for &cnt in self.counts.values() {
            let p = cnt as f64 / n_f;
            h -= p * p.ln();
        }
        h / self.base.ln()
    }
}

impl LocalValues for DiscreteEntropy {
    fn local_values(&self) -> Array1<f64> {
        let n_f = self.data.len() as f64;
        let log_base = self.base.ln();
        self.data
            .mapv(|v| (n_f / self.counts[&v] as f64).ln() / log_base)
    }
}

/// Mutual information via the entropy-summation formula.
///
/// Wraps any entropy estimator; locally i(x;y) = h(x) + h(y) - h(x,y),
/// which for plug-in entropies is log(c(x,y) N / (c(x) c(y))).
pub struct DiscreteMutualInformation<E> {
    marginals: Vec<E>,
    joint: E,
}

impl<E> DiscreteMutualInformation<E> {
    pub fn new<F>(series: &[Array1<u64>], constructor: F) -> Self
    where
        F: Fn(Array1<u64>) -> E + Clone,
    {
        let marginals = series.iter().cloned().map(constructor.clone()).collect();
        let joint = constructor(reduce_joint_space_compact(series));
        Self { marginals, joint }
    }
}

impl<E: GlobalValue> GlobalValue for DiscreteMutualInformation<E> {
    fn global_value(&self) -> f64 {
        // I(X1; ...; Xn) = sum H(Xi) - H(X1, ..., Xn)
        let h_marginals: f64 = self.marginals.iter().map(|m| m.global_value()).sum();
        h_marginals - self.joint.global_value()
    }
}

impl<E: LocalValues> LocalValues for DiscreteMutualInformation<E> {
    fn local_values(&self) -> Array1<f64> {
        let mut res = -self.joint.local_values();
        for m in &self.marginals {
            res += &m.local_values();
        }
        res
    }
}

/// Conditional mutual information via the entropy-summation formula.
///
/// Locally i(x;y|z) = h(x,z) + h(y,z) - h(x,y,z) - h(z), which for plug-in
/// entropies is log(c(x,y,z) c(z) / (c(x,z) c(y,z))).
pub struct DiscreteConditionalMutualInformation<E> {
    marginal_conds: Vec<E>,
    joint_cond: E,
    cond_only: E,
}

impl<E> DiscreteConditionalMutualInformation<E> {
    pub fn new<F>(series: &[Array1<u64>], cond: &Array1<u64>, constructor: F) -> Self
    where
        F: Fn(Array1<u64>) -> E + Clone,
    {
        // General: I(X1; ...; Xn | Z) = sum H(Xi, Z) - H(X1, ..., Xn, Z) - (n-1)H(Z)
        let marginal_conds = series
            .iter()
            .map(|s| constructor.clone()(reduce_joint_space_compact(&[s.clone(), cond.clone()])))
            .collect();

        let mut joint_all = series.to_vec();
        joint_all.push(cond.clone());
        let joint_cond = constructor.clone()(reduce_joint_space_compact(&joint_all));
        let cond_only = constructor(cond.clone());

        Self {
            marginal_conds,
            joint_cond,
            cond_only,
        }
    }
}

impl<E: GlobalValue> GlobalValue for DiscreteConditionalMutualInformation<E> {
    fn global_value(&self) -> f64 {
        let n = self.marginal_conds.len() as f64;
        let sum_h_xz: f64 = self.marginal_conds.iter().map(|m| m.global_value()).sum();
        sum_h_xz - self.joint_cond.global_value() - (n - 1.0) * self.cond_only.global_value()
    }
}

impl<E: LocalValues> LocalValues for DiscreteConditionalMutualInformation<E> {
    fn local_values(&self) -> Array1<f64> {
        let n = self.marginal_conds.len() as f64;
        let mut res = -self.joint_cond.local_values();
        for m in &self.marginal_conds {
            res += &m.local_values();
        }
        res -= &((n - 1.0) * self.cond_only.local_values());
        res
    }
}
