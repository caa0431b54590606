// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Discrete estimators: binned joint distributions, the plug-in entropy
// estimator over them and per-sample information from counts.

pub mod discrete_utils;
pub mod distribution;
pub mod plugin;
pub mod pointwise;

pub use distribution::{
    DenseDistribution, Distribution, JointDistribution, Representation, SparseDistribution,
    estimate,
};
pub use plugin::PluginEstimator;
pub use pointwise::{
    DiscreteConditionalMutualInformation, DiscreteEntropy, DiscreteMutualInformation,
};
