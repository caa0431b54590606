// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod common_nd;
pub mod discrete;
pub mod knn;

// Unified re-exports for the estimators the measures are built from.
pub use discrete::{
    DiscreteConditionalMutualInformation, DiscreteEntropy, DiscreteMutualInformation,
    PluginEstimator,
};
pub use knn::{FrenzelPompeCmi, KnnEstimator, KsgMutualInformation};
