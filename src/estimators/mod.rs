// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod approaches;
pub mod traits;

pub use traits::{ContinuousEstimator, EntropyEstimator, GlobalValue, LocalValues};
