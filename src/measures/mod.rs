// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Morphological computation measures and the primitives they are built from.

pub mod catalogue;
pub mod intrinsic;
pub mod quantity;
pub mod registry;
pub mod source;
pub mod synergy;

pub use quantity::Quantity;
pub use registry::{Formula, MeasureDefinition, Registry};
pub use source::{
    CodedTuples, DiscreteAverageSource, DiscretePointwiseSource, InformationSource, KnnSource,
};
pub use synergy::IterativeScaling;
