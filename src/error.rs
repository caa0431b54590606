// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::data::channel::ChannelKind;

/// Errors raised while preparing or evaluating a measure.
///
/// Every variant aborts only the invocation that produced it. Validation
/// happens before any distribution is allocated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MorphError {
    #[error("channel {0} is required but missing or empty")]
    MissingChannel(ChannelKind),
    #[error("unknown measure '{0}'")]
    UnknownMeasure(String),
    #[error("joint space of {cells} cells exceeds the limit of {limit}")]
    IntractableBinCount { cells: u128, limit: u64 },
    #[error("{measure} is not implemented for {context}")]
    UnsupportedCombination { measure: String, context: String },
    #[error("channel {channel} has {found} samples, expected {expected}")]
    SampleCountMismatch {
        channel: ChannelKind,
        expected: usize,
        found: usize,
    },
    #[error("{samples} samples leave no aligned rows for a lag of {lag}")]
    InsufficientSamples { samples: usize, lag: usize },
    #[error("invalid bin specification: {0}")]
    InvalidBinSpec(String),
    #[error("invalid domain: {0}")]
    InvalidDomain(String),
    #[error("k = {k} neighbours is invalid for {samples} samples")]
    InvalidNeighbourCount { k: usize, samples: usize },
    #[error("code {code} on axis {axis} is outside [0, {size})")]
    CodeOutOfRange { axis: usize, code: usize, size: usize },
    #[error("column {column} is outside a table with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },
}

pub type Result<T> = std::result::Result<T, MorphError>;
