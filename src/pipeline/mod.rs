// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Measure selection, evaluation and result aggregation.

pub mod dispatch;
pub mod result;

pub use dispatch::Dispatcher;
pub use result::{Diagnostics, MeasureResult, MeasureValue, NOT_IMPLEMENTED, ResultSink};
