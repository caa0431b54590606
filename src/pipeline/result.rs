// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array2;
use serde::Serialize;

use crate::config::Config;
use crate::data::alignment::Aligned;

/// Value reported for measure and mode combinations without an implementation.
pub const NOT_IMPLEMENTED: f64 = -1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureValue {
    Average(f64),
    StateDependent { values: Vec<f64>, mean: f64 },
}

impl MeasureValue {
    pub fn mean(&self) -> f64 {
        match self {
            MeasureValue::Average(v) => *v,
            MeasureValue::StateDependent { mean, .. } => *mean,
        }
    }

    /// Per-sample values of a state-dependent result.
    pub fn values(&self) -> Option<&[f64]> {
        match self {
            MeasureValue::Average(_) => None,
            MeasureValue::StateDependent { values, .. } => Some(values),
        }
    }
}

/// Lagged tuples a continuous measure was computed from, before and after
/// normalisation. Rows are aligned samples; `columns` names each column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub columns: Vec<String>,
    pub raw: Vec<Vec<f64>>,
    pub normalised: Vec<Vec<f64>>,
}

fn rows(data: &Array2<f64>) -> Vec<Vec<f64>> {
    data.rows().into_iter().map(|r| r.to_vec()).collect()
}

impl Diagnostics {
    pub fn new(raw: &Aligned<f64>, normalised: &Aligned<f64>) -> Self {
        let columns = raw
            .roles
            .iter()
            .flat_map(|(role, range)| {
                range
                    .clone()
                    .map(move |d| format!("{}[{}]", role.label(), d - range.start))
            })
            .collect();
        Self {
            columns,
            raw: rows(&raw.data),
            normalised: rows(&normalised.data),
        }
    }
}

/// Outcome of one measure invocation, ready for an external writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureResult {
    /// Measure, mode and estimator, e.g. `"W discrete (sparse)"`.
    pub label: String,
    /// Canonical measure name.
    pub measure: String,
    pub config: Config,
    pub value: MeasureValue,
    /// Set when the value is the not-implemented placeholder.
    pub notice: Option<String>,
    pub diagnostics: Option<Diagnostics>,
}

impl MeasureResult {
    pub fn is_implemented(&self) -> bool {
        self.notice.is_none()
    }
}

/// Receives finished results; file formats live outside this crate.
pub trait ResultSink {
    fn accept(&mut self, result: MeasureResult);
}

impl ResultSink for Vec<MeasureResult> {
    fn accept(&mut self, result: MeasureResult) {
        self.push(result);
    }
}
