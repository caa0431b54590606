// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable run configuration.
//!
//! A [`Config`] is resolved once by the caller (from flags, a YAML file or
//! code) and handed by reference to every stage. It never changes during a
//! run; the result carries a copy of it.
//!
//! ```rust
//! use morphcomp::config::{Config, Mode};
//!
//! let config = Config::new("W").with_mode(Mode::Continuous).with_k(5);
//! assert_eq!(config.k, 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::data::channel::ChannelKind;
use crate::data::discretise::{BinSpec, Domain};
pub use crate::estimators::approaches::discrete::distribution::Representation;
pub use crate::estimators::approaches::knn::KsgFlavor;

/// Discrete (binned, bits) or continuous (k-NN, nats) estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Discrete,
    Continuous,
}

/// Trajectory average or one value per aligned sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    #[default]
    Average,
    StateDependent,
}

/// Optional per-channel domains; absent domains are taken from the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelDomains {
    pub world: Option<Domain>,
    pub sensor: Option<Domain>,
    pub actuator: Option<Domain>,
}

impl ChannelDomains {
    pub fn get(&self, kind: ChannelKind) -> Option<&Domain> {
        match kind {
            ChannelKind::World => self.world.as_ref(),
            ChannelKind::Sensor => self.sensor.as_ref(),
            ChannelKind::Actuator => self.actuator.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Measure name, e.g. `"W"`, `"SY"` or the alias `"MI_W"`.
    pub measure: String,
    pub mode: Mode,
    pub aggregation: Aggregation,
    pub representation: Representation,
    pub ksg: KsgFlavor,
    /// Neighbour count for the k-NN estimators.
    pub k: usize,
    /// Bins per dimension when no per-channel list is given.
    pub bins: usize,
    pub world_bins: Option<Vec<usize>>,
    pub sensor_bins: Option<Vec<usize>>,
    pub actuator_bins: Option<Vec<usize>>,
    pub domains: ChannelDomains,
    /// Iterative scaling steps for the synergy measures.
    pub iterations: usize,
    /// Largest joint space a dense array may cover.
    pub max_dense_cells: u64,
    pub progress: bool,
    /// Attach the raw and normalised lagged tuples to continuous results.
    pub keep_diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            measure: String::new(),
            mode: Mode::default(),
            aggregation: Aggregation::default(),
            representation: Representation::default(),
            ksg: KsgFlavor::default(),
            k: 30,
            bins: 10,
            world_bins: None,
            sensor_bins: None,
            actuator_bins: None,
            domains: ChannelDomains::default(),
            iterations: 1000,
            max_dense_cells: 1 << 27,
            progress: false,
            keep_diagnostics: false,
        }
    }
}

impl Config {
    pub fn new(measure: impl Into<String>) -> Self {
        Self {
            measure: measure.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    pub fn with_ksg(mut self, ksg: KsgFlavor) -> Self {
        self.ksg = ksg;
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    /// Per-dimension bin counts for one channel, overriding the global count.
    pub fn with_channel_bins(mut self, kind: ChannelKind, bins: Vec<usize>) -> Self {
        match kind {
            ChannelKind::World => self.world_bins = Some(bins),
            ChannelKind::Sensor => self.sensor_bins = Some(bins),
            ChannelKind::Actuator => self.actuator_bins = Some(bins),
        }
        self
    }

    pub fn with_domain(mut self, kind: ChannelKind, domain: Domain) -> Self {
        match kind {
            ChannelKind::World => self.domains.world = Some(domain),
            ChannelKind::Sensor => self.domains.sensor = Some(domain),
            ChannelKind::Actuator => self.domains.actuator = Some(domain),
        }
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_max_dense_cells(mut self, cells: u64) -> Self {
        self.max_dense_cells = cells;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_diagnostics(mut self, keep: bool) -> Self {
        self.keep_diagnostics = keep;
        self
    }

    /// Bin specification in effect for a channel.
    pub fn bin_spec(&self, kind: ChannelKind) -> BinSpec {
        let list = match kind {
            ChannelKind::World => &self.world_bins,
            ChannelKind::Sensor => &self.sensor_bins,
            ChannelKind::Actuator => &self.actuator_bins,
        };
        match list {
            Some(bins) => BinSpec::PerDimension(bins.clone()),
            None => BinSpec::Global(self.bins),
        }
    }

    pub fn domain(&self, kind: ChannelKind) -> Option<&Domain> {
        self.domains.get(kind)
    }
}
