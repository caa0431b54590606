// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use ndarray::Axis;
use tracing::{debug, warn};

use crate::config::{Aggregation, Config, Mode};
use crate::data::alignment::{Aligned, align};
use crate::data::channel::{ChannelSet, Channels};
use crate::data::discretise::{discretise, normalise};
use crate::error::{MorphError, Result};
use crate::estimators::approaches::discrete::discrete_utils::{checked_cardinality, encode_rows};
use crate::estimators::approaches::discrete::distribution::Representation;
use crate::estimators::approaches::discrete::plugin::PluginEstimator;
use crate::estimators::approaches::knn::KnnEstimator;
use crate::measures::quantity::Quantity;
use crate::measures::registry::{MeasureDefinition, Registry};
use crate::measures::source::{
    CodedTuples, DiscreteAverageSource, DiscretePointwiseSource, KnnSource,
};
use crate::pipeline::result::{
    Diagnostics, MeasureResult, MeasureValue, NOT_IMPLEMENTED, ResultSink,
};

/// Runs one measure on one trajectory.
///
/// The measure name is looked up in the registry, the channels it needs are
/// validated and prepared for the configured mode, and the formula is
/// evaluated against the matching information source:
///
/// | mode       | aggregation     | source                                   |
/// |------------|-----------------|------------------------------------------|
/// | discrete   | average         | plug-in over dense or sparse histograms  |
/// | discrete   | state-dependent | local log ratios of counts               |
/// | continuous | either          | KSG / Frenzel-Pompe on normalised tuples |
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Registry,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Registry::standard())
    }
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn run(&self, config: &Config, channels: &Channels) -> Result<MeasureResult> {
        let def = self.registry.lookup(&config.measure)?;
        channels.require(&def.channels())?;
        let label = label(def.name, config);
        debug!(measure = def.name, %label, "evaluating measure");

        let mut diagnostics = None;
        let outcome = match config.mode {
            Mode::Discrete => {
                let tuples = prepare_discrete(config, channels, def)?;
                match config.aggregation {
                    Aggregation::Average => {
                        let source = DiscreteAverageSource::new(
                            tuples,
                            PluginEstimator::new(),
                            config.representation,
                            config.max_dense_cells,
                        );
                        (def.formula)(&source, config)
                    }
                    Aggregation::StateDependent => {
                        (def.formula)(&DiscretePointwiseSource::new(tuples), config)
                    }
                }
            }
            Mode::Continuous => {
                let normalised = prepare_continuous(config, channels, def)?;
                if config.keep_diagnostics {
                    let raw = align(channels, def.layout)?;
                    diagnostics = Some(Diagnostics::new(&raw, &normalised));
                }
                let estimator = KnnEstimator::new(config.k).with_flavor(config.ksg);
                (def.formula)(&KnnSource::new(normalised, estimator), config)
            }
        };

        let (value, notice) = match outcome {
            Ok(quantity) => (aggregate(quantity, config.aggregation), None),
            Err(MorphError::UnsupportedCombination { context, .. }) => {
                warn!(measure = def.name, %context, "measure not implemented");
                (
                    MeasureValue::Average(NOT_IMPLEMENTED),
                    Some(format!("{} is not implemented for {}", def.name, context)),
                )
            }
            Err(e) => return Err(e),
        };

        Ok(MeasureResult {
            label,
            measure: def.name.to_string(),
            config: config.clone(),
            value,
            notice,
            diagnostics,
        })
    }

    /// Run and hand the result to a sink.
    pub fn run_into(
        &self,
        config: &Config,
        channels: &Channels,
        sink: &mut dyn ResultSink,
    ) -> Result<()> {
        let result = self.run(config, channels)?;
        sink.accept(result);
        Ok(())
    }
}

fn label(name: &str, config: &Config) -> String {
    let mut label = match config.mode {
        Mode::Discrete => format!("{name} discrete"),
        Mode::Continuous => format!("{name} continuous"),
    };
    if config.aggregation == Aggregation::StateDependent {
        label.push_str(" state-dependent");
    }
    match config.mode {
        Mode::Discrete
            if config.aggregation == Aggregation::Average
                && config.representation == Representation::Sparse =>
        {
            label.push_str(" (sparse)")
        }
        Mode::Continuous => label.push_str(&format!(" (KSG {})", config.ksg.number())),
        _ => {}
    }
    label
}

fn aggregate(quantity: Quantity, aggregation: Aggregation) -> MeasureValue {
    match (aggregation, quantity) {
        (Aggregation::StateDependent, Quantity::PerSample(values)) => MeasureValue::StateDependent {
            mean: values.mean().unwrap_or(f64::NAN),
            values: values.to_vec(),
        },
        (_, quantity) => MeasureValue::Average(quantity.mean()),
    }
}

/// Bin every channel over its whole trajectory and relabel each row as one
/// mixed-radix code. Alignment happens per primitive inside the sources.
fn prepare_discrete(
    config: &Config,
    channels: &Channels,
    def: &MeasureDefinition,
) -> Result<CodedTuples> {
    let mut coded = ChannelSet::<usize>::new();
    let mut states = HashMap::new();
    for kind in def.channels() {
        let data = channels.get(kind)?;
        let spec = config.bin_spec(kind);
        let bins = spec.resolve(data.ncols())?;
        let cells = checked_cardinality(&bins)?;
        let count = usize::try_from(cells).map_err(|_| MorphError::IntractableBinCount {
            cells: cells as u128,
            limit: usize::MAX as u64,
        })?;
        let codes = discretise(data, &spec, config.domain(kind))?;
        let joint = encode_rows(&codes, &bins)?;
        debug!(channel = %kind, ?bins, states = count, "discretised channel");
        coded.set(kind, joint.mapv(|j| j as usize).insert_axis(Axis(1)));
        states.insert(kind, count);
    }
    CodedTuples::new(coded, states, def.layout)
}

/// Rescale every channel to the unit interval and align into lagged tuples.
fn prepare_continuous(
    config: &Config,
    channels: &Channels,
    def: &MeasureDefinition,
) -> Result<Aligned<f64>> {
    let mut scaled = Channels::new();
    for kind in def.channels() {
        scaled.set(kind, normalise(channels.get(kind)?, config.domain(kind))?);
    }
    align(&scaled, def.layout)
}
