// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The morphological computation measures.
//!
//! W' is the next world state, W the current one, A the action and S the
//! sensor reading. Formulas only use [`InformationSource`] primitives and
//! [`Quantity`] arithmetic, so one definition serves averaged and
//! state-dependent evaluation alike.

use tracing::debug;

use crate::config::Config;
use crate::data::alignment::Role;
use crate::data::channel::ChannelKind;
use crate::error::{MorphError, Result};
use crate::estimators::approaches::discrete::distribution::JointDistribution;
use crate::measures::intrinsic::intrinsic_causal_contribution;
use crate::measures::quantity::Quantity;
use crate::measures::registry::MeasureDefinition;
use crate::measures::source::InformationSource;
use crate::measures::synergy::IterativeScaling;

const W_NEXT: Role = Role::WorldNext;
const W: Role = Role::World;
const A: Role = Role::Actuator;
const S: Role = Role::Sensor;

const TRANSITION: &[Role] = &[W_NEXT, W, A];

/// Marginal constraints of SY over the (W', W, A) axes.
const SYNERGY_FEATURES: &[&[usize]] = &[&[0, 1], &[0, 2], &[1, 2]];
/// SY_NID leaves the (W, A) marginal free.
const SYNERGY_NID_FEATURES: &[&[usize]] = &[&[0, 1], &[0, 2]];

/// I(W';W|A)
pub fn state_information(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    src.conditional_mutual_information(&[W_NEXT], &[W], &[A])
}

/// I(W';A|W)
pub fn action_information(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    src.conditional_mutual_information(&[W_NEXT], &[A], &[W])
}

/// I(W;W') - I(A;W')
pub fn causal_difference(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    Ok(src.mutual_information(&[W], &[W_NEXT])? - src.mutual_information(&[A], &[W_NEXT])?)
}

/// I(W';W|A) - I(W';A)
pub fn world_action_difference(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    Ok(src.conditional_mutual_information(&[W_NEXT], &[W], &[A])?
        - src.mutual_information(&[W_NEXT], &[A])?)
}

/// I(W';W|S) - I(W';S)
pub fn world_sensor_difference(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    Ok(src.conditional_mutual_information(&[W_NEXT], &[W], &[S])?
        - src.mutual_information(&[W_NEXT], &[S])?)
}

/// I(W';W) - I(A;S)
///
/// Discrete sources estimate I(A;S) over all `n` samples and I(W';W) over
/// the `n - 1` transitions, so per-sample values only keep the first `n - 1`
/// local I(A;S) terms. The k-NN source evaluates both on the lagged table.
pub fn information_difference(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    Ok(src.mutual_information(&[W_NEXT], &[W])? - src.mutual_information(&[A], &[S])?)
}

/// 1 - I(W';A|W) / log2(|W|)
pub fn action_information_complement(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    let norm = (src.states(ChannelKind::World)? as f64).log2();
    let a = src.conditional_mutual_information(&[W_NEXT], &[A], &[W])?;
    Ok(1.0 - a.map(|v| v / norm))
}

/// log2(|A|) - I(A;S)
pub fn controller_complexity(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    let capacity = (src.states(ChannelKind::Actuator)? as f64).log2();
    Ok(capacity - src.mutual_information(&[A], &[S])?)
}

/// Intrinsic causal contribution over (S', S, A), normalised by log2(|S|).
pub fn intrinsic_causal(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    let norm = (src.states(ChannelKind::Sensor)? as f64).log2();
    let dist = src.distribution(&[Role::SensorNext, S, A])?;
    debug!(support = dist.support_size(), "intrinsic causal contribution");
    Ok(Quantity::Scalar(intrinsic_causal_contribution(&dist) / norm))
}

fn fitted_synergy(
    src: &dyn InformationSource,
    config: &Config,
    features: &[&[usize]],
) -> Result<f64> {
    let target = src.distribution(TRANSITION)?;
    let features = features.iter().map(|f| f.to_vec()).collect();
    let mut ipf = IterativeScaling::new(&target, features, config.max_dense_cells)?;
    Ok(ipf.run(config.iterations, config.progress))
}

/// D(p(w',w,a) || IPF fit to the pairwise marginals)
pub fn synergy(src: &dyn InformationSource, config: &Config) -> Result<Quantity> {
    Ok(Quantity::Scalar(fitted_synergy(src, config, SYNERGY_FEATURES)?))
}

/// Synergy without the (W, A) constraint.
pub fn synergy_nid(src: &dyn InformationSource, config: &Config) -> Result<Quantity> {
    Ok(Quantity::Scalar(fitted_synergy(src, config, SYNERGY_NID_FEATURES)?))
}

/// W - SY
pub fn state_information_without_synergy(
    src: &dyn InformationSource,
    config: &Config,
) -> Result<Quantity> {
    let sy = fitted_synergy(src, config, SYNERGY_FEATURES)?;
    Ok(state_information(src, config)? - Quantity::Scalar(sy))
}

fn not_implemented(name: &str, src: &dyn InformationSource) -> MorphError {
    MorphError::UnsupportedCombination {
        measure: name.to_string(),
        context: src.context(),
    }
}

pub fn unique_information(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    Err(not_implemented("UI", src))
}

pub fn complementary_information(src: &dyn InformationSource, _: &Config) -> Result<Quantity> {
    Err(not_implemented("CI", src))
}

/// Every measure known to the standard registry.
pub fn standard_measures() -> Vec<MeasureDefinition> {
    vec![
        MeasureDefinition {
            name: "W",
            aliases: &["MI_W"],
            layout: TRANSITION,
            description: "state information not explained by the action, I(W';W|A)",
            formula: state_information,
        },
        MeasureDefinition {
            name: "A",
            aliases: &["MI_A"],
            layout: TRANSITION,
            description: "action information not already in the state, I(W';A|W)",
            formula: action_information,
        },
        MeasureDefinition {
            name: "A_Prime",
            aliases: &["MI_A_Prime"],
            layout: TRANSITION,
            description: "1 - I(W';A|W) / log2(|W|)",
            formula: action_information_complement,
        },
        MeasureDefinition {
            name: "CW",
            aliases: &["MI_CA"],
            layout: TRANSITION,
            description: "I(W;W') - I(A;W')",
            formula: causal_difference,
        },
        MeasureDefinition {
            name: "WA",
            aliases: &["MI_WA"],
            layout: TRANSITION,
            description: "I(W';W|A) - I(W';A)",
            formula: world_action_difference,
        },
        MeasureDefinition {
            name: "WS",
            aliases: &["MI_WS"],
            layout: &[W_NEXT, W, S],
            description: "I(W';W|S) - I(W';S)",
            formula: world_sensor_difference,
        },
        MeasureDefinition {
            name: "MI",
            aliases: &["MI_MI"],
            layout: &[W_NEXT, W, A, S],
            description: "I(W';W) - I(A;S)",
            formula: information_difference,
        },
        MeasureDefinition {
            name: "IN",
            aliases: &["MI_IN"],
            layout: &[A, S],
            description: "log2(|A|) - I(A;S)",
            formula: controller_complexity,
        },
        MeasureDefinition {
            name: "CA",
            aliases: &[],
            layout: &[Role::SensorNext, S, A],
            description: "intrinsic causal contribution of A to S'",
            formula: intrinsic_causal,
        },
        MeasureDefinition {
            name: "SY",
            aliases: &["MI_SY"],
            layout: TRANSITION,
            description: "synergy of W and A about W'",
            formula: synergy,
        },
        MeasureDefinition {
            name: "SY_NID",
            aliases: &["MI_SY_NID"],
            layout: TRANSITION,
            description: "synergy without the (W, A) constraint",
            formula: synergy_nid,
        },
        MeasureDefinition {
            name: "Wp",
            aliases: &["MI_Wp"],
            layout: TRANSITION,
            description: "W - SY",
            formula: state_information_without_synergy,
        },
        MeasureDefinition {
            name: "UI",
            aliases: &[],
            layout: TRANSITION,
            description: "unique information",
            formula: unique_information,
        },
        MeasureDefinition {
            name: "CI",
            aliases: &[],
            layout: TRANSITION,
            description: "complementary information",
            formula: complementary_information,
        },
    ]
}
