// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Where measures get their information-theoretic primitives from.
//!
//! A measure formula only sees an [`InformationSource`]. The discrete
//! sources align the coded channels separately for every primitive, over
//! exactly the roles it needs: a term without a look-ahead role keeps all `n`
//! samples while a lagged term has `n - 1`. The averaged source estimates a
//! fresh joint distribution per term; the pointwise source returns per-sample
//! log ratios of counts. The k-NN source works on one normalised table
//! aligned for the whole measure.

use std::collections::HashMap;

use ndarray::{Array1, Array2};

use crate::data::alignment::{Aligned, Role, align, aligned_rows};
use crate::data::channel::{ChannelKind, ChannelSet};
use crate::error::{MorphError, Result};
use crate::estimators::approaches::discrete::discrete_utils::encode_rows;
use crate::estimators::approaches::discrete::distribution::{
    Distribution, Representation, estimate,
};
use crate::estimators::approaches::discrete::pointwise::{
    DiscreteConditionalMutualInformation, DiscreteEntropy, DiscreteMutualInformation,
};
use crate::estimators::traits::{ContinuousEstimator, EntropyEstimator, LocalValues};
use crate::measures::quantity::Quantity;

/// Primitives a measure formula is written against.
pub trait InformationSource {
    /// Human readable description of the estimation path, used in notices.
    fn context(&self) -> String;

    /// I(X;Y) between two groups of roles.
    fn mutual_information(&self, x: &[Role], y: &[Role]) -> Result<Quantity>;

    /// I(X;Y|Z) between groups of roles.
    fn conditional_mutual_information(
        &self,
        x: &[Role],
        y: &[Role],
        z: &[Role],
    ) -> Result<Quantity>;

    /// Empirical joint distribution over the roles, one axis per role.
    fn distribution(&self, roles: &[Role]) -> Result<Distribution> {
        let _ = roles;
        Err(unsupported("joint distributions", self.context()))
    }

    /// Number of discrete states of a channel after binning.
    fn states(&self, kind: ChannelKind) -> Result<usize> {
        let _ = kind;
        Err(unsupported("bin counts", self.context()))
    }
}

fn unsupported(what: &str, context: String) -> MorphError {
    MorphError::UnsupportedCombination {
        measure: what.to_string(),
        context,
    }
}

/// Channels relabelled as univariate codes, aligned on demand.
///
/// Every channel holds one column with the mixed-radix code of its binned
/// row, so a role's axis has as many states as its channel has bins.
#[derive(Debug, Clone)]
pub struct CodedTuples {
    codes: ChannelSet<usize>,
    states: HashMap<ChannelKind, usize>,
}

impl CodedTuples {
    /// Fails like [`align`] when `layout` cannot be aligned over `codes`.
    pub fn new(
        codes: ChannelSet<usize>,
        states: HashMap<ChannelKind, usize>,
        layout: &[Role],
    ) -> Result<Self> {
        aligned_rows(&codes, layout)?;
        for role in layout {
            let data = codes.get(role.channel())?;
            assert_eq!(data.ncols(), 1, "role {role} must hold a single code column");
            assert!(states.contains_key(&role.channel()), "no state count for role {role}");
        }
        Ok(Self { codes, states })
    }

    pub fn states(&self, kind: ChannelKind) -> Option<usize> {
        self.states.get(&kind).copied()
    }

    /// Axis sizes for a group of roles.
    pub fn shape(&self, roles: &[Role]) -> Vec<usize> {
        roles.iter().map(|r| self.states[&r.channel()]).collect()
    }

    /// Codes aligned over the lags of `roles` alone, one column per role.
    pub fn codes(&self, roles: &[Role]) -> Result<Array2<usize>> {
        Ok(align(&self.codes, roles)?.data)
    }

    /// One joint index per row for each group, all groups aligned together.
    pub fn joint_codes(&self, groups: &[&[Role]]) -> Result<Vec<Array1<u64>>> {
        let aligned = align(&self.codes, &concat(groups))?;
        groups
            .iter()
            .map(|group| encode_rows(&aligned.select(group), &self.shape(group)))
            .collect()
    }

    fn channel_states(&self, kind: ChannelKind, context: String) -> Result<usize> {
        self.states(kind).ok_or_else(|| unsupported("bin counts", context))
    }
}

fn concat(groups: &[&[Role]]) -> Vec<Role> {
    groups.iter().flat_map(|g| g.iter().copied()).collect()
}

fn axes(offset: usize, len: usize) -> Vec<usize> {
    (offset..offset + len).collect()
}

/// Trajectory averages from plug-in distributions.
pub struct DiscreteAverageSource<E> {
    tuples: CodedTuples,
    estimator: E,
    representation: Representation,
    max_dense_cells: u64,
}

impl<E: EntropyEstimator> DiscreteAverageSource<E> {
    pub fn new(
        tuples: CodedTuples,
        estimator: E,
        representation: Representation,
        max_dense_cells: u64,
    ) -> Self {
        Self {
            tuples,
            estimator,
            representation,
            max_dense_cells,
        }
    }
}

impl<E: EntropyEstimator> InformationSource for DiscreteAverageSource<E> {
    fn context(&self) -> String {
        match self.representation {
            Representation::Dense => "discrete mode".to_string(),
            Representation::Sparse => "discrete mode (sparse)".to_string(),
        }
    }

    fn mutual_information(&self, x: &[Role], y: &[Role]) -> Result<Quantity> {
        let dist = self.distribution(&concat(&[x, y]))?;
        let mi = self
            .estimator
            .mutual_information(&dist, &axes(0, x.len()), &axes(x.len(), y.len()));
        Ok(Quantity::Scalar(mi))
    }

    fn conditional_mutual_information(
        &self,
        x: &[Role],
        y: &[Role],
        z: &[Role],
    ) -> Result<Quantity> {
        let dist = self.distribution(&concat(&[x, y, z]))?;
        let cmi = self.estimator.conditional_mutual_information(
            &dist,
            &axes(0, x.len()),
            &axes(x.len(), y.len()),
            &axes(x.len() + y.len(), z.len()),
        );
        Ok(Quantity::Scalar(cmi))
    }

    fn distribution(&self, roles: &[Role]) -> Result<Distribution> {
        estimate(
            &self.tuples.codes(roles)?,
            &self.tuples.shape(roles),
            self.representation,
            self.max_dense_cells,
        )
    }

    fn states(&self, kind: ChannelKind) -> Result<usize> {
        self.tuples.channel_states(kind, self.context())
    }
}

/// Per-sample values from empirical counts, in bits.
pub struct DiscretePointwiseSource {
    tuples: CodedTuples,
}

impl DiscretePointwiseSource {
    pub fn new(tuples: CodedTuples) -> Self {
        Self { tuples }
    }
}

impl InformationSource for DiscretePointwiseSource {
    fn context(&self) -> String {
        "state-dependent discrete mode".to_string()
    }

    fn mutual_information(&self, x: &[Role], y: &[Role]) -> Result<Quantity> {
        let series = self.tuples.joint_codes(&[x, y])?;
        let mi = DiscreteMutualInformation::new(&series, DiscreteEntropy::new);
        Ok(Quantity::PerSample(mi.local_values()))
    }

    fn conditional_mutual_information(
        &self,
        x: &[Role],
        y: &[Role],
        z: &[Role],
    ) -> Result<Quantity> {
        let mut series = self.tuples.joint_codes(&[x, y, z])?;
        let cond = series.remove(2);
        let cmi = DiscreteConditionalMutualInformation::new(&series, &cond, DiscreteEntropy::new);
        Ok(Quantity::PerSample(cmi.local_values()))
    }

    fn states(&self, kind: ChannelKind) -> Result<usize> {
        self.tuples.channel_states(kind, self.context())
    }
}

/// Per-sample k-NN estimates over normalised continuous tuples, in nats.
pub struct KnnSource<C> {
    aligned: Aligned<f64>,
    estimator: C,
}

impl<C: ContinuousEstimator> KnnSource<C> {
    pub fn new(aligned: Aligned<f64>, estimator: C) -> Self {
        Self { aligned, estimator }
    }
}

impl<C: ContinuousEstimator> InformationSource for KnnSource<C> {
    fn context(&self) -> String {
        "continuous mode".to_string()
    }

    fn mutual_information(&self, x: &[Role], y: &[Role]) -> Result<Quantity> {
        let (x, y) = (self.aligned.select(x), self.aligned.select(y));
        let local = self.estimator.local_mutual_information(x.view(), y.view())?;
        Ok(Quantity::PerSample(local))
    }

    fn conditional_mutual_information(
        &self,
        x: &[Role],
        y: &[Role],
        z: &[Role],
    ) -> Result<Quantity> {
        let (x, y, z) = (
            self.aligned.select(x),
            self.aligned.select(y),
            self.aligned.select(z),
        );
        let local = self
            .estimator
            .local_conditional_mutual_information(x.view(), y.view(), z.view())?;
        Ok(Quantity::PerSample(local))
    }
}
