// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::ops::Range;

use ndarray::{Array2, Axis};
use tracing::debug;

use crate::data::channel::{ChannelKind, ChannelSet};
use crate::error::{MorphError, Result};

/// A channel viewed at a fixed time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// World state one step ahead, `W'`.
    WorldNext,
    World,
    /// Sensor state one step ahead, `S'`.
    SensorNext,
    Sensor,
    Actuator,
}

impl Role {
    pub fn channel(self) -> ChannelKind {
        match self {
            Role::WorldNext | Role::World => ChannelKind::World,
            Role::SensorNext | Role::Sensor => ChannelKind::Sensor,
            Role::Actuator => ChannelKind::Actuator,
        }
    }

    pub fn shift(self) -> usize {
        match self {
            Role::WorldNext | Role::SensorNext => 1,
            _ => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::WorldNext => "W'",
            Role::World => "W",
            Role::SensorNext => "S'",
            Role::Sensor => "S",
            Role::Actuator => "A",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lagged joint samples: one row per aligned time step, roles side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct Aligned<T> {
    pub data: Array2<T>,
    pub roles: Vec<(Role, Range<usize>)>,
}

impl<T: Clone> Aligned<T> {
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    /// Column range occupied by a role, if it is part of the layout.
    pub fn columns(&self, role: Role) -> Option<Range<usize>> {
        self.roles
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, range)| range.clone())
    }

    /// Column indices of the given roles, concatenated in order.
    pub fn column_indices(&self, roles: &[Role]) -> Vec<usize> {
        roles
            .iter()
            .filter_map(|&role| self.columns(role))
            .flatten()
            .collect()
    }

    /// Copy of the columns belonging to the given roles.
    pub fn select(&self, roles: &[Role]) -> Array2<T> {
        self.data.select(Axis(1), &self.column_indices(roles))
    }
}

/// Number of lagged samples a role layout yields.
///
/// Fails when a channel of the layout is missing, when the channels disagree
/// on their sample count or when no sample survives the lag.
pub fn aligned_rows<T>(set: &ChannelSet<T>, layout: &[Role]) -> Result<usize> {
    let mut n = None;
    for &role in layout {
        let found = set.get(role.channel())?.nrows();
        match n {
            None => n = Some(found),
            Some(expected) if expected != found => {
                return Err(MorphError::SampleCountMismatch {
                    channel: role.channel(),
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
    }
    let n = n.unwrap_or(0);
    let lag = layout.iter().map(|r| r.shift()).max().unwrap_or(0);
    if n <= lag {
        return Err(MorphError::InsufficientSamples { samples: n, lag });
    }
    Ok(n - lag)
}

/// Build lagged joint samples for a role layout.
///
/// Row `t` holds, for every role, row `t + shift` of its channel. When any
/// role looks one step ahead the final sample has no successor and is
/// dropped, so the result has `n - 1` rows; otherwise all `n` rows remain.
pub fn align<T: Clone + Default>(set: &ChannelSet<T>, layout: &[Role]) -> Result<Aligned<T>> {
    let rows = aligned_rows(set, layout)?;
    let mut sources = Vec::with_capacity(layout.len());
    for &role in layout {
        sources.push((role, set.get(role.channel())?));
    }

    let mut roles = Vec::with_capacity(layout.len());
    let mut width = 0;
    for (role, data) in sources.iter() {
        roles.push((*role, width..width + data.ncols()));
        width += data.ncols();
    }

    let mut out = Array2::default((rows, width));
    for ((role, data), (_, range)) in sources.iter().zip(roles.iter()) {
        let shift = role.shift();
        for t in 0..rows {
            for (d, col) in range.clone().enumerate() {
                out[(t, col)] = data[(t + shift, d)].clone();
            }
        }
    }

    debug!(
        layout = ?layout.iter().map(|r| r.label()).collect::<Vec<_>>(),
        rows,
        width,
        "aligned lagged samples"
    );
    Ok(Aligned { data: out, roles })
}
