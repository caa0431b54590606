// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{MorphError, Result};

/// The three logical channels of an embodied agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    World,
    Sensor,
    Actuator,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] =
        [ChannelKind::World, ChannelKind::Sensor, ChannelKind::Actuator];

    pub fn symbol(self) -> &'static str {
        match self {
            ChannelKind::World => "W",
            ChannelKind::Sensor => "S",
            ChannelKind::Actuator => "A",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// World, sensor and actuator matrices for one trajectory (samples x dimensions).
///
/// Channels a measure does not use may be absent. `T` is `f64` for raw data
/// and `usize` once the channels have been discretised.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSet<T> {
    pub world: Option<Array2<T>>,
    pub sensor: Option<Array2<T>>,
    pub actuator: Option<Array2<T>>,
}

/// Raw continuous channels.
pub type Channels = ChannelSet<f64>;

impl<T> Default for ChannelSet<T> {
    fn default() -> Self {
        Self {
            world: None,
            sensor: None,
            actuator: None,
        }
    }
}

impl<T> ChannelSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_world(mut self, data: Array2<T>) -> Self {
        self.world = Some(data);
        self
    }

    pub fn with_sensor(mut self, data: Array2<T>) -> Self {
        self.sensor = Some(data);
        self
    }

    pub fn with_actuator(mut self, data: Array2<T>) -> Self {
        self.actuator = Some(data);
        self
    }

    pub fn set(&mut self, kind: ChannelKind, data: Array2<T>) {
        match kind {
            ChannelKind::World => self.world = Some(data),
            ChannelKind::Sensor => self.sensor = Some(data),
            ChannelKind::Actuator => self.actuator = Some(data),
        }
    }

    pub fn slot(&self, kind: ChannelKind) -> Option<&Array2<T>> {
        match kind {
            ChannelKind::World => self.world.as_ref(),
            ChannelKind::Sensor => self.sensor.as_ref(),
            ChannelKind::Actuator => self.actuator.as_ref(),
        }
    }

    /// Borrow a channel, failing when it is absent or has no samples.
    pub fn get(&self, kind: ChannelKind) -> Result<&Array2<T>> {
        match self.slot(kind) {
            Some(data) if data.nrows() > 0 && data.ncols() > 0 => Ok(data),
            _ => Err(MorphError::MissingChannel(kind)),
        }
    }

    /// Check that every listed channel is present and nonempty.
    pub fn require(&self, kinds: &[ChannelKind]) -> Result<()> {
        for &kind in kinds {
            self.get(kind)?;
        }
        Ok(())
    }
}

impl<T: Clone> ChannelSet<T> {
    /// Split one combined table into channels by column index lists.
    ///
    /// An empty index list leaves the channel absent.
    pub fn from_table(
        table: &Array2<T>,
        world: &[usize],
        sensor: &[usize],
        actuator: &[usize],
    ) -> Result<Self> {
        let mut set = Self::default();
        for (kind, columns) in [
            (ChannelKind::World, world),
            (ChannelKind::Sensor, sensor),
            (ChannelKind::Actuator, actuator),
        ] {
            if columns.is_empty() {
                continue;
            }
            if let Some(&column) = columns.iter().find(|&&c| c >= table.ncols()) {
                return Err(MorphError::ColumnOutOfRange {
                    column,
                    columns: table.ncols(),
                });
            }
            set.set(kind, table.select(Axis(1), columns));
        }
        Ok(set)
    }
}
