// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::warn;

use crate::config::Config;
use crate::data::alignment::Role;
use crate::data::channel::ChannelKind;
use crate::error::{MorphError, Result};
use crate::measures::catalogue;
use crate::measures::quantity::Quantity;
use crate::measures::source::InformationSource;

/// Evaluates a measure against a prepared source.
pub type Formula = fn(&dyn InformationSource, &Config) -> Result<Quantity>;

/// A named measure: the lagged roles it needs and how to combine them.
#[derive(Debug, Clone, Copy)]
pub struct MeasureDefinition {
    pub name: &'static str,
    /// Alternative names accepted on lookup.
    pub aliases: &'static [&'static str],
    /// Roles the lagged tuples are built from, in axis order.
    pub layout: &'static [Role],
    pub description: &'static str,
    pub formula: Formula,
}

impl MeasureDefinition {
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }

    /// Channels the layout reads, without repetition.
    pub fn channels(&self) -> Vec<ChannelKind> {
        let mut out: Vec<ChannelKind> = Vec::new();
        for role in self.layout {
            if !out.contains(&role.channel()) {
                out.push(role.channel());
            }
        }
        out
    }
}

/// Name to definition lookup.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: Vec<MeasureDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full measure catalogue.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in catalogue::standard_measures() {
            registry.register(def);
        }
        registry
    }

    /// Add a measure, replacing any existing one with the same name.
    pub fn register(&mut self, def: MeasureDefinition) {
        match self.definitions.iter_mut().find(|d| d.name == def.name) {
            Some(slot) => *slot = def,
            None => self.definitions.push(def),
        }
    }

    pub fn lookup(&self, name: &str) -> Result<&MeasureDefinition> {
        self.definitions.iter().find(|d| d.matches(name)).ok_or_else(|| {
            warn!(measure = name, known = ?self.names().collect::<Vec<_>>(), "unknown measure");
            MorphError::UnknownMeasure(name.to_string())
        })
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.iter().map(|d| d.name)
    }
}
