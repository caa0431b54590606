// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel containers, time alignment and binning.

pub mod alignment;
pub mod channel;
pub mod discretise;

pub use alignment::{Aligned, Role, align, aligned_rows};
pub use channel::{ChannelKind, ChannelSet, Channels};
pub use discretise::{BinSpec, Domain, bin_count, discretise, normalise};
