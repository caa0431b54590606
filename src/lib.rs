// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # morphcomp
//!
//! Information-theoretic measures of morphological computation: how much of
//! the predictability of an embodied system's next world state comes from
//! its own state rather than from its controller's actions.
//!
//! ## Quick Start
//!
//! ```rust
//! use morphcomp::config::{Config, Mode};
//! use morphcomp::data::Channels;
//! use morphcomp::pipeline::Dispatcher;
//! use ndarray::array;
//!
//! let channels = Channels::new()
//!     .with_world(array![[0.0, 1.0], [1.0, 0.0], [0.0, 0.0], [1.0, 1.0]])
//!     .with_actuator(array![[0.0], [1.0], [0.0], [1.0]]);
//!
//! let config = Config::new("W").with_mode(Mode::Continuous).with_k(1);
//! let result = Dispatcher::default().run(&config, &channels).unwrap();
//! assert!((result.value.mean() - 2.0 / 3.0).abs() < 1e-4);
//! ```
//!
//! ## Measures
//!
//! | Measure | Definition | Discrete | State-dependent | Continuous |
//! |---------|------------|----------|-----------------|------------|
//! | W | I(W';W\|A) | ✅ | ✅ | ✅ |
//! | A | I(W';A\|W) | ✅ | ✅ | ✅ |
//! | A_Prime | 1 - A / log2\|W\| | ✅ | ✅ | ❌ |
//! | CW | I(W;W') - I(A;W') | ✅ | ✅ | ✅ |
//! | WA | I(W';W\|A) - I(W';A) | ✅ | ✅ | ✅ |
//! | WS | I(W';W\|S) - I(W';S) | ✅ | ✅ | ✅ |
//! | MI | I(W';W) - I(A;S) | ✅ | ✅ | ✅ |
//! | IN | log2\|A\| - I(A;S) | ✅ | ✅ | ❌ |
//! | CA | intrinsic causal contribution | ✅ | ❌ | ❌ |
//! | SY, SY_NID | synergy by iterative scaling | ✅ | ❌ | ❌ |
//! | Wp | W - SY | ✅ | ❌ | ❌ |
//! | UI, CI | | ❌ | ❌ | ❌ |
//!
//! ❌ combinations yield a placeholder value of -1 with a notice.
//! Discrete values are in bits, continuous values in nats.
//!
//! ## Architecture
//!
//! 1. **Data** ([`data`]): channels, equal-width binning and lagged alignment
//! 2. **Estimators** ([`estimators`]): dense and sparse joint distributions,
//!    the plug-in estimator, per-sample counts and k-NN estimators
//! 3. **Measures** ([`measures`]): a registry of formulas over an
//!    information source, the intrinsic causal measure and iterative scaling
//! 4. **Pipeline** ([`pipeline`]): mode selection and result aggregation
//!
//! The crate emits `tracing` events and installs no subscriber.

pub mod config;
pub mod data;
pub mod error;
pub mod estimators;
pub mod measures;
pub mod pipeline;

pub use config::Config;
pub use error::{MorphError, Result};
pub use pipeline::{Dispatcher, MeasureResult};
