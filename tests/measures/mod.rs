// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tests for the measure catalogue and iterative scaling.
mod catalogue_tests;
mod synergy_tests;
