// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Common N-D dataset utilities shared by the k-NN estimators

pub mod dataset;
