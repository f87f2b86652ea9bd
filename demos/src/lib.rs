// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demos for the nearline crates; see the `examples/` directory.
