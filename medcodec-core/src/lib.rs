// medcodec
// Copyright (c) 2026 The medcodec Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared error and I/O primitives used by the `medcodec-codec` crate and
//! the `medcodec` CLI.

pub mod errors;
pub mod io;
