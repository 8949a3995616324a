/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod platform;
mod scan_settings;

pub use platform::{ADDRESS_MASK_27, DEFAULT_BASE, RESET_VECTOR_PC};
pub use scan_settings::{ScanFlags, ScanSettings};
