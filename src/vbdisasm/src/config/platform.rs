/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

/// The V810 only decodes the low 27 bits of an address.
pub const ADDRESS_MASK_27: u32 = 0x07FF_FFFF;

/// Where the cartridge ROM is mapped.
pub const DEFAULT_BASE: u32 = 0x0700_0000;

pub const RESET_VECTOR_PC: u32 = 0x07FF_FFF0;
