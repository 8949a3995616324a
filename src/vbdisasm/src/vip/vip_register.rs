/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// A halfword register inside the VIP control window (`0x0005E000..0x0005E080`).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct VipRegister {
    offset: u8,
}

impl VipRegister {
    /// `offset` is relative to the start of the control window. The low bit is ignored.
    pub const fn new(offset: u8) -> Self {
        Self {
            offset: offset & 0xFE,
        }
    }

    pub const fn offset(&self) -> u8 {
        self.offset
    }

    pub const fn name(&self) -> Option<&'static str> {
        match self.offset {
            0x00 => Some("IPENDING (read)"),
            0x02 => Some("IENABLE"),
            0x04 => Some("IPENDING clear"),
            0x22 => Some("DPCTRL"),
            0x24 => Some("BRTA"),
            0x26 => Some("BRTB"),
            0x28 => Some("BRTC"),
            0x2A => Some("REST"),
            0x2E => Some("FRMCYC"),
            0x42 => Some("XPCTRL"),
            0x48 => Some("SPT0"),
            0x4A => Some("SPT1"),
            0x4C => Some("SPT2"),
            0x4E => Some("SPT3"),
            0x60 => Some("GPLT0"),
            0x62 => Some("GPLT1"),
            0x64 => Some("GPLT2"),
            0x66 => Some("GPLT3"),
            0x68 => Some("JPLT0"),
            0x6A => Some("JPLT1"),
            0x6C => Some("JPLT2"),
            0x6E => Some("JPLT3"),
            0x70 => Some("BKCOL"),
            _ => None,
        }
    }

    /// Display and drawing control, brightness, OBJ search tables, palettes and the background
    /// colour.
    pub const fn is_obj_bg_related(&self) -> bool {
        matches!(
            self.offset,
            0x22 | 0x24 | 0x26 | 0x28 | 0x2A | 0x2E | 0x42 | 0x48..=0x4E | 0x60..=0x6E | 0x70
        )
    }
}

impl fmt::Display for VipRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "offset 0x{:02X}", self.offset),
        }
    }
}
