/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

use crate::config::ADDRESS_MASK_27;

use super::{ObjField, VipRegister, WorldField, OAM_STRIDE, WORLD_STRIDE};

const VIP_REGISTERS_START: u32 = 0x0005_E000;
const VIP_REGISTERS_END: u32 = 0x0005_E080;

const VIP_DRAM_START: u32 = 0x0002_0000;
const VIP_DRAM_END: u32 = 0x0004_0000;

/// Offsets relative to the start of the DRAM window.
const WORLD_TABLE_START: u32 = 0x1D800;
const OAM_START: u32 = 0x1E000;
const OAM_END: u32 = 0x20000;

/// The hardware region an address belongs to.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum AddressClassification {
    VipRegister(VipRegister),
    /// `offset` is relative to the start of the World table.
    VipWorldTable {
        offset: u32,
    },
    /// `offset` is relative to the start of the OAM.
    VipOam {
        offset: u32,
    },
    /// Somewhere else in the VIP DRAM. `offset` is relative to the start of the DRAM window.
    VipDram {
        offset: u32,
    },
    /// Frame buffers and character tables.
    VipFrameBuffer {
        offset: u32,
    },
    /// Any other address of the VIP segment.
    VipSegment,
    Vsu,
    HwCtrl,
    Wram,
    CartRam,
    CartRom,
    Unmapped,
}

/// Classifies an absolute address. Only the low 27 bits are taken into account.
pub fn classify_address(address: u32) -> AddressClassification {
    let low = address & ADDRESS_MASK_27;
    let segment = low >> 24;

    match segment {
        0 => classify_vip(low),
        1 => AddressClassification::Vsu,
        2 => AddressClassification::HwCtrl,
        5 => AddressClassification::Wram,
        6 => AddressClassification::CartRam,
        7 => AddressClassification::CartRom,
        _ => AddressClassification::Unmapped,
    }
}

fn classify_vip(low: u32) -> AddressClassification {
    if (VIP_REGISTERS_START..VIP_REGISTERS_END).contains(&low) {
        return AddressClassification::VipRegister(VipRegister::new(
            (low - VIP_REGISTERS_START) as u8,
        ));
    }

    if (VIP_DRAM_START..VIP_DRAM_END).contains(&low) {
        let offset = low & 0x1FFFF;

        return if (WORLD_TABLE_START..OAM_START).contains(&offset) {
            AddressClassification::VipWorldTable {
                offset: offset - WORLD_TABLE_START,
            }
        } else if (OAM_START..OAM_END).contains(&offset) {
            AddressClassification::VipOam {
                offset: offset - OAM_START,
            }
        } else {
            AddressClassification::VipDram { offset }
        };
    }

    if low < VIP_DRAM_START {
        return AddressClassification::VipFrameBuffer { offset: low };
    }

    AddressClassification::VipSegment
}

impl AddressClassification {
    pub const fn is_vip(&self) -> bool {
        matches!(
            self,
            Self::VipRegister(_)
                | Self::VipWorldTable { .. }
                | Self::VipOam { .. }
                | Self::VipDram { .. }
                | Self::VipFrameBuffer { .. }
                | Self::VipSegment
        )
    }

    /// OAM and World table entries, plus the registers that control OBJ and BG rendering.
    pub const fn is_obj_bg_related(&self) -> bool {
        match self {
            Self::VipWorldTable { .. } | Self::VipOam { .. } => true,
            Self::VipRegister(reg) => reg.is_obj_bg_related(),
            _ => false,
        }
    }

    pub const fn register(&self) -> Option<VipRegister> {
        match self {
            Self::VipRegister(reg) => Some(*reg),
            _ => None,
        }
    }

    /// World number or OBJ number.
    pub const fn record_index(&self) -> Option<u32> {
        match self {
            Self::VipWorldTable { offset } => Some(*offset / WORLD_STRIDE),
            Self::VipOam { offset } => Some(*offset / OAM_STRIDE),
            _ => None,
        }
    }

    /// Byte offset inside the World or OBJ record.
    pub const fn record_byte(&self) -> Option<u32> {
        match self {
            Self::VipWorldTable { offset } => Some(*offset % WORLD_STRIDE),
            Self::VipOam { offset } => Some(*offset % OAM_STRIDE),
            _ => None,
        }
    }

    /// Halfword index inside the World or OBJ record.
    pub const fn field_word(&self) -> Option<u32> {
        match self.record_byte() {
            Some(byte) => Some(byte / 2),
            None => None,
        }
    }

    /// Symbolic name of the record field, if the field has one.
    pub const fn field_name(&self) -> Option<&'static str> {
        match self {
            Self::VipWorldTable { offset } => WorldField::new((*offset % WORLD_STRIDE) / 2).name(),
            Self::VipOam { offset } => ObjField::new((*offset % OAM_STRIDE) / 2).name(),
            _ => None,
        }
    }
}

impl fmt::Display for AddressClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VipRegister(reg) => write!(f, "VIP Register {}", reg),
            Self::VipWorldTable { offset } => {
                let world = offset / WORLD_STRIDE;
                let word = (offset % WORLD_STRIDE) / 2;
                write!(
                    f,
                    "VIP DRAM World Table (+0x{:04X}) [world={} word={} {}]",
                    offset,
                    world,
                    word,
                    WorldField::new(word)
                )
            }
            Self::VipOam { offset } => {
                let obj = offset / OAM_STRIDE;
                let byte = offset % OAM_STRIDE;
                let word = byte / 2;
                write!(
                    f,
                    "VIP DRAM OAM (+0x{:04X}) [obj={} word={} byte={} {}]",
                    offset,
                    obj,
                    word,
                    byte,
                    ObjField::new(word)
                )
            }
            Self::VipDram { offset } => write!(f, "VIP DRAM (+0x{:05X})", offset),
            Self::VipFrameBuffer { offset } => write!(f, "VIP FB/CHR (+0x{:05X})", offset),
            Self::VipSegment => write!(f, "VIP segment"),
            Self::Vsu => write!(f, "VSU segment"),
            Self::HwCtrl => write!(f, "HWCTRL segment"),
            Self::Wram => write!(f, "WRAM segment"),
            Self::CartRam => write!(f, "Cart RAM segment"),
            Self::CartRom => write!(f, "Cart ROM segment"),
            Self::Unmapped => write!(f, "Unmapped"),
        }
    }
}
