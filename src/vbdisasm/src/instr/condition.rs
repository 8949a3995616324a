/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// The 16 condition codes shared by `setf` and the `Bcond` branches.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Condition {
    V,
    C,
    Z,
    Nh,
    S,
    T,
    Lt,
    Le,
    Nv,
    Nc,
    Nz,
    H,
    Ns,
    F,
    Ge,
    Gt,
}

impl Condition {
    /// Only the low 4 bits of `value` are used.
    pub const fn from_bits(value: u8) -> Self {
        match value & 0xF {
            0x0 => Self::V,
            0x1 => Self::C,
            0x2 => Self::Z,
            0x3 => Self::Nh,
            0x4 => Self::S,
            0x5 => Self::T,
            0x6 => Self::Lt,
            0x7 => Self::Le,
            0x8 => Self::Nv,
            0x9 => Self::Nc,
            0xA => Self::Nz,
            0xB => Self::H,
            0xC => Self::Ns,
            0xD => Self::F,
            0xE => Self::Ge,
            _ => Self::Gt,
        }
    }

    /// Name used as a `setf` operand.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::V => "v",
            Self::C => "c",
            Self::Z => "z",
            Self::Nh => "nh",
            Self::S => "s",
            Self::T => "t",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Nv => "nv",
            Self::Nc => "nc",
            Self::Nz => "nz",
            Self::H => "h",
            Self::Ns => "ns",
            Self::F => "f",
            Self::Ge => "ge",
            Self::Gt => "gt",
        }
    }

    /// Mnemonic of the branch that uses this condition.
    ///
    /// A branch on the always-false condition never jumps, so it is spelled `nop`.
    pub const fn branch_mnemonic(&self) -> &'static str {
        match self {
            Self::V => "bv",
            Self::C => "bl",
            Self::Z => "be",
            Self::Nh => "bnh",
            Self::S => "bn",
            Self::T => "br",
            Self::Lt => "blt",
            Self::Le => "ble",
            Self::Nv => "bnv",
            Self::Nc => "bnl",
            Self::Nz => "bne",
            Self::H => "bh",
            Self::Ns => "bp",
            Self::F => "nop",
            Self::Ge => "bge",
            Self::Gt => "bgt",
        }
    }

    pub const fn is_never(&self) -> bool {
        matches!(self, Self::F)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
