/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// Sub-operation of the bit string opcode, taken from the low 5 bits of the instruction.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BitStringOp {
    value: u8,
}

impl BitStringOp {
    pub const fn new(value: u8) -> Self {
        Self {
            value: value & 0x1F,
        }
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    pub const fn name(&self) -> Option<&'static str> {
        match self.value {
            0x00 => Some("sch0bsu"),
            0x01 => Some("sch0bsd"),
            0x02 => Some("sch1bsu"),
            0x03 => Some("sch1bsd"),
            0x08 => Some("orbsu"),
            0x09 => Some("andbsu"),
            0x0A => Some("xorbsu"),
            0x0B => Some("movbsu"),
            0x0C => Some("ornbsu"),
            0x0D => Some("andnbsu"),
            0x0E => Some("xornbsu"),
            0x0F => Some("notbsu"),
            _ => None,
        }
    }
}

impl fmt::Display for BitStringOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "bstr_{:02x}", self.value),
        }
    }
}

/// Sub-operation of the floating point / Nintendo extension opcode, taken from the top 6 bits of
/// the second halfword.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FloatOp {
    value: u8,
}

impl FloatOp {
    pub const fn new(value: u8) -> Self {
        Self {
            value: value & 0x3F,
        }
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    pub const fn name(&self) -> Option<&'static str> {
        match self.value {
            0x00 => Some("cmpf.s"),
            0x02 => Some("cvt.ws"),
            0x03 => Some("cvt.sw"),
            0x04 => Some("addf.s"),
            0x05 => Some("subf.s"),
            0x06 => Some("mulf.s"),
            0x07 => Some("divf.s"),
            0x08 => Some("xb"),
            0x09 => Some("xh"),
            0x0A => Some("rev"),
            0x0B => Some("trnc.sw"),
            0x0C => Some("mpyhw"),
            _ => None,
        }
    }

    /// `xb` and `xh` swap bytes or halfwords in place and only take a single register.
    pub const fn is_single_register(&self) -> bool {
        matches!(self.value, 0x08 | 0x09)
    }
}

impl fmt::Display for FloatOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "fpp_{:02x}", self.value),
        }
    }
}
