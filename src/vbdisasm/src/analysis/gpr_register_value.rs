/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::{fmt, ops};

/// What is statically known about the contents of a register.
///
/// Every operation propagates [`Unknown`](GprRegisterValue::Unknown): combining anything with an
/// unknown value yields an unknown value. All arithmetic wraps at 32 bits.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum GprRegisterValue {
    Known(u32),
    #[default]
    Unknown,
}

impl GprRegisterValue {
    pub const fn known(&self) -> Option<u32> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Unknown => None,
        }
    }

    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(u32) -> u32,
    {
        match self {
            Self::Known(value) => Self::Known(f(value)),
            Self::Unknown => Self::Unknown,
        }
    }

    pub fn zip_with<F>(self, other: Self, f: F) -> Self
    where
        F: FnOnce(u32, u32) -> u32,
    {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => Self::Known(f(a, b)),
            _ => Self::Unknown,
        }
    }
}

impl GprRegisterValue {
    pub fn wrapping_add(self, rhs: Self) -> Self {
        self.zip_with(rhs, u32::wrapping_add)
    }

    pub fn wrapping_sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, u32::wrapping_sub)
    }

    /// Only the low 5 bits of `amount` are used.
    pub fn shl(self, amount: Self) -> Self {
        self.zip_with(amount, |value, amount| value << (amount & 0x1F))
    }

    /// Logical shift right. Only the low 5 bits of `amount` are used.
    pub fn shr(self, amount: Self) -> Self {
        self.zip_with(amount, |value, amount| value >> (amount & 0x1F))
    }

    /// Arithmetic shift right. Only the low 5 bits of `amount` are used.
    pub fn sar(self, amount: Self) -> Self {
        self.zip_with(amount, |value, amount| {
            ((value as i32) >> (amount & 0x1F)) as u32
        })
    }
}

impl From<u32> for GprRegisterValue {
    fn from(value: u32) -> Self {
        Self::Known(value)
    }
}

impl From<Option<u32>> for GprRegisterValue {
    fn from(value: Option<u32>) -> Self {
        match value {
            Some(value) => Self::Known(value),
            None => Self::Unknown,
        }
    }
}

impl ops::BitOr for GprRegisterValue {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a | b)
    }
}

impl ops::BitAnd for GprRegisterValue {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a & b)
    }
}

impl ops::BitXor for GprRegisterValue {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |a, b| a ^ b)
    }
}

impl ops::Not for GprRegisterValue {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.map(|a| !a)
    }
}

impl fmt::Display for GprRegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(value) => write!(f, "0x{:08X}", value),
            Self::Unknown => write!(f, "?"),
        }
    }
}
