/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// One of the 32 general purpose registers.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Gpr {
    index: u8,
}

impl Gpr {
    /// Hardwired to zero.
    pub const ZERO: Self = Self::new(0);
    /// Receives the high word of `mul`/`mulu` and the remainder of `div`/`divu`.
    pub const R30: Self = Self::new(30);
    /// Link register written by `jal`.
    pub const LINK: Self = Self::new(31);

    #[must_use]
    pub const fn count() -> usize {
        32
    }

    /// Only the low 5 bits of `index` are used.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self {
            index: index & 0x1F,
        }
    }

    #[must_use]
    pub const fn as_index(&self) -> usize {
        self.index as usize
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.index == 0
    }
}

impl fmt::Display for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.index)
    }
}
