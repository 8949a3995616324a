/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::{error, fmt};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum RomReaderErrorKind {
    Empty,
    NotPowerOfTwo { size: usize },
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub struct RomReaderError {
    kind: RomReaderErrorKind,
}

impl RomReaderError {
    pub(crate) const fn new_empty() -> Self {
        Self {
            kind: RomReaderErrorKind::Empty,
        }
    }

    pub(crate) const fn new_not_power_of_two(size: usize) -> Self {
        Self {
            kind: RomReaderErrorKind::NotPowerOfTwo { size },
        }
    }

    pub const fn kind(&self) -> RomReaderErrorKind {
        self.kind
    }
}

impl fmt::Display for RomReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RomReaderErrorKind::Empty => write!(f, "ROM is empty"),
            RomReaderErrorKind::NotPowerOfTwo { size } => write!(
                f,
                "ROM size must be power-of-two for mirrored V810 addressing (got 0x{:X} bytes)",
                size
            ),
        }
    }
}
impl error::Error for RomReaderError {}
