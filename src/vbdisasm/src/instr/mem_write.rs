/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

use super::Gpr;

/// Width and flavour of a memory write.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum WriteKind {
    StB,
    StH,
    StW,
    OutB,
    OutH,
    OutW,
    /// `caxi` may replace the addressed word.
    Caxi,
}

impl WriteKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StB => "st.b",
            Self::StH => "st.h",
            Self::StW => "st.w",
            Self::OutB => "out.b",
            Self::OutH => "out.h",
            Self::OutW => "out.w",
            Self::Caxi => "caxi",
        }
    }

    /// Size in bytes of the written value.
    pub const fn width(&self) -> u32 {
        match self {
            Self::StB | Self::OutB => 1,
            Self::StH | Self::OutH => 2,
            Self::StW | Self::OutW | Self::Caxi => 4,
        }
    }

    /// Halfword lanes touched by a write to `address`.
    ///
    /// The bus ignores the low address bits of halfword and word accesses. A word access touches
    /// both halfwords of the aligned word.
    pub const fn touched_addresses(&self, address: u32) -> TouchedAddresses {
        match self.width() {
            1 => TouchedAddresses::One(address),
            2 => TouchedAddresses::One(address & !1),
            _ => {
                let aligned = address & !3;
                TouchedAddresses::Two(aligned, aligned | 2)
            }
        }
    }
}

impl fmt::Display for WriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum TouchedAddresses {
    One(u32),
    Two(u32, u32),
}

impl IntoIterator for TouchedAddresses {
    type Item = u32;
    type IntoIter = core::iter::Flatten<core::array::IntoIter<Option<u32>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::One(a) => [Some(a), None],
            Self::Two(a, b) => [Some(a), Some(b)],
        }
        .into_iter()
        .flatten()
    }
}

/// Describes the memory location written by a store-like instruction.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct MemWrite {
    base: Gpr,
    disp: i32,
    kind: WriteKind,
    src: Option<Gpr>,
}

impl MemWrite {
    pub(crate) const fn new(base: Gpr, disp: i32, kind: WriteKind, src: Option<Gpr>) -> Self {
        Self {
            base,
            disp,
            kind,
            src,
        }
    }

    pub const fn base(&self) -> Gpr {
        self.base
    }
    pub const fn disp(&self) -> i32 {
        self.disp
    }
    pub const fn kind(&self) -> WriteKind {
        self.kind
    }
    /// The register holding the stored value. `caxi` has none.
    pub const fn src(&self) -> Option<Gpr> {
        self.src
    }

    /// Effective address for a given base register value.
    pub const fn effective_address(&self, base_value: u32) -> u32 {
        base_value.wrapping_add(self.disp as u32)
    }
}
