/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::string::String;
use core::fmt;

use crate::{
    instr::{Gpr, Mnemonic},
    vip::AddressClassification,
};

/// The register holding the value being stored, and its value if it is known.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct SourceOperand {
    reg: Gpr,
    value: Option<u32>,
}

impl SourceOperand {
    pub const fn new(reg: Gpr, value: Option<u32>) -> Self {
        Self { reg, value }
    }

    pub const fn reg(&self) -> Gpr {
        self.reg
    }
    pub const fn value(&self) -> Option<u32> {
        self.value
    }
}

impl fmt::Display for SourceOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, " src={}(0x{:08X})", self.reg, value),
            None => write!(f, " src={}", self.reg),
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ScanHitKind {
    /// A halfword lane of the write lands in the VIP.
    Resolved {
        address: u32,
        classification: AddressClassification,
    },
    /// The effective address is known but none of the touched lanes passed the filters.
    NoVipTarget { raw_address: u32 },
    /// The base register value couldn't be determined.
    UnknownBase { base: Gpr },
}

/// A candidate VIP write site found by the scanner.
///
/// The `Display` implementation produces the scanner's line oriented output:
///
/// ```text
/// 07000010: st.h r7, 72[r6]                ; addr=0x0005E048 VIP Register SPT0 src=r7(0x000003FF)
/// 07000020: st.w r5, 0[r9]                 ; base r9 unknown
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ScanHit {
    pc: u32,
    mnemonic: Mnemonic,
    text: String,
    kind: ScanHitKind,
    src: Option<SourceOperand>,
}

impl ScanHit {
    pub(crate) const fn new(
        pc: u32,
        mnemonic: Mnemonic,
        text: String,
        kind: ScanHitKind,
        src: Option<SourceOperand>,
    ) -> Self {
        Self {
            pc,
            mnemonic,
            text,
            kind,
            src,
        }
    }

    pub const fn pc(&self) -> u32 {
        self.pc
    }
    pub const fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }
    /// The disassembled instruction.
    pub fn text(&self) -> &str {
        &self.text
    }
    pub const fn kind(&self) -> &ScanHitKind {
        &self.kind
    }
    pub const fn src(&self) -> Option<SourceOperand> {
        self.src
    }

    pub const fn classification(&self) -> Option<AddressClassification> {
        match self.kind {
            ScanHitKind::Resolved { classification, .. } => Some(classification),
            _ => None,
        }
    }
}

impl fmt::Display for ScanHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}: {:<30} ; ", self.pc, self.text)?;

        match self.kind {
            ScanHitKind::Resolved {
                address,
                classification,
            } => write!(f, "addr=0x{:08X} {}", address, classification)?,
            ScanHitKind::NoVipTarget { raw_address } => write!(
                f,
                "addr(raw)=0x{:08X} no VIP target after alignment",
                raw_address
            )?,
            ScanHitKind::UnknownBase { base } => return write!(f, "base {} unknown", base),
        }

        if let Some(src) = &self.src {
            write!(f, "{}", src)?;
        }
        Ok(())
    }
}
