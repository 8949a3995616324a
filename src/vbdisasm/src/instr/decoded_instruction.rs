/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::{format, string::String};
use core::fmt;

use super::{Gpr, InstructionFamily, MemWrite, Mnemonic};

/// A single decoded V810 instruction.
///
/// Instances are produced by [`decode_instruction`](super::decode_instruction) and never modified
/// afterwards.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct DecodedInstruction {
    pc: u32,
    word0: u16,
    word1: Option<u16>,
    mnemonic: Mnemonic,
    operands: String,
    target: Option<u32>,
    mem_write: Option<MemWrite>,
}

impl DecodedInstruction {
    pub(crate) fn new(
        pc: u32,
        word0: u16,
        word1: Option<u16>,
        mnemonic: Mnemonic,
        operands: String,
        target: Option<u32>,
        mem_write: Option<MemWrite>,
    ) -> Self {
        debug_assert_eq!(mnemonic.write_kind().is_some(), mem_write.is_some());

        Self {
            pc,
            word0,
            word1,
            mnemonic,
            operands,
            target,
            mem_write,
        }
    }
}

impl DecodedInstruction {
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Either 2 or 4, depending on whether a second halfword was needed.
    pub const fn byte_len(&self) -> u32 {
        if self.word1.is_some() {
            4
        } else {
            2
        }
    }

    pub const fn word0(&self) -> u16 {
        self.word0
    }
    pub const fn word1(&self) -> Option<u16> {
        self.word1
    }

    /// The top 7 bits of the first halfword.
    pub const fn opcode(&self) -> u8 {
        ((self.word0 >> 9) & 0x7F) as u8
    }

    /// Register field in bits 0-4.
    pub const fn reg1(&self) -> Gpr {
        Gpr::new((self.word0 & 0x1F) as u8)
    }
    /// Register field in bits 5-9.
    pub const fn reg2(&self) -> Gpr {
        Gpr::new(((self.word0 >> 5) & 0x1F) as u8)
    }

    pub const fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }
    pub const fn family(&self) -> InstructionFamily {
        self.mnemonic.family()
    }

    pub fn operands(&self) -> &str {
        &self.operands
    }

    /// Absolute destination of a branch or jump, if it has a static one.
    pub const fn target(&self) -> Option<u32> {
        self.target
    }

    pub const fn mem_write(&self) -> Option<&MemWrite> {
        self.mem_write.as_ref()
    }

    /// Mnemonic followed by its operands, if any.
    pub fn text(&self) -> InstructionText<'_> {
        InstructionText { instr: self }
    }
}

/// `Display`s an instruction as `mnemonic operands`.
#[derive(Debug, Clone, Copy)]
pub struct InstructionText<'a> {
    instr: &'a DecodedInstruction,
}

impl fmt::Display for InstructionText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if self.instr.operands.is_empty() {
            format!("{}", self.instr.mnemonic)
        } else {
            format!("{} {}", self.instr.mnemonic, self.instr.operands)
        };

        // `pad` honors `{:<30}` and friends.
        f.pad(&text)
    }
}
