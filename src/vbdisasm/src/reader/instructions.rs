/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::iter::FusedIterator;

use crate::instr::{decode_instruction, DecodedInstruction};

use super::RomReader;

/// Linear decode over a ROM, one instruction after the other in increasing address order.
///
/// Created by [`RomReader::instructions`].
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    reader: RomReader<'a>,
    pc: u32,
    remaining: usize,
}

impl<'a> Instructions<'a> {
    pub(crate) const fn new(reader: RomReader<'a>, start_pc: u32, count: usize) -> Self {
        Self {
            reader,
            pc: start_pc,
            remaining: count,
        }
    }

    /// Address of the next instruction to be decoded.
    pub const fn pc(&self) -> u32 {
        self.pc
    }
}

impl Iterator for Instructions<'_> {
    type Item = DecodedInstruction;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let instr = decode_instruction(&self.reader, self.pc);
        self.pc = self.pc.wrapping_add(instr.byte_len());
        Some(instr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Instructions<'_> {}
impl FusedIterator for Instructions<'_> {}
