/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::vec::Vec;

use crate::instr::{decode_instruction, DecodedInstruction};

use super::{Instructions, RomReaderError};

/// Read-only view over a ROM image mirrored across the whole address space.
///
/// The cartridge bus repeats the ROM contents every `size` bytes, so any 32-bit address maps to
/// some byte of the image. This requires `size` to be a power of two.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct RomReader<'a> {
    data: &'a [u8],
    mask: u32,
    base: u32,
}

impl<'a> RomReader<'a> {
    pub fn new(data: &'a [u8], base: u32) -> Result<Self, RomReaderError> {
        let size = data.len();

        if size == 0 {
            return Err(RomReaderError::new_empty());
        }
        let mask = match u32::try_from(size - 1) {
            Ok(mask) if size.is_power_of_two() => mask,
            _ => return Err(RomReaderError::new_not_power_of_two(size)),
        };

        Ok(Self { data, mask, base })
    }
}

impl<'a> RomReader<'a> {
    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Little endian halfword at `pc`. Never fails, out of range addresses are mirrored.
    #[must_use]
    pub fn read16(&self, pc: u32) -> u16 {
        let off0 = pc.wrapping_sub(self.base) & self.mask;
        let off1 = off0.wrapping_add(1) & self.mask;

        u16::from_le_bytes([self.data[off0 as usize], self.data[off1 as usize]])
    }
}

impl<'a> RomReader<'a> {
    /// Lazily decodes `count` consecutive instructions starting at `start_pc`.
    pub fn instructions(&self, start_pc: u32, count: usize) -> Instructions<'a> {
        Instructions::new(*self, start_pc, count)
    }

    pub fn disassemble_range(&self, start_pc: u32, count: usize) -> Vec<DecodedInstruction> {
        self.instructions(start_pc, count).collect()
    }

    pub fn decode(&self, pc: u32) -> DecodedInstruction {
        decode_instruction(self, pc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::reader::RomReaderErrorKind;

    #[test]
    fn rejects_empty_rom() {
        let err = RomReader::new(&[], 0).unwrap_err();

        assert_eq!(err.kind(), RomReaderErrorKind::Empty);
    }

    #[test]
    fn rejects_non_power_of_two_rom() {
        let data = [0u8; 6];
        let err = RomReader::new(&data, 0).unwrap_err();

        assert_eq!(err.kind(), RomReaderErrorKind::NotPowerOfTwo { size: 6 });
    }

    #[test]
    fn reads_little_endian_relative_to_base() {
        let data = [0x41, 0x00, 0x34, 0x12];
        let reader = RomReader::new(&data, 0x0700_0000).unwrap();

        assert_eq!(reader.read16(0x0700_0000), 0x0041);
        assert_eq!(reader.read16(0x0700_0002), 0x1234);
    }

    #[test]
    fn read_wraps_around_the_end_of_the_rom() {
        let data = [0x11, 0x22, 0x33, 0x44];
        let reader = RomReader::new(&data, 0).unwrap();

        // Last byte plus the first one.
        assert_eq!(reader.read16(3), 0x1144);
    }

    #[test]
    fn read_is_periodic() {
        let data = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
        let base = 0x0700_0000;
        let reader = RomReader::new(&data, base).unwrap();
        let size = data.len() as u32;

        for pc in [0u32, 1, 5, 7, 0x0700_0003, 0xFFFF_FFFE, 0x07FF_FFF0] {
            assert_eq!(reader.read16(pc), reader.read16(pc.wrapping_add(size)));
        }
    }

    #[test]
    fn single_byte_rom_mirrors_itself() {
        let data = [0xA5];
        let reader = RomReader::new(&data, 0x0700_0000).unwrap();

        assert_eq!(reader.mask(), 0);
        assert_eq!(reader.read16(0x1234_5678), 0xA5A5);
    }
}
