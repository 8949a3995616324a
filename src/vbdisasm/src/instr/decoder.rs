/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::{format, string::String};

use crate::reader::RomReader;

use super::{
    sign_extend, BitStringOp, Condition, DecodedInstruction, FloatOp, Gpr, MemWrite, Mnemonic,
    SystemRegister,
};

/// Decodes the instruction at `pc`.
///
/// This never fails. Bit patterns that don't correspond to any instruction are decoded as a
/// `.hword` holding the raw halfword.
pub fn decode_instruction(reader: &RomReader, pc: u32) -> DecodedInstruction {
    Decoder::new(reader, pc).decode()
}

struct Decoder<'r, 'a> {
    reader: &'r RomReader<'a>,
    pc: u32,
    word0: u16,
    word1: Option<u16>,
}

impl<'r, 'a> Decoder<'r, 'a> {
    fn new(reader: &'r RomReader<'a>, pc: u32) -> Self {
        Self {
            reader,
            pc,
            word0: reader.read16(pc),
            word1: None,
        }
    }

    /// Fetches the second halfword the first time it is requested.
    fn ext_word(&mut self) -> u16 {
        if let Some(word1) = self.word1 {
            return word1;
        }

        let word1 = self.reader.read16(self.pc.wrapping_add(2));
        self.word1 = Some(word1);
        word1
    }

    const fn opcode(&self) -> u8 {
        ((self.word0 >> 9) & 0x7F) as u8
    }
    const fn arg_lo(&self) -> u8 {
        (self.word0 & 0x1F) as u8
    }
    const fn arg_hi(&self) -> u8 {
        ((self.word0 >> 5) & 0x1F) as u8
    }
    const fn reg1(&self) -> Gpr {
        Gpr::new(self.arg_lo())
    }
    const fn reg2(&self) -> Gpr {
        Gpr::new(self.arg_hi())
    }

    fn decode(mut self) -> DecodedInstruction {
        let opcode = self.opcode();

        let (mnemonic, operands, target) = match opcode {
            0x00..=0x0F => self.decode_reg_reg(opcode),
            0x10..=0x1A | 0x1E => self.decode_reg_imm(opcode),
            0x1C | 0x1D => self.decode_system_register(opcode),
            0x1F => self.decode_bit_string(),
            0x40..=0x4F => self.decode_branch(opcode),
            0x2A | 0x2B => self.decode_jump(opcode),
            0x28 | 0x29 | 0x2C..=0x2F => self.decode_imm_ext(opcode),
            0x30 | 0x31 | 0x33 | 0x38..=0x3B => self.decode_load(opcode),
            0x34 | 0x35 | 0x37 | 0x3C | 0x3D | 0x3F => self.decode_store(opcode),
            0x3E => self.decode_float(),
            _ => (Mnemonic::Hword, format!("0x{:04X}", self.word0), None),
        };

        let mem_write = mnemonic.write_kind().map(|kind| {
            let disp = sign_extend(self.ext_word().into(), 16);
            let src = if mnemonic == Mnemonic::Caxi {
                None
            } else {
                Some(self.reg2())
            };
            MemWrite::new(self.reg1(), disp, kind, src)
        });

        DecodedInstruction::new(
            self.pc,
            self.word0,
            self.word1,
            mnemonic,
            operands,
            target,
            mem_write,
        )
    }

    fn decode_reg_reg(&self, opcode: u8) -> (Mnemonic, String, Option<u32>) {
        let mnemonic = match opcode {
            0x00 => Mnemonic::Mov,
            0x01 => Mnemonic::Add,
            0x02 => Mnemonic::Sub,
            0x03 => Mnemonic::Cmp,
            0x04 => Mnemonic::Shl,
            0x05 => Mnemonic::Shr,
            0x06 => Mnemonic::Jmp,
            0x07 => Mnemonic::Sar,
            0x08 => Mnemonic::Mul,
            0x09 => Mnemonic::Div,
            0x0A => Mnemonic::Mulu,
            0x0B => Mnemonic::Divu,
            0x0C => Mnemonic::Or,
            0x0D => Mnemonic::And,
            0x0E => Mnemonic::Xor,
            _ => Mnemonic::Not,
        };

        let operands = if mnemonic == Mnemonic::Jmp {
            format!("[{}]", self.reg1())
        } else {
            format!("{}, {}", self.reg1(), self.reg2())
        };

        (mnemonic, operands, None)
    }

    fn decode_reg_imm(&self, opcode: u8) -> (Mnemonic, String, Option<u32>) {
        let imm5 = sign_extend(self.arg_lo().into(), 5);
        let count = self.arg_lo();
        let reg2 = self.reg2();

        let (mnemonic, operands) = match opcode {
            0x10 => (Mnemonic::MovImm, format!("{}, {}", imm5, reg2)),
            0x11 => (Mnemonic::AddImm, format!("{}, {}", imm5, reg2)),
            0x12 => {
                let cond = Condition::from_bits(self.arg_lo());
                (Mnemonic::Setf, format!("{}, {}", cond, reg2))
            }
            0x13 => (Mnemonic::CmpImm, format!("{}, {}", imm5, reg2)),
            0x14 => (Mnemonic::ShlImm, format!("{}, {}", count, reg2)),
            0x15 => (Mnemonic::ShrImm, format!("{}, {}", count, reg2)),
            0x16 => (Mnemonic::Ei, String::new()),
            0x17 => (Mnemonic::SarImm, format!("{}, {}", count, reg2)),
            0x18 => (Mnemonic::Trap, format!("{}", count)),
            0x19 => (Mnemonic::Reti, String::new()),
            0x1A => (Mnemonic::Halt, String::new()),
            0x1E => (Mnemonic::Di, String::new()),
            _ => (Mnemonic::Hword, format!("0x{:04X}", self.word0)),
        };

        (mnemonic, operands, None)
    }

    fn decode_system_register(&self, opcode: u8) -> (Mnemonic, String, Option<u32>) {
        let sr = SystemRegister::new(self.arg_lo());

        if opcode == 0x1C {
            (Mnemonic::Ldsr, format!("{}, {}", self.reg2(), sr), None)
        } else {
            (Mnemonic::Stsr, format!("{}, {}", sr, self.reg2()), None)
        }
    }

    fn decode_bit_string(&self) -> (Mnemonic, String, Option<u32>) {
        let op = BitStringOp::new(self.arg_lo());
        let operands = if self.arg_hi() != 0 {
            format!("0x{:x}", self.arg_hi())
        } else {
            String::new()
        };

        (Mnemonic::BitString(op), operands, None)
    }

    fn decode_branch(&self, opcode: u8) -> (Mnemonic, String, Option<u32>) {
        let cond = Condition::from_bits(opcode);

        if cond.is_never() {
            return (Mnemonic::Branch(cond), String::new(), None);
        }

        let disp = sign_extend(u32::from(self.word0 & 0x1FE), 9) & !1;
        let target = self.pc.wrapping_add(disp as u32);

        (
            Mnemonic::Branch(cond),
            format!("0x{:08X}", target),
            Some(target),
        )
    }

    fn decode_jump(&mut self, opcode: u8) -> (Mnemonic, String, Option<u32>) {
        let imm26 = (u32::from(self.word0 & 0x03FF) << 16) | u32::from(self.ext_word());
        let disp = sign_extend(imm26, 26) & !1;
        let target = self.pc.wrapping_add(disp as u32);

        let mnemonic = if opcode == 0x2A {
            Mnemonic::Jr
        } else {
            Mnemonic::Jal
        };

        (mnemonic, format!("0x{:08X}", target), Some(target))
    }

    fn decode_imm_ext(&mut self, opcode: u8) -> (Mnemonic, String, Option<u32>) {
        let imm16 = self.ext_word();
        let src = self.reg1();
        let dst = self.reg2();

        let (mnemonic, operands) = match opcode {
            0x28 | 0x29 => {
                let mnemonic = if opcode == 0x28 {
                    Mnemonic::Movea
                } else {
                    Mnemonic::Addi
                };
                let imm = sign_extend(imm16.into(), 16);
                (mnemonic, format!("{}, {}, {}", imm, src, dst))
            }
            _ => {
                let mnemonic = match opcode {
                    0x2C => Mnemonic::Ori,
                    0x2D => Mnemonic::Andi,
                    0x2E => Mnemonic::Xori,
                    _ => Mnemonic::Movhi,
                };
                (mnemonic, format!("0x{:04X}, {}, {}", imm16, src, dst))
            }
        };

        (mnemonic, operands, None)
    }

    fn decode_load(&mut self, opcode: u8) -> (Mnemonic, String, Option<u32>) {
        let disp = sign_extend(self.ext_word().into(), 16);

        let mnemonic = match opcode {
            0x30 => Mnemonic::LdB,
            0x31 => Mnemonic::LdH,
            0x33 => Mnemonic::LdW,
            0x38 => Mnemonic::InB,
            0x39 => Mnemonic::InH,
            0x3A => Mnemonic::Caxi,
            _ => Mnemonic::InW,
        };

        (
            mnemonic,
            format!("{}[{}], {}", disp, self.reg1(), self.reg2()),
            None,
        )
    }

    fn decode_store(&mut self, opcode: u8) -> (Mnemonic, String, Option<u32>) {
        let disp = sign_extend(self.ext_word().into(), 16);

        let mnemonic = match opcode {
            0x34 => Mnemonic::StB,
            0x35 => Mnemonic::StH,
            0x37 => Mnemonic::StW,
            0x3C => Mnemonic::OutB,
            0x3D => Mnemonic::OutH,
            _ => Mnemonic::OutW,
        };

        (
            mnemonic,
            format!("{}, {}[{}]", self.reg2(), disp, self.reg1()),
            None,
        )
    }

    fn decode_float(&mut self) -> (Mnemonic, String, Option<u32>) {
        let op = FloatOp::new((self.ext_word() >> 10) as u8);

        let operands = if op.is_single_register() {
            format!("{}", self.reg2())
        } else {
            format!("{}, {}", self.reg1(), self.reg2())
        };

        (Mnemonic::Float(op), operands, None)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    use pretty_assertions::assert_eq;

    use crate::instr::{InstructionFamily, WriteKind};

    fn decode_words(words: &[u16]) -> DecodedInstruction {
        let mut bytes = [0u8; 8];
        for (i, w) in words.iter().enumerate() {
            bytes[i * 2..i * 2 + 2].copy_from_slice(&w.to_le_bytes());
        }
        let reader = RomReader::new(&bytes, 0x0700_0000).unwrap();
        decode_instruction(&reader, 0x0700_0000)
    }

    fn encode(opcode: u16, reg2: u16, reg1: u16) -> u16 {
        (opcode << 9) | (reg2 << 5) | reg1
    }

    #[test]
    fn reg_reg_mov() {
        let instr = decode_words(&[0x0041]);

        assert_eq!(instr.mnemonic(), Mnemonic::Mov);
        assert_eq!(instr.text().to_string(), "mov r1, r2");
        assert_eq!(instr.byte_len(), 2);
        assert_eq!(instr.word1(), None);
        assert_eq!(instr.target(), None);
    }

    #[test]
    fn jmp_uses_brackets() {
        let instr = decode_words(&[encode(0x06, 0, 31)]);

        assert_eq!(instr.text().to_string(), "jmp [r31]");
    }

    #[test]
    fn branch_nop_alias() {
        let instr = decode_words(&[encode(0x4D, 0, 0)]);

        assert_eq!(instr.mnemonic(), Mnemonic::Branch(Condition::F));
        assert_eq!(instr.text().to_string(), "nop");
        assert_eq!(instr.operands(), "");
        assert_eq!(instr.target(), None);
    }

    #[test]
    fn branch_backwards() {
        // bne -4
        let instr = decode_words(&[(0x4A << 9) | 0x1FC]);

        assert_eq!(instr.target(), Some(0x06FF_FFFC));
        assert_eq!(instr.text().to_string(), "bne 0x06FFFFFC");
    }

    #[test]
    fn branch_displacement_is_even() {
        // br +0x11, the low bit is dropped
        let instr = decode_words(&[(0x45 << 9) | 0x011]);

        assert_eq!(instr.target(), Some(0x0700_0010));
    }

    #[test]
    fn jal_reads_extension_word() {
        // jal +0x12344
        let instr = decode_words(&[(0x2B << 9) | 0x0001, 0x2344]);

        assert_eq!(instr.mnemonic(), Mnemonic::Jal);
        assert_eq!(instr.byte_len(), 4);
        assert_eq!(instr.word1(), Some(0x2344));
        assert_eq!(instr.target(), Some(0x0701_2344));
    }

    #[test]
    fn jr_negative_displacement() {
        // jr -0x10
        let instr = decode_words(&[(0x2A << 9) | 0x03FF, 0xFFF0]);

        assert_eq!(instr.target(), Some(0x06FF_FFF0));
        assert_eq!(instr.text().to_string(), "jr 0x06FFFFF0");
    }

    #[test]
    fn imm5_operands() {
        assert_eq!(
            decode_words(&[encode(0x10, 3, 0x1F)]).text().to_string(),
            "mov -1, r3"
        );
        assert_eq!(
            decode_words(&[encode(0x14, 3, 0x1F)]).text().to_string(),
            "shl 31, r3"
        );
        assert_eq!(
            decode_words(&[encode(0x12, 4, 0x02)]).text().to_string(),
            "setf z, r4"
        );
        assert_eq!(
            decode_words(&[encode(0x18, 0, 0x05)]).text().to_string(),
            "trap 5"
        );
    }

    #[test]
    fn zero_operand_control() {
        for (opcode, text) in [(0x16, "ei"), (0x19, "reti"), (0x1A, "halt"), (0x1E, "di")] {
            let instr = decode_words(&[encode(opcode, 0, 0)]);

            assert_eq!(instr.text().to_string(), text);
            assert_eq!(instr.family(), InstructionFamily::RegisterImmediate);
        }
    }

    #[test]
    fn system_registers() {
        assert_eq!(
            decode_words(&[encode(0x1C, 7, 5)]).text().to_string(),
            "ldsr r7, PSW"
        );
        assert_eq!(
            decode_words(&[encode(0x1D, 7, 24)]).text().to_string(),
            "stsr CHCW, r7"
        );
        assert_eq!(
            decode_words(&[encode(0x1D, 7, 13)]).text().to_string(),
            "stsr sr13, r7"
        );
    }

    #[test]
    fn bit_string_ops() {
        assert_eq!(
            decode_words(&[encode(0x1F, 0, 0x0B)]).text().to_string(),
            "movbsu"
        );
        assert_eq!(
            decode_words(&[encode(0x1F, 0x11, 0x05)]).text().to_string(),
            "bstr_05 0x11"
        );
    }

    #[test]
    fn imm_ext_operands() {
        let movhi = decode_words(&[encode(0x2F, 6, 0), 0x0006]);
        assert_eq!(movhi.text().to_string(), "movhi 0x0006, r0, r6");
        assert_eq!(movhi.byte_len(), 4);

        let movea = decode_words(&[encode(0x28, 6, 6), 0xE000]);
        assert_eq!(movea.text().to_string(), "movea -8192, r6, r6");
    }

    #[test]
    fn store_has_mem_write() {
        // st.w r5, 0x24[r6]
        let instr = decode_words(&[encode(0x37, 5, 6), 0x0024]);
        let write = instr.mem_write().copied().unwrap();

        assert_eq!(instr.text().to_string(), "st.w r5, 36[r6]");
        assert_eq!(write.base(), Gpr::new(6));
        assert_eq!(write.disp(), 0x24);
        assert_eq!(write.kind(), WriteKind::StW);
        assert_eq!(write.src(), Some(Gpr::new(5)));
    }

    #[test]
    fn caxi_is_a_write_without_source() {
        let instr = decode_words(&[encode(0x3A, 9, 4), 0xFFFE]);
        let write = instr.mem_write().copied().unwrap();

        assert_eq!(instr.text().to_string(), "caxi -2[r4], r9");
        assert_eq!(write.kind(), WriteKind::Caxi);
        assert_eq!(write.disp(), -2);
        assert_eq!(write.src(), None);
    }

    #[test]
    fn loads_are_not_writes() {
        let instr = decode_words(&[encode(0x33, 9, 4), 0x0010]);

        assert_eq!(instr.text().to_string(), "ld.w 16[r4], r9");
        assert!(instr.mem_write().is_none());
    }

    #[test]
    fn float_ops() {
        let xb = decode_words(&[encode(0x3E, 8, 3), 0x08 << 10]);
        assert_eq!(xb.text().to_string(), "xb r8");

        let addf = decode_words(&[encode(0x3E, 8, 3), 0x04 << 10]);
        assert_eq!(addf.text().to_string(), "addf.s r3, r8");

        let unknown = decode_words(&[encode(0x3E, 8, 3), 0x3F << 10]);
        assert_eq!(unknown.text().to_string(), "fpp_3f r3, r8");
        assert!(unknown.mem_write().is_none());
    }

    #[test]
    fn unknown_halfwords() {
        for opcode in [0x1B, 0x20, 0x27, 0x32, 0x36, 0x50, 0x7F] {
            let word = encode(opcode, 1, 2);
            let instr = decode_words(&[word]);

            assert_eq!(instr.mnemonic(), Mnemonic::Hword);
            assert_eq!(instr.operands(), format!("0x{:04X}", word));
            assert_eq!(instr.byte_len(), 2);
        }
    }

    #[test]
    fn decoding_is_total_and_deterministic() {
        let mut bytes = [0u8; 4];
        for word0 in 0..=u16::MAX {
            bytes[0..2].copy_from_slice(&word0.to_le_bytes());
            bytes[2..4].copy_from_slice(&0xA55Au16.to_le_bytes());
            let reader = RomReader::new(&bytes, 0).unwrap();

            let a = decode_instruction(&reader, 0);
            let b = decode_instruction(&reader, 0);

            assert!(a.byte_len() == 2 || a.byte_len() == 4);
            assert_eq!(a.byte_len() == 4, a.word1().is_some());
            assert_eq!(a.mem_write().is_some(), a.mnemonic().write_kind().is_some());
            assert_eq!(a, b);
        }
    }
}
