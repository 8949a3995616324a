/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use crate::instr::{sign_extend, DecodedInstruction, Gpr, InstructionFamily, Mnemonic};

use super::GprRegisterValue;

/// Forward constant propagation over the general purpose registers.
///
/// The tracker has no notion of control flow. Every instruction fed to [`apply`] is assumed to
/// execute right after the previous one, so values seen after a taken branch, or at a branch
/// target reached from elsewhere, may be wrong.
///
/// [`apply`]: RegisterTracker::apply
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegisterTracker {
    registers: [GprRegisterValue; Gpr::count()],
}

impl RegisterTracker {
    pub fn new() -> Self {
        let mut registers = [GprRegisterValue::Unknown; Gpr::count()];
        registers[Gpr::ZERO.as_index()] = GprRegisterValue::Known(0);

        Self { registers }
    }
}

impl Default for RegisterTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterTracker {
    pub fn get(&self, reg: Gpr) -> GprRegisterValue {
        self.registers[reg.as_index()]
    }

    pub fn value(&self, reg: Gpr) -> Option<u32> {
        self.get(reg).known()
    }

    /// Forgets everything except for `r0`.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn set(&mut self, reg: Gpr, value: GprRegisterValue) {
        if !reg.is_zero() {
            self.registers[reg.as_index()] = value;
        }
    }
}

impl RegisterTracker {
    /// Updates the tracked values with the effects of `instr`.
    pub fn apply(&mut self, instr: &DecodedInstruction) {
        let reg1 = instr.reg1();
        let reg2 = instr.reg2();
        let a = self.get(reg1);
        let b = self.get(reg2);
        let imm5 = instr.word0() & 0x1F;

        match instr.mnemonic() {
            Mnemonic::Mov => self.set(reg2, a),
            Mnemonic::Add => self.set(reg2, b.wrapping_add(a)),
            Mnemonic::Sub => self.set(reg2, b.wrapping_sub(a)),
            Mnemonic::Shl => self.set(reg2, b.shl(a)),
            Mnemonic::Shr => self.set(reg2, b.shr(a)),
            Mnemonic::Sar => self.set(reg2, b.sar(a)),
            Mnemonic::Or => self.set(reg2, a | b),
            Mnemonic::And => self.set(reg2, a & b),
            Mnemonic::Xor => self.set(reg2, a ^ b),
            Mnemonic::Not => self.set(reg2, !a),

            // The product's high word, or the remainder, goes to r30.
            Mnemonic::Mul | Mnemonic::Div | Mnemonic::Mulu | Mnemonic::Divu => {
                self.set(Gpr::R30, GprRegisterValue::Unknown);
                self.set(reg2, GprRegisterValue::Unknown);
            }

            Mnemonic::MovImm => {
                self.set(reg2, GprRegisterValue::Known(imm5_value(imm5)));
            }
            Mnemonic::AddImm => {
                self.set(reg2, b.wrapping_add(imm5_value(imm5).into()));
            }
            Mnemonic::ShlImm => self.set(reg2, b.shl(u32::from(imm5).into())),
            Mnemonic::ShrImm => self.set(reg2, b.shr(u32::from(imm5).into())),
            Mnemonic::SarImm => self.set(reg2, b.sar(u32::from(imm5).into())),

            Mnemonic::Stsr => self.set(reg2, GprRegisterValue::Unknown),

            Mnemonic::Jal => {
                self.set(Gpr::LINK, instr.pc().wrapping_add(4).into());
            }

            Mnemonic::Movea
            | Mnemonic::Addi
            | Mnemonic::Ori
            | Mnemonic::Andi
            | Mnemonic::Xori
            | Mnemonic::Movhi => {
                let Some(imm) = instr.word1() else {
                    return;
                };
                self.apply_imm_ext(instr.mnemonic(), imm, a, reg2);
            }

            _ => match instr.family() {
                InstructionFamily::Load | InstructionFamily::FloatingPoint => {
                    self.set(reg2, GprRegisterValue::Unknown);
                }
                _ => {}
            },
        }
    }

    fn apply_imm_ext(&mut self, mnemonic: Mnemonic, imm: u16, src: GprRegisterValue, dst: Gpr) {
        let imm = u32::from(imm);

        let value = match mnemonic {
            Mnemonic::Movea | Mnemonic::Addi => {
                src.wrapping_add((sign_extend(imm, 16) as u32).into())
            }
            Mnemonic::Ori => src | imm.into(),
            Mnemonic::Andi => src & imm.into(),
            Mnemonic::Xori => src ^ imm.into(),
            Mnemonic::Movhi => src.map(|v| v.wrapping_add(imm << 16)),
            _ => return,
        };

        self.set(dst, value);
    }
}

fn imm5_value(imm5: u16) -> u32 {
    sign_extend(u32::from(imm5), 5) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::reader::RomReader;

    const BASE: u32 = 0x0700_0000;

    fn encode(opcode: u16, reg2: u16, reg1: u16) -> u16 {
        (opcode << 9) | (reg2 << 5) | reg1
    }

    fn decode_words(pc: u32, words: &[u16]) -> DecodedInstruction {
        let mut bytes = [0u8; 4];
        for (i, w) in words.iter().enumerate() {
            bytes[i * 2..i * 2 + 2].copy_from_slice(&w.to_le_bytes());
        }
        let reader = RomReader::new(&bytes, pc).unwrap();
        reader.decode(pc)
    }

    fn run(tracker: &mut RegisterTracker, program: &[&[u16]]) {
        for words in program {
            tracker.apply(&decode_words(BASE, words));
        }
    }

    #[test]
    fn starts_with_only_r0_known() {
        let tracker = RegisterTracker::new();

        assert_eq!(tracker.value(Gpr::ZERO), Some(0));
        for i in 1..32 {
            assert_eq!(tracker.value(Gpr::new(i)), None);
        }
    }

    #[test]
    fn movhi_movea_pair() {
        let mut tracker = RegisterTracker::new();
        run(
            &mut tracker,
            &[
                &[encode(0x2F, 6, 0), 0x0006],  // movhi 0x0006, r0, r6
                &[encode(0x28, 6, 6), 0xE000],  // movea -0x2000, r6, r6
            ],
        );

        assert_eq!(tracker.value(Gpr::new(6)), Some(0x0005_E000));
    }

    #[test]
    fn imm_ext_combines() {
        let mut tracker = RegisterTracker::new();
        run(
            &mut tracker,
            &[
                &[encode(0x10, 1, 0x1F)],       // mov -1, r1
                &[encode(0x29, 2, 1), 0x8000],  // addi -0x8000, r1, r2
                &[encode(0x2C, 3, 1), 0x1234],  // ori 0x1234, r1, r3
                &[encode(0x2D, 4, 1), 0x1234],  // andi 0x1234, r1, r4
                &[encode(0x2E, 5, 1), 0x1234],  // xori 0x1234, r1, r5
            ],
        );

        assert_eq!(tracker.value(Gpr::new(2)), Some(0xFFFF_7FFF));
        assert_eq!(tracker.value(Gpr::new(3)), Some(0xFFFF_FFFF));
        assert_eq!(tracker.value(Gpr::new(4)), Some(0x0000_1234));
        assert_eq!(tracker.value(Gpr::new(5)), Some(0xFFFF_EDCB));
    }

    #[test]
    fn r0_stays_zero() {
        let mut tracker = RegisterTracker::new();
        run(
            &mut tracker,
            &[
                &[encode(0x10, 0, 0x05)],       // mov 5, r0
                &[encode(0x2F, 0, 0), 0x1234],  // movhi 0x1234, r0, r0
                &[encode(0x33, 0, 4), 0x0000],  // ld.w 0[r4], r0
                &[encode(0x0F, 0, 0)],          // not r0, r0
            ],
        );

        assert_eq!(tracker.value(Gpr::ZERO), Some(0));
    }

    #[test]
    fn r0_stays_zero_for_every_instruction() {
        let mut tracker = RegisterTracker::new();
        let mut bytes = [0u8; 4];

        for word0 in 0..=u16::MAX {
            bytes[0..2].copy_from_slice(&word0.to_le_bytes());
            bytes[2..4].copy_from_slice(&0xA55Au16.to_le_bytes());
            let reader = RomReader::new(&bytes, BASE).unwrap();

            tracker.apply(&reader.decode(BASE));

            assert_eq!(tracker.value(Gpr::ZERO), Some(0), "after 0x{:04X}", word0);
        }
    }

    #[test]
    fn clear_forgets_all_but_r0() {
        let mut tracker = RegisterTracker::new();
        run(
            &mut tracker,
            &[
                &[encode(0x10, 3, 0x02)],       // mov 2, r3
                &[encode(0x2F, 6, 0), 0x0006],  // movhi 0x0006, r0, r6
            ],
        );
        assert_eq!(tracker.value(Gpr::new(3)), Some(2));

        tracker.clear();

        assert_eq!(tracker, RegisterTracker::new());
        assert_eq!(tracker.value(Gpr::ZERO), Some(0));
        assert_eq!(tracker.value(Gpr::new(6)), None);
    }

    #[test]
    fn multiply_forgets_destination_and_r30() {
        let mut tracker = RegisterTracker::new();
        run(
            &mut tracker,
            &[
                &[encode(0x10, 3, 0x02)],  // mov 2, r3
                &[encode(0x10, 30, 0x01)], // mov 1, r30
                &[encode(0x10, 4, 0x03)],  // mov 3, r4
                &[encode(0x10, 5, 0x01)],  // mov 1, r5
                &[encode(0x08, 4, 3)],     // mul r3, r4
                &[encode(0x01, 5, 4)],     // add r4, r5
            ],
        );

        assert_eq!(tracker.value(Gpr::new(3)), Some(2));
        assert_eq!(tracker.value(Gpr::new(4)), None);
        assert_eq!(tracker.value(Gpr::R30), None);
        assert_eq!(tracker.value(Gpr::new(5)), None);
    }

    #[test]
    fn jal_sets_link_register() {
        let mut tracker = RegisterTracker::new();
        tracker.apply(&decode_words(0x0700_1000, &[(0x2B << 9), 0x0100]));

        assert_eq!(tracker.value(Gpr::LINK), Some(0x0700_1004));
    }

    #[test]
    fn loads_and_system_registers_are_unknown() {
        let mut tracker = RegisterTracker::new();
        run(
            &mut tracker,
            &[
                &[encode(0x10, 7, 0x01)],       // mov 1, r7
                &[encode(0x10, 8, 0x01)],       // mov 1, r8
                &[encode(0x10, 9, 0x01)],       // mov 1, r9
                &[encode(0x30, 7, 0), 0x0000],  // ld.b 0[r0], r7
                &[encode(0x1D, 8, 5)],          // stsr PSW, r8
                &[encode(0x3E, 9, 1), 0x0000],  // cmpf.s r1, r9
            ],
        );

        assert_eq!(tracker.value(Gpr::new(7)), None);
        assert_eq!(tracker.value(Gpr::new(8)), None);
        assert_eq!(tracker.value(Gpr::new(9)), None);
    }

    #[test]
    fn stores_and_branches_have_no_effect() {
        let mut tracker = RegisterTracker::new();
        run(&mut tracker, &[&[encode(0x10, 5, 0x07)]]); // mov 7, r5
        let before = tracker;
        run(
            &mut tracker,
            &[
                &[encode(0x37, 5, 6), 0x0000], // st.w r5, 0[r6]
                &[(0x45 << 9) | 0x010],        // br +0x10
                &[encode(0x13, 5, 0x01)],      // cmp 1, r5
                &[encode(0x12, 5, 0x02)],      // setf z, r5
            ],
        );

        assert_eq!(tracker, before);
    }

    #[test]
    fn order_matters() {
        // mov 4, r1
        let a: &[u16] = &[encode(0x10, 1, 0x04)];
        // mov r1, r2
        let b: &[u16] = &[encode(0x00, 2, 1)];

        let mut ab = RegisterTracker::new();
        run(&mut ab, &[a, b]);
        let mut ba = RegisterTracker::new();
        run(&mut ba, &[b, a]);

        assert_eq!(ab.value(Gpr::new(2)), Some(4));
        assert_eq!(ba.value(Gpr::new(2)), None);
        assert!(ab != ba);
    }

    #[test]
    fn shifts_by_immediate() {
        let mut tracker = RegisterTracker::new();
        run(
            &mut tracker,
            &[
                &[encode(0x10, 1, 0x10)], // mov -16, r1
                &[encode(0x10, 2, 0x10)], // mov -16, r2
                &[encode(0x15, 1, 0x1C)], // shr 28, r1
                &[encode(0x17, 2, 0x02)], // sar 2, r2
                &[encode(0x11, 2, 0x1F)], // add -1, r2
            ],
        );

        assert_eq!(tracker.value(Gpr::new(1)), Some(0xF));
        assert_eq!(tracker.value(Gpr::new(2)), Some(0xFFFF_FFFB));
    }
}
