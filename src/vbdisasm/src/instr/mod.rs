/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod condition;
mod decoded_instruction;
mod decoder;
mod gpr;
mod mem_write;
mod mnemonic;
mod sub_ops;
mod system_register;

pub use condition::Condition;
pub use decoded_instruction::{DecodedInstruction, InstructionText};
pub use decoder::decode_instruction;
pub use gpr::Gpr;
pub use mem_write::{MemWrite, TouchedAddresses, WriteKind};
pub use mnemonic::{InstructionFamily, Mnemonic};
pub use sub_ops::{BitStringOp, FloatOp};
pub use system_register::SystemRegister;

pub(crate) const fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}
