/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

use super::{BitStringOp, Condition, FloatOp, WriteKind};

/// Broad operand-encoding family of an instruction.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum InstructionFamily {
    /// Opcodes `0x00..=0x0F`: two register operands.
    RegisterRegister,
    /// Opcodes `0x10..=0x1E`: a 5-bit immediate (or nothing) plus a register.
    RegisterImmediate,
    /// `ldsr` and `stsr`.
    SystemRegister,
    BitString,
    /// `Bcond` with a 9-bit displacement.
    Branch,
    /// `jr` and `jal` with a 26-bit displacement.
    Jump,
    /// 16-bit immediate ALU and move operations.
    ImmediateExtended,
    /// Loads, port inputs and `caxi`.
    Load,
    /// Stores and port outputs.
    Store,
    /// Floating point and Nintendo specific bit manipulation.
    FloatingPoint,
    Invalid,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mnemonic {
    // Register-register
    Mov,
    Add,
    Sub,
    Cmp,
    Shl,
    Shr,
    Jmp,
    Sar,
    Mul,
    Div,
    Mulu,
    Divu,
    Or,
    And,
    Xor,
    Not,

    // Register-immediate
    MovImm,
    AddImm,
    Setf,
    CmpImm,
    ShlImm,
    ShrImm,
    Ei,
    SarImm,
    Trap,
    Reti,
    Halt,
    Di,

    Ldsr,
    Stsr,

    BitString(BitStringOp),

    Branch(Condition),

    Jr,
    Jal,

    Movea,
    Addi,
    Ori,
    Andi,
    Xori,
    Movhi,

    LdB,
    LdH,
    LdW,
    InB,
    InH,
    Caxi,
    InW,

    StB,
    StH,
    StW,
    OutB,
    OutH,
    OutW,

    Float(FloatOp),

    /// A halfword that doesn't decode to any known instruction.
    Hword,
}

impl Mnemonic {
    pub const fn family(&self) -> InstructionFamily {
        match self {
            Self::Mov
            | Self::Add
            | Self::Sub
            | Self::Cmp
            | Self::Shl
            | Self::Shr
            | Self::Jmp
            | Self::Sar
            | Self::Mul
            | Self::Div
            | Self::Mulu
            | Self::Divu
            | Self::Or
            | Self::And
            | Self::Xor
            | Self::Not => InstructionFamily::RegisterRegister,

            Self::MovImm
            | Self::AddImm
            | Self::Setf
            | Self::CmpImm
            | Self::ShlImm
            | Self::ShrImm
            | Self::Ei
            | Self::SarImm
            | Self::Trap
            | Self::Reti
            | Self::Halt
            | Self::Di => InstructionFamily::RegisterImmediate,

            Self::Ldsr | Self::Stsr => InstructionFamily::SystemRegister,
            Self::BitString(_) => InstructionFamily::BitString,
            Self::Branch(_) => InstructionFamily::Branch,
            Self::Jr | Self::Jal => InstructionFamily::Jump,

            Self::Movea | Self::Addi | Self::Ori | Self::Andi | Self::Xori | Self::Movhi => {
                InstructionFamily::ImmediateExtended
            }

            Self::LdB | Self::LdH | Self::LdW | Self::InB | Self::InH | Self::Caxi | Self::InW => {
                InstructionFamily::Load
            }

            Self::StB | Self::StH | Self::StW | Self::OutB | Self::OutH | Self::OutW => {
                InstructionFamily::Store
            }

            Self::Float(_) => InstructionFamily::FloatingPoint,
            Self::Hword => InstructionFamily::Invalid,
        }
    }

    /// The kind of memory write performed by this instruction, if any.
    pub const fn write_kind(&self) -> Option<WriteKind> {
        match self {
            Self::StB => Some(WriteKind::StB),
            Self::StH => Some(WriteKind::StH),
            Self::StW => Some(WriteKind::StW),
            Self::OutB => Some(WriteKind::OutB),
            Self::OutH => Some(WriteKind::OutH),
            Self::OutW => Some(WriteKind::OutW),
            Self::Caxi => Some(WriteKind::Caxi),
            _ => None,
        }
    }

    /// The name of the mnemonic, if it doesn't depend on a sub-operation table.
    pub const fn fixed_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Mov | Self::MovImm => "mov",
            Self::Add | Self::AddImm => "add",
            Self::Sub => "sub",
            Self::Cmp | Self::CmpImm => "cmp",
            Self::Shl | Self::ShlImm => "shl",
            Self::Shr | Self::ShrImm => "shr",
            Self::Jmp => "jmp",
            Self::Sar | Self::SarImm => "sar",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Mulu => "mulu",
            Self::Divu => "divu",
            Self::Or => "or",
            Self::And => "and",
            Self::Xor => "xor",
            Self::Not => "not",
            Self::Setf => "setf",
            Self::Ei => "ei",
            Self::Trap => "trap",
            Self::Reti => "reti",
            Self::Halt => "halt",
            Self::Di => "di",
            Self::Ldsr => "ldsr",
            Self::Stsr => "stsr",
            Self::Branch(cond) => cond.branch_mnemonic(),
            Self::Jr => "jr",
            Self::Jal => "jal",
            Self::Movea => "movea",
            Self::Addi => "addi",
            Self::Ori => "ori",
            Self::Andi => "andi",
            Self::Xori => "xori",
            Self::Movhi => "movhi",
            Self::LdB => "ld.b",
            Self::LdH => "ld.h",
            Self::LdW => "ld.w",
            Self::InB => "in.b",
            Self::InH => "in.h",
            Self::Caxi => "caxi",
            Self::InW => "in.w",
            Self::StB => "st.b",
            Self::StH => "st.h",
            Self::StW => "st.w",
            Self::OutB => "out.b",
            Self::OutH => "out.h",
            Self::OutW => "out.w",
            Self::Hword => ".hword",
            Self::BitString(_) | Self::Float(_) => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BitString(op) => write!(f, "{}", op),
            Self::Float(op) => write!(f, "{}", op),
            _ => match self.fixed_name() {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "{:?}", self),
            },
        }
    }
}
