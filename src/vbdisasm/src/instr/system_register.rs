/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// System register operand of `ldsr` and `stsr`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SystemRegister {
    index: u8,
}

impl SystemRegister {
    pub const fn new(index: u8) -> Self {
        Self {
            index: index & 0x1F,
        }
    }

    pub const fn index(&self) -> u8 {
        self.index
    }

    pub const fn name(&self) -> Option<&'static str> {
        match self.index {
            0 => Some("EIPC"),
            1 => Some("EIPSW"),
            2 => Some("FEPC"),
            3 => Some("FEPSW"),
            4 => Some("ECR"),
            5 => Some("PSW"),
            6 => Some("PIR"),
            7 => Some("TKCW"),
            24 => Some("CHCW"),
            25 => Some("ADDTRE"),
            _ => None,
        }
    }
}

impl fmt::Display for SystemRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "sr{}", self.index),
        }
    }
}
