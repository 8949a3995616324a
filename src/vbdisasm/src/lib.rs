/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

#![no_std]

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

extern crate alloc;

pub mod analysis;
pub mod config;
pub mod disassembly;
pub mod instr;
pub mod reader;
pub mod report;
pub mod scanner;
pub mod vip;
