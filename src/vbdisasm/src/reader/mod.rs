/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod instructions;
mod rom_reader;
mod rom_reader_error;

pub use instructions::Instructions;
pub use rom_reader::RomReader;
pub use rom_reader_error::{RomReaderError, RomReaderErrorKind};
