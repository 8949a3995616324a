/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::vec::Vec;
use core::fmt;

use crate::instr::DecodedInstruction;

use super::{build_labels, LabelMap};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DisassemblyDisplaySettings {
    with_labels: bool,
}

impl DisassemblyDisplaySettings {
    pub const fn new() -> Self {
        Self { with_labels: true }
    }

    /// Emit `L_XXXXXXXX:` lines and annotate branches and jumps with the label they refer to.
    pub const fn with_labels(&self) -> bool {
        self.with_labels
    }
    pub fn with_labels_mut(&mut self) -> &mut bool {
        &mut self.with_labels
    }
    pub const fn with_with_labels(self, with_labels: bool) -> Self {
        Self { with_labels }
    }
}

impl Default for DisassemblyDisplaySettings {
    fn default() -> Self {
        Self::new()
    }
}

/// A linear listing of decoded instructions and the labels they reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    instrs: Vec<DecodedInstruction>,
    labels: LabelMap,
}

impl Disassembly {
    pub fn new(instrs: Vec<DecodedInstruction>) -> Self {
        let labels = build_labels(&instrs);

        Self { instrs, labels }
    }

    pub fn instructions(&self) -> &[DecodedInstruction] {
        &self.instrs
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn display<'dis, 'flg>(
        &'dis self,
        settings: &'flg DisassemblyDisplaySettings,
    ) -> DisassemblyDisplay<'dis, 'flg> {
        DisassemblyDisplay::new(self, settings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisassemblyDisplay<'dis, 'flg> {
    disassembly: &'dis Disassembly,
    settings: &'flg DisassemblyDisplaySettings,
}

impl<'dis, 'flg> DisassemblyDisplay<'dis, 'flg> {
    pub(crate) const fn new(
        disassembly: &'dis Disassembly,
        settings: &'flg DisassemblyDisplaySettings,
    ) -> Self {
        Self {
            disassembly,
            settings,
        }
    }
}

impl DisassemblyDisplay<'_, '_> {
    fn display_instruction(
        &self,
        f: &mut fmt::Formatter<'_>,
        instr: &DecodedInstruction,
    ) -> fmt::Result {
        let labels = self.disassembly.labels();

        if self.settings.with_labels() {
            if let Some(label) = labels.get(instr.pc()) {
                writeln!(f, "{}:", label)?;
            }
        }

        write!(f, "{:08X}: {} {}", instr.pc(), RawWords(instr), instr.text())?;

        if self.settings.with_labels() {
            if let Some(label) = instr.target().and_then(|target| labels.get(target)) {
                write!(f, " ; -> {}", label)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for DisassemblyDisplay<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instr) in self.disassembly.instructions().iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            self.display_instruction(f, instr)?;
        }

        Ok(())
    }
}

/// The halfwords an instruction was decoded from, padded to the width of two of them.
struct RawWords<'a>(&'a DecodedInstruction);

impl fmt::Display for RawWords<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.word1() {
            Some(word1) => write!(f, "{:04X} {:04X} ", self.0.word0(), word1),
            None => write!(f, "{:04X}      ", self.0.word0()),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    use pretty_assertions::assert_eq;

    use crate::reader::RomReader;

    #[rustfmt::skip]
    static BYTES: [u8; 16] = [
        0xC0, 0x5E, 0x06, 0x00, // movhi 0x0006, r0, r6
        0x06, 0x94,             // bne 0x0700000A
        0xC6, 0x50, 0x00, 0xE0, // movea -8192, r6, r6
        0x00, 0x00,             // mov r0, r0
        0xFE, 0x8B,             // br 0x0700000A
        0x00, 0x9A,             // nop
    ];

    #[test]
    fn labels_and_annotations() {
        let reader = RomReader::new(&BYTES, 0x0700_0000).unwrap();
        let disassembly = Disassembly::new(reader.disassemble_range(0x0700_0000, 6));

        let expected = "\
07000000: 5EC0 0006  movhi 0x0006, r0, r6
07000004: 9406       bne 0x0700000A ; -> L_0700000A
07000006: 50C6 E000  movea -8192, r6, r6
L_0700000A:
0700000A: 0000       mov r0, r0
0700000C: 8BFE       br 0x0700000A ; -> L_0700000A
0700000E: 9A00       nop";

        assert_eq!(
            disassembly
                .display(&DisassemblyDisplaySettings::new())
                .to_string(),
            expected
        );
    }

    #[test]
    fn without_labels() {
        let reader = RomReader::new(&BYTES, 0x0700_0000).unwrap();
        let disassembly = Disassembly::new(reader.disassemble_range(0x0700_0000, 3));
        let settings = DisassemblyDisplaySettings::new().with_with_labels(false);

        let expected = "\
07000000: 5EC0 0006  movhi 0x0006, r0, r6
07000004: 9406       bne 0x0700000A
07000006: 50C6 E000  movea -8192, r6, r6";

        assert_eq!(disassembly.display(&settings).to_string(), expected);
    }
}
