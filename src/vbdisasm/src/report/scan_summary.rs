/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::{string::String, vec::Vec};
use core::fmt;

use super::Tally;

const NO_CANDIDATES: &str = "(no VIP write candidates found)";

/// Coarse grouping of the VIP classification of a scan line.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScanCategory {
    Register,
    WorldTable,
    Oam,
    FrameBuffer,
    DramOther,
    Other,
}

impl ScanCategory {
    pub fn from_classification(classification: &str) -> Self {
        if classification.starts_with("VIP Register ") {
            Self::Register
        } else if classification.starts_with("VIP DRAM World Table") {
            Self::WorldTable
        } else if classification.starts_with("VIP DRAM OAM") {
            Self::Oam
        } else if classification.starts_with("VIP FB/CHR") {
            Self::FrameBuffer
        } else if classification.starts_with("VIP DRAM") {
            Self::DramOther
        } else {
            Self::Other
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Register => "VIP Register",
            Self::WorldTable => "VIP DRAM World Table",
            Self::Oam => "VIP DRAM OAM",
            Self::FrameBuffer => "VIP FB/CHR",
            Self::DramOther => "VIP DRAM (other)",
            Self::Other => "VIP other",
        }
    }
}

impl fmt::Display for ScanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Counters built from the output of a `scan-vip` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    path: String,
    roms: Vec<String>,
    rom_counts: Tally,
    category_counts: Tally,
    mnemonic_counts: Tally,
    register_counts: Tally,
    world_field_counts: Tally,
    oam_field_counts: Tally,
}

impl ScanSummary {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.into(),
            roms: Vec::new(),
            rom_counts: Tally::new(),
            category_counts: Tally::new(),
            mnemonic_counts: Tally::new(),
            register_counts: Tally::new(),
            world_field_counts: Tally::new(),
            oam_field_counts: Tally::new(),
        }
    }

    /// Parses `text`, the output of a scan. `path` is only used to label the summary.
    ///
    /// Lines outside of a `== rom ==` section still count towards every counter except the
    /// per ROM one.
    pub fn parse(path: &str, text: &str) -> Self {
        let mut summary = Self::new(path);
        let mut rom = None;

        for line in text.lines() {
            if let Some(header) = parse_rom_header(line) {
                summary.roms.push(header.into());
                rom = Some(header);
                continue;
            }

            if line.is_empty() || line.starts_with(NO_CANDIDATES) {
                continue;
            }
            let Some((_, annotation)) = line.split_once(';') else {
                continue;
            };

            if let Some(rom) = rom {
                summary.rom_counts.add(rom);
            }
            if let Some(mnemonic) = parse_mnemonic(line) {
                summary.mnemonic_counts.add(mnemonic);
            }
            if let Some(classification) = parse_classification(annotation) {
                summary.add_classification(classification);
            }
        }

        summary
    }

    fn add_classification(&mut self, classification: &str) {
        let category = ScanCategory::from_classification(classification);
        self.category_counts.add(category.name());

        match category {
            ScanCategory::Register => {
                let name = classification["VIP Register ".len()..].trim();
                self.register_counts.add(name);
            }
            ScanCategory::WorldTable => {
                if let Some(field) = parse_field(classification) {
                    self.world_field_counts.add(field);
                }
            }
            ScanCategory::Oam => {
                if let Some(field) = parse_field(classification) {
                    self.oam_field_counts.add(field);
                }
            }
            ScanCategory::FrameBuffer | ScanCategory::DramOther | ScanCategory::Other => {}
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
    /// Every ROM section header, in order of appearance.
    pub fn roms(&self) -> &[String] {
        &self.roms
    }
    /// Candidate lines per ROM. ROMs without candidates are not present.
    pub fn rom_counts(&self) -> &Tally {
        &self.rom_counts
    }
    pub fn category_counts(&self) -> &Tally {
        &self.category_counts
    }
    pub fn mnemonic_counts(&self) -> &Tally {
        &self.mnemonic_counts
    }
    pub fn register_counts(&self) -> &Tally {
        &self.register_counts
    }
    pub fn world_field_counts(&self) -> &Tally {
        &self.world_field_counts
    }
    pub fn oam_field_counts(&self) -> &Tally {
        &self.oam_field_counts
    }

    /// Candidate lines that belong to a ROM section.
    pub fn total(&self) -> usize {
        self.rom_counts.total()
    }
}

fn parse_rom_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("==")?.strip_suffix("==")?;

    if inner.len() < 2
        || !inner.starts_with(char::is_whitespace)
        || !inner.ends_with(char::is_whitespace)
    {
        return None;
    }
    Some(inner.trim())
}

/// The first word after the program counter.
fn parse_mnemonic(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once(':')?;
    let rest = rest.trim_start();
    let end = rest.find(char::is_whitespace)?;
    let mnemonic = &rest[..end];

    if !mnemonic.is_empty()
        && mnemonic
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.')
    {
        Some(mnemonic)
    } else {
        None
    }
}

/// The classification label of a resolved write, without the source operand.
fn parse_classification(annotation: &str) -> Option<&str> {
    let rest = annotation.trim_start().strip_prefix("addr=0x")?;
    let (_, classification) = rest.split_once(' ')?;
    let classification = match classification.find(" src=") {
        Some(end) => &classification[..end],
        None => classification,
    };
    let classification = classification.trim_end();

    if classification.starts_with("VIP ") {
        Some(classification)
    } else {
        None
    }
}

/// The field name at the end of a `[... FIELD]` record description.
fn parse_field(classification: &str) -> Option<&str> {
    let (_, record) = classification.rsplit_once('[')?;
    let record = record.strip_suffix(']')?;

    record.rsplit(' ').next().filter(|field| !field.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    static SCAN: &str = "\
== roms/a.vb ==
07000008: st.w r5, 0[r6]                 ; addr=0x0005E000 VIP Register IPENDING (read) src=r5
07000008: st.w r5, 0[r6]                 ; addr=0x0005E002 VIP Register IENABLE src=r5
0700000A: st.h r7, 1[r6]                 ; addr=0x0005E048 VIP Register SPT0 src=r7(0x0000000F)
07000010: st.b r5, 16[r6]                ; addr(raw)=0x05000010 no VIP target after alignment src=r5
07000014: st.w r5, 0[r9]                 ; base r9 unknown

== roms/b.vb ==
(no VIP write candidates found)

== roms/c.vb ==
07000004: caxi -8192[r4], r9             ; addr=0x0003E000 VIP DRAM OAM (+0x0000) [obj=0 word=0 byte=0 JX]
07000004: caxi -8192[r4], r9             ; addr=0x0003E002 VIP DRAM OAM (+0x0002) [obj=0 word=1 byte=2 JP_EYEMASK]
07000020: out.h r3, 6[r8]                ; addr=0x0003D806 VIP DRAM World Table (+0x0006) [world=0 word=3 GX] src=r3
07000024: st.h r3, 0[r8]                 ; addr=0x00008000 VIP FB/CHR (+0x08000) src=r3
07000028: st.h r3, 0[r8]                 ; addr=0x00020000 VIP DRAM (+0x00000) src=r3
0700002C: st.h r3, 0[r8]                 ; addr=0x00060000 VIP segment src=r3
== roms/d.vb ==
(error: ROM is empty)
";

    #[test]
    fn counts_per_rom_and_mnemonic() {
        let summary = ScanSummary::parse("scan.txt", SCAN);

        assert_eq!(summary.path(), "scan.txt");
        assert_eq!(
            summary.roms(),
            ["roms/a.vb", "roms/b.vb", "roms/c.vb", "roms/d.vb"]
        );
        assert_eq!(summary.rom_counts().get("roms/a.vb"), 5);
        assert_eq!(summary.rom_counts().get("roms/b.vb"), 0);
        assert_eq!(summary.rom_counts().get("roms/c.vb"), 6);
        assert_eq!(summary.rom_counts().len(), 2);
        assert_eq!(summary.total(), 11);

        assert_eq!(
            summary.mnemonic_counts().top(10),
            [("st.h", 4), ("st.w", 3), ("caxi", 2), ("out.h", 1), ("st.b", 1)]
        );
    }

    #[test]
    fn categories_and_fields() {
        let summary = ScanSummary::parse("scan.txt", SCAN);

        assert_eq!(
            summary.category_counts().top(10),
            [
                ("VIP Register", 3),
                ("VIP DRAM OAM", 2),
                ("VIP DRAM (other)", 1),
                ("VIP DRAM World Table", 1),
                ("VIP FB/CHR", 1),
                ("VIP other", 1),
            ]
        );
        assert_eq!(
            summary.register_counts().top(10),
            [("IENABLE", 1), ("IPENDING (read)", 1), ("SPT0", 1)]
        );
        assert_eq!(
            summary.oam_field_counts().top(10),
            [("JP_EYEMASK", 1), ("JX", 1)]
        );
        assert_eq!(summary.world_field_counts().top(10), [("GX", 1)]);
    }

    #[test]
    fn header_needs_surrounding_whitespace() {
        assert_eq!(parse_rom_header("== a b.vb =="), Some("a b.vb"));
        assert_eq!(parse_rom_header("==a.vb=="), None);
        assert_eq!(parse_rom_header("== =="), None);
    }
}
