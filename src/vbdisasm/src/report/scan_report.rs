/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::string::{String, ToString};
use core::fmt;

use super::{ScanSummary, Tally};

/// A markdown document comparing a full scan with an OBJ/BG focused one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport<'a> {
    all: &'a ScanSummary,
    obj_bg: &'a ScanSummary,
    target_dir: &'a str,
    generated: &'a str,
}

impl<'a> ScanReport<'a> {
    /// `generated` is printed verbatim as the generation timestamp.
    pub const fn new(
        all: &'a ScanSummary,
        obj_bg: &'a ScanSummary,
        target_dir: &'a str,
        generated: &'a str,
    ) -> Self {
        Self {
            all,
            obj_bg,
            target_dir,
            generated,
        }
    }
}

impl ScanReport<'_> {
    fn display_table(
        &self,
        f: &mut fmt::Formatter<'_>,
        tally: &Tally,
        n: usize,
        key_header: &str,
    ) -> fmt::Result {
        writeln!(f, "| {} | Count |", key_header)?;
        writeln!(f, "|---|---:|")?;

        let top = tally.top(n);
        if top.is_empty() {
            writeln!(f, "| (none) | 0 |")?;
        }
        for (key, count) in top {
            writeln!(f, "| `{}` | {} |", key, count)?;
        }
        Ok(())
    }

    fn display_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# VIP Operations Report")?;
        writeln!(f)?;
        writeln!(f, "- Generated: `{}`", self.generated)?;
        writeln!(f, "- Target ROM directory: `{}`", self.target_dir)?;
        writeln!(f, "- Full scan file: `{}`", self.all.path())?;
        writeln!(f, "- OBJ/BG-focused scan file: `{}`", self.obj_bg.path())?;
        writeln!(f)?;

        writeln!(f, "## How This Dump Was Produced")?;
        writeln!(f, "```sh")?;
        writeln!(
            f,
            "vb-disasm scan-vip \"{}\" --focus all --output {}",
            self.target_dir,
            self.all.path()
        )?;
        writeln!(
            f,
            "vb-disasm scan-vip \"{}\" --focus obj-bg --output {}",
            self.target_dir,
            self.obj_bg.path()
        )?;
        writeln!(
            f,
            "vb-disasm report --target-dir \"{}\" --scan-all {} --scan-objbg {} --output <report>",
            self.target_dir,
            self.all.path(),
            self.obj_bg.path()
        )?;
        writeln!(f, "```")?;
        writeln!(f)
    }

    fn display_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Summary")?;
        writeln!(
            f,
            "- ROMs scanned (`--focus all`): **{}**",
            self.all.roms().len()
        )?;
        writeln!(
            f,
            "- ROMs with VIP write candidates (`--focus all`): **{}**",
            self.all.rom_counts().len()
        )?;
        writeln!(
            f,
            "- Total VIP-related write candidates (`--focus all`): **{}**",
            self.all.total()
        )?;
        writeln!(
            f,
            "- ROMs with OBJ/BG table hits (`--focus obj-bg`): **{}**",
            self.obj_bg.rom_counts().len()
        )?;
        writeln!(
            f,
            "- Total OBJ/BG write candidates (`--focus obj-bg`): **{}**",
            self.obj_bg.total()
        )?;
        writeln!(f)?;

        writeln!(f, "### Category Breakdown (`--focus all`)")?;
        self.display_table(f, self.all.category_counts(), 10, "Category")?;
        writeln!(f)?;
        writeln!(f, "### Instruction Form Breakdown (`--focus all`)")?;
        self.display_table(f, self.all.mnemonic_counts(), 10, "Instruction")?;
        writeln!(f)?;
        writeln!(f, "### Top ROMs by VIP Write Count (`--focus all`)")?;
        self.display_table(f, self.all.rom_counts(), 12, "ROM")?;
        writeln!(f)?;

        writeln!(f, "### OBJ/BG Field Hits (`--focus obj-bg`)")?;
        writeln!(f, "#### OAM Fields")?;
        self.display_table(f, self.obj_bg.oam_field_counts(), 10, "OAM Field")?;
        writeln!(f)?;
        writeln!(f, "#### World Table Fields")?;
        self.display_table(f, self.obj_bg.world_field_counts(), 16, "World Field")?;
        writeln!(f)?;
        writeln!(f, "#### Instruction Forms (`--focus obj-bg`)")?;
        self.display_table(f, self.obj_bg.mnemonic_counts(), 10, "Instruction")?;
        writeln!(f)?;

        writeln!(f, "### VIP Register Hits (`--focus all`)")?;
        self.display_table(f, self.all.register_counts(), 16, "Register")?;
        writeln!(f)
    }

    fn display_reference(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const REFERENCE: &str = "\
## Write Forms
Every line is a write-like V810 instruction:
- `st.b/st.h/st.w src, disp[base]`
  - Effective address: `addr = base + sign_extend(disp16)`.
- `out.b/out.h/out.w src, disp[base]`
  - Same addressing as the stores, commonly used for memory mapped I/O.
- `caxi disp[base], rX`
  - Compare and exchange. Counted as a write since it can modify the target word.

Halfword and word writes are aligned down before classification, and a word write reports both
of its halfword lanes.

## Record Layouts
### OBJ attributes (VIP DRAM `0x1E000..0x1FFFF`, 8 bytes per OBJ)
- `word0: JX`, horizontal position.
- `word1: JP_EYEMASK`
  - `JP = word1 & 0x3FFF`, a signed 14-bit parallax.
  - Bit 15 enables the left eye and bit 14 the right eye (`1` shows, `0` masks).
- `word2: JY`, vertical anchor, sampled as `tile_y = (Y - JY) & 0xFF`.
- `word3: ATTR(char,palette,hflip,vflip)`, character index, palette and flip flags.
- Rendering:
  - `x = sign10(JX + (eye == R ? JP : -JP))`
  - `depth = clamp(sign14(JP))`

### World attributes (VIP DRAM `0x1D800..0x1DFFF`, 0x20 bytes per world)
- `WORLD_CTRL(L/R enable,bgm,scx/scy,end/over,bgmap_base)`
  - Eye enables, BG mode (Normal, H-Bias, Affine, OBJ), map size selectors, end and overplane flags.
- `GX`, `GP`, `GY`: destination position and parallax.
- `MX`, `MP`, `MY`: source position and parallax.
- `WINDOW_WIDTH`, `WINDOW_HEIGHT`: clipping rectangle.
- `PARAM_BASE`: per-row parameter table for H-Bias and Affine worlds.
- `OVERPLANE_CHAR`: character drawn outside the map when overplane is set.
- Rendering:
  - Normal and H-Bias: `srcX = MX + (eye == R ? MP : -MP)`, `destX = GX + (eye == R ? GP : -GP)`.
  - H-Bias adds a per-row term: `srcX += DRAM[(PARAM_BASE + (((y - GY) * 2) | eye)) & 0xFFFF]`.
  - Affine reads `(MX, MP, MY, DX, DY)` per row, with the sign of `MP` depending on the eye.

### VIP registers (value masks applied on write)
- `IENABLE (0x02)`: interrupt enable mask, `V & 0xE01F`.
- `IPENDING clear (0x04)`: clears pending interrupt bits, `pending &= ~V`.
- `DPCTRL (0x22)`: display control, `V & 0x0703`. Bit 0 resets the display state.
- `XPCTRL (0x42)`: drawing control, `V & 0x0002`, with `SBCMP = (V >> 8) & 0x1F`. Bit 0 resets drawing.
- `SPT0..SPT3 (0x48..0x4E)`: OBJ group pointers, `V & 0x3FF`.
- `GPLT0..GPLT3 (0x60..0x66)`: BG palettes, `V & 0xFC`.
- `JPLT0..JPLT3 (0x68..0x6E)`: OBJ palettes, `V & 0xFC`.
- `BKCOL (0x70)`: background color, `V & 0x3`.

## Notes and Limits
- Static linear disassembly with lightweight register tracking. Branches are not followed, so
  register values are only known along straight-line code.
- A line is a *candidate* write site; it is not guaranteed to execute.
- Unresolved or broad regions show up as `VIP DRAM (other)` or `VIP other`. A runtime trace
  of VIP writes is needed to tell which values are live on a given frame.
";

        write!(f, "{}", REFERENCE)
    }
}

impl fmt::Display for ScanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_header(f)?;
        self.display_summary(f)?;
        self.display_reference(f)
    }
}

/// Renders the markdown report for a full scan and an OBJ/BG focused scan of `target_dir`.
pub fn build_report(
    all: &ScanSummary,
    obj_bg: &ScanSummary,
    target_dir: &str,
    generated: &str,
) -> String {
    ScanReport::new(all, obj_bg, target_dir, generated).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn summary_and_tables() {
        let all = ScanSummary::parse(
            "scan/all.txt",
            "\
== roms/a.vb ==
07000008: st.h r5, 2[r6]                 ; addr=0x0005E002 VIP Register IENABLE src=r5
0700000C: st.h r5, 112[r6]               ; addr=0x0005E070 VIP Register BKCOL src=r5

== roms/b.vb ==
(no VIP write candidates found)
",
        );
        let obj_bg = ScanSummary::parse(
            "scan/objbg.txt",
            "\
== roms/a.vb ==
0700000C: st.h r5, 112[r6]               ; addr=0x0005E070 VIP Register BKCOL src=r5

== roms/b.vb ==
(no VIP write candidates found)
",
        );

        let report = build_report(&all, &obj_bg, "roms", "1700000000");

        assert!(report.starts_with("# VIP Operations Report\n\n- Generated: `1700000000`\n"));
        assert!(report.contains("- ROMs scanned (`--focus all`): **2**\n"));
        assert!(report.contains("- Total VIP-related write candidates (`--focus all`): **2**\n"));
        assert!(report.contains("- Total OBJ/BG write candidates (`--focus obj-bg`): **1**\n"));

        let registers = "\
### VIP Register Hits (`--focus all`)
| Register | Count |
|---|---:|
| `BKCOL` | 1 |
| `IENABLE` | 1 |
";
        assert!(report.contains(registers));

        let oam = "\
#### OAM Fields
| OAM Field | Count |
|---|---:|
| (none) | 0 |
";
        assert!(report.contains(oam));
        assert!(report.contains("- `BKCOL (0x70)`: background color, `V & 0x3`.\n"));
        assert!(report.contains("  - `x = sign10(JX + (eye == R ? JP : -JP))`\n"));
        assert!(report.ends_with('\n'));
    }
}
