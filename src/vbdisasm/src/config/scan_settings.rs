/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use bitflags::bitflags;

bitflags! {
    /// Tweaks what the VIP write scanner reports.
    ///
    /// With no flags set only writes whose base register value is statically known and whose
    /// effective address lands anywhere inside the VIP segment are reported.
    ///
    /// - [`IncludeUnknown`]: Also report write sites whose base register can't be resolved, and
    ///   resolved writes that don't touch the VIP after alignment.
    /// - [`FocusObjBg`]: Only report writes that touch the OAM, the World table or one of the
    ///   display registers related to OBJ and BG rendering (palettes, brightness, search tables,
    ///   display and drawing control).
    ///
    /// [`IncludeUnknown`]: ScanFlags::IncludeUnknown
    /// [`FocusObjBg`]: ScanFlags::FocusObjBg
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
    pub struct ScanFlags: u32 {
        const IncludeUnknown = 1 << 0;

        const FocusObjBg = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct ScanSettings {
    flags: ScanFlags,
    /// How many instructions to decode. `None` means one per halfword of the ROM.
    instruction_count: Option<usize>,
}

impl ScanSettings {
    pub const fn new() -> Self {
        Self {
            flags: ScanFlags::empty(),
            instruction_count: None,
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSettings {
    pub const fn flags(&self) -> ScanFlags {
        self.flags
    }
    pub fn flags_mut(&mut self) -> &mut ScanFlags {
        &mut self.flags
    }
    pub const fn with_flags(self, flags: ScanFlags) -> Self {
        Self { flags, ..self }
    }

    pub const fn instruction_count(&self) -> Option<usize> {
        self.instruction_count
    }
    pub fn instruction_count_mut(&mut self) -> &mut Option<usize> {
        &mut self.instruction_count
    }
    pub const fn with_instruction_count(self, instruction_count: Option<usize>) -> Self {
        Self {
            instruction_count,
            ..self
        }
    }

    pub const fn include_unknown(&self) -> bool {
        self.flags.contains(ScanFlags::IncludeUnknown)
    }
    pub const fn focus_obj_bg(&self) -> bool {
        self.flags.contains(ScanFlags::FocusObjBg)
    }

    /// The instruction budget for a ROM of `rom_size` bytes.
    pub fn budget_for(&self, rom_size: usize) -> usize {
        self.instruction_count.unwrap_or((rom_size / 2).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn default_budget_covers_every_halfword() {
        let settings = ScanSettings::new();

        assert_eq!(settings.budget_for(0x10000), 0x8000);
        assert_eq!(settings.budget_for(1), 1);
    }

    #[test]
    fn explicit_budget_wins() {
        let settings = ScanSettings::new()
            .with_instruction_count(Some(12))
            .with_flags(ScanFlags::IncludeUnknown);

        assert_eq!(settings.budget_for(0x10000), 12);
        assert!(settings.include_unknown());
        assert!(!settings.focus_obj_bg());
    }
}
