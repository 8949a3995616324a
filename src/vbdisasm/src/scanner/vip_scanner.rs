/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::{string::ToString, vec::Vec};

use crate::{
    analysis::RegisterTracker,
    config::ScanSettings,
    instr::DecodedInstruction,
    reader::RomReader,
    vip::classify_address,
};

use super::{ScanHit, ScanHitKind, SourceOperand};

/// Looks for instructions that write to the VIP.
///
/// Instructions are decoded linearly and fed to a [`RegisterTracker`], so only base registers set
/// up by straight-line code before the write can be resolved.
#[derive(Debug, Clone)]
pub struct VipScanner {
    settings: ScanSettings,
    tracker: RegisterTracker,
    hits: Vec<ScanHit>,
}

impl VipScanner {
    pub fn new(settings: ScanSettings) -> Self {
        Self {
            settings,
            tracker: RegisterTracker::new(),
            hits: Vec::new(),
        }
    }

    pub fn tracker(&self) -> &RegisterTracker {
        &self.tracker
    }

    pub fn hits(&self) -> &[ScanHit] {
        &self.hits
    }

    pub fn into_hits(self) -> Vec<ScanHit> {
        self.hits
    }

    /// Inspects `instr` for VIP writes and then updates the tracked registers with its effects.
    ///
    /// Instructions must be fed in the order they were decoded.
    pub fn process(&mut self, instr: &DecodedInstruction) {
        // The base register must be read before `instr` itself gets a chance to modify it.
        self.inspect_write(instr);
        self.tracker.apply(instr);
    }

    fn inspect_write(&mut self, instr: &DecodedInstruction) {
        let Some(write) = instr.mem_write() else {
            return;
        };
        let include_unknown = self.settings.include_unknown();

        let Some(base_value) = self.tracker.value(write.base()) else {
            if include_unknown {
                log::trace!("0x{:08X}: base {} unknown", instr.pc(), write.base());
                self.push(
                    instr,
                    ScanHitKind::UnknownBase { base: write.base() },
                    None,
                );
            }
            return;
        };

        let raw_address = write.effective_address(base_value);
        let src = write
            .src()
            .map(|reg| SourceOperand::new(reg, self.tracker.value(reg)));

        let mut emitted = false;
        for address in write.kind().touched_addresses(raw_address) {
            let classification = classify_address(address);
            if !classification.is_vip() {
                continue;
            }
            if self.settings.focus_obj_bg() && !classification.is_obj_bg_related() {
                continue;
            }

            self.push(
                instr,
                ScanHitKind::Resolved {
                    address,
                    classification,
                },
                src,
            );
            emitted = true;
        }

        if !emitted && include_unknown {
            self.push(instr, ScanHitKind::NoVipTarget { raw_address }, src);
        }
    }

    fn push(&mut self, instr: &DecodedInstruction, kind: ScanHitKind, src: Option<SourceOperand>) {
        self.hits.push(ScanHit::new(
            instr.pc(),
            instr.mnemonic(),
            instr.text().to_string(),
            kind,
            src,
        ));
    }
}

/// Linearly decodes `reader` from `start_pc` and collects every candidate VIP write.
///
/// The amount of decoded instructions is given by [`ScanSettings::budget_for`].
pub fn scan_vip_writes(reader: &RomReader, start_pc: u32, settings: &ScanSettings) -> Vec<ScanHit> {
    let budget = settings.budget_for(reader.size());
    let mut scanner = VipScanner::new(*settings);

    for instr in reader.instructions(start_pc, budget) {
        scanner.process(&instr);
    }

    log::debug!(
        "Scanned {} instructions from 0x{:08X}: {} VIP write candidates",
        budget,
        start_pc,
        scanner.hits().len()
    );

    scanner.into_hits()
}
