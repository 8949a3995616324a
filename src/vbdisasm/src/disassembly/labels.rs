/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use alloc::collections::BTreeSet;
use core::fmt;

use crate::instr::DecodedInstruction;

/// A synthetic label for a branch or jump target.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Label {
    address: u32,
}

impl Label {
    pub const fn new(address: u32) -> Self {
        Self { address }
    }

    pub const fn address(&self) -> u32 {
        self.address
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L_{:08X}", self.address)
    }
}

/// Every distinct control flow target found in a sequence of instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    targets: BTreeSet<u32>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self {
            targets: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, address: u32) -> bool {
        self.targets.insert(address)
    }

    pub fn get(&self, address: u32) -> Option<Label> {
        if self.targets.contains(&address) {
            Some(Label::new(address))
        } else {
            None
        }
    }

    pub fn contains(&self, address: u32) -> bool {
        self.targets.contains(&address)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Labels sorted by address.
    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        self.targets.iter().map(|address| Label::new(*address))
    }
}

/// Collects a label for every branch or jump target in `instrs`.
///
/// Targets outside of `instrs` are kept too, since they can be referenced by the instructions
/// that jump to them.
pub fn build_labels(instrs: &[DecodedInstruction]) -> LabelMap {
    let mut labels = LabelMap::new();

    for target in instrs.iter().filter_map(DecodedInstruction::target) {
        labels.insert(target);
    }

    labels
}
