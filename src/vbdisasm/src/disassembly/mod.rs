/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod disassembly_display;
mod labels;

pub use disassembly_display::{Disassembly, DisassemblyDisplay, DisassemblyDisplaySettings};
pub use labels::{build_labels, Label, LabelMap};
