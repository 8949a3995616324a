/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod scan_hit;
mod vip_scanner;

pub use scan_hit::{ScanHit, ScanHitKind, SourceOperand};
pub use vip_scanner::{scan_vip_writes, VipScanner};
