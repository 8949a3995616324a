/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

//! Aggregation of the text produced by the VIP write scanner into a markdown report.

mod scan_report;
mod scan_summary;
mod tally;

pub use scan_report::{build_report, ScanReport};
pub use scan_summary::{ScanCategory, ScanSummary};
pub use tally::Tally;
