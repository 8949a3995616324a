/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod gpr_register_value;
mod register_tracker;

pub use gpr_register_value::GprRegisterValue;
pub use register_tracker::RegisterTracker;
