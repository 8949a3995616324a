/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

mod address_classification;
mod record_fields;
mod vip_register;

pub use address_classification::{classify_address, AddressClassification};
pub use record_fields::{ObjField, WorldField, OAM_STRIDE, WORLD_STRIDE};
pub use vip_register::VipRegister;
