/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use core::fmt;

/// Size in bytes of a World table entry.
pub const WORLD_STRIDE: u32 = 0x20;

/// Size in bytes of an OAM entry.
pub const OAM_STRIDE: u32 = 8;

/// Halfword of a World table entry.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorldField {
    word: u32,
}

impl WorldField {
    pub const fn new(word: u32) -> Self {
        Self { word }
    }

    pub const fn word(&self) -> u32 {
        self.word
    }

    pub const fn name(&self) -> Option<&'static str> {
        match self.word {
            0 => Some("WORLD_CTRL(L/R enable,bgm,scx/scy,end/over,bgmap_base)"),
            1 => Some("GX"),
            2 => Some("GP"),
            3 => Some("GY"),
            4 => Some("MX"),
            5 => Some("MP"),
            6 => Some("MY"),
            7 => Some("WINDOW_WIDTH"),
            8 => Some("WINDOW_HEIGHT"),
            9 => Some("PARAM_BASE"),
            10 => Some("OVERPLANE_CHAR"),
            _ => None,
        }
    }
}

impl fmt::Display for WorldField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "WORD{}", self.word),
        }
    }
}

/// Halfword of an OAM entry.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjField {
    word: u32,
}

impl ObjField {
    pub const fn new(word: u32) -> Self {
        Self { word }
    }

    pub const fn word(&self) -> u32 {
        self.word
    }

    pub const fn name(&self) -> Option<&'static str> {
        match self.word {
            0 => Some("JX"),
            1 => Some("JP_EYEMASK"),
            2 => Some("JY"),
            3 => Some("ATTR(char,palette,hflip,vflip)"),
            _ => None,
        }
    }
}

impl fmt::Display for ObjField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "WORD{}", self.word),
        }
    }
}
