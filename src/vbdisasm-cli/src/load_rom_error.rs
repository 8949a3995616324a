/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use std::{error, fmt, io};

use vbdisasm::reader::RomReaderError;

#[derive(Debug)]
#[non_exhaustive]
pub enum LoadRomError {
    Io(io::Error),
    Rom(RomReaderError),
}

impl fmt::Display for LoadRomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadRomError::Io(e) => write!(f, "{}", e),
            LoadRomError::Rom(e) => write!(f, "{}", e),
        }
    }
}

impl error::Error for LoadRomError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            LoadRomError::Io(e) => Some(e),
            LoadRomError::Rom(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoadRomError {
    fn from(value: io::Error) -> Self {
        LoadRomError::Io(value)
    }
}

impl From<RomReaderError> for LoadRomError {
    fn from(value: RomReaderError) -> Self {
        LoadRomError::Rom(value)
    }
}
