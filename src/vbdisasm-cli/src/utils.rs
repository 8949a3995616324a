/* SPDX-FileCopyrightText: © 2025 Decompollaborate */
/* SPDX-License-Identifier: MIT */

use std::{
    fmt::Display,
    fs,
    io,
    num::ParseIntError,
    path::Path,
    time,
};

use vbdisasm::config::RESET_VECTOR_PC;

#[track_caller]
#[inline]
pub fn pretty_unwrap<T, E>(value: Result<T, E>) -> T
where
    E: Display,
{
    match value {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

#[track_caller]
#[inline]
#[must_use]
pub fn get_time_now() -> time::Duration {
    pretty_unwrap(time::SystemTime::now().duration_since(time::UNIX_EPOCH))
}

/// Accepts `0x` prefixed hexadecimal or plain decimal.
pub fn parse_int(value: &str) -> Result<u32, ParseIntError> {
    let value = value.trim().to_ascii_lowercase();

    match value.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    }
}

/// Like [`parse_int`], but `reset` means the reset vector.
pub fn parse_start(value: &str) -> Result<u32, ParseIntError> {
    if value.trim().eq_ignore_ascii_case("reset") {
        Ok(RESET_VECTOR_PC)
    } else {
        parse_int(value)
    }
}

/// Writes `contents` to `path`, creating any missing parent directory.
pub fn write_output(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, contents)
}
