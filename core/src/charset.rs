/*
 * charset.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Cartolina, a handler for the data: URL scheme.
 *
 * Cartolina is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Cartolina is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Cartolina.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Character encodings for text payloads, and the charset parameter lookup
//! over a media-type parameter list. US-ASCII is the RFC 2397 default.

use crate::error::DecodeError;
use crate::grammar::{scan_quoted_string, scan_token};

const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Supported character encodings for non-base64 payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    UsAscii,
    Utf8,
    Iso8859_1,
}

impl Charset {
    /// Look up an encoding by its charset name or a common alias, case-insensitively.
    pub fn for_name(name: &str) -> Option<Charset> {
        match name.to_ascii_lowercase().as_str() {
            "us-ascii" | "ascii" | "ansi_x3.4-1968" | "iso646-us" => Some(Charset::UsAscii),
            "utf-8" | "utf8" => Some(Charset::Utf8),
            "iso-8859-1" | "iso_8859-1" | "iso8859-1" | "latin1" | "l1" | "cp819" => {
                Some(Charset::Iso8859_1)
            }
            _ => None,
        }
    }

    /// Canonical charset name.
    pub fn name(&self) -> &'static str {
        match self {
            Charset::UsAscii => "US-ASCII",
            Charset::Utf8 => "UTF-8",
            Charset::Iso8859_1 => "ISO-8859-1",
        }
    }

    /// Interpret bytes as text in this encoding. Undecodable input becomes U+FFFD.
    pub fn decode_text(&self, bytes: &[u8]) -> String {
        match self {
            Charset::UsAscii => bytes
                .iter()
                .map(|&b| if b < 0x80 { b as char } else { REPLACEMENT_CHAR })
                .collect(),
            Charset::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Charset::Iso8859_1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }

    /// Encode text as bytes in this encoding. Unmappable characters become b'?'.
    pub fn encode_text(&self, text: &str) -> Vec<u8> {
        match self {
            Charset::UsAscii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::Iso8859_1 => text
                .chars()
                .map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' })
                .collect(),
        }
    }
}

impl std::fmt::Display for Charset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve the effective charset of a media type by scanning its parameter
/// list, from the first `;` onward, for the first parameter named `charset`
/// (name match is case-sensitive). Parameters must be contiguous; scanning
/// stops at the first thing that is not `;name=value`. A quoted value has
/// its quotes stripped but backslash escapes are left as-is. No charset
/// parameter means the RFC 2397 default, US-ASCII.
pub fn resolve_charset(media_type: &str) -> Result<Charset, DecodeError> {
    let first_semicolon = match media_type.find(';') {
        Some(i) => i,
        None => return Ok(Charset::UsAscii),
    };
    let params = &media_type[first_semicolon..];
    let bytes = params.as_bytes();
    let mut pos = 0;

    while bytes.get(pos) == Some(&b';') {
        let name_end = scan_token(bytes, pos + 1);
        if name_end == pos + 1 || bytes.get(name_end) != Some(&b'=') {
            break;
        }
        let name = &params[pos + 1..name_end];
        let value_start = name_end + 1;
        let (value, value_end) = match scan_quoted_string(bytes, value_start) {
            Some(end) => (&params[value_start + 1..end - 1], end),
            None => {
                let end = scan_token(bytes, value_start);
                if end == value_start {
                    break;
                }
                (&params[value_start..end], end)
            }
        };
        if name == "charset" {
            return Charset::for_name(value)
                .ok_or_else(|| DecodeError::UnknownCharset(value.to_string()));
        }
        pos = value_end;
    }
    Ok(Charset::UsAscii)
}
