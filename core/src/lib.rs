/*
 * lib.rs
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

//! Cartolina core: the data: URL scheme (RFC 2397). Grammar matching over
//! the RFC 2045 token grammar, base64/percent payload decoding with charset
//! resolution, and a read-only connection handle over the decoded content.
//! Everything is synchronous and pure; no I/O happens anywhere.

mod charset;
mod connection;
mod decode;
mod error;
mod grammar;
mod handler;

pub use charset::{resolve_charset, Charset};
pub use connection::{ConnectionError, DataUrlConnection};
pub use decode::{
    decode, resolve_media_type, DecodedResource, DEFAULT_FULL_MEDIA_TYPE, DEFAULT_MEDIA_TYPE,
};
pub use error::{DataUrlError, DecodeError, GrammarError};
pub use grammar::{is_token, is_token_char, match_prefix, PrefixMatch};
pub use handler::{open_connection, parse, DataUri, SCHEME};
