/*
 * handler.rs
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

//! Entry points for the data: scheme: parse a URL into its media type,
//! base64 flag, and raw payload, or open a full read-only connection over
//! the decoded content.

use crate::connection::DataUrlConnection;
use crate::decode::{decode, resolve_media_type, DecodedResource};
use crate::error::{DataUrlError, DecodeError};
use crate::grammar::match_prefix;

/// The scheme this handler serves. Matched case-sensitively.
pub const SCHEME: &str = "data";

/// Parsed data: URL. The media type has RFC 2397 defaults applied (never
/// empty); the payload is the verbatim remainder after the comma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri<'a> {
    pub media_type: String,
    pub is_base64: bool,
    pub raw_payload: &'a str,
}

impl DataUri<'_> {
    /// Decode the payload (base64 or percent-encoded per the base64 flag).
    pub fn decode(&self) -> Result<DecodedResource, DecodeError> {
        decode(&self.media_type, self.is_base64, self.raw_payload)
    }
}

/// Parse a full data: URL. The scheme literal must be exactly `data:`,
/// case-sensitively; anything else is rejected before grammar matching.
pub fn parse(url: &str) -> Result<DataUri<'_>, DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or_else(|| {
        let scheme = url.split(':').next().unwrap_or(url);
        DataUrlError::UnsupportedScheme(scheme.to_string())
    })?;
    let matched = match_prefix(rest)?;
    Ok(DataUri {
        media_type: resolve_media_type(matched.media_type),
        is_base64: matched.is_base64,
        raw_payload: &rest[matched.payload_start..],
    })
}

/// Parse and decode a data: URL and wrap it in a read-only connection.
pub fn open_connection(url: &str) -> Result<DataUrlConnection, DataUrlError> {
    let uri = parse(url)?;
    let resource = uri.decode()?;
    Ok(DataUrlConnection::new(url, resource.media_type, resource.content))
}
