/*
 * error.rs
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

//! Grammar and decode errors for data: URLs.

use std::fmt;

/// Error matching the data: URL grammar (RFC 2397).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The media type region before the comma does not match the token grammar.
    MalformedMediaType,
    /// No comma found after the optional media type and base64 flag.
    MissingTerminator,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::MalformedMediaType => {
                write!(f, "malformed media type before the comma")
            }
            GrammarError::MissingTerminator => {
                write!(f, "expected a comma after the optional media type")
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// Error decoding the payload of a grammatically valid data: URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload declared ;base64 but is not valid standard base64.
    InvalidBase64,
    /// Truncated or non-hex %XX escape in a percent-encoded payload.
    InvalidPercentEncoding,
    /// The charset parameter names an unsupported encoding (name carried verbatim).
    UnknownCharset(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidBase64 => write!(f, "invalid base64 payload"),
            DecodeError::InvalidPercentEncoding => {
                write!(f, "invalid percent-encoding in payload")
            }
            DecodeError::UnknownCharset(name) => write!(f, "unknown charset: {}", name),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Top-level failure of parse/open_connection on a data: URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataUrlError {
    /// The URL does not start with the literal, case-sensitive "data:" scheme.
    UnsupportedScheme(String),
    Grammar(GrammarError),
    Decode(DecodeError),
}

impl fmt::Display for DataUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataUrlError::UnsupportedScheme(scheme) => {
                write!(f, "unsupported scheme: {}", scheme)
            }
            DataUrlError::Grammar(e) => write!(f, "{}", e),
            DataUrlError::Decode(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DataUrlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataUrlError::UnsupportedScheme(_) => None,
            DataUrlError::Grammar(e) => Some(e),
            DataUrlError::Decode(e) => Some(e),
        }
    }
}

impl From<GrammarError> for DataUrlError {
    fn from(e: GrammarError) -> Self {
        DataUrlError::Grammar(e)
    }
}

impl From<DecodeError> for DataUrlError {
    fn from(e: DecodeError) -> Self {
        DataUrlError::Decode(e)
    }
}
