/*
 * decode.rs
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

//! Payload decoding: media-type defaulting per RFC 2397, then base64 or
//! percent-decoding. The percent path decodes to text in the resolved
//! charset and re-encodes with the same charset, so unmappable input
//! degrades the same way the charset itself does.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use percent_encoding::percent_decode_str;

use crate::charset::resolve_charset;
use crate::error::DecodeError;

/// RFC 2397 default media type for data: URLs that declare none.
pub const DEFAULT_MEDIA_TYPE: &str = "text/plain";
/// Full default, including the default charset parameter.
pub const DEFAULT_FULL_MEDIA_TYPE: &str = "text/plain;charset=US-ASCII";

/// Decoded content of a data: URL, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedResource {
    /// Resolved media type (defaults applied, never empty).
    pub media_type: String,
    /// Exact decoded bytes; the length is authoritative.
    pub content: Bytes,
}

/// Apply the RFC 2397 media-type defaults to the raw matched region.
pub fn resolve_media_type(raw: &str) -> String {
    if raw.is_empty() {
        DEFAULT_FULL_MEDIA_TYPE.to_string()
    } else if raw.starts_with(';') {
        // Parameters without a type/subtype attach to the default type.
        format!("{}{}", DEFAULT_MEDIA_TYPE, raw)
    } else {
        raw.to_string()
    }
}

/// Decode the payload of a matched data: URL. `media_type_raw` is the raw
/// region from the grammar matcher (defaults are applied here); `payload` is
/// everything after the comma, verbatim.
pub fn decode(
    media_type_raw: &str,
    is_base64: bool,
    payload: &str,
) -> Result<DecodedResource, DecodeError> {
    let media_type = resolve_media_type(media_type_raw);

    let content = if is_base64 {
        let bytes = BASE64
            .decode(payload)
            .map_err(|_| DecodeError::InvalidBase64)?;
        Bytes::from(bytes)
    } else {
        let raw = percent_decode_strict(payload)?;
        let charset = resolve_charset(&media_type)?;
        let text = charset.decode_text(&raw);
        Bytes::from(charset.encode_text(&text))
    };

    Ok(DecodedResource { media_type, content })
}

/// Percent-decode with strict %XX validation. All non-escape characters pass
/// through verbatim; `+` is not a space (RFC 3986 escaping, not form data).
fn percent_decode_strict(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = payload.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 2 >= bytes.len()
                || !bytes[i + 1].is_ascii_hexdigit()
                || !bytes[i + 2].is_ascii_hexdigit()
            {
                return Err(DecodeError::InvalidPercentEncoding);
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(percent_decode_str(payload).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_media_type_gets_full_default() {
        let r = decode("", false, "").unwrap();
        assert_eq!(r.media_type, "text/plain;charset=US-ASCII");
        assert!(r.content.is_empty());
    }

    #[test]
    fn parameters_only_get_default_type() {
        let r = decode(";charset=utf8", false, "").unwrap();
        assert_eq!(r.media_type, "text/plain;charset=utf8");
    }

    #[test]
    fn explicit_media_type_is_kept() {
        let r = decode("image/png", true, "").unwrap();
        assert_eq!(r.media_type, "image/png");
    }

    #[test]
    fn base64_payload() {
        let r = decode("text/plain", true, "SGVsbG8gV29ybGQh").unwrap();
        assert_eq!(&r.content[..], b"Hello World!");
    }

    #[test]
    fn base64_ignores_charset() {
        let r = decode("text/plain;charset=bla", true, "SGVsbG8=").unwrap();
        assert_eq!(&r.content[..], b"Hello");
    }

    #[test]
    fn invalid_base64() {
        assert_eq!(
            decode("text/plain", true, "not!base64"),
            Err(DecodeError::InvalidBase64)
        );
        // Missing padding.
        assert_eq!(
            decode("text/plain", true, "SGVsbG8"),
            Err(DecodeError::InvalidBase64)
        );
    }

    #[test]
    fn percent_payload_default_ascii() {
        let r = decode("text/plain", false, "Hello%20World%21").unwrap();
        assert_eq!(&r.content[..], b"Hello World!");
        let r = decode("text/plain;foo=bar", false, "Hello%20World%21").unwrap();
        assert_eq!(&r.content[..], b"Hello World!");
    }

    #[test]
    fn percent_payload_utf8() {
        let r = decode(
            "text/plain;foo=bar;charset=utf8",
            false,
            "Hello%20World%20%E2%98%BA",
        )
        .unwrap();
        assert_eq!(&r.content[..], "Hello World \u{263A}".as_bytes());
        let r = decode(
            "text/plain;charset=utf8;foo=bar",
            false,
            "Hello%20World%20%E2%98%BA",
        )
        .unwrap();
        assert_eq!(&r.content[..], "Hello World \u{263A}".as_bytes());
    }

    #[test]
    fn plus_is_not_a_space() {
        let r = decode("text/plain", false, "a+b").unwrap();
        assert_eq!(&r.content[..], b"a+b");
    }

    #[test]
    fn non_ascii_bytes_degrade_to_question_marks() {
        // %E2%98%BA decodes to three bytes none of which is US-ASCII.
        let r = decode("", false, "%E2%98%BA").unwrap();
        assert_eq!(&r.content[..], b"???");
    }

    #[test]
    fn invalid_percent_encoding() {
        assert_eq!(
            decode("text/plain", false, "abc%2"),
            Err(DecodeError::InvalidPercentEncoding)
        );
        assert_eq!(
            decode("text/plain", false, "%zz"),
            Err(DecodeError::InvalidPercentEncoding)
        );
        assert_eq!(
            decode("text/plain", false, "%"),
            Err(DecodeError::InvalidPercentEncoding)
        );
    }

    #[test]
    fn unknown_charset_surfaces_on_decode() {
        assert_eq!(
            decode(";charset=bla", false, "foo"),
            Err(DecodeError::UnknownCharset("bla".to_string()))
        );
    }

    #[test]
    fn latin1_payload() {
        let r = decode("text/plain;charset=latin1", false, "caf%E9").unwrap();
        assert_eq!(&r.content[..], b"caf\xE9");
    }
}
