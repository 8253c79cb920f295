/*
 * grammar.rs
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

//! data: URL grammar matcher (RFC 2397 over the RFC 2045 token grammar).
//! Recognizes `(type/subtype)?(;name=value)*(;base64)?,` at the start of the
//! text after the scheme, as a hand-rolled scanner over the byte sequence.

use crate::error::GrammarError;

/// Checks if a character is valid in an RFC 2045 token.
#[inline]
pub fn is_token_char(c: u8) -> bool {
    matches!(c,
        b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' |
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'^' | b'_' | b'`' | b'|' | b'~'
    )
}

/// Checks if the string is a valid RFC 2045 token (1+ token chars).
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_token_char)
}

/// Scan a token starting at `pos`; returns the end index (== `pos` if no token).
pub(crate) fn scan_token(bytes: &[u8], pos: usize) -> usize {
    let mut end = pos;
    while end < bytes.len() && is_token_char(bytes[end]) {
        end += 1;
    }
    end
}

/// Scan a quoted-string starting at `pos`: `"` then (`\x` | any but `"` `\`)* then `"`.
/// Returns the index just past the closing quote, or None if not a quoted-string.
pub(crate) fn scan_quoted_string(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b'"') {
        return None;
    }
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => return Some(i + 1),
            b'\\' => {
                if i + 1 >= bytes.len() {
                    return None;
                }
                i += 2;
            }
            _ => i += 1,
        }
    }
    None
}

/// Scan one parameter starting at `pos`: `;` token `=` (token | quoted-string).
/// Returns the index just past the value, or None if not a parameter.
pub(crate) fn scan_parameter(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&b';') {
        return None;
    }
    let name_end = scan_token(bytes, pos + 1);
    if name_end == pos + 1 || bytes.get(name_end) != Some(&b'=') {
        return None;
    }
    let value_start = name_end + 1;
    if let Some(end) = scan_quoted_string(bytes, value_start) {
        return Some(end);
    }
    let value_end = scan_token(bytes, value_start);
    if value_end == value_start {
        return None;
    }
    Some(value_end)
}

/// Result of matching the data: URL grammar at the start of the post-scheme text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatch<'a> {
    /// Raw media type region: `type/subtype` plus verbatim `;name=value` parameters.
    /// May be empty or start with `;` (defaults apply downstream).
    pub media_type: &'a str,
    /// Whether the payload is declared `;base64`.
    pub is_base64: bool,
    /// Index into the input just past the terminating comma.
    pub payload_start: usize,
}

/// Match the grammar `(type/subtype)?(;name=value)*(;base64)?,` at the start
/// of `rest` (the URL text after the `data:` scheme). The parameter repetition
/// is greedy; `;base64` is only the flag when it has no `=` value and is
/// immediately followed by the terminating comma.
pub fn match_prefix(rest: &str) -> Result<PrefixMatch<'_>, GrammarError> {
    let bytes = rest.as_bytes();
    let mut pos = 0;

    // Optional type/subtype.
    let primary_end = scan_token(bytes, 0);
    if primary_end > 0 && bytes.get(primary_end) == Some(&b'/') {
        let sub_end = scan_token(bytes, primary_end + 1);
        if sub_end > primary_end + 1 {
            pos = sub_end;
        }
    }

    // Greedy parameter list.
    while let Some(end) = scan_parameter(bytes, pos) {
        pos = end;
    }
    let media_end = pos;

    // The flag must sit between the last parameter and the comma.
    let mut is_base64 = false;
    if rest[pos..].starts_with(";base64") && bytes.get(pos + 7) == Some(&b',') {
        is_base64 = true;
        pos += 7;
    }

    if bytes.get(pos) != Some(&b',') {
        return Err(if bytes[pos..].contains(&b',') {
            GrammarError::MalformedMediaType
        } else {
            GrammarError::MissingTerminator
        });
    }

    Ok(PrefixMatch {
        media_type: &rest[..media_end],
        is_base64,
        payload_start: pos + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(rest: &str) -> PrefixMatch<'_> {
        match_prefix(rest).expect(rest)
    }

    #[test]
    fn minimal_url() {
        let m = matched(",");
        assert_eq!(m.media_type, "");
        assert!(!m.is_base64);
        assert_eq!(m.payload_start, 1);
    }

    #[test]
    fn empty_type_with_payload() {
        // The comma after the empty type terminates; "image/png," is payload.
        let m = matched(",image/png,");
        assert_eq!(m.media_type, "");
        assert_eq!(m.payload_start, 1);
    }

    #[test]
    fn parameters_without_type() {
        let m = matched(";charset=bla,");
        assert_eq!(m.media_type, ";charset=bla");
        assert!(!m.is_base64);
        assert_eq!(m.payload_start, 13);

        let m = matched(";charset=bla,image/png,");
        assert_eq!(m.payload_start, 13);
    }

    #[test]
    fn quoted_parameter_value_may_contain_comma() {
        // The comma inside the quotes is not the terminator.
        let m = matched(";charset=\"b ;,la\",image/png,");
        assert_eq!(m.media_type, ";charset=\"b ;,la\"");
        assert_eq!(m.payload_start, 18);
    }

    #[test]
    fn plain_media_type() {
        let m = matched("image/png,");
        assert_eq!(m.media_type, "image/png");
        assert_eq!(m.payload_start, 10);

        let m = matched("image/png,aksfyirweu");
        assert_eq!(m.media_type, "image/png");
        assert_eq!(m.payload_start, 10);
    }

    #[test]
    fn base64_flag() {
        let m = matched("image/png;base64,aksfyirweu");
        assert_eq!(m.media_type, "image/png");
        assert!(m.is_base64);
        assert_eq!(m.payload_start, 17);
    }

    #[test]
    fn quoted_parameter_with_escapes() {
        let m = matched("image/png;foo=\"b ;\\\\,\\\"ar\",aksfyirweu");
        assert_eq!(m.media_type, "image/png;foo=\"b ;\\\\,\\\"ar\"");
        assert!(!m.is_base64);
        assert_eq!(m.payload_start, 27);

        let m = matched("image/png;foo=\"b ;\\\\,\\\"ar\";base64,aksfyirweu");
        assert_eq!(m.media_type, "image/png;foo=\"b ;\\\\,\\\"ar\"");
        assert!(m.is_base64);
        assert_eq!(m.payload_start, 34);
    }

    #[test]
    fn base64_with_value_is_a_parameter() {
        let m = matched("text/plain;base64=no,x");
        assert_eq!(m.media_type, "text/plain;base64=no");
        assert!(!m.is_base64);
    }

    #[test]
    fn base64_flag_requires_comma() {
        // ";base64" not followed by a comma is neither flag nor parameter.
        assert_eq!(
            match_prefix("text/plain;base64"),
            Err(GrammarError::MissingTerminator)
        );
    }

    #[test]
    fn missing_comma() {
        assert_eq!(match_prefix("whatever"), Err(GrammarError::MissingTerminator));
    }

    #[test]
    fn bare_word_before_comma() {
        assert_eq!(
            match_prefix("noMimeType,whatever"),
            Err(GrammarError::MalformedMediaType)
        );
    }

    #[test]
    fn parameter_without_value_before_comma() {
        assert_eq!(
            match_prefix("also/no;mimeType,whatever"),
            Err(GrammarError::MalformedMediaType)
        );
    }

    #[test]
    fn token_predicate() {
        assert!(is_token("image"));
        assert!(is_token("x-foo+bar.baz"));
        assert!(!is_token(""));
        assert!(!is_token("a/b"));
        assert!(!is_token("a b"));
    }
}
