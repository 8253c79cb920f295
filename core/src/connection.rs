/*
 * connection.rs
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

//! Read-only connection over a decoded data: URL. Exposes the content as a
//! byte stream plus simulated response headers (content-type, content-length)
//! with ordered, case-insensitive access.

use bytes::Bytes;

/// Errors at the connection boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// Reading was disabled (do_input = false) but the input stream was requested.
    ProtocolViolation,
    /// data: URLs cannot be written to.
    UnsupportedOperation,
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionError::ProtocolViolation => {
                write!(f, "cannot read from connection with do_input = false")
            }
            ConnectionError::UnsupportedOperation => {
                write!(f, "data: URLs are read-only")
            }
        }
    }
}

impl std::error::Error for ConnectionError {}

/// Connection to an already-decoded data: URL resource. Connecting is
/// idempotent: the stream and headers are materialized once and every later
/// access returns the same underlying buffer.
#[derive(Debug)]
pub struct DataUrlConnection {
    url: String,
    media_type: String,
    content: Bytes,
    do_input: bool,
    connected: bool,
    stream: Option<Bytes>,
    fields: Vec<(String, String)>,
}

impl DataUrlConnection {
    pub fn new(url: impl Into<String>, media_type: impl Into<String>, content: Bytes) -> Self {
        Self {
            url: url.into(),
            media_type: media_type.into(),
            content,
            do_input: true,
            connected: false,
            stream: None,
            fields: Vec::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Allow or forbid reading the input stream. Defaults to allowed.
    pub fn set_do_input(&mut self, do_input: bool) {
        self.do_input = do_input;
    }

    pub fn do_input(&self) -> bool {
        self.do_input
    }

    /// Materialize the stream and simulated headers. No-op after the first call.
    pub fn connect(&mut self) {
        if !self.connected {
            self.stream = Some(self.content.clone());
            self.fields = vec![
                ("content-type".to_string(), self.media_type.clone()),
                ("content-length".to_string(), self.content.len().to_string()),
            ];
            self.connected = true;
        }
    }

    /// The input stream: a handle over the decoded bytes. Repeated calls
    /// return handles sharing the same underlying buffer (no re-read).
    pub fn input_stream(&mut self) -> Result<Bytes, ConnectionError> {
        if !self.do_input {
            return Err(ConnectionError::ProtocolViolation);
        }
        self.connect();
        // connect() always fills the stream.
        Ok(self.stream.as_ref().cloned().unwrap_or_default())
    }

    /// There is no output stream; the resource is permanently read-only.
    pub fn output_stream(&mut self) -> Result<Bytes, ConnectionError> {
        Err(ConnectionError::UnsupportedOperation)
    }

    /// Header value by name, case-insensitive.
    pub fn header_field(&mut self, name: &str) -> Option<&str> {
        self.connect();
        self.fields
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Name of the nth header in insertion order.
    pub fn header_field_key(&mut self, n: usize) -> Option<&str> {
        self.connect();
        self.fields.get(n).map(|(k, _)| k.as_str())
    }

    /// Value of the nth header in insertion order.
    pub fn header_field_at(&mut self, n: usize) -> Option<&str> {
        self.connect();
        self.fields.get(n).map(|(_, v)| v.as_str())
    }

    /// All headers in insertion order.
    pub fn header_fields(&mut self) -> &[(String, String)] {
        self.connect();
        &self.fields
    }

    pub fn content_type(&self) -> &str {
        &self.media_type
    }

    pub fn content_length(&self) -> usize {
        self.content.len()
    }
}
