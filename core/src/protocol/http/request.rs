/*
 * request.rs
 * Copyright (C) 2026 The Oxio Authors
 *
 * This file is part of Oxio, an Open-Xchange backend for mapistore.
 *
 * Oxio is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Oxio is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Oxio.  If not, see <http://www.gnu.org/licenses/>.
 */

//! HTTP request: method, path, query, headers, optional body.
//!
//! Built via RequestBuilder; sending is done by the connection.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Query component: encode everything except RFC 3986 unreserved characters.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Head,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Head => "HEAD",
        }
    }
}

/// Mutable request builder.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub method: Method,
    pub path: String,
    /// Already percent-encoded `name=value` pairs.
    pub query: Vec<String>,
    /// Sent in insertion order; names may repeat.
    pub headers: Vec<(String, String)>,
    /// Sent with a Content-Length header when set.
    pub body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter; both name and value are percent-encoded.
    pub fn query(&mut self, name: &str, value: &str) -> &mut Self {
        self.query.push(format!(
            "{}={}",
            utf8_percent_encode(name, QUERY_VALUE),
            utf8_percent_encode(value, QUERY_VALUE)
        ));
        self
    }

    /// Add a header. Repeated names are sent as separate header lines.
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(&mut self, data: Vec<u8>) -> &mut Self {
        self.body = Some(data);
        self
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Request target: path plus query string.
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.join("&"))
        }
    }
}
