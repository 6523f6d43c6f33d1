/*
 * response.rs
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

//! Collected HTTP response and the parser handler that builds it.

use bytes::{Bytes, BytesMut};

use crate::protocol::http::parser::{BodyMode, H1ResponseHandler};
use crate::protocol::http::request::Method;

/// A complete HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub code: u16,
    pub reason: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// First header value named `name` (case-insensitive).
    pub fn header<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        self.headers_named(name).next()
    }

    /// All header values named `name`, in arrival order.
    pub fn headers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// True when the server will close the connection after this response.
    pub fn closes_connection(&self) -> bool {
        self.header("connection")
            .map(|v| v.eq_ignore_ascii_case("close"))
            .unwrap_or(false)
    }
}

/// Accumulates parser events into a `Response`.
#[derive(Default)]
pub(crate) struct ResponseCollector {
    code: u16,
    reason: Option<String>,
    headers: Vec<(String, String)>,
    body: BytesMut,
    complete: bool,
}

impl ResponseCollector {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body framing for the response whose headers were just parsed.
    pub(crate) fn body_mode(&self, method: Method) -> BodyMode {
        if method == Method::Head || (100..200).contains(&self.code) || self.code == 204 || self.code == 304 {
            return BodyMode::None;
        }
        let chunked = self
            .header_value("transfer-encoding")
            .map(|v| v.to_ascii_lowercase().contains("chunked"))
            .unwrap_or(false);
        if chunked {
            return BodyMode::Chunked;
        }
        match self
            .header_value("content-length")
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            Some(n) => BodyMode::Length(n),
            None => BodyMode::UntilClose,
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.complete
    }

    pub(crate) fn into_response(self) -> Response {
        Response {
            code: self.code,
            reason: self.reason,
            headers: self.headers,
            body: self.body.freeze(),
        }
    }
}

impl H1ResponseHandler for ResponseCollector {
    fn status(&mut self, code: u16, reason: Option<&str>) {
        self.code = code;
        self.reason = reason.map(|s| s.to_string());
    }

    fn header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn body_chunk(&mut self, data: &[u8]) {
        self.body.extend_from_slice(data);
    }

    fn complete(&mut self) {
        self.complete = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector(code: u16, headers: &[(&str, &str)]) -> ResponseCollector {
        let mut c = ResponseCollector::default();
        c.status(code, None);
        for (k, v) in headers {
            c.header(k, v);
        }
        c
    }

    #[test]
    fn body_mode_selection() {
        assert_eq!(collector(204, &[]).body_mode(Method::Get), BodyMode::None);
        assert_eq!(
            collector(200, &[("Content-Length", "5")]).body_mode(Method::Head),
            BodyMode::None
        );
        assert_eq!(
            collector(200, &[("Transfer-Encoding", "Chunked"), ("Content-Length", "5")])
                .body_mode(Method::Get),
            BodyMode::Chunked
        );
        assert_eq!(
            collector(200, &[("content-length", " 42 ")]).body_mode(Method::Get),
            BodyMode::Length(42)
        );
        assert_eq!(collector(200, &[]).body_mode(Method::Get), BodyMode::UntilClose);
    }

    #[test]
    fn response_header_helpers() {
        let mut c = collector(200, &[("Set-Cookie", "a=1"), ("set-cookie", "b=2"), ("Connection", "close")]);
        c.body_chunk(b"{}");
        c.complete();
        assert!(c.is_complete());
        let r = c.into_response();
        assert!(r.is_success());
        assert_eq!(r.headers_named("Set-Cookie").collect::<Vec<_>>(), vec!["a=1", "b=2"]);
        assert!(r.closes_connection());
        assert_eq!(&r.body[..], b"{}");
    }

    #[test]
    fn header_lookup_with_owned_name() {
        let r = Response {
            code: 200,
            reason: None,
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: Bytes::new(),
        };
        let name = String::from("content-type");
        assert_eq!(r.header(&name), Some("application/json"));
        assert_eq!(r.header("x-missing"), None);
    }
}
