/*
 * connection.rs
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

//! HTTP connection: one TCP or TLS stream, drives the HTTP/1.1 parser, collects the response.
//! Keep-alive: the same connection serves successive requests until the server closes it.

use bytes::BytesMut;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream as TokioTlsStream;

use crate::protocol::http::parser::{ParseState, ResponseParser};
use crate::protocol::http::request::{Method, RequestBuilder};
use crate::protocol::http::response::{Response, ResponseCollector};

/// Unified stream: plain TCP or TLS. Implements AsyncRead + AsyncWrite.
pub enum HttpStream {
    Plain(TcpStream),
    Tls(Box<TokioTlsStream<TcpStream>>),
}

impl AsyncRead for HttpStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_read(cx, buf),
            HttpStream::Tls(s) => Pin::new(s.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for HttpStream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_write(cx, buf),
            HttpStream::Tls(s) => Pin::new(s.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_flush(cx),
            HttpStream::Tls(s) => Pin::new(s.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match &mut *self {
            HttpStream::Plain(s) => Pin::new(s).poll_shutdown(cx),
            HttpStream::Tls(s) => Pin::new(s.as_mut()).poll_shutdown(cx),
        }
    }
}

/// HTTP/1.1 connection. Call send() to issue a request and read its response.
pub struct HttpConnection {
    stream: HttpStream,
    host: String,
    port: u16,
    secure: bool,
    read_buf: BytesMut,
    parser: ResponseParser,
    /// Cleared once the server closed or announced `Connection: close`.
    reusable: bool,
}

impl HttpConnection {
    /// Wrap an already-connected stream. Used by HttpClient::connect().
    pub fn new(stream: HttpStream, host: String, port: u16, secure: bool) -> Self {
        Self {
            stream,
            host,
            port,
            secure,
            read_buf: BytesMut::with_capacity(8192),
            parser: ResponseParser::new(),
            reusable: true,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// False once this connection cannot carry another request.
    pub fn is_reusable(&self) -> bool {
        self.reusable
    }

    /// Send the request and read until the response is complete.
    pub async fn send(&mut self, request: &RequestBuilder) -> io::Result<Response> {
        if !self.reusable {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "HTTP connection already closed",
            ));
        }
        self.parser.reset();
        self.read_buf.clear();
        self.write_request(request).await?;

        let mut collector = ResponseCollector::default();
        let mut closed = false;
        loop {
            self.parser.receive(&mut self.read_buf, &mut collector)?;
            match self.parser.state() {
                ParseState::HeadersComplete => {
                    let mode = collector.body_mode(request.method);
                    self.parser.set_body_mode(mode, &mut collector);
                    continue;
                }
                ParseState::Idle => break,
                _ => {}
            }
            let mut tmp = [0u8; 8192];
            let n = self.stream.read(&mut tmp).await?;
            if n == 0 {
                closed = true;
                self.parser.finish(&mut collector)?;
                break;
            }
            self.read_buf.extend_from_slice(&tmp[..n]);
        }

        debug_assert!(collector.is_complete());
        let response = collector.into_response();
        if closed || response.closes_connection() {
            self.reusable = false;
        }
        Ok(response)
    }

    async fn write_request(&mut self, request: &RequestBuilder) -> io::Result<()> {
        let host_header = if (self.secure && self.port != 443) || (!self.secure && self.port != 80) {
            format!("{}:{}", self.host, self.port)
        } else {
            self.host.clone()
        };
        let mut req = format!(
            "{} {} HTTP/1.1\r\nHost: {}\r\n",
            request.method.as_str(),
            request.target(),
            host_header
        );
        for (k, v) in &request.headers {
            req.push_str(k);
            req.push_str(": ");
            req.push_str(v);
            req.push_str("\r\n");
        }
        if !request.has_header("Connection") {
            req.push_str("Connection: keep-alive\r\n");
        }
        match &request.body {
            Some(body) if !request.has_header("Content-Length") => {
                req.push_str(&format!("Content-Length: {}\r\n", body.len()));
            }
            None if request.method != Method::Get
                && request.method != Method::Head =>
            {
                req.push_str("Content-Length: 0\r\n");
            }
            _ => {}
        }
        req.push_str("\r\n");
        self.stream.write_all(req.as_bytes()).await?;
        if let Some(body) = &request.body {
            self.stream.write_all(body).await?;
        }
        self.stream.flush().await?;
        Ok(())
    }
}
