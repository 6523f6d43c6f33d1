/*
 * parser.rs
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

//! HTTP/1.1 response push parser: status line, headers, body (Content-Length, chunked,
//! or read until the server closes).

use bytes::{Buf, BytesMut};
use std::io;

/// Callback for HTTP/1.1 response events.
pub trait H1ResponseHandler {
    fn status(&mut self, code: u16, reason: Option<&str>);
    /// Response header or chunked trailer.
    fn header(&mut self, name: &str, value: &str);
    fn body_chunk(&mut self, data: &[u8]);
    fn complete(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Idle,
    StatusLine,
    Headers,
    /// Headers done; the connection must call set_body_mode().
    HeadersComplete,
    Body,
    UntilClose,
    ChunkSize,
    ChunkData,
    ChunkDataEnd,
    ChunkTrailer,
}

/// How the body of the current response is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    None,
    Length(u64),
    Chunked,
    UntilClose,
}

/// Push parser for one HTTP/1.1 response at a time. Feed bytes via `receive`.
pub struct ResponseParser {
    state: ParseState,
    /// Bytes left in the fixed-length body or current chunk.
    remaining: u64,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::StatusLine,
            remaining: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ParseState::StatusLine;
        self.remaining = 0;
    }

    fn find_crlf(buf: &[u8]) -> Option<usize> {
        buf.windows(2).position(|w| w == b"\r\n")
    }

    fn invalid(msg: &str) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
    }

    /// Called once headers are complete. `BodyMode::None` and `Length(0)` complete at once.
    pub fn set_body_mode<H: H1ResponseHandler>(&mut self, mode: BodyMode, handler: &mut H) {
        match mode {
            BodyMode::None | BodyMode::Length(0) => {
                self.state = ParseState::Idle;
                handler.complete();
            }
            BodyMode::Length(n) => {
                self.remaining = n;
                self.state = ParseState::Body;
            }
            BodyMode::Chunked => self.state = ParseState::ChunkSize,
            BodyMode::UntilClose => self.state = ParseState::UntilClose,
        }
    }

    /// Consume and parse as much as possible from buf. Partial lines stay in buf.
    /// Stops at `HeadersComplete` and `Idle` so the caller can act.
    pub fn receive<H: H1ResponseHandler>(
        &mut self,
        buf: &mut BytesMut,
        handler: &mut H,
    ) -> Result<(), io::Error> {
        while !buf.is_empty() {
            match self.state {
                ParseState::Idle | ParseState::HeadersComplete => return Ok(()),
                ParseState::StatusLine => {
                    let Some(line_end) = Self::find_crlf(buf) else {
                        return Ok(());
                    };
                    let line = buf.split_to(line_end + 2);
                    let line = std::str::from_utf8(&line[..line_end])
                        .map_err(|_| Self::invalid("invalid status line UTF-8"))?;
                    // HTTP/1.1 200 OK or HTTP/1.1 200
                    let mut parts = line.splitn(3, ' ');
                    let version = parts.next().unwrap_or("");
                    if !version.starts_with("HTTP/") {
                        return Err(Self::invalid("malformed status line"));
                    }
                    let code = parts
                        .next()
                        .and_then(|s| s.parse::<u16>().ok())
                        .ok_or_else(|| Self::invalid("malformed status code"))?;
                    handler.status(code, parts.next());
                    self.state = ParseState::Headers;
                }
                ParseState::Headers | ParseState::ChunkTrailer => {
                    let Some(line_end) = Self::find_crlf(buf) else {
                        return Ok(());
                    };
                    let line = buf.split_to(line_end + 2);
                    if line_end == 0 {
                        if self.state == ParseState::Headers {
                            self.state = ParseState::HeadersComplete;
                        } else {
                            self.state = ParseState::Idle;
                            handler.complete();
                        }
                        return Ok(());
                    }
                    let line = std::str::from_utf8(&line[..line_end])
                        .map_err(|_| Self::invalid("invalid header UTF-8"))?;
                    let (name, value) = line
                        .split_once(':')
                        .ok_or_else(|| Self::invalid("header line without colon"))?;
                    handler.header(name.trim(), value.trim());
                }
                ParseState::Body => {
                    let n = (self.remaining.min(buf.len() as u64)) as usize;
                    let data = buf.split_to(n);
                    handler.body_chunk(&data);
                    self.remaining -= n as u64;
                    if self.remaining == 0 {
                        self.state = ParseState::Idle;
                        handler.complete();
                        return Ok(());
                    }
                }
                ParseState::UntilClose => {
                    let data = buf.split();
                    handler.body_chunk(&data);
                }
                ParseState::ChunkSize => {
                    let Some(line_end) = Self::find_crlf(buf) else {
                        return Ok(());
                    };
                    let line = buf.split_to(line_end + 2);
                    let line = std::str::from_utf8(&line[..line_end])
                        .map_err(|_| Self::invalid("invalid chunk size UTF-8"))?;
                    let size_str = line.split(';').next().unwrap_or("").trim();
                    let size = u64::from_str_radix(size_str, 16)
                        .map_err(|_| Self::invalid("invalid chunk size"))?;
                    if size == 0 {
                        self.state = ParseState::ChunkTrailer;
                    } else {
                        self.remaining = size;
                        self.state = ParseState::ChunkData;
                    }
                }
                ParseState::ChunkData => {
                    let n = (self.remaining.min(buf.len() as u64)) as usize;
                    let data = buf.split_to(n);
                    handler.body_chunk(&data);
                    self.remaining -= n as u64;
                    if self.remaining == 0 {
                        self.state = ParseState::ChunkDataEnd;
                    }
                }
                ParseState::ChunkDataEnd => {
                    if buf.len() < 2 {
                        return Ok(());
                    }
                    if &buf[..2] != b"\r\n" {
                        return Err(Self::invalid("missing CRLF after chunk data"));
                    }
                    buf.advance(2);
                    self.state = ParseState::ChunkSize;
                }
            }
        }
        Ok(())
    }

    /// The server closed the connection. Completes a read-until-close body; anything
    /// else mid-response is an unexpected EOF.
    pub fn finish<H: H1ResponseHandler>(&mut self, handler: &mut H) -> Result<(), io::Error> {
        match self.state {
            ParseState::UntilClose => {
                self.state = ParseState::Idle;
                handler.complete();
                Ok(())
            }
            ParseState::Idle => Ok(()),
            _ => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "HTTP connection closed mid-response",
            )),
        }
    }
}
