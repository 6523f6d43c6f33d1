/*
 * mod.rs
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

//! HTTP/1.1 client with push-parsed responses over plain TCP or rustls TLS.
//!
//! - Buffers: `bytes` crate (BytesMut for the parse buffer, Bytes for collected bodies).
//! - Bodies framed by Content-Length, chunked encoding, or connection close.
//! - One request in flight per connection; connections are kept alive between requests.

mod request;
mod response;

pub mod client;
pub mod connection;
pub mod parser;

pub use client::HttpClient;
pub use connection::{HttpConnection, HttpStream};
pub use request::{Method, RequestBuilder};
pub use response::Response;
