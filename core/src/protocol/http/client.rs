/*
 * client.rs
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

//! HTTP client: connect to a host, then use the connection to send requests.

use std::io;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::net::http_client_config;
use crate::protocol::http::connection::{HttpConnection, HttpStream};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client. Create with `HttpClient::connect(host, port, use_tls)`.
pub struct HttpClient;

impl HttpClient {
    /// Connect to the given host and port, with a TLS handshake if `use_tls` is true.
    pub async fn connect(host: &str, port: u16, use_tls: bool) -> io::Result<HttpConnection> {
        let addr = format!("{}:{}", host, port);
        let tcp = timeout(CONNECT_TIMEOUT, TcpStream::connect(&addr))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "TCP connect timed out"))??;
        debug!(%addr, tls = use_tls, "connected");

        if use_tls {
            let server_name = ServerName::try_from(host.to_string())
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "invalid host name"))?;
            let connector = TlsConnector::from(http_client_config());
            let tls = timeout(CONNECT_TIMEOUT, connector.connect(server_name, tcp))
                .await
                .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "TLS handshake timed out"))?
                .map_err(|e| io::Error::new(io::ErrorKind::ConnectionRefused, e))?;
            Ok(HttpConnection::new(
                HttpStream::Tls(Box::new(tls)),
                host.to_string(),
                port,
                true,
            ))
        } else {
            Ok(HttpConnection::new(
                HttpStream::Plain(tcp),
                host.to_string(),
                port,
                false,
            ))
        }
    }
}
