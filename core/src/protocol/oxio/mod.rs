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

//! Open-Xchange App Suite HTTP API session.
//!
//! Logs in once, then answers the `RemoteDirectory` reads with `folders` and `mail`
//! module requests over one keep-alive connection. Calls are blocking: the session owns
//! a current-thread tokio runtime and drives each request to completion on it.

pub mod records;

use std::io;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;
use tokio::runtime::{Builder, Runtime};
use tokio::time::timeout;
use tracing::{debug, info, trace};

use crate::config::{Config, ServerConfig};
use crate::protocol::http::{HttpClient, HttpConnection, Method, RequestBuilder, Response};
use crate::store::{FolderRecord, MessageRecord, OxioError, RemoteDirectory, SubfolderRecord};

const CLIENT_ID: &str = "open-xchange-appsuite";
const CLIENT_LANGUAGE: &str = "en_US";
const CLIENT_VERSION: &str = "7.6.0-7";
/// Server-side session timeout requested at login, in milliseconds.
const LOGIN_TIMEOUT_MS: &str = "10000";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated App Suite session.
pub struct OxSession {
    server: ServerConfig,
    username: String,
    session: String,
    /// `name=value` pairs from the login `Set-Cookie` headers, ready for a `Cookie` header.
    cookies: String,
    runtime: Runtime,
    connection: Mutex<Option<HttpConnection>>,
}

impl OxSession {
    /// Log in with the configured credentials.
    pub fn login(config: &Config) -> Result<Self, OxioError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let server = config.server.clone();

        let mut request = RequestBuilder::new(Method::Post, endpoint(&server, "login"));
        request
            .query("action", "login")
            .query("client", CLIENT_ID)
            .query("language", CLIENT_LANGUAGE)
            .query("name", &config.username)
            .query("password", &config.password)
            .query("timeout", LOGIN_TIMEOUT_MS)
            .query("version", CLIENT_VERSION)
            .header("Accept", "application/json");

        let mut slot = None;
        let response = runtime.block_on(send_on(&mut slot, &server, &request))?;
        check_status(&response, "login")?;
        let reply = records::parse_reply(&response.body)?;
        let session = records::decode_login(&reply)?;
        let cookies = collect_cookies(&response);
        info!(host = %server.host, user = %config.username, "logged in");

        Ok(Self {
            server,
            username: config.username.clone(),
            session,
            cookies,
            runtime,
            connection: Mutex::new(slot),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// GET `{base}/{module}?action=..&session=..&<params>` and return the reply's `data`.
    fn call(&self, module: &str, action: &str, params: &[(&str, &str)]) -> Result<Value, OxioError> {
        let mut request = RequestBuilder::new(Method::Get, endpoint(&self.server, module));
        request.query("action", action).query("session", &self.session);
        for (name, value) in params {
            request.query(name, value);
        }
        request.header("Accept", "application/json");
        if !self.cookies.is_empty() {
            request.header("Cookie", self.cookies.clone());
        }

        let response = {
            let mut slot = self.connection.lock().unwrap_or_else(|e| e.into_inner());
            self.runtime
                .block_on(send_on(&mut *slot, &self.server, &request))?
        };
        check_status(&response, module)?;
        trace!(module, action, body = %String::from_utf8_lossy(&response.body), "reply");
        let reply = records::parse_reply(&response.body)?;
        records::into_data(reply)
    }
}

impl RemoteDirectory for OxSession {
    fn fetch_folder(&self, locator: &str) -> Result<FolderRecord, OxioError> {
        debug!(locator, "fetch folder");
        let data = self.call("folders", "get", &[("id", locator)])?;
        records::decode_folder(&data)
    }

    fn list_subfolders(
        &self,
        locator: &str,
        columns: &[u32],
    ) -> Result<Vec<SubfolderRecord>, OxioError> {
        debug!(locator, "list subfolders");
        let cols = column_list(columns);
        let data = self.call(
            "folders",
            "list",
            &[("all", "1"), ("columns", &cols), ("parent", locator)],
        )?;
        records::decode_subfolders(&data, columns)
    }

    fn list_messages(&self, locator: &str, columns: &[u32]) -> Result<Vec<MessageRecord>, OxioError> {
        debug!(locator, "list messages");
        let cols = column_list(columns);
        let data = self.call("mail", "all", &[("folder", locator), ("columns", &cols)])?;
        records::decode_messages(&data, columns)
    }
}

/// Send on the cached connection, connecting first when there is none or the server
/// closed the previous one. A failed exchange drops the connection; it is not retried.
async fn send_on(
    slot: &mut Option<HttpConnection>,
    server: &ServerConfig,
    request: &RequestBuilder,
) -> io::Result<Response> {
    trace!(method = request.method.as_str(), target = %redact(&request.target()), "request");
    let mut conn = match slot.take() {
        Some(conn) if conn.is_reusable() => conn,
        _ => HttpClient::connect(&server.host, server.port, server.tls).await?,
    };
    let response = timeout(REQUEST_TIMEOUT, conn.send(request))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "request timed out"))??;
    if conn.is_reusable() {
        *slot = Some(conn);
    }
    Ok(response)
}

fn endpoint(server: &ServerConfig, module: &str) -> String {
    format!("{}/{}", server.base_path.trim_end_matches('/'), module)
}

fn check_status(response: &Response, module: &str) -> Result<(), OxioError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(OxioError::remote(format!(
            "{} returned HTTP {} {}",
            module,
            response.code,
            response.reason.as_deref().unwrap_or("")
        )))
    }
}

fn collect_cookies(response: &Response) -> String {
    response
        .headers_named("Set-Cookie")
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect::<Vec<_>>()
        .join("; ")
}

fn column_list(columns: &[u32]) -> String {
    columns
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Request target with `password` and `session` values masked.
fn redact(target: &str) -> String {
    let Some((path, query)) = target.split_once('?') else {
        return target.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if name == "password" || name == "session" => format!("{}=***", name),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_masks_secrets() {
        assert_eq!(
            redact("/appsuite/api/login?action=login&name=al&password=pw&timeout=1"),
            "/appsuite/api/login?action=login&name=al&password=***&timeout=1"
        );
        assert_eq!(
            redact("/appsuite/api/folders?action=get&session=abc&id=x"),
            "/appsuite/api/folders?action=get&session=***&id=x"
        );
        assert_eq!(redact("/plain"), "/plain");
    }

    #[test]
    fn cookies_keep_name_value_only() {
        let response = Response {
            code: 200,
            reason: None,
            headers: vec![
                ("Set-Cookie".into(), "JSESSIONID=abc; Path=/appsuite; HttpOnly".into()),
                ("set-cookie".into(), "open-xchange-secret-x=yz; Secure".into()),
                ("Content-Type".into(), "application/json".into()),
            ],
            body: Default::default(),
        };
        assert_eq!(
            collect_cookies(&response),
            "JSESSIONID=abc; open-xchange-secret-x=yz"
        );
    }

    #[test]
    fn endpoint_joins_base_path() {
        let mut server = ServerConfig::default();
        assert_eq!(endpoint(&server, "login"), "/appsuite/api/login");
        server.base_path = "/ajax/".into();
        assert_eq!(endpoint(&server, "mail"), "/ajax/mail");
    }

    #[test]
    fn columns_join_with_commas() {
        assert_eq!(column_list(&[1, 20, 300]), "1,20,300");
    }
}
