/*
 * config.rs
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

//! Credential and server configuration.
//!
//! Read from `config.xml` in the config directory (`$OXIO_CONFIG_DIR`, else `~/.oxio`).
//! `config.xml` may be under version control, so real secrets usually go into
//! `config-dbg.xml` next to it; that file is consulted when the primary one does not
//! provide both a username and a password. All XML reading uses the quick_xml parser.
//!
//! ```xml
//! <oxio>
//!   <server host="www.ox.io" port="443" tls="true" path="/appsuite/api"/>
//!   <username>alice</username>
//!   <password>secret</password>
//! </oxio>
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::{debug, info};

use crate::store::OxioError;

/// Primary config file name.
pub const CONFIG_FILE: &str = "config.xml";
/// Debug override, consulted when the primary file lacks credentials.
pub const DEBUG_CONFIG_FILE: &str = "config-dbg.xml";
/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "OXIO_CONFIG_DIR";

const DEFAULT_HOST: &str = "www.ox.io";
const DEFAULT_PORT: u16 = 443;
const DEFAULT_BASE_PATH: &str = "/appsuite/api";

/// Where the App Suite HTTP API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub tls: bool,
    /// API prefix, e.g. `/appsuite/api` (no trailing slash).
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            tls: true,
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }
}

/// Login credentials plus server location.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub server: ServerConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("server", &self.server)
            .finish()
    }
}

/// What one file provided; credentials may be missing.
#[derive(Debug, Default)]
struct FileConfig {
    username: Option<String>,
    password: Option<String>,
    server: ServerConfig,
}

impl FileConfig {
    fn into_config(self) -> Option<Config> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() => Some(Config {
                username,
                password,
                server: self.server,
            }),
            _ => None,
        }
    }
}

/// Default config directory: `$OXIO_CONFIG_DIR`, else `~/.oxio`.
pub fn default_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|h| h.join(".oxio"))
}

impl Config {
    /// Load from the default config directory.
    pub fn load_default() -> Result<Self, OxioError> {
        let dir = default_config_dir()
            .ok_or_else(|| OxioError::ConfigMissing("no config directory (HOME unset)".into()))?;
        Self::load_from_dir(&dir)
    }

    /// Load from `dir`: `config.xml` first, then `config-dbg.xml`.
    pub fn load_from_dir(dir: &Path) -> Result<Self, OxioError> {
        for name in [CONFIG_FILE, DEBUG_CONFIG_FILE] {
            let path = dir.join(name);
            let Some(file) = read_config_file(&path)? else {
                debug!(path = %path.display(), "config file absent");
                continue;
            };
            if let Some(config) = file.into_config() {
                info!(path = %path.display(), username = %config.username, "credentials loaded");
                return Ok(config);
            }
            debug!(path = %path.display(), "config file has no complete credentials");
        }
        Err(OxioError::ConfigMissing(format!(
            "no {} or {} with username and password in {}",
            CONFIG_FILE,
            DEBUG_CONFIG_FILE,
            dir.display()
        )))
    }
}

/// Read and parse one file. Ok(None) when it does not exist.
fn read_config_file(path: &Path) -> Result<Option<FileConfig>, OxioError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(OxioError::ConfigMissing(format!(
                "cannot read {}: {}",
                path.display(),
                e
            )))
        }
    };
    parse_config_xml(&content)
        .map(Some)
        .map_err(|e| OxioError::invalid(format!("{}: {}", path.display(), e)))
}

fn apply_server_attributes(e: &BytesStart<'_>, server: &mut ServerConfig) -> Result<(), String> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        let value = value.trim();
        match attr.key.as_ref() {
            b"host" => server.host = value.to_string(),
            b"port" => {
                server.port = value
                    .parse()
                    .map_err(|_| format!("invalid port '{}'", value))?
            }
            b"tls" => {
                server.tls = match value {
                    "true" | "1" | "yes" => true,
                    "false" | "0" | "no" => false,
                    other => return Err(format!("invalid tls flag '{}'", other)),
                }
            }
            b"path" => server.base_path = value.trim_end_matches('/').to_string(),
            _ => {}
        }
    }
    Ok(())
}

/// Parse `<oxio>` config XML.
fn parse_config_xml(content: &str) -> Result<FileConfig, String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut out = FileConfig::default();
    let mut element_name = Vec::<u8>::new();
    let mut in_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(format!("XML parse error: {}", e)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                let name = e.name();
                let name = name.as_ref();
                if name == b"oxio" {
                    in_root = true;
                } else if in_root && name == b"server" {
                    apply_server_attributes(&e, &mut out.server)?;
                } else if in_root && (name == b"username" || name == b"password") {
                    element_name.clear();
                    element_name.extend_from_slice(name);
                }
            }
            Ok(Event::Empty(e)) => {
                if in_root && e.name().as_ref() == b"server" {
                    apply_server_attributes(&e, &mut out.server)?;
                }
            }
            Ok(Event::Text(e)) => {
                if element_name.is_empty() {
                    continue;
                }
                let text = e.unescape().map_err(|e| e.to_string())?.trim().to_string();
                if element_name == b"username" {
                    out.username = Some(text);
                } else {
                    out.password = Some(text);
                }
                element_name.clear();
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"oxio" {
                    in_root = false;
                }
                element_name.clear();
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}
