/*
 * backend.rs
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

//! Backend: the named entry point the host registers. Lists context capabilities and
//! creates contexts, all sharing one remote session.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::protocol::oxio::OxSession;
use crate::store::context::Context;
use crate::store::directory::RemoteDirectory;
use crate::store::error::OxioError;

pub const BACKEND_NAME: &str = "oxio";
pub const BACKEND_DESCRIPTION: &str = "open-xchange backend";
pub const BACKEND_NAMESPACE: &str = "oxio://";

/// One context capability: a display name and the locator it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextInfo {
    pub name: String,
    pub uri_pattern: String,
}

impl ContextInfo {
    fn new(name: &str, uri_pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            uri_pattern: uri_pattern.to_string(),
        }
    }
}

pub struct Backend {
    directory: Arc<dyn RemoteDirectory>,
}

impl Backend {
    /// Backend over an already-authenticated directory.
    pub fn new(directory: Arc<dyn RemoteDirectory>) -> Self {
        Self { directory }
    }

    /// Load credentials from the default config directory and log in to Open-Xchange.
    pub fn connect() -> Result<Self, OxioError> {
        let config = Config::load_default()?;
        Self::connect_with(&config)
    }

    pub fn connect_with(config: &Config) -> Result<Self, OxioError> {
        let session = OxSession::login(config)?;
        Ok(Self::new(Arc::new(session)))
    }

    pub fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    pub fn description(&self) -> &'static str {
        BACKEND_DESCRIPTION
    }

    pub fn namespace(&self) -> &'static str {
        BACKEND_NAMESPACE
    }

    pub fn init(&self) -> Result<(), OxioError> {
        info!(backend = BACKEND_NAME, "init");
        Ok(())
    }

    /// Context capabilities for `username`, in a fixed order.
    pub fn list_contexts(&self, username: &str) -> Vec<ContextInfo> {
        info!(backend = BACKEND_NAME, username, "list_contexts");
        vec![
            ContextInfo::new("inbox", "default0/INBOX"),
            ContextInfo::new("calendar", "CALENDAR"),
        ]
    }

    pub fn create_context(&self, uri: &str) -> Context {
        Context::new(uri, self.directory.clone())
    }
}
