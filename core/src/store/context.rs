/*
 * context.rs
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

//! Context: one root locator plus the identity index shared by every folder opened under it.
//!
//! Expected workflow: the host creates the context with a URI, then calls
//! `get_root_folder` with the id it assigned to that URI. That call seeds the index;
//! every later allocation counts up from the ids bound so far.

use std::sync::Arc;

use tracing::{debug, info};

use crate::store::directory::RemoteDirectory;
use crate::store::error::OxioError;
use crate::store::folder::Folder;
use crate::store::index::{IdentityIndex, NodeId};

pub struct Context {
    uri: String,
    index: Arc<IdentityIndex>,
    directory: Arc<dyn RemoteDirectory>,
}

impl Context {
    pub fn new(uri: impl Into<String>, directory: Arc<dyn RemoteDirectory>) -> Self {
        let uri = uri.into();
        info!(uri = %uri, "context created");
        Self {
            uri,
            index: Arc::new(IdentityIndex::new()),
            directory,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn index(&self) -> &Arc<IdentityIndex> {
        &self.index
    }

    /// Bind `id` to the context URI and materialize the root folder.
    pub fn get_root_folder(&self, id: NodeId) -> Result<Folder, OxioError> {
        info!(uri = %self.uri, %id, "get_root_folder");
        self.index.bind(id, &self.uri);
        Folder::materialize(
            self.index.clone(),
            self.directory.clone(),
            &self.uri,
            id,
            None,
        )
    }

    /// Locator bound to `id`, or None for an unknown identifier.
    pub fn get_path(&self, id: NodeId) -> Option<String> {
        let path = self.index.locator_for(id);
        debug!(uri = %self.uri, %id, path = ?path, "get_path");
        path
    }
}
