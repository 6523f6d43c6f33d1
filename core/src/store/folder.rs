/*
 * folder.rs
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

//! Folder: one materialized OX folder with its cached child descriptors.
//!
//! A Folder is built in one shot from live remote data and never changes afterwards.
//! Every remote fetch happens before the shared index is touched, so a failed fetch
//! leaves no trace: either a complete Folder comes back or an error does.
//! Opening a child always materializes a new Folder; nothing is reused across opens.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::store::directory::{
    MessageRecord, RemoteDirectory, FOLDER_LIST_COLUMNS, MAIL_LIST_COLUMNS,
};
use crate::store::error::OxioError;
use crate::store::index::{IdentityIndex, NodeId};
use crate::store::kinds::TableType;
use crate::store::table::{PropertyValue, Row, RowView};

/// Property name: child locator.
pub const PROP_URI: &str = "uri";
/// Property name: locator of the listing folder.
pub const PROP_PARENT_URI: &str = "parent_uri";
/// Property name: display name.
pub const PID_TAG_DISPLAY_NAME: &str = "PidTagDisplayName";
/// Property name: whether the child has children of its own.
pub const PROP_HAS_SUBFOLDERS: &str = "has_subfolders";
/// Property name: host folder id allocated for the child.
pub const PID_TAG_FOLDER_ID: &str = "PidTagFolderId";

/// Shallow descriptor of a child folder, captured at listing time.
#[derive(Debug, Clone, PartialEq)]
pub struct SubfolderEntry {
    pub id: NodeId,
    pub locator: String,
    pub parent_locator: String,
    pub display_name: String,
    pub has_subfolders: bool,
}

impl SubfolderEntry {
    /// Value of a named property, or None if descriptors do not carry that name.
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            PROP_URI => Some(PropertyValue::Text(self.locator.clone())),
            PROP_PARENT_URI => Some(PropertyValue::Text(self.parent_locator.clone())),
            PID_TAG_DISPLAY_NAME => Some(PropertyValue::Text(self.display_name.clone())),
            PROP_HAS_SUBFOLDERS => Some(PropertyValue::Bool(self.has_subfolders)),
            PID_TAG_FOLDER_ID => Some(PropertyValue::Id(self.id.0)),
            _ => None,
        }
    }
}

/// Shallow descriptor of a message. Messages get no host ids; rows are not projected.
pub type MessageEntry = MessageRecord;

/// A materialized folder.
pub struct Folder {
    id: NodeId,
    locator: String,
    parent_locator: String,
    parent_id: Option<NodeId>,
    display_name: String,
    has_subfolders: bool,
    message_total: u64,
    subfolders: Vec<SubfolderEntry>,
    messages: Vec<MessageEntry>,
    index: Arc<IdentityIndex>,
    directory: Arc<dyn RemoteDirectory>,
}

impl Folder {
    /// Fetch `locator` and its children and build the folder.
    ///
    /// `parent_id` is None for the root. Child ids are allocated through `index`, so the
    /// index must already hold at least one entry (the context binds the root first).
    pub fn materialize(
        index: Arc<IdentityIndex>,
        directory: Arc<dyn RemoteDirectory>,
        locator: &str,
        id: NodeId,
        parent_id: Option<NodeId>,
    ) -> Result<Self, OxioError> {
        debug!(locator, %id, "materializing folder");
        let record = directory.fetch_folder(locator)?;

        let subfolder_records = if record.has_subfolders {
            directory.list_subfolders(locator, FOLDER_LIST_COLUMNS)?
        } else {
            Vec::new()
        };
        let messages = if record.total_messages > 0 {
            directory.list_messages(locator, MAIL_LIST_COLUMNS)?
        } else {
            Vec::new()
        };

        // All fetches succeeded; now publish what we learned to the index.
        if let Some(pid) = parent_id {
            if !record.parent_locator.is_empty() && !index.contains_id(pid) {
                index.bind(pid, &record.parent_locator);
            }
        }
        let mut subfolders = Vec::with_capacity(subfolder_records.len());
        for sub in subfolder_records {
            let child_id = index.allocate_or_lookup(&sub.locator)?;
            subfolders.push(SubfolderEntry {
                id: child_id,
                locator: sub.locator,
                parent_locator: locator.to_string(),
                display_name: sub.display_name,
                has_subfolders: sub.has_subfolders,
            });
        }

        info!(
            locator,
            %id,
            subfolders = subfolders.len(),
            messages = messages.len(),
            "folder materialized"
        );
        Ok(Self {
            id,
            locator: locator.to_string(),
            parent_locator: record.parent_locator,
            parent_id,
            display_name: record.display_name,
            has_subfolders: record.has_subfolders,
            message_total: record.total_messages,
            subfolders,
            messages,
            index,
            directory,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn parent_locator(&self) -> &str {
        &self.parent_locator
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn has_subfolders(&self) -> bool {
        self.has_subfolders
    }

    /// Message total reported by the folder metadata (not the listed count).
    pub fn message_total(&self) -> u64 {
        self.message_total
    }

    pub fn subfolders(&self) -> &[SubfolderEntry] {
        &self.subfolders
    }

    pub fn messages(&self) -> &[MessageEntry] {
        &self.messages
    }

    /// Open a child by host id. The id must have been indexed by an earlier listing.
    pub fn open_folder(&self, child_id: NodeId) -> Result<Folder, OxioError> {
        let child_locator = match self.index.locator_for(child_id) {
            Some(l) => l,
            None => {
                warn!(id = %child_id, parent = %self.id, "child not indexed");
                return Err(OxioError::NotFound(child_id));
            }
        };
        Folder::materialize(
            self.index.clone(),
            self.directory.clone(),
            &child_locator,
            child_id,
            Some(self.id),
        )
    }

    /// Folder creation is not supported; the remote store is read-only here.
    pub fn create_folder(&self, properties: &Row, child_id: NodeId) -> Result<Folder, OxioError> {
        warn!(
            parent = %self.id,
            id = %child_id,
            properties = properties.len(),
            "create_folder not implemented"
        );
        Err(OxioError::NotImplemented("create_folder"))
    }

    /// Folder deletion is not supported.
    pub fn delete(&self) -> Result<(), OxioError> {
        warn!(id = %self.id, "delete not implemented");
        Err(OxioError::NotImplemented("delete"))
    }

    /// Number of enumerable children in `table_type`. Only subfolders are enumerable;
    /// listed messages are kept as a snapshot but count zero, like every other category.
    pub fn child_count(&self, table_type: TableType) -> u32 {
        let count = match table_type {
            t if t.is_unsupported() => 0,
            _ => self.subfolders.len(),
        };
        debug!(id = %self.id, ?table_type, count, "child count");
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Open a row view over this folder's children, returning it with its row count.
    pub fn open_table(self: &Arc<Self>, table_type: TableType) -> (RowView, u32) {
        let table = RowView::new(self.clone(), table_type);
        let count = self.child_count(table_type);
        (table, count)
    }
}

impl std::fmt::Debug for Folder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Folder")
            .field("id", &self.id)
            .field("locator", &self.locator)
            .field("parent_id", &self.parent_id)
            .field("subfolders", &self.subfolders.len())
            .field("messages", &self.messages.len())
            .finish()
    }
}
