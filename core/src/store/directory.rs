/*
 * directory.rs
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

//! RemoteDirectory trait: the three read operations folder materialization needs.
//!
//! Calls block until the remote answers. Implementations must not retry; a failure is
//! reported as `OxioError::RemoteUnavailable` and aborts the folder being built.

use chrono::{DateTime, Utc};

use crate::store::error::OxioError;

/// OX folder columns requested when listing subfolders (id, parent, title, module, type, subfolders).
pub const FOLDER_LIST_COLUMNS: &[u32] = &[1, 20, 300, 301, 302, 304];

/// OX mail columns requested when listing messages (id, folder, from, to, cc, subject, received).
pub const MAIL_LIST_COLUMNS: &[u32] = &[600, 601, 603, 604, 605, 607, 610];

/// Metadata for one folder (`folders?action=get`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderRecord {
    /// Empty for the top of the tree.
    pub parent_locator: String,
    pub display_name: String,
    pub has_subfolders: bool,
    pub total_messages: u64,
}

/// One row of `folders?action=list`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubfolderRecord {
    pub locator: String,
    pub parent_locator: String,
    pub display_name: String,
    pub has_subfolders: bool,
}

/// One row of `mail?action=all`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageRecord {
    pub locator: String,
    pub folder_locator: String,
    pub subject: Option<String>,
    pub from: Vec<String>,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub received: Option<DateTime<Utc>>,
}

/// Authenticated read access to the remote groupware store.
pub trait RemoteDirectory: Send + Sync {
    /// Fetch metadata for the folder at `locator`.
    fn fetch_folder(&self, locator: &str) -> Result<FolderRecord, OxioError>;

    /// List the direct child folders of `locator`, in server order.
    fn list_subfolders(
        &self,
        locator: &str,
        columns: &[u32],
    ) -> Result<Vec<SubfolderRecord>, OxioError>;

    /// List the messages in `locator`, in server order.
    fn list_messages(&self, locator: &str, columns: &[u32]) -> Result<Vec<MessageRecord>, OxioError>;
}
