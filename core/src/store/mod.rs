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

//! Store abstraction exposed to mapistore: Backend, Context, Folder, RowView, and the
//! identity index that maps host ids to OX locators.

mod backend;
mod context;
mod directory;
mod error;
mod folder;
mod index;
mod kinds;
mod table;

pub use backend::{Backend, ContextInfo, BACKEND_DESCRIPTION, BACKEND_NAME, BACKEND_NAMESPACE};
pub use context::Context;
pub use directory::{
    FolderRecord, MessageRecord, RemoteDirectory, SubfolderRecord, FOLDER_LIST_COLUMNS,
    MAIL_LIST_COLUMNS,
};
pub use error::{
    OxioError, MAPISTORE_ERROR, MAPISTORE_ERR_INVALID_PARAMETER, MAPISTORE_ERR_NOT_FOUND,
    MAPISTORE_ERR_NOT_IMPLEMENTED, MAPISTORE_SUCCESS,
};
pub use folder::{
    Folder, MessageEntry, SubfolderEntry, PID_TAG_DISPLAY_NAME, PID_TAG_FOLDER_ID,
    PROP_HAS_SUBFOLDERS, PROP_PARENT_URI, PROP_URI,
};
pub use index::{IdentityIndex, NodeId};
pub use kinds::{QueryType, TableType};
pub use table::{PropertyValue, Row, RowView};
