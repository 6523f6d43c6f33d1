/*
 * table.rs
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

//! RowView: column-projected, positional enumeration over a folder's cached children.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::store::error::OxioError;
use crate::store::folder::Folder;
use crate::store::kinds::{QueryType, TableType};

/// A property value, passed through as captured from the remote listing.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Bool(bool),
    Id(u64),
}

/// Named property values in requested-column order. Each name appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row(Vec<(String, PropertyValue)>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing an earlier value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Serialized as a JSON object keyed by property name, in row order.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Table over one folder's children of a single category.
pub struct RowView {
    folder: Arc<Folder>,
    table_type: TableType,
    columns: Vec<String>,
}

impl RowView {
    pub fn new(folder: Arc<Folder>, table_type: TableType) -> Self {
        Self {
            folder,
            table_type,
            columns: Vec::new(),
        }
    }

    pub fn table_type(&self) -> TableType {
        self.table_type
    }

    pub fn folder(&self) -> &Arc<Folder> {
        &self.folder
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Replace the requested column set.
    pub fn set_columns(&mut self, columns: Vec<String>) {
        debug!(table_type = ?self.table_type, columns = ?columns, "set columns");
        self.columns = columns;
    }

    pub fn row_count(&self) -> u32 {
        self.folder.child_count(self.table_type)
    }

    /// Row count as queried by the host; the query type does not filter anything.
    pub fn get_row_count(&self, _query: QueryType) -> u32 {
        self.row_count()
    }

    /// Project row `index` onto the requested columns.
    ///
    /// An empty table yields an empty row for any index. Message and unsupported tables
    /// always yield empty rows. For a non-empty folder table, an index past the end is
    /// `RowOutOfRange`.
    pub fn get_row(&self, index: u32, _query: QueryType) -> Result<(&[String], Row), OxioError> {
        let count = self.row_count();
        if count == 0 {
            return Ok((self.columns.as_slice(), Row::new()));
        }
        let row = match self.table_type {
            TableType::Folders => self.folder_row(index, count)?,
            _ => Row::new(),
        };
        Ok((self.columns.as_slice(), row))
    }

    fn folder_row(&self, index: u32, count: u32) -> Result<Row, OxioError> {
        let entry = self
            .folder
            .subfolders()
            .get(index as usize)
            .ok_or(OxioError::RowOutOfRange { index, count })?;
        let mut row = Row::new();
        for name in &self.columns {
            if row.contains(name) {
                continue;
            }
            if let Some(value) = entry.property(name) {
                row.insert(name.clone(), value);
            }
        }
        debug!(folder = %self.folder.id(), index, properties = row.len(), "folder row");
        Ok(row)
    }
}
