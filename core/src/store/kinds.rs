/*
 * kinds.rs
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

//! Table and query discriminants, using the host's numeric codes. Used by folders, tables and FFI.

use crate::store::error::OxioError;

/// Child category a table enumerates. Only folders have rows here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TableType {
    Folders = 1,
    Messages = 2,
    /// Folder associated information (hidden messages).
    Fai = 3,
    Rules = 4,
    Attachments = 5,
    Permissions = 6,
}

impl TableType {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for the categories that always count zero and yield empty rows.
    /// Messages are listed but not enumerated, so they count here too.
    pub fn is_unsupported(self) -> bool {
        self != TableType::Folders
    }
}

impl TryFrom<u8> for TableType {
    type Error = OxioError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(TableType::Folders),
            2 => Ok(TableType::Messages),
            3 => Ok(TableType::Fai),
            4 => Ok(TableType::Rules),
            5 => Ok(TableType::Attachments),
            6 => Ok(TableType::Permissions),
            other => Err(OxioError::invalid(format!("unknown table type {}", other))),
        }
    }
}

/// How the host intends to query a table. Accepted and ignored: rows are never filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum QueryType {
    Prefiltered = 1,
    Livefiltered = 2,
}

impl TryFrom<u8> for QueryType {
    type Error = OxioError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(QueryType::Prefiltered),
            2 => Ok(QueryType::Livefiltered),
            other => Err(OxioError::invalid(format!("unknown query type {}", other))),
        }
    }
}
