/*
 * error.rs
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

//! Backend errors and their mapistore status codes.

use thiserror::Error;

use crate::store::index::NodeId;

/// mapistore status: success.
pub const MAPISTORE_SUCCESS: i32 = 0;
/// mapistore status: generic failure.
pub const MAPISTORE_ERROR: i32 = 1;
/// mapistore status: bad argument from the host.
pub const MAPISTORE_ERR_INVALID_PARAMETER: i32 = 6;
/// mapistore status: object not found.
pub const MAPISTORE_ERR_NOT_FOUND: i32 = 14;
/// mapistore status: operation not implemented by this backend.
pub const MAPISTORE_ERR_NOT_IMPLEMENTED: i32 = 24;

/// Errors from the index, folders, tables, configuration or the remote session.
#[derive(Debug, Error)]
pub enum OxioError {
    /// Identifier has no locator in the index (the parent was never listed).
    #[error("child with id={0} not indexed")]
    NotFound(NodeId),

    /// Write-side operation; the backend is read-only.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Transport, authentication, HTTP or decoding failure talking to the remote store.
    #[error("remote store unavailable: {0}")]
    RemoteUnavailable(String),

    /// Neither the primary nor the debug config file holds usable credentials.
    #[error("no usable credentials: {0}")]
    ConfigMissing(String),

    /// Allocation was requested before any identifier was bound.
    #[error("identity index has no seed entry; bind the root folder first")]
    IndexNotSeeded,

    /// Row index outside `[0, count)`.
    #[error("row {index} out of range (table has {count} rows)")]
    RowOutOfRange { index: u32, count: u32 },

    /// Bad argument (unknown table or query code, malformed input).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl OxioError {
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteUnavailable(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Status code reported to the host dispatch layer.
    pub fn status(&self) -> i32 {
        match self {
            OxioError::NotFound(_) => MAPISTORE_ERR_NOT_FOUND,
            OxioError::NotImplemented(_) => MAPISTORE_ERR_NOT_IMPLEMENTED,
            OxioError::InvalidParameter(_) | OxioError::RowOutOfRange { .. } => {
                MAPISTORE_ERR_INVALID_PARAMETER
            }
            OxioError::RemoteUnavailable(_)
            | OxioError::ConfigMissing(_)
            | OxioError::IndexNotSeeded => MAPISTORE_ERROR,
        }
    }
}

impl From<std::io::Error> for OxioError {
    fn from(err: std::io::Error) -> Self {
        OxioError::RemoteUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for OxioError {
    fn from(err: serde_json::Error) -> Self {
        OxioError::RemoteUnavailable(format!("invalid JSON from server: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(OxioError::NotFound(NodeId(7)).status(), MAPISTORE_ERR_NOT_FOUND);
        assert_eq!(
            OxioError::NotImplemented("create_folder").status(),
            MAPISTORE_ERR_NOT_IMPLEMENTED
        );
        assert_eq!(OxioError::remote("down").status(), MAPISTORE_ERROR);
        assert_eq!(
            OxioError::RowOutOfRange { index: 3, count: 2 }.status(),
            MAPISTORE_ERR_INVALID_PARAMETER
        );
    }

    #[test]
    fn not_found_message_uses_hex_id() {
        let msg = OxioError::NotFound(NodeId(0x1f)).to_string();
        assert_eq!(msg, "child with id=0x1f not indexed");
    }
}
