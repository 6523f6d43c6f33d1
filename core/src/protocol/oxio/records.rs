/*
 * records.rs
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

//! Decoding of App Suite JSON replies into directory records.
//!
//! Every reply is an object with either `data` or `error` (plus `code`, `error_params`).
//! List replies carry `data` as an array of arrays whose cells follow the order of
//! the `columns` request parameter.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::store::{FolderRecord, MessageRecord, OxioError, SubfolderRecord};

const COL_FOLDER_ID: u32 = 1;
const COL_FOLDER_PARENT: u32 = 20;
const COL_FOLDER_TITLE: u32 = 300;
const COL_FOLDER_SUBFOLDERS: u32 = 304;

const COL_MAIL_ID: u32 = 600;
const COL_MAIL_FOLDER: u32 = 601;
const COL_MAIL_FROM: u32 = 603;
const COL_MAIL_TO: u32 = 604;
const COL_MAIL_CC: u32 = 605;
const COL_MAIL_SUBJECT: u32 = 607;
const COL_MAIL_RECEIVED: u32 = 610;

/// Parse a reply body, surfacing a server `error` member as `RemoteUnavailable`.
pub fn parse_reply(body: &[u8]) -> Result<Value, OxioError> {
    let value: Value = serde_json::from_slice(body)?;
    if let Some(err) = value.get("error") {
        let message = err.as_str().unwrap_or("unknown error");
        let code = value.get("code").and_then(Value::as_str).unwrap_or("?");
        return Err(OxioError::remote(format!("server error {}: {}", code, message)));
    }
    Ok(value)
}

/// Take the `data` member out of a parsed reply.
pub fn into_data(mut reply: Value) -> Result<Value, OxioError> {
    reply
        .get_mut("data")
        .map(Value::take)
        .ok_or_else(|| OxioError::remote("reply without data"))
}

/// Session id from a login reply.
pub fn decode_login(reply: &Value) -> Result<String, OxioError> {
    reply
        .get("session")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| OxioError::remote("login reply without session"))
}

/// `folders?action=get` data object.
pub fn decode_folder(data: &Value) -> Result<FolderRecord, OxioError> {
    if !data.is_object() {
        return Err(OxioError::remote("folder data is not an object"));
    }
    Ok(FolderRecord {
        parent_locator: data.get("folder_id").map(locator_text).unwrap_or_default(),
        display_name: data
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        has_subfolders: data.get("subfolders").map(flag).unwrap_or(false),
        total_messages: data.get("total").and_then(Value::as_u64).unwrap_or(0),
    })
}

/// `folders?action=list` rows, decoded by the requested `columns`.
pub fn decode_subfolders(data: &Value, columns: &[u32]) -> Result<Vec<SubfolderRecord>, OxioError> {
    let id = column_position(columns, COL_FOLDER_ID)?;
    let parent = columns.iter().position(|c| *c == COL_FOLDER_PARENT);
    let title = columns.iter().position(|c| *c == COL_FOLDER_TITLE);
    let subfolders = columns.iter().position(|c| *c == COL_FOLDER_SUBFOLDERS);

    rows(data)?
        .iter()
        .map(|row| {
            let cells = row_cells(row)?;
            Ok(SubfolderRecord {
                locator: cell(cells, Some(id)).map(locator_text).unwrap_or_default(),
                parent_locator: cell(cells, parent).map(locator_text).unwrap_or_default(),
                display_name: cell(cells, title)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                has_subfolders: cell(cells, subfolders).map(flag).unwrap_or(false),
            })
        })
        .collect()
}

/// `mail?action=all` rows, decoded by the requested `columns`.
pub fn decode_messages(data: &Value, columns: &[u32]) -> Result<Vec<MessageRecord>, OxioError> {
    let id = column_position(columns, COL_MAIL_ID)?;
    let folder = columns.iter().position(|c| *c == COL_MAIL_FOLDER);
    let from = columns.iter().position(|c| *c == COL_MAIL_FROM);
    let to = columns.iter().position(|c| *c == COL_MAIL_TO);
    let cc = columns.iter().position(|c| *c == COL_MAIL_CC);
    let subject = columns.iter().position(|c| *c == COL_MAIL_SUBJECT);
    let received = columns.iter().position(|c| *c == COL_MAIL_RECEIVED);

    rows(data)?
        .iter()
        .map(|row| {
            let cells = row_cells(row)?;
            Ok(MessageRecord {
                locator: cell(cells, Some(id)).map(locator_text).unwrap_or_default(),
                folder_locator: cell(cells, folder).map(locator_text).unwrap_or_default(),
                subject: cell(cells, subject).and_then(Value::as_str).map(str::to_string),
                from: cell(cells, from).map(addresses).unwrap_or_default(),
                to: cell(cells, to).map(addresses).unwrap_or_default(),
                cc: cell(cells, cc).map(addresses).unwrap_or_default(),
                received: cell(cells, received).and_then(epoch_millis),
            })
        })
        .collect()
}

fn column_position(columns: &[u32], column: u32) -> Result<usize, OxioError> {
    columns
        .iter()
        .position(|c| *c == column)
        .ok_or_else(|| OxioError::invalid(format!("column {} not requested", column)))
}

fn rows(data: &Value) -> Result<&Vec<Value>, OxioError> {
    data.as_array()
        .ok_or_else(|| OxioError::remote("list data is not an array"))
}

fn row_cells(row: &Value) -> Result<&Vec<Value>, OxioError> {
    row.as_array()
        .ok_or_else(|| OxioError::remote("list row is not an array"))
}

fn cell(cells: &[Value], position: Option<usize>) -> Option<&Value> {
    position.and_then(|p| cells.get(p)).filter(|v| !v.is_null())
}

/// Folder and mail ids are strings for mail folders but numbers for groupware folders.
fn locator_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64().map(|n| n != 0).unwrap_or(false),
        _ => false,
    }
}

/// Address lists are `[[personal, address], ...]`; personal may be null.
fn addresses(value: &Value) -> Vec<String> {
    let Some(list) = value.as_array() else {
        return Vec::new();
    };
    list.iter()
        .filter_map(|pair| {
            let pair = pair.as_array()?;
            let personal = pair.first().and_then(Value::as_str).filter(|s| !s.is_empty());
            let address = pair.get(1).and_then(Value::as_str)?;
            Some(match personal {
                Some(name) => format!("{} <{}>", name, address),
                None => address.to_string(),
            })
        })
        .collect()
}

fn epoch_millis(value: &Value) -> Option<DateTime<Utc>> {
    let ms = value.as_i64()?;
    Utc.timestamp_millis_opt(ms).single()
}
