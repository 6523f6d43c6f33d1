/*
 * hierarchy.rs
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

//! Hierarchy behaviour end to end over an in-memory directory: backend, context,
//! lazy folder opening, identifier stability and row projection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use oxio_core::store::{
    Backend, FolderRecord, MessageRecord, NodeId, OxioError, PropertyValue, QueryType,
    RemoteDirectory, SubfolderRecord, TableType, PID_TAG_DISPLAY_NAME, PID_TAG_FOLDER_ID,
    PROP_HAS_SUBFOLDERS, PROP_PARENT_URI, PROP_URI,
};

/// In-memory OX tree. Locators listed in `broken` fail every fetch.
#[derive(Default)]
struct MemoryDirectory {
    folders: HashMap<String, FolderRecord>,
    children: HashMap<String, Vec<SubfolderRecord>>,
    messages: HashMap<String, Vec<MessageRecord>>,
    broken: Mutex<Vec<String>>,
    fetches: AtomicUsize,
}

impl MemoryDirectory {
    fn folder(&mut self, locator: &str, parent: &str, name: &str, children: &[(&str, &str, bool)]) {
        self.folders.insert(
            locator.to_string(),
            FolderRecord {
                parent_locator: parent.to_string(),
                display_name: name.to_string(),
                has_subfolders: !children.is_empty(),
                total_messages: 0,
            },
        );
        let records = children
            .iter()
            .map(|(child, child_name, has_subfolders)| SubfolderRecord {
                locator: child.to_string(),
                parent_locator: locator.to_string(),
                display_name: child_name.to_string(),
                has_subfolders: *has_subfolders,
            })
            .collect();
        self.children.insert(locator.to_string(), records);
    }

    fn mail(&mut self, locator: &str, subjects: &[&str]) {
        if let Some(f) = self.folders.get_mut(locator) {
            f.total_messages = subjects.len() as u64;
        }
        let records = subjects
            .iter()
            .enumerate()
            .map(|(i, s)| MessageRecord {
                locator: (i + 1).to_string(),
                folder_locator: locator.to_string(),
                subject: Some(s.to_string()),
                ..Default::default()
            })
            .collect();
        self.messages.insert(locator.to_string(), records);
    }

    fn break_locator(&self, locator: &str) {
        self.broken.lock().unwrap().push(locator.to_string());
    }

    fn check(&self, locator: &str) -> Result<(), OxioError> {
        if self.broken.lock().unwrap().iter().any(|b| b == locator) {
            return Err(OxioError::remote(format!("{} unreachable", locator)));
        }
        Ok(())
    }
}

impl RemoteDirectory for MemoryDirectory {
    fn fetch_folder(&self, locator: &str) -> Result<FolderRecord, OxioError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check(locator)?;
        self.folders
            .get(locator)
            .cloned()
            .ok_or_else(|| OxioError::remote(format!("no folder {}", locator)))
    }

    fn list_subfolders(&self, locator: &str, _: &[u32]) -> Result<Vec<SubfolderRecord>, OxioError> {
        self.check(locator)?;
        Ok(self.children.get(locator).cloned().unwrap_or_default())
    }

    fn list_messages(&self, locator: &str, _: &[u32]) -> Result<Vec<MessageRecord>, OxioError> {
        self.check(locator)?;
        Ok(self.messages.get(locator).cloned().unwrap_or_default())
    }
}

/// INBOX with two children; `a` has a grandchild and mail, `b` is a leaf.
fn mailbox() -> Arc<MemoryDirectory> {
    let mut dir = MemoryDirectory::default();
    dir.folder(
        "default0/INBOX",
        "default0",
        "Inbox",
        &[("default0/INBOX/a", "A", true), ("default0/INBOX/b", "B", false)],
    );
    dir.folder(
        "default0/INBOX/a",
        "default0/INBOX",
        "A",
        &[("default0/INBOX/a/x", "X", false)],
    );
    dir.mail("default0/INBOX/a", &["first", "second"]);
    dir.folder("default0/INBOX/b", "default0/INBOX", "B", &[]);
    dir.folder("default0/INBOX/a/x", "default0/INBOX/a", "X", &[]);
    Arc::new(dir)
}

const ROOT_ID: NodeId = NodeId(0x10001);

#[test]
fn backend_lists_fixed_contexts() {
    let backend = Backend::new(mailbox());
    assert_eq!(backend.name(), "oxio");
    assert_eq!(backend.namespace(), "oxio://");
    backend.init().unwrap();
    let contexts = backend.list_contexts("alice");
    let pairs: Vec<_> = contexts
        .iter()
        .map(|c| (c.name.as_str(), c.uri_pattern.as_str()))
        .collect();
    assert_eq!(pairs, vec![("inbox", "default0/INBOX"), ("calendar", "CALENDAR")]);
}

#[test]
fn root_then_children_get_sequential_ids() {
    let backend = Backend::new(mailbox());
    let context = backend.create_context("default0/INBOX");
    let root = context.get_root_folder(ROOT_ID).unwrap();

    assert_eq!(root.id(), ROOT_ID);
    assert_eq!(root.display_name(), "Inbox");
    assert_eq!(root.child_count(TableType::Folders), 2);
    assert_eq!(root.child_count(TableType::Messages), 0);

    let ids: Vec<_> = root.subfolders().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![NodeId(0x10002), NodeId(0x10003)]);
    assert_eq!(context.get_path(ROOT_ID).as_deref(), Some("default0/INBOX"));
    assert_eq!(context.get_path(NodeId(0x10003)).as_deref(), Some("default0/INBOX/b"));
    assert_eq!(context.get_path(NodeId(0x99999)), None);
}

#[test]
fn open_child_lists_grandchildren_and_mail() {
    let context = Backend::new(mailbox()).create_context("default0/INBOX");
    let root = context.get_root_folder(ROOT_ID).unwrap();
    let a_id = root.subfolders()[0].id;

    let a = root.open_folder(a_id).unwrap();
    assert_eq!(a.locator(), "default0/INBOX/a");
    assert_eq!(a.parent_id(), Some(ROOT_ID));
    assert_eq!(a.child_count(TableType::Folders), 1);
    assert_eq!(a.child_count(TableType::Messages), 0);
    assert_eq!(a.messages().len(), 2);
    assert_eq!(a.subfolders()[0].id, NodeId(0x10004));
    assert_eq!(a.messages()[1].subject.as_deref(), Some("second"));

    let x = a.open_folder(NodeId(0x10004)).unwrap();
    assert_eq!(x.display_name(), "X");
    assert_eq!(x.child_count(TableType::Folders), 0);
}

#[test]
fn reopen_builds_fresh_node_with_same_ids() {
    let dir = mailbox();
    let context = Backend::new(dir.clone()).create_context("default0/INBOX");
    let root = context.get_root_folder(ROOT_ID).unwrap();
    let a_id = root.subfolders()[0].id;

    let before = dir.fetches.load(Ordering::SeqCst);
    let first = root.open_folder(a_id).unwrap();
    let second = root.open_folder(a_id).unwrap();
    assert_eq!(dir.fetches.load(Ordering::SeqCst), before + 2);
    assert_eq!(first.subfolders(), second.subfolders());
    assert_eq!(context.index().len(), 4);
}

#[test]
fn unindexed_child_is_not_found() {
    let context = Backend::new(mailbox()).create_context("default0/INBOX");
    let root = context.get_root_folder(ROOT_ID).unwrap();
    let err = root.open_folder(NodeId(0x1f)).unwrap_err();
    assert!(matches!(err, OxioError::NotFound(NodeId(0x1f))));
    assert_eq!(err.status(), 14);
    assert_eq!(err.to_string(), "child with id=0x1f not indexed");
}

#[test]
fn failed_open_leaves_index_untouched() {
    let dir = mailbox();
    let context = Backend::new(dir.clone()).create_context("default0/INBOX");
    let root = context.get_root_folder(ROOT_ID).unwrap();
    let a_id = root.subfolders()[0].id;
    let entries = context.index().len();

    dir.break_locator("default0/INBOX/a");
    let err = root.open_folder(a_id).unwrap_err();
    assert!(matches!(err, OxioError::RemoteUnavailable(_)));
    assert_eq!(context.index().len(), entries);
    assert_eq!(context.index().id_for("default0/INBOX/a/x"), None);
}

#[test]
fn root_fetch_failure_is_reported() {
    let dir = mailbox();
    dir.break_locator("default0/INBOX");
    let context = Backend::new(dir).create_context("default0/INBOX");
    assert!(matches!(
        context.get_root_folder(ROOT_ID),
        Err(OxioError::RemoteUnavailable(_))
    ));
}

#[test]
fn contexts_keep_separate_indexes() {
    let backend = Backend::new(mailbox());
    let one = backend.create_context("default0/INBOX");
    let two = backend.create_context("default0/INBOX");
    one.get_root_folder(ROOT_ID).unwrap();
    two.get_root_folder(NodeId(0x500)).unwrap();
    assert_eq!(one.index().id_for("default0/INBOX/a"), Some(NodeId(0x10002)));
    assert_eq!(two.index().id_for("default0/INBOX/a"), Some(NodeId(0x501)));
}

#[test]
fn folder_rows_project_requested_columns() {
    let context = Backend::new(mailbox()).create_context("default0/INBOX");
    let root = Arc::new(context.get_root_folder(ROOT_ID).unwrap());
    let (mut table, count) = root.open_table(TableType::Folders);
    assert_eq!(count, 2);
    assert_eq!(table.get_row_count(QueryType::Livefiltered), 2);

    table.set_columns(vec![
        PID_TAG_DISPLAY_NAME.to_string(),
        "PidTagComment".to_string(),
        PID_TAG_FOLDER_ID.to_string(),
    ]);
    let (columns, row) = table.get_row(1, QueryType::Prefiltered).unwrap();
    assert_eq!(columns.len(), 3);
    assert_eq!(row.len(), 2);
    assert_eq!(row.get(PID_TAG_DISPLAY_NAME), Some(&PropertyValue::Text("B".into())));
    assert_eq!(row.get(PID_TAG_FOLDER_ID), Some(&PropertyValue::Id(0x10003)));
    assert!(!row.contains("PidTagComment"));

    table.set_columns(vec![
        PROP_URI.to_string(),
        PROP_PARENT_URI.to_string(),
        PROP_HAS_SUBFOLDERS.to_string(),
    ]);
    let (_, row) = table.get_row(0, QueryType::Prefiltered).unwrap();
    assert_eq!(row.get(PROP_URI), Some(&PropertyValue::Text("default0/INBOX/a".into())));
    assert_eq!(row.get(PROP_PARENT_URI), Some(&PropertyValue::Text("default0/INBOX".into())));
    assert_eq!(row.get(PROP_HAS_SUBFOLDERS), Some(&PropertyValue::Bool(true)));
}

#[test]
fn row_without_columns_is_empty() {
    let context = Backend::new(mailbox()).create_context("default0/INBOX");
    let root = Arc::new(context.get_root_folder(ROOT_ID).unwrap());
    let (table, _) = root.open_table(TableType::Folders);
    let (columns, row) = table.get_row(0, QueryType::Prefiltered).unwrap();
    assert!(columns.is_empty());
    assert!(row.is_empty());
}

#[test]
fn row_past_end_is_out_of_range() {
    let context = Backend::new(mailbox()).create_context("default0/INBOX");
    let root = Arc::new(context.get_root_folder(ROOT_ID).unwrap());
    let (table, _) = root.open_table(TableType::Folders);
    assert!(matches!(
        table.get_row(2, QueryType::Prefiltered),
        Err(OxioError::RowOutOfRange { index: 2, count: 2 })
    ));
}

#[test]
fn message_table_counts_zero_and_rows_are_empty() {
    let context = Backend::new(mailbox()).create_context("default0/INBOX");
    let root = context.get_root_folder(ROOT_ID).unwrap();
    let a = Arc::new(root.open_folder(root.subfolders()[0].id).unwrap());
    assert_eq!(a.messages().len(), 2);

    let (mut table, count) = a.open_table(TableType::Messages);
    assert_eq!(count, 0);
    table.set_columns(vec![PID_TAG_DISPLAY_NAME.to_string(), "PidTagSubject".to_string()]);
    assert_eq!(table.get_row_count(QueryType::Prefiltered), 0);
    for index in [0, 1, 7] {
        let (columns, row) = table.get_row(index, QueryType::Livefiltered).unwrap();
        assert_eq!(columns, [PID_TAG_DISPLAY_NAME, "PidTagSubject"]);
        assert!(row.is_empty());
    }
}

#[test]
fn unsupported_categories_are_empty() {
    let context = Backend::new(mailbox()).create_context("default0/INBOX");
    let root = context.get_root_folder(ROOT_ID).unwrap();
    // `a` holds mail, so a non-zero message count would show up here.
    let root = Arc::new(root.open_folder(root.subfolders()[0].id).unwrap());
    for table_type in [
        TableType::Messages,
        TableType::Fai,
        TableType::Rules,
        TableType::Attachments,
        TableType::Permissions,
    ] {
        let (mut table, count) = root.open_table(table_type);
        assert_eq!(count, 0);
        table.set_columns(vec![PID_TAG_DISPLAY_NAME.to_string()]);
        assert_eq!(table.get_row_count(QueryType::Prefiltered), 0);
        let (_, row) = table.get_row(5, QueryType::Prefiltered).unwrap();
        assert!(row.is_empty());
    }
}

#[test]
fn write_operations_report_not_implemented() {
    let context = Backend::new(mailbox()).create_context("default0/INBOX");
    let root = context.get_root_folder(ROOT_ID).unwrap();
    let err = root
        .create_folder(&Default::default(), NodeId(0x20000))
        .unwrap_err();
    assert_eq!(err.status(), 24);
    assert_eq!(root.delete().unwrap_err().status(), 24);
    assert_eq!(context.get_path(NodeId(0x20000)), None);
}
