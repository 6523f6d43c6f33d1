/*
 * lib.rs
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

//! C FFI for the oxio mapistore backend. Contexts, folders and tables are identified by
//! opaque non-zero handles; release them with the matching `*_release` function.
//! Every call returns a mapistore status code (0 on success) and writes results through
//! out-pointers. Structured results (context lists, rows) are UTF-8 JSON strings owned by
//! the caller: free them with oxio_free_string. All string parameters are UTF-8
//! NUL-terminated.

use libc::{c_char, c_int, size_t};
use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Once, RwLock};

use once_cell::sync::OnceCell;
use oxio_core::store::{
    Backend, Context, Folder, NodeId, OxioError, PropertyValue, QueryType, Row, RowView,
    TableType, MAPISTORE_SUCCESS,
};
use serde_json::Value;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (tracing EnvFilter syntax).
const LOG_ENV: &str = "OXIO_LOG";

/// Registry of live objects keyed by handle. Hosts the one backend instance.
struct Registry {
    backend: RwLock<Option<Arc<Backend>>>,
    contexts: RwLock<HashMap<u64, Arc<Context>>>,
    folders: RwLock<HashMap<u64, Arc<Folder>>>,
    tables: RwLock<HashMap<u64, Arc<Mutex<RowView>>>>,
    next_handle: AtomicU64,
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceCell<Registry> = OnceCell::new();
    REGISTRY.get_or_init(Registry::new)
}

impl Registry {
    fn new() -> Self {
        Registry {
            backend: RwLock::new(None),
            contexts: RwLock::new(HashMap::new()),
            folders: RwLock::new(HashMap::new()),
            tables: RwLock::new(HashMap::new()),
            next_handle: AtomicU64::new(1),
        }
    }

    fn handle(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::Relaxed)
    }

    fn backend(&self) -> Result<Arc<Backend>, OxioError> {
        self.backend
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| OxioError::invalid("backend not initialized"))
    }

    #[cfg(test)]
    fn install_backend(&self, backend: Backend) {
        *self.backend.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::new(backend));
    }

    /// Build and install the backend unless one exists. The check and the install share
    /// one write lock, so concurrent first calls connect once. Returns true if it installed.
    fn install_backend_once(
        &self,
        connect: impl FnOnce() -> Result<Backend, OxioError>,
    ) -> Result<bool, OxioError> {
        let mut slot = self.backend.write().unwrap_or_else(|e| e.into_inner());
        if slot.is_some() {
            return Ok(false);
        }
        *slot = Some(Arc::new(connect()?));
        Ok(true)
    }
}

fn insert<T>(map: &RwLock<HashMap<u64, T>>, value: T) -> u64 {
    let handle = registry().handle();
    map.write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(handle, value);
    handle
}

fn lookup<T: Clone>(map: &RwLock<HashMap<u64, T>>, handle: u64, kind: &str) -> Result<T, OxioError> {
    map.read()
        .unwrap_or_else(|e| e.into_inner())
        .get(&handle)
        .cloned()
        .ok_or_else(|| OxioError::invalid(format!("unknown {} handle {}", kind, handle)))
}

fn remove<T>(map: &RwLock<HashMap<u64, T>>, handle: u64) -> bool {
    map.write()
        .unwrap_or_else(|e| e.into_inner())
        .remove(&handle)
        .is_some()
}

thread_local! {
    static LAST_ERROR: std::cell::RefCell<Option<CString>> = const { std::cell::RefCell::new(None) };
}

fn set_last_error(err: &OxioError) {
    let msg = CString::new(err.to_string().replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|e| *e.borrow_mut() = Some(msg));
}

fn clear_last_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}

/// Record the outcome of a call and return its status code.
fn status(result: Result<(), OxioError>) -> c_int {
    match result {
        Ok(()) => {
            clear_last_error();
            MAPISTORE_SUCCESS
        }
        Err(err) => {
            debug!(error = %err, "ffi call failed");
            set_last_error(&err);
            err.status()
        }
    }
}

fn init_logging() {
    static LOGGING: Once = Once::new();
    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
        // Another global subscriber may already be installed by the host; keep it.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn ptr_to_str(ptr: *const c_char, what: &str) -> Result<String, OxioError> {
    if ptr.is_null() {
        return Err(OxioError::invalid(format!("{} is NULL", what)));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map(str::to_string)
        .map_err(|_| OxioError::invalid(format!("{} is not valid UTF-8", what)))
}

fn to_c_string(s: String) -> Result<*mut c_char, OxioError> {
    CString::new(s)
        .map(CString::into_raw)
        .map_err(|_| OxioError::invalid("string contains NUL"))
}

fn check_out<T>(out: *mut T) -> Result<(), OxioError> {
    if out.is_null() {
        Err(OxioError::invalid("output pointer is NULL"))
    } else {
        Ok(())
    }
}

/// Properties JSON object -> Row. Strings, booleans and unsigned integers are kept.
fn row_from_json(text: &str) -> Result<Row, OxioError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| OxioError::invalid(format!("properties: {}", e)))?;
    let Value::Object(map) = value else {
        return Err(OxioError::invalid("properties must be a JSON object"));
    };
    let mut row = Row::new();
    for (name, value) in map {
        match value {
            Value::String(s) => row.insert(name, PropertyValue::Text(s)),
            Value::Bool(b) => row.insert(name, PropertyValue::Bool(b)),
            Value::Number(n) => {
                if let Some(id) = n.as_u64() {
                    row.insert(name, PropertyValue::Id(id));
                }
            }
            _ => {}
        }
    }
    Ok(row)
}

/// Version string (static, do not free).
#[no_mangle]
pub extern "C" fn oxio_version() -> *const c_char {
    b"0.1.0\0".as_ptr() as *const c_char
}

/// Last error message from a failed call on this thread. Valid until the next call. Do not free.
#[no_mangle]
pub extern "C" fn oxio_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Free a string returned through an out-pointer. No-op if ptr is NULL.
///
/// # Safety
/// `ptr` must come from this library and not have been freed already.
#[no_mangle]
pub unsafe extern "C" fn oxio_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

/// Backend name, "oxio" (static, do not free).
#[no_mangle]
pub extern "C" fn oxio_backend_name() -> *const c_char {
    b"oxio\0".as_ptr() as *const c_char
}

/// Backend description (static, do not free).
#[no_mangle]
pub extern "C" fn oxio_backend_description() -> *const c_char {
    b"open-xchange backend\0".as_ptr() as *const c_char
}

/// URI namespace handled by this backend, "oxio://" (static, do not free).
#[no_mangle]
pub extern "C" fn oxio_backend_namespace() -> *const c_char {
    b"oxio://\0".as_ptr() as *const c_char
}

/// Install logging, load the configuration and log in to Open-Xchange.
/// Calling it again once a backend exists does nothing.
#[no_mangle]
pub extern "C" fn oxio_backend_init() -> c_int {
    init_logging();
    status(
        registry()
            .install_backend_once(|| {
                let backend = Backend::connect()?;
                backend.init()?;
                Ok(backend)
            })
            .map(|installed| {
                if !installed {
                    debug!("backend already initialized");
                }
            }),
    )
}

/// Context capabilities for `username` as a JSON array of `{"name", "uri_pattern"}`.
///
/// # Safety
/// `username` must be NUL-terminated; `out_json` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn oxio_backend_list_contexts(
    username: *const c_char,
    out_json: *mut *mut c_char,
) -> c_int {
    status((|| {
        check_out(out_json)?;
        let username = ptr_to_str(username, "username")?;
        let contexts = registry().backend()?.list_contexts(&username);
        *out_json = to_c_string(serde_json::to_string(&contexts)?)?;
        Ok(())
    })())
}

/// Create a context rooted at `uri`.
///
/// # Safety
/// `uri` must be NUL-terminated; `out_context` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn oxio_backend_create_context(
    uri: *const c_char,
    out_context: *mut u64,
) -> c_int {
    status((|| {
        check_out(out_context)?;
        let uri = ptr_to_str(uri, "uri")?;
        let context = registry().backend()?.create_context(&uri);
        *out_context = insert(&registry().contexts, Arc::new(context));
        Ok(())
    })())
}

/// Release a context handle. Folders opened from it stay valid.
#[no_mangle]
pub extern "C" fn oxio_context_release(context: u64) {
    if !remove(&registry().contexts, context) {
        warn!(context, "release of unknown context handle");
    }
}

/// Bind `fid` to the context URI and open the root folder.
///
/// # Safety
/// `out_folder` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn oxio_context_get_root_folder(
    context: u64,
    fid: u64,
    out_folder: *mut u64,
) -> c_int {
    status((|| {
        check_out(out_folder)?;
        let context = lookup(&registry().contexts, context, "context")?;
        let folder = context.get_root_folder(NodeId(fid))?;
        *out_folder = insert(&registry().folders, Arc::new(folder));
        Ok(())
    })())
}

/// Locator bound to `fid`, or NOT_FOUND.
///
/// # Safety
/// `out_path` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn oxio_context_get_path(
    context: u64,
    fid: u64,
    out_path: *mut *mut c_char,
) -> c_int {
    status((|| {
        check_out(out_path)?;
        let context = lookup(&registry().contexts, context, "context")?;
        let path = context
            .get_path(NodeId(fid))
            .ok_or(OxioError::NotFound(NodeId(fid)))?;
        *out_path = to_c_string(path)?;
        Ok(())
    })())
}

/// Release a folder handle. Tables opened from it stay valid.
#[no_mangle]
pub extern "C" fn oxio_folder_release(folder: u64) {
    if !remove(&registry().folders, folder) {
        warn!(folder, "release of unknown folder handle");
    }
}

/// Open the child `child_fid` of `folder`.
///
/// # Safety
/// `out_folder` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn oxio_folder_open_folder(
    folder: u64,
    child_fid: u64,
    out_folder: *mut u64,
) -> c_int {
    status((|| {
        check_out(out_folder)?;
        let parent = lookup(&registry().folders, folder, "folder")?;
        let child = parent.open_folder(NodeId(child_fid))?;
        *out_folder = insert(&registry().folders, Arc::new(child));
        Ok(())
    })())
}

/// Create a child folder from a JSON properties object. Always NOT_IMPLEMENTED.
///
/// # Safety
/// `properties_json` must be NULL or NUL-terminated; `out_folder` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn oxio_folder_create_folder(
    folder: u64,
    properties_json: *const c_char,
    child_fid: u64,
    out_folder: *mut u64,
) -> c_int {
    status((|| {
        check_out(out_folder)?;
        *out_folder = 0;
        let parent = lookup(&registry().folders, folder, "folder")?;
        let properties = if properties_json.is_null() {
            Row::new()
        } else {
            row_from_json(&ptr_to_str(properties_json, "properties")?)?
        };
        let child = parent.create_folder(&properties, NodeId(child_fid))?;
        *out_folder = insert(&registry().folders, Arc::new(child));
        Ok(())
    })())
}

/// Delete `folder`. Always NOT_IMPLEMENTED.
#[no_mangle]
pub extern "C" fn oxio_folder_delete(folder: u64) -> c_int {
    status((|| {
        let folder = lookup(&registry().folders, folder, "folder")?;
        folder.delete()
    })())
}

/// Number of children of `table_type` (1 folders; 2 messages and 3-6 always 0).
///
/// # Safety
/// `out_count` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn oxio_folder_get_child_count(
    folder: u64,
    table_type: u8,
    out_count: *mut u32,
) -> c_int {
    status((|| {
        check_out(out_count)?;
        let table_type = TableType::try_from(table_type)?;
        let folder = lookup(&registry().folders, folder, "folder")?;
        *out_count = folder.child_count(table_type);
        Ok(())
    })())
}

/// Open a table over the children of `table_type`, returning its handle and row count.
///
/// # Safety
/// `out_table` and `out_count` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn oxio_folder_open_table(
    folder: u64,
    table_type: u8,
    out_table: *mut u64,
    out_count: *mut u32,
) -> c_int {
    status((|| {
        check_out(out_table)?;
        check_out(out_count)?;
        let table_type = TableType::try_from(table_type)?;
        let folder = lookup(&registry().folders, folder, "folder")?;
        let (table, count) = folder.open_table(table_type);
        *out_table = insert(&registry().tables, Arc::new(Mutex::new(table)));
        *out_count = count;
        Ok(())
    })())
}

/// Release a table handle.
#[no_mangle]
pub extern "C" fn oxio_table_release(table: u64) {
    if !remove(&registry().tables, table) {
        warn!(table, "release of unknown table handle");
    }
}

/// Replace the requested columns with `count` property names.
///
/// # Safety
/// `columns` must point to `count` NUL-terminated strings (may be NULL when `count` is 0).
#[no_mangle]
pub unsafe extern "C" fn oxio_table_set_columns(
    table: u64,
    columns: *const *const c_char,
    count: size_t,
) -> c_int {
    status((|| {
        let table = lookup(&registry().tables, table, "table")?;
        let names = if count == 0 {
            Vec::new()
        } else {
            if columns.is_null() {
                return Err(OxioError::invalid("columns is NULL"));
            }
            std::slice::from_raw_parts(columns, count)
                .iter()
                .map(|p| ptr_to_str(*p, "column name"))
                .collect::<Result<Vec<_>, _>>()?
        };
        table.lock().unwrap_or_else(|e| e.into_inner()).set_columns(names);
        Ok(())
    })())
}

/// Row count for `query_type` (1 prefiltered, 2 live-filtered).
///
/// # Safety
/// `out_count` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn oxio_table_get_row_count(
    table: u64,
    query_type: u8,
    out_count: *mut u32,
) -> c_int {
    status((|| {
        check_out(out_count)?;
        let query = QueryType::try_from(query_type)?;
        let table = lookup(&registry().tables, table, "table")?;
        *out_count = table
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_row_count(query);
        Ok(())
    })())
}

/// Row `index` as JSON: `{"columns": [...], "row": {name: value, ...}}`.
///
/// # Safety
/// `out_json` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn oxio_table_get_row(
    table: u64,
    index: u32,
    query_type: u8,
    out_json: *mut *mut c_char,
) -> c_int {
    status((|| {
        check_out(out_json)?;
        let query = QueryType::try_from(query_type)?;
        let table = lookup(&registry().tables, table, "table")?;
        let table = table.lock().unwrap_or_else(|e| e.into_inner());
        let (columns, row) = table.get_row(index, query)?;
        // Built by hand so the row keeps its column order.
        let reply = format!(
            r#"{{"columns":{},"row":{}}}"#,
            serde_json::to_string(columns)?,
            serde_json::to_string(&row)?
        );
        *out_json = to_c_string(reply)?;
        Ok(())
    })())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxio_core::store::{
        FolderRecord, MessageRecord, RemoteDirectory, SubfolderRecord, MAPISTORE_ERR_INVALID_PARAMETER,
        MAPISTORE_ERR_NOT_FOUND, MAPISTORE_ERR_NOT_IMPLEMENTED,
    };

    /// "root" with children "root/a" and "root/b"; both leaves.
    struct TwoChildren;

    impl RemoteDirectory for TwoChildren {
        fn fetch_folder(&self, locator: &str) -> Result<FolderRecord, OxioError> {
            Ok(FolderRecord {
                parent_locator: String::new(),
                display_name: locator.to_string(),
                has_subfolders: locator == "root",
                total_messages: 0,
            })
        }

        fn list_subfolders(&self, locator: &str, _: &[u32]) -> Result<Vec<SubfolderRecord>, OxioError> {
            Ok(["a", "b"]
                .iter()
                .map(|n| SubfolderRecord {
                    locator: format!("{}/{}", locator, n),
                    parent_locator: locator.to_string(),
                    display_name: n.to_uppercase(),
                    has_subfolders: false,
                })
                .collect())
        }

        fn list_messages(&self, _: &str, _: &[u32]) -> Result<Vec<MessageRecord>, OxioError> {
            Ok(Vec::new())
        }
    }

    fn take_string(ptr: *mut c_char) -> String {
        let s = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        unsafe { oxio_free_string(ptr) };
        s
    }

    fn root_folder() -> u64 {
        registry().install_backend(Backend::new(Arc::new(TwoChildren)));
        let uri = CString::new("root").unwrap();
        let mut context = 0u64;
        let mut folder = 0u64;
        unsafe {
            assert_eq!(oxio_backend_create_context(uri.as_ptr(), &mut context), 0);
            assert_eq!(oxio_context_get_root_folder(context, 0x40, &mut folder), 0);
            let mut path = ptr::null_mut();
            assert_eq!(oxio_context_get_path(context, 0x42, &mut path), 0);
            assert_eq!(take_string(path), "root/b");
        }
        folder
    }

    #[test]
    fn list_contexts_as_json() {
        registry().install_backend(Backend::new(Arc::new(TwoChildren)));
        let user = CString::new("alice").unwrap();
        let mut out = ptr::null_mut();
        assert_eq!(unsafe { oxio_backend_list_contexts(user.as_ptr(), &mut out) }, 0);
        assert_eq!(
            take_string(out),
            r#"[{"name":"inbox","uri_pattern":"default0/INBOX"},{"name":"calendar","uri_pattern":"CALENDAR"}]"#
        );
    }

    #[test]
    fn table_rows_as_json() {
        let folder = root_folder();
        let mut table = 0u64;
        let mut count = 0u32;
        unsafe {
            assert_eq!(oxio_folder_open_table(folder, 1, &mut table, &mut count), 0);
            assert_eq!(count, 2);
            let names = [
                CString::new("PidTagDisplayName").unwrap(),
                CString::new("PidTagFolderId").unwrap(),
            ];
            let ptrs: Vec<*const c_char> = names.iter().map(|n| n.as_ptr()).collect();
            assert_eq!(oxio_table_set_columns(table, ptrs.as_ptr(), ptrs.len()), 0);
            let mut out = ptr::null_mut();
            assert_eq!(oxio_table_get_row(table, 1, 1, &mut out), 0);
            assert_eq!(
                take_string(out),
                r#"{"columns":["PidTagDisplayName","PidTagFolderId"],"row":{"PidTagDisplayName":"B","PidTagFolderId":66}}"#
            );
            let mut rows = 0u32;
            assert_eq!(oxio_table_get_row_count(table, 2, &mut rows), 0);
            assert_eq!(rows, 2);
        }
        oxio_table_release(table);
        oxio_folder_release(folder);
    }

    #[test]
    fn error_statuses_and_last_error() {
        let folder = root_folder();
        let mut child = 0u64;
        unsafe {
            assert_eq!(
                oxio_folder_open_folder(folder, 0x99, &mut child),
                MAPISTORE_ERR_NOT_FOUND
            );
            let msg = CStr::from_ptr(oxio_last_error()).to_str().unwrap();
            assert_eq!(msg, "child with id=0x99 not indexed");

            let props = CString::new(r#"{"PidTagDisplayName":"New"}"#).unwrap();
            assert_eq!(
                oxio_folder_create_folder(folder, props.as_ptr(), 0x50, &mut child),
                MAPISTORE_ERR_NOT_IMPLEMENTED
            );
            assert_eq!(child, 0);

            let mut count = 0u32;
            assert_eq!(
                oxio_folder_get_child_count(folder, 9, &mut count),
                MAPISTORE_ERR_INVALID_PARAMETER
            );
            assert_eq!(oxio_folder_get_child_count(folder, 4, &mut count), 0);
            assert_eq!(count, 0);
            assert!(oxio_last_error().is_null());
        }
        assert_eq!(oxio_folder_delete(folder), MAPISTORE_ERR_NOT_IMPLEMENTED);
    }

    #[test]
    fn open_child_by_allocated_id() {
        let folder = root_folder();
        let mut child = 0u64;
        let mut count = 7u32;
        unsafe {
            assert_eq!(oxio_folder_open_folder(folder, 0x41, &mut child), 0);
            assert_eq!(oxio_folder_get_child_count(child, 1, &mut count), 0);
        }
        assert_eq!(count, 0);
        assert_ne!(child, folder);
    }

    #[test]
    fn concurrent_first_init_connects_once() {
        use std::sync::atomic::AtomicUsize;
        use std::sync::Barrier;
        use std::thread;
        use std::time::Duration;

        let reg = Arc::new(Registry::new());
        let connects = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(4));
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let (reg, connects, barrier) = (reg.clone(), connects.clone(), barrier.clone());
                thread::spawn(move || {
                    barrier.wait();
                    reg.install_backend_once(|| {
                        connects.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(20));
                        Ok(Backend::new(Arc::new(TwoChildren)))
                    })
                    .unwrap()
                })
            })
            .collect();
        let installed = workers
            .into_iter()
            .map(|w| w.join().unwrap())
            .filter(|&b| b)
            .count();
        assert_eq!(installed, 1);
        assert_eq!(connects.load(Ordering::SeqCst), 1);
        assert!(reg.backend().is_ok());
    }

    #[test]
    fn failed_init_leaves_no_backend() {
        let reg = Registry::new();
        let err = reg
            .install_backend_once(|| Err(OxioError::remote("login refused")))
            .unwrap_err();
        assert!(matches!(err, OxioError::RemoteUnavailable(_)));
        assert!(reg.backend().is_err());
        assert!(reg
            .install_backend_once(|| Ok(Backend::new(Arc::new(TwoChildren))))
            .unwrap());
    }

    #[test]
    fn properties_json_to_row() {
        let row = row_from_json(r#"{"a":"x","b":true,"c":7,"d":null}"#).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("c"), Some(&PropertyValue::Id(7)));
        assert!(row_from_json("[1]").is_err());
    }
}
