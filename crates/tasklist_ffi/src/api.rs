//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task list session (`items`, add, toggle, delete) to Dart via FRB.
//! - Run the title validation boundary before `add` reaches the core.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Exactly one session exists per process, bound to one database path.
//! - Session access is serialized through a mutex.

use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, validate_title,
    Item, ItemCodec, SqliteStore, TaskListService,
};

const EMPTY_LIST_MESSAGE: &str = "No todos yet. Add one above to get started!";

static SESSION: OnceLock<Session> = OnceLock::new();

struct Session {
    db_path: PathBuf,
    service: Mutex<TaskListService<SqliteStore>>,
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the task list session backed by the SQLite file at `db_path`.
///
/// # FFI contract
/// - Loads the stored list once; later calls with the same path are no-ops.
/// - A different path after the first success is rejected.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_task_list(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);

    if let Some(session) = SESSION.get() {
        return ensure_same_path(session, &requested);
    }

    let store = match SqliteStore::open(&requested) {
        Ok(store) => store,
        Err(err) => return format!("init_task_list failed: {err}"),
    };
    let session = Session {
        db_path: requested.clone(),
        service: Mutex::new(TaskListService::initialize(ItemCodec::new(store))),
    };

    match SESSION.set(session) {
        Ok(()) => String::new(),
        Err(_) => match SESSION.get() {
            Some(existing) => ensure_same_path(existing, &requested),
            None => "init_task_list failed: session unavailable".to_string(),
        },
    }
}

/// Task item shape returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItemView {
    /// Stable item ID used for toggle/delete.
    pub id: String,
    pub title: String,
    pub completed: bool,
    /// Creation time in epoch milliseconds.
    pub created_at_ms: i64,
}

/// Snapshot envelope for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Items, most recent first.
    pub items: Vec<TaskItemView>,
    /// Incomplete item count.
    pub remaining: u32,
    pub total: u32,
    /// Footer or empty-state text, or an error description.
    pub message: String,
}

/// Generic action response envelope for add/toggle/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation was accepted.
    pub ok: bool,
    /// Affected item ID when one matched.
    pub item_id: Option<String>,
    /// Human-readable response message; validation text on rejection.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, item_id: Option<String>) -> Self {
        Self {
            ok: true,
            item_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            item_id: None,
            message: message.into(),
        }
    }
}

/// Returns the current list with remaining/total counts.
///
/// # FFI contract
/// - Never panics.
/// - Returns an empty list with an error message when no session exists.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> TaskListResponse {
    let result = with_session(|service| {
        let summary = service.summary();
        (
            service.items().iter().map(to_item_view).collect::<Vec<_>>(),
            summary,
        )
    });

    match result {
        Ok((items, summary)) => {
            let message = if summary.total == 0 {
                EMPTY_LIST_MESSAGE.to_string()
            } else {
                format!(
                    "{} of {} tasks remaining",
                    summary.remaining, summary.total
                )
            };
            TaskListResponse {
                items,
                remaining: saturating_u32(summary.remaining),
                total: saturating_u32(summary.total),
                message,
            }
        }
        Err(err) => TaskListResponse {
            items: Vec::new(),
            remaining: 0,
            total: 0,
            message: format!("task_list failed: {err}"),
        },
    }
}

/// Validates `title` and prepends a new task.
///
/// # FFI contract
/// - Rejected titles return `ok=false` with the field message
///   (`Title is required` / `Title must be less than 100 characters`).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String) -> TaskActionResponse {
    let title = match validate_title(title.as_str()) {
        Ok(title) => title,
        Err(err) => return TaskActionResponse::failure(err.to_string()),
    };

    match with_session(|service| service.add(&title).id.clone()) {
        Ok(item_id) => TaskActionResponse::success("Task added.", Some(item_id)),
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Flips completion on the task with `id`.
///
/// # FFI contract
/// - Unknown IDs are accepted as no-ops (`ok=true`, `item_id=None`).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: String) -> TaskActionResponse {
    match with_session(|service| service.toggle(&id)) {
        Ok(true) => TaskActionResponse::success("Task updated.", Some(id)),
        Ok(false) => TaskActionResponse::success("No matching task.", None),
        Err(err) => TaskActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// Removes the task with `id`.
///
/// # FFI contract
/// - Unknown IDs are accepted as no-ops (`ok=true`, `item_id=None`).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: String) -> TaskActionResponse {
    match with_session(|service| service.delete(&id)) {
        Ok(true) => TaskActionResponse::success("Task deleted.", Some(id)),
        Ok(false) => TaskActionResponse::success("No matching task.", None),
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

fn ensure_same_path(session: &Session, requested: &Path) -> String {
    if session.db_path.as_path() == requested {
        return String::new();
    }
    warn!(
        "event=task_list_init module=ffi status=rejected reason=path_conflict active={} requested={}",
        session.db_path.display(),
        requested.display()
    );
    format!(
        "task list already initialized at `{}`; refusing to switch to `{}`",
        session.db_path.display(),
        requested.display()
    )
}

fn with_session<T>(
    f: impl FnOnce(&mut TaskListService<SqliteStore>) -> T,
) -> Result<T, String> {
    let session = SESSION
        .get()
        .ok_or_else(|| "task list not initialized; call init_task_list first".to_string())?;
    let mut service = session
        .service
        .lock()
        .map_err(|_| "task list session lock poisoned".to_string())?;
    Ok(f(&mut service))
}

fn to_item_view(item: &Item) -> TaskItemView {
    TaskItemView {
        id: item.id.clone(),
        title: item.title.clone(),
        completed: item.completed,
        created_at_ms: item.created_at.timestamp_millis(),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, init_task_list, task_add, task_delete, task_list,
        task_toggle,
    };
    use std::path::PathBuf;
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEST_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

    fn ensure_session() {
        let path = TEST_DB_PATH.get_or_init(|| {
            std::env::temp_dir().join(format!(
                "tasklist-ffi-{}-{}.sqlite3",
                std::process::id(),
                unique_nanos()
            ))
        });
        let error = init_task_list(path.to_string_lossy().into_owned());
        assert!(error.is_empty(), "{error}");
    }

    fn unique_nanos() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos()
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_task_list_rejects_empty_and_conflicting_paths() {
        ensure_session();
        assert!(!init_task_list("   ".to_string()).is_empty());

        let other =
            std::env::temp_dir().join(format!("tasklist-ffi-other-{}.sqlite3", unique_nanos()));
        let error = init_task_list(other.to_string_lossy().into_owned());
        assert!(error.contains("refusing to switch"));
    }

    #[test]
    fn task_add_rejects_invalid_titles_with_field_messages() {
        ensure_session();

        let empty = task_add("   ".to_string());
        assert!(!empty.ok);
        assert_eq!(empty.message, "Title is required");

        let long = task_add("a".repeat(101));
        assert!(!long.ok);
        assert_eq!(long.message, "Title must be less than 100 characters");
    }

    #[test]
    fn task_add_toggle_delete_flow() {
        ensure_session();
        let title = format!("ffi task {}", unique_nanos());

        let added = task_add(format!("  {title}  "));
        assert!(added.ok, "{}", added.message);
        let id = added.item_id.expect("add should return item_id");

        let listed = task_list();
        let item = listed
            .items
            .iter()
            .find(|item| item.id == id)
            .expect("added task should be listed");
        assert_eq!(item.title, title);
        assert!(!item.completed);
        assert!(listed.message.contains("tasks remaining"));

        let toggled = task_toggle(id.clone());
        assert_eq!(toggled.item_id.as_deref(), Some(id.as_str()));
        assert!(task_list()
            .items
            .iter()
            .any(|item| item.id == id && item.completed));

        let deleted = task_delete(id.clone());
        assert!(deleted.ok);
        assert!(task_list().items.iter().all(|item| item.id != id));
    }

    #[test]
    fn unknown_ids_are_noops() {
        ensure_session();

        let toggled = task_toggle("no-such-id".to_string());
        assert!(toggled.ok);
        assert_eq!(toggled.item_id, None);

        let deleted = task_delete("no-such-id".to_string());
        assert!(deleted.ok);
        assert_eq!(deleted.item_id, None);
    }
}
