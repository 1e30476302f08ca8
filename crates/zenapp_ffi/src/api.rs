//! FFI use-case API for the mobile UI.
//!
//! # Responsibility
//! - Expose one function per UI intent (list and auth screens).
//! - Map core errors to plain message strings.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Calls are serialized by one process-wide lock that also guards the
//!   list snapshot carried between calls.

use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use zenapp_core::db::open_db;
use zenapp_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AuthGate, AuthState, CoreConfig, DocumentTodoRepository, SqliteAuthProvider,
    SqliteDocumentStore, ToDoItem, TodoListError, TodoListStore,
};

type FfiListStore<'conn> = TodoListStore<DocumentTodoRepository<SqliteDocumentStore<'conn>>>;

static CONFIG: OnceLock<CoreConfig> = OnceLock::new();
static SNAPSHOT: Mutex<Vec<ToDoItem>> = Mutex::new(Vec::new());

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the to-do list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_done: bool,
}

/// Envelope returned by every list intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoResponse {
    pub ok: bool,
    /// ID of the item the intent targeted or created.
    pub item_id: Option<String>,
    /// Snapshot after the intent, even when the intent failed.
    pub items: Vec<TodoItemView>,
    /// Human-readable outcome for diagnostics/UI.
    pub message: String,
}

/// Auth screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStateView {
    /// `authenticated|unauthenticated|loading|error`.
    pub state: String,
    pub message: Option<String>,
    pub email: Option<String>,
}

/// Reloads the full list from the collection.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_reload() -> TodoResponse {
    run_list_intent("todo_reload", None, "List loaded.", |list| {
        list.reload().map(|_| ())
    })
}

/// Adds a pending item; both fields must be non-empty.
///
/// `item_id` is set whenever the item was persisted, including when the
/// reload that follows the write fails (`ok=false`).
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(title: String, description: String) -> TodoResponse {
    let mut created = None;
    let mut response = run_list_intent("todo_add", None, "Item added.", |list| {
        match list.add(&title, &description) {
            Ok(id) => {
                created = Some(id);
                Ok(())
            }
            Err(err) => {
                created = err.written_item_id().map(str::to_string);
                Err(err)
            }
        }
    });
    response.item_id = created;
    response
}

/// Replaces title and description of an item.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_edit(id: String, title: String, description: String) -> TodoResponse {
    run_list_intent("todo_edit", Some(id.clone()), "Item updated.", |list| {
        list.edit(&id, &title, &description)
    })
}

/// Flips the done flag of an item.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(id: String) -> TodoResponse {
    run_list_intent("todo_toggle", Some(id.clone()), "Status changed.", |list| {
        list.toggle(&id).map(|_| ())
    })
}

/// Deletes an item; unknown IDs succeed.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(id: String) -> TodoResponse {
    run_list_intent("todo_delete", Some(id.clone()), "Item deleted.", |list| {
        list.delete(&id)
    })
}

/// Current auth state derived from the persisted session.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_state() -> AuthStateView {
    run_auth_intent(|gate| gate.state().clone())
}

#[flutter_rust_bridge::frb(sync)]
pub fn auth_sign_in(email: String, password: String) -> AuthStateView {
    run_auth_intent(|gate| gate.login(&email, &password).clone())
}

#[flutter_rust_bridge::frb(sync)]
pub fn auth_sign_up(email: String, password: String) -> AuthStateView {
    run_auth_intent(|gate| gate.signup(&email, &password).clone())
}

#[flutter_rust_bridge::frb(sync)]
pub fn auth_sign_out() -> AuthStateView {
    run_auth_intent(|gate| gate.sign_out().clone())
}

fn run_list_intent(
    op: &'static str,
    item_id: Option<String>,
    success_message: &str,
    intent: impl FnOnce(&mut FfiListStore<'_>) -> Result<(), TodoListError>,
) -> TodoResponse {
    let mut snapshot = lock_snapshot();
    let config = match resolve_config() {
        Ok(config) => config,
        Err(message) => return failure(op, item_id, &snapshot, message),
    };
    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => return failure(op, item_id, &snapshot, format!("{op} failed: {err}")),
    };
    let store = match SqliteDocumentStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => return failure(op, item_id, &snapshot, format!("{op} failed: {err}")),
    };

    let repo = DocumentTodoRepository::with_collection(store, config.collection);
    let mut list = TodoListStore::with_snapshot(repo, std::mem::take(&mut *snapshot));
    let outcome = intent(&mut list);
    *snapshot = list.into_snapshot();

    match outcome {
        Ok(()) => TodoResponse {
            ok: true,
            item_id,
            items: to_views(&snapshot),
            message: success_message.to_string(),
        },
        Err(err) => failure(op, item_id, &snapshot, format!("{op} failed: {err}")),
    }
}

fn run_auth_intent(
    intent: impl FnOnce(&mut AuthGate<SqliteAuthProvider<'_>>) -> AuthState,
) -> AuthStateView {
    // Held only to serialize database access with list intents.
    let _serialized = lock_snapshot();
    let conn = resolve_config().and_then(|config| {
        open_db(&config.db_path).map_err(|err| format!("auth storage unavailable: {err}"))
    });
    let conn = match conn {
        Ok(conn) => conn,
        Err(message) => return to_auth_view(&AuthState::Error(message), None),
    };
    let provider = match SqliteAuthProvider::try_new(&conn) {
        Ok(provider) => provider,
        Err(err) => return to_auth_view(&AuthState::Error(err.to_string()), None),
    };

    let mut gate = AuthGate::new(provider);
    let state = intent(&mut gate);
    let email = gate.session().map(|session| session.email.clone());
    to_auth_view(&state, email)
}

fn failure(
    op: &'static str,
    item_id: Option<String>,
    snapshot: &[ToDoItem],
    message: String,
) -> TodoResponse {
    warn!("event=ffi_call module=ffi status=error op={op}");
    TodoResponse {
        ok: false,
        item_id,
        items: to_views(snapshot),
        message,
    }
}

fn to_views(items: &[ToDoItem]) -> Vec<TodoItemView> {
    items
        .iter()
        .map(|item| TodoItemView {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            is_done: item.is_done,
        })
        .collect()
}

fn to_auth_view(state: &AuthState, email: Option<String>) -> AuthStateView {
    let message = match state {
        AuthState::Error(message) => Some(message.clone()),
        _ => None,
    };
    AuthStateView {
        state: state.label().to_string(),
        message,
        email: email.filter(|_| state.is_authenticated()),
    }
}

fn lock_snapshot() -> MutexGuard<'static, Vec<ToDoItem>> {
    SNAPSHOT.lock().unwrap_or_else(PoisonError::into_inner)
}

fn resolve_config() -> Result<CoreConfig, String> {
    if let Some(config) = CONFIG.get() {
        return Ok(config.clone());
    }
    let config = CoreConfig::from_env().map_err(|err| format!("invalid configuration: {err}"))?;
    Ok(CONFIG.get_or_init(|| config).clone())
}
