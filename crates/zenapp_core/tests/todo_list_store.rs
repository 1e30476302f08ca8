use serde_json::Value;
use zenapp_core::db::open_db_in_memory;
use zenapp_core::store::StoredDocument;
use zenapp_core::{
    DocumentStore, DocumentTodoRepository, SqliteDocumentStore, StoreError, StoreResult,
    ToDoItem, TodoListError, TodoListStore, TodoRepository,
};

/// Store whose every call fails, standing in for an unreachable backend.
struct UnreachableStore;

impl DocumentStore for UnreachableStore {
    fn set(&self, _: &str, _: &str, _: &Value) -> StoreResult<()> {
        Err(offline())
    }

    fn get(&self, _: &str, _: &str) -> StoreResult<Option<Value>> {
        Err(offline())
    }

    fn list(&self, _: &str) -> StoreResult<Vec<StoredDocument>> {
        Err(offline())
    }

    fn delete(&self, _: &str, _: &str) -> StoreResult<()> {
        Err(offline())
    }

    fn flip_bool(&self, _: &str, _: &str, _: &str) -> StoreResult<Option<bool>> {
        Err(offline())
    }
}

/// Store that accepts writes but cannot list the collection.
struct ListOutageStore<'a>(&'a SqliteDocumentStore<'a>);

impl DocumentStore for ListOutageStore<'_> {
    fn set(&self, collection: &str, id: &str, body: &Value) -> StoreResult<()> {
        self.0.set(collection, id, body)
    }

    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        self.0.get(collection, id)
    }

    fn list(&self, _: &str) -> StoreResult<Vec<StoredDocument>> {
        Err(offline())
    }

    fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.0.delete(collection, id)
    }

    fn flip_bool(&self, collection: &str, id: &str, field: &str) -> StoreResult<Option<bool>> {
        self.0.flip_bool(collection, id, field)
    }
}

fn offline() -> StoreError {
    StoreError::Backend("backend unavailable".to_string())
}

#[test]
fn buy_milk_scenario() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let repo = DocumentTodoRepository::new(&store);
    let mut list = TodoListStore::new(&repo);

    let id = list.add("Buy milk", "2%").unwrap();
    assert_eq!(list.items().len(), 1);
    assert_eq!(list.items()[0].id, id);
    assert_eq!(list.items()[0].title, "Buy milk");
    assert_eq!(list.items()[0].description, "2%");
    assert!(!list.items()[0].is_done);

    assert!(list.toggle(&id).unwrap());
    assert!(list.items()[0].is_done);
    assert!(repo.get(&id).unwrap().unwrap().is_done);

    assert!(!list.toggle(&id).unwrap());
    assert!(!list.items()[0].is_done);

    list.delete(&id).unwrap();
    assert!(list.items().is_empty());
    assert!(list.reload().unwrap().is_empty());
}

#[test]
fn add_and_edit_reload_from_the_collection() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let repo = DocumentTodoRepository::new(&store);
    repo.add(&ToDoItem::with_id("external", "written", "elsewhere"))
        .unwrap();

    let mut list = TodoListStore::new(&repo);
    let id = list.add("mine", "local").unwrap();
    assert_eq!(list.items().len(), 2);

    list.edit(&id, "mine v2", "local v2").unwrap();
    let edited = list.items().iter().find(|item| item.id == id).unwrap();
    assert_eq!(edited.title, "mine v2");
    assert_eq!(edited.description, "local v2");
}

#[test]
fn toggle_and_delete_patch_without_reloading() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let repo = DocumentTodoRepository::new(&store);
    let mut list = TodoListStore::new(&repo);
    let id = list.add("a", "b").unwrap();

    repo.add(&ToDoItem::with_id("late", "arrived", "after reload"))
        .unwrap();

    list.toggle(&id).unwrap();
    assert_eq!(list.items().len(), 1);
    list.delete("late").unwrap();
    assert_eq!(list.items().len(), 1);
    assert!(repo.get("late").unwrap().is_none());
}

#[test]
fn edit_keeps_done_flag_from_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let repo = DocumentTodoRepository::new(&store);
    let mut list = TodoListStore::new(&repo);
    let id = list.add("a", "b").unwrap();
    list.toggle(&id).unwrap();

    list.edit(&id, "a2", "b2").unwrap();
    assert!(repo.get(&id).unwrap().unwrap().is_done);
    assert!(list.items()[0].is_done);
}

#[test]
fn empty_fields_are_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let repo = DocumentTodoRepository::new(&store);
    let mut list = TodoListStore::new(&repo);

    let err = list.add("", "desc").unwrap_err();
    assert!(matches!(err, TodoListError::EmptyField("title")));
    let err = list.edit("x", "title", "").unwrap_err();
    assert!(matches!(err, TodoListError::EmptyField("description")));

    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn deleting_unknown_id_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let mut list = TodoListStore::new(DocumentTodoRepository::new(&store));
    list.add("keep", "me").unwrap();

    list.delete("unknown").unwrap();
    assert_eq!(list.items().len(), 1);
}

#[test]
fn backend_failure_keeps_snapshot_and_reports_message() {
    let snapshot = vec![ToDoItem::with_id("cached", "t", "d")];
    let mut list =
        TodoListStore::with_snapshot(DocumentTodoRepository::new(UnreachableStore), snapshot);

    let err = list.add("new", "item").unwrap_err();
    assert!(matches!(err, TodoListError::Repo(_)));
    assert_eq!(err.to_string(), "backend unavailable");

    assert!(list.toggle("cached").is_err());
    assert!(list.delete("cached").is_err());
    assert!(list.reload().is_err());
    assert_eq!(list.into_snapshot().len(), 1);
}

#[test]
fn edit_keeps_done_flag_when_snapshot_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let repo = DocumentTodoRepository::new(&store);
    let item = ToDoItem::new("a", "b");
    repo.add(&item).unwrap();
    repo.toggle_status(&item.id).unwrap();

    let mut restarted = TodoListStore::new(&repo);
    restarted.edit(&item.id, "a2", "b2").unwrap();

    let stored = repo.get(&item.id).unwrap().unwrap();
    assert_eq!(stored.title, "a2");
    assert!(stored.is_done);
}

#[test]
fn failed_reload_after_add_still_reports_written_id() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let mut list = TodoListStore::new(DocumentTodoRepository::new(ListOutageStore(&store)));

    let err = list.add("saved", "anyway").unwrap_err();
    let written = err.written_item_id().unwrap().to_string();
    assert!(matches!(err, TodoListError::ReloadAfterWrite { .. }));
    assert!(err.to_string().contains("saved but list reload failed"));

    let repo = DocumentTodoRepository::new(&store);
    assert_eq!(repo.get(&written).unwrap().unwrap().title, "saved");
    assert!(list.items().is_empty());

    let edit_err = list.edit(&written, "saved", "v2").unwrap_err();
    assert_eq!(edit_err.written_item_id(), Some(written.as_str()));
}
