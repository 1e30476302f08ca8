use serde_json::json;
use std::thread;
use zenapp_core::db::{open_db, open_db_in_memory};
use zenapp_core::{DocumentStore, SqliteDocumentStore, StoreError};

#[test]
fn set_get_and_overwrite() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();

    store.set("todos", "a", &json!({"title": "one", "extra": 1})).unwrap();
    store.set("todos", "a", &json!({"title": "two"})).unwrap();

    let body = store.get("todos", "a").unwrap().unwrap();
    assert_eq!(body, json!({"title": "two"}));
    assert!(store.get("todos", "missing").unwrap().is_none());
}

#[test]
fn list_is_scoped_to_collection_and_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();

    store.set("todos", "z", &json!({"n": 1})).unwrap();
    store.set("todos", "a", &json!({"n": 2})).unwrap();
    store.set("other", "b", &json!({"n": 3})).unwrap();
    store.set("todos", "z", &json!({"n": 4})).unwrap();

    let ids: Vec<String> = store
        .list("todos")
        .unwrap()
        .into_iter()
        .map(|doc| doc.id)
        .collect();
    assert_eq!(ids, vec!["z".to_string(), "a".to_string()]);
}

#[test]
fn delete_missing_document_is_ok() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();

    store.set("todos", "a", &json!({})).unwrap();
    store.delete("todos", "a").unwrap();
    store.delete("todos", "a").unwrap();
    assert!(store.list("todos").unwrap().is_empty());
}

#[test]
fn flip_bool_negates_and_treats_missing_as_false() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();

    store.set("todos", "a", &json!({"title": "t"})).unwrap();
    assert_eq!(store.flip_bool("todos", "a", "isDone").unwrap(), Some(true));
    assert_eq!(store.flip_bool("todos", "a", "isDone").unwrap(), Some(false));

    let body = store.get("todos", "a").unwrap().unwrap();
    assert_eq!(body, json!({"title": "t", "isDone": false}));
    assert_eq!(store.flip_bool("todos", "nope", "isDone").unwrap(), None);
}

#[test]
fn non_object_bodies_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();

    let err = store.set("todos", "a", &json!([1, 2])).unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));
}

#[test]
fn concurrent_flips_on_separate_connections_lose_no_update() {
    const WRITERS: usize = 4;
    const FLIPS_PER_WRITER: usize = 51;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flips.db");
    {
        let conn = open_db(&path).unwrap();
        let store = SqliteDocumentStore::try_new(&conn).unwrap();
        store
            .set("todos", "shared", &json!({"id": "shared", "isDone": false}))
            .unwrap();
    }

    thread::scope(|scope| {
        for _ in 0..WRITERS {
            scope.spawn(|| {
                let conn = open_db(&path).unwrap();
                let store = SqliteDocumentStore::try_new(&conn).unwrap();
                for _ in 0..FLIPS_PER_WRITER {
                    assert!(store.flip_bool("todos", "shared", "isDone").unwrap().is_some());
                }
            });
        }
    });

    let conn = open_db(&path).unwrap();
    let store = SqliteDocumentStore::try_new(&conn).unwrap();
    let body = store.get("todos", "shared").unwrap().unwrap();
    let expected = (WRITERS * FLIPS_PER_WRITER) % 2 == 1;
    assert_eq!(body["isDone"], json!(expected));
}
