//! SQLite-backed document store.
//!
//! Documents live in the `documents` table as JSON text; `flip_bool` runs as
//! a single `UPDATE ... RETURNING` statement.

use super::{DocumentStore, StoreError, StoreResult, StoredDocument};
use crate::db::ensure_table;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

pub struct SqliteDocumentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentStore<'conn> {
    /// Binds the store to a migrated connection.
    ///
    /// # Errors
    /// - `SchemaNotReady` when the `documents` table is missing.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_table(conn, "documents")?;
        Ok(Self { conn })
    }
}

impl DocumentStore for SqliteDocumentStore<'_> {
    fn set(&self, collection: &str, id: &str, body: &Value) -> StoreResult<()> {
        if !body.is_object() {
            return Err(StoreError::Backend(format!(
                "document `{id}` body must be a JSON object"
            )));
        }
        let body_text = serde_json::to_string(body)?;
        self.conn.execute(
            "INSERT INTO documents (collection, doc_id, body)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (collection, doc_id) DO UPDATE SET
                body = excluded.body,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![collection, id, body_text],
        )?;
        debug!("event=doc_set module=store status=ok collection={collection}");
        Ok(())
    }

    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let body_text: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND doc_id = ?2;",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        match body_text {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn list(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let mut stmt = self.conn.prepare(
            "SELECT doc_id, body FROM documents
             WHERE collection = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([collection])?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let body_text: String = row.get(1)?;
            documents.push(StoredDocument {
                id,
                body: serde_json::from_str(&body_text)?,
            });
        }

        Ok(documents)
    }

    fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let removed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND doc_id = ?2;",
            params![collection, id],
        )?;
        debug!("event=doc_delete module=store status=ok collection={collection} removed={removed}");
        Ok(())
    }

    fn flip_bool(&self, collection: &str, id: &str, field: &str) -> StoreResult<Option<bool>> {
        let path = json_path(field)?;
        let flipped: Option<i64> = self
            .conn
            .query_row(
                "UPDATE documents
                 SET
                    body = json_set(
                        body,
                        ?3,
                        json(CASE WHEN json_extract(body, ?3) = 1 THEN 'false' ELSE 'true' END)
                    ),
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE collection = ?1 AND doc_id = ?2
                 RETURNING json_extract(body, ?3);",
                params![collection, id, path],
                |row| row.get(0),
            )
            .optional()?;

        Ok(flipped.map(|value| value == 1))
    }
}

/// Builds a JSON path for a top-level field.
fn json_path(field: &str) -> StoreResult<String> {
    if field.is_empty() || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StoreError::Backend(format!("invalid field name `{field}`")));
    }
    Ok(format!("$.{field}"))
}
