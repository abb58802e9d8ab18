//! SQLite storage engine implementation.
//!
//! Implements `StorageEngine` from `campcheck_core::storage` using SQLite.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params_from_iter;
use serde_json::Value;
use tokio::sync::OnceCell;
use tokio_rusqlite::Connection;

use campcheck_core::storage::{
    document_id, resolve_index, stamp_created, stamp_updated, Collection, Document, RecordId,
    Result, StorageEngine, StorageError, SCHEMA_VERSION,
};

use super::conversions::{document_to_data, json_to_sql, row_to_document};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DbTarget {
    File(PathBuf),
    Memory,
}

/// SQLite-based storage engine.
///
/// The connection is opened by [`StorageEngine::init`]; every other
/// operation fails with `NotInitialized` until then.
pub struct SqliteEngine {
    target: DbTarget,
    conn: OnceCell<Connection>,
}

impl SqliteEngine {
    /// Creates an engine backed by a database file.
    ///
    /// The file is created on `init` if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            target: DbTarget::File(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Creates an engine backed by an in-memory database.
    ///
    /// Useful for testing - data is lost when the engine is dropped.
    pub fn in_memory() -> Self {
        Self {
            target: DbTarget::Memory,
            conn: OnceCell::new(),
        }
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.get().ok_or(StorageError::NotInitialized)
    }

    async fn open(&self) -> Result<Connection> {
        let conn = match &self.target {
            DbTarget::File(path) => Connection::open(path).await,
            DbTarget::Memory => Connection::open_in_memory().await,
        }
        .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;
        Ok(conn)
    }

    /// Creates all tables and indexes in one transaction when the stored
    /// schema version is behind.
    async fn init_schema(conn: &Connection) -> Result<()> {
        let applied = conn
            .call(|conn| {
                let version: i64 = conn
                    .query_row("PRAGMA user_version", [], |row| row.get(0))
                    .map_err(wrap_err)?;
                if version >= SCHEMA_VERSION {
                    return Ok(false);
                }

                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute_batch(&schema::create_schema_sql())
                    .map_err(wrap_err)?;
                tx.pragma_update(None, "user_version", SCHEMA_VERSION)
                    .map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(true)
            })
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        if applied {
            tracing::info!(version = SCHEMA_VERSION, "database schema created");
        }
        Ok(())
    }
}

fn required_id(collection: Collection, document: &Document) -> Result<RecordId> {
    document_id(document).ok_or(StorageError::MissingId {
        entity_type: collection.entity_type(),
    })
}

#[async_trait]
impl StorageEngine for SqliteEngine {
    async fn init(&self) -> Result<()> {
        self.conn.get_or_try_init(|| self.open()).await?;
        Ok(())
    }

    async fn add(&self, collection: Collection, mut record: Document) -> Result<RecordId> {
        let conn = self.conn()?;
        stamp_created(&mut record, Utc::now());

        if collection.auto_increment() {
            let data = document_to_data(&record)?;
            let sql = schema::insert_sql(collection);
            conn.call(move |conn| {
                conn.execute(&sql, [&data]).map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, collection))
        } else {
            let id = required_id(collection, &record)?;
            let data = document_to_data(&record)?;
            let sql = schema::insert_with_id_sql(collection);
            conn.call(move |conn| {
                conn.execute(&sql, rusqlite::params![id, data])
                    .map_err(wrap_err)?;
                Ok(id)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, collection))
        }
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<Document>> {
        let conn = self.conn()?;
        let sql = schema::select_all_sql(collection);

        conn.call(move |conn| {
            let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
            let rows = stmt.query_map([], row_to_document).map_err(wrap_err)?;

            let mut documents = Vec::new();
            for row_result in rows {
                documents.push(row_result.map_err(wrap_err)?);
            }
            Ok(documents)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, collection))
    }

    async fn get_by_id(&self, collection: Collection, id: RecordId) -> Result<Option<Document>> {
        let conn = self.conn()?;
        let sql = schema::select_by_id_sql(collection);

        conn.call(move |conn| {
            let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
            match stmt.query_row([id], row_to_document) {
                Ok(document) => Ok(Some(document)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(wrap_err(e)),
            }
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, collection))
    }

    async fn update(&self, collection: Collection, mut record: Document) -> Result<()> {
        let id = required_id(collection, &record)?;
        let conn = self.conn()?;
        stamp_updated(&mut record, Utc::now());
        let data = document_to_data(&record)?;
        let sql = schema::update_sql(collection);

        let changed = conn
            .call(move |conn| {
                conn.execute(&sql, rusqlite::params![id, data])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, collection))?;

        if changed == 0 {
            return Err(StorageError::NotFound {
                entity_type: collection.entity_type(),
                id,
            });
        }
        Ok(())
    }

    async fn put(&self, collection: Collection, record: Document) -> Result<()> {
        let id = required_id(collection, &record)?;
        let conn = self.conn()?;
        let data = document_to_data(&record)?;
        let sql = schema::upsert_sql(collection);

        conn.call(move |conn| {
            conn.execute(&sql, rusqlite::params![id, data])
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, collection))
    }

    async fn delete(&self, collection: Collection, id: RecordId) -> Result<()> {
        let conn = self.conn()?;
        let sql = schema::delete_sql(collection);

        conn.call(move |conn| {
            conn.execute(&sql, [id]).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, collection))
    }

    async fn get_by_index(
        &self,
        collection: Collection,
        index: &str,
        key: &[Value],
    ) -> Result<Vec<Document>> {
        let index = resolve_index(collection, index, key)?;
        let conn = self.conn()?;
        let sql = schema::select_by_index_sql(collection, index);
        let params: Vec<_> = key.iter().map(json_to_sql).collect();

        conn.call(move |conn| {
            let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
            let rows = stmt
                .query_map(params_from_iter(params), row_to_document)
                .map_err(wrap_err)?;

            let mut documents = Vec::new();
            for row_result in rows {
                documents.push(row_result.map_err(wrap_err)?);
            }
            Ok(documents)
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, collection))
    }
}
