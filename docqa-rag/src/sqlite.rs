//! SQLite-persisted vector store.
//!
//! Documents and their embeddings live in a single database file inside the
//! persist directory. Embeddings are stored as little-endian `f32` BLOBs and
//! searched by brute-force cosine similarity; the corpus sizes this tool
//! targets do not warrant an index structure.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::distance::cosine_similarity;
use crate::document::{Document, SearchResult, StoredDocument};
use crate::error::{RagError, Result};
use crate::store::VectorStore;

/// Name of the database file inside the persist directory.
pub const INDEX_FILE: &str = "index.db";

const BACKEND: &str = "SQLite";

/// A [`VectorStore`] persisted as a SQLite database on local disk.
///
/// [`open`](SqliteVectorStore::open) attaches to an existing store read-only
/// and fails when the database is missing; [`create`](SqliteVectorStore::create)
/// initializes the schema for ingestion.
pub struct SqliteVectorStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteVectorStore {
    /// Open an existing store under `dir` for querying.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Store`] if the database file does not exist or
    /// cannot be opened.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(INDEX_FILE);
        if !path.is_file() {
            return Err(store_error(format!(
                "no vector store found at {}; run ingestion first",
                path.display()
            )));
        }

        let options = SqliteConnectOptions::new().filename(&path).read_only(true);
        let pool = connect(options).await?;

        debug!(path = %path.display(), "opened vector store");
        Ok(Self { pool, path })
    }

    /// Create (or open read-write) a store under `dir`, initializing the
    /// schema. The directory is created if missing.
    pub async fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| store_error(format!("cannot create {}: {e}", dir.display())))?;
        let path = dir.join(INDEX_FILE);

        // Rollback journal rather than WAL so a cleanly closed store can be
        // reopened read-only without sidecar files.
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);
        let pool = connect(options).await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                text TEXT NOT NULL,
                metadata TEXT NOT NULL DEFAULT '{}',
                embedding BLOB NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| store_error(format!("schema initialization failed: {e}")))?;

        info!(path = %path.display(), "created vector store");
        Ok(Self { pool, path })
    }

    /// Filesystem path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the connection pool, flushing any pending writes.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn connect(options: SqliteConnectOptions) -> Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| store_error(format!("cannot open database: {e}")))
}

fn store_error(message: String) -> RagError {
    RagError::Store { backend: BACKEND.into(), message }
}

fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn decode_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

#[async_trait]
impl VectorStore for SqliteVectorStore {
    async fn add(&self, documents: &[StoredDocument]) -> Result<()> {
        for stored in documents {
            let metadata = serde_json::to_string(&stored.document.metadata)
                .map_err(|e| store_error(format!("metadata serialization failed: {e}")))?;

            sqlx::query(
                "INSERT OR REPLACE INTO documents (id, text, metadata, embedding)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(&stored.document.id)
            .bind(&stored.document.text)
            .bind(metadata)
            .bind(encode_embedding(&stored.embedding))
            .execute(&self.pool)
            .await
            .map_err(|e| store_error(format!("insert failed: {e}")))?;
        }
        Ok(())
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let rows = sqlx::query("SELECT id, text, metadata, embedding FROM documents")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(format!("query failed: {e}")))?;

        let mut scored = Vec::with_capacity(rows.len());
        for row in rows {
            let metadata: HashMap<String, String> =
                serde_json::from_str(row.get::<&str, _>("metadata"))
                    .map_err(|e| store_error(format!("corrupt metadata: {e}")))?;
            let stored_embedding = decode_embedding(row.get::<&[u8], _>("embedding"));

            scored.push(SearchResult {
                document: Document {
                    id: row.get("id"),
                    text: row.get("text"),
                    metadata,
                },
                score: cosine_similarity(&stored_embedding, embedding),
            });
        }

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn len(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(format!("count failed: {e}")))?;
        let n: i64 = row.get("n");
        Ok(n as usize)
    }
}
