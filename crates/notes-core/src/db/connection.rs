//! Database connection management

use crate::config::{StoreConfig, StoreLocation};
use crate::error::Result;
use libsql::{Builder, Connection, Database as LibSqlDatabase};
use std::path::Path;

use super::schema;

/// Database wrapper for a single libSQL connection
///
/// Built explicitly by the caller and handed to the data-access layer; there
/// is no process-wide instance.
pub struct Database {
    // Keeps the underlying database alive for as long as `conn` is used.
    _db: LibSqlDatabase,
    conn: Connection,
    location: StoreLocation,
}

impl Database {
    /// Open a local database at the given path, creating it if it doesn't exist
    ///
    /// Ensures the note table exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let path_str = path.to_string_lossy().to_string();
        let db = Builder::new_local(&path_str).build().await?;
        let conn = db.connect()?;

        let database = Self {
            _db: db,
            conn,
            location: StoreLocation::File {
                path: path.to_path_buf(),
            },
        };
        database.configure().await;
        schema::ensure(&database.conn).await?;
        tracing::info!("Opened note store at {}", path.display());
        Ok(database)
    }

    /// Open an in-memory database (useful for testing)
    pub async fn open_in_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;
        let conn = db.connect()?;

        let database = Self {
            _db: db,
            conn,
            location: StoreLocation::InMemory,
        };
        schema::ensure(&database.conn).await?;
        tracing::info!("Opened in-memory note store");
        Ok(database)
    }

    /// Open the store described by `config`
    pub async fn open_with(config: &StoreConfig) -> Result<Self> {
        match &config.location {
            StoreLocation::File { path } => Self::open(path).await,
            StoreLocation::InMemory => Self::open_in_memory().await,
        }
    }

    /// Configure `SQLite` for a single local writer
    async fn configure(&self) {
        // PRAGMA journal_mode returns a row, which some builds reject on execute
        self.conn
            .execute("PRAGMA journal_mode = WAL;", ())
            .await
            .ok();
        self.conn
            .execute("PRAGMA synchronous = NORMAL;", ())
            .await
            .ok();
    }

    /// Where this database lives
    pub const fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
