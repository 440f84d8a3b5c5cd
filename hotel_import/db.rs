use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct NewHotel {
    pub name: String,
    pub url: String,
    pub location: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("hotel with url {url} already exists")]
    Duplicate { url: String },
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Create contract the importer writes through.
pub trait HotelStore {
    /// Insert a hotel and return its id. A url that is already stored yields
    /// `StoreError::Duplicate`.
    fn create_hotel(&mut self, hotel: &NewHotel) -> Result<i64, StoreError>;
    fn clear(&mut self) -> Result<usize, StoreError>;
    fn count(&self) -> Result<usize, StoreError>;
}

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }
    let conn = Connection::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS hotels (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            url         TEXT UNIQUE NOT NULL,
            location    TEXT,
            rating      REAL,
            imported_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_hotels_name ON hotels(name);
        ",
    )?;
    Ok(())
}

pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SqliteStore { conn }
    }
}

impl HotelStore for SqliteStore<'_> {
    fn create_hotel(&mut self, hotel: &NewHotel) -> Result<i64, StoreError> {
        let inserted = self.conn.execute(
            "INSERT INTO hotels (name, url, location, rating) VALUES (?1, ?2, ?3, ?4)",
            params![hotel.name, hotel.url, hotel.location, hotel.rating],
        );
        match inserted {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(StoreError::Duplicate {
                    url: hotel.url.clone(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn clear(&mut self) -> Result<usize, StoreError> {
        Ok(self.conn.execute("DELETE FROM hotels", [])?)
    }

    fn count(&self) -> Result<usize, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM hotels", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn hotel(name: &str, url: &str) -> NewHotel {
        NewHotel {
            name: name.to_string(),
            url: url.to_string(),
            location: Some("Fatih, Istanbul".to_string()),
            rating: Some(8.1),
        }
    }

    #[test]
    fn create_and_count() {
        let conn = memory();
        let mut store = SqliteStore::new(&conn);
        let first = store.create_hotel(&hotel("A", "https://a")).unwrap();
        let second = store.create_hotel(&hotel("B", "https://b")).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.count().unwrap(), 2);

        let (location, rating): (Option<String>, Option<f64>) = conn
            .query_row(
                "SELECT location, rating FROM hotels WHERE url = 'https://a'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(location.as_deref(), Some("Fatih, Istanbul"));
        assert_eq!(rating, Some(8.1));
    }

    #[test]
    fn duplicate_url_is_distinct_error() {
        let conn = memory();
        let mut store = SqliteStore::new(&conn);
        store.create_hotel(&hotel("A", "https://a")).unwrap();
        let err = store.create_hotel(&hotel("A again", "https://a")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { ref url } if url == "https://a"));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn other_failures_are_not_duplicates() {
        let conn = Connection::open_in_memory().unwrap();
        let mut store = SqliteStore::new(&conn);
        let err = store.create_hotel(&hotel("A", "https://a")).unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)));
    }

    #[test]
    fn clear_removes_everything() {
        let conn = memory();
        let mut store = SqliteStore::new(&conn);
        store.create_hotel(&hotel("A", "https://a")).unwrap();
        store.create_hotel(&hotel("B", "https://b")).unwrap();
        assert_eq!(store.clear().unwrap(), 2);
        assert_eq!(store.count().unwrap(), 0);
    }
}
