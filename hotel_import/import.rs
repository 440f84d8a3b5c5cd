use tracing::{error, warn};

use crate::db::{HotelStore, StoreError};
use crate::parse::{parse_rating, ExportBlock};

#[derive(Debug, Default, PartialEq)]
pub struct ImportStats {
    pub processed: usize,
    pub created: usize,
    pub duplicates: usize,
    pub incomplete: usize,
    pub failed: usize,
}

impl ImportStats {
    pub fn print(&self) {
        println!(
            "Processed {} blocks: {} created, {} duplicates skipped, {} incomplete, {} failed.",
            self.processed, self.created, self.duplicates, self.incomplete, self.failed,
        );
    }
}

/// Insert every complete block once. Duplicates and incomplete blocks are
/// skipped; other store errors are counted and the pass continues.
pub fn import_blocks<S: HotelStore>(store: &mut S, blocks: Vec<ExportBlock>) -> ImportStats {
    let mut stats = ImportStats::default();

    for block in blocks {
        stats.processed += 1;

        if let Some(raw) = block.rating.as_deref() {
            if parse_rating(raw).is_none() {
                warn!(rating = raw, name = ?block.name, "Invalid rating, storing without one");
            }
        }

        let label = block.name.clone().or_else(|| block.url.clone());
        let Some(hotel) = block.into_new_hotel() else {
            warn!(hotel = ?label, "Missing name or url, skipping block");
            stats.incomplete += 1;
            continue;
        };

        match store.create_hotel(&hotel) {
            Ok(_) => stats.created += 1,
            Err(StoreError::Duplicate { url }) => {
                warn!(url = %url, name = %hotel.name, "Skipping duplicate url");
                stats.duplicates += 1;
            }
            Err(err) => {
                error!(url = %hotel.url, error = %err, "Failed to store hotel");
                stats.failed += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{self, NewHotel, SqliteStore};
    use crate::parse::parse_export;
    use rusqlite::Connection;

    /// Rejects every insert with a non-duplicate error.
    struct BrokenStore;

    impl HotelStore for BrokenStore {
        fn create_hotel(&mut self, _hotel: &NewHotel) -> Result<i64, StoreError> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }

        fn clear(&mut self) -> Result<usize, StoreError> {
            Ok(0)
        }

        fn count(&self) -> Result<usize, StoreError> {
            Ok(0)
        }
    }

    #[test]
    fn fixture_import_suppresses_duplicates() {
        let text = std::fs::read_to_string("tests/fixtures/hotel_details.txt").unwrap();
        let conn = Connection::open_in_memory().unwrap();
        db::create_tables(&conn).unwrap();
        let mut store = SqliteStore::new(&conn);

        let stats = import_blocks(&mut store, parse_export(&text));
        assert_eq!(
            stats,
            ImportStats {
                processed: 5,
                created: 3,
                duplicates: 1,
                incomplete: 1,
                failed: 0,
            }
        );
        assert_eq!(store.count().unwrap(), 3);

        let name: String = conn
            .query_row(
                "SELECT name FROM hotels WHERE url = 'https://www.booking.com/hotel/tr/pera-palace.html'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(name, "Pera Palace");

        let rating: Option<f64> = conn
            .query_row(
                "SELECT rating FROM hotels WHERE name = 'Sultanahmet Inn'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(rating, Some(8.7));
    }

    #[test]
    fn rerun_only_finds_duplicates() {
        let text = std::fs::read_to_string("tests/fixtures/hotel_details.txt").unwrap();
        let conn = Connection::open_in_memory().unwrap();
        db::create_tables(&conn).unwrap();
        let mut store = SqliteStore::new(&conn);

        import_blocks(&mut store, parse_export(&text));
        let second = import_blocks(&mut store, parse_export(&text));
        assert_eq!(second.created, 0);
        assert_eq!(second.duplicates, 4);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn store_failures_do_not_abort() {
        let blocks = parse_export("Name: A\nURL: https://a\n===\nName: B\nURL: https://b\n");
        let stats = import_blocks(&mut BrokenStore, blocks);
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.created, 0);
    }
}
