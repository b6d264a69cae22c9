//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, Params, params};
use tracing::{debug, info};
use crate::{Result, Error};
use crate::item::{Item, ItemStatus, OrderBy};
use super::{export, schema};

/// Format of `created_at`: local time, second precision
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// SQLite-backed storage for items
pub struct ItemStore {
    conn: Connection,
}

impl ItemStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        info!("Opened item store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema. Safe to run against an existing store.
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Close the connection, reporting any failure to release it.
    ///
    /// Dropping the store closes it as well; this variant surfaces the error.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::from(e))
    }

    // ========== Item Operations ==========

    /// Insert a new available item and return its id.
    ///
    /// `name` and `contact` are trusted to be non-empty; validate with
    /// [`crate::NewItem::parse`] first.
    pub fn add_item(&self, name: &str, description: &str, contact: &str, price: f64) -> Result<i64> {
        if !price.is_finite() {
            return Err(Error::InvalidPrice(price.to_string()));
        }

        let created_at = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.conn.execute(
            r#"
            INSERT INTO items (name, description, contact, price, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                name,
                description,
                contact,
                price,
                ItemStatus::Available.as_str(),
                created_at,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(id, name, "Inserted item");
        Ok(id)
    }

    /// Delete an item by id. Returns the number of rows removed (0 or 1).
    pub fn delete_item(&self, id: i64) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM items WHERE id = ?1", [id])?;
        debug!(id, removed, "Deleted item");
        Ok(removed)
    }

    /// List up to `limit` items sorted on `order_by`, newest/largest first
    /// unless `ascending`.
    ///
    /// Accepts an [`OrderBy`] or any string; unknown keys sort by `created_at`.
    pub fn list_items(&self, limit: usize, order_by: impl Into<OrderBy>, ascending: bool) -> Result<Vec<Item>> {
        let order_by = order_by.into();
        let direction = if ascending { "ASC" } else { "DESC" };
        let sql = format!(
            "SELECT {columns} FROM items ORDER BY {key} {dir}, id {dir} LIMIT ?1",
            columns = schema::ITEM_COLUMNS,
            key = order_by.column(),
            dir = direction,
        );

        debug!(limit, %order_by, ascending, "Listing items");
        self.query_items(&sql, params![sql_limit(limit)])
    }

    /// Find items whose name or description contains `query`, newest first.
    ///
    /// Matching follows SQLite `LIKE` (case-insensitive for ASCII). Wildcard
    /// characters in `query` match literally. An empty query matches everything.
    pub fn search_items(&self, query: &str, limit: usize) -> Result<Vec<Item>> {
        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            r"SELECT {columns} FROM items
              WHERE name LIKE ?1 ESCAPE '\' OR description LIKE ?1 ESCAPE '\'
              ORDER BY created_at DESC, id DESC
              LIMIT ?2",
            columns = schema::ITEM_COLUMNS,
        );

        debug!(query, limit, "Searching items");
        self.query_items(&sql, params![pattern, sql_limit(limit)])
    }

    /// Write every item, oldest first, to a CSV file at `destination`.
    ///
    /// An existing file is overwritten. Returns the number of items written.
    pub fn export_csv(&self, destination: &Path) -> Result<usize> {
        let sql = format!(
            "SELECT {} FROM items ORDER BY created_at ASC, id ASC",
            schema::ITEM_COLUMNS
        );
        let items = self.query_items(&sql, params![])?;
        let written = export::write_csv(destination, &items)?;
        info!("Exported {} items to {}", written, destination.display());
        Ok(written)
    }

    /// Count all items
    pub fn count_items(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get store statistics
    pub fn stats(&self) -> Result<StoreStats> {
        let stats = self.conn.query_row(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(price = 0), 0),
                   COALESCE(SUM(status = 'available'), 0),
                   COALESCE(SUM(price), 0.0)
            FROM items
            "#,
            [],
            |row| {
                Ok(StoreStats {
                    items: row.get::<_, i64>(0)? as usize,
                    gifts: row.get::<_, i64>(1)? as usize,
                    available: row.get::<_, i64>(2)? as usize,
                    total_price: row.get(3)?,
                })
            },
        )?;
        Ok(stats)
    }

    fn query_items<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(sql)?;
        let items = stmt
            .query_map(params, Self::row_to_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    /// Helper to convert a row (in `ITEM_COLUMNS` order) to an Item
    fn row_to_item(row: &rusqlite::Row) -> rusqlite::Result<Item> {
        let status_str: String = row.get(5)?;
        let status: ItemStatus = status_str.parse().map_err(|e: Error| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Item {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            contact: row.get(3)?,
            price: row.get(4)?,
            status,
            created_at: row.get(6)?,
        })
    }
}

/// SQLite treats a negative LIMIT as unbounded, so saturate instead of wrapping.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Escape `LIKE` wildcards so the query matches as a plain substring
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Store statistics
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    pub items: usize,
    pub gifts: usize,
    pub available: usize,
    /// Sum of all asking prices
    pub total_price: f64,
}
